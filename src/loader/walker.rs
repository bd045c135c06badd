use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// A discovered YAML record file.
#[derive(Debug, Clone)]
pub struct RecordFile {
    /// Path relative to the content root, always with forward slashes.
    pub relative_path: String,
    pub absolute_path: PathBuf,
    /// First path segment: the category directory for entity records,
    /// or the relationships directory name for relationship records.
    pub category: String,
    /// File name without the `.yaml` extension.
    pub stem: String,
}

/// Authoring scaffolding that must never become a graph node:
/// `template*.yaml` (any case) and `0_`-prefixed files.
pub fn is_excluded_name(file_name: &str) -> bool {
    file_name.to_lowercase().starts_with("template") || file_name.starts_with("0_")
}

/// Discover entity records under the content root.
///
/// Entity records live exactly one directory deep (`<category>/<file>.yaml`);
/// files at the root and deeper nesting are ignored, as is the relationships
/// directory. The result is sorted by relative path so every run visits
/// records in the same order.
pub fn discover_entity_records(data_dir: &Path, relationships_subdir: &str) -> Vec<RecordFile> {
    let mut files = Vec::new();

    for entry in WalkDir::new(data_dir)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let Some(record) = record_file(path, data_dir) else {
            continue;
        };

        if record.category == relationships_subdir {
            continue;
        }

        files.push(record);
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    log::info!(
        "Discovered {} entity records in {}",
        files.len(),
        data_dir.display()
    );
    files
}

/// Discover relationship records directly inside the relationships directory.
/// A missing directory yields an empty list. Sorted by relative path.
pub fn discover_relationship_records(data_dir: &Path, relationships_subdir: &str) -> Vec<RecordFile> {
    let rel_dir = data_dir.join(relationships_subdir);
    if !rel_dir.is_dir() {
        log::warn!("Relationships directory not found: {}", rel_dir.display());
        return Vec::new();
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(&rel_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(record) = record_file(path, data_dir) {
            files.push(record);
        }
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    log::info!(
        "Discovered {} relationship records in {}",
        files.len(),
        rel_dir.display()
    );
    files
}

/// Build a [`RecordFile`] for a `.yaml` path, or `None` when the file is not
/// a YAML record, is excluded by name, or falls outside the content root.
fn record_file(path: &Path, data_dir: &Path) -> Option<RecordFile> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "yaml" {
        return None;
    }

    let file_name = path.file_name()?.to_string_lossy();
    if is_excluded_name(&file_name) {
        return None;
    }

    let relative_path = path
        .strip_prefix(data_dir)
        .ok()?
        .to_string_lossy()
        .replace('\\', "/");

    let category = relative_path.split('/').next().unwrap_or("").to_string();
    let stem = path.file_stem()?.to_string_lossy().to_string();

    Some(RecordFile {
        relative_path,
        absolute_path: path.to_path_buf(),
        category,
        stem,
    })
}
