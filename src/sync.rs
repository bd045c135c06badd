//! External artifact sync.
//!
//! A separate processing step leaves a search index and vector artifacts in
//! an inbox directory. This module copies them into the published output
//! tree and reports one tagged message per file, so a build log shows at a
//! glance what changed.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::SyncConfig;
use crate::error::Result;

/// Compute SHA256 hash of file contents
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let content = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    let hash = hasher.finalize();
    Ok(format!("{:x}", hash))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Copy `src` over `dst` and describe what happened.
///
/// Hash failures come back as `[warn]` messages rather than errors; only the
/// copy itself can fail the build. With `verify_hash` the report
/// distinguishes an identical re-drop from a real content change.
pub fn copy_with_report(src: &Path, dst: &Path, verify_hash: bool) -> Result<String> {
    let src_name = file_name(src);
    let dst_name = file_name(dst);

    if !src.exists() {
        let parent = src.parent().map(|p| p.display().to_string()).unwrap_or_default();
        return Ok(format!("[miss] {} not present in {}", src_name, parent));
    }

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    let old_size = dst.metadata().ok().map(|m| m.len());
    let new_size = src.metadata()?.len();

    let mut old_hash = None;
    let mut new_hash = None;
    if verify_hash && dst.exists() {
        match compute_file_hash(dst) {
            Ok(hash) => old_hash = Some(hash),
            Err(err) => {
                return Ok(format!("[warn] could not hash existing {}, {}", dst_name, err))
            }
        }
    }
    if verify_hash {
        match compute_file_hash(src) {
            Ok(hash) => new_hash = Some(hash),
            Err(err) => return Ok(format!("[warn] could not hash source {}, {}", src_name, err)),
        }
    }

    fs::copy(src, dst)?;

    let Some(old_size) = old_size else {
        return Ok(format!("[create] {}, size {} bytes", dst_name, new_size));
    };
    if let (Some(old), Some(new)) = (old_hash, new_hash) {
        if old == new {
            return Ok(format!("[unchanged] {} (hash equal)", dst_name));
        }
        return Ok(format!(
            "[overwritten] {} (old {}, new {})",
            dst_name, old_size, new_size
        ));
    }
    let status = if old_size != new_size { "overwritten" } else { "replaced" };
    Ok(format!(
        "[{}] {}, old {}, new {} bytes",
        status, dst_name, old_size, new_size
    ))
}

/// Pull the search index and every configured artifact from the inbox into
/// the output tree. A missing inbox is a skip, not an error.
pub fn ingest_external(
    sync: &SyncConfig,
    output_dir: &Path,
    verify_hash: bool,
) -> Result<Vec<String>> {
    let mut messages = Vec::new();

    if !sync.inbox_dir.exists() {
        messages.push(format!(
            "[skip] external inbox not found, {}",
            sync.inbox_dir.display()
        ));
        return Ok(messages);
    }

    // Search index lands next to the graph payloads
    let src = sync.inbox_dir.join(&sync.search_index_file);
    let dst = output_dir.join(&sync.search_index_file);
    messages.push(copy_with_report(&src, &dst, verify_hash)?);

    // Vector artifacts get their own subdirectory
    let artifacts_dir = output_dir.join(&sync.artifacts_subdir);
    for name in &sync.artifact_files {
        let src = sync.inbox_dir.join(name);
        let dst = artifacts_dir.join(name);
        messages.push(copy_with_report(&src, &dst, verify_hash)?);
    }

    Ok(messages)
}
