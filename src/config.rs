use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub content: ContentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Where the YAML records live
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Root directory of entity records. Each subdirectory is a category;
    /// the relationships subdirectory holds edge records instead.
    pub data_dir: PathBuf,
    #[serde(default = "default_relationships_subdir")]
    pub relationships_subdir: String,
}

/// Where snapshots are written
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub data_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_output_dir(),
        }
    }
}

/// Payload rendering options
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub type_class_style: TypeClassStyle,
    /// Indent graph payloads instead of minifying them.
    #[serde(default)]
    pub pretty: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            type_class_style: TypeClassStyle::default(),
            pretty: false,
        }
    }
}

/// External artifact inbox (search index and vector files produced outside
/// this pipeline, dropped in by a separate processing step)
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_inbox_dir")]
    pub inbox_dir: PathBuf,
    #[serde(default = "default_search_index_file")]
    pub search_index_file: String,
    /// Subdirectory of the output dir receiving the vector artifacts.
    #[serde(default = "default_artifacts_subdir")]
    pub artifacts_subdir: String,
    #[serde(default = "default_artifact_files")]
    pub artifact_files: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            inbox_dir: default_inbox_dir(),
            search_index_file: default_search_index_file(),
            artifacts_subdir: default_artifacts_subdir(),
            artifact_files: default_artifact_files(),
        }
    }
}

/// How an organization-like style class is rendered in the explorer views:
/// `short` gives `org`, `model` gives `organization`, `passthrough` leaves
/// classes untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TypeClassStyle {
    Passthrough,
    #[default]
    Short,
    Model,
}

fn default_relationships_subdir() -> String {
    "relationships".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs/data")
}

fn default_inbox_dir() -> PathBuf {
    PathBuf::from("data_externally_processed")
}

fn default_search_index_file() -> String {
    "search_index.json".to_string()
}

fn default_artifacts_subdir() -> String {
    "artifacts".to_string()
}

fn default_artifact_files() -> Vec<String> {
    vec![
        "graph_index.faiss".to_string(),
        "graph_chunks.parquet".to_string(),
        "graph_vectors.parquet".to_string(),
        "state.json".to_string(),
    ]
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in CARTOGRAPH_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let config_path = std::env::var("CARTOGRAPH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .context("Failed to parse config.toml")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !self.content.data_dir.exists() {
            anyhow::bail!(
                "content.data_dir does not exist: {}. Set it in config.toml to your records directory.",
                self.content.data_dir.display()
            );
        }

        if !self.content.data_dir.is_dir() {
            anyhow::bail!(
                "content.data_dir must be a directory, not a file: {}",
                self.content.data_dir.display()
            );
        }

        if self.content.relationships_subdir.is_empty() {
            anyhow::bail!("content.relationships_subdir must not be empty");
        }

        if self.sync.artifacts_subdir.is_empty() {
            anyhow::bail!("sync.artifacts_subdir must not be empty");
        }

        Ok(())
    }

    /// Root directory of entity records
    pub fn data_dir(&self) -> &Path {
        &self.content.data_dir
    }

    /// Directory snapshots are written to
    pub fn output_dir(&self) -> &Path {
        &self.output.data_dir
    }

    /// Last component of the content dir, used as the provenance prefix in
    /// every `source_path`
    pub fn content_dir_name(&self) -> String {
        self.content
            .data_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "data".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide cwd and env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn create_test_config(temp_dir: &TempDir) -> String {
        let data_dir = temp_dir.path().join("data_yml");
        fs::create_dir_all(&data_dir).unwrap();
        let data_dir_str = data_dir.to_str().unwrap().replace('\\', "\\\\");
        format!(
            r#"
[content]
data_dir = "{}"

[output]
data_dir = "./docs/data"

[build]
type_class_style = "model"
"#,
            data_dir_str
        )
    }

    fn with_config_env(config_path: &Path, f: impl FnOnce()) {
        let original = std::env::var("CARTOGRAPH_CONFIG").ok();
        std::env::set_var("CARTOGRAPH_CONFIG", config_path.to_str().unwrap());
        f();
        std::env::remove_var("CARTOGRAPH_CONFIG");
        if let Some(val) = original {
            std::env::set_var("CARTOGRAPH_CONFIG", val);
        }
    }

    #[test]
    fn test_config_load_success() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, create_test_config(&temp_dir)).unwrap();

        with_config_env(&config_path, || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.build.type_class_style, TypeClassStyle::Model);
            assert_eq!(config.content.relationships_subdir, "relationships");
            assert_eq!(config.content_dir_name(), "data_yml");
            // Unset sections fall back to defaults
            assert_eq!(config.sync.search_index_file, "search_index.json");
            assert_eq!(config.sync.artifact_files.len(), 4);
        });
    }

    #[test]
    fn test_config_missing_data_dir_rejected() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[content]\ndata_dir = \"/nonexistent/records\"\n",
        )
        .unwrap();

        with_config_env(&config_path, || {
            let config = Config::load();
            assert!(config.is_err());
            assert!(config
                .unwrap_err()
                .to_string()
                .contains("content.data_dir does not exist"));
        });
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let original = std::env::var("CARTOGRAPH_CONFIG").ok();
        std::env::set_var("CARTOGRAPH_CONFIG", "nonexistent.toml");
        let config = Config::load();
        assert!(config.is_err());
        std::env::remove_var("CARTOGRAPH_CONFIG");
        if let Some(v) = original {
            std::env::set_var("CARTOGRAPH_CONFIG", v);
        }
    }

    #[test]
    fn test_style_default_is_short() {
        assert_eq!(TypeClassStyle::default(), TypeClassStyle::Short);
        let build: BuildConfig = toml::from_str("").unwrap();
        assert_eq!(build.type_class_style, TypeClassStyle::Short);
        assert!(!build.pretty);
    }
}
