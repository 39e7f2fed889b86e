//! @ai:module:intent Configuration structs for the TamilNadai benchmark
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkConfig, ApiConfig, RunConfig, PathConfig
//! @ai:module:stateless true

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Split name that disables split filtering.
pub const ALL_SPLITS: &str = "all";

/// @ai:intent Main configuration for the benchmark system
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub api: ApiConfig,
    pub run: RunConfig,
    pub paths: PathConfig,
}

/// @ai:intent Model API configuration shared by every provider
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Seconds to wait between consecutive model calls
    pub delay_secs: f64,
}

/// @ai:intent Run configuration for an evaluation pass
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// `test`, `validation` or `all`
    pub split: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub dry_run: bool,
}

/// @ai:intent Path configuration for the dataset and result files
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub dataset: PathBuf,
    pub results_dir: PathBuf,
    pub env_file: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: 500,
            temperature: 0.0,
            timeout_secs: 30,
            delay_secs: 0.5,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            split: "test".to_string(),
            limit: None,
            dry_run: false,
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("dataset/tamilnadai_v1.jsonl"),
            results_dir: PathBuf::from("results"),
            env_file: PathBuf::from(".env"),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

impl BenchmarkConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Load the given file, else ./benchmark.toml, else defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new("benchmark.toml");

                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

impl RunConfig {
    /// @ai:intent Split to filter on, `None` when every split is evaluated
    /// @ai:effects pure
    pub fn split_filter(&self) -> Option<&str> {
        split_filter(&self.split)
    }
}

/// @ai:intent Map a split name to a filter, treating `all` and "" as no filter
/// @ai:effects pure
pub fn split_filter(split: &str) -> Option<&str> {
    let split = split.trim();

    if split.is_empty() || split.eq_ignore_ascii_case(ALL_SPLITS) {
        None
    } else {
        Some(split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_filter_all_disables_filtering() {
        assert_eq!(split_filter("all"), None);
        assert_eq!(split_filter("ALL"), None);
        assert_eq!(split_filter(""), None);
        assert_eq!(split_filter("test"), Some("test"));
        assert_eq!(split_filter(" validation "), Some("validation"));
    }

    #[test]
    fn test_default_run_config_evaluates_test_split() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.run.split_filter(), Some("test"));
        assert_eq!(config.api.model, "gpt-4o-mini");
        assert!((config.api.delay_secs - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: BenchmarkConfig = toml::from_str(
            r#"
[api]
model = "gemini-2.0-flash"

[run]
limit = 25
"#,
        )
        .unwrap();

        assert_eq!(config.api.model, "gemini-2.0-flash");
        assert_eq!(config.api.max_tokens, 500);
        assert_eq!(config.run.limit, Some(25));
        assert_eq!(config.run.split, "test");
        assert_eq!(config.paths.results_dir, PathBuf::from("results"));
    }

    #[test]
    fn test_save_and_load_preserves_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("benchmark.toml");

        let mut config = BenchmarkConfig::default();
        config.api.model = "claude-haiku-4-5-20251001".to_string();
        config.run.split = "validation".to_string();
        config.save(&path).unwrap();

        let loaded = BenchmarkConfig::load(&path).unwrap();
        assert_eq!(loaded.api.model, "claude-haiku-4-5-20251001");
        assert_eq!(loaded.run.split_filter(), Some("validation"));
        assert_eq!(loaded.run.limit, None);
    }
}
