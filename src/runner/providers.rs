//! @ai:module:intent Supported models, their providers and API key lookup
//! @ai:module:layer infrastructure
//! @ai:module:public_api Provider, ModelSpec, SUPPORTED_MODELS, lookup_model, resolve_api_key, model_short_name
//! @ai:module:stateless true

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Hosted LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
}

impl Provider {
    /// @ai:intent Convert provider to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent A model id the runner knows how to call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub id: &'static str,
    pub provider: Provider,
    /// Environment variable holding the provider's API key
    pub env_key: &'static str,
}

pub const SUPPORTED_MODELS: &[ModelSpec] = &[
    ModelSpec {
        id: "gpt-4o",
        provider: Provider::OpenAi,
        env_key: "OPENAI_API_KEY",
    },
    ModelSpec {
        id: "gpt-4o-mini",
        provider: Provider::OpenAi,
        env_key: "OPENAI_API_KEY",
    },
    ModelSpec {
        id: "claude-sonnet-4-5-20250929",
        provider: Provider::Anthropic,
        env_key: "ANTHROPIC_API_KEY",
    },
    ModelSpec {
        id: "claude-haiku-4-5-20251001",
        provider: Provider::Anthropic,
        env_key: "ANTHROPIC_API_KEY",
    },
    ModelSpec {
        id: "gemini-2.0-flash",
        provider: Provider::Google,
        env_key: "GOOGLE_API_KEY",
    },
    ModelSpec {
        id: "gemini-2.0-flash-lite",
        provider: Provider::Google,
        env_key: "GOOGLE_API_KEY",
    },
];

/// @ai:intent Find a supported model by id
/// @ai:effects pure
pub fn lookup_model(model: &str) -> Result<&'static ModelSpec> {
    SUPPORTED_MODELS
        .iter()
        .find(|spec| spec.id == model)
        .ok_or_else(|| {
            let supported: Vec<_> = SUPPORTED_MODELS.iter().map(|s| s.id).collect();
            anyhow::anyhow!("Unknown model: {}. Supported: {}", model, supported.join(", "))
        })
}

/// @ai:intent Resolve a key from the flag, then the environment, then the .env file
/// @ai:effects env, fs:read
pub fn resolve_api_key(spec: &ModelSpec, explicit: Option<&str>, env_file: &Path) -> Result<String> {
    resolve_api_key_with(spec, explicit, env_file, |name| std::env::var(name).ok())
}

/// @ai:intent Key resolution with an injectable environment lookup
/// @ai:effects fs:read
pub fn resolve_api_key_with<F>(
    spec: &ModelSpec,
    explicit: Option<&str>,
    env_file: &Path,
    env: F,
) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = non_empty(explicit.map(str::to_string)) {
        return Ok(key);
    }

    if let Some(key) = non_empty(env(spec.env_key)) {
        return Ok(key);
    }

    if env_file.exists() {
        if let Some(key) = non_empty(read_env_file_key(env_file, spec.env_key)?) {
            tracing::debug!("Using {} from {}", spec.env_key, env_file.display());
            return Ok(key);
        }
    }

    anyhow::bail!(
        "No API key found. Set {} env variable or pass --api-key.",
        spec.env_key
    )
}

/// @ai:intent Whether a key can be resolved without an explicit flag
/// @ai:effects env, fs:read
pub fn has_api_key(spec: &ModelSpec, env_file: &Path) -> bool {
    resolve_api_key(spec, None, env_file).is_ok()
}

/// @ai:intent Read `KEY=value` from a dotenv-style file, stripping quotes
/// @ai:effects fs:read
pub fn read_env_file_key(path: &Path, key: &str) -> Result<Option<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read env file: {}", path.display()))?;
    Ok(parse_env_value(&content, key))
}

fn parse_env_value(content: &str, key: &str) -> Option<String> {
    let pattern = format!(r"^\s*(?:export\s+)?{}\s*=\s*(.*?)\s*$", regex::escape(key));
    let line_re = Regex::new(&pattern).ok()?;

    content
        .lines()
        .find_map(|line| line_re.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|value| {
            value
                .as_str()
                .trim_matches('"')
                .trim_matches('\'')
                .to_string()
        })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// @ai:intent File-name-safe model name (`/` and `.` become `-`)
/// @ai:effects pure
pub fn model_short_name(model: &str) -> String {
    model.replace(['/', '.'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn openai() -> &'static ModelSpec {
        lookup_model("gpt-4o-mini").unwrap()
    }

    #[test]
    fn test_lookup_known_models() {
        assert_eq!(openai().provider, Provider::OpenAi);
        assert_eq!(
            lookup_model("claude-sonnet-4-5-20250929").unwrap().env_key,
            "ANTHROPIC_API_KEY"
        );
        assert_eq!(lookup_model("gemini-2.0-flash").unwrap().provider, Provider::Google);
    }

    #[test]
    fn test_unknown_model_lists_supported() {
        let err = lookup_model("llama-3").unwrap_err().to_string();
        assert!(err.contains("Unknown model: llama-3"));
        assert!(err.contains("gpt-4o-mini"));
        assert!(err.contains("gemini-2.0-flash-lite"));
    }

    #[test]
    fn test_explicit_key_wins() {
        let key = resolve_api_key_with(openai(), Some("flag-key"), Path::new("missing.env"), |_| {
            Some("env-key".to_string())
        })
        .unwrap();
        assert_eq!(key, "flag-key");
    }

    #[test]
    fn test_environment_before_env_file() {
        let temp = TempDir::new().unwrap();
        let env_file = temp.path().join(".env");
        std::fs::write(&env_file, "OPENAI_API_KEY=file-key\n").unwrap();

        let key = resolve_api_key_with(openai(), None, &env_file, |_| Some("env-key".to_string())).unwrap();
        assert_eq!(key, "env-key");
    }

    #[test]
    fn test_env_file_fallback_strips_quotes() {
        let temp = TempDir::new().unwrap();
        let env_file = temp.path().join(".env");
        std::fs::write(
            &env_file,
            "# keys\nANTHROPIC_API_KEY=other\nOPENAI_API_KEY=\"file-key\"\n",
        )
        .unwrap();

        let key = resolve_api_key_with(openai(), None, &env_file, |_| None).unwrap();
        assert_eq!(key, "file-key");
    }

    #[test]
    fn test_missing_key_is_error() {
        let err = resolve_api_key_with(openai(), Some(""), Path::new("missing.env"), |_| None)
            .unwrap_err()
            .to_string();
        assert!(err.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_parse_env_value_handles_export_and_spacing() {
        let content = "export GOOGLE_API_KEY = 'g-key' \nGOOGLE_API_KEY_OLD=x";
        assert_eq!(parse_env_value(content, "GOOGLE_API_KEY"), Some("g-key".to_string()));
        assert_eq!(parse_env_value(content, "OPENAI_API_KEY"), None);
    }

    #[test]
    fn test_model_short_name() {
        assert_eq!(model_short_name("gpt-4o-mini"), "gpt-4o-mini");
        assert_eq!(model_short_name("gemini-2.0-flash"), "gemini-2-0-flash");
        assert_eq!(model_short_name("org/model.v1"), "org-model-v1");
    }
}
