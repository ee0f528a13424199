//! Configuration loader for manmaru.
//!
//! Reads `config.toml` from the data directory (`~/.manmaru/` by default)
//! into [`RelayConfig`], then layers `MANMARU_*` environment overrides on
//! top. A missing file yields defaults; an unreadable or malformed file is
//! logged and also yields defaults.

use std::path::{Path, PathBuf};

use manmaru_types::config::RelayConfig;
use manmaru_types::error::ConfigError;

/// Resolve the data directory.
///
/// `MANMARU_DATA_DIR` wins, then `~/.manmaru`, then `./.manmaru`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MANMARU_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".manmaru");
    }

    PathBuf::from(".manmaru")
}

/// Read and parse a config file. `Ok(None)` when the file does not exist.
pub async fn read_config_file(path: &Path) -> Result<Option<RelayConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Io(format!("{}: {err}", path.display()))),
    };

    toml::from_str::<RelayConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse(format!("{}: {err}", path.display())))
}

/// Load configuration from `{data_dir}/config.toml`, falling back to defaults.
pub async fn load_relay_config(data_dir: &Path) -> RelayConfig {
    let config_path = data_dir.join("config.toml");

    match read_config_file(&config_path).await {
        Ok(Some(config)) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            config
        }
        Ok(None) => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            RelayConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            RelayConfig::default()
        }
    }
}

/// Apply `MANMARU_*` overrides from `lookup` (usually `std::env::var`).
pub fn apply_env_overrides<F>(mut config: RelayConfig, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("MANMARU_INFERENCE_URL") {
        config.inference_url = url;
    }
    if let Some(model) = lookup("MANMARU_MODEL") {
        config.model = model;
    }
    if let Some(raw) = lookup("MANMARU_INFERENCE_TIMEOUT_SECS") {
        config.inference_timeout_secs =
            raw.trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "MANMARU_INFERENCE_TIMEOUT_SECS".to_string(),
                    message: e.to_string(),
                })?;
    }
    if let Some(secret) = lookup("MANMARU_SESSION_SECRET") {
        config.session_secret = Some(secret);
    }
    if let Some(dir) = lookup("MANMARU_WEB_DIR") {
        config.web_dir = dir;
    }

    validate(&config)?;
    Ok(config)
}

/// Load the file config for `data_dir` and apply process environment overrides.
pub async fn load(data_dir: &Path) -> Result<RelayConfig, ConfigError> {
    let config = load_relay_config(data_dir).await;
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

fn validate(config: &RelayConfig) -> Result<(), ConfigError> {
    if config.transcript_cap == 0 {
        return Err(ConfigError::InvalidValue {
            key: "transcript_cap".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    if config.inference_timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "inference_timeout_secs".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    if !config.inference_url.starts_with("http://") && !config.inference_url.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            key: "inference_url".to_string(),
            message: format!("'{}' is not an http(s) URL", config.inference_url),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_relay_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.model, "qwen2.5:3b");
        assert_eq!(config.transcript_cap, 20);
    }

    #[tokio::test]
    async fn load_relay_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
model = "llama3.1:8b"
transcript_cap = 10
"#,
        )
        .await
        .unwrap();

        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.transcript_cap, 10);
        assert_eq!(config.inference_url, "http://localhost:11434/api/chat");
    }

    #[tokio::test]
    async fn load_relay_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.model, "qwen2.5:3b");
    }

    #[tokio::test]
    async fn read_config_file_reports_parse_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, "transcript_cap = \"twenty\"").await.unwrap();

        let err = read_config_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let config = apply_env_overrides(
            RelayConfig::default(),
            env(&[
                ("MANMARU_INFERENCE_URL", "http://10.0.0.2:11434/api/chat"),
                ("MANMARU_MODEL", "gemma2:2b"),
                ("MANMARU_INFERENCE_TIMEOUT_SECS", " 45 "),
                ("MANMARU_SESSION_SECRET", "s3cret"),
                ("MANMARU_WEB_DIR", "/srv/manmaru"),
            ]),
        )
        .unwrap();

        assert_eq!(config.inference_url, "http://10.0.0.2:11434/api/chat");
        assert_eq!(config.model, "gemma2:2b");
        assert_eq!(config.inference_timeout_secs, 45);
        assert_eq!(config.session_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.web_dir, "/srv/manmaru");
    }

    #[test]
    fn no_env_keeps_config() {
        let config = apply_env_overrides(RelayConfig::default(), env(&[])).unwrap();
        assert_eq!(config.model, "qwen2.5:3b");
    }

    #[test]
    fn bad_timeout_override_is_an_error() {
        let err = apply_env_overrides(
            RelayConfig::default(),
            env(&[("MANMARU_INFERENCE_TIMEOUT_SECS", "soon")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn zero_cap_is_rejected() {
        let config = RelayConfig {
            transcript_cap: 0,
            ..RelayConfig::default()
        };
        assert!(apply_env_overrides(config, env(&[])).is_err());
    }

    #[test]
    fn non_http_url_is_rejected() {
        let err = apply_env_overrides(
            RelayConfig::default(),
            env(&[("MANMARU_INFERENCE_URL", "localhost:11434")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("inference_url"));
    }
}
