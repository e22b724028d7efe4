//! Configuration loading from disk and environment.

use std::path::Path;
use std::fs;
use crate::config::schema::GatewayConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { key: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { key, value } => write!(f, "Invalid value for {}: {:?}", key, value),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse configuration from a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Apply overrides from process environment variables.
pub fn apply_env_overrides(config: &mut GatewayConfig) -> Result<(), ConfigError> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides using `lookup` to read variables.
///
/// Recognized: `PORT`, `GATEWAY_API_VERSION`, `GATEWAY_UPSTREAM_URL`,
/// and `GATEWAY_ENV` (`development` enables development mode).
pub fn apply_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { key: "PORT", value: port.clone() })?;
    }
    if let Some(version) = lookup("GATEWAY_API_VERSION") {
        config.server.api_version = version;
    }
    if let Some(url) = lookup("GATEWAY_UPSTREAM_URL") {
        config.upstream.base_url = url;
    }
    if let Some(env) = lookup("GATEWAY_ENV") {
        config.server.development = env.eq_ignore_ascii_case("development");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "8443"),
            ("GATEWAY_ENV", "development"),
            ("GATEWAY_UPSTREAM_URL", "http://127.0.0.1:5000"),
        ]
        .into_iter()
        .collect();

        let mut config = GatewayConfig::default();
        apply_overrides(&mut config, |k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.server.port, 8443);
        assert!(config.server.development);
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.server.api_version, "1.0");
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = GatewayConfig::default();
        let err = apply_overrides(&mut config, |k| (k == "PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_read_partial_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!("gateway-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[server]\nport = 8080\n").unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.api_version, "1.0");
        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_read_rejects_malformed_file() {
        let path = std::env::temp_dir().join(format!("gateway-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[server\nport = ").unwrap();
        assert!(matches!(read_config(&path), Err(ConfigError::Parse(_))));
        fs::remove_file(&path).unwrap_or_default();
    }
}
