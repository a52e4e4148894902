use crate::core::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const STORE_KEY_VAR: &str = "SUPABASE_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub users: UsersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersConfig {
    /// JSON file holding the user directory
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Console,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Connection parameters for the record store. Only ever read from the
/// environment so the access key stays out of config files.
#[derive(Clone)]
pub struct StoreConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content, path)
    }

    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.num_threads == 0 {
            return Err(ConfigError::Invalid(
                "num_threads must be greater than 0".to_string(),
            ));
        }

        if self.users.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("users.path must not be empty".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            )));
        }

        Ok(())
    }
}

/// Load `.env` into the process environment. A missing file is fine since
/// the variables may be set directly; a file that fails to parse is not.
pub fn load_env_file() -> Result<(), ConfigError> {
    check_env_file(dotenvy::dotenv())
}

fn check_env_file<T>(result: dotenvy::Result<T>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::EnvFile(e.to_string())),
    }
}

impl StoreConfig {
    /// Read the store endpoint and key from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let endpoint = read(STORE_URL_VAR)?;
        let api_key = read(STORE_KEY_VAR)?;

        if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
            return Err(ConfigError::Invalid(format!(
                "{STORE_URL_VAR} must be an http(s) URL, got '{endpoint}'"
            )));
        }

        Ok(Self { endpoint, api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
        [server]
        port = 8080
        num_threads = 2

        [users]
        path = "users.json"

        [logging]
        level = "debug"
        format = "console"
    "#;

    fn parse(content: &str) -> Result<Config, ConfigError> {
        Config::from_toml(content, Path::new("test.toml"))
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(SAMPLE).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.num_threads, 2);
        assert_eq!(config.users.path, PathBuf::from("users.json"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Console);
    }

    #[test]
    fn test_logging_defaults() {
        let config = parse("[server]\nport = 80\n[users]\npath = \"u.json\"\n").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.server.num_threads > 0);
    }

    #[test]
    fn test_repo_config_loads() {
        let config = Config::from_file(Path::new("config.toml")).expect("Failed to load config");
        assert_eq!(config.users.path, PathBuf::from("users.json"));
    }

    #[test]
    fn test_rejects_zero_port() {
        let result = parse("[server]\nport = 0\n[users]\npath = \"u.json\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_log_level() {
        let content = SAMPLE.replace("\"debug\"", "\"verbose\"");
        assert!(matches!(parse(&content), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_missing_section() {
        assert!(matches!(parse("[server]\nport = 80\n"), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("does-not-exist.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_env_file(dotenvy::from_path(dir.path().join(".env")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_malformed_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "SUPABASE URL https://example.supabase.co\n").unwrap();

        let result = check_env_file(dotenvy::from_path(&path));
        assert!(matches!(result, Err(ConfigError::EnvFile(_))));
    }

    #[test]
    fn test_store_config_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (STORE_URL_VAR, "https://example.supabase.co"),
            (STORE_KEY_VAR, "secret-key"),
        ]);

        let store = StoreConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(store.endpoint, "https://example.supabase.co");
        assert_eq!(store.api_key, "secret-key");
        assert!(!format!("{store:?}").contains("secret-key"));
    }

    #[test]
    fn test_store_config_missing_key() {
        let result = StoreConfig::from_lookup(|name| {
            (name == STORE_URL_VAR).then(|| "https://example.supabase.co".to_string())
        });
        assert!(matches!(result, Err(ConfigError::MissingVar(STORE_KEY_VAR))));
    }

    #[test]
    fn test_store_config_blank_url() {
        let result = StoreConfig::from_lookup(|_| Some("   ".to_string()));
        assert!(matches!(result, Err(ConfigError::MissingVar(STORE_URL_VAR))));
    }

    #[test]
    fn test_store_config_rejects_non_http_url() {
        let result = StoreConfig::from_lookup(|name| match name {
            STORE_URL_VAR => Some("ftp://example.com".to_string()),
            _ => Some("key".to_string()),
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
