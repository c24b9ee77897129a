// Console configuration

use crate::env::{EnvLoader, load_dotenv};
use crate::validation::ConfigValidator;
use crate::{ConfigError, Result};
use idconsole_guard::check_login_path;
use idconsole_http::{ApiClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default login route.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Settings the console reads once at startup.
///
/// | Field          | Variable                   | Default                     |
/// |----------------|----------------------------|-----------------------------|
/// | `api_base_url` | `IDCONSOLE_API_BASE_URL`   | `http://localhost:8080/api` |
/// | `timeout_secs` | `IDCONSOLE_TIMEOUT_SECS`   | `30` (`0` disables)         |
/// | `login_path`   | `IDCONSOLE_LOGIN_PATH`     | `/login`                    |
/// | `user_agent`   | `IDCONSOLE_USER_AGENT`     | `idconsole/<version>`       |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub login_path: String,
    pub user_agent: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            user_agent: ApiClientConfig::default().user_agent,
        }
    }
}

impl ConsoleConfig {
    /// Load from `.env` (if present) and the process environment, then
    /// validate.
    pub fn from_env() -> Result<Self> {
        load_dotenv()?;
        Self::from_loader(&EnvLoader::console())
    }

    /// Load from an explicit loader, then validate.
    pub fn from_loader(loader: &EnvLoader) -> Result<Self> {
        let config = Self::default().merge_loader(loader)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content without validating it.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))
    }

    /// Let the process environment override the current values.
    pub fn merge_env(self) -> Result<Self> {
        let config = self.merge_loader(&EnvLoader::console())?;
        config.validate()?;
        Ok(config)
    }

    /// Override values with whatever `loader` provides.
    pub fn merge_loader(mut self, loader: &EnvLoader) -> Result<Self> {
        self.api_base_url = loader
            .load_var_or("API_BASE_URL", &self.api_base_url)
            .trim()
            .to_string();
        if let Some(secs) = loader.parse_var("TIMEOUT_SECS", "a whole number of seconds")? {
            self.timeout_secs = secs;
        }
        self.login_path = loader
            .load_var_or("LOGIN_PATH", &self.login_path)
            .trim()
            .to_string();
        if let Ok(agent) = loader.load_var("USER_AGENT")
            && !agent.trim().is_empty()
        {
            self.user_agent = agent;
        }
        Ok(self)
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty(&self.api_base_url, "api_base_url")?;
        ConfigValidator::is_url(&self.api_base_url, "api_base_url")?;
        ConfigValidator::not_empty(&self.login_path, "login_path")?;
        check_login_path(&self.login_path)
            .map_err(|e| ConfigError::ValidationError(format!("login_path: {e}")))
    }

    /// Per-request timeout; `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// HTTP client settings derived from this configuration.
    pub fn client_config(&self) -> ApiClientConfig {
        let builder = ApiClientConfig::builder()
            .base_url(self.api_base_url.clone())
            .user_agent(self.user_agent.clone());
        match self.timeout() {
            Some(timeout) => builder.timeout(timeout),
            None => builder.no_timeout(),
        }
        .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ENV_PREFIX;

    fn loader(vars: &[(&str, &str)]) -> EnvLoader {
        EnvLoader::from_vars(Some(ENV_PREFIX.to_string()), vars.iter().copied())
    }

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::from_loader(&loader(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.login_path, "/login");
        assert!(config.user_agent.starts_with("idconsole/"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ConsoleConfig::from_loader(&loader(&[
            ("IDCONSOLE_API_BASE_URL", "https://id.example.com/api"),
            ("IDCONSOLE_TIMEOUT_SECS", "0"),
            ("IDCONSOLE_LOGIN_PATH", "/signin"),
            ("IDCONSOLE_USER_AGENT", "ops-script/1"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://id.example.com/api");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.login_path, "/signin");

        let client = config.client_config();
        assert_eq!(client.base_url, "https://id.example.com/api");
        assert_eq!(client.timeout, None);
        assert_eq!(client.user_agent, "ops-script/1");
    }

    #[test]
    fn test_invalid_timeout() {
        let err = ConsoleConfig::from_loader(&loader(&[("IDCONSOLE_TIMEOUT_SECS", "-1")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_validation() {
        let relative = ConsoleConfig {
            api_base_url: "/api".into(),
            ..Default::default()
        };
        assert!(relative.validate().is_err());

        let empty_login = ConsoleConfig {
            login_path: String::new(),
            ..Default::default()
        };
        assert!(empty_login.validate().is_err());

        let bare_login = ConsoleConfig {
            login_path: "login".into(),
            ..Default::default()
        };
        assert!(bare_login.validate().is_err());
    }

    #[test]
    fn test_login_path_cannot_reuse_a_console_page() {
        for taken in ["/", "/users", "/users/:id/roles"] {
            let config = ConsoleConfig {
                login_path: taken.into(),
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::ValidationError(_))),
                "{taken} should be rejected"
            );
        }

        let err = ConsoleConfig::from_loader(&loader(&[("IDCONSOLE_LOGIN_PATH", "/users")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_from_toml_keeps_defaults() {
        let config = ConsoleConfig::from_toml(
            r#"
            api_base_url = "https://id.internal/api"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://id.internal/api");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.login_path, "/login");
    }

    #[test]
    fn test_env_wins_over_file() {
        let config = ConsoleConfig::from_toml(r#"api_base_url = "https://file/api""#)
            .unwrap()
            .merge_loader(&loader(&[("IDCONSOLE_API_BASE_URL", "https://env/api")]))
            .unwrap();
        assert_eq!(config.api_base_url, "https://env/api");
    }

    #[test]
    fn test_unset_variables_keep_file_values() {
        let config = ConsoleConfig::from_toml(
            r#"
            api_base_url = "https://file/api"
            login_path = "/signin"
            "#,
        )
        .unwrap()
        .merge_loader(&loader(&[("IDCONSOLE_TIMEOUT_SECS", "7")]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://file/api");
        assert_eq!(config.login_path, "/signin");
        assert_eq!(config.timeout_secs, 7);
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ConsoleConfig::from_toml("timeout_secs = \"soon\""),
            Err(ConfigError::ParseError(_))
        ));
    }
}
