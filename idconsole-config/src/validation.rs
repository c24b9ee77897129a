// Configuration validation

use crate::{ConfigError, Result};
use url::Url;

/// Configuration validator with rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Validate an absolute `http`/`https` URL with a host
    pub fn is_url(value: &str, field: &str) -> Result<()> {
        let invalid = || {
            ConfigError::ValidationError(format!("{} must be an absolute http(s) URL", field))
        };
        let url = Url::parse(value).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(invalid());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty() {
        assert!(ConfigValidator::not_empty("x", "field").is_ok());
        assert!(ConfigValidator::not_empty("  ", "field").is_err());
    }

    #[test]
    fn test_is_url() {
        assert!(ConfigValidator::is_url("http://localhost:8080/api", "url").is_ok());
        assert!(ConfigValidator::is_url("https://id.example.com", "url").is_ok());
        assert!(ConfigValidator::is_url("/api", "url").is_err());
        assert!(ConfigValidator::is_url("ftp://files.example.com", "url").is_err());
        assert!(ConfigValidator::is_url("not a url", "url").is_err());
    }
}
