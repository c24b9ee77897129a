// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// Prefix of every console environment variable.
pub const ENV_PREFIX: &str = "IDCONSOLE";

enum Source {
    Process,
    Fixed(HashMap<String, String>),
}

/// Environment variable loader
///
/// Keys are given without the prefix (`API_BASE_URL` reads
/// `IDCONSOLE_API_BASE_URL`).
pub struct EnvLoader {
    prefix: Option<String>,
    source: Source,
}

impl EnvLoader {
    /// Create a loader over the process environment
    pub fn new(prefix: Option<String>) -> Self {
        Self {
            prefix,
            source: Source::Process,
        }
    }

    /// Loader for the console's `IDCONSOLE_` variables
    pub fn console() -> Self {
        Self::new(Some(ENV_PREFIX.to_string()))
    }

    /// Create a loader over a fixed set of variables instead of the process
    /// environment
    pub fn from_vars<I, K, V>(prefix: Option<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix,
            source: Source::Fixed(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = self.full_key(key);
        let value = match &self.source {
            Source::Process => env::var(&full_key).ok(),
            Source::Fixed(map) => map.get(&full_key).cloned(),
        };
        value.ok_or(ConfigError::KeyNotFound(full_key))
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Load and parse a variable. Missing or blank variables yield `None`.
    pub fn parse_var<T: FromStr>(&self, key: &str, expected: &'static str) -> Result<Option<T>> {
        let Ok(raw) = self.load_var(key) else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: self.full_key(key),
                value: raw.clone(),
                expected,
            })
    }

    /// Load a boolean flag (`1/true/yes/on` or `0/false/no/off`).
    pub fn flag(&self, key: &str) -> Result<Option<bool>> {
        let Ok(raw) = self.load_var(key) else {
            return Ok(None);
        };
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue {
                key: self.full_key(key),
                value: raw,
                expected: "a boolean",
            }),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Load a `.env` file from the current directory or its parents, if any.
///
/// A missing file is not an error; a malformed one is.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::LoadError(format!(".env: {e}"))),
    }
}
