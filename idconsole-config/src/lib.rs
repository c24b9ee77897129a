//! Configuration for the identity admin console.
//!
//! Values come from `IDCONSOLE_*` environment variables (with optional `.env`
//! support) or a TOML file, and are read once at startup.
//!
//! ```rust,no_run
//! use idconsole_config::ConsoleConfig;
//!
//! let config = ConsoleConfig::from_env()?;
//! println!("API at {}", config.api_base_url);
//! # Ok::<(), idconsole_config::ConfigError>(())
//! ```

mod console;
mod env;
mod error;
mod validation;

pub use console::{ConsoleConfig, DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT_SECS};
pub use env::{ENV_PREFIX, EnvLoader, load_dotenv};
pub use error::{ConfigError, Result};
pub use validation::ConfigValidator;
