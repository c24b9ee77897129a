// idconsole - session-bound client layer and route guards for an OAuth2
// identity admin console
//
// The member crates do the work; this crate wires them together from
// configuration and hosts the `idconsole` command-line tool.

mod console;

pub use console::{Console, ConsoleError, Result};

// Re-export member crates
pub use idconsole_api as api;
pub use idconsole_config as config;
pub use idconsole_guard as guard;
pub use idconsole_http as http;
pub use idconsole_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{Console, ConsoleError};
    pub use idconsole_api::{ConsoleApi, Page, PageQuery, SearchDebouncer, SessionApi};
    pub use idconsole_config::ConsoleConfig;
    pub use idconsole_guard::{
        AuthenticatedGuard, Guard, Navigation, Navigator, Redirect, SessionStatus,
        is_authenticated,
    };
    pub use idconsole_http::{ApiClient, ApiClientConfig, MemoryStorage, RequestOptions};
}
