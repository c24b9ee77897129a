// Composition boundary: configuration in, wired console out

use idconsole_api::{ApiError, ConsoleApi, SessionApi};
use idconsole_config::{ConfigError, ConsoleConfig};
use idconsole_guard::{
    GuardError, Navigation, Navigator, ServerSessionProbe, SessionStatus, TracingView,
    check_session, console_routes,
};
use idconsole_http::{ApiClient, HttpClientError, MemoryStorage, SessionStorage};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Http(#[from] HttpClientError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Guard(#[from] GuardError),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

/// A fully wired console: one client, one session store, the typed APIs and
/// the guarded route tree.
#[derive(Debug, Clone)]
pub struct Console {
    config: ConsoleConfig,
    client: ApiClient,
    api: ConsoleApi,
    navigator: Navigator,
}

impl Console {
    /// Read configuration from the environment (and `.env`), then build.
    pub fn from_env() -> Result<Self> {
        Self::new(ConsoleConfig::from_env()?)
    }

    /// Build with a fresh in-memory session store.
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        Self::with_storage(config, Arc::new(MemoryStorage::new()))
    }

    /// Build over a caller-provided session store.
    pub fn with_storage(config: ConsoleConfig, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        config.validate()?;
        let client = ApiClient::new(config.client_config(), storage)?;

        let probe = Arc::new(ServerSessionProbe::new(client.clone()));
        let routes = console_routes(probe, &config.login_path, |entry| {
            Arc::new(TracingView::new(entry.name))
        })?;

        debug!(base_url = %config.api_base_url, routes = routes.len(), "Console ready");
        Ok(Self {
            api: ConsoleApi::new(client.clone()),
            navigator: Navigator::new(routes),
            client,
            config,
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn api(&self) -> &ConsoleApi {
        &self.api
    }

    pub fn session(&self) -> SessionApi {
        self.api.session()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Navigate through the guarded route tree.
    pub async fn navigate(&self, path: &str) -> Result<Navigation> {
        Ok(self.navigator.navigate(path).await?)
    }

    /// Whether the login route is where a navigation ended after a redirect.
    pub fn sent_to_login(&self, navigation: &Navigation) -> bool {
        navigation.was_redirected() && navigation.path == self.config.login_path
    }

    /// Ask the server for the session state.
    pub async fn check_session(&self) -> SessionStatus {
        check_session(&self.client).await
    }
}
