//! Typed console API.
//!
//! Session operations, CRUD clients for the console's resources, relation
//! assignments and debounced search, all over an [`idconsole_http::ApiClient`].
//!
//! ```rust,no_run
//! use idconsole_api::{ConsoleApi, PageQuery};
//! use idconsole_http::{ApiClient, ApiClientConfig, MemoryStorage};
//! use std::sync::Arc;
//!
//! # async fn demo() -> idconsole_api::Result<()> {
//! let client = ApiClient::new(ApiClientConfig::default(), Arc::new(MemoryStorage::new()))?;
//! let api = ConsoleApi::new(client);
//!
//! api.session().login("admin", "secret").await?;
//! let users = api.users().list(&PageQuery::new().search("ali")).await?;
//! println!("{} of {} users", users.items.len(), users.total);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod models;
mod pagination;
mod relation;
mod resource;
mod search;
mod session;

pub use error::{ApiError, Result};
pub use models::{CurrentUser, Id, Menu, OAuthClient, Permission, Role, User};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, PageQuery};
pub use relation::RelationApi;
pub use resource::{Resource, ResourceApi};
pub use search::{DEFAULT_QUIET_PERIOD, SearchDebouncer, SearchInput};
pub use session::{CURRENT_USER_PATH, LOGIN_PATH, LOGOUT_PATH, PASSWORD_PATH, SessionApi};

use idconsole_http::ApiClient;

/// Every console API over one shared client.
#[derive(Debug, Clone)]
pub struct ConsoleApi {
    client: ApiClient,
}

impl ConsoleApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> SessionApi {
        SessionApi::new(self.client.clone())
    }

    pub fn resource<R: Resource>(&self) -> ResourceApi<R> {
        ResourceApi::new(self.client.clone())
    }

    pub fn users(&self) -> ResourceApi<User> {
        self.resource()
    }

    pub fn roles(&self) -> ResourceApi<Role> {
        self.resource()
    }

    pub fn permissions(&self) -> ResourceApi<Permission> {
        self.resource()
    }

    pub fn clients(&self) -> ResourceApi<OAuthClient> {
        self.resource()
    }

    pub fn menus(&self) -> ResourceApi<Menu> {
        self.resource()
    }

    pub fn relations(&self) -> RelationApi {
        RelationApi::new(self.client.clone())
    }
}

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        ApiError, ConsoleApi, Page, PageQuery, RelationApi, Resource, ResourceApi, Result,
        SearchDebouncer, SearchInput, SessionApi,
    };
}
