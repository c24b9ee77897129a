//! Login, logout and the signed-in user.

use crate::models::CurrentUser;
use crate::{ApiError, Result};
use idconsole_http::{ApiClient, Method, RequestOptions};
use serde::Serialize;
use serde::de::IgnoredAny;
use tracing::{debug, info};

pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const CURRENT_USER_PATH: &str = "/auth/me";
pub const PASSWORD_PATH: &str = "/auth/password";

#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChange<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

/// Session operations against the identity API.
#[derive(Debug, Clone)]
pub struct SessionApi {
    client: ApiClient,
}

impl SessionApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Form login. The server sets the session cookie on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "username and password are required".into(),
            ));
        }

        let _: IgnoredAny = self
            .client
            .form_request(
                LOGIN_PATH,
                &LoginForm { username, password },
                RequestOptions::with_csrf(),
            )
            .await?;
        info!(username, "Logged in");
        Ok(())
    }

    /// End the session. The cached CSRF token is dropped whether or not the
    /// server call succeeds.
    pub async fn logout(&self) -> Result<()> {
        let result = self
            .client
            .request::<IgnoredAny>(
                LOGOUT_PATH,
                RequestOptions::with_csrf()
                    .csrf_use_cache(false)
                    .method(Method::POST),
            )
            .await;
        self.client.clear_csrf_cache();
        result?;
        info!("Logged out");
        Ok(())
    }

    /// The signed-in user, or [`ApiError::NotAuthenticated`] for a null body.
    pub async fn current_user(&self) -> Result<CurrentUser> {
        let user: Option<CurrentUser> = self
            .client
            .get_request(
                CURRENT_USER_PATH,
                None::<&()>,
                RequestOptions::with_csrf().csrf_use_cache(false),
            )
            .await?;
        user.ok_or(ApiError::NotAuthenticated)
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        if new_password.is_empty() {
            return Err(ApiError::Validation("new password is required".into()));
        }
        if old_password == new_password {
            return Err(ApiError::Validation(
                "new password must differ from the old one".into(),
            ));
        }

        let options = RequestOptions::with_csrf()
            .csrf_use_cache(false)
            .method(Method::PUT)
            .json(&PasswordChange {
                old_password,
                new_password,
            })?;
        let _: IgnoredAny = self.client.request(PASSWORD_PATH, options).await?;
        debug!("Password changed");
        Ok(())
    }
}
