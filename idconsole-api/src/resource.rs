//! Typed CRUD over the console's REST resources.

use crate::models::{
    Id, Menu, MenuDraft, OAuthClient, OAuthClientDraft, Permission, PermissionDraft, Role,
    RoleDraft, User, UserDraft,
};
use crate::{Page, PageQuery, Result};
use idconsole_http::{ApiClient, Method, RequestOptions};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::marker::PhantomData;
use tracing::debug;

/// A REST collection served under [`Resource::PATH`].
pub trait Resource: DeserializeOwned + Send {
    /// Create/update payload.
    type Draft: Serialize + Send + Sync;

    /// Collection path relative to the API base, e.g. `/users`.
    const PATH: &'static str;

    /// Human-readable name for logs and CLI output.
    const NAME: &'static str;
}

impl Resource for User {
    type Draft = UserDraft;
    const PATH: &'static str = "/users";
    const NAME: &'static str = "users";
}

impl Resource for Role {
    type Draft = RoleDraft;
    const PATH: &'static str = "/roles";
    const NAME: &'static str = "roles";
}

impl Resource for Permission {
    type Draft = PermissionDraft;
    const PATH: &'static str = "/permissions";
    const NAME: &'static str = "permissions";
}

impl Resource for OAuthClient {
    type Draft = OAuthClientDraft;
    const PATH: &'static str = "/clients";
    const NAME: &'static str = "clients";
}

impl Resource for Menu {
    type Draft = MenuDraft;
    const PATH: &'static str = "/menus";
    const NAME: &'static str = "menus";
}

/// CRUD client for one resource type.
///
/// Reads go out without CSRF; mutations attach the cached token.
pub struct ResourceApi<R> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for ResourceApi<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceApi")
            .field("resource", &std::any::type_name::<R>())
            .finish()
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: Id) -> String {
        format!("{}/{id}", R::PATH)
    }

    /// Fetch one page of the collection.
    pub async fn list(&self, query: &PageQuery) -> Result<Page<R>> {
        debug!(resource = R::NAME, page = query.page, size = query.size, "Listing");
        let page = self
            .client
            .get_request(R::PATH, Some(query), RequestOptions::new())
            .await?;
        Ok(page)
    }

    pub async fn get(&self, id: Id) -> Result<R> {
        let item = self
            .client
            .get_request(&Self::item_path(id), None::<&PageQuery>, RequestOptions::new())
            .await?;
        Ok(item)
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R> {
        debug!(resource = R::NAME, "Creating");
        let options = RequestOptions::with_csrf().method(Method::POST).json(draft)?;
        Ok(self.client.request(R::PATH, options).await?)
    }

    pub async fn update(&self, id: Id, draft: &R::Draft) -> Result<R> {
        debug!(resource = R::NAME, id, "Updating");
        let options = RequestOptions::with_csrf().method(Method::PUT).json(draft)?;
        Ok(self.client.request(&Self::item_path(id), options).await?)
    }

    /// Delete an item. The response body is read and discarded.
    pub async fn delete(&self, id: Id) -> Result<()> {
        debug!(resource = R::NAME, id, "Deleting");
        let _: IgnoredAny = self
            .client
            .request(
                &Self::item_path(id),
                RequestOptions::with_csrf().method(Method::DELETE),
            )
            .await?;
        Ok(())
    }
}
