//! User-role and role-permission assignments.

use crate::models::{Id, Permission, Role};
use crate::{ApiError, Result};
use idconsole_http::{ApiClient, Method, RequestOptions};
use serde::Serialize;
use serde::de::IgnoredAny;
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoleIds<'a> {
    role_ids: &'a [Id],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PermissionIds<'a> {
    permission_ids: &'a [Id],
}

/// Client for the relation endpoints under `/users/{id}/roles` and
/// `/roles/{id}/permissions`.
#[derive(Debug, Clone)]
pub struct RelationApi {
    client: ApiClient,
}

impl RelationApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn user_roles(&self, user_id: Id) -> Result<Vec<Role>> {
        self.list(&format!("/users/{user_id}/roles")).await
    }

    /// Grant roles to a user. An empty list is rejected before any request.
    pub async fn assign_user_roles(&self, user_id: Id, role_ids: &[Id]) -> Result<()> {
        if role_ids.is_empty() {
            return Err(ApiError::Validation("no roles to assign".into()));
        }
        debug!(user_id, count = role_ids.len(), "Assigning roles");
        self.mutate(
            Method::POST,
            &format!("/users/{user_id}/roles"),
            Some(&RoleIds { role_ids }),
        )
        .await
    }

    pub async fn revoke_user_role(&self, user_id: Id, role_id: Id) -> Result<()> {
        debug!(user_id, role_id, "Revoking role");
        self.mutate::<()>(
            Method::DELETE,
            &format!("/users/{user_id}/roles/{role_id}"),
            None,
        )
        .await
    }

    pub async fn role_permissions(&self, role_id: Id) -> Result<Vec<Permission>> {
        self.list(&format!("/roles/{role_id}/permissions")).await
    }

    /// Grant permissions to a role. An empty list is rejected before any request.
    pub async fn assign_role_permissions(&self, role_id: Id, permission_ids: &[Id]) -> Result<()> {
        if permission_ids.is_empty() {
            return Err(ApiError::Validation("no permissions to assign".into()));
        }
        debug!(role_id, count = permission_ids.len(), "Assigning permissions");
        self.mutate(
            Method::POST,
            &format!("/roles/{role_id}/permissions"),
            Some(&PermissionIds { permission_ids }),
        )
        .await
    }

    pub async fn revoke_role_permission(&self, role_id: Id, permission_id: Id) -> Result<()> {
        debug!(role_id, permission_id, "Revoking permission");
        self.mutate::<()>(
            Method::DELETE,
            &format!("/roles/{role_id}/permissions/{permission_id}"),
            None,
        )
        .await
    }

    async fn list<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let items = self
            .client
            .get_request(path, None::<&()>, RequestOptions::new())
            .await?;
        Ok(items)
    }

    async fn mutate<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()> {
        let mut options = RequestOptions::with_csrf().method(method);
        if let Some(body) = body {
            options = options.json(body)?;
        }
        let _: IgnoredAny = self.client.request(path, options).await?;
        Ok(())
    }
}
