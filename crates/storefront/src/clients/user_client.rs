//! # User Client
//!
//! Provides a high-level API for interacting with the `User` actor.
//! It wraps a `ResourceClient<User>` and exposes domain-specific methods.
use crate::model::{RootAdmin, Role, User, UserCreate, UserId, UserQuery, UserUpdate};
use crate::user_actor::{UserAction, UserError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        UserError::from(e)
    }
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self::new(self.inner.with_timeout(timeout))
    }

    /// Registers a user. Duplicate names or e-mails fail with
    /// [`UserError::AlreadyExists`].
    #[instrument(skip(self))]
    pub async fn register(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(UserError::from)
    }

    /// Removes a user together with their cart lines.
    #[instrument(skip(self))]
    pub async fn remove_user(&self, id: UserId) -> Result<(), UserError> {
        self.delete(id).await
    }

    pub async fn users(&self) -> Result<Vec<User>, UserError> {
        self.list(UserQuery::default()).await
    }

    #[instrument(skip(self))]
    pub async fn user(&self, id: UserId) -> Result<User, UserError> {
        self.get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let mut found = self
            .list(UserQuery {
                email: Some(email.to_string()),
            })
            .await?;
        Ok(found.pop())
    }

    /// Makes sure the root administrator exists and is marked as such.
    ///
    /// Safe to call on every start: an existing account is only promoted (admin role,
    /// system flag, enabled), never recreated.
    #[instrument(skip(self))]
    pub async fn ensure_root_admin(&self, root: &RootAdmin) -> Result<UserId, UserError> {
        let id = match self.find_by_email(&root.email).await? {
            Some(existing) => existing.id,
            None => {
                let id = self
                    .register(UserCreate {
                        name: root.name.clone(),
                        email: root.email.clone(),
                        role: Some(Role::Admin),
                    })
                    .await?;
                info!(user_id = %id, "Root admin created");
                id
            }
        };

        let changed = self
            .inner
            .perform_action(id, UserAction::MarkSystemAdmin)
            .await?;
        if changed {
            info!(user_id = %id, "Root admin reconciled");
        }
        Ok(id)
    }
}
