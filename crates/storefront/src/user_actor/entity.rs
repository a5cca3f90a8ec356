//! [`ActorEntity`] implementation for users.
//!
//! Names and e-mails are unique (compared case-insensitively). System accounts refuse
//! updates and removal; removing any other user first clears their cart through the
//! injected [`CartClient`].

use super::error::UserError;
use crate::clients::CartClient;
use crate::model::{Role, User, UserCreate, UserId, UserQuery, UserUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

/// Custom actions for User entities.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Forces `role = Admin`, `is_system = true` and `enabled = true`.
    /// Returns whether anything changed.
    MarkSystemAdmin,
}

fn require_name(name: &str) -> Result<String, UserError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(UserError::ValidationError("name must not be empty".into()));
    }
    Ok(name.to_string())
}

/// Accepts `local@domain.tld` shapes; anything stricter belongs to the identity provider.
fn require_email(email: &str) -> Result<String, UserError> {
    let email = email.trim();
    let plausible = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !plausible {
        return Err(UserError::ValidationError(format!(
            "invalid e-mail address: {email}"
        )));
    }
    Ok(email.to_string())
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Query = UserQuery;
    type Action = UserAction;
    type ActionResult = bool;
    type Context = CartClient;
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        let now = Utc::now();
        Ok(Self {
            id,
            name: require_name(&params.name)?,
            email: require_email(&params.email)?,
            role: params.role.unwrap_or_default(),
            is_system: false,
            enabled: true,
            created_at: now,
            updated_at: now,
        })
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![
            format!("name:{}", self.name.to_lowercase()),
            format!("email:{}", self.email.to_lowercase()),
        ]
    }

    fn matches(&self, query: &UserQuery) -> bool {
        query
            .email
            .as_deref()
            .map_or(true, |email| email.trim().eq_ignore_ascii_case(&self.email))
    }

    /// Handles updates to the User entity.
    ///
    /// # Fields Updated
    /// - `name`, `email`: validated, uniqueness rechecked by the actor
    /// - `role`, `enabled`
    async fn on_update(
        &mut self,
        update: UserUpdate,
        _ctx: &CartClient,
    ) -> Result<(), Self::Error> {
        if self.is_system {
            return Err(UserError::SystemAccount(self.id));
        }
        if let Some(name) = update.name {
            self.name = require_name(&name)?;
        }
        if let Some(email) = update.email {
            self.email = require_email(&email)?;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn on_delete(&self, carts: &CartClient) -> Result<(), Self::Error> {
        if self.is_system {
            return Err(UserError::SystemAccount(self.id));
        }
        let removed = carts.purge_user(self.id).await?;
        info!(user_id = %self.id, removed, "Cleared cart before removal");
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        _ctx: &CartClient,
    ) -> Result<bool, Self::Error> {
        match action {
            UserAction::MarkSystemAdmin => {
                let changed = self.role != Role::Admin || !self.is_system || !self.enabled;
                if changed {
                    self.role = Role::Admin;
                    self.is_system = true;
                    self.enabled = true;
                    self.updated_at = Utc::now();
                }
                Ok(changed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> Result<User, UserError> {
        User::from_create_params(
            UserId(1),
            UserCreate {
                name: name.into(),
                email: email.into(),
                role: None,
            },
        )
    }

    #[test]
    fn registration_defaults_to_enabled_customer() {
        let user = create(" Ann ", "ann@example.com").unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(user.role, Role::Customer);
        assert!(user.enabled);
        assert!(!user.is_system);
    }

    #[test]
    fn email_shape_is_checked() {
        for bad in [
            "",
            "ann",
            "@example.com",
            "ann@",
            "ann@example",
            "a b@example.com",
            "ann@.com",
        ] {
            assert!(
                matches!(create("Ann", bad), Err(UserError::ValidationError(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(create("Ann", "ann.lee+shop@mail.example.com").is_ok());
    }

    #[test]
    fn keys_ignore_case() {
        let upper = create("Ann", "ANN@Example.com").unwrap();
        let lower = create("ann", "ann@example.com").unwrap();
        assert_eq!(upper.unique_keys(), lower.unique_keys());
        assert!(upper.matches(&UserQuery {
            email: Some("ann@EXAMPLE.com".into()),
        }));
    }
}
