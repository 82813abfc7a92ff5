//! Process-local identity store for tests and local runs.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use brand_mappers_core::{AppRole, Email, RoleId, UserId};

use super::{IdentityStore, RepositoryError};
use crate::models::{RoleGrant, User, UserCredentials};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserCredentials>,
    grants: Vec<RoleGrant>,
    next_user_id: i32,
    next_grant_id: i32,
}

/// Accounts and grants held in memory.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    tables: RwLock<Tables>,
    role_lookup_down: AtomicBool,
}

impl InMemoryIdentityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `has_role` fail, simulating an unreachable roles table.
    pub fn set_role_lookup_down(&self, down: bool) {
        self.role_lookup_down.store(down, Ordering::SeqCst);
    }
}

fn same_email(a: &Email, b: &Email) -> bool {
    a.as_str().eq_ignore_ascii_case(b.as_str())
}

#[async_trait::async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn create_user(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|c| same_email(&c.user.email, email)) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        tables.next_user_id += 1;
        let user = User {
            id: UserId::new(tables.next_user_id),
            email: email.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(UserCredentials {
            user: user.clone(),
            password_hash: password_hash.to_owned(),
        });
        Ok(user)
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|c| same_email(&c.user.email, email))
            .cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_credentials(email).await?.map(|c| c.user))
    }

    async fn has_role(&self, user_id: UserId, role: AppRole) -> Result<bool, RepositoryError> {
        if self.role_lookup_down.load(Ordering::SeqCst) {
            return Err(RepositoryError::DataCorruption(
                "role lookup unavailable".to_owned(),
            ));
        }
        let tables = self.tables.read().await;
        Ok(tables
            .grants
            .iter()
            .any(|g| g.user_id == user_id && g.role == role))
    }

    async fn list_grants(&self, role: AppRole) -> Result<Vec<RoleGrant>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut grants: Vec<RoleGrant> = tables
            .grants
            .iter()
            .filter(|g| g.role == role)
            .cloned()
            .collect();
        grants.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.id.as_i32().cmp(&a.id.as_i32()))
        });
        Ok(grants)
    }

    async fn grant_role(
        &self,
        user_id: UserId,
        role: AppRole,
    ) -> Result<RoleGrant, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables
            .grants
            .iter()
            .any(|g| g.user_id == user_id && g.role == role)
        {
            return Err(RepositoryError::Conflict("role already granted".to_owned()));
        }
        let email = tables
            .users
            .iter()
            .find(|c| c.user.id == user_id)
            .map(|c| c.user.email.clone())
            .ok_or(RepositoryError::NotFound)?;

        tables.next_grant_id += 1;
        let grant = RoleGrant {
            id: RoleId::new(tables.next_grant_id),
            user_id,
            email,
            role,
            created_at: Utc::now(),
        };
        tables.grants.push(grant.clone());
        Ok(grant)
    }

    async fn find_grant(&self, id: RoleId) -> Result<Option<RoleGrant>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.grants.iter().find(|g| g.id == id).cloned())
    }

    async fn revoke_grant(&self, id: RoleId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.grants.len();
        tables.grants.retain(|g| g.id != id);
        if tables.grants.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_case_insensitively() {
        let store = InMemoryIdentityStore::new();
        store
            .create_user(&email("nour@brand-mappers.com"), "h")
            .await
            .unwrap();
        let err = store
            .create_user(&email("Nour@Brand-Mappers.com"), "h")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_grant_is_unique_per_role() {
        let store = InMemoryIdentityStore::new();
        let user = store
            .create_user(&email("nour@brand-mappers.com"), "h")
            .await
            .unwrap();
        store.grant_role(user.id, AppRole::Admin).await.unwrap();
        assert!(store.has_role(user.id, AppRole::Admin).await.unwrap());
        assert!(matches!(
            store.grant_role(user.id, AppRole::Admin).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_revoke_missing_grant_is_not_found() {
        let store = InMemoryIdentityStore::new();
        assert!(matches!(
            store.revoke_grant(RoleId::new(9)).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_role_lookup_down() {
        let store = InMemoryIdentityStore::new();
        store.set_role_lookup_down(true);
        assert!(store.has_role(UserId::new(1), AppRole::Admin).await.is_err());
    }
}
