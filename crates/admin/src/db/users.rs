//! `PostgreSQL` accounts and role grants.
//!
//! Emails are matched case-insensitively; the unique index is on
//! `lower(email)`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use brand_mappers_core::{AppRole, Email, RoleId, UserId};

use super::{IdentityStore, RepositoryError};
use crate::models::{RoleGrant, User, UserCredentials};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserCredentials {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = parse_stored_email(&row.email)?;
        Ok(Self {
            user: User {
                id: UserId::new(row.id),
                email,
                created_at: row.created_at,
            },
            password_hash: row.password_hash,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RoleGrantRow {
    id: i32,
    user_id: i32,
    email: String,
    role: AppRole,
    created_at: DateTime<Utc>,
}

impl TryFrom<RoleGrantRow> for RoleGrant {
    type Error = RepositoryError;

    fn try_from(row: RoleGrantRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RoleId::new(row.id),
            user_id: UserId::new(row.user_id),
            email: parse_stored_email(&row.email)?,
            role: row.role,
            created_at: row.created_at,
        })
    }
}

fn parse_stored_email(raw: &str) -> Result<Email, RepositoryError> {
    Email::parse(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))
}

fn map_unique_violation(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(what.to_owned());
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Repository
// =============================================================================

/// Identity store over the `users` and `user_roles` tables.
#[derive(Debug, Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IdentityStore for PgIdentityStore {
    async fn create_user(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(
            r"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            ",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "email already exists"))?;

        UserCredentials::try_from(row).map(|c| c.user)
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE lower(email) = lower($1)
            ",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_credentials(email).await?.map(|c| c.user))
    }

    async fn has_role(&self, user_id: UserId, role: AppRole) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS (
                SELECT 1 FROM user_roles WHERE user_id = $1 AND role = $2
            )
            ",
        )
        .bind(user_id.as_i32())
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_grants(&self, role: AppRole) -> Result<Vec<RoleGrant>, RepositoryError> {
        let rows: Vec<RoleGrantRow> = sqlx::query_as(
            r"
            SELECT r.id, r.user_id, u.email, r.role, r.created_at
            FROM user_roles r
            JOIN users u ON u.id = r.user_id
            WHERE r.role = $1
            ORDER BY r.created_at DESC
            ",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn grant_role(
        &self,
        user_id: UserId,
        role: AppRole,
    ) -> Result<RoleGrant, RepositoryError> {
        let row: RoleGrantRow = sqlx::query_as(
            r"
            WITH inserted AS (
                INSERT INTO user_roles (user_id, role)
                VALUES ($1, $2)
                RETURNING id, user_id, role, created_at
            )
            SELECT i.id, i.user_id, u.email, i.role, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            ",
        )
        .bind(user_id.as_i32())
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "role already granted"))?;

        row.try_into()
    }

    async fn find_grant(&self, id: RoleId) -> Result<Option<RoleGrant>, RepositoryError> {
        let row: Option<RoleGrantRow> = sqlx::query_as(
            r"
            SELECT r.id, r.user_id, u.email, r.role, r.created_at
            FROM user_roles r
            JOIN users u ON u.id = r.user_id
            WHERE r.id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn revoke_grant(&self, id: RoleId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM user_roles WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_email_row_is_rejected() {
        let row = UserRow {
            id: 1,
            email: "not an email".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        assert!(matches!(
            UserCredentials::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[tokio::test]
    #[ignore = "requires a migrated PostgreSQL database in ADMIN_DATABASE_URL"]
    async fn test_grant_and_revoke_round_trip() {
        let url = std::env::var("ADMIN_DATABASE_URL").unwrap();
        let store = PgIdentityStore::new(PgPool::connect(&url).await.unwrap());

        let email = Email::parse(&format!(
            "grant-test-{}@brand-mappers.com",
            Utc::now().timestamp_micros()
        ))
        .unwrap();
        let user = store.create_user(&email, "hash").await.unwrap();
        let grant = store.grant_role(user.id, AppRole::Admin).await.unwrap();
        assert!(store.has_role(user.id, AppRole::Admin).await.unwrap());

        store.revoke_grant(grant.id).await.unwrap();
        assert!(!store.has_role(user.id, AppRole::Admin).await.unwrap());
    }
}
