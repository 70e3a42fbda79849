//! MySQL implementation of the UserRepository trait.
//!
//! Accounts live in a single `users` table keyed by an auto-increment id
//! with a unique index on `email`. The `password` column holds the bcrypt
//! hash.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use ms_core::domain::entities::user::{Role, User};
use ms_core::errors::DomainError;
use ms_core::repositories::UserRepository;

use crate::InfrastructureError;

const USER_COLUMNS: &str =
    "id, email, password, username, role, is_active, created_at, updated_at";

/// MySQL implementation of UserRepository
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        let role: String = row.try_get("role").map_err(|e| column("role", e))?;
        let role = role.parse::<Role>().map_err(DomainError::internal)?;

        Ok(User {
            id: row.try_get("id").map_err(|e| column("id", e))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            password_hash: row.try_get("password").map_err(|e| column("password", e))?,
            username: row.try_get("username").map_err(|e| column("username", e))?,
            role,
            is_active: row.try_get("is_active").map_err(|e| column("is_active", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }
}

/// Translate a write failure, turning the email unique index into a conflict
fn write_error(e: sqlx::Error, email: &str) -> DomainError {
    let err = InfrastructureError::from(e);
    if err.is_unique_violation() {
        return DomainError::Conflict {
            message: format!("email {} already exists", email),
        };
    }
    tracing::error!("User write failed: {}", err);
    err.into()
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (email, password, username, role, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.username)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, &user.email))?;

        tracing::info!("Created user {} ({})", result.last_insert_id(), user.email);

        Ok(User {
            id: result.last_insert_id(),
            ..user
        })
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, password = ?, username = ?, role = ?, is_active = ?, updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.username)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.updated_at)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, &user.email))?;

        // MySQL reports zero affected rows for a no-op update, so existence is checked separately
        if self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            });
        }

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?) AS present")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        let present: i64 = row
            .try_get("present")
            .map_err(|e| DomainError::internal(format!("Failed to get present: {}", e)))?;
        Ok(present != 0)
    }
}
