//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::UserProfile;
use crate::ports::UserDirectory;

use super::complaint_store::{db_error, parse_column};

/// Reads users from the `users` table.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, full_name, email, role, floor, room, specialization, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch user", e))?;

        row.map(row_to_profile).transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, email, role, floor, room, specialization, is_active
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(keys)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch users", e))?;

        rows.into_iter().map(row_to_profile).collect()
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<UserProfile>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, email, role, floor, room, specialization, is_active
            FROM users
            WHERE role = $1
            ORDER BY full_name
            "#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list users", e))?;

        rows.into_iter().map(row_to_profile).collect()
    }

    async fn count_active_workers(&self) -> Result<u64, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'worker' AND is_active")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count workers", e))?;

        Ok(result.0 as u64)
    }
}

fn row_to_profile(row: PgRow) -> Result<UserProfile, DomainError> {
    let id: String = row.get("id");
    let role: String = row.get("role");
    let specialization: Option<String> = row.get("specialization");

    Ok(UserProfile {
        id: UserId::new(id)?,
        full_name: row.get("full_name"),
        email: row.get("email"),
        role: parse_column("role", &role)?,
        floor: row.get("floor"),
        room: row.get("room"),
        specialization: specialization
            .map(|s| parse_column("specialization", &s))
            .transpose()?,
        is_active: row.get("is_active"),
    })
}
