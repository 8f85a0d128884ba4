//! User repository for database operations.

use crate::entities::{NewUser, User};
use crate::types::DatabaseResult;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by email; the match is exact
    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        debug!(email, "looking up user by email");

        let row = sqlx::query("SELECT id, name, email, password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose().map_err(Into::into)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        debug!(user_id = id, "looking up user by id");

        let row = sqlx::query("SELECT id, name, email, password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose().map_err(Into::into)
    }

    /// Insert a user and return the stored row
    pub async fn create(&self, request: &NewUser) -> DatabaseResult<User> {
        let row = sqlx::query(
            "INSERT INTO users (name, email, password) VALUES (?, ?, ?) RETURNING id, name, email, password",
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.password)
        .fetch_one(&self.pool)
        .await?;

        let user = user_from_row(&row)?;
        info!(user_id = user.id, "created new user");
        Ok(user)
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
    })
}
