//! Credential store: the `users` table in SQLite.

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

use crate::error::CalcError;

pub type SqlitePool = Pool<Sqlite>;

/// SQLite schema. `username` and `email` are UNIQUE; several rows may have a
/// NULL email.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NULL UNIQUE,
    password_hash TEXT NOT NULL
)
"#;

/// A registered user as stored in the `users` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    /// Argon2 PHC string; never rendered
    #[serde(skip_serializing)]
    pub password_hash: String,
}

type UserRow = (i64, String, Option<String>, String);

impl From<UserRow> for User {
    fn from((id, username, email, password_hash): UserRow) -> Self {
        User {
            id,
            username,
            email,
            password_hash,
        }
    }
}

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if needed) the database at `database_url` and
    /// make sure the schema exists
    ///
    /// # Examples
    /// ```no_run
    /// # async fn demo() -> Result<(), calcweb::CalcError> {
    /// let store = calcweb::store::UserStore::connect("sqlite:calc.sqlite3").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(database_url: &str) -> Result<Self, CalcError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> Result<(), CalcError> {
        sqlx::query(SQLITE_INIT).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a new user and return its id
    ///
    /// Uniqueness is left to the table constraints so that two concurrent
    /// registrations for the same name cannot both get through.
    ///
    /// # Errors
    /// * `CalcError::Conflict` if the username or email is already taken
    /// * `CalcError::Database` for anything else
    pub async fn insert(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<i64, CalcError> {
        let result = sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                if db_err.message().contains("users.email") {
                    Err(CalcError::Conflict("Email address is already registered.".to_string()))
                } else {
                    Err(CalcError::Conflict("Username already taken.".to_string()))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, CalcError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, email, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, CalcError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, email, password_hash FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(User::from))
    }
}
