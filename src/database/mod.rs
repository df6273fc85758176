// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Database Management
//!
//! SQLite-backed persistence for user accounts and BMI history. The
//! [`Database`] handle is the persistence capability: constructed once at
//! process start, cloned cheaply (the pool is internally shared), and
//! passed by reference into each service constructor.
//!
//! The storage layer is the sole arbiter of concurrent-write safety; in
//! particular, email uniqueness is enforced by a UNIQUE constraint on the
//! `users` table rather than by any in-process coordination.

mod bmi_history;
mod users;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for user and BMI history storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let needs_create_mode = database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
            && !database_url.contains('?');
        let connection_options = if needs_create_mode {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_bmi_history().await?;
        Ok(())
    }
}
