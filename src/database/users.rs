// ABOUTME: User account database operations
// ABOUTME: Handles account creation, lookup by id/email, and profile updates

use super::Database;
use crate::models::User;
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> Result<()> {
        // Email uniqueness is enforced here; the service-level pre-check
        // only exists for the friendly error message.
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                age INTEGER,
                gender TEXT,
                height_cm REAL,
                current_weight_kg REAL,
                target_weight_kg REAL,
                fitness_goal TEXT,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the email violates the UNIQUE constraint or the
    /// database operation fails
    pub async fn create_user(&self, user: &User) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (
                id, name, email, password_hash,
                age, gender, height_cm, current_weight_kg, target_weight_kg, fitness_goal,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.age)
        .bind(&user.gender)
        .bind(user.height_cm)
        .bind(user.current_weight_kg)
        .bind(user.target_weight_kg)
        .bind(&user.fitness_goal)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(user.id)
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        self.get_user_impl("id", &user_id.to_string()).await
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_impl("email", email).await
    }

    /// Write the mutable account and profile fields of a user
    ///
    /// A single UPDATE statement, so an accepted patch is applied
    /// atomically. `email`, `password_hash`, and `created_at` are
    /// intentionally not touched by this path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or the user row
    /// does not exist
    pub async fn update_user_profile(&self, user: &User) -> Result<()> {
        let result = sqlx::query(
            r"
            UPDATE users SET
                name = $2,
                age = $3,
                gender = $4,
                height_cm = $5,
                current_weight_kg = $6,
                target_weight_kg = $7,
                fitness_goal = $8,
                updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(user.age)
        .bind(&user.gender)
        .bind(user.height_cm)
        .bind(user.current_weight_kg)
        .bind(user.target_weight_kg)
        .bind(&user.fitness_goal)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        anyhow::ensure!(
            result.rows_affected() == 1,
            "No user row updated for id {}",
            user.id
        );

        Ok(())
    }

    /// Internal implementation for getting a user by a unique column
    async fn get_user_impl(&self, field: &str, value: &str) -> Result<Option<User>> {
        let query = format!(
            r"
            SELECT id, name, email, password_hash,
                   age, gender, height_cm, current_weight_kg, target_weight_kg, fitness_goal,
                   created_at, updated_at
            FROM users WHERE {field} = $1
            "
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_user(&row)).transpose()
    }

    /// Convert a database row to a User struct
    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let id: String = row.get("id");

        Ok(User {
            id: Uuid::parse_str(&id)?,
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            age: row.get("age"),
            gender: row.get("gender"),
            height_cm: row.get("height_cm"),
            current_weight_kg: row.get("current_weight_kg"),
            target_weight_kg: row.get("target_weight_kg"),
            fitness_goal: row.get("fitness_goal"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}
