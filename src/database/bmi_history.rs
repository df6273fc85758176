// ABOUTME: BMI history database operations
// ABOUTME: Append-only inserts and newest-first queries per user

use super::Database;
use crate::bmi::BmiStatus;
use crate::models::BmiRecord;
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the bmi_history table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_bmi_history(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS bmi_history (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                weight_kg REAL NOT NULL,
                height_cm REAL NOT NULL,
                bmi REAL NOT NULL,
                status TEXT NOT NULL,
                notes TEXT,
                created_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_bmi_history_user_created
             ON bmi_history(user_id, created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a BMI record
    ///
    /// There is no corresponding update or delete operation; history rows
    /// are immutable once written.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn insert_bmi_record(&self, record: &BmiRecord) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO bmi_history (id, user_id, weight_kg, height_cm, bmi, status, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(record.weight_kg)
        .bind(record.height_cm)
        .bind(record.bmi)
        .bind(record.status.as_str())
        .bind(&record.notes)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get all BMI records for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn bmi_history_for_user(&self, user_id: Uuid) -> Result<Vec<BmiRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, weight_kg, height_cm, bmi, status, notes, created_at
            FROM bmi_history
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_bmi_record).collect()
    }

    /// Get the most recent BMI record for a user, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn latest_bmi_for_user(&self, user_id: Uuid) -> Result<Option<BmiRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, weight_kg, height_cm, bmi, status, notes, created_at
            FROM bmi_history
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_bmi_record).transpose()
    }

    /// Convert a database row to a BmiRecord
    fn row_to_bmi_record(row: &sqlx::sqlite::SqliteRow) -> Result<BmiRecord> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let status: String = row.get("status");

        Ok(BmiRecord {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            weight_kg: row.get("weight_kg"),
            height_cm: row.get("height_cm"),
            bmi: row.get("bmi"),
            status: status.parse::<BmiStatus>()?,
            notes: row.get("notes"),
            created_at: row.get("created_at"),
        })
    }
}
