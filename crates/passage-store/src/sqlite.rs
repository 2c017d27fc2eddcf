//! SQLite-backed store.
//!
//! The development and small-deployment backend: `?` placeholders, REAL
//! monetary columns, rowid-backed ids.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::{AdminAccount, Store, StoreError};
use passage_core::{ClientField, ClientRecord, FieldValue, PipelineStats};

const CREATE_ADMIN_USERS: &str = "
CREATE TABLE IF NOT EXISTS admin_users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_CLIENTS: &str = "
CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    district TEXT DEFAULT '',
    job_role TEXT DEFAULT '',
    country TEXT DEFAULT '',
    passport_no TEXT DEFAULT '',
    passport_submit_date TEXT DEFAULT '',
    passport_submitted_by TEXT DEFAULT 'self',
    passport_fee REAL DEFAULT 0,
    passport_payment_mode TEXT DEFAULT '',
    passport_payment_status TEXT DEFAULT 'pending',
    passport_payment_date TEXT DEFAULT '',
    passport_payment_reference TEXT DEFAULT '',
    interview_date TEXT DEFAULT '',
    interview_time TEXT DEFAULT '',
    interview_location TEXT DEFAULT '',
    interview_status TEXT DEFAULT 'pending',
    interview_reschedule_date TEXT DEFAULT '',
    interview_remarks TEXT DEFAULT '',
    offer_letter_status TEXT DEFAULT 'pending',
    offer_letter_date TEXT DEFAULT '',
    offer_letter_reference TEXT DEFAULT '',
    employer_company TEXT DEFAULT '',
    offered_salary TEXT DEFAULT '',
    contract_duration TEXT DEFAULT '',
    advance_payment REAL DEFAULT 0,
    advance_payment_mode TEXT DEFAULT '',
    advance_payment_status TEXT DEFAULT 'pending',
    advance_payment_date TEXT DEFAULT '',
    advance_payment_time TEXT DEFAULT '',
    advance_payment_reference TEXT DEFAULT '',
    medical_status TEXT DEFAULT 'pending',
    medical_date TEXT DEFAULT '',
    medical_report_no TEXT DEFAULT '',
    mofa_status TEXT DEFAULT 'not_applied',
    mofa_number TEXT DEFAULT '',
    mofa_date TEXT DEFAULT '',
    vfs_status TEXT DEFAULT 'not_applied',
    vfs_appointment_date TEXT DEFAULT '',
    vfs_reference_no TEXT DEFAULT '',
    takamual_status TEXT DEFAULT 'not_required',
    takamual_date TEXT DEFAULT '',
    takamual_certificate_no TEXT DEFAULT '',
    visa_status TEXT DEFAULT 'not_applied',
    visa_number TEXT DEFAULT '',
    visa_expiry_date TEXT DEFAULT '',
    agreement_process TEXT DEFAULT 'not_created',
    agreement_date TEXT DEFAULT '',
    agreement_number TEXT DEFAULT '',
    client_signed TEXT DEFAULT 'no',
    witness_name TEXT DEFAULT '',
    full_payment REAL DEFAULT 0,
    full_payment_mode TEXT DEFAULT '',
    full_payment_date TEXT DEFAULT '',
    flying_date TEXT DEFAULT '',
    flight_details TEXT DEFAULT '',
    ticket_status TEXT DEFAULT 'not_booked',
    remarks TEXT DEFAULT '',
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// SQLite store over a connection pool.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database at `url`, creating the file and its parent
    /// directory when missing. Accepts `sqlite://path`, `sqlite:path`,
    /// bare paths, and `sqlite::memory:`.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        ensure_parent_dir(url)?;
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // An in-memory database exists per connection; a larger pool would
        // scatter statements across unrelated databases.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }
}

fn ensure_parent_dir(url: &str) -> Result<(), StoreError> {
    let path = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[async_trait]
impl Store for SqliteStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_ADMIN_USERS).execute(&self.pool).await?;
        sqlx::query(CREATE_CLIENTS).execute(&self.pool).await?;
        Ok(())
    }

    async fn find_admin(&self) -> Result<Option<AdminAccount>, StoreError> {
        let admin = sqlx::query_as("SELECT * FROM admin_users LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, StoreError> {
        let admin = sqlx::query_as("SELECT * FROM admin_users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    async fn insert_admin(&self, username: &str, password_digest: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO admin_users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_digest)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn reset_admin_password(
        &self,
        id: i64,
        password_digest: &str,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE admin_users SET password = ? WHERE id = ?")
            .bind(password_digest)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_admin_credentials(
        &self,
        id: i64,
        username: &str,
        password_digest: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE admin_users SET username = ?, password = ?, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(username)
        .bind(password_digest)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_clients(&self) -> Result<Vec<ClientRecord>, StoreError> {
        let clients = sqlx::query_as("SELECT * FROM clients ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(clients)
    }

    async fn get_client(&self, id: i64) -> Result<Option<ClientRecord>, StoreError> {
        let client = sqlx::query_as("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn insert_client(&self, fields: &[ClientField]) -> Result<i64, StoreError> {
        let columns: Vec<&str> = fields.iter().map(|f| f.column).collect();
        let placeholders = vec!["?"; fields.len()].join(", ");
        let sql = format!(
            "INSERT INTO clients ({}) VALUES ({})",
            columns.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for field in fields {
            query = match &field.value {
                FieldValue::Text(s) => query.bind(s.as_str()),
                FieldValue::Amount(a) => query.bind(*a),
            };
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    async fn update_client(&self, id: i64, fields: &[ClientField]) -> Result<(), StoreError> {
        let mut sets: Vec<String> = fields
            .iter()
            .map(|f| format!("{} = ?", f.column))
            .collect();
        sets.push("updated_at = CURRENT_TIMESTAMP".to_string());
        let sql = format!("UPDATE clients SET {} WHERE id = ?", sets.join(", "));

        let mut query = sqlx::query(&sql);
        for field in fields {
            query = match &field.value {
                FieldValue::Text(s) => query.bind(s.as_str()),
                FieldValue::Amount(a) => query.bind(*a),
            };
        }
        query.bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn delete_client(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn clear_clients(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM clients").execute(&self.pool).await?;
        Ok(())
    }

    async fn stats(&self) -> Result<PipelineStats, StoreError> {
        let total_clients: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;
        let interview_pending: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM clients WHERE interview_status IN ('pending', 'scheduled')",
        )
        .fetch_one(&self.pool)
        .await?;
        let interview_passed: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM clients WHERE interview_status IN ('selected', 'passed')",
        )
        .fetch_one(&self.pool)
        .await?;
        let visa_approved: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE visa_status = 'approved'")
                .fetch_one(&self.pool)
                .await?;
        let visa_processing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM clients \
             WHERE visa_status NOT IN ('approved', 'rejected', 'not_applied', '')",
        )
        .fetch_one(&self.pool)
        .await?;
        let total_advance: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(advance_payment), 0) AS REAL) FROM clients",
        )
        .fetch_one(&self.pool)
        .await?;
        let total_full_payment: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(full_payment), 0) AS REAL) FROM clients",
        )
        .fetch_one(&self.pool)
        .await?;
        let total_passport_fee: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(passport_fee), 0) AS REAL) FROM clients \
             WHERE passport_submitted_by = 'agency'",
        )
        .fetch_one(&self.pool)
        .await?;
        let ready_to_fly: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM clients \
             WHERE visa_status = 'approved' AND flying_date IS NOT NULL AND flying_date != ''",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PipelineStats {
            total_clients,
            interview_pending,
            interview_passed,
            visa_approved,
            visa_processing,
            total_advance,
            total_full_payment,
            total_passport_fee,
            total_revenue: total_advance + total_full_payment + total_passport_fee,
            ready_to_fly,
        })
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
