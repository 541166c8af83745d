//! PostgreSQL Sink Adapter
//!
//! Appends transfer records to the `transfer_records` table. Delivery upstream is
//! at-least-once, so inserts use ON CONFLICT DO NOTHING on the signature.

use crate::{
    application::{AppError, AppResult, RecordSink},
    domain::TransferRecord,
};
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS transfer_records (
                   signature TEXT PRIMARY KEY,
                   source_amount TEXT NOT NULL,
                   destination_amount TEXT NOT NULL,
                   source_account TEXT NOT NULL,
                   destination_account TEXT NOT NULL,
                   transaction_fees BIGINT NOT NULL,
                   block_time TIMESTAMPTZ,
                   block_number BIGINT NOT NULL
               )"#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Returns the number of rows written; zero when the signature was already stored.
    pub async fn save_record(&self, record: &TransferRecord) -> AppResult<u64> {
        let details = &record.details;
        let result = sqlx::query(
            r#"INSERT INTO transfer_records (signature, source_amount, destination_amount, source_account, destination_account, transaction_fees, block_time, block_number)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               ON CONFLICT (signature) DO NOTHING"#,
        )
        .bind(&details.signature)
        .bind(&details.source_amount)
        .bind(&details.destination_amount)
        .bind(&details.source_account)
        .bind(&details.destination_account)
        .bind(details.transaction_fee as i64)
        .bind(record.block_timestamp())
        .bind(record.block_number as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RecordSink for PostgresRepository {
    async fn append(&self, record: &TransferRecord) -> AppResult<()> {
        let written = self.save_record(record).await?;
        if written == 0 {
            tracing::debug!(signature = %record.details.signature, "Record already stored");
        } else {
            tracing::debug!(signature = %record.details.signature, "Saved transfer record");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "postgres"
    }
}
