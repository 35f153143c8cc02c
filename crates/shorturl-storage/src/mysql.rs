use async_trait::async_trait;
use shorturl_core::repository::{ReadRepository, Repository, Result};
use shorturl_core::{ShortId, StorageError, UrlMapping};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::debug;

/// Schema for the `url_mappings` table.
pub const URL_MAPPINGS_DDL: &str = include_str!("../ddl/mysql/url_mappings.sql");

/// MySQL implementation of the repository contract.
///
/// Insertion order is tracked by the auto-increment `seq` column. Unique keys
/// on `id` and on the SHA-256 digest of `url` make the database reject a
/// second mapping for either, which surfaces as [`StorageError::Conflict`].
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `url_mappings` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(URL_MAPPINGS_DDL)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("url_mappings schema is in place");
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn row_to_mapping(row: &MySqlRow) -> Result<UrlMapping> {
    let id: u64 = row.try_get("id").map_err(map_sqlx_error)?;
    let url: String = row.try_get("url").map_err(map_sqlx_error)?;
    Ok(UrlMapping::new(ShortId::new(id), url))
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn find_by_url(&self, url: &str) -> Result<Option<UrlMapping>> {
        let row = sqlx::query(
            r#"
            SELECT id, url
            FROM url_mappings
            WHERE url_digest = UNHEX(SHA2(?, 256))
              AND url = ?
            LIMIT 1
            "#,
        )
        .bind(url)
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_mapping).transpose()
    }

    async fn find_by_id(&self, id: ShortId) -> Result<Option<UrlMapping>> {
        let row = sqlx::query(
            r#"
            SELECT id, url
            FROM url_mappings
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_mapping).transpose()
    }

    async fn find_latest(&self) -> Result<Option<UrlMapping>> {
        let row = sqlx::query(
            r#"
            SELECT id, url
            FROM url_mappings
            ORDER BY seq DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_mapping).transpose()
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, mapping: UrlMapping) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_mappings (id, url)
            VALUES (?, ?)
            "#,
        )
        .bind(mapping.id.get())
        .bind(&mapping.url)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(format!(
                "id {} or url {}",
                mapping.id, mapping.url
            ))),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
