use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::Result;
use crate::modules::records::models::{CalculationKind, CalculationRecord};

/// Reporting filter for listing records
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub kind: Option<CalculationKind>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

/// Limit/offset pagination
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

/// Append-only store of completed computations.
///
/// A single `save` is atomic: either the whole record is persisted or none
/// of it. Every call creates a new record; there is no dedup and no update
/// path.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn save(&self, record: CalculationRecord) -> Result<String>;

    async fn list(&self, filter: &RecordFilter, page: Page) -> Result<Vec<CalculationRecord>>;
}

/// MySQL-backed record store
pub struct MySqlRecordRepository {
    pool: MySqlPool,
}

impl MySqlRecordRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for MySqlRecordRepository {
    async fn save(&self, record: CalculationRecord) -> Result<String> {
        let id = record
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let created_at = record.created_at.unwrap_or_else(Utc::now);

        sqlx::query(
            r#"
            INSERT INTO calculation_records (id, kind, request, result, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(record.kind.to_string())
        .bind(&record.request)
        .bind(&record.result)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list(&self, filter: &RecordFilter, page: Page) -> Result<Vec<CalculationRecord>> {
        let mut builder = sqlx::QueryBuilder::<sqlx::MySql>::new(
            "SELECT id, kind, request, result, created_at FROM calculation_records WHERE 1 = 1",
        );

        if let Some(kind) = filter.kind {
            builder.push(" AND kind = ").push_bind(kind.to_string());
        }
        if let Some(after) = filter.created_after {
            builder.push(" AND created_at >= ").push_bind(after);
        }
        if let Some(before) = filter.created_before {
            builder.push(" AND created_at <= ").push_bind(before);
        }

        builder
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let records = builder
            .build_query_as::<CalculationRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }
}

/// In-memory record store, used by tests and when no database is configured
pub struct InMemoryRecordStore {
    records: RwLock<Vec<CalculationRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save(&self, mut record: CalculationRecord) -> Result<String> {
        let id = record
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        record.id = Some(id.clone());
        if record.created_at.is_none() {
            record.created_at = Some(Utc::now());
        }

        self.records.write().await.push(record);
        Ok(id)
    }

    async fn list(&self, filter: &RecordFilter, page: Page) -> Result<Vec<CalculationRecord>> {
        let records = self.records.read().await;

        let mut matched: Vec<CalculationRecord> = records
            .iter()
            .filter(|r| match filter.kind {
                Some(kind) => r.kind == kind,
                None => true,
            })
            .filter(|r| match (filter.created_after, r.created_at) {
                (Some(after), Some(at)) => at >= after,
                (Some(_), None) => false,
                _ => true,
            })
            .filter(|r| match (filter.created_before, r.created_at) {
                (Some(before), Some(at)) => at <= before,
                (Some(_), None) => false,
                _ => true,
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matched
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }
}
