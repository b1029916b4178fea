#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use movies_app::settings::DatabaseConfig;
use movies_app::{state, AppState, AuditAction, AuditLog, AuditRecord};
use movies_test::TestApp;
use sqlx::SqlitePool;

/// Collects audit records so tests can inspect them.
#[derive(Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditLog {
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<AuditAction> {
        self.records().iter().map(|r| r.action).collect()
    }
}

impl AuditLog for MemoryAuditLog {
    fn record(&self, record: &AuditRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

pub struct TestContext {
    pub app: TestApp,
    pub audit: Arc<MemoryAuditLog>,
    pub pool: SqlitePool,
}

/// A fresh app over its own in-memory database.
pub async fn setup() -> TestContext {
    let pool = state::connect(&DatabaseConfig::in_memory()).await.unwrap();
    let audit = Arc::new(MemoryAuditLog::default());
    let app = TestApp::new(movies_app::router(AppState::new(
        pool.clone(),
        audit.clone(),
    )));
    TestContext { app, audit, pool }
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    count
}
