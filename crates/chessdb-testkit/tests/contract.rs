//! The store contract, run against every backend.

use std::sync::atomic::{AtomicUsize, Ordering};

use chessdb_store::{JournalMode, MemoryStore, SqliteConfig, SqliteStore};
use chessdb_testkit::contract;

#[tokio::test]
async fn test_memory_store_contract() {
    contract::run_all(MemoryStore::new).await;
}

#[tokio::test]
async fn test_sqlite_memory_contract() {
    contract::run_all(|| SqliteStore::open_memory().unwrap()).await;
}

#[tokio::test]
async fn test_sqlite_file_contract() {
    let dir = tempfile::tempdir().unwrap();
    let counter = AtomicUsize::new(0);

    contract::run_all(|| {
        let n = counter.fetch_add(1, Ordering::Relaxed);
        SqliteStore::open(dir.path().join(format!("contract-{n}.db"))).unwrap()
    })
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sqlite_rollback_journal_contract() {
    let dir = tempfile::tempdir().unwrap();
    let counter = AtomicUsize::new(0);
    let config = SqliteConfig {
        journal_mode: JournalMode::Delete,
        ..SqliteConfig::default()
    };

    contract::run_all(|| {
        let n = counter.fetch_add(1, Ordering::Relaxed);
        SqliteStore::open_with_config(dir.path().join(format!("rollback-{n}.db")), &config)
            .unwrap()
    })
    .await;
}
