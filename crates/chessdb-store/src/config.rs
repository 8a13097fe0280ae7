//! Connection settings for [`SqliteStore`](crate::SqliteStore).

use std::time::Duration;

/// SQLite journal mode applied when a file database is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    /// Write-ahead log: readers don't block the writer.
    Wal,
    /// SQLite's rollback journal default.
    Delete,
}

impl JournalMode {
    pub(crate) fn pragma_value(self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
        }
    }
}

/// Configuration for the SQLite store.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
    /// Journal mode for file databases. Ignored for in-memory databases.
    pub journal_mode: JournalMode,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(5),
            journal_mode: JournalMode::Wal,
        }
    }
}
