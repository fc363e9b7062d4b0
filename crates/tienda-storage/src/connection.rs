//! Connection management — single write connection + read pool.
//!
//! All writes are serialized through one mutex-guarded connection; reads
//! round-robin over a small pool. File-backed databases run in WAL mode.
//! In-memory mode uses a shared-cache URI so the writer and the readers
//! observe the same database.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use tienda_core::errors::StorageError;

use crate::migrations;

/// Monotonic counter so each in-memory manager gets its own database.
static IN_MEMORY_SEQ: AtomicU64 = AtomicU64::new(0);

/// Owns the write connection and the read pool.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    next_reader: AtomicUsize,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a file-backed database, apply pragmas, and run migrations.
    pub fn open(path: &Path, read_pool_size: usize) -> Result<Self, StorageError> {
        let writer = Connection::open(path)?;
        apply_writer_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        let pool_size = read_pool_size.max(1);
        let mut readers = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            apply_reader_pragmas(&conn)?;
            readers.push(Mutex::new(conn));
        }

        debug!(
            "opened database at {} with {} readers",
            path.display(),
            pool_size
        );

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            next_reader: AtomicUsize::new(0),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing). Shared cache keeps the
    /// writer and readers on one database for the manager's lifetime.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let seq = IN_MEMORY_SEQ.fetch_add(1, Ordering::Relaxed);
        let uri = format!("file:tienda_mem_{seq}?mode=memory&cache=shared");
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let writer = Connection::open_with_flags(&uri, flags)?;
        apply_reader_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        let reader = Connection::open_with_flags(&uri, flags)?;
        apply_reader_pragmas(&reader)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: vec![Mutex::new(reader)],
            next_reader: AtomicUsize::new(0),
            path: None,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a closure against a pooled read connection.
    pub fn with_reader<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StorageError>,
        F: FnOnce(&Connection) -> Result<T, E>,
    {
        let idx = self.next_reader.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let guard = lock(&self.readers[idx]);
        f(&guard)
    }

    /// Run a closure against the serialized write connection.
    pub fn with_writer<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StorageError>,
        F: FnOnce(&Connection) -> Result<T, E>,
    {
        let guard = lock(&self.writer);
        f(&guard)
    }

    /// WAL checkpoint (no-op for in-memory databases).
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        let guard = lock(&self.writer);
        guard
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")
            .map_err(StorageError::from)
    }
}

/// Lock a connection, recovering from poisoning: the connection itself is
/// still usable after a panicked holder, and SQLite rolls back any
/// transaction that was left open.
fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    match conn.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn apply_writer_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(StorageError::from)
}

fn apply_reader_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(StorageError::from)
}
