use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::{Connection, SimpleConnection};
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::errors::StorageError;
use wishlist_core::errors::{DatabaseError, Error, Result};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub mod write_actor;
pub use write_actor::{spawn_writer, WriteHandle};

/// Prepares the database file at `db_path`, creating parent directories as
/// needed, and switches it to WAL mode. Returns the path unchanged.
pub fn init(db_path: &str) -> Result<String> {
    if let Some(db_dir) = Path::new(db_path).parent() {
        if !db_dir.as_os_str().is_empty() && !db_dir.exists() {
            fs::create_dir_all(db_dir)?;
        }
    }

    let mut conn = SqliteConnection::establish(db_path).map_err(StorageError::from)?;
    conn.batch_execute(
        "
            PRAGMA journal_mode = WAL;
            PRAGMA busy_timeout = 30000;
            PRAGMA synchronous  = NORMAL;
        ",
    )
    .map_err(StorageError::from)?;

    Ok(db_path.to_string())
}

pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(8)
        .min_idle(Some(1))
        .connection_timeout(Duration::from_secs(30))
        .connection_customizer(Box::new(ConnectionCustomizer))
        .build(manager)
        .map_err(|e| DatabaseError::PoolCreationFailed(e.to_string()))?;
    Ok(Arc::new(pool))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("Running database migrations");
    let mut connection = get_connection(pool)?;

    let applied = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Database migration failed: {}", e);
        Error::Database(DatabaseError::MigrationFailed(e.to_string()))
    })?;

    if applied.is_empty() {
        info!("No pending migrations to apply.");
    } else {
        for version in &applied {
            info!("Applied migration {}", version);
        }
    }

    Ok(())
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    Ok(pool.get().map_err(StorageError::from)?)
}

/// Takes a consistent snapshot of the live database and returns the bytes of
/// a standalone SQLite file.
///
/// Uses SQLite's online backup API, so writers that commit while the copy is
/// running are never observed half-applied.
pub fn backup_database(db_path: &str) -> Result<Vec<u8>> {
    let snapshot_path = snapshot_path(db_path);
    info!("Creating database snapshot of {}", db_path);

    let result = write_snapshot(db_path, &snapshot_path).and_then(|_| {
        fs::read(&snapshot_path).map_err(|e| {
            Error::Database(DatabaseError::BackupFailed(format!(
                "Failed to read snapshot: {}",
                e
            )))
        })
    });

    if let Err(e) = fs::remove_file(&snapshot_path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            error!("Failed to remove snapshot {}: {}", snapshot_path.display(), e);
        }
    }

    match &result {
        Ok(bytes) => info!("Database snapshot created ({} bytes)", bytes.len()),
        Err(e) => error!("Database snapshot failed: {}", e),
    }
    result
}

fn write_snapshot(db_path: &str, snapshot_path: &Path) -> Result<()> {
    let src = rusqlite::Connection::open_with_flags(
        db_path,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(StorageError::from)?;
    let mut dst = rusqlite::Connection::open(snapshot_path).map_err(StorageError::from)?;

    let backup = rusqlite::backup::Backup::new(&src, &mut dst).map_err(StorageError::from)?;
    backup
        .run_to_completion(128, Duration::from_millis(10), None)
        .map_err(StorageError::from)?;
    Ok(())
}

fn snapshot_path(db_path: &str) -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S%f");
    let file_name = format!(".snapshot-{}-{}.sqlite", std::process::id(), stamp);
    match Path::new(db_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        conn.batch_execute(
            "
                PRAGMA busy_timeout = 30000;
                PRAGMA synchronous = NORMAL;
            ",
        )
        .map_err(r2d2::Error::QueryError)?;

        Ok(())
    }
}
