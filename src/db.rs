//! SQLite pool setup for the repository layer.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use log::error;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Pragmas applied every time a connection is acquired: WAL journaling,
/// enforced foreign keys and the busy timeout. SQLite scopes all three to
/// the connection, so they cannot be set once at pool creation.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA journal_mode = WAL; \
             PRAGMA synchronous = NORMAL; \
             PRAGMA foreign_keys = ON; \
             PRAGMA busy_timeout = {};",
            BUSY_TIMEOUT.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the shared r2d2 pool for the given SQLite database path.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
}

/// Acquires a pooled connection, logging exhaustion before surfacing it.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get()
        .inspect_err(|e| error!("database connection unavailable: {e}"))
}
