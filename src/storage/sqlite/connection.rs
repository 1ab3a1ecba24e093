//! Connection handling for the `SQLite` catalog.
//!
//! The catalog never writes, so connections are opened read-only and scoped
//! to a single lookup. Dropping the [`Connection`] closes it.

use crate::{Error, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

/// How long a lookup waits on a locked database before failing.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens `path` read-only and applies [`configure_connection`].
///
/// A missing file is an error; it is never created.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] with operation `open_catalog` if the
/// file cannot be opened, or the error from [`configure_connection`].
pub fn open_read_only(path: &Path) -> Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_URI;

    let conn = Connection::open_with_flags(path, flags).map_err(|e| Error::OperationFailed {
        operation: "open_catalog".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;

    configure_connection(&conn)?;
    Ok(conn)
}

/// Configures a catalog connection.
///
/// # Configuration Applied
///
/// - **`busy_timeout`**: waits up to [`BUSY_TIMEOUT`] on lock contention with
///   an external writer instead of failing immediately
/// - **`query_only`**: rejects any statement that would modify the database
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the configuration cannot be applied.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|e| Error::OperationFailed {
            operation: "configure_connection".to_string(),
            cause: e.to_string(),
        })?;
    conn.pragma_update(None, "query_only", "ON")
        .map_err(|e| Error::OperationFailed {
            operation: "configure_connection".to_string(),
            cause: e.to_string(),
        })?;

    Ok(())
}
