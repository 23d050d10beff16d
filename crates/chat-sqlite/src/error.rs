//! Maps sqlx and IO errors onto `StoreAccessError`.
//!
//! SQLite reports most open/corruption problems through result codes; sqlx surfaces those
//! as `sqlx::Error::Database` with the numeric code as a string.

use chat_core::StoreAccessError;
use std::io;
use std::path::Path;

// Primary SQLite result codes (extended codes share the low byte).
const SQLITE_PERM: i64 = 3;
const SQLITE_READONLY: i64 = 8;
const SQLITE_CORRUPT: i64 = 11;
const SQLITE_CANTOPEN: i64 = 14;
const SQLITE_AUTH: i64 = 23;
const SQLITE_NOTADB: i64 = 26;

/// Classifies a sqlx error raised while reading the store at `path`.
pub fn classify_sqlx_error(err: &sqlx::Error, path: &Path) -> StoreAccessError {
    match err {
        sqlx::Error::Io(io_err) => classify_io_error(io_err, path),
        sqlx::Error::Database(db_err) => {
            let message = db_err.message().to_ascii_lowercase();
            let code = db_err
                .code()
                .and_then(|c| c.parse::<i64>().ok())
                .map(|c| c & 0xff);

            match code {
                Some(SQLITE_PERM) | Some(SQLITE_AUTH) => StoreAccessError::PermissionDenied,
                Some(SQLITE_CANTOPEN) => {
                    if path.exists() {
                        StoreAccessError::PermissionDenied
                    } else {
                        StoreAccessError::Missing(path.to_path_buf())
                    }
                }
                Some(SQLITE_CORRUPT) | Some(SQLITE_NOTADB) => {
                    StoreAccessError::Corrupted(db_err.message().to_string())
                }
                Some(SQLITE_READONLY) => StoreAccessError::PermissionDenied,
                _ if message.contains("no such table") || message.contains("no such column") => {
                    StoreAccessError::UnsupportedSchema(db_err.message().to_string())
                }
                _ if message.contains("malformed") || message.contains("not a database") => {
                    StoreAccessError::Corrupted(db_err.message().to_string())
                }
                _ => StoreAccessError::Database(db_err.message().to_string()),
            }
        }
        sqlx::Error::ColumnDecode { source, .. } => StoreAccessError::Corrupted(source.to_string()),
        sqlx::Error::Decode(source) => StoreAccessError::Corrupted(source.to_string()),
        other => StoreAccessError::Database(other.to_string()),
    }
}

/// Classifies an IO error raised while probing the store file at `path`.
pub(crate) fn classify_io_error(err: &io::Error, path: &Path) -> StoreAccessError {
    match err.kind() {
        io::ErrorKind::NotFound => StoreAccessError::Missing(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => StoreAccessError::PermissionDenied,
        _ => StoreAccessError::Database(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_io_not_found_is_missing() {
        let path = PathBuf::from("/nowhere/state.vscdb");
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(
            classify_io_error(&err, &path),
            StoreAccessError::Missing(path.clone())
        );
    }

    #[test]
    fn test_io_permission_denied() {
        let path = PathBuf::from("/locked/state.vscdb");
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(
            classify_io_error(&err, &path),
            StoreAccessError::PermissionDenied
        );
    }

    #[test]
    fn test_sqlx_io_error_is_classified_like_io() {
        let path = PathBuf::from("/locked/state.vscdb");
        let err = sqlx::Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert_eq!(
            classify_sqlx_error(&err, &path),
            StoreAccessError::PermissionDenied
        );
    }

    #[test]
    fn test_other_sqlx_errors_are_database_errors() {
        let path = PathBuf::from("/x/state.vscdb");
        let err = sqlx::Error::RowNotFound;
        assert!(matches!(
            classify_sqlx_error(&err, &path),
            StoreAccessError::Database(_)
        ));
    }
}
