//! Store failure classification shared by every service error.

use thiserror::Error;

/// A failure reported by the store, split by whether retrying later can help.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection refused, pool exhausted, or the database is locked.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

fn is_transient(err: &sea_orm::DbErr) -> bool {
    use sea_orm::DbErr;

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => true,
        other => {
            let msg = other.to_string();
            msg.contains("database is locked") || msg.contains("database is busy")
        }
    }
}

impl From<sea_orm::DbErr> for StorageError {
    fn from(err: sea_orm::DbErr) -> Self {
        if is_transient(&err) {
            Self::Unavailable(err.to_string())
        } else {
            Self::Database(err.to_string())
        }
    }
}

impl From<anyhow::Error> for StorageError {
    fn from(err: anyhow::Error) -> Self {
        let transient = err
            .chain()
            .filter_map(|cause| cause.downcast_ref::<sea_orm::DbErr>())
            .any(is_transient);

        if transient {
            Self::Unavailable(format!("{err:#}"))
        } else {
            Self::Database(format!("{err:#}"))
        }
    }
}

/// Implements `From<DbErr>` and `From<anyhow::Error>` for a service error
/// that carries a `Storage(StorageError)` variant.
macro_rules! storage_error_conversions {
    ($error:ty) => {
        impl From<sea_orm::DbErr> for $error {
            fn from(err: sea_orm::DbErr) -> Self {
                Self::Storage(err.into())
            }
        }

        impl From<anyhow::Error> for $error {
            fn from(err: anyhow::Error) -> Self {
                Self::Storage(err.into())
            }
        }
    };
}

pub(crate) use storage_error_conversions;
