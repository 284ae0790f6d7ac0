use std::fmt;

use chargedb_db::DbError;
use chargedb_ocm::OcmError;
use thiserror::Error;

use crate::reconcile::SyncStage;

/// Failure reported by a [`crate::ChargerSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Ocm(#[from] OcmError),

    #[error("{0}")]
    Other(String),
}

/// Failure reported by a [`crate::ChargerStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("{0}")]
    Other(String),
}

/// Which kind of batch a write failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    Upsert,
    Delete,
}

impl fmt::Display for BatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchOperation::Upsert => write!(f, "upsert"),
            BatchOperation::Delete => write!(f, "delete"),
        }
    }
}

/// Coarse classification surfaced to callers at the invocation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    SourceUnavailable,
    MappingError,
    WriteError,
    InternalError,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::SourceUnavailable => "source_unavailable",
            ErrorKind::MappingError => "mapping_error",
            ErrorKind::WriteError => "write_error",
            ErrorKind::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a reconciliation pass.
///
/// Nothing is rolled back: batches committed before the failure stay
/// committed, and the next pass converges the store again.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("charger source unavailable: {0}")]
    SourceUnavailable(#[source] SourceError),

    #[error("invalid upstream record {record}: {reason}")]
    Mapping { record: String, reason: String },

    #[error("failed to read stored charger ids: {0}")]
    StoreRead(#[source] StoreError),

    #[error("{operation} batch {batch_index} failed after {committed} committed record(s): {source}")]
    Write {
        operation: BatchOperation,
        batch_index: usize,
        /// Records of this operation already committed by earlier batches.
        committed: usize,
        #[source]
        source: StoreError,
    },
}

impl SyncError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::SourceUnavailable(_) => ErrorKind::SourceUnavailable,
            SyncError::Mapping { .. } => ErrorKind::MappingError,
            SyncError::StoreRead(_) => ErrorKind::InternalError,
            SyncError::Write { .. } => ErrorKind::WriteError,
        }
    }

    /// The pipeline stage that was running when the pass failed.
    #[must_use]
    pub fn stage(&self) -> SyncStage {
        match self {
            SyncError::SourceUnavailable(_) => SyncStage::Fetching,
            SyncError::Mapping { .. } => SyncStage::Mapping,
            SyncError::StoreRead(_) => SyncStage::Diffing,
            SyncError::Write { .. } => SyncStage::Writing,
        }
    }
}

impl From<OcmError> for SyncError {
    fn from(err: OcmError) -> Self {
        match err {
            OcmError::InvalidRecord { record, reason } => SyncError::Mapping { record, reason },
            other => SyncError::SourceUnavailable(SourceError::Ocm(other)),
        }
    }
}

/// Errors returned by the town lookup.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{0}")]
    BadRequest(String),

    #[error("store query failed: {0}")]
    Internal(#[source] StoreError),
}

impl QueryError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::BadRequest(_) => ErrorKind::BadRequest,
            QueryError::Internal(_) => ErrorKind::InternalError,
        }
    }
}
