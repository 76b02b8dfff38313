//! # error
//!
//! Adapter error taxonomy

use remotefs::{RemoteError, RemoteErrorType};
use thiserror::Error;

/// Result returned by filesystem adapter operations
pub type FsResult<T> = Result<T, FsError>;

/// Classification of a share client failure.
///
/// The share client signals its failures with a [`RemoteError`]; the adapter only cares
/// whether a path was missing, already there or of the wrong type.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShareCondition {
    NotFound,
    AlreadyExists,
    WrongType,
    Other,
}

impl From<&RemoteError> for ShareCondition {
    fn from(err: &RemoteError) -> Self {
        match err.kind {
            RemoteErrorType::NoSuchFileOrDirectory => Self::NotFound,
            RemoteErrorType::DirectoryAlreadyExists => Self::AlreadyExists,
            RemoteErrorType::BadFile => Self::WrongType,
            _ => Self::Other,
        }
    }
}

/// Kind of failed filesystem operation
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum FsErrorKind {
    #[error("unable to check existence")]
    ExistenceCheckFailure,
    #[error("unable to write file")]
    WriteFailure,
    #[error("unable to read file")]
    ReadFailure,
    #[error("unable to delete file")]
    DeleteFailure,
    #[error("unable to list contents")]
    ListFailure,
    #[error("unable to move file")]
    MoveFailure,
    #[error("unable to copy file")]
    CopyFailure,
    #[error("unable to create directory")]
    DirectoryCreateFailure,
    #[error("unable to delete directory")]
    DirectoryDeleteFailure,
    #[error("unsupported operation")]
    UnsupportedOperation,
    #[error("unable to retrieve metadata")]
    MetadataRetrievalFailure,
}

/// Error raised by the filesystem adapter.
///
/// Carries the logical location the operation was attempted on and, when the failure
/// originated in the share client, the original cause, exposed as the error source.
#[derive(Debug, Error)]
#[error("{kind} at `{location}`{}", fmt_destination(.destination))]
pub struct FsError {
    pub kind: FsErrorKind,
    pub location: String,
    pub destination: Option<String>,
    #[source]
    pub cause: Option<RemoteError>,
}

impl FsError {
    /// Instantiate a new `FsError` without cause
    pub fn new<S: Into<String>>(kind: FsErrorKind, location: S) -> Self {
        Self {
            kind,
            location: location.into(),
            destination: None,
            cause: None,
        }
    }

    /// Instantiate a new `FsError` caused by a share client failure
    pub fn with_cause<S: Into<String>>(kind: FsErrorKind, location: S, cause: RemoteError) -> Self {
        Self::new(kind, location).caused_by(cause)
    }

    /// Construct `FsError` with the destination of a move or copy
    pub fn destination<S: Into<String>>(mut self, destination: S) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Construct `FsError` with the provided cause
    pub fn caused_by(mut self, cause: RemoteError) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Turn the failure of an inner operation into the failure of `kind` at `location`,
    /// keeping its cause
    pub(crate) fn rewrap<S: Into<String>>(self, kind: FsErrorKind, location: S) -> Self {
        Self {
            kind,
            location: location.into(),
            destination: None,
            cause: self.cause,
        }
    }

    /// Classification of the cause; `Other` if there is none
    pub fn condition(&self) -> ShareCondition {
        self.cause
            .as_ref()
            .map(ShareCondition::from)
            .unwrap_or(ShareCondition::Other)
    }

    /// Returns whether the cause reports a missing path
    pub fn is_not_found(&self) -> bool {
        self.condition() == ShareCondition::NotFound
    }
}

/// Wrap an I/O failure raised while streaming as a share client failure
pub(crate) fn io_error(err: std::io::Error) -> RemoteError {
    RemoteError::new_ex(RemoteErrorType::IoError, err)
}

fn fmt_destination(destination: &Option<String>) -> String {
    match destination {
        Some(destination) => format!(" -> `{destination}`"),
        None => String::new(),
    }
}
