/*
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

use aws_sdk_s3::error::ProvideErrorMetadata;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of adapter errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation input validation issues
    InputInvalid,

    /// Requested object absent (e.g. bucket or key not found)
    NotFound,

    /// A requested capability this backend cannot provide (e.g. append-write)
    Unsupported,

    /// Network/auth/quota/permission failure from the underlying S3 client,
    /// propagated with the SDK error as source
    Transport,

    /// One or more items in a batch operation failed. The error source is a
    /// [`BatchError`] carrying the per-item failures.
    BatchFailed,

    /// The operation was cancelled via its cancellation token before completing.
    OperationCancelled,
}

impl Error {
    /// Creates a new adapter [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the per-item failures when this is a [`ErrorKind::BatchFailed`] error.
    ///
    /// Callers can use the returned paths to retry exactly the failed subset of
    /// a batch.
    pub fn batch_failures(&self) -> Option<&[ItemFailure]> {
        self.source
            .downcast_ref::<BatchError>()
            .map(|batch| batch.failures.as_slice())
    }

    pub(crate) fn batch(failures: Vec<ItemFailure>) -> Error {
        Error::new(ErrorKind::BatchFailed, BatchError { failures })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::NotFound => write!(f, "object not found"),
            ErrorKind::Unsupported => write!(f, "unsupported operation"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::BatchFailed => write!(f, "one or more batch items failed"),
            ErrorKind::OperationCancelled => write!(f, "operation cancelled"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Aggregated failures from a batch operation (delete, exists, set-blobs).
///
/// Every item in the batch is attempted regardless of individual failures; the
/// ones that failed end up here, paired with their underlying error.
#[derive(Debug)]
pub struct BatchError {
    failures: Vec<ItemFailure>,
}

impl BatchError {
    /// The per-item failures.
    pub fn failures(&self) -> &[ItemFailure] {
        &self.failures
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} batch item(s) failed: ", self.failures.len())?;
        let mut paths = self.failures.iter().map(|i| i.path.as_str());
        if let Some(first) = paths.next() {
            write!(f, "{first}")?;
            for path in paths {
                write!(f, ", {path}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for BatchError {}

/// A single failed item within a batch operation.
#[derive(Debug)]
pub struct ItemFailure {
    path: String,
    source: Error,
}

impl ItemFailure {
    pub(crate) fn new(path: String, source: Error) -> Self {
        Self { path, source }
    }

    /// Full path of the item that failed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The error that failed this item.
    pub fn error(&self) -> &Error {
        &self.source
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn unsupported<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::Unsupported, err)
}

impl<E, R> From<aws_sdk_s3::error::SdkError<E, R>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: aws_sdk_s3::error::SdkError<E, R>) -> Self {
        let kind = match value.code() {
            Some("NotFound" | "NoSuchKey" | "NoSuchBucket") => ErrorKind::NotFound,
            _ => ErrorKind::Transport,
        };

        Error::new(kind, value)
    }
}

static CANCELLATION_ERROR: &str =
    "the operation's cancellation token fired, cancelling all ongoing requests";

pub(crate) fn operation_cancelled() -> Error {
    Error::new(ErrorKind::OperationCancelled, CANCELLATION_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_error_exposes_failed_subset() {
        let failures = vec![
            ItemFailure::new(
                "a/x.txt".to_owned(),
                Error::new(ErrorKind::Transport, "permission denied"),
            ),
            ItemFailure::new(
                "a/y.txt".to_owned(),
                Error::new(ErrorKind::Transport, "quota exceeded"),
            ),
        ];
        let err = Error::batch(failures);

        assert_eq!(err.kind(), &ErrorKind::BatchFailed);
        let failed = err.batch_failures().expect("batch source");
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].path(), "a/x.txt");
        assert_eq!(failed[1].path(), "a/y.txt");
        assert_eq!(failed[0].error().kind(), &ErrorKind::Transport);
    }

    #[test]
    fn non_batch_error_has_no_failures() {
        let err = invalid_input("empty path");
        assert!(err.batch_failures().is_none());
    }
}
