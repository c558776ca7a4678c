/*
 * SPDX-License-Identifier: Apache-2.0
 */

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::types::{Blob, ListOptions, Transaction};

/// The backend-agnostic blob storage contract.
///
/// One capability set — list, write, read, delete, exists, metadata get/set,
/// transaction-open — implemented per backend as a separate concrete type.
/// [`Client`](crate::Client) is the DigitalOcean Spaces implementation.
///
/// Every operation takes a [`CancellationToken`]; cancelling it aborts the
/// in-flight network calls the operation spawned and prevents it from issuing
/// new ones.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Enumerate blobs in the container, paging internally until the listing
    /// is exhausted. An empty container yields an empty collection.
    async fn list(
        &self,
        options: Option<ListOptions>,
        cancel: CancellationToken,
    ) -> Result<Vec<Blob>, Error>;

    /// Upload the full stream to `path`.
    ///
    /// `append` is not supported by object stores that perform whole-object
    /// replacement; implementations for such backends reject `append = true`
    /// with [`ErrorKind::Unsupported`](crate::error::ErrorKind::Unsupported)
    /// rather than silently overwriting.
    async fn write(
        &self,
        path: &str,
        body: ByteStream,
        append: bool,
        cancel: CancellationToken,
    ) -> Result<(), Error>;

    /// Open a streaming read of the object at `path`. The caller owns the
    /// returned stream and is responsible for consuming or dropping it.
    ///
    /// An absent object fails with
    /// [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound).
    async fn open_read(&self, path: &str, cancel: CancellationToken) -> Result<ByteStream, Error>;

    /// Delete every path in the batch, best-effort: all paths are attempted
    /// even when some fail, and per-item failures are reported together as one
    /// [`ErrorKind::BatchFailed`](crate::error::ErrorKind::BatchFailed) error.
    /// Deleting an absent path is a success.
    async fn delete(&self, paths: Vec<String>, cancel: CancellationToken) -> Result<(), Error>;

    /// Probe each path for existence. The result is order-aligned with the
    /// input regardless of internal concurrency. "Not found" maps to `false`;
    /// any other failure propagates as an error, never as `false`.
    async fn exists(&self, paths: Vec<String>, cancel: CancellationToken)
        -> Result<Vec<bool>, Error>;

    /// Return identity-only blob records for the requested paths without
    /// verifying existence or fetching metadata.
    async fn get_blobs(
        &self,
        paths: Vec<String>,
        cancel: CancellationToken,
    ) -> Result<Vec<Blob>, Error>;

    /// Replace each blob's stored metadata with the blob's metadata map,
    /// following the same best-effort-all batch policy as [`delete`].
    ///
    /// [`delete`]: BlobStorage::delete
    async fn set_blobs(&self, blobs: Vec<Blob>, cancel: CancellationToken) -> Result<(), Error>;

    /// Open a transaction when the backend supports one.
    ///
    /// `None` signals capability absence, not failure: callers fall back to
    /// performing operations individually with no atomicity guarantee.
    fn open_transaction(&self) -> Option<Transaction> {
        None
    }
}
