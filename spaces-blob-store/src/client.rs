/*
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::storage::BlobStorage;
use crate::types::{Blob, ListOptions, Transaction};
use crate::Config;

/// Blob storage client for DigitalOcean Spaces.
///
/// Cheap to clone; all clones share one underlying S3 client handle. The
/// handle holds only immutable configuration and transport state, so
/// operations may run concurrently without locking. Network resources are
/// released when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations, i.e. the fixed container
/// identity and the shared S3 client.
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: Config,
}

impl Drop for Handle {
    fn drop(&mut self) {
        tracing::debug!(
            bucket = self.config.bucket(),
            "releasing Spaces client resources"
        );
    }
}

impl Client {
    /// Creates a new client from an adapter config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle { config });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Enumerate the blobs in the configured bucket.
    ///
    /// Pages through `ListObjectsV2` internally until the listing is
    /// exhausted; partial pages never leak to the caller. `options` defaults
    /// to "everything, default paging". Size, last-modified time and etag
    /// returned by the listing are surfaced on each [`Blob`].
    pub async fn list(
        &self,
        options: Option<ListOptions>,
        cancel: CancellationToken,
    ) -> Result<Vec<Blob>, Error> {
        crate::operation::list::orchestrate(&self.handle, options.unwrap_or_default(), cancel)
            .await
    }

    /// Upload a stream to `path`, applying the configured canned ACL.
    ///
    /// The stream is handed to the store in a single pass, never buffered
    /// wholesale. `append = true` is rejected with an unsupported-operation
    /// error: Spaces replaces objects wholesale and cannot append.
    pub async fn write(
        &self,
        path: &str,
        body: ByteStream,
        append: bool,
        cancel: CancellationToken,
    ) -> Result<(), Error> {
        crate::operation::write::orchestrate(&self.handle, path, body, append, cancel).await
    }

    /// Open a streaming read of the object at `path`.
    ///
    /// The caller owns the returned stream. An absent object fails with
    /// [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound).
    pub async fn open_read(
        &self,
        path: &str,
        cancel: CancellationToken,
    ) -> Result<ByteStream, Error> {
        crate::operation::read::orchestrate(&self.handle, path, cancel).await
    }

    /// Delete every path in the batch, best-effort.
    ///
    /// All paths are attempted even when some fail; failures are collected
    /// into one [`ErrorKind::BatchFailed`](crate::error::ErrorKind::BatchFailed)
    /// error carrying the failed subset. Absent paths delete as no-ops.
    pub async fn delete(
        &self,
        paths: Vec<String>,
        cancel: CancellationToken,
    ) -> Result<(), Error> {
        crate::operation::delete::orchestrate(&self.handle, paths, cancel).await
    }

    /// Probe each path for existence with a `HeadObject` request.
    ///
    /// Probes run concurrently but the result order always matches the input
    /// order. "Not found" maps to `false`; every other failure propagates as
    /// an error rather than being coerced to `false`.
    pub async fn exists(
        &self,
        paths: Vec<String>,
        cancel: CancellationToken,
    ) -> Result<Vec<bool>, Error> {
        crate::operation::exists::orchestrate(&self.handle, paths, cancel).await
    }

    /// Return identity-only blob records for the requested paths.
    ///
    /// No existence check or metadata fetch is performed; the records carry
    /// nothing beyond the path.
    pub async fn get_blobs(
        &self,
        paths: Vec<String>,
        cancel: CancellationToken,
    ) -> Result<Vec<Blob>, Error> {
        crate::operation::get_blobs::orchestrate(&self.handle, paths, cancel).await
    }

    /// Replace each blob's stored metadata via copy-onto-self.
    ///
    /// Uses `CopyObject` with replace-metadata semantics and the configured
    /// canned ACL, the canonical metadata update on an S3-compatible store.
    /// Follows the same best-effort-all batch policy as [`delete`](Self::delete).
    pub async fn set_blobs(
        &self,
        blobs: Vec<Blob>,
        cancel: CancellationToken,
    ) -> Result<(), Error> {
        crate::operation::set_blobs::orchestrate(&self.handle, blobs, cancel).await
    }

    /// Open a transaction.
    ///
    /// Spaces has no transaction capability, so this always returns `None`.
    /// Absence is a value, not an error: callers perform operations
    /// individually with no atomicity guarantee.
    pub fn open_transaction(&self) -> Option<Transaction> {
        None
    }
}

#[async_trait]
impl BlobStorage for Client {
    async fn list(
        &self,
        options: Option<ListOptions>,
        cancel: CancellationToken,
    ) -> Result<Vec<Blob>, Error> {
        Client::list(self, options, cancel).await
    }

    async fn write(
        &self,
        path: &str,
        body: ByteStream,
        append: bool,
        cancel: CancellationToken,
    ) -> Result<(), Error> {
        Client::write(self, path, body, append, cancel).await
    }

    async fn open_read(&self, path: &str, cancel: CancellationToken) -> Result<ByteStream, Error> {
        Client::open_read(self, path, cancel).await
    }

    async fn delete(&self, paths: Vec<String>, cancel: CancellationToken) -> Result<(), Error> {
        Client::delete(self, paths, cancel).await
    }

    async fn exists(
        &self,
        paths: Vec<String>,
        cancel: CancellationToken,
    ) -> Result<Vec<bool>, Error> {
        Client::exists(self, paths, cancel).await
    }

    async fn get_blobs(
        &self,
        paths: Vec<String>,
        cancel: CancellationToken,
    ) -> Result<Vec<Blob>, Error> {
        Client::get_blobs(self, paths, cancel).await
    }

    async fn set_blobs(&self, blobs: Vec<Blob>, cancel: CancellationToken) -> Result<(), Error> {
        Client::set_blobs(self, blobs, cancel).await
    }

    fn open_transaction(&self) -> Option<Transaction> {
        Client::open_transaction(self)
    }
}
