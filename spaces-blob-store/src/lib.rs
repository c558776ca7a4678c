/*
 * SPDX-License-Identifier: Apache-2.0
 */

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! A blob storage adapter for DigitalOcean Spaces.
//!
//! Spaces speaks the S3 API, so this crate maps a small backend-agnostic
//! blob-storage contract ([`BlobStorage`]) onto `aws-sdk-s3` calls against a
//! single configured bucket: list, streaming read/write, batched delete,
//! batched existence probes, and metadata replacement. Batch operations are
//! fanned out concurrently and always run to completion; per-item failures are
//! collected into one error rather than aborting the batch.
//!
//! # Examples
//!
//! Construct an adapter and write an object:
//!
//! ```no_run
//! # async fn example() -> Result<(), spaces_blob_store::error::Error> {
//! use aws_sdk_s3::primitives::ByteStream;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = spaces_blob_store::Config::builder()
//!     .access_key("SPACES_KEY")
//!     .secret_key("SPACES_SECRET")
//!     .region("ams3")
//!     .bucket("my-space")
//!     .build()?;
//! let client = spaces_blob_store::Client::new(config);
//!
//! let body = ByteStream::from_static(b"hello");
//! client
//!     .write("docs/hello.txt", body, false, CancellationToken::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! See the documentation for each client operation for more information:
//!
//! * [`list`](crate::Client::list) - enumerate objects in the bucket
//! * [`write`](crate::Client::write) - upload a single object
//! * [`open_read`](crate::Client::open_read) - stream a single object's bytes
//! * [`delete`](crate::Client::delete) - best-effort batch delete
//! * [`exists`](crate::Client::exists) - order-preserving batch existence probe
//! * [`get_blobs`](crate::Client::get_blobs) - identity-only blob records
//! * [`set_blobs`](crate::Client::set_blobs) - batch metadata replacement
//! * [`open_transaction`](crate::Client::open_transaction) - transaction capability check

/// Default in-flight concurrency for batch fan-out
pub(crate) const DEFAULT_CONCURRENCY: usize = 16;

/// Error types emitted by `spaces-blob-store`
pub mod error;

/// Common types used by `spaces-blob-store`
pub mod types;

/// The backend-agnostic blob storage contract
pub mod storage;

/// Spaces adapter client
pub mod client;

/// Adapter operations
pub(crate) mod operation;

/// Adapter configuration
pub mod config;

pub use self::client::Client;
pub use self::config::Config;
pub use self::storage::BlobStorage;
pub use self::types::{Blob, ListOptions, Transaction};
