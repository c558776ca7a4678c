/*
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;

use aws_smithy_types::DateTime;

/// An addressable object in the store, identified by its full path/key.
///
/// The path is the blob's identity; everything else is optional and only
/// populated when the store returned it (e.g. from a listing). Blobs are
/// constructed transiently, the bucket remains the system of record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Blob {
    path: String,
    size: Option<i64>,
    last_modified: Option<DateTime>,
    e_tag: Option<String>,
    metadata: HashMap<String, String>,
}

impl Blob {
    /// Create an identity-only blob for the given full path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Full path of the object within the bucket.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Object size in bytes, when known.
    pub fn size(&self) -> Option<i64> {
        self.size
    }

    /// Last-modified timestamp, when known.
    pub fn last_modified(&self) -> Option<&DateTime> {
        self.last_modified.as_ref()
    }

    /// Entity tag reported by the store, when known.
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    /// Custom metadata attached to this blob.
    ///
    /// Consumed by [`set_blobs`](crate::Client::set_blobs) as the replacement
    /// metadata set for the object.
    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// Set a custom metadata entry on this blob.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub(crate) fn set_size(mut self, size: Option<i64>) -> Self {
        self.size = size;
        self
    }

    pub(crate) fn set_last_modified(mut self, last_modified: Option<DateTime>) -> Self {
        self.last_modified = last_modified;
        self
    }

    pub(crate) fn set_e_tag(mut self, e_tag: Option<String>) -> Self {
        self.e_tag = e_tag;
        self
    }

    pub(crate) fn into_metadata(self) -> HashMap<String, String> {
        self.metadata
    }
}

/// Enumeration filters for [`list`](crate::Client::list).
///
/// The default value means "no filter, default paging"; callers are never
/// required to supply one.
#[derive(Clone, Debug)]
pub struct ListOptions {
    prefix: Option<String>,
    recursive: bool,
    page_size: Option<i32>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            recursive: true,
            page_size: None,
        }
    }
}

impl ListOptions {
    /// Create the default options: everything in the bucket, default paging.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only enumerate keys starting with this prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Whether to descend past `/` separators. Defaults to `true`.
    ///
    /// When `false` the listing is limited to one level: keys under a nested
    /// "folder" are grouped away by the store and not returned.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Maximum number of keys fetched per page. Pagination is internal either
    /// way; this only tunes the page fetches.
    pub fn page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub(crate) fn prefix_ref(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub(crate) fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub(crate) fn page_size_ref(&self) -> Option<i32> {
        self.page_size
    }
}

/// A handle for a batched/atomic set of operations.
///
/// The Spaces backend does not support transactions, so
/// [`open_transaction`](crate::Client::open_transaction) always returns `None`
/// and no value of this type is ever produced for it. An absent handle means
/// "perform operations individually, no atomicity guarantee" and is not an
/// error.
#[derive(Debug)]
pub struct Transaction {
    _priv: (),
}
