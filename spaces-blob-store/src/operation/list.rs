/*
 * SPDX-License-Identifier: Apache-2.0
 */

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::client::Handle;
use crate::error::Error;
use crate::operation::with_cancel;
use crate::types::{Blob, ListOptions};

/// Enumerate the configured bucket with `ListObjectsV2`, paging until the
/// listing is exhausted so a truncated page never leaks to the caller as a
/// final result.
pub(crate) async fn orchestrate(
    handle: &Handle,
    options: ListOptions,
    cancel: CancellationToken,
) -> Result<Vec<Blob>, Error> {
    let client = handle.config.client();
    let bucket = handle.config.bucket();
    // A `/` delimiter keeps the listing at one level when not recursing.
    let delimiter = if options.is_recursive() {
        None
    } else {
        Some("/".to_owned())
    };

    let mut blobs = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let request = client
            .list_objects_v2()
            .bucket(bucket)
            .set_prefix(options.prefix_ref().map(str::to_owned))
            .set_delimiter(delimiter.clone())
            .set_max_keys(options.page_size_ref())
            .set_continuation_token(next_token.clone());

        let output = with_cancel(&cancel, async {
            request
                .send()
                .instrument(tracing::debug_span!("send-list-objects-v2", bucket))
                .await
                .map_err(Error::from)
        })
        .await?;

        for object in output.contents.unwrap_or_default() {
            if let Some(key) = object.key {
                blobs.push(
                    Blob::new(key)
                        .set_size(object.size)
                        .set_last_modified(object.last_modified)
                        .set_e_tag(object.e_tag),
                );
            }
        }

        let truncated =
            output.is_truncated.unwrap_or(false) && output.next_continuation_token.is_some();
        if !truncated {
            break;
        }
        tracing::trace!(collected = blobs.len(), "listing truncated, fetching next page");
        next_token = output.next_continuation_token;
    }

    Ok(blobs)
}
