/*
 * SPDX-License-Identifier: Apache-2.0
 */

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::{join_batch, with_cancel};

/// Delete every path in the batch, one `DeleteObject` per path fanned out
/// concurrently. Every path is attempted even when some fail; failures are
/// aggregated into one batch error. Deleting an absent key succeeds (the store
/// answers 204 either way), so the operation is idempotent.
pub(crate) async fn orchestrate(
    handle: &Handle,
    paths: Vec<String>,
    cancel: CancellationToken,
) -> Result<(), Error> {
    if cancel.is_cancelled() {
        return Err(error::operation_cancelled());
    }

    let tasks: Vec<_> = paths
        .into_iter()
        .map(|path| {
            let client = handle.config.client().clone();
            let bucket = handle.config.bucket().to_owned();
            let cancel = cancel.clone();
            async move {
                let result = with_cancel(&cancel, async {
                    client
                        .delete_object()
                        .bucket(&bucket)
                        .key(&path)
                        .send()
                        .instrument(tracing::debug_span!(
                            "send-delete-object",
                            bucket = %bucket,
                            key = %path
                        ))
                        .await
                        .map_err(Error::from)
                        .map(|_| ())
                })
                .await;
                (path, result)
            }
        })
        .collect();

    join_batch(tasks).await.map(|_: Vec<()>| ())
}
