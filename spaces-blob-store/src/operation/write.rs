/*
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::primitives::ByteStream;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::with_cancel;

/// Upload a stream to `path` with a single `PutObject`, applying the
/// configured canned ACL. The body is handed to the SDK as-is; it is never
/// buffered wholesale by the adapter.
pub(crate) async fn orchestrate(
    handle: &Handle,
    path: &str,
    body: ByteStream,
    append: bool,
    cancel: CancellationToken,
) -> Result<(), Error> {
    if path.is_empty() {
        return Err(error::invalid_input("destination path must not be empty"));
    }
    // Spaces replaces objects wholesale; accepting the flag and overwriting
    // anyway would silently truncate the contract.
    if append {
        return Err(error::unsupported(
            "append writes are not supported by this backend",
        ));
    }

    let config = &handle.config;
    with_cancel(&cancel, async {
        config
            .client()
            .put_object()
            .bucket(config.bucket())
            .key(path)
            .acl(config.acl().clone())
            .body(body)
            .send()
            .instrument(tracing::debug_span!(
                "send-put-object",
                bucket = config.bucket(),
                key = path
            ))
            .await
            .map_err(Error::from)?;
        Ok(())
    })
    .await
}
