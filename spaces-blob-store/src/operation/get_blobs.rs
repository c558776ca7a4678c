/*
 * SPDX-License-Identifier: Apache-2.0
 */

use tokio_util::sync::CancellationToken;

use crate::client::Handle;
use crate::error::Error;
use crate::types::Blob;

/// Return identity-only blob records for the requested paths.
///
/// Deliberately minimal for this backend: no network call is made, so
/// existence is not verified and no metadata is fetched. Callers needing real
/// attributes must go through `list` or extend the adapter with head requests.
pub(crate) async fn orchestrate(
    _handle: &Handle,
    paths: Vec<String>,
    _cancel: CancellationToken,
) -> Result<Vec<Blob>, Error> {
    Ok(paths.into_iter().map(Blob::new).collect())
}
