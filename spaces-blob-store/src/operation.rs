/*
 * SPDX-License-Identifier: Apache-2.0
 */

pub(crate) mod delete;
pub(crate) mod exists;
pub(crate) mod get_blobs;
pub(crate) mod list;
pub(crate) mod read;
pub(crate) mod set_blobs;
pub(crate) mod write;

use std::future::Future;

use futures_util::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::error::{self, Error, ItemFailure};
use crate::DEFAULT_CONCURRENCY;

/// Race a request against the operation's cancellation token.
///
/// Once the token fires no further requests are issued (checked up front) and
/// the in-flight one is dropped.
pub(crate) async fn with_cancel<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    if cancel.is_cancelled() {
        return Err(error::operation_cancelled());
    }
    tokio::select! {
        _ = cancel.cancelled() => Err(error::operation_cancelled()),
        res = fut => res,
    }
}

/// Fan-out/fan-in for batch operations.
///
/// Drives every sub-task to completion regardless of individual failures,
/// preserving input order in the collected results. Failures are aggregated
/// into a single batch error carrying the failed subset.
pub(crate) async fn join_batch<T, F>(tasks: Vec<F>) -> Result<Vec<T>, Error>
where
    F: Future<Output = (String, Result<T, Error>)>,
{
    let outcomes = stream::iter(tasks)
        .buffered(DEFAULT_CONCURRENCY)
        .collect::<Vec<_>>()
        .await;

    let mut values = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (path, result) in outcomes {
        match result {
            Ok(value) => values.push(value),
            Err(err) => failures.push(ItemFailure::new(path, err)),
        }
    }

    if failures.is_empty() {
        Ok(values)
    } else {
        Err(Error::batch(failures))
    }
}
