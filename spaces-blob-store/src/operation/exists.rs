/*
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::error::SdkError;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::{join_batch, with_cancel};

/// Probe each path with a `HeadObject` request, fanned out concurrently.
///
/// The fan-in preserves input order, so `result[i]` always answers for
/// `paths[i]`. A 404 maps to `false`; any other failure (auth, network,
/// permission) is reported through the batch error instead of being coerced
/// to `false`.
pub(crate) async fn orchestrate(
    handle: &Handle,
    paths: Vec<String>,
    cancel: CancellationToken,
) -> Result<Vec<bool>, Error> {
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
                let result = with_cancel(&cancel, probe(&client, &bucket, &path)).await;
                (path, result)
            }
        })
        .collect();

    join_batch(tasks).await
}

async fn probe(client: &aws_sdk_s3::Client, bucket: &str, path: &str) -> Result<bool, Error> {
    let result = client
        .head_object()
        .bucket(bucket)
        .key(path)
        .send()
        .instrument(tracing::debug_span!("send-head-object", bucket, key = path))
        .await;

    match result {
        Ok(_) => Ok(true),
        Err(SdkError::ServiceError(ctx)) if ctx.err().is_not_found() => Ok(false),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::head_object::{HeadObjectError, HeadObjectOutput};
    use aws_sdk_s3::types::error::NotFound;
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use aws_smithy_runtime_api::http::{Response, StatusCode};
    use aws_smithy_types::body::SdkBody;
    use tokio_util::sync::CancellationToken;

    use crate::error::ErrorKind;

    fn client_for(s3_client: aws_sdk_s3::Client) -> crate::Client {
        let config = crate::Config::builder()
            .bucket("test-bucket")
            .client(s3_client)
            .build()
            .unwrap();
        crate::Client::new(config)
    }

    #[tokio::test]
    async fn results_align_with_input_order() {
        let head_x = mock!(aws_sdk_s3::Client::head_object)
            .match_requests(|r| r.key() == Some("a/x.txt"))
            .then_output(|| HeadObjectOutput::builder().build());
        let head_y = mock!(aws_sdk_s3::Client::head_object)
            .match_requests(|r| r.key() == Some("a/y.txt"))
            .then_error(|| HeadObjectError::NotFound(NotFound::builder().build()));
        let head_z = mock!(aws_sdk_s3::Client::head_object)
            .match_requests(|r| r.key() == Some("a/z.txt"))
            .then_output(|| HeadObjectOutput::builder().build());
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&head_x, &head_y, &head_z]);

        let client = client_for(s3_client);
        let results = client
            .exists(
                vec![
                    "a/x.txt".to_owned(),
                    "a/y.txt".to_owned(),
                    "a/z.txt".to_owned(),
                ],
                CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(results, vec![true, false, true]);
    }

    #[tokio::test]
    async fn transport_failure_is_not_coerced_to_false() {
        let head = mock!(aws_sdk_s3::Client::head_object).then_http_response(|| {
            Response::new(StatusCode::try_from(403).unwrap(), SdkBody::empty())
        });
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&head]);

        let client = client_for(s3_client);
        let err = client
            .exists(vec!["a/x.txt".to_owned()], CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), &ErrorKind::BatchFailed);
        let failures = err.batch_failures().expect("batch source");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path(), "a/x.txt");
        assert_eq!(failures[0].error().kind(), &ErrorKind::Transport);
    }

    #[tokio::test]
    async fn cancelled_before_start_issues_no_probes() {
        // If a probe were issued anyway this rule would answer it and the
        // operation would report a result instead of cancellation.
        let head = mock!(aws_sdk_s3::Client::head_object)
            .then_output(|| HeadObjectOutput::builder().build());
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&head]);

        let client = client_for(s3_client);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = client
            .exists(
                vec!["a/x.txt".to_owned(), "a/y.txt".to_owned()],
                cancel,
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), &ErrorKind::OperationCancelled);
        assert_eq!(head.num_calls(), 0);
    }

    #[tokio::test]
    async fn empty_input_yields_empty_results() {
        let unused =
            mock!(aws_sdk_s3::Client::head_object).then_output(|| HeadObjectOutput::builder().build());
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&unused]);

        let client = client_for(s3_client);
        let results = client
            .exists(Vec::new(), CancellationToken::new())
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
