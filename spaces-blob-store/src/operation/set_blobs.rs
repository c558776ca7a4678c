/*
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::types::{MetadataDirective, ObjectCannedAcl};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::{join_batch, with_cancel};
use crate::types::Blob;

/// Replace each blob's stored metadata via `CopyObject` onto itself with the
/// replace-metadata directive, the canonical metadata update on an
/// S3-compatible store. Only replacement semantics, no merge/patch. Batch
/// policy matches delete: every blob is attempted, failures are aggregated.
pub(crate) async fn orchestrate(
    handle: &Handle,
    blobs: Vec<Blob>,
    cancel: CancellationToken,
) -> Result<(), Error> {
    if cancel.is_cancelled() {
        return Err(error::operation_cancelled());
    }

    let tasks: Vec<_> = blobs
        .into_iter()
        .map(|blob| {
            let client = handle.config.client().clone();
            let bucket = handle.config.bucket().to_owned();
            let acl = handle.config.acl().clone();
            let cancel = cancel.clone();
            async move {
                let path = blob.path().to_owned();
                let result = with_cancel(&cancel, replace_metadata(&client, &bucket, acl, blob)).await;
                (path, result)
            }
        })
        .collect();

    join_batch(tasks).await.map(|_: Vec<()>| ())
}

async fn replace_metadata(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    acl: ObjectCannedAcl,
    blob: Blob,
) -> Result<(), Error> {
    let key = blob.path().to_owned();
    let source = copy_source(bucket, &key);
    let metadata = blob.into_metadata();

    client
        .copy_object()
        .copy_source(source)
        .bucket(bucket)
        .key(&key)
        .metadata_directive(MetadataDirective::Replace)
        .set_metadata(Some(metadata))
        .acl(acl)
        .send()
        .instrument(tracing::debug_span!(
            "send-copy-object",
            bucket,
            key = %key
        ))
        .await
        .map_err(Error::from)?;
    Ok(())
}

/// `CopyObject` takes its source as a URL path, so each key segment is
/// percent-encoded while the `/` separators stay literal.
fn copy_source(bucket: &str, key: &str) -> String {
    let encoded = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{bucket}/{encoded}")
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::copy_object::CopyObjectOutput;
    use aws_sdk_s3::types::{MetadataDirective, ObjectCannedAcl};
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use aws_smithy_runtime_api::http::{Response, StatusCode};
    use aws_smithy_types::body::SdkBody;
    use tokio_util::sync::CancellationToken;

    use crate::error::ErrorKind;
    use crate::types::Blob;

    use super::copy_source;

    fn client_for(s3_client: aws_sdk_s3::Client) -> crate::Client {
        let config = crate::Config::builder()
            .bucket("test-bucket")
            .acl(ObjectCannedAcl::PublicRead)
            .client(s3_client)
            .build()
            .unwrap();
        crate::Client::new(config)
    }

    #[test]
    fn copy_source_encodes_segments_but_not_separators() {
        assert_eq!(copy_source("b", "a/x.txt"), "b/a/x.txt");
        assert_eq!(
            copy_source("b", "dir with space/x+y.txt"),
            "b/dir%20with%20space/x%2By.txt"
        );
    }

    #[tokio::test]
    async fn copies_onto_self_with_replace_directive() {
        let copy = mock!(aws_sdk_s3::Client::copy_object)
            .match_requests(|r| {
                r.copy_source() == Some("test-bucket/a/x.txt")
                    && r.bucket() == Some("test-bucket")
                    && r.key() == Some("a/x.txt")
                    && r.metadata_directive() == Some(&MetadataDirective::Replace)
                    && r.acl() == Some(&ObjectCannedAcl::PublicRead)
                    && r.metadata()
                        .and_then(|m| m.get("owner").map(String::as_str))
                        == Some("me")
            })
            .then_output(|| CopyObjectOutput::builder().build());
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&copy]);

        let client = client_for(s3_client);
        let blob = Blob::new("a/x.txt").with_metadata("owner", "me");
        client
            .set_blobs(vec![blob], CancellationToken::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failures_are_collected_per_item() {
        let copy_ok = mock!(aws_sdk_s3::Client::copy_object)
            .match_requests(|r| r.key() == Some("ok.txt"))
            .then_output(|| CopyObjectOutput::builder().build());
        let copy_missing = mock!(aws_sdk_s3::Client::copy_object)
            .match_requests(|r| r.key() == Some("missing.txt"))
            .then_http_response(|| {
                Response::new(
                    StatusCode::try_from(404).unwrap(),
                    SdkBody::from(
                        "<Error><Code>NoSuchKey</Code><Message>absent</Message></Error>",
                    ),
                )
            });
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&copy_ok, &copy_missing]);

        let client = client_for(s3_client);
        let err = client
            .set_blobs(
                vec![Blob::new("ok.txt"), Blob::new("missing.txt")],
                CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), &ErrorKind::BatchFailed);
        let failures = err.batch_failures().expect("batch source");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path(), "missing.txt");
        assert_eq!(failures[0].error().kind(), &ErrorKind::NotFound);
        assert_eq!(copy_ok.num_calls(), 1);
    }
}
