/*
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::primitives::ByteStream;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::client::Handle;
use crate::error::{Error, ErrorKind};
use crate::operation::with_cancel;

/// Open a streaming read with `GetObject`. The body stream is returned to the
/// caller untouched; a missing key surfaces as a distinct `NotFound` error.
pub(crate) async fn orchestrate(
    handle: &Handle,
    path: &str,
    cancel: CancellationToken,
) -> Result<ByteStream, Error> {
    let config = &handle.config;
    let output = with_cancel(&cancel, async {
        config
            .client()
            .get_object()
            .bucket(config.bucket())
            .key(path)
            .send()
            .instrument(tracing::debug_span!(
                "send-get-object",
                bucket = config.bucket(),
                key = path
            ))
            .await
            .map_err(|err| {
                // The modeled variant is checked directly so a missing key is
                // still distinguishable when the response carries no error code.
                if matches!(&err, SdkError::ServiceError(ctx) if ctx.err().is_no_such_key()) {
                    Error::new(ErrorKind::NotFound, err)
                } else {
                    Error::from(err)
                }
            })
    })
    .await?;

    Ok(output.body)
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
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
    async fn streams_object_bytes() {
        let get_object = mock!(aws_sdk_s3::Client::get_object)
            .match_requests(|r| r.key() == Some("a/x.txt"))
            .then_output(|| {
                GetObjectOutput::builder()
                    .body(ByteStream::from_static(b"hello"))
                    .build()
            });
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&get_object]);

        let client = client_for(s3_client);
        let stream = client
            .open_read("a/x.txt", CancellationToken::new())
            .await
            .unwrap();
        let bytes = stream.collect().await.unwrap().into_bytes();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let get_object = mock!(aws_sdk_s3::Client::get_object)
            .then_error(|| GetObjectError::NoSuchKey(NoSuchKey::builder().build()));
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&get_object]);

        let client = client_for(s3_client);
        let err = client
            .open_read("absent.txt", CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NotFound);
    }
}
