/*
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::types::ObjectCannedAcl;

use crate::error;
use crate::error::Error;

/// Default Spaces region slug used when none is configured.
pub(crate) const DEFAULT_REGION: &str = "ams3";

/// Configuration for a [`Client`](crate::client::Client)
///
/// Fixed at construction time: one bucket at one Spaces region endpoint with
/// one default canned ACL; every operation on the client targets exactly that
/// container.
#[derive(Debug, Clone)]
pub struct Config {
    bucket: String,
    acl: ObjectCannedAcl,
    client: aws_sdk_s3::Client,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The bucket (Space) all operations target.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The canned ACL applied to created and updated objects.
    pub fn acl(&self) -> &ObjectCannedAcl {
        &self.acl
    }

    /// The S3 client instance that will be used to send requests to Spaces.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    access_key: Option<String>,
    secret_key: Option<String>,
    region: Option<String>,
    bucket: Option<String>,
    acl: Option<ObjectCannedAcl>,
    client: Option<aws_sdk_s3::Client>,
}

impl Builder {
    /// Spaces access key ID.
    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Spaces secret access key.
    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Spaces region slug (e.g. `ams3`, `nyc3`). Determines the service
    /// endpoint `https://{region}.digitaloceanspaces.com`. Default is `ams3`.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// The bucket (Space) all operations target. Required.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Canned ACL applied to objects this adapter creates or updates.
    /// Default is [`ObjectCannedAcl::Private`].
    pub fn acl(mut self, acl: ObjectCannedAcl) -> Self {
        self.acl = Some(acl);
        self
    }

    /// Set an explicit S3 client to use instead of constructing one from
    /// credentials. Intended for injecting preconfigured or test clients.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`]
    ///
    /// Fails with an input error when the bucket is missing or empty, or when
    /// neither credentials nor an explicit client were provided.
    pub fn build(self) -> Result<Config, Error> {
        let bucket = match self.bucket {
            Some(bucket) if !bucket.is_empty() => bucket,
            _ => return Err(error::invalid_input("bucket name is required")),
        };

        let client = match self.client {
            Some(client) => client,
            None => {
                let access_key = self
                    .access_key
                    .ok_or_else(|| error::invalid_input("access key is required"))?;
                let secret_key = self
                    .secret_key
                    .ok_or_else(|| error::invalid_input("secret key is required"))?;
                let region = self.region.unwrap_or_else(|| DEFAULT_REGION.to_owned());
                spaces_client(&access_key, &secret_key, &region)
            }
        };

        Ok(Config {
            bucket,
            acl: self.acl.unwrap_or(ObjectCannedAcl::Private),
            client,
        })
    }
}

/// Construct an `aws-sdk-s3` client pointed at the Spaces endpoint for the
/// given region.
fn spaces_client(access_key: &str, secret_key: &str, region: &str) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(access_key, secret_key, None, None, "spaces-blob-store");
    let conf = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .endpoint_url(format!("https://{region}.digitaloceanspaces.com"))
        .credentials_provider(credentials)
        .build();
    aws_sdk_s3::Client::from_conf(conf)
}
