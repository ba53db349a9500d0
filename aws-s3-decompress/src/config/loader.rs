/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Credentials;
use aws_types::region::Region;

use crate::config::Builder;
use crate::error::{self, Error};
use crate::types::PartSize;
use crate::Config;

/// Name reported by the static credentials provider
const PROVIDER_NAME: &str = "aws-s3-decompress";

/// Load decompress [`Config`] from the environment.
///
/// Static credentials given with [`access_key_id`](Self::access_key_id) and
/// [`secret_access_key`](Self::secret_access_key) take precedence over the default
/// credential provider chain.
#[derive(Default)]
pub struct ConfigLoader {
    builder: Builder,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    region: Option<String>,
    endpoint_url: Option<String>,
    force_path_style: Option<bool>,
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("builder", &self.builder)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "** redacted **"),
            )
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}

impl ConfigLoader {
    /// The access key ID identifying the account.
    pub fn access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self
    }

    /// The secret access key used to sign requests.
    pub fn secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// The region to send requests to. Defaults to the region resolved from the environment.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Send requests to a custom (S3 compatible) endpoint.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Use path style addressing (`https://host/bucket/key`) instead of virtual hosted
    /// style addressing.
    pub fn force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = Some(force_path_style);
        self
    }

    /// Size of the buffer decompressed bytes are copied through, in bytes.
    ///
    /// Default is 4096.
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.builder = self.builder.buffer_size(buffer_size);
        self
    }

    /// The target size of each part when uploading large decompressed objects.
    ///
    /// The minimum part size is 5 MiB, any part size less than that will be rounded up.
    /// Default is [PartSize::Auto]
    pub fn part_size(mut self, part_size: PartSize) -> Self {
        self.builder = self.builder.part_size(part_size);
        self
    }

    fn credentials(&self) -> Result<Option<Credentials>, Error> {
        match (&self.access_key_id, &self.secret_access_key) {
            (None, None) => Ok(None),
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Ok(Some(
                Credentials::new(id, secret, None, None, PROVIDER_NAME),
            )),
            _ => Err(error::invalid_input(
                "both an access key ID and a secret access key must be given",
            )),
        }
    }

    /// Load the default configuration
    ///
    /// If fields have been overridden during builder construction, the override values will be
    /// used. Otherwise, the default values for each field will be provided.
    pub async fn load(self) -> Result<Config, Error> {
        let credentials = self.credentials()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(credentials) = credentials {
            loader = loader.credentials_provider(credentials);
        }
        if let Some(region) = self.region {
            loader = loader.region(Region::new(region));
        }
        if let Some(endpoint_url) = self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let shared_config = loader.load().await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(force_path_style) = self.force_path_style {
            s3_config = s3_config.force_path_style(force_path_style);
        }
        let s3_client = aws_sdk_s3::Client::from_conf(s3_config.build());

        let config = self.builder.client(s3_client).build()?;
        Ok(config)
    }
}
