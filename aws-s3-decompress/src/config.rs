/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::cmp;
use std::sync::Arc;

use aws_smithy_types::error::operation::BuildError;

use crate::storage::s3::DEFAULT_PART_SIZE_BYTES;
use crate::storage::{ObjectStore, S3Store};
use crate::types::PartSize;
use crate::{DEFAULT_BUFFER_SIZE, MEBIBYTE};

/// Load configuration from the environment
pub mod loader;

/// Minimum upload part size in bytes
pub(crate) const MIN_MULTIPART_PART_SIZE_BYTES: u64 = 5 * MEBIBYTE;

/// Configuration for a [`Client`](crate::client::Client)
#[derive(Debug, Clone)]
pub struct Config {
    buffer_size: usize,
    target_part_size: PartSize,
    store: Arc<dyn ObjectStore>,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Size in bytes of the buffer decompressed data is copied through
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns a reference to the target part size used when uploading decompressed objects
    pub fn part_size(&self) -> &PartSize {
        &self.target_part_size
    }

    /// The object store buckets are read from and written to.
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Default)]
pub struct Builder {
    buffer_size: Option<usize>,
    target_part_size: PartSize,
    client: Option<aws_sdk_s3::Client>,
    store: Option<Arc<dyn ObjectStore>>,
}

impl Builder {
    /// Size of the buffer decompressed bytes are copied through, in bytes.
    ///
    /// Must be greater than zero. Default is 4096.
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    /// The target size of each part when a decompressed object is too large to be written
    /// with a single [`PutObject`] request.
    ///
    /// The minimum part size is 5 MiB, any part size less than that will be rounded up.
    /// Default is [PartSize::Auto]. Only applies to stores created from [`client`](Self::client).
    ///
    /// [`PutObject`]: https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutObject.html
    pub fn part_size(self, part_size: PartSize) -> Self {
        let part_size = match part_size {
            PartSize::Target(part_size) => {
                PartSize::Target(cmp::max(part_size, MIN_MULTIPART_PART_SIZE_BYTES))
            }
            tps => tps,
        };

        self.set_target_part_size(part_size)
    }

    /// Target part size for uploads.
    ///
    /// NOTE: This does not validate the setting and is meant for internal use only.
    pub(crate) fn set_target_part_size(mut self, part_size: PartSize) -> Self {
        self.target_part_size = part_size;
        self
    }

    /// Set an explicit S3 client to use.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Use `store` instead of Amazon S3.
    ///
    /// Takes precedence over [`client`](Self::client).
    pub fn store(mut self, store: impl ObjectStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Consumes the builder and constructs a [`Config`](crate::config::Config)
    pub fn build(self) -> Result<Config, BuildError> {
        let buffer_size = self.buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE);
        if buffer_size == 0 {
            return Err(BuildError::invalid_field(
                "buffer_size",
                "buffer size must be greater than zero",
            ));
        }

        let part_size = match self.target_part_size {
            PartSize::Auto => DEFAULT_PART_SIZE_BYTES,
            PartSize::Target(explicit) => explicit,
        };

        let store = match (self.store, self.client) {
            (Some(store), _) => store,
            (None, Some(client)) => {
                Arc::new(S3Store::new(client).with_part_size(part_size)) as Arc<dyn ObjectStore>
            }
            (None, None) => {
                return Err(BuildError::missing_field(
                    "client",
                    "an S3 client or object store is required",
                ))
            }
        };

        Ok(Config {
            buffer_size,
            target_part_size: self.target_part_size,
            store,
        })
    }
}
