/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::storage::ObjectStore;
use crate::Config;

/// Client for decompressing gzip objects between buckets.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations, e.g. config, storage, etc
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
}

impl Handle {
    /// The object store operations read from and write to
    pub(crate) fn store(&self) -> &dyn ObjectStore {
        self.config.store().as_ref()
    }

    /// Size of the copy buffer in bytes
    pub(crate) fn buffer_size(&self) -> usize {
        self.config.buffer_size()
    }
}

impl Client {
    /// Creates a new client from a decompress config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle { config });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Decompress every gzip object directly under a bucket into another bucket.
    ///
    /// Constructs a fluent builder for the
    /// [`DecompressObjects`](crate::operation::decompress_objects::builders::DecompressObjectsFluentBuilder) operation.
    ///
    /// # Examples
    /// ```no_run
    /// use aws_s3_decompress::error::Error;
    ///
    /// async fn decompress_bucket(client: &aws_s3_decompress::Client) -> Result<(), Error> {
    ///     let output = client
    ///         .decompress_objects()
    ///         .source_bucket("compressed-logs")
    ///         .destination_bucket("logs")
    ///         .send()
    ///         .await?;
    ///
    ///     for object in output.decompressed_objects() {
    ///         println!("{} -> {}", object.source_key(), object.destination_key());
    ///     }
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn decompress_objects(
        &self,
    ) -> crate::operation::decompress_objects::builders::DecompressObjectsFluentBuilder {
        crate::operation::decompress_objects::builders::DecompressObjectsFluentBuilder::new(
            self.handle.clone(),
        )
    }
}
