/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::error::Error;

use super::{DecompressObjectsInputBuilder, DecompressObjectsOutput};

/// Fluent builder for constructing a multiple object decompress operation
#[derive(Debug)]
pub struct DecompressObjectsFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: DecompressObjectsInputBuilder,
}

impl DecompressObjectsFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Decompress every gzip object and wait for the operation to complete
    pub async fn send(self) -> Result<DecompressObjectsOutput, Error> {
        let input = self.inner.build()?;
        crate::operation::decompress_objects::DecompressObjects::orchestrate(self.handle, input)
            .await
    }

    /// Set the bucket containing the gzip objects.
    pub fn source_bucket(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.source_bucket(input);
        self
    }

    /// Set the bucket containing the gzip objects.
    pub fn set_source_bucket(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_source_bucket(input);
        self
    }

    /// The bucket containing the gzip objects.
    pub fn get_source_bucket(&self) -> &Option<String> {
        self.inner.get_source_bucket()
    }

    /// Set the bucket decompressed objects are written to.
    pub fn destination_bucket(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.destination_bucket(input);
        self
    }

    /// Set the bucket decompressed objects are written to.
    pub fn set_destination_bucket(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_destination_bucket(input);
        self
    }

    /// The bucket decompressed objects are written to.
    pub fn get_destination_bucket(&self) -> &Option<String> {
        self.inner.get_destination_bucket()
    }

    /// Only consider the objects directly under the given prefix
    pub fn key_prefix(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.key_prefix(input);
        self
    }

    /// Only consider the objects directly under the given prefix
    pub fn set_key_prefix(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_key_prefix(input);
        self
    }

    /// Only consider the objects directly under the given prefix
    pub fn get_key_prefix(&self) -> &Option<String> {
        self.inner.get_key_prefix()
    }
}
