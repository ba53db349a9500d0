/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Object storage backends.
//!
//! The decompress operation only needs a handful of primitives from the object
//! storage service: existence checks, idempotent bucket creation, listing, and
//! streaming reads and writes of single objects. [`ObjectStore`] captures exactly
//! those so the operation can run against Amazon S3 ([`S3Store`]) or, in tests,
//! against an in-memory store.

use std::fmt::Debug;
use std::pin::Pin;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use tokio::io::AsyncRead;

use crate::error::Error;
use crate::types::{BucketStatus, ListItem};

/// Amazon S3 backed object store
pub mod s3;
pub use s3::S3Store;

/// In-memory object store
#[cfg(any(test, feature = "test-util"))]
pub mod in_memory;
#[cfg(any(test, feature = "test-util"))]
pub use in_memory::InMemoryStore;

/// Stream of items listed from a bucket
pub type ListItemStream<'a> = BoxStream<'a, Result<ListItem, Error>>;

/// Streaming reader over the contents of a single object
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

/// The object storage service used by the decompress operation.
#[async_trait]
pub trait ObjectStore: Send + Sync + Debug {
    /// Returns true if `bucket` exists and is accessible.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error>;

    /// Create `bucket` unless it already exists.
    ///
    /// Implementations must issue a single create request and treat "already exists"
    /// responses as success rather than checking for existence first.
    async fn create_bucket_if_not_exists(&self, bucket: &str) -> Result<BucketStatus, Error>;

    /// List every item directly under `bucket`, or under `prefix` when given.
    ///
    /// Keys are grouped by `/`; nested keys are returned as a single
    /// [`ListItem::Directory`].
    fn list_items<'a>(&'a self, bucket: &'a str, prefix: Option<&'a str>) -> ListItemStream<'a>;

    /// Open a streaming reader over the contents of `key`.
    async fn open_read(&self, bucket: &str, key: &str) -> Result<ObjectReader, Error>;

    /// Open a writer that replaces the contents of `key` once finished.
    ///
    /// Nothing is visible under `key` until [`ObjectWriter::finish`] succeeds.
    async fn open_write(&self, bucket: &str, key: &str) -> Result<Box<dyn ObjectWriter>, Error>;
}

/// Write side of a single object.
///
/// Every writer must be consumed by either [`finish`](ObjectWriter::finish) or
/// [`abort`](ObjectWriter::abort).
#[async_trait]
pub trait ObjectWriter: Send + Debug {
    /// Append `buf` to the object.
    async fn write_all(&mut self, buf: &[u8]) -> Result<(), Error>;

    /// Commit the object, returning the total number of bytes written.
    async fn finish(self: Box<Self>) -> Result<u64, Error>;

    /// Discard everything written so far and release any service side resources.
    async fn abort(self: Box<Self>) -> Result<(), Error>;
}
