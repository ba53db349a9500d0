/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::{stream, StreamExt, TryStreamExt};
use tokio::sync::RwLock;

use crate::error::{self, Error, ErrorKind};
use crate::operation::DEFAULT_DELIMITER;
use crate::storage::{ListItemStream, ObjectReader, ObjectStore, ObjectWriter};
use crate::types::{BucketStatus, ListItem};

// bucket -> (key -> content)
type Buckets = HashMap<String, BTreeMap<String, Bytes>>;

/// An in-memory implementation of [`ObjectStore`].
///
/// Buckets and objects live only as long as the store (and its clones), making it
/// suitable for tests. Listing follows S3 semantics with a `/` delimiter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    buckets: Arc<RwLock<Buckets>>,
}

impl InMemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bucket. Existing buckets are left untouched.
    pub async fn create_bucket(&self, bucket: &str) {
        let mut buckets = self.buckets.write().await;
        buckets.entry(bucket.to_owned()).or_default();
    }

    /// Returns true if `bucket` exists
    pub async fn has_bucket(&self, bucket: &str) -> bool {
        self.buckets.read().await.contains_key(bucket)
    }

    /// Store `content` under `key`, replacing any existing object.
    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content: impl Into<Bytes>,
    ) -> Result<(), Error> {
        let mut buckets = self.buckets.write().await;
        let objects = buckets.get_mut(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        objects.insert(key.to_owned(), content.into());
        Ok(())
    }

    /// Get the content stored under `key`, if any.
    pub async fn get_object(&self, bucket: &str, key: &str) -> Option<Bytes> {
        let buckets = self.buckets.read().await;
        buckets.get(bucket)?.get(key).cloned()
    }

    /// All keys in `bucket` in lexicographical order.
    pub async fn keys(&self, bucket: &str) -> Vec<String> {
        let buckets = self.buckets.read().await;
        buckets
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    async fn snapshot(&self, bucket: &str, prefix: Option<&str>) -> Result<Vec<ListItem>, Error> {
        let buckets = self.buckets.read().await;
        let objects = buckets
            .get(bucket)
            .ok_or_else(|| Error::new(ErrorKind::ListFailed, no_such_bucket(bucket)))?;
        let prefix = prefix.unwrap_or_default();

        let mut items = Vec::new();
        let mut directories = BTreeSet::new();
        for (key, content) in objects.iter().filter(|(key, _)| key.starts_with(prefix)) {
            match key[prefix.len()..].find(DEFAULT_DELIMITER) {
                Some(idx) => {
                    let directory = &key[..prefix.len() + idx + DEFAULT_DELIMITER.len()];
                    directories.insert(directory.to_owned());
                }
                None => items.push(ListItem::Object {
                    key: key.clone(),
                    size: content.len() as u64,
                }),
            }
        }

        items.extend(
            directories
                .into_iter()
                .map(|prefix| ListItem::Directory { prefix }),
        );
        Ok(items)
    }
}

fn no_such_bucket(bucket: &str) -> Error {
    error::not_found(format!("no such bucket `{bucket}`"))
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error> {
        Ok(self.has_bucket(bucket).await)
    }

    async fn create_bucket_if_not_exists(&self, bucket: &str) -> Result<BucketStatus, Error> {
        let mut buckets = self.buckets.write().await;
        if buckets.contains_key(bucket) {
            return Ok(BucketStatus::AlreadyExisted);
        }
        buckets.insert(bucket.to_owned(), BTreeMap::new());
        Ok(BucketStatus::Created)
    }

    fn list_items<'a>(&'a self, bucket: &'a str, prefix: Option<&'a str>) -> ListItemStream<'a> {
        stream::once(self.snapshot(bucket, prefix))
            .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
            .try_flatten()
            .boxed()
    }

    async fn open_read(&self, bucket: &str, key: &str) -> Result<ObjectReader, Error> {
        let content = self
            .get_object(bucket, key)
            .await
            .ok_or_else(|| error::not_found(format!("no such key `{key}` in bucket `{bucket}`")))?;
        Ok(Box::pin(Cursor::new(content)))
    }

    async fn open_write(&self, bucket: &str, key: &str) -> Result<Box<dyn ObjectWriter>, Error> {
        if !self.has_bucket(bucket).await {
            return Err(no_such_bucket(bucket));
        }
        Ok(Box::new(InMemoryWriter {
            store: self.clone(),
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            buffer: BytesMut::new(),
        }))
    }
}

#[derive(Debug)]
struct InMemoryWriter {
    store: InMemoryStore,
    bucket: String,
    key: String,
    buffer: BytesMut,
}

#[async_trait]
impl ObjectWriter for InMemoryWriter {
    async fn write_all(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.buffer.extend_from_slice(buf);
        Ok(())
    }

    async fn finish(self: Box<Self>) -> Result<u64, Error> {
        let this = *self;
        let content = this.buffer.freeze();
        let len = content.len() as u64;
        this.store.put_object(&this.bucket, &this.key, content).await?;
        Ok(len)
    }

    async fn abort(self: Box<Self>) -> Result<(), Error> {
        Ok(())
    }
}
