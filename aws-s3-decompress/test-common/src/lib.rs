/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::io::Write;

use aws_s3_decompress::storage::InMemoryStore;
use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;

/// Compress `data` into a single member gzip stream
pub fn gzip(data: &[u8]) -> Bytes {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    Bytes::from(encoder.finish().unwrap())
}

/// Generate `size` random bytes
pub fn random_payload(size: usize) -> Bytes {
    let mut payload = vec![0u8; size];
    fastrand::fill(&mut payload);
    Bytes::from(payload)
}

/// Create a store holding `bucket` with the given objects stored as is
pub async fn seeded_store(bucket: &str, objects: &[(&str, Bytes)]) -> InMemoryStore {
    let store = InMemoryStore::new();
    store.create_bucket(bucket).await;
    for (key, content) in objects {
        store.put_object(bucket, key, content.clone()).await.unwrap();
    }
    store
}

/// Create a decompress client over `store`
pub fn client(store: InMemoryStore, buffer_size: usize) -> aws_s3_decompress::Client {
    let config = aws_s3_decompress::Config::builder()
        .store(store)
        .buffer_size(buffer_size)
        .build()
        .unwrap();
    aws_s3_decompress::Client::new(config)
}
