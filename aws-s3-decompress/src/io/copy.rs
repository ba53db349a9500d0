/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use tokio::io::AsyncRead;

use crate::error::{self, Error};
use crate::io::GzipReader;
use crate::storage::ObjectWriter;

/// Copy every decompressed byte from `reader` into `writer` through a buffer of
/// `buffer_size` bytes, returning the number of bytes copied.
///
/// The writer is neither finished nor aborted here.
pub(crate) async fn copy_to_writer<R>(
    reader: &mut GzipReader<R>,
    writer: &mut dyn ObjectWriter,
    buffer_size: usize,
) -> Result<u64, Error>
where
    R: AsyncRead + Unpin,
{
    if buffer_size == 0 {
        return Err(error::invalid_input("buffer size must be greater than zero"));
    }

    let mut buf = vec![0u8; buffer_size];
    let mut copied = 0u64;
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await?;
        copied += n as u64;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::copy_to_writer;
    use crate::error::ErrorKind;
    use crate::io::GzipReader;
    use crate::storage::{InMemoryStore, ObjectStore};
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[tokio::test]
    async fn test_copy_buffer_sizes() {
        let payload: Vec<u8> = (0..3 * 4096 + 17).map(|i| (i % 251) as u8).collect();
        let compressed = gzip(&payload);

        for buffer_size in [1, 17, 4096, 1024 * 1024] {
            let store = InMemoryStore::new();
            store.create_bucket("out").await;
            let mut writer = store.open_write("out", "payload").await.unwrap();
            let mut reader = GzipReader::new(compressed.as_slice());

            let copied = copy_to_writer(&mut reader, writer.as_mut(), buffer_size)
                .await
                .unwrap();
            assert_eq!(payload.len() as u64, copied);
            assert_eq!(copied, writer.finish().await.unwrap());
            let stored = store.get_object("out", "payload").await.unwrap();
            assert_eq!(payload.as_slice(), &stored[..]);
        }
    }

    #[tokio::test]
    async fn test_copy_empty_payload() {
        let compressed = gzip(b"");
        let store = InMemoryStore::new();
        store.create_bucket("out").await;
        let mut writer = store.open_write("out", "empty").await.unwrap();
        let mut reader = GzipReader::new(compressed.as_slice());

        let copied = copy_to_writer(&mut reader, writer.as_mut(), 4096)
            .await
            .unwrap();
        assert_eq!(0, copied);
    }

    #[tokio::test]
    async fn test_zero_buffer_size() {
        let store = InMemoryStore::new();
        store.create_bucket("out").await;
        let mut writer = store.open_write("out", "key").await.unwrap();
        let mut reader = GzipReader::new(b"".as_slice());

        let err = copy_to_writer(&mut reader, writer.as_mut(), 0)
            .await
            .unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }
}
