/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::display::DisplayErrorContext;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::io::{copy_to_writer, GzipReader};
use crate::operation::DEFAULT_DELIMITER;
use crate::storage::ObjectWriter;

use super::DecompressedObject;

/// Suffix identifying gzip objects. Matched case-sensitively.
const GZIP_SUFFIX: &str = ".gz";

/// Everything a single object copy needs to know about the running operation
#[derive(Debug)]
pub(super) struct DecompressObjectsContext<'a> {
    pub(super) handle: &'a Handle,
    pub(super) source_bucket: &'a str,
    pub(super) destination_bucket: &'a str,
    pub(super) key_prefix: Option<&'a str>,
}

#[derive(Debug)]
pub(super) struct DecompressObjectJob {
    source_key: String,
    destination_key: String,
    size: u64,
}

impl DecompressObjectJob {
    pub(super) fn new(source_key: String, size: u64) -> Result<Self, Error> {
        let destination_key = destination_key(&source_key)?.to_owned();
        Ok(Self {
            source_key,
            destination_key,
            size,
        })
    }

    pub(super) fn into_decompressed(self, bytes_written: u64) -> DecompressedObject {
        DecompressedObject {
            source_key: self.source_key,
            destination_key: self.destination_key,
            bytes_written,
        }
    }
}

pub(super) fn is_gzip_key(key: &str) -> bool {
    key.ends_with(GZIP_SUFFIX)
}

/// Derive the destination key for a gzip object: the final `/` separated segment of
/// `key` with the gzip suffix removed.
///
/// # Examples
///
/// ```ignore
/// assert_eq!("report", destination_key("dir/sub/report.gz")?);
/// assert_eq!("a.gz", destination_key("a.gz.gz")?);
/// ```
fn destination_key(key: &str) -> Result<&str, Error> {
    let name = key
        .rsplit_once(DEFAULT_DELIMITER)
        .map(|(_, name)| name)
        .unwrap_or(key);
    match name.strip_suffix(GZIP_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => Ok(stripped),
        _ => Err(error::invalid_input(format!(
            "unable to derive a destination key for {key:?}: the name must not be empty once the `{GZIP_SUFFIX}` suffix is removed"
        ))),
    }
}

/// Decompress a single object into the destination bucket, returning the number of
/// decompressed bytes written.
///
/// The destination writer is finished on success and aborted on every failure.
pub(super) async fn decompress_single_obj(
    ctx: &DecompressObjectsContext<'_>,
    job: &DecompressObjectJob,
) -> Result<u64, Error> {
    tracing::debug!(
        "decompressing key {:?} ({} bytes) into key {:?}",
        job.source_key,
        job.size,
        job.destination_key
    );
    let store = ctx.handle.store();

    let mut writer = store
        .open_write(ctx.destination_bucket, &job.destination_key)
        .await?;
    let reader = match store.open_read(ctx.source_bucket, &job.source_key).await {
        Ok(reader) => reader,
        Err(err) => {
            abort_writer(writer, &job.destination_key).await;
            return Err(err);
        }
    };

    let mut decoder = GzipReader::new(reader);
    match copy_to_writer(&mut decoder, writer.as_mut(), ctx.handle.buffer_size()).await {
        Ok(_) => {
            let bytes_written = writer.finish().await?;
            drop(decoder);
            tracing::debug!(
                "finished key {:?}, wrote {} bytes",
                job.destination_key,
                bytes_written
            );
            Ok(bytes_written)
        }
        Err(err) => {
            tracing::debug!(
                "failed to decompress key {:?}: {}",
                job.source_key,
                DisplayErrorContext(&err)
            );
            drop(decoder);
            abort_writer(writer, &job.destination_key).await;
            Err(err)
        }
    }
}

async fn abort_writer(writer: Box<dyn ObjectWriter>, key: &str) {
    if let Err(err) = writer.abort().await {
        tracing::warn!(
            "failed to abort write of key {:?}: {}",
            key,
            DisplayErrorContext(&err)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{destination_key, is_gzip_key, DecompressObjectJob};
    use crate::error::ErrorKind;

    #[test]
    fn test_is_gzip_key() {
        let tests = [
            ("a.gz", true),
            ("a.gz.gz", true),
            ("dir/b.gz", true),
            (".gz", true),
            ("a.GZ", false),
            ("a.gzip", false),
            ("a.gz.txt", false),
            ("a", false),
            ("", false),
        ];

        for (key, expected) in tests {
            assert_eq!(expected, is_gzip_key(key), "key={key:?}");
        }
    }

    #[test]
    fn test_destination_key() {
        let tests = [
            ("file.gz", "file"),
            ("dir/sub/report.gz", "report"),
            ("a.gz.gz", "a.gz"),
            ("logs/2024-01-01.log.gz", "2024-01-01.log"),
            ("..gz", "."),
        ];

        for (key, expected) in tests {
            assert_eq!(expected, destination_key(key).unwrap(), "key={key:?}");
        }
    }

    #[test]
    fn test_empty_destination_key_rejected() {
        for key in [".gz", "dir/.gz", "a/b/.gz"] {
            let err = destination_key(key).unwrap_err();
            assert_eq!(&ErrorKind::InputInvalid, err.kind(), "key={key:?}");
        }

        let err = DecompressObjectJob::new("dir/.gz".to_owned(), 10).unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }
}
