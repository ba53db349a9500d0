/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_compression::tokio::bufread::GzipDecoder;
use pin_project_lite::pin_project;
use tokio::io::{AsyncRead, AsyncReadExt, BufReader, ReadBuf};

use crate::error::{self, Error, ErrorKind};

pin_project! {
    /// Marks errors raised by the compressed stream itself so they can be told apart
    /// from errors raised by the decoder.
    #[derive(Debug)]
    struct SourceStream<R> {
        #[pin]
        inner: R,
    }
}

impl<R: AsyncRead> AsyncRead for SourceStream<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        self.project()
            .inner
            .poll_read(cx, buf)
            .map_err(|err| io::Error::new(err.kind(), SourceError(err)))
    }
}

#[derive(Debug)]
struct SourceError(io::Error);

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to read compressed stream")
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Reads the decompressed contents of a gzip stream (RFC 1952).
///
/// Concatenated gzip members are decoded back to back. Malformed headers, corrupt
/// deflate data, checksum or length mismatches in the trailer, and truncated streams are
/// reported as [`ErrorKind::DecodeFailed`]; failures of the underlying reader are reported
/// as [`ErrorKind::IOError`].
pub struct GzipReader<R> {
    decoder: GzipDecoder<BufReader<SourceStream<R>>>,
}

impl<R> fmt::Debug for GzipReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GzipReader").finish_non_exhaustive()
    }
}

impl<R: AsyncRead + Unpin> GzipReader<R> {
    /// Wrap a reader over gzip compressed bytes.
    pub fn new(reader: R) -> Self {
        let mut decoder = GzipDecoder::new(BufReader::new(SourceStream { inner: reader }));
        decoder.multiple_members(true);
        Self { decoder }
    }

    /// Read decompressed bytes into `buf`, returning how many were read.
    ///
    /// `Ok(0)` for a non-empty `buf` means the end of the stream was reached.
    /// Interrupted reads are retried.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        loop {
            match self.decoder.read(buf).await {
                Ok(n) => return Ok(n),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(classify(err)),
            }
        }
    }
}

fn classify(err: io::Error) -> Error {
    let kind = err.kind();
    match err.into_inner() {
        Some(inner) => match inner.downcast::<SourceError>() {
            Ok(source) => {
                let SourceError(source) = *source;
                Error::new(ErrorKind::IOError, source)
            }
            Err(inner) => error::decode_failed(io::Error::new(kind, inner)),
        },
        None => error::decode_failed(io::Error::from(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    async fn read_to_end<R: AsyncRead + Unpin>(reader: &mut GzipReader<R>) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        let mut buf = [0u8; 7];
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                return Ok(out);
            }
            out.extend_from_slice(&buf[..n]);
        }
    }

    /// Reader that yields `data` and then fails instead of reporting end of stream
    struct FailingReader {
        data: Cursor,
    }

    type Cursor = std::io::Cursor<Vec<u8>>;

    impl AsyncRead for FailingReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let before = buf.filled().len();
            let data = Pin::new(&mut self.data);
            match data.poll_read(cx, buf) {
                Poll::Ready(Ok(())) if buf.filled().len() == before => Poll::Ready(Err(
                    io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"),
                )),
                other => other,
            }
        }
    }

    #[tokio::test]
    async fn test_decode() {
        let compressed = gzip(b"every adolescent dog goes bonkers early");
        let mut reader = GzipReader::new(compressed.as_slice());
        let decoded = read_to_end(&mut reader).await.unwrap();
        assert_eq!(b"every adolescent dog goes bonkers early".as_slice(), decoded);
    }

    #[tokio::test]
    async fn test_decode_concatenated_members() {
        let mut compressed = gzip(b"first ");
        compressed.extend(gzip(b"second"));
        let mut reader = GzipReader::new(compressed.as_slice());
        let decoded = read_to_end(&mut reader).await.unwrap();
        assert_eq!(b"first second".as_slice(), decoded);
    }

    #[tokio::test]
    async fn test_trailing_garbage_after_member() {
        let mut compressed = gzip(b"hello");
        compressed.extend_from_slice(b"\0\0\0\0garbage");
        let mut reader = GzipReader::new(compressed.as_slice());
        let err = read_to_end(&mut reader).await.unwrap_err();
        assert_eq!(&ErrorKind::DecodeFailed, err.kind());
    }

    #[tokio::test]
    async fn test_invalid_header() {
        let mut reader = GzipReader::new(b"this is not gzip at all".as_slice());
        let err = read_to_end(&mut reader).await.unwrap_err();
        assert_eq!(&ErrorKind::DecodeFailed, err.kind());
    }

    #[tokio::test]
    async fn test_corrupt_trailer() {
        let mut compressed = gzip(b"some payload that will fail its checksum");
        let crc_offset = compressed.len() - 8;
        compressed[crc_offset] ^= 0xff;
        let mut reader = GzipReader::new(compressed.as_slice());
        let err = read_to_end(&mut reader).await.unwrap_err();
        assert_eq!(&ErrorKind::DecodeFailed, err.kind());
    }

    #[tokio::test]
    async fn test_truncated_stream() {
        let compressed = gzip(&[42u8; 1000]);
        let truncated = &compressed[..compressed.len() / 2];
        let mut reader = GzipReader::new(truncated);
        let err = read_to_end(&mut reader).await.unwrap_err();
        assert_eq!(&ErrorKind::DecodeFailed, err.kind());
    }

    #[tokio::test]
    async fn test_source_failure_is_io_error() {
        let compressed = gzip(&[7u8; 100]);
        let truncated = compressed[..compressed.len() - 4].to_vec();
        let mut reader = GzipReader::new(FailingReader {
            data: Cursor::new(truncated),
        });
        let err = read_to_end(&mut reader).await.unwrap_err();
        assert_eq!(&ErrorKind::IOError, err.kind());
    }
}
