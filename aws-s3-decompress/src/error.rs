/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
    buckets: Option<Buckets>,
}

/// General categories of decompress errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation input or configuration validation issues
    InputInvalid,

    /// The supplied credentials were rejected by the service
    Unauthorized,

    /// Resource not found (e.g. bucket or key not found)
    NotFound,

    /// The destination bucket could not be created
    BucketCreationFailed,

    /// Listing the source bucket failed
    ListFailed,

    /// An object did not contain a valid gzip stream
    DecodeFailed,

    /// I/O errors
    IOError,

    /// Any other error response returned by the object storage service
    ServiceError,
}

/// The buckets involved in the operation that failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Buckets {
    source: String,
    destination: String,
}

impl Buckets {
    /// The bucket gzip objects were read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The bucket decompressed objects were written to
    pub fn destination(&self) -> &str {
        &self.destination
    }
}

impl Error {
    /// Creates a new [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
            buckets: None,
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the source and destination bucket of the failed operation, if known.
    pub fn buckets(&self) -> Option<&Buckets> {
        self.buckets.as_ref()
    }

    pub(crate) fn with_buckets(
        mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        self.buckets = Some(Buckets {
            source: source.into(),
            destination: destination.into(),
        });
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InputInvalid => write!(f, "invalid input")?,
            ErrorKind::Unauthorized => write!(f, "request was not authorized")?,
            ErrorKind::NotFound => write!(f, "resource not found")?,
            ErrorKind::BucketCreationFailed => write!(f, "failed to create bucket")?,
            ErrorKind::ListFailed => write!(f, "failed to list objects")?,
            ErrorKind::DecodeFailed => write!(f, "invalid gzip stream")?,
            ErrorKind::IOError => write!(f, "I/O error")?,
            ErrorKind::ServiceError => write!(f, "service error")?,
        }
        if let Some(buckets) = &self.buckets {
            write!(
                f,
                " while decompressing bucket `{}` into bucket `{}`",
                buckets.source, buckets.destination
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::InputInvalid, value)
    }
}

impl<E> From<SdkError<E, HttpResponse>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
{
    fn from(value: SdkError<E, HttpResponse>) -> Self {
        let status = value.raw_response().map(|resp| resp.status().as_u16());
        let kind = match (value.code(), status) {
            (Some("NotFound" | "NoSuchKey" | "NoSuchBucket"), _) | (None, Some(404)) => {
                ErrorKind::NotFound
            }
            (
                Some(
                    "AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch"
                    | "ExpiredToken",
                ),
                _,
            )
            | (None, Some(401 | 403)) => ErrorKind::Unauthorized,
            _ => ErrorKind::ServiceError,
        };

        Error::new(kind, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn not_found<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::NotFound, err)
}

pub(crate) fn decode_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::DecodeFailed, err)
}

/// Re-categorize an error, keeping credential rejections distinguishable.
pub(crate) fn from_kind<E>(kind: ErrorKind) -> impl FnOnce(E) -> Error
where
    E: Into<Error>,
{
    move |err| {
        let err: Error = err.into();
        if err.kind == ErrorKind::Unauthorized {
            err
        } else {
            Error { kind, ..err }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::operation::head_bucket::HeadBucketError;
    use aws_smithy_types::error::display::DisplayErrorContext;
    use aws_smithy_types::error::ErrorMetadata;

    fn service_error(code: Option<&str>, status: u16) -> SdkError<HeadBucketError, HttpResponse> {
        let mut meta = ErrorMetadata::builder();
        if let Some(code) = code {
            meta = meta.code(code);
        }
        let resp = HttpResponse::new(
            aws_smithy_runtime_api::http::StatusCode::try_from(status).unwrap(),
            aws_smithy_types::body::SdkBody::empty(),
        );
        SdkError::service_error(HeadBucketError::generic(meta.build()), resp)
    }

    #[test]
    fn test_sdk_error_kind_mapping() {
        let tests = [
            (Some("NoSuchBucket"), 404, ErrorKind::NotFound),
            (None, 404, ErrorKind::NotFound),
            (Some("AccessDenied"), 403, ErrorKind::Unauthorized),
            (Some("InvalidAccessKeyId"), 403, ErrorKind::Unauthorized),
            (None, 403, ErrorKind::Unauthorized),
            (Some("InternalError"), 500, ErrorKind::ServiceError),
            (None, 503, ErrorKind::ServiceError),
        ];

        for (code, status, expected) in tests {
            let err: Error = service_error(code, status).into();
            assert_eq!(&expected, err.kind(), "code={code:?} status={status}");
        }
    }

    #[test]
    fn test_from_kind_preserves_unauthorized() {
        let err = from_kind(ErrorKind::ListFailed)(service_error(Some("AccessDenied"), 403));
        assert_eq!(&ErrorKind::Unauthorized, err.kind());

        let err = from_kind(ErrorKind::ListFailed)(service_error(Some("InternalError"), 500));
        assert_eq!(&ErrorKind::ListFailed, err.kind());
    }

    #[test]
    fn test_display_includes_buckets() {
        let err = not_found("the source bucket `in` does not exist").with_buckets("in", "out");
        let rendered = format!("{}", DisplayErrorContext(&err));
        assert!(rendered.contains("bucket `in` into bucket `out`"), "{rendered}");
        assert!(rendered.contains("the source bucket `in` does not exist"), "{rendered}");
        assert_eq!("in", err.buckets().unwrap().source());
        assert_eq!("out", err.buckets().unwrap().destination());
    }
}
