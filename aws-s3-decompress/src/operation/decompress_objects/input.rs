/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

/// Input type for decompressing multiple objects
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct DecompressObjectsInput {
    /// The bucket containing the gzip objects.
    pub source_bucket: Option<String>,

    /// The bucket decompressed objects are written to. Created if it does not exist.
    pub destination_bucket: Option<String>,

    /// Only consider the objects directly under the given prefix
    pub key_prefix: Option<String>,
}

impl DecompressObjectsInput {
    /// Creates a new builder-style object to manufacture [`DecompressObjectsInput`](crate::operation::decompress_objects::DecompressObjectsInput).
    pub fn builder() -> DecompressObjectsInputBuilder {
        DecompressObjectsInputBuilder::default()
    }

    /// The bucket containing the gzip objects.
    pub fn source_bucket(&self) -> Option<&str> {
        self.source_bucket.as_deref()
    }

    /// The bucket decompressed objects are written to.
    pub fn destination_bucket(&self) -> Option<&str> {
        self.destination_bucket.as_deref()
    }

    /// Only consider the objects directly under the given prefix
    pub fn key_prefix(&self) -> Option<&str> {
        self.key_prefix.as_deref()
    }
}

/// A builder for [`DecompressObjectsInput`](crate::operation::decompress_objects::DecompressObjectsInput).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct DecompressObjectsInputBuilder {
    pub(crate) source_bucket: Option<String>,
    pub(crate) destination_bucket: Option<String>,
    pub(crate) key_prefix: Option<String>,
}

impl DecompressObjectsInputBuilder {
    /// Set the bucket containing the gzip objects.
    ///
    /// NOTE: A source bucket is required.
    pub fn source_bucket(mut self, input: impl Into<String>) -> Self {
        self.source_bucket = Some(input.into());
        self
    }

    /// Set the bucket containing the gzip objects.
    ///
    /// NOTE: A source bucket is required.
    pub fn set_source_bucket(mut self, input: Option<String>) -> Self {
        self.source_bucket = input;
        self
    }

    /// The bucket containing the gzip objects.
    pub fn get_source_bucket(&self) -> &Option<String> {
        &self.source_bucket
    }

    /// Set the bucket decompressed objects are written to.
    ///
    /// NOTE: A destination bucket is required.
    pub fn destination_bucket(mut self, input: impl Into<String>) -> Self {
        self.destination_bucket = Some(input.into());
        self
    }

    /// Set the bucket decompressed objects are written to.
    ///
    /// NOTE: A destination bucket is required.
    pub fn set_destination_bucket(mut self, input: Option<String>) -> Self {
        self.destination_bucket = input;
        self
    }

    /// The bucket decompressed objects are written to.
    pub fn get_destination_bucket(&self) -> &Option<String> {
        &self.destination_bucket
    }

    /// Only consider the objects directly under the given prefix
    pub fn key_prefix(mut self, input: impl Into<String>) -> Self {
        self.key_prefix = Some(input.into());
        self
    }

    /// Only consider the objects directly under the given prefix
    pub fn set_key_prefix(mut self, input: Option<String>) -> Self {
        self.key_prefix = input;
        self
    }

    /// Only consider the objects directly under the given prefix
    pub fn get_key_prefix(&self) -> &Option<String> {
        &self.key_prefix
    }

    /// Consumes the builder and constructs a [`DecompressObjectsInput`](crate::operation::decompress_objects::DecompressObjectsInput).
    pub fn build(self) -> Result<DecompressObjectsInput, BuildError> {
        match self.source_bucket.as_deref() {
            None => {
                return Err(BuildError::missing_field(
                    "source_bucket",
                    "A source bucket is required",
                ))
            }
            Some("") => {
                return Err(BuildError::invalid_field(
                    "source_bucket",
                    "The source bucket name must not be empty",
                ))
            }
            Some(_) => {}
        }

        match self.destination_bucket.as_deref() {
            None => {
                return Err(BuildError::missing_field(
                    "destination_bucket",
                    "A destination bucket is required",
                ))
            }
            Some("") => {
                return Err(BuildError::invalid_field(
                    "destination_bucket",
                    "The destination bucket name must not be empty",
                ))
            }
            Some(_) => {}
        }

        Result::Ok(DecompressObjectsInput {
            source_bucket: self.source_bucket,
            destination_bucket: self.destination_bucket,
            key_prefix: self.key_prefix.filter(|prefix| !prefix.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::DecompressObjectsInput;

    #[test]
    fn test_no_source_bucket_error() {
        let err = DecompressObjectsInput::builder()
            .destination_bucket("out")
            .build()
            .unwrap_err();

        let err_string = err.to_string();
        assert!(err_string.contains("A source bucket is required"));
    }

    #[test]
    fn test_no_destination_bucket_error() {
        let err = DecompressObjectsInput::builder()
            .source_bucket("in")
            .build()
            .unwrap_err();

        let err_string = err.to_string();
        assert!(err_string.contains("A destination bucket is required"));
    }

    #[test]
    fn test_empty_bucket_error() {
        let err = DecompressObjectsInput::builder()
            .source_bucket("")
            .destination_bucket("out")
            .build()
            .unwrap_err();

        let err_string = err.to_string();
        assert!(err_string.contains("must not be empty"));
    }

    #[test]
    fn test_empty_key_prefix_ignored() {
        let input = DecompressObjectsInput::builder()
            .source_bucket("in")
            .destination_bucket("out")
            .key_prefix("")
            .build()
            .unwrap();
        assert_eq!(None, input.key_prefix());
    }
}
