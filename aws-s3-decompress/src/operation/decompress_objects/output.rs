/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::types::BucketStatus;

/// A single object written by the decompress operation
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressedObject {
    /// Key of the gzip object that was read
    pub source_key: String,

    /// Key the decompressed object was written to
    pub destination_key: String,

    /// Size of the decompressed object in bytes
    pub bytes_written: u64,
}

impl DecompressedObject {
    /// Key of the gzip object that was read
    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    /// Key the decompressed object was written to
    pub fn destination_key(&self) -> &str {
        &self.destination_key
    }

    /// Size of the decompressed object in bytes
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

/// Output type for decompressing multiple objects
#[non_exhaustive]
#[derive(Debug)]
pub struct DecompressObjectsOutput {
    /// The number of objects that were successfully decompressed
    pub objects_decompressed: u64,

    /// Total number of compressed bytes listed for the decompressed objects
    pub total_bytes_read: u64,

    /// Total number of decompressed bytes written
    pub total_bytes_written: u64,

    /// Whether the destination bucket was created by this operation
    pub destination_bucket_status: BucketStatus,

    /// The objects written, in the order they were processed
    pub decompressed_objects: Option<Vec<DecompressedObject>>,
}

impl DecompressObjectsOutput {
    /// Creates a new builder-style object to manufacture [`DecompressObjectsOutput`](crate::operation::decompress_objects::DecompressObjectsOutput).
    pub fn builder() -> DecompressObjectsOutputBuilder {
        DecompressObjectsOutputBuilder::default()
    }

    /// The number of objects that were successfully decompressed
    pub fn objects_decompressed(&self) -> u64 {
        self.objects_decompressed
    }

    /// Total number of compressed bytes listed for the decompressed objects
    pub fn total_bytes_read(&self) -> u64 {
        self.total_bytes_read
    }

    /// Total number of decompressed bytes written
    pub fn total_bytes_written(&self) -> u64 {
        self.total_bytes_written
    }

    /// Whether the destination bucket was created by this operation
    pub fn destination_bucket_status(&self) -> BucketStatus {
        self.destination_bucket_status
    }

    /// A slice of the objects written, in the order they were processed
    ///
    /// If no value was sent for this field, a default will be set. If you want to determine if no value was
    /// set, use `.decompressed_objects.is_none()`
    pub fn decompressed_objects(&self) -> &[DecompressedObject] {
        self.decompressed_objects.as_deref().unwrap_or_default()
    }
}

/// A builder for [`DecompressObjectsOutput`](crate::operation::decompress_objects::DecompressObjectsOutput).
#[non_exhaustive]
#[derive(Debug)]
pub struct DecompressObjectsOutputBuilder {
    pub(crate) objects_decompressed: u64,
    pub(crate) total_bytes_read: u64,
    pub(crate) total_bytes_written: u64,
    pub(crate) destination_bucket_status: BucketStatus,
    pub(crate) decompressed_objects: Option<Vec<DecompressedObject>>,
}

impl Default for DecompressObjectsOutputBuilder {
    fn default() -> Self {
        Self {
            objects_decompressed: 0,
            total_bytes_read: 0,
            total_bytes_written: 0,
            destination_bucket_status: BucketStatus::AlreadyExisted,
            decompressed_objects: None,
        }
    }
}

impl DecompressObjectsOutputBuilder {
    /// Whether the destination bucket was created by this operation
    pub fn destination_bucket_status(mut self, input: BucketStatus) -> Self {
        self.destination_bucket_status = input;
        self
    }

    /// Whether the destination bucket was created by this operation
    pub fn get_destination_bucket_status(&self) -> BucketStatus {
        self.destination_bucket_status
    }

    /// Record a successfully decompressed object of `bytes_read` compressed bytes.
    ///
    /// Updates the object count and byte totals.
    pub fn decompressed_object(mut self, input: DecompressedObject, bytes_read: u64) -> Self {
        self.objects_decompressed += 1;
        self.total_bytes_read += bytes_read;
        self.total_bytes_written += input.bytes_written;
        self.decompressed_objects
            .get_or_insert_with(Vec::new)
            .push(input);
        self
    }

    /// The objects written so far
    pub fn get_decompressed_objects(&self) -> &Option<Vec<DecompressedObject>> {
        &self.decompressed_objects
    }

    /// The number of objects that were successfully decompressed
    pub fn get_objects_decompressed(&self) -> u64 {
        self.objects_decompressed
    }

    /// Total number of decompressed bytes written
    pub fn get_total_bytes_written(&self) -> u64 {
        self.total_bytes_written
    }

    /// Consume the builder and return the output
    pub fn build(self) -> DecompressObjectsOutput {
        DecompressObjectsOutput {
            objects_decompressed: self.objects_decompressed,
            total_bytes_read: self.total_bytes_read,
            total_bytes_written: self.total_bytes_written,
            destination_bucket_status: self.destination_bucket_status,
            decompressed_objects: self.decompressed_objects,
        }
    }
}
