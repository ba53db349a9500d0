/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use async_trait::async_trait;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

use crate::error::{self, Error, ErrorKind};
use crate::storage::{ListItemStream, ObjectReader, ObjectStore, ObjectWriter};
use crate::types::BucketStatus;
use crate::MEBIBYTE;

mod list_objects;
mod writer;

use list_objects::ListObjectsPaginator;
use writer::S3ObjectWriter;

/// Region in which `CreateBucket` must be sent without a location constraint
const DEFAULT_REGION: &str = "us-east-1";

/// Default part size used when uploading large decompressed objects
pub(crate) const DEFAULT_PART_SIZE_BYTES: u64 = 8 * MEBIBYTE;

/// [`ObjectStore`] backed by Amazon S3 (or any S3 compatible service).
#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
    part_size: u64,
}

impl S3Store {
    /// Create a new store that sends requests with `client`.
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self {
            client,
            part_size: DEFAULT_PART_SIZE_BYTES,
        }
    }

    /// Set the size of the parts used to upload objects that do not fit in a single part.
    ///
    /// NOTE: This does not validate the part size against the S3 minimum. Use
    /// [`Config::builder`](crate::Config::builder) for a validated setting.
    pub fn with_part_size(mut self, part_size: u64) -> Self {
        self.part_size = part_size;
        self
    }

    /// The Amazon S3 client instance that will be used to send requests to S3.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }

    fn location_constraint(&self) -> Option<BucketLocationConstraint> {
        let region = self.client.config().region()?;
        match region.as_ref() {
            DEFAULT_REGION => None,
            region => Some(BucketLocationConstraint::from(region)),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let missing = err
                    .as_service_error()
                    .map(HeadBucketError::is_not_found)
                    .unwrap_or_default()
                    || err
                        .raw_response()
                        .map(|resp| resp.status().as_u16() == 404)
                        .unwrap_or_default();
                if missing {
                    Ok(false)
                } else {
                    Err(err.into())
                }
            }
        }
    }

    async fn create_bucket_if_not_exists(&self, bucket: &str) -> Result<BucketStatus, Error> {
        let configuration = self.location_constraint().map(|constraint| {
            CreateBucketConfiguration::builder()
                .location_constraint(constraint)
                .build()
        });

        let result = self
            .client
            .create_bucket()
            .bucket(bucket)
            .set_create_bucket_configuration(configuration)
            .send()
            .await;

        match result {
            Ok(_) => Ok(BucketStatus::Created),
            Err(err)
                if err
                    .as_service_error()
                    .map(CreateBucketError::is_bucket_already_owned_by_you)
                    .unwrap_or_default() =>
            {
                Ok(BucketStatus::AlreadyExisted)
            }
            Err(err) => Err(error::from_kind(ErrorKind::BucketCreationFailed)(err)),
        }
    }

    fn list_items<'a>(&'a self, bucket: &'a str, prefix: Option<&'a str>) -> ListItemStream<'a> {
        ListObjectsPaginator::new(self.client.clone(), bucket, prefix).into_stream()
    }

    async fn open_read(&self, bucket: &str, key: &str) -> Result<ObjectReader, Error> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;
        Ok(Box::pin(output.body.into_async_read()))
    }

    async fn open_write(&self, bucket: &str, key: &str) -> Result<Box<dyn ObjectWriter>, Error> {
        Ok(Box::new(S3ObjectWriter::new(
            self.client.clone(),
            bucket,
            key,
            self.part_size,
        )))
    }
}
