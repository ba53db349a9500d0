/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_smithy_types::error::display::DisplayErrorContext;
use bytes::{Bytes, BytesMut};
use tracing::Instrument;

use crate::error::{self, Error};
use crate::storage::ObjectWriter;

/// Writer for a single S3 object.
///
/// Data is buffered until a full part is available. Objects smaller than one part are sent
/// with a single `PutObject` request when finished; anything larger is sent as a multipart
/// upload which is completed by `finish` or aborted by `abort`.
#[derive(Debug)]
pub(super) struct S3ObjectWriter {
    client: aws_sdk_s3::Client,
    bucket: String,
    key: String,
    part_size: usize,
    buffer: BytesMut,
    upload_id: Option<String>,
    completed_parts: Vec<CompletedPart>,
    bytes_written: u64,
}

impl S3ObjectWriter {
    pub(super) fn new(client: aws_sdk_s3::Client, bucket: &str, key: &str, part_size: u64) -> Self {
        let part_size = usize::try_from(part_size).unwrap_or(usize::MAX).max(1);
        Self {
            client,
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            part_size,
            buffer: BytesMut::new(),
            upload_id: None,
            completed_parts: Vec::new(),
            bytes_written: 0,
        }
    }

    async fn upload_id(&mut self) -> Result<String, Error> {
        if let Some(upload_id) = &self.upload_id {
            return Ok(upload_id.clone());
        }

        let resp = self
            .client
            .create_multipart_upload()
            .bucket(self.bucket.clone())
            .key(self.key.clone())
            .send()
            .instrument(tracing::debug_span!("send-create-multipart-upload"))
            .await?;

        let upload_id = resp
            .upload_id
            .ok_or_else(|| error::invalid_input("CreateMultipartUpload response had no upload ID"))?;
        tracing::trace!("started multipart upload {upload_id} for key {:?}", self.key);
        self.upload_id = Some(upload_id.clone());
        Ok(upload_id)
    }

    async fn upload_part(&mut self, data: Bytes) -> Result<(), Error> {
        let upload_id = self.upload_id().await?;
        let part_number = self.completed_parts.len() as i32 + 1;

        let resp = self
            .client
            .upload_part()
            .bucket(self.bucket.clone())
            .key(self.key.clone())
            .upload_id(upload_id)
            .part_number(part_number)
            .content_length(data.len() as i64)
            .body(ByteStream::from(data))
            .send()
            .instrument(tracing::debug_span!("send-upload-part", part_number))
            .await?;

        tracing::trace!("completed upload of part number {}", part_number);
        self.completed_parts.push(
            CompletedPart::builder()
                .part_number(part_number)
                .set_e_tag(resp.e_tag)
                .build(),
        );
        Ok(())
    }

    async fn put_object(&mut self) -> Result<(), Error> {
        let body = self.buffer.split().freeze();
        self.client
            .put_object()
            .bucket(self.bucket.clone())
            .key(self.key.clone())
            .content_length(body.len() as i64)
            .body(ByteStream::from(body))
            .send()
            .instrument(tracing::debug_span!("send-put-object"))
            .await?;
        Ok(())
    }

    async fn complete_upload(&mut self, upload_id: String) -> Result<(), Error> {
        if !self.buffer.is_empty() {
            let last_part = self.buffer.split().freeze();
            self.upload_part(last_part).await?;
        }

        self.client
            .complete_multipart_upload()
            .bucket(self.bucket.clone())
            .key(self.key.clone())
            .upload_id(upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(std::mem::take(&mut self.completed_parts)))
                    .build(),
            )
            .send()
            .instrument(tracing::debug_span!("send-complete-multipart-upload"))
            .await?;
        Ok(())
    }

    async fn abort_upload(&mut self, upload_id: String) -> Result<(), Error> {
        self.client
            .abort_multipart_upload()
            .bucket(self.bucket.clone())
            .key(self.key.clone())
            .upload_id(upload_id)
            .send()
            .instrument(tracing::debug_span!("send-abort-multipart-upload"))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectWriter for S3ObjectWriter {
    async fn write_all(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.buffer.extend_from_slice(buf);
        self.bytes_written += buf.len() as u64;

        while self.buffer.len() >= self.part_size {
            let part = self.buffer.split_to(self.part_size).freeze();
            self.upload_part(part).await?;
        }
        Ok(())
    }

    async fn finish(mut self: Box<Self>) -> Result<u64, Error> {
        match self.upload_id.clone() {
            None => self.put_object().await?,
            Some(upload_id) => {
                if let Err(err) = self.complete_upload(upload_id.clone()).await {
                    tracing::error!("multipart upload failed to complete, aborting");
                    if let Err(abort_err) = self.abort_upload(upload_id).await {
                        tracing::error!(
                            "failed to abort upload: {}",
                            DisplayErrorContext(abort_err)
                        );
                    }
                    return Err(err);
                }
            }
        }

        tracing::debug!(
            "wrote {} bytes to key {:?} in bucket {:?}",
            self.bytes_written,
            self.key,
            self.bucket
        );
        Ok(self.bytes_written)
    }

    async fn abort(mut self: Box<Self>) -> Result<(), Error> {
        self.buffer.clear();
        match self.upload_id.take() {
            None => Ok(()),
            Some(upload_id) => {
                tracing::debug!("aborting multipart upload {upload_id} for key {:?}", self.key);
                self.abort_upload(upload_id).await
            }
        }
    }
}
