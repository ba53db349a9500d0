/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
/// Input type for decompressing multiple objects
pub use input::{DecompressObjectsInput, DecompressObjectsInputBuilder};
mod output;
/// Output type for decompressing multiple objects
pub use output::{DecompressObjectsOutput, DecompressObjectsOutputBuilder, DecompressedObject};

mod worker;

use std::sync::Arc;

use aws_smithy_types::error::display::DisplayErrorContext;
use futures_util::TryStreamExt;
use tracing::Instrument;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::types::{BucketStatus, ListItem};
use worker::{DecompressObjectJob, DecompressObjectsContext};

/// Operation struct for decompressing multiple objects
#[derive(Clone, Default, Debug)]
pub(crate) struct DecompressObjects;

impl DecompressObjects {
    /// Execute a single `DecompressObjects` operation
    ///
    /// Objects are processed one at a time. The first failure aborts the operation, leaving
    /// objects written before it in place.
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        input: DecompressObjectsInput,
    ) -> Result<DecompressObjectsOutput, Error> {
        let source_bucket = input.source_bucket().unwrap_or_default().to_owned();
        let destination_bucket = input.destination_bucket().unwrap_or_default().to_owned();
        let span = tracing::debug_span!(
            "decompress-objects",
            source_bucket = source_bucket.as_str(),
            destination_bucket = destination_bucket.as_str(),
        );

        let ctx = DecompressObjectsContext {
            handle: &handle,
            source_bucket: &source_bucket,
            destination_bucket: &destination_bucket,
            key_prefix: input.key_prefix(),
        };

        match run(&ctx).instrument(span).await {
            Ok(output) => Ok(output),
            Err(err) => {
                tracing::error!(
                    "failed to decompress bucket `{}` into bucket `{}`: {}",
                    source_bucket,
                    destination_bucket,
                    DisplayErrorContext(&err)
                );
                Err(err.with_buckets(source_bucket, destination_bucket))
            }
        }
    }
}

async fn run(ctx: &DecompressObjectsContext<'_>) -> Result<DecompressObjectsOutput, Error> {
    let store = ctx.handle.store();

    if !store.bucket_exists(ctx.source_bucket).await? {
        tracing::error!("source bucket `{}` does not exist", ctx.source_bucket);
        return Err(error::not_found(format!(
            "the source bucket `{}` does not exist",
            ctx.source_bucket
        )));
    }

    let status = store
        .create_bucket_if_not_exists(ctx.destination_bucket)
        .await?;
    match status {
        BucketStatus::Created => {
            tracing::info!("created destination bucket `{}`", ctx.destination_bucket)
        }
        BucketStatus::AlreadyExisted => tracing::info!(
            "destination bucket `{}` already exists",
            ctx.destination_bucket
        ),
    }

    let mut output = DecompressObjectsOutput::builder().destination_bucket_status(status);
    let mut items = store.list_items(ctx.source_bucket, ctx.key_prefix);
    while let Some(item) = items.try_next().await? {
        let (key, size) = match item {
            ListItem::Object { key, size } if worker::is_gzip_key(&key) => (key, size),
            item if item.is_directory() => {
                tracing::trace!("skipping virtual directory {:?}", item.key());
                continue;
            }
            item => {
                tracing::trace!("skipping key {:?} without a gzip suffix", item.key());
                continue;
            }
        };

        let job = DecompressObjectJob::new(key, size)?;
        let bytes_written = worker::decompress_single_obj(ctx, &job).await?;
        output = output.decompressed_object(job.into_decompressed(bytes_written), size);
    }

    let output = output.build();
    tracing::info!(
        "decompressed {} objects ({} bytes) from bucket `{}` into bucket `{}`",
        output.objects_decompressed(),
        output.total_bytes_written(),
        ctx.source_bucket,
        ctx.destination_bucket
    );
    Ok(output)
}
