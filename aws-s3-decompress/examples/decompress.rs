/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::error::Error;
use std::time;

use aws_s3_decompress::types::PartSize;
use aws_sdk_s3::error::DisplayErrorContext;
use clap::Parser;

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "decompress")]
#[command(
    about = "Decompresses every .gz object in a bucket into another bucket, creating it if needed."
)]
pub struct Args {
    /// Bucket containing the gzip objects
    #[arg(required = true)]
    source_bucket: String,

    /// Bucket to write decompressed objects to
    #[arg(required = true)]
    destination_bucket: String,

    /// Access key ID of the account
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    access_key_id: Option<String>,

    /// Secret access key of the account
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    secret_access_key: Option<String>,

    /// Region to send requests to
    #[arg(long)]
    region: Option<String>,

    /// Custom S3 compatible endpoint
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Use path style addressing
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    force_path_style: bool,

    /// Only decompress objects directly under this prefix
    #[arg(long)]
    key_prefix: Option<String>,

    /// Size of the copy buffer in bytes
    #[arg(long, default_value_t = 4096)]
    buffer_size: usize,

    /// Part size to use for large objects
    #[arg(long, default_value_t = 8388608)]
    part_size: u64,
}

async fn do_decompress(args: Args) -> Result<(), BoxError> {
    let mut loader = aws_s3_decompress::from_env()
        .buffer_size(args.buffer_size)
        .part_size(PartSize::Target(args.part_size))
        .force_path_style(args.force_path_style);
    if let Some(access_key_id) = args.access_key_id {
        loader = loader.access_key_id(access_key_id);
    }
    if let Some(secret_access_key) = args.secret_access_key {
        loader = loader.secret_access_key(secret_access_key);
    }
    if let Some(region) = args.region {
        loader = loader.region(region);
    }
    if let Some(endpoint_url) = args.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }

    let client = aws_s3_decompress::Client::new(loader.load().await?);

    let start = time::Instant::now();
    let output = client
        .decompress_objects()
        .source_bucket(&args.source_bucket)
        .destination_bucket(&args.destination_bucket)
        .set_key_prefix(args.key_prefix)
        .send()
        .await?;
    let elapsed = start.elapsed();

    for object in output.decompressed_objects() {
        println!(
            "{} -> {} ({} bytes)",
            object.source_key(),
            object.destination_key(),
            object.bytes_written()
        );
    }
    println!(
        "decompressed {} objects ({} bytes read, {} bytes written) from `{}` into `{}` ({:?} bucket) in {elapsed:?}",
        output.objects_decompressed(),
        output.total_bytes_read(),
        output.total_bytes_written(),
        args.source_bucket,
        args.destination_bucket,
        output.destination_bucket_status(),
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let result = do_decompress(args).await;
    if let Err(ref err) = result {
        tracing::error!("decompress failed: {}", DisplayErrorContext(err.as_ref()));
    }

    result
}
