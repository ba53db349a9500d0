/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */

//! Decompress gzip objects stored in one Amazon S3 bucket into another bucket.
//!
//! Every object directly under the source bucket whose key ends in `.gz` is streamed
//! through a gzip decoder and written to the destination bucket under the same name
//! with the `.gz` suffix removed. The destination bucket is created if it does not
//! exist yet. Objects are processed one at a time and the first failure aborts the run.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> Result<(), aws_s3_decompress::error::Error> {
//! let config = aws_s3_decompress::from_env()
//!     .access_key_id("AKIDEXAMPLE")
//!     .secret_access_key("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY")
//!     .region("us-west-2")
//!     .load()
//!     .await?;
//! let client = aws_s3_decompress::Client::new(config);
//!
//! let output = client
//!     .decompress_objects()
//!     .source_bucket("compressed-logs")
//!     .destination_bucket("logs")
//!     .send()
//!     .await?;
//!
//! println!("decompressed {} objects", output.objects_decompressed());
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Features
//!
//! - `test-util`: Enables an in-memory object store for unit tests. DO NOT ENABLE IN PRODUCTION.

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

pub(crate) const MEBIBYTE: u64 = 1024 * 1024;

/// Size of the intermediate buffer used to copy decompressed bytes
pub(crate) const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Error types emitted by `aws-s3-decompress`
pub mod error;

/// Common types used by `aws-s3-decompress`
pub mod types;

/// Types and helpers for I/O
pub mod io;

/// Object storage abstractions
pub mod storage;

/// Decompress client
pub mod client;

/// Decompress operations
pub mod operation;

/// Client configuration
pub mod config;

pub use self::client::Client;
use self::config::loader::ConfigLoader;
pub use self::config::Config;

/// Create a config loader
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
