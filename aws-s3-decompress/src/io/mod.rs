/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Streaming gzip decoding
mod gzip;
mod copy;

// re-exports
pub use self::gzip::GzipReader;
pub(crate) use self::copy::copy_to_writer;
