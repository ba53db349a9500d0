/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Types for the multiple object decompress operation
pub mod decompress_objects;

/// Character used to group keys into virtual directories
pub(crate) const DEFAULT_DELIMITER: &str = "/";
