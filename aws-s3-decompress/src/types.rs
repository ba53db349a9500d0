/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// The target part size for multipart uploads of decompressed objects.
#[derive(Debug, Clone, Default)]
pub enum PartSize {
    /// Use the default part size of 8 MiB.
    #[default]
    Auto,

    /// Target part size explicitly given.
    ///
    /// NOTE: Values below the S3 minimum part size of 5 MiB are rounded up.
    Target(u64),
}

/// A single entry returned when listing the items directly under a bucket (or key prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    /// A real object
    Object {
        /// The full key of the object
        key: String,
        /// Size of the stored (compressed) object in bytes
        size: u64,
    },

    /// A virtual directory: a common prefix of `/` delimited keys, or a zero byte
    /// folder marker object whose key ends in `/`.
    Directory {
        /// The prefix shared by every key under this directory, including the trailing `/`
        prefix: String,
    },
}

impl ListItem {
    /// The object key or directory prefix of this item
    pub fn key(&self) -> &str {
        match self {
            ListItem::Object { key, .. } => key,
            ListItem::Directory { prefix } => prefix,
        }
    }

    /// Returns true if this item is a virtual directory
    pub fn is_directory(&self) -> bool {
        matches!(self, ListItem::Directory { .. })
    }
}

/// Which branch was taken when ensuring the destination bucket exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    /// The bucket did not exist and was created by this operation
    Created,

    /// The bucket already existed
    AlreadyExisted,
}

#[cfg(test)]
mod tests {
    use super::ListItem;

    #[test]
    fn test_list_item_key() {
        let object = ListItem::Object {
            key: "dir/a.gz".to_owned(),
            size: 3,
        };
        assert_eq!("dir/a.gz", object.key());
        assert!(!object.is_directory());

        let directory = ListItem::Directory {
            prefix: "dir/".to_owned(),
        };
        assert_eq!("dir/", directory.key());
        assert!(directory.is_directory());
    }
}
