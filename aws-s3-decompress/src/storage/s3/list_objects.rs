/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::{
    error::SdkError,
    operation::list_objects_v2::{ListObjectsV2Error, ListObjectsV2Input, ListObjectsV2Output},
};
use aws_smithy_runtime_api::http::Response;
use futures_util::{stream, StreamExt, TryStreamExt};

use crate::error::{self, ErrorKind};
use crate::operation::DEFAULT_DELIMITER;
use crate::storage::ListItemStream;
use crate::types::ListItem;

/// Paginator for `ListObjectsV2` that lists the items directly under a bucket or prefix.
///
/// Nested keys are grouped by the `/` delimiter and come back as `CommonPrefixes`, which
/// are surfaced as virtual directories rather than recursed into.
#[derive(Debug)]
pub(super) struct ListObjectsPaginator {
    client: aws_sdk_s3::Client,
    bucket: String,
    prefix: Option<String>,
    state: Option<State>,
}

#[derive(Debug, PartialEq)]
enum State {
    Paginating { next_token: Option<String> },
    Done,
}

impl State {
    fn next_state(self, output: &ListObjectsV2Output) -> State {
        let is_truncated =
            output.is_truncated().unwrap_or(false) && output.next_continuation_token().is_some();

        match self {
            // more results
            State::Paginating { .. } if is_truncated => State::Paginating {
                next_token: output.next_continuation_token.to_owned(),
            },
            _ => State::Done,
        }
    }
}

impl ListObjectsPaginator {
    pub(super) fn new(client: aws_sdk_s3::Client, bucket: &str, prefix: Option<&str>) -> Self {
        Self {
            client,
            bucket: bucket.to_owned(),
            prefix: prefix.map(str::to_owned),
            state: Some(State::Paginating { next_token: None }),
        }
    }

    pub(super) async fn next_page(
        &mut self,
    ) -> Option<Result<ListObjectsV2Output, SdkError<ListObjectsV2Error, Response>>> {
        let request = match self.state.as_ref()? {
            State::Done => return None,
            State::Paginating { next_token } => ListObjectsV2Input::builder()
                .bucket(self.bucket.clone())
                .set_prefix(self.prefix.clone())
                .set_continuation_token(next_token.clone())
                .delimiter(DEFAULT_DELIMITER),
        };

        let list_result = request.send_with(&self.client).await;
        match list_result {
            Ok(output) => {
                let prev_state = self.state.take()?;
                self.state.replace(prev_state.next_state(&output));
                Some(Ok(output))
            }
            Err(err) => {
                self.state.replace(State::Done);
                Some(Err(err))
            }
        }
    }

    /// Flatten every page into a single stream of items
    pub(super) fn into_stream(self) -> ListItemStream<'static> {
        stream::try_unfold(self, |mut paginator| async move {
            match paginator.next_page().await {
                None => Ok(None),
                Some(Ok(output)) => Ok(Some((page_items(&output), paginator))),
                Some(Err(err)) => Err(error::from_kind(ErrorKind::ListFailed)(err)),
            }
        })
        .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
        .try_flatten()
        .boxed()
    }
}

fn page_items(output: &ListObjectsV2Output) -> Vec<ListItem> {
    let objects = output.contents().iter().filter_map(|object| {
        let key = object.key()?.to_owned();
        // folder marker objects created by the console and other tools
        if key.ends_with(DEFAULT_DELIMITER) {
            return Some(ListItem::Directory { prefix: key });
        }
        let size = object.size().unwrap_or_default().max(0) as u64;
        Some(ListItem::Object { key, size })
    });

    let directories = output.common_prefixes().iter().filter_map(|prefix| {
        prefix.prefix().map(|prefix| ListItem::Directory {
            prefix: prefix.to_owned(),
        })
    });

    objects.chain(directories).collect()
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::{
        operation::list_objects_v2::ListObjectsV2Output,
        types::{CommonPrefix, Object},
    };

    use super::{page_items, State};
    use crate::types::ListItem;

    #[test]
    fn test_next_state() {
        let start = State::Paginating { next_token: None };

        let output1 = list_resp(Some("token1"), Some(vec!["pre1/"]), vec!["k1", "k2"]);
        let output2 = list_resp(Some("token2"), None, vec!["k3"]);
        let output3 = list_resp(None, Some(vec!["pre2/"]), vec!["k4"]);

        let state2 = start.next_state(&output1);
        assert_eq!(
            state2,
            State::Paginating {
                next_token: Some("token1".to_owned()),
            }
        );

        let state3 = state2.next_state(&output2);
        assert_eq!(
            state3,
            State::Paginating {
                next_token: Some("token2".to_owned()),
            }
        );

        let state4 = state3.next_state(&output3);
        assert_eq!(state4, State::Done);
        assert_eq!(State::Done, state4.next_state(&output1));
    }

    #[test]
    fn test_truncated_without_token_is_done() {
        let output = ListObjectsV2Output::builder()
            .is_truncated(true)
            .set_contents(Some(vec![Object::builder().key("k1").build()]))
            .build();
        let state = State::Paginating { next_token: None }.next_state(&output);
        assert_eq!(State::Done, state);
    }

    #[test]
    fn test_page_items() {
        let output = list_resp(
            None,
            Some(vec!["logs/", "archive/"]),
            vec!["a.gz", "folder/", "b.txt"],
        );

        let items = page_items(&output);
        assert_eq!(
            items,
            vec![
                ListItem::Object {
                    key: "a.gz".to_owned(),
                    size: 3,
                },
                ListItem::Directory {
                    prefix: "folder/".to_owned(),
                },
                ListItem::Object {
                    key: "b.txt".to_owned(),
                    size: 3,
                },
                ListItem::Directory {
                    prefix: "logs/".to_owned(),
                },
                ListItem::Directory {
                    prefix: "archive/".to_owned(),
                },
            ]
        );
    }

    fn list_resp(
        next_token: Option<&'static str>,
        common_prefixes: Option<Vec<&'static str>>,
        keys: Vec<&'static str>,
    ) -> ListObjectsV2Output {
        let common_prefixes = common_prefixes.map(|p| {
            p.iter()
                .map(|v| CommonPrefix::builder().prefix(*v).build())
                .collect()
        });
        let contents = keys
            .iter()
            .map(|k| Object::builder().key(*k).size(3).build())
            .collect();
        ListObjectsV2Output::builder()
            .is_truncated(next_token.is_some())
            .set_next_continuation_token(next_token.map(str::to_owned))
            .set_common_prefixes(common_prefixes)
            .set_contents(Some(contents))
            .build()
    }
}
