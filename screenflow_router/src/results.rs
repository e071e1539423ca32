// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Result plumbing: request embedding, response reconstruction, publishing.
//!
//! ## Overview
//!
//! Opening a screen "for results" embeds a [`ResultRequest`] into that
//! screen's arguments under the reserved [`KEY_RESULT_REQUEST`] key. No
//! registry exists: when the screen eventually closes, the response is
//! rebuilt from those same arguments by [`response_for`], correlated to the
//! requester purely by the reserved-key convention, handed to the router's
//! close-with-result operation, and published exactly once through the
//! [`ResultsPublisher`]. Delivery to the requesting screen is the
//! publisher's problem, not the router's.

use alloc::string::String;

use crate::args::Args;

/// Reserved arguments key holding the nested result-request payload.
pub const KEY_RESULT_REQUEST: &str = "screenflow.result_request";
/// Sub-key of [`KEY_RESULT_REQUEST`]: the requester identifier.
pub const KEY_REQUESTER_ID: &str = "screenflow.requester_id";
/// Sub-key of [`KEY_RESULT_REQUEST`]: the request code.
pub const KEY_REQUEST_CODE: &str = "screenflow.request_code";

/// Identifies who asked for a result and which request it was.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResultRequest {
    /// Stable identifier of the requesting screen instance.
    pub requester_id: String,
    /// Caller-chosen code distinguishing concurrent requests from the same
    /// requester.
    pub request_code: i32,
}

impl ResultRequest {
    /// Writes this request into `args` under the reserved key, replacing any
    /// previous request.
    pub fn embed(&self, args: &mut Args) {
        let mut nested = Args::new();
        nested.insert(KEY_REQUESTER_ID, self.requester_id.as_str());
        nested.insert(KEY_REQUEST_CODE, self.request_code);
        args.insert(KEY_RESULT_REQUEST, nested);
    }

    /// Reads a request back out of `args`. `None` when the reserved key is
    /// absent or malformed.
    pub fn extract(args: &Args) -> Option<Self> {
        let nested = args.get_map(KEY_RESULT_REQUEST)?;
        let requester_id = nested.get_str(KEY_REQUESTER_ID)?;
        let request_code = nested.get_int(KEY_REQUEST_CODE)?;
        Some(Self {
            requester_id: requester_id.into(),
            request_code: i32::try_from(request_code).ok()?,
        })
    }
}

/// A completed result traveling back to the requester.
///
/// Destroyed once published; the router never retains it.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultResponse {
    /// Copied from the originating [`ResultRequest`].
    pub requester_id: String,
    /// Copied from the originating [`ResultRequest`].
    pub request_code: i32,
    /// Outcome code chosen by the closing screen.
    pub result_code: i32,
    /// Optional payload accompanying the outcome.
    pub data: Option<Args>,
}

/// Sink the router hands completed responses to.
///
/// Publishing is fire-and-forget from the router's perspective: it happens
/// after the pop, whether or not the pop found a matching entry.
pub trait ResultsPublisher {
    /// Deliver `response` to whatever transport reaches the requester.
    fn publish(&self, response: ResultResponse);
}

/// Rebuilds a [`ResultResponse`] from a closing screen's arguments.
///
/// Pure function with no side effects; any screen may call it on its own
/// arguments to interpret its pending request. Returns `None` when
/// `arguments` is absent or carries no well-formed request payload.
pub fn response_for(
    arguments: Option<&Args>,
    result_code: i32,
    data: Option<Args>,
) -> Option<ResultResponse> {
    let request = ResultRequest::extract(arguments?)?;
    Some(ResultResponse {
        requester_id: request.requester_id,
        request_code: request.request_code,
        result_code,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn embed_then_extract_round_trips() {
        let request = ResultRequest {
            requester_id: "req-1".to_string(),
            request_code: 42,
        };
        let mut args = Args::new();
        request.embed(&mut args);
        assert_eq!(ResultRequest::extract(&args), Some(request));
    }

    #[test]
    fn response_for_rebuilds_the_request_linkage() {
        let mut args = Args::new();
        ResultRequest {
            requester_id: "req-1".to_string(),
            request_code: 42,
        }
        .embed(&mut args);

        let mut data = Args::new();
        data.insert("b", 2i64);

        let response = response_for(Some(&args), 7, Some(data.clone())).unwrap();
        assert_eq!(response.requester_id, "req-1");
        assert_eq!(response.request_code, 42);
        assert_eq!(response.result_code, 7);
        assert_eq!(response.data, Some(data));
    }

    #[test]
    fn response_for_requires_the_reserved_key() {
        assert!(response_for(None, 7, None).is_none());
        assert!(response_for(Some(&Args::new()), 7, None).is_none());

        // Present but malformed: wrong type under the reserved key.
        let mut args = Args::new();
        args.insert(KEY_RESULT_REQUEST, "not a map");
        assert!(response_for(Some(&args), 7, None).is_none());
    }

    #[test]
    fn embed_replaces_a_previous_request() {
        let mut args = Args::new();
        ResultRequest {
            requester_id: "first".to_string(),
            request_code: 1,
        }
        .embed(&mut args);
        ResultRequest {
            requester_id: "second".to_string(),
            request_code: 2,
        }
        .embed(&mut args);

        let extracted = ResultRequest::extract(&args).unwrap();
        assert_eq!(extracted.requester_id, "second");
        assert_eq!(extracted.request_code, 2);
    }
}
