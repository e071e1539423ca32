// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deep-link plumbing: the inbound link object and the resolver seam.
//!
//! ## Overview
//!
//! The router never interprets a link itself. It walks an ordered list of
//! [`DeepLinkResolver`]s and the first one returning a [`ResolvedTarget`]
//! wins: the transaction's target is rewritten and the resolved arguments are
//! overwrite-merged on top of the caller's. Pattern matching (path templates,
//! annotations, whatever the app uses) lives entirely inside resolver
//! implementations.

use alloc::rc::Rc;
use alloc::string::String;

use crate::args::Args;
use crate::types::ScreenFactory;

/// Reserved argument key the router writes the claimed link URI under, so the
/// opened screen can inspect what launched it.
pub const DEEP_LINK_URI: &str = "screenflow.deep_link_uri";

/// An inbound link the router should resolve to a screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeepLink {
    /// The link URI, e.g. `myapp://orders/42`.
    pub uri: String,
    /// Extras carried alongside the URI by the launching intent.
    pub extras: Args,
}

impl DeepLink {
    /// A link with the given URI and no extras.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            extras: Args::new(),
        }
    }

    /// Attach extras to the link.
    pub fn with_extras(mut self, extras: Args) -> Self {
        self.extras = extras;
        self
    }
}

/// A resolver's answer: which screen to open and with what arguments.
pub struct ResolvedTarget {
    /// Factory for the screen the link maps to.
    pub factory: Rc<dyn ScreenFactory>,
    /// Arguments extracted from the link. Merged over the transaction's
    /// existing arguments, winning on conflict.
    pub args: Args,
}

impl core::fmt::Debug for ResolvedTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResolvedTarget")
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Maps an inbound link to a target screen, or declines.
///
/// Resolvers are consulted in registration order and the scan short-circuits
/// on the first match.
pub trait DeepLinkResolver {
    /// Returns the target for `link`, or `None` to let the next resolver try.
    fn resolve(&self, link: &DeepLink) -> Option<ResolvedTarget>;
}
