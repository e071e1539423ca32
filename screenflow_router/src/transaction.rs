// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transaction descriptors: policy flags and the one-shot display request.
//!
//! ## Overview
//!
//! A [`TransactionSpec`] captures everything needed to perform one screen
//! transition. It is assembled by the [`Builder`](crate::router::Builder),
//! may be rewritten once by deep-link injection, is consumed exactly once by
//! the router's display routine, and is never reused.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::args::Args;
use crate::deeplink::DeepLink;
use crate::types::{Animations, ScreenFactory, SharedElement, TransitionSpec};

bitflags::bitflags! {
    /// History and container policy for one transaction.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TransactionFlags: u8 {
        /// Do not add a history entry; the transition cannot be popped and
        /// the router updates its active-screen reference eagerly.
        const SKIP_HISTORY = 0b0000_0001;
        /// Purge the entire back history before committing.
        const CLEAR_HISTORY = 0b0000_0010;
        /// Replace the container content instead of stacking on top of it.
        const REPLACE_ACTIVE = 0b0000_0100;
    }
}

/// A fully described, one-shot screen transition request.
///
/// Fields are crate-private: the [`Builder`](crate::router::Builder) is the
/// only way to assemble one, and deep-link injection inside the router is the
/// only mutation after building.
pub struct TransactionSpec {
    pub(crate) factory: Option<Rc<dyn ScreenFactory>>,
    pub(crate) args: Option<Args>,
    pub(crate) deep_link: Option<DeepLink>,
    pub(crate) animations: Animations,
    pub(crate) transition: Option<TransitionSpec>,
    pub(crate) shared_elements: Vec<SharedElement>,
    pub(crate) flags: TransactionFlags,
}

impl TransactionSpec {
    /// A spec targeting a concrete screen factory.
    pub(crate) fn for_factory(factory: Rc<dyn ScreenFactory>, animations: Animations) -> Self {
        Self {
            factory: Some(factory),
            args: None,
            deep_link: None,
            animations,
            transition: None,
            shared_elements: Vec::new(),
            flags: TransactionFlags::empty(),
        }
    }

    /// A spec driven purely by a deep link; a resolver must supply the
    /// target or the display attempt fails.
    pub(crate) fn for_link(link: DeepLink, animations: Animations) -> Self {
        let mut spec = Self::for_factory_opt(None, animations);
        spec.deep_link = Some(link);
        spec
    }

    /// A spec with a deep link plus a fallback target used when no resolver
    /// matches.
    pub(crate) fn for_link_or(
        link: DeepLink,
        fallback: Rc<dyn ScreenFactory>,
        animations: Animations,
    ) -> Self {
        let mut spec = Self::for_factory(fallback, animations);
        spec.deep_link = Some(link);
        spec
    }

    fn for_factory_opt(factory: Option<Rc<dyn ScreenFactory>>, animations: Animations) -> Self {
        Self {
            factory,
            args: None,
            deep_link: None,
            animations,
            transition: None,
            shared_elements: Vec::new(),
            flags: TransactionFlags::empty(),
        }
    }
}

impl core::fmt::Debug for TransactionSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransactionSpec")
            .field("has_factory", &self.factory.is_some())
            .field("args", &self.args)
            .field("deep_link", &self.deep_link)
            .field("animations", &self.animations)
            .field("transition", &self.transition)
            .field("shared_elements", &self.shared_elements.len())
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deeplink::DeepLink;
    use crate::types::factory_fn;
    use crate::types::InstantiationError;

    fn dummy_factory() -> Rc<dyn ScreenFactory> {
        factory_fn(|| Err(InstantiationError::new("dummy")))
    }

    #[test]
    fn flags_default_to_stacked_add_with_history() {
        let spec = TransactionSpec::for_factory(dummy_factory(), Animations::NONE);
        assert!(spec.flags.is_empty());
        assert!(spec.args.is_none());
        assert!(spec.deep_link.is_none());
        assert!(spec.transition.is_none());
        assert!(spec.shared_elements.is_empty());
    }

    #[test]
    fn link_only_specs_start_without_a_target() {
        let spec = TransactionSpec::for_link(DeepLink::new("app://x"), Animations::NONE);
        assert!(spec.factory.is_none());
        assert!(spec.deep_link.is_some());
    }

    #[test]
    fn link_specs_can_carry_a_fallback_target() {
        let spec =
            TransactionSpec::for_link_or(DeepLink::new("app://x"), dummy_factory(), Animations::NONE);
        assert!(spec.factory.is_some());
        assert!(spec.deep_link.is_some());
    }

    #[test]
    fn flag_bits_are_independent() {
        let mut flags = TransactionFlags::empty();
        flags.set(TransactionFlags::SKIP_HISTORY, true);
        flags.set(TransactionFlags::REPLACE_ACTIVE, true);
        assert!(flags.contains(TransactionFlags::SKIP_HISTORY));
        assert!(!flags.contains(TransactionFlags::CLEAR_HISTORY));
        assert!(flags.contains(TransactionFlags::REPLACE_ACTIVE));
    }
}
