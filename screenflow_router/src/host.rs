// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The screen host seam: the transactional back-stack primitive the router
//! drives.
//!
//! ## Overview
//!
//! The host owns the real container surface and the back-history storage;
//! the router only issues fully-described [`HostTransaction`]s and targeted
//! pops against it. Exactly one router is bound to a host at a time.
//!
//! ## Notification contract
//!
//! After any back-stack mutation (commit with a history entry, pop,
//! delegated back handling) the host glue must invoke
//! [`Router::on_back_stack_changed`](crate::router::Router::on_back_stack_changed)
//! on the bound router, conventionally on the next event-loop turn. The
//! router tolerates the one-turn lag; it never polls.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{
    Animations, Color, ContainerId, Orientation, ScreenHandle, SharedElement, TransactionId,
    TransitionSpec,
};

/// How a transaction places its screen into the container.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ContainerOp {
    /// Stack the screen on top of the current container content.
    Add,
    /// Replace the current container content with the screen.
    Replace,
}

/// One fully-described commit against the host's back-stack primitive.
///
/// Built internally by the router; hosts consume it in a single `commit`
/// call (the begin/configure/commit dance of the underlying primitive is the
/// host's business).
#[derive(Clone)]
pub struct HostTransaction {
    /// Container receiving the screen.
    pub container: ContainerId,
    /// The freshly instantiated screen, arguments already attached.
    pub screen: ScreenHandle,
    /// History-entry address (`tag_prefix + depth`), or `None` for a
    /// skip-history commit that must not be recorded.
    pub entry_tag: Option<String>,
    /// Animation resources for both commit and pop edges.
    pub animations: Animations,
    /// Placement policy.
    pub op: ContainerOp,
    /// Scene-transition metadata; present only when the host reported
    /// support for it.
    pub transition: Option<TransitionSpec>,
    /// Shared elements; non-empty only when `transition` is present.
    pub shared_elements: Vec<SharedElement>,
}

impl core::fmt::Debug for HostTransaction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostTransaction")
            .field("container", &self.container)
            .field("entry_tag", &self.entry_tag)
            .field("animations", &self.animations)
            .field("op", &self.op)
            .field("transition", &self.transition)
            .field("shared_elements", &self.shared_elements.len())
            .finish_non_exhaustive()
    }
}

/// Failure reported by the host primitive.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum HostError {
    /// The transaction addressed a container this host does not manage.
    #[error("container {0:?} is not managed by this host")]
    UnknownContainer(ContainerId),
    /// The host rejected the transaction for a host-specific reason.
    #[error("host rejected the transaction: {reason}")]
    Rejected {
        /// Host-supplied description.
        reason: String,
    },
}

/// The host-supplied transactional back stack.
///
/// Implementations are platform glue (or the in-memory reference host in
/// [`adapters::memory`](crate::adapters::memory)). All methods are called on
/// the UI thread by the one router bound to the host.
pub trait StackHost {
    /// Current history depth (number of recorded entries).
    fn depth(&self) -> usize;

    /// The screen currently displayed in `container`, if any.
    fn screen_in(&self, container: ContainerId) -> Option<ScreenHandle>;

    /// Atomically applies `txn`. Returns the identifier of the history entry
    /// it created, or `Ok(None)` for a skip-history commit.
    fn commit(&mut self, txn: HostTransaction) -> Result<Option<TransactionId>, HostError>;

    /// Pops every entry above — and including — the entry addressed by
    /// `tag`. Returns `false` without popping when no entry matches.
    fn pop_to_tag(&mut self, tag: &str) -> bool;

    /// Pops every entry above — and including — the entry identified by
    /// `id`. Returns `false` without popping when no entry matches.
    fn pop_to_id(&mut self, id: TransactionId) -> bool;

    /// Runs the host's native back handling: pop one entry when the history
    /// is non-empty, otherwise the host's own fallback (e.g. finishing the
    /// window).
    ///
    /// Returns `true` when the handling completed synchronously, `false`
    /// when the host queued a back event for a later turn. The router uses
    /// this to decide whether its one-shot back-press suppression was
    /// already spent.
    fn delegate_back(&mut self) -> bool;

    /// Whether this host platform can apply scene transitions and shared
    /// elements. The router omits that metadata when unsupported.
    fn supports_scene_transitions(&self) -> bool {
        false
    }

    /// Applies a screen-orientation request to the host window.
    fn set_orientation(&mut self, _orientation: Orientation) {}

    /// Applies (or clears) the navigation-bar color override.
    fn set_navigation_bar_color(&mut self, _color: Option<Color>) {}

    /// Informs the host which screen the router now considers active.
    fn active_screen_changed(&mut self, _screen: Option<&ScreenHandle>) {}
}
