// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory collaborators: a deterministic reference host plus recording
//! chrome handlers and publisher.
//!
//! ## Feature
//!
//! Enable with `memory_adapter` (always available to this crate's own
//! tests).
//!
//! ## Notes
//!
//! [`MemoryHost`] models the host back-stack primitive exactly as the router
//! assumes it: every history entry snapshots the container content taken
//! before its commit, so popping an entry restores the container to the
//! state the entry reverses. Back-stack mutations raise a pending
//! notification flag instead of calling the router directly, which mirrors
//! the real platform's next-loop-turn delivery; [`drain_stack_changes`]
//! pumps the flag into
//! [`Router::on_back_stack_changed`](crate::router::Router::on_back_stack_changed).

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::args::Args;
use crate::host::{ContainerOp, HostError, HostTransaction, StackHost};
use crate::results::{ResultResponse, ResultsPublisher};
use crate::router::Router;
use crate::types::{
    Animations, Color, ContainerId, DrawerHandler, IconRes, NavigationIconType, Orientation,
    Screen, ScreenFactory, ScreenHandle, ToolbarHandler, TransactionId, factory_fn,
};

struct Entry {
    tag: String,
    id: TransactionId,
    /// Container content captured before this entry's commit; popping the
    /// entry restores it.
    saved: Vec<ScreenHandle>,
}

/// One committed transaction, kept for inspection.
#[derive(Clone, Debug)]
pub struct CommitRecord {
    /// History-entry address, or `None` for a skip-history commit.
    pub entry_tag: Option<String>,
    /// Animations the router attached.
    pub animations: Animations,
    /// Placement policy the router chose.
    pub op: ContainerOp,
    /// Whether scene-transition metadata survived the platform gate.
    pub had_transition: bool,
    /// Number of shared elements attached.
    pub shared_elements: usize,
}

/// Deterministic single-container host for tests, demos, and headless use.
pub struct MemoryHost {
    container: ContainerId,
    content: Vec<ScreenHandle>,
    entries: Vec<Entry>,
    commits: Vec<CommitRecord>,
    next_txn: u64,
    finished: bool,
    pending_change: bool,
    scene_transitions: bool,
    orientation: Orientation,
    nav_bar_color: Option<Color>,
}

impl MemoryHost {
    /// A host managing the given container, with scene transitions
    /// unsupported (the router must strip that metadata).
    pub fn new(container: ContainerId) -> Self {
        Self {
            container,
            content: Vec::new(),
            entries: Vec::new(),
            commits: Vec::new(),
            next_txn: 0,
            finished: false,
            pending_change: false,
            scene_transitions: false,
            orientation: Orientation::Unspecified,
            nav_bar_color: None,
        }
    }

    /// Enable scene-transition support.
    pub fn with_scene_transitions(mut self) -> Self {
        self.scene_transitions = true;
        self
    }

    /// Place a screen in the container without recording history, as if it
    /// predated the router binding.
    pub fn seed(&mut self, screen: ScreenHandle) {
        self.content.push(screen);
    }

    /// Whether the empty-stack back fallback fired.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The screen currently on top of the container.
    pub fn visible(&self) -> Option<ScreenHandle> {
        self.content.last().cloned()
    }

    /// Number of screens in the container (not the history depth).
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Every commit applied so far, in order.
    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    /// Last orientation the router pushed.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Last navigation-bar color the router pushed.
    pub fn navigation_bar_color(&self) -> Option<Color> {
        self.nav_bar_color
    }

    /// Takes the pending change-notification flag, returning whether a
    /// back-stack mutation happened since the last take.
    pub fn take_stack_change(&mut self) -> bool {
        core::mem::take(&mut self.pending_change)
    }

    fn restore(&mut self, saved: Vec<ScreenHandle>) {
        self.content = saved;
        self.pending_change = true;
    }
}

impl core::fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemoryHost")
            .field("container", &self.container)
            .field("content", &self.content.len())
            .field("depth", &self.entries.len())
            .field("finished", &self.finished)
            .field("pending_change", &self.pending_change)
            .finish_non_exhaustive()
    }
}

impl StackHost for MemoryHost {
    fn depth(&self) -> usize {
        self.entries.len()
    }

    fn screen_in(&self, container: ContainerId) -> Option<ScreenHandle> {
        (container == self.container)
            .then(|| self.content.last().cloned())
            .flatten()
    }

    fn commit(&mut self, txn: HostTransaction) -> Result<Option<TransactionId>, HostError> {
        if txn.container != self.container {
            return Err(HostError::UnknownContainer(txn.container));
        }

        self.commits.push(CommitRecord {
            entry_tag: txn.entry_tag.clone(),
            animations: txn.animations,
            op: txn.op,
            had_transition: txn.transition.is_some(),
            shared_elements: txn.shared_elements.len(),
        });

        let saved = self.content.clone();
        match txn.op {
            ContainerOp::Add => self.content.push(txn.screen),
            ContainerOp::Replace => {
                self.content.clear();
                self.content.push(txn.screen);
            }
        }

        match txn.entry_tag {
            Some(tag) => {
                let id = TransactionId(self.next_txn);
                self.next_txn += 1;
                self.entries.push(Entry { tag, id, saved });
                self.pending_change = true;
                Ok(Some(id))
            }
            // Skip-history commits mutate the container but never the back
            // stack, so no notification is raised.
            None => Ok(None),
        }
    }

    fn pop_to_tag(&mut self, tag: &str) -> bool {
        let Some(idx) = self.entries.iter().rposition(|e| e.tag == tag) else {
            return false;
        };
        let saved = self.entries[idx].saved.clone();
        self.entries.truncate(idx);
        self.restore(saved);
        true
    }

    fn pop_to_id(&mut self, id: TransactionId) -> bool {
        let Some(idx) = self.entries.iter().rposition(|e| e.id == id) else {
            return false;
        };
        let saved = self.entries[idx].saved.clone();
        self.entries.truncate(idx);
        self.restore(saved);
        true
    }

    fn delegate_back(&mut self) -> bool {
        match self.entries.pop() {
            Some(entry) => self.restore(entry.saved),
            None => self.finished = true,
        }
        true
    }

    fn supports_scene_transitions(&self) -> bool {
        self.scene_transitions
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    fn set_navigation_bar_color(&mut self, color: Option<Color>) {
        self.nav_bar_color = color;
    }
}

/// Delivers every pending back-stack notification to the router, modeling
/// the event-loop turns a real host would take.
pub fn drain_stack_changes(router: &mut Router<MemoryHost>) {
    while router.host_mut().is_some_and(MemoryHost::take_stack_change) {
        router.on_back_stack_changed();
    }
}

/// A minimal screen with a name and stored arguments, no navigation
/// capability.
#[derive(Debug)]
pub struct BasicScreen {
    name: String,
    args: RefCell<Option<Args>>,
}

impl BasicScreen {
    /// A fresh instance as a shared handle.
    pub fn named(name: impl Into<String>) -> ScreenHandle {
        Rc::new(Self {
            name: name.into(),
            args: RefCell::new(None),
        })
    }

    /// A factory producing fresh instances with the given name.
    pub fn factory(name: &'static str) -> Rc<dyn ScreenFactory> {
        factory_fn(move || Ok(Self::named(name)))
    }

    /// The screen's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Screen for BasicScreen {
    fn set_args(&self, args: Args) {
        *self.args.borrow_mut() = Some(args);
    }

    fn args(&self) -> Option<Args> {
        self.args.borrow().clone()
    }
}

/// One instruction pushed to a [`RecordingToolbar`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolbarCall {
    /// `set_navigation_icon`.
    Icon(NavigationIconType),
    /// `set_custom_navigation_icon`.
    CustomIcon(Option<IconRes>),
    /// `set_title`.
    Title(String),
    /// `set_toolbar_visible`.
    Visible(bool),
}

/// Toolbar handler that records every instruction it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingToolbar {
    calls: Rc<RefCell<Vec<ToolbarCall>>>,
}

impl RecordingToolbar {
    /// All instructions received so far, in order.
    pub fn calls(&self) -> Vec<ToolbarCall> {
        self.calls.borrow().clone()
    }

    /// Forget recorded instructions.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl ToolbarHandler for RecordingToolbar {
    fn set_navigation_icon(&mut self, icon: NavigationIconType) {
        self.calls.borrow_mut().push(ToolbarCall::Icon(icon));
    }

    fn set_custom_navigation_icon(&mut self, icon: Option<IconRes>) {
        self.calls.borrow_mut().push(ToolbarCall::CustomIcon(icon));
    }

    fn set_title(&mut self, title: &str) {
        self.calls.borrow_mut().push(ToolbarCall::Title(title.into()));
    }

    fn set_toolbar_visible(&mut self, visible: bool) {
        self.calls.borrow_mut().push(ToolbarCall::Visible(visible));
    }
}

/// Drawer handler that records every enablement change.
#[derive(Clone, Debug, Default)]
pub struct RecordingDrawer {
    states: Rc<RefCell<Vec<bool>>>,
}

impl RecordingDrawer {
    /// Every enablement value received so far, in order.
    pub fn states(&self) -> Vec<bool> {
        self.states.borrow().clone()
    }

    /// Forget recorded values.
    pub fn clear(&self) {
        self.states.borrow_mut().clear();
    }
}

impl DrawerHandler for RecordingDrawer {
    fn set_drawer_enabled(&mut self, enabled: bool) {
        self.states.borrow_mut().push(enabled);
    }
}

/// Publisher that retains every response it was handed.
#[derive(Clone, Debug, Default)]
pub struct RecordingPublisher {
    responses: Rc<RefCell<Vec<ResultResponse>>>,
}

impl RecordingPublisher {
    /// Every response published so far, in order.
    pub fn published(&self) -> Vec<ResultResponse> {
        self.responses.borrow().clone()
    }
}

impl ResultsPublisher for RecordingPublisher {
    fn publish(&self, response: ResultResponse) {
        self.responses.borrow_mut().push(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StackHost;

    fn txn(host: &MemoryHost, tag: Option<&str>) -> HostTransaction {
        HostTransaction {
            container: host.container,
            screen: BasicScreen::named("s"),
            entry_tag: tag.map(Into::into),
            animations: Animations::NONE,
            op: ContainerOp::Add,
            transition: None,
            shared_elements: Vec::new(),
        }
    }

    #[test]
    fn commit_records_history_and_raises_notification() {
        let mut host = MemoryHost::new(ContainerId(1));
        let id = host.commit(txn(&host, Some("#id-0"))).unwrap();
        assert!(id.is_some());
        assert_eq!(host.depth(), 1);
        assert_eq!(host.content_len(), 1);
        assert!(host.take_stack_change());
        assert!(!host.take_stack_change());
    }

    #[test]
    fn skip_history_commit_is_silent() {
        let mut host = MemoryHost::new(ContainerId(1));
        let id = host.commit(txn(&host, None)).unwrap();
        assert_eq!(id, None);
        assert_eq!(host.depth(), 0);
        assert_eq!(host.content_len(), 1);
        assert!(!host.take_stack_change());
    }

    #[test]
    fn commit_rejects_foreign_containers() {
        let mut host = MemoryHost::new(ContainerId(1));
        let mut t = txn(&host, None);
        t.container = ContainerId(9);
        assert_eq!(
            host.commit(t).unwrap_err(),
            HostError::UnknownContainer(ContainerId(9))
        );
    }

    #[test]
    fn popping_restores_the_pre_commit_snapshot() {
        let mut host = MemoryHost::new(ContainerId(1));
        host.commit(txn(&host, Some("#id-0"))).unwrap();
        host.commit(txn(&host, Some("#id-1"))).unwrap();
        host.commit(txn(&host, Some("#id-2"))).unwrap();
        assert_eq!(host.content_len(), 3);

        // Inclusive pop: the #id-1 entry itself is undone too.
        assert!(host.pop_to_tag("#id-1"));
        assert_eq!(host.depth(), 1);
        assert_eq!(host.content_len(), 1);

        assert!(!host.pop_to_tag("#id-7"));
        assert_eq!(host.depth(), 1);
    }

    #[test]
    fn pop_by_id_matches_the_entry_it_created() {
        let mut host = MemoryHost::new(ContainerId(1));
        let first = host.commit(txn(&host, Some("#id-0"))).unwrap().unwrap();
        host.commit(txn(&host, Some("#id-1"))).unwrap();
        assert!(host.pop_to_id(first));
        assert_eq!(host.depth(), 0);
        assert!(!host.pop_to_id(TransactionId(99)));
    }

    #[test]
    fn delegate_back_pops_or_finishes() {
        let mut host = MemoryHost::new(ContainerId(1));
        host.commit(txn(&host, Some("#id-0"))).unwrap();
        assert!(host.delegate_back());
        assert_eq!(host.depth(), 0);
        assert!(!host.is_finished());

        assert!(host.delegate_back());
        assert!(host.is_finished());
    }
}
