// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Owns the active-screen reference, executes transaction descriptors
//! against the bound [`StackHost`], resolves close requests against the back
//! history, and resynchronizes chrome state after every transition.
//!
//! ## State model
//!
//! There is no state enum: the router's visible configuration is entirely
//! derived from `(active screen, optional RoutedScreen capability)`, and
//! [`Router::sync_screen_state`] recomputes all of it on every run. The
//! active-screen reference is re-derived from the host after every commit
//! and on every back-stack-change notification, so it can never drift for
//! longer than the one loop turn a notification takes to arrive.
//!
//! ## Failure policy
//!
//! Display-path failures never escape: they are logged and collapsed into a
//! `None` transaction identifier, so a navigation error can never corrupt
//! host state mid-interaction. Close operations on an unbound router are
//! no-ops.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::args::Args;
use crate::deeplink::{DEEP_LINK_URI, DeepLink, DeepLinkResolver};
use crate::host::{ContainerOp, HostError, HostTransaction, StackHost};
use crate::results::{ResultRequest, ResultResponse, ResultsPublisher};
use crate::transaction::{TransactionFlags, TransactionSpec};
use crate::types::{
    AnimRes, Animations, ContainerId, DrawerHandler, InstantiationError, NavigationIconType,
    Orientation, ScreenFactory, ScreenHandle, SharedElement, ToolbarHandler, TransactionId,
    TransitionSpec,
};

/// Default prefix for derived history-entry addresses.
const DEFAULT_TAG_PREFIX: &str = "#id-";

/// Why a display attempt failed. Absorbed at the public boundary: callers
/// only ever observe a `None` transaction identifier plus a log line.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The router has no attached screen host.
    #[error("router is not attached to a screen host")]
    Unbound,
    /// The transaction carries no target and no deep-link resolver matched.
    #[error("transaction has no target screen and no deep-link resolver matched")]
    NoTarget,
    /// The target screen could not be constructed.
    #[error(transparent)]
    Instantiation(#[from] InstantiationError),
    /// The host primitive rejected the transaction.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Screen-stack router bound to (at most) one screen host.
///
/// ## Usage
///
/// - Construct with [`Router::new`], bind collaborators with
///   [`set_host`](Router::set_host), [`set_toolbar_handler`](Router::set_toolbar_handler),
///   [`set_drawer_handler`](Router::set_drawer_handler), and
///   [`set_resolvers`](Router::set_resolvers).
/// - Open screens through [`open`](Router::open) and friends, which return a
///   [`Builder`].
/// - Wire the platform glue: back presses go through
///   [`on_back_pressed`](Router::on_back_pressed), toolbar icon clicks
///   through [`on_navigation_icon_clicked`](Router::on_navigation_icon_clicked),
///   and back-stack notifications through
///   [`on_back_stack_changed`](Router::on_back_stack_changed).
/// - Call [`detach`](Router::detach) when the host goes away so no stale
///   notification can reach a retired router.
pub struct Router<H: StackHost> {
    host: Option<H>,
    container: ContainerId,
    tag_prefix: String,
    current: Option<ScreenHandle>,
    /// One-shot suppression of the active screen's back-press hook, armed by
    /// a programmatic close.
    override_back: bool,
    default_animations: Animations,
    resolvers: Vec<Box<dyn DeepLinkResolver>>,
    toolbar: Option<Box<dyn ToolbarHandler>>,
    drawer: Option<Box<dyn DrawerHandler>>,
    publisher: Box<dyn ResultsPublisher>,
}

impl<H: StackHost> core::fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router")
            .field("container", &self.container)
            .field("bound", &self.host.is_some())
            .field("tag_prefix", &self.tag_prefix)
            .field("has_current", &self.current.is_some())
            .field("override_back", &self.override_back)
            .finish_non_exhaustive()
    }
}

impl<H: StackHost> Router<H> {
    /// Creates an unbound router for the given container. Results delivered
    /// through close-with-result operations go to `publisher`.
    pub fn new(container: ContainerId, publisher: Box<dyn ResultsPublisher>) -> Self {
        Self {
            host: None,
            container,
            tag_prefix: DEFAULT_TAG_PREFIX.into(),
            current: None,
            override_back: false,
            default_animations: Animations::NONE,
            resolvers: Vec::new(),
            toolbar: None,
            drawer: None,
            publisher,
        }
    }

    /// Binds (or unbinds) the screen host. Binding re-derives the active
    /// screen from the host's container and runs a full chrome resync when
    /// it changed; unbinding drops the active-screen reference.
    pub fn set_host(&mut self, host: Option<H>) {
        self.host = None;
        self.current = None;
        if let Some(host) = host {
            self.host = Some(host);
            let screen = self.retrieve_active();
            self.set_current(screen);
        }
    }

    /// The bound host, if any.
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Mutable access to the bound host.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// Sets the toolbar handler and immediately pushes the current toolbar
    /// state to it.
    pub fn set_toolbar_handler(&mut self, toolbar: Option<Box<dyn ToolbarHandler>>) {
        self.toolbar = toolbar;
        if self.toolbar.is_some() {
            self.sync_toolbar_state();
        }
    }

    /// Sets the drawer handler and immediately pushes the current drawer
    /// state to it.
    pub fn set_drawer_handler(&mut self, drawer: Option<Box<dyn DrawerHandler>>) {
        self.drawer = drawer;
        if self.drawer.is_some() {
            self.sync_drawer_state();
        }
    }

    /// Replaces the deep-link resolvers. Order matters: the first resolver
    /// returning a target wins.
    pub fn set_resolvers(&mut self, resolvers: Vec<Box<dyn DeepLinkResolver>>) {
        self.resolvers = resolvers;
    }

    /// Sets the prefix used to derive history-entry addresses.
    pub fn set_tag_prefix(&mut self, prefix: impl Into<String>) {
        self.tag_prefix = prefix.into();
    }

    /// The prefix used to derive history-entry addresses.
    pub fn tag_prefix(&self) -> &str {
        &self.tag_prefix
    }

    /// Sets the animations a [`Builder`] starts from.
    pub fn set_default_animations(&mut self, animations: Animations) {
        self.default_animations = animations;
    }

    /// Unbinds every collaborator. Call when the host is being destroyed so
    /// no stale notification can reach this router.
    pub fn detach(&mut self) {
        self.set_host(None);
        self.toolbar = None;
        self.drawer = None;
    }

    // ---- Opening ----------------------------------------------------------

    /// Starts a transaction targeting `factory`.
    pub fn open(&mut self, factory: Rc<dyn ScreenFactory>) -> Builder<'_, H> {
        let spec = TransactionSpec::for_factory(factory, self.default_animations);
        Builder { router: self, spec }
    }

    /// Starts a transaction driven by a deep link; display fails when no
    /// resolver matches.
    pub fn open_link(&mut self, link: DeepLink) -> Builder<'_, H> {
        let spec = TransactionSpec::for_link(link, self.default_animations);
        Builder { router: self, spec }
    }

    /// Starts a transaction driven by a deep link, falling back to
    /// `fallback` when no resolver matches.
    pub fn open_link_or(
        &mut self,
        link: DeepLink,
        fallback: Rc<dyn ScreenFactory>,
    ) -> Builder<'_, H> {
        let spec = TransactionSpec::for_link_or(link, fallback, self.default_animations);
        Builder { router: self, spec }
    }

    /// Starts a transaction from a bare URI path, wrapped into a
    /// [`DeepLink`] with no extras.
    pub fn open_path(&mut self, path: &str) -> Builder<'_, H> {
        self.open_link(DeepLink::new(path))
    }

    // ---- Display ----------------------------------------------------------

    fn display(&mut self, spec: TransactionSpec) -> Option<TransactionId> {
        match self.display_spec(spec) {
            Ok(id) => id,
            Err(err) => {
                log::error!("screen transaction failed: {err}");
                None
            }
        }
    }

    fn display_spec(
        &mut self,
        mut spec: TransactionSpec,
    ) -> Result<Option<TransactionId>, RouteError> {
        if self.host.is_none() {
            return Err(RouteError::Unbound);
        }

        self.inject_deep_link(&mut spec);

        if spec.flags.contains(TransactionFlags::CLEAR_HISTORY) {
            self.clear_back_stack();
        }

        // Re-derive the reference directly; hooks and resync run on the
        // back-stack notification, not here.
        self.current = self.retrieve_active();

        let factory = spec.factory.take().ok_or(RouteError::NoTarget)?;
        let screen = factory.instantiate()?;
        if let Some(args) = spec.args.take() {
            screen.set_args(args);
        }

        let skip_history = spec.flags.contains(TransactionFlags::SKIP_HISTORY);
        let replace = spec.flags.contains(TransactionFlags::REPLACE_ACTIVE);
        let Some(host) = self.host.as_mut() else {
            return Err(RouteError::Unbound);
        };

        let entry_tag =
            (!skip_history).then(|| format!("{}{}", self.tag_prefix, host.depth()));
        let transition = if host.supports_scene_transitions() {
            spec.transition
        } else {
            None
        };
        let shared_elements = if transition.is_some() {
            core::mem::take(&mut spec.shared_elements)
        } else {
            Vec::new()
        };

        let id = host.commit(HostTransaction {
            container: self.container,
            screen: screen.clone(),
            entry_tag,
            animations: spec.animations,
            op: if replace {
                ContainerOp::Replace
            } else {
                ContainerOp::Add
            },
            transition,
            shared_elements,
        })?;

        if skip_history {
            // No back-stack notification will fire for this commit, so the
            // reference must move eagerly.
            self.set_current(Some(screen));
        }

        Ok(id)
    }

    fn inject_deep_link(&self, spec: &mut TransactionSpec) {
        let Some(link) = spec.deep_link.take() else {
            return;
        };
        for resolver in &self.resolvers {
            if let Some(target) = resolver.resolve(&link) {
                spec.factory = Some(target.factory);
                let args = spec.args.get_or_insert_with(Args::new);
                args.merge(target.args);
                args.insert(DEEP_LINK_URI, link.uri.as_str());
                break;
            }
        }
    }

    // ---- Closing ----------------------------------------------------------

    /// Pops the top history entry, or runs the host's fallback (e.g. finish)
    /// when the history is empty. The active screen's back-press hook is
    /// bypassed: a programmatic close cannot be vetoed.
    pub fn close(&mut self) {
        self.override_back = true;
        if let Some(host) = self.host.as_mut()
            && host.delegate_back()
        {
            // The host handled the back event synchronously, so the one-shot
            // suppression was logically consumed by it.
            self.override_back = false;
        }
    }

    /// Goes back `n` steps from the top of the history. Degrades to a plain
    /// [`close`](Router::close) when the history holds one entry or fewer;
    /// pops nothing when `n` exceeds the current depth.
    pub fn close_by(&mut self, n: usize) {
        let Some(depth) = self.host.as_ref().map(StackHost::depth) else {
            return;
        };
        if depth > 1 {
            let Some(target) = depth.checked_sub(n) else {
                log::warn!("close_by({n}) exceeds history depth {depth}; nothing popped");
                return;
            };
            let tag = format!("{}{}", self.tag_prefix, target);
            if let Some(host) = self.host.as_mut() {
                host.pop_to_tag(&tag);
            }
        } else {
            self.close();
        }
    }

    /// Pops inclusively back to the entry created by the transaction `id`.
    /// Degrades to a plain [`close`](Router::close) when the history holds
    /// one entry or fewer.
    pub fn close_upto(&mut self, id: TransactionId) {
        let Some(depth) = self.host.as_ref().map(StackHost::depth) else {
            return;
        };
        if depth > 1 {
            if let Some(host) = self.host.as_mut() {
                host.pop_to_id(id);
            }
        } else {
            self.close();
        }
    }

    /// [`close`](Router::close)-by-one, then publishes `response` when one
    /// is supplied.
    pub fn close_with_result(&mut self, response: Option<ResultResponse>) {
        self.close_by_with_result(response, 1);
    }

    /// [`close_by`](Router::close_by), then publishes `response` when one is
    /// supplied. Publication is fire-and-forget: it happens whether or not
    /// the pop found a matching entry.
    pub fn close_by_with_result(&mut self, response: Option<ResultResponse>, n: usize) {
        self.close_by(n);
        if let Some(response) = response {
            self.publisher.publish(response);
        }
    }

    /// [`close_upto`](Router::close_upto), then publishes `response` when
    /// one is supplied.
    pub fn close_upto_with_result(
        &mut self,
        response: Option<ResultResponse>,
        id: TransactionId,
    ) {
        self.close_upto(id);
        if let Some(response) = response {
            self.publisher.publish(response);
        }
    }

    /// Purges the whole back history and drops the active-screen reference
    /// (re-derived on the next resync).
    pub fn clear_back_stack(&mut self) {
        let tag = format!("{}0", self.tag_prefix);
        if let Some(host) = self.host.as_mut() {
            host.pop_to_tag(&tag);
            self.current = None;
        }
    }

    // ---- Queries ----------------------------------------------------------

    /// True when the history is empty (the home screen is showing), or when
    /// no host is bound.
    pub fn is_home(&self) -> bool {
        self.host.as_ref().is_none_or(|h| h.depth() == 0)
    }

    /// The screen the router currently considers active.
    pub fn current_screen(&self) -> Option<&ScreenHandle> {
        self.current.as_ref()
    }

    // ---- Event entry points -----------------------------------------------

    /// Host glue calls this after every back-stack mutation, conventionally
    /// on the next event-loop turn. Re-derives the active screen and resyncs
    /// chrome when it changed.
    pub fn on_back_stack_changed(&mut self) {
        let screen = self.retrieve_active();
        self.set_current(screen);
    }

    /// Platform back-press entry point. Returns `true` when the active
    /// screen's capability consumed the event (the caller must not perform
    /// its default back behavior). A pending programmatic close suppresses
    /// the hook for exactly one event.
    pub fn on_back_pressed(&mut self) -> bool {
        if !self.override_back
            && let Some(routed) = self.current.as_ref().and_then(|s| s.routed())
            && routed.on_back_pressed()
        {
            return true;
        }
        self.override_back = false;
        false
    }

    /// Toolbar navigation-icon entry point. The active screen's capability
    /// may consume the click; otherwise this is a plain close.
    pub fn on_navigation_icon_clicked(&mut self) {
        let handled = self
            .current
            .as_ref()
            .and_then(|s| s.routed())
            .is_some_and(|routed| routed.on_navigation_icon_click());
        if !handled {
            self.close();
        }
    }

    // ---- Resync -----------------------------------------------------------

    fn retrieve_active(&self) -> Option<ScreenHandle> {
        self.host
            .as_ref()
            .and_then(|host| host.screen_in(self.container))
    }

    fn set_current(&mut self, new: Option<ScreenHandle>) {
        let unchanged = match (&self.current, &new) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        if let Some(old) = &self.current
            && let Some(routed) = old.routed()
        {
            routed.on_hidden();
        }
        self.current = new;
        if let Some(cur) = &self.current
            && let Some(routed) = cur.routed()
        {
            routed.on_shown();
        }

        self.sync_screen_state();
    }

    /// Recomputes and pushes the full chrome state from the active screen.
    /// Idempotent and total: screens without the navigation capability yield
    /// the documented defaults.
    pub fn sync_screen_state(&mut self) {
        let routed = self.current.as_ref().and_then(|s| s.routed());
        let orientation = routed.map_or(Orientation::Unspecified, |r| r.orientation());
        let color = routed.and_then(|r| r.navigation_bar_color());

        if let Some(host) = self.host.as_mut() {
            host.active_screen_changed(self.current.as_ref());
            host.set_orientation(orientation);
            host.set_navigation_bar_color(color);
        }

        self.sync_toolbar_state();
        self.sync_drawer_state();
    }

    fn sync_toolbar_state(&mut self) {
        let Some(toolbar) = self.toolbar.as_mut() else {
            return;
        };
        let routed = self.current.as_ref().and_then(|s| s.routed());

        let icon = routed.map_or(NavigationIconType::Hidden, |r| r.navigation_icon_type());
        if icon == NavigationIconType::Custom {
            toolbar.set_custom_navigation_icon(routed.and_then(|r| r.navigation_icon()));
        } else {
            toolbar.set_navigation_icon(icon);
        }

        toolbar.set_toolbar_visible(routed.is_none_or(|r| r.toolbar_visible()));

        let title = routed.and_then(|r| r.title());
        toolbar.set_title(title.as_deref().unwrap_or(""));
    }

    fn sync_drawer_state(&mut self) {
        let Some(drawer) = self.drawer.as_mut() else {
            return;
        };
        let enabled = self
            .current
            .as_ref()
            .and_then(|s| s.routed())
            .is_none_or(|r| r.drawer_enabled());
        drawer.set_drawer_enabled(enabled);
    }
}

/// Fluent assembly of one screen transition, bound to its router.
///
/// Every setter returns the builder for chaining; [`display`](Builder::display)
/// and [`display_for_result`](Builder::display_for_result) consume it and
/// commit.
pub struct Builder<'a, H: StackHost> {
    router: &'a mut Router<H>,
    spec: TransactionSpec,
}

impl<H: StackHost> core::fmt::Debug for Builder<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Builder")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

impl<H: StackHost> Builder<'_, H> {
    /// Sets the construction arguments for the screen to be displayed.
    pub fn args(mut self, args: Args) -> Self {
        self.spec.args = Some(args);
        self
    }

    /// Don't record a history entry for this transition; it cannot be
    /// popped, and the router updates its active-screen reference eagerly.
    pub fn skip_history(mut self, skip: bool) -> Self {
        self.spec.flags.set(TransactionFlags::SKIP_HISTORY, skip);
        self
    }

    /// Purge the whole back history before committing this transition.
    pub fn clear_history(mut self, clear: bool) -> Self {
        self.spec.flags.set(TransactionFlags::CLEAR_HISTORY, clear);
        self
    }

    /// Replace the container content instead of stacking on top of it.
    pub fn replace_active(mut self, replace: bool) -> Self {
        self.spec.flags.set(TransactionFlags::REPLACE_ACTIVE, replace);
        self
    }

    /// Animations for the common case: `enter` plays when this transition
    /// commits, `exit` plays when it is popped.
    pub fn animations(self, enter: AnimRes, exit: AnimRes) -> Self {
        self.animations_full(enter, AnimRes::NONE, AnimRes::NONE, exit)
    }

    /// All four animation edges explicitly.
    pub fn animations_full(
        mut self,
        enter: AnimRes,
        exit: AnimRes,
        pop_enter: AnimRes,
        pop_exit: AnimRes,
    ) -> Self {
        self.spec.animations = Animations {
            enter,
            exit,
            pop_enter,
            pop_exit,
        };
        self
    }

    /// No animations for this transition.
    pub fn no_animations(self) -> Self {
        self.animations_full(AnimRes::NONE, AnimRes::NONE, AnimRes::NONE, AnimRes::NONE)
    }

    /// Scene-transition metadata plus the shared elements carried across.
    /// Dropped at commit time when the host platform lacks support.
    pub fn transition(mut self, transition: TransitionSpec, shared: Vec<SharedElement>) -> Self {
        self.spec.transition = Some(transition);
        self.spec.shared_elements = shared;
        self
    }

    /// Commits the transition. Returns the identifier of the history entry
    /// it created, or `None` for skip-history commits and for failures
    /// (which are logged, never raised).
    pub fn display(self) -> Option<TransactionId> {
        self.router.display(self.spec)
    }

    /// Embeds a result request for `requester_id`/`request_code` into the
    /// arguments (creating them when absent), then commits like
    /// [`display`](Builder::display). An empty `requester_id` skips the
    /// embed.
    pub fn display_for_result(
        mut self,
        requester_id: &str,
        request_code: i32,
    ) -> Option<TransactionId> {
        if !requester_id.is_empty() {
            let args = self.spec.args.get_or_insert_with(Args::new);
            ResultRequest {
                requester_id: requester_id.into(),
                request_code,
            }
            .embed(args);
        }
        self.router.display(self.spec)
    }
}
