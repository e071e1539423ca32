// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: identifiers, resource handles, chrome state, and the screen
//! collaborator traits.
//!
//! ## Overview
//!
//! These types describe what the [router](crate::router) exchanges with its
//! collaborators. Resource handles ([`AnimRes`], [`IconRes`],
//! [`TransitionRes`], [`ViewId`]) are opaque newtypes: resolving them to real
//! platform resources is the host toolkit's job, never this crate's.

use alloc::rc::Rc;
use alloc::string::String;

use crate::args::Args;

/// Identifier of the container view the router displays screens in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ContainerId(pub u32);

/// Opaque identifier of a committed, history-tracked transaction.
///
/// Returned by [`Builder::display`](crate::router::Builder::display) and
/// accepted by [`Router::close_upto`](crate::router::Router::close_upto) to
/// pop back to the entry the transaction created.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TransactionId(pub u64);

/// Animation resource handle for a transition edge.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AnimRes(pub i32);

impl AnimRes {
    /// No animation.
    pub const NONE: Self = Self(0);
}

/// The four animation resources applied to one transaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Animations {
    /// Played on the incoming screen when the transaction commits.
    pub enter: AnimRes,
    /// Played on the outgoing screen when the transaction commits.
    pub exit: AnimRes,
    /// Played on the returning screen when the entry is popped.
    pub pop_enter: AnimRes,
    /// Played on the departing screen when the entry is popped.
    pub pop_exit: AnimRes,
}

impl Animations {
    /// All four edges set to [`AnimRes::NONE`].
    pub const NONE: Self = Self {
        enter: AnimRes::NONE,
        exit: AnimRes::NONE,
        pop_enter: AnimRes::NONE,
        pop_exit: AnimRes::NONE,
    };
}

impl Default for Animations {
    fn default() -> Self {
        Self::NONE
    }
}

/// Scene-transition resource handles attached to a transaction.
///
/// Only forwarded to the host when
/// [`StackHost::supports_scene_transitions`](crate::host::StackHost::supports_scene_transitions)
/// reports support.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TransitionSpec {
    /// Transition for the incoming screen.
    pub enter: TransitionRes,
    /// Transition for the outgoing screen.
    pub exit: TransitionRes,
    /// Transition for shared elements entering the new screen.
    pub shared_enter: TransitionRes,
    /// Transition for shared elements returning on pop.
    pub shared_return: TransitionRes,
}

/// Scene-transition resource handle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TransitionRes(pub i32);

/// Opaque handle to a view participating in a shared-element transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewId(pub u64);

/// A view/name pair carried across a shared-element transition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SharedElement {
    /// The view being shared between the outgoing and incoming screens.
    pub view: ViewId,
    /// The transition name correlating the view on both sides.
    pub name: String,
}

/// Requested screen orientation for the host window.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Orientation {
    /// No preference; the host keeps its current behavior.
    #[default]
    Unspecified,
    /// Lock to portrait.
    Portrait,
    /// Lock to landscape.
    Landscape,
    /// Follow the device sensor.
    Sensor,
}

/// ARGB color pushed to the host's navigation bar.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Color(pub u32);

/// The kind of navigation icon the toolbar should show.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum NavigationIconType {
    /// No navigation icon. The default when a screen opts out or has no
    /// [`RoutedScreen`] capability.
    #[default]
    Hidden,
    /// The standard back arrow.
    Back,
    /// The drawer/menu affordance.
    Menu,
    /// A screen-supplied image; see [`RoutedScreen::navigation_icon`].
    Custom,
}

/// Icon resource handle for a custom navigation icon.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IconRes(pub i32);

/// Shared handle to a screen instance.
///
/// Screens are owned by the host's container; the router only observes them.
/// Identity (used to detect "the active screen did not change") is handle
/// identity via [`Rc::ptr_eq`].
pub type ScreenHandle = Rc<dyn Screen>;

/// A displayable screen.
///
/// The router attaches construction arguments right after instantiating a
/// screen and before committing the transaction; screens keep them for their
/// whole lifetime so a closing screen can rebuild its result linkage from
/// them. Methods take `&self` because screens are shared [`Rc`] handles;
/// implementations use `Cell`/`RefCell` internally (everything runs on the
/// single UI thread).
pub trait Screen {
    /// Stores the construction arguments attached by the router.
    fn set_args(&self, args: Args);

    /// Returns a copy of the construction arguments, if any were attached.
    fn args(&self) -> Option<Args>;

    /// The extended navigation capability, when this screen implements it.
    ///
    /// Returning `None` makes the router apply the defaults documented on
    /// [`RoutedScreen`].
    fn routed(&self) -> Option<&dyn RoutedScreen> {
        None
    }
}

/// Optional per-screen navigation capability.
///
/// Every method has a default matching the chrome state the router applies
/// when the capability is absent entirely, so implementors override only what
/// they care about.
pub trait RoutedScreen {
    /// Requested orientation while this screen is visible.
    fn orientation(&self) -> Orientation {
        Orientation::Unspecified
    }

    /// Navigation-bar color override while this screen is visible.
    fn navigation_bar_color(&self) -> Option<Color> {
        None
    }

    /// Which navigation icon the toolbar should show.
    fn navigation_icon_type(&self) -> NavigationIconType {
        NavigationIconType::Hidden
    }

    /// The custom icon image, consulted only when
    /// [`navigation_icon_type`](Self::navigation_icon_type) is
    /// [`NavigationIconType::Custom`].
    fn navigation_icon(&self) -> Option<IconRes> {
        None
    }

    /// Toolbar title while this screen is visible.
    fn title(&self) -> Option<String> {
        None
    }

    /// Whether the toolbar is visible at all.
    fn toolbar_visible(&self) -> bool {
        true
    }

    /// Whether the side drawer may be opened.
    fn drawer_enabled(&self) -> bool {
        true
    }

    /// Called when this screen becomes the active screen.
    fn on_shown(&self) {}

    /// Called when this screen stops being the active screen.
    fn on_hidden(&self) {}

    /// Back-press hook. Return `true` to consume the event (the router will
    /// not pop); the suppression is bypassed during a programmatic
    /// [`close`](crate::router::Router::close).
    fn on_back_pressed(&self) -> bool {
        false
    }

    /// Toolbar navigation-icon hook. Return `true` to consume the click,
    /// otherwise the router performs a plain close.
    fn on_navigation_icon_click(&self) -> bool {
        false
    }
}

/// Produces fresh screen instances for a transaction.
///
/// A factory stands in for the original "screen type": it is consulted once
/// per committed transaction and must hand back a brand-new instance each
/// time. Any `Fn() -> Result<ScreenHandle, InstantiationError>` closure is a
/// factory.
pub trait ScreenFactory {
    /// Creates a new instance of the target screen.
    fn instantiate(&self) -> Result<ScreenHandle, InstantiationError>;
}

impl<F> ScreenFactory for F
where
    F: Fn() -> Result<ScreenHandle, InstantiationError>,
{
    fn instantiate(&self) -> Result<ScreenHandle, InstantiationError> {
        self()
    }
}

/// Failure to construct a target screen.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("screen instantiation failed: {reason}")]
pub struct InstantiationError {
    /// Factory-supplied description of what went wrong.
    pub reason: String,
}

impl InstantiationError {
    /// Create an error from a reason string.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Convenience for building a [`ScreenFactory`] trait object from a closure.
pub fn factory_fn<F>(f: F) -> Rc<dyn ScreenFactory>
where
    F: Fn() -> Result<ScreenHandle, InstantiationError> + 'static,
{
    Rc::new(f)
}

/// Toolbar adapter the router pushes display instructions to.
///
/// Stateless from the router's point of view: after every transition the
/// router re-pushes the full icon/title/visibility set. The toolkit glue that
/// owns the real toolbar is expected to forward navigation-icon clicks to
/// [`Router::on_navigation_icon_clicked`](crate::router::Router::on_navigation_icon_clicked).
pub trait ToolbarHandler {
    /// Show one of the stock navigation icons (or hide it).
    fn set_navigation_icon(&mut self, icon: NavigationIconType);

    /// Show a screen-supplied navigation icon image.
    fn set_custom_navigation_icon(&mut self, icon: Option<IconRes>);

    /// Set the toolbar title.
    fn set_title(&mut self, title: &str);

    /// Show or hide the whole toolbar.
    fn set_toolbar_visible(&mut self, visible: bool);
}

/// Side-drawer adapter the router pushes display instructions to.
pub trait DrawerHandler {
    /// Enable or disable opening the drawer.
    fn set_drawer_enabled(&mut self, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    struct Plain;

    impl Screen for Plain {
        fn set_args(&self, _args: Args) {}
        fn args(&self) -> Option<Args> {
            None
        }
    }

    struct WithCapability;

    impl RoutedScreen for WithCapability {}

    #[test]
    fn capability_defaults_match_absent_capability_state() {
        let r = WithCapability;
        assert_eq!(r.orientation(), Orientation::Unspecified);
        assert_eq!(r.navigation_bar_color(), None);
        assert_eq!(r.navigation_icon_type(), NavigationIconType::Hidden);
        assert_eq!(r.navigation_icon(), None);
        assert_eq!(r.title(), None);
        assert!(r.toolbar_visible());
        assert!(r.drawer_enabled());
        assert!(!r.on_back_pressed());
        assert!(!r.on_navigation_icon_click());
    }

    #[test]
    fn screens_opt_out_of_the_capability_by_default() {
        let s = Plain;
        assert!(s.routed().is_none());
    }

    #[test]
    fn closure_factories_implement_screen_factory() {
        let factory = factory_fn(|| Ok(Rc::new(Plain) as ScreenHandle));
        assert!(factory.instantiate().is_ok());

        let failing = factory_fn(|| Err(InstantiationError::new("missing resources")));
        let err = failing.instantiate().err().unwrap();
        assert_eq!(err.reason, "missing resources".to_string());
    }

    #[test]
    fn handle_identity_is_per_instance() {
        let a: ScreenHandle = Rc::new(Plain);
        let b: ScreenHandle = Rc::new(Plain);
        assert!(Rc::ptr_eq(&a, &a.clone()));
        assert!(!Rc::ptr_eq(&a, &b));
    }
}
