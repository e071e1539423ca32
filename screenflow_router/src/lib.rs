// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screenflow Router: screen-stack navigation for a single-container UI host.
//!
//! ## Overview
//!
//! This crate coordinates swapping visible screens inside one container view.
//! It translates a display request into a reversible back-history entry,
//! resolves close/pop requests against that history, resynchronizes chrome
//! state (toolbar, drawer, orientation) with the screen that ends up visible,
//! and threads a typed result payload back to the screen that asked for one.
//! It does not render anything and it does not own the back-stack storage:
//! both live behind the [`StackHost`](crate::host::StackHost) collaborator.
//!
//! ## Inputs
//!
//! Bind a [`Router`](crate::router::Router) to a host with
//! [`set_host`](crate::router::Router::set_host), then ask it to
//! [`open`](crate::router::Router::open) a target. That yields a
//! [`Builder`](crate::router::Builder) which assembles a one-shot
//! [`TransactionSpec`](crate::transaction::TransactionSpec): arguments,
//! animations, history policy, optional shared-element transition, and an
//! optional result-request linkage.
//!
//! ## History and addressing
//!
//! Every stacked transition adds a history entry addressed by
//! `tag_prefix + depth`, so entries are monotonically increasing and targeted
//! pops recompute the address from the current depth.
//! [`close_by`](crate::router::Router::close_by) means "go back `n` steps
//! from the top"; with one entry or fewer it degrades to a plain
//! [`close`](crate::router::Router::close), which delegates to the host's own
//! back handling (pop, or the host's fallback such as finishing).
//!
//! ## Chrome resync
//!
//! The router's visible configuration is entirely derived from the active
//! screen and its optional [`RoutedScreen`](crate::types::RoutedScreen)
//! capability. [`sync_screen_state`](crate::router::Router::sync_screen_state)
//! is idempotent and total: it recomputes orientation, navigation-bar color,
//! toolbar icon/title/visibility, and drawer enablement from scratch on every
//! run. Screens without the capability get the documented defaults.
//!
//! ## Results
//!
//! Opening "for results" embeds a [`ResultRequest`](crate::results::ResultRequest)
//! under a reserved argument key. When the opened screen closes, it rebuilds a
//! [`ResultResponse`](crate::results::ResultResponse) from its own arguments
//! via [`response_for`](crate::results::response_for) and hands it to
//! [`close_by_with_result`](crate::router::Router::close_by_with_result),
//! which pops first and then publishes through the router's
//! [`ResultsPublisher`](crate::results::ResultsPublisher).
//!
//! ## Threading
//!
//! Strictly single-threaded: every operation runs on the host UI thread.
//! Back-stack change notifications may arrive on a later loop turn, so the
//! active-screen reference can lag the container by one turn for stacked
//! transitions; skip-history transitions update it eagerly because no
//! notification will come.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod args;
pub mod deeplink;
pub mod host;
pub mod results;
pub mod router;
pub mod transaction;
pub mod types;
