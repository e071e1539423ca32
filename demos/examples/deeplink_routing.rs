// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deep-link dispatch.
//!
//! Two resolvers are installed; the first one claiming a link wins and may
//! rewrite the transaction's target and arguments. A fallback target covers
//! links nobody claims.
//!
//! Run:
//! - `cargo run -p screenflow_demos --example deeplink_routing`

use screenflow_router::adapters::memory::{BasicScreen, MemoryHost, drain_stack_changes};
use screenflow_router::args::Args;
use screenflow_router::deeplink::{DeepLink, DeepLinkResolver, ResolvedTarget};
use screenflow_router::results::{ResultResponse, ResultsPublisher};
use screenflow_router::router::Router;
use screenflow_router::types::ContainerId;

struct NullPublisher;
impl ResultsPublisher for NullPublisher {
    fn publish(&self, _response: ResultResponse) {}
}

/// Claims `app://profile/<user>` links.
struct ProfileResolver;
impl DeepLinkResolver for ProfileResolver {
    fn resolve(&self, link: &DeepLink) -> Option<ResolvedTarget> {
        let user = link.uri.strip_prefix("app://profile/")?;
        let mut args = Args::new();
        args.insert("user", user);
        Some(ResolvedTarget {
            factory: BasicScreen::factory("profile"),
            args,
        })
    }
}

/// Claims `app://settings` links.
struct SettingsResolver;
impl DeepLinkResolver for SettingsResolver {
    fn resolve(&self, link: &DeepLink) -> Option<ResolvedTarget> {
        (link.uri == "app://settings").then(|| ResolvedTarget {
            factory: BasicScreen::factory("settings"),
            args: Args::new(),
        })
    }
}

fn main() {
    let mut router = Router::new(ContainerId(1), Box::new(NullPublisher));
    router.set_host(Some(MemoryHost::new(ContainerId(1))));
    router.set_resolvers(vec![Box::new(ProfileResolver), Box::new(SettingsResolver)]);

    println!("== app://profile/ada resolves to the profile screen ==");
    router.open_path("app://profile/ada").display();
    drain_stack_changes(&mut router);
    let user = router
        .current_screen()
        .and_then(|s| s.args())
        .and_then(|a| a.get_str("user").map(str::to_owned));
    println!("  routed with user={:?}", user.as_deref().unwrap_or("<none>"));

    println!("== Unclaimed link falls back to the supplied target ==");
    let id = router
        .open_link_or(
            DeepLink::new("app://not-registered"),
            BasicScreen::factory("fallback"),
        )
        .display();
    drain_stack_changes(&mut router);
    println!("  committed: {}", id.is_some());

    println!("== Unclaimed link without a fallback fails cleanly ==");
    let id = router.open_path("app://also-not-registered").display();
    println!("  committed: {}", id.is_some());
}
