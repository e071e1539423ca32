// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router basics.
//!
//! This minimal example stacks a few screens in an in-memory host, pumps the
//! back-stack notifications, and walks back through the history with the
//! close family.
//!
//! Run:
//! - `cargo run -p screenflow_demos --example navigation_basics`

use screenflow_router::adapters::memory::{BasicScreen, MemoryHost, drain_stack_changes};
use screenflow_router::host::StackHost;
use screenflow_router::results::{ResultResponse, ResultsPublisher};
use screenflow_router::router::Router;
use screenflow_router::types::ContainerId;

struct NullPublisher;
impl ResultsPublisher for NullPublisher {
    fn publish(&self, _response: ResultResponse) {}
}

fn report(router: &Router<MemoryHost>) {
    println!(
        "  depth={}  home={}  active={}",
        router.host().map_or(0, StackHost::depth),
        router.is_home(),
        if router.current_screen().is_some() {
            "<screen>"
        } else {
            "<none>"
        },
    );
}

fn main() {
    let mut router = Router::new(ContainerId(1), Box::new(NullPublisher));
    router.set_host(Some(MemoryHost::new(ContainerId(1))));

    println!("== Stack three screens ==");
    router.open(BasicScreen::factory("home")).display();
    router.open(BasicScreen::factory("list")).display();
    let detail = router.open(BasicScreen::factory("detail")).display();
    drain_stack_changes(&mut router);
    report(&router);

    println!("== close() pops one entry ==");
    router.close();
    drain_stack_changes(&mut router);
    report(&router);

    println!("== Re-open detail, then close_upto its transaction ==");
    let detail = detail.and_then(|_| router.open(BasicScreen::factory("detail")).display());
    router.open(BasicScreen::factory("viewer")).display();
    drain_stack_changes(&mut router);
    if let Some(id) = detail {
        router.close_upto(id);
        drain_stack_changes(&mut router);
    }
    report(&router);

    println!("== A fresh start via clear_history ==");
    router
        .open(BasicScreen::factory("onboarding"))
        .clear_history(true)
        .display();
    drain_stack_changes(&mut router);
    report(&router);
}
