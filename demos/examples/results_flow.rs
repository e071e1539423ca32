// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opening a screen for a result.
//!
//! A "form" screen is opened with a result request embedded in its arguments.
//! When it closes, it rebuilds the response from those same arguments and the
//! router publishes it after the pop.
//!
//! Run:
//! - `cargo run -p screenflow_demos --example results_flow`

use screenflow_router::adapters::memory::{BasicScreen, MemoryHost, drain_stack_changes};
use screenflow_router::args::Args;
use screenflow_router::results::{ResultResponse, ResultsPublisher, response_for};
use screenflow_router::router::Router;
use screenflow_router::types::ContainerId;

struct PrintPublisher;
impl ResultsPublisher for PrintPublisher {
    fn publish(&self, response: ResultResponse) {
        println!(
            "  published: requester={}  code={}  result={}  name={:?}",
            response.requester_id,
            response.request_code,
            response.result_code,
            response
                .data
                .as_ref()
                .and_then(|d| d.get_str("name"))
                .unwrap_or("<none>"),
        );
    }
}

const PICK_CONTACT: i32 = 42;
const RESULT_OK: i32 = 1;

fn main() {
    let mut router = Router::new(ContainerId(1), Box::new(PrintPublisher));
    router.set_host(Some(MemoryHost::new(ContainerId(1))));

    println!("== Requester opens the picker for a result ==");
    router.open(BasicScreen::factory("requester")).display();
    router
        .open(BasicScreen::factory("picker"))
        .display_for_result("requester-1", PICK_CONTACT);
    drain_stack_changes(&mut router);

    println!("== Picker closes with a payload ==");
    // The closing screen interprets its own arguments; no registry exists.
    let own_args = router.current_screen().and_then(|screen| screen.args());
    let mut data = Args::new();
    data.insert("name", "Ada Lovelace");
    let response = response_for(own_args.as_ref(), RESULT_OK, Some(data));
    router.close_with_result(response);
    drain_stack_changes(&mut router);

    println!(
        "== Back on the requester (depth {}) ==",
        router.host().map_or(0, screenflow_router::host::StackHost::depth),
    );
}
