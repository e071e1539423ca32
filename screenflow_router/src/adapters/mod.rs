// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters for hosts that are not a real UI platform.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(any(test, feature = "memory_adapter"))]
pub mod memory;
