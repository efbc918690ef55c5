// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Gatehouse.
//!
//! Every outbound client built through this crate carries the same
//! User-Agent header so directory operators can attribute traffic.

mod client;

pub use client::{builder, build_client_with_timeout, user_agent};
