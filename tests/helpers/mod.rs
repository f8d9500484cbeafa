// ABOUTME: Shared test helpers for Paceify integration tests
// ABOUTME: Router request helpers and fake upstream HTTP servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod axum_test;
pub mod fake_upstream;
