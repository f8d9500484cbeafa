// ABOUTME: HTTP middleware for the Paceify API
// ABOUTME: Cross-origin configuration and bearer token extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Bearer token extraction
pub mod auth;
/// CORS layer built from configuration
pub mod cors;

pub use auth::{extract_bearer_token, require_access_token};
pub use cors::setup_cors;
