// ABOUTME: Bearer token extraction for catalog-backed routes
// ABOUTME: The caller's Spotify token is forwarded per request and never stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use http::{header::AUTHORIZATION, HeaderMap};
use paceify_providers::AccessToken;

use crate::errors::{AppError, AppResult};

/// Extract the bearer token from an `Authorization` header value
///
/// Returns `None` unless the value is `Bearer <token>` with a non-empty token.
#[must_use]
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Access token carried by the request
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` (401) if the header is missing, not valid UTF-8,
/// or not a bearer credential
pub fn require_access_token(headers: &HeaderMap) -> AppResult<AccessToken> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer_token)
        .map(AccessToken::new)
        .ok_or_else(AppError::auth_required)
}
