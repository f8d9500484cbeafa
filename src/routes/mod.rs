// ABOUTME: Route module organization for Paceify HTTP endpoints
// ABOUTME: Domain routers plus shared request body handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for Paceify
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the service layer.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::errors::{AppError, AppResult, ErrorCode};

/// Spotify OAuth login and code exchange routes
pub mod auth;
/// Cadence filtering and pace table routes
pub mod filter;
/// Health check and readiness routes
pub mod health;
/// Playlist creation and listing routes
pub mod playlists;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Filter route handlers
pub use filter::FilterRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Playlist route handlers
pub use playlists::PlaylistRoutes;

/// Unwrap a JSON body, reporting malformed input as `INVALID_FORMAT` (400)
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        AppError::new(
            ErrorCode::InvalidFormat,
            format!("Invalid request body: {}", rejection.body_text()),
        )
    })
}
