// ABOUTME: Route handlers for playlist creation and listing
// ABOUTME: Both routes forward the caller's bearer token to the catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::errors::AppError;
use crate::middleware::require_access_token;
use crate::resources::ServerResources;
use crate::routes::json_body;
use crate::services::playlists::{create_playlist, list_playlists, CreatePlaylistRequest};

/// Playlist routes handler
pub struct PlaylistRoutes;

impl PlaylistRoutes {
    /// Create all playlist routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/playlists", get(Self::handle_list))
            .route("/playlists/create", post(Self::handle_create))
            .with_state(resources)
    }

    /// Handle GET /playlists
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = require_access_token(&headers)?;
        let playlists = list_playlists(resources.catalog.as_ref(), &token).await?;
        Ok((StatusCode::OK, Json(playlists)).into_response())
    }

    /// Handle POST /playlists/create
    ///
    /// The token is checked before the body.
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<CreatePlaylistRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let token = require_access_token(&headers)?;
        let request = json_body(payload)?;
        let created = create_playlist(resources.catalog.as_ref(), &token, &request).await?;
        Ok((StatusCode::OK, Json(created)).into_response())
    }
}
