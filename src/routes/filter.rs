// ABOUTME: Route handlers for cadence filtering and the pace conversion table
// ABOUTME: POST /filter matches catalog tracks to a pace or cadence; GET /filter/pace-table lists conversions
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
use paceify_tempo::PaceTable;

use crate::errors::AppError;
use crate::middleware::require_access_token;
use crate::resources::ServerResources;
use crate::routes::json_body;
use crate::services::filter::{filter_tracks, FilterRequest};

/// Filter routes handler
pub struct FilterRoutes;

impl FilterRoutes {
    /// Create all filter routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/filter", post(Self::handle_filter))
            .route("/filter/pace-table", get(Self::handle_pace_table))
            .with_state(resources)
    }

    /// Handle POST /filter
    ///
    /// The body is validated before the token is checked, so malformed
    /// requests get a 400 even without credentials.
    async fn handle_filter(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<FilterRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        request.validate(resources.config.tempo.default_tolerance)?;
        let token = require_access_token(&headers)?;

        let report = filter_tracks(
            resources.catalog.as_ref(),
            &resources.estimator,
            &resources.config,
            &token,
            &request,
        )
        .await?;

        Ok((StatusCode::OK, Json(report)).into_response())
    }

    /// Handle GET /filter/pace-table
    async fn handle_pace_table(State(resources): State<Arc<ServerResources>>) -> Response {
        (StatusCode::OK, Json(PaceTable::build(&resources.estimator))).into_response()
    }
}
