// ABOUTME: Route handlers for the Spotify OAuth PKCE login flow
// ABOUTME: GET /auth/login issues an authorization URL and verifier; POST /auth/token exchanges the code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication routes
//!
//! The browser keeps the PKCE verifier between the two calls; the server
//! holds no login state.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::routes::json_body;

/// Body of `POST /auth/token`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExchangeRequest {
    /// Authorization code from the redirect
    pub code: Option<String>,
    /// Verifier issued by `/auth/login`
    pub code_verifier: Option<String>,
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/login", get(Self::handle_login))
            .route("/auth/token", post(Self::handle_token))
            .with_state(resources)
    }

    /// Handle GET /auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let login = resources.require_oauth_client()?.begin_login()?;
        Ok((StatusCode::OK, Json(login)).into_response())
    }

    /// Handle POST /auth/token
    async fn handle_token(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<TokenExchangeRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let (Some(code), Some(code_verifier)) =
            (non_blank(request.code), non_blank(request.code_verifier))
        else {
            return Err(AppError::missing_field("Missing code or codeVerifier"));
        };

        let grant = resources
            .require_oauth_client()?
            .exchange_code(&code, &code_verifier)
            .await?;
        Ok((StatusCode::OK, Json(grant)).into_response())
    }
}
