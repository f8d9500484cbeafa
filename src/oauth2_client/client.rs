// ABOUTME: OAuth2 client for the Spotify accounts service using PKCE
// ABOUTME: Builds authorization URLs and exchanges authorization codes for tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use paceify_providers::{shared_client, ProviderError};
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};
use url::Url;

use crate::config::SpotifyApiConfig;
use crate::constants::oauth::{CODE_CHALLENGE_METHOD, CODE_VERIFIER_LENGTH};
use crate::constants::service_names;
use crate::errors::{AppError, AppResult, ErrorCode};

/// OAuth 2.0 public client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OAuth2Config {
    /// OAuth client ID from the Spotify dashboard
    pub client_id: String,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Redirect URI registered for the client
    pub redirect_uri: String,
    /// OAuth scopes to request
    pub scopes: Vec<String>,
}

impl OAuth2Config {
    /// Build from the Spotify section of the server configuration
    ///
    /// Returns `None` when no client id is configured.
    #[must_use]
    pub fn from_spotify(config: &SpotifyApiConfig) -> Option<Self> {
        config.client_id.as_ref().map(|client_id| Self {
            client_id: client_id.clone(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scopes: config.scopes.clone(),
        })
    }
}

/// `PKCE` (Proof Key for Code Exchange) parameters for enhanced `OAuth2` security
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceParams {
    /// Randomly generated code verifier (43-128 characters)
    pub code_verifier: String,
    /// SHA256 hash of code verifier, base64url encoded
    pub code_challenge: String,
    /// Challenge method (always "S256" for SHA256)
    pub code_challenge_method: String,
}

impl PkceParams {
    /// Generate `PKCE` parameters with `S256` challenge method
    #[must_use]
    pub fn generate() -> Self {
        const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
        let mut rng = rand::thread_rng();
        let code_verifier: String = (0..CODE_VERIFIER_LENGTH)
            .map(|_| char::from(CHARS[rng.gen_range(0..CHARS.len())]))
            .collect();
        Self::from_verifier(code_verifier)
    }

    /// Derive the `S256` challenge for a known verifier
    #[must_use]
    pub fn from_verifier(code_verifier: impl Into<String>) -> Self {
        let code_verifier = code_verifier.into();
        let code_challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(code_verifier.as_bytes()));
        Self {
            code_verifier,
            code_challenge,
            code_challenge_method: CODE_CHALLENGE_METHOD.to_owned(),
        }
    }
}

/// What `/auth/login` hands to the browser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    /// Authorization URL to redirect the user to
    pub url: String,
    /// Verifier the browser must send back with the code
    pub code_verifier: String,
}

/// Tokens returned to the browser after a successful exchange
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenGrant {
    /// Bearer token for catalog calls
    pub access_token: String,
    /// Refresh token, when issued
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    pub expires_in: Option<u64>,
}

/// Raw token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
}

/// Spotify accounts service client
pub struct SpotifyOAuthClient {
    config: OAuth2Config,
    client: Client,
}

impl SpotifyOAuthClient {
    /// Create a client over the shared HTTP client
    #[must_use]
    pub fn new(config: OAuth2Config) -> Self {
        Self::with_client(config, shared_client().clone())
    }

    /// Create a client over a specific HTTP client
    #[must_use]
    pub const fn with_client(config: OAuth2Config, client: Client) -> Self {
        Self { config, client }
    }

    /// Get the `OAuth2` configuration
    #[must_use]
    pub const fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// Authorization `URL` with a `PKCE` challenge
    ///
    /// `show_dialog=true` forces the consent screen so a different account can
    /// be picked.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorization URL is malformed
    pub fn authorization_url(&self, pkce: &PkceParams) -> AppResult<String> {
        let mut url = Url::parse(&self.config.auth_url).map_err(|e| {
            AppError::config(format!("Invalid SPOTIFY_AUTH_URL '{}': {e}", self.config.auth_url))
        })?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("code_challenge_method", &pkce.code_challenge_method)
            .append_pair("code_challenge", &pkce.code_challenge)
            .append_pair("show_dialog", "true");

        Ok(url.to_string())
    }

    /// Start a login: fresh verifier plus the matching authorization URL
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorization URL is malformed
    pub fn begin_login(&self) -> AppResult<AuthorizationRequest> {
        let pkce = PkceParams::generate();
        let url = self.authorization_url(&pkce)?;
        info!("Issued Spotify authorization URL");
        Ok(AuthorizationRequest {
            url,
            code_verifier: pkce.code_verifier,
        })
    }

    /// Exchange an authorization code and its verifier for tokens
    ///
    /// # Errors
    ///
    /// Returns an error if the token endpoint is unreachable, rejects the
    /// exchange, or answers with an unreadable body. Rejections keep the
    /// upstream status and carry the upstream body in the error details.
    #[instrument(skip_all, fields(provider = service_names::SPOTIFY, oauth.event = "code_exchange"))]
    pub async fn exchange_code(&self, code: &str, code_verifier: &str) -> AppResult<TokenGrant> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("code_verifier", code_verifier),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::from(ProviderError::from(e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(status = status.as_u16(), "Spotify token exchange rejected");
            return Err(Self::rejection(status.as_u16(), &body));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::new(
                ErrorCode::ExternalServiceError,
                format!("Unreadable token response from Spotify: {e}"),
            )
        })?;

        info!(oauth.success = true, "Spotify token exchange succeeded");
        Ok(TokenGrant {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
        })
    }

    /// Turn a token endpoint rejection into an error keeping the upstream status
    fn rejection(status: u16, body: &str) -> AppError {
        let upstream: Value =
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()));
        let message = upstream
            .get("error_description")
            .or_else(|| upstream.get("error"))
            .and_then(Value::as_str)
            .map_or_else(
                || format!("Spotify token exchange failed with status {status}"),
                str::to_owned,
            );

        AppError::from(ProviderError::ApiError {
            provider: service_names::SPOTIFY.to_owned(),
            status_code: status,
            message,
            retryable: status >= 500,
        })
        .with_details(json!({
            "provider": service_names::SPOTIFY,
            "status_code": status,
            "upstream": upstream,
        }))
    }
}
