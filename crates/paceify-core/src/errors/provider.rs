// ABOUTME: Error type for music catalog calls with retryability classification
// ABOUTME: Maps upstream failures onto AppError codes so they surface with the right status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::json;
use thiserror::Error;

use super::{AppError, ErrorCode};

/// Failures raised while talking to an external music catalog
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Catalog answered with a non-success status
    #[error("{provider} API error ({status_code}): {message}")]
    ApiError {
        /// Catalog name
        provider: String,
        /// Upstream HTTP status
        status_code: u16,
        /// Upstream error message
        message: String,
        /// Whether repeating the call may succeed
        retryable: bool,
    },

    /// Catalog rate limit exceeded
    #[error("Rate limit exceeded for {provider}: retry after {retry_after_secs}s ({limit_type})")]
    RateLimitExceeded {
        /// Catalog name
        provider: String,
        /// Seconds advertised by the catalog before retrying
        retry_after_secs: u64,
        /// Kind of limit that was hit
        limit_type: String,
    },

    /// Access token missing, expired or revoked
    #[error("Authentication failed for {provider}: {reason}")]
    AuthenticationFailed {
        /// Catalog name
        provider: String,
        /// Upstream reason
        reason: String,
    },

    /// Catalog is misconfigured locally
    #[error("Configuration error for {provider}: {details}")]
    ConfigurationError {
        /// Catalog name
        provider: String,
        /// What is wrong
        details: String,
    },

    /// Requested resource does not exist upstream
    #[error("{resource_type} '{resource_id}' not found in {provider}")]
    NotFound {
        /// Catalog name
        provider: String,
        /// Kind of resource (playlist, user, ...)
        resource_type: String,
        /// Identifier that was looked up
        resource_id: String,
    },

    /// Calls are short-circuited after repeated failures
    #[error("Circuit breaker open for {provider}: retry after {retry_after_secs}s")]
    CircuitBreakerOpen {
        /// Catalog name
        provider: String,
        /// Seconds until a recovery attempt is allowed
        retry_after_secs: u64,
    },

    /// Transport-level failure
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Upstream payload could not be decoded
    #[error("Failed to parse {provider} response: {details}")]
    ParseError {
        /// Catalog name
        provider: String,
        /// Decoder message
        details: String,
    },

    /// Upstream payload decoded but is semantically wrong
    #[error("Invalid data from {provider}: {field} - {reason}")]
    InvalidData {
        /// Catalog name
        provider: String,
        /// Offending field
        field: String,
        /// Why it is invalid
        reason: String,
    },
}

impl ProviderError {
    /// Whether the failure is transient and counts against the circuit breaker
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError { retryable, .. } => *retryable,
            Self::RateLimitExceeded { .. } | Self::NetworkError(_) => true,
            Self::AuthenticationFailed { .. }
            | Self::ConfigurationError { .. }
            | Self::NotFound { .. }
            | Self::CircuitBreakerOpen { .. }
            | Self::ParseError { .. }
            | Self::InvalidData { .. } => false,
        }
    }

    /// Seconds the caller should wait before retrying, when known
    #[must_use]
    pub const fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimitExceeded {
                retry_after_secs, ..
            }
            | Self::CircuitBreakerOpen {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

/// Result alias for catalog operations
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        Self::NetworkError(error.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let message = error.to_string();
        match error {
            ProviderError::ApiError {
                provider,
                status_code,
                message: upstream,
                ..
            } => {
                let code = match status_code {
                    401 => ErrorCode::ExternalAuthFailed,
                    403 => ErrorCode::PermissionDenied,
                    404 => ErrorCode::ResourceNotFound,
                    429 => ErrorCode::ExternalRateLimited,
                    400..=499 => ErrorCode::ExternalRequestRejected,
                    _ => ErrorCode::ExternalServiceError,
                };
                Self::new(code, upstream).with_details(json!({
                    "provider": provider,
                    "status_code": status_code,
                }))
            }
            ProviderError::RateLimitExceeded {
                provider,
                retry_after_secs,
                ..
            } => Self::new(ErrorCode::ExternalRateLimited, message).with_details(json!({
                "provider": provider,
                "retry_after_secs": retry_after_secs,
            })),
            ProviderError::AuthenticationFailed { provider, reason } => {
                Self::new(ErrorCode::ExternalAuthFailed, reason)
                    .with_details(json!({ "provider": provider }))
            }
            ProviderError::ConfigurationError { .. } => Self::new(ErrorCode::ConfigError, message),
            ProviderError::NotFound { .. } => Self::new(ErrorCode::ResourceNotFound, message),
            ProviderError::CircuitBreakerOpen {
                provider,
                retry_after_secs,
            } => Self::new(ErrorCode::ExternalServiceUnavailable, message).with_details(json!({
                "provider": provider,
                "retry_after_secs": retry_after_secs,
            })),
            ProviderError::NetworkError(_)
            | ProviderError::ParseError { .. }
            | ProviderError::InvalidData { .. } => {
                Self::new(ErrorCode::ExternalServiceError, message)
            }
        }
    }
}
