// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, catalog selection, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use std::env;
use std::fmt;

use anyhow::{anyhow, Context, Result};
use paceify_providers::SpotifyConfig;
use paceify_tempo::TempoConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::ports::DEFAULT_HTTP_PORT;
use crate::constants::spotify::{
    API_BASE_URL, AUTH_URL, DEFAULT_RECOMMENDATION_LIMIT, DEFAULT_REDIRECT_URI,
    DEFAULT_SEED_GENRES, MAX_RECOMMENDATION_LIMIT, OAUTH_SCOPES, PLAYLIST_TRACKS_MAX_PAGES,
    PLAYLIST_TRACKS_PAGE_SIZE, SAVED_TRACKS_MAX_PAGES, SAVED_TRACKS_PAGE_SIZE, TOKEN_URL,
};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which catalog backs the track pools
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogProviderKind {
    /// Spotify Web API
    #[default]
    Spotify,
    /// In-memory demo library
    Demo,
}

impl CatalogProviderKind {
    /// Parse a provider name
    ///
    /// # Errors
    ///
    /// Returns an error for names other than `spotify` and `demo`
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "spotify" => Ok(Self::Spotify),
            "demo" => Ok(Self::Demo),
            other => Err(anyhow!(
                "Unknown CATALOG_PROVIDER '{other}' (expected 'spotify' or 'demo')"
            )),
        }
    }
}

impl fmt::Display for CatalogProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spotify => write!(f, "spotify"),
            Self::Demo => write!(f, "demo"),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Spotify API and OAuth settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpotifyApiConfig {
    /// OAuth client id; `/auth` routes are unavailable without it
    pub client_id: Option<String>,
    /// OAuth redirect URI
    pub redirect_uri: String,
    /// Web API root
    pub api_base_url: String,
    /// OAuth authorization endpoint
    pub auth_url: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Scopes requested at login
    pub scopes: Vec<String>,
    /// Page size for the saved library
    pub saved_tracks_page_size: u32,
    /// Page cap for the saved library
    pub saved_tracks_max_pages: u32,
    /// Page size for playlist tracks
    pub playlist_tracks_page_size: u32,
    /// Page cap for playlist tracks
    pub playlist_tracks_max_pages: u32,
}

impl Default for SpotifyApiConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_owned(),
            api_base_url: API_BASE_URL.to_owned(),
            auth_url: AUTH_URL.to_owned(),
            token_url: TOKEN_URL.to_owned(),
            scopes: parse_list(OAUTH_SCOPES, ' '),
            saved_tracks_page_size: SAVED_TRACKS_PAGE_SIZE,
            saved_tracks_max_pages: SAVED_TRACKS_MAX_PAGES,
            playlist_tracks_page_size: PLAYLIST_TRACKS_PAGE_SIZE,
            playlist_tracks_max_pages: PLAYLIST_TRACKS_MAX_PAGES,
        }
    }
}

impl SpotifyApiConfig {
    /// Catalog settings derived from this configuration
    #[must_use]
    pub fn catalog_config(&self) -> SpotifyConfig {
        SpotifyConfig {
            api_base_url: self.api_base_url.clone(),
            saved_tracks_page_size: self.saved_tracks_page_size,
            saved_tracks_max_pages: self.saved_tracks_max_pages,
            playlist_tracks_page_size: self.playlist_tracks_page_size,
            playlist_tracks_max_pages: self.playlist_tracks_max_pages,
        }
    }
}

/// Fallback recommendation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationConfig {
    /// Tracks requested per fallback lookup
    pub limit: u32,
    /// Seed genres used when the primary pool is empty
    pub seed_genres: Vec<String>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECOMMENDATION_LIMIT,
            seed_genres: DEFAULT_SEED_GENRES
                .iter()
                .map(|&genre| genre.to_owned())
                .collect(),
        }
    }
}

/// Outbound HTTP client timeouts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// CORS settings
    pub cors: CorsConfig,
    /// Catalog backing the track pools
    pub catalog_provider: CatalogProviderKind,
    /// Spotify API and OAuth settings
    pub spotify: SpotifyApiConfig,
    /// Fallback recommendation settings
    pub recommendations: RecommendationConfig,
    /// Tempo matching settings
    pub tempo: TempoConfig,
    /// Outbound HTTP client settings
    pub http_client: HttpClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            host: "127.0.0.1".to_owned(),
            environment: Environment::Development,
            cors: CorsConfig::default(),
            catalog_provider: CatalogProviderKind::Spotify,
            spotify: SpotifyApiConfig::default(),
            recommendations: RecommendationConfig::default(),
            tempo: TempoConfig::default(),
            http_client: HttpClientConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            host: env_var_or("HOST", "127.0.0.1"),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            catalog_provider: CatalogProviderKind::parse(&env_var_or(
                "CATALOG_PROVIDER",
                "spotify",
            ))?,
            spotify: SpotifyApiConfig {
                client_id: env::var("SPOTIFY_CLIENT_ID")
                    .ok()
                    .filter(|id| !id.trim().is_empty()),
                redirect_uri: env_var_or("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
                api_base_url: env_var_or("SPOTIFY_API_BASE_URL", API_BASE_URL),
                auth_url: env_var_or("SPOTIFY_AUTH_URL", AUTH_URL),
                token_url: env_var_or("SPOTIFY_TOKEN_URL", TOKEN_URL),
                scopes: parse_list(OAUTH_SCOPES, ' '),
                saved_tracks_page_size: env_var_or(
                    "SAVED_TRACKS_PAGE_SIZE",
                    &SAVED_TRACKS_PAGE_SIZE.to_string(),
                )
                .parse()
                .context("Invalid SAVED_TRACKS_PAGE_SIZE value")?,
                saved_tracks_max_pages: env_var_or(
                    "SAVED_TRACKS_MAX_PAGES",
                    &SAVED_TRACKS_MAX_PAGES.to_string(),
                )
                .parse()
                .context("Invalid SAVED_TRACKS_MAX_PAGES value")?,
                playlist_tracks_page_size: env_var_or(
                    "PLAYLIST_TRACKS_PAGE_SIZE",
                    &PLAYLIST_TRACKS_PAGE_SIZE.to_string(),
                )
                .parse()
                .context("Invalid PLAYLIST_TRACKS_PAGE_SIZE value")?,
                playlist_tracks_max_pages: env_var_or(
                    "PLAYLIST_TRACKS_MAX_PAGES",
                    &PLAYLIST_TRACKS_MAX_PAGES.to_string(),
                )
                .parse()
                .context("Invalid PLAYLIST_TRACKS_MAX_PAGES value")?,
            },
            recommendations: RecommendationConfig {
                limit: env_var_or(
                    "RECOMMENDATION_LIMIT",
                    &DEFAULT_RECOMMENDATION_LIMIT.to_string(),
                )
                .parse::<u32>()
                .context("Invalid RECOMMENDATION_LIMIT value")?
                .min(MAX_RECOMMENDATION_LIMIT),
                seed_genres: parse_list(
                    &env_var_or("FALLBACK_SEED_GENRES", &DEFAULT_SEED_GENRES.join(",")),
                    ',',
                ),
            },
            tempo: TempoConfig::from_env().context("Invalid tempo configuration")?,
            http_client: HttpClientConfig {
                timeout_secs: env_var_or("HTTP_CLIENT_TIMEOUT_SECS", "30")
                    .parse()
                    .context("Invalid HTTP_CLIENT_TIMEOUT_SECS value")?,
                connect_timeout_secs: env_var_or("HTTP_CLIENT_CONNECT_TIMEOUT_SECS", "10")
                    .parse()
                    .context("Invalid HTTP_CLIENT_CONNECT_TIMEOUT_SECS value")?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if paging sizes are zero, no fallback genres are
    /// configured or the HTTP client timeouts are zero
    pub fn validate(&self) -> Result<()> {
        if self.spotify.saved_tracks_page_size == 0 || self.spotify.playlist_tracks_page_size == 0
        {
            return Err(anyhow!("Catalog page sizes must be greater than zero"));
        }

        if self.recommendations.seed_genres.is_empty() {
            return Err(anyhow!("FALLBACK_SEED_GENRES must name at least one genre"));
        }

        if self.http_client.timeout_secs == 0 || self.http_client.connect_timeout_secs == 0 {
            return Err(anyhow!("HTTP client timeouts must be greater than zero"));
        }

        if self.catalog_provider == CatalogProviderKind::Spotify && self.spotify.client_id.is_none()
        {
            warn!("Spotify catalog selected but SPOTIFY_CLIENT_ID is not set; /auth routes will fail");
        }

        if self.environment.is_production() && self.cors.allowed_origins.trim() == "*" {
            warn!("CORS allows any origin in production");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Paceify Server Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Catalog: {}\n\
             - Spotify OAuth: {}\n\
             - Spotify API: {}\n\
             - CORS Origins: {}\n\
             - Default Tolerance: {} BPM\n\
             - Stride Bands: {}\n\
             - Fallback Genres: {}\n\
             - Recommendation Limit: {}",
            self.host,
            self.http_port,
            self.environment,
            self.catalog_provider,
            if self.spotify.client_id.is_some() {
                "Configured"
            } else {
                "Not configured"
            },
            self.spotify.api_base_url,
            self.cors.allowed_origins,
            self.tempo.default_tolerance,
            self.tempo.strides,
            self.recommendations.seed_genres.join(","),
            self.recommendations.limit,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Split a delimited list, dropping blanks
fn parse_list(list: &str, separator: char) -> Vec<String> {
    list.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("pop, rock ,electronic", ','), vec!["pop", "rock", "electronic"]);
        assert_eq!(parse_list("", ','), Vec::<String>::new());
        assert_eq!(
            parse_list(OAUTH_SCOPES, ' ').last().map(String::as_str),
            Some("user-library-read")
        );
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("anything"), Environment::Development);
    }

    #[test]
    fn test_catalog_provider_parsing() {
        assert_eq!(CatalogProviderKind::parse("Demo").unwrap(), CatalogProviderKind::Demo);
        assert_eq!(CatalogProviderKind::parse(" spotify ").unwrap(), CatalogProviderKind::Spotify);
        assert!(CatalogProviderKind::parse("deezer").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.recommendations.seed_genres, vec!["pop", "rock", "electronic"]);
    }

    #[test]
    fn test_validate_rejects_empty_genres() {
        let mut config = ServerConfig::default();
        config.recommendations.seed_genres.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_hides_client_id() {
        let mut config = ServerConfig::default();
        config.spotify.client_id = Some("secret-client".to_owned());
        let summary = config.summary();
        assert!(summary.contains("Spotify OAuth: Configured"));
        assert!(!summary.contains("secret-client"));
    }
}
