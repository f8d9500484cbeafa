// ABOUTME: In-process fake of the Spotify Web API and accounts service for integration tests
// ABOUTME: Serves canned libraries on 127.0.0.1 and records what the client asked for
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Token the fake answers with 401
pub const EXPIRED_TOKEN: &str = "expired-token";
/// Token the fake answers with 429
pub const THROTTLED_TOKEN: &str = "throttled-token";
/// Retry-After advertised on 429
pub const RETRY_AFTER_SECS: u64 = 7;

/// Bind `app` on an ephemeral local port and return its base URL
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake upstream");
    let addr = listener.local_addr().expect("Fake upstream has no address");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Fake upstream stopped");
    });
    format!("http://{addr}")
}

/// Requests seen by the fake Spotify API
#[derive(Default)]
pub struct Recorded {
    /// `path?query` of every request, in arrival order
    pub requests: Vec<String>,
    /// Query of the last `/recommendations` call
    pub recommendation_query: HashMap<String, String>,
    /// Body of the last playlist creation
    pub created_playlist: Option<Value>,
    /// URIs added per playlist, one entry per batch
    pub added_batches: Vec<(String, Vec<String>)>,
}

/// Handle to a running fake Spotify API
#[derive(Clone)]
pub struct FakeSpotify {
    /// Base URL to use as the catalog's API root
    pub base_url: String,
    recorded: Arc<Mutex<Recorded>>,
}

impl FakeSpotify {
    /// Start the fake on an ephemeral port
    pub async fn start() -> Self {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let app = Router::new()
            .route("/me", get(current_user))
            .route("/me/tracks", get(saved_tracks))
            .route("/me/playlists", get(user_playlists))
            .route("/audio-features", get(audio_features))
            .route("/recommendations", get(recommendations))
            .route("/users/:user_id/playlists", post(create_playlist))
            .route(
                "/playlists/:playlist_id/tracks",
                get(playlist_tracks).post(add_tracks),
            )
            .with_state(Arc::clone(&recorded));
        let base_url = spawn(app).await;
        Self { base_url, recorded }
    }

    /// Snapshot of what was recorded so far
    pub fn with_recorded<R>(&self, inspect: impl FnOnce(&Recorded) -> R) -> R {
        inspect(&self.recorded.lock().expect("recorded lock poisoned"))
    }

    /// Number of requests whose path starts with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.with_recorded(|recorded| {
            recorded
                .requests
                .iter()
                .filter(|request| request.starts_with(prefix))
                .count()
        })
    }
}

type Shared = State<Arc<Mutex<Recorded>>>;

fn record(state: &Shared, path: &str, query: &HashMap<String, String>) {
    let mut pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    pairs.sort();
    state
        .0
        .lock()
        .expect("recorded lock poisoned")
        .requests
        .push(format!("{path}?{}", pairs.join("&")));
}

/// Reject expired and throttled tokens the way Spotify does
fn authorize(headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default();
    match token {
        "" => Err(error(StatusCode::UNAUTHORIZED, "No token provided")),
        EXPIRED_TOKEN => Err(error(StatusCode::UNAUTHORIZED, "The access token expired")),
        THROTTLED_TOKEN => Err((
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, RETRY_AFTER_SECS.to_string())],
            Json(json!({ "error": { "status": 429, "message": "API rate limit exceeded" } })),
        )
            .into_response()),
        _ => Ok(()),
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "status": status.as_u16(), "message": message } })),
    )
        .into_response()
}

fn track(id: &str, name: &str, artists: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": artists.iter().map(|artist| json!({ "name": artist })).collect::<Vec<_>>(),
        "album": { "name": format!("{name} (Album)") },
        "duration_ms": 200_000,
        "uri": format!("spotify:track:{id}")
    })
}

/// Saved library; the `null` track stands for a local file
fn saved_items() -> Vec<Value> {
    vec![
        json!({ "track": track("s1", "Fast Song", &["Runner Band"]) }),
        json!({ "track": track("s2", "Steady Song", &["Tempo Trio", "Guest"]) }),
        json!({ "track": null }),
        json!({ "track": track("s3", "Unanalysed Song", &["Mystery"]) }),
    ]
}

fn tempo_of(id: &str) -> Option<f64> {
    match id {
        "s1" => Some(170.2),
        "s2" => Some(150.0),
        "r1" => Some(165.0),
        "r2" => Some(140.0),
        _ => None,
    }
}

fn page_of(items: &[Value], query: &HashMap<String, String>, host: &str, path: &str) -> Value {
    let limit: usize = query
        .get("limit")
        .and_then(|limit| limit.parse().ok())
        .unwrap_or(20);
    let offset: usize = query
        .get("offset")
        .and_then(|offset| offset.parse().ok())
        .unwrap_or(0);
    let end = (offset + limit).min(items.len());
    let page: Vec<Value> = items.get(offset..end).map(<[Value]>::to_vec).unwrap_or_default();
    let next = (end < items.len())
        .then(|| format!("http://{host}{path}?offset={end}&limit={limit}"));
    json!({ "items": page, "next": next, "total": items.len() })
}

fn host(headers: &HeaderMap) -> String {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("127.0.0.1")
        .to_owned()
}

async fn current_user(state: Shared, headers: HeaderMap) -> Response {
    record(&state, "/me", &HashMap::new());
    if let Err(response) = authorize(&headers) {
        return response;
    }
    Json(json!({ "id": "runner-1", "display_name": "Runner One" })).into_response()
}

async fn saved_tracks(
    state: Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record(&state, "/me/tracks", &query);
    if let Err(response) = authorize(&headers) {
        return response;
    }
    Json(page_of(&saved_items(), &query, &host(&headers), "/me/tracks")).into_response()
}

async fn user_playlists(
    state: Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record(&state, "/me/playlists", &query);
    if let Err(response) = authorize(&headers) {
        return response;
    }
    let playlists = vec![
        json!({ "id": "pl-1", "name": "Long Run", "uri": "spotify:playlist:pl-1", "tracks": { "total": 1 } }),
        json!({ "id": "pl-2", "name": "Intervals", "uri": "spotify:playlist:pl-2", "tracks": null }),
    ];
    Json(page_of(&playlists, &query, &host(&headers), "/me/playlists")).into_response()
}

async fn audio_features(
    state: Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record(&state, "/audio-features", &query);
    if let Err(response) = authorize(&headers) {
        return response;
    }
    let features: Vec<Value> = query
        .get("ids")
        .map(String::as_str)
        .unwrap_or_default()
        .split(',')
        .map(|id| {
            tempo_of(id).map_or(Value::Null, |tempo| {
                json!({ "id": id, "tempo": tempo, "energy": 0.8, "danceability": 0.7 })
            })
        })
        .collect();
    Json(json!({ "audio_features": features })).into_response()
}

async fn recommendations(
    state: Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record(&state, "/recommendations", &query);
    if let Err(response) = authorize(&headers) {
        return response;
    }
    state
        .0
        .lock()
        .expect("recorded lock poisoned")
        .recommendation_query
        .clone_from(&query);
    Json(json!({
        "tracks": [
            track("r1", "Recommended Runner", &["Pace Makers"]),
            track("r2", "Recommended Jogger", &["Slow Steps"])
        ]
    }))
    .into_response()
}

async fn playlist_tracks(
    state: Shared,
    headers: HeaderMap,
    Path(playlist_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &format!("/playlists/{playlist_id}/tracks"), &query);
    if let Err(response) = authorize(&headers) {
        return response;
    }
    if playlist_id != "pl-1" {
        return error(StatusCode::NOT_FOUND, "Invalid playlist Id");
    }
    let items = vec![json!({ "track": track("s2", "Steady Song", &["Tempo Trio", "Guest"]) })];
    let path = format!("/playlists/{playlist_id}/tracks");
    Json(page_of(&items, &query, &host(&headers), &path)).into_response()
}

async fn create_playlist(
    state: Shared,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &format!("/users/{user_id}/playlists"), &HashMap::new());
    if let Err(response) = authorize(&headers) {
        return response;
    }
    let name = body["name"].as_str().unwrap_or_default().to_owned();
    state.0.lock().expect("recorded lock poisoned").created_playlist = Some(body);
    (
        StatusCode::CREATED,
        Json(json!({
            "id": "pl-new",
            "name": name,
            "uri": "spotify:playlist:pl-new",
            "tracks": { "total": 0 }
        })),
    )
        .into_response()
}

async fn add_tracks(
    state: Shared,
    headers: HeaderMap,
    Path(playlist_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &format!("/playlists/{playlist_id}/tracks:add"), &HashMap::new());
    if let Err(response) = authorize(&headers) {
        return response;
    }
    let uris: Vec<String> = body["uris"]
        .as_array()
        .map(|uris| {
            uris.iter()
                .filter_map(|uri| uri.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default();
    state
        .0
        .lock()
        .expect("recorded lock poisoned")
        .added_batches
        .push((playlist_id, uris));
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap" }))).into_response()
}

/// Start a fake accounts token endpoint at `/api/token`
///
/// The code `good-code` with verifier `good-verifier` is exchanged; anything
/// else gets `400 invalid_grant`.
pub async fn start_token_server() -> String {
    async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
        let field = |key: &str| form.get(key).map(String::as_str);
        if field("grant_type") != Some("authorization_code")
            || field("client_id") != Some("client-123")
            || field("redirect_uri").is_none()
        {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_request", "error_description": "Malformed exchange" })),
            )
                .into_response();
        }
        if field("code") == Some("good-code") && field("code_verifier") == Some("good-verifier") {
            return Json(json!({
                "access_token": "BQD-access",
                "token_type": "Bearer",
                "scope": "user-library-read",
                "expires_in": 3600,
                "refresh_token": "AQB-refresh"
            }))
            .into_response();
        }
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid authorization code" })),
        )
            .into_response()
    }

    let base = spawn(Router::new().route("/api/token", post(token))).await;
    format!("{base}/api/token")
}
