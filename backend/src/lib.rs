use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Path, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use santa_core::{CreateRoom, CreatedRoom, Reveal, RoomService, RoomView, SantaError};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod telemetry;

#[derive(Clone)]
pub struct AppState {
    rooms: Arc<Mutex<RoomService<ChaCha8Rng>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AppState {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed
            .map(ChaCha8Rng::seed_from_u64)
            .unwrap_or_else(ChaCha8Rng::from_entropy);
        Self {
            rooms: Arc::new(Mutex::new(RoomService::new(rng))),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/create-room", post(create_room))
        .route("/api/join-room/:room_code", get(join_room))
        .route("/api/reveal", post(reveal))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drops expired rooms. Lookups already hide them, so this only
/// reclaims memory.
pub fn spawn_sweeper(state: AppState, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = state.rooms.lock().await.store_mut().sweep_expired(now_millis());
            if removed > 0 {
                tracing::info!(removed, "swept expired rooms");
            }
        }
    })
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Santa(#[from] SantaError),
    #[error(transparent)]
    Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Santa(err) => {
                let status = match err {
                    SantaError::InsufficientPlayers { .. } | SantaError::NameNotInRoom => {
                        StatusCode::BAD_REQUEST
                    }
                    SantaError::RoomNotFound => StatusCode::NOT_FOUND,
                    SantaError::RoomExpired => StatusCode::GONE,
                    SantaError::WrongCode => StatusCode::FORBIDDEN,
                    SantaError::GenerationExhausted { .. } => {
                        tracing::error!(kind = ?err.kind(), error = %err, "draw failed");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.to_string())
            }
            ApiError::Body(rejection) => (rejection.status(), rejection.body_text()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// `Json` whose rejections use the `{ "error": .. }` body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
struct AppJson<T>(T);

async fn healthz() -> &'static str {
    "ok"
}

async fn create_room(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRoom>,
) -> Result<Json<CreatedRoom>, ApiError> {
    let created = state
        .rooms
        .lock()
        .await
        .create_room(&payload, now_millis())
        .inspect_err(|err| tracing::debug!(kind = ?err.kind(), %err, "create failed"))?;
    Ok(Json(created))
}

async fn join_room(
    State(state): State<AppState>,
    Path(room_code): Path<String>,
) -> Result<Json<RoomView>, ApiError> {
    let view = state
        .rooms
        .lock()
        .await
        .join_room(&room_code, now_millis())
        .inspect_err(|err| tracing::debug!(room = %room_code, kind = ?err.kind(), %err, "join failed"))?;
    Ok(Json(view))
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RevealRequest {
    room_code: Option<String>,
    name: Option<String>,
    code: Option<Value>,
}

impl RevealRequest {
    /// Clients send the code as either a string or a bare number.
    fn code_text(&self) -> String {
        match &self.code {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

async fn reveal(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RevealRequest>,
) -> Result<Json<Reveal>, ApiError> {
    let room_code = payload.room_code.as_deref().unwrap_or("");
    let revealed = state
        .rooms
        .lock()
        .await
        .reveal(
            room_code,
            payload.name.as_deref().unwrap_or(""),
            &payload.code_text(),
            now_millis(),
        )
        .inspect_err(|err| tracing::debug!(room = %room_code, kind = ?err.kind(), %err, "reveal failed"))?;
    Ok(Json(revealed))
}
