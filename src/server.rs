// http server mode - the chat relay as an api

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{
        HeaderName, Method, StatusCode,
        header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, DATE},
    },
    response::{IntoResponse, Response},
    routing::{MethodRouter, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::Error;
use crate::config::{Config, FallbackStatus};
use crate::core::{ChatRelay, ChatRequest, HELPLINES, Helpline, Outcome, Turn, ai};

struct AppState {
    relay: ChatRelay,
    fallback_status: FallbackStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatBody {
    #[serde(default)]
    message: Option<String>,
    // kept raw so one bad turn can't sink the message
    #[serde(default)]
    history: Option<Value>,
    #[serde(default, alias = "session_id")]
    session_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    risk_detected: Option<bool>,
}

impl ErrorResponse {
    fn bare(error: &Error) -> Self {
        Self {
            error: error.to_string(),
            reply: None,
            risk_detected: None,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    provider: Option<String>,
    configured: bool,
}

pub struct Server;

impl Server {
    /// the full app, without binding anything
    pub fn router(relay: ChatRelay, fallback_status: FallbackStatus) -> Router {
        let state = Arc::new(AppState {
            relay,
            fallback_status,
        });

        Router::new()
            .route("/health", get(health))
            .route("/helplines", get(helplines))
            .route("/chat", chat_route())
            .route("/api/chat", chat_route())
            .layer(cors())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    pub async fn run(config: Config, host: &str, port: u16) -> Result<(), Error> {
        let relay = match ai::connect(&config.provider) {
            Ok(provider) => {
                info!(
                    provider = provider.name(),
                    model = provider.model(),
                    "provider ready"
                );
                ChatRelay::new(config.persona, provider)
            }
            // keep serving, every chat request reports the config error
            Err(e @ Error::MissingApiKey { .. }) => {
                warn!(error = %e, "starting without a provider credential");
                ChatRelay::unconfigured(config.persona)
            }
            Err(e) => return Err(e),
        };

        let app = Self::router(relay, config.fallback_status);

        let addr = format!("{host}:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        info!("server running at http://{addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        info!("server stopped");
        Ok(())
    }
}

fn chat_route() -> MethodRouter<Arc<AppState>> {
    post(chat).options(preflight).fallback(method_not_allowed)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            ACCEPT,
            HeaderName::from_static("accept-version"),
            CONTENT_LENGTH,
            HeaderName::from_static("content-md5"),
            CONTENT_TYPE,
            DATE,
            HeaderName::from_static("x-api-version"),
        ])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider: state.relay.provider_name().map(str::to_string),
        configured: state.relay.is_configured(),
    })
}

async fn helplines() -> Json<&'static [Helpline]> {
    Json(HELPLINES)
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    let err = Error::MethodNotAllowed;
    (err.status(), Json(ErrorResponse::bare(&err))).into_response()
}

async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Response {
    // an unreadable body is treated like a missing message
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(error = %rejection, "rejected chat body");
            return invalid_input();
        }
    };

    let request = ChatRequest {
        message: body.message.unwrap_or_default(),
        history: parse_history(body.history),
        session_id: body.session_id,
    };

    let relayed = match state.relay.handle(request).await {
        Ok(relayed) => relayed,
        Err(e) => {
            return (e.status(), Json(ErrorResponse::bare(&e))).into_response();
        }
    };

    let response = relayed.response;
    match relayed.outcome {
        Outcome::Generated => (StatusCode::OK, Json(response)).into_response(),
        Outcome::ProviderFailed(_) => match state.fallback_status {
            FallbackStatus::Ok => (StatusCode::OK, Json(response)).into_response(),
            FallbackStatus::Error => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to generate response".into(),
                    reply: Some(response.reply),
                    risk_detected: Some(response.risk_detected),
                }),
            )
                .into_response(),
        },
        Outcome::Unconfigured => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Server configuration error".into(),
                reply: Some(response.reply),
                risk_detected: Some(response.risk_detected),
            }),
        )
            .into_response(),
    }
}

// only the message is mandatory: unusable turns are dropped, the rest keep their order
fn parse_history(raw: Option<Value>) -> Vec<Turn> {
    let items = match raw {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            debug!("ignoring history that is not a list");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Turn>(item) {
            Ok(turn) => Some(turn),
            Err(e) => {
                debug!(index, error = %e, "skipping malformed history turn");
                None
            }
        })
        .collect()
}

fn invalid_input() -> Response {
    let err = Error::InvalidInput;
    (err.status(), Json(ErrorResponse::bare(&err))).into_response()
}
