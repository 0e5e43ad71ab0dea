pub mod problem;

#[cfg(test)]
mod tests;

use axum::{
    extract::{rejection::PathRejection, Path, RawQuery, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::classifier::classify;
use crate::facts::{fun_fact_or_fallback, FactFetcher};
use crate::{ClassifyError, ClassifyResult};
use problem::{Problem, APPLICATION_PROBLEM_JSON};

/// Name of the number field in paths, queries and validation errors
const NUMBER_FIELD: &str = "number";

/// API server state
pub struct AppState {
    /// Fun fact source; `None` disables enrichment
    pub fact_fetcher: Option<Arc<dyn FactFetcher>>,
}

impl AppState {
    /// Create a new app state
    pub fn new(fact_fetcher: Option<Arc<dyn FactFetcher>>) -> Self {
        Self { fact_fetcher }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health_check))
        .route("/api/numbers/classify", get(classify_number))
        .route("/api/numbers/classify/", get(classify_number))
        .route("/api/numbers/classify/:number", get(classify_number))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Start the API server
pub async fn start_server(app_state: AppState, addr: SocketAddr) -> Result<(), ClassifyError> {
    let app = create_router(app_state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ClassifyError::ApiError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Classify number endpoint
async fn classify_number(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let path = match path {
        Ok(Path(raw)) => Some(raw),
        Err(PathRejection::MissingPathParams(_)) => None,
        Err(rejection) => {
            // undecodable segment, report it as sent
            let raw = uri.path().rsplit('/').next().unwrap_or_default();
            debug!("Path rejected: {}", rejection);
            return Err(ApiError::Validation(format!(
                "The value '{}' is not valid.",
                raw
            )));
        }
    };

    let number = resolve_number(path, query.as_deref())?;
    info!("Received classification request for {}", number);

    let mut result = classify(number);

    if let Some(fetcher) = &state.fact_fetcher {
        let fact = fun_fact_or_fallback(fetcher.as_ref(), number).await;
        result = result.with_fun_fact(fact);
    }

    debug!("{}", result);

    Ok(pretty_json(StatusCode::OK, "application/json", &result)?)
}

/// Resolve the number from the path segment, falling back to the `number` query parameter.
///
/// A path value, once present, is authoritative even if it fails to parse.
pub(crate) fn resolve_number(path: Option<String>, query: Option<&str>) -> Result<i32, ApiError> {
    let raw = match path {
        Some(raw) => Some(raw),
        None => query.and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == NUMBER_FIELD)
                .map(|(_, value)| value.into_owned())
        }),
    };

    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => {
            return Err(ApiError::Validation(
                "The number field is required.".to_string(),
            ))
        }
    };

    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::Validation(format!("The value '{}' is not valid.", raw)))
}

/// Render an indented JSON body
fn pretty_json<T: Serialize>(
    status: StatusCode,
    content_type: &'static str,
    value: &T,
) -> ClassifyResult<Response> {
    let body = serde_json::to_vec_pretty(value)?;
    Ok((status, [(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Internal server error
    InternalError(ClassifyError),
    /// The number could not be resolved; carries the validation message
    Validation(String),
}

impl From<ClassifyError> for ApiError {
    fn from(error: ClassifyError) -> Self {
        error!("API error: {}", error);
        Self::InternalError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, problem) = match self {
            Self::InternalError(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Problem::internal(error.to_string()),
            ),
            Self::Validation(message) => {
                info!("Rejected classification request: {}", message);
                (StatusCode::BAD_REQUEST, Problem::validation(NUMBER_FIELD, message))
            }
        };

        match pretty_json(status, APPLICATION_PROBLEM_JSON, &problem) {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to render problem: {}", e);
                status.into_response()
            }
        }
    }
}
