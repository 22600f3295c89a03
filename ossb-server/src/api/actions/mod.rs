//! Donate action handlers.
//!
//! These endpoints are called by Blink clients (wallets, dial.to, social
//! feeds). Every response carries the Solana Actions CORS and version
//! headers.
//!
//! # Endpoints
//!
//! - `OPTIONS {action_path}` – pre-flight
//! - `GET     {action_path}` – action metadata document
//! - `POST    {action_path}` – unsigned donation transaction
//! - `GET     /actions.json` – action discovery rules

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use ossb_core::processors::DonationError;
use ossb_core::validation::ValidationError;

use crate::state::AppState;

mod actions_json;
mod get_action;
mod post_action;

/// Solana Actions version advertised in `X-Action-Version`.
pub const ACTION_VERSION: &str = "2.4";

/// Build the action router for the donate action mounted at `action_path`.
pub fn router(state: AppState, action_path: &str) -> Router<AppState> {
    Router::new()
        .route(
            action_path,
            get(get_action::get_action)
                .post(post_action::post_action)
                .options(preflight),
        )
        .route("/actions.json", get(actions_json::actions_json))
        .layer(middleware::from_fn_with_state(state, action_headers))
}

/// `OPTIONS {action_path}` — CORS pre-flight, answered with headers only.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Snapshot the runtime for the request and attach the action headers to
/// every response, errors included.
///
/// Handlers take the `ActionProcessor` from the request extensions, so the
/// advertised chain always matches the clients that served the request.
async fn action_headers(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let processor = state.processor().await;
    let cluster = processor.config.chain.cluster;
    request.extensions_mut().insert(processor);
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,POST,PUT,OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(
            "Content-Type, Authorization, Content-Encoding, Accept-Encoding, \
             X-Accept-Action-Version, X-Accept-Blockchain-Ids",
        ),
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("X-Action-Version, X-Blockchain-Ids"),
    );
    headers.insert(
        HeaderName::from_static("x-blockchain-ids"),
        HeaderValue::from_static(cluster.caip2_id()),
    );
    headers.insert(
        HeaderName::from_static("x-action-version"),
        HeaderValue::from_static(ACTION_VERSION),
    );
    response
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in action handlers.
#[derive(Debug)]
enum ActionApiError {
    /// A query parameter or the donor account is invalid.
    Validation(ValidationError),
    /// The POST body is not a JSON `{ "account": ... }` object.
    MalformedBody(serde_json::Error),
    /// The RPC node failed or the transaction could not be assembled.
    Build(DonationError),
}

impl From<ValidationError> for ActionApiError {
    fn from(e: ValidationError) -> Self {
        ActionApiError::Validation(e)
    }
}

impl From<DonationError> for ActionApiError {
    fn from(e: DonationError) -> Self {
        match e {
            DonationError::Validation(e) => ActionApiError::Validation(e),
            other => ActionApiError::Build(other),
        }
    }
}

impl IntoResponse for ActionApiError {
    fn into_response(self) -> Response {
        match self {
            ActionApiError::Validation(e) => {
                tracing::debug!(error = %e, "Rejected action request");
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            ActionApiError::MalformedBody(e) => {
                tracing::debug!(error = %e, "Malformed action request body");
                (StatusCode::BAD_REQUEST, "invalid request body").into_response()
            }
            ActionApiError::Build(e) => {
                tracing::error!(error = %e, "Failed to build donation transaction");
                (StatusCode::BAD_REQUEST, "failed to build transaction").into_response()
            }
        }
    }
}
