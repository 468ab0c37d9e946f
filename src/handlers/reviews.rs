use crate::auth::AuthenticatedUser;
use crate::errors::{ApiError, ServiceError};
use crate::services::SubmitReviewInput;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tracing::warn;
use uuid::Uuid;

/// Redirect back to where the form was submitted from, carrying the outcome
/// as a query parameter for the referring page to display.
fn redirect_back(headers: &HeaderMap, status: &str) -> Redirect {
    let base = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .unwrap_or("/");
    let separator = if base.contains('?') { '&' } else { '?' };
    Redirect::to(&format!("{}{}review={}", base, separator, status))
}

fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Submit or update the requester's review of a product
#[utoipa::path(
    post,
    path = "/review/{product_id}",
    params(("product_id" = Uuid, Path, description = "Product id")),
    request_body = SubmitReviewInput,
    responses(
        (status = 303, description = "Redirected to the referring page with ?review=posted or ?review=error"),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub(crate) async fn submit_review(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    user: AuthenticatedUser,
    headers: HeaderMap,
    Json(payload): Json<SubmitReviewInput>,
) -> Result<Response, ApiError> {
    let ip = client_ip(&headers);

    match state
        .services
        .reviews
        .submit_review(product_id, user.user_id, payload, ip)
        .await
    {
        Ok(_) => Ok(redirect_back(&headers, "posted").into_response()),
        Err(ServiceError::ValidationError(msg)) => {
            warn!("Rejected review for product {}: {}", product_id, msg);
            Ok(redirect_back(&headers, "error").into_response())
        }
        Err(e) => Err(e.into()),
    }
}
