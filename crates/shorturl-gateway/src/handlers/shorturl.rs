use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::extract::UrlSubmission;
use crate::model::CreateShortUrlResponse;
use crate::state::AppState;

pub async fn create_short_url_handler(
    State(state): State<AppState>,
    UrlSubmission(request): UrlSubmission,
) -> Result<Json<CreateShortUrlResponse>> {
    let url = request.url.trim();

    state.validator().validate(url).await.into_result()?;

    let mapping = state.registry().register_or_lookup(url).await?;
    debug!(id = %mapping.id, url = %mapping.url, "short url ready");

    Ok(Json(mapping.into()))
}

pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let url = state.registry().resolve(&id).await?;

    let location =
        HeaderValue::try_from(url.as_str()).map_err(|_| AppError::InvalidRedirect(url.clone()))?;

    Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
}
