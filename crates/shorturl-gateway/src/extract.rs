use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};

use crate::error::AppError;
use crate::model::CreateShortUrlRequest;

/// A URL submission read from either a JSON or an HTML form body.
#[derive(Debug)]
pub struct UrlSubmission(pub CreateShortUrlRequest);

fn media_type(req: &Request) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

impl<S> FromRequest<S> for UrlSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match media_type(&req).as_str() {
            "application/json" => {
                let Json(body) = Json::<CreateShortUrlRequest>::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;
                Ok(Self(body))
            }
            "application/x-www-form-urlencoded" => {
                let Form(body) = Form::<CreateShortUrlRequest>::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;
                Ok(Self(body))
            }
            other => Err(AppError::UnsupportedMediaType(other.to_owned())),
        }
    }
}
