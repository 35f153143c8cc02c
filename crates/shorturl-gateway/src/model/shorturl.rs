use serde::{Deserialize, Serialize};
use shorturl_core::{ShortId, UrlMapping};

#[derive(Debug, Deserialize)]
pub struct CreateShortUrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateShortUrlResponse {
    pub original_url: String,
    pub short_url: ShortId,
}

impl From<UrlMapping> for CreateShortUrlResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            original_url: mapping.url,
            short_url: mapping.id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
