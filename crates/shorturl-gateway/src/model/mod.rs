mod health;
mod shorturl;

pub use health::HealthResponse;
pub use shorturl::{CreateShortUrlRequest, CreateShortUrlResponse, ErrorResponse};
