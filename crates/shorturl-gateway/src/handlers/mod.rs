mod health;
mod index;
mod shorturl;

pub use health::health_handler;
pub use index::index_handler;
pub use shorturl::{create_short_url_handler, redirect_handler};
