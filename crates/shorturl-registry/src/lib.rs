//! Registry service: create-or-lookup of URL mappings with sequential id
//! allocation, and resolution of ids back to URLs.

pub mod allocator;
pub mod service;

pub use service::RegistryService;
pub use shorturl_core::{Registry, RegistryError};
