//! Core types and traits for the shorturl service.
//!
//! This crate provides the mapping model, the storage contract and the
//! registry contract shared by the registry, storage and gateway crates.

pub mod error;
pub mod mapping;
pub mod registry;
pub mod repository;

pub use error::{RegistryError, StorageError};
pub use mapping::{ParseShortIdError, ShortId, UrlMapping};
pub use registry::Registry;
pub use repository::{ReadRepository, Repository};
