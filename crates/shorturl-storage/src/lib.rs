//! Storage backends for URL mappings.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use shorturl_core::repository::{ReadRepository, Repository, Result};
pub use shorturl_core::StorageError;
