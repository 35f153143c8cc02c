use shorturl_core::{RegistryError, ReadRepository, ShortId};

/// Computes the id for the next mapping from the latest stored one.
///
/// An empty store starts at [`ShortId::FIRST`]; otherwise the id is one
/// past the id of the most recently inserted mapping. No state is kept
/// between calls, so the store is the only source of truth and several
/// registry instances may share it.
pub async fn next_id<R: ReadRepository + ?Sized>(repository: &R) -> Result<ShortId, RegistryError> {
    match repository.find_latest().await? {
        None => Ok(ShortId::FIRST),
        Some(latest) => latest.id.next().ok_or(RegistryError::IdSpaceExhausted),
    }
}
