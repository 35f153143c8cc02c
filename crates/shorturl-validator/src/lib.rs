//! URL validation for the shorturl service.
//!
//! A candidate URL is accepted when it is well-formed (see
//! [`format::is_well_formed`]) and its host resolves to at least one
//! address. The format check always runs first, so malformed input never
//! reaches the resolver.

pub mod format;
pub mod resolver;

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

pub use format::is_well_formed;
pub use resolver::{HostResolver, ResolutionError, SystemResolver};

/// Outcome of validating a candidate URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    InvalidFormat,
    InvalidHost,
}

impl ValidationResult {
    pub fn is_valid(self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::InvalidFormat => Err(ValidationError::InvalidFormat),
            ValidationResult::InvalidHost => Err(ValidationError::InvalidHost),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid URL format")]
    InvalidFormat,
    #[error("invalid url")]
    InvalidHost,
}

/// Checks a candidate URL against the format grammar. Pure and total.
pub fn validate_format(candidate: &str) -> ValidationResult {
    if is_well_formed(candidate) {
        ValidationResult::Valid
    } else {
        ValidationResult::InvalidFormat
    }
}

/// Validates candidate URLs: format first, then host resolvability.
#[derive(Clone)]
pub struct Validator {
    resolver: Arc<dyn HostResolver>,
}

impl Validator {
    pub fn new(resolver: impl HostResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// Creates a validator backed by the system resolver.
    pub fn system() -> Self {
        Self::new(SystemResolver)
    }

    pub async fn validate(&self, candidate: &str) -> ValidationResult {
        if !validate_format(candidate).is_valid() {
            debug!(url = %candidate, "rejected: malformed url");
            return ValidationResult::InvalidFormat;
        }

        // Resolver failures are indistinguishable from missing hosts here.
        match resolver::resolve_url_host(self.resolver.as_ref(), candidate).await {
            Ok(addrs) if !addrs.is_empty() => {
                debug!(url = %candidate, addresses = ?addrs, "host resolved");
                ValidationResult::Valid
            }
            Ok(_) => {
                warn!(url = %candidate, "rejected: host resolved to no address");
                ValidationResult::InvalidHost
            }
            Err(error) => {
                warn!(url = %candidate, %error, "rejected: host does not resolve");
                ValidationResult::InvalidHost
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolves every name under `example.com`, and nothing else.
    #[derive(Default)]
    struct ExampleOnly {
        lookups: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl HostResolver for ExampleOnly {
        async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if host == "example.com" || host.ends_with(".example.com") {
                Ok(vec![IpAddr::V4(Ipv4Addr::new(93, 184, 215, 14))])
            } else {
                Err(ResolutionError::NoAddress(host.to_owned()))
            }
        }
    }

    fn counting_validator() -> (Validator, Arc<AtomicUsize>) {
        let resolver = ExampleOnly::default();
        let lookups = Arc::clone(&resolver.lookups);
        (Validator::new(resolver), lookups)
    }

    #[tokio::test]
    async fn accepts_resolvable_urls() {
        let (validator, _) = counting_validator();

        assert_eq!(validator.validate("example.com").await, ValidationResult::Valid);
        assert_eq!(
            validator.validate("https://www.example.com/a?b=c#d").await,
            ValidationResult::Valid
        );
    }

    #[tokio::test]
    async fn reports_unresolvable_hosts() {
        let (validator, lookups) = counting_validator();

        let result = validator
            .validate("http://thishostdoesnotexist.invalid")
            .await;
        assert_eq!(result, ValidationResult::InvalidHost);
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_input_never_reaches_the_resolver() {
        let (validator, lookups) = counting_validator();

        assert_eq!(
            validator.validate("not a url").await,
            ValidationResult::InvalidFormat
        );
        assert_eq!(
            validator.validate("ftp://example.com").await,
            ValidationResult::InvalidFormat
        );
        assert_eq!(lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn ip_hosts_are_accepted_without_lookup() {
        let (validator, lookups) = counting_validator();

        assert_eq!(
            validator.validate("http://127.0.0.1:3000/x").await,
            ValidationResult::Valid
        );
        assert_eq!(lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_answers_count_as_unresolvable() {
        struct Empty;

        #[async_trait]
        impl HostResolver for Empty {
            async fn lookup(&self, _host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
                Ok(Vec::new())
            }
        }

        let validator = Validator::new(Empty);
        assert_eq!(
            validator.validate("example.com").await,
            ValidationResult::InvalidHost
        );
    }

    #[test]
    fn validate_format_is_pure() {
        assert_eq!(validate_format("example.com"), ValidationResult::Valid);
        assert_eq!(validate_format("not a url"), ValidationResult::InvalidFormat);
        assert_eq!(validate_format("example.com"), ValidationResult::Valid);
    }

    #[test]
    fn into_result_maps_each_outcome() {
        assert_eq!(ValidationResult::Valid.into_result(), Ok(()));
        assert_eq!(
            ValidationResult::InvalidFormat.into_result(),
            Err(ValidationError::InvalidFormat)
        );
        assert_eq!(
            ValidationResult::InvalidHost.into_result(),
            Err(ValidationError::InvalidHost)
        );
    }

    #[test]
    fn error_messages_match_the_wire_format() {
        assert_eq!(ValidationError::InvalidFormat.to_string(), "invalid URL format");
        assert_eq!(ValidationError::InvalidHost.to_string(), "invalid url");
    }
}
