use async_trait::async_trait;
use std::io;
use std::net::IpAddr;
use thiserror::Error;
use url::{Host, Url};

/// Error that can occur while resolving the host of a candidate URL.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The candidate could not be parsed, or has no host.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The lookup failed, including when the name does not exist.
    #[error("dns resolution error: {0}")]
    Lookup(#[from] io::Error),

    /// The lookup succeeded but returned no address.
    #[error("no address found for {0}")]
    NoAddress(String),
}

impl ResolutionError {
    pub fn invalid_url<E: ToString>(reason: E) -> Self {
        Self::InvalidUrl(reason.to_string())
    }
}

/// Forward name resolution for URL hosts.
#[async_trait]
pub trait HostResolver: Send + Sync + 'static {
    /// Resolves `host` to at least one address.
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError>;
}

/// Resolver backed by the platform's `getaddrinfo`, run off the async
/// executor by tokio.
///
/// No timeout is applied; a slow resolver delays only the request that
/// triggered the lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl HostResolver for SystemResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        let addrs: Vec<IpAddr> = tokio::net::lookup_host((host, 0))
            .await?
            .map(|addr| addr.ip())
            .collect();

        if addrs.is_empty() {
            return Err(ResolutionError::NoAddress(host.to_owned()));
        }
        Ok(addrs)
    }
}

/// Extracts the host of `candidate`.
///
/// Scheme-less input such as `example.com/path` is read as `http://` input.
pub fn extract_host(candidate: &str) -> Result<Host<String>, ResolutionError> {
    let parsed = match Url::parse(candidate) {
        Ok(url) if url.has_host() => url,
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{candidate}")).map_err(ResolutionError::invalid_url)?
        }
        Err(e) => return Err(ResolutionError::invalid_url(e)),
    };

    parsed
        .host()
        .map(|host| host.to_owned())
        .ok_or_else(|| ResolutionError::invalid_url("no host"))
}

/// Resolves the host of `candidate` with `resolver`.
///
/// IP literals are returned as-is without a lookup.
pub async fn resolve_url_host<H: HostResolver + ?Sized>(
    resolver: &H,
    candidate: &str,
) -> Result<Vec<IpAddr>, ResolutionError> {
    match extract_host(candidate)? {
        Host::Ipv4(ip) => Ok(vec![IpAddr::V4(ip)]),
        Host::Ipv6(ip) => Ok(vec![IpAddr::V6(ip)]),
        Host::Domain(domain) => resolver.lookup(&domain).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    struct NeverResolves;

    #[async_trait]
    impl HostResolver for NeverResolves {
        async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
            Err(ResolutionError::NoAddress(host.to_owned()))
        }
    }

    #[test]
    fn extracts_host_with_scheme() {
        let host = extract_host("https://www.example.com:8443/a?b=c").unwrap();
        assert_eq!(host, Host::Domain("www.example.com".to_string()));
    }

    #[test]
    fn extracts_host_without_scheme() {
        let host = extract_host("example.com/path").unwrap();
        assert_eq!(host, Host::Domain("example.com".to_string()));
    }

    #[test]
    fn extracts_lowercased_host() {
        let host = extract_host("HTTP://EXAMPLE.COM").unwrap();
        assert_eq!(host, Host::Domain("example.com".to_string()));
    }

    #[test]
    fn extracts_ipv4_host() {
        let host = extract_host("http://10.1.2.3:80/").unwrap();
        assert_eq!(host, Host::<String>::Ipv4(Ipv4Addr::new(10, 1, 2, 3)));
    }

    #[test]
    fn rejects_input_without_host() {
        assert!(extract_host("").is_err());
        assert!(extract_host("not a url").is_err());
    }

    #[tokio::test]
    async fn ip_literals_skip_the_resolver() {
        let addrs = resolve_url_host(&NeverResolves, "http://127.0.0.1")
            .await
            .unwrap();
        assert_eq!(addrs, vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);
    }

    #[tokio::test]
    async fn domains_go_through_the_resolver() {
        let err = resolve_url_host(&NeverResolves, "example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolutionError::NoAddress(_)));
    }

    #[tokio::test]
    async fn system_resolver_resolves_localhost() {
        let addrs = SystemResolver.lookup("localhost").await.unwrap();
        assert!(addrs.iter().any(|addr| addr.is_loopback()));
    }
}
