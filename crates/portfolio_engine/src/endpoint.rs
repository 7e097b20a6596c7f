use url::Url;

use crate::{BackendError, FailureKind};

/// Backend used when the page is served from this machine.
pub const LOCAL_BACKEND: &str = "http://127.0.0.1:8080";
/// Public deployment used from every other host.
pub const REMOTE_BACKEND: &str = "https://portfolio-backend-101806568838.southamerica-west1.run.app";

/// True for host names that point back at the local machine.
pub fn is_loopback_host(host: &str) -> bool {
    host.eq_ignore_ascii_case("localhost") || matches!(host, "127.0.0.1" | "::1" | "[::1]")
}

/// Base URL of the question-answering backend, chosen once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEndpoint {
    base: String,
}

impl BackendEndpoint {
    /// Pick the backend from the host name the page was loaded from.
    pub fn for_host(host: &str) -> Self {
        let base = if is_loopback_host(host.trim()) {
            LOCAL_BACKEND
        } else {
            REMOTE_BACKEND
        };
        Self {
            base: base.to_string(),
        }
    }

    /// Use an explicit base URL, e.g. from configuration.
    pub fn from_base(base: &str) -> Result<Self, BackendError> {
        let base = base.trim().trim_end_matches('/');
        let parsed =
            Url::parse(base).map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BackendError::new(
                FailureKind::InvalidUrl,
                format!("unsupported scheme {}", parsed.scheme()),
            ));
        }
        Ok(Self {
            base: base.to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URL of an endpoint path such as `/chat_stream`.
    pub fn url(&self, path: &str) -> Result<Url, BackendError> {
        Url::parse(&format!("{}{}", self.base, path))
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_hosts_select_local_backend() {
        for host in ["localhost", "LOCALHOST", "127.0.0.1", "::1", "[::1]"] {
            assert_eq!(BackendEndpoint::for_host(host).base(), LOCAL_BACKEND, "{host}");
        }
    }

    #[test]
    fn public_hosts_select_remote_backend() {
        for host in ["jorgehewstone.dev", "127.0.0.2", "", "localhost.example.com"] {
            assert_eq!(BackendEndpoint::for_host(host).base(), REMOTE_BACKEND, "{host}");
        }
    }

    #[test]
    fn explicit_base_drops_trailing_slash() {
        let endpoint = BackendEndpoint::from_base("http://10.0.0.5:9000/").unwrap();
        assert_eq!(
            endpoint.url("/health").unwrap().as_str(),
            "http://10.0.0.5:9000/health"
        );
    }

    #[test]
    fn explicit_base_must_be_http() {
        let err = BackendEndpoint::from_base("ftp://example.com").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
        let err = BackendEndpoint::from_base("not a url").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
