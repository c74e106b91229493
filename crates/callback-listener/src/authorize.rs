//! Authorization URL for starting the login flow.
//!
//! The browser is sent to the provider's authorize endpoint with
//! `response_type=code` and a `redirect_uri` pointing back at this listener.
//! Exchanging the resulting code for tokens happens elsewhere.

use url::Url;

use crate::config::{ListenerConfig, defaults};
use crate::error::{ListenerError, ListenerResult};

/// Parameters of an authorization-code request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeRequest {
    pub endpoint: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl AuthorizeRequest {
    /// Request against the default endpoint, redirecting to `config`'s callback route.
    #[must_use]
    pub fn new(client_id: impl Into<String>, config: &ListenerConfig) -> Self {
        Self {
            endpoint: defaults::AUTHORIZE_ENDPOINT.to_string(),
            client_id: client_id.into(),
            redirect_uri: config.redirect_uri(),
            scopes: Vec::new(),
        }
    }

    /// Use a different provider authorization endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Scopes to request; sent space-separated.
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Build the URL to open in the browser.
    pub fn url(&self) -> ListenerResult<Url> {
        let mut params = vec![
            ("client_id", self.client_id.clone()),
            ("response_type", "code".to_string()),
            ("redirect_uri", self.redirect_uri.clone()),
        ];
        if !self.scopes.is_empty() {
            params.push(("scope", self.scopes.join(" ")));
        }

        Url::parse_with_params(&self.endpoint, &params)
            .map_err(|e| ListenerError::config("authorize_endpoint", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_url_contains_encoded_redirect_uri() {
        let request = AuthorizeRequest::new("client123", &ListenerConfig::default())
            .with_scopes(["playlist-read-private", "user-read-email"]);
        let url = request.url().unwrap();

        assert!(url.as_str().starts_with("https://accounts.spotify.com/authorize?"));
        assert!(url.as_str().contains("redirect_uri=http%3A%2F%2Flocalhost%3A8731%2Fcallback"));

        let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["client_id"], "client123");
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(pairs["redirect_uri"], "http://localhost:8731/callback");
        assert_eq!(pairs["scope"], "playlist-read-private user-read-email");
    }

    #[test]
    fn test_url_without_scopes_omits_scope() {
        let url = AuthorizeRequest::new("id", &ListenerConfig::default()).url().unwrap();
        assert!(url.query_pairs().all(|(k, _)| k != "scope"));
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let err = AuthorizeRequest::new("id", &ListenerConfig::default())
            .with_endpoint("not a url")
            .url()
            .unwrap_err();
        assert!(matches!(err, ListenerError::Config { .. }));
    }
}
