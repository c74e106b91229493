//! Configuration for the callback listener.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Listener defaults.
pub mod defaults {
    use std::net::{IpAddr, Ipv4Addr};

    /// Port registered as the redirect target with the identity provider.
    pub const PORT: u16 = 8731;

    /// Bind on all interfaces.
    pub const HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

    /// The only route the listener serves.
    pub const CALLBACK_PATH: &str = "/callback";

    /// Query parameter carrying the authorization code.
    pub const CODE_PARAM: &str = "code";

    /// Spotify authorization endpoint.
    pub const AUTHORIZE_ENDPOINT: &str = "https://accounts.spotify.com/authorize";
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Address to bind.
    pub host: IpAddr,

    /// Port to bind. `0` picks an ephemeral port.
    pub port: u16,

    /// Path of the callback route.
    pub callback_path: String,
}

impl ListenerConfig {
    /// Create a configuration serving the default callback path.
    #[must_use]
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self { host, port, callback_path: defaults::CALLBACK_PATH.to_string() }
    }

    /// Loopback on an ephemeral port, for tests that need a real socket.
    #[must_use]
    pub fn for_testing() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    /// Address passed to the bind call.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Redirect URI the identity provider should send the browser to.
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}{}", self.port, self.callback_path)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self::new(defaults::HOST, defaults::PORT)
    }
}
