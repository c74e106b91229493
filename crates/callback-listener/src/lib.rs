//! OAuth Callback Listener
//!
//! A local HTTP listener that captures the authorization code an identity
//! provider sends back to the browser at the end of an interactive login.
//!
//! # Behaviour
//!
//! - Binds `0.0.0.0:8731` by default; bind failure is fatal
//! - Serves a single route, `/callback`, for any HTTP method
//! - Prints `callback received [<values>]` to stdout for each callback
//! - Echoes the first `code` value as the response body (400 when absent)
//!
//! # Example
//!
//! ```no_run
//! use callback_listener::{CallbackServer, ListenerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = CallbackServer::new(ListenerConfig::default());
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod authorize;
pub mod config;
pub mod error;
pub mod query;
pub mod server;

pub use authorize::AuthorizeRequest;
pub use config::ListenerConfig;
pub use error::{CallbackError, ListenerError};
pub use server::{BoundServer, CallbackServer};
