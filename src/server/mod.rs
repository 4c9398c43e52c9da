//! HTTP server
//!
//! `ServerBuilder` wires configuration, pricing and the auth/contact
//! collaborators into a `ServerHost`, then exposes it over REST.

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use host::ServerHost;
