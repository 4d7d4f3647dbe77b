//! Server module exposing the dashboard actions over HTTP
//!
//! `ServerBuilder` wires the injected store and identity provider into the
//! form routes, the cached invoice listing and a health check.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
