//! Storefront API - in-memory JSON service for stores and their items
//!
//! The library exposes the pieces the binary wires together so the router
//! can also be driven from integration tests:
//! - `config`: environment configuration
//! - `store`: the catalog of stores and items
//! - `http`: routes, handlers and error responses

pub mod app;
pub mod config;
pub mod http;
pub mod store;
pub mod util;

pub use app::AppState;
pub use config::Config;
pub use http::build_router;
