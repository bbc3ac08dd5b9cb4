//! HTTP layer: routes, handlers and error mapping

pub mod error;
pub mod middleware;
pub mod routes;

pub use error::AppError;
pub use routes::build_router;
