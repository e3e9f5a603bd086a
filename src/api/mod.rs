//! HTTP interface over a loaded scenario

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::create_router;
