//! HTTP request handlers.

pub mod cake_handler;

pub use cake_handler::cake_routes;
