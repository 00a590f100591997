//! Cake Store - CRUD API over a catalogue of cakes
//!
//! Cakes can be listed with substring filters and pagination, fetched,
//! created, partially updated and deleted. Every store call runs under a
//! per-request context that cancels it on timeout.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Cake entity, filters and patches
//! - **infra**: Database pool, migrations, statement builders and repository
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (request context, pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Cake, CakeFilter, CakePatch, NewCake};
pub use errors::{AppError, AppResult};
pub use infra::{CakeRepository, CakeStore};
pub use types::RequestContext;
