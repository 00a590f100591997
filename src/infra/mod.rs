//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection pool and migrations
//! - Repositories and statement builders

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{CakeRepository, CakeStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockCakeRepository;
