//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Statement construction lives in `query` (list/get) and `update`
//! (partial patch); `CakeStore` executes them.

mod cake_repository;
pub mod entities;
pub mod query;
pub mod update;

pub use cake_repository::{CakeRepository, CakeStore};
pub use query::CakeQuery;
pub use update::CakeUpdate;

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use cake_repository::MockCakeRepository;
