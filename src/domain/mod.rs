//! Domain layer - Core business entities
//!
//! This module contains the cake record and the value types the
//! repository accepts, independent of infrastructure concerns.

pub mod cake;

pub use cake::{Cake, CakeFilter, CakePatch, NewCake};
