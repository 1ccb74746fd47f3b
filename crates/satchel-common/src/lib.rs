//! # Satchel Common
//!
//! Common types shared by the Satchel inventory crates.
//!
//! This crate provides the foundational values that cross the boundary
//! between the inventory core and its host engine:
//! - Handle and asset reference types (entity classes, meshes, actors)
//! - Grid and screen-space coordinate types
//! - World transforms captured at pickup time
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;
pub mod transform;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::transform::*;
}

pub use prelude::*;
