//! Core types and utilities for `micromaze`.
//!
//! This crate provides the grid geometry, the error type shared by every other crate and the
//! indexed priority queue used by the searches.

mod error;
mod geometry;
mod pqueue;

pub use crate::error::*;
pub use crate::geometry::*;
pub use crate::pqueue::*;
