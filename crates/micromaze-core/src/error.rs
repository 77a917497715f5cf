//! Error type shared by every `micromaze` crate.

use thiserror::Error;

use crate::{Direction, Point};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A point or a step from one lies outside the grid. Recoverable: callers treat it as
    /// "no such cell".
    #[error("({row}, {column}) lies outside the {rows}x{columns} maze")]
    OutOfBounds {
        row: i32,
        column: i32,
        rows: u16,
        columns: u16,
    },

    #[error("maze dimensions {rows}x{columns} are invalid")]
    InvalidDimensions { rows: u16, columns: u16 },

    /// A fixed-size structure was asked to hold more than it was built for.
    #[error("{resource} capacity exceeded: {requested} requested, {capacity} available")]
    CapacityExceeded {
        resource: &'static str,
        requested: usize,
        capacity: usize,
    },

    /// The wall on `point` facing `direction` disagrees with the other side of that wall.
    /// Walls toward the outside of the maze must always be present.
    #[error("wall at {point} facing {direction:?} is not mirrored by its neighbour")]
    InconsistentWallState { point: Point, direction: Direction },

    #[error("wall mask {mask:#x} was asked to be both set and cleared")]
    ConflictingWallEdit { mask: u8 },

    #[error("no path exists from {start} to {goal}")]
    NoPathExists { start: Point, goal: Point },

    #[error("item with key {key} is already queued")]
    AlreadyQueued { key: usize },

    #[error("item with key {key} is not queued")]
    NotQueued { key: usize },

    #[error("new priority {requested} is not lower than current priority {current}")]
    PriorityNotLower { current: u32, requested: u32 },

    #[error("expected a {}x{} maze, found {}x{}", .expected.0, .expected.1, .found.0, .found.1)]
    DimensionMismatch {
        expected: (u16, u16),
        found: (u16, u16),
    },

    #[error("expected {expected} bytes, found {found}")]
    BufferLength { expected: usize, found: usize },

    #[error("padding nibble of the final byte is not zero")]
    InvalidPadding,

    #[error("{value:#x} is not a 4-bit mask")]
    InvalidMask { value: u8 },

    #[error("wall blocks travel from {point} heading {direction:?}")]
    Blocked { point: Point, direction: Direction },

    #[error("gave up after {limit} steps")]
    StepLimit { limit: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;
