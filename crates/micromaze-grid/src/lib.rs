//! Maze storage for `micromaze`: the cell arena, wall bookkeeping, the gap bitmask codec and
//! the text rendering used on debug consoles.

mod cell;
mod codec;
mod grid;
mod maze;
mod render;

pub use self::cell::*;
pub use self::codec::*;
pub use self::grid::*;
pub use self::maze::*;
pub use self::render::*;
