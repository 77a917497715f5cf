//! The mouse's view of itself: where it is, which way it faces, where it is going, and how
//! sensor readings taken in its own frame turn into walls on the map.

mod config;
mod frame;
mod navigator;

pub use self::config::*;
pub use self::frame::*;
pub use self::navigator::*;
