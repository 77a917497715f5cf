//! Strategies that drive a mouse around a maze it has not seen yet.
//!
//! Both strategies talk to the robot only through the [`Mouse`] trait, so the same code runs
//! against hardware glue or against a [`SimulatedMouse`] in tests.

mod dfs;
mod floodfill;
mod mouse;

pub use self::dfs::*;
pub use self::floodfill::*;
pub use self::mouse::*;
