//! Little-endian wire frames for the navigator state and planned routes.

use std::io::{Error, Read, Write};

use micromaze_core::{Direction, MazeError, Point, Result};
use micromaze_grid::Maze;

use crate::Navigator;

/// Where the mouse is and which way it faces: row `u16`, column `u16`, facing `u8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigatorFrame {
    pub position: Point,
    pub facing: Direction,
}

impl NavigatorFrame {
    pub const ENCODED_LEN: usize = 5;

    pub fn save(&self, to: &mut impl Write) -> std::io::Result<()> {
        write_point(to, self.position)?;
        to.write_all(&[self.facing as u8])
    }

    pub fn load(from: &mut impl Read) -> std::io::Result<NavigatorFrame> {
        let position = read_point(from)?;
        let mut facing = [0];
        from.read_exact(&mut facing)?;
        let facing = match facing[0] {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            3 => Direction::West,
            value => return Err(Error::other(MazeError::InvalidMask { value })),
        };
        Ok(NavigatorFrame { position, facing })
    }
}

impl Navigator {
    pub fn frame(&self, maze: &Maze) -> NavigatorFrame {
        NavigatorFrame {
            position: maze.point(self.current()),
            facing: self.facing(),
        }
    }

    /// Moves the mouse to the position and heading recorded in `frame`.
    pub fn restore(&mut self, maze: &Maze, frame: NavigatorFrame) -> Result<()> {
        self.teleport(maze, frame.position)?;
        self.set_facing(frame.facing);
        Ok(())
    }
}

/// Writes a route as a point count `u16` followed by `(row, column)` pairs.
pub fn save_path(points: &[Point], to: &mut impl Write) -> std::io::Result<()> {
    let count = u16::try_from(points.len()).map_err(|_| {
        Error::other(MazeError::CapacityExceeded {
            resource: "path frame",
            requested: points.len(),
            capacity: u16::MAX as usize,
        })
    })?;
    to.write_all(&count.to_le_bytes())?;
    for &point in points {
        write_point(to, point)?;
    }
    Ok(())
}

pub fn load_path(from: &mut impl Read) -> std::io::Result<Vec<Point>> {
    let mut count = [0; 2];
    from.read_exact(&mut count)?;
    let count = u16::from_le_bytes(count);
    (0..count).map(|_| read_point(from)).collect()
}

/// Size in bytes of the path frame for `points` points.
pub fn path_encoded_len(points: usize) -> usize {
    2 + 4 * points
}

fn write_point(to: &mut impl Write, point: Point) -> std::io::Result<()> {
    to.write_all(&point.row.to_le_bytes())?;
    to.write_all(&point.column.to_le_bytes())
}

fn read_point(from: &mut impl Read) -> std::io::Result<Point> {
    let mut bytes = [0; 2];
    from.read_exact(&mut bytes)?;
    let row = u16::from_le_bytes(bytes);
    from.read_exact(&mut bytes)?;
    let column = u16::from_le_bytes(bytes);
    Ok(Point { row, column })
}
