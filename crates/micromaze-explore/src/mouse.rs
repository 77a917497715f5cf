use enumset::EnumSet;
use log::trace;
use micromaze_core::{cardinal_to_relative, Direction, MazeError, Point, RelativeDirection, Result};
use micromaze_grid::{CellId, Maze};
use micromaze_nav::Navigator;

/// The robot as seen by the exploration strategies.
pub trait Mouse {
    /// Walls around the mouse's cell, in its own frame.
    fn sense(&mut self, navigator: &Navigator) -> EnumSet<RelativeDirection>;

    /// Drives one cell in `direction`, turning first if needed.
    fn travel(&mut self, direction: Direction) -> Result<()>;
}

/// A mouse inside a known maze, for tests and offline replays.
pub struct SimulatedMouse {
    truth: Maze,
    position: CellId,
    moves: Vec<Direction>,
}

impl SimulatedMouse {
    pub fn new(truth: Maze, start: Point) -> Result<Self> {
        let position = truth.cell_at(start)?;
        Ok(SimulatedMouse {
            truth,
            position,
            moves: vec![],
        })
    }

    pub fn truth(&self) -> &Maze {
        &self.truth
    }

    pub fn position(&self) -> Point {
        self.truth.point(self.position)
    }

    /// Every move made so far, in order.
    pub fn moves(&self) -> &[Direction] {
        &self.moves
    }
}

impl Mouse for SimulatedMouse {
    fn sense(&mut self, navigator: &Navigator) -> EnumSet<RelativeDirection> {
        self.truth
            .walls(self.position)
            .iter()
            .map(|wall| cardinal_to_relative(navigator.facing(), wall))
            .collect()
    }

    fn travel(&mut self, direction: Direction) -> Result<()> {
        if self.truth.has_wall(self.position, direction) {
            return Err(MazeError::Blocked {
                point: self.position(),
                direction,
            });
        }
        self.position = self.truth.neighbor_in_direction(self.position, direction)?;
        self.moves.push(direction);
        trace!("simulated mouse moved {:?} to {}", direction, self.position());
        Ok(())
    }
}
