use log::{debug, trace};
use micromaze_core::{direction_between, BinaryHeap, Direction, MazeError, Result};
use micromaze_grid::{CellId, Maze, UNREACHED};
use micromaze_nav::Navigator;

use crate::Mouse;

/// Goal seeking by repeated flooding: after every reading the distance to the goal is
/// recomputed over the known map and the mouse steps downhill.
pub struct FloodFill {
    queue: BinaryHeap<CellId>,
    edges: Vec<CellId>,
    max_steps: Option<usize>,
}

impl FloodFill {
    /// Creates a flooder for mazes of up to `capacity` cells.
    pub fn new(capacity: usize) -> Self {
        FloodFill {
            queue: BinaryHeap::new(capacity),
            edges: vec![],
            max_steps: None,
        }
    }

    pub fn for_maze(maze: &Maze) -> Self {
        FloodFill::new(maze.len())
    }

    /// Caps the number of moves [`FloodFill::run`] may make. Defaults to four per cell.
    pub fn with_step_limit(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Stores in each cell's `h` its distance to `goal` over the known walls.
    ///
    /// Cells cut off from the goal are left at [`UNREACHED`].
    pub fn flood(&mut self, maze: &mut Maze, goal: CellId) -> Result<()> {
        if maze.len() > self.queue.capacity() {
            return Err(MazeError::CapacityExceeded {
                resource: "flood fill queue",
                requested: maze.len(),
                capacity: self.queue.capacity(),
            });
        }
        maze.clear_heuristics();
        self.queue.clear();

        maze.cell_mut(goal).h = 0;
        self.queue.insert(0, goal)?;

        while let Some((distance, id)) = self.queue.extract_min() {
            maze.cell_mut(id).visited = true;

            self.edges.clear();
            maze.expand(id, &mut self.edges);
            for &next in &self.edges {
                let cell = maze.cell_mut(next);
                if cell.visited || cell.h <= distance + 1 {
                    continue;
                }
                let queued = cell.h != UNREACHED;
                cell.h = distance + 1;
                if queued {
                    self.queue.decrease_priority(next, distance + 1)?;
                } else {
                    self.queue.insert(distance + 1, next)?;
                }
            }
        }
        Ok(())
    }

    /// First open neighbour, in North, East, South, West order, that is closer to the goal.
    pub fn next_move(&mut self, maze: &Maze, from: CellId) -> Option<Direction> {
        let here = maze.cell(from).h;
        self.edges.clear();
        maze.expand(from, &mut self.edges);
        self.edges
            .iter()
            .find(|&&next| maze.cell(next).h < here)
            .and_then(|&next| direction_between(maze.point(from), maze.point(next)))
    }

    /// Drives `mouse` to the navigator's goal, sensing before every move. Returns the number of
    /// moves made.
    pub fn run(
        &mut self,
        maze: &mut Maze,
        navigator: &mut Navigator,
        mouse: &mut impl Mouse,
    ) -> Result<usize> {
        let limit = self.max_steps.unwrap_or(maze.len() * 4);
        let mut steps = 0;
        loop {
            let sensed = mouse.sense(navigator);
            navigator.apply_sensor_walls(maze, sensed);

            if navigator.at_goal() {
                debug!(
                    "flood fill reached {} in {steps} moves",
                    maze.point(navigator.goal())
                );
                return Ok(steps);
            }
            if steps == limit {
                return Err(MazeError::StepLimit { limit });
            }

            self.flood(maze, navigator.goal())?;
            let current = navigator.current();
            let no_path = MazeError::NoPathExists {
                start: maze.point(current),
                goal: maze.point(navigator.goal()),
            };
            if maze.cell(current).h == UNREACHED {
                return Err(no_path);
            }
            let direction = self.next_move(maze, current).ok_or(no_path)?;
            trace!(
                "flood fill: {} is {} from the goal, heading {:?}",
                maze.point(current),
                maze.cell(current).h,
                direction
            );

            mouse.travel(direction)?;
            navigator.step(maze, direction)?;
            steps += 1;
        }
    }
}
