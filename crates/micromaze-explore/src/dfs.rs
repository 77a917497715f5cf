use log::{debug, trace};
use micromaze_core::{direction_between, MazeError, Result};
use micromaze_grid::{CellId, Maze};
use micromaze_nav::Navigator;

use crate::Mouse;

/// Maps every cell reachable from the mouse's position by depth-first traversal.
///
/// The mouse advances into the first unexplored open neighbour (North, East, South, West order)
/// and backs up along its own trail when there is none, so it finishes on the cell it started
/// from.
#[derive(Default)]
pub struct DepthFirstMapper {
    explored: Vec<bool>,
    stack: Vec<CellId>,
    edges: Vec<CellId>,
}

impl DepthFirstMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells sensed by the last run, indexed by [`CellId::index`].
    pub fn explored(&self) -> &[bool] {
        &self.explored
    }

    pub fn is_explored(&self, id: CellId) -> bool {
        self.explored.get(id.index()).copied().unwrap_or(false)
    }

    /// Explores from the navigator's current cell. Returns the number of moves made.
    pub fn run(
        &mut self,
        maze: &mut Maze,
        navigator: &mut Navigator,
        mouse: &mut impl Mouse,
    ) -> Result<usize> {
        self.explored.clear();
        self.explored.resize(maze.len(), false);
        self.stack.clear();

        let origin = navigator.current();
        self.sense(maze, navigator, mouse);
        self.stack.push(origin);

        let mut steps = 0;
        while let Some(&here) = self.stack.last() {
            self.edges.clear();
            maze.expand(here, &mut self.edges);

            let target = match self.edges.iter().find(|&&next| !self.explored[next.index()]) {
                Some(&next) => {
                    self.stack.push(next);
                    next
                }
                None => {
                    self.stack.pop();
                    match self.stack.last() {
                        Some(&back) => back,
                        None => break,
                    }
                }
            };

            let direction = direction_between(maze.point(here), maze.point(target)).ok_or(
                MazeError::OutOfBounds {
                    row: maze.point(target).row as i32,
                    column: maze.point(target).column as i32,
                    rows: maze.rows(),
                    columns: maze.columns(),
                },
            )?;
            mouse.travel(direction)?;
            navigator.step(maze, direction)?;
            steps += 1;

            if !self.explored[target.index()] {
                self.sense(maze, navigator, mouse);
            }
        }

        debug!(
            "depth-first mapping explored {} cells in {steps} moves",
            self.explored.iter().filter(|&&e| e).count()
        );
        Ok(steps)
    }

    fn sense(&mut self, maze: &mut Maze, navigator: &Navigator, mouse: &mut impl Mouse) {
        let sensed = mouse.sense(navigator);
        navigator.apply_sensor_walls(maze, sensed);
        self.explored[navigator.current().index()] = true;
        trace!("explored {}", maze.point(navigator.current()));
    }
}

/// True if every cell reachable from `from` over the known walls has been explored.
pub fn all_reachable_explored(maze: &Maze, from: CellId, explored: &[bool]) -> bool {
    let mut seen = vec![false; maze.len()];
    let mut stack = vec![from];
    let mut edges = vec![];
    seen[from.index()] = true;

    while let Some(id) = stack.pop() {
        if !explored.get(id.index()).copied().unwrap_or(false) {
            return false;
        }
        edges.clear();
        maze.expand(id, &mut edges);
        for &next in &edges {
            if !seen[next.index()] {
                seen[next.index()] = true;
                stack.push(next);
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use enumset::EnumSet;
    use micromaze_core::{Direction, Point};
    use micromaze_grid::WallEdit;

    use super::*;
    use crate::fixtures::reference_maze;
    use crate::SimulatedMouse;

    fn unknown_map() -> Maze {
        let mut map = Maze::create(6, 4).unwrap();
        map.initialise_open();
        map
    }

    #[test]
    fn maps_the_whole_reference_maze() {
        let mut map = unknown_map();
        let mut nav = Navigator::new(&map, Point::new(5, 2), Point::new(0, 1), Direction::North)
            .unwrap();
        let mut mouse = SimulatedMouse::new(reference_maze(), Point::new(5, 2)).unwrap();

        let mut mapper = DepthFirstMapper::new();
        let steps = mapper.run(&mut map, &mut nav, &mut mouse).unwrap();

        assert!(mapper.explored().iter().all(|&e| e));
        assert!(all_reachable_explored(&map, nav.current(), mapper.explored()));
        assert_eq!(map.serialise(), mouse.truth().serialise());

        // Every corridor is walked once in each direction.
        assert_eq!(steps, 2 * (map.len() - 1));
        assert_eq!(mouse.position(), Point::new(5, 2));
        assert_eq!(nav.current(), nav.start());
    }

    #[test]
    fn sealed_off_cells_are_left_alone() {
        let mut truth = Maze::create(2, 2).unwrap();
        let a = truth.cell_at(Point::new(0, 0)).unwrap();
        truth.apply_walls(a, Direction::East | Direction::South, WallEdit::Clear);

        let mut map = Maze::create(2, 2).unwrap();
        map.initialise_open();
        let mut nav = Navigator::new(&map, Point::new(0, 0), Point::new(1, 1), Direction::East)
            .unwrap();
        let mut mouse = SimulatedMouse::new(truth, Point::new(0, 0)).unwrap();

        let mut mapper = DepthFirstMapper::new();
        assert_eq!(mapper.run(&mut map, &mut nav, &mut mouse).unwrap(), 4);

        let far = map.cell_at(Point::new(1, 1)).unwrap();
        assert!(!mapper.is_explored(far));
        assert!(all_reachable_explored(&map, nav.current(), mapper.explored()));
        assert_eq!(map.walls(far), EnumSet::all());
    }

    #[test]
    fn unexplored_reachable_cell_is_detected() {
        let mut map = Maze::create(1, 2).unwrap();
        map.initialise_open();
        let origin = map.cell_at(Point::new(0, 0)).unwrap();
        assert!(!all_reachable_explored(&map, origin, &[true, false]));
        assert!(all_reachable_explored(&map, origin, &[true, true]));
    }
}
