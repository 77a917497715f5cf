use log::{debug, trace};
pub use micromaze_core::*;
pub use micromaze_explore as explore;
pub use micromaze_grid as grid;
pub use micromaze_nav as nav;

use micromaze_grid::{CellId, Maze, UNREACHED};
use micromaze_nav::Navigator;

mod path;

pub use self::path::*;

/// Progress of the most recent [`AStarSearcher::search`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Initialised,
    Searching,
    Found,
    Exhausted,
}

/// A* over the known walls of a [`Maze`], with unit step cost and Manhattan distance as the
/// heuristic.
///
/// The open list is allocated once and reused across searches. Search bookkeeping lives in the
/// maze's cells and is reset at the start of every search.
pub struct AStarSearcher {
    open: BinaryHeap<CellId>,
    edges: Vec<CellId>,
    state: SearchState,
    expansions: usize,
}

impl AStarSearcher {
    /// Creates a searcher for mazes of up to `capacity` cells.
    pub fn new(capacity: usize) -> Self {
        AStarSearcher {
            open: BinaryHeap::new(capacity),
            edges: vec![],
            state: SearchState::Idle,
            expansions: 0,
        }
    }

    pub fn for_maze(maze: &Maze) -> Self {
        AStarSearcher::new(maze.len())
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Cells taken off the open list by the last search. Never more than the cell count.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Shortest route from `start` to `goal` that crosses no known wall.
    ///
    /// Ties between equal f-scores are broken by insertion order, so repeated searches over
    /// the same walls return the same route.
    pub fn search(&mut self, maze: &mut Maze, start: Point, goal: Point) -> Result<Path> {
        self.state = SearchState::Idle;
        self.expansions = 0;
        let start_id = maze.cell_at(start)?;
        let goal_id = maze.cell_at(goal)?;
        if maze.len() > self.open.capacity() {
            return Err(MazeError::CapacityExceeded {
                resource: "open list",
                requested: maze.len(),
                capacity: self.open.capacity(),
            });
        }

        maze.clear_heuristics();
        self.open.clear();
        self.state = SearchState::Initialised;

        let h = manhattan_distance(start, goal);
        let cell = maze.cell_mut(start_id);
        cell.g = 0;
        cell.h = h;
        self.open.insert(h, start_id)?;
        self.state = SearchState::Searching;

        while let Some((f, id)) = self.open.extract_min() {
            self.expansions += 1;
            if id == goal_id {
                let path = Path::new(reconstruct(maze, goal_id));
                self.state = SearchState::Found;
                debug!(
                    "found route {start} -> {goal} of cost {} after {} expansions",
                    path.cost(),
                    self.expansions
                );
                return Ok(path);
            }

            let cell = maze.cell_mut(id);
            cell.visited = true;
            let g = cell.g;
            trace!("expanding {} with g = {g}, f = {f}", cell.point());

            self.edges.clear();
            maze.expand(id, &mut self.edges);

            for &next in &self.edges {
                let successor = maze.cell_mut(next);
                let new_g = g + 1;
                if successor.visited || new_g >= successor.g {
                    continue;
                }
                if successor.h == UNREACHED {
                    successor.h = manhattan_distance(successor.point(), goal);
                }
                successor.g = new_g;
                successor.parent = Some(id);
                let new_f = successor.f();
                if self.open.contains(next) {
                    self.open.decrease_priority(next, new_f)?;
                } else {
                    self.open.insert(new_f, next)?;
                }
            }
        }

        self.state = SearchState::Exhausted;
        debug!(
            "no route {start} -> {goal} after {} expansions",
            self.expansions
        );
        Err(MazeError::NoPathExists { start, goal })
    }

    /// Searches from the navigator's current cell to its goal.
    pub fn search_from(&mut self, maze: &mut Maze, navigator: &Navigator) -> Result<Path> {
        let start = maze.point(navigator.current());
        let goal = maze.point(navigator.goal());
        self.search(maze, start, goal)
    }
}

fn reconstruct(maze: &Maze, goal: CellId) -> Vec<Point> {
    let mut points = vec![maze.point(goal)];
    let mut node = goal;
    while let Some(parent) = maze.cell(node).parent {
        points.push(maze.point(parent));
        node = parent;
    }
    points.reverse();
    points
}
