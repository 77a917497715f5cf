use std::io::{Read, Write};

use micromaze_core::{direction_between, Direction, Point};

/// Route found by [`AStarSearcher`](crate::AStarSearcher), start first and goal last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Path { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Number of moves, one less than the number of points.
    pub fn cost(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// The move to hand to the motor layer, or `None` if already at the goal.
    pub fn first_move(&self) -> Option<Direction> {
        self.directions().next()
    }

    /// Every move along the route.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.points
            .windows(2)
            .filter_map(|pair| direction_between(pair[0], pair[1]))
    }

    /// Writes the route as a path frame.
    pub fn save(&self, to: &mut impl Write) -> std::io::Result<()> {
        micromaze_nav::save_path(&self.points, to)
    }

    pub fn load(from: &mut impl Read) -> std::io::Result<Path> {
        micromaze_nav::load_path(from).map(Path::new)
    }
}
