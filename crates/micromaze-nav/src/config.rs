use log::debug;
use micromaze_core::{Direction, Point, Result};
use micromaze_grid::Maze;
use serde::{Deserialize, Serialize};

use crate::Navigator;

/// Description of a run: maze size, where the mouse starts and where it is headed.
///
/// Missing fields take the classic 16x16 competition layout: start in the south-west corner
/// facing north, goal at the centre.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub rows: u16,
    pub columns: u16,
    pub start: Point,
    pub goal: Point,
    pub facing: Direction,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        NavigatorConfig {
            rows: 16,
            columns: 16,
            start: Point::new(15, 0),
            goal: Point::new(7, 7),
            facing: Direction::North,
        }
    }
}

impl NavigatorConfig {
    /// Creates a fully walled maze of the configured size and a navigator on the start cell.
    pub fn build(&self) -> Result<(Maze, Navigator)> {
        let maze = Maze::create(self.rows, self.columns)?;
        let navigator = Navigator::new(&maze, self.start, self.goal, self.facing)?;
        debug!(
            "built {}x{} maze, start {} facing {:?}, goal {}",
            self.rows, self.columns, self.start, self.facing, self.goal
        );
        Ok((maze, navigator))
    }
}

#[cfg(test)]
mod tests {
    use micromaze_core::MazeError;

    use super::*;

    #[test]
    fn defaults_describe_a_competition_maze() {
        let (maze, nav) = NavigatorConfig::default().build().unwrap();
        assert_eq!((maze.rows(), maze.columns()), (16, 16));
        assert_eq!(maze.point(nav.current()), Point::new(15, 0));
        assert_eq!(maze.point(nav.goal()), Point::new(7, 7));
        assert_eq!(nav.facing(), Direction::North);
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let config: NavigatorConfig = serde_json::from_str(
            r#"{
                "rows": 6,
                "columns": 4,
                "start": { "row": 5, "column": 2 },
                "goal": { "row": 0, "column": 1 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.facing, Direction::North);
        let (maze, nav) = config.build().unwrap();
        assert_eq!(maze.len(), 24);
        assert_eq!(maze.point(nav.start()), Point::new(5, 2));

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<NavigatorConfig>(&json).unwrap(), config);
    }

    #[test]
    fn goal_outside_maze_is_rejected() {
        let config = NavigatorConfig {
            rows: 4,
            columns: 4,
            ..Default::default()
        };
        assert!(matches!(config.build(), Err(MazeError::OutOfBounds { .. })));
    }
}
