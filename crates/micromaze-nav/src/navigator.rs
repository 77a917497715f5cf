use enumset::EnumSet;
use log::{debug, trace};
use micromaze_core::{
    cardinal_mask, cardinal_to_relative, turn_offset, Direction, MazeError, Point,
    RelativeDirection, Result,
};
use micromaze_grid::{direction_marker, CellId, Maze, WallEdit};

/// Position, heading and objective of the mouse within one [`Maze`].
///
/// The navigator only holds handles; every operation that needs wall or coordinate data takes
/// the maze it was created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigator {
    current: CellId,
    start: CellId,
    goal: CellId,
    facing: Direction,
}

impl Navigator {
    /// Places the mouse on `start`.
    pub fn new(maze: &Maze, start: Point, goal: Point, facing: Direction) -> Result<Navigator> {
        let start = maze.cell_at(start)?;
        let goal = maze.cell_at(goal)?;
        Ok(Navigator {
            current: start,
            start,
            goal,
            facing,
        })
    }

    #[inline(always)]
    pub fn current(&self) -> CellId {
        self.current
    }

    #[inline(always)]
    pub fn start(&self) -> CellId {
        self.start
    }

    #[inline(always)]
    pub fn goal(&self) -> CellId {
        self.goal
    }

    #[inline(always)]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn set_goal(&mut self, maze: &Maze, goal: Point) -> Result<()> {
        self.goal = maze.cell_at(goal)?;
        debug!("navigator goal set to {goal}");
        Ok(())
    }

    pub fn set_start(&mut self, maze: &Maze, start: Point) -> Result<()> {
        self.start = maze.cell_at(start)?;
        Ok(())
    }

    pub fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
    }

    /// Moves the mouse without regard for walls, e.g. after it has been picked up and put down.
    pub fn teleport(&mut self, maze: &Maze, point: Point) -> Result<()> {
        self.current = maze.cell_at(point)?;
        Ok(())
    }

    #[inline(always)]
    pub fn at_goal(&self) -> bool {
        self.current == self.goal
    }

    /// Replaces the current cell's walls with a reading taken in the robot frame.
    pub fn apply_sensor_walls(&self, maze: &mut Maze, sensed: EnumSet<RelativeDirection>) {
        let walls = cardinal_mask(self.facing, sensed);
        trace!(
            "sensed {:?} at {} facing {:?}: walls {:?}",
            sensed,
            maze.point(self.current),
            self.facing,
            walls
        );
        maze.apply_walls(self.current, walls, WallEdit::Replace);
    }

    /// As [`Navigator::apply_sensor_walls`], for the raw driver byte (Front = 1, Right = 2,
    /// Back = 4, Left = 8).
    pub fn apply_sensor_bits(&self, maze: &mut Maze, bits: u8) -> Result<()> {
        let sensed = EnumSet::try_from_u8(bits).ok_or(MazeError::InvalidMask { value: bits })?;
        self.apply_sensor_walls(maze, sensed);
        Ok(())
    }

    /// Flag-style wall edit on the current cell, in the grid frame.
    pub fn modify_walls(
        &self,
        maze: &mut Maze,
        mask: EnumSet<Direction>,
        set: bool,
        unset: bool,
    ) -> Result<()> {
        maze.set_or_clear_walls(self.current, mask, set, unset)
    }

    /// Turns to `direction` and advances one cell.
    ///
    /// Fails with [`MazeError::Blocked`] if the known map has a wall that way, leaving the
    /// navigator unchanged.
    pub fn step(&mut self, maze: &Maze, direction: Direction) -> Result<CellId> {
        if maze.has_wall(self.current, direction) {
            return Err(MazeError::Blocked {
                point: maze.point(self.current),
                direction,
            });
        }
        let next = maze.neighbor_in_direction(self.current, direction)?;
        trace!(
            "step {:?} from {} to {}",
            direction,
            maze.point(self.current),
            maze.point(next)
        );
        self.current = next;
        self.facing = direction;
        Ok(next)
    }

    pub fn relative_direction(&self, direction: Direction) -> RelativeDirection {
        cardinal_to_relative(self.facing, direction)
    }

    /// Quarter turns from the current heading to `direction`, positive clockwise.
    pub fn turn_offset(&self, direction: Direction) -> i8 {
        turn_offset(self.facing, direction)
    }

    /// Draws the heading marker onto text from [`Maze::render_text`].
    pub fn insert_navigation_marker(&self, maze: &Maze, text: &mut String) -> Result<()> {
        maze.insert_marker(text, maze.point(self.current), direction_marker(self.facing))
    }
}
