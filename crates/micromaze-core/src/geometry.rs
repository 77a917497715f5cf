use std::fmt;

use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

/// A grid location. Row 0 is the northern edge of the maze, column 0 the western edge.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    pub row: u16,
    pub column: u16,
}

impl Point {
    pub const fn new(row: u16, column: u16) -> Self {
        Point { row, column }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Absolute direction in the grid frame.
///
/// The declaration order fixes the bit of each direction inside an `EnumSet<Direction>`, which
/// is also the bit layout of the serialised wall masks: North = 1, East = 2, South = 4,
/// West = 8.
#[derive(EnumSetType, Debug, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

/// Direction in the robot frame, relative to the way the robot is facing.
///
/// Bit layout inside an `EnumSet<RelativeDirection>` matches the sensor driver byte:
/// Front = 1, Right = 2, Back = 4, Left = 8.
#[derive(EnumSetType, Debug, Hash, Serialize, Deserialize)]
pub enum RelativeDirection {
    Front,
    Right,
    Back,
    Left,
}

impl Direction {
    /// Every direction, in the order neighbours are expanded.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub fn from_index(index: usize) -> Direction {
        Direction::ALL[index % 4]
    }

    /// Rotates clockwise by the given number of quarter turns. Negative values turn
    /// anticlockwise.
    pub fn rotate(self, quarter_turns: i32) -> Direction {
        Direction::from_index((self as i32 + quarter_turns).rem_euclid(4) as usize)
    }

    pub fn backwards(self) -> Direction {
        self.rotate(2)
    }

    /// Row and column offset of a single step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// The point one step away, or `None` if that would leave the `u16` coordinate space.
    ///
    /// This does not know about maze dimensions; callers check the upper bounds.
    pub fn step(self, from: Point) -> Option<Point> {
        let (dr, dc) = self.offset();
        Some(Point {
            row: from.row.checked_add_signed(dr as i16)?,
            column: from.column.checked_add_signed(dc as i16)?,
        })
    }
}

impl RelativeDirection {
    pub const ALL: [RelativeDirection; 4] = [
        RelativeDirection::Front,
        RelativeDirection::Right,
        RelativeDirection::Back,
        RelativeDirection::Left,
    ];

    /// Clockwise quarter turns from the robot's heading.
    #[inline(always)]
    pub fn quarter_turns(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    pub fn from_index(index: usize) -> RelativeDirection {
        RelativeDirection::ALL[index % 4]
    }
}

/// Direction of travel from `a` to the grid-adjacent point `b`.
///
/// Returns `None` when the points are not exactly one step apart along a single axis.
pub fn direction_between(a: Point, b: Point) -> Option<Direction> {
    let dr = b.row as i32 - a.row as i32;
    let dc = b.column as i32 - a.column as i32;
    match (dr, dc) {
        (-1, 0) => Some(Direction::North),
        (0, 1) => Some(Direction::East),
        (1, 0) => Some(Direction::South),
        (0, -1) => Some(Direction::West),
        _ => None,
    }
}

pub fn relative_to_cardinal(facing: Direction, relative: RelativeDirection) -> Direction {
    facing.rotate(relative.quarter_turns())
}

pub fn cardinal_to_relative(facing: Direction, direction: Direction) -> RelativeDirection {
    RelativeDirection::from_index((direction as i32 - facing as i32).rem_euclid(4) as usize)
}

/// Minimum number of quarter turns needed to go from `facing` to `direction`.
///
/// Positive values are clockwise, negative anticlockwise. A reversal is reported as `2`.
pub fn turn_offset(facing: Direction, direction: Direction) -> i8 {
    match (direction as i8 - facing as i8).rem_euclid(4) {
        3 => -1,
        turns => turns,
    }
}

/// Rotates a whole robot-frame reading into the grid frame.
pub fn cardinal_mask(
    facing: Direction,
    relative: EnumSet<RelativeDirection>,
) -> EnumSet<Direction> {
    relative
        .iter()
        .map(|rel| relative_to_cardinal(facing, rel))
        .collect()
}

/// Taxicab distance. Admissible for the maze since every move is a unit-cost orthogonal step.
pub fn manhattan_distance(a: Point, b: Point) -> u32 {
    a.row.abs_diff(b.row) as u32 + a.column.abs_diff(b.column) as u32
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Point::new(3, 3), Point::new(2, 3), Some(Direction::North))]
    #[case(Point::new(3, 3), Point::new(3, 4), Some(Direction::East))]
    #[case(Point::new(3, 3), Point::new(4, 3), Some(Direction::South))]
    #[case(Point::new(3, 3), Point::new(3, 2), Some(Direction::West))]
    #[case(Point::new(3, 3), Point::new(3, 3), None)]
    #[case(Point::new(3, 3), Point::new(4, 4), None)]
    #[case(Point::new(3, 3), Point::new(3, 5), None)]
    fn direction_between_adjacent_points(
        #[case] a: Point,
        #[case] b: Point,
        #[case] expected: Option<Direction>,
    ) {
        assert_eq!(direction_between(a, b), expected);
    }

    #[rstest]
    #[case(Direction::North, RelativeDirection::Front, Direction::North)]
    #[case(Direction::North, RelativeDirection::Right, Direction::East)]
    #[case(Direction::North, RelativeDirection::Back, Direction::South)]
    #[case(Direction::North, RelativeDirection::Left, Direction::West)]
    #[case(Direction::East, RelativeDirection::Right, Direction::South)]
    #[case(Direction::South, RelativeDirection::Left, Direction::East)]
    #[case(Direction::West, RelativeDirection::Right, Direction::North)]
    #[case(Direction::West, RelativeDirection::Back, Direction::East)]
    fn relative_rotation(
        #[case] facing: Direction,
        #[case] relative: RelativeDirection,
        #[case] expected: Direction,
    ) {
        assert_eq!(relative_to_cardinal(facing, relative), expected);
        assert_eq!(cardinal_to_relative(facing, expected), relative);
    }

    #[test]
    fn turn_offsets_take_the_short_way() {
        use Direction::*;
        assert_eq!(turn_offset(North, North), 0);
        assert_eq!(turn_offset(North, East), 1);
        assert_eq!(turn_offset(North, South), 2);
        assert_eq!(turn_offset(North, West), -1);
        assert_eq!(turn_offset(West, North), 1);
        assert_eq!(turn_offset(East, North), -1);
    }

    #[test]
    fn sensor_masks_rotate_with_heading() {
        let reading = RelativeDirection::Front | RelativeDirection::Left;
        assert_eq!(
            cardinal_mask(Direction::East, reading),
            Direction::East | Direction::North
        );
        assert_eq!(
            cardinal_mask(Direction::South, reading),
            Direction::South | Direction::East
        );
        assert_eq!(reading.as_u8(), 0b1001);
    }

    #[test]
    fn step_stops_at_coordinate_underflow() {
        assert_eq!(Direction::North.step(Point::new(0, 4)), None);
        assert_eq!(Direction::West.step(Point::new(2, 0)), None);
        assert_eq!(Direction::South.step(Point::new(0, 4)), Some(Point::new(1, 4)));
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Point::new(1, 7);
        let b = Point::new(5, 2);
        assert_eq!(manhattan_distance(a, b), 9);
        assert_eq!(manhattan_distance(b, a), 9);
        assert_eq!(manhattan_distance(a, a), 0);
    }

    #[test]
    fn wall_bits_follow_declaration_order() {
        assert_eq!(EnumSet::only(Direction::North).as_u8(), 1);
        assert_eq!(EnumSet::only(Direction::East).as_u8(), 2);
        assert_eq!(EnumSet::only(Direction::South).as_u8(), 4);
        assert_eq!(EnumSet::only(Direction::West).as_u8(), 8);
    }
}
