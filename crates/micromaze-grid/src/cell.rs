use enumset::EnumSet;
use micromaze_core::{Direction, HeapKey, Point};

/// g/h value of a cell the current search has not reached.
pub const UNREACHED: u32 = u32::MAX;

/// Handle to a cell of a [`Maze`](crate::Maze): its row-major index.
///
/// Handles are only meaningful for the maze that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u16);

impl CellId {
    #[inline(always)]
    pub(crate) fn from_index(index: usize) -> CellId {
        debug_assert!(index < u16::MAX as usize);
        CellId(index as u16)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl HeapKey for CellId {
    #[inline(always)]
    fn heap_key(&self) -> usize {
        self.index()
    }
}

/// One maze square: permanent wall state plus the transient fields of the current search.
#[derive(Clone, Debug)]
pub struct Cell {
    point: Point,
    pub(crate) walls: EnumSet<Direction>,
    /// Cost of the best known route from the search origin.
    pub g: u32,
    /// Heuristic estimate of the remaining cost.
    pub h: u32,
    /// Predecessor on the best known route. Always points back toward the search origin.
    pub parent: Option<CellId>,
    /// Closed flag: the cell's cost from the origin is final.
    pub visited: bool,
}

impl Cell {
    pub(crate) fn new(point: Point) -> Self {
        Cell {
            point,
            walls: EnumSet::all(),
            g: UNREACHED,
            h: UNREACHED,
            parent: None,
            visited: false,
        }
    }

    #[inline(always)]
    pub fn point(&self) -> Point {
        self.point
    }

    /// Wall presence mask. A set bit is a wall.
    #[inline(always)]
    pub fn walls(&self) -> EnumSet<Direction> {
        self.walls
    }

    #[inline(always)]
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.contains(direction)
    }

    /// Passable sides, the complement of [`Cell::walls`].
    #[inline(always)]
    pub fn gaps(&self) -> EnumSet<Direction> {
        self.walls.complement()
    }

    /// `g + h`, saturating for cells that have not been reached.
    #[inline(always)]
    pub fn f(&self) -> u32 {
        self.g.saturating_add(self.h)
    }

    pub fn reset_search(&mut self) {
        self.g = UNREACHED;
        self.h = UNREACHED;
        self.parent = None;
        self.visited = false;
    }
}
