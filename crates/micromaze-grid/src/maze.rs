use enumset::EnumSet;
use log::{trace, warn};
use micromaze_core::{Direction, MazeError, Point, Result};

use crate::{Cell, CellId, Grid};

/// Largest number of cells a maze may hold, so that every [`CellId`] and heap slot fits in a
/// `u16`.
pub const MAX_CELLS: usize = u16::MAX as usize;

/// How [`Maze::apply_walls`] combines a mask with a cell's existing walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallEdit {
    /// Add a wall on every side in the mask.
    Set,
    /// Remove the wall on every side in the mask.
    Clear,
    /// Make the cell's walls exactly the mask.
    Replace,
}

/// The discovered map: a fixed arena of cells whose walls are kept two-sided.
///
/// Every wall is stored on both cells it separates, and both copies always agree. Walls toward
/// the outside of the grid are always present.
pub struct Maze {
    cells: Grid<Cell>,
}

impl Maze {
    /// Creates a fully walled maze.
    pub fn create(rows: u16, columns: u16) -> Result<Maze> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }
        let cells = rows as usize * columns as usize;
        if cells > MAX_CELLS {
            return Err(MazeError::CapacityExceeded {
                resource: "maze",
                requested: cells,
                capacity: MAX_CELLS,
            });
        }
        Ok(Maze {
            cells: Grid::new(rows, columns, Cell::new),
        })
    }

    #[inline(always)]
    pub fn rows(&self) -> u16 {
        self.cells.rows()
    }

    #[inline(always)]
    pub fn columns(&self) -> u16 {
        self.cells.columns()
    }

    /// Number of cells.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Puts every wall up and forgets any search state. This is the unexplored state used when
    /// walls are only ever opened by what the sensors see.
    pub fn initialise_empty_walled(&mut self) {
        for cell in self.cells.storage_mut() {
            cell.walls = EnumSet::all();
            cell.reset_search();
        }
    }

    /// Removes every interior wall, keeping the perimeter. This is the optimistic unexplored
    /// state used when walls are added as the sensors find them.
    pub fn initialise_open(&mut self) {
        let (rows, columns) = (self.rows(), self.columns());
        for cell in self.cells.storage_mut() {
            let Point { row, column } = cell.point();
            let mut walls = EnumSet::empty();
            if row == 0 {
                walls |= Direction::North;
            }
            if row + 1 == rows {
                walls |= Direction::South;
            }
            if column == 0 {
                walls |= Direction::West;
            }
            if column + 1 == columns {
                walls |= Direction::East;
            }
            cell.walls = walls;
            cell.reset_search();
        }
    }

    pub fn cell_at(&self, point: Point) -> Result<CellId> {
        self.cells
            .index_of(point)
            .map(CellId::from_index)
            .ok_or(MazeError::OutOfBounds {
                row: point.row as i32,
                column: point.column as i32,
                rows: self.rows(),
                columns: self.columns(),
            })
    }

    #[track_caller]
    #[inline(always)]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells.storage()[id.index()]
    }

    #[track_caller]
    #[inline(always)]
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells.storage_mut()[id.index()]
    }

    #[inline(always)]
    pub fn point(&self, id: CellId) -> Point {
        self.cell(id).point()
    }

    /// Every cell handle in row-major order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.len()).map(CellId::from_index)
    }

    pub fn neighbor_in_direction(&self, id: CellId, direction: Direction) -> Result<CellId> {
        let point = self.point(id);
        direction
            .step(point)
            .and_then(|next| self.cells.index_of(next))
            .map(CellId::from_index)
            .ok_or_else(|| {
                let (dr, dc) = direction.offset();
                MazeError::OutOfBounds {
                    row: point.row as i32 + dr,
                    column: point.column as i32 + dc,
                    rows: self.rows(),
                    columns: self.columns(),
                }
            })
    }

    #[inline(always)]
    pub fn walls(&self, id: CellId) -> EnumSet<Direction> {
        self.cell(id).walls()
    }

    #[inline(always)]
    pub fn has_wall(&self, id: CellId, direction: Direction) -> bool {
        self.cell(id).has_wall(direction)
    }

    /// Flag-style wall mutation: `set` adds walls, `unset` removes them.
    ///
    /// Asking for both at once on a non-empty mask is rejected with
    /// [`MazeError::ConflictingWallEdit`] and leaves the maze untouched; use
    /// [`WallEdit::Replace`] to overwrite a cell's walls. Asking for neither does nothing.
    pub fn set_or_clear_walls(
        &mut self,
        id: CellId,
        mask: EnumSet<Direction>,
        set: bool,
        unset: bool,
    ) -> Result<()> {
        let edit = match (set, unset) {
            (true, false) => WallEdit::Set,
            (false, true) => WallEdit::Clear,
            (true, true) if !mask.is_empty() => {
                return Err(MazeError::ConflictingWallEdit {
                    mask: mask.as_u8(),
                })
            }
            _ => return Ok(()),
        };
        self.apply_walls(id, mask, edit);
        Ok(())
    }

    /// Applies a wall mask to a cell and mirrors every change onto the neighbours.
    pub fn apply_walls(&mut self, id: CellId, mask: EnumSet<Direction>, edit: WallEdit) {
        for direction in Direction::ALL {
            let wall = match edit {
                WallEdit::Set if mask.contains(direction) => true,
                WallEdit::Clear if mask.contains(direction) => false,
                WallEdit::Replace => mask.contains(direction),
                _ => continue,
            };
            if wall {
                self.set_wall(id, direction);
            } else {
                self.clear_wall(id, direction);
            }
        }
        debug_assert_eq!(self.check_cell_symmetry(id), Ok(()));
    }

    pub fn set_wall(&mut self, id: CellId, direction: Direction) {
        self.cell_mut(id).walls |= direction;
        if let Ok(next) = self.neighbor_in_direction(id, direction) {
            self.cell_mut(next).walls |= direction.backwards();
        }
    }

    /// Opens the wall on one side of a cell. Perimeter walls stay up.
    pub fn clear_wall(&mut self, id: CellId, direction: Direction) {
        match self.neighbor_in_direction(id, direction) {
            Ok(next) => {
                self.cell_mut(id).walls.remove(direction);
                self.cell_mut(next).walls.remove(direction.backwards());
            }
            Err(_) => {
                warn!(
                    "ignoring request to open the perimeter wall at {} facing {:?}",
                    self.point(id),
                    direction
                );
            }
        }
    }

    /// Resets the search fields of every cell so a new search starts from a clean slate.
    pub fn clear_heuristics(&mut self) {
        for cell in self.cells.storage_mut() {
            cell.reset_search();
        }
    }

    /// Pushes the neighbours reachable from `id` without crossing a wall, in North, East,
    /// South, West order.
    pub fn expand(&self, id: CellId, edges: &mut Vec<CellId>) {
        let walls = self.walls(id);
        for direction in Direction::ALL {
            if walls.contains(direction) {
                continue;
            }
            if let Ok(next) = self.neighbor_in_direction(id, direction) {
                edges.push(next);
            }
        }
    }

    /// Verifies the two-sided wall invariant for the whole maze.
    pub fn check_wall_symmetry(&self) -> Result<()> {
        self.ids().try_for_each(|id| self.check_cell_symmetry(id))
    }

    fn check_cell_symmetry(&self, id: CellId) -> Result<()> {
        let walls = self.walls(id);
        for direction in Direction::ALL {
            let mirrored = match self.neighbor_in_direction(id, direction) {
                Ok(next) => self.has_wall(next, direction.backwards()),
                Err(_) => true,
            };
            if walls.contains(direction) != mirrored {
                return Err(MazeError::InconsistentWallState {
                    point: self.point(id),
                    direction,
                });
            }
        }
        Ok(())
    }

    /// Overwrites every cell's walls. The caller has already validated symmetry.
    pub(crate) fn overwrite_walls(&mut self, walls: impl IntoIterator<Item = EnumSet<Direction>>) {
        for (cell, walls) in self.cells.storage_mut().iter_mut().zip(walls) {
            cell.walls = walls;
        }
        trace!("overwrote walls of {} cells", self.len());
        debug_assert_eq!(self.check_wall_symmetry(), Ok(()));
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use super::*;

    fn id(maze: &Maze, row: u16, column: u16) -> CellId {
        maze.cell_at(Point::new(row, column)).unwrap()
    }

    #[test]
    fn create_rejects_bad_dimensions() {
        assert_eq!(
            Maze::create(0, 4).err(),
            Some(MazeError::InvalidDimensions { rows: 0, columns: 4 })
        );
        assert!(matches!(
            Maze::create(256, 256),
            Err(MazeError::CapacityExceeded { .. })
        ));
        let maze = Maze::create(3, 5).unwrap();
        assert_eq!(maze.len(), 15);
        assert_eq!(maze.point(id(&maze, 2, 4)), Point::new(2, 4));
    }

    #[test]
    fn new_maze_is_fully_walled() {
        let maze = Maze::create(2, 2).unwrap();
        for cell in maze.ids() {
            assert_eq!(maze.walls(cell), EnumSet::all());
        }
        assert_eq!(maze.check_wall_symmetry(), Ok(()));
    }

    #[test]
    fn lookups_report_out_of_bounds() {
        let maze = Maze::create(2, 3).unwrap();
        assert!(matches!(
            maze.cell_at(Point::new(2, 0)),
            Err(MazeError::OutOfBounds { row: 2, column: 0, .. })
        ));
        let corner = id(&maze, 0, 0);
        assert!(matches!(
            maze.neighbor_in_direction(corner, Direction::North),
            Err(MazeError::OutOfBounds { row: -1, column: 0, .. })
        ));
        assert_eq!(
            maze.neighbor_in_direction(corner, Direction::East),
            Ok(id(&maze, 0, 1))
        );
        assert_eq!(
            maze.neighbor_in_direction(corner, Direction::South),
            Ok(id(&maze, 1, 0))
        );
    }

    #[test]
    fn clearing_a_wall_opens_both_sides() {
        let mut maze = Maze::create(2, 2).unwrap();
        let a = id(&maze, 0, 0);
        let b = id(&maze, 0, 1);
        maze.set_or_clear_walls(a, EnumSet::only(Direction::East), false, true)
            .unwrap();
        assert!(!maze.has_wall(a, Direction::East));
        assert!(!maze.has_wall(b, Direction::West));

        maze.set_or_clear_walls(b, EnumSet::only(Direction::West), true, false)
            .unwrap();
        assert!(maze.has_wall(a, Direction::East));
        assert!(maze.has_wall(b, Direction::West));
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        let mut maze = Maze::create(2, 2).unwrap();
        let a = id(&maze, 0, 0);
        assert_eq!(
            maze.set_or_clear_walls(a, Direction::East | Direction::South, true, true),
            Err(MazeError::ConflictingWallEdit { mask: 0b0110 })
        );
        assert_eq!(maze.walls(a), EnumSet::all());
        assert_eq!(
            maze.set_or_clear_walls(a, EnumSet::all(), false, false),
            Ok(())
        );
    }

    #[test]
    fn perimeter_walls_cannot_be_cleared() {
        let mut maze = Maze::create(1, 2).unwrap();
        let a = id(&maze, 0, 0);
        maze.apply_walls(a, EnumSet::empty(), WallEdit::Replace);
        assert_eq!(maze.walls(a), Direction::North | Direction::South | Direction::West);
        assert_eq!(maze.check_wall_symmetry(), Ok(()));
    }

    #[test]
    fn open_maze_keeps_only_the_perimeter() {
        let mut maze = Maze::create(3, 3).unwrap();
        maze.initialise_open();
        assert_eq!(maze.walls(id(&maze, 1, 1)), EnumSet::empty());
        assert_eq!(
            maze.walls(id(&maze, 0, 2)),
            Direction::North | Direction::East
        );
        assert_eq!(maze.check_wall_symmetry(), Ok(()));

        let mut edges = vec![];
        maze.expand(id(&maze, 0, 0), &mut edges);
        assert_eq!(edges, vec![id(&maze, 0, 1), id(&maze, 1, 0)]);
    }

    #[test]
    fn clear_heuristics_resets_search_fields() {
        let mut maze = Maze::create(2, 2).unwrap();
        let a = id(&maze, 1, 1);
        let cell = maze.cell_mut(a);
        cell.g = 3;
        cell.h = 1;
        cell.visited = true;
        cell.parent = Some(CellId::from_index(0));
        maze.clear_heuristics();
        let cell = maze.cell(a);
        assert_eq!(
            (cell.g, cell.h, cell.parent, cell.visited),
            (u32::MAX, u32::MAX, None, false)
        );
    }

    #[test]
    fn random_edits_keep_walls_symmetric() {
        let mut rng = Pcg64::seed_from_u64(7);
        let mut maze = Maze::create(5, 6).unwrap();
        for _ in 0..2000 {
            let cell = CellId::from_index(rng.gen_range(0..maze.len()));
            let mask = EnumSet::from_u8_truncated(rng.gen());
            let edit = match rng.gen_range(0..3) {
                0 => WallEdit::Set,
                1 => WallEdit::Clear,
                _ => WallEdit::Replace,
            };
            maze.apply_walls(cell, mask, edit);
        }
        assert_eq!(maze.check_wall_symmetry(), Ok(()));
    }
}
