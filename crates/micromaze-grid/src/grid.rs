use micromaze_core::Point;

/// Row-major fixed-size 2D storage addressed by [`Point`].
pub struct Grid<T> {
    rows: u16,
    columns: u16,
    cells: Box<[T]>,
}

impl<T> Grid<T> {
    pub fn new(rows: u16, columns: u16, f: impl FnMut(Point) -> T) -> Self {
        let cells = (0..rows)
            .flat_map(move |row| (0..columns).map(move |column| Point { row, column }))
            .map(f)
            .collect();
        Grid {
            rows,
            columns,
            cells,
        }
    }

    #[inline(always)]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> u16 {
        self.columns
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn storage(&self) -> &[T] {
        &self.cells
    }

    pub fn storage_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Linear row-major index of a point, or `None` if it lies outside the grid.
    #[inline(always)]
    pub fn index_of(&self, point: Point) -> Option<usize> {
        (point.row < self.rows && point.column < self.columns).then(|| {
            self.columns as usize * point.row as usize + point.column as usize
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_is_row_major() {
        let grid = Grid::new(2, 3, |p| (p.row, p.column));
        assert_eq!(grid.len(), 6);
        assert_eq!(
            grid.storage(),
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        for (i, &(row, column)) in grid.storage().iter().enumerate() {
            assert_eq!(grid.index_of(Point::new(row, column)), Some(i));
        }
    }

    #[test]
    fn index_of_rejects_points_outside() {
        let grid = Grid::new(2, 3, |_| 0u8);
        assert_eq!(grid.index_of(Point::new(2, 0)), None);
        assert_eq!(grid.index_of(Point::new(0, 3)), None);
        assert_eq!(grid.index_of(Point::new(1, 2)), Some(5));
    }
}
