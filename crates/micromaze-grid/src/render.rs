use micromaze_core::{Direction, MazeError, Point, Result};

use crate::{CellId, Maze};

/// Bytes per rendered line, newline included.
#[inline(always)]
pub fn line_width(columns: u16) -> usize {
    columns as usize * 4 + 2
}

/// Character drawn in a cell to show which way the mouse is facing.
pub fn direction_marker(direction: Direction) -> char {
    match direction {
        Direction::North => '^',
        Direction::East => '>',
        Direction::South => 'v',
        Direction::West => '<',
    }
}

impl Maze {
    /// Draws the maze as ASCII art, two lines per row plus the bottom border.
    ///
    /// ```text
    /// +---+---+
    /// |       |
    /// +   +---+
    /// |   |   |
    /// +---+---+
    /// ```
    pub fn render_text(&self) -> String {
        let width = line_width(self.columns());
        let mut text = String::with_capacity(width * (self.rows() as usize * 2 + 1));

        for row in 0..self.rows() {
            for column in 0..self.columns() {
                let id = self.cell_id(row, column);
                text += match self.has_wall(id, Direction::North) {
                    true => "+---",
                    false => "+   ",
                };
            }
            text += "+\n";

            for column in 0..self.columns() {
                let id = self.cell_id(row, column);
                text += match self.has_wall(id, Direction::West) {
                    true => "|   ",
                    false => "    ",
                };
            }
            text += "|\n";
        }
        for _ in 0..self.columns() {
            text += "+---";
        }
        text += "+\n";

        debug_assert_eq!(text.len() % width, 0);
        text
    }

    /// Overwrites the centre of a cell in text produced by [`Maze::render_text`].
    ///
    /// Non-ASCII markers are drawn as `?` so the text stays one byte per column.
    pub fn insert_marker(&self, text: &mut String, point: Point, marker: char) -> Result<()> {
        let index = self.marker_index(text, point)?;
        let marker = if marker.is_ascii() { marker } else { '?' };
        text.replace_range(index..index + 1, marker.encode_utf8(&mut [0; 4]));
        Ok(())
    }

    /// Marks every point of a route with `*`.
    pub fn insert_path_markers(&self, text: &mut String, points: &[Point]) -> Result<()> {
        points
            .iter()
            .try_for_each(|&point| self.insert_marker(text, point, '*'))
    }

    fn marker_index(&self, text: &str, point: Point) -> Result<usize> {
        let width = line_width(self.columns());
        let expected = width * (self.rows() as usize * 2 + 1);
        if text.len() != expected || !text.is_ascii() {
            return Err(MazeError::BufferLength {
                expected,
                found: text.len(),
            });
        }
        self.cell_at(point)?;
        Ok((point.row as usize * 2 + 1) * width + point.column as usize * 4 + 2)
    }

    #[inline(always)]
    fn cell_id(&self, row: u16, column: u16) -> CellId {
        CellId::from_index(row as usize * self.columns() as usize + column as usize)
    }
}
