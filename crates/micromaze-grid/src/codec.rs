//! Compact wall encoding for storage and transmission.
//!
//! Each cell is described by a 4-bit *gap* mask (bit set = no wall) using the
//! [`Direction`] bit layout: North = 1, East = 2, South = 4, West = 8. Masks are packed two
//! per byte in row-major cell order, the first cell of each pair in the high nibble. When the
//! cell count is odd the low nibble of the last byte is zero padding.
//!
//! The framed form written by [`GapBitmask::save`] prefixes the packed bytes with the row and
//! column counts as little-endian `u16`s.

use std::io::{Error, Read, Write};

use enumset::EnumSet;
use log::{debug, warn};
use micromaze_core::{Direction, MazeError, Result};

use crate::{Maze, MAX_CELLS};

/// Flips a 4-bit wall mask into a gap mask and back.
#[inline(always)]
pub fn invert_mask(mask: u8) -> u8 {
    !mask & 0xF
}

/// Number of bytes needed to pack `cells` masks.
#[inline(always)]
pub fn compressed_len(cells: usize) -> usize {
    (cells + 1) / 2
}

/// Packs 4-bit masks two per byte. Only the low nibble of each mask is kept.
pub fn compress(masks: &[u8]) -> Vec<u8> {
    masks
        .chunks(2)
        .map(|pair| {
            let cell_a = pair[0] & 0xF;
            let cell_b = pair.get(1).map_or(0, |&b| b & 0xF);
            cell_a << 4 | cell_b
        })
        .collect()
}

/// Unpacks `cells` masks from bytes produced by [`compress`].
pub fn decompress(bytes: &[u8], cells: usize) -> Result<Vec<u8>> {
    if bytes.len() != compressed_len(cells) {
        return Err(MazeError::BufferLength {
            expected: compressed_len(cells),
            found: bytes.len(),
        });
    }
    if cells % 2 == 1 && bytes.last().is_some_and(|&b| b & 0xF != 0) {
        return Err(MazeError::InvalidPadding);
    }
    let mut masks: Vec<u8> = bytes.iter().flat_map(|&b| [b >> 4, b & 0xF]).collect();
    masks.truncate(cells);
    Ok(masks)
}

/// Per-cell gap masks of a maze, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GapBitmask {
    pub rows: u16,
    pub columns: u16,
    pub masks: Vec<u8>,
}

impl GapBitmask {
    pub fn compress(&self) -> Vec<u8> {
        compress(&self.masks)
    }

    pub fn decompress(rows: u16, columns: u16, bytes: &[u8]) -> Result<GapBitmask> {
        let masks = decompress(bytes, rows as usize * columns as usize)?;
        Ok(GapBitmask {
            rows,
            columns,
            masks,
        })
    }

    /// Size in bytes of the framed encoding.
    pub fn encoded_len(&self) -> usize {
        4 + compressed_len(self.masks.len())
    }

    pub fn save(&self, to: &mut impl Write) -> std::io::Result<()> {
        to.write_all(&self.rows.to_le_bytes())?;
        to.write_all(&self.columns.to_le_bytes())?;
        to.write_all(&self.compress())
    }

    pub fn load(from: &mut impl Read) -> std::io::Result<GapBitmask> {
        let mut bytes = [0; 2];
        from.read_exact(&mut bytes)?;
        let rows = u16::from_le_bytes(bytes);
        from.read_exact(&mut bytes)?;
        let columns = u16::from_le_bytes(bytes);

        let cells = rows as usize * columns as usize;
        if cells == 0 {
            return Err(Error::other(MazeError::InvalidDimensions { rows, columns }));
        }
        if cells > MAX_CELLS {
            return Err(Error::other(MazeError::CapacityExceeded {
                resource: "maze",
                requested: cells,
                capacity: MAX_CELLS,
            }));
        }

        let mut packed = vec![0; compressed_len(cells)];
        from.read_exact(&mut packed)?;
        GapBitmask::decompress(rows, columns, &packed).map_err(Error::other)
    }
}

impl Maze {
    /// Per-cell gap masks of the current walls.
    pub fn gap_bitmask(&self) -> GapBitmask {
        GapBitmask {
            rows: self.rows(),
            columns: self.columns(),
            masks: self
                .ids()
                .map(|id| invert_mask(self.walls(id).as_u8()))
                .collect(),
        }
    }

    /// Replaces every wall with the ones described by `bitmask`.
    ///
    /// The input must describe a consistent maze: matching dimensions, 4-bit masks, gaps that
    /// both neighbouring cells agree on, and no gap through the perimeter. On error the maze is
    /// left unchanged.
    pub fn load_gap_bitmask(&mut self, bitmask: &GapBitmask) -> Result<()> {
        if (bitmask.rows, bitmask.columns) != (self.rows(), self.columns())
            || bitmask.masks.len() != self.len()
        {
            return Err(MazeError::DimensionMismatch {
                expected: (self.rows(), self.columns()),
                found: (bitmask.rows, bitmask.columns),
            });
        }

        let gaps = bitmask
            .masks
            .iter()
            .map(|&value| {
                EnumSet::<Direction>::try_from_u8(value).ok_or(MazeError::InvalidMask { value })
            })
            .collect::<Result<Vec<_>>>()?;

        for id in self.ids() {
            for direction in gaps[id.index()] {
                let mirrored = self
                    .neighbor_in_direction(id, direction)
                    .is_ok_and(|next| gaps[next.index()].contains(direction.backwards()));
                if !mirrored {
                    let point = self.point(id);
                    warn!(
                        "rejecting gap bitmask: gap at {point} facing {direction:?} is one-sided"
                    );
                    return Err(MazeError::InconsistentWallState { point, direction });
                }
            }
        }

        self.overwrite_walls(gaps.into_iter().map(|gaps| gaps.complement()));
        Ok(())
    }

    /// Packed gap masks of the whole maze, `ceil(rows * columns / 2)` bytes.
    pub fn serialise(&self) -> Vec<u8> {
        self.gap_bitmask().compress()
    }

    /// Restores the walls from bytes produced by [`Maze::serialise`] on a maze of the same
    /// dimensions.
    pub fn deserialise(&mut self, packed: &[u8]) -> Result<()> {
        let bitmask = GapBitmask::decompress(self.rows(), self.columns(), packed)?;
        self.load_gap_bitmask(&bitmask)?;
        debug!(
            "deserialised {}x{} maze from {} bytes",
            self.rows(),
            self.columns(),
            packed.len()
        );
        Ok(())
    }
}
