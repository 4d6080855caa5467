use crate::error::{Result, TilepackError};

use super::image::{PixelBuffer, Rgba};

/// The colors a sheet is encoded with, read from its first three pixels.
///
/// The three values are expected to be pairwise distinct. This is not checked;
/// a sheet that reuses a color decodes to whatever the exact matches produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPalette {
    /// Pixel 0: empty space and `0` mask bits.
    pub background: Rgba,
    /// Pixel 1: the dark cells of line and square markers.
    pub border_mark: Rgba,
    /// Pixel 2: the border runs traced around each tile.
    pub border_fill: Rgba,
}

impl MarkerPalette {
    /// Read the palette from pixels 0, 1 and 2 in row-major order.
    pub fn from_buffer(img: &PixelBuffer) -> Result<Self> {
        if img.len() < 3 {
            return Err(TilepackError::MalformedEncoding(format!(
                "image has {} pixels, need at least 3 for the marker palette",
                img.len()
            )));
        }
        Ok(Self {
            background: img.pixel_at(0)?,
            border_mark: img.pixel_at(1)?,
            border_fill: img.pixel_at(2)?,
        })
    }

    #[inline]
    fn color(&self, cell: Cell) -> Rgba {
        match cell {
            Cell::Mark => self.border_mark,
            Cell::Background => self.background,
        }
    }

    /// Test whether `marker` matches with its top-left cell at `anchor`.
    ///
    /// Pattern rows advance by one image row. Cells are compared in row-major
    /// order and the first mismatch returns `false` without reading further.
    pub fn matches(&self, img: &PixelBuffer, anchor: isize, marker: &Marker) -> Result<bool> {
        for (dy, row) in marker.rows.iter().enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                let idx = img.step(anchor, dx as isize, dy as isize);
                if img.pixel_at(idx)? != self.color(cell) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Mark,
    Background,
}

/// A fixed pixel pattern, described in palette roles rather than colors.
#[derive(Debug)]
pub struct Marker {
    pub name: &'static str,
    pub rows: &'static [&'static [Cell]],
}

impl Marker {
    /// Cells in the first pattern row.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }
}

use Cell::{Background as B, Mark as M};

/// 1x5 bracket row; the first two occurrences bound the scan band.
pub const LINE_MARKER: Marker = Marker {
    name: "line",
    rows: &[&[M, B, B, B, M]],
};

/// 2x2 checkerboard at the top-left corner of a tile frame.
pub const SQUARE_START_MARKER: Marker = Marker {
    name: "square-start",
    rows: &[&[M, B], &[B, M]],
};

/// 2x2 checkerboard at the bottom-right corner of a tile frame.
pub const SQUARE_END_MARKER: Marker = Marker {
    name: "square-end",
    rows: &[&[B, M], &[M, B]],
};
