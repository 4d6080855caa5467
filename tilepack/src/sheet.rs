//! Authoring side of the marker encoding: paint tiles, frames and masks into a
//! sheet that [`decode_boxes`](crate::decode_boxes) reads back.

use crate::decode::extract::{Mask, MASK_BITS};
use crate::decode::image::{PixelBuffer, Rgba};
use crate::decode::palette::MarkerPalette;

pub const DEFAULT_PALETTE: MarkerPalette = MarkerPalette {
    background: Rgba::new(255, 255, 255, 255),
    border_mark: Rgba::new(0, 0, 0, 255),
    border_fill: Rgba::new(255, 0, 0, 255),
};

#[derive(Debug, Clone)]
struct TileSpec {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    mask: Mask,
    color: Rgba,
}

/// Builder for encoded sheets.
///
/// Pixels 0..3 of row 0 always hold the palette. Line markers and tiles are
/// painted in the order they were added, so later tiles win where frames
/// overlap.
#[derive(Debug, Clone)]
pub struct SheetBuilder {
    width: u32,
    height: u32,
    palette: MarkerPalette,
    line_rows: Vec<u32>,
    tiles: Vec<TileSpec>,
}

impl SheetBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            palette: DEFAULT_PALETTE,
            line_rows: Vec::new(),
            tiles: Vec::new(),
        }
    }

    pub fn palette(&mut self, palette: MarkerPalette) -> &mut Self {
        self.palette = palette;
        self
    }

    /// Put line markers on rows `start` and `end`.
    pub fn band(&mut self, start: u32, end: u32) -> &mut Self {
        self.line_rows.push(start);
        self.line_rows.push(end);
        self
    }

    /// Add a `width`x`height` tile of solid `color` whose content starts at
    /// `(x, y)`. Returns the position of its start marker.
    ///
    /// The frame occupies two columns and rows before the content and two
    /// after it; the mask is written on the row below the content. Mask bits
    /// `width` and `width + 1` coincide with the end marker and are
    /// overwritten by it when `width < 8`.
    ///
    /// Panics if the frame or mask do not fit in the sheet.
    pub fn add_tile(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        mask: Mask,
        color: Rgba,
    ) -> [u32; 2] {
        assert!(width > 0 && height > 0, "tile must not be empty");
        assert!(x >= 2, "start marker must fit left of the tile");
        assert!(y >= 3, "start marker must sit below the palette row");
        assert!(
            x + (width + 2).max(MASK_BITS as u32) <= self.width && y + height + 2 <= self.height,
            "tile at ({x}, {y}) does not fit in the {}x{} sheet",
            self.width,
            self.height
        );
        self.tiles.push(TileSpec {
            x,
            y,
            width,
            height,
            mask,
            color,
        });
        [x - 2, y - 2]
    }

    pub fn build(&self) -> PixelBuffer {
        let pal = &self.palette;
        let mut img = PixelBuffer::filled(self.width, self.height, pal.background);
        img.set(1, 0, pal.border_mark);
        img.set(2, 0, pal.border_fill);

        for &row in &self.line_rows {
            img.set(0, row, pal.border_mark);
            img.set(4, row, pal.border_mark);
        }

        for t in &self.tiles {
            paint_tile(&mut img, pal, t);
        }
        img
    }
}

fn paint_tile(img: &mut PixelBuffer, pal: &MarkerPalette, t: &TileSpec) {
    let (x, y, w, h) = (t.x, t.y, t.width, t.height);

    for yy in y..y + h {
        for xx in x..x + w {
            img.set(xx, yy, t.color);
        }
    }

    // Start marker.
    img.set(x - 2, y - 2, pal.border_mark);
    img.set(x - 1, y - 2, pal.background);
    img.set(x - 2, y - 1, pal.background);
    img.set(x - 1, y - 1, pal.border_mark);

    // Top border runs one column past the right border.
    for xx in x..=x + w + 1 {
        img.set(xx, y - 1, pal.border_fill);
    }
    for yy in y..y + h {
        img.set(x - 1, yy, pal.border_fill);
        img.set(x + w, yy, pal.border_fill);
    }

    for i in 0..MASK_BITS as u32 {
        let bit = (t.mask.0 >> (MASK_BITS as u32 - 1 - i)) & 1;
        let color = if bit == 1 { pal.border_mark } else { pal.background };
        img.set(x + i, y + h, color);
    }

    // End marker, on top of any mask bits it shares a row with.
    img.set(x + w, y + h, pal.background);
    img.set(x + w + 1, y + h, pal.border_mark);
    img.set(x + w, y + h + 1, pal.border_mark);
    img.set(x + w + 1, y + h + 1, pal.background);
}
