use std::fmt;

use log::debug;

use crate::atlas::packer::Placement;
use crate::error::Result;

use super::image::PixelBuffer;
use super::palette::{MarkerPalette, SQUARE_END_MARKER};

/// Number of mask pixels read beneath each tile.
pub const MASK_BITS: usize = 8;

/// 8-bit tag read from the row beneath a tile. The first pixel read is the
/// most significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mask(pub u8);

impl fmt::Display for Mask {
    /// Eight `'0'`/`'1'` characters in scan order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b}", self.0)
    }
}

/// One decoded tile.
///
/// `start` and `end` are the inclusive top-left and bottom-right corners of
/// the content rectangle in the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBox {
    pub start: [u32; 2],
    pub end: [u32; 2],
    pub width: u32,
    pub height: u32,
    pub mask: Mask,
    /// Set once the atlas has been packed.
    pub placement: Option<Placement>,
}

/// Steps of tracing one tile frame, in the order they must run.
#[derive(Debug, Clone, Copy)]
enum Trace {
    /// At the top-left cell of a matched start marker.
    EnterInterior { anchor: isize },
    /// Walking right along the top border.
    TopBorder { cursor: isize, im_start: isize },
    /// Walking down along the right border.
    RightBorder { cursor: isize, im_start: isize },
    /// Expecting an end marker with its top-left cell at `anchor`.
    VerifyEnd { anchor: isize, im_start: isize },
}

/// Trace the tile frame whose start marker has its top-left cell at `anchor`.
///
/// Returns `Ok(None)` when the frame does not close with an end marker: the
/// start marker was a false positive. Reads that fall outside the image are
/// errors.
pub fn extract_box(
    img: &PixelBuffer,
    palette: &MarkerPalette,
    anchor: isize,
) -> Result<Option<TileBox>> {
    let mut state = Trace::EnterInterior { anchor };
    loop {
        state = match state {
            Trace::EnterInterior { anchor } => {
                let corner = img.step(anchor, 1, 1);
                Trace::TopBorder {
                    cursor: img.step(corner, 1, 0),
                    im_start: img.step(corner, 1, 1),
                }
            }
            Trace::TopBorder { mut cursor, im_start } => {
                while img.pixel_at(cursor)? == palette.border_fill {
                    cursor = img.step(cursor, 1, 0);
                }
                // The top border overhangs the right border by one column.
                Trace::RightBorder {
                    cursor: img.step(cursor, -2, 1),
                    im_start,
                }
            }
            Trace::RightBorder { mut cursor, im_start } => {
                while img.pixel_at(cursor)? == palette.border_fill {
                    cursor = img.step(cursor, 0, 1);
                }
                Trace::VerifyEnd {
                    anchor: cursor,
                    im_start,
                }
            }
            Trace::VerifyEnd { anchor, im_start } => {
                if !palette.matches(img, anchor, &SQUARE_END_MARKER)? {
                    debug!(
                        "start marker at {:?}: no {} marker at {:?}",
                        img.to_coord(img.step(im_start, -2, -2)),
                        SQUARE_END_MARKER.name,
                        img.to_coord(anchor)
                    );
                    return Ok(None);
                }
                let im_end = img.step(anchor, -1, -1);
                return finish_box(img, palette, im_start, im_end);
            }
        };
    }
}

fn finish_box(
    img: &PixelBuffer,
    palette: &MarkerPalette,
    im_start: isize,
    im_end: isize,
) -> Result<Option<TileBox>> {
    // Both corners are copied later, so they must be real pixels.
    img.pixel_at(im_start)?;
    img.pixel_at(im_end)?;

    let (sx, sy) = img.to_coord(im_start);
    let (ex, ey) = img.to_coord(im_end);
    let width = ex - sx + 1;
    let height = ey - sy + 1;
    if width < 1 || height < 1 {
        debug!("frame at ({sx}, {sy}) closes before its interior ({width}x{height})");
        return Ok(None);
    }

    let mask = read_mask(img, palette, img.to_index(sx, ey + 1))?;

    let tile = TileBox {
        start: [sx as u32, sy as u32],
        end: [ex as u32, ey as u32],
        width: width as u32,
        height: height as u32,
        mask,
        placement: None,
    };
    debug!(
        "tile {}x{} at ({sx}, {sy}) mask {}",
        tile.width, tile.height, tile.mask
    );
    Ok(Some(tile))
}

/// Read `MASK_BITS` consecutive pixels from `start`. Anything other than the
/// background color is a `1`, including colors outside the palette.
fn read_mask(img: &PixelBuffer, palette: &MarkerPalette, start: isize) -> Result<Mask> {
    let mut bits = 0u8;
    for i in 0..MASK_BITS {
        let px = img.pixel_at(img.step(start, i as isize, 0))?;
        bits = (bits << 1) | u8::from(px != palette.background);
    }
    Ok(Mask(bits))
}
