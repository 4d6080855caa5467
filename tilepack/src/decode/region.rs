use crate::error::{Result, TilepackError};

use super::image::PixelBuffer;
use super::palette::{MarkerPalette, LINE_MARKER};

/// The rows between the two line markers. Start markers are only searched
/// for in `start_row..end_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanBand {
    pub start_row: u32,
    pub end_row: u32,
}

/// Find the first two rows that begin with a line marker.
pub fn locate_band(img: &PixelBuffer, palette: &MarkerPalette) -> Result<ScanBand> {
    let start_row = next_line_marker(img, palette, 0)?.ok_or_else(|| {
        TilepackError::MalformedEncoding("no line marker row found".to_string())
    })?;
    let end_row = next_line_marker(img, palette, start_row + 1)?.ok_or_else(|| {
        TilepackError::MalformedEncoding(format!(
            "line marker at row {start_row} has no closing line marker"
        ))
    })?;
    Ok(ScanBand { start_row, end_row })
}

fn next_line_marker(img: &PixelBuffer, palette: &MarkerPalette, from: u32) -> Result<Option<u32>> {
    let span = LINE_MARKER.width() as isize;
    for row in from..img.height {
        let row_start = img.to_index(0, row as isize);
        // A marker that would run past the last pixel cannot start here.
        if row_start + span > img.len() as isize {
            break;
        }
        if palette.matches(img, row_start, &LINE_MARKER)? {
            return Ok(Some(row));
        }
    }
    Ok(None)
}
