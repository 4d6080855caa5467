#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::Result;

use super::extract::{extract_box, TileBox};
use super::image::PixelBuffer;
use super::palette::{MarkerPalette, SQUARE_START_MARKER};
use super::region::ScanBand;

/// Visit every pixel of the band in row-major order and extract a tile at
/// each start marker.
///
/// Candidates whose frame does not close are skipped. The returned tiles are
/// in discovery order regardless of the `parallel` feature.
pub fn scan_boxes(
    img: &PixelBuffer,
    palette: &MarkerPalette,
    band: ScanBand,
) -> Result<Vec<TileBox>> {
    #[cfg(feature = "parallel")]
    let boxes: Vec<TileBox> = {
        let (from, to) = band_indices(img, band);
        let found: Vec<Option<TileBox>> = (from..to)
            .into_par_iter()
            .map(|c| candidate(img, palette, c))
            .collect::<Result<_>>()?;
        found.into_iter().flatten().collect()
    };

    #[cfg(not(feature = "parallel"))]
    let boxes = scan_boxes_sequential(img, palette, band)?;

    Ok(boxes)
}

/// Single-threaded [`scan_boxes`], available with or without `parallel`.
pub fn scan_boxes_sequential(
    img: &PixelBuffer,
    palette: &MarkerPalette,
    band: ScanBand,
) -> Result<Vec<TileBox>> {
    let (from, to) = band_indices(img, band);
    let mut boxes = Vec::new();
    for c in from..to {
        if let Some(tile) = candidate(img, palette, c)? {
            boxes.push(tile);
        }
    }
    Ok(boxes)
}

fn band_indices(img: &PixelBuffer, band: ScanBand) -> (isize, isize) {
    (
        img.to_index(0, band.start_row as isize),
        img.to_index(0, band.end_row as isize),
    )
}

fn candidate(img: &PixelBuffer, palette: &MarkerPalette, c: isize) -> Result<Option<TileBox>> {
    if palette.matches(img, c, &SQUARE_START_MARKER)? {
        extract_box(img, palette, c)
    } else {
        Ok(None)
    }
}
