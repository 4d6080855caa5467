pub mod image;
pub mod palette;
pub mod region;
pub mod extract;
pub mod scan;

use log::info;

use crate::error::Result;

use self::extract::TileBox;
use self::image::PixelBuffer;
use self::palette::MarkerPalette;
use self::region::locate_band;
use self::scan::scan_boxes;

/// Decode every tile of an encoded sheet, in row-major discovery order.
pub fn decode_boxes(img: &PixelBuffer) -> Result<Vec<TileBox>> {
    let palette = MarkerPalette::from_buffer(img)?;
    let band = locate_band(img, &palette)?;
    info!(
        "scanning rows {}..{} of {}x{} sheet",
        band.start_row, band.end_row, img.width, img.height
    );
    let boxes = scan_boxes(img, &palette, band)?;
    info!("decoded {} tiles", boxes.len());
    Ok(boxes)
}
