use log::{info, warn};

use crate::config::PackConfig;
use crate::decode::decode_boxes;
use crate::decode::extract::TileBox;
use crate::decode::image::PixelBuffer;
use crate::error::Result;

use super::document::{FrameIndex, Size};
use super::packer::{pack_all, MaxRectsPacker, Packer};

/// A packed atlas: the composited image, its frame index, and the decoded
/// tiles with their placements attached.
#[derive(Debug, Clone)]
pub struct Atlas {
    pub image: PixelBuffer,
    pub index: FrameIndex,
    pub boxes: Vec<TileBox>,
}

/// Decodes an encoded sheet and packs its tiles into one atlas.
#[derive(Debug, Clone, Default)]
pub struct Tilepacker {
    pub config: PackConfig,
}

impl Tilepacker {
    pub fn new(config: PackConfig) -> Self {
        Self { config }
    }

    /// Decode `sheet` and pack it with a [`MaxRectsPacker`] the size of the
    /// configured canvas.
    pub fn pack(&self, sheet: &PixelBuffer) -> Result<Atlas> {
        let boxes = decode_boxes(sheet)?;
        let mut packer = MaxRectsPacker::new(self.config.canvas_width, self.config.canvas_height);
        self.assemble(sheet, boxes, &mut packer)
    }

    /// Pack already decoded tiles of `sheet` with `packer`.
    ///
    /// The destination canvas has the packer's bin size and starts fully
    /// transparent. Each tile is copied inset by the padding into its
    /// placement.
    pub fn assemble<P: Packer>(
        &self,
        sheet: &PixelBuffer,
        mut boxes: Vec<TileBox>,
        packer: &mut P,
    ) -> Result<Atlas> {
        let pad = self.config.padding;
        if boxes.is_empty() {
            warn!("sheet contains no tiles; the atlas will be empty");
        }

        let rects: Vec<(u32, u32)> = boxes
            .iter()
            .map(|b| {
                (
                    b.width.saturating_add(pad.saturating_mul(2)),
                    b.height.saturating_add(pad.saturating_mul(2)),
                )
            })
            .collect();
        let placements = pack_all(packer, &rects)?;

        let (canvas_w, canvas_h) = packer.bin_size();
        let mut image = PixelBuffer::new(canvas_w, canvas_h);
        for (tile, placement) in boxes.iter_mut().zip(placements) {
            image.blit(
                sheet,
                tile.start[0],
                tile.start[1],
                tile.width,
                tile.height,
                placement.x + pad,
                placement.y + pad,
            )?;
            tile.placement = Some(placement);
        }

        let index = FrameIndex::from_boxes(
            &boxes,
            Size {
                w: canvas_w,
                h: canvas_h,
            },
        );
        info!(
            "packed {} frames under {} tags into {}x{}",
            index.frames.len(),
            index.meta.frame_tags.len(),
            canvas_w,
            canvas_h
        );
        Ok(Atlas {
            image,
            index,
            boxes,
        })
    }
}
