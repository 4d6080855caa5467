//! Frame index written next to the atlas image, in the JSON layout sprite
//! animation tools read (`frames` plus `meta.frameTags`).

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::decode::extract::{Mask, TileBox};

pub const APP_NAME: &str = "tilepacker";
pub const APP_VERSION: &str = "0.0.1";
pub const PIXEL_FORMAT: &str = "RGBA8888";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

/// One packed tile.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FrameRecord {
    /// The tile's mask, which doubles as its tag.
    pub filename: String,
    /// Packed rectangle in the atlas, padding included.
    pub frame: Rect,
    pub sprite_source_size: Rect,
    pub source_size: Size,
    pub duration: u32,
    pub rotated: bool,
    pub trimmed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Forward,
}

/// A run of frames sharing one mask: `frames[from..=to]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FrameTag {
    pub name: String,
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Meta {
    pub app: String,
    pub version: String,
    pub format: String,
    pub size: Size,
    pub scale: u32,
    pub frame_tags: Vec<FrameTag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FrameIndex {
    pub frames: Vec<FrameRecord>,
    pub meta: Meta,
}

impl FrameIndex {
    /// Group placed tiles by mask, in the order each mask is first seen, and
    /// give every group a contiguous range of the flattened frame list.
    ///
    /// Tiles without a placement are left out.
    pub fn from_boxes(boxes: &[TileBox], canvas: Size) -> Self {
        let mut groups: Vec<(Mask, Vec<FrameRecord>)> = Vec::new();
        let mut group_of: [Option<usize>; 256] = [None; 256];

        for tile in boxes {
            let Some(p) = tile.placement else {
                continue;
            };
            let g = *group_of[tile.mask.0 as usize].get_or_insert_with(|| {
                groups.push((tile.mask, Vec::new()));
                groups.len() - 1
            });
            groups[g].1.push(frame_record(tile.mask, p.x, p.y, p.width, p.height));
        }

        let mut frames = Vec::with_capacity(boxes.len());
        let mut frame_tags = Vec::with_capacity(groups.len());
        for (mask, group) in groups {
            let from = frames.len();
            frames.extend(group);
            frame_tags.push(FrameTag {
                name: mask.to_string(),
                from,
                to: frames.len() - 1,
                direction: Direction::Forward,
            });
        }

        Self {
            frames,
            meta: Meta {
                app: APP_NAME.to_string(),
                version: APP_VERSION.to_string(),
                format: PIXEL_FORMAT.to_string(),
                size: canvas,
                scale: 1,
                frame_tags,
            },
        }
    }
}

fn frame_record(mask: Mask, x: u32, y: u32, w: u32, h: u32) -> FrameRecord {
    FrameRecord {
        filename: mask.to_string(),
        frame: Rect { x, y, w, h },
        sprite_source_size: Rect { x: 0, y: 0, w, h },
        source_size: Size { w, h },
        duration: 0,
        rotated: false,
        trimmed: false,
    }
}
