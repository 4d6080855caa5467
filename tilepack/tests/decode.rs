//! Decoding properties of the marker encoding, exercised through `decode_boxes`.
use tilepack::decode::extract::{Mask, TileBox};
use tilepack::decode::image::{PixelBuffer, Rgba};
use tilepack::decode_boxes;
use tilepack::sheet::{SheetBuilder, DEFAULT_PALETTE};
use tilepack::TilepackError;

const PLUM: Rgba = Rgba::new(142, 69, 133, 255);
const SKY: Rgba = Rgba::new(135, 206, 235, 255);

fn bounds(b: &TileBox) -> ([u32; 2], [u32; 2], u32, u32) {
    (b.start, b.end, b.width, b.height)
}

#[test]
fn single_tile_round_trip() {
    for &(w, h, mask) in &[(8, 4, 0b1011_0001u8), (12, 1, 0xff), (9, 9, 0x00), (1, 6, 0x80)] {
        let mut sheet = SheetBuilder::new(40, 24);
        sheet.band(1, 22);
        sheet.add_tile(6, 5, w, h, Mask(mask), PLUM);
        let boxes = decode_boxes(&sheet.build()).unwrap();

        assert_eq!(boxes.len(), 1, "{w}x{h}");
        let b = &boxes[0];
        assert_eq!(bounds(b), ([6, 5], [6 + w - 1, 5 + h - 1], w, h));
        if w >= 8 {
            assert_eq!(b.mask, Mask(mask));
        }
    }
}

#[test]
fn narrow_tile_mask_includes_end_marker_cells() {
    // 1-wide tile: mask bits 1 and 2 are the end marker's background and
    // mark cells; bit 0 and bits 3.. are authored.
    let mut sheet = SheetBuilder::new(40, 24);
    sheet.band(1, 22);
    sheet.add_tile(6, 5, 1, 6, Mask(0x80), PLUM);
    let boxes = decode_boxes(&sheet.build()).unwrap();
    assert_eq!(boxes[0].mask.to_string(), "10100000");
}

#[test]
fn decoding_is_deterministic() {
    let mut sheet = SheetBuilder::new(64, 40);
    sheet.band(1, 38);
    sheet.add_tile(30, 4, 9, 5, Mask(1), PLUM);
    sheet.add_tile(4, 4, 8, 3, Mask(2), SKY);
    sheet.add_tile(4, 20, 11, 6, Mask(1), SKY);
    sheet.add_tile(40, 22, 8, 2, Mask(4), PLUM);
    let img = sheet.build();

    let first = decode_boxes(&img).unwrap();
    for _ in 0..5 {
        assert_eq!(decode_boxes(&img).unwrap(), first);
    }
    let starts: Vec<[u32; 2]> = first.iter().map(|b| b.start).collect();
    assert_eq!(starts, vec![[4, 4], [30, 4], [4, 20], [40, 22]]);
}

#[test]
fn foreign_mask_color_decodes_as_one() {
    let mut sheet = SheetBuilder::new(40, 24);
    sheet.band(1, 22);
    sheet.add_tile(6, 5, 8, 4, Mask(0b1000_0000), PLUM);
    let mut img = sheet.build();

    let odd = Rgba::new(17, 99, 3, 255);
    assert_ne!(odd, DEFAULT_PALETTE.background);
    assert_ne!(odd, DEFAULT_PALETTE.border_mark);
    assert_ne!(odd, DEFAULT_PALETTE.border_fill);
    // Mask row is y + h = 9; bit 3 is column 6 + 3.
    img.set(9, 9, odd);
    // A fill-colored bit is also a one.
    img.set(13, 9, DEFAULT_PALETTE.border_fill);

    let boxes = decode_boxes(&img).unwrap();
    assert_eq!(boxes[0].mask.to_string(), "10010001");
}

#[test]
fn false_positive_start_markers_are_skipped() {
    let mut sheet = SheetBuilder::new(48, 24);
    sheet.band(1, 22);
    sheet.add_tile(30, 5, 8, 4, Mask(3), SKY);
    let mut img = sheet.build();
    let p = DEFAULT_PALETTE;

    // A bare checkerboard.
    img.set(3, 3, p.border_mark);
    img.set(4, 4, p.border_mark);
    // A start marker with a top border run that never closes.
    img.set(10, 3, p.border_mark);
    img.set(11, 4, p.border_mark);
    for x in 12..20 {
        img.set(x, 4, p.border_fill);
    }

    let boxes = decode_boxes(&img).unwrap();
    assert_eq!(boxes.len(), 1);
    assert_eq!(bounds(&boxes[0]), ([30, 5], [37, 8], 8, 4));
    assert_eq!(boxes[0].mask, Mask(3));
}

#[test]
fn horizontally_adjacent_tiles() {
    // The second frame starts one empty column after the first one ends.
    let mut sheet = SheetBuilder::new(32, 14);
    sheet.band(1, 12);
    sheet.add_tile(4, 4, 8, 4, Mask(0x0f), PLUM);
    sheet.add_tile(17, 4, 8, 4, Mask(0xf0), SKY);
    let img = sheet.build();
    assert_eq!(img.get(14, 3), DEFAULT_PALETTE.background);

    let boxes = decode_boxes(&img).unwrap();
    assert_eq!(boxes.len(), 2);
    assert_eq!(bounds(&boxes[0]), ([4, 4], [11, 7], 8, 4));
    assert_eq!(bounds(&boxes[1]), ([17, 4], [24, 7], 8, 4));
    assert_eq!(boxes[0].mask, Mask(0x0f));
    assert_eq!(boxes[1].mask, Mask(0xf0));
}

#[test]
fn vertically_adjacent_tiles() {
    let mut sheet = SheetBuilder::new(24, 22);
    sheet.band(1, 20);
    sheet.add_tile(4, 4, 8, 4, Mask(0x11), PLUM);
    // First frame ends on row 9, second starts on row 11.
    sheet.add_tile(4, 13, 8, 4, Mask(0x22), SKY);
    let boxes = decode_boxes(&sheet.build()).unwrap();

    assert_eq!(boxes.len(), 2);
    assert_eq!(bounds(&boxes[0]), ([4, 4], [11, 7], 8, 4));
    assert_eq!(bounds(&boxes[1]), ([4, 13], [11, 16], 8, 4));
    assert!(boxes[0].end[1] < boxes[1].start[1]);
}

#[test]
fn missing_line_markers_abort() {
    let mut sheet = SheetBuilder::new(32, 14);
    sheet.add_tile(4, 4, 8, 4, Mask(0), PLUM);
    let err = decode_boxes(&sheet.build()).unwrap_err();
    assert!(matches!(err, TilepackError::MalformedEncoding(_)));
}

#[test]
fn tiny_image_aborts() {
    let img = PixelBuffer::filled(2, 1, PLUM);
    assert!(matches!(
        decode_boxes(&img),
        Err(TilepackError::MalformedEncoding(_))
    ));
}

#[test]
fn frame_leaving_the_image_aborts() {
    let mut sheet = SheetBuilder::new(20, 12);
    sheet.band(1, 10);
    sheet.add_tile(4, 4, 8, 2, Mask(0), PLUM);
    let mut img = sheet.build();
    // Right border (column 12) now runs to the bottom edge.
    for y in 6..12 {
        img.set(12, y, DEFAULT_PALETTE.border_fill);
    }
    let err = decode_boxes(&img).unwrap_err();
    assert!(matches!(err, TilepackError::OutOfBounds { .. }));
}
