use crate::error::{Result, TilepackError};

/// One RGBA8 pixel. Compared by exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }
}

/// RGBA image with row-major pixel data and no row padding.
///
/// Pixels are addressed either by `(x, y)` or by a flat index
/// `x + y * width`. Flat indices are signed so that cursor arithmetic may step
/// off the buffer; the error only surfaces when such an index is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub buf: Vec<Rgba>,
}

impl PixelBuffer {
    /// Create a new image filled with transparent pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Create a new image filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let buf = vec![color; width as usize * height as usize];
        Self { width, height, buf }
    }

    /// Create an image from existing pixel data.
    pub fn from_pixels(width: u32, height: u32, buf: Vec<Rgba>) -> Result<Self> {
        if buf.len() != width as usize * height as usize {
            return Err(TilepackError::BufferSize {
                width,
                height,
                len: buf.len(),
            });
        }
        Ok(Self { width, height, buf })
    }

    /// Create an image from interleaved RGBA8 bytes, as produced by most decoders.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(TilepackError::BufferSize {
                width,
                height,
                len: bytes.len() / 4,
            });
        }
        let buf = bytes
            .chunks_exact(4)
            .map(|px| Rgba([px[0], px[1], px[2], px[3]]))
            .collect();
        Self::from_pixels(width, height, buf)
    }

    /// Flatten back to interleaved RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.buf.iter().flat_map(|px| px.0).collect()
    }

    /// Number of pixels in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Read the pixel at a flat index.
    #[inline]
    pub fn pixel_at(&self, index: isize) -> Result<Rgba> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.buf.get(i).copied())
            .ok_or(TilepackError::OutOfBounds {
                index,
                len: self.buf.len(),
            })
    }

    /// Flat index to `(x, y)`.
    #[inline]
    pub fn to_coord(&self, index: isize) -> (isize, isize) {
        let w = self.width as isize;
        (index.rem_euclid(w), index.div_euclid(w))
    }

    /// `(x, y)` to flat index. No bounds check.
    #[inline]
    pub fn to_index(&self, x: isize, y: isize) -> isize {
        x + y * self.width as isize
    }

    /// Index of the pixel `(dx, dy)` away from `index`.
    ///
    /// Not clamped: moving past a row end wraps onto the next row, and moving
    /// past the first or last row yields an index that fails on read.
    #[inline]
    pub fn step(&self, index: isize, dx: isize, dy: isize) -> isize {
        let (x, y) = self.to_coord(index);
        self.to_index(x + dx, y + dy)
    }

    /// Get the pixel at `(x, y)`. Panics if out of range.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.buf[(y * self.width + x) as usize]
    }

    /// Set the pixel at `(x, y)`. Panics if out of range.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, val: Rgba) {
        self.buf[(y * self.width + x) as usize] = val;
    }

    /// Copy the `w`x`h` region at `(src_x, src_y)` of `src` into this image at
    /// `(dst_x, dst_y)`. Pixels are replaced, not blended.
    #[allow(clippy::too_many_arguments)]
    pub fn blit(
        &mut self,
        src: &PixelBuffer,
        src_x: u32,
        src_y: u32,
        w: u32,
        h: u32,
        dst_x: u32,
        dst_y: u32,
    ) -> Result<()> {
        for (img, x, y) in [(src, src_x, src_y), (&*self, dst_x, dst_y)] {
            if x as u64 + w as u64 > img.width as u64 || y as u64 + h as u64 > img.height as u64 {
                let far = img.to_index(x as isize + w as isize - 1, y as isize + h as isize - 1);
                return Err(TilepackError::OutOfBounds {
                    index: far,
                    len: img.len(),
                });
            }
        }
        for row in 0..h {
            let s = ((src_y + row) * src.width + src_x) as usize;
            let d = ((dst_y + row) * self.width + dst_x) as usize;
            self.buf[d..d + w as usize].copy_from_slice(&src.buf[s..s + w as usize]);
        }
        Ok(())
    }
}
