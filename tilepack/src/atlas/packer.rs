use std::cmp::Reverse;

use log::debug;

use crate::error::{Result, TilepackError};

/// Where a rectangle landed in the bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    #[inline]
    fn right(&self) -> u32 {
        self.x + self.width
    }

    #[inline]
    fn bottom(&self) -> u32 {
        self.y + self.height
    }

    fn intersects(&self, other: &Placement) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    fn contains(&self, other: &Placement) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Places rectangles into a single fixed-size bin, without rotation.
pub trait Packer {
    /// Bin size as `(width, height)`.
    fn bin_size(&self) -> (u32, u32);

    /// Place a `width`x`height` rectangle, or return `None` if it does not fit
    /// in the space left.
    fn pack(&mut self, width: u32, height: u32) -> Option<Placement>;
}

/// MaxRects bin packer using the best-short-side-fit heuristic.
#[derive(Debug, Clone)]
pub struct MaxRectsPacker {
    width: u32,
    height: u32,
    free: Vec<Placement>,
}

impl MaxRectsPacker {
    pub fn new(width: u32, height: u32) -> Self {
        let free = if width > 0 && height > 0 {
            vec![Placement {
                x: 0,
                y: 0,
                width,
                height,
            }]
        } else {
            Vec::new()
        };
        Self {
            width,
            height,
            free,
        }
    }

    /// Free rectangle leaving the smallest short-side remainder, ties broken
    /// by the long side.
    fn find_position(&self, width: u32, height: u32) -> Option<Placement> {
        self.free
            .iter()
            .filter(|r| r.width >= width && r.height >= height)
            .min_by_key(|r| {
                let dw = r.width - width;
                let dh = r.height - height;
                (dw.min(dh), dw.max(dh))
            })
            .map(|r| Placement {
                x: r.x,
                y: r.y,
                width,
                height,
            })
    }

    fn split_free(&mut self, used: &Placement) {
        let mut next = Vec::with_capacity(self.free.len() + 4);
        for free in &self.free {
            if !free.intersects(used) {
                next.push(*free);
                continue;
            }
            if used.x > free.x {
                next.push(Placement {
                    x: free.x,
                    y: free.y,
                    width: used.x - free.x,
                    height: free.height,
                });
            }
            if used.right() < free.right() {
                next.push(Placement {
                    x: used.right(),
                    y: free.y,
                    width: free.right() - used.right(),
                    height: free.height,
                });
            }
            if used.y > free.y {
                next.push(Placement {
                    x: free.x,
                    y: free.y,
                    width: free.width,
                    height: used.y - free.y,
                });
            }
            if used.bottom() < free.bottom() {
                next.push(Placement {
                    x: free.x,
                    y: used.bottom(),
                    width: free.width,
                    height: free.bottom() - used.bottom(),
                });
            }
        }
        self.free = next;
        self.prune_free();
    }

    /// Drop free rectangles fully covered by another one.
    fn prune_free(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut j = i + 1;
            let mut removed_i = false;
            while j < self.free.len() {
                if self.free[j].contains(&self.free[i]) {
                    self.free.swap_remove(i);
                    removed_i = true;
                    break;
                }
                if self.free[i].contains(&self.free[j]) {
                    self.free.swap_remove(j);
                } else {
                    j += 1;
                }
            }
            if !removed_i {
                i += 1;
            }
        }
    }
}

impl Packer for MaxRectsPacker {
    fn bin_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pack(&mut self, width: u32, height: u32) -> Option<Placement> {
        if width == 0 || height == 0 {
            return None;
        }
        let placed = self.find_position(width, height)?;
        self.split_free(&placed);
        Some(placed)
    }
}

/// Pack every rectangle, largest area first, and return the placements in
/// input order.
///
/// Fails with `PackingCapacityExceeded` if any rectangle is left over; there
/// is no second bin.
pub fn pack_all<P: Packer>(packer: &mut P, rects: &[(u32, u32)]) -> Result<Vec<Placement>> {
    let mut order: Vec<usize> = (0..rects.len()).collect();
    order.sort_by_key(|&i| Reverse(rects[i].0 as u64 * rects[i].1 as u64));

    let mut placements = vec![None; rects.len()];
    for i in order {
        let (w, h) = rects[i];
        placements[i] = packer.pack(w, h);
        if placements[i].is_none() {
            debug!("rectangle {i} ({w}x{h}) does not fit");
        }
    }

    let unplaced = placements.iter().filter(|p| p.is_none()).count();
    if unplaced > 0 {
        let (canvas_width, canvas_height) = packer.bin_size();
        return Err(TilepackError::PackingCapacityExceeded {
            unplaced,
            canvas_width,
            canvas_height,
        });
    }
    Ok(placements.into_iter().flatten().collect())
}
