use super::PlacementError;
use std::ops::Range;

/// Pixel-resolution record of canvas area already claimed by balloons.
///
/// Cells only ever go from free to claimed; there is no release.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    /// Row-major, `width * height` cells.
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(width: i32, height: i32) -> Result<Self, PlacementError> {
        if width <= 0 || height <= 0 {
            return Err(PlacementError::InvalidCanvas { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, (x, y): (i32, i32)) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// True when the square of half-size `r` around `center` lies strictly
    /// inside the canvas and touches no claimed cell.
    pub fn is_free(&self, center: (i32, i32), r: i32) -> bool {
        let (x, y) = center;
        if x.saturating_sub(r) < 0
            || x.saturating_add(r) >= self.width
            || y.saturating_sub(r) < 0
            || y.saturating_add(r) >= self.height
        {
            return false;
        }
        let (xs, ys) = self.clamped_box(center, r);
        ys.into_iter().all(|row| {
            let start = self.index(xs.start, row);
            let end = self.index(xs.end, row);
            self.cells[start..end].iter().all(|claimed| !claimed)
        })
    }

    /// Claim the square around `center`, clipped to the canvas.
    pub fn mark(&mut self, center: (i32, i32), r: i32) {
        let (xs, ys) = self.clamped_box(center, r);
        for row in ys {
            let start = self.index(xs.start, row);
            let end = self.index(xs.end, row);
            self.cells[start..end].fill(true);
        }
    }

    pub fn is_marked(&self, x: i32, y: i32) -> bool {
        self.contains((x, y)) && self.cells[self.index(x, y)]
    }

    pub fn marked_cells(&self) -> usize {
        self.cells.iter().filter(|claimed| **claimed).count()
    }

    /// `[x-r, x+r) x [y-r, y+r)` intersected with the canvas. Either range may
    /// be empty when the box lies entirely off-canvas.
    fn clamped_box(&self, (x, y): (i32, i32), r: i32) -> (Range<i32>, Range<i32>) {
        let x0 = x.saturating_sub(r).clamp(0, self.width);
        let x1 = x.saturating_add(r).clamp(x0, self.width);
        let y0 = y.saturating_sub(r).clamp(0, self.height);
        let y1 = y.saturating_add(r).clamp(y0, self.height);
        (x0..x1, y0..y1)
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
