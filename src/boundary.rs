// The boundary the user draws: every pointer position becomes a small
// square of wall pixels so a fast stroke has no gaps for the fill to leak through.

use std::collections::HashSet;

/// Set of wall coordinates in working-resolution pixel space.
///
/// Members may lie outside the image; they are kept but never visited.
#[derive(Debug, Clone, Default)]
pub struct Boundary {
    radius: i32,
    points: HashSet<(i32, i32)>,
}

impl Boundary {
    pub fn new(radius: i32) -> Self {
        Self { radius: radius.max(0), points: HashSet::new() }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Stamp the brush square centered at (x, y).
    pub fn add(&mut self, x: i32, y: i32) {
        let r = self.radius;
        for j in -r..=r {
            for i in -r..=r {
                self.points.insert((x.saturating_add(i), y.saturating_add(j)));
            }
        }
    }

    /// Erase the brush square centered at (x, y). Missing points are ignored.
    pub fn remove(&mut self, x: i32, y: i32) {
        let r = self.radius;
        for j in -r..=r {
            for i in -r..=r {
                self.points.remove(&(x.saturating_add(i), y.saturating_add(j)));
            }
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.points.contains(&(x, y))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.points.iter().copied()
    }

    /// Rasterize into a `width × height` wall grid, dropping members
    /// that fall outside it.
    pub fn to_mask(&self, width: u32, height: u32) -> BoundaryMask {
        let mut walls = vec![false; width as usize * height as usize];
        for (x, y) in self.iter() {
            if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                continue;
            }
            walls[y as usize * width as usize + x as usize] = true;
        }
        BoundaryMask { width, height, walls }
    }
}

impl FromIterator<(i32, i32)> for Boundary {
    /// Raw wall pixels, no brush dilation.
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        Self { radius: 0, points: iter.into_iter().collect() }
    }
}

/// Flat wall grid the fill reads; one `bool` per pixel.
#[derive(Debug, Clone)]
pub struct BoundaryMask {
    width: u32,
    height: u32,
    walls: Vec<bool>,
}

impl BoundaryMask {
    /// True for in-bounds wall pixels only.
    #[inline]
    pub fn is_wall(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.walls[y as usize * self.width as usize + x as usize]
    }

    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }
}
