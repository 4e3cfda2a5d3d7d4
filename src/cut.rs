// Region-fill engine: owns the working-resolution RGBA image, the rasterized
// boundary, and the alpha mask. Flood fill paints alpha=255 on everything
// reachable from the seed without crossing the boundary; RGB is never touched.

use std::collections::VecDeque;
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use log::{debug, info, warn};

use crate::boundary::{Boundary, BoundaryMask};
use crate::config::CutConfig;
use crate::error::CutError;
use crate::rng::Rng32;

/// 4-connectivity, no diagonals.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

pub const SELECTED: u8 = 255;
pub const EXCLUDED: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillState {
    /// Loaded (or nothing loaded); no fill has completed since `setup`.
    Empty,
    /// A fill completed; invert and export are allowed.
    Filled,
}

/// What one successful `fill()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillReport {
    pub seed: (u32, u32),
    /// Random resamples needed; 0 when the center was usable.
    pub seed_attempts: usize,
    /// Pixels painted with alpha=255.
    pub filled: usize,
}

/// Decode `path` and resize it once to `width × height`.
/// The front-end calls this too so its pixels match the engine's.
pub fn load_working_image(
    path: &Path,
    width: u32,
    height: u32,
    config: &CutConfig,
) -> Result<RgbaImage, CutError> {
    let img = ImageReader::open(path)
        .map_err(|e| CutError::Decode(format!("{}: {e}", path.display())))?
        .with_guessed_format()
        .map_err(|e| CutError::Decode(format!("{}: {e}", path.display())))?
        .decode()
        .map_err(|e| CutError::Decode(format!("{}: {e}", path.display())))?;
    resize_to_working(img, width, height, config)
}

fn resize_to_working(
    img: DynamicImage,
    width: u32,
    height: u32,
    config: &CutConfig,
) -> Result<RgbaImage, CutError> {
    if width == 0 || height == 0 {
        return Err(CutError::Decode(format!("invalid working size {width}x{height}")));
    }
    if img.width() == 0 || img.height() == 0 {
        return Err(CutError::Decode("source image is empty".into()));
    }
    Ok(img.resize_exact(width, height, config.resize_filter).into_rgba8())
}

pub struct Cut {
    config: CutConfig,
    image: RgbaImage,
    walls: BoundaryMask,
    state: FillState,
}

impl Cut {
    /// An engine with nothing loaded; `fill` fails until `setup` is called.
    pub fn new(config: CutConfig) -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            walls: Boundary::default().to_mask(0, 0),
            state: FillState::Empty,
            config,
        }
    }

    /// Load `path` at the working resolution and freeze `boundary` for the next fill.
    /// On error the engine keeps whatever it held before.
    pub fn setup(
        &mut self,
        path: &Path,
        width: u32,
        height: u32,
        boundary: &Boundary,
    ) -> Result<(), CutError> {
        let image = load_working_image(path, width, height, &self.config)?;
        self.install(image, boundary);
        Ok(())
    }

    /// Same as `setup` for an image that is already decoded.
    pub fn setup_from_image(
        &mut self,
        img: DynamicImage,
        width: u32,
        height: u32,
        boundary: &Boundary,
    ) -> Result<(), CutError> {
        let image = resize_to_working(img, width, height, &self.config)?;
        self.install(image, boundary);
        Ok(())
    }

    fn install(&mut self, mut image: RgbaImage, boundary: &Boundary) {
        for px in image.pixels_mut() {
            px.0[3] = EXCLUDED;
        }
        self.walls = boundary.to_mask(image.width(), image.height());
        debug!(
            "setup {}x{}: {} boundary points, {} inside the image",
            image.width(),
            image.height(),
            boundary.len(),
            self.walls.wall_count()
        );
        self.image = image;
        self.state = FillState::Empty;
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn config(&self) -> &CutConfig {
        &self.config
    }

    pub fn state(&self) -> FillState {
        self.state
    }

    pub fn is_filled(&self) -> bool {
        self.state == FillState::Filled
    }

    /// Alpha at (x, y), or `None` outside the image.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.image.get_pixel_checked(x, y).map(|px| px.0[3])
    }

    /// Number of pixels whose alpha is 255.
    pub fn selected_count(&self) -> usize {
        self.image.pixels().filter(|px| px.0[3] == SELECTED).count()
    }

    /// In bounds and not a wall.
    #[inline]
    fn is_open(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height() && !self.walls.is_wall(x, y)
    }

    /// Center first, then bounded uniform resampling.
    fn pick_seed(&self) -> Result<((u32, u32), usize), CutError> {
        let (w, h) = (self.width(), self.height());
        let center = (w / 2, h / 2);
        if self.is_open(center.0, center.1) {
            return Ok((center, 0));
        }
        if w == 0 || h == 0 {
            return Err(CutError::NoInteriorSeed { attempts: 0 });
        }

        let max = self.config.max_seed_attempts;
        let mut rng = Rng32::from_seed(self.config.rng_seed);
        for attempt in 1..=max {
            let x = rng.below(w);
            let y = rng.below(h);
            if self.is_open(x, y) {
                debug!("center blocked, seed ({x}, {y}) after {attempt} attempts");
                return Ok(((x, y), attempt));
            }
        }
        Err(CutError::NoInteriorSeed { attempts: max })
    }

    fn reset_alpha(&mut self) {
        for px in self.image.pixels_mut() {
            px.0[3] = EXCLUDED;
        }
    }

    /// Breadth-first fill from the seed. On success every alpha is 0 or 255
    /// and the engine becomes `Filled`; on failure alpha is all 0 and the
    /// state is unchanged.
    pub fn fill(&mut self) -> Result<FillReport, CutError> {
        // 1) Start from a clean mask so repeated fills agree.
        self.reset_alpha();

        // 2) Seed.
        let (seed, seed_attempts) = match self.pick_seed() {
            Ok(found) => found,
            Err(e) => {
                warn!("fill aborted: {e}");
                return Err(e);
            }
        };

        // 3) BFS. A pixel is marked visited the moment it is examined, before
        //    the wall check, so nothing is enqueued twice.
        let w = self.width() as usize;
        let mut visited = vec![false; w * self.height() as usize];
        let mut queue = VecDeque::new();

        visited[seed.1 as usize * w + seed.0 as usize] = true;
        self.image.get_pixel_mut(seed.0, seed.1).0[3] = SELECTED;
        queue.push_back(seed);
        let mut filled = 1usize;

        while let Some((x, y)) = queue.pop_front() {
            for (dx, dy) in DIRECTIONS {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                    continue;
                };
                if nx >= self.width() || ny >= self.height() {
                    continue;
                }
                let idx = ny as usize * w + nx as usize;
                if visited[idx] {
                    continue;
                }
                visited[idx] = true;
                if self.walls.is_wall(nx, ny) {
                    continue;
                }
                self.image.get_pixel_mut(nx, ny).0[3] = SELECTED;
                filled += 1;
                queue.push_back((nx, ny));
            }
        }

        // 4) Done.
        self.state = FillState::Filled;
        info!("filled {filled} pixels from seed {seed:?}");
        Ok(FillReport { seed, seed_attempts, filled })
    }

    /// Swap selected and excluded pixels.
    pub fn invert_selection(&mut self) -> Result<(), CutError> {
        if self.state != FillState::Filled {
            return Err(CutError::NotYetFilled);
        }
        for px in self.image.pixels_mut() {
            px.0[3] ^= 0xFF;
        }
        debug!("selection inverted");
        Ok(())
    }

    /// Write the masked image as PNG.
    pub fn export(&self, path: &Path) -> Result<(), CutError> {
        if self.state != FillState::Filled {
            return Err(CutError::NotYetFilled);
        }
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| CutError::Write(format!("{}: {e}", path.display())))?;
        info!("saved {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgb, RgbImage};

    use super::{Cut, FillState};
    use crate::boundary::Boundary;
    use crate::config::CutConfig;
    use crate::error::CutError;

    fn gradient(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
            Rgb([(x * 20) as u8, (y * 20) as u8, ((x + y) * 7) as u8])
        }))
    }

    fn ring(w: i32, h: i32) -> Boundary {
        (0..w)
            .flat_map(|x| (0..h).map(move |y| (x, y)))
            .filter(|&(x, y)| x == 0 || y == 0 || x == w - 1 || y == h - 1)
            .collect()
    }

    fn engine(w: u32, h: u32, boundary: &Boundary) -> Cut {
        let mut cut = Cut::new(CutConfig::default());
        cut.setup_from_image(gradient(w, h), w, h, boundary).expect("valid setup");
        cut
    }

    fn alphas(cut: &Cut) -> Vec<u8> {
        cut.image().pixels().map(|px| px.0[3]).collect()
    }

    #[test]
    fn setup_clears_alpha() {
        let cut = engine(6, 4, &Boundary::default());
        assert!(alphas(&cut).iter().all(|&a| a == 0));
        assert_eq!(cut.state(), FillState::Empty);
    }

    #[test]
    fn perimeter_ring_fills_the_inside() {
        let mut cut = engine(10, 10, &ring(10, 10));
        let report = cut.fill().expect("fill succeeds");

        assert_eq!(report.seed, (5, 5));
        assert_eq!(report.seed_attempts, 0);
        assert_eq!(report.filled, 64);
        assert_eq!(cut.selected_count(), 64);
        for y in 0..10 {
            for x in 0..10 {
                let inside = (1..=8).contains(&x) && (1..=8).contains(&y);
                let want = if inside { 255 } else { 0 };
                assert_eq!(cut.alpha_at(x, y), Some(want), "pixel ({x}, {y})");
            }
        }
        assert!(cut.is_filled());
    }

    #[test]
    fn inner_loop_leaves_outside_and_walls_clear() {
        // square wall from (3,3) to (12,12) in a 16x16 image
        let wall: Boundary = (3..=12)
            .flat_map(|x| (3..=12).map(move |y| (x, y)))
            .filter(|&(x, y)| x == 3 || y == 3 || x == 12 || y == 12)
            .collect();
        let mut cut = engine(16, 16, &wall);
        cut.fill().expect("fill succeeds");

        for y in 0..16u32 {
            for x in 0..16u32 {
                let inside = (4..=11).contains(&x) && (4..=11).contains(&y);
                assert_eq!(cut.alpha_at(x, y), Some(if inside { 255 } else { 0 }));
            }
        }
    }

    #[test]
    fn open_image_fills_everything() {
        let mut cut = engine(7, 5, &Boundary::default());
        let report = cut.fill().expect("fill succeeds");
        assert_eq!(report.filled, 35);
        assert!(alphas(&cut).iter().all(|&a| a == 255));
    }

    #[test]
    fn blocked_center_resamples() {
        // vertical wall through the center column splits the image in two
        let wall: Boundary = (0..9).map(|y| (4, y)).collect();
        let mut cut = engine(9, 9, &wall);
        let report = cut.fill().expect("fill succeeds");

        assert!(report.seed_attempts >= 1);
        assert_ne!(report.seed.0, 4);
        // one side only: 4 columns × 9 rows
        assert_eq!(report.filled, 36);
        for y in 0..9 {
            assert_eq!(cut.alpha_at(4, y), Some(0));
        }
    }

    #[test]
    fn fully_covered_image_reports_no_seed() {
        let wall: Boundary = (0..4).flat_map(|x| (0..4).map(move |y| (x, y))).collect();
        let mut cut = engine(4, 4, &wall);
        match cut.fill() {
            Err(CutError::NoInteriorSeed { attempts }) => assert_eq!(attempts, 10_000),
            other => panic!("expected NoInteriorSeed, got {other:?}"),
        }
        assert_eq!(cut.state(), FillState::Empty);
        assert!(alphas(&cut).iter().all(|&a| a == 0));
    }

    #[test]
    fn fill_before_setup_fails_cleanly() {
        let mut cut = Cut::new(CutConfig::default());
        assert!(matches!(cut.fill(), Err(CutError::NoInteriorSeed { attempts: 0 })));
    }

    #[test]
    fn refill_gives_the_same_mask() {
        let mut cut = engine(10, 10, &ring(10, 10));
        cut.fill().expect("first fill");
        let first = alphas(&cut);
        cut.invert_selection().expect("invert");
        cut.fill().expect("second fill");
        assert_eq!(alphas(&cut), first);
    }

    #[test]
    fn blocked_center_is_reproducible() {
        let wall: Boundary = (0..9).map(|y| (4, y)).collect();
        let mut a = engine(9, 9, &wall);
        let mut b = engine(9, 9, &wall);
        assert_eq!(a.fill().expect("fill a"), b.fill().expect("fill b"));
    }

    #[test]
    fn invert_twice_round_trips() {
        let mut cut = engine(10, 10, &ring(10, 10));
        cut.fill().expect("fill succeeds");
        let before = alphas(&cut);

        cut.invert_selection().expect("invert");
        assert_eq!(cut.selected_count(), 100 - 64);
        assert_eq!(cut.alpha_at(0, 0), Some(255));
        assert_eq!(cut.alpha_at(5, 5), Some(0));

        cut.invert_selection().expect("invert back");
        assert_eq!(alphas(&cut), before);
    }

    #[test]
    fn rgb_is_untouched() {
        let mut cut = engine(10, 10, &ring(10, 10));
        let rgb = |cut: &Cut| -> Vec<[u8; 3]> {
            cut.image().pixels().map(|px| [px.0[0], px.0[1], px.0[2]]).collect()
        };
        let before = rgb(&cut);
        cut.fill().expect("fill succeeds");
        cut.invert_selection().expect("invert");
        assert_eq!(rgb(&cut), before);
    }

    #[test]
    fn invert_and_export_need_a_fill() {
        let mut cut = engine(5, 5, &Boundary::default());
        assert!(matches!(cut.invert_selection(), Err(CutError::NotYetFilled)));
        assert!(matches!(
            cut.export(std::path::Path::new("never-written.png")),
            Err(CutError::NotYetFilled)
        ));
    }

    #[test]
    fn setup_resets_filled_state() {
        let mut cut = engine(5, 5, &Boundary::default());
        cut.fill().expect("fill succeeds");
        cut.setup_from_image(gradient(5, 5), 5, 5, &Boundary::default())
            .expect("second setup");
        assert_eq!(cut.state(), FillState::Empty);
        assert_eq!(cut.selected_count(), 0);
    }

    #[test]
    fn zero_working_size_is_a_decode_error() {
        let mut cut = Cut::new(CutConfig::default());
        let err = cut
            .setup_from_image(gradient(4, 4), 0, 4, &Boundary::default())
            .expect_err("zero width rejected");
        assert!(matches!(err, CutError::Decode(_)));
    }

    #[test]
    fn setup_resizes_to_the_working_resolution() {
        let mut cut = Cut::new(CutConfig::default());
        cut.setup_from_image(gradient(4, 4), 12, 8, &ring(12, 8))
            .expect("valid setup");
        assert_eq!((cut.width(), cut.height()), (12, 8));
        let report = cut.fill().expect("fill succeeds");
        assert_eq!(report.filled, 10 * 6);
    }
}
