use image::imageops::FilterType;

/// Tunables for boundary drawing and filling.
#[derive(Debug, Clone)]
pub struct CutConfig {
    /// Brush half-width: every pointer point becomes a `(2r+1)²` square.
    pub brush_radius: i32,
    /// Random seed resamples tried before giving up with `NoInteriorSeed`.
    pub max_seed_attempts: usize,
    /// Seed for the resampling RNG.
    pub rng_seed: u32,
    /// Filter used for the one-time resize to the working resolution.
    /// The front-end and the engine must use the same one.
    pub resize_filter: FilterType,
    /// Box the working resolution is fitted into (aspect ratio kept).
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            brush_radius: 2,
            max_seed_attempts: 10_000,
            rng_seed: 0xC0FFEE,
            resize_filter: FilterType::Triangle,
            max_width: 1800,
            max_height: 900,
        }
    }
}

impl CutConfig {
    /// Working resolution for a `width × height` source: scaled (up or down)
    /// until it touches the configured box. Never returns a zero side.
    pub fn working_size(&self, width: u32, height: u32) -> (u32, u32) {
        if width == 0 || height == 0 {
            return (width, height);
        }
        let scale_w = self.max_width as f64 / width as f64;
        let scale_h = self.max_height as f64 / height as f64;
        let scale = scale_w.min(scale_h);

        let w = ((width as f64 * scale) as u32).max(1);
        let h = ((height as f64 * scale) as u32).max(1);
        (w, h)
    }
}
