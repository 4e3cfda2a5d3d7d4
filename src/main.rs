// What you SEE:
// • The chosen image, scaled to fit an 1800x900 box; window pixel = image pixel.
// • Hold Left Mouse: draw the outline (sky blue). Hold Right Mouse: erase it.
// • X cuts (fills whatever the outline encloses), I inverts the selection,
//   S saves the PNG, C clears the outline. ESC quits.

mod draw;
mod types;

use std::path::{Path, PathBuf};

use clap::Parser;
use draw::{draw_boundary, draw_crosshair, draw_text_5x7, Drawer};
use log::{error, info, warn};
use mat_cut::{load_working_image, Boundary, Cut, CutConfig, CutError};
use types::{FrameBuffer, Stroke};

const BOUNDARY_COLOR: u32 = 0x00_87_CE_EB;
const CROSSHAIR_COLOR: u32 = 0x00_FF_CC_33;
const HUD_COLOR: u32 = 0x00_FF_FF_FF;

#[derive(Parser)]
#[command(name = "mat-cut", about = "Outline a region with the mouse and cut it out to a transparent PNG")]
struct Cli {
    /// Input image (PNG, JPEG, BMP)
    input: PathBuf,

    /// Output PNG (default: <input>_cut.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Brush half-width in pixels
    #[arg(long, default_value_t = 2)]
    brush: i32,

    /// Working resolution box width
    #[arg(long, default_value_t = 1800)]
    max_width: u32,

    /// Working resolution box height
    #[arg(long, default_value_t = 900)]
    max_height: u32,

    /// Seed for picking a fill start point when the center is on the outline
    #[arg(long)]
    seed: Option<u32>,
}

impl Cli {
    fn config(&self) -> CutConfig {
        let defaults = CutConfig::default();
        CutConfig {
            brush_radius: self.brush.max(0),
            max_width: self.max_width.max(1),
            max_height: self.max_height.max(1),
            rng_seed: self.seed.unwrap_or(defaults.rng_seed),
            ..defaults
        }
    }
}

/// `dir/photo.jpg` -> `dir/photo_cut.png`
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}_cut.png"))
}

/// Setup + fill; returns the HUD status word.
fn run_cut(cut: &mut Cut, input: &Path, size: (u32, u32), boundary: &Boundary) -> String {
    if boundary.is_empty() {
        warn!("nothing drawn yet");
        return "DRAW FIRST".into();
    }
    if let Err(e) = cut.setup(input, size.0, size.1, boundary) {
        error!("{e}");
        return "LOAD FAILED".into();
    }
    match cut.fill() {
        Ok(report) => format!("FILLED {}", report.filled),
        Err(CutError::NoInteriorSeed { .. }) => "NO SEED".into(),
        Err(e) => {
            error!("{e}");
            "FILL FAILED".into()
        }
    }
}

fn main() -> Result<(), CutError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = cli.config();

    /* --- Working resolution ---
       The window, the outline and the engine all live in this pixel space. */
    let (src_w, src_h) = image::image_dimensions(&cli.input)
        .map_err(|e| CutError::Decode(format!("{}: {e}", cli.input.display())))?;
    let size = config.working_size(src_w, src_h);
    let base = FrameBuffer::from_rgba(&load_working_image(&cli.input, size.0, size.1, &config)?);
    info!("{}: {src_w}x{src_h} -> working {}x{}", cli.input.display(), size.0, size.1);

    let output = cli.output.clone().unwrap_or_else(|| default_output(&cli.input));
    let mut drawer = Drawer::new("mat-cut", size.0 as usize, size.1 as usize)?;
    let mut screen = base.clone();

    let mut boundary = Boundary::new(config.brush_radius);
    let mut cut = Cut::new(config);
    let mut status = String::from("READY");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Outline edits from held buttons. */
        let stroke = if drawer.left_mouse_down() {
            Some(Stroke::Draw)
        } else if drawer.right_mouse_down() {
            Some(Stroke::Erase)
        } else {
            None
        };
        if let (Some(stroke), Some((mx, my))) = (stroke, drawer.mouse_pos()) {
            match stroke {
                Stroke::Draw => boundary.add(mx, my),
                Stroke::Erase => boundary.remove(mx, my),
            }
        }

        /* 2) Commands. The outline is settled here: fill runs to completion
              before the next edit is read. */
        if drawer.c_pressed_once() {
            boundary.clear();
            status = "READY".into();
        }
        if drawer.x_pressed_once() {
            status = run_cut(&mut cut, &cli.input, size, &boundary);
        }
        if drawer.i_pressed_once() {
            status = match cut.invert_selection() {
                Ok(()) => "INVERTED".into(),
                Err(e) => {
                    warn!("{e}");
                    "FILL FIRST".into()
                }
            };
        }
        if drawer.s_pressed_once() {
            status = match cut.export(&output) {
                Ok(()) => {
                    println!("saved {}", output.display());
                    "SAVED".into()
                }
                Err(CutError::NotYetFilled) => "FILL FIRST".into(),
                Err(e) => {
                    error!("{e}");
                    "SAVE FAILED".into()
                }
            };
        }

        /* 3) Image, outline, crosshair, HUD. */
        screen.pixels.copy_from_slice(&base.pixels);
        draw_boundary(&mut screen, &boundary, BOUNDARY_COLOR);
        if let Some((mx, my)) = drawer.mouse_pos() {
            draw_crosshair(&mut screen, mx, my, 12, CROSSHAIR_COLOR);
        }
        let mode = match stroke {
            Some(Stroke::Draw) => "DRAW",
            Some(Stroke::Erase) => "ERASE",
            None => "IDLE",
        };
        let hud = format!("{mode} | PTS: {} | {status}", boundary.len());
        draw_text_5x7(&mut screen, 8, 8, &hud, HUD_COLOR);

        /* 4) Present. */
        drawer.present(&screen)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::Parser;

    use super::{default_output, Cli};

    #[test]
    fn output_sits_next_to_the_input() {
        assert_eq!(default_output(Path::new("pics/cat.jpg")), PathBuf::from("pics/cat_cut.png"));
    }

    #[test]
    fn cli_maps_onto_config() {
        let cli = Cli::parse_from(["mat-cut", "in.png", "--brush", "4", "--seed", "9"]);
        let cfg = cli.config();
        assert_eq!(cfg.brush_radius, 4);
        assert_eq!(cfg.rng_seed, 9);
        assert_eq!((cfg.max_width, cfg.max_height), (1800, 900));
        assert_eq!(cfg.max_seed_attempts, 10_000);
    }
}
