//! Cut a user-outlined region out of an image.
//!
//! Draw a [`Boundary`] in working-resolution pixel space, hand it to a
//! [`Cut`] together with the image, and [`Cut::fill`] makes everything the
//! boundary encloses opaque (alpha 255) and everything else transparent.
//!
//! ```no_run
//! use std::path::Path;
//! use mat_cut::{Boundary, Cut, CutConfig};
//!
//! # fn main() -> Result<(), mat_cut::CutError> {
//! let config = CutConfig::default();
//! let mut boundary = Boundary::new(config.brush_radius);
//! for x in 10..90 {
//!     boundary.add(x, 10);
//!     boundary.add(x, 90);
//! }
//! for y in 10..90 {
//!     boundary.add(10, y);
//!     boundary.add(90, y);
//! }
//!
//! let mut cut = Cut::new(config);
//! cut.setup(Path::new("photo.jpg"), 100, 100, &boundary)?;
//! cut.fill()?;
//! cut.export(Path::new("photo_cut.png"))?;
//! # Ok(())
//! # }
//! ```

pub mod boundary;
pub mod config;
pub mod cut;
pub mod error;
pub mod rng;

pub use boundary::{Boundary, BoundaryMask};
pub use config::CutConfig;
pub use cut::{Cut, FillReport, FillState, load_working_image};
pub use error::CutError;
