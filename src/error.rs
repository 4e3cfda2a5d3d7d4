// Error type for the cut engine and the window front-end.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CutError {
    /// Source image unreadable, or the working size has a zero side.
    #[error("decode error: {0}")]
    Decode(String),

    /// Every seed candidate we tried was a boundary pixel.
    #[error("no interior point found after {attempts} seed attempts")]
    NoInteriorSeed { attempts: usize },

    /// Invert or export asked for before any fill completed.
    #[error("nothing selected yet: run a fill first")]
    NotYetFilled,

    /// Export path could not be created or the PNG could not be encoded.
    #[error("write error: {0}")]
    Write(String),

    // Front-end only
    #[error("window init error: {0}")]
    WindowInit(String),
    #[error("window update error: {0}")]
    WindowUpdate(String),
}
