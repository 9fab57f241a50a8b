/// Terminal rendering for nms.
///
/// Provides the staging canvas and the ratatui/crossterm surface the reveal
/// engine draws on.
pub mod canvas;
pub mod surface;

pub use surface::{BufferSurface, TerminalSurface};
