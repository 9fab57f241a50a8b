use std::convert::Infallible;
use std::io;

use crate::color::CellStyle;

/// Character surface the animation draws on.
///
/// Implemented by `TerminalSurface` (ratatui/crossterm) and by the headless
/// `BufferSurface`.
///
/// # Example
/// ```
/// use nms_core::traits::Surface;
/// use nms_core::color::CellStyle;
///
/// struct Null;
/// impl Surface for Null {
///     fn size(&self) -> (u16, u16) { (80, 24) }
///     fn set_cell(&mut self, _x: u16, _y: u16, _ch: char, _style: CellStyle) {}
///     fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
/// }
/// ```
pub trait Surface {
    /// `(width, height)` in cells. Read once at startup by the caller.
    fn size(&self) -> (u16, u16);

    /// Stage `ch` at `(x, y)`. Positions outside the surface are ignored.
    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: CellStyle);

    /// Commit staged cells to the screen.
    ///
    /// # Errors
    /// Any write failure; callers treat it as fatal.
    fn flush(&mut self) -> io::Result<()>;
}

/// Source of user input consulted by the reveal loop.
///
/// `poll` must never block: the render cadence cannot wait on a key that may
/// never come.
pub trait CancelGate {
    /// Input event type, only logged by the engine.
    type Event: std::fmt::Debug;

    /// Next pending event, if any. Never blocks.
    fn poll(&mut self) -> Option<Self::Event>;

    /// Block until an event arrives. `None` if the source is gone.
    fn wait(&mut self) -> Option<Self::Event>;
}

/// Gate for runs without a user: never yields anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl CancelGate for NoInput {
    type Event = Infallible;

    fn poll(&mut self) -> Option<Infallible> {
        None
    }

    fn wait(&mut self) -> Option<Infallible> {
        None
    }
}
