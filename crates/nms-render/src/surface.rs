use std::io;

use nms_core::color::CellStyle;
use nms_core::error::CoreError;
use nms_core::traits::Surface;
use ratatui::DefaultTerminal;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::canvas;

/// Headless surface backed by a ratatui [`Buffer`].
///
/// Used as the staging area of [`TerminalSurface`] and directly in tests.
///
/// # Example
/// ```
/// use nms_core::color::CellStyle;
/// use nms_core::traits::Surface;
/// use nms_render::BufferSurface;
///
/// let mut surface = BufferSurface::new(4, 1);
/// surface.set_cell(1, 0, 'x', CellStyle::default());
/// assert_eq!(surface.row_text(0).as_deref(), Some(" x  "));
/// ```
#[derive(Clone, Debug)]
pub struct BufferSurface {
    buffer: Buffer,
    flushes: usize,
}

impl BufferSurface {
    /// Blank surface of `width × height` cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
            flushes: 0,
        }
    }

    /// Staged cells.
    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Number of `flush` calls so far.
    #[must_use]
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Text of row `y`, `None` past the bottom edge.
    #[must_use]
    pub fn row_text(&self, y: u16) -> Option<String> {
        if y >= self.buffer.area.height {
            return None;
        }
        let text = (0..self.buffer.area.width)
            .filter_map(|x| self.buffer.cell((x, y)))
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        Some(text)
    }
}

impl Surface for BufferSurface {
    fn size(&self) -> (u16, u16) {
        (self.buffer.area.width, self.buffer.area.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        canvas::put_glyph(&mut self.buffer, x, y, ch, style);
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// The real terminal: alternate screen, raw mode, ratatui diffing.
///
/// Acquired once per run. Dropping it restores the terminal, whichever way
/// the run ends.
pub struct TerminalSurface {
    terminal: DefaultTerminal,
    staged: BufferSurface,
}

impl TerminalSurface {
    /// Enter raw mode and the alternate screen, then read the terminal size.
    ///
    /// # Errors
    /// [`CoreError::Terminal`] if the terminal cannot be initialised.
    pub fn acquire() -> Result<Self, CoreError> {
        let terminal = ratatui::try_init()?;
        let (width, height) = match crossterm::terminal::size() {
            Ok(size) => size,
            Err(e) => {
                ratatui::restore();
                return Err(e.into());
            }
        };
        log::debug!("terminal acquired: {width}x{height}");
        Ok(Self {
            terminal,
            staged: BufferSurface::new(width, height),
        })
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> (u16, u16) {
        self.staged.size()
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.staged.set_cell(x, y, ch, style);
    }

    fn flush(&mut self) -> io::Result<()> {
        let staged = self.staged.buffer();
        self.terminal.draw(|frame| {
            let area = frame.area();
            canvas::render_staged(frame.buffer_mut(), area, staged);
        })?;
        self.staged.flush()
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        ratatui::restore();
        log::debug!("terminal restored after {} frames", self.staged.flushes());
    }
}
