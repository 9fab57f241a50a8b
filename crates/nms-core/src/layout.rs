use crate::grid::{Coord, Grid};

/// Screen offset applied to every cell when it is emitted to the renderer.
///
/// The grid itself is never moved; the offset is added at draw time.
///
/// # Example
/// ```
/// use nms_core::{Charset, Grid, LayoutOffset};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let grid = Grid::build(["abcd", "ef"], &Charset::ascii(), &mut rng);
/// let offset = LayoutOffset::centered((10, 6), &grid);
/// assert_eq!((offset.x_pad, offset.y_pad), (3, 2));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutOffset {
    /// Columns added to every cell.
    pub x_pad: u16,
    /// Rows added to every cell.
    pub y_pad: u16,
}

impl LayoutOffset {
    /// No padding: the text starts at the top-left corner.
    #[must_use]
    pub fn origin() -> Self {
        Self::default()
    }

    /// Center `grid` inside a `(width, height)` terminal.
    ///
    /// Padding is clamped to zero when the text is larger than the terminal.
    #[must_use]
    pub fn centered(terminal: (u16, u16), grid: &Grid) -> Self {
        let (width, height) = terminal;
        Self {
            x_pad: centered_pad(width, grid.max_row_len()),
            y_pad: centered_pad(height, grid.row_count()),
        }
    }

    /// Screen position of `coord`, or `None` if it does not fit in `u16`.
    ///
    /// # Example
    /// ```
    /// use nms_core::{Coord, LayoutOffset};
    /// let offset = LayoutOffset { x_pad: 4, y_pad: 1 };
    /// assert_eq!(offset.place(Coord::new(2, 3)), Some((7, 3)));
    /// assert_eq!(offset.place(Coord::new(0, 70_000)), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn place(&self, coord: Coord) -> Option<(u16, u16)> {
        let x = u16::try_from(coord.col).ok()?.checked_add(self.x_pad)?;
        let y = u16::try_from(coord.row).ok()?.checked_add(self.y_pad)?;
        Some((x, y))
    }
}

/// `max(0, floor((available - used) / 2))`.
fn centered_pad(available: u16, used: usize) -> u16 {
    let used = u16::try_from(used).unwrap_or(u16::MAX);
    available.saturating_sub(used) / 2
}
