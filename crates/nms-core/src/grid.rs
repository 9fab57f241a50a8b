use rand::Rng;

use crate::charset::Charset;

/// Position of a cell in the [`Grid`], row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    /// Row index (line number).
    pub row: usize,
    /// Column index within the row.
    pub col: usize,
}

impl Coord {
    /// Create a coordinate.
    #[inline]
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One character of the animated text, with its true and displayed glyph.
///
/// Invariants:
/// - once `revealed`, `display_value == true_value` and it never changes again;
/// - a space is never scrambled, its display value is always `' '`.
///
/// # Example
/// ```
/// use nms_core::{Cell, Charset};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let mut cell = Cell::new('A', &Charset::custom("#").unwrap(), &mut rng);
/// assert_eq!(cell.display_value(), '#');
/// cell.reveal();
/// assert_eq!(cell.display_value(), 'A');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    true_value: char,
    display_value: char,
    revealed: bool,
}

impl Cell {
    /// Create an unrevealed cell showing a scrambled glyph.
    pub fn new<R: Rng + ?Sized>(true_value: char, charset: &Charset, rng: &mut R) -> Self {
        let display_value = if true_value == ' ' {
            ' '
        } else {
            charset.sample(rng)
        };
        Self {
            true_value,
            display_value,
            revealed: false,
        }
    }

    /// Re-sample the displayed glyph. No-op for revealed cells and spaces.
    #[inline]
    pub fn scramble<R: Rng + ?Sized>(&mut self, charset: &Charset, rng: &mut R) {
        if self.revealed || self.is_blank() {
            return;
        }
        self.display_value = charset.sample(rng);
    }

    /// Show the true character. Idempotent.
    #[inline]
    pub fn reveal(&mut self) {
        self.revealed = true;
        self.display_value = self.true_value;
    }

    /// `true` for the space sentinel, which is never scrambled.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.true_value == ' '
    }

    /// The character the text actually contains.
    #[inline]
    #[must_use]
    pub fn true_value(&self) -> char {
        self.true_value
    }

    /// The character currently drawn.
    #[inline]
    #[must_use]
    pub fn display_value(&self) -> char {
        self.display_value
    }

    /// Whether the reveal order has visited this cell.
    #[inline]
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

/// The whole text block as rows of [`Cell`]s. Rows may differ in length.
///
/// Built once per run; its shape never changes afterwards.
///
/// # Example
/// ```
/// use nms_core::{Charset, Grid};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let grid = Grid::build(["hello", "", "world!"], &Charset::ascii(), &mut rng);
/// assert_eq!(grid.row_count(), 3);
/// assert_eq!(grid.max_row_len(), 6);
/// assert_eq!(grid.cell_count(), 11);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Build a grid from lines of text, every cell scrambled.
    pub fn build<I, S, R>(lines: I, charset: &Charset, rng: &mut R) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let rows = lines
            .into_iter()
            .map(|line| {
                line.as_ref()
                    .chars()
                    .map(|ch| Cell::new(ch, charset, rng))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Number of rows, empty rows included.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row, in cells.
    #[must_use]
    pub fn max_row_len(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// `true` if the grid has no cell at all (it may still have empty rows).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// The rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at `coord`, if it exists.
    #[inline]
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.rows.get(coord.row)?.get(coord.col)
    }

    /// Mutable cell at `coord`, if it exists.
    #[inline]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.rows.get_mut(coord.row)?.get_mut(coord.col)
    }

    /// Every coordinate, row-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| (0..cells.len()).map(move |col| Coord::new(row, col)))
    }

    /// Every cell with its coordinate, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (Coord::new(row, col), cell))
        })
    }

    /// Re-sample every unrevealed, non-blank cell.
    pub fn scramble_unrevealed<R: Rng + ?Sized>(&mut self, charset: &Charset, rng: &mut R) {
        for cell in self.rows.iter_mut().flatten() {
            cell.scramble(charset, rng);
        }
    }

    /// Number of cells already revealed.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_revealed())
            .count()
    }

    /// `true` once every cell has been revealed.
    #[must_use]
    pub fn is_fully_revealed(&self) -> bool {
        self.rows.iter().flatten().all(Cell::is_revealed)
    }
}
