use nms_core::config::OrderPolicy;
use nms_core::grid::{Coord, Grid};
use rand::Rng;
use rand::seq::SliceRandom;

/// Sequence in which grid cells get revealed.
///
/// Always a permutation of the grid's coordinates: each one appears exactly
/// once, whatever the policy. Shuffles use `SliceRandom::shuffle`
/// (Fisher–Yates), so every permutation is equally likely.
///
/// # Example
/// ```
/// use nms_core::{Charset, Coord, Grid, OrderPolicy};
/// use nms_reveal::RevealOrder;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let grid = Grid::build(["ab", "c"], &Charset::ascii(), &mut rng);
/// let order = RevealOrder::build(&grid, OrderPolicy::Sequential, &mut rng);
/// assert_eq!(order.as_slice(), &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 0)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealOrder {
    coords: Vec<Coord>,
}

impl RevealOrder {
    /// Build the order for `grid` under `policy`.
    pub fn build<R: Rng + ?Sized>(grid: &Grid, policy: OrderPolicy, rng: &mut R) -> Self {
        match policy {
            OrderPolicy::Sequential => Self::sequential(grid),
            OrderPolicy::FlatRandom => Self::flat_random(grid, rng),
            OrderPolicy::PerRowRandom => Self::per_row_random(grid, rng),
        }
    }

    /// Row-major reading order.
    #[must_use]
    pub fn sequential(grid: &Grid) -> Self {
        Self {
            coords: grid.coords().collect(),
        }
    }

    /// Every coordinate shuffled as one sequence.
    pub fn flat_random<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        let mut coords: Vec<Coord> = grid.coords().collect();
        coords.shuffle(rng);
        Self { coords }
    }

    /// Rows top to bottom, each row's columns shuffled independently.
    pub fn per_row_random<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        let mut coords = Vec::with_capacity(grid.cell_count());
        let mut cols: Vec<usize> = Vec::with_capacity(grid.max_row_len());
        for (row, cells) in grid.rows().iter().enumerate() {
            cols.clear();
            cols.extend(0..cells.len());
            cols.shuffle(rng);
            coords.extend(cols.iter().map(|&col| Coord::new(row, col)));
        }
        Self { coords }
    }

    /// Number of reveal steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// `true` when there is nothing to reveal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Coordinate revealed at step `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Coord> {
        self.coords.get(index).copied()
    }

    /// The whole sequence.
    #[must_use]
    pub fn as_slice(&self) -> &[Coord] {
        &self.coords
    }

    /// Iterate in reveal order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords.iter().copied()
    }
}
