use anyhow::{Context, Result};
use nms_core::traits::{CancelGate, Surface};
use nms_core::{Charset, Grid, LayoutOffset, NoInput, RevealConfig};
use nms_render::TerminalSurface;
use nms_reveal::{RevealOrder, RevealScheduler, RunReport, ScheduleSettings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::input;

/// Run the animation of `lines` on the real terminal.
///
/// Configuration problems surface before the terminal is touched. The
/// terminal is restored before any error is returned.
///
/// # Errors
/// Invalid charset, terminal initialisation or write failure.
pub fn run(config: &RevealConfig, lines: &[String]) -> Result<RunReport> {
    let charset = config.charset()?;
    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    log::info!("rng seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut surface = TerminalSurface::acquire().context("cannot initialise the terminal")?;
    let report = if config.interactive {
        let (mut gate, listener) = input::spawn_listener();
        let report = animate(&mut surface, &mut gate, config, lines, &charset, &mut rng);
        drop(gate);
        if listener.join().is_err() {
            log::warn!("input listener panicked");
        }
        report
    } else {
        animate(&mut surface, &mut NoInput, config, lines, &charset, &mut rng)
    };
    drop(surface);
    report
}

/// Build the grid for `surface` and play the reveal on it.
///
/// # Errors
/// Returns an error if the surface fails to flush.
pub fn animate<S, G, R>(
    surface: &mut S,
    gate: &mut G,
    config: &RevealConfig,
    lines: &[String],
    charset: &Charset,
    rng: &mut R,
) -> Result<RunReport>
where
    S: Surface + ?Sized,
    G: CancelGate + ?Sized,
    R: Rng + ?Sized,
{
    let grid = Grid::build(lines, charset, rng);
    let layout = if config.center {
        LayoutOffset::centered(surface.size(), &grid)
    } else {
        LayoutOffset::origin()
    };
    log::debug!(
        "grid {}x{} at +{}+{}, order {}",
        grid.max_row_len(),
        grid.row_count(),
        layout.x_pad,
        layout.y_pad,
        config.order
    );
    let order = RevealOrder::build(&grid, config.order, rng);
    let mut scheduler = RevealScheduler::new(grid, order, layout, ScheduleSettings::from(config));
    let report = scheduler
        .run(surface, gate, charset, rng)
        .context("render failed")?;
    Ok(report)
}
