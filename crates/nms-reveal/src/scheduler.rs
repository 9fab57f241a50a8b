use std::thread;
use std::time::Duration;

use nms_core::Charset;
use nms_core::color::CellStyle;
use nms_core::config::{RedrawMode, RevealConfig};
use nms_core::error::CoreError;
use nms_core::grid::{Cell, Coord, Grid};
use nms_core::layout::LayoutOffset;
use nms_core::traits::{CancelGate, Surface};
use rand::Rng;

use crate::order::RevealOrder;

/// Where the animation currently is.
///
/// `Initializing → ScrambledDisplay → Rescramble* → Revealing → Done`, or
/// `Revealing → Aborted` when the user presses a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Grid built, first frame being drawn.
    Initializing,
    /// Pause on the fully scrambled block.
    ScrambledDisplay,
    /// Cosmetic re-scramble passes.
    Rescramble,
    /// Consuming the reveal order.
    Revealing,
    /// Every cell revealed.
    Done,
    /// Stopped by user input before the end.
    Aborted,
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The whole text was revealed.
    Done,
    /// The user cancelled during the reveal.
    Aborted,
}

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// How the run ended.
    pub outcome: Outcome,
    /// Reveal steps performed.
    pub steps: usize,
    /// Frames flushed to the surface.
    pub frames: usize,
}

/// Timing and drawing parameters of the scheduler, taken from [`RevealConfig`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug)]
pub struct ScheduleSettings {
    /// Pause after each frame.
    pub frame_delay: Duration,
    /// Pause on the scrambled block before revealing.
    pub scramble_pause: Duration,
    /// Pause after the last reveal.
    pub trailing_pause: Duration,
    /// Cosmetic re-scramble passes.
    pub rescramble_passes: u32,
    /// Per-step redraw granularity.
    pub redraw: RedrawMode,
    /// `false` = skip every wait and never consult the gate.
    pub interactive: bool,
    /// Block on the gate once done.
    pub hold_on_done: bool,
    /// Draw the scramble cell by cell instead of in one frame.
    pub type_in: bool,
    /// Style of scrambled glyphs.
    pub scramble_style: CellStyle,
    /// Style of revealed glyphs.
    pub reveal_style: CellStyle,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self::from(&RevealConfig::default())
    }
}

impl From<&RevealConfig> for ScheduleSettings {
    fn from(config: &RevealConfig) -> Self {
        Self {
            frame_delay: config.frame_delay(),
            scramble_pause: Duration::from_millis(config.scramble_pause_ms),
            trailing_pause: Duration::from_millis(config.trailing_pause_ms),
            rescramble_passes: config.rescramble_passes,
            redraw: config.redraw,
            interactive: config.interactive,
            hold_on_done: config.hold_on_done,
            type_in: config.type_in,
            scramble_style: config.scramble_style(),
            reveal_style: config.reveal_style(),
        }
    }
}

/// Drives one reveal animation over a grid it exclusively owns.
///
/// # Example
/// ```
/// use nms_core::{Charset, Grid, LayoutOffset, NoInput, OrderPolicy, Surface};
/// use nms_core::color::CellStyle;
/// use nms_reveal::{Outcome, RevealOrder, RevealScheduler, ScheduleSettings};
/// use rand::SeedableRng;
///
/// struct Null;
/// impl Surface for Null {
///     fn size(&self) -> (u16, u16) { (80, 24) }
///     fn set_cell(&mut self, _x: u16, _y: u16, _ch: char, _style: CellStyle) {}
///     fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
/// }
///
/// let charset = Charset::ascii();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let grid = Grid::build(["secret"], &charset, &mut rng);
/// let order = RevealOrder::build(&grid, OrderPolicy::FlatRandom, &mut rng);
/// let settings = ScheduleSettings { interactive: false, ..ScheduleSettings::default() };
/// let mut scheduler = RevealScheduler::new(grid, order, LayoutOffset::origin(), settings);
///
/// let report = scheduler.run(&mut Null, &mut NoInput, &charset, &mut rng).unwrap();
/// assert_eq!(report.outcome, Outcome::Done);
/// assert_eq!(report.steps, 6);
/// assert!(scheduler.grid().is_fully_revealed());
/// ```
pub struct RevealScheduler {
    grid: Grid,
    order: RevealOrder,
    cursor: usize,
    layout: LayoutOffset,
    settings: ScheduleSettings,
    phase: Phase,
    steps: usize,
    frames: usize,
}

impl RevealScheduler {
    /// Create a scheduler. `order` must be built from `grid`.
    #[must_use]
    pub fn new(
        grid: Grid,
        order: RevealOrder,
        layout: LayoutOffset,
        settings: ScheduleSettings,
    ) -> Self {
        debug_assert_eq!(order.len(), grid.cell_count(), "order does not match grid");
        Self {
            grid,
            order,
            cursor: 0,
            layout,
            settings,
            phase: Phase::Initializing,
            steps: 0,
            frames: 0,
        }
    }

    /// The grid in its current state.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The reveal order.
    #[must_use]
    pub fn order(&self) -> &RevealOrder {
        &self.order
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Reveal steps performed so far.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Consume the scheduler, keeping the grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Reveal the next cell of the order without drawing anything.
    ///
    /// Returns the revealed coordinate, or `None` once the order is exhausted.
    pub fn reveal_next(&mut self) -> Option<Coord> {
        let coord = self.order.get(self.cursor)?;
        self.cursor += 1;
        if let Some(cell) = self.grid.get_mut(coord) {
            cell.reveal();
        }
        self.steps += 1;
        Some(coord)
    }

    /// Run the whole animation.
    ///
    /// Meant to be called once; a second call finds the order exhausted.
    ///
    /// # Errors
    /// Returns [`CoreError::Terminal`] if the surface fails to flush.
    pub fn run<S, G, R>(
        &mut self,
        surface: &mut S,
        gate: &mut G,
        charset: &Charset,
        rng: &mut R,
    ) -> Result<RunReport, CoreError>
    where
        S: Surface + ?Sized,
        G: CancelGate + ?Sized,
        R: Rng + ?Sized,
    {
        self.enter(Phase::Initializing);
        if self.grid.is_empty() {
            self.flush(surface)?;
            self.enter(Phase::Done);
            return Ok(self.report(Outcome::Done));
        }

        if self.settings.type_in && self.settings.interactive {
            self.type_in(surface)?;
        } else {
            self.draw_frame(surface);
            self.flush(surface)?;
        }

        self.enter(Phase::ScrambledDisplay);
        self.pause(self.settings.scramble_pause);

        if self.settings.rescramble_passes > 0 {
            self.enter(Phase::Rescramble);
        }
        for _ in 0..self.settings.rescramble_passes {
            self.grid.scramble_unrevealed(charset, rng);
            self.draw_frame(surface);
            self.flush(surface)?;
            self.pause(self.settings.frame_delay);
        }

        self.enter(Phase::Revealing);
        while let Some(coord) = self.reveal_next() {
            match self.settings.redraw {
                RedrawMode::Cell => self.draw_cell(surface, coord),
                RedrawMode::Frame => self.draw_frame(surface),
            }
            self.flush(surface)?;
            self.pause(self.settings.frame_delay);

            if self.settings.interactive
                && let Some(event) = gate.poll()
            {
                log::info!(
                    "reveal cancelled by {event:?} after {} of {} steps",
                    self.steps,
                    self.order.len()
                );
                self.enter(Phase::Aborted);
                return Ok(self.report(Outcome::Aborted));
            }
        }

        self.enter(Phase::Done);
        self.pause(self.settings.trailing_pause);
        if self.settings.interactive && self.settings.hold_on_done {
            log::debug!("waiting for a key press");
            match gate.wait() {
                Some(event) => log::debug!("hold released by {event:?}"),
                None => log::debug!("input source closed during hold"),
            }
        }
        Ok(self.report(Outcome::Done))
    }

    /// Draw the scramble one cell per frame, reading order, then a full frame.
    fn type_in<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), CoreError> {
        let coords: Vec<Coord> = self.grid.coords().collect();
        for coord in coords {
            if self.grid.get(coord).is_some_and(Cell::is_blank) {
                continue;
            }
            self.draw_cell(surface, coord);
            self.flush(surface)?;
            self.pause(self.settings.frame_delay);
        }
        self.draw_frame(surface);
        self.flush(surface)
    }

    fn draw_cell<S: Surface + ?Sized>(&self, surface: &mut S, coord: Coord) {
        let Some(cell) = self.grid.get(coord) else {
            return;
        };
        let Some((x, y)) = self.layout.place(coord) else {
            return;
        };
        let style = if cell.is_revealed() {
            self.settings.reveal_style
        } else {
            self.settings.scramble_style
        };
        surface.set_cell(x, y, cell.display_value(), style);
    }

    fn draw_frame<S: Surface + ?Sized>(&self, surface: &mut S) {
        for coord in self.grid.coords() {
            self.draw_cell(surface, coord);
        }
    }

    fn flush<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), CoreError> {
        surface.flush()?;
        self.frames += 1;
        Ok(())
    }

    /// Wait without mutating anything. Skipped when nobody is watching.
    fn pause(&self, duration: Duration) {
        if self.settings.interactive && !duration.is_zero() {
            thread::sleep(duration);
        }
    }

    fn enter(&mut self, phase: Phase) {
        log::debug!("phase {:?} -> {phase:?}", self.phase);
        self.phase = phase;
    }

    fn report(&self, outcome: Outcome) -> RunReport {
        RunReport {
            outcome,
            steps: self.steps,
            frames: self.frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nms_core::config::OrderPolicy;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    /// Records every draw call and keeps the last glyph per position.
    #[derive(Default)]
    struct RecordingSurface {
        screen: HashMap<(u16, u16), (char, CellStyle)>,
        set_calls: usize,
        flushes: usize,
        fail_flush: bool,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (u16, u16) {
            (80, 24)
        }

        fn set_cell(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
            self.set_calls += 1;
            self.screen.insert((x, y), (ch, style));
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if self.fail_flush {
                return Err(std::io::Error::other("terminal went away"));
            }
            self.flushes += 1;
            Ok(())
        }
    }

    /// Reports a key on the `fire_at`-th poll.
    struct ScriptedGate {
        polls: usize,
        fire_at: Option<usize>,
        waits: usize,
    }

    impl ScriptedGate {
        fn firing_at(poll: usize) -> Self {
            Self {
                polls: 0,
                fire_at: Some(poll),
                waits: 0,
            }
        }

        fn silent() -> Self {
            Self {
                polls: 0,
                fire_at: None,
                waits: 0,
            }
        }
    }

    impl CancelGate for ScriptedGate {
        type Event = char;

        fn poll(&mut self) -> Option<char> {
            self.polls += 1;
            (Some(self.polls) == self.fire_at).then_some('q')
        }

        fn wait(&mut self) -> Option<char> {
            self.waits += 1;
            Some('\n')
        }
    }

    fn quick(interactive: bool) -> ScheduleSettings {
        ScheduleSettings {
            frame_delay: Duration::ZERO,
            scramble_pause: Duration::ZERO,
            trailing_pause: Duration::ZERO,
            hold_on_done: false,
            interactive,
            ..ScheduleSettings::default()
        }
    }

    fn scheduler(
        lines: &[&str],
        policy: OrderPolicy,
        settings: ScheduleSettings,
        rng: &mut StdRng,
    ) -> RevealScheduler {
        let grid = Grid::build(lines, &Charset::ascii(), rng);
        let order = RevealOrder::build(&grid, policy, rng);
        RevealScheduler::new(grid, order, LayoutOffset::origin(), settings)
    }

    #[test]
    fn two_cells_sequential_non_interactive() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = scheduler(&["AB"], OrderPolicy::Sequential, quick(false), &mut rng);
        let mut surface = RecordingSurface::default();
        let mut gate = ScriptedGate::firing_at(1);

        let report = s
            .run(&mut surface, &mut gate, &Charset::ascii(), &mut rng)
            .unwrap();

        assert_eq!(report.outcome, Outcome::Done);
        assert_eq!(report.steps, 2);
        assert_eq!(s.phase(), Phase::Done);
        let row = &s.grid().rows()[0];
        assert!(row.iter().all(Cell::is_revealed));
        assert_eq!(row[0].display_value(), 'A');
        assert_eq!(row[1].display_value(), 'B');
        // Non-interactive: the gate is never consulted.
        assert_eq!(gate.polls, 0);
        assert_eq!(gate.waits, 0);
        assert_eq!(surface.screen[&(0, 0)].0, 'A');
        assert_eq!(surface.screen[&(1, 0)].0, 'B');
    }

    #[test]
    fn empty_input_only_flushes_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = scheduler(&[], OrderPolicy::FlatRandom, quick(true), &mut rng);
        let mut surface = RecordingSurface::default();
        let mut gate = ScriptedGate::silent();

        let report = s
            .run(&mut surface, &mut gate, &Charset::ascii(), &mut rng)
            .unwrap();

        assert_eq!(
            report,
            RunReport {
                outcome: Outcome::Done,
                steps: 0,
                frames: 1
            }
        );
        assert_eq!(surface.set_calls, 0);
        assert_eq!(surface.flushes, 1);
        assert_eq!(gate.waits, 0);
    }

    #[test]
    fn single_space_stays_blank() {
        let mut rng = StdRng::seed_from_u64(1);
        let settings = ScheduleSettings {
            rescramble_passes: 5,
            ..quick(false)
        };
        let mut s = scheduler(&[" "], OrderPolicy::Sequential, settings, &mut rng);
        assert_eq!(s.grid().cell_count(), 1);
        assert_eq!(s.grid().rows()[0][0].display_value(), ' ');

        let mut surface = RecordingSurface::default();
        s.run(&mut surface, &mut ScriptedGate::silent(), &Charset::ascii(), &mut rng)
            .unwrap();

        let cell = s.grid().rows()[0][0];
        assert_eq!(cell.true_value(), ' ');
        assert_eq!(cell.display_value(), ' ');
        assert_eq!(surface.screen[&(0, 0)].0, ' ');
    }

    #[test]
    fn key_after_third_step_aborts_with_three_revealed() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = scheduler(&["0123456789"], OrderPolicy::FlatRandom, quick(true), &mut rng);
        let mut gate = ScriptedGate::firing_at(3);

        let report = s
            .run(
                &mut RecordingSurface::default(),
                &mut gate,
                &Charset::ascii(),
                &mut rng,
            )
            .unwrap();

        assert_eq!(report.outcome, Outcome::Aborted);
        assert_eq!(report.steps, 3);
        assert_eq!(s.phase(), Phase::Aborted);
        assert_eq!(s.grid().revealed_count(), 3);
        let unrevealed = s.grid().cells().filter(|(_, c)| !c.is_revealed()).count();
        assert_eq!(unrevealed, 7);
        for coord in s.order().iter().take(3) {
            assert!(s.grid().get(coord).is_some_and(Cell::is_revealed));
        }
    }

    #[test]
    fn hold_on_done_waits_for_a_key() {
        let mut rng = StdRng::seed_from_u64(1);
        let settings = ScheduleSettings {
            hold_on_done: true,
            ..quick(true)
        };
        let mut s = scheduler(&["ok"], OrderPolicy::Sequential, settings, &mut rng);
        let mut gate = ScriptedGate::silent();

        let report = s
            .run(
                &mut RecordingSurface::default(),
                &mut gate,
                &Charset::ascii(),
                &mut rng,
            )
            .unwrap();

        assert_eq!(report.outcome, Outcome::Done);
        assert_eq!(gate.polls, 2);
        assert_eq!(gate.waits, 1);
    }

    #[test]
    fn hold_ends_when_input_source_is_gone() {
        let mut rng = StdRng::seed_from_u64(1);
        let settings = ScheduleSettings {
            hold_on_done: true,
            ..quick(true)
        };
        let mut s = scheduler(&["ok"], OrderPolicy::Sequential, settings, &mut rng);

        let report = s
            .run(
                &mut RecordingSurface::default(),
                &mut nms_core::NoInput,
                &Charset::ascii(),
                &mut rng,
            )
            .unwrap();

        assert_eq!(report.outcome, Outcome::Done);
        assert_eq!(s.phase(), Phase::Done);
        assert!(s.grid().is_fully_revealed());
    }

    #[test]
    fn rescramble_passes_redraw_without_revealing() {
        let mut rng = StdRng::seed_from_u64(3);
        let settings = ScheduleSettings {
            rescramble_passes: 4,
            ..quick(false)
        };
        let mut s = scheduler(&["abc", "de"], OrderPolicy::PerRowRandom, settings, &mut rng);
        let order_before = s.order().clone();
        let mut surface = RecordingSurface::default();

        let report = s
            .run(&mut surface, &mut ScriptedGate::silent(), &Charset::ascii(), &mut rng)
            .unwrap();

        // 1 initial frame + 4 passes + 5 reveal steps.
        assert_eq!(report.frames, 10);
        assert_eq!(s.order(), &order_before);
        assert_eq!(report.steps, 5);
    }

    #[test]
    fn frame_redraw_touches_every_cell_each_step() {
        let mut rng = StdRng::seed_from_u64(3);
        let settings = ScheduleSettings {
            redraw: RedrawMode::Frame,
            ..quick(false)
        };
        let mut s = scheduler(&["abc"], OrderPolicy::Sequential, settings, &mut rng);
        let mut surface = RecordingSurface::default();
        s.run(&mut surface, &mut ScriptedGate::silent(), &Charset::ascii(), &mut rng)
            .unwrap();
        // Initial frame + 3 full frames of 3 cells.
        assert_eq!(surface.set_calls, 12);
    }

    #[test]
    fn revealed_cells_use_reveal_style() {
        let mut rng = StdRng::seed_from_u64(3);
        let reveal_style = CellStyle {
            fg: Some((0, 255, 0)),
            bold: true,
        };
        let settings = ScheduleSettings {
            reveal_style,
            ..quick(false)
        };
        let mut s = scheduler(&["xy"], OrderPolicy::Sequential, settings, &mut rng);
        let mut surface = RecordingSurface::default();
        s.run(&mut surface, &mut ScriptedGate::silent(), &Charset::ascii(), &mut rng)
            .unwrap();
        assert_eq!(surface.screen[&(0, 0)], ('x', reveal_style));
        assert_eq!(surface.screen[&(1, 0)], ('y', reveal_style));
    }

    #[test]
    fn layout_offset_shifts_draw_calls() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = Grid::build(["hi"], &Charset::ascii(), &mut rng);
        let order = RevealOrder::sequential(&grid);
        let layout = LayoutOffset { x_pad: 10, y_pad: 5 };
        let mut s = RevealScheduler::new(grid, order, layout, quick(false));
        let mut surface = RecordingSurface::default();
        s.run(&mut surface, &mut ScriptedGate::silent(), &Charset::ascii(), &mut rng)
            .unwrap();
        assert_eq!(surface.screen[&(10, 5)].0, 'h');
        assert_eq!(surface.screen[&(11, 5)].0, 'i');
        assert_eq!(surface.screen.len(), 2);
    }

    #[test]
    fn type_in_draws_scramble_cell_by_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let settings = ScheduleSettings {
            type_in: true,
            ..quick(true)
        };
        let mut s = scheduler(&["a b"], OrderPolicy::Sequential, settings, &mut rng);
        let mut surface = RecordingSurface::default();
        let report = s
            .run(&mut surface, &mut ScriptedGate::silent(), &Charset::ascii(), &mut rng)
            .unwrap();
        // 2 typed cells (the space is skipped) + 1 full frame + 3 reveal steps.
        assert_eq!(report.frames, 6);
    }

    #[test]
    fn flush_failure_is_a_terminal_error() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = scheduler(&["x"], OrderPolicy::Sequential, quick(false), &mut rng);
        let mut surface = RecordingSurface {
            fail_flush: true,
            ..RecordingSurface::default()
        };
        let err = s
            .run(&mut surface, &mut ScriptedGate::silent(), &Charset::ascii(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, CoreError::Terminal(_)));
        assert_eq!(s.steps(), 0);
    }

    #[test]
    fn reveal_next_is_exhaustive_and_stable() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut s = scheduler(&["abc", "d"], OrderPolicy::FlatRandom, quick(false), &mut rng);
        let mut seen = Vec::new();
        while let Some(coord) = s.reveal_next() {
            let shown = s.grid().get(coord).map(Cell::display_value);
            seen.push((coord, shown));
        }
        assert_eq!(seen.len(), 4);
        assert!(s.reveal_next().is_none());
        assert!(s.grid().is_fully_revealed());
        for (coord, shown) in seen {
            assert_eq!(s.grid().get(coord).map(Cell::display_value), shown);
        }
    }
}
