//! End-to-end: the reveal engine drawing onto a headless buffer surface.

use nms_core::{Charset, Grid, LayoutOffset, NoInput, OrderPolicy, Surface};
use nms_render::BufferSurface;
use nms_reveal::{Outcome, RevealOrder, RevealScheduler, ScheduleSettings};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn run(lines: &[&str], policy: OrderPolicy, surface: &mut BufferSurface) -> Outcome {
    let charset = Charset::ascii();
    let mut rng = StdRng::seed_from_u64(42);
    let grid = Grid::build(lines, &charset, &mut rng);
    let layout = LayoutOffset::centered(surface.size(), &grid);
    let order = RevealOrder::build(&grid, policy, &mut rng);
    let settings = ScheduleSettings {
        interactive: false,
        ..ScheduleSettings::default()
    };
    let mut scheduler = RevealScheduler::new(grid, order, layout, settings);
    scheduler
        .run(surface, &mut NoInput, &charset, &mut rng)
        .unwrap()
        .outcome
}

#[test]
fn centered_text_is_fully_decrypted() {
    let mut surface = BufferSurface::new(10, 4);
    let outcome = run(&["HELLO", "WORLD"], OrderPolicy::FlatRandom, &mut surface);

    assert_eq!(outcome, Outcome::Done);
    assert_eq!(surface.row_text(0).as_deref(), Some("          "));
    assert_eq!(surface.row_text(1).as_deref(), Some("  HELLO   "));
    assert_eq!(surface.row_text(2).as_deref(), Some("  WORLD   "));
    // One scrambled frame, then one per revealed cell.
    assert_eq!(surface.flushes(), 11);
}

#[test]
fn oversized_text_is_clipped_at_the_edge() {
    let mut surface = BufferSurface::new(4, 1);
    let outcome = run(&["abcdefgh", "second"], OrderPolicy::Sequential, &mut surface);

    assert_eq!(outcome, Outcome::Done);
    assert_eq!(surface.row_text(0).as_deref(), Some("abcd"));
}
