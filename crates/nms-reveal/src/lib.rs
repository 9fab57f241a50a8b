/// Reveal engine for nms.
///
/// Builds the order in which cells are decrypted and drives the animation
/// loop over a [`nms_core::Surface`], checking a [`nms_core::CancelGate`]
/// after every step.
pub mod order;
pub mod scheduler;

pub use order::RevealOrder;
pub use scheduler::{Outcome, Phase, RevealScheduler, RunReport, ScheduleSettings};
