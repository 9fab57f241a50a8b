/// Charset, cell grid, layout and configuration for nms.
///
/// This crate holds the data model of the reveal animation and the traits
/// through which the engine talks to the terminal and to the input source.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod traits;

pub use charset::Charset;
pub use color::{CellStyle, Rgb};
pub use config::{OrderPolicy, Preset, RedrawMode, RevealConfig};
pub use error::CoreError;
pub use grid::{Cell, Coord, Grid};
pub use layout::LayoutOffset;
pub use traits::{CancelGate, NoInput, Surface};
