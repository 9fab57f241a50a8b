use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::Charset;
use crate::color::{CellStyle, Rgb, parse_color};
use crate::error::CoreError;

/// Upper bound for every delay/pause, in milliseconds.
const MAX_DELAY_MS: u64 = 60_000;
/// Upper bound for cosmetic re-scramble passes.
const MAX_RESCRAMBLE_PASSES: u32 = 100;

/// Complete configuration of one reveal run.
///
/// Serializable to TOML. Every field has a sane default.
///
/// # Example
/// ```
/// use nms_core::config::{OrderPolicy, RevealConfig};
/// let config = RevealConfig::default();
/// assert_eq!(config.order, OrderPolicy::Sequential);
/// assert_eq!(config.rescramble_passes, 0);
/// assert!(config.interactive);
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RevealConfig {
    // === Timing ===
    /// Pause between two frames of the animation, in ms.
    pub frame_delay_ms: u64,
    /// Pause on the fully scrambled block before the first reveal, in ms.
    pub scramble_pause_ms: u64,
    /// Pause after the last reveal, in ms.
    pub trailing_pause_ms: u64,

    // === Ordre de révélation ===
    /// Order in which cells are revealed.
    pub order: OrderPolicy,
    /// Cosmetic re-scramble passes before revealing.
    pub rescramble_passes: u32,
    /// Redraw only the revealed cell, or the whole frame, at each step.
    pub redraw: RedrawMode,

    // === Interaction ===
    /// `false` = no user present: every wait is skipped, input is ignored.
    pub interactive: bool,
    /// Wait for a key press once everything is revealed.
    pub hold_on_done: bool,
    /// Type the scrambled glyphs in one by one before the reveal starts.
    pub type_in: bool,

    // === Layout ===
    /// Center the text block in the terminal.
    pub center: bool,

    // === Glyphes ===
    /// Built-in scramble charset.
    pub glyphs: GlyphSet,
    /// Custom scramble glyphs, overrides `glyphs` when set.
    pub custom_glyphs: Option<String>,
    /// RNG seed. `None` = seeded from OS entropy.
    pub seed: Option<u64>,

    // === Style ===
    /// Foreground of scrambled glyphs. `None` = terminal default.
    pub scramble_fg: Option<Rgb>,
    /// Foreground of revealed glyphs. `None` = terminal default.
    pub reveal_fg: Option<Rgb>,
    /// Draw revealed glyphs in bold.
    pub reveal_bold: bool,
}

/// Reveal order construction policy.
///
/// # Example
/// ```
/// use nms_core::config::OrderPolicy;
/// let policy: OrderPolicy = "per-row-random".parse().unwrap();
/// assert_eq!(policy, OrderPolicy::PerRowRandom);
/// assert_eq!(policy.to_string(), "per-row-random");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderPolicy {
    /// Row-major reading order.
    #[default]
    Sequential,
    /// Every coordinate shuffled together ("dissolve").
    FlatRandom,
    /// Rows top to bottom, columns shuffled within each row.
    PerRowRandom,
}

impl OrderPolicy {
    /// Every policy, in declaration order.
    pub const ALL: [Self; 3] = [Self::Sequential, Self::FlatRandom, Self::PerRowRandom];

    /// Config/CLI name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::FlatRandom => "flat-random",
            Self::PerRowRandom => "per-row-random",
        }
    }
}

impl fmt::Display for OrderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|policy| policy.name() == wanted)
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "unknown reveal order '{s}' (expected sequential, flat-random or per-row-random)"
                ))
            })
    }
}

/// How much of the screen is redrawn at each reveal step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RedrawMode {
    /// Only the cell that was just revealed.
    #[default]
    Cell,
    /// The whole grid.
    Frame,
}

/// Built-in scramble charsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    /// Visible ASCII.
    #[default]
    Ascii,
    /// Visible ASCII plus line-drawing and block glyphs.
    Extended,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 40,
            scramble_pause_ms: 750,
            trailing_pause_ms: 0,
            order: OrderPolicy::Sequential,
            rescramble_passes: 0,
            redraw: RedrawMode::Cell,
            interactive: true,
            hold_on_done: true,
            type_in: false,
            center: true,
            glyphs: GlyphSet::Ascii,
            custom_glyphs: None,
            seed: None,
            scramble_fg: None,
            reveal_fg: None,
            reveal_bold: false,
        }
    }
}

impl RevealConfig {
    /// Clamp numeric fields to their valid ranges.
    /// Called after TOML deserialization and CLI overrides.
    pub fn clamp_all(&mut self) {
        clamp_to("frame_delay_ms", &mut self.frame_delay_ms, MAX_DELAY_MS);
        clamp_to("scramble_pause_ms", &mut self.scramble_pause_ms, MAX_DELAY_MS);
        clamp_to("trailing_pause_ms", &mut self.trailing_pause_ms, MAX_DELAY_MS);
        clamp_to(
            "rescramble_passes",
            &mut self.rescramble_passes,
            MAX_RESCRAMBLE_PASSES,
        );
    }

    /// Build the scramble charset this config asks for.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCharset`] if `custom_glyphs` has no usable glyph.
    ///
    /// # Example
    /// ```
    /// use nms_core::config::RevealConfig;
    /// let mut config = RevealConfig::default();
    /// assert_eq!(config.charset().unwrap().len(), 94);
    /// config.custom_glyphs = Some("   ".into());
    /// assert!(config.charset().is_err());
    /// ```
    pub fn charset(&self) -> Result<Charset, CoreError> {
        match (&self.custom_glyphs, self.glyphs) {
            (Some(custom), _) => Charset::custom(custom),
            (None, GlyphSet::Ascii) => Ok(Charset::ascii()),
            (None, GlyphSet::Extended) => Ok(Charset::extended()),
        }
    }

    /// Pause between frames.
    #[must_use]
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    /// Style of glyphs that are still scrambled.
    #[must_use]
    pub fn scramble_style(&self) -> CellStyle {
        CellStyle {
            fg: self.scramble_fg,
            bold: false,
        }
    }

    /// Style of revealed glyphs.
    #[must_use]
    pub fn reveal_style(&self) -> CellStyle {
        CellStyle {
            fg: self.reveal_fg,
            bold: self.reveal_bold,
        }
    }
}

fn clamp_to<T: Ord + Copy + fmt::Display>(name: &str, value: &mut T, max: T) {
    if *value > max {
        log::warn!("{name} = {value} out of range, clamped to {max}");
        *value = max;
    }
}

/// Named configuration presets, one per historical flavour of the effect.
///
/// A preset only touches the fields that define its flavour; everything
/// else keeps the value from the config file or the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Type the scramble in line by line, reveal in reading order.
    Classic,
    /// Like `Classic`, with a shuffled order inside each line.
    Shuffle,
    /// Centered block, whole text dissolves at once.
    Dissolve,
    /// Centered block, a few flicker passes, row-by-row random reveal.
    Flicker,
    /// Extended glyphs, long flicker, dissolve into bold text.
    Cinema,
}

impl Preset {
    /// Every preset, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Classic,
        Self::Shuffle,
        Self::Dissolve,
        Self::Flicker,
        Self::Cinema,
    ];

    /// CLI name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Shuffle => "shuffle",
            Self::Dissolve => "dissolve",
            Self::Flicker => "flicker",
            Self::Cinema => "cinema",
        }
    }

    /// Overwrite the fields that define this preset.
    ///
    /// # Example
    /// ```
    /// use nms_core::config::{OrderPolicy, Preset, RevealConfig};
    /// let mut config = RevealConfig::default();
    /// Preset::Flicker.apply(&mut config);
    /// assert_eq!(config.order, OrderPolicy::PerRowRandom);
    /// assert_eq!(config.rescramble_passes, 3);
    /// ```
    pub fn apply(self, config: &mut RevealConfig) {
        match self {
            Self::Classic => {
                config.order = OrderPolicy::Sequential;
                config.rescramble_passes = 0;
                config.type_in = true;
                config.center = false;
                config.scramble_pause_ms = 0;
            }
            Self::Shuffle => {
                config.order = OrderPolicy::PerRowRandom;
                config.rescramble_passes = 0;
                config.type_in = true;
                config.center = false;
                config.scramble_pause_ms = 0;
            }
            Self::Dissolve => {
                config.order = OrderPolicy::FlatRandom;
                config.rescramble_passes = 0;
                config.center = true;
                config.redraw = RedrawMode::Frame;
            }
            Self::Flicker => {
                config.order = OrderPolicy::PerRowRandom;
                config.rescramble_passes = 3;
                config.center = true;
                config.scramble_pause_ms = 500;
            }
            Self::Cinema => {
                config.order = OrderPolicy::FlatRandom;
                config.rescramble_passes = 8;
                config.center = true;
                config.glyphs = GlyphSet::Extended;
                config.scramble_pause_ms = 1000;
                config.reveal_bold = true;
            }
        }
    }
}

impl FromStr for Preset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                CoreError::Config(format!(
                    "unknown preset '{s}' (available: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Intermediate TOML structure, every value optional.
#[derive(Deserialize)]
struct ConfigFile {
    reveal: Option<RevealSection>,
    style: Option<StyleSection>,
}

/// `[reveal]` section, all fields optional for partial override.
#[derive(Deserialize)]
struct RevealSection {
    frame_delay_ms: Option<u64>,
    scramble_pause_ms: Option<u64>,
    trailing_pause_ms: Option<u64>,
    order: Option<OrderPolicy>,
    rescramble_passes: Option<u32>,
    redraw: Option<RedrawMode>,
    interactive: Option<bool>,
    hold_on_done: Option<bool>,
    type_in: Option<bool>,
    center: Option<bool>,
    glyphs: Option<GlyphSet>,
    custom_glyphs: Option<String>,
    seed: Option<u64>,
}

/// `[style]` section; colours are names or `#rrggbb`.
#[derive(Deserialize)]
struct StyleSection {
    scramble_fg: Option<String>,
    reveal_fg: Option<String>,
    reveal_bold: Option<bool>,
}

/// Load a TOML file and merge it over the defaults.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or holds an
/// invalid colour.
///
/// # Example
/// ```no_run
/// use nms_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RevealConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("invalid config in {}", path.display()))
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error on malformed TOML or an invalid colour.
pub fn parse_config(content: &str) -> Result<RevealConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = RevealConfig::default();

    if let Some(r) = file.reveal {
        if let Some(v) = r.frame_delay_ms {
            config.frame_delay_ms = v;
        }
        if let Some(v) = r.scramble_pause_ms {
            config.scramble_pause_ms = v;
        }
        if let Some(v) = r.trailing_pause_ms {
            config.trailing_pause_ms = v;
        }
        if let Some(v) = r.order {
            config.order = v;
        }
        if let Some(v) = r.rescramble_passes {
            config.rescramble_passes = v;
        }
        if let Some(v) = r.redraw {
            config.redraw = v;
        }
        if let Some(v) = r.interactive {
            config.interactive = v;
        }
        if let Some(v) = r.hold_on_done {
            config.hold_on_done = v;
        }
        if let Some(v) = r.type_in {
            config.type_in = v;
        }
        if let Some(v) = r.center {
            config.center = v;
        }
        if let Some(v) = r.glyphs {
            config.glyphs = v;
        }
        if r.custom_glyphs.is_some() {
            config.custom_glyphs = r.custom_glyphs;
        }
        if r.seed.is_some() {
            config.seed = r.seed;
        }
    }

    if let Some(s) = file.style {
        if let Some(v) = s.scramble_fg {
            config.scramble_fg = Some(parse_color(&v)?);
        }
        if let Some(v) = s.reveal_fg {
            config.reveal_fg = Some(parse_color(&v)?);
        }
        if let Some(v) = s.reveal_bold {
            config.reveal_bold = v;
        }
    }

    config.clamp_all();
    Ok(config)
}
