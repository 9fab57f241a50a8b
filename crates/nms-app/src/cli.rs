use std::path::PathBuf;

use clap::Parser;

/// nms: decrypt text on the terminal, "Sneakers" style.
///
/// Reads FILE (or the whole of stdin), shows it scrambled, then reveals it
/// one character at a time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Text file to reveal. Reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Delay between two frames, in ms.
    #[arg(short, long)]
    pub delay: Option<u64>,

    /// Reveal each line in random order (same as --order per-row-random).
    #[arg(short, long, default_value_t = false, conflicts_with = "order")]
    pub random: bool,

    /// Reveal order: sequential, flat-random, per-row-random.
    #[arg(long)]
    pub order: Option<String>,

    /// Number of re-scramble passes before the reveal.
    #[arg(long)]
    pub rescramble: Option<u32>,

    /// No user interaction: no pauses, no key handling, exit when done.
    #[arg(short, long, default_value_t = false)]
    pub auto: bool,

    /// Named preset: classic, shuffle, dissolve, flicker, cinema.
    #[arg(long)]
    pub preset: Option<String>,

    /// TOML configuration file. Default: config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// RNG seed, for a reproducible animation.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Draw at the top-left corner instead of centering.
    #[arg(long, default_value_t = false)]
    pub no_center: bool,

    /// Type the scrambled text in before revealing it.
    #[arg(long, default_value_t = false)]
    pub type_in: bool,

    /// Colour of the revealed text: a name (green, cyan…) or #rrggbb.
    #[arg(short, long)]
    pub foreground: Option<String>,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
