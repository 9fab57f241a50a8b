use anyhow::{Context, Result};
use clap::Parser;
use nms_core::color::parse_color;
use nms_core::config::{OrderPolicy, Preset, RevealConfig, load_config};
use nms_reveal::Outcome;

pub mod app;
pub mod cli;
pub mod input;
pub mod source;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    init_logging(&cli)?;

    // 3. Résoudre la config (avant de toucher au terminal)
    let config = resolve_config(&cli)?;

    // 4. Charger le texte
    let lines = source::read_lines(cli.file.as_deref())?;

    // 5. Animation, terminal restauré en sortie
    let report = app::run(&config, &lines)?;
    match report.outcome {
        Outcome::Done => log::info!("done: {} steps, {} frames", report.steps, report.frames),
        Outcome::Aborted => log::info!("aborted after {} steps", report.steps),
    }
    Ok(())
}

/// Logger on stderr, or on `--log-file` since the animation owns the screen.
fn init_logging(cli: &cli::Cli) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn));
    if let Some(ref path) = cli.log_file {
        let file = std::fs::File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Resolve config: defaults, then config file, then preset, then CLI flags.
fn resolve_config(cli: &cli::Cli) -> Result<RevealConfig> {
    let mut config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        log::warn!("config not found: {}, using defaults", cli.config.display());
        RevealConfig::default()
    };

    if let Some(ref name) = cli.preset {
        let preset: Preset = name.parse()?;
        preset.apply(&mut config);
        log::info!("preset {}", preset.name());
    }

    apply_overrides(cli, &mut config)?;
    config.clamp_all();
    log::debug!("resolved config: {config:?}");
    Ok(config)
}

fn apply_overrides(cli: &cli::Cli, config: &mut RevealConfig) -> Result<()> {
    if let Some(delay) = cli.delay {
        config.frame_delay_ms = delay;
    }
    if cli.random {
        config.order = OrderPolicy::PerRowRandom;
    }
    if let Some(ref order) = cli.order {
        config.order = order.parse()?;
    }
    if let Some(passes) = cli.rescramble {
        config.rescramble_passes = passes;
    }
    if cli.auto {
        config.interactive = false;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if cli.no_center {
        config.center = false;
    }
    if cli.type_in {
        config.type_in = true;
    }
    if let Some(ref colour) = cli.foreground {
        config.reveal_fg = Some(parse_color(colour)?);
    }
    Ok(())
}
