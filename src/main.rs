//! Headless level runner
//!
//! Usage:
//!   tile-level --level demo --script "R:16,D:24"
//!   tile-level --levels my_levels.json --level cave --json
//!   tile-level --level swamp --realtime --max-ticks 300

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tile_level::platform::{DirectionControls, FrameClock};
use tile_level::sim::Direction;
use tile_level::{LevelCatalog, LevelPhase, LevelSnapshot, LevelState, Settings};

#[derive(Parser)]
#[command(name = "tile-level")]
#[command(about = "Run a tile level headlessly and report the outcome")]
struct Cli {
    /// Level id to play
    #[arg(long, default_value = "demo")]
    level: String,

    /// Extra level catalog (JSON), merged over the built-in levels
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Settings file (JSON); missing fields use defaults
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Held input as comma separated DIR:TICKS steps, DIR one of U/D/L/R or - for idle
    #[arg(long, default_value = "")]
    script: String,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 600)]
    max_ticks: u64,

    /// Print every emitted snapshot as a JSON line
    #[arg(long)]
    json: bool,

    /// Pace ticks with the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
}

/// One step of a scripted input sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScriptStep {
    direction: Option<Direction>,
    ticks: u64,
}

fn parse_script(script: &str) -> Result<Vec<ScriptStep>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|step| -> Result<ScriptStep> {
            let (dir, ticks) = step
                .split_once(':')
                .with_context(|| format!("script step {step:?} is not DIR:TICKS"))?;
            let direction = match dir.trim().to_ascii_uppercase().as_str() {
                "U" | "UP" => Some(Direction::Up),
                "D" | "DOWN" => Some(Direction::Down),
                "L" | "LEFT" => Some(Direction::Left),
                "R" | "RIGHT" => Some(Direction::Right),
                "-" => None,
                other => bail!("unknown direction {other:?} in script step {step:?}"),
            };
            let ticks = ticks
                .trim()
                .parse()
                .with_context(|| format!("bad tick count in script step {step:?}"))?;
            Ok(ScriptStep { direction, ticks })
        })
        .collect()
}

fn load_catalog(extra: Option<&PathBuf>) -> Result<LevelCatalog> {
    let mut catalog = LevelCatalog::builtin().context("built-in levels are malformed")?;
    if let Some(path) = extra {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let levels = LevelCatalog::from_json(&json)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        log::info!("Loaded {} levels from {}", levels.len(), path.display());
        catalog.merge(levels);
    }
    Ok(catalog)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = cli.settings.as_ref().map(Settings::load).unwrap_or_default();
    let catalog = load_catalog(cli.levels.as_ref())?;
    let script = parse_script(&cli.script)?;

    let controls = DirectionControls::new();
    let input = controls.handle();
    let print_json = cli.json;
    let mut level = LevelState::new(cli.level.clone(), catalog, move |snapshot: &LevelSnapshot| {
        if !print_json {
            return;
        }
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{line}"),
            Err(e) => log::warn!("Failed to serialize snapshot: {}", e),
        }
    })
    .with_settings(settings.clone())
    .with_controls(controls);

    let report = level
        .start()
        .with_context(|| format!("failed to start level {}", cli.level))?;
    for rejected in &report.rejected {
        eprintln!("warning: {rejected}");
    }

    let mut steps = script.into_iter();
    let mut current = steps.next();
    let mut step_ticks = 0;
    let mut clock = FrameClock::new(settings.tick_rate_hz);
    let mut last_frame = Instant::now();

    while level.is_running() && level.ticks() < cli.max_ticks {
        let pending = if cli.realtime {
            std::thread::sleep(Duration::from_secs_f32(clock.dt()));
            let now = Instant::now();
            let elapsed = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            clock.advance(elapsed)
        } else {
            1
        };

        for _ in 0..pending {
            while current.is_some_and(|s| step_ticks >= s.ticks) {
                current = steps.next();
                step_ticks = 0;
            }
            input.release_all();
            if let Some(direction) = current.and_then(|s| s.direction) {
                input.press(direction);
            }
            step_ticks += 1;

            if !level.tick() || level.ticks() >= cli.max_ticks {
                break;
            }
        }
    }

    let snapshot = level.get_state();
    let outcome = match level.phase() {
        LevelPhase::Completed => "completed".to_string(),
        LevelPhase::Dead => match snapshot.death_outcome {
            Some(cause) => format!("killed by {cause}"),
            None => "dead".to_string(),
        },
        _ => "unfinished".to_string(),
    };
    let hero = level.hero().map(|h| h.pos).unwrap_or_default();
    println!(
        "level {}: {} after {} ticks, hero at ({}, {}), {} placements, inventory {:?}",
        level.id(),
        outcome,
        snapshot.tick,
        hero.x,
        hero.y,
        snapshot.placements.len(),
        snapshot.inventory.iter().collect::<Vec<_>>()
    );

    level.destroy();
    Ok(())
}
