// strumline-sim: headless driver for the strumline engine.
//
// Generates a seeded chart, plays it with autoplay or an idle player and
// prints the run summary.

mod config;
mod pattern;
mod render;
mod run;
mod ticker;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use strumline_engine::Engine;

use config::{PlayerKind, SimConfig};
use render::TextRenderer;
use run::{Display, Player};
use ticker::{FixedRateTicker, Ticker, Unthrottled};

#[derive(Parser, Debug)]
#[command(name = "strumline-sim", about = "Headless four-lane rhythm engine simulator")]
struct Args {
    /// Path to a simulator config JSON file.
    #[arg(long, env = "STRUMLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Chart length in rows.
    #[arg(long)]
    rows: Option<usize>,

    /// Seed for the chart generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Who plays the chart.
    #[arg(long, value_enum)]
    player: Option<PlayerKind>,

    /// Autoplay strums a wrong chord on every n-th strum.
    #[arg(long)]
    fumble_every: Option<u64>,

    /// Tick rate in Hz when running in realtime.
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Pace ticks on the wall clock.
    #[arg(long)]
    realtime: bool,

    /// Print a text frame every n ticks.
    #[arg(long)]
    render_every: Option<u64>,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,

    /// Save the effective config (defaults, file and flags merged) to this path.
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(player) = self.player {
            config.player = player;
        }
        if let Some(n) = self.fumble_every {
            config.fumble_every = n;
        }
        if let Some(rate) = self.tick_rate {
            config.tick_rate_hz = rate;
        }
        if self.realtime {
            config.realtime = true;
        }
        if let Some(n) = self.render_every {
            config.render_every = n;
        }
    }
}

/// Defaults, then the config file, then command-line flags.
fn effective_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load_from(path)?,
        None => SimConfig::default(),
    };
    args.apply(&mut config);
    config.validate().context("invalid simulator config")?;

    if let Some(path) = &args.write_config {
        config
            .save_to(path)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        info!("wrote config to {}", path.display());
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = effective_config(&args)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut chart = pattern::generate(&config.pattern, config.rows, &mut rng);
    info!(
        "generated {} rows (seed {}), player {:?}",
        chart.len(),
        config.seed,
        config.player
    );

    let mut engine = Engine::new(config.engine.clone());
    let mut player = Player::from_kind(config.player, config.fumble_every);
    let mut ticker: Box<dyn Ticker> = if config.realtime {
        let fixed = FixedRateTicker::new(config.tick_rate_hz);
        info!("realtime at {} Hz ({:?} per tick)", config.tick_rate_hz, fixed.period());
        Box::new(fixed)
    } else {
        Box::new(Unthrottled)
    };
    let mut renderer = TextRenderer::new(io::stdout().lock());
    let display = (config.render_every > 0).then(|| Display {
        renderer: &mut renderer,
        every: config.render_every,
    });

    let summary = run::run(
        &mut engine,
        &mut chart,
        &mut player,
        ticker.as_mut(),
        display,
    )?;

    info!(
        "finished after {} ticks: {} hits, {} misses, {} missed notes, score {}",
        summary.ticks, summary.hits, summary.misses, summary.missed_notes, summary.final_score
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
