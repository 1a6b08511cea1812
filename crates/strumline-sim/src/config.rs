use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use strumline_engine::EngineConfig;

/// Who produces the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Plays every chord and sustain.
    #[default]
    Autoplay,
    /// Never touches the controller; every head is missed.
    Idle,
}

/// Shape of the generated chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PatternConfig {
    /// Chance that a row starts a note.
    pub density: f64,
    /// Chance that a note is doubled into a second lane.
    pub chord_chance: f64,
    /// Chance that a note is followed by a tail.
    pub sustain_chance: f64,
    /// Rows of head cells per note.
    pub head_rows: usize,
    pub max_tail_rows: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            density: 0.08,
            chord_chance: 0.2,
            sustain_chance: 0.3,
            head_rows: 4,
            max_tail_rows: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub engine: EngineConfig,
    pub tick_rate_hz: u32,
    /// Pace ticks on the wall clock instead of running flat out.
    pub realtime: bool,
    /// Chart length in rows (one row per tick).
    pub rows: usize,
    pub seed: u64,
    pub pattern: PatternConfig,
    pub player: PlayerKind,
    /// Autoplay presses a wrong chord on every n-th strum. 0 disables.
    pub fumble_every: u64,
    /// Ticks between rendered frames. 0 disables rendering.
    pub render_every: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            tick_rate_hz: 60,
            realtime: false,
            rows: 2240,
            seed: 1,
            pattern: PatternConfig::default(),
            player: PlayerKind::Autoplay,
            fumble_every: 0,
            render_every: 0,
        }
    }
}

impl SimConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate().context("invalid engine config")?;
        if self.tick_rate_hz == 0 {
            bail!("tick_rate_hz must be positive");
        }
        let p = &self.pattern;
        for (name, value) in [
            ("density", p.density),
            ("chord_chance", p.chord_chance),
            ("sustain_chance", p.sustain_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("pattern.{name} must be within 0..=1, got {value}");
            }
        }
        if p.head_rows == 0 {
            bail!("pattern.head_rows must be at least 1");
        }
        Ok(())
    }
}
