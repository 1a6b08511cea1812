use anyhow::Result;
use log::{debug, info, warn};
use serde::Serialize;

use strumline_engine::{
    Autoplay, ChartSource, DisplayRenderer, Engine, EngineView, InputFrame, ScoreSource,
    StrumEvent, TickReport,
};

use crate::config::PlayerKind;
use crate::ticker::Ticker;

/// Input side of a simulation run.
pub enum Player {
    Autoplay(Autoplay),
    Idle,
}

impl Player {
    pub fn from_kind(kind: PlayerKind, fumble_every: u64) -> Self {
        match kind {
            PlayerKind::Autoplay => Self::Autoplay(Autoplay::new().fumble_every(fumble_every)),
            PlayerKind::Idle => Self::Idle,
        }
    }

    fn sample(&mut self, view: &EngineView<'_>) -> InputFrame {
        match self {
            Self::Autoplay(autoplay) => autoplay.sample_for(view),
            Self::Idle => InputFrame::idle(),
        }
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub hits: u64,
    pub misses: u64,
    /// Heads that left a lane unhit.
    pub missed_notes: u64,
    /// Ticks on which the sustain candidate set the score.
    pub sustain_ticks: u64,
    pub overruns: u64,
    pub final_score: u32,
}

impl RunSummary {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        match report.event {
            Some(StrumEvent::Hit) => self.hits += 1,
            Some(StrumEvent::Miss) => self.misses += 1,
            None => {}
        }
        self.missed_notes += u64::from(report.missed_count);
        if report.applied == Some(ScoreSource::Sustain) {
            self.sustain_ticks += 1;
        }
        self.final_score = report.score;
    }
}

/// Optional frame output, drawn every `every` ticks.
pub struct Display<'a> {
    pub renderer: &'a mut dyn DisplayRenderer,
    pub every: u64,
}

/// Tick the engine until the chart is exhausted and every lane has drained.
pub fn run<C>(
    engine: &mut Engine,
    chart: &mut C,
    player: &mut Player,
    ticker: &mut dyn Ticker,
    mut display: Option<Display<'_>>,
) -> Result<RunSummary>
where
    C: ChartSource + ?Sized,
{
    let mut summary = RunSummary {
        final_score: engine.score(),
        ..Default::default()
    };
    let mut chart_done = chart.is_exhausted();

    while !(chart.is_exhausted() && engine.is_drained()) {
        if let Some(late) = ticker.wait_next() {
            summary.overruns += 1;
            if summary.overruns == 1 {
                warn!("tick {} late by {:?}", engine.ticks(), late);
            } else {
                debug!("tick {} late by {:?}", engine.ticks(), late);
            }
        }

        let frame = player.sample(&engine.view());
        let report = engine.tick(chart.next_row(), frame);
        summary.record(&report);

        if !chart_done && chart.is_exhausted() {
            chart_done = true;
            info!(
                "chart exhausted after {} ticks, score {}",
                summary.ticks, report.score
            );
        }

        if let Some(display) = display.as_mut() {
            if display.every > 0 && engine.ticks() % display.every == 0 {
                display.renderer.render(&engine.view())?;
            }
        }
    }

    if summary.overruns > 0 {
        warn!(
            "{} of {} ticks ran behind schedule",
            summary.overruns, summary.ticks
        );
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PatternConfig, SimConfig};
    use crate::pattern;
    use crate::ticker::Unthrottled;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strumline_engine::{ChartRow, LANE_LENGTH, NoteCell, VecChart};

    struct CountingRenderer {
        frames: Vec<u64>,
    }

    impl DisplayRenderer for CountingRenderer {
        fn render(&mut self, view: &EngineView<'_>) -> Result<()> {
            self.frames.push(view.tick);
            Ok(())
        }
    }

    fn single_head_with_tails(tails: usize) -> VecChart {
        let lane1 = |cell| ChartRow([NoteCell::None, cell, NoteCell::None, NoteCell::None]);
        std::iter::once(lane1(NoteCell::Head))
            .chain((0..tails).map(|_| lane1(NoteCell::Tail)))
            .collect()
    }

    #[test]
    fn empty_chart_runs_no_ticks() {
        let mut engine = Engine::default();
        let mut chart = VecChart::default();
        let mut player = Player::Idle;
        let summary = run(&mut engine, &mut chart, &mut player, &mut Unthrottled, None).unwrap();
        assert_eq!(summary, RunSummary::default());
    }

    #[test]
    fn autoplay_clears_sustain() {
        let mut engine = Engine::default();
        let mut chart = single_head_with_tails(5);
        let mut player = Player::from_kind(PlayerKind::Autoplay, 0);
        let summary = run(&mut engine, &mut chart, &mut player, &mut Unthrottled, None).unwrap();

        assert_eq!(summary.hits, 1);
        assert_eq!(summary.misses, 0);
        assert_eq!(summary.missed_notes, 0);
        assert_eq!(summary.sustain_ticks, 5);
        assert_eq!(summary.final_score, 15);
        assert!(engine.is_drained());
    }

    #[test]
    fn autoplay_clears_generated_chart() {
        let defaults = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(defaults.seed);
        let mut chart = pattern::generate(&defaults.pattern, defaults.rows, &mut rng);
        let heads = chart
            .rows()
            .iter()
            .flat_map(|row| row.0)
            .filter(|&cell| cell == NoteCell::Head)
            .count();
        assert!(heads > 0);

        let mut engine = Engine::default();
        let mut player = Player::from_kind(PlayerKind::Autoplay, 0);
        let summary = run(&mut engine, &mut chart, &mut player, &mut Unthrottled, None).unwrap();

        assert!(summary.hits > 0);
        assert_eq!(summary.misses, 0);
        assert_eq!(summary.missed_notes, 0);
        assert!(engine.is_drained());
    }

    #[test]
    fn autoplay_clears_multi_row_heads_in_chords() {
        let config = PatternConfig {
            density: 0.3,
            chord_chance: 0.8,
            sustain_chance: 0.6,
            ..Default::default()
        };
        assert_eq!(config.head_rows, 4);
        let mut chart = pattern::generate(&config, 600, &mut StdRng::seed_from_u64(11));

        let mut engine = Engine::default();
        let mut player = Player::from_kind(PlayerKind::Autoplay, 0);
        let summary = run(&mut engine, &mut chart, &mut player, &mut Unthrottled, None).unwrap();

        assert_eq!(summary.misses, 0);
        assert_eq!(summary.missed_notes, 0);
        assert!(engine.is_drained());
    }

    #[test]
    fn idle_player_misses_everything() {
        let mut engine = Engine::default();
        let mut chart = single_head_with_tails(3);
        let mut player = Player::Idle;
        let summary = run(&mut engine, &mut chart, &mut player, &mut Unthrottled, None).unwrap();

        assert_eq!(summary.hits, 0);
        assert_eq!(summary.missed_notes, 1);
        assert_eq!(summary.final_score, 0);
        // The last tail leaves the lane one tick after it reaches the exit slot.
        assert_eq!(summary.ticks, 4 + LANE_LENGTH as u64);
    }

    #[test]
    fn renders_every_nth_tick() {
        let mut engine = Engine::default();
        let mut chart = single_head_with_tails(0);
        let mut player = Player::Idle;
        let mut renderer = CountingRenderer { frames: Vec::new() };
        let display = Display {
            renderer: &mut renderer,
            every: 32,
        };
        let summary =
            run(&mut engine, &mut chart, &mut player, &mut Unthrottled, Some(display)).unwrap();

        assert_eq!(summary.ticks, 97);
        assert_eq!(renderer.frames, vec![32, 64, 96]);
    }
}
