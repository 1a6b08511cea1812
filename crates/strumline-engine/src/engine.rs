//! The tick loop.
//!
//! A tick runs in two phases. The compute phase snapshots every lane's zone
//! summary, the score and the previous strum sample, and derives every next
//! state from that snapshot alone. The commit phase then replaces all state
//! at once, so no component observes another's state from the same tick.

use log::{debug, trace};

use crate::chart::ChartSource;
use crate::config::EngineConfig;
use crate::flash::FlashState;
use crate::hit_detector::{Chord, HitDetector, StrumEvent};
use crate::input::{InputDevice, InputFrame};
use crate::lane::{Lane, LaneInput, ZoneSummary};
use crate::note::{ChartRow, LANE_COUNT};
use crate::render::EngineView;
use crate::score_engine::{ScoreEngine, ScoreInputs, ScoreSource, ScoreState};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Zero-based index of this tick since the last reset.
    pub tick: u64,
    pub event: Option<StrumEvent>,
    pub mark_hit: [bool; LANE_COUNT],
    pub required: Chord,
    pub pressed: Chord,
    /// Zone summaries the tick was evaluated against.
    pub zones: [ZoneSummary; LANE_COUNT],
    pub score_before: u32,
    pub score: u32,
    pub applied: Option<ScoreSource>,
    pub tail_count: u32,
    pub missed_count: u32,
}

impl TickReport {
    pub fn score_delta(&self) -> i64 {
        i64::from(self.score) - i64::from(self.score_before)
    }
}

pub struct Engine {
    config: EngineConfig,
    lanes: [Lane; LANE_COUNT],
    detector: HitDetector,
    scoring: ScoreEngine,
    flash: FlashState,
    tick: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let scoring = ScoreEngine::new(config.score);
        Self {
            config,
            lanes: Default::default(),
            detector: HitDetector::new(),
            scoring,
            flash: FlashState::default(),
            tick: 0,
        }
    }

    pub fn lanes(&self) -> &[Lane; LANE_COUNT] {
        &self.lanes
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn score_state(&self) -> &ScoreState {
        self.scoring.state()
    }

    pub fn flash(&self) -> &FlashState {
        &self.flash
    }

    /// Ticks committed since the last reset.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn view(&self) -> EngineView<'_> {
        EngineView {
            lanes: &self.lanes,
            score: self.scoring.score(),
            flash: self.flash,
            tick: self.tick,
        }
    }

    /// Every lane has drained.
    pub fn is_drained(&self) -> bool {
        self.lanes.iter().all(Lane::is_empty)
    }

    /// Pull one row and one input sample, then tick.
    pub fn step<C, I>(&mut self, chart: &mut C, input: &mut I) -> TickReport
    where
        C: ChartSource + ?Sized,
        I: InputDevice + ?Sized,
    {
        let row = chart.next_row();
        let frame = input.sample();
        self.tick(row, frame)
    }

    pub fn tick(&mut self, row: ChartRow, input: InputFrame) -> TickReport {
        // Compute phase: everything below reads only tick-start state.
        let zones: [ZoneSummary; LANE_COUNT] = std::array::from_fn(|i| self.lanes[i].summary());
        let has_head = zones.map(|z| z.has_head);
        let decision = self.detector.evaluate(&input, has_head);

        let next_lanes: [Lane; LANE_COUNT] = std::array::from_fn(|i| {
            let lane_input = LaneInput {
                spawn: row.cell(i),
                mark_hit: decision.mark_hit[i],
                button_held: input.lanes[i],
            };
            self.lanes[i].advance(&lane_input, &zones[i])
        });

        let outcome = self.scoring.compute(&ScoreInputs {
            event: decision.event,
            mark_hit: decision.mark_hit,
            zones,
            held: input.lanes,
        });

        let missed = decision.is_miss() || outcome.missed_count > 0;
        let next_flash = self
            .flash
            .next(decision.mark_hit, missed, self.config.flash_ticks);

        let score_before = self.scoring.score();
        let report = TickReport {
            tick: self.tick,
            event: decision.event,
            mark_hit: decision.mark_hit,
            required: decision.required,
            pressed: decision.pressed,
            zones,
            score_before,
            score: outcome.next.score,
            applied: outcome.applied,
            tail_count: outcome.tail_count,
            missed_count: outcome.missed_count,
        };

        // Commit phase.
        self.lanes = next_lanes;
        self.detector.commit(&input);
        self.scoring.commit(&outcome);
        self.flash = next_flash;
        self.tick += 1;

        match report.event {
            Some(StrumEvent::Hit) => debug!(
                "tick {}: hit chord {} score {} -> {}",
                report.tick, report.required, score_before, report.score
            ),
            Some(StrumEvent::Miss) => debug!(
                "tick {}: miss (required {}, pressed {}) score {} -> {}",
                report.tick, report.required, report.pressed, score_before, report.score
            ),
            None => {}
        }
        if report.missed_count > 0 {
            debug!(
                "tick {}: {} note(s) left unhit, score {} -> {}",
                report.tick, report.missed_count, score_before, report.score
            );
        }
        trace!(
            "tick {} applied {:?} tails {} score {}",
            report.tick, report.applied, report.tail_count, report.score
        );

        report
    }

    /// Clear every lane, the score and all transient state.
    pub fn reset(&mut self) {
        debug!("engine reset after {} ticks", self.tick);
        for lane in &mut self.lanes {
            lane.clear();
        }
        self.detector.reset();
        self.scoring.reset();
        self.flash = FlashState::default();
        self.tick = 0;
    }
}
