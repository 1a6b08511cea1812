//! Score bookkeeping with fixed-priority candidate selection.
//!
//! Each tick up to four candidate scores are derived from the tick-start
//! score. They are not summed: the last applicable candidate in the order
//! strum (hit or miss), sustain, missed notes becomes the new score.

use crate::config::ScoreRule;
use crate::hit_detector::StrumEvent;
use crate::lane::ZoneSummary;
use crate::note::LANE_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreState {
    pub score: u32,
    /// The lane's most recent head was hit; gates tail scoring.
    pub lane_head_success: [bool; LANE_COUNT],
}

/// Which candidate produced a tick's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    Hit,
    Miss,
    Sustain,
    MissedNotes,
}

/// Everything the score update reads, captured before the tick commits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreInputs {
    pub event: Option<StrumEvent>,
    pub mark_hit: [bool; LANE_COUNT],
    pub zones: [ZoneSummary; LANE_COUNT],
    pub held: [bool; LANE_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub next: ScoreState,
    pub applied: Option<ScoreSource>,
    pub tail_count: u32,
    pub missed_count: u32,
}

#[derive(Debug, Clone)]
pub struct ScoreEngine {
    state: ScoreState,
    rule: ScoreRule,
}

impl ScoreEngine {
    pub fn new(rule: ScoreRule) -> Self {
        Self {
            state: ScoreState::default(),
            rule,
        }
    }

    pub fn state(&self) -> &ScoreState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    fn candidate(&self, delta: i64) -> u32 {
        let max = i64::from(self.rule.max_score);
        (i64::from(self.state.score) + delta).clamp(0, max) as u32
    }

    /// Compute the next state from the committed one. Does not mutate.
    pub fn compute(&self, inputs: &ScoreInputs) -> ScoreOutcome {
        let pre = &self.state;

        let mut lane_head_success = pre.lane_head_success;
        for (lane, success) in lane_head_success.iter_mut().enumerate() {
            if inputs.mark_hit[lane] {
                *success = true;
            } else if inputs.zones[lane].fresh_head() {
                *success = false;
            }
        }

        // Tail scoring is gated by the flags as they stood at tick start.
        let tail_count = (0..LANE_COUNT)
            .filter(|&lane| {
                inputs.zones[lane].has_tail && inputs.held[lane] && pre.lane_head_success[lane]
            })
            .count() as u32;
        let missed_count = inputs.zones.iter().filter(|z| z.note_missed).count() as u32;

        let mut score = pre.score;
        let mut applied = None;

        match inputs.event {
            Some(StrumEvent::Hit) => {
                score = self.candidate(i64::from(self.rule.hit_reward));
                applied = Some(ScoreSource::Hit);
            }
            Some(StrumEvent::Miss) => {
                score = self.candidate(-i64::from(self.rule.miss_penalty));
                applied = Some(ScoreSource::Miss);
            }
            None => {}
        }
        if tail_count > 0 {
            score = self.candidate(i64::from(tail_count));
            applied = Some(ScoreSource::Sustain);
        }
        if missed_count > 0 {
            score = self.candidate(-i64::from(missed_count));
            applied = Some(ScoreSource::MissedNotes);
        }

        ScoreOutcome {
            next: ScoreState {
                score,
                lane_head_success,
            },
            applied,
            tail_count,
            missed_count,
        }
    }

    pub fn commit(&mut self, outcome: &ScoreOutcome) {
        self.state = outcome.next;
    }

    pub fn reset(&mut self) {
        self.state = ScoreState::default();
    }
}
