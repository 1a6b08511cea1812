use std::collections::BTreeMap;

use crate::note::LANE_COUNT;

/// The five button signals, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub lanes: [bool; LANE_COUNT],
    pub strum: bool,
}

impl InputFrame {
    /// Nothing pressed.
    pub const fn idle() -> Self {
        Self {
            lanes: [false; LANE_COUNT],
            strum: false,
        }
    }

    /// Lane buttons held, strum released.
    pub const fn hold(lanes: [bool; LANE_COUNT]) -> Self {
        Self {
            lanes,
            strum: false,
        }
    }

    /// Lane buttons held with the strum bar pressed.
    pub const fn strum(lanes: [bool; LANE_COUNT]) -> Self {
        Self { lanes, strum: true }
    }

    pub fn lane(&self, lane: usize) -> bool {
        self.lanes.get(lane).copied().unwrap_or(false)
    }
}

/// Abstraction over the physical controller.
/// Implementations: ScriptedInput (tests, replays), Autoplay (via `sample_for`).
pub trait InputDevice {
    /// Sample the current button state for the next tick.
    fn sample(&mut self) -> InputFrame;
}

impl InputDevice for InputFrame {
    fn sample(&mut self) -> InputFrame {
        *self
    }
}

/// Input played back by tick index. Ticks without an entry sample as idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: BTreeMap<u64, InputFrame>,
    cursor: u64,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame sampled on tick `tick`.
    pub fn at(mut self, tick: u64, frame: InputFrame) -> Self {
        self.frames.insert(tick, frame);
        self
    }

    /// Hold `frame` for every tick in `ticks`.
    pub fn span(mut self, ticks: std::ops::Range<u64>, frame: InputFrame) -> Self {
        for tick in ticks {
            self.frames.insert(tick, frame);
        }
        self
    }

    /// Index of the next tick to be sampled.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }
}

impl InputDevice for ScriptedInput {
    fn sample(&mut self) -> InputFrame {
        let frame = self
            .frames
            .get(&self.cursor)
            .copied()
            .unwrap_or_else(InputFrame::idle);
        self.cursor += 1;
        frame
    }
}
