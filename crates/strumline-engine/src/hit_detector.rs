//! Exact-chord hit detection.
//!
//! A decision is only made on the strum bar's released -> pressed edge. The
//! pressed lane buttons must match the set of lanes holding a head in the hit
//! zone exactly; anything else (wrong chord, extra buttons, strumming at an
//! empty zone) is a miss.

use std::fmt;

use crate::input::InputFrame;
use crate::note::LANE_COUNT;

/// Set of lanes as a 4-bit mask. Lane 0 is the most significant bit,
/// so a chord of lane 0 alone reads `0b1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Chord(u8);

impl Chord {
    pub const NONE: Self = Self(0);

    const fn lane_bit(lane: usize) -> u8 {
        1 << (LANE_COUNT - 1 - lane)
    }

    pub fn from_lanes(lanes: [bool; LANE_COUNT]) -> Self {
        let mut bits = 0;
        for (lane, &set) in lanes.iter().enumerate() {
            if set {
                bits |= Self::lane_bit(lane);
            }
        }
        Self(bits)
    }

    /// Build from a raw mask; bits above the lane count are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & ((1 << LANE_COUNT) - 1))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, lane: usize) -> bool {
        lane < LANE_COUNT && self.0 & Self::lane_bit(lane) != 0
    }

    pub fn lanes(self) -> [bool; LANE_COUNT] {
        std::array::from_fn(|lane| self.contains(lane))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.0, width = LANE_COUNT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrumEvent {
    Hit,
    Miss,
}

/// Outcome of one tick's evaluation. Every field is a one-tick pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitDecision {
    pub event: Option<StrumEvent>,
    pub mark_hit: [bool; LANE_COUNT],
    pub required: Chord,
    pub pressed: Chord,
}

impl HitDecision {
    pub fn is_hit(&self) -> bool {
        self.event == Some(StrumEvent::Hit)
    }

    pub fn is_miss(&self) -> bool {
        self.event == Some(StrumEvent::Miss)
    }
}

/// Holds only the previous tick's strum sample.
#[derive(Debug, Clone, Default)]
pub struct HitDetector {
    prev_strum: bool,
}

impl HitDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strum_edge(&self, input: &InputFrame) -> bool {
        !self.prev_strum && input.strum
    }

    /// Decide this tick's event from the pre-tick head flags of every lane.
    pub fn evaluate(&self, input: &InputFrame, has_head: [bool; LANE_COUNT]) -> HitDecision {
        if !self.strum_edge(input) {
            return HitDecision::default();
        }

        let required = Chord::from_lanes(has_head);
        let pressed = Chord::from_lanes(input.lanes);

        if pressed == required && !required.is_empty() {
            HitDecision {
                event: Some(StrumEvent::Hit),
                mark_hit: required.lanes(),
                required,
                pressed,
            }
        } else {
            HitDecision {
                event: Some(StrumEvent::Miss),
                mark_hit: [false; LANE_COUNT],
                required,
                pressed,
            }
        }
    }

    pub fn commit(&mut self, input: &InputFrame) {
        self.prev_strum = input.strum;
    }

    /// Forget the previous strum sample; it reads as released afterwards.
    pub fn reset(&mut self) {
        self.prev_strum = false;
    }
}
