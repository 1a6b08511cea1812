use crate::note::LANE_COUNT;

/// Transient feedback for the renderer: countdowns in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlashState {
    pub lane_hit: [u8; LANE_COUNT],
    pub miss: u8,
}

impl FlashState {
    /// Next flash state. A trigger restarts its counter at `duration`,
    /// otherwise the counter runs down to zero.
    pub fn next(&self, mark_hit: [bool; LANE_COUNT], missed: bool, duration: u8) -> FlashState {
        let lane_hit = std::array::from_fn(|lane| {
            if mark_hit[lane] {
                duration
            } else {
                self.lane_hit[lane].saturating_sub(1)
            }
        });
        let miss = if missed {
            duration
        } else {
            self.miss.saturating_sub(1)
        };
        FlashState { lane_hit, miss }
    }

    pub fn lane_lit(&self, lane: usize) -> bool {
        self.lane_hit.get(lane).is_some_and(|&t| t > 0)
    }

    pub fn miss_lit(&self) -> bool {
        self.miss > 0
    }
}
