use anyhow::Result;

use crate::flash::FlashState;
use crate::lane::{Lane, ZoneSummary};
use crate::note::LANE_COUNT;

/// Read-only view of the engine for display. Borrowing the engine shared
/// keeps renderers from mutating it.
#[derive(Debug, Clone, Copy)]
pub struct EngineView<'a> {
    pub lanes: &'a [Lane; LANE_COUNT],
    pub score: u32,
    pub flash: FlashState,
    /// Number of ticks committed since the last reset.
    pub tick: u64,
}

impl EngineView<'_> {
    /// Current hit-zone summaries, i.e. what the next tick will evaluate.
    pub fn zones(&self) -> [ZoneSummary; LANE_COUNT] {
        std::array::from_fn(|lane| self.lanes[lane].summary())
    }

    /// The score split into five decimal digits, most significant first.
    pub fn score_digits(&self) -> [u8; 5] {
        let mut digits = [0u8; 5];
        let mut rest = self.score;
        for digit in digits.iter_mut().rev() {
            *digit = (rest % 10) as u8;
            rest /= 10;
        }
        digits
    }
}

/// Abstraction over display backends.
/// Implementations: TextRenderer (simulator).
pub trait DisplayRenderer {
    fn render(&mut self, view: &EngineView<'_>) -> Result<()>;
}
