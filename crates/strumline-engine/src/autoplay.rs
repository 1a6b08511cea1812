/// Autoplay input generation.
///
/// Reads the engine's hit zone before each tick and produces the input a
/// perfect player would: the exact chord on a fresh strum edge whenever an
/// unhit head is in the zone, and held buttons over tails otherwise.
use crate::input::InputFrame;
use crate::note::{LANE_COUNT, NoteCell};
use crate::render::EngineView;

#[derive(Debug, Clone, Default)]
pub struct Autoplay {
    strummed_last_tick: bool,
    strums: u64,
    fumble_every: u64,
}

impl Autoplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press the inverted chord on every `n`-th strum. `0` never fumbles.
    pub fn fumble_every(mut self, n: u64) -> Self {
        self.fumble_every = n;
        self
    }

    /// Strums issued so far, fumbles included.
    pub fn strums(&self) -> u64 {
        self.strums
    }

    pub fn sample_for(&mut self, view: &EngineView<'_>) -> InputFrame {
        let zones = view.zones();
        let pending = view.lanes.iter().any(|lane| {
            lane.hit_zone()
                .iter()
                .any(|slot| slot.cell == NoteCell::Head && !slot.hit)
        });

        // The strum bar has to come back up between strums to form an edge.
        if pending && !self.strummed_last_tick {
            self.strummed_last_tick = true;
            self.strums += 1;

            let chord: [bool; LANE_COUNT] = zones.map(|z| z.has_head);
            let fumble = self.fumble_every > 0 && self.strums % self.fumble_every == 0;
            let lanes = if fumble { chord.map(|b| !b) } else { chord };
            return InputFrame::strum(lanes);
        }

        self.strummed_last_tick = false;
        InputFrame::hold(zones.map(|z| z.has_tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::hit_detector::StrumEvent;
    use crate::note::ChartRow;

    fn chart_row(cells: [NoteCell; LANE_COUNT]) -> ChartRow {
        ChartRow(cells)
    }

    #[test]
    fn idle_until_head_arrives() {
        let engine = Engine::default();
        let mut autoplay = Autoplay::new();
        assert_eq!(autoplay.sample_for(&engine.view()), InputFrame::idle());
        assert_eq!(autoplay.strums(), 0);
    }

    #[test]
    fn clears_chord_and_sustain() {
        let mut engine = Engine::default();
        let mut autoplay = Autoplay::new();
        let head = chart_row([NoteCell::Head, NoteCell::None, NoteCell::Head, NoteCell::None]);
        let tail = chart_row([NoteCell::Tail, NoteCell::None, NoteCell::None, NoteCell::None]);

        let mut hits = 0;
        let mut misses = 0;
        for tick in 0..200 {
            let row = match tick {
                0 => head,
                1..=5 => tail,
                _ => ChartRow::EMPTY,
            };
            let frame = autoplay.sample_for(&engine.view());
            let report = engine.tick(row, frame);
            match report.event {
                Some(StrumEvent::Hit) => hits += 1,
                Some(StrumEvent::Miss) => misses += 1,
                None => {}
            }
            assert_eq!(report.missed_count, 0);
        }

        assert_eq!(hits, 1);
        assert_eq!(misses, 0);
        assert_eq!(engine.score(), 10 + 5);
        assert!(engine.is_drained());
    }

    #[test]
    fn fumble_presses_wrong_chord() {
        let mut engine = Engine::default();
        let mut autoplay = Autoplay::new().fumble_every(1);
        let head = chart_row([NoteCell::None, NoteCell::Head, NoteCell::None, NoteCell::None]);
        engine.tick(head, InputFrame::idle());
        for _ in 0..83 {
            engine.tick(ChartRow::EMPTY, InputFrame::idle());
        }
        let frame = autoplay.sample_for(&engine.view());
        assert_eq!(frame, InputFrame::strum([true, false, true, true]));
        let report = engine.tick(ChartRow::EMPTY, frame);
        assert_eq!(report.event, Some(StrumEvent::Miss));
    }
}
