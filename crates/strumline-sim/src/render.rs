use std::io::Write;

use anyhow::Result;

use strumline_engine::lane::in_hit_zone;
use strumline_engine::{DisplayRenderer, EngineView, LANE_COUNT, LANE_LENGTH, NoteCell, Slot};

/// First slot drawn by default: a dozen rows of approach above the zone.
pub const DEFAULT_FIRST_SLOT: usize = 72;

/// Draws the bottom of each lane as plain text.
///
/// ```text
/// tick 000120  score 00042  * . . .  MISS
///  82   H  .  .  .
/// >83   |  .  H  .
/// ```
pub struct TextRenderer<W: Write> {
    out: W,
    first_slot: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            first_slot: DEFAULT_FIRST_SLOT,
        }
    }

    #[cfg(test)]
    pub fn first_slot(mut self, slot: usize) -> Self {
        self.first_slot = slot.min(LANE_LENGTH - 1);
        self
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn slot_glyph(slot: &Slot) -> char {
    match (slot.cell, slot.hit) {
        (NoteCell::None, _) => '.',
        (NoteCell::Head, false) => 'H',
        (NoteCell::Head, true) => 'h',
        (NoteCell::Tail, false) => '|',
        (NoteCell::Tail, true) => ':',
    }
}

impl<W: Write> DisplayRenderer for TextRenderer<W> {
    fn render(&mut self, view: &EngineView<'_>) -> Result<()> {
        let digits: String = view
            .score_digits()
            .iter()
            .map(|d| char::from(b'0' + d))
            .collect();
        let flashes: Vec<String> = (0..LANE_COUNT)
            .map(|lane| if view.flash.lane_lit(lane) { "*" } else { "." }.to_string())
            .collect();
        write!(
            self.out,
            "tick {:06}  score {}  {}",
            view.tick,
            digits,
            flashes.join(" ")
        )?;
        if view.flash.miss_lit() {
            write!(self.out, "  MISS")?;
        }
        writeln!(self.out)?;

        for index in self.first_slot..LANE_LENGTH {
            let marker = if in_hit_zone(index) { '>' } else { ' ' };
            write!(self.out, "{marker}{index:2} ")?;
            for lane in view.lanes {
                write!(self.out, "  {}", slot_glyph(&lane.slots()[index]))?;
            }
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
