//! One lane's descending note column.
//!
//! Notes enter at slot 0 and move one slot per tick toward slot 95, where
//! they leave the lane. Slots 83..=92 form the hit zone in which a strum can
//! register against a head and a held button consumes tails.

use std::ops::RangeInclusive;

use crate::note::{NoteCell, Slot};

/// Number of slots in a lane; one slot is one tick of travel.
pub const LANE_LENGTH: usize = 96;

pub const HIT_ZONE_START: usize = 83;
pub const HIT_ZONE_END: usize = 92;
pub const HIT_ZONE: RangeInclusive<usize> = HIT_ZONE_START..=HIT_ZONE_END;

/// Index of the last slot; an unhit head here is missed on the next advance.
pub const EXIT_SLOT: usize = LANE_LENGTH - 1;

#[inline]
pub fn in_hit_zone(index: usize) -> bool {
    (HIT_ZONE_START..=HIT_ZONE_END).contains(&index)
}

/// Read-only summary of the hit zone, taken before the lane advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneSummary {
    pub has_head: bool,
    pub has_tail: bool,
    /// Some head in the zone has already been rewarded.
    pub head_was_hit: bool,
    /// An unrewarded head sits in the exit slot.
    pub note_missed: bool,
}

impl ZoneSummary {
    /// A head is in the zone and none of the zone's heads has been hit yet.
    pub fn fresh_head(&self) -> bool {
        self.has_head && !self.head_was_hit
    }
}

/// Per-tick inputs to one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaneInput {
    pub spawn: NoteCell,
    /// A hit was registered this tick and its chord covers this lane.
    pub mark_hit: bool,
    pub button_held: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    slots: [Slot; LANE_LENGTH],
    tail_clear_active: bool,
}

impl Default for Lane {
    fn default() -> Self {
        Self::new()
    }
}

impl Lane {
    pub fn new() -> Self {
        Self {
            slots: [Slot::EMPTY; LANE_LENGTH],
            tail_clear_active: false,
        }
    }

    pub fn slots(&self) -> &[Slot; LANE_LENGTH] {
        &self.slots
    }

    pub fn hit_zone(&self) -> &[Slot] {
        &self.slots[HIT_ZONE]
    }

    /// Whether held tails in the zone are currently converted into points.
    pub fn tail_clear_active(&self) -> bool {
        self.tail_clear_active
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| !s.cell.is_note())
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn summary(&self) -> ZoneSummary {
        let mut summary = ZoneSummary::default();
        for slot in self.hit_zone() {
            match slot.cell {
                NoteCell::Head => {
                    summary.has_head = true;
                    summary.head_was_hit |= slot.hit;
                }
                NoteCell::Tail => summary.has_tail = true,
                NoteCell::None => {}
            }
        }
        let exit = self.slots[EXIT_SLOT];
        summary.note_missed = exit.cell == NoteCell::Head && !exit.hit;
        summary
    }

    /// Compute the lane's next state. `zone` must be this lane's summary
    /// taken before any state of the current tick was committed.
    pub fn advance(&self, input: &LaneInput, zone: &ZoneSummary) -> Lane {
        let mut slots = [Slot::EMPTY; LANE_LENGTH];
        slots[0] = Slot::new(input.spawn);

        for (prev_index, prev) in self.slots[..EXIT_SLOT].iter().enumerate() {
            let index = prev_index + 1;
            let in_zone = in_hit_zone(index);

            slots[index] = if prev.is_consumed() {
                Slot::EMPTY
            } else if in_zone
                && prev.cell == NoteCell::Tail
                && self.tail_clear_active
                && input.button_held
            {
                Slot {
                    cell: NoteCell::Tail,
                    hit: true,
                }
            } else {
                let marked =
                    input.mark_hit && in_zone && prev.cell == NoteCell::Head && !prev.hit;
                Slot {
                    cell: prev.cell,
                    hit: prev.hit || marked,
                }
            };
        }

        let tail_clear_active = if input.mark_hit && zone.has_head {
            true
        } else if zone.fresh_head() {
            false
        } else if !zone.has_head && !zone.has_tail {
            false
        } else {
            self.tail_clear_active
        };

        Lane {
            slots,
            tail_clear_active,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_slots(slots: &[(usize, Slot)], tail_clear_active: bool) -> Self {
        let mut lane = Self::new();
        for &(index, slot) in slots {
            lane.slots[index] = slot;
        }
        lane.tail_clear_active = tail_clear_active;
        lane
    }
}
