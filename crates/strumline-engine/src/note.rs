use serde::{Deserialize, Serialize};

/// Number of lanes (one button each).
pub const LANE_COUNT: usize = 4;

/// Content of a single slot in a lane pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoteCell {
    #[default]
    None,
    /// Sustain body following a head.
    Tail,
    Head,
}

impl NoteCell {
    /// Decode a 2-bit chart cell: `00` none, `01` tail, `10` head.
    /// The unused `11` pattern decodes as `None`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b01 => NoteCell::Tail,
            0b10 => NoteCell::Head,
            _ => NoteCell::None,
        }
    }

    pub fn to_bits(self) -> u8 {
        match self {
            NoteCell::None => 0b00,
            NoteCell::Tail => 0b01,
            NoteCell::Head => 0b10,
        }
    }

    pub fn is_note(self) -> bool {
        self != NoteCell::None
    }
}

/// One position in a lane. `hit` is only meaningful when `cell` holds a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot {
    pub cell: NoteCell,
    pub hit: bool,
}

impl Slot {
    pub const EMPTY: Self = Self {
        cell: NoteCell::None,
        hit: false,
    };

    pub const fn new(cell: NoteCell) -> Self {
        Self { cell, hit: false }
    }

    /// A note that was rewarded and will vanish on the next advance.
    pub fn is_consumed(&self) -> bool {
        self.hit && self.cell.is_note()
    }
}

/// One chart row: the cell spawned into each lane on a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChartRow(pub [NoteCell; LANE_COUNT]);

impl ChartRow {
    pub const EMPTY: Self = Self([NoteCell::None; LANE_COUNT]);

    /// Decode a packed row, 2 bits per lane with lane 0 in the top pair.
    ///
    /// `0b10_00_00_01` is a head in lane 0 and a tail in lane 3.
    pub fn from_bits(packed: u8) -> Self {
        let mut cells = [NoteCell::None; LANE_COUNT];
        for (lane, cell) in cells.iter_mut().enumerate() {
            let shift = (LANE_COUNT - 1 - lane) * 2;
            *cell = NoteCell::from_bits(packed >> shift);
        }
        Self(cells)
    }

    pub fn to_bits(&self) -> u8 {
        self.0.iter().enumerate().fold(0u8, |acc, (lane, cell)| {
            acc | (cell.to_bits() << ((LANE_COUNT - 1 - lane) * 2))
        })
    }

    /// Cell for the given lane. Out-of-range lanes read as `None`.
    pub fn cell(&self, lane: usize) -> NoteCell {
        self.0.get(lane).copied().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| !c.is_note())
    }
}

impl From<[NoteCell; LANE_COUNT]> for ChartRow {
    fn from(cells: [NoteCell; LANE_COUNT]) -> Self {
        Self(cells)
    }
}
