use crate::note::ChartRow;

/// Supplier of one chart row per tick.
/// Implementations: VecChart (in-memory), or any decoder living outside the engine.
pub trait ChartSource {
    /// Row for the next tick. Once exhausted, every call returns `ChartRow::EMPTY`.
    fn next_row(&mut self) -> ChartRow;

    fn is_exhausted(&self) -> bool;
}

/// A finite in-memory chart.
#[derive(Debug, Clone, Default)]
pub struct VecChart {
    rows: Vec<ChartRow>,
    position: usize,
}

impl VecChart {
    pub fn new(rows: Vec<ChartRow>) -> Self {
        Self { rows, position: 0 }
    }

    /// Build from packed rows (see `ChartRow::from_bits`).
    pub fn from_bits(packed: &[u8]) -> Self {
        Self::new(packed.iter().map(|&b| ChartRow::from_bits(b)).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }

    pub fn remaining(&self) -> usize {
        self.rows.len().saturating_sub(self.position)
    }

    /// Restart playback from the first row.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl ChartSource for VecChart {
    fn next_row(&mut self) -> ChartRow {
        match self.rows.get(self.position) {
            Some(row) => {
                self.position += 1;
                *row
            }
            None => ChartRow::EMPTY,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.position >= self.rows.len()
    }
}

impl FromIterator<ChartRow> for VecChart {
    fn from_iter<I: IntoIterator<Item = ChartRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
