use rand::Rng;

use strumline_engine::lane::{HIT_ZONE_END, HIT_ZONE_START};
use strumline_engine::{ChartRow, LANE_COUNT, NoteCell, VecChart};

use crate::config::PatternConfig;

/// Empty rows kept between two notes of one lane, so a lane never holds
/// two separate notes in the hit zone at once.
const LANE_GAP: usize = HIT_ZONE_END - HIT_ZONE_START + 1;

/// Generate a random chart of `rows` rows.
pub fn generate<R: Rng>(config: &PatternConfig, rows: usize, rng: &mut R) -> VecChart {
    let mut cells = vec![[NoteCell::None; LANE_COUNT]; rows];
    let mut free_from = [0usize; LANE_COUNT];

    for row in 0..rows {
        if !rng.gen_bool(config.density) {
            continue;
        }

        let mut lanes = vec![rng.gen_range(0..LANE_COUNT)];
        if rng.gen_bool(config.chord_chance) {
            let extra = rng.gen_range(0..LANE_COUNT);
            if !lanes.contains(&extra) {
                lanes.push(extra);
            }
        }

        let tail_rows = if config.max_tail_rows > 0 && rng.gen_bool(config.sustain_chance) {
            rng.gen_range(1..=config.max_tail_rows)
        } else {
            0
        };
        let length = config.head_rows + tail_rows;

        for lane in lanes {
            if row < free_from[lane] {
                continue;
            }
            let end = (row + length).min(rows);
            for (offset, cell_row) in cells[row..end].iter_mut().enumerate() {
                cell_row[lane] = if offset < config.head_rows {
                    NoteCell::Head
                } else {
                    NoteCell::Tail
                };
            }
            free_from[lane] = row + length + LANE_GAP;
        }
    }

    cells.into_iter().map(ChartRow).collect()
}
