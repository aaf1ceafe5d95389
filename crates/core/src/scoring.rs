//! Scoring module - line clear points, drop points and the level curve
//!
//! Levels start at 1 and rise every 10 lines. Gravity speeds up by 70ms per
//! level down to an 80ms floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `lines` rows at once at `level`.
///
/// Counts above 4 score like a four-line clear.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    let idx = lines.min(4) as usize;
    LINE_SCORES[idx].saturating_mul(level)
}

/// Calculate drop score
/// soft drop: +1 per cell
/// hard drop: +2 per cell
pub fn drop_score(cells: u32, hard: bool) -> u32 {
    if hard {
        cells.saturating_mul(2)
    } else {
        cells
    }
}

/// Level for a total line count: `max(1, lines / 10 + 1)`
pub fn level_for_lines(lines: u32) -> u32 {
    (lines / LINES_PER_LEVEL + 1).max(1)
}

/// Gravity interval for a level: `max(80, 1000 - (level - 1) * 70)`
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}
