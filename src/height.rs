//! Sizing rule shared by the job-level and drill-down charts.

pub const UNIT_HEIGHT: u32 = 50;
pub const BASE_PADDING: u32 = 100;
pub const MINIMUM_EXTENT: u32 = 150;

/// Chart height for the given number of rows. Monotonic in `rows` and never
/// below [MINIMUM_EXTENT], so an empty chart still has a visible canvas.
pub fn height_for_rows(rows: usize) -> u32 {
    (rows as u32)
        .saturating_mul(UNIT_HEIGHT)
        .saturating_add(BASE_PADDING)
        .max(MINIMUM_EXTENT)
}
