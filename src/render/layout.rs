//! Geometry of the punch card canvas, in pixels.

use crate::model::{DAYS_PER_WEEK, HOURS_PER_DAY};

pub const CANVAS_WIDTH: u32 = 820;

pub const HEADER_HEIGHT: u32 = 40;
pub const ROW_HEIGHT: u32 = 60;
pub const TRAILER_GAP: u32 = 15;

pub const FIRST_COLUMN_X: i32 = 100;
pub const COLUMN_SPACING: i32 = 30;

/// Distance from a row's top to its baseline gridline.
pub const BASELINE_OFFSET: i32 = 40;
pub const TICK_OFFSET: i32 = 25;
/// Odd hours start their tick this much higher, so their ticks are longer.
pub const ODD_TICK_EXTENSION: i32 = 5;
/// Hour labels sit with their bottom edge this far below the last row.
pub const HOUR_LABEL_OFFSET: i32 = 5;

pub const MIN_DOT_DIAMETER: f64 = 3.0;
pub const DOT_DIAMETER_RANGE: f64 = 29.0;

pub const fn section_height() -> u32 {
    HEADER_HEIGHT + DAYS_PER_WEEK as u32 * ROW_HEIGHT + TRAILER_GAP
}

pub fn canvas_height(sections: usize) -> u32 {
    section_height() * sections as u32
}

pub fn column_x(hour: u8) -> i32 {
    FIRST_COLUMN_X + COLUMN_SPACING * hour as i32
}

/// Top of the row for `day` within a section starting at `section_top`.
pub fn row_y(section_top: i32, day: u8) -> i32 {
    section_top + HEADER_HEIGHT as i32 + ROW_HEIGHT as i32 * day as i32
}

pub fn tick_top(row_top: i32, hour: u8) -> i32 {
    if hour % 2 == 1 {
        row_top + TICK_OFFSET - ODD_TICK_EXTENSION
    } else {
        row_top + TICK_OFFSET
    }
}

/// Dot size for `count` commits, or `None` when there is nothing to scale against.
///
/// The size is exact; the raster quantizes it through [`dot_radius`].
pub fn dot_diameter(count: u32, max_count: u32) -> Option<f64> {
    if max_count == 0 || count == 0 {
        return None;
    }
    let fraction = count as f64 / max_count as f64;
    Some(fraction * DOT_DIAMETER_RANGE + MIN_DOT_DIAMETER)
}

/// Whole-pixel radius used to draw a dot of `diameter`.
///
/// Rounds to the nearest pixel, so the 3 px floor draws as a 5 px disc and
/// neighbouring counts can share a radius. Larger counts never get a smaller
/// radius.
pub fn dot_radius(diameter: f64) -> i32 {
    ((diameter / 2.0).round() as i32).max(1)
}

pub fn hours() -> impl Iterator<Item = u8> {
    0..HOURS_PER_DAY
}

pub fn days() -> impl Iterator<Item = u8> {
    0..DAYS_PER_WEEK
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn section_is_475_high() {
        assert_eq!(section_height(), 475);
        assert_eq!(canvas_height(0), 0);
        assert_eq!(canvas_height(1), 475);
        assert_eq!(canvas_height(2), 950);
        assert_eq!(canvas_height(3), 1425);
    }

    #[test]
    fn columns_and_rows() {
        assert_eq!(column_x(0), 100);
        assert_eq!(column_x(9), 370);
        assert_eq!(column_x(23), 790);
        assert_eq!(row_y(0, 0), 40);
        assert_eq!(row_y(475, 1), 575);
        assert_eq!(row_y(0, 6), 400);
    }

    #[test]
    fn odd_hours_get_longer_ticks() {
        let baseline = 40 + BASELINE_OFFSET;
        assert_eq!(tick_top(40, 0), 65);
        assert_eq!(tick_top(40, 1), 60);
        for hour in (1..HOURS_PER_DAY).step_by(2) {
            assert!(baseline - tick_top(40, hour) > baseline - tick_top(40, hour - 1));
        }
    }

    #[test]
    fn dot_diameter_bounds() {
        assert_eq!(dot_diameter(2, 2), Some(32.0));
        assert_eq!(dot_diameter(1, 2), Some(17.5));
        assert_eq!(dot_diameter(1, 0), None);
        assert_eq!(dot_diameter(0, 5), None);

        let tiny = dot_diameter(1, 100_000).unwrap();
        assert!(tiny > MIN_DOT_DIAMETER && tiny < MIN_DOT_DIAMETER + 0.001);
    }

    #[test]
    fn dot_diameter_is_strictly_monotonic() {
        let max = 17;
        let sizes: Vec<f64> = (1..=max).filter_map(|c| dot_diameter(c, max)).collect();
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(sizes.last().copied(), Some(32.0));
    }

    #[test]
    fn dot_radius_rounds_to_whole_pixels() {
        assert_eq!(dot_radius(MIN_DOT_DIAMETER), 2);
        assert_eq!(dot_radius(17.5), 9);
        assert_eq!(dot_radius(32.0), 16);

        let max = 40;
        let radii: Vec<i32> = (1..=max)
            .filter_map(|c| dot_diameter(c, max))
            .map(dot_radius)
            .collect();
        assert!(radii.windows(2).all(|w| w[0] <= w[1]));
        assert!(radii.iter().all(|&r| r >= 1));
    }
}
