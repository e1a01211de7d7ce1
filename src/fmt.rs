//! Formatting primitives behind the status line widgets.
//!
//! All pure formatting functions (no template handling, no I/O) live here.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::model::LoadAvg;

/// Horizontal ramp: empty cell, then left-aligned eighths up to a full block.
const HBAR_LEVELS: [char; 9] = [
    ' ', '\u{258f}', '\u{258e}', '\u{258d}', '\u{258c}', '\u{258b}', '\u{258a}', '\u{2589}',
    '\u{2588}',
];

/// Vertical ramp: empty cell, then lower eighths up to a full block.
const VBAR_LEVELS: [char; 9] = [
    ' ', '\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}',
    '\u{2588}',
];

/// Sub-cell steps per horizontal bar cell.
const STEPS_PER_CELL: usize = HBAR_LEVELS.len() - 1;

// ---------------------------------------------------------------------------
// Gauges
// ---------------------------------------------------------------------------

/// Format `value / total` as a right-aligned percentage: `" 42.3%"`.
///
/// A zero total yields `"  0.0%"`.
pub fn format_percentage(value: f64, total: f64) -> String {
    if total == 0.0 {
        return "  0.0%".to_string();
    }
    format!("{:5.1}%", 100.0 * value / total)
}

/// Render `value / total` as a bar of exactly `width` cells.
///
/// The bar has `width * 8` steps: full blocks, one partial block, then
/// blank cells. A zero total is treated as 1. `value >= total` fills every
/// cell with a full block.
pub fn horizontal_bar(width: usize, value: f64, total: f64) -> String {
    let total = if total == 0.0 { 1.0 } else { total };
    let steps = width * STEPS_PER_CELL;
    let ratio = (value / total).max(0.0);
    let tick = ((steps as f64 * ratio).floor() as usize).min(steps);
    let full = tick / STEPS_PER_CELL;

    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat_n(HBAR_LEVELS[STEPS_PER_CELL], full));
    if full < width {
        bar.push(HBAR_LEVELS[tick % STEPS_PER_CELL]);
        bar.extend(std::iter::repeat_n(HBAR_LEVELS[0], width - full - 1));
    }
    bar
}

/// Pick one vertical block glyph for `value / total`.
///
/// The level is `floor(9 * value / total)`, clamped to the full block.
pub fn vertical_bar(value: f64, total: f64) -> char {
    let total = if total == 0.0 { 1.0 } else { total };
    let levels = VBAR_LEVELS.len();
    let idx = ((levels as f64 * value / total).max(0.0) as usize).min(levels - 1);
    VBAR_LEVELS[idx]
}

/// Percentage followed by a bracketed bar: `" 42.3%[██▌  ]"`.
pub fn format_gauge(value: f64, total: f64, width: usize) -> String {
    format!(
        "{}[{}]",
        format_percentage(value, total),
        horizontal_bar(width, value, total)
    )
}

/// One vertical glyph per percentage, bracketed: `"[▁█▄]"`.
pub fn format_sparkline(values: &[f64]) -> String {
    let mut out = String::with_capacity(values.len() * 3 + 2);
    out.push('[');
    out.extend(values.iter().map(|&v| vertical_bar(v, 100.0)));
    out.push(']');
    out
}

// ---------------------------------------------------------------------------
// Text widgets
// ---------------------------------------------------------------------------

/// Format seconds since boot: `"1days 02:03:04"`.
pub fn format_uptime(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    let s = total % 60;
    let m = (total / 60) % 60;
    let h = (total / 3600) % 24;
    let d = total / 86400;
    format!("{}days {:02}:{:02}:{:02}", d, h, m, s)
}

/// Load averages followed by the process token: `"0.15 0.1 0.05 1/150"`.
pub fn format_load(load: &LoadAvg) -> String {
    format!(
        "{} {} {} {}",
        load.load1, load.load5, load.load15, load.procs
    )
}

/// Format a timestamp as `2024-01-31(Wed) 13:05:09`.
///
/// Day names come from chrono and do not depend on the process locale.
pub fn format_wall_clock<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format("%Y-%m-%d(%a) %H:%M:%S").to_string()
}

/// Format epoch seconds in the local timezone, or `"-"` when out of range.
pub fn format_epoch_local(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|utc| format_wall_clock(&utc.with_timezone(&Local)))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn percentage_formatting() {
        assert_eq!(format_percentage(0.0, 0.0), "  0.0%");
        assert_eq!(format_percentage(423.0, 1000.0), " 42.3%");
        assert_eq!(format_percentage(1.0, 1.0), "100.0%");
        assert_eq!(format_percentage(0.0, 10.0), "  0.0%");
    }

    #[test]
    fn bar_full_at_total() {
        for width in 1..=10 {
            let bar = horizontal_bar(width, 7.0, 7.0);
            assert_eq!(bar, "\u{2588}".repeat(width));
        }
    }

    #[test]
    fn bar_empty_and_partial() {
        assert_eq!(horizontal_bar(5, 0.0, 100.0), "     ");
        // 5 cells * 8 = 40 steps; 50% = 20 steps = 2 full cells + half block.
        assert_eq!(horizontal_bar(5, 50.0, 100.0), "\u{2588}\u{2588}\u{258c}  ");
        // 4 cells * 8 = 32 steps; 1/32 = a single step.
        assert_eq!(horizontal_bar(4, 1.0, 32.0), "\u{258f}   ");
    }

    #[test]
    fn bar_keeps_width() {
        for v in [0.0, 1.0, 33.3, 66.6, 99.9, 100.0, 250.0] {
            assert_eq!(horizontal_bar(5, v, 100.0).chars().count(), 5, "{}", v);
        }
        assert_eq!(horizontal_bar(0, 50.0, 100.0), "");
    }

    #[test]
    fn bar_zero_total_treated_as_one() {
        assert_eq!(horizontal_bar(3, 0.0, 0.0), "   ");
        assert_eq!(horizontal_bar(3, 1.0, 0.0), "\u{2588}\u{2588}\u{2588}");
    }

    #[test]
    fn vertical_bar_levels() {
        assert_eq!(vertical_bar(0.0, 100.0), ' ');
        assert_eq!(vertical_bar(11.0, 100.0), ' ');
        assert_eq!(vertical_bar(11.2, 100.0), '\u{2581}');
        assert_eq!(vertical_bar(50.0, 100.0), '\u{2584}');
        assert_eq!(vertical_bar(99.0, 100.0), '\u{2588}');
        assert_eq!(vertical_bar(100.0, 100.0), '\u{2588}');
        assert_eq!(vertical_bar(5.0, 0.0), '\u{2588}');
    }

    #[test]
    fn gauge_and_sparkline() {
        assert_eq!(
            format_gauge(50.0, 100.0, 5),
            " 50.0%[\u{2588}\u{2588}\u{258c}  ]"
        );
        assert_eq!(format_sparkline(&[0.0, 100.0]), "[ \u{2588}]");
        assert_eq!(format_sparkline(&[]), "[]");
    }

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(0.0), "0days 00:00:00");
        assert_eq!(format_uptime(93784.56), "1days 02:03:04");
        assert_eq!(format_uptime(86399.0), "0days 23:59:59");
    }

    #[test]
    fn load_formatting() {
        let load = LoadAvg {
            load1: 0.15,
            load5: 0.10,
            load15: 2.0,
            procs: "1/150".to_string(),
        };
        assert_eq!(format_load(&load), "0.15 0.1 2 1/150");
    }

    #[test]
    fn wall_clock_formatting() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 31, 13, 5, 9).unwrap();
        assert_eq!(format_wall_clock(&dt), "2024-01-31(Wed) 13:05:09");
    }

    #[test]
    fn epoch_local_shape() {
        let s = format_epoch_local(1_700_000_000);
        assert_eq!(s.len(), "2023-11-14(Tue) 22:13:20".len());
        assert_eq!(format_epoch_local(i64::MAX), "-");
    }
}
