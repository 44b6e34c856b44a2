use chrono::{Datelike, TimeZone, Utc};

use super::layout::Scale;
use super::time_range::{TimeRange, DAY_MS};

/// Granularity of the generated gridlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStep {
    Day,
    Week,
}

/// One gridline. Label parts are change-detected: a part is `Some` only
/// where its value differs from the previous tick, so the renderer never
/// draws redundant text.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTick {
    pub x: f64,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Spans up to this many days get day gridlines, longer ones get weeks.
const DAY_STEP_LIMIT: i64 = 20;

fn first_midnight_at_or_after(ms: i64) -> i64 {
    ms.div_euclid(DAY_MS) * DAY_MS + if ms.rem_euclid(DAY_MS) == 0 { 0 } else { DAY_MS }
}

/// Gridline positions and label break points for the visible range.
pub fn grid_ticks(range: TimeRange, scale: &Scale) -> (GridStep, Vec<GridTick>) {
    let step = if range.span_days() <= DAY_STEP_LIMIT {
        GridStep::Day
    } else {
        GridStep::Week
    };

    let mut t = first_midnight_at_or_after(range.min);
    let step_ms = match step {
        GridStep::Day => DAY_MS,
        GridStep::Week => {
            // Align week ticks to Mondays. Epoch day zero was a Thursday.
            let epoch_day = t.div_euclid(DAY_MS);
            let days_from_monday = (epoch_day + 3).rem_euclid(7);
            t += ((7 - days_from_monday) % 7) * DAY_MS;
            7 * DAY_MS
        }
    };

    let mut ticks = Vec::new();
    let mut prev: Option<(u32, u32, i32)> = None;
    while t <= range.max {
        let Some(date) = Utc.timestamp_millis_opt(t).single() else {
            break;
        };
        let (day, month, year) = (date.day(), date.month(), date.year());
        ticks.push(GridTick {
            x: scale.time_to_x(t),
            day: (prev.map(|p| p.0) != Some(day)).then_some(day),
            month: (prev.map(|p| p.1) != Some(month)).then_some(month),
            year: (prev.map(|p| p.2) != Some(year)).then_some(year),
        });
        prev = Some((day, month, year));
        t += step_ms;
    }
    (step, ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: (i32, u32, u32), days: i64) -> TimeRange {
        let min = Utc
            .with_ymd_and_hms(start.0, start.1, start.2, 0, 0, 0)
            .unwrap()
            .timestamp_millis();
        TimeRange {
            min,
            max: min + days * DAY_MS,
        }
    }

    #[test]
    fn short_span_uses_day_ticks() {
        let r = range((2024, 5, 1), 10);
        let scale = Scale::new(r, 1000.0);
        let (step, ticks) = grid_ticks(r, &scale);
        assert_eq!(step, GridStep::Day);
        assert_eq!(ticks.len(), 11);
    }

    #[test]
    fn long_span_uses_monday_aligned_week_ticks() {
        let r = range((2024, 5, 1), 60);
        let scale = Scale::new(r, 1000.0);
        let (step, ticks) = grid_ticks(r, &scale);
        assert_eq!(step, GridStep::Week);
        // 2024-05-01 is a Wednesday; the first tick lands on Monday the 6th.
        assert_eq!(ticks[0].day, Some(6));
        for pair in ticks.windows(2) {
            assert!(pair[1].x > pair[0].x);
        }
    }

    #[test]
    fn labels_change_detect_month_and_year() {
        let r = range((2024, 12, 28), 8);
        let scale = Scale::new(r, 1000.0);
        let (_, ticks) = grid_ticks(r, &scale);

        // First tick carries every part.
        assert!(ticks[0].day.is_some() && ticks[0].month.is_some() && ticks[0].year.is_some());
        // Ticks inside the same month repeat neither month nor year.
        assert_eq!(ticks[1].month, None);
        assert_eq!(ticks[1].year, None);
        // The January 1st tick re-emits month and year.
        let jan = ticks.iter().find(|t| t.day == Some(1)).unwrap();
        assert_eq!(jan.month, Some(1));
        assert_eq!(jan.year, Some(2025));
    }

    #[test]
    fn day_ticks_always_emit_the_day() {
        let r = range((2024, 5, 1), 5);
        let scale = Scale::new(r, 1000.0);
        let (_, ticks) = grid_ticks(r, &scale);
        assert!(ticks.iter().all(|t| t.day.is_some()));
    }
}
