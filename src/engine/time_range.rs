use crate::model::Task;

/// Milliseconds in one UTC day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Smallest range the chart will lay out against. Guards the pixel scale
/// against division by zero when every instant coincides.
pub const MIN_RANGE_MS: i64 = DAY_MS;

/// The visible time span, in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub min: i64,
    pub max: i64,
}

impl TimeRange {
    pub fn span_ms(&self) -> i64 {
        self.max - self.min
    }

    pub fn span_days(&self) -> i64 {
        self.span_ms() / DAY_MS
    }
}

/// Start of the UTC day containing `ms`.
fn day_start(ms: i64) -> i64 {
    ms.div_euclid(DAY_MS) * DAY_MS
}

/// 23:59:59 of the UTC day containing `ms`.
fn day_end(ms: i64) -> i64 {
    day_start(ms) + DAY_MS - 1000
}

/// Derive the visible range from every task instant: min/max over all
/// resolved dates, day-aligned outward, then expanded by half the padding
/// on each side. Tasks without any date are skipped; if none has a date
/// there is no range and nothing gets positioned.
pub fn compute(tasks: &[Task], padding_ms: i64) -> Option<TimeRange> {
    let mut min: Option<i64> = None;
    let mut max: Option<i64> = None;

    for task in tasks {
        let Some((start, end)) = task.resolved_dates() else {
            continue;
        };
        let (s, e) = (start.timestamp_millis(), end.timestamp_millis());
        min = Some(min.map_or(s.min(e), |m| m.min(s.min(e))));
        max = Some(max.map_or(s.max(e), |m| m.max(s.max(e))));
    }

    let (min, max) = (min?, max?);
    let half_pad = padding_ms / 2;
    let mut range = TimeRange {
        min: day_start(min) - half_pad,
        max: day_end(max) + half_pad,
    };
    if range.span_ms() < MIN_RANGE_MS {
        range.max = range.min + MIN_RANGE_MS;
    }
    Some(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, start: (i32, u32, u32, u32), end: (i32, u32, u32, u32)) -> Task {
        Task::new(
            id,
            id,
            Utc.with_ymd_and_hms(start.0, start.1, start.2, start.3, 0, 0)
                .unwrap(),
            Utc.with_ymd_and_hms(end.0, end.1, end.2, end.3, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn aligns_to_day_boundaries() {
        let tasks = vec![task("a", (2024, 5, 3, 9), (2024, 5, 6, 17))];
        let range = compute(&tasks, 0).unwrap();
        let min = Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap();
        let max = Utc.with_ymd_and_hms(2024, 5, 6, 23, 59, 59).unwrap();
        assert_eq!(range.min, min.timestamp_millis());
        assert_eq!(range.max, max.timestamp_millis());
    }

    #[test]
    fn padding_splits_symmetrically() {
        let tasks = vec![task("a", (2024, 5, 3, 0), (2024, 5, 6, 0))];
        let bare = compute(&tasks, 0).unwrap();
        let padded = compute(&tasks, 4 * 60 * 60 * 1000).unwrap();
        assert_eq!(bare.min - padded.min, 2 * 60 * 60 * 1000);
        assert_eq!(padded.max - bare.max, 2 * 60 * 60 * 1000);
    }

    #[test]
    fn no_dated_task_yields_no_range() {
        let mut t = task("a", (2024, 5, 3, 0), (2024, 5, 3, 0));
        t.start = None;
        t.end = None;
        assert!(compute(&[t], 0).is_none());
        assert!(compute(&[], 0).is_none());
    }

    #[test]
    fn degenerate_range_falls_back_to_minimum() {
        // All instants coincide; day alignment already spreads the range
        // across the day, never below the minimum.
        let tasks = vec![task("a", (2024, 5, 3, 12), (2024, 5, 3, 12))];
        let range = compute(&tasks, 0).unwrap();
        assert!(range.span_ms() >= MIN_RANGE_MS - 1000);
        assert!(range.span_ms() > 0);
    }

    #[test]
    fn single_dated_task_uses_both_instants() {
        let mut t = task("a", (2024, 5, 3, 8), (2024, 5, 3, 8));
        t.end = None;
        let range = compute(&[t], 0).unwrap();
        assert!(range.max > range.min);
    }
}
