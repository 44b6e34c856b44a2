use chrono::{DateTime, TimeZone, Utc};

use super::time_range::TimeRange;
use crate::model::ChartConfig;

/// Derived pixel rectangle for a positioned task. Never authoritative:
/// always recomputable from the task's dates and the current scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Geometry {
    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn mid_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Shift the rectangle horizontally, preserving its width.
    pub fn translate_x(&mut self, dx: f64) {
        self.left += dx;
        self.right += dx;
    }
}

/// Maps instants to pixels and back for one layout pass.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    min_ms: i64,
    px_per_ms: f64,
}

impl Scale {
    pub fn new(range: TimeRange, viewport_width: f64) -> Self {
        // span is never zero here, the range computation guarantees a
        // minimum; max(1) keeps the division finite regardless.
        let span = range.span_ms().max(1);
        Self {
            min_ms: range.min,
            px_per_ms: viewport_width / span as f64,
        }
    }

    pub fn time_to_x(&self, ms: i64) -> f64 {
        (ms - self.min_ms) as f64 * self.px_per_ms
    }

    pub fn x_to_time(&self, x: f64) -> i64 {
        self.min_ms + (x / self.px_per_ms).round() as i64
    }

    /// `x_to_time` lifted back into a chrono instant.
    pub fn x_to_date(&self, x: f64) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.x_to_time(x)).single()
    }
}

/// Top of a task row. Rows stack below the axis band in supplied order.
pub fn row_top(config: &ChartConfig, row: usize) -> f64 {
    config.axis_height + row as f64 * config.row_pitch()
}

/// Geometry for a task bar on `row` spanning `start_ms..end_ms`. A span
/// with `end < start` is clamped to zero width at the start instant.
pub fn task_geometry(
    scale: &Scale,
    config: &ChartConfig,
    start_ms: i64,
    end_ms: i64,
    row: usize,
) -> Geometry {
    let left = scale.time_to_x(start_ms);
    let right = scale.time_to_x(end_ms).max(left);
    let top = row_top(config, row);
    Geometry {
        left,
        right,
        top,
        bottom: top + config.bar_height(),
    }
}

/// Hit area of the triangular progress handle hanging under the bar.
pub fn progress_handle_area(geometry: &Geometry, config: &ChartConfig, progress: f64) -> Geometry {
    let size = config.progress_handle_size;
    let cx = geometry.left + geometry.width() * progress;
    Geometry {
        left: cx - size / 2.0,
        right: cx + size / 2.0,
        top: geometry.bottom,
        bottom: geometry.bottom + size,
    }
}

/// Top of the footer band, below the last task row.
pub fn footer_top(config: &ChartConfig, row_count: usize) -> f64 {
    config.axis_height + row_count as f64 * config.row_pitch()
}
