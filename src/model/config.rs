use serde::{Deserialize, Serialize};

/// Overall size of chart items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeVariant {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeVariant {
    fn factor(self) -> f64 {
        match self {
            SizeVariant::Small => 0.7,
            SizeVariant::Medium => 1.0,
            SizeVariant::Large => 1.3,
        }
    }
}

/// Immutable input for a single layout pass: viewport dimensions, row
/// metrics and interaction options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Viewport width in pixels, spanning the whole time range.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Height of a task bar at `SizeVariant::Medium`.
    pub task_height: f64,
    /// Vertical gap between rows.
    pub row_spacing: f64,
    /// Height of the date axis band above the first row.
    pub axis_height: f64,
    /// Height of the footer band where events are drawn.
    pub footer_height: f64,
    /// Total padding added to the time range, half before the earliest
    /// instant and half after the latest, in milliseconds.
    pub time_padding_ms: i64,
    /// Read-only charts only give hover and click feedback.
    pub read_only: bool,
    /// Dense layout shrinks the row gap.
    pub dense: bool,
    pub size: SizeVariant,
    /// Width of the resize hit-zone at each bar border.
    pub edge_size: f64,
    /// Side length of the triangular progress drag handle.
    pub progress_handle_size: f64,
    /// Side length of the link arrowhead.
    pub arrow_size: f64,
    /// Routing offset for link connector elbows.
    pub arrow_padding: f64,
    pub text_offset_x: f64,
    pub text_offset_y: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 480.0,
            task_height: 35.0,
            row_spacing: 10.0,
            axis_height: 40.0,
            footer_height: 28.0,
            time_padding_ms: 2 * 24 * 60 * 60 * 1000,
            read_only: false,
            dense: false,
            size: SizeVariant::Medium,
            edge_size: 5.0,
            progress_handle_size: 7.0,
            arrow_size: 7.0,
            arrow_padding: 10.0,
            text_offset_x: 5.0,
            text_offset_y: 2.0,
        }
    }
}

impl ChartConfig {
    /// Bar height after applying the size variant.
    pub fn bar_height(&self) -> f64 {
        self.task_height * self.size.factor()
    }

    /// Row gap after applying the dense flag.
    pub fn row_gap(&self) -> f64 {
        if self.dense {
            self.row_spacing * 0.4
        } else {
            self.row_spacing
        }
    }

    /// Full row pitch (bar plus gap).
    pub fn row_pitch(&self) -> f64 {
        self.bar_height() + self.row_gap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_and_size_adjust_row_metrics() {
        let mut config = ChartConfig::default();
        let normal = config.row_pitch();
        config.dense = true;
        assert!(config.row_pitch() < normal);
        config.size = SizeVariant::Large;
        assert!(config.bar_height() > config.task_height);
    }
}
