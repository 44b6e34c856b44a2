use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The temporal-ordering relationship a link imposes between two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// The predecessor must finish at or before the successor's start.
    FinishToStart,
    /// The predecessor must start at or before the successor's finish.
    StartToFinish,
    /// The predecessor must start at or before the successor's start.
    StartToStart,
    /// The predecessor must finish at or before the successor's finish.
    FinishToFinish,
}

/// A directed link declared by a task (the predecessor) pointing at the
/// successor task it is ordered against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub target_id: String,
    pub kind: LinkKind,
}

impl Link {
    pub fn new(target_id: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            target_id: target_id.into(),
            kind,
        }
    }
}

/// A single task in the Gantt chart.
///
/// Dates are optional: a task with only one of `start`/`end` is treated as a
/// zero-length bar at that instant, and a task with neither is kept in the
/// list but never positioned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Progress from 0.0 (not started) to 1.0 (complete). `None` disables
    /// the progress UI for this task.
    #[serde(default)]
    pub progress: Option<f64>,
    /// Display color for the task bar (CSS-style hex string).
    #[serde(default)]
    pub color: Option<String>,
    /// Links this task declares, with this task as predecessor.
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Task {
    /// Create a new task spanning `start..end`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start: Some(start),
            end: Some(end),
            progress: None,
            color: None,
            links: Vec::new(),
        }
    }

    /// Resolve the task's dates, defaulting a missing one to the other.
    /// Returns `None` when the task has no date at all.
    pub fn resolved_dates(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            (Some(s), None) => Some((s, s)),
            (None, Some(e)) => Some((e, e)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn missing_date_defaults_to_the_other() {
        let d = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let mut task = Task::new("a", "A", d, d);
        task.end = None;
        assert_eq!(task.resolved_dates(), Some((d, d)));
        task.start = None;
        task.end = Some(d);
        assert_eq!(task.resolved_dates(), Some((d, d)));
    }

    #[test]
    fn dateless_task_resolves_to_none() {
        let d = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let mut task = Task::new("a", "A", d, d);
        task.start = None;
        task.end = None;
        assert_eq!(task.resolved_dates(), None);
    }
}
