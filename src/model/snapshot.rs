use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::Event;
use super::task::Task;

/// Errors surfaced at the host boundary.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to read chart snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// The snapshot a host hands over whenever it wants the chart rebuilt.
///
/// The engine treats every snapshot as authoritative: tasks may have been
/// added, removed or reordered since the last one, and identity is carried
/// by the `id` string alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl ChartData {
    /// Parse a snapshot from JSON. Dates are ISO-8601 strings.
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the snapshot as pretty JSON with ISO-8601 dates.
    pub fn to_json(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::LinkKind;

    #[test]
    fn snapshot_round_trips_iso_dates() {
        let json = r#"{
            "tasks": [
                {
                    "id": "t1",
                    "name": "Design",
                    "start": "2024-05-01T00:00:00Z",
                    "end": "2024-05-04T00:00:00Z",
                    "progress": 0.25,
                    "links": [{ "target_id": "t2", "kind": "FinishToStart" }]
                }
            ],
            "events": [
                { "id": "e1", "name": "Kickoff", "date": "2024-05-01T09:00:00Z" }
            ]
        }"#;
        let data = ChartData::from_json(json).unwrap();
        assert_eq!(data.tasks.len(), 1);
        assert_eq!(data.tasks[0].links[0].kind, LinkKind::FinishToStart);
        assert_eq!(data.events[0].name, "Kickoff");

        let round = ChartData::from_json(&data.to_json().unwrap()).unwrap();
        assert_eq!(round.tasks[0].start, data.tasks[0].start);
    }

    #[test]
    fn snapshot_rejects_malformed_json() {
        assert!(ChartData::from_json("{").is_err());
    }
}
