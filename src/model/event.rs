use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A zero-duration marker on the timeline, e.g. a milestone or a release
/// date. Events are decorative: they take no part in link propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
}

impl Event {
    pub fn new(id: impl Into<String>, name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
        }
    }
}
