pub mod axis;
pub mod chart;
pub mod interact;
pub mod layout;
pub mod links;
pub mod path;
pub mod propagate;
pub mod time_range;

pub use chart::{ChartNotification, GanttChart, PositionedEvent};
pub use interact::{HoverState, PointerEvent, CLICK_TOLERANCE_PX};
pub use layout::{Geometry, Scale};
pub use time_range::TimeRange;
