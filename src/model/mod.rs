pub mod config;
pub mod event;
pub mod snapshot;
pub mod task;

pub use config::{ChartConfig, SizeVariant};
pub use event::Event;
pub use snapshot::{ChartData, ChartError};
pub use task::{Link, LinkKind, Task};
