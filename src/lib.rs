//! Interactive Gantt chart engine.
//!
//! The [`engine`] module is the core: it computes bar geometry from task
//! dates, converts pointer gestures into date changes, and cascades those
//! changes through dependency links with a bounded recursion depth. The
//! [`model`] module holds the host-facing snapshot types (ISO-8601 dates
//! at the boundary), and [`ui`] renders a chart with egui.
//!
//! A host owns a [`GanttChart`] directly: feed it snapshots with
//! [`GanttChart::update`], pointer events with
//! [`GanttChart::on_pointer_event`], and apply the returned notifications
//! to the host's own task list.

pub mod app;
pub mod engine;
pub mod model;
pub mod ui;

pub use engine::{ChartNotification, GanttChart, HoverState, PointerEvent};
pub use model::{ChartConfig, ChartData, Event, Link, LinkKind, SizeVariant, Task};
