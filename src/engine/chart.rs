use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use super::axis::{self, GridStep, GridTick};
use super::interact::{self, HoverState, Interaction, PointerEvent};
use super::layout::{self, Geometry, Scale};
use super::links::{LinkEdge, LinkGraph};
use super::path::{link_route, LinkRoute};
use super::time_range::{self, TimeRange};
use crate::model::{ChartConfig, ChartData, Event, Task};

/// Host-facing notification, emitted synchronously from a pointer event.
/// At most one logical user action produces each of these.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartNotification {
    TaskClicked {
        id: String,
    },
    TaskContextMenuRequested {
        id: String,
        x: f64,
        y: f64,
    },
    /// Dates cross the boundary as ISO-8601 strings.
    TaskDatesChanged {
        id: String,
        start: String,
        end: String,
    },
    TaskProgressChanged {
        id: String,
        progress: f64,
    },
}

pub(crate) fn iso(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// An event placed in the footer band.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEvent {
    pub event: Event,
    pub x: f64,
    pub y: f64,
}

/// One chart instance. The host owns it directly and calls methods on it;
/// every snapshot passed to [`GanttChart::update`] is authoritative and
/// replaces all derived state.
pub struct GanttChart {
    pub(crate) config: ChartConfig,
    pub(crate) tasks: Vec<Task>,
    pub(crate) geometries: Vec<Option<Geometry>>,
    pub(crate) events: Vec<Event>,
    positioned_events: Vec<PositionedEvent>,
    pub(crate) range: Option<TimeRange>,
    pub(crate) scale: Option<Scale>,
    pub(crate) graph: LinkGraph,
    pub(crate) interaction: Interaction,
}

impl GanttChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            tasks: Vec::new(),
            geometries: Vec::new(),
            events: Vec::new(),
            positioned_events: Vec::new(),
            range: None,
            scale: None,
            graph: LinkGraph::default(),
            interaction: Interaction::default(),
        }
    }

    /// Rebuild all derived state from a fresh snapshot. Tasks may have
    /// been added, removed or reordered since the last one; any in-flight
    /// gesture is discarded. Out-of-range progress values are clamped on
    /// the way in.
    pub fn update(&mut self, data: &ChartData) {
        debug!(
            tasks = data.tasks.len(),
            events = data.events.len(),
            "rebuilding chart from snapshot"
        );
        self.tasks = data
            .tasks
            .iter()
            .cloned()
            .map(|mut task| {
                if let Some(p) = task.progress.as_mut() {
                    *p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
                }
                task
            })
            .collect();
        self.geometries = vec![None; self.tasks.len()];
        self.events = data.events.clone();
        self.graph = LinkGraph::build(&self.tasks);
        self.interaction = Interaction::default();
        self.layout();
    }

    /// Recompute range, scale and every geometry from the current dates.
    /// Idempotent; safe to call at any point between gestures.
    pub(crate) fn layout(&mut self) {
        self.range = time_range::compute(&self.tasks, self.config.time_padding_ms);
        self.scale = self.range.map(|range| Scale::new(range, self.config.width));

        for (index, task) in self.tasks.iter().enumerate() {
            self.geometries[index] = match (self.scale, task.resolved_dates()) {
                (Some(scale), Some((start, end))) => Some(layout::task_geometry(
                    &scale,
                    &self.config,
                    start.timestamp_millis(),
                    end.timestamp_millis(),
                    index,
                )),
                _ => None,
            };
        }

        let footer_mid =
            layout::footer_top(&self.config, self.tasks.len()) + self.config.footer_height / 2.0;
        self.positioned_events = match self.scale {
            Some(scale) => self
                .events
                .iter()
                .cloned()
                .map(|event| {
                    let x = scale.time_to_x(event.date.timestamp_millis());
                    PositionedEvent {
                        event,
                        x,
                        y: footer_mid,
                    }
                })
                .collect(),
            None => Vec::new(),
        };
    }

    /// Swap the configuration (viewport resize, read-only toggle, density)
    /// and lay the chart out again.
    pub fn set_config(&mut self, config: ChartConfig) {
        self.config = config;
        self.layout();
    }

    /// Feed one pointer event through the interaction state machine.
    /// Returned notifications fire in the order the actions happened.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> Vec<ChartNotification> {
        interact::handle_event(self, event)
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The engine's working copy of the snapshot tasks, with any dates and
    /// progress edited through interaction applied.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Geometry of the task at `index`; `None` when the task has no dates
    /// or the chart has no range.
    pub fn geometry(&self, index: usize) -> Option<Geometry> {
        self.geometries.get(index).copied().flatten()
    }

    pub fn events(&self) -> &[PositionedEvent] {
        &self.positioned_events
    }

    pub fn range(&self) -> Option<TimeRange> {
        self.range
    }

    pub fn scale(&self) -> Option<Scale> {
        self.scale
    }

    pub fn hover(&self) -> &HoverState {
        &self.interaction.hover
    }

    /// True while a press or drag gesture is in flight. Hosts must not
    /// swap snapshots mid-gesture.
    pub fn is_interacting(&self) -> bool {
        self.interaction.is_active()
    }

    /// Gridlines for the current range, or `None` when no task has a date.
    pub fn grid(&self) -> Option<(GridStep, Vec<GridTick>)> {
        match (self.range, self.scale) {
            (Some(range), Some(scale)) => Some(axis::grid_ticks(range, &scale)),
            _ => None,
        }
    }

    /// Connector routes for every resolved link whose two ends are both
    /// positioned. Self-links draw nothing.
    pub fn link_routes(&self) -> Vec<(LinkEdge, LinkRoute)> {
        self.graph
            .edges()
            .iter()
            .filter(|edge| edge.pred != edge.succ)
            .filter_map(|edge| {
                let pred = self.geometries[edge.pred]?;
                let succ = self.geometries[edge.succ]?;
                Some((
                    *edge,
                    link_route(
                        edge.kind,
                        &pred,
                        &succ,
                        self.config.arrow_padding,
                        self.config.arrow_size,
                    ),
                ))
            })
            .collect()
    }

    /// Total content height: axis band, every row, footer band.
    pub fn content_height(&self) -> f64 {
        layout::footer_top(&self.config, self.tasks.len()) + self.config.footer_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, LinkKind};
    use chrono::TimeZone;

    fn date(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap()
    }

    fn chart_with(tasks: Vec<Task>) -> GanttChart {
        let config = ChartConfig {
            time_padding_ms: 0,
            ..ChartConfig::default()
        };
        let mut chart = GanttChart::new(config);
        chart.update(&ChartData {
            tasks,
            events: Vec::new(),
        });
        chart
    }

    #[test]
    fn snapshot_produces_geometry_for_dated_tasks_only() {
        let mut dateless = Task::new("b", "B", date(1), date(2));
        dateless.start = None;
        dateless.end = None;
        let chart = chart_with(vec![Task::new("a", "A", date(1), date(3)), dateless]);

        assert!(chart.geometry(0).is_some());
        assert!(chart.geometry(1).is_none());
        // The dateless task still holds its row.
        assert_eq!(chart.tasks().len(), 2);
        assert_eq!(chart.content_height(), {
            let c = chart.config();
            c.axis_height + 2.0 * c.row_pitch() + c.footer_height
        });
    }

    #[test]
    fn empty_snapshot_degenerates_quietly() {
        let chart = chart_with(Vec::new());
        assert!(chart.range().is_none());
        assert!(chart.grid().is_none());
        assert!(chart.link_routes().is_empty());
        assert!(chart.events().is_empty());
    }

    #[test]
    fn dangling_link_lays_out_like_no_link_at_all() {
        let plain = chart_with(vec![
            Task::new("a", "A", date(1), date(3)),
            Task::new("b", "B", date(4), date(6)),
        ]);
        let mut linked_task = Task::new("a", "A", date(1), date(3));
        linked_task.links = vec![Link::new("ghost", LinkKind::FinishToStart)];
        let dangling = chart_with(vec![linked_task, Task::new("b", "B", date(4), date(6))]);

        assert_eq!(plain.geometry(0), dangling.geometry(0));
        assert_eq!(plain.geometry(1), dangling.geometry(1));
        assert!(dangling.link_routes().is_empty());
    }

    #[test]
    fn relayout_is_idempotent() {
        let mut chart = chart_with(vec![
            Task::new("a", "A", date(1), date(3)),
            Task::new("b", "B", date(4), date(6)),
        ]);
        let before: Vec<_> = (0..2).map(|i| chart.geometry(i)).collect();
        chart.set_config(chart.config().clone());
        chart.set_config(chart.config().clone());
        let after: Vec<_> = (0..2).map(|i| chart.geometry(i)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn progress_is_clamped_on_ingest() {
        let mut task = Task::new("a", "A", date(1), date(3));
        task.progress = Some(1.7);
        let mut low = Task::new("b", "B", date(1), date(3));
        low.progress = Some(-0.2);
        let chart = chart_with(vec![task, low]);
        assert_eq!(chart.tasks()[0].progress, Some(1.0));
        assert_eq!(chart.tasks()[1].progress, Some(0.0));
    }

    #[test]
    fn events_are_positioned_in_the_footer() {
        let config = ChartConfig {
            time_padding_ms: 0,
            ..ChartConfig::default()
        };
        let mut chart = GanttChart::new(config);
        chart.update(&ChartData {
            tasks: vec![Task::new("a", "A", date(1), date(10))],
            events: vec![Event::new("e", "Launch", date(5))],
        });

        let events = chart.events();
        assert_eq!(events.len(), 1);
        let scale = chart.scale().unwrap();
        assert_eq!(events[0].x, scale.time_to_x(date(5).timestamp_millis()));
        assert!(events[0].y > chart.geometry(0).unwrap().bottom);
    }

    #[test]
    fn self_link_draws_no_route() {
        let mut task = Task::new("a", "A", date(1), date(3));
        task.links = vec![Link::new("a", LinkKind::FinishToStart)];
        let chart = chart_with(vec![task]);
        assert!(chart.link_routes().is_empty());
    }

    #[test]
    fn bar_width_scales_with_duration() {
        let chart = chart_with(vec![
            Task::new("a", "A", date(1), date(2)),
            Task::new("b", "B", date(1), date(3)),
        ]);
        let short = chart.geometry(0).unwrap();
        let long = chart.geometry(1).unwrap();
        assert!((long.width() - 2.0 * short.width()).abs() < 0.001);
        assert_eq!(short.left, long.left);
    }
}
