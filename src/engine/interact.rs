use tracing::debug;

use super::chart::{ChartNotification, GanttChart};
use super::layout::progress_handle_area;
use super::propagate::{cascade, clamp_edge, DragEdge};

/// How far the pointer may travel between down and up and still count as a
/// click rather than a drag.
pub const CLICK_TOLERANCE_PX: f64 = 10.0;

/// One pointer event, in chart-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Wheel { delta_x: f64, delta_y: f64 },
    Context { x: f64, y: f64 },
}

/// What is currently under the cursor. Pure UI feedback, recomputed on
/// every pointer move outside an active gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    pub task: Option<usize>,
    pub left_edge: bool,
    pub right_edge: bool,
    pub progress_handle: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) enum Phase {
    #[default]
    Idle,
    /// Pressed on a bar interior; promoted to `MovingTask` only once the
    /// pointer travels beyond the click tolerance.
    MaybeClick {
        task: usize,
        down_x: f64,
        down_y: f64,
        origin_left: f64,
    },
    /// A press that can no longer become a click or a drag (read-only
    /// chart, pointer already past the tolerance).
    DeadPress,
    MovingTask {
        task: usize,
        down_x: f64,
        origin_left: f64,
    },
    ResizingLeft {
        task: usize,
    },
    ResizingRight {
        task: usize,
    },
    DraggingProgress {
        task: usize,
    },
}

/// Pointer gesture state for one chart instance.
#[derive(Debug, Default)]
pub struct Interaction {
    pub(crate) phase: Phase,
    pub(crate) hover: HoverState,
}

impl Interaction {
    /// True while a press or drag is in flight.
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }
}

pub(crate) fn handle_event(chart: &mut GanttChart, event: PointerEvent) -> Vec<ChartNotification> {
    let mut out = Vec::new();
    match event {
        PointerEvent::Down { x, y } => on_down(chart, x, y),
        PointerEvent::Move { x, y } => on_move(chart, x, y),
        PointerEvent::Up { .. } => on_up(chart, &mut out),
        PointerEvent::Context { x, y } => on_context(chart, x, y, &mut out),
        // Scrolling and zoom are host policy; the engine only consumes it
        // so the event stream stays uniform.
        PointerEvent::Wheel { .. } => {}
    }
    out
}

fn on_down(chart: &mut GanttChart, x: f64, y: f64) {
    update_hover(chart, x, y);
    let hover = chart.interaction.hover.clone();
    let Some(task) = hover.task else {
        chart.interaction.phase = Phase::Idle;
        return;
    };

    // Edge and handle hover are never set on a read-only chart, so only
    // the click path below survives there.
    chart.interaction.phase = if hover.left_edge {
        Phase::ResizingLeft { task }
    } else if hover.right_edge {
        Phase::ResizingRight { task }
    } else if hover.progress_handle {
        apply_progress(chart, task, x);
        Phase::DraggingProgress { task }
    } else {
        let origin_left = chart.geometries[task].map_or(0.0, |g| g.left);
        Phase::MaybeClick {
            task,
            down_x: x,
            down_y: y,
            origin_left,
        }
    };
}

fn on_move(chart: &mut GanttChart, x: f64, y: f64) {
    match chart.interaction.phase {
        Phase::Idle => update_hover(chart, x, y),
        Phase::MaybeClick {
            task,
            down_x,
            down_y,
            origin_left,
        } => {
            let travel = ((x - down_x).powi(2) + (y - down_y).powi(2)).sqrt();
            if travel > CLICK_TOLERANCE_PX {
                if chart.config.read_only {
                    chart.interaction.phase = Phase::DeadPress;
                } else {
                    chart.interaction.phase = Phase::MovingTask {
                        task,
                        down_x,
                        origin_left,
                    };
                    move_bar(chart, task, origin_left + (x - down_x));
                }
            }
        }
        Phase::MovingTask {
            task,
            down_x,
            origin_left,
        } => move_bar(chart, task, origin_left + (x - down_x)),
        Phase::ResizingLeft { task } => resize_left(chart, task, x),
        Phase::ResizingRight { task } => resize_right(chart, task, x),
        Phase::DraggingProgress { task } => apply_progress(chart, task, x),
        Phase::DeadPress => {}
    }
}

fn on_up(chart: &mut GanttChart, out: &mut Vec<ChartNotification>) {
    match chart.interaction.phase {
        Phase::MaybeClick { task, .. } => out.push(ChartNotification::TaskClicked {
            id: chart.tasks[task].id.clone(),
        }),
        Phase::MovingTask { task, .. }
        | Phase::ResizingLeft { task }
        | Phase::ResizingRight { task } => commit(chart, task, out),
        Phase::DraggingProgress { task } => {
            let task_ref = &chart.tasks[task];
            out.push(ChartNotification::TaskProgressChanged {
                id: task_ref.id.clone(),
                progress: task_ref.progress.unwrap_or(0.0),
            });
        }
        Phase::Idle | Phase::DeadPress => {}
    }
    chart.interaction.phase = Phase::Idle;
}

fn on_context(chart: &mut GanttChart, x: f64, y: f64, out: &mut Vec<ChartNotification>) {
    if chart.config.read_only {
        return;
    }
    let hit = chart
        .geometries
        .iter()
        .position(|g| g.is_some_and(|g| g.contains(x, y)));
    if let Some(task) = hit {
        out.push(ChartNotification::TaskContextMenuRequested {
            id: chart.tasks[task].id.clone(),
            x,
            y,
        });
    }
}

/// Pointer-up on a drag: cascade the change through the link graph and
/// report every task whose dates actually changed, dragged task first,
/// then in the order the cascade touched them.
fn commit(chart: &mut GanttChart, task: usize, out: &mut Vec<ChartNotification>) {
    let mut moved = vec![task];
    cascade(&mut chart.geometries, &chart.graph, task, &mut moved);
    debug!(task, moved = moved.len(), "drag committed");

    let Some(scale) = chart.scale else { return };
    for &index in &moved {
        let Some(geometry) = chart.geometries[index] else {
            continue;
        };
        let (Some(start), Some(end)) = (
            scale.x_to_date(geometry.left),
            scale.x_to_date(geometry.right),
        ) else {
            continue;
        };
        let task_ref = &mut chart.tasks[index];
        task_ref.start = Some(start);
        task_ref.end = Some(end);
        out.push(ChartNotification::TaskDatesChanged {
            id: task_ref.id.clone(),
            start: super::chart::iso(start),
            end: super::chart::iso(end),
        });
    }
}

/// Translate the whole bar to `new_left` and re-derive both dates.
fn move_bar(chart: &mut GanttChart, task: usize, new_left: f64) {
    let Some(scale) = chart.scale else { return };
    let Some(geometry) = chart.geometries[task].as_mut() else {
        return;
    };
    geometry.translate_x(new_left - geometry.left);
    let (left, right) = (geometry.left, geometry.right);
    chart.tasks[task].start = scale.x_to_date(left);
    chart.tasks[task].end = scale.x_to_date(right);
}

fn resize_left(chart: &mut GanttChart, task: usize, x: f64) {
    let Some(scale) = chart.scale else { return };
    let clamped = clamp_edge(
        &chart.geometries,
        &chart.graph,
        task,
        DragEdge::Left,
        x,
        chart.config.edge_size,
    );
    let Some(geometry) = chart.geometries[task].as_mut() else {
        return;
    };
    geometry.left = clamped.min(geometry.right);
    let left = geometry.left;
    chart.tasks[task].start = scale.x_to_date(left);
}

fn resize_right(chart: &mut GanttChart, task: usize, x: f64) {
    let Some(scale) = chart.scale else { return };
    let clamped = clamp_edge(
        &chart.geometries,
        &chart.graph,
        task,
        DragEdge::Right,
        x,
        chart.config.edge_size,
    );
    let Some(geometry) = chart.geometries[task].as_mut() else {
        return;
    };
    geometry.right = clamped.max(geometry.left);
    let right = geometry.right;
    chart.tasks[task].end = scale.x_to_date(right);
}

/// Set the task's progress from the pointer x, clamped to [0, 1] on every
/// frame, not only at commit.
fn apply_progress(chart: &mut GanttChart, task: usize, x: f64) {
    let Some(geometry) = chart.geometries[task] else {
        return;
    };
    if chart.tasks[task].progress.is_none() {
        return;
    }
    let progress = if geometry.width() > 0.0 {
        ((x - geometry.left) / geometry.width()).clamp(0.0, 1.0)
    } else {
        0.0
    };
    chart.tasks[task].progress = Some(progress);
}

/// Recompute what the cursor is over. Later rows win on overlap, the
/// right edge takes priority over the left, and edge/handle affordances
/// are suppressed on read-only charts.
fn update_hover(chart: &mut GanttChart, x: f64, y: f64) {
    let read_only = chart.config.read_only;
    let edge = chart.config.edge_size;
    let mut hover = HoverState::default();

    for (index, task) in chart.tasks.iter().enumerate() {
        let Some(geometry) = chart.geometries[index] else {
            continue;
        };
        if !read_only {
            if let Some(progress) = task.progress {
                let area = progress_handle_area(&geometry, &chart.config, progress);
                if area.contains(x, y) {
                    hover = HoverState {
                        task: Some(index),
                        progress_handle: true,
                        ..Default::default()
                    };
                    continue;
                }
            }
        }
        if geometry.contains(x, y) {
            let mut state = HoverState {
                task: Some(index),
                ..Default::default()
            };
            if !read_only && x >= geometry.right - edge {
                state.right_edge = true;
            } else if !read_only && x < geometry.left + edge {
                state.left_edge = true;
            }
            hover = state;
        }
    }
    chart.interaction.hover = hover;
}
