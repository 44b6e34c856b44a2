use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::engine::{ChartNotification, GanttChart};
use crate::model::{ChartConfig, ChartData, Task};
use crate::ui::{self, theme};

/// Sample snapshot in the boundary format: ISO-8601 dates, links declared
/// on the predecessor, one task with progress disabled.
const SAMPLE_SNAPSHOT: &str = r##"{
    "tasks": [
        {
            "id": "requirements",
            "name": "Requirements",
            "start": "2025-03-03T00:00:00Z",
            "end": "2025-03-07T00:00:00Z",
            "progress": 1.0,
            "color": "#4285f4",
            "links": [{ "target_id": "design", "kind": "FinishToStart" }]
        },
        {
            "id": "design",
            "name": "Design",
            "start": "2025-03-07T00:00:00Z",
            "end": "2025-03-14T00:00:00Z",
            "progress": 0.6,
            "color": "#ab47bc",
            "links": [
                { "target_id": "implementation", "kind": "FinishToStart" },
                { "target_id": "docs", "kind": "StartToStart" }
            ]
        },
        {
            "id": "implementation",
            "name": "Implementation",
            "start": "2025-03-14T00:00:00Z",
            "end": "2025-03-28T00:00:00Z",
            "progress": 0.25,
            "color": "#34a853",
            "links": [{ "target_id": "qa", "kind": "FinishToFinish" }]
        },
        {
            "id": "docs",
            "name": "Documentation",
            "start": "2025-03-10T00:00:00Z",
            "end": "2025-03-20T00:00:00Z",
            "progress": 0.1,
            "color": "#03a9f4"
        },
        {
            "id": "qa",
            "name": "QA",
            "start": "2025-03-24T00:00:00Z",
            "end": "2025-04-01T00:00:00Z",
            "progress": 0.0,
            "color": "#fb8c00",
            "links": [{ "target_id": "release", "kind": "StartToFinish" }]
        },
        {
            "id": "release",
            "name": "Release prep",
            "start": "2025-03-31T00:00:00Z",
            "end": "2025-04-03T00:00:00Z",
            "color": "#e53935"
        }
    ],
    "events": [
        { "id": "freeze", "name": "Code freeze", "date": "2025-03-28T00:00:00Z" },
        { "id": "launch", "name": "Launch", "date": "2025-04-03T00:00:00Z" }
    ]
}"##;

struct ContextMenu {
    task_id: String,
    pos: egui::Pos2,
}

/// Demo host application: owns the authoritative task list, feeds the
/// engine snapshots, and applies the engine's notifications back onto its
/// own data.
pub struct GanttApp {
    chart: GanttChart,
    data: ChartData,
    read_only: bool,
    dense: bool,
    log: Vec<String>,
    context_menu: Option<ContextMenu>,
    dirty: bool,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        theme::apply_theme(&cc.egui_ctx);

        let data = match ChartData::from_json(SAMPLE_SNAPSHOT) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(%err, "sample snapshot failed to parse");
                ChartData::default()
            }
        };
        let mut chart = GanttChart::new(ChartConfig::default());
        chart.update(&data);

        Self {
            chart,
            data,
            read_only: false,
            dense: false,
            log: Vec::new(),
            context_menu: None,
            dirty: false,
        }
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > 8 {
            self.log.remove(0);
        }
    }

    fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.data.tasks.iter_mut().find(|t| t.id == id)
    }

    fn apply(&mut self, notification: ChartNotification, ctx: &egui::Context) {
        match notification {
            ChartNotification::TaskClicked { id } => {
                self.push_log(format!("clicked {id}"));
            }
            ChartNotification::TaskContextMenuRequested { id, .. } => {
                let pos = ctx
                    .pointer_interact_pos()
                    .unwrap_or(egui::Pos2::new(100.0, 100.0));
                self.context_menu = Some(ContextMenu { task_id: id, pos });
            }
            ChartNotification::TaskDatesChanged { id, start, end } => {
                let parsed = (
                    DateTime::parse_from_rfc3339(&start),
                    DateTime::parse_from_rfc3339(&end),
                );
                if let (Ok(start), Ok(end)) = parsed {
                    if let Some(task) = self.task_mut(&id) {
                        task.start = Some(start.with_timezone(&Utc));
                        task.end = Some(end.with_timezone(&Utc));
                        self.dirty = true;
                    }
                }
                self.push_log(format!("{id} moved to {start} .. {end}"));
            }
            ChartNotification::TaskProgressChanged { id, progress } => {
                if let Some(task) = self.task_mut(&id) {
                    task.progress = Some(progress);
                    self.dirty = true;
                }
                self.push_log(format!("{id} progress {}%", (progress * 100.0).round()));
            }
        }
    }

    fn add_task(&mut self) {
        let start = Utc::now();
        let mut task = Task::new(
            Uuid::new_v4().to_string(),
            format!("Task {}", self.data.tasks.len() + 1),
            start,
            start + Duration::days(7),
        );
        task.progress = Some(0.0);
        self.data.tasks.push(task);
        self.dirty = true;
    }

    fn show_context_menu(&mut self, ctx: &egui::Context) {
        let Some(menu) = self.context_menu.take() else {
            return;
        };
        let mut keep = true;
        let mut remove_task = false;
        let mut complete_task = false;

        egui::Window::new("task-menu")
            .title_bar(false)
            .resizable(false)
            .fixed_pos(menu.pos)
            .show(ctx, |ui| {
                let name = self
                    .data
                    .tasks
                    .iter()
                    .find(|t| t.id == menu.task_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default();
                ui.strong(name);
                ui.separator();
                if ui.button("Mark complete").clicked() {
                    complete_task = true;
                    keep = false;
                }
                if ui.button("Remove task").clicked() {
                    remove_task = true;
                    keep = false;
                }
                if ui.button("Close").clicked() {
                    keep = false;
                }
            });

        if complete_task {
            if let Some(task) = self.task_mut(&menu.task_id) {
                if task.progress.is_some() {
                    task.progress = Some(1.0);
                    self.dirty = true;
                }
            }
        }
        if remove_task {
            self.data.tasks.retain(|t| t.id != menu.task_id);
            self.dirty = true;
        }
        if keep {
            self.context_menu = Some(menu);
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Gantt Kit");
                ui.separator();
                ui.checkbox(&mut self.read_only, "Read-only");
                ui.checkbox(&mut self.dense, "Dense");
                if ui.button("Add task").clicked() {
                    self.add_task();
                }
            });
        });

        egui::TopBottomPanel::bottom("log").show(ctx, |ui| {
            for line in &self.log {
                ui.small(line);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // Track viewport and toggles between gestures; a snapshot swap
            // mid-drag would discard the gesture.
            if !self.chart.is_interacting() {
                let desired_width = ui.available_width().max(400.0) as f64;
                let config = self.chart.config();
                if (config.width - desired_width).abs() > 1.0
                    || config.read_only != self.read_only
                    || config.dense != self.dense
                {
                    let config = ChartConfig {
                        width: desired_width,
                        read_only: self.read_only,
                        dense: self.dense,
                        ..config.clone()
                    };
                    self.chart.set_config(config);
                }
            }

            let notifications = ui::chart::show_chart(&mut self.chart, ui);
            for notification in notifications {
                self.apply(notification, ctx);
            }

            if self.dirty && !self.chart.is_interacting() {
                self.chart.update(&self.data);
                self.dirty = false;
            }
        });

        self.show_context_menu(ctx);
    }
}
