use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::engine::{ChartNotification, GanttChart, PointerEvent};
use crate::ui::theme;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Render the chart and feed pointer input through the engine. Returns the
/// notifications the engine emitted this frame.
pub fn show_chart(chart: &mut GanttChart, ui: &mut Ui) -> Vec<ChartNotification> {
    let mut notifications = Vec::new();
    let available = ui.available_size();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let size = Vec2::new(
                (chart.config().width as f32).max(available.x),
                (chart.content_height() as f32).max(available.y),
            );
            let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
            let origin = response.rect.min;

            notifications = route_pointer_events(chart, ui, origin, response.rect);

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_rows(chart, &painter, origin, size.x);
            draw_grid(chart, &painter, origin);
            draw_links(chart, &painter, origin);
            draw_bars(chart, ui, &painter, origin);
            draw_events(chart, &painter, origin);
            set_cursor(chart, ui);
        });

    notifications
}

/// Translate egui's pointer state into the engine's event stream. Downs
/// and context presses only count inside the chart; moves and ups always
/// go through so a drag can end outside the viewport.
fn route_pointer_events(
    chart: &mut GanttChart,
    ui: &Ui,
    origin: Pos2,
    rect: Rect,
) -> Vec<ChartNotification> {
    let mut out = Vec::new();
    let (pos, pressed, released, secondary, scroll) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.secondary_pressed(),
            i.raw_scroll_delta,
        )
    });
    let Some(pos) = pos else { return out };
    let (x, y) = ((pos.x - origin.x) as f64, (pos.y - origin.y) as f64);

    if pressed && rect.contains(pos) {
        out.extend(chart.on_pointer_event(PointerEvent::Down { x, y }));
    }
    out.extend(chart.on_pointer_event(PointerEvent::Move { x, y }));
    if released {
        out.extend(chart.on_pointer_event(PointerEvent::Up { x, y }));
    }
    if secondary && rect.contains(pos) {
        out.extend(chart.on_pointer_event(PointerEvent::Context { x, y }));
    }
    if scroll != Vec2::ZERO && rect.contains(pos) {
        out.extend(chart.on_pointer_event(PointerEvent::Wheel {
            delta_x: scroll.x as f64,
            delta_y: scroll.y as f64,
        }));
    }
    out
}

fn draw_rows(chart: &GanttChart, painter: &egui::Painter, origin: Pos2, width: f32) {
    let config = chart.config();
    for index in 0..chart.tasks().len() {
        if index % 2 == 0 {
            continue;
        }
        let top = origin.y + (config.axis_height + index as f64 * config.row_pitch()) as f32;
        painter.rect_filled(
            Rect::from_min_size(
                Pos2::new(origin.x, top),
                Vec2::new(width, config.row_pitch() as f32),
            ),
            0.0,
            theme::BG_PANEL,
        );
    }
}

fn draw_grid(chart: &GanttChart, painter: &egui::Painter, origin: Pos2) {
    let Some((_, ticks)) = chart.grid() else {
        return;
    };
    let config = chart.config();
    let axis_h = config.axis_height as f32;
    let bottom = origin.y + chart.content_height() as f32;

    painter.rect_filled(
        Rect::from_min_size(
            origin,
            Vec2::new(config.width as f32, axis_h),
        ),
        0.0,
        theme::BG_HEADER,
    );

    for tick in &ticks {
        let x = origin.x + tick.x as f32;
        painter.line_segment(
            [Pos2::new(x, origin.y + axis_h), Pos2::new(x, bottom)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        if let Some(day) = tick.day {
            painter.text(
                Pos2::new(x + 3.0, origin.y + axis_h - 12.0),
                egui::Align2::LEFT_CENTER,
                day.to_string(),
                theme::font_sub(),
                theme::TEXT_SECONDARY,
            );
        }
        // Month and year only appear where they change.
        if let Some(month) = tick.month {
            let label = match tick.year {
                Some(year) => format!("{} {}", MONTHS[(month - 1) as usize], year),
                None => MONTHS[(month - 1) as usize].to_string(),
            };
            painter.text(
                Pos2::new(x + 3.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                label,
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
    }
}

fn draw_links(chart: &GanttChart, painter: &egui::Painter, origin: Pos2) {
    for (_, route) in chart.link_routes() {
        let points: Vec<Pos2> = route
            .points
            .iter()
            .map(|&(x, y)| Pos2::new(origin.x + x as f32, origin.y + y as f32))
            .collect();
        painter.add(egui::Shape::line(
            points,
            Stroke::new(1.5, theme::LINK_LINE),
        ));
        let arrow: Vec<Pos2> = route
            .arrow
            .iter()
            .map(|&(x, y)| Pos2::new(origin.x + x as f32, origin.y + y as f32))
            .collect();
        painter.add(egui::Shape::convex_polygon(
            arrow,
            theme::LINK_LINE,
            Stroke::NONE,
        ));
    }
}

fn draw_bars(chart: &GanttChart, ui: &Ui, painter: &egui::Painter, origin: Pos2) {
    let config = chart.config().clone();
    let hover = chart.hover().clone();
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    for (index, task) in chart.tasks().iter().enumerate() {
        let Some(geometry) = chart.geometry(index) else {
            continue;
        };
        let bar_rect = Rect::from_min_max(
            Pos2::new(origin.x + geometry.left as f32, origin.y + geometry.top as f32),
            Pos2::new(
                origin.x + geometry.right as f32,
                origin.y + geometry.bottom as f32,
            ),
        );
        let color = theme::parse_task_color(task.color.as_deref());
        painter.rect_filled(bar_rect, rounding, color);

        let hovered = hover.task == Some(index);
        if hovered {
            painter.rect_stroke(
                bar_rect.expand(1.0),
                rounding,
                Stroke::new(1.5, theme::BORDER_ACCENT),
            );
        }

        if let Some(progress) = task.progress {
            let progress_rect = Rect::from_min_size(
                bar_rect.min,
                Vec2::new(bar_rect.width() * progress as f32, bar_rect.height()),
            );
            painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);
            painter.text(
                Pos2::new(
                    bar_rect.left() + config.text_offset_x as f32,
                    bar_rect.bottom() - config.text_offset_y as f32 - 5.0,
                ),
                egui::Align2::LEFT_CENTER,
                format!("{}%", (progress * 100.0).round() as i32),
                theme::font_small(),
                theme::TEXT_ON_BAR,
            );

            if !config.read_only {
                draw_progress_handle(&config, painter, origin, &geometry, progress, hovered);
            }
        }

        // Resize edge affordance, visible only on the hovered edge.
        if hovered && (hover.left_edge || hover.right_edge) {
            let edge_x = if hover.left_edge {
                bar_rect.left()
            } else {
                bar_rect.right() - config.edge_size as f32
            };
            painter.rect_filled(
                Rect::from_min_size(
                    Pos2::new(edge_x, bar_rect.top()),
                    Vec2::new(config.edge_size as f32, bar_rect.height()),
                ),
                rounding,
                Color32::from_white_alpha(70),
            );
        }

        if bar_rect.width() > 30.0 {
            let galley =
                painter.layout_no_wrap(task.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
            let clipped = painter.with_clip_rect(bar_rect);
            clipped.galley(
                Pos2::new(
                    bar_rect.left() + config.text_offset_x as f32,
                    bar_rect.top() + config.text_offset_y as f32,
                ),
                galley,
                Color32::TRANSPARENT,
            );
        }

        if hovered && !chart.is_interacting() {
            show_task_tooltip(ui, task);
        }
    }
}

fn draw_progress_handle(
    config: &crate::model::ChartConfig,
    painter: &egui::Painter,
    origin: Pos2,
    geometry: &crate::engine::Geometry,
    progress: f64,
    hovered: bool,
) {
    let size = config.progress_handle_size as f32;
    let cx = origin.x + (geometry.left + geometry.width() * progress) as f32;
    let top = origin.y + geometry.bottom as f32;
    let color = if hovered {
        theme::HANDLE_COLOR
    } else {
        theme::TEXT_DIM
    };
    painter.add(egui::Shape::convex_polygon(
        vec![
            Pos2::new(cx, top),
            Pos2::new(cx + size / 2.0, top + size),
            Pos2::new(cx - size / 2.0, top + size),
        ],
        color,
        Stroke::NONE,
    ));
}

fn draw_events(chart: &GanttChart, painter: &egui::Painter, origin: Pos2) {
    for positioned in chart.events() {
        let center = Pos2::new(origin.x + positioned.x as f32, origin.y + positioned.y as f32);
        let size = 6.0;
        painter.add(egui::Shape::convex_polygon(
            vec![
                Pos2::new(center.x, center.y - size),
                Pos2::new(center.x + size, center.y),
                Pos2::new(center.x, center.y + size),
                Pos2::new(center.x - size, center.y),
            ],
            theme::EVENT_COLOR,
            Stroke::NONE,
        ));
        painter.text(
            Pos2::new(center.x + size + 4.0, center.y),
            egui::Align2::LEFT_CENTER,
            &positioned.event.name,
            theme::font_small(),
            theme::TEXT_SECONDARY,
        );
    }
}

fn show_task_tooltip(ui: &Ui, task: &crate::model::Task) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new(("task-tip", &task.id)),
        |ui| {
            ui.strong(&task.name);
            if let Some((start, end)) = task.resolved_dates() {
                ui.label(format!(
                    "{} → {}",
                    start.format("%d/%m/%Y"),
                    end.format("%d/%m/%Y"),
                ));
            }
            if let Some(progress) = task.progress {
                ui.label(format!("Progress: {}%", (progress * 100.0).round() as i32));
            }
        },
    );
}

fn set_cursor(chart: &GanttChart, ui: &Ui) {
    let hover = chart.hover();
    if hover.left_edge || hover.right_edge || hover.progress_handle {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    } else if chart.is_interacting() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    } else if hover.task.is_some() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
}
