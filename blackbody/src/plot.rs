//! Draws charts into a shape batch, with labels for the egui pass

use crate::chart::{Chart, Scale};
use common::{ShapeBatch, WorldLabel};
use egui::{Align2, Color32};
use glam::Vec2;

pub const AXIS_COLOR: [f32; 4] = [0.75, 0.75, 0.8, 1.0];
const GRID_COLOR: [f32; 4] = [0.35, 0.35, 0.4, 0.35];
const TICK_LENGTH: f32 = 0.12;

/// Axis titles and tick spacing for [`draw_axes`]
pub struct AxesStyle<'a> {
    pub x_title: &'a str,
    pub y_title: &'a str,
    /// Linear tick spacing; ignored on log axes
    pub x_step: f64,
    pub y_step: f64,
    pub grid: bool,
}

/// Frame, ticks and optional grid lines; tick and axis labels go into `labels`
pub fn draw_axes(
    batch: &mut ShapeBatch,
    labels: &mut Vec<WorldLabel>,
    chart: &Chart,
    style: &AxesStyle<'_>,
) {
    let min = chart.origin;
    let max = chart.top_right();
    batch.rect_outline(min, max, AXIS_COLOR);

    for x in chart.x.ticks(style.x_step) {
        let Some(p) = chart.x_on_axis(x) else {
            continue;
        };
        batch.line(p, p - Vec2::Y * TICK_LENGTH, AXIS_COLOR);
        if style.grid {
            batch.line(p, Vec2::new(p.x, max.y), GRID_COLOR);
        }
        labels.push(
            WorldLabel::new(p - Vec2::Y * (TICK_LENGTH + 0.05), tick_text(x, chart.x.scale))
                .size(12.0)
                .anchor(Align2::CENTER_TOP),
        );
    }

    for y in chart.y.ticks(style.y_step) {
        let Some(p) = chart.y_on_axis(y) else {
            continue;
        };
        batch.line(p, p - Vec2::X * TICK_LENGTH, AXIS_COLOR);
        if style.grid {
            batch.line(p, Vec2::new(max.x, p.y), GRID_COLOR);
        }
        labels.push(
            WorldLabel::new(p - Vec2::X * (TICK_LENGTH + 0.05), tick_text(y, chart.y.scale))
                .size(12.0)
                .anchor(Align2::RIGHT_CENTER),
        );
    }

    labels.push(
        WorldLabel::new(Vec2::new((min.x + max.x) * 0.5, min.y - 0.6), style.x_title)
            .size(15.0)
            .color(Color32::WHITE)
            .anchor(Align2::CENTER_TOP),
    );
    labels.push(
        WorldLabel::new(Vec2::new(min.x, max.y + 0.2), style.y_title)
            .size(15.0)
            .color(Color32::WHITE)
            .anchor(Align2::LEFT_BOTTOM),
    );
}

fn tick_text(value: f64, scale: Scale) -> String {
    match scale {
        Scale::Log10 => format!("1e{}", value.log10().round() as i32),
        Scale::Linear if value.abs() >= 1.0 || value == 0.0 => format!("{value:.0}"),
        Scale::Linear => format!("{value:.2}"),
    }
}

/// Curve points drawn as clipped polylines
pub fn draw_curve(batch: &mut ShapeBatch, chart: &Chart, points: &[[f64; 2]], color: [f32; 4]) {
    for run in chart.clip_polyline(points) {
        batch.polyline(&run, color);
    }
}

pub fn draw_dashed_curve(
    batch: &mut ShapeBatch,
    chart: &Chart,
    points: &[[f64; 2]],
    color: [f32; 4],
) {
    for run in chart.clip_polyline(points) {
        batch.dashed_polyline(&run, 0.15, 0.1, color);
    }
}

/// Shade the area where `upper` lies above `lower`
pub fn fill_region(
    batch: &mut ShapeBatch,
    chart: &Chart,
    lower: &[[f64; 2]],
    upper: &[[f64; 2]],
    color: [f32; 4],
) {
    for [a, b, c] in chart.fill_between(lower, upper) {
        batch.triangle(a, b, c, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Axis;

    #[test]
    fn test_tick_text() {
        assert_eq!(tick_text(1500.0, Scale::Linear), "1500");
        assert_eq!(tick_text(0.25, Scale::Linear), "0.25");
        assert_eq!(tick_text(1e6, Scale::Log10), "1e6");
        assert_eq!(tick_text(1e-3, Scale::Log10), "1e-3");
    }

    #[test]
    fn test_axes_emit_labels_for_each_tick() {
        let chart = Chart::new(
            Axis::linear(0.0, 3000.0),
            Axis::log10(1.0, 1e4),
            Vec2::ZERO,
            Vec2::new(10.0, 6.0),
        );
        let mut batch = ShapeBatch::new();
        let mut labels = Vec::new();
        let style = AxesStyle {
            x_title: "λ (nm)",
            y_title: "B",
            x_step: 1000.0,
            y_step: 0.0,
            grid: false,
        };
        draw_axes(&mut batch, &mut labels, &chart, &style);
        // 4 x ticks, 5 decades, 2 titles
        assert_eq!(labels.len(), 4 + 5 + 2);
        assert!(!batch.lines.is_empty());
    }
}
