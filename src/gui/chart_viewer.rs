//! Chart Viewer Widget
//! Paints the labor-force pie for the selected neighborhood.

use crate::charts::{polar, PieChart};
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke};
use std::f64::consts::FRAC_PI_2;

/// Slices wider than this are split so every painted wedge stays convex.
const MAX_WEDGE_ANGLE: f64 = FRAC_PI_2;
/// Arc segments per full turn.
const SEGMENTS_PER_TURN: f64 = 128.0;

const LABEL_COLOR: Color32 = Color32::WHITE;

pub struct ChartViewer;

impl ChartViewer {
    /// Draw `chart` with the feature name as heading.
    pub fn show(ui: &mut egui::Ui, name: &str, chart: &PieChart) {
        ui.label(RichText::new(format!("Labor Force: {}", name)).size(18.0).strong());
        ui.add_space(8.0);

        let size = egui::vec2(chart.width as f32, chart.height as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let center = response.rect.center();

        for slice in &chart.slices {
            if slice.angle() <= 0.0 {
                continue;
            }
            for wedge in Self::wedges(center, chart.outer_radius, slice.start_angle, slice.end_angle) {
                painter.add(Shape::convex_polygon(wedge, slice.color, Stroke::NONE));
            }
        }

        for slice in &chart.slices {
            let [x, y] = slice.label_position;
            painter.text(
                center + egui::vec2(x as f32, y as f32),
                Align2::CENTER_CENTER,
                &slice.text,
                FontId::proportional(12.0),
                LABEL_COLOR,
            );
        }
    }

    /// Split the arc `[start, end]` into convex fan polygons around `center`.
    fn wedges(center: Pos2, radius: f64, start: f64, end: f64) -> Vec<Vec<Pos2>> {
        let to_screen = |angle: f64| {
            let [x, y] = polar(radius, angle);
            center + egui::vec2(x as f32, y as f32)
        };

        let pieces = ((end - start) / MAX_WEDGE_ANGLE - 1e-9).ceil().max(1.0) as usize;
        let step = (end - start) / pieces as f64;

        (0..pieces)
            .map(|i| {
                let a0 = start + step * i as f64;
                let a1 = a0 + step;
                let segments = ((a1 - a0) / std::f64::consts::TAU * SEGMENTS_PER_TURN)
                    .ceil()
                    .max(1.0) as usize;

                let mut points = Vec::with_capacity(segments + 2);
                points.push(center);
                for s in 0..=segments {
                    points.push(to_screen(a0 + (a1 - a0) * s as f64 / segments as f64));
                }
                points
            })
            .collect()
    }
}
