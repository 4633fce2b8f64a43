//! Map View Widget
//! Draws the choropleth polygons with egui_plot and reports clicks.

use crate::data::FeatureCollection;
use crate::gui::control_panel::ViewSettings;
use crate::interaction::ReadyState;
use crate::map::Popup;
use egui::{Align2, RichText};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Polygon};
use geo::{Point, TriangulateEarcut};

/// Cached screen-independent geometry of one feature.
struct FeatureShape {
    triangles: Vec<[[f64; 2]; 3]>,
    rings: Vec<Vec<[f64; 2]>>,
}

/// Actions triggered by the map
#[derive(Debug, Clone, PartialEq)]
pub enum MapViewAction {
    None,
    ClickedAt(Point<f64>),
    ClosePopup,
}

pub struct MapView {
    /// Latitude the projection is scaled for.
    center_lat: f64,
    shapes: Vec<FeatureShape>,
}

impl MapView {
    pub fn new(center_lat: f64) -> Self {
        Self {
            center_lat,
            shapes: Vec::new(),
        }
    }

    /// Triangulate every feature once; the collection never changes after load.
    fn ensure_shapes(&mut self, collection: &FeatureCollection) {
        if self.shapes.len() == collection.len() {
            return;
        }
        self.shapes = collection
            .iter()
            .map(|feature| FeatureShape {
                triangles: feature
                    .geometry
                    .iter()
                    .flat_map(|polygon| polygon.earcut_triangles())
                    .map(|t| [[t.0.x, t.0.y], [t.1.x, t.1.y], [t.2.x, t.2.y]])
                    .collect(),
                rings: feature
                    .geometry
                    .iter()
                    .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
                    .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect::<Vec<_>>())
                    .collect(),
            })
            .collect();
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        ready: &ReadyState,
        settings: &ViewSettings,
    ) -> MapViewAction {
        self.ensure_shapes(ready.collection());
        let popup = ready.popup();
        let shapes = &self.shapes;

        let response = Plot::new("neighborhood_map")
            .data_aspect((1.0 / self.center_lat.to_radians().cos()) as f32)
            .show_grid(settings.show_basemap)
            .show_axes(settings.show_basemap)
            .show_x(false)
            .show_y(false)
            .allow_double_click_reset(true)
            .show(ui, |plot_ui| {
                if settings.show_overlay {
                    for polygon in ready.layer().polygons() {
                        let Some(shape) = shapes.get(polygon.feature_index) else {
                            continue;
                        };

                        let fill = polygon.style.fill();
                        if fill.a() > 0 {
                            for triangle in &shape.triangles {
                                plot_ui.polygon(
                                    Polygon::new(PlotPoints::from(triangle.to_vec()))
                                        .fill_color(fill)
                                        .stroke(egui::Stroke::new(0.5, fill)),
                                );
                            }
                        }

                        let stroke = polygon.style.stroke();
                        for ring in &shape.rings {
                            plot_ui.line(
                                Line::new(PlotPoints::from(ring.clone()))
                                    .color(stroke.color)
                                    .width(stroke.width),
                            );
                        }
                    }
                }

                let anchor = popup
                    .and_then(|p| p.anchor)
                    .map(|a| plot_ui.screen_from_plot(PlotPoint::new(a.x(), a.y())));
                (plot_ui.pointer_coordinate(), anchor)
            });

        let (pointer, anchor) = response.inner;
        let mut action = Self::click_action(response.response.clicked(), pointer, settings);

        if let Some(popup) = popup {
            let rect = response.response.rect;
            let pos = anchor
                .filter(|pos| rect.contains(*pos))
                .unwrap_or_else(|| rect.center_top() + egui::vec2(0.0, 60.0));
            if Self::show_popup(ui.ctx(), popup, pos) {
                action = MapViewAction::ClosePopup;
            }
        }

        action
    }

    /// Polygons are only clickable while the overlay is shown.
    fn click_action(
        clicked: bool,
        pointer: Option<PlotPoint>,
        settings: &ViewSettings,
    ) -> MapViewAction {
        match pointer {
            Some(p) if clicked && settings.show_overlay => {
                MapViewAction::ClickedAt(Point::new(p.x, p.y))
            }
            _ => MapViewAction::None,
        }
    }

    /// Draw the popup above `pos`. Returns true when closed.
    fn show_popup(ctx: &egui::Context, popup: &Popup, pos: egui::Pos2) -> bool {
        let mut closed = false;
        egui::Area::new(egui::Id::new("map_popup"))
            .order(egui::Order::Foreground)
            .pivot(Align2::CENTER_BOTTOM)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&popup.title).size(16.0).strong());
                        if ui.small_button("✕").clicked() {
                            closed = true;
                        }
                    });
                    ui.add_space(4.0);
                    for (label, value) in popup.lines() {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(label).strong());
                            ui.label(value);
                        });
                    }
                });
            });
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_reports_plot_coordinate() {
        let action = MapView::click_action(
            true,
            Some(PlotPoint::new(-73.9, 40.7)),
            &ViewSettings::default(),
        );
        assert_eq!(action, MapViewAction::ClickedAt(Point::new(-73.9, 40.7)));
    }

    #[test]
    fn test_hidden_overlay_ignores_clicks() {
        let settings = ViewSettings {
            show_overlay: false,
            ..ViewSettings::default()
        };
        let action = MapView::click_action(true, Some(PlotPoint::new(-73.9, 40.7)), &settings);
        assert_eq!(action, MapViewAction::None);
    }

    #[test]
    fn test_no_click_without_press_or_pointer() {
        let settings = ViewSettings::default();
        assert_eq!(
            MapView::click_action(false, Some(PlotPoint::new(0.0, 0.0)), &settings),
            MapViewAction::None
        );
        assert_eq!(MapView::click_action(true, None, &settings), MapViewAction::None);
    }
}
