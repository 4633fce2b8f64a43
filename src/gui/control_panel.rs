//! Control Panel Widget
//! Left side panel with the neighborhood dropdown, layer control, legend
//! and load status.

use crate::config::AppConfig;
use crate::interaction::DropdownWidget;
use crate::map::color_scale;
use egui::{Color32, ComboBox, RichText};

/// Layer visibility, toggled from the layer control.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSettings {
    pub show_basemap: bool,
    pub show_overlay: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            show_basemap: true,
            show_overlay: true,
        }
    }
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: ViewSettings,
    pub status: String,
    basemap_label: String,
    overlay_label: String,
}

impl ControlPanel {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            settings: ViewSettings::default(),
            status: "Loading dataset...".to_string(),
            basemap_label: config.basemap_label.clone(),
            overlay_label: config.overlay_label.clone(),
        }
    }

    /// Draw the control panel. `dropdown` is `None` until the dataset loads.
    pub fn show(&mut self, ui: &mut egui::Ui, dropdown: Option<&DropdownWidget>) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🗽 NYC Labor Map")
                    .size(22.0)
                    .color(Color32::from_rgb(0xd9, 0x5f, 0x0e)),
            );
            ui.label(
                RichText::new("Unemployment by Neighborhood")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Neighborhood Section =====
        ui.label(RichText::new("📍 Neighborhood").size(14.0).strong());
        ui.add_space(5.0);

        ui.add_enabled_ui(dropdown.is_some(), |ui| {
            let selected_text = dropdown.map(|d| d.selected_label()).unwrap_or("—");
            ComboBox::from_id_salt("neighborhood_dropdown")
                .width(ui.available_width())
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    let Some(dropdown) = dropdown else {
                        return;
                    };
                    for option in dropdown.options() {
                        let selected = option.index == dropdown.selected_index();
                        if ui.selectable_label(selected, &option.label).clicked() && !selected {
                            action = ControlPanelAction::NeighborhoodChanged(option.index);
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Layer Control =====
        ui.label(RichText::new("🗺 Layers").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Base").size(11.0).color(Color32::GRAY));
                ui.checkbox(&mut self.settings.show_basemap, self.basemap_label.as_str());
                ui.add_space(4.0);
                ui.label(RichText::new("Overlay").size(11.0).color(Color32::GRAY));
                ui.checkbox(&mut self.settings.show_overlay, self.overlay_label.as_str());
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Legend =====
        ui.label(RichText::new("🎨 Unemployment Rate").size(14.0).strong());
        ui.add_space(5.0);

        for entry in color_scale::legend() {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
                ui.painter().rect_filled(
                    rect,
                    2.0,
                    entry.color.gamma_multiply(color_scale::FILL_OPACITY),
                );
                ui.label(RichText::new(&entry.label).size(12.0));
            });
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    NeighborhoodChanged(usize),
}
