//! NYC Labor Map Main Application
//! Main window with control panel, map and chart.

use crate::config::AppConfig;
use crate::data::{DatasetLoader, LoadResult};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, MapView, MapViewAction};
use crate::interaction::{Page, PageError, PageEvent, Subscription};
use egui::{RichText, SidePanel};
use std::sync::mpsc::Receiver;

/// Chart width used until the chart column has been measured.
const INITIAL_CHART_WIDTH: f64 = 500.0;

/// Main application window.
pub struct NycLaborMapApp {
    page: Page,
    control_panel: ControlPanel,
    map_view: MapView,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
    load_error: Option<String>,

    _event_log: Subscription,
}

impl NycLaborMapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let page = Page::new(INITIAL_CHART_WIDTH);
        let event_log = page.subscribe(|event| match event {
            PageEvent::ChartDrawn(chart) => log::debug!(
                "Chart drawn for feature {} ({:.0}px, total {})",
                chart.feature_index,
                chart.width,
                chart.total()
            ),
            PageEvent::PopupOpened(popup) => {
                log::debug!("Popup opened: {}", popup.text().replace('\n', " | "))
            }
            other => log::trace!("{:?}", other),
        });

        Self {
            control_panel: ControlPanel::new(&config),
            map_view: MapView::new(config.projection_lat),
            load_rx: Some(DatasetLoader::spawn(config.source.clone())),
            is_loading: true,
            load_error: None,
            page,
            _event_log: event_log,
        }
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete(collection) => {
                        let count = collection.len();
                        match self.page.load_complete(collection) {
                            Ok(()) => self
                                .control_panel
                                .set_status(&format!("Loaded {} neighborhoods", count)),
                            Err(e) => self.fail_load(e.to_string()),
                        }
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.fail_load(error);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn fail_load(&mut self, error: String) {
        log::error!("Dataset unavailable: {}", error);
        self.control_panel.set_status(&format!("Error: {}", error));
        self.load_error = Some(error);
    }

    /// Log and swallow interaction errors; the selection is left unchanged.
    fn report(result: Result<(), PageError>) {
        if let Err(e) = result {
            log::error!("Interaction failed: {}", e);
        }
    }

    fn show_placeholder(&self, ui: &mut egui::Ui) {
        ui.centered_and_justified(|ui| match &self.load_error {
            Some(error) => {
                ui.label(
                    RichText::new(format!("Could not load the neighborhood dataset.\n\n{}", error))
                        .size(16.0)
                        .color(egui::Color32::from_rgb(220, 53, 69)),
                );
            }
            None => {
                ui.spinner();
            }
        });
    }

    fn show_ready(&mut self, ui: &mut egui::Ui) {
        let Some(ready) = self.page.ready() else {
            self.show_placeholder(ui);
            return;
        };

        let mut map_action = MapViewAction::None;
        let mut chart_width = self.page.chart_width();
        let settings = self.control_panel.settings.clone();
        let map_view = &mut self.map_view;

        ui.columns(2, |columns| {
            map_action = map_view.show(&mut columns[0], ready, &settings);

            egui::ScrollArea::vertical()
                .id_salt("chart_scroll")
                .auto_shrink([false, false])
                .show(&mut columns[1], |ui| {
                    chart_width = f64::from(ui.available_width());
                    let name = ready
                        .collection()
                        .get(ready.chart().feature_index)
                        .map(|f| f.name.as_str())
                        .unwrap_or_default();
                    ChartViewer::show(ui, name, ready.chart());
                });
        });

        match map_action {
            MapViewAction::ClickedAt(point) => {
                Self::report(self.page.click_at(point).map(|_| ()));
            }
            MapViewAction::ClosePopup => self.page.close_popup(),
            MapViewAction::None => {}
        }
        Self::report(self.page.set_chart_width(chart_width));
    }
}

impl eframe::App for NycLaborMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let dropdown = self.page.ready().map(|r| r.dropdown());
                    let action = self.control_panel.show(ui, dropdown);

                    match action {
                        ControlPanelAction::NeighborhoodChanged(index) => {
                            Self::report(self.page.change_dropdown(index));
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Map and Chart
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.page.ready().is_some() {
                self.show_ready(ui);
            } else {
                self.show_placeholder(ui);
            }
        });
    }
}
