//! Page State
//! Owns the Unloaded/Ready state, the current selection, and keeps the map
//! popup, dropdown and chart pointing at the same feature.

use crate::charts::{ChartPresenter, PieChart};
use crate::data::FeatureCollection;
use crate::interaction::events::{Dispatcher, Subscription};
use crate::interaction::selection::{DropdownWidget, SelectionController, SelectionError};
use crate::map::{LayerId, MapError, MapPresenter, Popup, RenderedLayer};
use geo::Point;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PageError {
    #[error("Dataset not loaded yet")]
    NotLoaded,
    #[error("Dataset already loaded")]
    AlreadyLoaded,
    #[error("Dataset contains no features")]
    EmptyDataset,
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Notifications emitted as the page changes.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Ready { feature_count: usize },
    SelectionChanged { index: usize },
    PopupOpened(Popup),
    PopupClosed,
    ChartDrawn(PieChart),
}

/// Everything that exists once the dataset is loaded.
pub struct ReadyState {
    collection: Arc<FeatureCollection>,
    layer: RenderedLayer,
    dropdown: DropdownWidget,
    selection: usize,
    popup: Option<Popup>,
    chart: PieChart,
}

impl ReadyState {
    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    pub fn layer(&self) -> &RenderedLayer {
        &self.layer
    }

    pub fn dropdown(&self) -> &DropdownWidget {
        &self.dropdown
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn chart(&self) -> &PieChart {
        &self.chart
    }

    fn select(&mut self, index: usize, events: &Dispatcher<PageEvent>) {
        if self.selection != index {
            log::debug!("Selection {} -> {}", self.selection, index);
            self.selection = index;
            self.dropdown.set_selected_index(index);
            events.emit(&PageEvent::SelectionChanged { index });
        }
    }

    /// Polygon click behavior: open the popup, then redraw the chart.
    fn fire_click(
        &mut self,
        id: &LayerId,
        events: &Dispatcher<PageEvent>,
        chart_width: f64,
    ) -> Result<(), PageError> {
        let outcome = self.layer.fire_click(id, &self.collection)?;
        self.select(outcome.feature_index, events);

        log::debug!("Popup for {}: {}", id, outcome.popup.title);
        self.popup = Some(outcome.popup.clone());
        events.emit(&PageEvent::PopupOpened(outcome.popup));

        self.draw_chart(outcome.feature_index, events, chart_width)
    }

    fn draw_chart(
        &mut self,
        index: usize,
        events: &Dispatcher<PageEvent>,
        chart_width: f64,
    ) -> Result<(), PageError> {
        let feature = self.collection.get(index).ok_or(SelectionError::OutOfRange {
            index,
            len: self.collection.len(),
        })?;

        self.chart = ChartPresenter::draw(index, feature, chart_width);
        log::debug!("Drew chart for {} ({})", feature.name, index);
        events.emit(&PageEvent::ChartDrawn(self.chart.clone()));
        Ok(())
    }
}

enum PageState {
    Unloaded,
    Ready(ReadyState),
}

/// The interaction core behind the window.
pub struct Page {
    state: PageState,
    chart_width: f64,
    events: Dispatcher<PageEvent>,
}

impl Page {
    pub fn new(chart_width: f64) -> Self {
        Self {
            state: PageState::Unloaded,
            chart_width,
            events: Dispatcher::new(),
        }
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&PageEvent) + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn ready(&self) -> Option<&ReadyState> {
        match &self.state {
            PageState::Ready(ready) => Some(ready),
            PageState::Unloaded => None,
        }
    }

    /// Current selection, `None` while unloaded.
    pub fn selection(&self) -> Option<usize> {
        self.ready().map(|r| r.selection)
    }

    pub fn chart_width(&self) -> f64 {
        self.chart_width
    }

    /// Unloaded -> Ready. Renders the map layer, builds the dropdown and
    /// draws the first feature's chart.
    pub fn load_complete(&mut self, collection: Arc<FeatureCollection>) -> Result<(), PageError> {
        if matches!(self.state, PageState::Ready(_)) {
            return Err(PageError::AlreadyLoaded);
        }
        let Some(first) = collection.get(0) else {
            return Err(PageError::EmptyDataset);
        };

        let chart = ChartPresenter::draw(0, first, self.chart_width);
        let layer = MapPresenter::render(&collection);
        let dropdown = SelectionController::build_dropdown(&collection);
        let feature_count = collection.len();

        self.state = PageState::Ready(ReadyState {
            collection,
            layer,
            dropdown,
            selection: 0,
            popup: None,
            chart: chart.clone(),
        });

        log::info!("Page ready with {} neighborhoods", feature_count);
        self.events.emit(&PageEvent::Ready { feature_count });
        self.events.emit(&PageEvent::ChartDrawn(chart));
        Ok(())
    }

    /// A click on polygon `id`.
    pub fn click_polygon(&mut self, id: &LayerId) -> Result<(), PageError> {
        let PageState::Ready(ready) = &mut self.state else {
            return Err(PageError::NotLoaded);
        };
        ready.fire_click(id, &self.events, self.chart_width)
    }

    /// A click at map coordinate `point` (lon/lat). Returns whether a
    /// polygon was hit.
    pub fn click_at(&mut self, point: Point<f64>) -> Result<bool, PageError> {
        let index = match &self.state {
            PageState::Ready(ready) => ready.collection.feature_at(&point),
            PageState::Unloaded => return Err(PageError::NotLoaded),
        };
        match index {
            Some(index) => self.click_polygon(&LayerId::for_index(index)).map(|_| true),
            None => Ok(false),
        }
    }

    /// A dropdown change to option `index`: fire the matching polygon's
    /// click, then redraw the chart for that index.
    pub fn change_dropdown(&mut self, index: usize) -> Result<(), PageError> {
        let PageState::Ready(ready) = &mut self.state else {
            return Err(PageError::NotLoaded);
        };
        let layer_id = SelectionController::resolve_change(&ready.dropdown, &ready.layer, index)?;

        ready.fire_click(&layer_id, &self.events, self.chart_width)?;
        ready.draw_chart(index, &self.events, self.chart_width)
    }

    pub fn close_popup(&mut self) {
        if let PageState::Ready(ready) = &mut self.state {
            if ready.popup.take().is_some() {
                self.events.emit(&PageEvent::PopupClosed);
            }
        }
    }

    /// Record the chart container width; redraws the current chart when it changed.
    pub fn set_chart_width(&mut self, width: f64) -> Result<(), PageError> {
        if (width - self.chart_width).abs() < 0.5 {
            return Ok(());
        }
        self.chart_width = width;

        match &mut self.state {
            PageState::Ready(ready) => {
                let index = ready.selection;
                ready.draw_chart(index, &self.events, width)
            }
            PageState::Unloaded => Ok(()),
        }
    }
}
