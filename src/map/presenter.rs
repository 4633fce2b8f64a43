//! Map Presenter Module
//! Turns the feature collection into styled, addressable polygons and
//! builds the popup shown when a polygon is clicked.

use crate::data::{Feature, FeatureCollection};
use crate::format;
use crate::map::color_scale::PolygonStyle;
use geo::Point;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

const LAYER_ID_PREFIX: &str = "mapLayerID";

#[derive(Error, Debug, PartialEq)]
pub enum MapError {
    #[error("No rendered polygon with id '{0}'")]
    UnknownLayer(LayerId),
}

/// Positional identifier of a rendered polygon (`mapLayerID<index>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(String);

impl LayerId {
    pub fn for_index(index: usize) -> Self {
        Self(format!("{}{}", LAYER_ID_PREFIX, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPolygon {
    pub id: LayerId,
    pub feature_index: usize,
    pub style: PolygonStyle,
}

/// Popup opened by a polygon click.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub feature_index: usize,
    /// Anchor in lon/lat, `None` when the feature has no geometry.
    pub anchor: Option<Point<f64>>,
    pub title: String,
    pub population: String,
    pub unemployment_rate: String,
}

impl Popup {
    pub fn for_feature(feature_index: usize, feature: &Feature) -> Self {
        Self {
            feature_index,
            anchor: feature.center(),
            title: feature.name.clone(),
            population: format::population(feature.population),
            unemployment_rate: format::rate_percent(feature.unemployment_rate),
        }
    }

    /// Body lines below the title.
    pub fn lines(&self) -> [(&'static str, &str); 2] {
        [
            ("Total Population:", self.population.as_str()),
            ("Unemployment Rate:", self.unemployment_rate.as_str()),
        ]
    }

    /// Plain-text rendering of the whole popup.
    pub fn text(&self) -> String {
        let mut text = self.title.clone();
        for (label, value) in self.lines() {
            text.push('\n');
            text.push_str(label);
            text.push(' ');
            text.push_str(value);
        }
        text
    }
}

/// Outcome of firing a click on a polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    pub feature_index: usize,
    pub popup: Popup,
}

/// The polygon overlay: one polygon per feature, in collection order.
#[derive(Debug, Clone, Default)]
pub struct RenderedLayer {
    polygons: Vec<RenderedPolygon>,
    by_id: HashMap<LayerId, usize>,
}

impl RenderedLayer {
    pub fn polygons(&self) -> &[RenderedPolygon] {
        &self.polygons
    }

    pub fn get(&self, id: &LayerId) -> Option<&RenderedPolygon> {
        self.by_id.get(id).map(|&i| &self.polygons[i])
    }

    /// Run the click behavior of polygon `id`: resolve its feature and
    /// build the popup anchored at the feature's center.
    pub fn fire_click(
        &self,
        id: &LayerId,
        collection: &FeatureCollection,
    ) -> Result<ClickOutcome, MapError> {
        let polygon = self
            .get(id)
            .ok_or_else(|| MapError::UnknownLayer(id.clone()))?;
        let feature = collection
            .get(polygon.feature_index)
            .ok_or_else(|| MapError::UnknownLayer(id.clone()))?;

        Ok(ClickOutcome {
            feature_index: polygon.feature_index,
            popup: Popup::for_feature(polygon.feature_index, feature),
        })
    }
}

/// Builds the polygon overlay for a feature collection.
pub struct MapPresenter;

impl MapPresenter {
    pub fn render(collection: &FeatureCollection) -> RenderedLayer {
        let polygons: Vec<RenderedPolygon> = collection
            .iter()
            .enumerate()
            .map(|(index, feature)| RenderedPolygon {
                id: LayerId::for_index(index),
                feature_index: index,
                style: PolygonStyle::for_percentage(feature.unemployment_pct()),
            })
            .collect();

        let by_id = polygons
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        RenderedLayer { polygons, by_id }
    }
}
