//! Neighborhood Feature Model
//! Converts GeoJSON features into typed neighborhood records.

use geo::{BoundingRect, Contains, MultiPolygon, Point};
use geojson::JsonObject;
use thiserror::Error;

/// GeoJSON property keys used by the dataset.
pub const NAME_KEY: &str = "NYC_NEIG";
pub const POPULATION_KEY: &str = "Pop";
pub const UNEMPLOYMENT_RATE_KEY: &str = "UnempRate";
pub const ARMED_FORCES_KEY: &str = "Armed_Forc";
pub const EMPLOYED_KEY: &str = "Employed";
pub const UNEMPLOYED_KEY: &str = "Unemployed";
pub const NOT_IN_LABOR_KEY: &str = "NotInLabor";

#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("Feature {index}: unsupported geometry type '{kind}'")]
    UnsupportedGeometry { index: usize, kind: String },
    #[error("Feature {index}: invalid geometry: {source}")]
    InvalidGeometry {
        index: usize,
        #[source]
        source: geojson::Error,
    },
}

/// Labor-force breakdown of one neighborhood.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaborForce {
    pub armed_forces: f64,
    pub employed: f64,
    pub unemployed: f64,
    pub not_in_labor_force: f64,
}

/// One neighborhood record. Identity is its position in the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub population: f64,
    /// Fraction in [0, 1].
    pub unemployment_rate: f64,
    pub labor: LaborForce,
    pub geometry: MultiPolygon<f64>,
}

impl Feature {
    /// Build a feature from a GeoJSON feature at position `index`.
    ///
    /// Missing or non-numeric numeric properties become 0, a missing name
    /// becomes the empty string and a missing geometry an empty polygon set.
    pub fn from_geojson(index: usize, feature: geojson::Feature) -> Result<Self, FeatureError> {
        let props = feature.properties.unwrap_or_default();

        let name = match props.get(NAME_KEY).and_then(|v| v.as_str()) {
            Some(name) => name.to_string(),
            None => {
                log::warn!("Feature {}: missing '{}', using empty name", index, NAME_KEY);
                String::new()
            }
        };

        let number = |key: &str| numeric_property(&props, key, index, &name);

        let geometry = match feature.geometry {
            Some(geometry) => to_multi_polygon(index, geometry.value)?,
            None => {
                log::warn!("Feature {} ({}): no geometry", index, name);
                MultiPolygon(Vec::new())
            }
        };

        Ok(Self {
            population: number(POPULATION_KEY),
            unemployment_rate: number(UNEMPLOYMENT_RATE_KEY),
            labor: LaborForce {
                armed_forces: number(ARMED_FORCES_KEY),
                employed: number(EMPLOYED_KEY),
                unemployed: number(UNEMPLOYED_KEY),
                not_in_labor_force: number(NOT_IN_LABOR_KEY),
            },
            name,
            geometry,
        })
    }

    /// Unemployment rate as a percentage (rate x 100).
    pub fn unemployment_pct(&self) -> f64 {
        self.unemployment_rate * 100.0
    }

    /// Center of the bounding rectangle, `None` for an empty geometry.
    pub fn center(&self) -> Option<Point<f64>> {
        self.geometry.bounding_rect().map(|rect| rect.center().into())
    }

    pub fn contains(&self, point: &Point<f64>) -> bool {
        self.geometry.contains(point)
    }
}

fn numeric_property(props: &JsonObject, key: &str, index: usize, name: &str) -> f64 {
    match props.get(key).and_then(|v| v.as_f64()) {
        Some(value) if value.is_finite() => value,
        _ => {
            log::warn!("Feature {} ({}): missing numeric '{}', using 0", index, name, key);
            0.0
        }
    }
}

fn to_multi_polygon(index: usize, value: geojson::Value) -> Result<MultiPolygon<f64>, FeatureError> {
    let geometry: geo::Geometry<f64> = value
        .try_into()
        .map_err(|source| FeatureError::InvalidGeometry { index, source })?;

    match geometry {
        geo::Geometry::Polygon(polygon) => Ok(MultiPolygon(vec![polygon])),
        geo::Geometry::MultiPolygon(multi) => Ok(multi),
        other => Err(FeatureError::UnsupportedGeometry {
            index,
            kind: geometry_kind(&other).to_string(),
        }),
    }
}

fn geometry_kind(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::Line(_) => "Line",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::Polygon(_) => "Polygon",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        geo::Geometry::Rect(_) => "Rect",
        geo::Geometry::Triangle(_) => "Triangle",
    }
}

/// Ordered, immutable set of neighborhoods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    #[cfg(test)]
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Parse a GeoJSON FeatureCollection, keeping the document order.
    pub fn from_geojson(collection: geojson::FeatureCollection) -> Result<Self, FeatureError> {
        let features = collection
            .features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| Feature::from_geojson(index, feature))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Index of the first feature whose geometry contains `point`.
    pub fn feature_at(&self, point: &Point<f64>) -> Option<usize> {
        self.features.iter().position(|f| f.contains(point))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Square neighborhood polygon at (`x`, `y`) with side 1.
    pub(crate) fn square_feature_json(name: &str, x: f64, y: f64, rate: f64) -> String {
        format!(
            r#"{{
                "type": "Feature",
                "properties": {{
                    "NYC_NEIG": "{name}", "Pop": 1000, "UnempRate": {rate},
                    "Armed_Forc": 1, "Employed": 600, "Unemployed": 50, "NotInLabor": 300
                }},
                "geometry": {{
                    "type": "Polygon",
                    "coordinates": [[[{x0}, {y0}], [{x1}, {y0}], [{x1}, {y1}], [{x0}, {y1}], [{x0}, {y0}]]]
                }}
            }}"#,
            name = name,
            rate = rate,
            x0 = x,
            y0 = y,
            x1 = x + 1.0,
            y1 = y + 1.0,
        )
    }

    pub(crate) fn collection_json(features: &[String]) -> String {
        format!(
            r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
            features.join(",")
        )
    }

    pub(crate) fn sample_collection() -> FeatureCollection {
        let json = collection_json(&[
            square_feature_json("Astoria", 0.0, 0.0, 0.072),
            square_feature_json("Bushwick", 2.0, 0.0, 0.11),
            square_feature_json("Chelsea", 4.0, 0.0, 0.0),
        ]);
        parse(&json)
    }

    fn parse(json: &str) -> FeatureCollection {
        let fc: geojson::FeatureCollection = json.parse().unwrap();
        FeatureCollection::from_geojson(fc).unwrap()
    }

    #[test]
    fn test_parse_keeps_document_order_and_fields() {
        let collection = sample_collection();
        let names: Vec<&str> = collection.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Astoria", "Bushwick", "Chelsea"]);

        let astoria = collection.get(0).unwrap();
        assert_eq!(astoria.population, 1000.0);
        assert_abs_diff_eq!(astoria.unemployment_pct(), 7.2, epsilon = 1e-9);
        assert_eq!(
            astoria.labor,
            LaborForce {
                armed_forces: 1.0,
                employed: 600.0,
                unemployed: 50.0,
                not_in_labor_force: 300.0,
            }
        );
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let json = collection_json(&[r#"{
            "type": "Feature",
            "properties": {"NYC_NEIG": "Nowhere", "Pop": "n/a"},
            "geometry": null
        }"#
        .to_string()]);
        let collection = parse(&json);
        let feature = collection.get(0).unwrap();

        assert_eq!(feature.name, "Nowhere");
        assert_eq!(feature.population, 0.0);
        assert_eq!(feature.unemployment_rate, 0.0);
        assert_eq!(feature.labor, LaborForce::default());
        assert!(feature.geometry.0.is_empty());
        assert!(feature.center().is_none());
    }

    #[test]
    fn test_missing_name_defaults_to_empty() {
        let json = collection_json(&[r#"{
            "type": "Feature",
            "properties": {"Pop": 1200, "UnempRate": 0.05},
            "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}
        }"#
        .to_string()]);
        let collection = parse(&json);
        let feature = collection.get(0).unwrap();

        assert_eq!(feature.name, "");
        assert_eq!(feature.population, 1200.0);
        assert_eq!(feature.unemployment_rate, 0.05);
        assert!(!feature.geometry.0.is_empty());
    }

    #[test]
    fn test_missing_properties_object() {
        let json = collection_json(&[r#"{
            "type": "Feature",
            "properties": null,
            "geometry": null
        }"#
        .to_string()]);
        let feature = parse(&json).get(0).cloned().unwrap();

        assert_eq!(feature.name, "");
        assert_eq!(feature.population, 0.0);
        assert_eq!(feature.labor, LaborForce::default());
    }

    #[test]
    fn test_non_polygon_geometry_is_rejected() {
        let json = collection_json(&[r#"{
            "type": "Feature",
            "properties": {"NYC_NEIG": "Pin"},
            "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
        }"#
        .to_string()]);
        let fc: geojson::FeatureCollection = json.parse().unwrap();
        let err = FeatureCollection::from_geojson(fc).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::UnsupportedGeometry { index: 0, ref kind } if kind == "Point"
        ));
    }

    #[test]
    fn test_center_is_bounding_box_center() {
        let collection = sample_collection();
        let center = collection.get(1).unwrap().center().unwrap();
        assert_abs_diff_eq!(center.x(), 2.5);
        assert_abs_diff_eq!(center.y(), 0.5);
    }

    #[test]
    fn test_feature_at_hit_tests_polygons() {
        let collection = sample_collection();
        assert_eq!(collection.feature_at(&Point::new(0.5, 0.5)), Some(0));
        assert_eq!(collection.feature_at(&Point::new(4.2, 0.9)), Some(2));
        assert_eq!(collection.feature_at(&Point::new(1.5, 0.5)), None);
    }
}
