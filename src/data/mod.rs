//! Data module - GeoJSON loading and the neighborhood model

pub mod feature;
mod loader;

pub use feature::{Feature, FeatureCollection};
pub use loader::{DatasetLoader, LoadResult};
