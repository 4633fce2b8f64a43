//! GeoJSON Dataset Loader Module
//! Fetches the neighborhood feature collection from disk or over HTTP.

use crate::config::DataSource;
use crate::data::feature::{FeatureCollection, FeatureError};
use geojson::GeoJson;
use std::fs;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("Dataset is not a FeatureCollection")]
    NotFeatureCollection,
    #[error(transparent)]
    Geometry(#[from] FeatureError),
    #[error("Dataset contains no features")]
    Empty,
}

/// Dataset loading result from background thread
pub enum LoadResult {
    Progress(String),
    Complete(Arc<FeatureCollection>),
    Error(String),
}

/// Single-attempt loader for the neighborhood dataset.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load and parse the dataset, blocking the calling thread.
    pub fn load(source: &DataSource) -> Result<FeatureCollection, LoaderError> {
        let text = match source {
            DataSource::Path(path) => fs::read_to_string(path)?,
            DataSource::Url(url) => reqwest::blocking::get(url.as_str())?
                .error_for_status()?
                .text()?,
        };
        Self::parse(&text)
    }

    /// Parse GeoJSON text into a non-empty collection.
    pub fn parse(text: &str) -> Result<FeatureCollection, LoaderError> {
        let GeoJson::FeatureCollection(fc) = text.parse::<GeoJson>()? else {
            return Err(LoaderError::NotFeatureCollection);
        };

        let collection = FeatureCollection::from_geojson(fc)?;
        if collection.is_empty() {
            return Err(LoaderError::Empty);
        }
        Ok(collection)
    }

    /// Start loading on a background thread. The receiver yields progress
    /// messages followed by exactly one `Complete` or `Error`.
    pub fn spawn(source: DataSource) -> Receiver<LoadResult> {
        let (tx, rx) = channel();

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!("Loading {}...", source)));
            log::info!("Loading dataset from {}", source);

            match Self::load(&source) {
                Ok(collection) => {
                    log::info!("Loaded {} neighborhoods from {}", collection.len(), source);
                    let _ = tx.send(LoadResult::Complete(Arc::new(collection)));
                }
                Err(e) => {
                    log::error!("Failed to load dataset from {}: {}", source, e);
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DATASET;
    use crate::data::feature::tests::{collection_json, square_feature_json};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_dataset(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_path() {
        let file = write_dataset(&collection_json(&[
            square_feature_json("Astoria", 0.0, 0.0, 0.072),
            square_feature_json("Bushwick", 2.0, 0.0, 0.11),
        ]));

        let collection = DatasetLoader::load(&DataSource::Path(file.path().to_path_buf())).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(1).unwrap().name, "Bushwick");
    }

    #[test]
    fn test_load_default_dataset() {
        let DataSource::Path(relative) = DataSource::parse(DEFAULT_DATASET) else {
            panic!("default dataset should be a file path");
        };
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(relative);
        let collection = DatasetLoader::load(&DataSource::Path(path)).unwrap();

        assert_eq!(collection.len(), 6);
        let astoria = collection.get(0).unwrap();
        assert_eq!(astoria.name, "Astoria");
        assert_eq!(astoria.labor.unemployed, 2900.0);
        assert!(collection.iter().all(|f| !f.geometry.0.is_empty()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = DataSource::Path("does/not/exist.geojson".into());
        assert!(matches!(DatasetLoader::load(&source), Err(LoaderError::Io(_))));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            DatasetLoader::parse("{ not json"),
            Err(LoaderError::GeoJson(_))
        ));
        assert!(matches!(
            DatasetLoader::parse(r#"{"type": "Point", "coordinates": [0, 0]}"#),
            Err(LoaderError::NotFeatureCollection)
        ));
        assert!(matches!(
            DatasetLoader::parse(&collection_json(&[])),
            Err(LoaderError::Empty)
        ));
    }

    #[test]
    fn test_spawn_reports_completion() {
        let file = write_dataset(&collection_json(&[square_feature_json(
            "Astoria", 0.0, 0.0, 0.072,
        )]));
        let rx = DatasetLoader::spawn(DataSource::Path(file.path().to_path_buf()));

        let mut loaded = None;
        while let Ok(result) = rx.recv_timeout(Duration::from_secs(5)) {
            match result {
                LoadResult::Progress(_) => continue,
                LoadResult::Complete(collection) => {
                    loaded = Some(collection);
                    break;
                }
                LoadResult::Error(e) => panic!("unexpected load error: {}", e),
            }
        }
        assert_eq!(loaded.unwrap().len(), 1);
    }

    #[test]
    fn test_spawn_reports_failure() {
        let rx = DatasetLoader::spawn(DataSource::Path("does/not/exist.geojson".into()));
        let last = rx.iter().last();
        assert!(matches!(last, Some(LoadResult::Error(msg)) if msg.starts_with("Failed to read")));
    }
}
