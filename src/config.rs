//! Application configuration: dataset source and window/view defaults.

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DATASET: &str = "data/sample_neighborhoods.geojson";

/// NYC neighborhood unemployment map with a labor-force chart.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// GeoJSON dataset to show, a file path or an http(s) URL.
    #[arg(default_value = DEFAULT_DATASET)]
    pub source: String,
}

/// Where the feature collection is read from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` sources are fetched, anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: DataSource,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Latitude the map projection is scaled for.
    pub projection_lat: f64,
    pub basemap_label: String,
    pub overlay_label: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: DataSource::parse(DEFAULT_DATASET),
            window_size: [1400.0, 800.0],
            min_window_size: [1000.0, 600.0],
            projection_lat: 40.65,
            basemap_label: "Light Basemap".to_string(),
            overlay_label: "Unemployment Rate".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, with the dataset source taken from the command line.
    pub fn from_args(args: Args) -> Self {
        Self {
            source: DataSource::parse(&args.source),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            DataSource::parse("https://example.org/nyc.geojson"),
            DataSource::Url("https://example.org/nyc.geojson".to_string())
        );
        assert_eq!(
            DataSource::parse("data/nyc.geojson"),
            DataSource::Path(PathBuf::from("data/nyc.geojson"))
        );
    }

    #[test]
    fn test_from_args() {
        let args = Args::try_parse_from(["nyc_labor_map"]).unwrap();
        let config = AppConfig::from_args(args);
        assert_eq!(config.source, DataSource::parse(DEFAULT_DATASET));

        let args = Args::try_parse_from(["nyc_labor_map", "other.geojson"]).unwrap();
        let config = AppConfig::from_args(args);
        assert_eq!(config.source, DataSource::Path(PathBuf::from("other.geojson")));

        let args = Args::try_parse_from(["nyc_labor_map", "https://example.org/nyc.geojson"]).unwrap();
        assert_eq!(
            AppConfig::from_args(args).source,
            DataSource::Url("https://example.org/nyc.geojson".to_string())
        );
    }

    #[test]
    fn test_extra_arguments_are_rejected() {
        assert!(Args::try_parse_from(["nyc_labor_map", "a.geojson", "b.geojson"]).is_err());
    }
}
