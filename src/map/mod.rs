//! Map module - Choropleth styling and polygon layer

pub mod color_scale;
mod presenter;

pub use presenter::{LayerId, MapError, MapPresenter, Popup, RenderedLayer};
