//! Selection Controller
//! Neighborhood dropdown model and the mapping from option index to polygon.

use crate::data::FeatureCollection;
use crate::map::{LayerId, RenderedLayer};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("Dropdown index {index} out of range ({len} options)")]
    OutOfRange { index: usize, len: usize },
    #[error("Dropdown index {index} has no rendered polygon '{layer_id}'")]
    IndexMismatch { index: usize, layer_id: LayerId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOption {
    pub index: usize,
    pub label: String,
}

/// One option per feature, in collection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropdownWidget {
    options: Vec<DropdownOption>,
    selected_index: usize,
}

impl DropdownWidget {
    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    #[cfg(test)]
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_label(&self) -> &str {
        self.options
            .get(self.selected_index)
            .map(|o| o.label.as_str())
            .unwrap_or_default()
    }

    pub(crate) fn set_selected_index(&mut self, index: usize) {
        self.selected_index = index;
    }
}

pub struct SelectionController;

impl SelectionController {
    pub fn build_dropdown(collection: &FeatureCollection) -> DropdownWidget {
        DropdownWidget {
            options: collection
                .iter()
                .enumerate()
                .map(|(index, feature)| DropdownOption {
                    index,
                    label: feature.name.clone(),
                })
                .collect(),
            selected_index: 0,
        }
    }

    /// Resolve the polygon a dropdown change at `index` must click.
    pub fn resolve_change(
        dropdown: &DropdownWidget,
        layer: &RenderedLayer,
        index: usize,
    ) -> Result<LayerId, SelectionError> {
        let len = dropdown.options().len();
        let option = dropdown
            .options()
            .get(index)
            .ok_or(SelectionError::OutOfRange { index, len })?;

        let layer_id = LayerId::for_index(option.index);
        match layer.get(&layer_id) {
            Some(polygon) if polygon.feature_index == option.index => Ok(layer_id),
            _ => Err(SelectionError::IndexMismatch { index, layer_id }),
        }
    }
}
