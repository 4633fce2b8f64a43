//! Interaction module - Shared selection between map, dropdown and chart

mod events;
mod page;
mod selection;

pub use events::Subscription;
pub use page::{Page, PageError, PageEvent, ReadyState};
pub use selection::DropdownWidget;
