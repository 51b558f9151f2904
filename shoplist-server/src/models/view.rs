//! Render projections
//!
//! Flattened copies of the domain records carrying what the HTML views need,
//! including the owning list's uuid so an item fragment can build its own
//! action URLs.

use super::Item;

/// One item as rendered in a list page or fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub list_uuid: String,
    pub id: u32,
    pub name: String,
    pub completed: bool,
}

impl ItemView {
    pub fn new(list_uuid: &str, item: &Item) -> Self {
        Self {
            list_uuid: list_uuid.to_owned(),
            id: item.uuid.get(),
            name: item.name.clone(),
            completed: item.completed,
        }
    }
}

/// A whole list as rendered on its page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub uuid: String,
    pub items: Vec<ItemView>,
}
