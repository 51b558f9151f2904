//! Shopping list aggregate

use uuid::Uuid;

use super::{Item, ItemId, ItemView, ListView};

/// A shopping list and the items it owns, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    /// Row id, only set by the relational store
    pub id: Option<i64>,
    /// Public identifier, immutable after creation
    pub uuid: String,
    pub items: Vec<Item>,
}

impl ShoppingList {
    /// Fresh empty list with a random v4 UUID.
    pub fn new() -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4().to_string(),
            items: Vec::new(),
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.uuid == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.uuid == id)
    }

    pub fn contains_item(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }

    /// Item id not yet used in this list.
    pub fn next_item_id(&self) -> ItemId {
        ItemId::fresh(|candidate| self.contains_item(candidate))
    }

    /// Projection consumed by the page renderer.
    pub fn view(&self) -> ListView {
        ListView {
            uuid: self.uuid.clone(),
            items: self
                .items
                .iter()
                .map(|item| ItemView::new(&self.uuid, item))
                .collect(),
        }
    }
}

impl Default for ShoppingList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemName;

    fn item(raw: u32, name: &str) -> Item {
        Item::new(ItemId::new(raw), ItemName::new(name).unwrap())
    }

    #[test]
    fn new_lists_are_empty_and_distinct() {
        let a = ShoppingList::new();
        let b = ShoppingList::new();
        assert!(a.items.is_empty());
        assert_ne!(a.uuid, b.uuid);
        assert!(Uuid::parse_str(&a.uuid).is_ok());
    }

    #[test]
    fn finds_items_by_id() {
        let mut list = ShoppingList::new();
        list.items.push(item(1, "milk"));
        list.items.push(item(2, "bread"));

        assert_eq!(list.item(ItemId::new(2)).unwrap().name, "bread");
        assert!(list.item(ItemId::new(3)).is_none());

        list.item_mut(ItemId::new(1)).unwrap().completed = true;
        assert!(list.items[0].completed);
    }

    #[test]
    fn next_item_id_avoids_existing() {
        let mut list = ShoppingList::new();
        for _ in 0..100 {
            let id = list.next_item_id();
            assert!(!list.contains_item(id));
            list.items.push(Item::new(id, ItemName::new("x").unwrap()));
        }
        assert_eq!(list.items.len(), 100);
    }

    #[test]
    fn view_keeps_order_and_list_uuid() {
        let mut list = ShoppingList::new();
        list.items.push(item(5, "apples"));
        list.items.push(item(3, "pears"));

        let view = list.view();
        assert_eq!(view.uuid, list.uuid);
        let names: Vec<_> = view.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["apples", "pears"]);
        assert!(view.items.iter().all(|i| i.list_uuid == list.uuid));
    }
}
