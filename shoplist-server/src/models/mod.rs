//! Domain models with validation at construction
//!
//! User input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod item;
pub mod list;
pub mod view;

pub use validation::ValidationError;
pub use item::{Item, ItemId, ItemName};
pub use list::ShoppingList;
pub use view::{ItemView, ListView};
