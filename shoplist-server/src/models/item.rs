//! Shopping list items
//!
//! An item is addressed by a 32-bit id that is unique within its list.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::ValidationError;

/// Maximum length for item names, counted in characters
const MAX_ITEM_NAME_LEN: usize = 200;

/// Public identifier of an item, unique within its owning list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Draw a random id from the first four bytes of a fresh v4 UUID.
    pub fn random() -> Self {
        let bytes = Uuid::new_v4().into_bytes();
        Self(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Draw random ids until one is not taken.
    ///
    /// `taken` is consulted for every candidate, so the result is unique
    /// among whatever ids the caller already holds.
    pub fn fresh(mut taken: impl FnMut(ItemId) -> bool) -> Self {
        loop {
            let candidate = Self::random();
            if !taken(candidate) {
                return candidate;
            }
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Widened form used for the BIGINT column.
    pub const fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "item id" });
        }

        s.parse::<u32>().map(Self).map_err(|_| ValidationError::InvalidFormat {
            field: "item id",
            reason: "must be an unsigned 32-bit integer",
        })
    }
}

impl TryFrom<i64> for ItemId {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "item id",
                reason: "out of range for an unsigned 32-bit integer",
            })
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated item name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    /// Create a new item name.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - Must not be empty after trimming
    /// - Max 200 characters
    ///
    /// # Example
    /// ```
    /// use shoplist_server::models::ItemName;
    ///
    /// assert_eq!(ItemName::new("  milk ").unwrap().as_str(), "milk");
    /// assert!(ItemName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "item name" });
        }

        if trimmed.chars().count() > MAX_ITEM_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "item name",
                max: MAX_ITEM_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single entry on a shopping list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Row id, only set by the relational store
    pub id: Option<i64>,
    pub uuid: ItemId,
    pub name: String,
    pub completed: bool,
}

impl Item {
    /// New, not yet completed item.
    pub fn new(uuid: ItemId, name: ItemName) -> Self {
        Self {
            id: None,
            uuid,
            name: name.into_string(),
            completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parses_numeric_ids() {
        assert_eq!("42".parse::<ItemId>().unwrap(), ItemId::new(42));
        assert_eq!(
            "4294967295".parse::<ItemId>().unwrap(),
            ItemId::new(u32::MAX)
        );
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["abc", "-1", "4294967296", "1.5", " 7"] {
            let err = raw.parse::<ItemId>().unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { .. }),
                "{raw} should be rejected"
            );
        }
        assert!(matches!(
            "".parse::<ItemId>().unwrap_err(),
            ValidationError::Empty { .. }
        ));
    }

    #[test]
    fn bigint_conversion_checks_range() {
        assert_eq!(ItemId::try_from(7_i64).unwrap(), ItemId::new(7));
        assert!(ItemId::try_from(-1_i64).is_err());
        assert!(ItemId::try_from(i64::from(u32::MAX) + 1).is_err());
        assert_eq!(ItemId::new(u32::MAX).as_i64(), 4_294_967_295);
    }

    #[test]
    fn fresh_skips_taken_ids() {
        let mut rejected = 0;
        ItemId::fresh(|_| {
            rejected += 1;
            rejected <= 3
        });
        assert_eq!(rejected, 4);
    }

    #[test]
    fn fresh_ids_are_unique_within_a_set() {
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            let id = ItemId::fresh(|candidate| seen.contains(&candidate));
            assert!(seen.insert(id));
        }
    }

    #[test]
    fn item_name_trims_and_validates() {
        assert_eq!(ItemName::new(" eggs\n").unwrap().as_str(), "eggs");
        assert!(matches!(
            ItemName::new("").unwrap_err(),
            ValidationError::Empty { .. }
        ));

        let max = "ø".repeat(200);
        assert!(ItemName::new(&max).is_ok());

        let too_long = "a".repeat(201);
        assert!(matches!(
            ItemName::new(&too_long).unwrap_err(),
            ValidationError::TooLong { max: 200, .. }
        ));
    }

    #[test]
    fn new_items_start_incomplete() {
        let item = Item::new(ItemId::new(1), ItemName::new("milk").unwrap());
        assert!(!item.completed);
        assert_eq!(item.id, None);
        assert_eq!(item.name, "milk");
    }
}
