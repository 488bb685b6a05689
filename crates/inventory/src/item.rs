use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, ItemId};

use crate::error::InventoryError;

/// Number of units on hand. Always at least 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Parse raw user input.
    ///
    /// Anything that is not a base-10 integer (including values outside the
    /// `u32` range) is `QuantityNotInteger`; integers `<= 0` are
    /// `QuantityNotPositive`.
    pub fn parse(raw: &str) -> Result<Self, InventoryError> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| InventoryError::QuantityNotInteger)?;
        if value <= 0 {
            return Err(InventoryError::QuantityNotPositive);
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| InventoryError::QuantityNotInteger)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = InventoryError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(InventoryError::QuantityNotPositive);
        }
        Ok(Self(value))
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Unvalidated add-item input, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub quantity: String,
    pub location: String,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            location: location.into(),
        }
    }
}

/// A stored inventory record.
///
/// Only constructible through [`Item::create`], so a stored item always has a
/// non-empty name and location and a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: ItemId,
    name: String,
    quantity: Quantity,
    location: String,
    added_at: DateTime<Utc>,
}

impl Item {
    /// Validate `input` and build the record.
    ///
    /// Required text fields are checked before the quantity, so a form with
    /// both problems reports the missing field.
    pub fn create(
        id: ItemId,
        input: &NewItem,
        added_at: DateTime<Utc>,
    ) -> Result<Self, InventoryError> {
        let name = input.name.trim();
        let location = input.location.trim();
        if name.is_empty() || location.is_empty() {
            return Err(InventoryError::MissingRequiredField);
        }
        let quantity = Quantity::parse(&input.quantity)?;

        Ok(Self {
            id,
            name: name.to_string(),
            quantity,
            location: location.to_string(),
            added_at,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn create_item_trims_text_fields() {
        let input = NewItem::new("  Desk lamp ", " 3 ", " D-02  ");
        let item = Item::create(ItemId::new(), &input, test_time()).unwrap();
        assert_eq!(item.name(), "Desk lamp");
        assert_eq!(item.quantity().get(), 3);
        assert_eq!(item.location(), "D-02");
    }

    #[test]
    fn create_item_rejects_blank_name_or_location() {
        for input in [
            NewItem::new("", "1", "A-01"),
            NewItem::new("Chair", "1", "   "),
            NewItem::new(" ", "1", ""),
        ] {
            let err = Item::create(ItemId::new(), &input, test_time()).unwrap_err();
            assert_eq!(err, InventoryError::MissingRequiredField);
        }
    }

    #[test]
    fn missing_field_is_reported_before_bad_quantity() {
        let input = NewItem::new("", "abc", "A-01");
        let err = Item::create(ItemId::new(), &input, test_time()).unwrap_err();
        assert_eq!(err, InventoryError::MissingRequiredField);
    }

    #[test]
    fn quantity_rejects_non_integers() {
        for raw in ["", "abc", "2.5", "1e3", "4 units", "99999999999999999999", "4294967296"] {
            assert_eq!(
                Quantity::parse(raw),
                Err(InventoryError::QuantityNotInteger),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn quantity_rejects_zero_and_negatives() {
        for raw in ["0", "-1", "-250", " -7 "] {
            assert_eq!(
                Quantity::parse(raw),
                Err(InventoryError::QuantityNotPositive),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn quantity_accepts_positive_integers() {
        assert_eq!(Quantity::parse("1").unwrap().get(), 1);
        assert_eq!(Quantity::parse(" 42\n").unwrap().get(), 42);
        assert_eq!(Quantity::parse("4294967295").unwrap().get(), u32::MAX);
        assert!(Quantity::try_from(0).is_err());
    }

    #[test]
    fn error_messages_match_user_facing_text() {
        assert_eq!(
            InventoryError::QuantityNotPositive.to_string(),
            "Quantity must be an integer greater than zero."
        );
        assert_eq!(
            InventoryError::QuantityNotInteger.to_string(),
            "Quantity must be an integer."
        );
        assert_eq!(InventoryError::InvalidIndex.to_string(), "Invalid item index.");
        assert_eq!(
            InventoryError::MissingRequiredField.to_string(),
            "Please fill in 'Item Name' and 'Location'."
        );
    }

    #[test]
    fn item_serializes_quantity_as_number() {
        let item = Item::create(ItemId::new(), &NewItem::new("Cable", "8", "E-1"), test_time())
            .unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["quantity"], 8);
        assert_eq!(json["name"], "Cable");
        assert_eq!(json["id"], item.id_typed().to_string());
    }
}
