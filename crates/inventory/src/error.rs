//! Inventory error model.
//!
//! The `Display` text of each variant is the exact message shown to the user.

use thiserror::Error;

use stockroom_core::DomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Please fill in 'Item Name' and 'Location'.")]
    MissingRequiredField,

    #[error("Quantity must be an integer.")]
    QuantityNotInteger,

    #[error("Quantity must be an integer greater than zero.")]
    QuantityNotPositive,

    /// A delete selection did not resolve to a row of the current inventory.
    #[error("Invalid item index.")]
    InvalidIndex,
}

impl From<InventoryError> for DomainError {
    fn from(value: InventoryError) -> Self {
        match value {
            InventoryError::InvalidIndex => DomainError::not_found(value.to_string()),
            other => DomainError::validation(other.to_string()),
        }
    }
}
