//! The ordered item list and delete reconciliation.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use stockroom_core::{Entity, ItemId};

use crate::error::InventoryError;
use crate::item::{Item, NewItem};
use crate::notice::Notice;
use crate::seed::seed_items;

/// One row the user marked for deletion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based position in the inventory as it was rendered.
    Position(usize),
    Id(ItemId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedItem {
    /// Position the item held before the batch started.
    pub position: usize,
    pub item: Item,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub selection: Selection,
    pub error: InventoryError,
}

/// Outcome of one delete batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub removed: Vec<RemovedItem>,
    pub rejected: Vec<Rejection>,
}

impl DeleteReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.rejected.is_empty()
    }

    /// One error per rejected selection, then one warning per removed item.
    pub fn notices(&self) -> Vec<Notice> {
        self.rejected
            .iter()
            .map(|r| Notice::from(&r.error))
            .chain(self.removed.iter().map(|r| Notice::removed(r.item.name())))
            .collect()
    }
}

/// Insertion-ordered list of items owned by a single session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Inventory pre-filled with [`seed_items`].
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut inventory = Self::new();
        for input in seed_items() {
            if let Err(e) = inventory.add_with(ItemId::new(), &input, now) {
                tracing::warn!(name = %input.name, "seed item rejected: {e}");
            }
        }
        inventory
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| *item.id() == id)
    }

    /// Validate `input` and append it with a fresh id.
    pub fn add(&mut self, input: &NewItem) -> Result<&Item, InventoryError> {
        self.add_with(ItemId::new(), input, Utc::now())
    }

    /// Like [`Inventory::add`] with an explicit id and timestamp.
    pub fn add_with(
        &mut self,
        id: ItemId,
        input: &NewItem,
        added_at: DateTime<Utc>,
    ) -> Result<&Item, InventoryError> {
        let item = Item::create(id, input, added_at)?;
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Remove a single item by id, reporting the position it held.
    pub fn remove(&mut self, id: ItemId) -> Option<RemovedItem> {
        let position = self.position_of(id)?;
        let item = self.items.remove(position);
        Some(RemovedItem { position, item })
    }

    pub fn delete_positions(&mut self, positions: &[usize]) -> DeleteReport {
        let selections: Vec<Selection> = positions.iter().copied().map(Selection::Position).collect();
        self.delete(&selections)
    }

    pub fn delete_ids(&mut self, ids: &[ItemId]) -> DeleteReport {
        let selections: Vec<Selection> = ids.iter().copied().map(Selection::Id).collect();
        self.delete(&selections)
    }

    /// Apply a batch of delete selections.
    ///
    /// Every selection is resolved against the inventory as it stands before
    /// the batch. Selections that do not resolve are rejected with
    /// `InvalidIndex` and skipped. Rows selected more than once are removed
    /// once. Removal runs from the highest position down so no removal shifts
    /// a position that is still pending.
    pub fn delete(&mut self, selections: &[Selection]) -> DeleteReport {
        let mut report = DeleteReport::default();
        let mut marked: BTreeSet<usize> = BTreeSet::new();

        for &selection in selections {
            let resolved = match selection {
                Selection::Position(p) if p < self.items.len() => Some(p),
                Selection::Position(_) => None,
                Selection::Id(id) => self.position_of(id),
            };
            match resolved {
                Some(p) => {
                    marked.insert(p);
                }
                None => report.rejected.push(Rejection {
                    selection,
                    error: InventoryError::InvalidIndex,
                }),
            }
        }

        for position in marked.into_iter().rev() {
            let item = self.items.remove(position);
            report.removed.push(RemovedItem { position, item });
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn inventory_of(names: &[&str]) -> Inventory {
        let mut inv = Inventory::new();
        for name in names {
            inv.add(&NewItem::new(*name, "1", "A-01")).unwrap();
        }
        inv
    }

    fn names(inv: &Inventory) -> Vec<&str> {
        inv.items().iter().map(|i| i.name()).collect()
    }

    #[test]
    fn seeded_inventory_has_three_items_in_order() {
        let inv = Inventory::seeded();
        assert_eq!(names(&inv), vec!["Laptop Dell XYZ", "Monitor LG 27\"", "Wireless Mouse"]);
        let quantities: Vec<u32> = inv.items().iter().map(|i| i.quantity().get()).collect();
        assert_eq!(quantities, vec![5, 12, 30]);
        let locations: Vec<&str> = inv.items().iter().map(|i| i.location()).collect();
        assert_eq!(locations, vec!["A-01", "B-03", "C-10"]);
    }

    #[test]
    fn add_appends_to_end() {
        let mut inv = inventory_of(&["A", "B"]);
        let added = inv.add(&NewItem::new("C", "7", "Z-9")).unwrap().clone();
        assert_eq!(names(&inv), vec!["A", "B", "C"]);
        assert_eq!(inv.get(2), Some(&added));
    }

    #[test]
    fn failed_add_leaves_inventory_untouched() {
        let mut inv = inventory_of(&["A"]);
        let before = inv.clone();
        assert_eq!(
            inv.add(&NewItem::new("B", "zero", "A-01")).unwrap_err(),
            InventoryError::QuantityNotInteger
        );
        assert_eq!(
            inv.add(&NewItem::new("B", "0", "A-01")).unwrap_err(),
            InventoryError::QuantityNotPositive
        );
        assert_eq!(inv, before);
    }

    #[test]
    fn batch_delete_first_and_last_of_three_leaves_middle() {
        let mut inv = inventory_of(&["A", "B", "C"]);
        let report = inv.delete_positions(&[0, 2]);
        assert_eq!(names(&inv), vec!["B"]);
        assert!(report.rejected.is_empty());
        let removed: Vec<(usize, &str)> = report
            .removed
            .iter()
            .map(|r| (r.position, r.item.name()))
            .collect();
        assert_eq!(removed, vec![(2, "C"), (0, "A")]);
    }

    #[test]
    fn out_of_range_position_is_rejected_and_others_proceed() {
        let mut inv = inventory_of(&["A", "B", "C"]);
        let report = inv.delete_positions(&[1, 7]);
        assert_eq!(names(&inv), vec!["A", "C"]);
        assert_eq!(
            report.rejected,
            vec![Rejection {
                selection: Selection::Position(7),
                error: InventoryError::InvalidIndex,
            }]
        );
        assert_eq!(
            report.notices(),
            vec![Notice::error("Invalid item index."), Notice::warning("Removed item: B")]
        );
    }

    #[test]
    fn duplicate_selections_remove_once() {
        let mut inv = inventory_of(&["A", "B", "C"]);
        let b = inv.get(1).unwrap().id_typed();
        let report = inv.delete(&[Selection::Position(1), Selection::Id(b), Selection::Position(1)]);
        assert_eq!(names(&inv), vec!["A", "C"]);
        assert_eq!(report.removed.len(), 1);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn delete_by_id_ignores_current_order() {
        let mut inv = inventory_of(&["A", "B", "C", "D"]);
        let ids: Vec<ItemId> = [3, 1].iter().map(|&p| inv.get(p).unwrap().id_typed()).collect();
        let report = inv.delete_ids(&ids);
        assert_eq!(names(&inv), vec!["A", "C"]);
        assert_eq!(report.removed.len(), 2);
    }

    #[test]
    fn unknown_id_is_rejected_as_invalid_index() {
        let mut inv = inventory_of(&["A"]);
        let before = inv.clone();
        let ghost = ItemId::new();
        let report = inv.delete_ids(&[ghost]);
        assert_eq!(inv, before);
        assert_eq!(report.rejected[0].selection, Selection::Id(ghost));
        assert_eq!(report.rejected[0].error, InventoryError::InvalidIndex);
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let mut inv = inventory_of(&["A", "B"]);
        let report = inv.delete(&[]);
        assert!(report.is_empty());
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn remove_by_id_returns_the_item() {
        let mut inv = inventory_of(&["A", "B"]);
        let id = inv.get(0).unwrap().id_typed();
        let removed = inv.remove(id).unwrap();
        assert_eq!(removed.position, 0);
        assert_eq!(removed.item.name(), "A");
        assert!(inv.remove(id).is_none());
    }

    #[test]
    fn add_then_delete_last_restores_previous_state() {
        let mut inv = Inventory::seeded();
        let before = inv.clone();
        inv.add_with(ItemId::new(), &NewItem::new("Tape", "2", "F-1"), test_time())
            .unwrap();
        let last = inv.len() - 1;
        inv.delete_positions(&[last]);
        assert_eq!(inv, before);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a valid add grows the list by one and the new last item is the input.
        #[test]
        fn valid_add_appends_exactly_one(
            name in "[A-Za-z][A-Za-z0-9 ]{0,20}",
            quantity in 1u32..=u32::MAX,
            location in "[A-Z]-[0-9]{2}",
            existing in 0usize..6,
        ) {
            let mut inv = Inventory::new();
            for i in 0..existing {
                inv.add(&NewItem::new(format!("item {i}"), "1", "A-01")).unwrap();
            }
            let before = inv.len();
            inv.add(&NewItem::new(name.clone(), quantity.to_string(), location.clone())).unwrap();
            prop_assert_eq!(inv.len(), before + 1);
            let last = inv.get(inv.len() - 1).unwrap();
            prop_assert_eq!(last.name(), name.trim());
            prop_assert_eq!(last.quantity().get(), quantity);
            prop_assert_eq!(last.location(), location.as_str());
        }

        /// Property: a non-positive or non-integer quantity never mutates the list.
        #[test]
        fn invalid_quantity_never_mutates(
            raw in prop_oneof![
                (i64::MIN..=0i64).prop_map(|v| v.to_string()),
                "[a-z .,]{1,8}",
                (0.01f64..1000.0).prop_map(|v| format!("{v:.2}")),
            ],
        ) {
            let mut inv = Inventory::seeded();
            let before = inv.clone();
            prop_assert!(inv.add(&NewItem::new("Widget", raw, "A-01")).is_err());
            prop_assert_eq!(inv, before);
        }

        /// Property: deleting an in-range position set removes exactly those rows.
        #[test]
        fn in_range_positions_remove_exactly_those_rows(
            (len, picks) in (1usize..12).prop_flat_map(|len| {
                (Just(len), prop::sample::subsequence((0..len).collect::<Vec<_>>(), 0..=len))
            }),
        ) {
            let labels: Vec<String> = (0..len).map(|i| format!("item {i}")).collect();
            let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let mut inv = inventory_of(&refs);
            let report = inv.delete_positions(&picks);

            prop_assert!(report.rejected.is_empty());
            prop_assert_eq!(inv.len(), len - picks.len());
            let expected: Vec<&str> = refs
                .iter()
                .enumerate()
                .filter(|(i, _)| !picks.contains(i))
                .map(|(_, n)| *n)
                .collect();
            prop_assert_eq!(names(&inv), expected);
        }

        /// Property: an out-of-range position is rejected without affecting the rest of the batch.
        #[test]
        fn out_of_range_positions_are_isolated(
            len in 0usize..8,
            overshoot in 0usize..100,
            take_first in any::<bool>(),
        ) {
            let labels: Vec<String> = (0..len).map(|i| format!("item {i}")).collect();
            let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let mut inv = inventory_of(&refs);
            let bad = len + overshoot;

            let mut positions = vec![bad];
            if take_first && len > 0 {
                positions.push(0);
            }
            let report = inv.delete_positions(&positions);

            prop_assert_eq!(report.rejected.len(), 1);
            prop_assert_eq!(report.rejected[0].error.clone(), InventoryError::InvalidIndex);
            let expected_removed = usize::from(take_first && len > 0);
            prop_assert_eq!(report.removed.len(), expected_removed);
            prop_assert_eq!(inv.len(), len - expected_removed);
        }
    }
}
