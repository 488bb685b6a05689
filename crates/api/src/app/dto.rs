use serde::Deserialize;
use serde_json::Value;

use stockroom_core::ItemId;
use stockroom_inventory::{DeleteReport, InventoryError, Item, NewItem, Notice, Rejection, Selection};

// -------------------------
// Request DTOs
// -------------------------

/// HTML add-item form. Missing fields arrive as empty strings so they hit
/// the domain validation messages rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AddItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub location: String,
}

impl From<AddItemForm> for NewItem {
    fn from(form: AddItemForm) -> Self {
        NewItem::new(form.name, form.quantity, form.location)
    }
}

/// JSON add-item request. `quantity` is raw input: a string or a number.
#[derive(Debug, Default, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub location: String,
}

impl From<CreateItemRequest> for NewItem {
    fn from(req: CreateItemRequest) -> Self {
        let quantity = match req.quantity {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        NewItem::new(req.name, quantity, req.location)
    }
}

/// JSON batch delete. Entries are kept raw so one bad entry is reported on
/// its own instead of failing the whole batch.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteItemsRequest {
    #[serde(default)]
    pub ids: Vec<Value>,
    #[serde(default)]
    pub positions: Vec<Value>,
}

/// A delete entry that is neither a non-negative integer position nor an
/// item id. Echoed back as `{"position": <raw>}` or `{"id": <raw>}`.
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedSelection {
    Position(Value),
    Id(Value),
}

impl DeleteItemsRequest {
    /// Positions first, then ids; both resolve against the same snapshot.
    pub fn selections(&self) -> (Vec<Selection>, Vec<MalformedSelection>) {
        let mut selections = Vec::new();
        let mut malformed = Vec::new();

        for raw in &self.positions {
            match raw.as_u64().and_then(|p| usize::try_from(p).ok()) {
                Some(p) => selections.push(Selection::Position(p)),
                None => malformed.push(MalformedSelection::Position(raw.clone())),
            }
        }
        for raw in &self.ids {
            match raw.as_str().and_then(|s| s.parse::<ItemId>().ok()) {
                Some(id) => selections.push(Selection::Id(id)),
                None => malformed.push(MalformedSelection::Id(raw.clone())),
            }
        }

        (selections, malformed)
    }
}

/// Split the raw pairs of the delete form into parsed ids and a count of
/// values that were not ids at all. Only `delete` fields are considered.
pub fn delete_form_selections(pairs: &[(String, String)]) -> (Vec<Selection>, usize) {
    let mut selections = Vec::new();
    let mut malformed = 0;
    for (key, value) in pairs {
        if key != "delete" {
            continue;
        }
        match value.parse::<ItemId>() {
            Ok(id) => selections.push(Selection::Id(id)),
            Err(_) => malformed += 1,
        }
    }
    (selections, malformed)
}

// -------------------------
// Response mapping
// -------------------------

pub fn item_to_json(position: usize, item: &Item) -> Value {
    serde_json::json!({
        "id": item.id_typed().to_string(),
        "position": position,
        "name": item.name(),
        "quantity": item.quantity().get(),
        "location": item.location(),
        "added_at": item.added_at(),
    })
}

pub fn items_to_json(items: &[Item]) -> Value {
    let rows: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(position, item)| item_to_json(position, item))
        .collect();
    serde_json::json!({
        "count": rows.len(),
        "items": rows,
    })
}

fn selection_to_json(selection: &Selection) -> Value {
    match selection {
        Selection::Position(p) => serde_json::json!({ "position": p }),
        Selection::Id(id) => serde_json::json!({ "id": id.to_string() }),
    }
}

fn rejection_to_json(rejection: &Rejection) -> Value {
    serde_json::json!({
        "selection": selection_to_json(&rejection.selection),
        "message": rejection.error.to_string(),
    })
}

fn malformed_to_json(malformed: &MalformedSelection) -> Value {
    let selection = match malformed {
        MalformedSelection::Position(raw) => serde_json::json!({ "position": raw }),
        MalformedSelection::Id(raw) => serde_json::json!({ "id": raw }),
    };
    serde_json::json!({
        "selection": selection,
        "message": InventoryError::InvalidIndex.to_string(),
    })
}

/// Malformed entries are listed first, ahead of the report's own
/// rejections, matching the order of the notices.
pub fn delete_report_to_json(
    report: &DeleteReport,
    malformed: &[MalformedSelection],
    remaining: usize,
) -> Value {
    let removed: Vec<Value> = report
        .removed
        .iter()
        .map(|r| item_to_json(r.position, &r.item))
        .collect();
    let rejected: Vec<Value> = malformed
        .iter()
        .map(malformed_to_json)
        .chain(report.rejected.iter().map(rejection_to_json))
        .collect();
    let notices: Vec<Notice> = malformed
        .iter()
        .map(|_| Notice::from(&InventoryError::InvalidIndex))
        .chain(report.notices())
        .collect();
    serde_json::json!({
        "removed": removed,
        "rejected": rejected,
        "notices": notices,
        "count": remaining,
    })
}
