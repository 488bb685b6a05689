use crate::item::NewItem;

/// The dataset every fresh session starts with.
pub fn seed_items() -> Vec<NewItem> {
    vec![
        NewItem::new("Laptop Dell XYZ", "5", "A-01"),
        NewItem::new("Monitor LG 27\"", "12", "B-03"),
        NewItem::new("Wireless Mouse", "30", "C-10"),
    ]
}
