//! Page rendering.
//!
//! [`render`] recomputes the whole page from the current inventory and the
//! pending notices. It is pure: the same inputs always produce the same
//! [`Page`], and therefore the same HTML.

use core::fmt;

use stockroom_core::{Entity, ItemId};
use stockroom_inventory::{Inventory, Notice};

pub const TITLE: &str = "Simple Inventory";
pub const CAPTION: &str = "Data is kept in application memory only and is not saved permanently.";
pub const EMPTY_MESSAGE: &str = "The inventory is empty.";

/// One table row. `marked` is the transient delete checkbox, unchecked on
/// every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub location: String,
    pub marked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub notices: Vec<Notice>,
    pub rows: Vec<RowView>,
}

impl Page {
    /// Shown in place of the table when there are no rows.
    pub fn table_notice(&self) -> Option<Notice> {
        self.rows.is_empty().then(|| Notice::info(EMPTY_MESSAGE))
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

pub fn render(inventory: &Inventory, notices: &[Notice]) -> Page {
    Page {
        notices: notices.to_vec(),
        rows: inventory
            .items()
            .iter()
            .map(|item| RowView {
                id: *item.id(),
                name: item.name().to_string(),
                quantity: item.quantity().get(),
                location: item.location().to_string(),
                marked: false,
            })
            .collect(),
    }
}

/// HTML-escapes the wrapped text when displayed.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

fn write_notice(f: &mut fmt::Formatter<'_>, notice: &Notice) -> fmt::Result {
    writeln!(
        f,
        r#"<div class="notice notice-{}" role="status">{}</div>"#,
        notice.level.as_str(),
        Escaped(&notice.text)
    )
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="en">"#)?;
        writeln!(f, "<head>")?;
        writeln!(f, r#"<meta charset="utf-8">"#)?;
        writeln!(f, "<title>{}</title>", Escaped(TITLE))?;
        writeln!(f, "{STYLE}")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<main>")?;
        writeln!(f, "<h1>&#128230; {}</h1>", Escaped(TITLE))?;
        writeln!(f, r#"<p class="caption">{}</p>"#, Escaped(CAPTION))?;

        for notice in &self.notices {
            write_notice(f, notice)?;
        }

        writeln!(f, "<h2>Inventory</h2>")?;
        match self.table_notice() {
            Some(notice) => write_notice(f, &notice)?,
            None => {
                writeln!(f, r#"<form method="post" action="/items/delete">"#)?;
                writeln!(f, "<table>")?;
                writeln!(
                    f,
                    "<thead><tr><th>Name</th><th>Quantity</th><th>Location</th><th>Delete</th></tr></thead>"
                )?;
                writeln!(f, "<tbody>")?;
                for row in &self.rows {
                    writeln!(
                        f,
                        r#"<tr><td>{}</td><td class="num">{}</td><td>{}</td><td><input type="checkbox" name="delete" value="{}" title="Mark to delete this item"{}></td></tr>"#,
                        Escaped(&row.name),
                        row.quantity,
                        Escaped(&row.location),
                        row.id,
                        if row.marked { " checked" } else { "" },
                    )?;
                }
                writeln!(f, "</tbody>")?;
                writeln!(f, "</table>")?;
                writeln!(f, r#"<button type="submit">Delete selected</button>"#)?;
                writeln!(f, "</form>")?;
            }
        }

        writeln!(f, "<hr>")?;
        writeln!(f, "<h2>Add New Item</h2>")?;
        writeln!(f, r#"<form method="post" action="/items">"#)?;
        writeln!(f, r#"<label>Item Name: <input type="text" name="name"></label>"#)?;
        writeln!(
            f,
            r#"<label>Quantity: <input type="number" name="quantity" min="1" step="1" value="1"></label>"#
        )?;
        writeln!(
            f,
            r#"<label>Location: <input type="text" name="location" placeholder="e.g. A-05"></label>"#
        )?;
        writeln!(f, r#"<button type="submit">&#10133; Add to Inventory</button>"#)?;
        writeln!(f, "</form>")?;

        writeln!(f, r#"<form method="post" action="/session/close" class="session">"#)?;
        writeln!(f, r#"<button type="submit">Start over</button>"#)?;
        writeln!(f, "</form>")?;
        writeln!(f, "</main>")?;
        writeln!(f, "</body>")?;
        write!(f, "</html>")
    }
}

const STYLE: &str = r#"<style>
main { max-width: 46rem; margin: 2rem auto; font-family: sans-serif; }
table { border-collapse: collapse; width: 100%; margin-bottom: .75rem; }
th, td { border-bottom: 1px solid #ddd; padding: .4rem .6rem; text-align: left; }
td.num { text-align: right; }
label { display: block; margin: .5rem 0; }
.caption { color: #666; }
.notice { padding: .6rem .8rem; margin: .5rem 0; border-radius: .3rem; }
.notice-success { background: #e6f4ea; }
.notice-info { background: #e8f0fe; }
.notice-warning { background: #fef7e0; }
.notice-error { background: #fce8e6; }
form.session { margin-top: 2rem; }
</style>"#;
