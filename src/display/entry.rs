//! Entry display formatting
//!
//! Formats meals and workouts as a table.

use std::fmt::Display;

use crate::models::Entry;

use super::format::truncate;

const NAME_WIDTH: usize = 30;

/// One table row for an entry
pub fn format_entry_line<I: Display>(entry: &Entry<I>) -> String {
    format!(
        "{:<14}  {:<name_width$}  {:>8}",
        entry.id.to_string(),
        truncate(&entry.name, NAME_WIDTH),
        entry.calories,
        name_width = NAME_WIDTH,
    )
}

/// Format a list of entries with a header and total row
pub fn format_entry_list<I: Display>(title: &str, entries: &[&Entry<I>]) -> String {
    if entries.is_empty() {
        return format!("No {} found.", title.to_lowercase());
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<14}  {:<name_width$}  {:>8}\n",
        "ID",
        title,
        "Calories",
        name_width = NAME_WIDTH,
    ));
    output.push_str(&format!(
        "{:-<14}  {:-<name_width$}  {:->8}\n",
        "",
        "",
        "",
        name_width = NAME_WIDTH,
    ));

    for entry in entries {
        output.push_str(&format_entry_line(entry));
        output.push('\n');
    }

    let total: i64 = entries.iter().map(|e| e.calories).sum();
    output.push_str(&format!(
        "{:<14}  {:<name_width$}  {:>8}",
        "",
        format!("Total ({})", entries.len()),
        total,
        name_width = NAME_WIDTH,
    ));

    output
}
