//! Table and form rendering for the client.
//!
//! Columns and form rows both come from [`ContactField::ALL`], and sorting
//! reads the same field a column displays.

use std::cmp::Ordering;
use std::fmt::Write as _;

use super::state::{Dialog, SortDirection, SortState, ViewState};
use crate::contact::{Contact, ContactField};

/// Sort the full contact list.
///
/// Comparison ignores case; missing values come first in ascending order.
/// Ties keep identifier order so the result is stable across reloads.
#[must_use]
pub fn sorted(contacts: &[Contact], sort: SortState) -> Vec<&Contact> {
    let mut rows: Vec<&Contact> = contacts.iter().collect();
    rows.sort_by(|a, b| {
        let ordering = compare_field(a.get(sort.field), b.get(sort.field));
        let ordering = match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        ordering.then(a.id.cmp(&b.id))
    });
    rows
}

fn compare_field(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
    }
}

/// The rows on the current page, after sorting.
#[must_use]
pub fn visible_rows(state: &ViewState) -> Vec<&Contact> {
    sorted(&state.contacts, state.sort)
        .into_iter()
        .skip(state.page * state.rows_per_page)
        .take(state.rows_per_page)
        .collect()
}

/// Pagination footer, e.g. `1–5 of 12`.
#[must_use]
pub fn page_summary(state: &ViewState) -> String {
    let total = state.contacts.len();
    if total == 0 {
        return "0–0 of 0".to_string();
    }
    let first = (state.page * state.rows_per_page + 1).min(total);
    let last = ((state.page + 1) * state.rows_per_page).min(total);
    format!("{first}–{last} of {total}")
}

fn column_header(field: ContactField, sort: SortState) -> String {
    if field != sort.field {
        return field.label().to_string();
    }
    let arrow = match sort.direction {
        SortDirection::Ascending => '▲',
        SortDirection::Descending => '▼',
    };
    format!("{} {arrow}", field.label())
}

/// Render the current page as a plain-text table.
#[must_use]
pub fn render_table(state: &ViewState) -> String {
    let rows = visible_rows(state);

    let mut headers = vec!["ID".to_string()];
    headers.extend(ContactField::ALL.map(|f| column_header(f, state.sort)));

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|contact| {
            let mut row = vec![contact.id.to_string()];
            row.extend(ContactField::ALL.map(|f| contact.get(f).unwrap_or("").to_string()));
            row
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    let _ = writeln!(out, "{}", page_summary(state));
    out
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Render the form dialog, or nothing when it is closed.
#[must_use]
pub fn render_form(state: &ViewState) -> Option<String> {
    let title = match state.dialog {
        Dialog::Closed => return None,
        Dialog::Create => "Add Contact".to_string(),
        Dialog::Edit(id) => format!("Edit Contact {id}"),
    };

    let label_width = ContactField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    for field in ContactField::ALL {
        let value = state.form.get(field).unwrap_or("");
        let _ = writeln!(out, "  {:<label_width$}  {value}", field.label());
    }
    Some(out)
}
