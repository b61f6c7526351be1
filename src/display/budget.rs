//! Budget display formatting
//!
//! Formats budget records for terminal output in table and detail views.

use crate::models::BudgetRecord;

/// Format budgets as a table, in the same order the budget view shows them
/// (reverse of the service order)
pub fn format_budget_list(records: &[BudgetRecord]) -> String {
    if records.is_empty() {
        return "No budgets found.".to_string();
    }

    let id_width = records
        .iter()
        .map(|r| r.id.len())
        .max()
        .unwrap_or(2)
        .max(2);

    let amount_width = records
        .iter()
        .map(|r| r.amount_label().len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:>amount_width$}  {:<16}  {}\n",
        "ID",
        "Amount",
        "Created",
        "Updated",
        id_width = id_width,
        amount_width = amount_width,
    ));

    output.push_str(&format!(
        "{:-<id_width$}  {:->amount_width$}  {:-<16}  {:-<16}\n",
        "",
        "",
        "",
        "",
        id_width = id_width,
        amount_width = amount_width,
    ));

    for record in records.iter().rev() {
        output.push_str(&format!(
            "{:<id_width$}  {:>amount_width$}  {:<16}  {}\n",
            record.id,
            record.amount_label(),
            record.created_label(),
            record.updated_label(),
            id_width = id_width,
            amount_width = amount_width,
        ));
    }

    output.push_str(&format!("\n{} budget(s)\n", records.len()));
    output
}

/// Format a single budget's details
pub fn format_budget_details(record: &BudgetRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", record.amount_label()));
    output.push_str(&format!("  ID:       {}\n", record.id));
    output.push_str(&format!("  Created:  {}\n", record.created_label()));
    output.push_str(&format!(
        "  Updated:  {}\n",
        record.updated_at.as_deref().map_or_else(
            || "never".to_string(),
            crate::models::budget::format_timestamp
        )
    ));

    output
}
