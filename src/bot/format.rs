//! Reply formatting for scan station and admin commands.

use crate::{
    core::{
        employee::{EmployeeDetails, EmployeePage},
        lookup::LedgerView,
    },
    entities::{employee, gallon_transaction},
};
use std::fmt::Write;

/// Formats the ledger card shown after a scan.
#[must_use]
pub fn format_ledger_view(view: &LedgerView) -> String {
    format!(
        "👤 **{}** (`{}`)\n💧 Remaining quota: **{}** gallon(s)",
        view.name, view.scan_code, view.remaining_quota
    )
}

/// One line of the admin employee list.
#[must_use]
pub fn format_employee_line(model: &employee::Model) -> String {
    format!(
        "`{}` {} | {} gallon(s) left (reset {})",
        model.scan_code, model.name, model.remaining_quota, model.quota_last_reset
    )
}

/// One line of an employee's withdrawal history.
#[must_use]
pub fn format_transaction_line(record: &gallon_transaction::Model) -> String {
    format!(
        "{} | took {} | {} left",
        record.taken_at.format("%Y-%m-%d %H:%M"),
        record.quantity,
        record.remaining_quota_after
    )
}

/// Formats an employee with their recent withdrawals.
pub fn format_employee_details(details: &EmployeeDetails) -> Result<String, std::fmt::Error> {
    let employee = &details.employee;
    let mut out = String::new();
    writeln!(out, "👤 **{}** (`{}`)", employee.name, employee.scan_code)?;
    writeln!(
        out,
        "💧 Remaining quota: **{}** gallon(s) | last reset {}",
        employee.remaining_quota, employee.quota_last_reset
    )?;
    writeln!(
        out,
        "🗓️ Registered {}",
        employee.created_at.format("%Y-%m-%d")
    )?;

    if details.recent_transactions.is_empty() {
        write!(out, "\nNo withdrawals recorded yet.")?;
        return Ok(out);
    }

    writeln!(
        out,
        "\n**Recent withdrawals** ({} of {}):",
        details.recent_transactions.len(),
        details.transaction_count
    )?;
    for record in &details.recent_transactions {
        writeln!(out, "• {}", format_transaction_line(record))?;
    }
    Ok(out)
}

/// Formats one page of the admin employee list.
pub fn format_employee_page(page: &EmployeePage) -> Result<String, std::fmt::Error> {
    if page.total == 0 {
        return Ok("No employees registered yet. Add one with `/employee_manage add`.".to_string());
    }
    if page.employees.is_empty() {
        return Ok(format!(
            "Page {} is empty. There are {} page(s).",
            page.page, page.total_pages
        ));
    }

    let mut out = String::new();
    writeln!(
        out,
        "**Employees** (page {}/{}, {} total)",
        page.page, page.total_pages, page.total
    )?;
    for model in &page.employees {
        writeln!(out, "• {}", format_employee_line(model))?;
    }
    Ok(out)
}
