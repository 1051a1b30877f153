//! Builds the CSV exports and the flattened transaction rows shared by the
//! CSV and PDF exporters.
//!
//! The two CSV layouts differ on purpose: the report export and the
//! dashboard export predate each other and spreadsheets built against either
//! column order must keep working.

use std::collections::HashMap;

use csv::Writer;
use time::Date;

use crate::{
    Error,
    models::{DatabaseId, Expense, Income},
    reports::aggregation::{UNCATEGORIZED_LABEL, resolve_label},
};

/// The label used for null or dangling references in dashboard-style
/// transaction rows.
pub const NOT_AVAILABLE_LABEL: &str = "N/A";

/// One flattened transaction row, as written to the dashboard CSV and the
/// PDF table.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    /// Transaction date.
    pub date: Date,
    /// `"Income"` or `"Expense"`.
    pub kind: &'static str,
    /// Resolved category or source name, or [NOT_AVAILABLE_LABEL].
    pub label: String,
    /// Transaction amount.
    pub amount: f64,
    /// Free-form description, possibly empty.
    pub description: String,
}

/// Merge expenses and incomes into a single list of rows, most recent date
/// first.
///
/// The sort is stable, so rows sharing a date keep their input order:
/// incomes as given, then expenses as given.
pub fn build_transaction_rows(
    expenses: &[Expense],
    incomes: &[Income],
    category_labels: &HashMap<DatabaseId, String>,
    source_labels: &HashMap<DatabaseId, String>,
) -> Vec<TransactionRow> {
    let mut rows: Vec<TransactionRow> = incomes
        .iter()
        .map(|income| TransactionRow {
            date: income.date,
            kind: "Income",
            label: resolve_label(income.source_id, source_labels, NOT_AVAILABLE_LABEL),
            amount: income.amount,
            description: income.description.clone(),
        })
        .chain(expenses.iter().map(|expense| TransactionRow {
            date: expense.date,
            kind: "Expense",
            label: resolve_label(expense.category_id, category_labels, NOT_AVAILABLE_LABEL),
            amount: expense.amount,
            description: expense.description.clone(),
        }))
        .collect();

    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

/// Write the dashboard transaction export as CSV.
///
/// Columns: `Date, Type, Category/Source, Amount, Description`.
pub fn write_dashboard_csv(rows: &[TransactionRow]) -> Result<Vec<u8>, Error> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["Date", "Type", "Category/Source", "Amount", "Description"])?;

    for row in rows {
        writer.write_record([
            row.date.to_string(),
            row.kind.to_string(),
            row.label.clone(),
            format!("{:.2}", row.amount),
            row.description.clone(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))
}

/// Write the report transaction export as CSV.
///
/// Columns: `Type, Date, Category/Source, Description, Amount`. Expenses are
/// written first, then incomes, each in the order given. Null and dangling
/// references are labelled [UNCATEGORIZED_LABEL] here, matching the report
/// page rather than the dashboard.
pub fn write_report_csv(
    expenses: &[Expense],
    incomes: &[Income],
    category_labels: &HashMap<DatabaseId, String>,
    source_labels: &HashMap<DatabaseId, String>,
) -> Result<Vec<u8>, Error> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["Type", "Date", "Category/Source", "Description", "Amount"])?;

    for expense in expenses {
        writer.write_record([
            "Expense".to_string(),
            expense.date.to_string(),
            resolve_label(expense.category_id, category_labels, UNCATEGORIZED_LABEL),
            expense.description.clone(),
            format!("{:.2}", expense.amount),
        ])?;
    }

    for income in incomes {
        writer.write_record([
            "Income".to_string(),
            income.date.to_string(),
            resolve_label(income.source_id, source_labels, UNCATEGORIZED_LABEL),
            income.description.clone(),
            format!("{:.2}", income.amount),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))
}

#[cfg(test)]
mod transaction_row_tests {
    use std::collections::HashMap;

    use time::macros::date;

    use crate::{
        export::build_transaction_rows,
        models::{Expense, Income},
    };

    fn expense(id: i64, category_id: Option<i64>, date: time::Date) -> Expense {
        Expense {
            id,
            owner_id: 1,
            category_id,
            amount: 10.0,
            date,
            description: format!("expense {id}"),
        }
    }

    fn income(id: i64, source_id: Option<i64>, date: time::Date) -> Income {
        Income {
            id,
            owner_id: 1,
            source_id,
            amount: 20.0,
            date,
            description: format!("income {id}"),
        }
    }

    #[test]
    fn rows_are_merged_most_recent_first() {
        let expenses = [
            expense(1, None, date!(2024 - 03 - 10)),
            expense(2, None, date!(2024 - 03 - 01)),
        ];
        let incomes = [income(1, None, date!(2024 - 03 - 05))];

        let rows = build_transaction_rows(&expenses, &incomes, &HashMap::new(), &HashMap::new());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, date!(2024 - 03 - 10));
        assert_eq!(rows[1].date, date!(2024 - 03 - 05));
        assert_eq!(rows[2].date, date!(2024 - 03 - 01));
    }

    #[test]
    fn same_date_keeps_incomes_before_expenses() {
        let day = date!(2024 - 03 - 10);
        let rows = build_transaction_rows(
            &[expense(1, None, day)],
            &[income(1, None, day)],
            &HashMap::new(),
            &HashMap::new(),
        );

        assert_eq!(rows[0].kind, "Income");
        assert_eq!(rows[1].kind, "Expense");
    }

    #[test]
    fn dangling_references_fall_back_to_not_available() {
        let rows = build_transaction_rows(
            &[expense(1, Some(999), date!(2024 - 03 - 10))],
            &[],
            &HashMap::new(),
            &HashMap::new(),
        );

        assert_eq!(rows[0].label, "N/A");
    }

    #[test]
    fn known_references_are_resolved() {
        let category_labels = HashMap::from([(7, "Food".to_string())]);
        let source_labels = HashMap::from([(3, "Salary".to_string())]);

        let rows = build_transaction_rows(
            &[expense(1, Some(7), date!(2024 - 03 - 10))],
            &[income(1, Some(3), date!(2024 - 03 - 09))],
            &category_labels,
            &source_labels,
        );

        assert_eq!(rows[0].label, "Food");
        assert_eq!(rows[1].label, "Salary");
    }
}

#[cfg(test)]
mod csv_tests {
    use std::collections::HashMap;

    use time::macros::date;

    use crate::{
        export::{build_transaction_rows, write_dashboard_csv, write_report_csv},
        models::{Expense, Income},
    };

    #[test]
    fn dashboard_csv_has_expected_header_and_formatting() {
        let expenses = [Expense {
            id: 1,
            owner_id: 1,
            category_id: None,
            amount: 12.5,
            date: date!(2024 - 03 - 10),
            description: "Bus ticket".to_string(),
        }];
        let rows = build_transaction_rows(&expenses, &[], &HashMap::new(), &HashMap::new());

        let bytes = write_dashboard_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Date,Type,Category/Source,Amount,Description"
        );
        assert_eq!(lines.next().unwrap(), "2024-03-10,Expense,N/A,12.50,Bus ticket");
    }

    #[test]
    fn report_csv_writes_expenses_then_incomes() {
        let expenses = [Expense {
            id: 1,
            owner_id: 1,
            category_id: None,
            amount: 3.0,
            date: date!(2024 - 03 - 10),
            description: "Coffee".to_string(),
        }];
        let incomes = [Income {
            id: 1,
            owner_id: 1,
            source_id: None,
            amount: 1000.0,
            // Earlier than the expense; order is by type, not date.
            date: date!(2024 - 03 - 01),
            description: "March pay".to_string(),
        }];

        let bytes =
            write_report_csv(&expenses, &incomes, &HashMap::new(), &HashMap::new()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Type,Date,Category/Source,Description,Amount"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Expense,2024-03-10,Uncategorized,Coffee,3.00"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Income,2024-03-01,Uncategorized,March pay,1000.00"
        );
    }

    #[test]
    fn descriptions_with_commas_are_quoted() {
        let rows = build_transaction_rows(
            &[Expense {
                id: 1,
                owner_id: 1,
                category_id: None,
                amount: 5.0,
                date: date!(2024 - 03 - 10),
                description: "milk, eggs".to_string(),
            }],
            &[],
            &HashMap::new(),
            &HashMap::new(),
        );

        let text = String::from_utf8(write_dashboard_csv(&rows).unwrap()).unwrap();

        assert!(text.contains("\"milk, eggs\""));
    }
}
