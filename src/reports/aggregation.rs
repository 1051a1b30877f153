//! The reporting aggregation primitives: categorical breakdowns,
//! budget-vs-actual status, monthly trend series, and the naive expense
//! forecast.
//!
//! All functions here are pure; the store reads happen in
//! [summary](crate::reports::summary).

use std::collections::HashMap;

use serde::Serialize;
use time::{Date, Duration};

use crate::{
    models::{Budget, DatabaseId, Expense, Income},
    period::last_n_months,
};

/// The label used when a category or source reference is null or dangling in
/// breakdowns and budget rows.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Number of trailing days the expense forecast looks at.
const FORECAST_WINDOW_DAYS: i64 = 90;

/// The forecast averages the trailing window over a fixed number of buckets,
/// regardless of how many months actually contain data. Intentionally naive;
/// kept for compatibility with the numbers users already see.
const FORECAST_BUCKETS: f64 = 3.0;

/// A label and the summed amount for that label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    /// Category or source name, or [UNCATEGORIZED_LABEL].
    pub label: String,
    /// Sum of amounts for the label, rounded to cents.
    pub total: f64,
}

/// Budget-vs-actual figures for one budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    /// The ID of the budget.
    pub budget_id: DatabaseId,
    /// The budget's category name, or [UNCATEGORIZED_LABEL].
    pub category: String,
    /// The spending limit.
    pub limit: f64,
    /// Total spent within the budget window.
    pub spent: f64,
    /// `limit - spent`; negative when the budget is exceeded.
    pub remaining: f64,
    /// `spent - limit` when positive, otherwise zero.
    pub over_amount: f64,
    /// Percentage of the limit spent, clamped to [0, 100]. Zero when the
    /// limit is zero, so a malformed budget can never cause a division fault.
    pub percent: f64,
    /// Whether spending strictly exceeds the limit.
    pub is_exceeded: bool,
    /// The first day the budget applies to.
    pub start_date: Date,
    /// The last day the budget applies to.
    pub end_date: Date,
}

/// Monthly expense and income totals over a lookback window.
///
/// The three vectors are index-aligned and ordered oldest month first.
/// Months with no transactions hold zero rather than being omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    /// "Mon YYYY" labels, oldest first.
    pub labels: Vec<String>,
    /// Expense totals per month.
    pub expense: Vec<f64>,
    /// Income totals per month.
    pub income: Vec<f64>,
}

/// Round a monetary value to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Resolve a weak category or source reference to a display label.
///
/// Null references and references to deleted rows both fall back to
/// `fallback`; a dangling id must never surface as an error on a read path.
pub fn resolve_label(
    id: Option<DatabaseId>,
    labels: &HashMap<DatabaseId, String>,
    fallback: &str,
) -> String {
    id.and_then(|id| labels.get(&id).cloned())
        .unwrap_or_else(|| fallback.to_string())
}

/// Sum expense amounts per category label, ordered by descending total.
///
/// The sort is stable: labels with equal totals stay in the order they were
/// first seen in `expenses`.
pub fn sum_by_category(
    expenses: &[Expense],
    labels: &HashMap<DatabaseId, String>,
) -> Vec<BreakdownEntry> {
    sum_by_label(
        expenses
            .iter()
            .map(|expense| (expense.category_id, expense.amount)),
        labels,
    )
}

/// Sum income amounts per source label, ordered by descending total.
pub fn sum_by_source(
    incomes: &[Income],
    labels: &HashMap<DatabaseId, String>,
) -> Vec<BreakdownEntry> {
    sum_by_label(
        incomes
            .iter()
            .map(|income| (income.source_id, income.amount)),
        labels,
    )
}

fn sum_by_label(
    amounts: impl Iterator<Item = (Option<DatabaseId>, f64)>,
    labels: &HashMap<DatabaseId, String>,
) -> Vec<BreakdownEntry> {
    let mut entries: Vec<BreakdownEntry> = Vec::new();
    let mut index_by_label: HashMap<String, usize> = HashMap::new();

    for (reference, amount) in amounts {
        let label = resolve_label(reference, labels, UNCATEGORIZED_LABEL);

        match index_by_label.get(&label) {
            Some(&index) => entries[index].total += amount,
            None => {
                index_by_label.insert(label.clone(), entries.len());
                entries.push(BreakdownEntry {
                    label,
                    total: amount,
                });
            }
        }
    }

    for entry in &mut entries {
        entry.total = round_cents(entry.total);
    }

    entries.sort_by(|a, b| b.total.total_cmp(&a.total));
    entries
}

/// Compute budget-vs-actual figures for one budget.
///
/// `expenses` may contain any of the owner's expenses; only those in the
/// budget's category and window count towards `spent`. A budget with no
/// category matches exactly the expenses with no category.
pub fn budget_status(
    budget: &Budget,
    expenses: &[Expense],
    labels: &HashMap<DatabaseId, String>,
) -> BudgetStatus {
    let spent: f64 = expenses
        .iter()
        .filter(|expense| {
            expense.category_id == budget.category_id && budget.is_active(expense.date)
        })
        .map(|expense| expense.amount)
        .sum();
    let spent = round_cents(spent);

    let percent = if budget.amount > 0.0 {
        (spent / budget.amount * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    BudgetStatus {
        budget_id: budget.id,
        category: resolve_label(budget.category_id, labels, UNCATEGORIZED_LABEL),
        limit: budget.amount,
        spent,
        remaining: round_cents(budget.amount - spent),
        over_amount: round_cents((spent - budget.amount).max(0.0)),
        percent,
        is_exceeded: spent > budget.amount,
        start_date: budget.start_date,
        end_date: budget.end_date,
    }
}

/// Bucket expense and income totals by calendar month over the last
/// `months_back` months (inclusive of the month containing `reference`).
pub fn monthly_trend(
    expenses: &[Expense],
    incomes: &[Income],
    reference: Date,
    months_back: u32,
) -> TrendSeries {
    let windows = last_n_months(reference, months_back);

    let mut labels = Vec::with_capacity(windows.len());
    let mut expense_totals = Vec::with_capacity(windows.len());
    let mut income_totals = Vec::with_capacity(windows.len());

    for window in windows {
        let expense_total: f64 = expenses
            .iter()
            .filter(|expense| window.start <= expense.date && expense.date <= window.end)
            .map(|expense| expense.amount)
            .sum();
        let income_total: f64 = incomes
            .iter()
            .filter(|income| window.start <= income.date && income.date <= window.end)
            .map(|income| income.amount)
            .sum();

        labels.push(window.label);
        expense_totals.push(round_cents(expense_total));
        income_totals.push(round_cents(income_total));
    }

    TrendSeries {
        labels,
        expense: expense_totals,
        income: income_totals,
    }
}

/// Predict next month's expenses from the trailing 90 days.
///
/// Sums the amounts of expenses dated on or after `reference - 90 days` and
/// divides by three. Returns zero when the window holds no expenses. The
/// window has no upper bound, matching the numbers the reports have always
/// shown.
pub fn forecast_next_month(expenses: &[Expense], reference: Date) -> f64 {
    let cutoff = reference - Duration::days(FORECAST_WINDOW_DAYS);

    let mut any = false;
    let mut total = 0.0;
    for expense in expenses {
        if expense.date >= cutoff {
            any = true;
            total += expense.amount;
        }
    }

    if !any {
        return 0.0;
    }

    round_cents(total / FORECAST_BUCKETS)
}

#[cfg(test)]
mod breakdown_tests {
    use std::collections::HashMap;

    use time::macros::date;

    use crate::{
        models::Expense,
        reports::aggregation::{UNCATEGORIZED_LABEL, sum_by_category},
    };

    fn expense(category_id: Option<i64>, amount: f64) -> Expense {
        Expense {
            id: 0,
            owner_id: 1,
            category_id,
            amount,
            date: date!(2024 - 01 - 15),
            description: String::new(),
        }
    }

    #[test]
    fn empty_input_yields_empty_breakdown() {
        let result = sum_by_category(&[], &HashMap::new());

        assert!(result.is_empty());
    }

    #[test]
    fn totals_are_conserved() {
        let labels = HashMap::from([(1, "Food".to_string()), (2, "Transport".to_string())]);
        let expenses = vec![
            expense(Some(1), 10.0),
            expense(Some(2), 20.0),
            expense(Some(1), 30.0),
            expense(None, 5.0),
        ];

        let result = sum_by_category(&expenses, &labels);

        let sum_of_totals: f64 = result.iter().map(|entry| entry.total).sum();
        assert_eq!(sum_of_totals, 65.0);
    }

    #[test]
    fn orders_by_descending_total() {
        let labels = HashMap::from([(1, "Food".to_string()), (2, "Transport".to_string())]);
        let expenses = vec![
            expense(Some(1), 10.0),
            expense(Some(2), 50.0),
            expense(Some(1), 15.0),
        ];

        let result = sum_by_category(&expenses, &labels);

        assert_eq!(result[0].label, "Transport");
        assert_eq!(result[0].total, 50.0);
        assert_eq!(result[1].label, "Food");
        assert_eq!(result[1].total, 25.0);
    }

    #[test]
    fn equal_totals_keep_discovery_order() {
        let labels = HashMap::from([
            (1, "Zebra".to_string()),
            (2, "Alpha".to_string()),
            (3, "Mango".to_string()),
        ]);
        let expenses = vec![
            expense(Some(1), 10.0),
            expense(Some(2), 10.0),
            expense(Some(3), 10.0),
        ];

        let result = sum_by_category(&expenses, &labels);

        let order: Vec<&str> = result.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(order, vec!["Zebra", "Alpha", "Mango"]);
    }

    #[test]
    fn null_and_dangling_references_fall_back_to_uncategorized() {
        // Category 99 does not exist in the label map: the category was
        // deleted after the expense was recorded.
        let labels = HashMap::from([(1, "Food".to_string())]);
        let expenses = vec![
            expense(None, 10.0),
            expense(Some(99), 20.0),
            expense(Some(1), 5.0),
        ];

        let result = sum_by_category(&expenses, &labels);

        assert_eq!(result[0].label, UNCATEGORIZED_LABEL);
        assert_eq!(result[0].total, 30.0);
        assert_eq!(result[1].label, "Food");
    }
}


#[cfg(test)]
mod trend_tests {
    use time::macros::date;

    use crate::{
        models::{Expense, Income},
        reports::aggregation::monthly_trend,
    };

    fn expense(amount: f64, date: time::Date) -> Expense {
        Expense {
            id: 0,
            owner_id: 1,
            category_id: None,
            amount,
            date,
            description: String::new(),
        }
    }

    fn income(amount: f64, date: time::Date) -> Income {
        Income {
            id: 0,
            owner_id: 1,
            source_id: None,
            amount,
            date,
            description: String::new(),
        }
    }

    #[test]
    fn empty_months_hold_zero() {
        let expenses = vec![expense(100.0, date!(2024 - 03 - 10))];
        let incomes = vec![income(500.0, date!(2024 - 01 - 20))];

        let trend = monthly_trend(&expenses, &incomes, date!(2024 - 03 - 15), 3);

        assert_eq!(trend.labels, vec!["Jan 2024", "Feb 2024", "Mar 2024"]);
        assert_eq!(trend.expense, vec![0.0, 0.0, 100.0]);
        assert_eq!(trend.income, vec![500.0, 0.0, 0.0]);
    }

    #[test]
    fn transactions_outside_the_lookback_are_ignored() {
        let expenses = vec![
            expense(100.0, date!(2023 - 06 - 10)),
            expense(25.0, date!(2024 - 03 - 10)),
        ];

        let trend = monthly_trend(&expenses, &[], date!(2024 - 03 - 15), 6);

        let total: f64 = trend.expense.iter().sum();
        assert_eq!(total, 25.0);
    }
}

#[cfg(test)]
mod forecast_tests {
    use time::macros::date;

    use crate::{models::Expense, reports::aggregation::forecast_next_month};

    fn expense(amount: f64, date: time::Date) -> Expense {
        Expense {
            id: 0,
            owner_id: 1,
            category_id: None,
            amount,
            date,
            description: String::new(),
        }
    }

    #[test]
    fn averages_trailing_window_over_three_buckets() {
        let today = date!(2024 - 03 - 15);
        let expenses = vec![
            expense(30.0, date!(2024 - 01 - 20)),
            expense(60.0, date!(2024 - 02 - 20)),
            expense(90.0, date!(2024 - 03 - 10)),
        ];

        assert_eq!(forecast_next_month(&expenses, today), 60.0);
    }

    #[test]
    fn returns_zero_when_window_is_empty() {
        let today = date!(2024 - 03 - 15);
        let expenses = vec![expense(500.0, date!(2023 - 01 - 01))];

        assert_eq!(forecast_next_month(&expenses, today), 0.0);
    }

    #[test]
    fn expenses_older_than_90_days_are_excluded() {
        let today = date!(2024 - 06 - 01);
        let expenses = vec![
            expense(300.0, date!(2024 - 01 - 01)), // well outside the window
            expense(30.0, date!(2024 - 05 - 01)),
        ];

        assert_eq!(forecast_next_month(&expenses, today), 10.0);
    }
}
