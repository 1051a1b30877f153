//! Assembles the dashboard summary, budget report, and chart payloads from
//! the stores.
//!
//! Nothing here is persisted: every report is recomputed on demand from the
//! raw records, so the derived numbers can never go stale.

use std::collections::HashMap;

use serde::Serialize;
use time::Date;

use crate::{
    Error,
    models::{DatabaseId, Expense, Income, UserId},
    reports::aggregation::{
        BreakdownEntry, BudgetStatus, TrendSeries, budget_status, forecast_next_month,
        monthly_trend, round_cents, sum_by_category, sum_by_source,
    },
    stores::{BudgetStore, CategoryStore, ExpenseStore, IncomeStore, SourceStore},
};

/// Number of most recent records shown on the dashboard.
const RECENT_LIMIT: usize = 5;

/// Number of months covered by the trend series.
const TREND_MONTHS: u32 = 6;

/// The data shown on the user's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// The five most recent incomes.
    pub recent_incomes: Vec<Income>,
    /// The five most recent expenses.
    pub recent_expenses: Vec<Expense>,
    /// All-time income total.
    pub total_income: f64,
    /// All-time expense total.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub balance: f64,
    /// Naive forecast of next month's expenses.
    pub predicted_expense: f64,
    /// All-time expense totals per category.
    pub category_breakdown: Vec<BreakdownEntry>,
    /// Expense and income totals for the last six months.
    pub monthly_trend: TrendSeries,
}

/// Budget-vs-actual rows plus the income and expense breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    /// One status row per budget active today.
    pub budgets: Vec<BudgetStatus>,
    /// All-time expense totals per category.
    pub expense_breakdown: Vec<BreakdownEntry>,
    /// All-time income totals per source.
    pub income_breakdown: Vec<BreakdownEntry>,
}

/// Labels and values for the expense category chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChartData {
    /// Category names, largest total first.
    pub labels: Vec<String>,
    /// Totals aligned with `labels`.
    pub data: Vec<f64>,
}

/// Build a map from category id to name for everything visible to the user.
///
/// Expenses referencing ids absent from this map (deleted categories) get
/// the fallback label during aggregation.
pub fn category_labels(
    categories: &impl CategoryStore,
    owner_id: UserId,
) -> Result<HashMap<DatabaseId, String>, Error> {
    Ok(categories
        .get_visible(owner_id)?
        .into_iter()
        .map(|category| (category.id, category.name))
        .collect())
}

/// Build a map from source id to name for everything visible to the user.
pub fn source_labels(
    sources: &impl SourceStore,
    owner_id: UserId,
) -> Result<HashMap<DatabaseId, String>, Error> {
    Ok(sources
        .get_visible(owner_id)?
        .into_iter()
        .map(|source| (source.id, source.name))
        .collect())
}

/// Compute the dashboard summary for `owner_id` as of `today`.
pub fn dashboard_summary(
    expenses: &impl ExpenseStore,
    incomes: &impl IncomeStore,
    categories: &impl CategoryStore,
    owner_id: UserId,
    today: Date,
) -> Result<DashboardSummary, Error> {
    let all_expenses = expenses.get_by_owner(owner_id, None)?;
    let all_incomes = incomes.get_by_owner(owner_id, None)?;
    let labels = category_labels(categories, owner_id)?;

    let total_income = round_cents(all_incomes.iter().map(|income| income.amount).sum());
    let total_expense = round_cents(all_expenses.iter().map(|expense| expense.amount).sum());

    Ok(DashboardSummary {
        recent_incomes: all_incomes.iter().take(RECENT_LIMIT).cloned().collect(),
        recent_expenses: all_expenses.iter().take(RECENT_LIMIT).cloned().collect(),
        total_income,
        total_expense,
        balance: round_cents(total_income - total_expense),
        predicted_expense: forecast_next_month(&all_expenses, today),
        category_breakdown: sum_by_category(&all_expenses, &labels),
        monthly_trend: monthly_trend(&all_expenses, &all_incomes, today, TREND_MONTHS),
    })
}

/// Compute budget-vs-actual rows for every budget active as of `today`, plus
/// the all-time expense and income breakdowns.
pub fn budget_report(
    budgets: &impl BudgetStore,
    expenses: &impl ExpenseStore,
    incomes: &impl IncomeStore,
    categories: &impl CategoryStore,
    sources: &impl SourceStore,
    owner_id: UserId,
    today: Date,
) -> Result<BudgetReport, Error> {
    let labels = category_labels(categories, owner_id)?;

    let mut budget_rows = Vec::new();
    for budget in budgets.get_active(owner_id, today)? {
        let window_expenses =
            expenses.get_by_owner(owner_id, Some(budget.start_date..=budget.end_date))?;
        budget_rows.push(budget_status(&budget, &window_expenses, &labels));
    }

    let all_expenses = expenses.get_by_owner(owner_id, None)?;
    let all_incomes = incomes.get_by_owner(owner_id, None)?;

    Ok(BudgetReport {
        budgets: budget_rows,
        expense_breakdown: sum_by_category(&all_expenses, &labels),
        income_breakdown: sum_by_source(&all_incomes, &source_labels(sources, owner_id)?),
    })
}

/// Compute the labels and values for the expense category chart.
pub fn expense_category_data(
    expenses: &impl ExpenseStore,
    categories: &impl CategoryStore,
    owner_id: UserId,
) -> Result<CategoryChartData, Error> {
    let all_expenses = expenses.get_by_owner(owner_id, None)?;
    let labels = category_labels(categories, owner_id)?;

    let breakdown = sum_by_category(&all_expenses, &labels);

    Ok(CategoryChartData {
        labels: breakdown.iter().map(|entry| entry.label.clone()).collect(),
        data: breakdown.iter().map(|entry| entry.total).collect(),
    })
}

/// Compute the six-month income/expense trend series.
pub fn income_expense_trend(
    expenses: &impl ExpenseStore,
    incomes: &impl IncomeStore,
    owner_id: UserId,
    today: Date,
) -> Result<TrendSeries, Error> {
    let all_expenses = expenses.get_by_owner(owner_id, None)?;
    let all_incomes = incomes.get_by_owner(owner_id, None)?;

    Ok(monthly_trend(&all_expenses, &all_incomes, today, TREND_MONTHS))
}

#[cfg(test)]
mod dashboard_summary_tests {
    use time::macros::date;

    use crate::{
        models::{NewCategory, NewExpense, NewIncome, NewSource},
        reports::summary::dashboard_summary,
        stores::{
            CategoryStore, ExpenseStore, IncomeStore, SourceStore, SqliteCategoryStore,
            SqliteExpenseStore, SqliteIncomeStore, SqliteSourceStore,
            sqlite::test_utils::init_db,
        },
    };

    #[test]
    fn totals_balance_and_breakdown_match_transactions() {
        let connection = init_db();
        let expenses = SqliteExpenseStore::new(connection.clone());
        let incomes = SqliteIncomeStore::new(connection.clone());
        let categories = SqliteCategoryStore::new(connection.clone());
        let sources = SqliteSourceStore::new(connection);

        let today = date!(2024 - 03 - 15);
        let transport = categories
            .create(NewCategory {
                name: "Transport".to_string(),
                owner_id: 1,
            })
            .unwrap();
        let salary = sources
            .create(NewSource {
                name: "Salary".to_string(),
                owner_id: 1,
            })
            .unwrap();

        for amount in [40.0, 35.0] {
            expenses
                .create(NewExpense {
                    owner_id: 1,
                    category_id: Some(transport.id),
                    amount,
                    date: today,
                    description: String::new(),
                })
                .unwrap();
        }
        incomes
            .create(NewIncome {
                owner_id: 1,
                source_id: Some(salary.id),
                amount: 1000.0,
                date: today,
                description: String::new(),
            })
            .unwrap();

        let summary = dashboard_summary(&expenses, &incomes, &categories, 1, today).unwrap();

        assert_eq!(summary.total_expense, 75.0);
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.balance, 925.0);
        assert_eq!(summary.category_breakdown.len(), 1);
        assert_eq!(summary.category_breakdown[0].label, "Transport");
        assert_eq!(summary.category_breakdown[0].total, 75.0);
        // Both expenses are within the trailing 90 days.
        assert_eq!(summary.predicted_expense, 25.0);
    }

    #[test]
    fn recent_lists_are_capped_at_five() {
        let connection = init_db();
        let expenses = SqliteExpenseStore::new(connection.clone());
        let incomes = SqliteIncomeStore::new(connection.clone());
        let categories = SqliteCategoryStore::new(connection);

        let today = date!(2024 - 03 - 15);
        for day in 1..=7u8 {
            expenses
                .create(NewExpense {
                    owner_id: 1,
                    category_id: None,
                    amount: 10.0,
                    date: today.replace_day(day).unwrap(),
                    description: String::new(),
                })
                .unwrap();
        }

        let summary = dashboard_summary(&expenses, &incomes, &categories, 1, today).unwrap();

        assert_eq!(summary.recent_expenses.len(), 5);
        // Most recent first.
        assert_eq!(summary.recent_expenses[0].date, date!(2024 - 03 - 07));
        assert!(summary.recent_incomes.is_empty());
    }

    #[test]
    fn other_users_data_is_invisible() {
        let connection = init_db();
        let expenses = SqliteExpenseStore::new(connection.clone());
        let incomes = SqliteIncomeStore::new(connection.clone());
        let categories = SqliteCategoryStore::new(connection);

        let today = date!(2024 - 03 - 15);
        expenses
            .create(NewExpense {
                owner_id: 2,
                category_id: None,
                amount: 999.0,
                date: today,
                description: String::new(),
            })
            .unwrap();

        let summary = dashboard_summary(&expenses, &incomes, &categories, 1, today).unwrap();

        assert_eq!(summary.total_expense, 0.0);
        assert!(summary.recent_expenses.is_empty());
        assert!(summary.category_breakdown.is_empty());
    }
}

#[cfg(test)]
mod budget_report_tests {
    use time::{Duration, macros::date};

    use crate::{
        models::{NewBudget, NewCategory, NewExpense},
        reports::summary::budget_report,
        stores::{
            BudgetStore, CategoryStore, ExpenseStore, SqliteBudgetStore, SqliteCategoryStore,
            SqliteExpenseStore, SqliteIncomeStore, SqliteSourceStore,
            sqlite::test_utils::init_db,
        },
    };

    #[test]
    fn exceeded_budget_is_reported_with_clamped_percent() {
        let connection = init_db();
        let budgets = SqliteBudgetStore::new(connection.clone());
        let expenses = SqliteExpenseStore::new(connection.clone());
        let incomes = SqliteIncomeStore::new(connection.clone());
        let categories = SqliteCategoryStore::new(connection.clone());
        let sources = SqliteSourceStore::new(connection);

        let today = date!(2024 - 03 - 15);
        let food = categories
            .create(NewCategory {
                name: "Food".to_string(),
                owner_id: 1,
            })
            .unwrap();

        budgets
            .create(NewBudget {
                owner_id: 1,
                category_id: Some(food.id),
                amount: 100.0,
                start_date: today - Duration::days(1),
                end_date: today + Duration::days(30),
            })
            .unwrap();
        expenses
            .create(NewExpense {
                owner_id: 1,
                category_id: Some(food.id),
                amount: 150.0,
                date: today,
                description: "Lunch".to_string(),
            })
            .unwrap();

        let report =
            budget_report(&budgets, &expenses, &incomes, &categories, &sources, 1, today).unwrap();

        assert_eq!(report.budgets.len(), 1);
        let status = &report.budgets[0];
        assert_eq!(status.category, "Food");
        assert_eq!(status.limit, 100.0);
        assert_eq!(status.spent, 150.0);
        assert_eq!(status.percent, 100.0);
        assert!(status.is_exceeded);

        assert_eq!(report.expense_breakdown[0].label, "Food");
        assert_eq!(report.expense_breakdown[0].total, 150.0);
    }

    #[test]
    fn inactive_budgets_are_not_reported() {
        let connection = init_db();
        let budgets = SqliteBudgetStore::new(connection.clone());
        let expenses = SqliteExpenseStore::new(connection.clone());
        let incomes = SqliteIncomeStore::new(connection.clone());
        let categories = SqliteCategoryStore::new(connection.clone());
        let sources = SqliteSourceStore::new(connection);

        let today = date!(2024 - 03 - 15);
        budgets
            .create(NewBudget {
                owner_id: 1,
                category_id: None,
                amount: 100.0,
                start_date: date!(2024 - 01 - 01),
                end_date: date!(2024 - 01 - 31),
            })
            .unwrap();

        let report =
            budget_report(&budgets, &expenses, &incomes, &categories, &sources, 1, today).unwrap();

        assert!(report.budgets.is_empty());
    }
}
