//! The reporting engine: aggregation primitives and report assembly.

pub mod aggregation;
pub mod summary;

pub use aggregation::{
    BreakdownEntry, BudgetStatus, TrendSeries, UNCATEGORIZED_LABEL, budget_status,
    forecast_next_month, monthly_trend, resolve_label, round_cents, sum_by_category,
    sum_by_source,
};
pub use summary::{
    BudgetReport, CategoryChartData, DashboardSummary, budget_report, dashboard_summary,
    expense_category_data, income_expense_trend,
};
