//! The API endpoint URIs.

/// The route for the dashboard summary.
pub const DASHBOARD: &str = "/api/dashboard";
/// The route for the budget-vs-actual report.
pub const REPORTS: &str = "/api/reports";
/// The route for the expense category chart data.
pub const EXPENSE_CATEGORY_CHART: &str = "/api/charts/expense-categories";
/// The route for the income/expense trend chart data.
pub const INCOME_EXPENSE_CHART: &str = "/api/charts/income-expense";
/// The route for the report transaction export (CSV).
pub const EXPORT_CSV: &str = "/api/export/csv";
/// The route for the dashboard transaction export (CSV).
pub const EXPORT_DASHBOARD_CSV: &str = "/api/export/dashboard-csv";
/// The route for the dashboard transaction export (PDF).
pub const EXPORT_PDF: &str = "/api/export/pdf";
/// The route to create an expense.
pub const EXPENSES: &str = "/api/expenses";
/// The route to update or delete a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to create an income.
pub const INCOMES: &str = "/api/incomes";
/// The route to update or delete a single income.
pub const INCOME: &str = "/api/incomes/{income_id}";
/// The route to create a budget.
pub const BUDGETS: &str = "/api/budgets";
/// The route to update or delete a single budget.
pub const BUDGET: &str = "/api/budgets/{budget_id}";
/// The route to create a category.
pub const CATEGORIES: &str = "/api/categories";
/// The route to rename or delete a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to create an income source.
pub const SOURCES: &str = "/api/sources";
/// The route to rename or delete a single income source.
pub const SOURCE: &str = "/api/sources/{source_id}";

/// Replace the `{...}` parameter in `endpoint_path` with `id`.
///
/// Endpoint paths here contain at most one parameter; paths without one are
/// returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => {
            let mut formatted = String::with_capacity(endpoint_path.len());
            formatted.push_str(&endpoint_path[..start]);
            formatted.push_str(&id.to_string());
            formatted.push_str(&endpoint_path[end + 1..]);
            formatted
        }
        _ => endpoint_path.to_string(),
    }
}
