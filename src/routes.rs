//! Application router configuration and the JSON API route handlers.
//!
//! All routes take the acting user as an explicit `user_id`; authentication
//! happens upstream of this service and is out of scope here.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    alert::{AlertEvent, dispatch_alerts, evaluate_expense_created},
    endpoints,
    identity::IdentityProvider,
    export::{build_transaction_rows, write_dashboard_csv, write_report_csv},
    models::{
        Budget, DatabaseId, Expense, Income, NewBudget, NewCategory, NewExpense, NewIncome,
        NewSource, UserId,
    },
    pdf::render_transactions_pdf,
    period::month_bounds,
    reports::summary::{
        budget_report, category_labels, dashboard_summary, expense_category_data,
        income_expense_trend, source_labels,
    },
    stores::{BudgetStore, CategoryStore, ExpenseStore, IncomeStore, SourceStore},
};

/// The title line on the PDF export.
const PDF_REPORT_TITLE: &str = "Expense Tracker Report";

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::DASHBOARD, get(get_dashboard))
        .route(endpoints::REPORTS, get(get_reports))
        .route(endpoints::EXPENSE_CATEGORY_CHART, get(get_expense_category_chart))
        .route(endpoints::INCOME_EXPENSE_CHART, get(get_income_expense_chart))
        .route(endpoints::EXPORT_CSV, get(get_report_csv))
        .route(endpoints::EXPORT_DASHBOARD_CSV, get(get_dashboard_csv))
        .route(endpoints::EXPORT_PDF, get(get_transactions_pdf))
        .route(endpoints::EXPENSES, get(list_expenses).post(create_expense))
        .route(endpoints::EXPENSE, put(update_expense).delete(delete_expense))
        .route(endpoints::INCOMES, get(list_incomes).post(create_income))
        .route(endpoints::INCOME, put(update_income).delete(delete_income))
        .route(endpoints::BUDGETS, get(list_budgets).post(create_budget))
        .route(endpoints::BUDGET, put(update_budget).delete(delete_budget))
        .route(endpoints::CATEGORIES, get(list_categories).post(create_category))
        .route(endpoints::CATEGORY, put(rename_category).delete(delete_category))
        .route(endpoints::SOURCES, get(list_sources).post(create_source))
        .route(endpoints::SOURCE, put(rename_source).delete(delete_source))
        .with_state(state)
}

/// Identifies the acting user on routes without a request body.
#[derive(Debug, Deserialize)]
struct OwnerQuery {
    user_id: UserId,
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let summary = dashboard_summary(
        &state.expense_store(),
        &state.income_store(),
        &state.category_store(),
        query.user_id,
        today(),
    )?;

    Ok(Json(summary).into_response())
}

async fn get_reports(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let report = budget_report(
        &state.budget_store(),
        &state.expense_store(),
        &state.income_store(),
        &state.category_store(),
        &state.source_store(),
        query.user_id,
        today(),
    )?;

    Ok(Json(report).into_response())
}

async fn get_expense_category_chart(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let chart_data =
        expense_category_data(&state.expense_store(), &state.category_store(), query.user_id)?;

    Ok(Json(chart_data).into_response())
}

async fn get_income_expense_chart(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let trend = income_expense_trend(
        &state.expense_store(),
        &state.income_store(),
        query.user_id,
        today(),
    )?;

    Ok(Json(trend).into_response())
}

fn attachment(content_type: &'static str, file_name: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

async fn get_report_csv(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let expenses = state.expense_store().get_by_owner(query.user_id, None)?;
    let incomes = state.income_store().get_by_owner(query.user_id, None)?;
    let csv = write_report_csv(
        &expenses,
        &incomes,
        &category_labels(&state.category_store(), query.user_id)?,
        &source_labels(&state.source_store(), query.user_id)?,
    )?;

    Ok(attachment("text/csv", "transactions.csv", csv))
}

async fn get_dashboard_csv(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let rows = transaction_rows(&state, query.user_id)?;
    let csv = write_dashboard_csv(&rows)?;

    Ok(attachment("text/csv", "expense_report.csv", csv))
}

async fn get_transactions_pdf(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let rows = transaction_rows(&state, query.user_id)?;
    let pdf = render_transactions_pdf(PDF_REPORT_TITLE, &rows);

    Ok(attachment("application/pdf", "expense_report.pdf", pdf))
}

fn transaction_rows(
    state: &AppState,
    user_id: UserId,
) -> Result<Vec<crate::export::TransactionRow>, Error> {
    let expenses = state.expense_store().get_by_owner(user_id, None)?;
    let incomes = state.income_store().get_by_owner(user_id, None)?;

    Ok(build_transaction_rows(
        &expenses,
        &incomes,
        &category_labels(&state.category_store(), user_id)?,
        &source_labels(&state.source_store(), user_id)?,
    ))
}

async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let expenses = state.expense_store().get_by_owner(query.user_id, None)?;

    Ok(Json(expenses).into_response())
}

async fn list_incomes(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let incomes = state.income_store().get_by_owner(query.user_id, None)?;

    Ok(Json(incomes).into_response())
}

async fn list_budgets(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let budgets = state.budget_store().get_by_owner(query.user_id)?;

    Ok(Json(budgets).into_response())
}

async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let categories = state.category_store().get_visible(query.user_id)?;

    Ok(Json(categories).into_response())
}

async fn list_sources(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    let sources = state.source_store().get_visible(query.user_id)?;

    Ok(Json(sources).into_response())
}

/// The response to a successful expense creation.
#[derive(Debug, Serialize)]
struct ExpenseCreated {
    expense: Expense,
    /// One warning message per budget the expense pushed over its limit.
    warnings: Vec<String>,
}

async fn create_expense(
    State(state): State<AppState>,
    Json(new_expense): Json<NewExpense>,
) -> Result<Response, Error> {
    new_expense.validate()?;
    let expense = state.expense_store().create(new_expense)?;

    let warnings = run_alert_pipeline(&state, &expense)
        .iter()
        .map(AlertEvent::warning_message)
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(ExpenseCreated { expense, warnings }),
    )
        .into_response())
}

/// Evaluate budget alerts for a committed expense and dispatch notifications.
///
/// The expense write has already succeeded, so nothing in here may fail the
/// request: evaluation or contact lookup errors are logged and produce no
/// warnings, and notification failures are swallowed by [dispatch_alerts].
fn run_alert_pipeline(state: &AppState, expense: &Expense) -> Vec<AlertEvent> {
    let events = category_labels(&state.category_store(), expense.owner_id).and_then(|labels| {
        evaluate_expense_created(expense, &state.budget_store(), &state.expense_store(), &labels)
    });

    let events = match events {
        Ok(events) => events,
        Err(error) => {
            tracing::error!("budget alert evaluation failed: {error}");
            return Vec::new();
        }
    };

    match state.identity_provider().contact(expense.owner_id) {
        Ok(contact) => dispatch_alerts(&events, contact.as_ref(), state.notifier.as_ref()),
        Err(error) => tracing::error!("contact lookup for alert dispatch failed: {error}"),
    }

    events
}

async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<DatabaseId>,
    Json(new_expense): Json<NewExpense>,
) -> Result<Response, Error> {
    new_expense.validate()?;

    let expense = Expense {
        id: expense_id,
        owner_id: new_expense.owner_id,
        category_id: new_expense.category_id,
        amount: new_expense.amount,
        date: new_expense.date,
        description: new_expense.description,
    };
    state.expense_store().update(&expense)?;

    Ok(Json(expense).into_response())
}

async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<DatabaseId>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    state.expense_store().delete(expense_id, query.user_id)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn create_income(
    State(state): State<AppState>,
    Json(new_income): Json<NewIncome>,
) -> Result<Response, Error> {
    new_income.validate()?;
    let income = state.income_store().create(new_income)?;

    Ok((StatusCode::CREATED, Json(income)).into_response())
}

async fn update_income(
    State(state): State<AppState>,
    Path(income_id): Path<DatabaseId>,
    Json(new_income): Json<NewIncome>,
) -> Result<Response, Error> {
    new_income.validate()?;

    let income = Income {
        id: income_id,
        owner_id: new_income.owner_id,
        source_id: new_income.source_id,
        amount: new_income.amount,
        date: new_income.date,
        description: new_income.description,
    };
    state.income_store().update(&income)?;

    Ok(Json(income).into_response())
}

async fn delete_income(
    State(state): State<AppState>,
    Path(income_id): Path<DatabaseId>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    state.income_store().delete(income_id, query.user_id)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// The data accepted when creating a budget.
///
/// The window dates are optional; a budget created without them covers the
/// current calendar month.
#[derive(Debug, Deserialize)]
struct BudgetPayload {
    owner_id: UserId,
    category_id: Option<DatabaseId>,
    amount: f64,
    start_date: Option<Date>,
    end_date: Option<Date>,
}

async fn create_budget(
    State(state): State<AppState>,
    Json(payload): Json<BudgetPayload>,
) -> Result<Response, Error> {
    let (month_start, month_end) = month_bounds(today());
    let new_budget = NewBudget {
        owner_id: payload.owner_id,
        category_id: payload.category_id,
        amount: payload.amount,
        start_date: payload.start_date.unwrap_or(month_start),
        end_date: payload.end_date.unwrap_or(month_end),
    };
    new_budget.validate()?;

    let budget = state.budget_store().create(new_budget)?;

    Ok((StatusCode::CREATED, Json(budget)).into_response())
}

async fn update_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<DatabaseId>,
    Json(new_budget): Json<NewBudget>,
) -> Result<Response, Error> {
    new_budget.validate()?;

    let budget = Budget {
        id: budget_id,
        owner_id: new_budget.owner_id,
        category_id: new_budget.category_id,
        amount: new_budget.amount,
        start_date: new_budget.start_date,
        end_date: new_budget.end_date,
    };
    state.budget_store().update(&budget)?;

    Ok(Json(budget).into_response())
}

async fn delete_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<DatabaseId>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    state.budget_store().delete(budget_id, query.user_id)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn create_category(
    State(state): State<AppState>,
    Json(new_category): Json<NewCategory>,
) -> Result<Response, Error> {
    new_category.validate()?;
    let category = state.category_store().create(new_category)?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}

/// The data accepted when renaming a category or source.
#[derive(Debug, Deserialize)]
struct RenamePayload {
    owner_id: UserId,
    name: String,
}

async fn rename_category(
    State(state): State<AppState>,
    Path(category_id): Path<DatabaseId>,
    Json(payload): Json<RenamePayload>,
) -> Result<Response, Error> {
    if payload.name.trim().is_empty() {
        return Err(Error::EmptyName);
    }

    state
        .category_store()
        .rename(category_id, payload.owner_id, &payload.name)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<DatabaseId>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    state.category_store().delete(category_id, query.user_id)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn create_source(
    State(state): State<AppState>,
    Json(new_source): Json<NewSource>,
) -> Result<Response, Error> {
    new_source.validate()?;
    let source = state.source_store().create(new_source)?;

    Ok((StatusCode::CREATED, Json(source)).into_response())
}

async fn rename_source(
    State(state): State<AppState>,
    Path(source_id): Path<DatabaseId>,
    Json(payload): Json<RenamePayload>,
) -> Result<Response, Error> {
    if payload.name.trim().is_empty() {
        return Err(Error::EmptyName);
    }

    state
        .source_store()
        .rename(source_id, payload.owner_id, &payload.name)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn delete_source(
    State(state): State<AppState>,
    Path(source_id): Path<DatabaseId>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, Error> {
    state.source_store().delete(source_id, query.user_id)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
