//! Budget Tracker is a web service for tracking personal income and expenses,
//! enforcing per-category budgets, and producing analytical reports.
//!
//! This library provides a JSON REST API backed by SQLite. The interesting
//! parts are the reporting aggregation engine, the budget alert evaluator
//! that runs after each expense write, and the report exporter that feeds
//! the CSV and PDF endpoints.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use time::Date;
use tokio::signal;

mod alert;
mod app_state;
mod db;
pub mod endpoints;
pub mod export;
mod identity;
pub mod models;
mod notify;
mod pdf;
pub mod period;
pub mod reports;
mod routes;
pub mod stores;

pub use alert::{AlertEvent, dispatch_alerts, evaluate_expense_created};
pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use identity::{Contact, IdentityProvider, SqliteIdentityProvider};
pub use notify::{LogNotifier, Notifier};
pub use routes::build_router;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows. It is
    /// also returned when a record exists but belongs to a different user,
    /// so the response gives no hint that the record exists at all.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A zero or negative amount was used to create or update a record.
    ///
    /// Amounts are monetary values and must be strictly positive.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    NonPositiveAmount(f64),

    /// A budget was given a window whose start date falls after its end date.
    #[error("the budget start date {0} falls after the end date {1}")]
    InvalidBudgetWindow(Date, Date),

    /// An empty string was used as a category or source name.
    #[error("name cannot be empty")]
    EmptyName,

    /// Sending a budget-exceeded notification failed.
    ///
    /// This error is caught and logged at the dispatch boundary and must
    /// never propagate into the expense-creation response.
    #[error("could not send notification: {0}")]
    NotificationFailed(String),

    /// An error occurred while writing CSV output.
    #[error("could not write CSV: {0}")]
    CsvError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::NonPositiveAmount(_) | Error::InvalidBudgetWindow(_, _) | Error::EmptyName => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            ref error => {
                tracing::error!("An unexpected error occurred: {}", error);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response();
            }
        };

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
