//! The budget alert evaluator.
//!
//! Runs synchronously after an expense write commits, and only then: edits,
//! deletions, and budget changes do not re-evaluate. Evaluation returns
//! plain [AlertEvent] values; notification I/O happens separately in
//! [dispatch_alerts] so tests can assert on the events without a mail
//! transport.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    Error,
    identity::Contact,
    models::{DatabaseId, Expense},
    notify::Notifier,
    reports::aggregation::{UNCATEGORIZED_LABEL, resolve_label, round_cents},
    stores::{BudgetStore, ExpenseStore},
};

/// A budget that was exceeded by a just-recorded expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    /// The ID of the exceeded budget.
    pub budget_id: DatabaseId,
    /// The budget's category name.
    pub category: String,
    /// The budget's spending limit.
    pub limit: f64,
    /// Total spent in the budget window, including the triggering expense.
    pub spent: f64,
}

impl AlertEvent {
    /// The warning message shown to the user in the create-expense response.
    pub fn warning_message(&self) -> String {
        format!(
            "Alert: You have exceeded your budget for {}!",
            self.category
        )
    }

    /// The subject line for the notification email.
    pub fn email_subject(&self) -> String {
        format!("Budget Exceeded Alert: {}", self.category)
    }

    /// The body for the notification email, addressed to `name`.
    pub fn email_body(&self, name: &str) -> String {
        format!(
            "Dear {name},\n\n\
            You have exceeded your budget for {category}.\n\n\
            Budget Limit: {limit:.2}\n\
            Total Expenses: {spent:.2}\n\n\
            Please review your expenses.\n\n\
            Best regards,\n\
            Budget Tracker App\n",
            category = self.category,
            limit = self.limit,
            spent = self.spent,
        )
    }
}

/// Determine which of the owner's budgets the just-created `expense` pushed
/// over their limit.
///
/// The expense must already be committed so the recomputed `spent` includes
/// it. An expense with no category never triggers evaluation. Every budget
/// for the expense's category whose window contains the expense date is
/// checked independently, so overlapping budgets can produce several events
/// from one expense.
///
/// An alert fires iff `spent > limit` strictly; landing exactly on the limit
/// does not fire.
pub fn evaluate_expense_created(
    expense: &Expense,
    budgets: &impl BudgetStore,
    expenses: &impl ExpenseStore,
    category_labels: &HashMap<DatabaseId, String>,
) -> Result<Vec<AlertEvent>, Error> {
    let Some(category_id) = expense.category_id else {
        return Ok(Vec::new());
    };

    let mut events = Vec::new();

    for budget in budgets.get_matching(expense.owner_id, category_id, expense.date)? {
        let window_expenses =
            expenses.get_by_owner(expense.owner_id, Some(budget.start_date..=budget.end_date))?;
        let spent: f64 = window_expenses
            .iter()
            .filter(|window_expense| window_expense.category_id == Some(category_id))
            .map(|window_expense| window_expense.amount)
            .sum();
        let spent = round_cents(spent);

        if spent > budget.amount {
            events.push(AlertEvent {
                budget_id: budget.id,
                category: resolve_label(Some(category_id), category_labels, UNCATEGORIZED_LABEL),
                limit: budget.amount,
                spent,
            });
        }
    }

    Ok(events)
}

/// Send a notification for each alert event, best-effort.
///
/// A missing contact or missing address silently skips dispatch; a transport
/// failure is logged and swallowed. Nothing here can fail the expense write
/// that triggered the alerts.
pub fn dispatch_alerts(events: &[AlertEvent], contact: Option<&Contact>, notifier: &dyn Notifier) {
    let Some(contact) = contact else {
        return;
    };
    let Some(address) = contact.email.as_deref() else {
        return;
    };

    for event in events {
        if let Err(error) = notifier.send(
            address,
            &event.email_subject(),
            &event.email_body(&contact.name),
        ) {
            tracing::warn!(
                "failed to send budget alert for {} to {address}: {error}",
                event.category
            );
        }
    }
}


#[cfg(test)]
mod dispatch_tests {
    use std::sync::Mutex;

    use crate::{
        Error,
        alert::{AlertEvent, dispatch_alerts},
        identity::Contact,
        notify::Notifier,
    };

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String, String)>>,
        fail: bool,
    }

    impl Notifier for RecordingNotifier {
        fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), Error> {
            if self.fail {
                return Err(Error::NotificationFailed("SMTP unreachable".to_string()));
            }

            self.sent.lock().unwrap().push((
                address.to_string(),
                subject.to_string(),
                body.to_string(),
            ));
            Ok(())
        }
    }

    fn event() -> AlertEvent {
        AlertEvent {
            budget_id: 1,
            category: "Food".to_string(),
            limit: 100.0,
            spent: 150.0,
        }
    }

    fn contact(email: Option<&str>) -> Contact {
        Contact {
            name: "alice".to_string(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn sends_one_notification_per_event() {
        let notifier = RecordingNotifier::default();

        dispatch_alerts(
            &[event(), event()],
            Some(&contact(Some("alice@example.com"))),
            &notifier,
        );

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "alice@example.com");
        assert_eq!(sent[0].1, "Budget Exceeded Alert: Food");
        assert!(sent[0].2.contains("Dear alice,"));
        assert!(sent[0].2.contains("Budget Limit: 100.00"));
        assert!(sent[0].2.contains("Total Expenses: 150.00"));
    }

    #[test]
    fn missing_address_skips_dispatch_silently() {
        let notifier = RecordingNotifier::default();

        dispatch_alerts(&[event()], Some(&contact(None)), &notifier);
        dispatch_alerts(&[event()], None, &notifier);

        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn transport_failure_is_swallowed() {
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };

        // Must not panic or propagate.
        dispatch_alerts(
            &[event()],
            Some(&contact(Some("alice@example.com"))),
            &notifier,
        );
    }
}
