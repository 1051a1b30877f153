//! The notification sender seam.
//!
//! The real mail transport lives outside this crate; handlers depend on the
//! [Notifier] trait so tests can capture sends and the server can swap in
//! whatever transport the deployment provides.

use crate::Error;

/// Sends a notification to an address.
///
/// Callers treat sending as best-effort: failures are logged and swallowed
/// at the dispatch boundary, never propagated into the triggering operation.
pub trait Notifier: Send + Sync {
    /// Send `subject`/`body` to `address`, blocking until the transport
    /// accepts or rejects it.
    fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), Error>;
}

/// A [Notifier] that writes the notification to the log instead of sending
/// it anywhere.
///
/// The default wiring for deployments without a mail transport.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, address: &str, subject: &str, _body: &str) -> Result<(), Error> {
        tracing::info!("notification to {address}: {subject}");
        Ok(())
    }
}
