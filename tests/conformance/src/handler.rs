//! Event Correlation Handler
//!
//! Pairs one dispatched request with its response event and judges it
//! against the expected payload.
//!
//! Ordering is carried by the types: a [`Listening`] token exists only once a
//! subscription is open, transport init needs a reference to it, and
//! dispatch consumes it to produce the [`PendingResponse`].

use crate::core::{CoreEvent, EventKind, EventStream, RequestId};
use crate::validation::{diff_values, DiffReport, Difference};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Open subscription waiting for its request to be dispatched
#[derive(Debug)]
pub struct Listening {
    handle_id: Uuid,
    stream: EventStream,
    expected: Value,
}

impl Listening {
    pub(crate) fn new(handle_id: Uuid, stream: EventStream, expected: Value) -> Self {
        Self {
            handle_id,
            stream,
            expected,
        }
    }

    /// Core handle this token was issued by
    pub fn handle_id(&self) -> Uuid {
        self.handle_id
    }

    pub(crate) fn into_pending(self, request_id: RequestId) -> PendingResponse {
        PendingResponse {
            request_id,
            stream: self.stream,
            expected: self.expected,
            outcome: None,
        }
    }
}

/// What [`PendingResponse::observe`] did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Not a response to this request
    Ignored,
    /// First matching response; the outcome is now fixed
    Resolved,
    /// Matching response after resolution; no effect
    Late,
}

/// Verdict of one test case
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed {
        reason: String,
        differences: Vec<Difference>,
    },
    /// The case could not be carried out
    Errored { reason: String },
    TimedOut { after_ms: u64 },
}

impl Outcome {
    pub fn errored(reason: impl fmt::Display) -> Self {
        Self::Errored {
            reason: reason.to_string(),
        }
    }

    pub fn timed_out(after: Duration) -> Self {
        Self::TimedOut {
            after_ms: after.as_millis() as u64,
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed { .. } => "FAIL",
            Self::Errored { .. } => "ERROR",
            Self::TimedOut { .. } => "TIMEOUT",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::Failed {
                reason,
                differences,
            } => {
                write!(f, "{}", reason)?;
                if !differences.is_empty() {
                    write!(f, "\n{}", DiffReport(differences))?;
                }
                Ok(())
            }
            Self::Errored { reason } => write!(f, "errored: {}", reason),
            Self::TimedOut { after_ms } => write!(f, "no response within {} ms", after_ms),
        }
    }
}

/// A dispatched request awaiting its response event
#[derive(Debug)]
pub struct PendingResponse {
    request_id: RequestId,
    stream: EventStream,
    expected: Value,
    outcome: Option<Outcome>,
}

impl PendingResponse {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Feed one event. Resolution happens at most once.
    pub fn observe(&mut self, event: &CoreEvent) -> Disposition {
        if !event.is_response_to(self.request_id) {
            if event.kind == EventKind::Response {
                debug!(request_id = %self.request_id, other = ?event.id, "Ignoring response to another request");
            } else {
                debug!(request_id = %self.request_id, kind = ?event.kind, "Ignoring core event");
            }
            return Disposition::Ignored;
        }

        if self.outcome.is_some() {
            debug!(request_id = %self.request_id, "Late response ignored");
            return Disposition::Late;
        }

        let outcome = judge(&self.expected, event);
        info!(request_id = %self.request_id, outcome = outcome.label(), "Response resolved");
        self.outcome = Some(outcome);
        Disposition::Resolved
    }

    /// Observe every event already queued, without waiting
    pub fn drain_ready(&mut self) -> Vec<Disposition> {
        let mut dispositions = Vec::new();
        while let Ok(event) = self.stream.try_recv() {
            dispositions.push(self.observe(&event));
        }
        dispositions
    }

    /// Wait for resolution
    pub async fn wait(mut self) -> Outcome {
        loop {
            if let Some(outcome) = self.outcome.take() {
                return outcome;
            }
            match self.stream.recv().await {
                Some(event) => {
                    self.observe(&event);
                }
                None => {
                    warn!(request_id = %self.request_id, "Event stream closed before a response arrived");
                    return Outcome::errored("event stream closed before a response arrived");
                }
            }
        }
    }

    pub async fn wait_timeout(self, limit: Duration) -> Outcome {
        let request_id = self.request_id;
        match tokio::time::timeout(limit, self.wait()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(%request_id, "No response within {:?}", limit);
                Outcome::timed_out(limit)
            }
        }
    }
}

fn judge(expected: &Value, event: &CoreEvent) -> Outcome {
    let differences = diff_values(expected, &event.payload);

    if !event.success {
        let message = event
            .payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("no error message");
        return Outcome::Failed {
            reason: format!("core reported failure: {}", message),
            differences,
        };
    }

    if differences.is_empty() {
        Outcome::Passed
    } else {
        Outcome::Failed {
            reason: format!(
                "response differs from expected in {} place(s)",
                differences.len()
            ),
            differences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::DifferenceKind;
    use serde_json::json;
    use tokio::sync::mpsc;
    use tracing_test::traced_test;

    fn pending(expected: Value) -> (mpsc::UnboundedSender<CoreEvent>, PendingResponse) {
        let (tx, rx) = mpsc::unbounded_channel();
        let listening = Listening::new(Uuid::new_v4(), rx, expected);
        (tx, listening.into_pending(RequestId::new()))
    }

    #[test]
    fn test_ignores_other_kinds_and_ids() {
        let (_tx, mut pending) = pending(json!({ "address": "N" }));

        let mut ui = CoreEvent::notification(EventKind::UiRequest);
        ui.id = Some(pending.request_id());
        assert_eq!(pending.observe(&ui), Disposition::Ignored);

        let foreign = CoreEvent::response(RequestId::new(), json!({ "address": "N" }));
        assert_eq!(pending.observe(&foreign), Disposition::Ignored);
        assert!(!pending.is_resolved());
    }

    #[traced_test]
    #[test]
    fn test_resolves_once_then_late() {
        let (_tx, mut pending) = pending(json!({ "address": "N" }));
        let answer = CoreEvent::response(pending.request_id(), json!({ "address": "N" }));

        assert_eq!(pending.observe(&answer), Disposition::Resolved);
        assert_eq!(pending.outcome(), Some(&Outcome::Passed));

        let mismatch = CoreEvent::response(pending.request_id(), json!({ "address": "T" }));
        assert_eq!(pending.observe(&mismatch), Disposition::Late);
        assert_eq!(pending.outcome(), Some(&Outcome::Passed));
        assert!(logs_contain("Late response ignored"));
    }

    #[test]
    fn test_failure_response_carries_core_message() {
        let (_tx, mut pending) = pending(json!({ "address": "N" }));
        let failure = CoreEvent::failure(pending.request_id(), "Device disconnected");
        pending.observe(&failure);

        match pending.outcome() {
            Some(Outcome::Failed {
                reason,
                differences,
            }) => {
                assert!(reason.contains("Device disconnected"));
                assert!(differences
                    .iter()
                    .any(|d| d.kind == DifferenceKind::MissingField && d.path == "payload.address"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wait_resolves_from_stream() {
        let (tx, pending) = pending(json!({ "address": "N" }));
        let id = pending.request_id();
        tx.send(CoreEvent::notification(EventKind::TransportReady))
            .unwrap();
        tx.send(CoreEvent::response(id, json!({ "address": "N" })))
            .unwrap();

        assert_eq!(pending.wait().await, Outcome::Passed);
    }

    #[tokio::test]
    async fn test_closed_stream_errors() {
        let (tx, pending) = pending(json!({ "address": "N" }));
        drop(tx);

        match pending.wait().await {
            Outcome::Errored { reason } => assert!(reason.contains("closed")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wait_timeout() {
        let (_tx, pending) = pending(json!({ "address": "N" }));
        let outcome = pending.wait_timeout(Duration::from_millis(20)).await;
        assert_eq!(outcome, Outcome::TimedOut { after_ms: 20 });
    }

    #[test]
    fn test_outcome_serializes_with_status() {
        let value = serde_json::to_value(Outcome::TimedOut { after_ms: 5 }).unwrap();
        assert_eq!(value, json!({ "status": "timed_out", "after_ms": 5 }));
    }
}
