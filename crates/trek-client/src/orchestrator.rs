use protocol::detail::FailureDetail;
use protocol::PredictionRequest;
use serde_json::Value;
use tokio::sync::watch;

use crate::render::{render, Assessment};
use crate::transport::{PredictionTransport, RawReply};

pub const MALFORMED_RESPONSE_MESSAGE: &str = "Request failed. Is the backend running?";
pub const UNREACHABLE_MESSAGE: &str =
    "Could not reach the server. Start the backend with: uvicorn backend.app:app --reload";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl InteractionState {
    pub fn submit_enabled(self) -> bool {
        self != Self::Submitting
    }
}

/// What the result region currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Empty,
    InProgress,
    Assessment(Assessment),
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub state: InteractionState,
    pub view: View,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitFailure {
    #[error("{0}")]
    Validation(String),
    #[error("{}", MALFORMED_RESPONSE_MESSAGE)]
    MalformedResponse,
    #[error("{}", UNREACHABLE_MESSAGE)]
    Transport,
}

impl SubmitFailure {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected because a request was already in flight.
    Ignored,
    Succeeded(Assessment),
    Failed(SubmitFailure),
}

/// Owns the interaction state and drives one prediction request at a time.
pub struct Orchestrator<T> {
    transport: T,
    display: watch::Sender<Snapshot>,
}

impl<T: PredictionTransport> Orchestrator<T> {
    pub fn new(transport: T) -> Self {
        let (display, _) = watch::channel(Snapshot::default());
        Self { transport, display }
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.display.subscribe()
    }

    pub fn state(&self) -> InteractionState {
        self.display.borrow().state
    }

    pub fn view(&self) -> View {
        self.display.borrow().view.clone()
    }

    pub async fn submit(&self, request: PredictionRequest) -> SubmitOutcome {
        let accepted = self.display.send_if_modified(|display| {
            if !display.state.submit_enabled() {
                return false;
            }
            display.state = InteractionState::Submitting;
            display.view = View::InProgress;
            true
        });
        if !accepted {
            tracing::debug!(
                event = "predict.submit.ignored",
                "submit ignored while a request is in flight"
            );
            return SubmitOutcome::Ignored;
        }
        let _reactivate = Reactivate(&self.display);

        tracing::info!(
            event = "predict.request",
            location = %request.location,
            "submitting prediction request"
        );
        let outcome = match self.transport.predict(&request).await {
            Ok(reply) => classify_reply(&reply),
            Err(err) => {
                tracing::warn!(
                    event = "predict.transport_failed",
                    error = %err,
                    "prediction service unreachable"
                );
                Err(SubmitFailure::Transport)
            }
        };

        match outcome {
            Ok(body) => {
                let assessment = render(&body);
                tracing::info!(
                    event = "predict.succeeded",
                    risk_level = %assessment.risk_level,
                    safety_score = assessment.safety_score,
                    "prediction rendered"
                );
                self.finish(
                    InteractionState::Succeeded,
                    View::Assessment(assessment.clone()),
                );
                SubmitOutcome::Succeeded(assessment)
            }
            Err(failure) => {
                tracing::info!(
                    event = "predict.failed",
                    error = %failure,
                    "prediction failed"
                );
                self.finish(InteractionState::Failed, View::Error(failure.message()));
                SubmitOutcome::Failed(failure)
            }
        }
    }

    fn finish(&self, state: InteractionState, view: View) {
        self.display.send_replace(Snapshot { state, view });
    }
}

/// Turns a completed exchange into the parsed success body or a failure.
pub fn classify_reply(reply: &RawReply) -> Result<Value, SubmitFailure> {
    let body: Value = match serde_json::from_slice(&reply.body) {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(
                event = "predict.body_unparseable",
                status = reply.status,
                error = %err,
                "response body is not json"
            );
            return Err(SubmitFailure::MalformedResponse);
        }
    };
    if reply.is_success() {
        return Ok(body);
    }
    match FailureDetail::from_body(&body).message() {
        Some(message) => Err(SubmitFailure::Validation(message)),
        None => Err(SubmitFailure::MalformedResponse),
    }
}

// Re-enables submission if the in-flight future is dropped before finishing.
struct Reactivate<'a>(&'a watch::Sender<Snapshot>);

impl Drop for Reactivate<'_> {
    fn drop(&mut self) {
        self.0.send_if_modified(|display| {
            if display.state != InteractionState::Submitting {
                return false;
            }
            display.state = InteractionState::Idle;
            display.view = View::Empty;
            true
        });
    }
}
