//! One scan's lifecycle as a plain value object.
//!
//! Transitions after `begin_submit` take the `SubmitTicket` issued for the
//! attempt and are refused when the ticket's generation is no longer current,
//! which is how replies for a reset session get dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use truthlens_core::{
    build_payload, ContentPayload, ErrorMetadata, LogLevel, Modality, PayloadRules, Preview,
    RawInput, ScanError, ScanResult, ScanStage, TransportError, ValidationError,
};
use uuid::Uuid;

use crate::progress::ProgressTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Collecting,
    Submitting,
    InProgress,
    Completed,
    Failed,
}

impl SessionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SessionState::Submitting | SessionState::InProgress)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Failed)
    }
}

impl Display for SessionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Collecting => "collecting",
            SessionState::Submitting => "submitting",
            SessionState::InProgress => "in_progress",
            SessionState::Completed => "completed",
            SessionState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Accepted,
    /// Input arrived while a request was in flight or after the scan ended.
    Ignored,
}

/// Handle for one submission attempt.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub session_id: Uuid,
    pub generation: u64,
    pub payload: ContentPayload,
}

#[derive(Debug, Clone)]
pub struct ScanSession {
    id: Uuid,
    modality: Modality,
    rules: PayloadRules,
    state: SessionState,
    payload: Option<ContentPayload>,
    preview: Option<Preview>,
    result: Option<ScanResult>,
    error: Option<ScanError>,
    progress: ProgressTracker,
    generation: u64,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl ScanSession {
    pub fn new(modality: Modality) -> Self {
        Self::with_rules(modality, PayloadRules::default())
    }

    pub fn with_rules(modality: Modality, rules: PayloadRules) -> Self {
        Self {
            id: Uuid::new_v4(),
            modality,
            rules,
            state: SessionState::Idle,
            payload: None,
            preview: None,
            result: None,
            error: None,
            progress: ProgressTracker::for_modality(modality),
            generation: 0,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn payload(&self) -> Option<&ContentPayload> {
        self.payload.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&ScanResult> {
        self.result.as_ref()
    }

    /// Validation error while collecting, transport error once failed.
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    pub fn stage(&self) -> ScanStage {
        self.progress.current()
    }

    pub fn tracks_progress(&self) -> bool {
        self.progress.is_enabled()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn can_submit(&self) -> bool {
        self.state == SessionState::Collecting
            && self.payload.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Whether `ticket` belongs to the attempt currently in flight.
    pub fn is_current(&self, ticket: &SubmitTicket) -> bool {
        ticket.session_id == self.id
            && ticket.generation == self.generation
            && self.state.is_in_flight()
    }

    pub fn acquire_input(&mut self, input: RawInput) -> Result<InputOutcome, ValidationError> {
        if self.state.is_in_flight() || self.state.is_terminal() {
            tracing::debug!(
                session_id = %self.id,
                state = %self.state,
                "Ignoring input for busy or finished session"
            );
            return Ok(InputOutcome::Ignored);
        }

        self.state = SessionState::Collecting;

        match build_payload(self.modality, input, &self.rules) {
            Ok(payload) => {
                tracing::debug!(
                    session_id = %self.id,
                    modality = %self.modality,
                    payload = ?payload,
                    "Input accepted"
                );
                self.preview = payload.preview();
                self.payload = Some(payload);
                self.error = None;
                Ok(InputOutcome::Accepted)
            }
            Err(e) => {
                // The previously accepted payload, if any, stays selected.
                let error = ScanError::Validation(e.clone());
                log_error(self, &error);
                self.error = Some(error);
                Err(e)
            }
        }
    }

    /// Start a submission. `None` when there is nothing to submit or a
    /// request is already in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.can_submit() {
            tracing::debug!(
                session_id = %self.id,
                state = %self.state,
                "Submit ignored"
            );
            return None;
        }
        let payload = self.payload.clone()?;

        self.generation += 1;
        self.state = SessionState::Submitting;
        self.result = None;
        self.error = None;
        self.progress.reset();
        self.started_at = Some(Utc::now());
        self.finished_at = None;

        tracing::info!(
            session_id = %self.id,
            generation = self.generation,
            modality = %self.modality,
            "Scan submitted"
        );

        Some(SubmitTicket {
            session_id: self.id,
            generation: self.generation,
            payload,
        })
    }

    /// The HTTP exchange returned, whatever its status.
    pub fn record_response(&mut self, ticket: &SubmitTicket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state = SessionState::InProgress;
        self.progress.advance(ScanStage::AwaitingResponse);
        true
    }

    /// The body parsed into a raw response object.
    pub fn record_parsed(&mut self, ticket: &SubmitTicket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.progress.advance(ScanStage::Parsing);
        true
    }

    /// The raw response was normalized into a result.
    pub fn record_normalized(&mut self, ticket: &SubmitTicket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.progress.advance(ScanStage::Finalizing);
        true
    }

    pub fn complete(&mut self, ticket: &SubmitTicket, result: ScanResult) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.progress.advance(ScanStage::Done);
        tracing::info!(
            session_id = %self.id,
            generation = self.generation,
            modality = %self.modality,
            verdict = %result.verdict,
            confidence = result.confidence,
            "Scan completed"
        );
        self.result = Some(result);
        self.state = SessionState::Completed;
        self.finished_at = Some(Utc::now());
        true
    }

    /// Stage stays where the attempt stopped.
    pub fn fail(&mut self, ticket: &SubmitTicket, error: TransportError) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        let error = ScanError::Transport(error);
        log_error(self, &error);
        self.error = Some(error);
        self.state = SessionState::Failed;
        self.finished_at = Some(Utc::now());
        true
    }

    /// Back to `Idle`; anything still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SessionState::Idle;
        self.payload = None;
        self.preview = None;
        self.result = None;
        self.error = None;
        self.progress.reset();
        self.started_at = None;
        self.finished_at = None;
        tracing::debug!(
            session_id = %self.id,
            generation = self.generation,
            "Session reset"
        );
    }

    fn accepts(&self, ticket: &SubmitTicket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            tracing::debug!(
                session_id = %self.id,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "Dropping stale scan reply"
            );
        }
        current
    }
}

fn log_error(session: &ScanSession, error: &ScanError) {
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(
                session_id = %session.id,
                modality = %session.modality,
                error = %error,
                error_code = error_code,
                "Input rejected"
            );
        }
        LogLevel::Warn => {
            tracing::warn!(
                session_id = %session.id,
                generation = session.generation,
                stage = %session.progress.current(),
                error = %error,
                error_code = error_code,
                "Scan failed"
            );
        }
        LogLevel::Error => {
            tracing::error!(
                session_id = %session.id,
                generation = session.generation,
                stage = %session.progress.current(),
                error = %error,
                error_code = error_code,
                "Scan failed"
            );
        }
    }
}
