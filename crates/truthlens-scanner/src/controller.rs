//! Drives a `ScanSession` through one network round trip.
//!
//! The session lock is taken only around transitions and released before the
//! request goes out, so `reset` can run while a reply is pending. Every step
//! after the exchange re-checks the attempt's ticket.

use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use truthlens_api_client::ScanTransport;
use truthlens_core::{
    Modality, PayloadRules, RawInput, ScanError, ScanResult, ScanStage, TransportError,
    ValidationError,
};
use uuid::Uuid;

use crate::normalizer::normalize;
use crate::session::{InputOutcome, ScanSession, SessionState, SubmitTicket};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StateChanged {
        session_id: Uuid,
        generation: u64,
        state: SessionState,
    },
    StageReached {
        session_id: Uuid,
        generation: u64,
        stage: ScanStage,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed(ScanResult),
    Failed(ScanError),
    /// Nothing to submit, or a request was already in flight.
    Ignored,
    /// The session was reset before the reply arrived.
    Discarded,
}

#[derive(Debug)]
pub struct ScanController<T: ScanTransport> {
    session: Arc<Mutex<ScanSession>>,
    transport: T,
    events: broadcast::Sender<SessionEvent>,
}

impl<T: ScanTransport> ScanController<T> {
    pub fn new(modality: Modality, transport: T) -> Self {
        Self::with_session(ScanSession::new(modality), transport)
    }

    pub fn with_rules(modality: Modality, rules: PayloadRules, transport: T) -> Self {
        Self::with_session(ScanSession::with_rules(modality, rules), transport)
    }

    pub fn with_session(session: ScanSession, transport: T) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            session: Arc::new(Mutex::new(session)),
            transport,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Copy of the session as it is right now.
    pub async fn snapshot(&self) -> ScanSession {
        self.session.lock().await.clone()
    }

    pub async fn acquire_input(&self, input: RawInput) -> Result<InputOutcome, ValidationError> {
        let mut session = self.session.lock().await;
        let before = Marker::of(&session);
        let outcome = session.acquire_input(input);
        self.publish(&session, before);
        outcome
    }

    pub async fn reset(&self) {
        let mut session = self.session.lock().await;
        let before = Marker::of(&session);
        session.reset();
        self.publish(&session, before);
    }

    /// Submit the collected payload and wait for the outcome.
    pub async fn submit(&self) -> SubmitOutcome {
        let ticket = {
            let mut session = self.session.lock().await;
            let before = Marker::of(&session);
            let Some(ticket) = session.begin_submit() else {
                return SubmitOutcome::Ignored;
            };
            self.publish(&session, before);
            if session.tracks_progress() {
                self.emit(SessionEvent::StageReached {
                    session_id: ticket.session_id,
                    generation: ticket.generation,
                    stage: session.stage(),
                });
            }
            ticket
        };

        let reply = match self.transport.send(&ticket.payload).await {
            Ok(reply) => reply,
            Err(e) => return self.fail(&ticket, e).await,
        };

        if !self.step(&ticket, ScanSession::record_response).await {
            return SubmitOutcome::Discarded;
        }

        let raw = match reply.into_raw() {
            Ok(raw) => raw,
            Err(e) => return self.fail(&ticket, e).await,
        };

        if !self.step(&ticket, ScanSession::record_parsed).await {
            return SubmitOutcome::Discarded;
        }

        let result = normalize(&raw, ticket.payload.modality());

        if !self.step(&ticket, ScanSession::record_normalized).await {
            return SubmitOutcome::Discarded;
        }

        let completed = {
            let stored = result.clone();
            self.step(&ticket, move |session, ticket| {
                session.complete(ticket, stored)
            })
            .await
        };
        if !completed {
            return SubmitOutcome::Discarded;
        }

        SubmitOutcome::Completed(result)
    }

    async fn fail(&self, ticket: &SubmitTicket, error: TransportError) -> SubmitOutcome {
        let failure = ScanError::Transport(error.clone());
        if self
            .step(ticket, move |session, ticket| session.fail(ticket, error))
            .await
        {
            SubmitOutcome::Failed(failure)
        } else {
            SubmitOutcome::Discarded
        }
    }

    /// Apply one ticket-checked transition under the lock and publish its effects.
    async fn step<F>(&self, ticket: &SubmitTicket, transition: F) -> bool
    where
        F: FnOnce(&mut ScanSession, &SubmitTicket) -> bool,
    {
        let mut session = self.session.lock().await;
        let before = Marker::of(&session);
        let applied = transition(&mut session, ticket);
        if applied {
            self.publish(&session, before);
        }
        applied
    }

    fn publish(&self, session: &ScanSession, before: Marker) {
        let after = Marker::of(session);
        if after.stage != before.stage && session.tracks_progress() {
            self.emit(SessionEvent::StageReached {
                session_id: session.id(),
                generation: session.generation(),
                stage: after.stage,
            });
        }
        if after.state != before.state {
            self.emit(SessionEvent::StateChanged {
                session_id: session.id(),
                generation: session.generation(),
                state: after.state,
            });
        }
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[derive(Debug, Clone, Copy)]
struct Marker {
    state: SessionState,
    stage: ScanStage,
}

impl Marker {
    fn of(session: &ScanSession) -> Self {
        Self {
            state: session.state(),
            stage: session.stage(),
        }
    }
}
