#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, Notify};
use truthlens_api_client::{ScanTransport, TransportReply};
use truthlens_core::{ContentPayload, ScanStage, TransportError};
use truthlens_scanner::{SessionEvent, SessionState};

/// Transport that answers from a script and counts how often it was called.
///
/// A gated transport signals `entered` once a request is in flight and then
/// waits for `release` before answering.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<TransportReply, TransportError>>>,
    sent: Mutex<Vec<ContentPayload>>,
    calls: AtomicUsize,
    gate: Option<Gate>,
}

#[derive(Debug, Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl ScriptedTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self::default().then_reply(status, body)
    }

    pub fn failing(error: TransportError) -> Self {
        let transport = Self::default();
        transport.push(Err(error));
        transport
    }

    pub fn then_reply(self, status: u16, body: &str) -> Self {
        self.push(Ok(TransportReply::new(status, body.to_string())));
        self
    }

    /// Hold every request until the returned gate is released.
    pub fn gated(mut self) -> (Self, Gate) {
        let gate = Gate::default();
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<ContentPayload> {
        self.sent.lock().unwrap().clone()
    }

    fn push(&self, reply: Result<TransportReply, TransportError>) {
        self.replies.lock().unwrap().push_back(reply);
    }
}

#[async_trait]
impl ScanTransport for ScriptedTransport {
    async fn send(&self, payload: &ContentPayload) -> Result<TransportReply, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(payload.clone());

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(TransportReply::new(200, "{}")))
    }
}

/// Everything published so far, without waiting.
pub fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn stages(events: &[SessionEvent]) -> Vec<ScanStage> {
    events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::StageReached { stage, .. } => Some(*stage),
            _ => None,
        })
        .collect()
}

pub fn states(events: &[SessionEvent]) -> Vec<SessionState> {
    events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::StateChanged { state, .. } => Some(*state),
            _ => None,
        })
        .collect()
}
