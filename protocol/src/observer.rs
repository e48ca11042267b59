//! Accept/reject observability.
//!
//! Engines report every decision through an injected observer instead of
//! global logging state, so multiple concurrent runs can log (or record)
//! independently. The stock [`TracingObserver`] maps events onto
//! structured `tracing` records; [`RecordingObserver`] captures them for
//! assertions in tests.

use crate::SubmissionKind;
use fairseed_types::{Address, MerkleRoot, Randomness};
use std::sync::Mutex;

/// A protocol decision or state transition, reported after the fact.
#[derive(Clone, Debug)]
pub enum ProtocolEvent {
    ParticipantRegistered {
        address: Address,
    },
    SubmissionAccepted {
        address: Address,
        kind: SubmissionKind,
    },
    SubmissionRejected {
        address: Address,
        kind: SubmissionKind,
        reason: String,
    },
    /// A phase boundary was crossed; carries the name of the phase entered.
    PhaseAdvanced {
        phase: &'static str,
    },
    RevealOrderFixed {
        order: Vec<Address>,
    },
    MerkleRootComputed {
        root: MerkleRoot,
    },
    Finalized {
        randomness: Randomness,
    },
    Reset,
}

/// Callback invoked by an engine after each accept/reject decision and
/// state transition.
pub trait ProtocolObserver: Send + Sync {
    fn on_event(&self, event: &ProtocolEvent);
}

// Lets a caller hand an engine a shared observer and keep a handle to it
// (e.g. an Arc<RecordingObserver> inspected after the run).
impl<T: ProtocolObserver + ?Sized> ProtocolObserver for std::sync::Arc<T> {
    fn on_event(&self, event: &ProtocolEvent) {
        (**self).on_event(event);
    }
}

/// Observer that emits structured `tracing` records.
pub struct TracingObserver;

impl ProtocolObserver for TracingObserver {
    fn on_event(&self, event: &ProtocolEvent) {
        match event {
            ProtocolEvent::ParticipantRegistered { address } => {
                tracing::info!(%address, "participant registered");
            }
            ProtocolEvent::SubmissionAccepted { address, kind } => {
                tracing::info!(%address, %kind, "submission accepted");
            }
            ProtocolEvent::SubmissionRejected {
                address,
                kind,
                reason,
            } => {
                tracing::warn!(%address, %kind, %reason, "submission rejected");
            }
            ProtocolEvent::PhaseAdvanced { phase } => {
                tracing::info!(phase = *phase, "phase advanced");
            }
            ProtocolEvent::RevealOrderFixed { order } => {
                tracing::info!(participants = order.len(), "reveal order fixed");
            }
            ProtocolEvent::MerkleRootComputed { root } => {
                tracing::info!(%root, "merkle root computed");
            }
            ProtocolEvent::Finalized { randomness } => {
                tracing::info!(%randomness, "final randomness computed");
            }
            ProtocolEvent::Reset => {
                tracing::info!("engine state reset");
            }
        }
    }
}

/// Observer that records every event for later inspection.
///
/// Deterministic test double in the spirit of nullable infrastructure:
/// no I/O, programmatically inspectable.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ProtocolEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<ProtocolEvent> {
        self.events.lock().expect("observer mutex poisoned").clone()
    }
}

impl ProtocolObserver for RecordingObserver {
    fn on_event(&self, event: &ProtocolEvent) {
        self.events
            .lock()
            .expect("observer mutex poisoned")
            .push(event.clone());
    }
}
