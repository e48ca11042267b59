//! Direct topology: the authoritative phase machine.
//!
//! Every participant submits straight to this engine:
//! `COMMIT → REVEAL1 → REVEAL2 → DONE`, advancing automatically when the
//! last registered participant completes the current round. REVEAL-2 is
//! order-enforced: only the next address in the fixed reveal order may
//! submit, which makes a withholding last revealer observable: the run
//! simply stalls in REVEAL2 until an operator `reset()`.

use crate::error::ProtocolError;
use crate::observer::{ProtocolEvent, ProtocolObserver, TracingObserver};
use crate::order::reveal_order;
use crate::phase::Phase;
use crate::store::CommitmentStore;
use crate::SubmissionKind;
use fairseed_crypto::{commit_opening, commit_secret, hash32_multi};
use fairseed_types::{Address, Commitment, Randomness, Secret};
use std::collections::BTreeSet;

pub struct DirectLedger {
    participants: BTreeSet<Address>,
    phase: Phase,
    store: CommitmentStore,
    order: Vec<Address>,
    randomness: Option<Randomness>,
    observer: Box<dyn ProtocolObserver>,
}

impl DirectLedger {
    /// Create an engine for a fixed participant set. Membership is part of
    /// the deployment, not of a run: `reset()` keeps it.
    pub fn new(participants: impl IntoIterator<Item = Address>) -> Self {
        Self::with_observer(participants, Box::new(TracingObserver))
    }

    pub fn with_observer(
        participants: impl IntoIterator<Item = Address>,
        observer: Box<dyn ProtocolObserver>,
    ) -> Self {
        Self {
            participants: participants.into_iter().collect(),
            phase: Phase::Commit,
            store: CommitmentStore::new(),
            order: Vec::new(),
            randomness: None,
            observer,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Submit the outer commitment `cv`. Valid only in COMMIT, once per
    /// address; the last acceptance advances the phase to REVEAL1.
    pub fn submit_cv(&mut self, sender: Address, cv: Commitment) -> Result<(), ProtocolError> {
        let result = self.accept_cv(sender, cv);
        self.observe_outcome(sender, SubmissionKind::Cv, &result);
        result
    }

    /// Submit the inner commitment `co`; must hash to the locked `cv`.
    /// The last acceptance fixes the reveal order and advances to REVEAL2.
    pub fn submit_co(&mut self, sender: Address, co: Commitment) -> Result<(), ProtocolError> {
        let result = self.accept_co(sender, co);
        self.observe_outcome(sender, SubmissionKind::Co, &result);
        result
    }

    /// Submit the secret `s`; must hash to the revealed `co` and must come
    /// from the next unfulfilled address in the reveal order. The last
    /// acceptance computes the final randomness and advances to DONE.
    pub fn submit_secret(&mut self, sender: Address, s: Secret) -> Result<(), ProtocolError> {
        let result = self.accept_secret(sender, s);
        self.observe_outcome(sender, SubmissionKind::Secret, &result);
        result
    }

    /// The fixed reveal order; available from REVEAL2 on.
    pub fn reveal_order(&self) -> Result<&[Address], ProtocolError> {
        if self.order.is_empty() {
            return Err(ProtocolError::IncompleteState("reveal order not yet fixed"));
        }
        Ok(&self.order)
    }

    /// The next address expected to reveal its secret, while REVEAL2 is in
    /// progress.
    pub fn next_revealer(&self) -> Option<Address> {
        if self.phase != Phase::Reveal2 {
            return None;
        }
        self.order.get(self.store.secret_count()).copied()
    }

    /// The final randomness `ω_o`; available only in DONE.
    pub fn final_randomness(&self) -> Result<Randomness, ProtocolError> {
        self.randomness
            .ok_or(ProtocolError::IncompleteState("final randomness not ready"))
    }

    /// Clear all per-run state and return to COMMIT. Membership is kept.
    /// For use between independent runs, never mid-run recovery of state.
    pub fn reset(&mut self) {
        self.phase = Phase::Commit;
        self.store.clear();
        self.order.clear();
        self.randomness = None;
        self.observer.on_event(&ProtocolEvent::Reset);
    }

    fn accept_cv(&mut self, sender: Address, cv: Commitment) -> Result<(), ProtocolError> {
        self.check_phase(Phase::Commit, SubmissionKind::Cv)?;
        self.check_membership(sender)?;
        self.store.insert_cv(sender, cv)?;

        if self.store.cv_count() == self.participants.len() {
            self.advance(Phase::Reveal1);
        }
        Ok(())
    }

    fn accept_co(&mut self, sender: Address, co: Commitment) -> Result<(), ProtocolError> {
        self.check_phase(Phase::Reveal1, SubmissionKind::Co)?;
        self.check_membership(sender)?;
        if self.store.co(&sender).is_some() {
            return Err(ProtocolError::DuplicateSubmission {
                address: sender,
                kind: SubmissionKind::Co,
            });
        }
        // All cvs are locked once REVEAL1 is reached.
        if self.store.cv(&sender) != Some(&commit_opening(&co)) {
            return Err(ProtocolError::HashChainMismatch {
                address: sender,
                kind: SubmissionKind::Co,
            });
        }
        self.store.insert_co(sender, co)?;

        if self.store.co_count() == self.participants.len() {
            let order = reveal_order(&self.participants, self.store.cvs())?;
            self.observer
                .on_event(&ProtocolEvent::RevealOrderFixed {
                    order: order.clone(),
                });
            self.order = order;
            self.advance(Phase::Reveal2);
        }
        Ok(())
    }

    fn accept_secret(&mut self, sender: Address, s: Secret) -> Result<(), ProtocolError> {
        self.check_phase(Phase::Reveal2, SubmissionKind::Secret)?;
        self.check_membership(sender)?;
        if self.store.secret(&sender).is_some() {
            return Err(ProtocolError::DuplicateSubmission {
                address: sender,
                kind: SubmissionKind::Secret,
            });
        }
        if self.store.co(&sender) != Some(&commit_secret(&s)) {
            return Err(ProtocolError::HashChainMismatch {
                address: sender,
                kind: SubmissionKind::Secret,
            });
        }
        let expected = self.order[self.store.secret_count()];
        if sender != expected {
            return Err(ProtocolError::RevealOrderViolation {
                expected,
                actual: sender,
            });
        }
        self.store.insert_secret(sender, s)?;

        if self.store.secret_count() == self.participants.len() {
            self.finalize();
        }
        Ok(())
    }

    /// `ω_o = H(s_1 || s_2 || … || s_n)` with secrets concatenated in
    /// reveal order.
    fn finalize(&mut self) {
        let parts: Vec<&[u8]> = self
            .order
            .iter()
            .filter_map(|address| self.store.secret(address))
            .map(|s| s.as_bytes().as_slice())
            .collect();
        let randomness = Randomness::new(hash32_multi(&parts));
        self.randomness = Some(randomness);
        self.advance(Phase::Done);
        self.observer
            .on_event(&ProtocolEvent::Finalized { randomness });
    }

    fn advance(&mut self, to: Phase) {
        self.phase = to;
        self.observer
            .on_event(&ProtocolEvent::PhaseAdvanced { phase: to.name() });
    }

    fn check_phase(&self, expected: Phase, kind: SubmissionKind) -> Result<(), ProtocolError> {
        if self.phase != expected {
            return Err(ProtocolError::PhaseViolation {
                kind,
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn check_membership(&self, sender: Address) -> Result<(), ProtocolError> {
        if !self.participants.contains(&sender) {
            return Err(ProtocolError::UnknownParticipant(sender));
        }
        Ok(())
    }

    fn observe_outcome(
        &self,
        sender: Address,
        kind: SubmissionKind,
        result: &Result<(), ProtocolError>,
    ) {
        match result {
            Ok(()) => self.observer.on_event(&ProtocolEvent::SubmissionAccepted {
                address: sender,
                kind,
            }),
            Err(err) => self.observer.on_event(&ProtocolEvent::SubmissionRejected {
                address: sender,
                kind,
                reason: err.to_string(),
            }),
        }
    }
}
