//! Hybrid topology: the on-ledger verifier.
//!
//! The ledger is the trust anchor of the hybrid deployment. It accepts
//! exactly two submissions, both only from the designated leader: the
//! Merkle root of the locked commitments, and the final
//! `(secrets, signatures)` batch. It never trusts the leader's
//! bookkeeping: at finalization it recomputes every commitment chain
//! from the raw secrets, re-verifies every signature, rebuilds the Merkle
//! tree in activation order, and accepts only if the rebuilt root equals
//! the published one.

use crate::error::ProtocolError;
use crate::observer::{ProtocolEvent, ProtocolObserver, TracingObserver};
use crate::phase::LedgerPhase;
use crate::SubmissionKind;
use fairseed_crypto::{commit_opening, commit_secret, hash32_multi, verify_signature};
use fairseed_merkle::MerkleTree;
use fairseed_types::{Address, MerkleRoot, PublicKey, Randomness, Secret, Signature};
use std::collections::BTreeMap;

pub struct HybridLedger {
    leader: Address,
    phase: LedgerPhase,
    participants: BTreeMap<Address, PublicKey>,
    activation_order: Vec<Address>,
    root: Option<MerkleRoot>,
    randomness: Option<Randomness>,
    observer: Box<dyn ProtocolObserver>,
}

impl HybridLedger {
    /// Create a ledger that will accept submissions only from `leader`.
    pub fn new(leader: Address) -> Self {
        Self::with_observer(leader, Box::new(TracingObserver))
    }

    pub fn with_observer(leader: Address, observer: Box<dyn ProtocolObserver>) -> Self {
        Self {
            leader,
            phase: LedgerPhase::AwaitingRoot,
            participants: BTreeMap::new(),
            activation_order: Vec::new(),
            root: None,
            randomness: None,
            observer,
        }
    }

    pub fn phase(&self) -> LedgerPhase {
        self.phase
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Addresses in activation order, the layout the final batch must use.
    pub fn activation_order(&self) -> &[Address] {
        &self.activation_order
    }

    /// Register a participant's verification key. Only possible before the
    /// root is published: membership is frozen for the rest of the run.
    pub fn add_participant(
        &mut self,
        address: Address,
        public_key: PublicKey,
    ) -> Result<(), ProtocolError> {
        if self.phase != LedgerPhase::AwaitingRoot {
            return Err(ProtocolError::LedgerPhaseViolation {
                kind: SubmissionKind::Registration,
                expected: LedgerPhase::AwaitingRoot,
                actual: self.phase,
            });
        }
        if self.participants.contains_key(&address) {
            return Err(ProtocolError::AlreadyRegistered(address));
        }
        self.participants.insert(address, public_key);
        self.activation_order.push(address);
        self.observer
            .on_event(&ProtocolEvent::ParticipantRegistered { address });
        Ok(())
    }

    /// Accept the commitment root from the leader. The root itself cannot
    /// be validated here; tampering surfaces as `RootMismatch` at
    /// finalization, when everything is recomputed from raw secrets.
    pub fn submit_root(
        &mut self,
        sender: Address,
        root: MerkleRoot,
    ) -> Result<(), ProtocolError> {
        let result = self.accept_root(sender, root);
        self.observe_outcome(sender, SubmissionKind::Root, &result);
        result
    }

    /// Verify the final batch and, on success, compute the randomness.
    ///
    /// `secrets` and `signatures` must both be aligned to activation order
    /// and have exactly one entry per registered participant. Rejection
    /// leaves the ledger in AWAITING_SECRETS with state untouched, so the
    /// leader can resubmit a corrected batch.
    pub fn finalize(
        &mut self,
        sender: Address,
        secrets: &[Secret],
        signatures: &[Signature],
    ) -> Result<(), ProtocolError> {
        let result = self.accept_batch(sender, secrets, signatures);
        self.observe_outcome(sender, SubmissionKind::Batch, &result);
        result
    }

    /// The final randomness `ω_o`; available only in DONE.
    pub fn final_randomness(&self) -> Result<Randomness, ProtocolError> {
        self.randomness
            .ok_or(ProtocolError::IncompleteState("final randomness not ready"))
    }

    /// Clear per-run state and return to AWAITING_ROOT. Registered
    /// participants and the leader binding are kept.
    pub fn reset(&mut self) {
        self.phase = LedgerPhase::AwaitingRoot;
        self.root = None;
        self.randomness = None;
        self.observer.on_event(&ProtocolEvent::Reset);
    }

    fn accept_root(&mut self, sender: Address, root: MerkleRoot) -> Result<(), ProtocolError> {
        if sender != self.leader {
            return Err(ProtocolError::NotLeader(sender));
        }
        if self.phase != LedgerPhase::AwaitingRoot {
            return Err(ProtocolError::LedgerPhaseViolation {
                kind: SubmissionKind::Root,
                expected: LedgerPhase::AwaitingRoot,
                actual: self.phase,
            });
        }
        self.root = Some(root);
        self.advance(LedgerPhase::AwaitingSecrets);
        Ok(())
    }

    fn accept_batch(
        &mut self,
        sender: Address,
        secrets: &[Secret],
        signatures: &[Signature],
    ) -> Result<(), ProtocolError> {
        if sender != self.leader {
            return Err(ProtocolError::NotLeader(sender));
        }
        if self.phase != LedgerPhase::AwaitingSecrets {
            return Err(ProtocolError::LedgerPhaseViolation {
                kind: SubmissionKind::Batch,
                expected: LedgerPhase::AwaitingSecrets,
                actual: self.phase,
            });
        }
        let expected = self.participants.len();
        if expected == 0 {
            return Err(ProtocolError::IncompleteState("no participants registered"));
        }
        if secrets.len() != expected {
            return Err(ProtocolError::BatchLengthMismatch {
                expected,
                actual: secrets.len(),
            });
        }
        if signatures.len() != expected {
            return Err(ProtocolError::BatchLengthMismatch {
                expected,
                actual: signatures.len(),
            });
        }

        // Recompute every chain from the raw secrets and collect the
        // would-be leaves; nothing is written until every check passes.
        let mut leaves = Vec::with_capacity(expected);
        for (i, address) in self.activation_order.iter().enumerate() {
            let co = commit_secret(&secrets[i]);
            let cv = commit_opening(&co);
            let public_key = &self.participants[address];
            if !verify_signature(cv.as_bytes(), &signatures[i], public_key) {
                return Err(ProtocolError::SignatureInvalid(*address));
            }
            leaves.push(*cv.as_bytes());
        }

        let rebuilt = MerkleTree::from_leaves(&leaves)
            .ok_or(ProtocolError::IncompleteState("no participants registered"))?
            .root();
        if Some(rebuilt) != self.root {
            return Err(ProtocolError::RootMismatch);
        }

        // `ω_o = H(s_1 || ... || s_n)` in activation order, the same order
        // the Merkle leaves use, unlike the direct topology which hashes
        // in reveal order.
        let parts: Vec<&[u8]> = secrets.iter().map(|s| s.as_bytes().as_slice()).collect();
        let randomness = Randomness::new(hash32_multi(&parts));
        self.randomness = Some(randomness);
        self.advance(LedgerPhase::Done);
        self.observer
            .on_event(&ProtocolEvent::Finalized { randomness });
        Ok(())
    }

    fn advance(&mut self, to: LedgerPhase) {
        self.phase = to;
        self.observer
            .on_event(&ProtocolEvent::PhaseAdvanced { phase: to.name() });
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
