//! Hybrid topology: the off-chain leader aggregator.
//!
//! The leader collects signed `cv` commitments from every participant,
//! batches them into a Merkle tree (raw `cv` leaves, activation order),
//! and later assembles the single `(secrets, signatures)` batch the ledger
//! verifies. Its own identity is distinct from every participant's; the
//! ledger accepts the root and the batch only from this address.

use crate::error::ProtocolError;
use crate::observer::{ProtocolEvent, ProtocolObserver, TracingObserver};
use crate::order::reveal_order;
use crate::SubmissionKind;
use fairseed_crypto::{commit_opening, commit_secret, derive_address, generate_keypair,
    keypair_from_seed, verify_signature};
use fairseed_merkle::MerkleTree;
use fairseed_types::{Address, Commitment, KeyPair, MerkleRoot, PublicKey, Secret, Signature};
use std::collections::BTreeMap;

pub struct LeaderNode {
    keypair: KeyPair,
    address: Address,
    participants: BTreeMap<Address, PublicKey>,
    activation_order: Vec<Address>,
    cv_signed: BTreeMap<Address, (Commitment, Signature)>,
    co: BTreeMap<Address, Commitment>,
    secret_signed: BTreeMap<Address, (Secret, Signature)>,
    root: Option<MerkleRoot>,
    order: Vec<Address>,
    observer: Box<dyn ProtocolObserver>,
}

impl LeaderNode {
    /// Create a leader with a freshly generated identity.
    pub fn new() -> Self {
        Self::with_observer(Box::new(TracingObserver))
    }

    pub fn with_observer(observer: Box<dyn ProtocolObserver>) -> Self {
        Self::with_keypair(generate_keypair(), observer)
    }

    /// Deterministic leader identity, for tests.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::with_keypair(keypair_from_seed(seed), Box::new(TracingObserver))
    }

    fn with_keypair(keypair: KeyPair, observer: Box<dyn ProtocolObserver>) -> Self {
        let address = derive_address(&keypair.public);
        Self {
            keypair,
            address,
            participants: BTreeMap::new(),
            activation_order: Vec::new(),
            cv_signed: BTreeMap::new(),
            co: BTreeMap::new(),
            secret_signed: BTreeMap::new(),
            root: None,
            order: Vec::new(),
            observer,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keypair.public
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Addresses in first-registration (activation) order; the Merkle-leaf
    /// layout and the final batch both use it.
    pub fn activation_order(&self) -> &[Address] {
        &self.activation_order
    }

    /// Register a participant and record its activation slot.
    pub fn add_participant(
        &mut self,
        address: Address,
        public_key: PublicKey,
    ) -> Result<(), ProtocolError> {
        if self.participants.contains_key(&address) {
            return Err(ProtocolError::AlreadyRegistered(address));
        }
        self.participants.insert(address, public_key);
        self.activation_order.push(address);
        self.observer
            .on_event(&ProtocolEvent::ParticipantRegistered { address });
        Ok(())
    }

    /// Receive a signed `cv`. The signature is over the raw 32 commitment
    /// bytes and is checked against the sender's registered key. The last
    /// acceptance builds the Merkle tree and locks the root.
    pub fn receive_cv(
        &mut self,
        sender: Address,
        cv: Commitment,
        signature: Signature,
    ) -> Result<(), ProtocolError> {
        let result = self.accept_cv(sender, cv, signature);
        self.observe_outcome(sender, SubmissionKind::Cv, &result);
        result
    }

    /// Receive the inner commitment `co`; must hash to the stored `cv`.
    /// The last acceptance fixes the reveal order.
    pub fn receive_co(&mut self, sender: Address, co: Commitment) -> Result<(), ProtocolError> {
        let result = self.accept_co(sender, co);
        self.observe_outcome(sender, SubmissionKind::Co, &result);
        result
    }

    /// Receive a secret; only the next address in the reveal order is
    /// accepted. The secret is stored alongside the original `cv`
    /// signature collected in the COMMIT round.
    pub fn receive_secret(&mut self, sender: Address, s: Secret) -> Result<(), ProtocolError> {
        let result = self.accept_secret(sender, s);
        self.observe_outcome(sender, SubmissionKind::Secret, &result);
        result
    }

    /// The root the operator publishes to the ledger; available once every
    /// participant's `cv` is in.
    pub fn merkle_root(&self) -> Result<MerkleRoot, ProtocolError> {
        self.root
            .ok_or(ProtocolError::IncompleteState("merkle root not yet computed"))
    }

    /// The fixed reveal order; available once every `co` is in.
    pub fn reveal_order(&self) -> Result<&[Address], ProtocolError> {
        if self.order.is_empty() {
            return Err(ProtocolError::IncompleteState("reveal order not yet fixed"));
        }
        Ok(&self.order)
    }

    /// The final `(secrets, signatures)` batch, aligned to activation
    /// order: the ledger rebuilds the Merkle tree in that order, so the
    /// batch must match the leaf layout, not the reveal order.
    pub fn final_submission(&self) -> Result<(Vec<Secret>, Vec<Signature>), ProtocolError> {
        if self.secret_signed.len() != self.participants.len() || self.participants.is_empty() {
            return Err(ProtocolError::IncompleteState(
                "not all secrets have been revealed",
            ));
        }
        let mut secrets = Vec::with_capacity(self.activation_order.len());
        let mut signatures = Vec::with_capacity(self.activation_order.len());
        for address in &self.activation_order {
            // Completeness was just checked.
            let (secret, signature) = &self.secret_signed[address];
            secrets.push(secret.clone());
            signatures.push(signature.clone());
        }
        Ok((secrets, signatures))
    }

    fn accept_cv(
        &mut self,
        sender: Address,
        cv: Commitment,
        signature: Signature,
    ) -> Result<(), ProtocolError> {
        let Some(public_key) = self.participants.get(&sender) else {
            return Err(ProtocolError::UnknownParticipant(sender));
        };
        if self.cv_signed.contains_key(&sender) {
            return Err(ProtocolError::DuplicateSubmission {
                address: sender,
                kind: SubmissionKind::Cv,
            });
        }
        if !verify_signature(cv.as_bytes(), &signature, public_key) {
            return Err(ProtocolError::SignatureInvalid(sender));
        }
        self.cv_signed.insert(sender, (cv, signature));

        if self.cv_signed.len() == self.participants.len() {
            self.lock_root();
        }
        Ok(())
    }

    /// Leaves are the raw `cv` bytes in activation order, never re-hashed,
    /// so the ledger can rebuild the identical tree from recomputed values.
    fn lock_root(&mut self) {
        let leaves: Vec<[u8; 32]> = self
            .activation_order
            .iter()
            .filter_map(|address| self.cv_signed.get(address))
            .map(|(cv, _)| *cv.as_bytes())
            .collect();
        if let Some(tree) = MerkleTree::from_leaves(&leaves) {
            let root = tree.root();
            self.root = Some(root);
            self.observer
                .on_event(&ProtocolEvent::MerkleRootComputed { root });
        }
    }

    fn accept_co(&mut self, sender: Address, co: Commitment) -> Result<(), ProtocolError> {
        if !self.participants.contains_key(&sender) {
            return Err(ProtocolError::UnknownParticipant(sender));
        }
        if self.co.contains_key(&sender) {
            return Err(ProtocolError::DuplicateSubmission {
                address: sender,
                kind: SubmissionKind::Co,
            });
        }
        let Some((cv, _)) = self.cv_signed.get(&sender) else {
            return Err(ProtocolError::IncompleteState(
                "no cv received from this sender yet",
            ));
        };
        if commit_opening(&co) != *cv {
            return Err(ProtocolError::HashChainMismatch {
                address: sender,
                kind: SubmissionKind::Co,
            });
        }
        self.co.insert(sender, co);

        if self.co.len() == self.participants.len() {
            let registered = self.participants.keys().copied().collect();
            let cvs = self
                .cv_signed
                .iter()
                .map(|(address, (cv, _))| (*address, *cv))
                .collect();
            let order = reveal_order(&registered, &cvs)?;
            self.observer
                .on_event(&ProtocolEvent::RevealOrderFixed {
                    order: order.clone(),
                });
            self.order = order;
        }
        Ok(())
    }

    fn accept_secret(&mut self, sender: Address, s: Secret) -> Result<(), ProtocolError> {
        if !self.participants.contains_key(&sender) {
            return Err(ProtocolError::UnknownParticipant(sender));
        }
        if self.order.is_empty() {
            return Err(ProtocolError::IncompleteState("reveal order not yet fixed"));
        }
        if self.secret_signed.contains_key(&sender) {
            return Err(ProtocolError::DuplicateSubmission {
                address: sender,
                kind: SubmissionKind::Secret,
            });
        }
        let expected = self.order[self.secret_signed.len()];
        if sender != expected {
            return Err(ProtocolError::RevealOrderViolation {
                expected,
                actual: sender,
            });
        }
        if self.co.get(&sender) != Some(&commit_secret(&s)) {
            return Err(ProtocolError::HashChainMismatch {
                address: sender,
                kind: SubmissionKind::Secret,
            });
        }
        // Reveal order having been fixed implies the cv round completed.
        let (_, cv_signature) = &self.cv_signed[&sender];
        self.secret_signed
            .insert(sender, (s, cv_signature.clone()));
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

impl Default for LeaderNode {
    fn default() -> Self {
        Self::new()
    }
}
