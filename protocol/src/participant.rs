//! Participant-side collaborator: identity, commitment chain, signing.
//!
//! The engine never sees a participant's private key or unrevealed secret;
//! it consumes `(address, public_key)` at registration and the chain values
//! one phase at a time. This module is the counterpart the engines are
//! driven by; in production it lives with the participant process.

use fairseed_crypto::{
    commitment_chain, derive_address, generate_keypair, generate_secret, keypair_from_seed,
    sign_message,
};
use fairseed_types::{Address, Commitment, KeyPair, PublicKey, Secret, Signature};

/// A participant's `s → co → cv` chain for one protocol run.
#[derive(Clone)]
pub struct CommitmentChain {
    secret: Secret,
    co: Commitment,
    cv: Commitment,
}

impl CommitmentChain {
    /// Build a fresh chain from a CSPRNG-sourced secret.
    pub fn generate() -> Self {
        let secret = generate_secret();
        let (co, cv) = commitment_chain(&secret);
        Self { secret, co, cv }
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn co(&self) -> Commitment {
        self.co
    }

    pub fn cv(&self) -> Commitment {
        self.cv
    }
}

/// A protocol participant: an Ed25519 identity plus, once generated, the
/// commitment chain for the current run.
pub struct Participant {
    keypair: KeyPair,
    address: Address,
    chain: Option<CommitmentChain>,
}

impl Participant {
    /// Create a participant with a freshly generated keypair.
    pub fn new() -> Self {
        Self::with_keypair(generate_keypair())
    }

    /// Create a participant with a seed-derived keypair (deterministic;
    /// used by tests to pin identities).
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::with_keypair(keypair_from_seed(seed))
    }

    fn with_keypair(keypair: KeyPair) -> Self {
        let address = derive_address(&keypair.public);
        Self {
            keypair,
            address,
            chain: None,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keypair.public
    }

    /// Generate a fresh commitment chain for a new run, replacing any
    /// previous one. Secrets are never reused across runs.
    pub fn generate_commitments(&mut self) {
        self.chain = Some(CommitmentChain::generate());
    }

    /// The locked outer commitment, once generated.
    pub fn cv(&self) -> Option<Commitment> {
        self.chain.as_ref().map(CommitmentChain::cv)
    }

    /// The inner commitment for REVEAL-1, once generated.
    pub fn co(&self) -> Option<Commitment> {
        self.chain.as_ref().map(CommitmentChain::co)
    }

    /// The secret for REVEAL-2, once generated.
    pub fn secret(&self) -> Option<Secret> {
        self.chain.as_ref().map(|chain| chain.secret().clone())
    }

    /// Sign arbitrary bytes under this participant's key.
    pub fn sign(&self, data: &[u8]) -> Signature {
        sign_message(data, &self.keypair.private)
    }

    /// The `(cv, signature-over-cv)` pair submitted in the COMMIT round of
    /// the hybrid topology.
    pub fn signed_cv(&self) -> Option<(Commitment, Signature)> {
        self.chain.as_ref().map(|chain| {
            let cv = chain.cv();
            let signature = self.sign(cv.as_bytes());
            (cv, signature)
        })
    }
}

impl Default for Participant {
    fn default() -> Self {
        Self::new()
    }
}
