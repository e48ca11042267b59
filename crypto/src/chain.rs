//! Commitment-chain derivation: `s → co → cv`.
//!
//! A participant generates a random secret `s` once per run, then derives
//! `co = H(s)` and `cv = H(co)`. Both commitments are pure functions of the
//! secret, so a verifier holding `cv` can check a revealed `co`, and a
//! verifier holding `co` can check a revealed `s`.

use crate::hash::hash32;
use fairseed_types::{Commitment, Secret};
use rand::rngs::OsRng;
use rand::RngCore;

/// Generate a fresh 32-byte secret from the operating system CSPRNG.
pub fn generate_secret() -> Secret {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    Secret::new(bytes)
}

/// Derive `co = H(s)`, the inner commitment revealed in REVEAL-1.
pub fn commit_secret(secret: &Secret) -> Commitment {
    Commitment::new(hash32(secret.as_bytes()))
}

/// Derive `cv = H(co)`, the outer commitment locked in COMMIT.
pub fn commit_opening(co: &Commitment) -> Commitment {
    Commitment::new(hash32(co.as_bytes()))
}

/// Derive the full chain from a secret, returning `(co, cv)`.
pub fn commitment_chain(secret: &Secret) -> (Commitment, Commitment) {
    let co = commit_secret(secret);
    let cv = commit_opening(&co);
    (co, cv)
}
