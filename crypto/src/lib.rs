//! Cryptographic primitives for the fairseed beacon.
//!
//! - **Blake2b-256** for every hash in the protocol (commitment chains,
//!   Merkle nodes, reveal-order distances, final randomness)
//! - **Ed25519** for signing commitments and verifying them at the ledger
//! - CSPRNG secret generation and the `s → co → cv` chain derivation
//! - Address derivation: the trailing 20 bytes of the hashed public key

pub mod address;
pub mod chain;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::derive_address;
pub use chain::{commit_opening, commit_secret, commitment_chain, generate_secret};
pub use hash::{hash32, hash32_multi};
pub use keys::{generate_keypair, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
