//! Fundamental types for the fairseed beacon.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: participant addresses, Ed25519 key material, the commitment
//! chain values (`s`, `co`, `cv`), Merkle roots, and the final randomness.

pub mod address;
pub mod commitment;
pub mod keys;
pub mod output;

pub use address::Address;
pub use commitment::{Commitment, Secret};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use output::{MerkleRoot, Randomness};
