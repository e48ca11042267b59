//! Participant address type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 20-byte participant address.
///
/// Derived from a public key by Blake2b-256 hashing and keeping the trailing
/// 20 bytes (see `fairseed_crypto::derive_address`). Addresses are the unique
/// key for all per-participant protocol state, and are `Ord` so address sets
/// iterate in a deterministic order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 20]);

impl Address {
    /// Length of an address in bytes.
    pub const LEN: usize = 20;

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
