//! Fairness-driven reveal order.
//!
//! The order in which participants must disclose their secrets is derived
//! from every locked `cv` at once:
//!
//! 1. `Ω = cv_1 ⊕ cv_2 ⊕ … ⊕ cv_n` (byte-wise XOR; order-independent)
//! 2. per participant, `d_i = H(Ω ⊕ cv_i)`
//! 3. sort ascending by `d_i` as fixed-length byte strings
//!
//! Each `d_i` depends on all commitments, so no position is computable
//! until the whole set is locked, so a participant cannot choose a secret
//! that steers their own slot. Ties on `d_i` (cryptographically
//! negligible) fall back to ascending address order so the sort is total.

use crate::error::ProtocolError;
use fairseed_crypto::hash32;
use fairseed_types::{Address, Commitment};
use std::collections::{BTreeMap, BTreeSet};

/// Compute the reveal order from the complete `cv` map.
///
/// `registered` is the full participant set; every member must have an
/// entry in `cvs` or the input is rejected as incomplete. The result is a
/// permutation of `registered`.
pub fn reveal_order(
    registered: &BTreeSet<Address>,
    cvs: &BTreeMap<Address, Commitment>,
) -> Result<Vec<Address>, ProtocolError> {
    if registered.is_empty() {
        return Err(ProtocolError::IncompleteState("no participants registered"));
    }

    let mut omega = [0u8; 32];
    for address in registered {
        let cv = cvs
            .get(address)
            .ok_or(ProtocolError::IncompleteState(
                "missing cv for a registered participant",
            ))?;
        for (acc, byte) in omega.iter_mut().zip(cv.as_bytes()) {
            *acc ^= byte;
        }
    }

    let omega = Commitment::new(omega);
    let mut keyed: Vec<([u8; 32], Address)> = registered
        .iter()
        .map(|address| {
            let distance = hash32(&omega.xor(&cvs[address]));
            (distance, *address)
        })
        .collect();
    // Tuple order sorts by distance first, address second; the address is
    // the tie-break.
    keyed.sort_unstable();

    Ok(keyed.into_iter().map(|(_, address)| address).collect())
}
