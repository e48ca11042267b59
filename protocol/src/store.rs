//! Per-run commitment storage.
//!
//! Three monotone maps keyed by participant address, one per round. First
//! write wins; a later write for the same address in the same round is
//! rejected without touching the stored value. The engine owns this state
//! exclusively; values are copied in, never shared with participant-owned
//! buffers.

use crate::error::ProtocolError;
use crate::SubmissionKind;
use fairseed_types::{Address, Commitment, Secret};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct CommitmentStore {
    cv: BTreeMap<Address, Commitment>,
    co: BTreeMap<Address, Commitment>,
    s: BTreeMap<Address, Secret>,
}

impl CommitmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_cv(&mut self, address: Address, cv: Commitment) -> Result<(), ProtocolError> {
        if self.cv.contains_key(&address) {
            return Err(ProtocolError::DuplicateSubmission {
                address,
                kind: SubmissionKind::Cv,
            });
        }
        self.cv.insert(address, cv);
        Ok(())
    }

    pub fn insert_co(&mut self, address: Address, co: Commitment) -> Result<(), ProtocolError> {
        if self.co.contains_key(&address) {
            return Err(ProtocolError::DuplicateSubmission {
                address,
                kind: SubmissionKind::Co,
            });
        }
        self.co.insert(address, co);
        Ok(())
    }

    pub fn insert_secret(&mut self, address: Address, s: Secret) -> Result<(), ProtocolError> {
        if self.s.contains_key(&address) {
            return Err(ProtocolError::DuplicateSubmission {
                address,
                kind: SubmissionKind::Secret,
            });
        }
        self.s.insert(address, s);
        Ok(())
    }

    pub fn cv(&self, address: &Address) -> Option<&Commitment> {
        self.cv.get(address)
    }

    pub fn co(&self, address: &Address) -> Option<&Commitment> {
        self.co.get(address)
    }

    pub fn secret(&self, address: &Address) -> Option<&Secret> {
        self.s.get(address)
    }

    pub fn cvs(&self) -> &BTreeMap<Address, Commitment> {
        &self.cv
    }

    pub fn cv_count(&self) -> usize {
        self.cv.len()
    }

    pub fn co_count(&self) -> usize {
        self.co.len()
    }

    pub fn secret_count(&self) -> usize {
        self.s.len()
    }

    /// Drop all per-run entries.
    pub fn clear(&mut self) {
        self.cv.clear();
        self.co.clear();
        self.s.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    #[test]
    fn first_write_wins() {
        let mut store = CommitmentStore::new();
        let original = Commitment::new([1u8; 32]);
        store.insert_cv(addr(1), original).unwrap();

        let err = store.insert_cv(addr(1), Commitment::new([2u8; 32]));
        assert_eq!(
            err,
            Err(ProtocolError::DuplicateSubmission {
                address: addr(1),
                kind: SubmissionKind::Cv,
            })
        );
        // The stored value is untouched by the rejected write.
        assert_eq!(store.cv(&addr(1)), Some(&original));
    }

    #[test]
    fn rounds_are_independent() {
        let mut store = CommitmentStore::new();
        store.insert_cv(addr(1), Commitment::new([1u8; 32])).unwrap();
        store.insert_co(addr(1), Commitment::new([2u8; 32])).unwrap();
        store
            .insert_secret(addr(1), Secret::new([3u8; 32]))
            .unwrap();
        assert_eq!(store.cv_count(), 1);
        assert_eq!(store.co_count(), 1);
        assert_eq!(store.secret_count(), 1);
    }

    #[test]
    fn clear_empties_all_rounds() {
        let mut store = CommitmentStore::new();
        store.insert_cv(addr(1), Commitment::new([1u8; 32])).unwrap();
        store.insert_co(addr(2), Commitment::new([2u8; 32])).unwrap();
        store.clear();
        assert_eq!(store.cv_count(), 0);
        assert_eq!(store.co_count(), 0);
        assert_eq!(store.secret_count(), 0);
        assert!(store.cv(&addr(1)).is_none());
    }
}
