//! Protocol rejection reasons.
//!
//! Every variant is a rejection, not a fault: the operation that produced it
//! left engine state byte-for-byte unchanged, so a corrected resubmission is
//! always safe. Panics are reserved for programming-level invariant
//! violations.

use crate::phase::{LedgerPhase, Phase};
use crate::SubmissionKind;
use fairseed_types::Address;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("invalid phase for {kind}: expected {expected}, currently {actual}")]
    PhaseViolation {
        kind: SubmissionKind,
        expected: Phase,
        actual: Phase,
    },

    #[error("invalid ledger phase for {kind}: expected {expected}, currently {actual}")]
    LedgerPhaseViolation {
        kind: SubmissionKind,
        expected: LedgerPhase,
        actual: LedgerPhase,
    },

    #[error("unknown participant {0}")]
    UnknownParticipant(Address),

    #[error("participant {0} is already registered")]
    AlreadyRegistered(Address),

    #[error("duplicate {kind} submission from {address}")]
    DuplicateSubmission {
        address: Address,
        kind: SubmissionKind,
    },

    #[error("hash chain mismatch in {kind} from {address}")]
    HashChainMismatch {
        address: Address,
        kind: SubmissionKind,
    },

    #[error("invalid signature from {0}")]
    SignatureInvalid(Address),

    #[error("reveal order violation: expected {expected}, got {actual}")]
    RevealOrderViolation { expected: Address, actual: Address },

    #[error("rebuilt merkle root does not match the published root")]
    RootMismatch,

    #[error("batch length mismatch: expected {expected} entries, got {actual}")]
    BatchLengthMismatch { expected: usize, actual: usize },

    #[error("sender {0} is not the designated leader")]
    NotLeader(Address),

    #[error("incomplete state: {0}")]
    IncompleteState(&'static str),
}
