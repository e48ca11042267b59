//! Commit-Reveal² protocol engine.
//!
//! N mutually distrusting participants generate shared unbiased randomness
//! in three rounds: each locks an outer commitment `cv = H(H(s))`, then
//! reveals the inner commitment `co = H(s)`, then reveals the secret `s`
//! itself, in an order derived from all locked commitments at once, so no
//! participant can steer their own reveal position. The last entry in that
//! order can still withhold (the last-revealer attack); withholding stalls
//! the run observably instead of biasing the output.
//!
//! Two deployment topologies:
//! - **direct** ([`DirectLedger`]): every submission goes straight to the
//!   authoritative phase machine.
//! - **hybrid** ([`LeaderNode`] + [`HybridLedger`]): an off-chain leader
//!   collects commitments into a Merkle tree; the ledger sees only the
//!   published root and one final batch, and trusts nothing it cannot
//!   recompute from raw secrets.
//!
//! Engines are single mutable resources: every operation takes `&mut self`
//! and either succeeds atomically or rejects with a [`ProtocolError`]
//! leaving state untouched. Callers facing concurrent submitters serialize
//! access with a lock of their choosing.

use std::fmt;

pub mod direct;
pub mod error;
pub mod leader;
pub mod ledger;
pub mod observer;
pub mod order;
pub mod participant;
pub mod phase;
pub mod store;

pub use direct::DirectLedger;
pub use error::ProtocolError;
pub use leader::LeaderNode;
pub use ledger::HybridLedger;
pub use observer::{ProtocolEvent, ProtocolObserver, RecordingObserver, TracingObserver};
pub use order::reveal_order;
pub use participant::{CommitmentChain, Participant};
pub use phase::{LedgerPhase, Phase};
pub use store::CommitmentStore;

/// What kind of value a submission carried; used in rejection reasons and
/// observer events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionKind {
    /// Participant registration (membership + verification key).
    Registration,
    /// Outer commitment `cv`, locked in COMMIT.
    Cv,
    /// Inner commitment `co`, revealed in REVEAL-1.
    Co,
    /// The secret `s`, revealed in REVEAL-2.
    Secret,
    /// The leader's Merkle root (hybrid only).
    Root,
    /// The leader's final `(secrets, signatures)` batch (hybrid only).
    Batch,
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionKind::Registration => "registration",
            SubmissionKind::Cv => "cv",
            SubmissionKind::Co => "co",
            SubmissionKind::Secret => "s",
            SubmissionKind::Root => "root",
            SubmissionKind::Batch => "batch",
        };
        write!(f, "{name}")
    }
}
