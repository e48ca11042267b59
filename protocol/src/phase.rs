//! Protocol phases for both topologies.
//!
//! Transitions are forward-only and automatic: a phase advances exactly when
//! every registered participant has a valid entry for the current round.
//! No transition skips or reorders phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of the direct topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Collecting outer commitments `cv`.
    Commit,
    /// Collecting inner commitments `co`.
    Reveal1,
    /// Collecting secrets `s`, strictly in reveal order.
    Reveal2,
    /// Final randomness available.
    Done,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Commit => "COMMIT",
            Phase::Reveal1 => "REVEAL1",
            Phase::Reveal2 => "REVEAL2",
            Phase::Done => "DONE",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Phases of the hybrid ledger, which only ever sees two submissions:
/// the Merkle root and the final batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerPhase {
    /// Waiting for the leader to publish the commitment root.
    AwaitingRoot,
    /// Waiting for the final `(secrets, signatures)` batch.
    AwaitingSecrets,
    /// Final randomness available.
    Done,
}

impl LedgerPhase {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerPhase::AwaitingRoot => "AWAITING_ROOT",
            LedgerPhase::AwaitingSecrets => "AWAITING_SECRETS",
            LedgerPhase::Done => "DONE",
        }
    }
}

impl fmt::Display for LedgerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_names() {
        assert_eq!(Phase::Commit.to_string(), "COMMIT");
        assert_eq!(Phase::Reveal2.to_string(), "REVEAL2");
        assert_eq!(LedgerPhase::AwaitingRoot.to_string(), "AWAITING_ROOT");
    }
}
