//! Binary Merkle tree over raw 32-byte leaves.
//!
//! Leaf-encoding contract: leaves are inserted verbatim; the tree never
//! re-hashes them. In the hybrid topology the leaves are the locked `cv`
//! commitments in activation order, so the ledger can rebuild an identical
//! tree from independently recomputed `cv` values and compare roots.
//!
//! Parent nodes are `Blake2b-256(left || right)`. An odd node at any level
//! is promoted to the next level unchanged.

use fairseed_crypto::hash32_multi;
use fairseed_types::MerkleRoot;

/// A Merkle tree, stored level by level from leaves to root.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    /// Build a tree from raw leaves. Returns `None` for an empty leaf set,
    /// which has no defined root.
    pub fn from_leaves(leaves: &[[u8; 32]]) -> Option<Self> {
        if leaves.is_empty() {
            return None;
        }

        let mut levels = Vec::new();
        let mut current = leaves.to_vec();
        while current.len() > 1 {
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            for pair in current.chunks(2) {
                match pair {
                    [left, right] => next.push(hash32_multi(&[left, right])),
                    // Odd node: promoted unchanged.
                    [solo] => next.push(*solo),
                    _ => unreachable!("chunks(2) yields 1 or 2 elements"),
                }
            }
            levels.push(std::mem::replace(&mut current, next));
        }
        levels.push(current);

        Some(Self { levels })
    }

    /// The root of the tree.
    pub fn root(&self) -> MerkleRoot {
        // from_leaves guarantees a final single-node level.
        MerkleRoot::new(self.levels[self.levels.len() - 1][0])
    }

    /// Number of leaves the tree was built from.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }
}
