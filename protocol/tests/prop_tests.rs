use std::collections::{BTreeMap, BTreeSet};

use proptest::collection::vec;
use proptest::prelude::*;

use fairseed_crypto::commitment_chain;
use fairseed_merkle::MerkleTree;
use fairseed_protocol::{reveal_order, CommitmentStore, DirectLedger, Phase};
use fairseed_types::{Address, Commitment, Secret};

/// Run a full direct-topology protocol over fixed chains and return the
/// final randomness.
fn drive_direct(addresses: &[Address], secrets: &[Secret]) -> fairseed_types::Randomness {
    let mut ledger = DirectLedger::new(addresses.iter().copied());
    for (address, secret) in addresses.iter().zip(secrets) {
        let (_, cv) = commitment_chain(secret);
        ledger.submit_cv(*address, cv).unwrap();
    }
    for (address, secret) in addresses.iter().zip(secrets) {
        let (co, _) = commitment_chain(secret);
        ledger.submit_co(*address, co).unwrap();
    }
    for address in ledger.reveal_order().unwrap().to_vec() {
        let idx = addresses.iter().position(|a| *a == address).unwrap();
        ledger.submit_secret(address, secrets[idx].clone()).unwrap();
    }
    assert_eq!(ledger.phase(), Phase::Done);
    ledger.final_randomness().unwrap()
}

/// Distinct addresses with one commitment each, 1..=12 participants.
fn cv_sets() -> impl Strategy<Value = BTreeMap<Address, Commitment>> {
    vec(
        (
            prop::array::uniform20(0u8..),
            prop::array::uniform32(0u8..),
        ),
        1..=12,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(a, c)| (Address::new(a), Commitment::new(c)))
            .collect()
    })
}

proptest! {
    /// The reveal order is always a permutation of the registered set.
    #[test]
    fn order_is_a_permutation(cvs in cv_sets()) {
        let registered: BTreeSet<Address> = cvs.keys().copied().collect();
        let order = reveal_order(&registered, &cvs).unwrap();
        prop_assert_eq!(order.len(), registered.len());
        let as_set: BTreeSet<Address> = order.iter().copied().collect();
        prop_assert_eq!(as_set, registered);
    }

    /// Recomputing from the same commitment set yields the same order.
    #[test]
    fn order_is_deterministic(cvs in cv_sets()) {
        let registered: BTreeSet<Address> = cvs.keys().copied().collect();
        let first = reveal_order(&registered, &cvs).unwrap();
        let second = reveal_order(&registered, &cvs).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Removing any single cv makes the input incomplete.
    #[test]
    fn partial_input_is_rejected(cvs in cv_sets(), pick: prop::sample::Index) {
        let registered: BTreeSet<Address> = cvs.keys().copied().collect();
        let victim = *registered.iter().nth(pick.index(registered.len())).unwrap();
        let mut partial = cvs.clone();
        partial.remove(&victim);
        prop_assert!(reveal_order(&registered, &partial).is_err());
    }

    /// Identical commitments (forced distance ties) still produce a total,
    /// deterministic order: ascending addresses.
    #[test]
    fn ties_fall_back_to_address_order(
        addresses in vec(prop::array::uniform20(0u8..), 2..=8),
        cv_bytes in prop::array::uniform32(0u8..),
    ) {
        let registered: BTreeSet<Address> =
            addresses.into_iter().map(Address::new).collect();
        let same = Commitment::new(cv_bytes);
        let cvs: BTreeMap<Address, Commitment> =
            registered.iter().map(|a| (*a, same)).collect();
        let order = reveal_order(&registered, &cvs).unwrap();
        let ascending: Vec<Address> = registered.into_iter().collect();
        prop_assert_eq!(order, ascending);
    }

    /// A direct-topology run driven end to end from arbitrary secrets
    /// reaches DONE with a deterministic output.
    #[test]
    fn direct_run_completes_from_arbitrary_secrets(
        seed_bytes in vec(prop::array::uniform32(0u8..), 1..=6),
    ) {
        // Addresses come from the participant index, so duplicate
        // generated secrets cannot collide on identity.
        let secrets: Vec<Secret> = seed_bytes.into_iter().map(Secret::new).collect();
        let addresses: Vec<Address> = (0..secrets.len())
            .map(|i| {
                let mut bytes = [0u8; 20];
                bytes[0] = i as u8 + 1;
                Address::new(bytes)
            })
            .collect();

        let first = drive_direct(&addresses, &secrets);
        let second = drive_direct(&addresses, &secrets);
        prop_assert_eq!(first, second);
    }

    /// The commitment store rejects the second write for an address and
    /// keeps the first value.
    #[test]
    fn store_first_write_wins(
        address_bytes in prop::array::uniform20(0u8..),
        first in prop::array::uniform32(0u8..),
        second in prop::array::uniform32(0u8..),
    ) {
        let address = Address::new(address_bytes);
        let mut store = CommitmentStore::new();
        store.insert_cv(address, Commitment::new(first)).unwrap();
        prop_assert!(store.insert_cv(address, Commitment::new(second)).is_err());
        prop_assert_eq!(store.cv(&address), Some(&Commitment::new(first)));
    }

    /// Flipping any bit of any Merkle leaf moves the root.
    #[test]
    fn merkle_root_is_sensitive_to_every_leaf(
        leaves in vec(prop::array::uniform32(0u8..), 1..=9),
        pick: prop::sample::Index,
        bit in 0usize..256,
    ) {
        let baseline = MerkleTree::from_leaves(&leaves).unwrap().root();
        let mut tampered = leaves.clone();
        let idx = pick.index(tampered.len());
        tampered[idx][bit / 8] ^= 1 << (bit % 8);
        let moved = MerkleTree::from_leaves(&tampered).unwrap().root();
        prop_assert_ne!(baseline, moved);
    }
}
