use proptest::prelude::*;

use fairseed_types::{Address, Commitment, MerkleRoot, Randomness, Secret};

fn uniform20() -> impl Strategy<Value = [u8; 20]> {
    prop::array::uniform20(0u8..)
}

proptest! {
    /// Address roundtrip: new -> as_bytes produces identical bytes.
    #[test]
    fn address_roundtrip(bytes in uniform20()) {
        let addr = Address::new(bytes);
        prop_assert_eq!(addr.as_bytes(), &bytes);
    }

    /// Address ordering agrees with byte-slice ordering (the reveal-order
    /// tie-break relies on this).
    #[test]
    fn address_ordering_matches_bytes(a in uniform20(), b in uniform20()) {
        let aa = Address::new(a);
        let ab = Address::new(b);
        prop_assert_eq!(aa < ab, a < b);
        prop_assert_eq!(aa == ab, a == b);
    }

    /// Commitment XOR is commutative.
    #[test]
    fn commitment_xor_commutes(a in prop::array::uniform32(0u8..), b in prop::array::uniform32(0u8..)) {
        let ca = Commitment::new(a);
        let cb = Commitment::new(b);
        prop_assert_eq!(ca.xor(&cb), cb.xor(&ca));
    }

    /// Commitment XOR is an involution: (a ^ b) ^ b == a.
    #[test]
    fn commitment_xor_involution(a in prop::array::uniform32(0u8..), b in prop::array::uniform32(0u8..)) {
        let ca = Commitment::new(a);
        let cb = Commitment::new(b);
        let once = Commitment::new(ca.xor(&cb));
        prop_assert_eq!(once.xor(&cb), *ca.as_bytes());
    }

    /// Commitment bincode serialization roundtrip.
    #[test]
    fn commitment_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let c = Commitment::new(bytes);
        let encoded = bincode::serialize(&c).unwrap();
        let decoded: Commitment = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, c);
    }

    /// Secret bincode serialization roundtrip.
    #[test]
    fn secret_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let s = Secret::new(bytes);
        let encoded = bincode::serialize(&s).unwrap();
        let decoded: Secret = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.as_bytes(), s.as_bytes());
    }

    /// MerkleRoot bincode serialization roundtrip.
    #[test]
    fn merkle_root_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let root = MerkleRoot::new(bytes);
        let encoded = bincode::serialize(&root).unwrap();
        let decoded: MerkleRoot = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, root);
    }

    /// Randomness roundtrip: new -> as_bytes produces identical bytes.
    #[test]
    fn randomness_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let r = Randomness::new(bytes);
        prop_assert_eq!(r.as_bytes(), &bytes);
    }
}
