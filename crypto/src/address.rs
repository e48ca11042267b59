//! Address derivation from public keys.
//!
//! An address is the trailing 20 bytes of `Blake2b-256(public_key)`. The
//! hash suffix keeps addresses fixed-length and collision-resistant without
//! carrying the full key in every map key.

use crate::hash::hash32;
use fairseed_types::{Address, PublicKey};

/// Derive a 20-byte address from a public key.
pub fn derive_address(public_key: &PublicKey) -> Address {
    let digest = hash32(public_key.as_bytes());
    let mut bytes = [0u8; Address::LEN];
    bytes.copy_from_slice(&digest[digest.len() - Address::LEN..]);
    Address::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair, keypair_from_seed};

    #[test]
    fn derivation_is_deterministic() {
        let kp = keypair_from_seed(&[11u8; 32]);
        assert_eq!(derive_address(&kp.public), derive_address(&kp.public));
    }

    #[test]
    fn address_is_hash_suffix() {
        let kp = keypair_from_seed(&[13u8; 32]);
        let digest = hash32(kp.public.as_bytes());
        let addr = derive_address(&kp.public);
        assert_eq!(addr.as_bytes(), &digest[12..]);
    }

    #[test]
    fn different_keys_produce_different_addresses() {
        let kp1 = generate_keypair();
        let kp2 = generate_keypair();
        assert_ne!(derive_address(&kp1.public), derive_address(&kp2.public));
    }
}
