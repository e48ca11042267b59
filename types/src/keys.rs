//! Ed25519 key material for participant identity and signing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte Ed25519 public key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// A 32-byte Ed25519 private key (secret scalar).
///
/// Does not implement `Debug`, `Serialize`, or `Clone` so the key bytes
/// cannot leak through logging or accidental copies. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// A 64-byte Ed25519 signature.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", hex::encode(&self.0[..4]))
    }
}

// [u8; 64] has no serde derives, so signatures serialize as a byte string.
impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Signature;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "a 64-byte signature")
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                let bytes: [u8; 64] = v
                    .try_into()
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(Signature(bytes))
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut bytes = [0u8; 64];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(Signature(bytes))
            }
        }

        deserializer.deserialize_bytes(Visitor)
    }
}

/// An Ed25519 key pair (public + private).
///
/// Construct via `fairseed_crypto::generate_keypair()` or
/// `fairseed_crypto::keypair_from_seed()`. This struct is intentionally
/// just data.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_bincode_roundtrip() {
        let sig = Signature([0x5Au8; 64]);
        let encoded = bincode::serialize(&sig).unwrap();
        let decoded: Signature = bincode::deserialize(&encoded).unwrap();
        assert_eq!(sig, decoded);
    }

    #[test]
    fn signature_debug_is_truncated() {
        let sig = Signature([0x11u8; 64]);
        assert_eq!(format!("{:?}", sig), "Signature(11111111)");
    }

    #[test]
    fn public_key_bincode_roundtrip() {
        let key = PublicKey([7u8; 32]);
        let encoded = bincode::serialize(&key).unwrap();
        let decoded: PublicKey = bincode::deserialize(&encoded).unwrap();
        assert_eq!(key, decoded);
    }
}
