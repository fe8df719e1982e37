//! MessagePack codec for saved dialog state.
//!
//! Hosts call these at their own teardown/recreate boundaries; nothing here
//! knows about a host lifecycle.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::Visuals;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// Encode any saved value as MessagePack (named fields).
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    Ok(rmp_serde::to_vec_named(value)?)
}

/// Decode a value produced by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    Ok(rmp_serde::from_slice(bytes)?)
}

pub fn serialize(visuals: &Visuals) -> Result<Vec<u8>, CodecError> {
    encode(visuals)
}

pub fn deserialize(bytes: &[u8]) -> Result<Visuals, CodecError> {
    decode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DialogSnapshot;

    #[test]
    fn test_visuals_survive_save_restore() {
        let visuals = Visuals::new("Delete?")
            .with_content("This removes the profile.")
            .with_confirm("Delete");
        let bytes = serialize(&visuals).unwrap();
        assert_eq!(deserialize(&bytes).unwrap(), visuals);
    }

    #[test]
    fn test_sentinel_stays_sentinel() {
        let bytes = serialize(&Visuals::empty()).unwrap();
        assert!(deserialize(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let snap = DialogSnapshot {
            visible: true,
            visuals: Visuals::new("Proceed?"),
        };
        let restored: DialogSnapshot = decode(&encode(&snap).unwrap()).unwrap();
        assert_eq!(restored, snap);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = deserialize(&[0xc1, 0x00]).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }
}
