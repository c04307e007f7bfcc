//! Hex encoding used by the node's JSON dialect.
//!
//! Integers are written as minimal-width `0x`-prefixed hex (`0x0` for zero) and
//! byte strings as `0x`-prefixed lowercase hex. Parsing is strict: a value the
//! encoder would never produce is rejected, so a decode/encode pass is
//! byte-exact.
//!
//! The `uint32`, `uint64`, `bytes` and `bytes_vec` submodules are meant for
//! `#[serde(with = "...")]`.

use crate::TypesError;

/// Encode an unsigned integer in minimal-width hex.
pub fn encode_uint(value: u64) -> String {
    format!("{value:#x}")
}

/// Decode a minimal-width hex integer.
pub fn decode_uint(s: &str) -> Result<u64, TypesError> {
    let digits = strip_prefix(s)?;
    if digits.is_empty() || !is_lower_hex(digits) {
        return Err(TypesError::InvalidHex(s.to_string()));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(TypesError::LeadingZeros(s.to_string()));
    }
    if digits.len() > 16 {
        return Err(TypesError::Overflow(s.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| TypesError::InvalidHex(s.to_string()))
}

/// Encode a byte string as `0x`-prefixed hex.
pub fn encode_bytes(bytes: &[u8]) -> String {
    format!("0x{}", ::hex::encode(bytes))
}

/// Decode a `0x`-prefixed hex byte string.
pub fn decode_bytes(s: &str) -> Result<Vec<u8>, TypesError> {
    let digits = strip_prefix(s)?;
    if !is_lower_hex(digits) {
        return Err(TypesError::InvalidHex(s.to_string()));
    }
    ::hex::decode(digits).map_err(|_| TypesError::InvalidHex(s.to_string()))
}

fn is_lower_hex(digits: &str) -> bool {
    digits
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn strip_prefix(s: &str) -> Result<&str, TypesError> {
    s.strip_prefix("0x")
        .ok_or_else(|| TypesError::MissingPrefix(s.to_string()))
}

pub mod uint64 {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode_uint(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::decode_uint(&s).map_err(D::Error::custom)
    }
}

pub mod uint32 {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode_uint(u64::from(*value)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let s = String::deserialize(deserializer)?;
        let value = super::decode_uint(&s).map_err(D::Error::custom)?;
        u32::try_from(value).map_err(|_| D::Error::custom(format!("integer out of range: {s}")))
    }
}

pub mod bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode_bytes(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::decode_bytes(&s).map_err(D::Error::custom)
    }
}

pub mod bytes_vec {
    use serde::{de::Error, ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(value.len()))?;
        for item in value {
            seq.serialize_element(&super::encode_bytes(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| super::decode_bytes(s).map_err(D::Error::custom))
            .collect()
    }
}

pub mod option_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_some(&super::encode_bytes(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::decode_bytes(&s).map_err(D::Error::custom))
            .transpose()
    }
}
