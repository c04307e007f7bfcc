//! Lock and type scripts.

use serde::{Deserialize, Serialize};

use crate::{TypesError, H256};

/// How a script's `code_hash` selects the code to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptHashType {
    Data,
    Type,
    Data1,
    Data2,
}

impl ScriptHashType {
    /// The single-byte encoding used inside full-format addresses.
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Data => 0x00,
            Self::Type => 0x01,
            Self::Data1 => 0x02,
            Self::Data2 => 0x04,
        }
    }

    pub fn from_byte(byte: u8) -> Result<Self, TypesError> {
        match byte {
            0x00 => Ok(Self::Data),
            0x01 => Ok(Self::Type),
            0x02 => Ok(Self::Data1),
            0x04 => Ok(Self::Data2),
            other => Err(TypesError::UnknownHashType(other)),
        }
    }
}

/// A script: a reference to on-chain code plus its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Script {
    pub code_hash: H256,
    pub hash_type: ScriptHashType,
    #[serde(with = "crate::hex::bytes")]
    pub args: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_type_byte_mapping() {
        for ht in [
            ScriptHashType::Data,
            ScriptHashType::Type,
            ScriptHashType::Data1,
            ScriptHashType::Data2,
        ] {
            assert_eq!(ScriptHashType::from_byte(ht.as_byte()), Ok(ht));
        }
        assert_eq!(
            ScriptHashType::from_byte(3),
            Err(TypesError::UnknownHashType(3))
        );
    }

    #[test]
    fn script_json_shape() {
        let script = Script {
            code_hash: H256::new([1u8; 32]),
            hash_type: ScriptHashType::Type,
            args: vec![0xaa, 0xbb],
        };
        let value = serde_json::to_value(&script).unwrap();
        assert_eq!(value["hash_type"], "type");
        assert_eq!(value["args"], "0xaabb");
    }
}
