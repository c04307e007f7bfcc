//! Capacity and currency types.
//!
//! Capacity is the native minor-unit amount carried by a cell (shannons).
//! It is kept as an integer end to end and only rendered as a decimal string
//! at the standardized-model boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A cell capacity in minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(u64);

impl Capacity {
    pub const ZERO: Self = Self(0);

    pub fn shannons(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Capacity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::hex::uint64::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Capacity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::hex::uint64::deserialize(deserializer).map(Self)
    }
}

/// The currency every amount is denominated in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
    pub decimals: u32,
}

impl Currency {
    /// The chain's native currency: 1 CKB = 10^8 shannons.
    pub fn ckb() -> Self {
        Self {
            symbol: "CKB".to_string(),
            decimals: 8,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::ckb()
    }
}
