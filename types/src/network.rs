//! Network identifier.

use serde::{Deserialize, Serialize};

/// Which chain network the engine serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    /// The primary network.
    Mainnet,
    /// Any test network.
    Testnet,
}

impl NetworkId {
    /// Map a configured network name. Anything other than `mainnet`
    /// (case-insensitive) is a test network.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("mainnet") {
            Self::Mainnet
        } else {
            Self::Testnet
        }
    }

    /// Human-readable name, as advertised in network identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "Mainnet",
            Self::Testnet => "Testnet",
        }
    }

    /// Human-readable part of addresses on this network.
    pub fn address_prefix(&self) -> &'static str {
        match self {
            Self::Mainnet => "ckb",
            Self::Testnet => "ckt",
        }
    }

    pub fn from_address_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ckb" => Some(Self::Mainnet),
            "ckt" => Some(Self::Testnet),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_map_to_networks() {
        assert_eq!(NetworkId::from_name("Mainnet"), NetworkId::Mainnet);
        assert_eq!(NetworkId::from_name("mainnet"), NetworkId::Mainnet);
        assert_eq!(NetworkId::from_name("Testnet"), NetworkId::Testnet);
        assert_eq!(NetworkId::from_name("Aggron"), NetworkId::Testnet);
    }

    #[test]
    fn prefixes_roundtrip() {
        for network in [NetworkId::Mainnet, NetworkId::Testnet] {
            assert_eq!(
                NetworkId::from_address_prefix(network.address_prefix()),
                Some(network)
            );
        }
        assert_eq!(NetworkId::from_address_prefix("bc"), None);
    }
}
