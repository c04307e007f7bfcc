//! Lock script <-> address mapping.
//!
//! Payload formats:
//! - `0x00` full: code_hash (32) | hash_type (1) | args, bech32m.
//! - `0x01` short: code index (1) | args (20), bech32. Only for the default
//!   secp256k1-blake160 and multisig locks.
//! - `0x02` / `0x04` deprecated full: code_hash (32) | args, bech32, with
//!   hash type `data` / `type` implied by the format byte.
//!
//! Generation emits the short format for the two well-known locks and the
//! full format for everything else; parsing accepts all four.

use bech32::{FromBase32, ToBase32, Variant};
use cellgate_types::{NetworkId, Script, ScriptHashType, H256};

use crate::AddressError;

const FORMAT_FULL: u8 = 0x00;
const FORMAT_SHORT: u8 = 0x01;
const FORMAT_FULL_DATA: u8 = 0x02;
const FORMAT_FULL_TYPE: u8 = 0x04;

const CODE_INDEX_SECP256K1_BLAKE160: u8 = 0x00;
const CODE_INDEX_MULTISIG: u8 = 0x01;

const SHORT_ARGS_LEN: usize = 20;

/// Type hash of the default secp256k1-blake160-sighash-all lock.
pub const SECP256K1_BLAKE160_CODE_HASH: H256 = H256::new([
    0x9b, 0xd7, 0xe0, 0x6f, 0x3e, 0xcf, 0x4b, 0xe0, 0xf2, 0xfc, 0xd2, 0x18, 0x8b, 0x23, 0xf1, 0xb9,
    0xfc, 0xc8, 0x8e, 0x5d, 0x4b, 0x65, 0xa8, 0x63, 0x7b, 0x17, 0x72, 0x3b, 0xbd, 0xa3, 0xcc, 0xe8,
]);

/// Type hash of the default secp256k1-blake160-multisig-all lock.
pub const MULTISIG_CODE_HASH: H256 = H256::new([
    0x5c, 0x50, 0x69, 0xeb, 0x08, 0x57, 0xef, 0xc6, 0x5e, 0x1b, 0xca, 0x0c, 0x07, 0xdf, 0x34, 0xc3,
    0x16, 0x63, 0xb3, 0x62, 0x2f, 0xd3, 0x87, 0x6c, 0x87, 0x63, 0x20, 0xfc, 0x96, 0x34, 0xe2, 0xa8,
]);

/// A parsed address: the network it belongs to and the lock it denotes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    pub network: NetworkId,
    pub script: Script,
}

impl Address {
    /// Reject an address that belongs to a different network.
    pub fn require_network(self, expected: NetworkId) -> Result<Self, AddressError> {
        if self.network == expected {
            Ok(self)
        } else {
            Err(AddressError::WrongNetwork {
                expected: expected.as_str(),
                actual: self.network.as_str(),
            })
        }
    }
}

fn encode(hrp: &str, payload: &[u8], variant: Variant) -> String {
    // Encoding only fails on a malformed prefix; network prefixes are fixed.
    bech32::encode(hrp, payload.to_base32(), variant).unwrap_or_default()
}

fn short_code_index(script: &Script) -> Option<u8> {
    if script.hash_type != ScriptHashType::Type || script.args.len() != SHORT_ARGS_LEN {
        return None;
    }
    if script.code_hash == SECP256K1_BLAKE160_CODE_HASH {
        Some(CODE_INDEX_SECP256K1_BLAKE160)
    } else if script.code_hash == MULTISIG_CODE_HASH {
        Some(CODE_INDEX_MULTISIG)
    } else {
        None
    }
}

/// Derive the address of `script` on `network`.
///
/// The same script always yields the same address for a given network.
pub fn generate_address(network: NetworkId, script: &Script) -> String {
    let hrp = network.address_prefix();
    match short_code_index(script) {
        Some(code_index) => {
            let mut payload = Vec::with_capacity(2 + SHORT_ARGS_LEN);
            payload.push(FORMAT_SHORT);
            payload.push(code_index);
            payload.extend_from_slice(&script.args);
            encode(hrp, &payload, Variant::Bech32)
        }
        None => {
            let mut payload = Vec::with_capacity(34 + script.args.len());
            payload.push(FORMAT_FULL);
            payload.extend_from_slice(script.code_hash.as_bytes());
            payload.push(script.hash_type.as_byte());
            payload.extend_from_slice(&script.args);
            encode(hrp, &payload, Variant::Bech32m)
        }
    }
}

/// Parse an address back into its network and lock script.
pub fn parse_address(address: &str) -> Result<Address, AddressError> {
    let (hrp, data, variant) = bech32::decode(address)?;
    let payload = Vec::<u8>::from_base32(&data)?;
    let network =
        NetworkId::from_address_prefix(&hrp).ok_or(AddressError::UnknownPrefix(hrp))?;
    let (&format, body) = payload
        .split_first()
        .ok_or_else(|| AddressError::InvalidPayload("empty payload".into()))?;

    let expected_variant = match format {
        FORMAT_FULL => Variant::Bech32m,
        FORMAT_SHORT | FORMAT_FULL_DATA | FORMAT_FULL_TYPE => Variant::Bech32,
        other => return Err(AddressError::UnsupportedFormat(other)),
    };
    if variant != expected_variant {
        return Err(AddressError::VariantMismatch { format });
    }

    let script = match format {
        FORMAT_SHORT => parse_short(body)?,
        FORMAT_FULL => {
            if body.len() < 33 {
                return Err(AddressError::InvalidPayload("truncated full payload".into()));
            }
            let hash_type = ScriptHashType::from_byte(body[32])
                .map_err(|e| AddressError::InvalidPayload(e.to_string()))?;
            Script {
                code_hash: code_hash(&body[..32]),
                hash_type,
                args: body[33..].to_vec(),
            }
        }
        _ => {
            if body.len() < 32 {
                return Err(AddressError::InvalidPayload("truncated full payload".into()));
            }
            let hash_type = if format == FORMAT_FULL_DATA {
                ScriptHashType::Data
            } else {
                ScriptHashType::Type
            };
            Script {
                code_hash: code_hash(&body[..32]),
                hash_type,
                args: body[32..].to_vec(),
            }
        }
    };

    Ok(Address { network, script })
}

fn parse_short(body: &[u8]) -> Result<Script, AddressError> {
    let (&code_index, args) = body
        .split_first()
        .ok_or_else(|| AddressError::InvalidPayload("truncated short payload".into()))?;
    if args.len() != SHORT_ARGS_LEN {
        return Err(AddressError::InvalidPayload(format!(
            "short payload args must be {SHORT_ARGS_LEN} bytes, got {}",
            args.len()
        )));
    }
    let code_hash = match code_index {
        CODE_INDEX_SECP256K1_BLAKE160 => SECP256K1_BLAKE160_CODE_HASH,
        CODE_INDEX_MULTISIG => MULTISIG_CODE_HASH,
        other => return Err(AddressError::UnknownCodeIndex(other)),
    };
    Ok(Script {
        code_hash,
        hash_type: ScriptHashType::Type,
        args: args.to_vec(),
    })
}

fn code_hash(bytes: &[u8]) -> H256 {
    let mut out = [0u8; 32];
    out.copy_from_slice(bytes);
    H256::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARGS: &str = "b39bbc0b3673c7d36450bc14cfcdad2d559c6c64";

    fn secp_lock() -> Script {
        Script {
            code_hash: SECP256K1_BLAKE160_CODE_HASH,
            hash_type: ScriptHashType::Type,
            args: decode_hex(ARGS),
        }
    }

    fn decode_hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn default_lock_uses_short_format() {
        assert_eq!(
            generate_address(NetworkId::Mainnet, &secp_lock()),
            "ckb1qyqt8xaupvm8837nv3gtc9x0ekkj64vud3jqfwyw5v"
        );
        assert_eq!(
            generate_address(NetworkId::Testnet, &secp_lock()),
            "ckt1qyqt8xaupvm8837nv3gtc9x0ekkj64vud3jq5t63cs"
        );
    }

    #[test]
    fn multisig_lock_uses_short_format() {
        let lock = Script {
            code_hash: MULTISIG_CODE_HASH,
            hash_type: ScriptHashType::Type,
            args: decode_hex("4fb2be2e5d0c1a3b8694f832350a33c1685d477a"),
        };
        assert_eq!(
            generate_address(NetworkId::Mainnet, &lock),
            "ckb1qyq5lv479ewscx3ms620sv34pgeuz6zagaaqklhtgg"
        );
    }

    #[test]
    fn other_locks_use_full_format() {
        let mut lock = secp_lock();
        lock.hash_type = ScriptHashType::Data;
        let address = generate_address(NetworkId::Mainnet, &lock);
        assert_eq!(
            address,
            "ckb1qzda0cr08m85hc8jlnfp3zer7xulejywt49kt2rr0vthywaa50xwsq9nnw7qkdnnclfkg59uzn8umtfd2kwxceqvguktl"
        );
        let parsed = parse_address(&address).unwrap();
        assert_eq!(parsed.script, lock);
        assert_eq!(parsed.network, NetworkId::Mainnet);
    }

    #[test]
    fn full_format_of_default_lock_parses_to_same_script() {
        let parsed = parse_address(
            "ckb1qzda0cr08m85hc8jlnfp3zer7xulejywt49kt2rr0vthywaa50xwsqdnnw7qkdnnclfkg59uzn8umtfd2kwxceqxwquc4",
        )
        .unwrap();
        assert_eq!(parsed.script, secp_lock());
    }

    #[test]
    fn deprecated_type_format_parses() {
        let parsed = parse_address(
            "ckb1qjda0cr08m85hc8jlnfp3zer7xulejywt49kt2rr0vthywaa50xw3vumhs9nvu786dj9p0q5elx66t24n3kxgj53qks",
        )
        .unwrap();
        assert_eq!(parsed.script, secp_lock());
    }

    #[test]
    fn short_roundtrip() {
        let address = generate_address(NetworkId::Testnet, &secp_lock());
        let parsed = parse_address(&address).unwrap();
        assert_eq!(parsed.network, NetworkId::Testnet);
        assert_eq!(parsed.script, secp_lock());
    }

    #[test]
    fn unknown_prefix_rejected() {
        let encoded = encode("bc", &[FORMAT_SHORT, 0, 1, 2], Variant::Bech32);
        assert_eq!(
            parse_address(&encoded),
            Err(AddressError::UnknownPrefix("bc".into()))
        );
    }

    #[test]
    fn wrong_variant_rejected() {
        let mut payload = vec![FORMAT_SHORT, CODE_INDEX_SECP256K1_BLAKE160];
        payload.extend_from_slice(&decode_hex(ARGS));
        let encoded = encode("ckb", &payload, Variant::Bech32m);
        assert_eq!(
            parse_address(&encoded),
            Err(AddressError::VariantMismatch {
                format: FORMAT_SHORT
            })
        );
    }

    #[test]
    fn unknown_code_index_rejected() {
        let mut payload = vec![FORMAT_SHORT, 0x07];
        payload.extend_from_slice(&decode_hex(ARGS));
        let encoded = encode("ckb", &payload, Variant::Bech32);
        assert_eq!(
            parse_address(&encoded),
            Err(AddressError::UnknownCodeIndex(0x07))
        );
    }

    #[test]
    fn garbage_rejected() {
        assert!(parse_address("not an address").is_err());
        assert!(parse_address("").is_err());
        assert!(matches!(
            parse_address("ckb1qyqT8xaupvm8837nv3gtc9x0ekkj64vud3jqfwyw5v"),
            Err(AddressError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn corrupted_checksum_rejected() {
        assert_eq!(
            parse_address("ckb1qyqt8xaupvm8837nv3gtc9x0ekkj64vud3jqfwyw5q"),
            Err(AddressError::InvalidChecksum)
        );
    }

    #[test]
    fn uppercase_address_parses() {
        let parsed = parse_address("CKB1QYQT8XAUPVM8837NV3GTC9X0EKKJ64VUD3JQFWYW5V").unwrap();
        assert_eq!(parsed.network, NetworkId::Mainnet);
        assert_eq!(parsed.script, secp_lock());
    }

    #[test]
    fn network_check() {
        let address = parse_address("ckb1qyqt8xaupvm8837nv3gtc9x0ekkj64vud3jqfwyw5v").unwrap();
        assert!(address.clone().require_network(NetworkId::Mainnet).is_ok());
        assert_eq!(
            address.require_network(NetworkId::Testnet),
            Err(AddressError::WrongNetwork {
                expected: "Testnet",
                actual: "Mainnet"
            })
        );
    }
}
