use proptest::prelude::*;

use cellgate_address::{generate_address, parse_address, SECP256K1_BLAKE160_CODE_HASH};
use cellgate_types::{NetworkId, Script, ScriptHashType, H256};

fn hash_type() -> impl Strategy<Value = ScriptHashType> {
    prop_oneof![
        Just(ScriptHashType::Data),
        Just(ScriptHashType::Type),
        Just(ScriptHashType::Data1),
        Just(ScriptHashType::Data2),
    ]
}

fn network() -> impl Strategy<Value = NetworkId> {
    prop_oneof![Just(NetworkId::Mainnet), Just(NetworkId::Testnet)]
}

proptest! {
    /// Any script survives generate -> parse on either network.
    #[test]
    fn generate_parse_roundtrip(
        code_hash in prop::array::uniform32(0u8..),
        hash_type in hash_type(),
        args in prop::collection::vec(any::<u8>(), 0..64),
        network in network(),
    ) {
        let script = Script { code_hash: H256::new(code_hash), hash_type, args };
        let address = generate_address(network, &script);
        let parsed = parse_address(&address).unwrap();
        prop_assert_eq!(parsed.network, network);
        prop_assert_eq!(parsed.script, script);
    }

    /// Default-lock addresses are deterministic and short.
    #[test]
    fn default_lock_is_deterministic(args in prop::array::uniform20(0u8..)) {
        let script = Script {
            code_hash: SECP256K1_BLAKE160_CODE_HASH,
            hash_type: ScriptHashType::Type,
            args: args.to_vec(),
        };
        let a = generate_address(NetworkId::Mainnet, &script);
        let b = generate_address(NetworkId::Mainnet, &script);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), 46);
    }
}
