//! Canonical transaction <-> wire JSON.
//!
//! The wire form is the node's JSON dialect: integers as minimal-width hex,
//! byte fields as `0x` hex, hashes as fixed-width hex. Decoding accepts the
//! hash exactly as given; it is not checked against the content. Encoding
//! never emits a hash.

use cellgate_types::{RawTransaction, Transaction};

use crate::CodecError;

/// Maximum accepted size of an encoded transaction.
pub const MAX_TRANSACTION_SIZE: usize = 1024 * 1024; // 1 MiB

/// Decode a wire-encoded signed transaction.
pub fn decode_transaction(data: &str) -> Result<Transaction, CodecError> {
    if data.len() > MAX_TRANSACTION_SIZE {
        return Err(CodecError::TooLarge {
            size: data.len(),
            max: MAX_TRANSACTION_SIZE,
        });
    }
    let tx: Transaction =
        serde_json::from_str(data).map_err(|e| CodecError::Malformed(e.to_string()))?;
    if tx.outputs_data.len() != tx.outputs.len() {
        return Err(CodecError::Inconsistent(format!(
            "{} outputs but {} outputs_data entries",
            tx.outputs.len(),
            tx.outputs_data.len()
        )));
    }
    Ok(tx)
}

/// Encode a transaction to its wire form, without the hash.
pub fn encode_transaction(tx: &Transaction) -> Result<String, CodecError> {
    let raw: RawTransaction = tx.raw();
    serde_json::to_string(&raw).map_err(|e| CodecError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgate_types::H256;

    fn sample() -> String {
        format!(
            r#"{{
                "version": "0x0",
                "hash": "0x{hash}",
                "cell_deps": [
                    {{"out_point": {{"tx_hash": "0x{dep}", "index": "0x0"}}, "dep_type": "dep_group"}}
                ],
                "header_deps": [],
                "inputs": [
                    {{"since": "0x0", "previous_output": {{"tx_hash": "0x{prev}", "index": "0x1"}}}}
                ],
                "outputs": [
                    {{
                        "capacity": "0x174876e800",
                        "lock": {{"code_hash": "0x{code}", "hash_type": "type", "args": "0xb39bbc0b3673c7d36450bc14cfcdad2d559c6c64"}},
                        "type": null
                    }}
                ],
                "outputs_data": ["0x"],
                "witnesses": ["0x55000000100000005500000055000000"]
            }}"#,
            hash = "aa".repeat(32),
            dep = "bb".repeat(32),
            prev = "cc".repeat(32),
            code = "dd".repeat(32),
        )
    }

    #[test]
    fn decode_keeps_given_hash() {
        let tx = decode_transaction(&sample()).unwrap();
        assert_eq!(tx.hash, H256::new([0xaa; 32]));
        assert_eq!(tx.inputs[0].previous_output.index, 1);
        assert_eq!(tx.outputs[0].capacity.as_u64(), 100_000_000_000);
    }

    #[test]
    fn encode_omits_hash_and_keeps_field_order() {
        let tx = decode_transaction(&sample()).unwrap();
        let encoded = encode_transaction(&tx).unwrap();
        assert!(!encoded.contains("\"hash\""));
        let version = encoded.find("\"version\"").unwrap();
        let cell_deps = encoded.find("\"cell_deps\"").unwrap();
        let witnesses = encoded.find("\"witnesses\"").unwrap();
        assert!(version < cell_deps && cell_deps < witnesses);
        assert!(encoded.contains("\"capacity\":\"0x174876e800\""));
    }

    #[test]
    fn reencoding_is_stable() {
        let tx = decode_transaction(&sample()).unwrap();
        let once = encode_transaction(&tx).unwrap();
        let twice = encode_transaction(&decode_transaction(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_hash_decodes_as_zero() {
        let tx = decode_transaction(&sample()).unwrap();
        let encoded = encode_transaction(&tx).unwrap();
        let decoded = decode_transaction(&encoded).unwrap();
        assert!(decoded.hash.is_zero());
    }

    #[test]
    fn malformed_input_rejected() {
        assert!(matches!(
            decode_transaction("{not json"),
            Err(CodecError::Malformed(_))
        ));
        let padded = sample().replace("\"0x174876e800\"", "\"0x0174876e800\"");
        assert!(matches!(
            decode_transaction(&padded),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn uppercase_hex_rejected() {
        let upper = sample().replace("\"0x174876e800\"", "\"0x174876E800\"");
        assert!(matches!(
            decode_transaction(&upper),
            Err(CodecError::Malformed(_))
        ));
        let upper_witness = sample().replace(
            "0x55000000100000005500000055000000",
            "0x55000000100000005500000055A00000",
        );
        assert!(matches!(
            decode_transaction(&upper_witness),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn outputs_data_must_match_outputs() {
        let broken = sample().replace(r#""outputs_data": ["0x"]"#, r#""outputs_data": []"#);
        assert!(matches!(
            decode_transaction(&broken),
            Err(CodecError::Inconsistent(_))
        ));
    }

    #[test]
    fn oversized_input_rejected() {
        let huge = " ".repeat(MAX_TRANSACTION_SIZE + 1);
        assert!(matches!(
            decode_transaction(&huge),
            Err(CodecError::TooLarge { .. })
        ));
    }
}
