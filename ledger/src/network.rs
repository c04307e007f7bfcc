//! Chain and node status.

use cellgate_node_client::NodeRpc;
use cellgate_types::{BlockIdentifier, NetworkStatus, Peer};

use crate::{Deadline, LedgerError};

/// Genesis, current tip and connected peers.
pub async fn network_status<N: NodeRpc>(
    node: &N,
    deadline: Deadline,
) -> Result<NetworkStatus, LedgerError> {
    let genesis = deadline
        .run(node.get_header_by_number(0))
        .await?
        .ok_or_else(|| LedgerError::BlockNotFound("genesis".into()))?;
    let tip = deadline.run(node.get_tip_header()).await?;
    let peers = deadline.run(node.get_peers()).await?;

    Ok(NetworkStatus {
        current_block_identifier: BlockIdentifier::of(&tip),
        current_block_timestamp: tip.timestamp,
        genesis_block_identifier: BlockIdentifier::of(&genesis),
        peers: peers
            .into_iter()
            .map(|peer| Peer {
                peer_id: peer.node_id,
            })
            .collect(),
    })
}

/// Version string reported by the node itself.
pub async fn node_version<N: NodeRpc>(
    node: &N,
    deadline: Deadline,
) -> Result<String, LedgerError> {
    Ok(deadline.run(node.local_node_info()).await?.version)
}
