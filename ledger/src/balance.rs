//! Live-cell balance aggregation.

use cellgate_node_client::NodeRpc;
use cellgate_types::{
    AccountBalance, Amount, BlockIdentifier, BlockNumber, Capacity, Currency, IndexerCell, Order,
    Script, SearchKey,
};
use futures_util::stream::{self, Stream, TryStreamExt};
use tracing::debug;

use crate::{Deadline, LedgerError};

enum Cursor {
    Start,
    After(String),
    Done,
}

/// Pages of live cells matching `search_key`, in ascending order.
///
/// Each page is requested with the cursor the previous one returned; a page
/// shorter than `page_size` ends the stream. The stream is lazy and cannot
/// be restarted.
pub fn live_cell_pages<'a, N: NodeRpc>(
    node: &'a N,
    search_key: &'a SearchKey,
    page_size: u32,
    deadline: Deadline,
) -> impl Stream<Item = Result<Vec<IndexerCell>, LedgerError>> + Send + 'a {
    stream::try_unfold(Cursor::Start, move |cursor| async move {
        let after = match cursor {
            Cursor::Done => return Ok(None),
            Cursor::Start => None,
            Cursor::After(cursor) => Some(cursor),
        };
        let page = deadline
            .run(node.get_cells(search_key, Order::Asc, page_size, after.as_deref()))
            .await?;
        debug!(cells = page.objects.len(), "live cell page");
        let next = if page.objects.len() < page_size as usize {
            Cursor::Done
        } else {
            Cursor::After(page.last_cursor)
        };
        Ok(Some((page.objects, next)))
    })
}

/// Sum of live capacity locked by `lock`, with the block the sum is valid at.
///
/// The tip is read before the scan. If the scan sees a cell from a block
/// above that tip, the chain moved on mid-scan and the header of the highest
/// block seen is reported instead, so the identifier never runs ahead of the
/// cells actually summed.
pub async fn account_balance<N: NodeRpc>(
    node: &N,
    lock: Script,
    currency: &Currency,
    page_size: u32,
    deadline: Deadline,
) -> Result<AccountBalance, LedgerError> {
    let tip = deadline.run(node.get_tip_header()).await?;
    let search_key = SearchKey::lock(lock);

    let mut total = Capacity::ZERO;
    let mut highest: Option<BlockNumber> = None;
    let mut pages = std::pin::pin!(live_cell_pages(node, &search_key, page_size, deadline));
    while let Some(cells) = pages.try_next().await? {
        for cell in &cells {
            total = total
                .checked_add(cell.output.capacity)
                .ok_or(LedgerError::BalanceOverflow)?;
            highest = highest.max(Some(cell.block_number));
        }
    }

    let block_identifier = match highest {
        Some(number) if number > tip.number => {
            debug!(tip = tip.number, number, "tip advanced during balance scan");
            let header = deadline
                .run(node.get_header_by_number(number))
                .await?
                .ok_or_else(|| {
                    LedgerError::Inconsistent(format!(
                        "live cell at block {number} but no header at that height"
                    ))
                })?;
            BlockIdentifier::of(&header)
        }
        _ => BlockIdentifier::of(&tip),
    };

    Ok(AccountBalance {
        block_identifier,
        balances: vec![Amount::credit(total, currency)],
    })
}
