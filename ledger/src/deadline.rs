//! Per-request deadline applied to every node call.

use cellgate_node_client::NodeResult;
use std::future::Future;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

use crate::LedgerError;

/// The instant by which a request must be finished.
///
/// Node calls that outlive it are dropped, which aborts the underlying
/// HTTP exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self(Instant::now() + budget)
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.0
    }

    /// Run a node call, failing with [`LedgerError::DeadlineExceeded`] if it
    /// has not finished in time.
    pub async fn run<T, F>(&self, call: F) -> Result<T, LedgerError>
    where
        F: Future<Output = NodeResult<T>>,
    {
        match timeout_at(self.0, call).await {
            Ok(result) => result.map_err(LedgerError::from),
            Err(_) => Err(LedgerError::DeadlineExceeded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgate_node_client::NodeError;

    #[tokio::test]
    async fn passes_results_through() {
        let deadline = Deadline::after(Duration::from_secs(5));
        assert_eq!(deadline.run(async { Ok::<_, NodeError>(7) }).await.unwrap(), 7);
        let err = deadline
            .run(async { Err::<u8, _>(NodeError::Transport("down".into())) })
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Node(NodeError::Transport(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_call_times_out() {
        let deadline = Deadline::after(Duration::from_millis(50));
        let err = deadline
            .run(async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok::<_, NodeError>(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::DeadlineExceeded));
        assert!(deadline.is_expired());
    }
}
