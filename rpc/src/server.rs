//! Axum-based RPC server.

use axum::routing::post;
use axum::Router;
use cellgate_ledger::LedgerEngine;
use cellgate_node_client::NodeRpc;
use std::future::Future;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers;
use crate::RpcError;

/// All endpoints, bound to `engine`.
pub fn router<N: NodeRpc>(engine: Arc<LedgerEngine<N>>) -> Router {
    Router::new()
        .route("/network/list", post(handlers::network_list::<N>))
        .route("/network/status", post(handlers::network_status::<N>))
        .route("/network/options", post(handlers::network_options::<N>))
        .route("/block", post(handlers::block::<N>))
        .route("/block/transaction", post(handlers::block_transaction::<N>))
        .route("/account/balance", post(handlers::account_balance::<N>))
        .route(
            "/construction/metadata",
            post(handlers::construction_metadata::<N>),
        )
        .route(
            "/construction/submit",
            post(handlers::construction_submit::<N>),
        )
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

pub struct RpcServer<N> {
    pub port: u16,
    engine: Arc<LedgerEngine<N>>,
}

impl<N: NodeRpc> RpcServer<N> {
    pub fn new(port: u16, engine: Arc<LedgerEngine<N>>) -> Self {
        Self { port, engine }
    }

    /// Serve until `shutdown` resolves, then finish in-flight requests.
    pub async fn start<F>(&self, shutdown: F) -> Result<(), RpcError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| RpcError::Bind {
                addr: addr.clone(),
                source,
            })?;
        info!(
            network = self.engine.config().network.as_str(),
            "API server listening on {}", addr
        );
        axum::serve(listener, router(self.engine.clone()))
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}
