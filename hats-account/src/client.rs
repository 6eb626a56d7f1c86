//! Shared construction validation and transaction pipeline.
//!
//! Both public clients wrap a [`ClientCore`]: the same configuration
//! checks run at construction, and every state-changing operation flows
//! through the same simulate → submit → await-receipt sequence. Each
//! operation is strictly sequential with no retries; a failure at any
//! stage is terminal.

use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::Provider;
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::TransportError;
use tracing::debug;

use crate::chains::Deployments;
use crate::connection::{ReadConnection, WriteConnection};
use crate::error::{ConfigError, TxError};

/// Validated, immutable state shared by both clients.
#[derive(Debug, Clone)]
pub(crate) struct ClientCore {
    read: ReadConnection,
    write: WriteConnection,
    chain_id: u64,
    implementation: Address,
    deployments: Deployments,
    receipt_timeout: Option<Duration>,
}

impl ClientCore {
    /// Validate a client configuration.
    ///
    /// Checks run in a fixed order: read connection present, write
    /// connection present, write connection chain-bound, chain IDs match,
    /// chain ID present in the deployment table. No network calls are made.
    pub(crate) fn validate(
        read: Option<ReadConnection>,
        write: Option<WriteConnection>,
        deployments: Deployments,
        receipt_timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let read = read.ok_or(ConfigError::MissingReadClient)?;
        let write = write.ok_or(ConfigError::MissingWriteClient)?;
        let chain_id = write.chain_id().ok_or(ConfigError::NoChainBound)?;
        if read.chain_id() != chain_id {
            return Err(ConfigError::ChainMismatch {
                read: read.chain_id(),
                write: chain_id,
            });
        }
        let implementation = deployments
            .implementation_for(chain_id)
            .ok_or(ConfigError::UnsupportedChain(chain_id))?;

        Ok(Self {
            read,
            write,
            chain_id,
            implementation,
            deployments,
            receipt_timeout,
        })
    }

    /// The chain ID both connections are bound to.
    pub(crate) const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The account implementation deployed on the bound chain.
    pub(crate) const fn implementation(&self) -> Address {
        self.implementation
    }

    /// The per-chain deployment table.
    pub(crate) const fn deployments(&self) -> &Deployments {
        &self.deployments
    }

    /// Perform a read-only contract call on the read connection.
    ///
    /// Transport errors propagate unchanged; read calls do not revert
    /// under normal conditions and get no translation.
    pub(crate) async fn read_call(
        &self,
        request: TransactionRequest,
    ) -> Result<Bytes, TransportError> {
        self.read.provider().call(request).await
    }

    /// Dry-run `request` on the read connection, then submit it through
    /// the write connection and block until the receipt resolves.
    ///
    /// The dry-run fails fast on revert before anything is signed. Errors
    /// are returned raw; callers translate them against the contract's
    /// error table.
    pub(crate) async fn simulate_and_submit(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionReceipt, TxError> {
        self.read
            .provider()
            .call(request.clone())
            .await
            .map_err(TxError::Rpc)?;

        let pending = self
            .write
            .provider()
            .send_transaction(request)
            .await
            .map_err(TxError::Rpc)?;

        let tx_hash = *pending.tx_hash();
        debug!(tx_hash = %tx_hash, chain_id = self.chain_id, "transaction submitted");

        pending
            .with_timeout(self.receipt_timeout)
            .get_receipt()
            .await
            .map_err(TxError::Receipt)
    }
}

/// Build a contract-call transaction request.
pub(crate) fn call_request(
    to: Address,
    calldata: Vec<u8>,
) -> TransactionRequest {
    TransactionRequest::default().with_to(to).with_input(calldata)
}
