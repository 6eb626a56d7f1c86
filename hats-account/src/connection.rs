//! Chain connections backing the clients.
//!
//! Two capabilities are kept separate, mirroring how the contracts are
//! used: a [`ReadConnection`] performs read-only calls and dry-run
//! simulations, and a [`WriteConnection`] submits signed transactions.
//! Each carries the chain ID it is bound to so client construction can
//! validate the pairing without touching the network.

use std::sync::Arc;

use alloy::network::Ethereum;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use tracing::info;

use crate::error::Result;

/// A read-capable connection to an EVM chain.
///
/// Wraps a type-erased [`alloy`] provider together with the chain ID it is
/// bound to. Used for `eth_call` queries and transaction dry-runs; never
/// for submission.
#[derive(Clone)]
pub struct ReadConnection {
    provider: Arc<DynProvider<Ethereum>>,
    chain_id: u64,
}

impl std::fmt::Debug for ReadConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadConnection")
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl ReadConnection {
    /// Wrap an existing provider bound to `chain_id`.
    #[must_use]
    pub fn new(provider: DynProvider<Ethereum>, chain_id: u64) -> Self {
        Self {
            provider: Arc::new(provider),
            chain_id,
        }
    }

    /// Connect to a JSON-RPC endpoint and auto-detect its chain ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rpc`](crate::Error::Rpc) if the endpoint is unreachable or the
    /// chain-ID query fails.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        let provider: DynProvider<Ethereum> = ProviderBuilder::new().connect(rpc_url).await?.erased();
        let chain_id = provider.get_chain_id().await?;
        Ok(Self::new(provider, chain_id))
    }

    /// The chain ID this connection is bound to.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The underlying provider.
    #[must_use]
    pub fn provider(&self) -> &DynProvider<Ethereum> {
        &self.provider
    }
}

/// A transaction-signing connection to an EVM chain.
///
/// Wraps a provider capable of signing and submitting transactions (for
/// example one built with a wallet filler). The bound chain ID is optional
/// here: a connection without one is rejected at client construction with
/// [`ConfigError::NoChainBound`](crate::ConfigError::NoChainBound).
#[derive(Clone)]
pub struct WriteConnection {
    provider: Arc<DynProvider<Ethereum>>,
    chain_id: Option<u64>,
}

impl std::fmt::Debug for WriteConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteConnection")
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl WriteConnection {
    /// Wrap an existing signing-capable provider bound to `chain_id`.
    #[must_use]
    pub fn new(provider: DynProvider<Ethereum>, chain_id: u64) -> Self {
        Self {
            provider: Arc::new(provider),
            chain_id: Some(chain_id),
        }
    }

    /// Wrap a signing-capable provider with no bound chain.
    ///
    /// Clients built from such a connection fail validation; this exists
    /// for callers that resolve the chain separately.
    #[must_use]
    pub fn unbound(provider: DynProvider<Ethereum>) -> Self {
        Self {
            provider: Arc::new(provider),
            chain_id: None,
        }
    }

    /// Connect to a JSON-RPC endpoint with a local signer and auto-detect
    /// the chain ID.
    ///
    /// The signer is installed as the provider's wallet, so transactions
    /// submitted through this connection are signed locally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rpc`](crate::Error::Rpc) if the endpoint is unreachable or the
    /// chain-ID query fails.
    pub async fn connect(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self> {
        let signer_address = signer.address();
        let provider: DynProvider<Ethereum> = ProviderBuilder::new()
            .wallet(signer)
            .connect(rpc_url)
            .await?
            .erased();
        let chain_id = provider.get_chain_id().await?;

        info!(
            signer = %signer_address,
            chain_id = chain_id,
            "write connection initialized",
        );

        Ok(Self::new(provider, chain_id))
    }

    /// The chain ID this connection is bound to, if any.
    #[must_use]
    pub const fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// The underlying provider.
    #[must_use]
    pub fn provider(&self) -> &DynProvider<Ethereum> {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use alloy::providers::mock::Asserter;

    use super::*;

    fn mock_provider() -> DynProvider<Ethereum> {
        ProviderBuilder::new()
            .connect_mocked_client(Asserter::new())
            .erased()
    }

    #[test]
    fn test_read_connection_exposes_chain_id() {
        let read = ReadConnection::new(mock_provider(), 11_155_111);
        assert_eq!(read.chain_id(), 11_155_111);
    }

    #[test]
    fn test_write_connection_chain_binding() {
        let bound = WriteConnection::new(mock_provider(), 1);
        assert_eq!(bound.chain_id(), Some(1));

        let unbound = WriteConnection::unbound(mock_provider());
        assert_eq!(unbound.chain_id(), None);
    }

    #[test]
    fn test_debug_hides_provider_internals() {
        let read = ReadConnection::new(mock_provider(), 5);
        let rendered = format!("{read:?}");
        assert!(rendered.contains("chain_id: 5"));
        assert!(rendered.contains(".."));
    }
}
