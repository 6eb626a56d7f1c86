//! Per-chain deployment configuration.
//!
//! The registry and the Hats token contract live at fixed addresses, while
//! the account implementation is deployed per chain. [`Deployments`] is an
//! immutable table injected at client construction; the compiled default
//! carries the published deployments. There is no global mutable state.

use alloy::primitives::{Address, address};

/// The canonical ERC-6551 registry, deployed at the same address on every
/// supported chain.
pub const ERC6551_REGISTRY: Address = address!("000000006551c19487814612e58FE06813775758");

/// The Hats protocol token contract (the permission-token registry).
pub const HATS: Address = address!("3bc1A0Ad72417f2d411118085256fC53CBdDd137");

/// Published Hats account implementation deployments, keyed by chain ID.
const DEFAULT_IMPLEMENTATIONS: &[(u64, Address)] = &[
    // Sepolia
    (
        11_155_111,
        address!("5CB8a5B063B7E94cF39E8A8813A777f49B8DD050"),
    ),
];

/// Immutable per-chain deployment table.
///
/// Construction of any client fails with
/// [`ConfigError::UnsupportedChain`](crate::ConfigError::UnsupportedChain)
/// when the bound chain ID has no implementation entry here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployments {
    registry: Address,
    token_contract: Address,
    implementations: Vec<(u64, Address)>,
}

impl Default for Deployments {
    fn default() -> Self {
        Self {
            registry: ERC6551_REGISTRY,
            token_contract: HATS,
            implementations: DEFAULT_IMPLEMENTATIONS.to_vec(),
        }
    }
}

impl Deployments {
    /// Create a custom deployment table.
    ///
    /// Useful for local forks and chains the compiled default does not
    /// cover yet.
    #[must_use]
    pub fn new(
        registry: Address,
        token_contract: Address,
        implementations: Vec<(u64, Address)>,
    ) -> Self {
        Self {
            registry,
            token_contract,
            implementations,
        }
    }

    /// Address of the ERC-6551 registry.
    #[must_use]
    pub const fn registry(&self) -> Address {
        self.registry
    }

    /// Address of the permission-token (Hats) contract.
    #[must_use]
    pub const fn token_contract(&self) -> Address {
        self.token_contract
    }

    /// Look up the account implementation deployed on `chain_id`.
    #[must_use]
    pub fn implementation_for(&self, chain_id: u64) -> Option<Address> {
        self.implementations
            .iter()
            .find(|(id, _)| *id == chain_id)
            .map(|(_, implementation)| *implementation)
    }

    /// Chain IDs with a known implementation deployment.
    pub fn supported_chains(&self) -> impl Iterator<Item = u64> + '_ {
        self.implementations.iter().map(|(id, _)| *id)
    }
}
