//! Error types for the hats-account SDK.
//!
//! Four failure classes exist, mirroring where a call can go wrong:
//!
//! - [`ConfigError`] — rejected at construction, before any network call;
//! - typed revert variants ([`Error::AccountCreationFailed`],
//!   [`Error::InvalidSigner`], [`Error::InvalidOperation`]) — decoded from
//!   on-chain revert data after a failed simulate or submit;
//! - opaque pass-through ([`Error::Rpc`], [`Error::Receipt`]) — anything
//!   that does not decode to a known revert, rethrown unchanged to preserve
//!   its diagnostic detail;
//! - [`Error::Unexpected`] — a protocol invariant was violated (for
//!   example, a creation transaction confirmed without emitting the
//!   registry's creation event).
//!
//! Nothing is logged, swallowed, or retried internally; every failure is a
//! terminal, synchronous rejection of the in-flight operation.

use alloy::providers::PendingTransactionError;
use alloy::sol_types::SolInterface;
use alloy::transports::TransportError;

/// Result type alias for hats-account operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the hats-account SDK.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Client configuration was rejected at construction.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The registry reverted account creation.
    #[error("account creation has failed")]
    AccountCreationFailed,

    /// The account reverted: the calling account is not wearing the
    /// required hat.
    #[error("calling account is not wearing the required hat")]
    InvalidSigner,

    /// The account reverted: only call or delegatecall operations are
    /// supported.
    #[error("only call or delegatecall operations are supported")]
    InvalidOperation,

    /// A transport or RPC failure that does not decode to a known revert.
    #[error(transparent)]
    Rpc(#[from] TransportError),

    /// The transaction was submitted but awaiting its receipt failed.
    #[error(transparent)]
    Receipt(#[from] PendingTransactionError),

    /// A protocol invariant was violated.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Create an unexpected-invariant error with a message.
    #[must_use]
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }
}

/// Construction-time configuration failures.
///
/// These are never retried; the caller must fix the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No read-capable chain connection was provided.
    #[error("a read-capable chain connection is required")]
    MissingReadClient,

    /// No transaction-signing chain connection was provided.
    #[error("a transaction-signing chain connection is required")]
    MissingWriteClient,

    /// The signing connection is not bound to a specific chain.
    #[error("the signing connection is not bound to a chain")]
    NoChainBound,

    /// The read and signing connections target different chains.
    #[error("read connection targets chain {read} but signing connection targets chain {write}")]
    ChainMismatch {
        /// Chain ID the read connection is bound to.
        read: u64,
        /// Chain ID the signing connection is bound to.
        write: u64,
    },

    /// No account implementation is deployed on the bound chain.
    #[error("chain ID {0} is not supported")]
    UnsupportedChain(u64),
}

/// Raw failure from the simulate → submit → await-receipt pipeline, before
/// revert translation.
#[derive(Debug)]
pub(crate) enum TxError {
    /// Simulation or submission failed at the RPC layer.
    Rpc(TransportError),
    /// The receipt never resolved (dropped, timed out, or transport error).
    Receipt(PendingTransactionError),
}

impl TxError {
    /// Translate a pipeline failure against a contract's error interface.
    ///
    /// Walks the RPC error for revert data, ABI-decodes it as `I`, and maps
    /// the decoded error through `map`. Absent or undecodable revert data,
    /// or a decoded error `map` declines, falls through to the opaque
    /// pass-through variants so the original diagnostic detail survives.
    pub(crate) fn translate<I, F>(self, map: F) -> Error
    where
        I: SolInterface,
        F: FnOnce(I) -> Option<Error>,
    {
        match self {
            Self::Rpc(err) => {
                let decoded = err
                    .as_error_resp()
                    .and_then(|payload| payload.as_revert_data())
                    .and_then(|data| I::abi_decode(&data).ok());
                if let Some(translated) = decoded.and_then(map) {
                    return translated;
                }
                Error::Rpc(err)
            }
            Self::Receipt(err) => Error::Receipt(err),
        }
    }
}
