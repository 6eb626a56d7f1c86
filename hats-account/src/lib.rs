#![cfg_attr(docsrs, feature(doc_cfg))]
//! Client SDK for token-bound Hats accounts on EVM-compatible chains.
//!
//! A Hats account is a smart-contract account deterministically derived
//! from a hat (permission token) through the canonical ERC-6551 registry.
//! Whoever currently wears the hat may operate the account. This crate
//! wraps the two contract surfaces involved; all business logic — address
//! derivation, wearer checks, signature validation — stays on-chain.
//!
//! # Architecture
//!
//! ```text
//! ReadConnection + WriteConnection (alloy providers, chain-ID bound)
//!   ├── AccountFactoryClient   → ERC-6551 registry
//!   │     ├── predict_address  → derive without deploying
//!   │     └── create_account   → deploy + recover address from the event
//!   └── AccountExecutionClient → deployed account instance
//!         ├── execute          → one (to, value, data, kind) operation
//!         └── execute_batch    → ordered operations, one transaction
//! ```
//!
//! Every state-changing operation follows the same sequence: dry-run on
//! the read connection, submit through the write connection, await the
//! receipt, translate known reverts into typed errors. There are no
//! retries, no caching, and no shared mutable state.
//!
//! # Examples
//!
//! ```rust,ignore
//! use hats_account::{AccountFactoryClient, ReadConnection, WriteConnection};
//!
//! let read = ReadConnection::connect("https://sepolia.example.org").await?;
//! let write = WriteConnection::connect("https://sepolia.example.org", signer).await?;
//!
//! let factory = AccountFactoryClient::builder()
//!     .read_connection(read)
//!     .write_connection(write)
//!     .build()?;
//!
//! let created = factory.create_account(signer_address, hat_id, salt).await?;
//! assert_eq!(
//!     created.new_account,
//!     factory.predict_address(hat_id, salt).await?,
//! );
//! ```

mod account;
mod chains;
mod client;
mod connection;
pub mod contracts;
mod error;
mod factory;
mod types;

pub use account::{AccountExecutionClient, AccountExecutionClientBuilder};
pub use chains::{Deployments, ERC6551_REGISTRY, HATS};
pub use connection::{ReadConnection, WriteConnection};
pub use error::{ConfigError, Error, Result};
pub use factory::{AccountFactoryClient, AccountFactoryClientBuilder};
pub use types::{
    CallKind, CreateAccountResult, ExecutionResult, Operation, TransactionStatus,
};
