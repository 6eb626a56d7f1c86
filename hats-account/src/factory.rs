//! Client for the ERC-6551 registry: predicting and creating accounts.

use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, B256, U256};
use alloy::rpc::types::Log;
use alloy::sol_types::SolCall;
use tracing::info;

use crate::chains::Deployments;
use crate::client::{ClientCore, call_request};
use crate::connection::{ReadConnection, WriteConnection};
use crate::contracts::IERC6551Registry;
use crate::error::{Error, Result};
use crate::types::CreateAccountResult;

/// Client for deriving and deploying token-bound Hats accounts through the
/// ERC-6551 registry.
///
/// The account address is a pure function of
/// `(implementation, salt, chain ID, token contract, hat ID)`, so
/// [`predict_address`](Self::predict_address) before and after
/// [`create_account`](Self::create_account) always agree for the same
/// inputs.
///
/// # Examples
///
/// ```rust,ignore
/// let factory = AccountFactoryClient::builder()
///     .read_connection(read)
///     .write_connection(write)
///     .build()?;
///
/// let predicted = factory.predict_address(hat_id, U256::from(1u64)).await?;
/// let created = factory.create_account(signer, hat_id, U256::from(1u64)).await?;
/// assert_eq!(created.new_account, predicted);
/// ```
#[derive(Debug, Clone)]
pub struct AccountFactoryClient {
    core: ClientCore,
}

/// Builder for constructing an [`AccountFactoryClient`].
///
/// Created by [`AccountFactoryClient::builder`].
#[derive(Debug, Default)]
pub struct AccountFactoryClientBuilder {
    read: Option<ReadConnection>,
    write: Option<WriteConnection>,
    deployments: Option<Deployments>,
    receipt_timeout: Option<Duration>,
}

impl AccountFactoryClientBuilder {
    /// Set the read-capable chain connection (required).
    #[must_use]
    pub fn read_connection(mut self, connection: ReadConnection) -> Self {
        self.read = Some(connection);
        self
    }

    /// Set the transaction-signing chain connection (required).
    #[must_use]
    pub fn write_connection(mut self, connection: WriteConnection) -> Self {
        self.write = Some(connection);
        self
    }

    /// Override the per-chain deployment table.
    #[must_use]
    pub fn deployments(mut self, deployments: Deployments) -> Self {
        self.deployments = Some(deployments);
        self
    }

    /// Bound the time spent awaiting a transaction receipt.
    ///
    /// Without this, awaiting blocks until the transport resolves it.
    #[must_use]
    pub const fn receipt_timeout(mut self, timeout: Duration) -> Self {
        self.receipt_timeout = Some(timeout);
        self
    }

    /// Validate the configuration and build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a connection is missing, the signing
    /// connection has no bound chain, the connections target different
    /// chains, or the bound chain has no known implementation deployment.
    pub fn build(self) -> Result<AccountFactoryClient> {
        let core = ClientCore::validate(
            self.read,
            self.write,
            self.deployments.unwrap_or_default(),
            self.receipt_timeout,
        )?;
        Ok(AccountFactoryClient { core })
    }
}

impl AccountFactoryClient {
    /// Create a builder for constructing an [`AccountFactoryClient`].
    #[must_use]
    pub fn builder() -> AccountFactoryClientBuilder {
        AccountFactoryClientBuilder::default()
    }

    /// The chain ID this client operates on.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.core.chain_id()
    }

    /// The account implementation used for derivation on this chain.
    #[must_use]
    pub const fn implementation(&self) -> Address {
        self.core.implementation()
    }

    /// Predict the address of the account bound to `hat_id` and `salt`.
    ///
    /// Performs a read-only registry call; no state changes. Repeated
    /// calls with the same inputs return the same address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rpc`] on transport failure.
    pub async fn predict_address(&self, hat_id: U256, salt: U256) -> Result<Address> {
        let call = IERC6551Registry::accountCall {
            implementation: self.core.implementation(),
            salt: B256::from(salt),
            chainId: U256::from(self.core.chain_id()),
            tokenContract: self.core.deployments().token_contract(),
            tokenId: hat_id,
        };
        let request = call_request(self.core.deployments().registry(), call.abi_encode());

        let output = self.core.read_call(request).await?;
        IERC6551Registry::accountCall::abi_decode_returns(&output)
            .map_err(|err| Error::unexpected(format!("undecodable registry response: {err}")))
    }

    /// Deploy the account bound to `hat_id` and `salt`.
    ///
    /// Simulates the registry call as `signer`, submits it, awaits the
    /// receipt, and recovers the new account address from the registry's
    /// creation event. The returned address equals what
    /// [`predict_address`](Self::predict_address) yields for the same
    /// inputs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccountCreationFailed`] when the registry reverts
    /// creation, [`Error::Unexpected`] when the transaction confirms
    /// without emitting a creation event, and passes any other failure
    /// through unchanged.
    pub async fn create_account(
        &self,
        signer: Address,
        hat_id: U256,
        salt: U256,
    ) -> Result<CreateAccountResult> {
        let call = IERC6551Registry::createAccountCall {
            implementation: self.core.implementation(),
            salt: B256::from(salt),
            chainId: U256::from(self.core.chain_id()),
            tokenContract: self.core.deployments().token_contract(),
            tokenId: hat_id,
        };
        let request = call_request(self.core.deployments().registry(), call.abi_encode())
            .with_from(signer);

        let receipt = self
            .core
            .simulate_and_submit(request)
            .await
            .map_err(|err| {
                err.translate(|decoded| match decoded {
                    IERC6551Registry::IERC6551RegistryErrors::AccountCreationFailed(_) => {
                        Some(Error::AccountCreationFailed)
                    }
                })
            })?;

        let new_account = created_account(receipt.inner.logs())?;

        info!(
            account = %new_account,
            tx_hash = %receipt.transaction_hash,
            "hats account created",
        );

        Ok(CreateAccountResult {
            status: receipt.status().into(),
            transaction_hash: receipt.transaction_hash,
            new_account,
        })
    }
}

/// Recover the created account address from a receipt's logs.
///
/// Logs are scanned in order and the first one decoding as
/// `ERC6551AccountCreated` wins; logs that fail to decode are skipped.
/// The registry emits exactly one such event per successful creation, so
/// a confirmed receipt without one violates a protocol invariant and
/// surfaces as [`Error::Unexpected`].
fn created_account(logs: &[Log]) -> Result<Address> {
    logs.iter()
        .find_map(|log| {
            log.log_decode::<IERC6551Registry::ERC6551AccountCreated>()
                .ok()
                .map(|event| event.inner.data.account)
        })
        .ok_or_else(|| {
            Error::unexpected("transaction confirmed but no account-creation event was emitted")
        })
}

#[cfg(test)]
mod tests {
    use alloy::network::Ethereum;
    use alloy::primitives::{Bytes, LogData, address};
    use alloy::providers::mock::Asserter;
    use alloy::providers::{DynProvider, Provider, ProviderBuilder};
    use alloy::rpc::json_rpc::ErrorPayload;
    use alloy::sol_types::{SolError, SolEvent, SolValue};

    use super::*;
    use crate::error::ConfigError;

    const SEPOLIA: u64 = 11_155_111;

    fn mocked(asserter: &Asserter) -> DynProvider<Ethereum> {
        ProviderBuilder::new()
            .connect_mocked_client(asserter.clone())
            .erased()
    }

    fn client_with(asserter: &Asserter) -> AccountFactoryClient {
        AccountFactoryClient::builder()
            .read_connection(ReadConnection::new(mocked(asserter), SEPOLIA))
            .write_connection(WriteConnection::new(mocked(asserter), SEPOLIA))
            .build()
            .unwrap()
    }

    fn revert_payload(data: &[u8]) -> ErrorPayload {
        ErrorPayload {
            code: 3,
            message: "execution reverted".into(),
            data: Some(
                serde_json::value::to_raw_value(&format!(
                    "0x{}",
                    alloy::primitives::hex::encode(data)
                ))
                .unwrap(),
            ),
        }
    }

    fn creation_log(account: Address) -> Log {
        let event = IERC6551Registry::ERC6551AccountCreated {
            account,
            implementation: address!("5CB8a5B063B7E94cF39E8A8813A777f49B8DD050"),
            salt: B256::from(U256::from(1u64)),
            chainId: U256::from(SEPOLIA),
            tokenContract: crate::chains::HATS,
            tokenId: U256::from(42u64),
        };
        Log {
            inner: alloy::primitives::Log {
                address: crate::chains::ERC6551_REGISTRY,
                data: event.encode_log_data(),
            },
            ..Default::default()
        }
    }

    fn foreign_log() -> Log {
        Log {
            inner: alloy::primitives::Log {
                address: address!("00000000000000000000000000000000000000ee"),
                data: LogData::new_unchecked(
                    vec![B256::from(U256::from(99u64))],
                    Bytes::from(vec![0u8; 32]),
                ),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_builder_requires_connections() {
        let err = AccountFactoryClient::builder().build().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingReadClient)
        ));
    }

    #[tokio::test]
    async fn test_predict_address_is_idempotent() {
        let predicted = address!("00000000000000000000000000000000000000ab");
        let asserter = Asserter::new();
        let client = client_with(&asserter);

        asserter.push_success(&Bytes::from(predicted.abi_encode()));
        asserter.push_success(&Bytes::from(predicted.abi_encode()));

        let first = client.predict_address(U256::from(42u64), U256::from(1u64)).await.unwrap();
        let second = client.predict_address(U256::from(42u64), U256::from(1u64)).await.unwrap();
        assert_eq!(first, predicted);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_create_account_translates_creation_revert() {
        let asserter = Asserter::new();
        let client = client_with(&asserter);

        let data = IERC6551Registry::AccountCreationFailed {}.abi_encode();
        asserter.push_failure(revert_payload(&data));

        let err = client
            .create_account(
                address!("00000000000000000000000000000000000000f1"),
                U256::from(42u64),
                U256::from(1u64),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AccountCreationFailed));
    }

    #[tokio::test]
    async fn test_create_account_passes_unknown_revert_through() {
        let asserter = Asserter::new();
        let client = client_with(&asserter);

        asserter.push_failure(revert_payload(&[0xde, 0xad, 0xbe, 0xef]));

        let err = client
            .create_account(
                address!("00000000000000000000000000000000000000f1"),
                U256::from(42u64),
                U256::from(1u64),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rpc(_)));
    }

    #[test]
    fn test_event_scan_takes_first_decodable_log() {
        let account = address!("00000000000000000000000000000000000000cd");
        let logs = vec![foreign_log(), creation_log(account), creation_log(Address::ZERO)];
        assert_eq!(created_account(&logs).unwrap(), account);
    }

    #[test]
    fn test_missing_creation_event_is_unexpected_error() {
        for logs in [vec![], vec![foreign_log()]] {
            match created_account(&logs).unwrap_err() {
                Error::Unexpected(msg) => {
                    assert!(msg.contains("no account-creation event"));
                }
                other => panic!("expected Error::Unexpected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_salt_is_zero_padded_big_endian() {
        let salt = B256::from(U256::from(1u64));
        let mut expected = [0u8; 32];
        expected[31] = 1;
        assert_eq!(salt.as_slice(), &expected);
    }
}
