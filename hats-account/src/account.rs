//! Client for deployed account instances: executing operations.

use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::Address;
use alloy::sol_types::SolCall;

use crate::chains::Deployments;
use crate::client::{ClientCore, call_request};
use crate::connection::{ReadConnection, WriteConnection};
use crate::contracts::IHatsAccount;
use crate::error::{Error, Result, TxError};
use crate::types::{ExecutionResult, Operation};

/// Client for executing operations through deployed Hats account
/// instances.
///
/// Authorization is enforced entirely on-chain: a call succeeds only if
/// the signer currently wears the hat the instance is bound to. The client
/// performs no local permission check.
///
/// # Examples
///
/// ```rust,ignore
/// let executor = AccountExecutionClient::builder()
///     .read_connection(read)
///     .write_connection(write)
///     .build()?;
///
/// let op = Operation::call(target, U256::ZERO, calldata);
/// let result = executor.execute(signer, instance, op).await?;
/// assert_eq!(result.status, TransactionStatus::Success);
/// ```
#[derive(Debug, Clone)]
pub struct AccountExecutionClient {
    core: ClientCore,
}

/// Builder for constructing an [`AccountExecutionClient`].
///
/// Created by [`AccountExecutionClient::builder`].
#[derive(Debug, Default)]
pub struct AccountExecutionClientBuilder {
    read: Option<ReadConnection>,
    write: Option<WriteConnection>,
    deployments: Option<Deployments>,
    receipt_timeout: Option<Duration>,
}

impl AccountExecutionClientBuilder {
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
    pub fn build(self) -> Result<AccountExecutionClient> {
        let core = ClientCore::validate(
            self.read,
            self.write,
            self.deployments.unwrap_or_default(),
            self.receipt_timeout,
        )?;
        Ok(AccountExecutionClient { core })
    }
}

impl AccountExecutionClient {
    /// Create a builder for constructing an [`AccountExecutionClient`].
    #[must_use]
    pub fn builder() -> AccountExecutionClientBuilder {
        AccountExecutionClientBuilder::default()
    }

    /// The chain ID this client operates on.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.core.chain_id()
    }

    /// Execute a single operation through the account at `instance`.
    ///
    /// Simulates, submits, and awaits confirmation as `signer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSigner`] when the signer does not wear the
    /// account's hat, [`Error::InvalidOperation`] when the account rejects
    /// the call kind, and passes any other failure through unchanged.
    pub async fn execute(
        &self,
        signer: Address,
        instance: Address,
        operation: Operation,
    ) -> Result<ExecutionResult> {
        let call = IHatsAccount::executeCall {
            to: operation.to,
            value: operation.value,
            data: operation.data,
            operation: operation.kind.as_u8(),
        };
        self.submit(signer, instance, call.abi_encode()).await
    }

    /// Execute an ordered batch of operations as a single transaction.
    ///
    /// Operations are marshaled in caller order; atomicity (all succeed or
    /// none do) is the account contract's property.
    ///
    /// # Errors
    ///
    /// Same translation table as [`execute`](Self::execute).
    pub async fn execute_batch(
        &self,
        signer: Address,
        instance: Address,
        operations: &[Operation],
    ) -> Result<ExecutionResult> {
        let call = IHatsAccount::executeBatchCall {
            operations: operations.iter().map(Into::into).collect(),
        };
        self.submit(signer, instance, call.abi_encode()).await
    }

    async fn submit(
        &self,
        signer: Address,
        instance: Address,
        calldata: Vec<u8>,
    ) -> Result<ExecutionResult> {
        let request = call_request(instance, calldata).with_from(signer);

        let receipt = self
            .core
            .simulate_and_submit(request)
            .await
            .map_err(translate_account_revert)?;

        Ok(ExecutionResult {
            status: receipt.status().into(),
            transaction_hash: receipt.transaction_hash,
        })
    }
}

/// Map a raw pipeline failure against the account's named errors.
fn translate_account_revert(err: TxError) -> Error {
    err.translate(|decoded| match decoded {
        IHatsAccount::IHatsAccountErrors::InvalidSigner(_) => Some(Error::InvalidSigner),
        IHatsAccount::IHatsAccountErrors::InvalidOperation(_) => Some(Error::InvalidOperation),
    })
}

#[cfg(test)]
mod tests {
    use alloy::network::Ethereum;
    use alloy::primitives::{Bytes, U256, address};
    use alloy::providers::mock::Asserter;
    use alloy::providers::{DynProvider, Provider, ProviderBuilder};
    use alloy::rpc::json_rpc::ErrorPayload;
    use alloy::sol_types::SolError;

    use super::*;
    use crate::error::ConfigError;
    use crate::types::CallKind;

    const SEPOLIA: u64 = 11_155_111;

    fn mocked(asserter: &Asserter) -> DynProvider<Ethereum> {
        ProviderBuilder::new()
            .connect_mocked_client(asserter.clone())
            .erased()
    }

    fn client_with(asserter: &Asserter) -> AccountExecutionClient {
        AccountExecutionClient::builder()
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

    fn sample_operation() -> Operation {
        Operation::call(
            address!("00000000000000000000000000000000000000aa"),
            U256::ZERO,
            vec![0x01],
        )
    }

    #[test]
    fn test_builder_validates_chain_pairing() {
        let asserter = Asserter::new();
        let err = AccountExecutionClient::builder()
            .read_connection(ReadConnection::new(mocked(&asserter), 1))
            .write_connection(WriteConnection::new(mocked(&asserter), SEPOLIA))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::ChainMismatch {
                read: 1,
                write: SEPOLIA
            })
        ));
    }

    #[tokio::test]
    async fn test_execute_translates_invalid_signer() {
        let asserter = Asserter::new();
        let client = client_with(&asserter);

        let data = IHatsAccount::InvalidSigner {}.abi_encode();
        asserter.push_failure(revert_payload(&data));

        let err = client
            .execute(
                address!("00000000000000000000000000000000000000f1"),
                address!("00000000000000000000000000000000000000f2"),
                sample_operation(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSigner));
    }

    #[tokio::test]
    async fn test_execute_translates_invalid_operation() {
        let asserter = Asserter::new();
        let client = client_with(&asserter);

        let data = IHatsAccount::InvalidOperation {}.abi_encode();
        asserter.push_failure(revert_payload(&data));

        let err = client
            .execute(
                address!("00000000000000000000000000000000000000f1"),
                address!("00000000000000000000000000000000000000f2"),
                sample_operation(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOperation));
    }

    #[tokio::test]
    async fn test_execute_passes_plain_transport_error_through() {
        let asserter = Asserter::new();
        let client = client_with(&asserter);

        asserter.push_failure_msg("node unavailable");

        let err = client
            .execute(
                address!("00000000000000000000000000000000000000f1"),
                address!("00000000000000000000000000000000000000f2"),
                sample_operation(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rpc(_)));
    }

    #[test]
    fn test_batch_marshals_operations_in_caller_order() {
        let first = Operation::call(
            address!("0000000000000000000000000000000000000001"),
            U256::from(1u64),
            vec![0xaa],
        );
        let second = Operation::delegate_call(
            address!("0000000000000000000000000000000000000002"),
            U256::from(2u64),
            vec![0xbb],
        );

        let call = IHatsAccount::executeBatchCall {
            operations: [&first, &second].into_iter().map(Into::into).collect(),
        };
        let decoded = IHatsAccount::executeBatchCall::abi_decode(&call.abi_encode()).unwrap();

        assert_eq!(decoded.operations.len(), 2);
        assert_eq!(decoded.operations[0].to, first.to);
        assert_eq!(decoded.operations[0].operation, CallKind::Call.as_u8());
        assert_eq!(decoded.operations[1].to, second.to);
        assert_eq!(decoded.operations[1].data, Bytes::from(vec![0xbb]));
        assert_eq!(
            decoded.operations[1].operation,
            CallKind::DelegateCall.as_u8()
        );
    }
}
