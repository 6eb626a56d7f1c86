//! Value objects passed into and returned from client operations.
//!
//! Everything here is a short-lived, immutable value constructed per call;
//! nothing is persisted or shared between invocations.

use alloy::primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::contracts::IHatsAccount;

/// How an account instance dispatches an operation to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CallKind {
    /// A regular `CALL` in the account's own context.
    Call = 0,
    /// A `DELEGATECALL` executing the target's code in the account's storage.
    DelegateCall = 1,
}

impl CallKind {
    /// The numeric wire value expected by the account contract.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// One unit of work for an account instance to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Target address of the operation.
    pub to: Address,
    /// Native value (in wei) the account sends to the target.
    pub value: U256,
    /// Opaque calldata forwarded to the target.
    pub data: Bytes,
    /// Dispatch mechanism for the operation.
    pub kind: CallKind,
}

impl Operation {
    /// Create a regular call operation.
    pub fn call(to: Address, value: U256, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value,
            data: data.into(),
            kind: CallKind::Call,
        }
    }

    /// Create a delegatecall operation.
    pub fn delegate_call(to: Address, value: U256, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value,
            data: data.into(),
            kind: CallKind::DelegateCall,
        }
    }
}

impl From<&Operation> for IHatsAccount::Operation {
    fn from(op: &Operation) -> Self {
        Self {
            to: op.to,
            value: op.value,
            data: op.data.clone(),
            operation: op.kind.as_u8(),
        }
    }
}

/// Terminal status of a confirmed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// The transaction was included and succeeded.
    Success,
    /// The transaction was included but reverted.
    Reverted,
}

impl From<bool> for TransactionStatus {
    fn from(success: bool) -> Self {
        if success { Self::Success } else { Self::Reverted }
    }
}

/// Outcome of [`AccountFactoryClient::create_account`].
///
/// The `new_account` field always equals what
/// [`AccountFactoryClient::predict_address`] returns for the same
/// `(hat_id, salt)` pair.
///
/// [`AccountFactoryClient::create_account`]: crate::AccountFactoryClient::create_account
/// [`AccountFactoryClient::predict_address`]: crate::AccountFactoryClient::predict_address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResult {
    /// Terminal status of the creation transaction.
    pub status: TransactionStatus,
    /// Hash of the creation transaction.
    pub transaction_hash: B256,
    /// Address of the newly deployed account instance.
    pub new_account: Address,
}

/// Outcome of an `execute` or `execute_batch` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Terminal status of the execution transaction.
    pub status: TransactionStatus,
    /// Hash of the execution transaction.
    pub transaction_hash: B256,
}
