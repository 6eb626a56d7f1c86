//! Solidity interface bindings for the on-chain collaborators.
//!
//! Two contracts are involved: the canonical ERC-6551 registry, which
//! deterministically derives and deploys token-bound accounts, and the
//! Hats account implementation deployed behind each instance, which
//! executes operations on behalf of the current hat wearer.
//!
//! All business logic (address derivation, wearer checks, signature
//! validation) lives on-chain; these bindings only describe the call,
//! event, and error shapes the client marshals against.

use alloy::sol;

sol! {
    /// The canonical ERC-6551 registry.
    ///
    /// Derivation is a pure function of
    /// `(implementation, salt, chainId, tokenContract, tokenId)`: the same
    /// tuple always yields the same account address, whether queried via
    /// [`account`](IERC6551Registry::accountCall) or deployed via
    /// [`createAccount`](IERC6551Registry::createAccountCall).
    #[derive(Debug, PartialEq, Eq)]
    interface IERC6551Registry {
        /// Emitted exactly once per successful `createAccount` call.
        event ERC6551AccountCreated(
            address account,
            address indexed implementation,
            bytes32 salt,
            uint256 chainId,
            address indexed tokenContract,
            uint256 indexed tokenId
        );

        /// The registry could not deploy the account.
        error AccountCreationFailed();

        /// Computes the token-bound account address without deploying it.
        function account(
            address implementation,
            bytes32 salt,
            uint256 chainId,
            address tokenContract,
            uint256 tokenId
        ) external view returns (address account);

        /// Deploys (or returns, if already deployed) the token-bound account.
        function createAccount(
            address implementation,
            bytes32 salt,
            uint256 chainId,
            address tokenContract,
            uint256 tokenId
        ) external returns (address account);
    }

    /// A deployed Hats account instance.
    ///
    /// Both entry points are gated on-chain: the transaction sender must
    /// currently wear the hat the instance is bound to.
    #[derive(Debug, PartialEq, Eq)]
    interface IHatsAccount {
        /// One unit of work forwarded by the account.
        struct Operation {
            address to;
            uint256 value;
            bytes data;
            uint8 operation;
        }

        /// The sender is not wearing the account's hat.
        error InvalidSigner();

        /// The requested call kind is not supported by the account.
        error InvalidOperation();

        /// Executes a single operation.
        function execute(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation
        ) external payable returns (bytes memory);

        /// Executes an ordered batch of operations atomically.
        function executeBatch(
            Operation[] calldata operations
        ) external payable returns (bytes[] memory);
    }
}
