//! Errors surfaced by the transaction model.

use crate::{
    constants::{TRANSACTION_MAX_DATA_SIZE, TRANSACTION_MAX_TOKEN_SIZE},
    value::Value,
};

/// Errors produced when validating, pricing or signing a transaction.
///
/// Malformed canonical bytes surface as [`alloy_rlp::Error`] from the
/// decoding entry points instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// An internal transaction claims more than one role.
    #[error("internal transaction cannot be deploy, refund, bounce or async at the same time")]
    InvalidInternalFlags,
    /// An external transaction claims a role reserved for internal ones.
    #[error("external transaction cannot be bounce, refund or async")]
    InvalidExternalFlags,
    /// Only main-shard senders may address the main shard.
    #[error("transaction to the main shard is not allowed from a regular shard")]
    MainShardAccessDenied,
    /// The token list exceeds the protocol ceiling.
    #[error("transaction carries {0} token balances, limit is {limit}", limit = TRANSACTION_MAX_TOKEN_SIZE)]
    TooManyTokens(usize),
    /// The data field exceeds the protocol ceiling.
    #[error("transaction data is {0} bytes, limit is {limit}", limit = TRANSACTION_MAX_DATA_SIZE)]
    DataTooLarge(usize),
    /// The fee cap cannot cover the base fee.
    #[error("max fee per gas is less than base fee per gas: {max_fee_per_gas} < {base_fee_per_gas}")]
    MaxFeeBelowBase {
        /// The declared fee cap.
        max_fee_per_gas: Value,
        /// The block base fee the cap failed to cover.
        base_fee_per_gas: Value,
    },
    /// The ECDSA primitive rejected the key or message.
    #[error("signing failed: {0}")]
    Signing(#[from] secp256k1::Error),
    /// A recoverable signature must be exactly 65 bytes.
    #[error("signature must be 65 bytes, got {0}")]
    InvalidSignatureLength(usize),
}
