//! Protocol-wide constants of the transaction model.

/// Price of one gas unit, in the smallest currency denomination.
pub const DEFAULT_GAS_PRICE: u64 = 10_000_000;

/// Fee cap stamped on fee packs built without an explicit one.
pub const DEFAULT_MAX_FEE_PER_GAS: u64 = 1_000_000_000;

/// Maximum number of token balances a transaction may carry.
pub const TRANSACTION_MAX_TOKEN_SIZE: usize = 256;

/// Maximum size of the transaction data field, in bytes.
pub const TRANSACTION_MAX_DATA_SIZE: usize = 24576;
