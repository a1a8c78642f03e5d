#![warn(missing_debug_implementations, missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Core transaction types of the Lattice sharded execution network.
//!
//! Every executor, mempool, block producer and light client reconstructs
//! hashes and signatures from these structures, so the canonical RLP
//! encoding, the shard-tagged hashing and the flag algebra defined here are
//! the consistency root of the whole cluster.

mod address;
mod bitflags;
pub mod constants;
mod error;
mod fee;
mod shard;
mod token;
mod transaction;
mod value;

pub use address::Address;
pub use bitflags::{BitFlags, FlagBits};
pub use error::TransactionError;
pub use fee::FeePack;
pub use shard::{to_sharded_hash, ShardId};
pub use token::{TokenBalance, TokenId};
pub use transaction::{
    AsyncContext, AsyncRequestInfo, AsyncResponsePayload, ChainId, ExternalTransaction,
    ForwardKind, InternalTransactionPayload, OutboundTransaction, ParseForwardKindError,
    ParseTransactionKindError, Seqno, Transaction, TransactionDigest, TransactionFlags,
    TransactionIndex, TransactionKind, TxnWithHash,
};
pub use value::{Gas, Value};

/// Contract bytecode or calldata.
pub type Code = alloy_primitives::Bytes;

/// A transaction hash: a shard-tagged Keccak-256 digest.
pub type TxHash = alloy_primitives::B256;

// Useful reexports
pub use alloy_primitives::{keccak256, B256, Bytes, U256};
