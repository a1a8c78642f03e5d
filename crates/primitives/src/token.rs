//! Token balances attached to transactions.

use crate::{address::Address, value::Value};
use alloy_rlp::{RlpDecodable, RlpDecodableWrapper, RlpEncodable, RlpEncodableWrapper};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Identifier of a token: the address of its issuing contract.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    RlpEncodableWrapper,
    RlpDecodableWrapper,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[display("{_0}")]
pub struct TokenId(pub Address);

/// An amount of a single token carried by a transaction.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, RlpEncodable, RlpDecodable, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// The token being moved.
    pub token: TokenId,
    /// The amount moved.
    pub balance: Value,
}
