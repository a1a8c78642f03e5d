//! Transaction and forwarding kind enums with their stable textual names.

use alloy_rlp::{Decodable, Encodable, Error as RlpError};
use bytes::BufMut;
use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Error thrown when failing to parse a [`TransactionKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown TransactionKind: {0}")]
pub struct ParseTransactionKindError(String);

/// What a transaction does.
///
/// The discriminant is the canonical wire byte.
#[repr(u8)]
#[derive(
    Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TransactionKind {
    /// Runs the destination contract with the attached calldata.
    #[default]
    Execution = 0,
    /// Deploys the attached bytecode.
    Deploy = 1,
    /// Returns unused fee credit.
    Refund = 2,
    /// The response leg of an async request.
    Response = 3,
}

impl TransactionKind {
    /// Short textual form, as accepted by configuration and CLI parsing.
    pub const fn as_short_str(&self) -> &'static str {
        match self {
            Self::Execution => "execution",
            Self::Deploy => "deploy",
            Self::Refund => "refund",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Execution => "ExecutionTransactionKind",
            Self::Deploy => "DeployTransactionKind",
            Self::Refund => "RefundTransactionKind",
            Self::Response => "ResponseTransactionKind",
        })
    }
}

impl FromStr for TransactionKind {
    type Err = ParseTransactionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "execution" | "ExecutionTransactionKind" => Ok(Self::Execution),
            "deploy" | "DeployTransactionKind" => Ok(Self::Deploy),
            "refund" | "RefundTransactionKind" => Ok(Self::Refund),
            "response" | "ResponseTransactionKind" => Ok(Self::Response),
            _ => Err(ParseTransactionKindError(s.to_string())),
        }
    }
}

impl TryFrom<u8> for TransactionKind {
    type Error = ParseTransactionKindError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Execution),
            1 => Ok(Self::Deploy),
            2 => Ok(Self::Refund),
            3 => Ok(Self::Response),
            _ => Err(ParseTransactionKindError(value.to_string())),
        }
    }
}

impl Encodable for TransactionKind {
    fn encode(&self, out: &mut dyn BufMut) {
        (*self as u8).encode(out)
    }

    fn length(&self) -> usize {
        (*self as u8).length()
    }
}

impl Decodable for TransactionKind {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let kind = u8::decode(buf)?;
        Self::try_from(kind).map_err(|_| RlpError::Custom("unknown transaction kind"))
    }
}

/// Error thrown when failing to parse a [`ForwardKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ForwardKind: {0}")]
pub struct ParseForwardKindError(String);

/// How the remaining fee credit travels with an outbound transaction.
#[repr(u8)]
#[derive(
    Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ForwardKind {
    /// Forward whatever credit remains after execution.
    #[default]
    Remaining = 0,
    /// Forward a percentage of the remaining credit.
    Percentage = 1,
    /// Forward a fixed value.
    Value = 2,
    /// Keep everything on the source shard.
    None = 3,
}

impl ForwardKind {
    /// Short textual form, as accepted by configuration and CLI parsing.
    pub const fn as_short_str(&self) -> &'static str {
        match self {
            Self::Remaining => "remaining",
            Self::Percentage => "percentage",
            Self::Value => "value",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ForwardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remaining => "ForwardKindRemaining",
            Self::Percentage => "ForwardKindPercentage",
            Self::Value => "ForwardKindValue",
            Self::None => "ForwardKindNone",
        })
    }
}

impl FromStr for ForwardKind {
    type Err = ParseForwardKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remaining" | "ForwardKindRemaining" => Ok(Self::Remaining),
            "percentage" | "ForwardKindPercentage" => Ok(Self::Percentage),
            "value" | "ForwardKindValue" => Ok(Self::Value),
            "none" | "ForwardKindNone" => Ok(Self::None),
            _ => Err(ParseForwardKindError(s.to_string())),
        }
    }
}

impl TryFrom<u8> for ForwardKind {
    type Error = ParseForwardKindError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Remaining),
            1 => Ok(Self::Percentage),
            2 => Ok(Self::Value),
            3 => Ok(Self::None),
            _ => Err(ParseForwardKindError(value.to_string())),
        }
    }
}

impl Encodable for ForwardKind {
    fn encode(&self, out: &mut dyn BufMut) {
        (*self as u8).encode(out)
    }

    fn length(&self) -> usize {
        (*self as u8).length()
    }
}

impl Decodable for ForwardKind {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let kind = u8::decode(buf)?;
        Self::try_from(kind).map_err(|_| RlpError::Custom("unknown forward kind"))
    }
}
