//! Carriers for the async request/response protocol.
//!
//! These types are opaque here; only the execution engine inspects the
//! captured state and return data.

use crate::{address::Address, value::Gas};
use alloy_primitives::Bytes;
use alloy_rlp::{RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};

/// An incomplete request: a request waiting for the response to a nested
/// request.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, RlpEncodable, RlpDecodable, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct AsyncRequestInfo {
    /// Cluster-unique request id; zero never identifies a live request.
    pub id: u64,
    /// The account awaiting the response.
    pub caller: Address,
}

/// Data returned in the response leg of an async call.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, RlpEncodable, RlpDecodable, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct AsyncResponsePayload {
    /// Whether the request executed successfully.
    pub success: bool,
    /// Return data of the request.
    pub return_data: Bytes,
}

/// Execution context restored when a response arrives.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, RlpEncodable, RlpDecodable, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct AsyncContext {
    /// Gas reserved to process the response.
    pub response_processing_gas: Gas,
}
