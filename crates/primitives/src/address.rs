//! Account addresses.

use crate::shard::ShardId;
use alloy_rlp::{RlpDecodableWrapper, RlpEncodableWrapper};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// A 20-byte account address.
///
/// The leading [`ShardId::SIZE`] bytes are the big-endian id of the shard the
/// account lives on; everything downstream of routing and hash tagging keys
/// off that projection.
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
pub struct Address(pub alloy_primitives::Address);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self(alloy_primitives::Address::ZERO);

    /// Creates an address from raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(alloy_primitives::Address::new(bytes))
    }

    /// Creates an address from a 20-byte slice.
    ///
    /// # Panics
    ///
    /// Panics if the slice is not exactly 20 bytes long.
    pub fn from_slice(slice: &[u8]) -> Self {
        Self(alloy_primitives::Address::from_slice(slice))
    }

    /// Returns the shard the account lives on.
    pub fn shard_id(&self) -> ShardId {
        let bytes = self.0.as_slice();
        ShardId::new(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Returns the address as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self::new(bytes)
    }
}
