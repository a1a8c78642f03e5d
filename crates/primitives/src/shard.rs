//! Shard identifiers and the shard-tagged hash.

use alloy_primitives::B256;
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Identifier of an execution shard.
///
/// Every address statically belongs to one shard (see
/// [`Address::shard_id`](crate::Address::shard_id)); the same two-byte
/// encoding tags every transaction hash via [`to_sharded_hash`].
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
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[display("{_0}")]
pub struct ShardId(pub u16);

impl ShardId {
    /// Width of the encoded shard id, in bytes.
    pub const SIZE: usize = 2;

    /// The coordination shard.
    pub const MAIN: Self = Self(0);

    /// Creates a shard id.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns whether this is the main shard.
    pub const fn is_main(&self) -> bool {
        self.0 == Self::MAIN.0
    }

    /// Big-endian bytes of the shard id.
    pub const fn to_be_bytes(self) -> [u8; Self::SIZE] {
        self.0.to_be_bytes()
    }
}

/// Tags a digest with its destination shard.
///
/// The leading [`ShardId::SIZE`] bytes of the digest are overwritten with the
/// big-endian shard id, so transactions bound for different shards never share
/// a hash anywhere in the cluster.
pub fn to_sharded_hash(hash: B256, shard_id: ShardId) -> B256 {
    let mut tagged = hash;
    tagged.0[..ShardId::SIZE].copy_from_slice(&shard_id.to_be_bytes());
    tagged
}
