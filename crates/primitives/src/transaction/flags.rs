//! Transaction role flags.

use super::kind::TransactionKind;
use crate::bitflags::BitFlags;
use alloy_rlp::{Decodable, Encodable, Error as RlpError};
use bytes::BufMut;
use core::fmt;
use derive_more::{Deref, DerefMut};
use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};

/// Role flags pinned to every transaction.
///
/// The raw byte is the canonical wire form; bits outside the named positions
/// are reserved and must stay zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deref, DerefMut)]
pub struct TransactionFlags(BitFlags<u8>);

impl TransactionFlags {
    /// Produced by a contract rather than submitted from outside.
    pub const INTERNAL: u32 = 0;
    /// Carries a deploy payload.
    pub const DEPLOY: u32 = 1;
    /// Carries an unused-fee refund.
    pub const REFUND: u32 = 2;
    /// Carries reverted value back to the caller.
    pub const BOUNCE: u32 = 3;
    /// The response leg of a request/response pair.
    pub const RESPONSE: u32 = 4;

    const RESERVED_MASK: u8 = !0b0001_1111;

    /// Creates flags from the raw bit byte.
    pub const fn from_bits(bits: u8) -> Self {
        Self(BitFlags::from_bits(bits))
    }

    /// Returns the raw bit byte.
    pub fn bits(&self) -> u8 {
        self.0.bits()
    }

    /// Flags for a transaction of the given kind and origin.
    pub fn from_kind(internal: bool, kind: TransactionKind) -> Self {
        let mut flags = Self::default();
        if internal {
            flags.set_bit(Self::INTERNAL);
        }
        match kind {
            TransactionKind::Deploy => flags.set_bit(Self::DEPLOY),
            TransactionKind::Refund => flags.set_bit(Self::REFUND),
            TransactionKind::Response => flags.set_bit(Self::RESPONSE),
            TransactionKind::Execution => {}
        }
        flags
    }

    /// Returns whether the transaction was produced by a contract.
    pub fn is_internal(&self) -> bool {
        self.get_bit(Self::INTERNAL)
    }

    /// Returns whether the transaction carries a deploy payload.
    pub fn is_deploy(&self) -> bool {
        self.get_bit(Self::DEPLOY)
    }

    /// Returns whether the transaction carries an unused-fee refund.
    pub fn is_refund(&self) -> bool {
        self.get_bit(Self::REFUND)
    }

    /// Returns whether the transaction carries bounced value.
    pub fn is_bounce(&self) -> bool {
        self.get_bit(Self::BOUNCE)
    }

    /// Returns whether the transaction is a response leg.
    pub fn is_response(&self) -> bool {
        self.get_bit(Self::RESPONSE)
    }
}

impl fmt::Display for TransactionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_internal() { "Internal" } else { "External" })?;
        if self.is_deploy() {
            f.write_str(", Deploy")?;
        }
        if self.is_refund() {
            f.write_str(", Refund")?;
        }
        if self.is_bounce() {
            f.write_str(", Bounce")?;
        }
        if self.is_response() {
            f.write_str(", Response")?;
        }
        Ok(())
    }
}

/// Serializes as an ordered token array, always leading with exactly one of
/// `"Internal"`/`"External"`.
impl Serialize for TransactionFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        seq.serialize_element(if self.is_internal() { "Internal" } else { "External" })?;
        if self.is_deploy() {
            seq.serialize_element("Deploy")?;
        }
        if self.is_refund() {
            seq.serialize_element("Refund")?;
        }
        if self.is_bounce() {
            seq.serialize_element("Bounce")?;
        }
        if self.is_response() {
            seq.serialize_element("Response")?;
        }
        seq.end()
    }
}

/// Accepts tokens in any order; unknown tokens (including `"External"`) set
/// nothing.
impl<'de> Deserialize<'de> for TransactionFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tokens = Vec::<String>::deserialize(deserializer)?;
        let mut flags = Self::default();
        for token in &tokens {
            match token.as_str() {
                "Internal" => flags.set_bit(Self::INTERNAL),
                "Deploy" => flags.set_bit(Self::DEPLOY),
                "Refund" => flags.set_bit(Self::REFUND),
                "Bounce" => flags.set_bit(Self::BOUNCE),
                "Response" => flags.set_bit(Self::RESPONSE),
                _ => {}
            }
        }
        Ok(flags)
    }
}

impl Encodable for TransactionFlags {
    fn encode(&self, out: &mut dyn BufMut) {
        self.bits().encode(out)
    }

    fn length(&self) -> usize {
        self.bits().length()
    }
}

impl Decodable for TransactionFlags {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let bits = u8::decode(buf)?;
        if bits & Self::RESERVED_MASK != 0 {
            return Err(RlpError::Custom("reserved transaction flag bits set"));
        }
        Ok(Self::from_bits(bits))
    }
}
