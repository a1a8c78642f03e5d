//! Currency values and gas units.

use crate::constants::DEFAULT_GAS_PRICE;
use alloy_primitives::U256;
use alloy_rlp::{RlpDecodableWrapper, RlpEncodableWrapper};
use core::ops::Add;
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// A non-negative currency amount or gas price.
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
)]
#[display("{_0}")]
pub struct Value(pub U256);

impl Value {
    /// The zero value.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Creates a value.
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Returns whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Value {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

/// A quantity of gas.
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
pub struct Gas(pub u64);

impl Gas {
    /// Converts gas units to currency at the system-wide gas price unit.
    pub fn to_value(self) -> Value {
        Value(U256::from(self.0) * U256::from(DEFAULT_GAS_PRICE))
    }
}
