//! Fee terms and gas-price resolution.

use crate::{
    constants::DEFAULT_MAX_FEE_PER_GAS,
    error::TransactionError,
    value::{Gas, Value},
};
use alloy_rlp::{RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};

/// The fee terms a transaction is admitted under.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, RlpEncodable, RlpDecodable, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct FeePack {
    /// Credit reserved up front to pay for execution.
    pub fee_credit: Value,
    /// Tip per gas unit paid on top of the base fee.
    pub max_priority_fee_per_gas: Value,
    /// Upper bound on the effective gas price; zero disables the cap.
    pub max_fee_per_gas: Value,
}

impl FeePack {
    /// An all-zero fee pack.
    pub const fn new() -> Self {
        Self {
            fee_credit: Value::ZERO,
            max_priority_fee_per_gas: Value::ZERO,
            max_fee_per_gas: Value::ZERO,
        }
    }

    /// Fee terms covering `gas` units at the default gas price, capped at the
    /// default fee cap.
    pub fn from_gas(gas: Gas) -> Self {
        Self {
            fee_credit: gas.to_value(),
            max_priority_fee_per_gas: Value::ZERO,
            max_fee_per_gas: Value::from(DEFAULT_MAX_FEE_PER_GAS),
        }
    }

    /// Fee terms with an explicit fee credit and the default fee cap.
    pub fn from_fee_credit(fee_credit: Value) -> Self {
        Self {
            fee_credit,
            max_priority_fee_per_gas: Value::ZERO,
            max_fee_per_gas: Value::from(DEFAULT_MAX_FEE_PER_GAS),
        }
    }

    /// Resolves the effective gas price against a block base fee.
    pub fn gas_price(&self, base_fee_per_gas: Value) -> Result<Value, TransactionError> {
        let gas_price = base_fee_per_gas + self.max_priority_fee_per_gas;
        // Zero max_fee_per_gas means no limit.
        if !self.max_fee_per_gas.is_zero() && gas_price > self.max_fee_per_gas {
            if base_fee_per_gas > self.max_fee_per_gas {
                return Err(TransactionError::MaxFeeBelowBase {
                    max_fee_per_gas: self.max_fee_per_gas,
                    base_fee_per_gas,
                });
            }
            return Ok(self.max_fee_per_gas);
        }
        Ok(gas_price)
    }
}
