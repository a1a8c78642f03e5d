//! The transaction shape a contract emits when sending.

use super::{
    flags::TransactionFlags,
    kind::{ForwardKind, TransactionKind},
    ChainId, Seqno, Transaction, TransactionDigest,
};
use crate::{address::Address, fee::FeePack, token::TokenBalance, value::Value, Code};
use alloy_rlp::{length_of_length, Decodable, Encodable, Error as RlpError, Header};
use bytes::BufMut;
use serde::{Deserialize, Serialize};

/// A transaction as produced by contract execution, before the source shard
/// stamps the sender and seqno.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTransactionPayload {
    /// What the transaction does.
    pub kind: TransactionKind,
    /// Whether value returns to the caller when execution fails.
    pub bounce: bool,
    /// Fee credit forwarded for execution on the destination shard.
    pub fee_credit: Value,
    /// How remaining fee credit travels with the transaction. Never stored on
    /// the promoted [`Transaction`]; it rides in
    /// [`OutboundTransaction`](super::OutboundTransaction) only.
    pub forward_kind: ForwardKind,
    /// Destination account.
    pub to: Address,
    /// Account receiving unused fee credit.
    pub refund_to: Address,
    /// Account receiving bounced value.
    pub bounce_to: Address,
    /// Value transferred.
    pub value: Value,
    /// Calldata or deploy payload.
    pub data: Code,
    /// Pairing id for async request/response legs; zero outside them.
    pub request_id: u64,
    /// Token balances moved with the transaction.
    pub token: Vec<TokenBalance>,
}

impl InternalTransactionPayload {
    /// Promotes the payload into a deliverable [`Transaction`].
    ///
    /// `from` is the emitting contract and `seqno` the source shard's counter
    /// for it.
    pub fn into_transaction(self, from: Address, seqno: Seqno) -> Transaction {
        let mut flags = TransactionFlags::from_kind(true, self.kind);
        if self.bounce {
            flags.set_bit(TransactionFlags::BOUNCE);
        }
        Transaction {
            digest: TransactionDigest {
                flags,
                to: self.to,
                data: self.data,
                fee_pack: FeePack { fee_credit: self.fee_credit, ..FeePack::new() },
                seqno,
                chain_id: ChainId::DEFAULT,
            },
            refund_to: self.refund_to,
            bounce_to: self.bounce_to,
            from,
            value: self.value,
            token: self.token,
            request_id: self.request_id,
            ..Default::default()
        }
    }

    fn rlp_payload_length(&self) -> usize {
        let mut len = self.kind.length();
        len += self.bounce.length();
        len += self.fee_credit.length();
        len += self.forward_kind.length();
        len += self.to.length();
        len += self.refund_to.length();
        len += self.bounce_to.length();
        len += self.value.length();
        len += self.data.length();
        len += self.request_id.length();
        if !self.token.is_empty() {
            len += self.token.length();
        }
        len
    }
}

impl Encodable for InternalTransactionPayload {
    fn encode(&self, out: &mut dyn BufMut) {
        let header = Header { list: true, payload_length: self.rlp_payload_length() };
        header.encode(out);
        self.kind.encode(out);
        self.bounce.encode(out);
        self.fee_credit.encode(out);
        self.forward_kind.encode(out);
        self.to.encode(out);
        self.refund_to.encode(out);
        self.bounce_to.encode(out);
        self.value.encode(out);
        self.data.encode(out);
        self.request_id.encode(out);
        // Trailing empty token lists are elided.
        if !self.token.is_empty() {
            self.token.encode(out);
        }
    }

    fn length(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        payload_length + length_of_length(payload_length)
    }
}

impl Decodable for InternalTransactionPayload {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(RlpError::UnexpectedString);
        }
        if buf.len() < header.payload_length {
            return Err(RlpError::InputTooShort);
        }
        let started_len = buf.len();

        let mut this = Self {
            kind: Decodable::decode(buf)?,
            bounce: Decodable::decode(buf)?,
            fee_credit: Decodable::decode(buf)?,
            forward_kind: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            refund_to: Decodable::decode(buf)?,
            bounce_to: Decodable::decode(buf)?,
            value: Decodable::decode(buf)?,
            data: Decodable::decode(buf)?,
            request_id: Decodable::decode(buf)?,
            token: Vec::new(),
        };
        if started_len - buf.len() < header.payload_length {
            this.token = Decodable::decode(buf)?;
        }

        let consumed = started_len - buf.len();
        if consumed != header.payload_length {
            return Err(RlpError::ListLengthMismatch {
                expected: header.payload_length,
                got: consumed,
            });
        }
        Ok(this)
    }
}

#[cfg(test)]
mod tests {
    use super::InternalTransactionPayload;
    use crate::{
        address::Address,
        token::{TokenBalance, TokenId},
        transaction::{
            flags::TransactionFlags,
            kind::{ForwardKind, TransactionKind},
            Seqno,
        },
        value::Value,
    };
    use alloy_primitives::hex;
    use alloy_rlp::{Decodable, Encodable};

    fn sample_payload() -> InternalTransactionPayload {
        InternalTransactionPayload {
            kind: TransactionKind::Execution,
            bounce: true,
            fee_credit: Value::from(500_000u64),
            forward_kind: ForwardKind::Percentage,
            to: Address::new(hex!("0002cccccccccccccccccccccccccccccccc3333")),
            refund_to: Address::new(hex!("0001aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1111")),
            bounce_to: Address::new(hex!("0001bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2222")),
            value: Value::from(9u64),
            data: hex!("c0fe").into(),
            request_id: 0,
            token: vec![TokenBalance {
                token: TokenId(Address::new(hex!("0002dddddddddddddddddddddddddddddddd4444"))),
                balance: Value::from(3u64),
            }],
        }
    }

    #[test]
    fn rlp_roundtrip() {
        let payload = sample_payload();
        let mut encoded = Vec::new();
        payload.encode(&mut encoded);
        assert_eq!(encoded.len(), payload.length());
        assert_eq!(InternalTransactionPayload::decode(&mut &encoded[..]).unwrap(), payload);
    }

    #[test]
    fn rlp_elides_empty_token_list() {
        let payload = InternalTransactionPayload { token: Vec::new(), ..sample_payload() };
        let mut encoded = Vec::new();
        payload.encode(&mut encoded);
        let decoded = InternalTransactionPayload::decode(&mut &encoded[..]).unwrap();
        assert_eq!(decoded, payload);
        assert!(decoded.token.is_empty());
    }

    #[test]
    fn promotion_stamps_internal_flags() {
        let payload = InternalTransactionPayload {
            kind: TransactionKind::Deploy,
            bounce: false,
            fee_credit: Value::from(1000u64),
            to: Address::new(hex!("0002cccccccccccccccccccccccccccccccc3333")),
            data: hex!("dead").into(),
            ..Default::default()
        };
        let txn = payload.into_transaction(
            Address::new(hex!("0002aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1111")),
            Seqno(7),
        );

        assert!(txn.is_internal());
        assert!(txn.is_deploy());
        assert!(!txn.is_bounce());
        assert_eq!(txn.flags.bits(), 0b0000_0011);
        assert_eq!(txn.fee_pack.fee_credit, Value::from(1000u64));
        assert_eq!(txn.fee_pack.max_priority_fee_per_gas, Value::ZERO);
        assert_eq!(txn.fee_pack.max_fee_per_gas, Value::ZERO);
        assert_eq!(txn.seqno, Seqno(7));
        assert!(txn.verify_flags().is_ok());
    }

    #[test]
    fn promotion_preserves_payload_fields() {
        let payload = sample_payload();
        let from = Address::new(hex!("0002eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee5555"));
        let txn = payload.clone().into_transaction(from, Seqno(11));

        assert_eq!(txn.to, payload.to);
        assert_eq!(txn.data, payload.data);
        assert_eq!(txn.value, payload.value);
        assert_eq!(txn.token, payload.token);
        assert_eq!(txn.request_id, payload.request_id);
        assert_eq!(txn.refund_to, payload.refund_to);
        assert_eq!(txn.bounce_to, payload.bounce_to);
        assert_eq!(txn.from, from);
        assert!(txn.is_bounce());
        assert!(txn.flags.get_bit(TransactionFlags::BOUNCE));
        assert!(txn.signature.is_empty());
    }
}
