//! The transaction shapes, their canonical encoding and their hashes.
//!
//! Three shapes cross three trust boundaries: [`ExternalTransaction`] enters
//! from outside, [`InternalTransactionPayload`] is emitted by contracts, and
//! [`Transaction`] is the full in-system object both promote into. Each has
//! its own stable wire encoding; the conversions live here.

mod external;
mod flags;
mod kind;
mod payload;
mod request;
mod util;

pub use external::ExternalTransaction;
pub use flags::TransactionFlags;
pub use kind::{ForwardKind, ParseForwardKindError, ParseTransactionKindError, TransactionKind};
pub use payload::InternalTransactionPayload;
pub use request::{AsyncContext, AsyncRequestInfo, AsyncResponsePayload};

use crate::{
    address::Address,
    constants::{TRANSACTION_MAX_DATA_SIZE, TRANSACTION_MAX_TOKEN_SIZE},
    error::TransactionError,
    fee::FeePack,
    shard::to_sharded_hash,
    token::TokenBalance,
    value::Value,
    Code, TxHash,
};
use alloy_primitives::{keccak256, Bytes, B256};
use alloy_rlp::{
    length_of_length, Decodable, Encodable, Error as RlpError, Header, RlpDecodable,
    RlpDecodableWrapper, RlpEncodable, RlpEncodableWrapper,
};
use bytes::BufMut;
use core::ops::{Deref, DerefMut};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Per-sender transaction counter.
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
pub struct Seqno(pub u64);

/// Position of a transaction inside a block.
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
pub struct TransactionIndex(pub u64);

impl TransactionIndex {
    /// Byte width of a transaction index.
    pub const SIZE: usize = 8;

    /// Canonical bytes of the index.
    pub fn to_bytes(self) -> Vec<u8> {
        alloy_rlp::encode(self)
    }

    /// Decodes an index from its canonical bytes.
    pub fn from_bytes(mut buf: &[u8]) -> alloy_rlp::Result<Self> {
        let index = Self::decode(&mut buf)?;
        if !buf.is_empty() {
            return Err(RlpError::UnexpectedLength);
        }
        Ok(index)
    }
}

/// Chain identifier; zero means unspecified.
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
pub struct ChainId(pub u64);

impl ChainId {
    /// The default, unspecified chain.
    pub const DEFAULT: Self = Self(0);
}

/// The signing prefix of a transaction.
///
/// Owns the canonical field order of the signing hash. Fields the network
/// rewrites after admission (sender, signature, bookkeeping) live on
/// [`Transaction`] instead, so a signature can never commit to them.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, RlpEncodable, RlpDecodable, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDigest {
    /// Role flags.
    pub flags: TransactionFlags,
    /// Fee terms.
    #[serde(flatten)]
    pub fee_pack: FeePack,
    /// Destination account.
    pub to: Address,
    /// Chain the transaction is valid on.
    pub chain_id: ChainId,
    /// Sender's sequence number at the destination.
    pub seqno: Seqno,
    /// Calldata or deploy payload.
    pub data: Code,
}

/// The full in-system transaction.
///
/// Constructed by promoting an [`ExternalTransaction`] or an
/// [`InternalTransactionPayload`]; after [`Transaction::sign`] it is treated
/// as immutable by consumers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The signing prefix.
    #[serde(flatten)]
    pub digest: TransactionDigest,
    /// Sender. A freshly promoted external transaction holds the destination
    /// here until signature recovery fills the true sender.
    pub from: Address,
    /// Position inside the containing block.
    pub tx_id: TransactionIndex,
    /// Account receiving unused fee credit.
    pub refund_to: Address,
    /// Account receiving bounced value.
    pub bounce_to: Address,
    /// Value transferred.
    pub value: Value,
    /// Pairing id for async request/response legs; zero outside them.
    pub request_id: u64,
    /// Token balances moved with the transaction.
    pub token: Vec<TokenBalance>,
    /// Chain of requests still awaiting responses through this transaction.
    pub request_chain: Vec<AsyncRequestInfo>,
    /// 65-byte recoverable signature. Kept last on the wire so the signed
    /// prefix stays a prefix.
    pub signature: Bytes,
}

impl Deref for Transaction {
    type Target = TransactionDigest;

    fn deref(&self) -> &Self::Target {
        &self.digest
    }
}

impl DerefMut for Transaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.digest
    }
}

impl Transaction {
    /// Cluster-wide hash, tagged with the destination shard.
    ///
    /// External transactions hash identically to their
    /// [`ExternalTransaction`] form.
    pub fn hash(&self) -> TxHash {
        if self.is_external() {
            return self.to_external().hash();
        }
        to_sharded_hash(keccak256(alloy_rlp::encode(self)), self.to.shard_id())
    }

    /// The hash a signature over this transaction commits to.
    pub fn signing_hash(&self) -> B256 {
        keccak256(alloy_rlp::encode(&self.digest))
    }

    /// Signs the transaction with a 32-byte secret key.
    ///
    /// On error the transaction is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the transaction is internal; internal transactions carry no
    /// signature.
    pub fn sign(&mut self, secret: B256) -> Result<(), TransactionError> {
        let mut ext = self.to_external();
        ext.sign(secret)?;
        self.signature = ext.auth_data;
        Ok(())
    }

    /// The equivalent external shape, used for hashing and signing.
    ///
    /// Responses never leave the cluster, so the derived kind is one of
    /// Deploy, Refund or Execution.
    fn to_external(&self) -> ExternalTransaction {
        assert!(
            !self.is_internal(),
            "cannot convert an internal transaction to an external transaction"
        );
        let kind = if self.is_deploy() {
            TransactionKind::Deploy
        } else if self.is_refund() {
            TransactionKind::Refund
        } else {
            TransactionKind::Execution
        };
        ExternalTransaction {
            kind,
            fee_pack: self.fee_pack,
            to: self.to,
            chain_id: self.chain_id,
            seqno: self.seqno,
            data: self.data.clone(),
            auth_data: self.signature.clone(),
        }
    }

    /// Checks the flag invariants.
    pub fn verify_flags(&self) -> Result<(), TransactionError> {
        if self.is_internal() {
            let roles =
                [self.is_deploy(), self.is_refund(), self.is_bounce(), self.is_request_or_response()];
            if roles.iter().filter(|set| **set).count() > 1 {
                return Err(TransactionError::InvalidInternalFlags);
            }
        } else if self.is_refund() || self.is_bounce() || self.is_request_or_response() {
            return Err(TransactionError::InvalidExternalFlags);
        }
        if self.to.shard_id().is_main() && !self.from.shard_id().is_main() {
            return Err(TransactionError::MainShardAccessDenied);
        }
        if self.token.len() > TRANSACTION_MAX_TOKEN_SIZE {
            return Err(TransactionError::TooManyTokens(self.token.len()));
        }
        if self.data.len() > TRANSACTION_MAX_DATA_SIZE {
            return Err(TransactionError::DataTooLarge(self.data.len()));
        }
        Ok(())
    }

    /// Returns whether the transaction was produced by a contract.
    pub fn is_internal(&self) -> bool {
        self.flags.is_internal()
    }

    /// Returns whether the transaction was submitted from outside.
    pub fn is_external(&self) -> bool {
        !self.is_internal()
    }

    /// Returns whether the transaction executes calldata.
    pub fn is_execution(&self) -> bool {
        !self.flags.is_deploy() && !self.flags.is_refund()
    }

    /// Returns whether the transaction carries a deploy payload.
    pub fn is_deploy(&self) -> bool {
        self.flags.is_deploy()
    }

    /// Returns whether the transaction carries an unused-fee refund.
    pub fn is_refund(&self) -> bool {
        self.flags.is_refund()
    }

    /// Returns whether the transaction carries bounced value.
    pub fn is_bounce(&self) -> bool {
        self.flags.is_bounce()
    }

    /// Returns whether the transaction is the response leg of an async call.
    pub fn is_response(&self) -> bool {
        self.flags.is_response()
    }

    /// Returns whether the transaction is the request leg of an async call.
    pub fn is_request(&self) -> bool {
        self.is_request_or_response() && !self.is_response()
    }

    /// Returns whether the transaction participates in an async call.
    pub fn is_request_or_response(&self) -> bool {
        self.request_id != 0
    }

    /// Returns whether the transaction targets the main shard.
    pub fn is_system(&self) -> bool {
        self.to.shard_id().is_main()
    }

    /// Resolves the effective gas price against a block base fee.
    pub fn gas_price(&self, base_fee_per_gas: Value) -> Result<Value, TransactionError> {
        self.fee_pack.gas_price(base_fee_per_gas)
    }

    /// Which trailing optional fields make it onto the wire: a field is
    /// emitted when it or any later optional field is non-empty.
    fn optional_fields(&self) -> (bool, bool, bool) {
        let signature = !self.signature.is_empty();
        let request_chain = signature || !self.request_chain.is_empty();
        let token = request_chain || !self.token.is_empty();
        (token, request_chain, signature)
    }

    fn rlp_payload_length(&self) -> usize {
        let mut len = self.digest.length();
        len += self.from.length();
        len += self.tx_id.length();
        len += self.refund_to.length();
        len += self.bounce_to.length();
        len += self.value.length();
        len += self.request_id.length();
        let (token, request_chain, signature) = self.optional_fields();
        if token {
            len += self.token.length();
        }
        if request_chain {
            len += self.request_chain.length();
        }
        if signature {
            len += self.signature.length();
        }
        len
    }
}

impl Encodable for Transaction {
    fn encode(&self, out: &mut dyn BufMut) {
        let header = Header { list: true, payload_length: self.rlp_payload_length() };
        header.encode(out);
        self.digest.encode(out);
        self.from.encode(out);
        self.tx_id.encode(out);
        self.refund_to.encode(out);
        self.bounce_to.encode(out);
        self.value.encode(out);
        self.request_id.encode(out);
        let (token, request_chain, signature) = self.optional_fields();
        if token {
            self.token.encode(out);
        }
        if request_chain {
            self.request_chain.encode(out);
        }
        if signature {
            self.signature.encode(out);
        }
    }

    fn length(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        payload_length + length_of_length(payload_length)
    }
}

impl Decodable for Transaction {
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
            digest: Decodable::decode(buf)?,
            from: Decodable::decode(buf)?,
            tx_id: Decodable::decode(buf)?,
            refund_to: Decodable::decode(buf)?,
            bounce_to: Decodable::decode(buf)?,
            value: Decodable::decode(buf)?,
            request_id: Decodable::decode(buf)?,
            token: Vec::new(),
            request_chain: Vec::new(),
            signature: Bytes::new(),
        };
        if started_len - buf.len() < header.payload_length {
            this.token = Decodable::decode(buf)?;
        }
        if started_len - buf.len() < header.payload_length {
            this.request_chain = Decodable::decode(buf)?;
        }
        if started_len - buf.len() < header.payload_length {
            this.signature = Decodable::decode(buf)?;
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

/// A transaction paired with its memoized hash.
///
/// Wrapping consumes the transaction; it is logically immutable from that
/// point, so mempool keys and block indexes reuse the hash without paying
/// Keccak twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxnWithHash {
    transaction: Transaction,
    hash: TxHash,
}

impl TxnWithHash {
    /// Wraps `transaction`, computing its hash once.
    pub fn new(transaction: Transaction) -> Self {
        let hash = transaction.hash();
        Self { transaction, hash }
    }

    /// The memoized hash.
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// Unwraps the transaction.
    pub fn into_inner(self) -> Transaction {
        self.transaction
    }
}

impl AsRef<Transaction> for TxnWithHash {
    fn as_ref(&self) -> &Transaction {
        &self.transaction
    }
}

impl Deref for TxnWithHash {
    type Target = Transaction;

    fn deref(&self) -> &Self::Target {
        &self.transaction
    }
}

/// A promoted transaction queued for delivery, carrying the forwarding mode
/// that applies only at the outbound boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundTransaction {
    /// The transaction to deliver.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Hash of the transaction.
    pub txn_hash: TxHash,
    /// How remaining fee credit is forwarded.
    pub forward_kind: ForwardKind,
}

impl OutboundTransaction {
    /// Wraps a promoted transaction, stamping its hash.
    pub fn new(transaction: Transaction, forward_kind: ForwardKind) -> Self {
        let txn_hash = transaction.hash();
        Self { transaction, txn_hash, forward_kind }
    }
}
