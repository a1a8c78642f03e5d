//! The externally-submitted transaction shape.

use super::{flags::TransactionFlags, kind::TransactionKind, util, ChainId, Seqno, Transaction,
    TransactionDigest};
use crate::{
    address::Address, error::TransactionError, fee::FeePack, shard::to_sharded_hash, Code, TxHash,
};
use alloy_primitives::{keccak256, Bytes, B256};
use alloy_rlp::{length_of_length, Decodable, Encodable, Error as RlpError, Header};
use bytes::BufMut;
use serde::{Deserialize, Serialize};

/// A transaction submitted from outside the cluster.
///
/// Self-contained: `auth_data` signs the [`TransactionDigest`] built from the
/// remaining fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalTransaction {
    /// What the transaction does.
    pub kind: TransactionKind,
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
    /// 65-byte recoverable signature over the signing hash.
    pub auth_data: Bytes,
}

impl ExternalTransaction {
    /// Cluster-wide hash, tagged with the destination shard.
    pub fn hash(&self) -> TxHash {
        to_sharded_hash(keccak256(alloy_rlp::encode(self)), self.to.shard_id())
    }

    /// The hash `auth_data` commits to.
    ///
    /// Covers the digest prefix only, so the network can fill the sender and
    /// bookkeeping fields later without breaking the signature.
    pub fn signing_hash(&self) -> B256 {
        let digest = TransactionDigest {
            flags: TransactionFlags::from_kind(false, self.kind),
            fee_pack: self.fee_pack,
            to: self.to,
            chain_id: self.chain_id,
            seqno: self.seqno,
            data: self.data.clone(),
        };
        keccak256(alloy_rlp::encode(&digest))
    }

    /// Signs the transaction, storing the 65-byte signature in `auth_data`.
    ///
    /// On error the transaction is left unchanged.
    pub fn sign(&mut self, secret: B256) -> Result<(), TransactionError> {
        let sig = util::sign_message(secret, self.signing_hash())?;
        self.auth_data = sig.to_vec().into();
        Ok(())
    }

    /// Recovers the signer's address from `auth_data`.
    pub fn recover_signer(&self) -> Result<Address, TransactionError> {
        let sig: &[u8; util::SIGNATURE_SIZE] = self
            .auth_data
            .as_ref()
            .try_into()
            .map_err(|_| TransactionError::InvalidSignatureLength(self.auth_data.len()))?;
        let hash = self.signing_hash();
        Ok(util::recover_signer(sig, &hash.0)?)
    }

    /// Verifies that `auth_data` was produced by `sender`.
    pub fn verify_signature(&self, sender: Address) -> Result<bool, TransactionError> {
        Ok(self.recover_signer()? == sender)
    }

    /// Promotes the transaction into the in-system shape.
    ///
    /// `from` holds the destination until signature recovery substitutes the
    /// true sender.
    pub fn into_transaction(self) -> Transaction {
        Transaction {
            digest: TransactionDigest {
                flags: TransactionFlags::from_kind(false, self.kind),
                to: self.to,
                chain_id: self.chain_id,
                seqno: self.seqno,
                data: self.data,
                fee_pack: self.fee_pack,
            },
            from: self.to,
            signature: self.auth_data,
            ..Default::default()
        }
    }

    fn rlp_payload_length(&self) -> usize {
        let mut len = self.kind.length();
        len += self.fee_pack.length();
        len += self.to.length();
        len += self.chain_id.length();
        len += self.seqno.length();
        len += self.data.length();
        if !self.auth_data.is_empty() {
            len += self.auth_data.length();
        }
        len
    }
}

impl Encodable for ExternalTransaction {
    fn encode(&self, out: &mut dyn BufMut) {
        let header = Header { list: true, payload_length: self.rlp_payload_length() };
        header.encode(out);
        self.kind.encode(out);
        self.fee_pack.encode(out);
        self.to.encode(out);
        self.chain_id.encode(out);
        self.seqno.encode(out);
        self.data.encode(out);
        // A trailing empty signature is elided.
        if !self.auth_data.is_empty() {
            self.auth_data.encode(out);
        }
    }

    fn length(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        payload_length + length_of_length(payload_length)
    }
}

impl Decodable for ExternalTransaction {
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
            fee_pack: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            chain_id: Decodable::decode(buf)?,
            seqno: Decodable::decode(buf)?,
            data: Decodable::decode(buf)?,
            auth_data: Bytes::new(),
        };
        if started_len - buf.len() < header.payload_length {
            this.auth_data = Decodable::decode(buf)?;
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
    use super::ExternalTransaction;
    use crate::{
        address::Address,
        transaction::{kind::TransactionKind, util, ChainId, Seqno},
    };
    use alloy_primitives::{b256, hex};
    use alloy_rlp::{Decodable, Encodable};
    use secp256k1::{PublicKey, SecretKey, SECP256K1};

    const SECRET: alloy_primitives::B256 =
        b256!("4c0883a69102937d6231471b5dbb6204fe512961708279f2e3e8a5d4b8e3e974");

    fn sample_transaction() -> ExternalTransaction {
        ExternalTransaction {
            kind: TransactionKind::Execution,
            to: Address::new(hex!("0001bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2222")),
            chain_id: ChainId(1),
            seqno: Seqno(0),
            ..Default::default()
        }
    }

    #[test]
    fn build_and_sign_execution() {
        let mut tx = sample_transaction();
        tx.sign(SECRET).unwrap();
        assert_eq!(tx.auth_data.len(), 65);

        let promoted = tx.clone().into_transaction();
        assert_eq!(promoted.flags.bits(), 0x00);
        assert_eq!(promoted.signature, tx.auth_data);
        assert_eq!(promoted.from, tx.to);
    }

    #[test]
    fn recover_matches_signer() {
        let mut tx = sample_transaction();
        tx.sign(SECRET).unwrap();

        let key = SecretKey::from_slice(SECRET.as_ref()).unwrap();
        let expected = util::address_from_pubkey(&PublicKey::from_secret_key(SECP256K1, &key));
        assert_eq!(tx.recover_signer().unwrap(), expected);
        assert!(tx.verify_signature(expected).unwrap());
        assert!(!tx.verify_signature(Address::ZERO).unwrap());
    }

    #[test]
    fn recover_rejects_malformed_signature() {
        let mut tx = sample_transaction();
        tx.auth_data = hex!("deadbeef").into();
        assert!(tx.recover_signer().is_err());
    }

    #[test]
    fn signing_hash_skips_auth_data() {
        let mut tx = sample_transaction();
        let before = tx.signing_hash();
        tx.sign(SECRET).unwrap();
        assert_eq!(tx.signing_hash(), before);
    }

    #[test]
    fn rlp_roundtrip() {
        let mut tx = sample_transaction();
        tx.data = hex!("00112233").into();
        tx.sign(SECRET).unwrap();

        let encoded = alloy_rlp::encode(&tx);
        assert_eq!(encoded.len(), tx.length());
        assert_eq!(ExternalTransaction::decode(&mut &encoded[..]).unwrap(), tx);
    }

    #[test]
    fn rlp_elides_empty_auth_data() {
        let unsigned = sample_transaction();
        let encoded = alloy_rlp::encode(&unsigned);

        let mut signed = unsigned.clone();
        signed.sign(SECRET).unwrap();
        let signed_encoded = alloy_rlp::encode(&signed);

        assert!(encoded.len() < signed_encoded.len());
        assert_eq!(ExternalTransaction::decode(&mut &encoded[..]).unwrap(), unsigned);
    }

    #[test]
    fn hash_is_shard_tagged() {
        let tx = sample_transaction();
        assert_eq!(&tx.hash()[..2], &[0x00, 0x01]);
    }
}
