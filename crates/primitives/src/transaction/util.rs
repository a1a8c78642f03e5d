//! secp256k1 helpers for transaction signing.

use crate::address::Address;
use alloy_primitives::{keccak256, B256};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, PublicKey, SecretKey, SECP256K1,
};

/// Length of a recoverable `r ‖ s ‖ v` signature, in bytes.
pub(crate) const SIGNATURE_SIZE: usize = 65;

/// Signs `message` with the given 32-byte secret key.
///
/// Returns the 65-byte recoverable signature with the recovery id in the last
/// byte.
pub(crate) fn sign_message(
    secret: B256,
    message: B256,
) -> Result<[u8; SIGNATURE_SIZE], secp256k1::Error> {
    let secret = SecretKey::from_slice(secret.as_ref())?;
    let (rec_id, compact) = SECP256K1
        .sign_ecdsa_recoverable(&Message::from_digest(message.0), &secret)
        .serialize_compact();

    let mut sig = [0u8; SIGNATURE_SIZE];
    sig[..SIGNATURE_SIZE - 1].copy_from_slice(&compact);
    sig[SIGNATURE_SIZE - 1] = rec_id.to_i32() as u8;
    Ok(sig)
}

/// Recovers the signer's address from a recoverable signature over `msg`.
pub(crate) fn recover_signer(
    sig: &[u8; SIGNATURE_SIZE],
    msg: &[u8; 32],
) -> Result<Address, secp256k1::Error> {
    let (compact, v) = sig.split_at(SIGNATURE_SIZE - 1);
    let rec_id = RecoveryId::from_i32(v[0] as i32)?;
    let signature = RecoverableSignature::from_compact(compact, rec_id)?;

    let public = SECP256K1.recover_ecdsa(&Message::from_digest(*msg), &signature)?;
    Ok(address_from_pubkey(&public))
}

/// Derives the account address of a public key: keccak256 over the
/// uncompressed curve point, keeping the low 20 bytes.
pub(crate) fn address_from_pubkey(public: &PublicKey) -> Address {
    // The leading byte of the uncompressed serialization is the constant
    // point tag; it is not part of the hashed preimage.
    let point = public.serialize_uncompressed();
    let hash = keccak256(&point[1..]);
    Address::from_slice(&hash[12..])
}
