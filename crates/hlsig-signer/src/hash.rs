//! Action hash for exchange-native actions.
//!
//! ```text
//! keccak256(
//!     msgpack(action)
//!     || nonce as u64 big-endian
//!     || 0x00                      (no vault)
//!      | 0x01 || vault (20 bytes)  (vault)
//!     || 0x00 || expiresAfter BE   (only when expiresAfter is set)
//! )
//! ```
//!
//! The vault tag is always present; the expiry tag only when set.

use crate::action::Action;
use crate::error::{SignerError, SignerResult};
use alloy::primitives::{keccak256, Address, B256};
use serde::Serialize;

/// Validated input of [`SigningInput::action_hash`].
#[derive(Debug, Clone)]
pub struct SigningInput<'a> {
    pub action: &'a Action,
    pub nonce: u64,
    /// None = trading for the signer itself, Some = vault / sub-account
    pub vault_address: Option<Address>,
    pub expires_after: Option<u64>,
}

impl<'a> SigningInput<'a> {
    /// Validate nonce and expiry before anything gets serialized.
    ///
    /// # Errors
    /// `InvalidNonce` / `InvalidExpiry` for negative values.
    pub fn new(
        action: &'a Action,
        nonce: i64,
        vault_address: Option<Address>,
        expires_after: Option<i64>,
    ) -> SignerResult<Self> {
        let nonce = u64::try_from(nonce).map_err(|_| SignerError::InvalidNonce(nonce))?;
        let expires_after = expires_after
            .map(|e| u64::try_from(e).map_err(|_| SignerError::InvalidExpiry(e)))
            .transpose()?;

        Ok(Self {
            action,
            nonce,
            vault_address,
            expires_after,
        })
    }

    /// Canonical msgpack encoding of the action alone.
    ///
    /// Map encoding with keys in declaration order (`to_vec_named`).
    pub fn action_bytes(&self) -> SignerResult<Vec<u8>> {
        msgpack(self.action)
    }

    /// Full pre-image of the action hash.
    pub fn encode(&self) -> SignerResult<Vec<u8>> {
        Ok(frame(
            self.action_bytes()?,
            self.nonce,
            self.vault_address,
            self.expires_after,
        ))
    }

    pub fn action_hash(&self) -> SignerResult<B256> {
        Ok(keccak256(self.encode()?))
    }
}

/// Shorthand for `SigningInput::new(..)?.action_hash()`.
pub fn action_hash(
    action: &Action,
    nonce: i64,
    vault_address: Option<Address>,
    expires_after: Option<i64>,
) -> SignerResult<B256> {
    SigningInput::new(action, nonce, vault_address, expires_after)?.action_hash()
}

/// Hash of any msgpack-encodable payload under the action-hash framing.
///
/// Used for payloads that are not a tagged [`Action`]: the multi-sig
/// signer tuple and the untagged multi-sig action.
pub fn payload_hash<T: Serialize + ?Sized>(
    payload: &T,
    nonce: u64,
    vault_address: Option<Address>,
    expires_after: Option<u64>,
) -> SignerResult<B256> {
    let body = msgpack(payload)?;
    Ok(keccak256(frame(body, nonce, vault_address, expires_after)))
}

fn msgpack<T: Serialize + ?Sized>(payload: &T) -> SignerResult<Vec<u8>> {
    rmp_serde::to_vec_named(payload).map_err(|e| SignerError::Serialization {
        step: "msgpack",
        reason: e.to_string(),
    })
}

fn frame(
    mut data: Vec<u8>,
    nonce: u64,
    vault_address: Option<Address>,
    expires_after: Option<u64>,
) -> Vec<u8> {
    data.extend_from_slice(&nonce.to_be_bytes());

    match vault_address {
        None => data.push(0x00),
        Some(addr) => {
            data.push(0x01);
            data.extend_from_slice(addr.as_slice());
        }
    }

    if let Some(expires) = expires_after {
        data.push(0x00);
        data.extend_from_slice(&expires.to_be_bytes());
    }

    data
}
