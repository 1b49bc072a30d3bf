//! Action authentication for hlsig.
//!
//! Turns a structured [`Action`] into the signed body the exchange accepts:
//! 1. exchange-native actions: msgpack + nonce + vault/expiry tags hashed
//!    into an `action_hash`, then an EIP-712 phantom `Agent` over that hash
//! 2. user-signed actions: EIP-712 typed data built from the action's own
//!    fields under `HyperliquidTransaction:<Kind>`
//!
//! 3. multi-sig actions: signer signatures collected by
//!    [`collect_multi_sig`], then an EIP-712 `SendMultiSig` envelope over
//!    the hash of the whole `multiSig` action
//!
//! Every path ends in a recoverable secp256k1 signature wrapped by
//! [`sign_action`] into an [`ExchangeRequest`].

pub mod action;
pub mod error;
pub mod hash;
pub mod multisig;
pub mod nonce;
pub mod request;
pub mod signer;
pub mod typed_data;

pub use action::Action;
pub use error::{KeyError, NonceError, SignerError, SignerResult};
pub use hash::{action_hash, payload_hash, SigningInput};
pub use multisig::{collect_multi_sig, multi_sig_signature};
pub use nonce::{Clock, FixedNonce, NonceManager, NonceSource, SystemClock};
pub use request::{sign_action, typed_payload, ExchangeRequest, SigningContext};
pub use signer::{recover_signer, KeyManager, KeySource, Signature};
pub use typed_data::{PhantomAgent, TypedPayload, UserSignedPayload, DEFAULT_SIGNATURE_CHAIN_ID};

// Re-exported so callers do not need a direct alloy dependency for addresses.
pub use alloy::primitives::{Address, B256};
