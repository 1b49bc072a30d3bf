//! Key loading, ECDSA signing and address recovery.
//!
//! Signatures are deterministic (RFC 6979), low-s, with `v = 27 + y_parity`.

use std::fmt;
use std::path::PathBuf;

use alloy::primitives::{Address, PrimitiveSignature, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{KeyError, SignerError, SignerResult};

// =============================================================================
// KeySource and KeyManager
// =============================================================================

/// Source of the private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeySource {
    /// Load from environment variable (development).
    EnvVar { var_name: String },
    /// Load from file (production, recommend 0600 permissions).
    File { path: PathBuf },
}

impl Default for KeySource {
    fn default() -> Self {
        Self::EnvVar {
            var_name: "HLSIG_PRIVATE_KEY".to_string(),
        }
    }
}

/// Holds the signing key.
///
/// Security notes:
/// - Secret bytes only live in `Zeroizing` buffers while being parsed.
/// - `Debug` prints the address only; the type is not serializable.
/// - Never log private key material.
pub struct KeyManager {
    signer: PrivateKeySigner,
}

impl KeyManager {
    /// Load the key from `source`, optionally checking the derived address.
    ///
    /// # Errors
    /// Returns `KeyError` if:
    /// - Environment variable not found
    /// - File read fails
    /// - Hex decoding fails
    /// - Private key is invalid
    /// - Address mismatch
    pub fn load(source: &KeySource, expected_address: Option<Address>) -> Result<Self, KeyError> {
        let secret: Zeroizing<String> = match source {
            KeySource::EnvVar { var_name } => Zeroizing::new(
                std::env::var(var_name).map_err(|_| KeyError::EnvVarNotFound(var_name.clone()))?,
            ),
            KeySource::File { path } => Zeroizing::new(std::fs::read_to_string(path)?),
        };
        let manager = Self::from_hex(&secret)?;

        if let Some(expected) = expected_address {
            if manager.address() != expected {
                return Err(KeyError::AddressMismatch {
                    expected,
                    actual: manager.address(),
                });
            }
        }

        Ok(manager)
    }

    /// Parse a hex key (optional `0x`, surrounding whitespace ignored).
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let trimmed = hex_str.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = Zeroizing::new(hex::decode(digits)?);
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(secret_bytes: &[u8]) -> Result<Self, KeyError> {
        let signer = PrivateKeySigner::from_slice(secret_bytes)
            .map_err(|e| KeyError::InvalidKey(e.to_string()))?;
        Ok(Self { signer })
    }

    /// Fresh random key, e.g. for a new agent wallet.
    pub fn generate() -> Self {
        Self {
            signer: PrivateKeySigner::random(),
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Hex of the secret key, wrapped so it is wiped on drop.
    ///
    /// Only for handing a freshly generated agent key to its owner.
    pub fn secret_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("0x{}", hex::encode(self.signer.to_bytes())))
    }

    /// Sign a 32-byte digest.
    pub fn sign_hash(&self, digest: &B256) -> SignerResult<Signature> {
        let signature = self.signer.sign_hash_sync(digest)?;
        Ok(Signature::from_primitive(&signature))
    }
}

impl fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManager")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Signature
// =============================================================================

/// Wire signature `{"r":"0x..","s":"0x..","v":27}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// r component, `0x` + 64 hex digits
    pub r: String,
    /// s component, `0x` + 64 hex digits
    pub s: String,
    /// 27 or 28
    pub v: u8,
}

impl Signature {
    pub fn from_primitive(signature: &PrimitiveSignature) -> Self {
        Self {
            r: format!("0x{}", hex::encode(signature.r().to_be_bytes::<32>())),
            s: format!("0x{}", hex::encode(signature.s().to_be_bytes::<32>())),
            v: 27 + u8::from(signature.v()),
        }
    }

    /// Only the wire form of `v` (27 or 28) is accepted; raw parity bits are not.
    pub fn to_primitive(&self) -> SignerResult<PrimitiveSignature> {
        let y_parity = match self.v {
            27 => false,
            28 => true,
            other => return Err(SignerError::Recovery(format!("invalid v: {other}"))),
        };
        Ok(PrimitiveSignature::new(
            parse_word("r", &self.r)?,
            parse_word("s", &self.s)?,
            y_parity,
        ))
    }
}

fn parse_word(name: &str, raw: &str) -> SignerResult<U256> {
    let word: B256 = raw
        .parse()
        .map_err(|e| SignerError::Recovery(format!("invalid {name} {raw}: {e}")))?;
    Ok(U256::from_be_bytes(word.0))
}

/// Address that produced `signature` over `digest`.
pub fn recover_signer(digest: &B256, signature: &Signature) -> SignerResult<Address> {
    signature
        .to_primitive()?
        .recover_address_from_prehash(digest)
        .map_err(|e| SignerError::Recovery(e.to_string()))
}
