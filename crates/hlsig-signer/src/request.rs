//! Signing pipeline and request envelope.
//!
//! `sign_action` picks the payload for the action kind (phantom agent over
//! the action hash, the user-signed struct, or the multi-sig envelope),
//! signs its EIP-712 digest and wraps everything in the body posted to
//! `/exchange`.

use alloy::primitives::{Address, B256};
use hlsig_core::Network;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::action::Action;
use crate::error::{SignerError, SignerResult};
use crate::hash::{payload_hash, SigningInput};
use crate::signer::{KeyManager, Signature};
use crate::typed_data::{PhantomAgent, TypedPayload, UserSignedPayload};

/// Per-call signing parameters.
#[derive(Debug, Clone, Copy)]
pub struct SigningContext<'a> {
    pub signer: &'a KeyManager,
    /// Milliseconds; must be non-negative.
    pub nonce: i64,
    /// Vault or sub-account traded on behalf of.
    pub vault_address: Option<Address>,
    /// Request is rejected by the exchange after this time (ms).
    pub expires_after: Option<i64>,
    pub network: Network,
    /// Account the signer acts for. Differing from the signer's own
    /// address means the signer is an approved agent.
    pub acting_account: Option<Address>,
}

impl<'a> SigningContext<'a> {
    pub fn new(signer: &'a KeyManager, nonce: i64, network: Network) -> Self {
        Self {
            signer,
            nonce,
            vault_address: None,
            expires_after: None,
            network,
            acting_account: None,
        }
    }

    #[must_use]
    pub fn with_vault(mut self, vault_address: Option<Address>) -> Self {
        self.vault_address = vault_address;
        self
    }

    #[must_use]
    pub fn with_expires_after(mut self, expires_after: Option<i64>) -> Self {
        self.expires_after = expires_after;
        self
    }

    #[must_use]
    pub fn with_acting_account(mut self, acting_account: Option<Address>) -> Self {
        self.acting_account = acting_account;
        self
    }

    /// Like [`Self::with_acting_account`] from user input; empty means none.
    pub fn with_acting_account_str(self, raw: &str) -> SignerResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(self.with_acting_account(None));
        }
        let address = raw
            .parse::<Address>()
            .map_err(|e| SignerError::InvalidAddress(format!("{raw}: {e}")))?;
        Ok(self.with_acting_account(Some(address)))
    }

    /// `user` field of the envelope: set only in agent mode.
    pub fn agent_user(&self) -> Option<Address> {
        self.acting_account
            .filter(|account| *account != self.signer.address())
    }
}

/// Body of an `/exchange` request.
///
/// `vaultAddress` and `expiresAfter` are always serialized, as `null` when
/// absent; `user` only in agent mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    pub action: Action,
    pub nonce: u64,
    pub signature: Signature,
    #[serde(serialize_with = "serialize_opt_address")]
    pub vault_address: Option<Address>,
    pub expires_after: Option<u64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_address"
    )]
    pub user: Option<Address>,
    /// Digest that was signed; not part of the body.
    #[serde(skip)]
    pub signing_hash: B256,
}

impl ExchangeRequest {
    pub fn to_json(&self) -> SignerResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| SignerError::Serialization {
            step: "envelope",
            reason: e.to_string(),
        })
    }
}

/// Addresses go on the wire as lowercase hex.
fn serialize_opt_address<S: Serializer>(
    address: &Option<Address>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match address {
        Some(a) => serializer.serialize_str(&format!("0x{}", hex::encode(a.as_slice()))),
        None => serializer.serialize_none(),
    }
}

/// Typed-data payload an action is signed over.
pub fn typed_payload(action: &Action, ctx: &SigningContext<'_>) -> SignerResult<TypedPayload> {
    if let Action::MultiSig(multi_sig) = action {
        let (nonce, expires_after) = checked_nonce(ctx)?;
        let hash = payload_hash(multi_sig, nonce, ctx.vault_address, expires_after)?;
        return Ok(TypedPayload::UserSigned(
            UserSignedPayload::multi_sig_envelope(
                &multi_sig.signature_chain_id,
                ctx.network,
                hash,
                nonce,
            )?,
        ));
    }

    match UserSignedPayload::from_action(action)? {
        Some(payload) => Ok(TypedPayload::UserSigned(payload)),
        None => {
            let input =
                SigningInput::new(action, ctx.nonce, ctx.vault_address, ctx.expires_after)?;
            Ok(TypedPayload::Agent(PhantomAgent::new(
                input.action_hash()?,
                ctx.network,
            )))
        }
    }
}

/// Nonce and expiry as unsigned wire values.
pub(crate) fn checked_nonce(ctx: &SigningContext<'_>) -> SignerResult<(u64, Option<u64>)> {
    let nonce = u64::try_from(ctx.nonce).map_err(|_| SignerError::InvalidNonce(ctx.nonce))?;
    let expires_after = ctx
        .expires_after
        .map(|e| u64::try_from(e).map_err(|_| SignerError::InvalidExpiry(e)))
        .transpose()?;
    Ok((nonce, expires_after))
}

/// Hash, sign and wrap `action`.
///
/// # Errors
/// `InvalidNonce` / `InvalidExpiry` for negative values (checked before any
/// encoding), then whatever the payload builder or signer reports.
pub fn sign_action(action: Action, ctx: &SigningContext<'_>) -> SignerResult<ExchangeRequest> {
    let (nonce, expires_after) = checked_nonce(ctx)?;

    let payload = typed_payload(&action, ctx)?;
    let signing_hash = payload.signing_hash();
    let signature = ctx.signer.sign_hash(&signing_hash)?;

    let vault_address = if action.excludes_vault() {
        None
    } else {
        ctx.vault_address
    };
    let user = ctx.agent_user();

    debug!(
        action_type = action.type_name(),
        nonce,
        network = %ctx.network,
        vault = vault_address.is_some(),
        agent_mode = user.is_some(),
        "Signed action"
    );

    Ok(ExchangeRequest {
        action,
        nonce,
        signature,
        vault_address,
        expires_after,
        user,
        signing_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{BulkOrder, OrderTypeWire, OrderWire, UsdClassTransfer, UsdSend};
    use crate::signer::recover_signer;
    use hlsig_core::{Grouping, TimeInForce};

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const AGENT_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
    const NONCE: i64 = 1758570668100;

    fn dydx_buy_order() -> Action {
        Action::Order(BulkOrder {
            orders: vec![OrderWire {
                asset: 4,
                is_buy: true,
                limit_px: "1100".to_string(),
                sz: "0.2".to_string(),
                reduce_only: false,
                order_type: OrderTypeWire::limit(TimeInForce::GoodTilCancelled),
                cloid: None,
            }],
            grouping: Grouping::Na,
            builder: None,
        })
    }

    fn vault() -> Address {
        "0x1719884eb866cb12b2287399b15f7db5e7d775ea".parse().unwrap()
    }

    #[test]
    fn test_sign_order_testnet() {
        let key = KeyManager::from_hex(KEY).unwrap();
        let ctx = SigningContext::new(&key, NONCE, Network::Testnet);
        let request = sign_action(dydx_buy_order(), &ctx).unwrap();

        assert_eq!(
            hex::encode(request.signing_hash),
            "cdc27ff36b46686a581365a8f7adcd54f1172628e829779d8aa270ad7e440c74"
        );
        assert_eq!(
            request.signature.r,
            "0x24d14528b8ab86b4fd0701fcf95fa30340cf3243b107f7d4519b9d84f8a8cfea"
        );
        assert_eq!(
            request.signature.s,
            "0x2b3f346d8e56372aab56c00cc3689385374638bcb047f6593388dd43baa72a18"
        );
        assert_eq!(request.signature.v, 27);
    }

    #[test]
    fn test_envelope_shape() {
        let key = KeyManager::from_hex(KEY).unwrap();
        let ctx = SigningContext::new(&key, NONCE, Network::Testnet);
        let json = sign_action(dydx_buy_order(), &ctx).unwrap().to_json().unwrap();

        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["action", "nonce", "signature", "vaultAddress", "expiresAfter"]
        );
        assert!(json["vaultAddress"].is_null());
        assert!(json["expiresAfter"].is_null());
        assert_eq!(json["nonce"], 1758570668100u64);
        assert_eq!(json["action"]["type"], "order");
    }

    #[test]
    fn test_vault_is_hashed_and_sent_lowercase() {
        let key = KeyManager::from_hex(KEY).unwrap();
        let ctx = SigningContext::new(&key, NONCE, Network::Mainnet).with_vault(Some(vault()));
        let request = sign_action(dydx_buy_order(), &ctx).unwrap();

        assert_eq!(request.signature.v, 28);
        assert_eq!(
            request.signature.r,
            "0xa85386be428e69289b19a9fdc274519a7971f651ee1e7099adc53438697ef337"
        );
        let json = request.to_json().unwrap();
        assert_eq!(
            json["vaultAddress"],
            "0x1719884eb866cb12b2287399b15f7db5e7d775ea"
        );
    }

    #[test]
    fn test_vault_excluded_for_class_transfer() {
        let key = KeyManager::from_hex(KEY).unwrap();
        let ctx = SigningContext::new(&key, NONCE, Network::Testnet).with_vault(Some(vault()));
        let action = Action::UsdClassTransfer(UsdClassTransfer {
            signature_chain_id: "0x66eee".to_string(),
            hyperliquid_chain: "Testnet".to_string(),
            amount: "1 subaccount:0x1719884eb866cb12b2287399b15f7db5e7d775ea".to_string(),
            to_perp: true,
            nonce: NONCE as u64,
        });
        let request = sign_action(action, &ctx).unwrap();
        assert!(request.vault_address.is_none());
        assert!(request.to_json().unwrap()["vaultAddress"].is_null());
    }

    #[test]
    fn test_expiry_in_envelope() {
        let key = KeyManager::from_hex(KEY).unwrap();
        let ctx = SigningContext::new(&key, NONCE, Network::Testnet)
            .with_expires_after(Some(1758570768100));
        let request = sign_action(dydx_buy_order(), &ctx).unwrap();
        assert_eq!(
            request.signature.r,
            "0x16b9f74fd5da02ef967f20befcf6fa3990380b9ea988bf901b80bd18d77273ce"
        );
        assert_eq!(request.to_json().unwrap()["expiresAfter"], 1758570768100u64);
    }

    #[test]
    fn test_user_signed_usd_send() {
        let key = KeyManager::from_hex(KEY).unwrap();
        let ctx = SigningContext::new(&key, 1687816341423, Network::Testnet);
        let action = Action::UsdSend(UsdSend {
            signature_chain_id: "0x66eee".to_string(),
            hyperliquid_chain: "Testnet".to_string(),
            destination: "0x0d1d9635d0640821d15e323ac8adadfa9c111414".to_string(),
            amount: "1".to_string(),
            time: 1687816341423,
        });
        let request = sign_action(action, &ctx).unwrap();
        assert_eq!(
            request.signature.r,
            "0xa97a973ba4151da2b9085765d79bf1211ce3be397becc0945af1ed047935129f"
        );
        assert_eq!(
            request.signature.s,
            "0x3aa7d386a886aee03265cf38ba463facf3a87f8db3b9a1889e2d2b873f0aaa5f"
        );
        assert_eq!(request.signature.v, 27);
        assert_eq!(
            recover_signer(&request.signing_hash, &request.signature).unwrap(),
            key.address()
        );
    }

    #[test]
    fn test_agent_mode_sets_user() {
        let owner = KeyManager::from_hex(KEY).unwrap();
        let agent = KeyManager::from_hex(AGENT_KEY).unwrap();

        let ctx = SigningContext::new(&agent, NONCE, Network::Testnet)
            .with_acting_account(Some(owner.address()));
        let request = sign_action(dydx_buy_order(), &ctx).unwrap();

        assert_eq!(request.user, Some(owner.address()));
        assert_eq!(
            recover_signer(&request.signing_hash, &request.signature).unwrap(),
            agent.address()
        );
        assert_eq!(
            request.to_json().unwrap()["user"],
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_acting_as_self_is_not_agent_mode() {
        let key = KeyManager::from_hex(KEY).unwrap();
        let ctx = SigningContext::new(&key, NONCE, Network::Testnet)
            .with_acting_account_str("0xF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266")
            .unwrap();
        let request = sign_action(dydx_buy_order(), &ctx).unwrap();
        assert!(request.user.is_none());
        assert!(request.to_json().unwrap().get("user").is_none());
    }

    #[test]
    fn test_empty_acting_account_is_none() {
        let key = KeyManager::from_hex(KEY).unwrap();
        let ctx = SigningContext::new(&key, NONCE, Network::Testnet)
            .with_acting_account_str("  ")
            .unwrap();
        assert!(ctx.acting_account.is_none());

        let bad = SigningContext::new(&key, NONCE, Network::Testnet).with_acting_account_str("0x12");
        assert!(matches!(bad, Err(SignerError::InvalidAddress(_))));
    }

    #[test]
    fn test_negative_values_rejected() {
        let key = KeyManager::from_hex(KEY).unwrap();
        let ctx = SigningContext::new(&key, -1, Network::Testnet);
        assert!(matches!(
            sign_action(dydx_buy_order(), &ctx),
            Err(SignerError::InvalidNonce(-1))
        ));

        let ctx = SigningContext::new(&key, NONCE, Network::Testnet).with_expires_after(Some(-2));
        assert!(matches!(
            sign_action(dydx_buy_order(), &ctx),
            Err(SignerError::InvalidExpiry(-2))
        ));
    }
}
