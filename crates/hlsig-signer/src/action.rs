//! Wire shapes of every action the exchange accepts.
//!
//! Field declaration order is the serialization order, and for exchange-native
//! actions that order is hashed: reordering a field here changes the
//! `action_hash` and invalidates every signature. `Option` fields are
//! omitted when `None` (msgpack has no notion of a missing key otherwise).
//!
//! Prices, sizes and amounts are already-encoded strings. No float reaches
//! this module.

use hlsig_core::{Cloid, Grouping, TimeInForce, Tpsl};
use serde::{Deserialize, Serialize};

use crate::signer::Signature;

/// Every action kind, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    // Exchange-native actions, signed through the phantom agent.
    Order(BulkOrder),
    Cancel(BulkCancel),
    CancelByCloid(BulkCancelByCloid),
    Modify(ModifyWire),
    BatchModify(BatchModify),
    CancelAll,
    ScheduleCancel(ScheduleCancel),
    UpdateLeverage(UpdateLeverage),
    UpdateIsolatedMargin(UpdateIsolatedMargin),
    VaultTransfer(VaultTransfer),
    CreateSubAccount(CreateSubAccount),
    SubAccountTransfer(SubAccountTransfer),
    SetReferrer(SetReferrer),
    EvmUserModify(EvmUserModify),
    Noop,

    // User-signed actions, signed over their own fields.
    UsdSend(UsdSend),
    SpotSend(SpotSend),
    #[serde(rename = "withdraw3")]
    Withdraw(Withdraw),
    UsdClassTransfer(UsdClassTransfer),
    SendAsset(SendAsset),
    TokenDelegate(TokenDelegate),
    ApproveAgent(ApproveAgent),
    ApproveBuilderFee(ApproveBuilderFee),
    ConvertToMultiSigUser(ConvertToMultiSigUser),

    // Signatures of a multi-sig account's signers, submitted by one of them.
    MultiSig(MultiSigAction),
}

impl Action {
    /// Wire value of the `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Order(_) => "order",
            Self::Cancel(_) => "cancel",
            Self::CancelByCloid(_) => "cancelByCloid",
            Self::Modify(_) => "modify",
            Self::BatchModify(_) => "batchModify",
            Self::CancelAll => "cancelAll",
            Self::ScheduleCancel(_) => "scheduleCancel",
            Self::UpdateLeverage(_) => "updateLeverage",
            Self::UpdateIsolatedMargin(_) => "updateIsolatedMargin",
            Self::VaultTransfer(_) => "vaultTransfer",
            Self::CreateSubAccount(_) => "createSubAccount",
            Self::SubAccountTransfer(_) => "subAccountTransfer",
            Self::SetReferrer(_) => "setReferrer",
            Self::EvmUserModify(_) => "evmUserModify",
            Self::Noop => "noop",
            Self::UsdSend(_) => "usdSend",
            Self::SpotSend(_) => "spotSend",
            Self::Withdraw(_) => "withdraw3",
            Self::UsdClassTransfer(_) => "usdClassTransfer",
            Self::SendAsset(_) => "sendAsset",
            Self::TokenDelegate(_) => "tokenDelegate",
            Self::ApproveAgent(_) => "approveAgent",
            Self::ApproveBuilderFee(_) => "approveBuilderFee",
            Self::ConvertToMultiSigUser(_) => "convertToMultiSigUser",
            Self::MultiSig(_) => "multiSig",
        }
    }

    /// Actions whose envelope never carries a `vaultAddress`.
    ///
    /// These address sub-accounts through their own fields instead.
    pub fn excludes_vault(&self) -> bool {
        matches!(self, Self::UsdClassTransfer(_) | Self::SendAsset(_))
    }
}

// =============================================================================
// Orders
// =============================================================================

/// `{"type":"order","orders":[...],"grouping":"na","builder"?:{...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkOrder {
    pub orders: Vec<OrderWire>,
    pub grouping: Grouping,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<BuilderInfo>,
}

/// Builder fee attached to an order batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderInfo {
    /// Builder address, lowercase hex.
    #[serde(rename = "b")]
    pub address: String,
    /// Fee in tenths of a basis point.
    #[serde(rename = "f")]
    pub fee: u64,
}

impl BuilderInfo {
    pub fn new(address: &str, fee: u64) -> Self {
        Self {
            address: address.to_lowercase(),
            fee,
        }
    }
}

/// Single order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWire {
    /// Asset id
    #[serde(rename = "a")]
    pub asset: u32,

    #[serde(rename = "b")]
    pub is_buy: bool,

    /// Limit price, wire-encoded
    #[serde(rename = "p")]
    pub limit_px: String,

    /// Size, wire-encoded
    #[serde(rename = "s")]
    pub sz: String,

    #[serde(rename = "r")]
    pub reduce_only: bool,

    #[serde(rename = "t")]
    pub order_type: OrderTypeWire,

    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub cloid: Option<Cloid>,
}

/// `{"limit":{"tif":..}}` or `{"trigger":{"isMarket":..,"triggerPx":..,"tpsl":..}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderTypeWire {
    Limit { limit: LimitOrderType },
    Trigger { trigger: TriggerOrderType },
}

impl OrderTypeWire {
    pub fn limit(tif: TimeInForce) -> Self {
        Self::Limit {
            limit: LimitOrderType { tif },
        }
    }

    pub fn trigger(is_market: bool, trigger_px: String, tpsl: Tpsl) -> Self {
        Self::Trigger {
            trigger: TriggerOrderType {
                is_market,
                trigger_px,
                tpsl,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderType {
    pub tif: TimeInForce,
}

/// Hashed key order: isMarket, triggerPx, tpsl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerOrderType {
    pub is_market: bool,
    pub trigger_px: String,
    pub tpsl: Tpsl,
}

// =============================================================================
// Cancels and modifies
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCancel {
    pub cancels: Vec<CancelWire>,
}

/// `{"a": asset, "o": oid}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelWire {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "o")]
    pub oid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCancelByCloid {
    pub cancels: Vec<CancelByCloidWire>,
}

/// `{"asset": asset, "cloid": "0x.."}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelByCloidWire {
    pub asset: u32,
    pub cloid: Cloid,
}

/// Reference to a resting order: exchange oid or client id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderRef {
    Oid(u64),
    Cloid(Cloid),
}

/// `{"type":"modify","oid":..,"order":{..}}`, also an element of `batchModify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyWire {
    pub oid: OrderRef,
    pub order: OrderWire,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchModify {
    pub modifies: Vec<ModifyWire>,
}

/// Dead-man switch. `time` absent clears a scheduled cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleCancel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
}

// =============================================================================
// Account actions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeverage {
    pub asset: u32,
    pub is_cross: bool,
    pub leverage: u32,
}

/// `ntli` is the margin delta in USD scaled by 1e6, signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIsolatedMargin {
    pub asset: u32,
    pub is_buy: bool,
    pub ntli: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultTransfer {
    pub vault_address: String,
    pub is_deposit: bool,
    /// USD scaled by 1e6.
    pub usd: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSubAccount {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccountTransfer {
    pub sub_account_user: String,
    pub is_deposit: bool,
    /// USD scaled by 1e6.
    pub usd: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetReferrer {
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmUserModify {
    pub using_big_blocks: bool,
}

// =============================================================================
// User-signed actions
// =============================================================================
//
// Each carries `signatureChainId` (domain chain id, hex) and
// `hyperliquidChain` ("Mainnet"/"Testnet") followed by its own fields.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdSend {
    pub signature_chain_id: String,
    pub hyperliquid_chain: String,
    pub destination: String,
    pub amount: String,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotSend {
    pub signature_chain_id: String,
    pub hyperliquid_chain: String,
    pub destination: String,
    /// `NAME:0x<token id>`
    pub token: String,
    pub amount: String,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdraw {
    pub signature_chain_id: String,
    pub hyperliquid_chain: String,
    pub destination: String,
    pub amount: String,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdClassTransfer {
    pub signature_chain_id: String,
    pub hyperliquid_chain: String,
    /// Amount, suffixed with ` subaccount:<addr>` when moving for a vault.
    pub amount: String,
    pub to_perp: bool,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAsset {
    pub signature_chain_id: String,
    pub hyperliquid_chain: String,
    pub destination: String,
    pub source_dex: String,
    pub destination_dex: String,
    pub token: String,
    pub amount: String,
    /// Vault or sub-account address, empty for the main account.
    pub from_sub_account: String,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDelegate {
    pub signature_chain_id: String,
    pub hyperliquid_chain: String,
    pub validator: String,
    pub wei: u64,
    pub is_undelegate: bool,
    pub nonce: u64,
}

/// Unnamed agents omit `agentName` on the wire but sign it as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveAgent {
    pub signature_chain_id: String,
    pub hyperliquid_chain: String,
    pub agent_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBuilderFee {
    pub signature_chain_id: String,
    pub hyperliquid_chain: String,
    /// Percentage string, e.g. `"0.001%"`.
    pub max_fee_rate: String,
    pub builder: String,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertToMultiSigUser {
    pub signature_chain_id: String,
    pub hyperliquid_chain: String,
    /// JSON `{"authorizedUsers":[..],"threshold":n}` as a string.
    pub signers: String,
    pub nonce: u64,
}

// =============================================================================
// Multi-sig
// =============================================================================

/// `{"type":"multiSig","signatureChainId":..,"signatures":[..],"payload":{..}}`
///
/// Hashed without its `type` tag: this struct's own msgpack is the
/// `multiSigActionHash` pre-image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSigAction {
    pub signature_chain_id: String,
    pub signatures: Vec<Signature>,
    pub payload: MultiSigPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSigPayload {
    /// Multi-sig account, lowercase hex.
    pub multi_sig_user: String,
    /// Signer submitting the request, lowercase hex.
    pub outer_signer: String,
    pub action: Box<Action>,
}
