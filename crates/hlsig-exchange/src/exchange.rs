//! Action builders.
//!
//! One entry point per action kind. Each takes business parameters and a
//! [`SigningContext`], resolves names through the shared [`AssetResolver`],
//! encodes floats, signs, and returns the envelope. Posting it is a separate
//! step ([`Exchange::submit`]).

use std::slice;
use std::sync::Arc;
use std::time::Instant;

use hlsig_core::{
    float_to_usd_int, Cloid, Grouping, OrderKind, OrderRequest, TimeInForce,
};
use hlsig_registry::{AssetResolver, MetadataSource};
use hlsig_signer::action::{
    ApproveAgent, ApproveBuilderFee, BatchModify, BuilderInfo, BulkCancel, BulkCancelByCloid,
    BulkOrder, CancelByCloidWire, CancelWire, ConvertToMultiSigUser, CreateSubAccount,
    EvmUserModify, ModifyWire, OrderRef, ScheduleCancel, SendAsset, SetReferrer, SpotSend,
    SubAccountTransfer, TokenDelegate, UpdateIsolatedMargin, UpdateLeverage, UsdClassTransfer,
    UsdSend, VaultTransfer, Withdraw,
};
use hlsig_signer::{
    collect_multi_sig, sign_action, Action, Address, ExchangeRequest, KeyManager, SignerError,
    SigningContext,
};
use hlsig_telemetry::Metrics;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::canonical::{encode_float, order_wire};
use crate::config::AppConfig;
use crate::error::{ExchangeError, ExchangeResult};
use crate::transport::Transport;

/// Cancel by exchange order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelRequest {
    pub coin: String,
    pub oid: u64,
}

/// Cancel by client order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelByCloidRequest {
    pub coin: String,
    pub cloid: Cloid,
}

/// Replace the order identified by `oid` with `order`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyRequest {
    pub oid: OrderRef,
    pub order: OrderRequest,
}

/// Signed agent approval plus the freshly generated agent key.
#[derive(Debug)]
pub struct AgentApproval {
    pub request: ExchangeRequest,
    pub agent: KeyManager,
}

pub struct Exchange {
    resolver: Arc<AssetResolver>,
    signature_chain_id: String,
    default_slippage: f64,
}

impl Exchange {
    pub const DEFAULT_SLIPPAGE: f64 = 0.05;

    /// # Errors
    /// `Config` when `signature_chain_id` is not a hex or decimal chain id.
    pub fn new(resolver: Arc<AssetResolver>, signature_chain_id: &str) -> ExchangeResult<Self> {
        hlsig_signer::typed_data::parse_chain_id(signature_chain_id)
            .map_err(|e| ExchangeError::Config(e.to_string()))?;

        Metrics::instrument_table(resolver.version(), resolver.snapshot().len());
        Ok(Self {
            resolver,
            signature_chain_id: signature_chain_id.to_string(),
            default_slippage: Self::DEFAULT_SLIPPAGE,
        })
    }

    pub fn from_config(resolver: Arc<AssetResolver>, config: &AppConfig) -> ExchangeResult<Self> {
        Ok(Self::new(resolver, &config.signature_chain_id)?
            .with_default_slippage(config.default_slippage))
    }

    #[must_use]
    pub fn with_default_slippage(mut self, slippage: f64) -> Self {
        self.default_slippage = slippage;
        self
    }

    pub fn resolver(&self) -> &Arc<AssetResolver> {
        &self.resolver
    }

    pub fn signature_chain_id(&self) -> &str {
        &self.signature_chain_id
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub fn bulk_orders(
        &self,
        orders: &[OrderRequest],
        grouping: Grouping,
        builder: Option<BuilderInfo>,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.build_and_sign(ctx, || {
            let orders = orders
                .iter()
                .map(|order| order_wire(order, self.resolver.resolve(&order.coin)?))
                .collect::<ExchangeResult<Vec<_>>>()?;
            Ok(Action::Order(BulkOrder {
                orders,
                grouping,
                builder,
            }))
        })
    }

    pub fn limit_order(
        &self,
        order: &OrderRequest,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.bulk_orders(slice::from_ref(order), Grouping::Na, None, ctx)
    }

    /// IOC order priced `slippage` (default 5%) through `reference_px`.
    #[allow(clippy::too_many_arguments)]
    pub fn market_open(
        &self,
        coin: &str,
        is_buy: bool,
        sz: f64,
        reference_px: f64,
        slippage: Option<f64>,
        cloid: Option<Cloid>,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let instrument = self.resolver.instrument(coin)?;
        let limit_px = instrument
            .slippage_price(
                reference_px,
                is_buy,
                slippage.unwrap_or(self.default_slippage),
            )
            .map_err(ExchangeError::encode("limit_px"))?;

        let order = OrderRequest::limit(coin, is_buy, sz, limit_px, TimeInForce::ImmediateOrCancel)
            .with_cloid(cloid);
        self.limit_order(&order, ctx)
    }

    /// Stop-loss / take-profit order.
    ///
    /// Market triggers get a slippage price off the trigger price in place
    /// of `order.limit_px`.
    pub fn trigger_order(
        &self,
        order: &OrderRequest,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let OrderKind::Trigger {
            trigger_px,
            is_market,
            ..
        } = order.kind
        else {
            return Err(ExchangeError::InvalidArgument(
                "trigger_order needs a trigger order kind".to_string(),
            ));
        };

        if !is_market {
            return self.limit_order(order, ctx);
        }

        let limit_px = self
            .resolver
            .instrument(&order.coin)?
            .slippage_price(trigger_px, order.is_buy, self.default_slippage)
            .map_err(ExchangeError::encode("limit_px"))?;
        let order = OrderRequest {
            limit_px,
            ..order.clone()
        };
        self.limit_order(&order, ctx)
    }

    // =========================================================================
    // Cancels and modifies
    // =========================================================================

    pub fn bulk_cancel(
        &self,
        cancels: &[CancelRequest],
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.build_and_sign(ctx, || {
            let cancels = cancels
                .iter()
                .map(|c| {
                    Ok(CancelWire {
                        asset: self.resolver.resolve(&c.coin)?.0,
                        oid: c.oid,
                    })
                })
                .collect::<ExchangeResult<Vec<_>>>()?;
            Ok(Action::Cancel(BulkCancel { cancels }))
        })
    }

    pub fn cancel(
        &self,
        coin: &str,
        oid: u64,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.bulk_cancel(
            &[CancelRequest {
                coin: coin.to_string(),
                oid,
            }],
            ctx,
        )
    }

    pub fn bulk_cancel_by_cloid(
        &self,
        cancels: &[CancelByCloidRequest],
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.build_and_sign(ctx, || {
            let cancels = cancels
                .iter()
                .map(|c| {
                    Ok(CancelByCloidWire {
                        asset: self.resolver.resolve(&c.coin)?.0,
                        cloid: c.cloid,
                    })
                })
                .collect::<ExchangeResult<Vec<_>>>()?;
            Ok(Action::CancelByCloid(BulkCancelByCloid { cancels }))
        })
    }

    pub fn cancel_by_cloid(
        &self,
        coin: &str,
        cloid: Cloid,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.bulk_cancel_by_cloid(
            &[CancelByCloidRequest {
                coin: coin.to_string(),
                cloid,
            }],
            ctx,
        )
    }

    pub fn cancel_all(&self, ctx: &SigningContext<'_>) -> ExchangeResult<ExchangeRequest> {
        self.sign(Action::CancelAll, ctx)
    }

    /// Dead man's switch: cancel everything at `time` (ms). `None` clears it.
    pub fn schedule_cancel(
        &self,
        time: Option<i64>,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let time = time
            .map(|t| {
                u64::try_from(t).map_err(|_| {
                    ExchangeError::InvalidArgument(format!("schedule time must be >= 0: {t}"))
                })
            })
            .transpose()?;
        self.sign(Action::ScheduleCancel(ScheduleCancel { time }), ctx)
    }

    pub fn modify(
        &self,
        oid: OrderRef,
        order: &OrderRequest,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.build_and_sign(ctx, || {
            Ok(Action::Modify(self.modify_wire(oid, order)?))
        })
    }

    pub fn batch_modify(
        &self,
        modifies: &[ModifyRequest],
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.build_and_sign(ctx, || {
            let modifies = modifies
                .iter()
                .map(|m| self.modify_wire(m.oid, &m.order))
                .collect::<ExchangeResult<Vec<_>>>()?;
            Ok(Action::BatchModify(BatchModify { modifies }))
        })
    }

    fn modify_wire(&self, oid: OrderRef, order: &OrderRequest) -> ExchangeResult<ModifyWire> {
        Ok(ModifyWire {
            oid,
            order: order_wire(order, self.resolver.resolve(&order.coin)?)?,
        })
    }

    // =========================================================================
    // Account
    // =========================================================================

    pub fn update_leverage(
        &self,
        coin: &str,
        leverage: u32,
        is_cross: bool,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let asset = self.resolver.resolve(coin)?.0;
        self.sign(
            Action::UpdateLeverage(UpdateLeverage {
                asset,
                is_cross,
                leverage,
            }),
            ctx,
        )
    }

    /// Add (positive) or remove (negative) isolated margin, in USD.
    pub fn update_isolated_margin(
        &self,
        coin: &str,
        is_buy: bool,
        amount: f64,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.build_and_sign(ctx, || {
            Ok(Action::UpdateIsolatedMargin(UpdateIsolatedMargin {
                asset: self.resolver.resolve(coin)?.0,
                is_buy,
                ntli: float_to_usd_int(amount).map_err(ExchangeError::encode("amount"))?,
            }))
        })
    }

    pub fn vault_transfer(
        &self,
        vault: Address,
        is_deposit: bool,
        usd: f64,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.build_and_sign(ctx, || {
            Ok(Action::VaultTransfer(VaultTransfer {
                vault_address: lower_hex(&vault),
                is_deposit,
                usd: usd_amount(usd)?,
            }))
        })
    }

    pub fn create_sub_account(
        &self,
        name: &str,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.sign(
            Action::CreateSubAccount(CreateSubAccount {
                name: name.to_string(),
            }),
            ctx,
        )
    }

    pub fn sub_account_transfer(
        &self,
        sub_account: Address,
        is_deposit: bool,
        usd: f64,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.build_and_sign(ctx, || {
            Ok(Action::SubAccountTransfer(SubAccountTransfer {
                sub_account_user: lower_hex(&sub_account),
                is_deposit,
                usd: usd_amount(usd)?,
            }))
        })
    }

    pub fn set_referrer(
        &self,
        code: &str,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.sign(
            Action::SetReferrer(SetReferrer {
                code: code.to_string(),
            }),
            ctx,
        )
    }

    pub fn evm_user_modify(
        &self,
        using_big_blocks: bool,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        self.sign(
            Action::EvmUserModify(EvmUserModify { using_big_blocks }),
            ctx,
        )
    }

    /// Burns the nonce without doing anything.
    pub fn noop(&self, ctx: &SigningContext<'_>) -> ExchangeResult<ExchangeRequest> {
        self.sign(Action::Noop, ctx)
    }

    // =========================================================================
    // Transfers (user-signed)
    // =========================================================================

    pub fn usd_send(
        &self,
        destination: Address,
        amount: f64,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let time = action_nonce(ctx)?;
        self.build_and_sign(ctx, || {
            Ok(Action::UsdSend(UsdSend {
                signature_chain_id: self.signature_chain_id.clone(),
                hyperliquid_chain: ctx.network.chain_name().to_string(),
                destination: lower_hex(&destination),
                amount: encode_float("amount", amount)?,
                time,
            }))
        })
    }

    pub fn spot_send(
        &self,
        destination: Address,
        token: &str,
        amount: f64,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let time = action_nonce(ctx)?;
        self.build_and_sign(ctx, || {
            Ok(Action::SpotSend(SpotSend {
                signature_chain_id: self.signature_chain_id.clone(),
                hyperliquid_chain: ctx.network.chain_name().to_string(),
                destination: lower_hex(&destination),
                token: token.to_string(),
                amount: encode_float("amount", amount)?,
                time,
            }))
        })
    }

    /// Withdraw USDC through the bridge.
    pub fn withdraw(
        &self,
        destination: Address,
        amount: f64,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let time = action_nonce(ctx)?;
        self.build_and_sign(ctx, || {
            Ok(Action::Withdraw(Withdraw {
                signature_chain_id: self.signature_chain_id.clone(),
                hyperliquid_chain: ctx.network.chain_name().to_string(),
                destination: lower_hex(&destination),
                amount: encode_float("amount", amount)?,
                time,
            }))
        })
    }

    /// Move USDC between spot and perp balances.
    ///
    /// When the context trades for a vault the amount names it
    /// (`"<amount> subaccount:<vault>"`); the envelope itself carries no vault.
    pub fn usd_class_transfer(
        &self,
        amount: f64,
        to_perp: bool,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let nonce = action_nonce(ctx)?;
        self.build_and_sign(ctx, || {
            let mut amount = encode_float("amount", amount)?;
            if let Some(vault) = ctx.vault_address {
                amount.push_str(&format!(" subaccount:{}", lower_hex(&vault)));
            }
            Ok(Action::UsdClassTransfer(UsdClassTransfer {
                signature_chain_id: self.signature_chain_id.clone(),
                hyperliquid_chain: ctx.network.chain_name().to_string(),
                amount,
                to_perp,
                nonce,
            }))
        })
    }

    /// Move a token between dexs or accounts. `fromSubAccount` is the
    /// context's vault, or empty.
    pub fn send_asset(
        &self,
        destination: Address,
        source_dex: &str,
        destination_dex: &str,
        token: &str,
        amount: f64,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let nonce = action_nonce(ctx)?;
        self.build_and_sign(ctx, || {
            Ok(Action::SendAsset(SendAsset {
                signature_chain_id: self.signature_chain_id.clone(),
                hyperliquid_chain: ctx.network.chain_name().to_string(),
                destination: lower_hex(&destination),
                source_dex: source_dex.to_string(),
                destination_dex: destination_dex.to_string(),
                token: token.to_string(),
                amount: encode_float("amount", amount)?,
                from_sub_account: ctx
                    .vault_address
                    .map(|vault| lower_hex(&vault))
                    .unwrap_or_default(),
                nonce,
            }))
        })
    }

    /// Stake (`is_undelegate = false`) or unstake `wei` with `validator`.
    pub fn token_delegate(
        &self,
        validator: Address,
        wei: u64,
        is_undelegate: bool,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let nonce = action_nonce(ctx)?;
        self.sign(
            Action::TokenDelegate(TokenDelegate {
                signature_chain_id: self.signature_chain_id.clone(),
                hyperliquid_chain: ctx.network.chain_name().to_string(),
                validator: lower_hex(&validator),
                wei,
                is_undelegate,
                nonce,
            }),
            ctx,
        )
    }

    // =========================================================================
    // Agents, builders, multi-sig (user-signed)
    // =========================================================================

    /// Generate a new agent key and sign its approval.
    ///
    /// The caller owns the returned key; it is not logged.
    pub fn approve_agent(
        &self,
        name: Option<&str>,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<AgentApproval> {
        let agent = KeyManager::generate();
        let request = self.approve_agent_address(agent.address(), name, ctx)?;
        info!(agent = %agent.address(), "Generated agent key");
        Ok(AgentApproval { request, agent })
    }

    /// Approve an existing agent address. An empty name counts as none.
    pub fn approve_agent_address(
        &self,
        agent: Address,
        name: Option<&str>,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let nonce = action_nonce(ctx)?;
        self.sign(
            Action::ApproveAgent(ApproveAgent {
                signature_chain_id: self.signature_chain_id.clone(),
                hyperliquid_chain: ctx.network.chain_name().to_string(),
                agent_address: lower_hex(&agent),
                agent_name: name.filter(|n| !n.is_empty()).map(str::to_string),
                nonce,
            }),
            ctx,
        )
    }

    /// Allow `builder` to charge up to `max_fee_rate` (e.g. `"0.001%"`).
    pub fn approve_builder_fee(
        &self,
        builder: Address,
        max_fee_rate: &str,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        let nonce = action_nonce(ctx)?;
        self.sign(
            Action::ApproveBuilderFee(ApproveBuilderFee {
                signature_chain_id: self.signature_chain_id.clone(),
                hyperliquid_chain: ctx.network.chain_name().to_string(),
                max_fee_rate: max_fee_rate.to_string(),
                builder: lower_hex(&builder),
                nonce,
            }),
            ctx,
        )
    }

    /// Turn the signer's account into a `threshold`-of-n multi-sig account.
    pub fn convert_to_multi_sig_user(
        &self,
        authorized_users: &[Address],
        threshold: u32,
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        if threshold == 0 || threshold as usize > authorized_users.len() {
            return Err(ExchangeError::InvalidArgument(format!(
                "threshold {threshold} out of range for {} users",
                authorized_users.len()
            )));
        }
        let nonce = action_nonce(ctx)?;

        let mut users: Vec<String> = authorized_users.iter().map(lower_hex).collect();
        users.sort();
        users.dedup();
        let signers = serde_json::to_string(&MultiSigSigners {
            authorized_users: users,
            threshold,
        })
        .map_err(|e| SignerError::Serialization {
            step: "signers",
            reason: e.to_string(),
        })?;

        self.sign(
            Action::ConvertToMultiSigUser(ConvertToMultiSigUser {
                signature_chain_id: self.signature_chain_id.clone(),
                hyperliquid_chain: ctx.network.chain_name().to_string(),
                signers,
                nonce,
            }),
            ctx,
        )
    }

    /// Sign `action` for `multi_sig_user` with every key in `signers`, then
    /// wrap the signatures in a `multiSig` request from `ctx.signer`.
    pub fn multi_sig(
        &self,
        action: Action,
        multi_sig_user: Address,
        signers: &[&KeyManager],
        ctx: &SigningContext<'_>,
    ) -> ExchangeResult<ExchangeRequest> {
        if signers.is_empty() {
            return Err(ExchangeError::InvalidArgument(
                "multi-sig action needs at least one signer".to_string(),
            ));
        }
        let multi_sig = collect_multi_sig(
            action,
            multi_sig_user,
            signers,
            &self.signature_chain_id,
            ctx,
        )
        .map_err(|e| {
            Metrics::signing_failed(failure_step(&e));
            ExchangeError::from(e)
        })?;
        self.sign(Action::MultiSig(multi_sig), ctx)
    }

    // =========================================================================
    // Signing, submission, metadata
    // =========================================================================

    /// Sign an already-built action.
    pub fn sign(&self, action: Action, ctx: &SigningContext<'_>) -> ExchangeResult<ExchangeRequest> {
        let action_type = action.type_name();
        let started = Instant::now();

        match sign_action(action, ctx) {
            Ok(request) => {
                Metrics::action_signed(action_type, started.elapsed().as_secs_f64());
                Ok(request)
            }
            Err(e) => {
                Metrics::signing_failed(failure_step(&e));
                warn!(action_type, error = %e, "Signing failed");
                Err(e.into())
            }
        }
    }

    fn build_and_sign(
        &self,
        ctx: &SigningContext<'_>,
        build: impl FnOnce() -> ExchangeResult<Action>,
    ) -> ExchangeResult<ExchangeRequest> {
        let action = build().map_err(|e| {
            if matches!(e, ExchangeError::Encode { .. }) {
                Metrics::signing_failed("encode");
            }
            e
        })?;
        self.sign(action, ctx)
    }

    /// Post a signed request to `/exchange` once.
    ///
    /// The exchange's reply is returned as-is, rejections included.
    pub async fn submit(
        &self,
        transport: &dyn Transport,
        request: &ExchangeRequest,
    ) -> ExchangeResult<Value> {
        let body = request.to_json()?;
        let action_type = request.action.type_name();

        let reply = match transport.post_json("/exchange", &body).await {
            Ok(reply) => reply,
            Err(e) => {
                Metrics::submission("transport_error");
                warn!(action_type, error = %e, "Submission failed");
                return Err(e.into());
            }
        };

        if reply.get("status").and_then(Value::as_str) == Some("ok") {
            Metrics::submission("ok");
            info!(action_type, nonce = request.nonce, "Request accepted");
        } else {
            Metrics::submission("rejected");
            warn!(action_type, nonce = request.nonce, reply = %reply, "Request rejected");
        }
        Ok(reply)
    }

    /// Reload metadata and publish a new instrument table.
    pub async fn refresh(
        &self,
        source: &dyn MetadataSource,
        builder_dexs: &[String],
    ) -> ExchangeResult<u64> {
        let version = self.resolver.refresh(source, builder_dexs).await?;
        Metrics::instrument_table(version, self.resolver.snapshot().len());
        Ok(version)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MultiSigSigners {
    authorized_users: Vec<String>,
    threshold: u32,
}

fn lower_hex(address: &Address) -> String {
    format!("{address:#x}")
}

fn action_nonce(ctx: &SigningContext<'_>) -> ExchangeResult<u64> {
    u64::try_from(ctx.nonce).map_err(|_| SignerError::InvalidNonce(ctx.nonce).into())
}

fn usd_amount(usd: f64) -> ExchangeResult<u64> {
    let raw = float_to_usd_int(usd).map_err(ExchangeError::encode("usd"))?;
    u64::try_from(raw)
        .map_err(|_| ExchangeError::InvalidArgument(format!("usd amount must be >= 0: {usd}")))
}

fn failure_step(error: &SignerError) -> &'static str {
    match error {
        SignerError::InvalidNonce(_)
        | SignerError::InvalidExpiry(_)
        | SignerError::InvalidAddress(_)
        | SignerError::UnsupportedMultiSig(_) => "validate",
        SignerError::Serialization { step, .. } => *step,
        SignerError::TypedData { .. } => "typed_data",
        SignerError::SigningFailed(_) => "sign",
        SignerError::Recovery(_) => "recover",
        SignerError::Key(_) => "key",
    }
}
