//! Multi-sig signing.
//!
//! Every authorized signer signs the inner action as a phantom agent over
//! `hash([multiSigUser, outerSigner, action])`, using the request's nonce,
//! vault and expiry. The outer signer then submits a `multiSig` action that
//! carries those signatures; [`sign_action`](crate::request::sign_action)
//! signs it through the `SendMultiSig` envelope.
//!
//! Only exchange-native inner actions are supported.

use alloy::primitives::Address;
use tracing::debug;

use crate::action::{Action, MultiSigAction, MultiSigPayload};
use crate::error::{SignerError, SignerResult};
use crate::hash::payload_hash;
use crate::request::{checked_nonce, SigningContext};
use crate::signer::{KeyManager, Signature};
use crate::typed_data::{PhantomAgent, UserSignedPayload};

fn lower_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

fn ensure_supported(action: &Action) -> SignerResult<()> {
    if matches!(action, Action::MultiSig(_)) || UserSignedPayload::from_action(action)?.is_some() {
        return Err(SignerError::UnsupportedMultiSig(action.type_name()));
    }
    Ok(())
}

/// Signature of `ctx.signer` over `action` on behalf of `multi_sig_user`.
pub fn multi_sig_signature(
    action: &Action,
    multi_sig_user: Address,
    outer_signer: Address,
    ctx: &SigningContext<'_>,
) -> SignerResult<Signature> {
    ensure_supported(action)?;
    let (nonce, expires_after) = checked_nonce(ctx)?;

    let envelope = (lower_hex(&multi_sig_user), lower_hex(&outer_signer), action);
    let hash = payload_hash(&envelope, nonce, ctx.vault_address, expires_after)?;
    ctx.signer
        .sign_hash(&PhantomAgent::new(hash, ctx.network).signing_hash())
}

/// Collect one signature per signer into a `multiSig` action.
///
/// `ctx.signer` is the outer signer that will submit the result; its nonce,
/// vault, expiry and network apply to every inner signature.
pub fn collect_multi_sig(
    action: Action,
    multi_sig_user: Address,
    signers: &[&KeyManager],
    signature_chain_id: &str,
    ctx: &SigningContext<'_>,
) -> SignerResult<MultiSigAction> {
    let outer_signer = ctx.signer.address();
    let signatures = signers
        .iter()
        .map(|&signer| {
            let inner = SigningContext { signer, ..*ctx };
            multi_sig_signature(&action, multi_sig_user, outer_signer, &inner)
        })
        .collect::<SignerResult<Vec<_>>>()?;

    debug!(
        action_type = action.type_name(),
        multi_sig_user = %multi_sig_user,
        signatures = signatures.len(),
        "Collected multi-sig signatures"
    );

    Ok(MultiSigAction {
        signature_chain_id: signature_chain_id.to_string(),
        signatures,
        payload: MultiSigPayload {
            multi_sig_user: lower_hex(&multi_sig_user),
            outer_signer: lower_hex(&outer_signer),
            action: Box::new(action),
        },
    })
}
