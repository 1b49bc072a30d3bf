//! Signing with an approved agent key on behalf of another account.

use std::sync::Arc;

use hlsig_core::{Network, OrderRequest, TimeInForce};
use hlsig_exchange::{Exchange, RecordingTransport};
use hlsig_registry::{AssetResolver, StaticMetadataSource};
use hlsig_signer::{recover_signer, KeyManager, SigningContext};

const OWNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const AGENT_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
const NONCE: i64 = 1758570668100;

fn exchange() -> Exchange {
    let source = StaticMetadataSource::from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/snapshot.json"
    ))
    .expect("load snapshot");
    let resolver = AssetResolver::from_snapshot(source.snapshot()).expect("build table");
    Exchange::new(Arc::new(resolver), "0x66eee").expect("exchange")
}

fn order() -> OrderRequest {
    OrderRequest::limit("DYDX", true, 0.2, 1100.0, TimeInForce::GoodTilCancelled)
}

#[test]
fn test_agent_signature_recovers_to_agent() {
    let exchange = exchange();
    let owner = KeyManager::from_hex(OWNER_KEY).unwrap();
    let agent = KeyManager::from_hex(AGENT_KEY).unwrap();
    assert_eq!(
        format!("{:#x}", agent.address()),
        "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
    );

    let ctx = SigningContext::new(&agent, NONCE, Network::Testnet)
        .with_acting_account(Some(owner.address()));
    let request = exchange.limit_order(&order(), &ctx).unwrap();

    assert_eq!(
        request.signature.r,
        "0x8a4ce6d189c4284cd43554f50d00167838c692301cdd0524e92cbccd334f9224"
    );
    assert_eq!(
        request.signature.s,
        "0x26d92ea87481d93282a968bcdff914463fd3f755abb3b9cdd56aa8515dbc5d19"
    );
    assert_eq!(request.signature.v, 28);
    assert_eq!(
        recover_signer(&request.signing_hash, &request.signature).unwrap(),
        agent.address()
    );

    let body = request.to_json().unwrap();
    assert_eq!(body["user"], "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
}

#[test]
fn test_acting_account_does_not_change_hash() {
    let exchange = exchange();
    let owner = KeyManager::from_hex(OWNER_KEY).unwrap();
    let agent = KeyManager::from_hex(AGENT_KEY).unwrap();

    let direct = SigningContext::new(&agent, NONCE, Network::Testnet);
    let on_behalf = direct.with_acting_account(Some(owner.address()));

    let a = exchange.limit_order(&order(), &direct).unwrap();
    let b = exchange.limit_order(&order(), &on_behalf).unwrap();
    assert_eq!(a.signing_hash, b.signing_hash);
    assert_eq!(a.signature, b.signature);
    assert!(a.user.is_none());
    assert!(b.user.is_some());
}

#[test]
fn test_self_acting_account_omits_user() {
    let exchange = exchange();
    let owner = KeyManager::from_hex(OWNER_KEY).unwrap();
    let ctx = SigningContext::new(&owner, NONCE, Network::Testnet)
        .with_acting_account(Some(owner.address()));

    let body = exchange.limit_order(&order(), &ctx).unwrap().to_json().unwrap();
    assert!(body.get("user").is_none());
}

#[tokio::test]
async fn test_agent_request_is_posted_with_user() {
    let exchange = exchange();
    let owner = KeyManager::from_hex(OWNER_KEY).unwrap();
    let agent = KeyManager::from_hex(AGENT_KEY).unwrap();
    let ctx = SigningContext::new(&agent, NONCE, Network::Testnet)
        .with_acting_account(Some(owner.address()));

    let request = exchange.cancel("DYDX", 42, &ctx).unwrap();
    let transport = RecordingTransport::ok();
    exchange.submit(&transport, &request).await.unwrap();

    let body = transport.last_body().unwrap();
    let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["action", "nonce", "signature", "vaultAddress", "expiresAfter", "user"]
    );
    assert_eq!(body["action"], serde_json::json!({"type": "cancel", "cancels": [{"a": 4, "o": 42}]}));
}
