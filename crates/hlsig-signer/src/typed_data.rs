//! EIP-712 payloads.
//!
//! Exchange-native actions sign a phantom `Agent` whose `connectionId` is the
//! action hash. User-signed actions sign their own fields as one of the
//! [`eip712`] structs under a `HyperliquidTransaction:<Kind>` primary type.
//! The multi-sig envelope is signed the same way over the multi-sig action
//! hash.

use crate::action::Action;
use crate::error::{SignerError, SignerResult};
use alloy::primitives::{keccak256, Address, B256};
use alloy::sol;
use alloy::sol_types::{eip712_domain, Eip712Domain, SolStruct};
use hlsig_core::Network;
use serde_json::{json, Map, Value};

/// Phantom agent domain.
pub const AGENT_DOMAIN_NAME: &str = "Exchange";
pub const AGENT_DOMAIN_VERSION: &str = "1";
pub const AGENT_CHAIN_ID: u64 = 1337;

/// User-signed domain; its chain id comes from `signatureChainId`.
pub const USER_SIGNED_DOMAIN_NAME: &str = "HyperliquidSignTransaction";
pub const USER_SIGNED_DOMAIN_VERSION: &str = "1";

/// Default `signatureChainId` (Arbitrum Sepolia, 421614).
pub const DEFAULT_SIGNATURE_CHAIN_ID: &str = "0x66eee";

sol! {
    #[derive(Debug)]
    struct Agent {
        string source;
        bytes32 connectionId;
    }
}

pub fn agent_domain() -> Eip712Domain {
    eip712_domain! {
        name: AGENT_DOMAIN_NAME,
        version: AGENT_DOMAIN_VERSION,
        chain_id: AGENT_CHAIN_ID,
        verifying_contract: Address::ZERO,
    }
}

pub fn user_signed_domain(chain_id: u64) -> Eip712Domain {
    eip712_domain! {
        name: USER_SIGNED_DOMAIN_NAME,
        version: USER_SIGNED_DOMAIN_VERSION,
        chain_id: chain_id,
        verifying_contract: Address::ZERO,
    }
}

/// Parse `signatureChainId` (`0x`-hex or decimal).
pub fn parse_chain_id(raw: &str) -> SignerResult<u64> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(digits) => u64::from_str_radix(digits, 16),
        None => raw.parse(),
    };
    parsed.map_err(|e| SignerError::TypedData {
        field: "signatureChainId".to_string(),
        reason: format!("{raw}: {e}"),
    })
}

fn hex_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

fn domain_json(name: &str, version: &str, chain_id: u64) -> Value {
    json!({
        "name": name,
        "version": version,
        "chainId": chain_id,
        "verifyingContract": hex_address(&Address::ZERO),
    })
}

fn domain_types() -> Value {
    json!([
        {"name": "name", "type": "string"},
        {"name": "version", "type": "string"},
        {"name": "chainId", "type": "uint256"},
        {"name": "verifyingContract", "type": "address"},
    ])
}

// =============================================================================
// Phantom agent
// =============================================================================

/// Stand-in signing target for exchange-native actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhantomAgent {
    /// "a" (mainnet) or "b" (testnet)
    pub source: &'static str,
    /// The action hash.
    pub connection_id: B256,
}

impl PhantomAgent {
    pub fn new(action_hash: B256, network: Network) -> Self {
        Self {
            source: network.phantom_source(),
            connection_id: action_hash,
        }
    }

    fn agent(&self) -> Agent {
        Agent {
            source: self.source.to_string(),
            connectionId: self.connection_id,
        }
    }

    /// `keccak256(0x1901 || domainSeparator || hashStruct(agent))`
    pub fn signing_hash(&self) -> B256 {
        self.agent().eip712_signing_hash(&agent_domain())
    }

    pub fn to_typed_json(&self) -> Value {
        json!({
            "types": {
                "EIP712Domain": domain_types(),
                "Agent": [
                    {"name": "source", "type": "string"},
                    {"name": "connectionId", "type": "bytes32"},
                ],
            },
            "primaryType": "Agent",
            "domain": domain_json(AGENT_DOMAIN_NAME, AGENT_DOMAIN_VERSION, AGENT_CHAIN_ID),
            "message": {
                "source": self.source,
                "connectionId": format!("0x{}", hex::encode(self.connection_id)),
            },
        })
    }
}

// =============================================================================
// User-signed structs
// =============================================================================

/// Prefix of every user-signed primary type.
pub const USER_SIGNED_TYPE_PREFIX: &str = "HyperliquidTransaction:";

/// User-signed message structs.
///
/// Field order is the EIP-712 encoding order. The Solidity struct names lack
/// the `HyperliquidTransaction:` prefix (not a legal identifier), so the
/// type hash is recomputed over the prefixed `encodeType` string while the
/// field encoding stays alloy's.
pub mod eip712 {
    use alloy::sol;

    sol! {
        struct UsdSend {
            string hyperliquidChain;
            string destination;
            string amount;
            uint64 time;
        }

        struct SpotSend {
            string hyperliquidChain;
            string destination;
            string token;
            string amount;
            uint64 time;
        }

        struct Withdraw {
            string hyperliquidChain;
            string destination;
            string amount;
            uint64 time;
        }

        struct UsdClassTransfer {
            string hyperliquidChain;
            string amount;
            bool toPerp;
            uint64 nonce;
        }

        struct SendAsset {
            string hyperliquidChain;
            string destination;
            string sourceDex;
            string destinationDex;
            string token;
            string amount;
            string fromSubAccount;
            uint64 nonce;
        }

        struct TokenDelegate {
            string hyperliquidChain;
            address validator;
            uint64 wei;
            bool isUndelegate;
            uint64 nonce;
        }

        struct ApproveAgent {
            string hyperliquidChain;
            address agentAddress;
            string agentName;
            uint64 nonce;
        }

        struct ApproveBuilderFee {
            string hyperliquidChain;
            string maxFeeRate;
            address builder;
            uint64 nonce;
        }

        struct ConvertToMultiSigUser {
            string hyperliquidChain;
            string signers;
            uint64 nonce;
        }

        struct SendMultiSig {
            string hyperliquidChain;
            bytes32 multiSigActionHash;
            uint64 nonce;
        }
    }
}

/// `HyperliquidTransaction:Name(type1 name1,...)` for the struct `S`.
pub fn prefixed_encode_type<S: SolStruct>() -> String {
    format!("{USER_SIGNED_TYPE_PREFIX}{}", S::eip712_encode_type())
}

/// `(type, name)` pairs of an `encodeType` string such as `Name(string a,uint64 b)`.
fn struct_fields(encode_type: &str) -> Vec<(String, String)> {
    let inner = encode_type
        .split_once('(')
        .map(|(_, rest)| rest.trim_end_matches(')'))
        .unwrap_or_default();
    inner
        .split(',')
        .filter_map(|field| field.split_once(' '))
        .map(|(ty, name)| (ty.to_string(), name.to_string()))
        .collect()
}

fn parse_address(field: &str, raw: &str) -> SignerResult<Address> {
    raw.parse::<Address>().map_err(|e| SignerError::TypedData {
        field: field.to_string(),
        reason: format!("{raw}: {e}"),
    })
}

// =============================================================================
// User-signed payload
// =============================================================================

/// Typed data of a user-signed action, with the message struct already
/// encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSignedPayload {
    /// `HyperliquidTransaction:<Kind>`
    pub primary_type: String,
    /// Domain chain id, from `signatureChainId`.
    pub chain_id: u64,
    /// `(type, name)` in encoding order.
    pub fields: Vec<(String, String)>,
    type_hash: B256,
    encoded_data: Vec<u8>,
    message: Map<String, Value>,
}

impl UserSignedPayload {
    /// `message` supplies the JSON rendering of the struct's fields; only
    /// `agentName` may be absent and renders as `""`.
    fn new<S: SolStruct>(chain_id: u64, value: &S, message: &Map<String, Value>) -> Self {
        let fields = struct_fields(&S::eip712_root_type());
        let message = fields
            .iter()
            .map(|(_, name)| {
                let rendered = match message.get(name) {
                    Some(Value::Null) | None => Value::String(String::new()),
                    Some(v) => v.clone(),
                };
                (name.clone(), rendered)
            })
            .collect();

        Self {
            primary_type: format!("{USER_SIGNED_TYPE_PREFIX}{}", S::NAME),
            chain_id,
            fields,
            type_hash: keccak256(prefixed_encode_type::<S>().as_bytes()),
            encoded_data: value.eip712_encode_data(),
            message,
        }
    }

    fn from_struct<S: SolStruct>(
        signature_chain_id: &str,
        value: &S,
        action: &Action,
    ) -> SignerResult<Self> {
        let chain_id = parse_chain_id(signature_chain_id)?;
        let json = serde_json::to_value(action).map_err(|e| SignerError::Serialization {
            step: "typed-data",
            reason: e.to_string(),
        })?;
        let object = json.as_object().ok_or_else(|| SignerError::Serialization {
            step: "typed-data",
            reason: format!("{} did not serialize to an object", action.type_name()),
        })?;
        Ok(Self::new(chain_id, value, object))
    }

    /// Payload of a user-signed action, `None` for everything else.
    ///
    /// `signatureChainId` becomes the domain chain id; it is not part of
    /// the message.
    pub fn from_action(action: &Action) -> SignerResult<Option<Self>> {
        let payload = match action {
            Action::UsdSend(a) => Self::from_struct(
                &a.signature_chain_id,
                &eip712::UsdSend {
                    hyperliquidChain: a.hyperliquid_chain.clone(),
                    destination: a.destination.clone(),
                    amount: a.amount.clone(),
                    time: a.time,
                },
                action,
            )?,
            Action::SpotSend(a) => Self::from_struct(
                &a.signature_chain_id,
                &eip712::SpotSend {
                    hyperliquidChain: a.hyperliquid_chain.clone(),
                    destination: a.destination.clone(),
                    token: a.token.clone(),
                    amount: a.amount.clone(),
                    time: a.time,
                },
                action,
            )?,
            Action::Withdraw(a) => Self::from_struct(
                &a.signature_chain_id,
                &eip712::Withdraw {
                    hyperliquidChain: a.hyperliquid_chain.clone(),
                    destination: a.destination.clone(),
                    amount: a.amount.clone(),
                    time: a.time,
                },
                action,
            )?,
            Action::UsdClassTransfer(a) => Self::from_struct(
                &a.signature_chain_id,
                &eip712::UsdClassTransfer {
                    hyperliquidChain: a.hyperliquid_chain.clone(),
                    amount: a.amount.clone(),
                    toPerp: a.to_perp,
                    nonce: a.nonce,
                },
                action,
            )?,
            Action::SendAsset(a) => Self::from_struct(
                &a.signature_chain_id,
                &eip712::SendAsset {
                    hyperliquidChain: a.hyperliquid_chain.clone(),
                    destination: a.destination.clone(),
                    sourceDex: a.source_dex.clone(),
                    destinationDex: a.destination_dex.clone(),
                    token: a.token.clone(),
                    amount: a.amount.clone(),
                    fromSubAccount: a.from_sub_account.clone(),
                    nonce: a.nonce,
                },
                action,
            )?,
            Action::TokenDelegate(a) => Self::from_struct(
                &a.signature_chain_id,
                &eip712::TokenDelegate {
                    hyperliquidChain: a.hyperliquid_chain.clone(),
                    validator: parse_address("validator", &a.validator)?,
                    wei: a.wei,
                    isUndelegate: a.is_undelegate,
                    nonce: a.nonce,
                },
                action,
            )?,
            Action::ApproveAgent(a) => Self::from_struct(
                &a.signature_chain_id,
                &eip712::ApproveAgent {
                    hyperliquidChain: a.hyperliquid_chain.clone(),
                    agentAddress: parse_address("agentAddress", &a.agent_address)?,
                    agentName: a.agent_name.clone().unwrap_or_default(),
                    nonce: a.nonce,
                },
                action,
            )?,
            Action::ApproveBuilderFee(a) => Self::from_struct(
                &a.signature_chain_id,
                &eip712::ApproveBuilderFee {
                    hyperliquidChain: a.hyperliquid_chain.clone(),
                    maxFeeRate: a.max_fee_rate.clone(),
                    builder: parse_address("builder", &a.builder)?,
                    nonce: a.nonce,
                },
                action,
            )?,
            Action::ConvertToMultiSigUser(a) => Self::from_struct(
                &a.signature_chain_id,
                &eip712::ConvertToMultiSigUser {
                    hyperliquidChain: a.hyperliquid_chain.clone(),
                    signers: a.signers.clone(),
                    nonce: a.nonce,
                },
                action,
            )?,
            Action::Order(_)
            | Action::Cancel(_)
            | Action::CancelByCloid(_)
            | Action::Modify(_)
            | Action::BatchModify(_)
            | Action::CancelAll
            | Action::ScheduleCancel(_)
            | Action::UpdateLeverage(_)
            | Action::UpdateIsolatedMargin(_)
            | Action::VaultTransfer(_)
            | Action::CreateSubAccount(_)
            | Action::SubAccountTransfer(_)
            | Action::SetReferrer(_)
            | Action::EvmUserModify(_)
            | Action::Noop
            | Action::MultiSig(_) => return Ok(None),
        };
        Ok(Some(payload))
    }

    /// Envelope the submitting signer signs over a multi-sig action's hash.
    pub fn multi_sig_envelope(
        signature_chain_id: &str,
        network: Network,
        multi_sig_action_hash: B256,
        nonce: u64,
    ) -> SignerResult<Self> {
        let chain_id = parse_chain_id(signature_chain_id)?;
        let mut message = Map::new();
        message.insert("hyperliquidChain".to_string(), network.chain_name().into());
        message.insert(
            "multiSigActionHash".to_string(),
            format!("0x{}", hex::encode(multi_sig_action_hash)).into(),
        );
        message.insert("nonce".to_string(), nonce.into());

        let envelope = eip712::SendMultiSig {
            hyperliquidChain: network.chain_name().to_string(),
            multiSigActionHash: multi_sig_action_hash,
            nonce,
        };
        Ok(Self::new(chain_id, &envelope, &message))
    }

    /// `keccak256(typeHash || encodeData)` with the prefixed type hash.
    pub fn hash_struct(&self) -> B256 {
        let mut data = Vec::with_capacity(32 + self.encoded_data.len());
        data.extend_from_slice(self.type_hash.as_slice());
        data.extend_from_slice(&self.encoded_data);
        keccak256(&data)
    }

    /// `keccak256(0x1901 || domainSeparator || hashStruct)`
    pub fn signing_hash(&self) -> B256 {
        let mut data = Vec::with_capacity(66);
        data.extend_from_slice(&[0x19, 0x01]);
        data.extend_from_slice(user_signed_domain(self.chain_id).separator().as_slice());
        data.extend_from_slice(self.hash_struct().as_slice());
        keccak256(&data)
    }

    pub fn to_typed_json(&self) -> Value {
        let fields: Vec<Value> = self
            .fields
            .iter()
            .map(|(ty, name)| json!({"name": name, "type": ty}))
            .collect();

        let mut types = Map::new();
        types.insert("EIP712Domain".to_string(), domain_types());
        types.insert(self.primary_type.clone(), Value::Array(fields));

        json!({
            "types": types,
            "primaryType": self.primary_type,
            "domain": domain_json(USER_SIGNED_DOMAIN_NAME, USER_SIGNED_DOMAIN_VERSION, self.chain_id),
            "message": self.message,
        })
    }
}

// =============================================================================
// Payload
// =============================================================================

/// What actually gets signed for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedPayload {
    Agent(PhantomAgent),
    UserSigned(UserSignedPayload),
}

impl TypedPayload {
    pub fn signing_hash(&self) -> B256 {
        match self {
            Self::Agent(agent) => agent.signing_hash(),
            Self::UserSigned(payload) => payload.signing_hash(),
        }
    }

    /// `eth_signTypedData_v4` document for external wallets.
    pub fn to_typed_json(&self) -> Value {
        match self {
            Self::Agent(agent) => agent.to_typed_json(),
            Self::UserSigned(payload) => payload.to_typed_json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ApproveAgent, UsdSend, Withdraw};

    const EIP712_DOMAIN_TYPE: &str =
        "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

    fn usd_send() -> Action {
        Action::UsdSend(UsdSend {
            signature_chain_id: "0x66eee".to_string(),
            hyperliquid_chain: "Testnet".to_string(),
            destination: "0x0d1d9635d0640821d15e323ac8adadfa9c111414".to_string(),
            amount: "1".to_string(),
            time: 1687816341423,
        })
    }

    fn payload(action: &Action) -> UserSignedPayload {
        UserSignedPayload::from_action(action).unwrap().unwrap()
    }

    #[test]
    fn test_phantom_agent_source() {
        let hash = B256::repeat_byte(0xab);
        assert_eq!(PhantomAgent::new(hash, Network::Mainnet).source, "a");
        assert_eq!(PhantomAgent::new(hash, Network::Testnet).source, "b");
    }

    /// Domain separator and struct hash computed by hand must match alloy.
    #[test]
    fn test_eip712_domain_separator() {
        let domain_separator = agent_domain().hash_struct();

        let action_hash: B256 = "0xf01fa6eaca0b8cbd2afe65f8852a2e00d35eae3d19560ece9b8a28614646e849"
            .parse()
            .unwrap();
        let agent = PhantomAgent::new(action_hash, Network::Testnet);

        let mut domain_data = Vec::new();
        domain_data.extend_from_slice(keccak256(EIP712_DOMAIN_TYPE.as_bytes()).as_slice());
        domain_data.extend_from_slice(keccak256(AGENT_DOMAIN_NAME.as_bytes()).as_slice());
        domain_data.extend_from_slice(keccak256(AGENT_DOMAIN_VERSION.as_bytes()).as_slice());
        let mut chain_id_bytes = [0u8; 32];
        chain_id_bytes[24..].copy_from_slice(&AGENT_CHAIN_ID.to_be_bytes());
        domain_data.extend_from_slice(&chain_id_bytes);
        domain_data.extend_from_slice(&[0u8; 32]);
        assert_eq!(domain_separator, keccak256(&domain_data));
        assert_eq!(agent_domain().separator(), domain_separator);

        let mut struct_data = Vec::new();
        struct_data
            .extend_from_slice(keccak256(b"Agent(string source,bytes32 connectionId)").as_slice());
        struct_data.extend_from_slice(keccak256(b"b").as_slice());
        struct_data.extend_from_slice(action_hash.as_slice());
        let struct_hash = keccak256(&struct_data);
        assert_eq!(agent.agent().eip712_hash_struct(), struct_hash);

        let mut digest = vec![0x19, 0x01];
        digest.extend_from_slice(domain_separator.as_slice());
        digest.extend_from_slice(struct_hash.as_slice());
        assert_eq!(agent.signing_hash(), keccak256(&digest));
    }

    #[test]
    fn test_phantom_agent_signing_hash_vectors() {
        let hash: B256 = "0x0e7a0ea5edc9b6f194973563a6bb9098aa5e25f28a036d42b8f3156692179286"
            .parse()
            .unwrap();
        assert_eq!(
            hex::encode(PhantomAgent::new(hash, Network::Testnet).signing_hash()),
            "cdc27ff36b46686a581365a8f7adcd54f1172628e829779d8aa270ad7e440c74"
        );
        assert_eq!(
            hex::encode(PhantomAgent::new(hash, Network::Mainnet).signing_hash()),
            "da2babea0f79b6e26e92944e9fb3a1275cc508bb5eab660b0ca70dfc4d5bf954"
        );
    }

    #[test]
    fn test_prefixed_encode_type() {
        assert_eq!(
            prefixed_encode_type::<eip712::UsdSend>(),
            "HyperliquidTransaction:UsdSend(string hyperliquidChain,string destination,string amount,uint64 time)"
        );
        assert_eq!(
            prefixed_encode_type::<eip712::ApproveAgent>(),
            "HyperliquidTransaction:ApproveAgent(string hyperliquidChain,address agentAddress,string agentName,uint64 nonce)"
        );
        assert_eq!(
            prefixed_encode_type::<eip712::SendMultiSig>(),
            "HyperliquidTransaction:SendMultiSig(string hyperliquidChain,bytes32 multiSigActionHash,uint64 nonce)"
        );
    }

    /// Only the type hash differs from alloy's own struct hash.
    #[test]
    fn test_hash_struct_overrides_type_name_only() {
        let send = eip712::UsdSend {
            hyperliquidChain: "Testnet".to_string(),
            destination: "0x0d1d9635d0640821d15e323ac8adadfa9c111414".to_string(),
            amount: "1".to_string(),
            time: 1687816341423,
        };
        let payload = payload(&usd_send());
        assert_eq!(payload.encoded_data, send.eip712_encode_data());
        assert_ne!(payload.hash_struct(), send.eip712_hash_struct());

        let mut manual = keccak256(prefixed_encode_type::<eip712::UsdSend>().as_bytes()).to_vec();
        manual.extend_from_slice(&send.eip712_encode_data());
        assert_eq!(payload.hash_struct(), keccak256(&manual));
    }

    #[test]
    fn test_parse_chain_id() {
        assert_eq!(parse_chain_id("0x66eee").unwrap(), 421614);
        assert_eq!(parse_chain_id("0xa4b1").unwrap(), 42161);
        assert_eq!(parse_chain_id("1337").unwrap(), 1337);
        assert!(matches!(
            parse_chain_id("0xnope"),
            Err(SignerError::TypedData { .. })
        ));
    }

    #[test]
    fn test_usd_send_signing_hash() {
        let payload = payload(&usd_send());
        assert_eq!(payload.chain_id, 421614);
        assert_eq!(payload.primary_type, "HyperliquidTransaction:UsdSend");
        assert_eq!(
            hex::encode(payload.signing_hash()),
            "7567ddd9f82be3a125e0cc0bbf76069c1922195b1d1c509edfcebae45c82c798"
        );
    }

    #[test]
    fn test_unnamed_agent_signs_empty_name() {
        let action = Action::ApproveAgent(ApproveAgent {
            signature_chain_id: "0x66eee".to_string(),
            hyperliquid_chain: "Testnet".to_string(),
            agent_address: "0x0d1d9635d0640821d15e323ac8adadfa9c111414".to_string(),
            agent_name: None,
            nonce: 1687816341423,
        });
        let payload = payload(&action);
        assert_eq!(payload.to_typed_json()["message"]["agentName"], "");
        assert_eq!(
            hex::encode(payload.signing_hash()),
            "70340584332575c3b2ed85ff4a37b58c18da796d4d526b16d846cca745e49f19"
        );
    }

    #[test]
    fn test_withdraw_signing_hash_mainnet() {
        let action = Action::Withdraw(Withdraw {
            signature_chain_id: "0x66eee".to_string(),
            hyperliquid_chain: "Mainnet".to_string(),
            destination: "0x5e9ee1089755c3435139848e47e6635505d5a13a".to_string(),
            amount: "1".to_string(),
            time: 1687816341423,
        });
        assert_eq!(
            hex::encode(payload(&action).signing_hash()),
            "a839ad8096ec1d2ea72ed4a323af626c1bf55525a211058a644506fc0daa5c86"
        );
    }

    #[test]
    fn test_bad_address_field() {
        let action = Action::ApproveAgent(ApproveAgent {
            signature_chain_id: "0x66eee".to_string(),
            hyperliquid_chain: "Testnet".to_string(),
            agent_address: "not-an-address".to_string(),
            agent_name: Some("bot".to_string()),
            nonce: 1,
        });
        let err = UserSignedPayload::from_action(&action).unwrap_err();
        assert!(matches!(err, SignerError::TypedData { field, .. } if field == "agentAddress"));
    }

    #[test]
    fn test_exchange_native_has_no_user_payload() {
        assert!(UserSignedPayload::from_action(&Action::Noop).unwrap().is_none());
        assert!(UserSignedPayload::from_action(&Action::CancelAll)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_multi_sig_envelope() {
        let hash = B256::repeat_byte(0x5a);
        let envelope =
            UserSignedPayload::multi_sig_envelope("0x66eee", Network::Mainnet, hash, 42).unwrap();
        assert_eq!(envelope.primary_type, "HyperliquidTransaction:SendMultiSig");
        assert_eq!(envelope.chain_id, 421614);

        let doc = envelope.to_typed_json();
        assert_eq!(doc["message"]["hyperliquidChain"], "Mainnet");
        assert_eq!(doc["message"]["multiSigActionHash"], format!("0x{}", "5a".repeat(32)));
        assert_eq!(doc["message"]["nonce"], 42);

        let other =
            UserSignedPayload::multi_sig_envelope("0x66eee", Network::Testnet, hash, 42).unwrap();
        assert_ne!(envelope.signing_hash(), other.signing_hash());
    }

    #[test]
    fn test_user_signed_typed_json() {
        let doc = TypedPayload::UserSigned(payload(&usd_send())).to_typed_json();

        assert_eq!(doc["primaryType"], "HyperliquidTransaction:UsdSend");
        assert_eq!(doc["domain"]["chainId"], 421614);
        assert_eq!(doc["domain"]["name"], "HyperliquidSignTransaction");
        assert_eq!(
            doc["domain"]["verifyingContract"],
            "0x0000000000000000000000000000000000000000"
        );
        assert_eq!(doc["message"]["time"], 1687816341423u64);
        assert_eq!(doc["message"]["hyperliquidChain"], "Testnet");
        // signatureChainId is domain-only
        assert!(doc["message"].get("signatureChainId").is_none());
        assert_eq!(
            doc["types"]["HyperliquidTransaction:UsdSend"][3],
            json!({"name": "time", "type": "uint64"})
        );
    }

    #[test]
    fn test_agent_typed_json() {
        let agent = PhantomAgent::new(B256::repeat_byte(0x11), Network::Mainnet);
        let doc = TypedPayload::Agent(agent).to_typed_json();
        assert_eq!(doc["primaryType"], "Agent");
        assert_eq!(doc["domain"]["chainId"], 1337);
        assert_eq!(doc["message"]["source"], "a");
        assert_eq!(
            doc["message"]["connectionId"],
            format!("0x{}", "11".repeat(32))
        );
    }
}
