//! Plugin descriptor: action table, data providers, simile dispatch and the
//! availability gate.

use async_trait::async_trait;
use mockito::{mock, server_url, Matcher};
use serde_json::{json, Value};

use evm_agent_plugin::config::Settings;
use evm_agent_plugin::evm_plugin;
use evm_agent_plugin::runtime::{AgentRuntime, Memory, RuntimeError, State};

/// Runtime stub backed by the environment-style settings store.
struct SettingsRuntime {
    settings: Settings,
}

impl SettingsRuntime {
    fn new(pairs: &[(&str, &str)]) -> Self {
        let mut settings = Settings::default();
        for (key, value) in pairs {
            settings.set(*key, *value);
        }
        Self { settings }
    }
}

#[async_trait]
impl AgentRuntime for SettingsRuntime {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.settings.get(key).map(str::to_string)
    }

    async fn generate_object(&self, _context: &str) -> Result<Value, RuntimeError> {
        Err(RuntimeError::Generation("no model attached".to_string()))
    }
}

#[test]
fn plugin_exposes_all_wallet_actions() {
    let plugin = evm_plugin();
    assert_eq!(plugin.name, "evm");

    let names: Vec<&str> = plugin.actions.iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["transfer", "bridge", "swap", "balance"]);

    for action in &plugin.actions {
        assert!(!action.description.is_empty());
        assert!(!action.similes.is_empty());
    }

    let providers: Vec<&str> = plugin.providers.iter().map(|p| p.name).collect();
    assert_eq!(providers, vec!["wallet"]);
}

#[test]
fn actions_match_names_and_similes_case_insensitively() {
    let plugin = evm_plugin();

    assert_eq!(plugin.find_action("balance").unwrap().name, "balance");
    assert_eq!(plugin.find_action("GET_BALANCE").unwrap().name, "balance");
    assert_eq!(plugin.find_action("check_balance").unwrap().name, "balance");
    assert_eq!(plugin.find_action("SEND_TOKENS").unwrap().name, "transfer");
    assert_eq!(plugin.find_action("SWAP_TOKENS").unwrap().name, "swap");
    assert_eq!(plugin.find_action("BRIDGE_TOKENS").unwrap().name, "bridge");
    assert!(plugin.find_action("make coffee").is_none());
}

#[test]
fn actions_require_a_hex_prefixed_private_key() {
    let plugin = evm_plugin();

    let unconfigured = SettingsRuntime::new(&[]);
    let bad_key = SettingsRuntime::new(&[("EVM_PRIVATE_KEY", "deadbeef")]);
    let configured = SettingsRuntime::new(&[(
        "EVM_PRIVATE_KEY",
        "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
    )]);

    for action in &plugin.actions {
        assert!(!action.is_available(&unconfigured), "{}", action.name);
        assert!(!action.is_available(&bad_key), "{}", action.name);
        assert!(action.is_available(&configured), "{}", action.name);
    }
}

#[tokio::test]
async fn handler_surfaces_model_failures_as_error_results() {
    let runtime = SettingsRuntime::new(&[(
        "EVM_PRIVATE_KEY",
        "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
    )]);
    let plugin = evm_plugin();
    let action = plugin.find_action("balance").unwrap();

    let result = action
        .run(&runtime, &Default::default(), &Default::default())
        .await;

    assert!(!result.success);
    assert!(result.text.starts_with("Error:"));
    assert!(result.text.contains("model generation failed"));
}

/// Balance strings are pure functions of chain state: identical parameters
/// against identical state produce identical output.
struct FixedExtraction {
    inner: SettingsRuntime,
    extraction: Value,
}

#[async_trait]
impl AgentRuntime for FixedExtraction {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.inner.get_setting(key)
    }

    async fn generate_object(&self, _context: &str) -> Result<Value, RuntimeError> {
        Ok(self.extraction.clone())
    }
}

#[tokio::test]
async fn repeated_handler_errors_are_identical() {
    // Unsupported chain fails deterministically before any network call, so
    // two runs with identical parameters give identical results.
    let runtime = FixedExtraction {
        inner: SettingsRuntime::new(&[(
            "EVM_PRIVATE_KEY",
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
        )]),
        extraction: serde_json::json!({"chain": "dogecoin", "token": null, "address": null}),
    };
    let plugin = evm_plugin();
    let action = plugin.find_action("balance").unwrap();

    let first = action.run(&runtime, &Default::default(), &Default::default()).await;
    let second = action.run(&runtime, &Default::default(), &Default::default()).await;

    assert!(!first.success);
    assert_eq!(first.text, second.text);
}

#[tokio::test]
async fn wallet_provider_entry_formats_wallet_info() {
    let _m = mock("POST", "/")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("eth_getBalance".to_string()),
            Matcher::Regex("2c7536e3605d9c16a7a3d7b1898e529396a65c23".to_string()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(
            json!({"jsonrpc": "2.0", "id": 1, "result": "0x14d1120d7b160000"}).to_string(),
        )
        .create();

    let url = server_url();
    let runtime = SettingsRuntime::new(&[
        (
            "EVM_PRIVATE_KEY",
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
        ),
        ("EVM_DEFAULT_CHAIN", "sepolia"),
        ("ETHEREUM_PROVIDER_SEPOLIA", url.as_str()),
    ]);

    let plugin = evm_plugin();
    let info = plugin.providers[0]
        .get(&runtime, &Memory::default(), &State::default())
        .await
        .unwrap();

    assert_eq!(
        info,
        "EVM Wallet Address: 0x2c7536E3605D9C16a7a3D7b1898e529396a65c23\n\
         Balance: 1.5 ETH\n\
         Chain ID: 11155111, Name: sepolia"
    );

    // The host folds this into state; the templates' placeholder picks it up.
    let state = State {
        wallet_info: Some(info),
        ..State::default()
    };
    let composed = evm_agent_plugin::runtime::compose_context("{{walletInfo}}", &state);
    assert!(composed.contains("Balance: 1.5 ETH"));
}

#[tokio::test]
async fn wallet_provider_entry_yields_nothing_without_a_key() {
    let runtime = SettingsRuntime::new(&[]);
    let plugin = evm_plugin();

    let info = plugin.providers[0]
        .get(&runtime, &Memory::default(), &State::default())
        .await;

    assert!(info.is_none());
}

#[test]
fn settings_store_roundtrips_values() {
    let mut settings = Settings::default();
    settings.set("ETHEREUM_PROVIDER_SEPOLIA", "http://localhost:8545");
    assert_eq!(
        settings.get("ETHEREUM_PROVIDER_SEPOLIA"),
        Some("http://localhost:8545")
    );
}
