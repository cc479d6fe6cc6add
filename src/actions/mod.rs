// src/actions/mod.rs

pub mod balance;
pub mod bridge;
pub mod swap;
pub mod transfer;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::provider::wallet::PRIVATE_KEY_SETTING;
use crate::runtime::{compose_context, AgentRuntime, Memory, State};

/// Outcome of one action invocation, returned directly to the host: a
/// user-facing text line plus structured content for the transcript.
#[derive(Debug, Clone)]
pub struct ActionResult {
    pub success: bool,
    pub text: String,
    pub content: Value,
}

impl ActionResult {
    pub fn ok(text: impl Into<String>, content: Value) -> Self {
        Self {
            success: true,
            text: text.into(),
            content,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            success: false,
            text: text.into(),
            content: Value::Null,
        }
    }
}

#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn handle(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: &State,
    ) -> ActionResult;

    /// Whether the action is usable with the current runtime settings. All
    /// wallet actions require a configured 0x-prefixed private key.
    fn validate(&self, runtime: &dyn AgentRuntime) -> bool {
        has_wallet_key(runtime)
    }
}

/// Precondition check, not a security boundary: the key's validity is only
/// established when the wallet provider is built.
pub fn has_wallet_key(runtime: &dyn AgentRuntime) -> bool {
    matches!(runtime.get_setting(PRIVATE_KEY_SETTING), Some(key) if key.starts_with("0x"))
}

/// One entry in the plugin's dispatch table.
pub struct Action {
    pub name: &'static str,
    pub description: &'static str,
    /// Alternate trigger phrases the host matches intents against.
    pub similes: &'static [&'static str],
    pub handler: Arc<dyn ActionHandler>,
}

impl Action {
    pub fn matches(&self, trigger: &str) -> bool {
        self.name.eq_ignore_ascii_case(trigger)
            || self.similes.iter().any(|s| s.eq_ignore_ascii_case(trigger))
    }

    pub fn is_available(&self, runtime: &dyn AgentRuntime) -> bool {
        self.handler.validate(runtime)
    }

    pub async fn run(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: &State,
    ) -> ActionResult {
        self.handler.handle(runtime, message, state).await
    }
}

/// Compose the template context, run the host model over it and deserialize
/// the extracted parameters. Failures come back as user-facing error text.
pub(crate) async fn extract_params<T: DeserializeOwned>(
    runtime: &dyn AgentRuntime,
    template: &str,
    state: &State,
) -> Result<T, ActionResult> {
    let context = compose_context(template, state);
    let raw = runtime
        .generate_object(&context)
        .await
        .map_err(|e| ActionResult::failure(format!("Error: {}", e)))?;
    debug!(%raw, "extracted action parameters");
    serde_json::from_value(raw)
        .map_err(|e| ActionResult::failure(format!("Error: could not parse request parameters: {}", e)))
}
