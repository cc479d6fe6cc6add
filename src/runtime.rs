// src/runtime.rs
//! Abstraction over the host agent runtime. The host owns the language model
//! and the conversation transcript; the plugin only needs settings lookup and
//! structured-object generation against a prompt context.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::chains::supported_chain_list;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("model generation failed: {0}")]
    Generation(String),
    #[error("model output is not valid JSON: {0}")]
    InvalidOutput(String),
}

/// Host runtime surface consumed by action handlers.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Look up a runtime setting (e.g. `EVM_PRIVATE_KEY`).
    fn get_setting(&self, key: &str) -> Option<String>;

    /// Run the host's language model over a composed context and return the
    /// structured JSON object it extracted.
    async fn generate_object(&self, context: &str) -> Result<Value, RuntimeError>;
}

/// Data provider surface: supplies a block of context text the host injects
/// into conversation state before composing action prompts. Returns `None`
/// when the data cannot be produced (e.g. no wallet configured).
#[async_trait]
pub trait StateProvider: Send + Sync {
    async fn get(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: &State,
    ) -> Option<String>;
}

/// Incoming message that triggered the action.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    pub text: String,
}

/// Conversation state the host carries between turns.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub recent_messages: String,
    pub wallet_info: Option<String>,
}

/// Fill a template's placeholders from the conversation state and the static
/// chain table.
pub fn compose_context(template: &str, state: &State) -> String {
    template
        .replace("{{recentMessages}}", &state.recent_messages)
        .replace("{{walletInfo}}", state.wallet_info.as_deref().unwrap_or(""))
        .replace("{{supportedChains}}", &supported_chain_list())
}

/// Pull the first JSON object out of model output. Handles both bare JSON and
/// fenced ```json blocks; hosts can use this when implementing
/// [`AgentRuntime::generate_object`] over a raw-text model.
pub fn extract_json_block(text: &str) -> Option<Value> {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + 7..];
        if let Some(end) = rest.find("```") {
            if let Ok(value) = serde_json::from_str(rest[..end].trim()) {
                return Some(value);
            }
        }
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(text[start..=end].trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_template_placeholders() {
        let state = State {
            recent_messages: "What's my ETH balance?".to_string(),
            wallet_info: Some("0xabc".to_string()),
        };
        let out = compose_context(
            "msgs: {{recentMessages}} wallet: {{walletInfo}} chains: {{supportedChains}}",
            &state,
        );
        assert!(out.contains("What's my ETH balance?"));
        assert!(out.contains("wallet: 0xabc"));
        assert!(out.contains("\"sepolia\""));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn missing_wallet_info_renders_empty() {
        let out = compose_context("[{{walletInfo}}]", &State::default());
        assert_eq!(out, "[]");
    }

    #[test]
    fn extracts_fenced_json() {
        let text = "<analysis>ok</analysis>\n```json\n{\"chain\": \"sepolia\", \"token\": null}\n```";
        let value = extract_json_block(text).unwrap();
        assert_eq!(value["chain"], "sepolia");
        assert!(value["token"].is_null());
    }

    #[test]
    fn extracts_bare_json() {
        let value = extract_json_block("here you go {\"a\": 1} thanks").unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn returns_none_without_json() {
        assert!(extract_json_block("no json here").is_none());
    }
}
