use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LLM planner
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Settings for the chat-LLM the planner calls.
///
/// The credential is resolved from the environment variable named in
/// `api_key_env`. When that variable is unset the planner is disabled and
/// every request takes the deterministic fallback path immediately; no
/// call is attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "d_llm_key_env")]
    pub api_key_env: String,
    /// OpenAI-compatible chat completions endpoint root.
    #[serde(default = "d_llm_base_url")]
    pub base_url: String,
    #[serde(default = "d_llm_model")]
    pub model: String,
    /// Sampling temperature, passed through when set.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Response token cap, passed through when set.
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "d_20000u")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key_env: d_llm_key_env(),
            base_url: d_llm_base_url(),
            model: d_llm_model(),
            temperature: None,
            max_tokens: None,
            timeout_ms: 20_000,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_llm_key_env() -> String {
    "TG_LLM_API_KEY".into()
}

fn d_llm_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn d_llm_model() -> String {
    "gpt-4o-mini".into()
}

fn d_20000u() -> u64 {
    20_000
}
