//! Wingman relay — one query in, one reply string out.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::{DEFAULT_THINKING_BUDGET, WingmanConfig};
use crate::error::LlmError;
use crate::llm::{ChatMessage, CompletionRequest, LlmConfig, LlmProvider, create_provider};

use super::prompts::frame_prompt;

/// Reply when no API key was provided.
pub const NOT_CONFIGURED_REPLY: &str = "API Key not configured. Please check your settings.";

/// Reply when the service answered without any text.
pub const UNPROCESSED_REPLY: &str =
    "I copy, but I couldn't process that request. Please say again.";

/// Reply when the service could not be reached or returned an error.
pub const COMMUNICATION_FAILURE_REPLY: &str =
    "Communication failure. Unable to reach Wingman AI services at this time.";

/// Forwards user queries to the text-generation service.
///
/// Holds no per-call state, so one relay can be shared behind an `Arc` and
/// called concurrently. Every call makes a single attempt and always
/// resolves to a displayable string.
pub struct WingmanRelay {
    llm: Option<Arc<dyn LlmProvider>>,
    thinking_budget: Option<u32>,
}

impl WingmanRelay {
    /// Create a relay backed by the given provider.
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm: Some(llm),
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
        }
    }

    /// Create a relay with no credential. Every call answers `NOT_CONFIGURED_REPLY`.
    pub fn unconfigured() -> Self {
        Self {
            llm: None,
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
        }
    }

    /// Build a relay from configuration. A missing API key yields an
    /// unconfigured relay rather than an error.
    pub fn from_config(config: &WingmanConfig) -> Result<Self, LlmError> {
        let relay = match &config.api_key {
            Some(api_key) => {
                let llm = create_provider(&LlmConfig {
                    api_key: api_key.clone(),
                    model: config.model.clone(),
                    api_base: config.api_base.clone(),
                })?;
                Self::new(llm)
            }
            None => {
                warn!("No API key configured; Wingman will answer with a setup notice");
                Self::unconfigured()
            }
        };
        Ok(relay.with_thinking_budget(config.thinking_budget))
    }

    /// Override the thinking budget sent with each request.
    pub fn with_thinking_budget(mut self, budget: Option<u32>) -> Self {
        self.thinking_budget = budget;
        self
    }

    /// Whether a provider is available.
    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Ask Wingman a question.
    ///
    /// `_history` is accepted for interface compatibility with chat callers
    /// and is not sent; each request carries only the framed prompt.
    pub async fn ask(&self, prompt: &str, _history: &[String]) -> String {
        let Some(llm) = &self.llm else {
            warn!("Wingman query dropped: no API key configured");
            return NOT_CONFIGURED_REPLY.to_string();
        };

        let request = CompletionRequest::new(vec![ChatMessage::user(frame_prompt(prompt))])
            .with_thinking_budget(self.thinking_budget);

        match llm.complete(request).await {
            Ok(response) if response.content.is_empty() => {
                debug!(
                    model = llm.model_name(),
                    finish_reason = ?response.finish_reason,
                    "Wingman returned no text"
                );
                UNPROCESSED_REPLY.to_string()
            }
            Ok(response) => {
                debug!(
                    model = llm.model_name(),
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    "Wingman replied"
                );
                response.content
            }
            Err(e) => {
                error!(model = llm.model_name(), error = %e, "Gemini API error");
                COMMUNICATION_FAILURE_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::llm::{CompletionResponse, FinishReason, Role};
    use crate::wingman::prompts::QUERY_LABEL;

    enum Behaviour {
        Reply(&'static str),
        Fail,
        /// Answer with the text that follows the query label, after a delay
        /// that depends on the query length.
        EchoQuery,
    }

    struct StubLlm {
        behaviour: Behaviour,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl StubLlm {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    fn response(content: &str) -> CompletionResponse {
        CompletionResponse {
            content: content.to_string(),
            input_tokens: 0,
            output_tokens: 0,
            finish_reason: FinishReason::Stop,
            response_id: None,
        }
    }

    #[async_trait]
    impl LlmProvider for StubLlm {
        fn model_name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            match self.behaviour {
                Behaviour::Reply(text) => Ok(response(text)),
                Behaviour::Fail => Err(LlmError::RequestFailed {
                    provider: "stub".to_string(),
                    reason: "connection refused".to_string(),
                }),
                Behaviour::EchoQuery => {
                    let framed = &request.messages[0].content;
                    let query = framed
                        .rsplit_once(QUERY_LABEL)
                        .map(|(_, q)| q.to_string())
                        .unwrap_or_default();
                    // Longer queries finish first.
                    let delay = 50u64.saturating_sub(query.len() as u64);
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    Ok(response(&format!("echo: {query}")))
                }
            }
        }
    }

    #[tokio::test]
    async fn test_returns_generated_text_unchanged() {
        let llm = StubLlm::new(Behaviour::Reply(
            "45 minutes day, 30 minutes night per FAR 91.151",
        ));
        let relay = WingmanRelay::new(llm.clone());

        let reply = relay
            .ask("What is the minimum fuel reserve under VFR?", &[])
            .await;
        assert_eq!(reply, "45 minutes day, 30 minutes night per FAR 91.151");
    }

    #[tokio::test]
    async fn test_empty_text_yields_unprocessed_reply() {
        let relay = WingmanRelay::new(StubLlm::new(Behaviour::Reply("")));
        assert_eq!(relay.ask("Say again?", &[]).await, UNPROCESSED_REPLY);
    }

    #[tokio::test]
    async fn test_provider_error_yields_communication_failure() {
        let relay = WingmanRelay::new(StubLlm::new(Behaviour::Fail));
        assert_eq!(
            relay.ask("Radio check", &[]).await,
            COMMUNICATION_FAILURE_REPLY
        );
    }

    #[tokio::test]
    async fn test_unconfigured_relay_short_circuits() {
        let relay = WingmanRelay::unconfigured();
        assert!(!relay.is_configured());
        assert_eq!(relay.ask("Anyone there?", &[]).await, NOT_CONFIGURED_REPLY);
    }

    #[tokio::test]
    async fn test_from_config_without_key_is_unconfigured() {
        let relay = WingmanRelay::from_config(&WingmanConfig::default()).unwrap();
        assert!(!relay.is_configured());
    }

    #[tokio::test]
    async fn test_sends_single_framed_user_message_with_thinking_off() {
        let llm = StubLlm::new(Behaviour::Reply("ok"));
        let relay = WingmanRelay::new(llm.clone());
        let history = vec!["earlier question".to_string(), "earlier answer".to_string()];

        relay.ask("Explain density altitude", &history).await;

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(
            request.messages[0].content,
            frame_prompt("Explain density altitude")
        );
        assert!(!request.messages[0].content.contains("earlier question"));
        assert_eq!(request.thinking_budget, Some(0));
    }

    #[tokio::test]
    async fn test_thinking_budget_override() {
        let llm = StubLlm::new(Behaviour::Reply("ok"));
        let relay = WingmanRelay::new(llm.clone()).with_thinking_budget(None);
        relay.ask("q", &[]).await;
        assert_eq!(llm.requests()[0].thinking_budget, None);
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let llm = StubLlm::new(Behaviour::Fail);
        let relay = WingmanRelay::new(llm.clone());
        relay.ask("q", &[]).await;
        assert_eq!(llm.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_calls_do_not_cross_talk() {
        let relay = Arc::new(WingmanRelay::new(StubLlm::new(Behaviour::EchoQuery)));

        let (a, b, c) = tokio::join!(
            relay.ask("a", &[]),
            relay.ask("crosswind limits for a C172", &[]),
            relay.ask("", &[]),
        );

        assert_eq!(a, "echo: a");
        assert_eq!(b, "echo: crosswind limits for a C172");
        // A blank prompt still reaches the provider when called directly.
        assert_eq!(c, "echo: ");
    }
}
