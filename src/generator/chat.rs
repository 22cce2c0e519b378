//! Free-form chat with a single design agent

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::generator::agents::{Agent, AgentName, AgentRegistry};
use crate::llm::client::{ChatMessage, CompletionOptions, CompletionProvider};

pub const CHAT_TEMPERATURE: f64 = 0.6;
pub const CHAT_MAX_TOKENS: u32 = 1024;

/// Follow-up actions offered with every reply
pub const SUGGESTIONS: [&str; 4] = [
    "Adjust colors and styling",
    "Modify layout structure",
    "Add interactive features",
    "Export the design",
];

/// Keyword table, checked in order; the first row with a hit decides
const ROUTES: [(&[&str], &str); 4] = [
    (&["color", "style", "theme"], AgentName::STYLE_CURATOR),
    (&["layout", "structure", "component"], AgentName::ARCHITECT),
    (&["code", "implement", "function"], AgentName::CODE_GENERATOR),
    (&["accessibility", "quality", "test"], AgentName::QA_SPECIALIST),
];

/// Pick the agent best suited to answer `message`
pub fn route_agent(message: &str) -> &'static str {
    let lowered = message.to_lowercase();
    ROUTES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, agent)| *agent)
        .unwrap_or(AgentName::DEFAULT)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatReply {
    pub message: String,
    pub agent: String,
    pub suggestions: Vec<String>,
}

/// A routed chat turn ready to be sent
pub struct PreparedChat<'a> {
    pub agent: &'a Agent,
    pub messages: Vec<ChatMessage>,
    pub options: CompletionOptions,
}

impl PreparedChat<'_> {
    pub fn into_reply(self, text: String) -> ChatReply {
        ChatReply {
            message: text,
            agent: self.agent.name.clone(),
            suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Clone)]
pub struct ChatHandler {
    provider: Arc<dyn CompletionProvider>,
    registry: Arc<AgentRegistry>,
}

impl ChatHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>, registry: Arc<AgentRegistry>) -> Self {
        Self { provider, registry }
    }

    /// The agent that will answer: a registered hint, else keyword routing.
    /// `qa` is accepted as a short form of `qa-specialist`.
    pub fn select_agent(&self, message: &str, agent_hint: Option<&str>) -> &str {
        let hint = agent_hint.map(str::trim).map(|h| match h {
            "qa" => AgentName::QA_SPECIALIST,
            other => other,
        });
        match hint.and_then(|h| self.registry.lookup(h)) {
            Some(agent) => agent.name.as_str(),
            None => route_agent(message),
        }
    }

    /// The completion request for one chat turn, without sending it
    pub fn prepare(&self, message: &str, agent_hint: Option<&str>) -> PreparedChat<'_> {
        let agent = self
            .registry
            .lookup_or_default(self.select_agent(message, agent_hint));
        debug!(agent = %agent.name, "routing chat message");

        PreparedChat {
            agent,
            messages: vec![
                ChatMessage::system(agent.system_prompt.as_str()),
                ChatMessage::user(message),
            ],
            options: CompletionOptions::new()
                .with_temperature(CHAT_TEMPERATURE)
                .with_max_tokens(CHAT_MAX_TOKENS),
        }
    }

    /// One chat turn. Never fails; offline the completion client answers.
    pub async fn reply(&self, message: &str, agent_hint: Option<&str>) -> ChatReply {
        let prepared = self.prepare(message, agent_hint);
        let text = self
            .provider
            .complete(&prepared.messages, &prepared.options)
            .await;
        prepared.into_reply(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::Role;
    use crate::llm::client::testing::ScriptedProvider;

    fn handler(provider: Arc<ScriptedProvider>) -> ChatHandler {
        ChatHandler::new(provider, Arc::new(AgentRegistry::new()))
    }

    #[test]
    fn test_route_agent() {
        assert_eq!(route_agent("Can you change the color scheme?"), "style-curator");
        assert_eq!(route_agent("Add a new component to the layout"), "architect");
        assert_eq!(route_agent("IMPLEMENT a search function"), "code-generator");
        assert_eq!(route_agent("Is this good for accessibility?"), "qa-specialist");
        assert_eq!(route_agent("hello there"), "architect");
    }

    #[test]
    fn test_route_agent_priority() {
        // Style keywords outrank layout keywords
        assert_eq!(route_agent("restyle the layout"), "style-curator");
        assert_eq!(route_agent("test the component"), "architect");
    }

    #[test]
    fn test_select_agent_prefers_known_hint() {
        let chat = handler(Arc::new(ScriptedProvider::default()));
        assert_eq!(chat.select_agent("change the color", Some("exporter")), "exporter");
        assert_eq!(chat.select_agent("change the color", Some("qa")), "qa-specialist");
        assert_eq!(chat.select_agent("change the color", Some("designer")), "style-curator");
        assert_eq!(chat.select_agent("change the color", None), "style-curator");
    }

    #[tokio::test]
    async fn test_reply_sends_agent_prompt() {
        let provider = Arc::new(ScriptedProvider::new(["Try a teal accent."]));
        let reply = handler(provider.clone())
            .reply("Can you change the color scheme?", None)
            .await;

        assert_eq!(reply.message, "Try a teal accent.");
        assert_eq!(reply.agent, "style-curator");
        assert_eq!(reply.suggestions.len(), 4);

        let (messages, options) = &provider.requests()[0];
        let registry = AgentRegistry::new();
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(
            messages[0].content,
            registry.lookup("style-curator").unwrap().system_prompt
        );
        assert_eq!(messages[1].content, "Can you change the color scheme?");
        assert_eq!(options.temperature, Some(CHAT_TEMPERATURE));
        assert_eq!(options.max_tokens, Some(CHAT_MAX_TOKENS));
    }
}
