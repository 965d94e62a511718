//! Chat agent: OpenAI-compatible tool-calling loop
//!
//! Glue between an OpenAI-compatible chat-completions endpoint and the
//! registered tools. Each user turn runs a bounded loop: send the history,
//! execute any requested tool calls, feed the results back, and return the
//! first plain assistant answer. The conversation buffer is held in memory
//! and trimmed to a configured window; nothing is persisted.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::AgentConfig;
use crate::prompts::SYSTEM_PROMPT;
use crate::tool::Tool;
use crate::{Result, SkyChatError};

/// One message in the conversation buffer (OpenAI wire shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user", "assistant", or "tool"
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool invocations requested by the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    /// Set on "tool" messages: which call this output answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self::text("system", content)
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self::text("user", content)
    }

    /// Tool output answering one tool call
    pub fn tool(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(call_id.into()),
        }
    }
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

/// Function name plus JSON-encoded arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Arguments as a JSON-encoded string, per the OpenAI wire format
    pub arguments: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDeclaration>,
}

#[derive(Serialize)]
struct ToolDeclaration {
    #[serde(rename = "type")]
    call_type: &'static str,
    function: FunctionSpec,
}

#[derive(Serialize)]
struct FunctionSpec {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Conversational agent with an in-memory history and a tool registry
pub struct ChatAgent {
    client: Client,
    config: AgentConfig,
    tools: Vec<Arc<dyn Tool>>,
    history: Vec<ChatMessage>,
}

impl ChatAgent {
    /// Create a new agent
    pub fn new(config: AgentConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("SkyChat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            tools: Vec::new(),
            history: Vec::new(),
        })
    }

    /// Register a tool the model may call
    pub fn add_tool(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Messages retained in the conversation buffer
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Run one user turn through the tool-calling loop and return the
    /// assistant's answer.
    #[instrument(skip(self, input))]
    pub async fn ask(&mut self, input: &str) -> Result<String> {
        self.history.push(ChatMessage::user(input));

        for iteration in 0..self.config.max_iterations {
            debug!(
                "Agent iteration {}/{}",
                iteration + 1,
                self.config.max_iterations
            );
            let message = self.complete().await?;
            self.history.push(message.clone());

            match message.tool_calls {
                Some(calls) if !calls.is_empty() => {
                    for call in &calls {
                        let output = self.dispatch(call).await;
                        self.history.push(ChatMessage::tool(call.id.clone(), output));
                    }
                }
                _ => {
                    let answer = message.content.unwrap_or_default();
                    self.trim_history();
                    return Ok(answer);
                }
            }
        }

        self.trim_history();
        Err(SkyChatError::agent(
            "tool iteration limit reached without a final answer",
        ))
    }

    /// Send the system prompt plus the buffered history to the chat endpoint
    async fn complete(&self) -> Result<ChatMessage> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend_from_slice(&self.history);

        let request = ChatRequest {
            model: &self.config.model,
            messages: &messages,
            temperature: self.config.temperature,
            tools: self.tools.iter().map(|t| declare(t.as_ref())).collect(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key.as_deref().unwrap_or_default())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkyChatError::agent(format!(
                "chat endpoint returned {status}"
            )));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| SkyChatError::agent("chat endpoint returned no choices"))
    }

    /// Execute one requested tool call; failures are reported back to the
    /// model as text so it can recover or apologize.
    async fn dispatch(&self, call: &ToolCall) -> String {
        info!("Executing tool call '{}'", call.function.name);

        let Some(tool) = self
            .tools
            .iter()
            .find(|tool| tool.name() == call.function.name)
        else {
            warn!("Model requested unknown tool '{}'", call.function.name);
            return format!("Unknown tool: {}", call.function.name);
        };

        let arguments: Value = match serde_json::from_str(&call.function.arguments) {
            Ok(value) => value,
            Err(e) => return format!("Could not parse tool arguments: {e}"),
        };

        match tool.call(arguments).await {
            Ok(output) => output,
            Err(e) => format!("Tool '{}' failed: {e}", call.function.name),
        }
    }

    /// Drop the oldest messages beyond the configured window. Leading tool
    /// outputs are dropped along with them so the buffer never starts with
    /// an unanswered tool message.
    fn trim_history(&mut self) {
        while self.history.len() > self.config.memory_window {
            self.history.remove(0);
            while self
                .history
                .first()
                .is_some_and(|message| message.role == "tool")
            {
                self.history.remove(0);
            }
        }
    }
}

fn declare(tool: &dyn Tool) -> ToolDeclaration {
    ToolDeclaration {
        call_type: "function",
        function: FunctionSpec {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            parameters: tool.parameters_schema(),
        },
    }
}
