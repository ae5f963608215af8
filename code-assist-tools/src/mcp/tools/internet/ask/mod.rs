//! Internet question tool

use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use code_assist_common::{ErrorSeverity, Severity};
use code_assist_config::InternetConfig;
use regex::Regex;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

static CITATION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d+)\]").expect("Failed to compile citation marker regex")
});

/// Failures of an internet question
#[derive(Debug, Error)]
pub enum AskInternetError {
    #[error("No API key configured; set internet.api_key or PERPLEXITY_API_KEY")]
    MissingApiKey,

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response contained no answer")]
    EmptyResponse,
}

impl Severity for AskInternetError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AskInternetError::MissingApiKey | AskInternetError::EmptyResponse => {
                ErrorSeverity::Warning
            }
            AskInternetError::Request { .. } => ErrorSeverity::Error,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AskInternetRequest {
    query: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
    return_images: bool,
    return_related_questions: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Tool for asking questions to a search-backed model
#[derive(Default)]
pub struct AskInternetTool;

impl AskInternetTool {
    /// Creates a new instance of the AskInternetTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AskInternetTool {
    fn name(&self) -> &'static str {
        "ask_internet"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The question to ask"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AskInternetRequest = BaseToolImpl::parse_arguments(arguments)?;

        let result = ask(&context.http_client, &context.config.internet, &request.query).await;
        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}

async fn ask(
    client: &reqwest::Client,
    config: &InternetConfig,
    query: &str,
) -> Result<String, AskInternetError> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or(AskInternetError::MissingApiKey)?;

    let payload = ChatCompletionRequest {
        model: &config.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &config.system_prompt,
            },
            ChatMessage {
                role: "user",
                content: query,
            },
        ],
        temperature: 0.0,
        stream: false,
        return_images: false,
        return_related_questions: false,
    };

    debug!(url = %config.base_url, model = %config.model, "Sending internet query");

    let request_error = |source| AskInternetError::Request {
        url: config.base_url.clone(),
        source,
    };
    let response: ChatCompletionResponse = client
        .post(&config.base_url)
        .bearer_auth(api_key)
        .timeout(Duration::from_secs(config.timeout_secs))
        .json(&payload)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(request_error)?
        .json()
        .await
        .map_err(request_error)?;

    let answer = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(AskInternetError::EmptyResponse)?;

    info!(citations = response.citations.len(), "Received internet answer");
    Ok(process_citations(&answer, &response.citations))
}

/// Strip `[n]` markers and list the URLs they point at
///
/// Indices are 1-based; markers beyond the citation list are dropped without
/// a URL. Each URL is listed once, in order of first reference.
pub fn process_citations(answer: &str, citations: &[String]) -> String {
    let mut cited: Vec<&str> = Vec::new();
    for capture in CITATION_MARKER.captures_iter(answer) {
        let url = capture[1]
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| citations.get(index));
        if let Some(url) = url {
            if !cited.contains(&url.as_str()) {
                cited.push(url);
            }
        }
    }

    let text = CITATION_MARKER.replace_all(answer, "");
    let text = text.trim();
    if cited.is_empty() {
        text.to_string()
    } else {
        format!("{text}\n\ncitations:\n{}", cited.join("\n"))
    }
}
