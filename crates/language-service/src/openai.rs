//! OpenAI-compatible chat-completions backend with function calling.

use crate::{
    navigate_function_schema, FunctionCall, LanguageBackend, LanguageConfig, LanguageError, Reply,
    Result,
};
use async_trait::async_trait;

pub struct OpenAiBackend {
    config: LanguageConfig,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(config: LanguageConfig) -> Result<Self> {
        let api_key = match config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(LanguageError::MissingApiKey),
        };
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LanguageError::Http(e.to_string()))?;
        Ok(Self {
            config,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl LanguageBackend for OpenAiBackend {
    async fn interpret(&self, text: &str) -> Result<Reply> {
        #[derive(serde::Serialize)]
        struct Message<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(serde::Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<Message<'a>>,
            functions: Vec<serde_json::Value>,
        }

        let req = ChatRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                Message {
                    role: "user",
                    content: text,
                },
            ],
            functions: vec![navigate_function_schema()],
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| LanguageError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(LanguageError::Http(format!("HTTP {}", resp.status())));
        }

        #[derive(serde::Deserialize)]
        struct WireFunctionCall {
            name: String,
            /// JSON-encoded argument object, as the API serializes it.
            arguments: String,
        }
        #[derive(serde::Deserialize)]
        struct WireMessage {
            content: Option<String>,
            function_call: Option<WireFunctionCall>,
        }
        #[derive(serde::Deserialize)]
        struct Choice {
            message: WireMessage,
        }
        #[derive(serde::Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LanguageError::Http(e.to_string()))?;
        let message = body
            .choices
            .into_iter()
            .next()
            .ok_or(LanguageError::MalformedReply("no choices"))?
            .message;

        if let Some(call) = message.function_call {
            let arguments: serde_json::Value = serde_json::from_str(&call.arguments)
                .map_err(|_| LanguageError::MalformedReply("function arguments are not JSON"))?;
            tracing::debug!(name = %call.name, "model returned function call");
            return Ok(Reply::FunctionCall(FunctionCall {
                name: call.name,
                arguments,
            }));
        }

        match message.content {
            Some(content) => Ok(Reply::Content(content)),
            None => Err(LanguageError::MalformedReply(
                "message has neither content nor function call",
            )),
        }
    }
}
