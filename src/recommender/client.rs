//! Chat-completion client used by the recommender.

use std::future::Future;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::RecommenderError;

/// A single prompt sent to the text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// External text-generation service.
pub trait CompletionClient: Send + Sync {
    /// Returns the raw text produced for `request`.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, RecommenderError>> + Send;
}

/// OpenAI chat-completions client.
#[derive(Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: SecretString,
}

impl OpenAiClient {
    pub fn new(
        api_key: SecretString,
        model: String,
        endpoint: String,
        timeout: Duration,
    ) -> Result<Self, RecommenderError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            model,
            api_key,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, RecommenderError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("requesting completion from {} ({})", self.endpoint, self.model);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecommenderError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        extract_content(&text)
    }
}

/// Pulls the first choice's message out of a chat-completions body.
fn extract_content(body: &str) -> Result<String, RecommenderError> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(RecommenderError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"1. Use more symbols"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "1. Use more symbols");
    }

    #[test]
    fn test_extract_content_no_choices() {
        let result = extract_content(r#"{"choices":[]}"#);
        assert!(matches!(result, Err(RecommenderError::EmptyResponse)));
    }

    #[test]
    fn test_extract_content_null_or_blank() {
        let null = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let blank = r#"{"choices":[{"message":{"role":"assistant","content":"  "}}]}"#;
        assert!(matches!(extract_content(null), Err(RecommenderError::EmptyResponse)));
        assert!(matches!(extract_content(blank), Err(RecommenderError::EmptyResponse)));
    }

    #[test]
    fn test_extract_content_malformed() {
        assert!(matches!(
            extract_content("<html>bad gateway</html>"),
            Err(RecommenderError::Decode(_))
        ));
    }

    #[test]
    fn test_chat_request_shape() {
        let body = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            max_tokens: 300,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["temperature"], 0.5);
    }
}
