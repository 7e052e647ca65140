//! Password recommendations backed by a text-generation service.
//!
//! The service is optional. Whenever it is unconfigured, fails or answers with
//! nothing usable, the recommender falls back to a static list of tips or to
//! the local generator. Service errors are logged and never returned.

mod client;
mod parse;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::generator::{generate_password, generate_passwords};
use crate::policy::PasswordPolicy;
use crate::validator::validate_password;

pub use client::{CompletionClient, CompletionRequest, OpenAiClient};
pub use parse::{MAX_RECOMMENDATIONS, parse_recommendations};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Service responded with status {0}")]
    Status(u16),
    #[error("Malformed service response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Service returned no content")]
    EmptyResponse,
}

/// Settings for the text-generation service.
#[derive(Debug)]
pub struct RecommenderConfig {
    /// `None` (or blank) disables the service entirely.
    pub api_key: Option<SecretString>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RecommenderConfig {
    /// Reads the configuration from the environment.
    ///
    /// - `OPENAI_API_KEY`: service credential (unset or blank disables the service)
    /// - `OPENAI_MODEL`: model name (default: `gpt-3.5-turbo`)
    /// - `OPENAI_BASE_URL`: API base, `/chat/completions` is appended
    ///   (default: `https://api.openai.com/v1`)
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::new(key.into()));
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let endpoint = std::env::var("OPENAI_BASE_URL")
            .map(|base| format!("{}/chat/completions", base.trim_end_matches('/')))
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        Self {
            api_key,
            model,
            endpoint,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Static tips used whenever the service cannot answer.
pub fn default_recommendations() -> Vec<String> {
    [
        "Increase password length to 16+ characters",
        "Mix uppercase, lowercase, numbers, and special characters",
        "Avoid common words or predictable sequences",
        "Avoid using personal information (names, birthdates)",
        "Use a passphrase with random words for better memorability",
        "Avoid keyboard patterns (qwerty, asdfgh, etc.)",
        "Consider using a password manager to generate and store strong passwords",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Produces recommendations and password suggestions.
#[derive(Debug)]
pub struct Recommender<C = OpenAiClient> {
    client: Option<C>,
}

impl Recommender<OpenAiClient> {
    /// Builds a recommender talking to the OpenAI chat API.
    ///
    /// Without an API key the recommender works offline.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: RecommenderConfig) -> Result<Self, RecommenderError> {
        let RecommenderConfig {
            api_key,
            model,
            endpoint,
            timeout,
        } = config;

        let client = match api_key.filter(|key| !key.expose_secret().trim().is_empty()) {
            Some(key) => Some(OpenAiClient::new(key, model, endpoint, timeout)?),
            None => {
                #[cfg(feature = "tracing")]
                tracing::info!("No API key configured, recommender will use local fallbacks");
                None
            }
        };

        Ok(Self { client })
    }

    /// An OpenAI-typed recommender that never calls a service.
    pub fn offline() -> Self {
        Self { client: None }
    }
}

impl<C: CompletionClient> Recommender<C> {
    pub fn with_client(client: C) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A recommender that never calls a service.
    ///
    /// The client type is not inferred from the default parameter, so name it
    /// (`Recommender::<MyClient>::unconfigured()`) or use
    /// [`Recommender::offline`].
    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Returns up to [`MAX_RECOMMENDATIONS`] tips for improving `password`.
    ///
    /// The password itself is never sent to the service.
    pub async fn recommendations(&self, password: &SecretString) -> Vec<String> {
        let Some(client) = &self.client else {
            return default_recommendations();
        };

        match client.complete(&recommendation_request(password)).await {
            Ok(text) => {
                let parsed = parse_recommendations(&text);
                if parsed.is_empty() {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Service returned no usable recommendations, using defaults");
                    return default_recommendations();
                }
                parsed
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Recommendation request failed, using defaults: {}", _e);
                default_recommendations()
            }
        }
    }

    /// Returns exactly `count` password suggestions of about `length` characters.
    ///
    /// Suggestions from the service that fail the policy are dropped and the
    /// list is topped up with locally generated passwords.
    pub async fn password_suggestions(&self, count: usize, length: usize) -> Vec<SecretString> {
        let Some(client) = &self.client else {
            return generate_passwords(count, length);
        };

        match client.complete(&suggestion_request(count, length)).await {
            Ok(text) => {
                let mut passwords = parse::parse_password_suggestions(&text, length);

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "Service suggestions accepted: {} of {} requested",
                    passwords.len().min(count),
                    count
                );

                passwords.truncate(count);
                while passwords.len() < count {
                    passwords.push(generate_password(length, true, true));
                }
                passwords
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Suggestion request failed, generating locally: {}", _e);
                generate_passwords(count, length)
            }
        }
    }

    /// Sends recommendations through a channel.
    ///
    /// If `token` is cancelled before the service answers, the default tips
    /// are sent instead.
    pub async fn recommendations_tx(
        &self,
        password: &SecretString,
        token: CancellationToken,
        tx: mpsc::Sender<Vec<String>>,
    ) {
        let recommendations = tokio::select! {
            biased;
            _ = token.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::info!("Recommendation cancelled, sending defaults");
                default_recommendations()
            }
            list = self.recommendations(password) => list,
        };

        if let Err(_e) = tx.send(recommendations).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send recommendations: {}", _e);
        }
    }
}

fn recommendation_request(password: &SecretString) -> CompletionRequest {
    let violations = validate_password(password, &PasswordPolicy::default()).violations;
    let status = if violations.is_empty() {
        "The password already passes the basic policy checks.".to_string()
    } else {
        format!(
            "The password currently fails these checks:\n{}",
            violations
                .iter()
                .map(|v| format!("- {v}"))
                .collect::<Vec<_>>()
                .join("\n")
        )
    };

    CompletionRequest {
        system: "You are a cybersecurity expert specializing in password security.".to_string(),
        prompt: format!(
            "Analyze this password and provide specific, actionable recommendations to make it stronger.
Do not reveal the actual password. Focus on:
1. Adding more character variety
2. Increasing length
3. Removing predictable patterns
4. Making it more memorable but secure

{status}

Provide 3-5 specific recommendations."
        ),
        max_tokens: 300,
        temperature: 0.7,
    }
}

fn suggestion_request(count: usize, length: usize) -> CompletionRequest {
    CompletionRequest {
        system: "You are a cybersecurity expert. Generate only strong, random passwords."
            .to_string(),
        prompt: format!(
            "Generate {count} strong, unique passwords that:
1. Are exactly {length} characters long
2. Contain uppercase letters, lowercase letters, numbers, and special characters
3. Are NOT simple patterns or dictionary words
4. Are optimized for security and memorability
5. Do NOT share common patterns between suggestions

Format: Return ONLY the passwords, one per line, nothing else."
        ),
        max_tokens: 200,
        temperature: 1.0,
    }
}
