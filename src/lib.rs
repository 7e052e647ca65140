//! Password policy validation, generation and recommendations
//!
//! This library validates passwords against a configurable policy, generates
//! random passwords that always satisfy their rules, and produces improvement
//! tips through an optional text-generation service with local fallbacks.
//!
//! # Features
//!
//! - `async` (default): Enables the service-backed [`Recommender`]
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! Only read by `RecommenderConfig::from_env`:
//!
//! - `OPENAI_API_KEY`: service credential (unset disables the service)
//! - `OPENAI_MODEL`: model name (default: `gpt-3.5-turbo`)
//! - `OPENAI_BASE_URL`: API base URL (default: `https://api.openai.com/v1`)
//!
//! # Example
//!
//! ```rust
//! use pwd_advisor::{PasswordPolicy, generate_password, validate_password};
//! use secrecy::SecretString;
//!
//! let policy = PasswordPolicy::default();
//!
//! let password = SecretString::new("abc".to_string().into());
//! let result = validate_password(&password, &policy);
//! assert!(!result.valid);
//! println!("Violations: {:?}", result.violations);
//!
//! let generated = generate_password(16, true, true);
//! assert!(validate_password(&generated, &policy).valid);
//! ```

// Internal modules
mod generator;
mod policy;
mod rules;
mod validator;

#[cfg(feature = "async")]
mod recommender;

// Public API
pub use generator::{
    MAX_GENERATED_LENGTH, MIN_GENERATED_LENGTH, generate_password, generate_passwords,
};
pub use policy::{DEFAULT_SPECIAL_CHARS, PasswordPolicy, ValidationResult};
pub use validator::validate_password;

#[cfg(feature = "async")]
pub use recommender::{
    CompletionClient, CompletionRequest, DEFAULT_ENDPOINT, DEFAULT_MODEL, MAX_RECOMMENDATIONS,
    OpenAiClient, Recommender, RecommenderConfig, RecommenderError, default_recommendations,
    parse_recommendations,
};
