//! # sprintqa-gemini
//!
//! A small client for the Gemini `generateContent` endpoint, covering what
//! structured-output generation needs: a user prompt, a response MIME type
//! and a response schema.
//!
//! ```rust,no_run
//! use sprintqa_gemini::GeminiBuilder;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), sprintqa_gemini::ClientError> {
//! let client = GeminiBuilder::new("api-key").with_model("gemini-2.0-flash").build()?;
//! let response = client
//!     .generate_content()
//!     .with_user_message("List three colours as JSON")
//!     .with_response_mime_type("application/json")
//!     .with_response_schema(json!({"type": "ARRAY", "items": {"type": "STRING"}}))
//!     .execute()
//!     .await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod common;
pub mod error;
pub mod model;

pub use builder::GeminiBuilder;
pub use client::{ContentBuilder, GeminiClient};
pub use common::Model;
pub use error::Error as ClientError;
pub use model::{
    Candidate, Content, GenerateContentRequest, GenerationConfig, GenerationResponse, Part, Role,
};
