//! # sprintqa-testcase
//!
//! Turns document or issue text into QA test cases and a spreadsheet.
//!
//! - [`build_prompt`] / [`response_schema`] - What is sent to the model
//! - [`parse_test_cases`] - Strict parsing of the structured response
//! - [`GeminiTestCaseGenerator`] - The [`TestCaseGenerator`](sprintqa_core::TestCaseGenerator) used in production
//! - [`write_test_cases`] - `.xlsx` output, one row per test case
//! - [`Synthesizer`] - Generation followed by writing

pub mod generator;
pub mod prompt;
pub mod schema;
pub mod sheet;
pub mod synthesizer;

pub use generator::{DEFAULT_MODEL, GeminiTestCaseGenerator};
pub use prompt::{REQUESTED_CASES, build_prompt};
pub use schema::{parse_test_cases, response_schema};
pub use sheet::{WORKSHEET_NAME, XLSX_MIME_TYPE, render_test_cases, write_test_cases};
pub use synthesizer::{SynthesisOutcome, Synthesizer};
