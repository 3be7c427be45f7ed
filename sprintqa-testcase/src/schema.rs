use serde_json::{Value, json};
use sprintqa_core::{QaError, Result, TestCase};

/// Structured-output schema sent with every synthesis request.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "Scenario": {"type": "STRING"},
                "TestCaseID": {"type": "STRING"},
                "Description": {"type": "STRING"},
                "Steps": {"type": "ARRAY", "items": {"type": "STRING"}},
                "ExpectedResult": {"type": "STRING"}
            },
            "required": TestCase::COLUMNS
        }
    })
}

/// Parse the model's JSON text as a non-empty list of test cases.
pub fn parse_test_cases(text: &str) -> Result<Vec<TestCase>> {
    let cases: Vec<TestCase> = serde_json::from_str(text.trim())
        .map_err(|e| QaError::Parse(format!("response does not match the test-case schema: {e}")))?;

    if cases.is_empty() {
        return Err(QaError::Parse("response contained no test cases".to_string()));
    }
    Ok(cases)
}
