use calamine::{Reader, Xlsx, open_workbook};
use serde_json::json;
use sprintqa_core::{QaError, TenantConfig, TestCase, TestCaseGenerator};
use sprintqa_testcase::{
    GeminiTestCaseGenerator, Synthesizer, WORKSHEET_NAME, write_test_cases,
};
use std::path::Path;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tenant() -> TenantConfig {
    TenantConfig {
        host: "acme.atlassian.net".into(),
        jira_email: "bot@acme.test".into(),
        jira_api_token: "token".into(),
        jira_base: Url::parse("https://acme.atlassian.net").unwrap(),
        confluence_base: Url::parse("https://acme.atlassian.net/wiki").unwrap(),
        slack_webhook_url: Url::parse("https://hooks.slack.test/T0/B0").unwrap(),
        gemini_api_key: "gem-key".into(),
        gemini_model: None,
    }
}

fn sample_cases(n: usize) -> Vec<TestCase> {
    (1..=n)
        .map(|i| TestCase {
            scenario: format!("Scenario {i}"),
            test_case_id: format!("TC-{i:03}"),
            description: format!("Description {i}"),
            steps: vec![format!("Open screen {i}"), "Click save".into(), "Reload".into()],
            expected_result: format!("Result {i}"),
        })
        .collect()
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(WORKSHEET_NAME).unwrap();
    range.rows().map(|row| row.iter().map(|cell| cell.to_string()).collect()).collect()
}

fn gemini_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    }))
}

async fn generator_for(server: &MockServer) -> GeminiTestCaseGenerator {
    let base = Url::parse(&format!("{}/v1beta/", server.uri())).unwrap();
    GeminiTestCaseGenerator::with_base_url(&tenant(), Some(base), None).unwrap()
}

#[tokio::test]
async fn workbook_has_one_row_per_case_in_schema_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cases.xlsx");
    let cases = sample_cases(3);

    write_test_cases(&cases, &path).await.unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], TestCase::COLUMNS.map(str::to_string).to_vec());
    for (row, case) in rows[1..].iter().zip(&cases) {
        assert_eq!(row[0], case.scenario);
        assert_eq!(row[1], case.test_case_id);
        assert_eq!(row[2], case.description);
        assert_eq!(row[3], case.steps.join("\n"));
        assert_eq!(row[4], case.expected_result);
    }
}

#[tokio::test]
async fn unwritable_destination_is_spreadsheet_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("cases.xlsx");

    let err = write_test_cases(&sample_cases(1), &path).await.unwrap_err();

    match err {
        QaError::Spreadsheet(detail) => assert!(detail.contains("cases.xlsx")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!path.exists());
}

#[tokio::test]
async fn synthesizer_writes_generated_cases() {
    let server = MockServer::start().await;
    let payload = serde_json::to_string(&sample_cases(32)).unwrap();
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "gem-key"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {"type": "ARRAY"}
            }
        })))
        .respond_with(gemini_reply(&payload))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("Board_Sprint_12_confluence_testcases.xlsx");
    let synthesizer = Synthesizer::new(Arc::new(generator_for(&server).await));

    let outcome = synthesizer.synthesize("Checkout flow spec", &output).await.unwrap();

    assert_eq!(outcome.test_cases, 32);
    assert_eq!(read_rows(&output).len(), 33);
}

#[tokio::test]
async fn schema_violation_is_parse_error_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(gemini_reply(r#"[{"Scenario": "only one field"}]"#))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.xlsx");
    let synthesizer = Synthesizer::new(Arc::new(generator_for(&server).await));

    let err = synthesizer.synthesize("text", &output).await.unwrap_err();

    assert!(matches!(err, QaError::Parse(_)), "got {err:?}");
    assert!(!output.exists());
}

#[tokio::test]
async fn non_success_status_is_synthesis_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let err = generator_for(&server).await.generate("text").await.unwrap_err();

    match err {
        QaError::Synthesis(detail) => assert!(detail.contains("500")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn blocked_prompt_is_synthesis_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        )
        .mount(&server)
        .await;

    let err = generator_for(&server).await.generate("text").await.unwrap_err();

    match err {
        QaError::Synthesis(detail) => assert!(detail.contains("SAFETY")),
        other => panic!("unexpected error: {other:?}"),
    }
}
