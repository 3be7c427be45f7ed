use serde::{Deserialize, Serialize};

/// An agile board as listed by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: u64,
    pub name: String,
}

/// A sprint record. The goal is free text that may embed a document link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, rename = "originBoardId")]
    pub origin_board_id: Option<u64>,
}

impl Sprint {
    /// The goal text, treating an empty or whitespace-only goal as absent.
    pub fn goal_text(&self) -> Option<&str> {
        self.goal.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }
}

/// File attached to an issue, as described by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAttachment {
    pub id: String,
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
    /// Download URL for the raw attachment bytes.
    pub content_url: String,
}

impl IssueAttachment {
    pub fn is_text(&self) -> bool {
        self.mime_type.starts_with("text/")
    }
}

/// An issue within a sprint, with its description already flattened to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub description: Option<String>,
    #[serde(default)]
    pub attachments: Vec<IssueAttachment>,
}

/// One generated test case; one row of the output spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(rename = "Scenario")]
    pub scenario: String,
    #[serde(rename = "TestCaseID")]
    pub test_case_id: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Steps")]
    pub steps: Vec<String>,
    #[serde(rename = "ExpectedResult")]
    pub expected_result: String,
}

impl TestCase {
    /// Column headers in schema field order.
    pub const COLUMNS: [&'static str; 5] =
        ["Scenario", "TestCaseID", "Description", "Steps", "ExpectedResult"];

    /// The step sequence flattened into a single newline-joined cell value.
    pub fn steps_text(&self) -> String {
        self.steps.join("\n")
    }

    /// Cell values in column order.
    pub fn row(&self) -> [String; 5] {
        [
            self.scenario.clone(),
            self.test_case_id.clone(),
            self.description.clone(),
            self.steps_text(),
            self.expected_result.clone(),
        ]
    }
}
