use sprintqa_core::{Result, TestCaseGenerator};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::sheet::write_test_cases;

/// Result of a successful synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutcome {
    pub path: PathBuf,
    pub test_cases: usize,
}

/// Generates test cases for a text and writes them to a workbook.
///
/// Nothing is written unless generation and parsing both succeed.
#[derive(Clone)]
pub struct Synthesizer {
    generator: Arc<dyn TestCaseGenerator>,
}

impl Synthesizer {
    pub fn new(generator: Arc<dyn TestCaseGenerator>) -> Self {
        Self { generator }
    }

    pub async fn synthesize(&self, text: &str, output: &Path) -> Result<SynthesisOutcome> {
        let cases = self.generator.generate(text).await?;
        write_test_cases(&cases, output).await?;
        Ok(SynthesisOutcome { path: output.to_path_buf(), test_cases: cases.len() })
    }
}
