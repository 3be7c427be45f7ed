/// Lower and upper bound of the number of test cases requested.
pub const REQUESTED_CASES: (usize, usize) = (30, 40);

/// Build the QA-engineer prompt around the extracted document text.
pub fn build_prompt(document_text: &str) -> String {
    let (min, max) = REQUESTED_CASES;
    format!(
        "You are a highly experienced QA Engineer. Analyze the provided document and generate \
         {min}–{max} scenario-based test cases.\n\
         \n\
         Include:\n\
         - Scenario\n\
         - TestCaseID\n\
         - Description\n\
         - Steps\n\
         - ExpectedResult\n\
         \n\
         Here is the document text:\n\
         ---\n\
         {document_text}\n\
         ---\n"
    )
}
