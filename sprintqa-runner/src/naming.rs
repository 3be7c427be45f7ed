//! Output file names.

fn file_safe(name: &str) -> String {
    name.trim().chars().map(|c| if c == ' ' || c == '/' || c == '\\' { '_' } else { c }).collect()
}

/// `{board}_{sprint}_confluence_testcases.xlsx`, spaces replaced by `_`.
pub fn document_file_name(board_name: &str, sprint_name: &str) -> String {
    format!("{}_{}_confluence_testcases.xlsx", file_safe(board_name), file_safe(sprint_name))
}

/// `{ISSUE_KEY}_testcases.xlsx`
pub fn issue_file_name(issue_key: &str) -> String {
    format!("{}_testcases.xlsx", file_safe(issue_key))
}
