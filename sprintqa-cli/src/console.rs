use anyhow::{Result, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

fn parse_sprint_id(input: &str) -> Option<u64> {
    input.trim().parse().ok()
}

fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<String> {
    match rl.readline(prompt) {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => bail!("input cancelled"),
        Err(e) => Err(e.into()),
    }
}

/// Fill in a missing board name or sprint id from the terminal.
pub fn resolve_sprint(board: Option<String>, sprint_id: Option<u64>) -> Result<(String, u64)> {
    if let (Some(board), Some(sprint_id)) = (&board, sprint_id) {
        return Ok((board.clone(), sprint_id));
    }

    let mut rl = DefaultEditor::new()?;
    let board = match board.filter(|b| !b.trim().is_empty()) {
        Some(board) => board,
        None => loop {
            let line = read_line(&mut rl, "Board name: ")?;
            if !line.is_empty() {
                break line;
            }
        },
    };
    let sprint_id = match sprint_id {
        Some(id) => id,
        None => loop {
            let line = read_line(&mut rl, "Sprint ID: ")?;
            match parse_sprint_id(&line) {
                Some(id) => break id,
                None => eprintln!("'{line}' is not a sprint ID, enter a number"),
            }
        },
    };
    Ok((board, sprint_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprint_id_must_be_numeric() {
        assert_eq!(parse_sprint_id(" 12345 "), Some(12345));
        assert_eq!(parse_sprint_id("Sprint 12"), None);
        assert_eq!(parse_sprint_id(""), None);
    }

    #[test]
    fn complete_arguments_skip_the_prompt() {
        assert_eq!(resolve_sprint(Some("Payments".into()), Some(37)).unwrap(), ("Payments".to_string(), 37));
    }
}
