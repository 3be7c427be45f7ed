use std::fmt;

/// Which sprints a pass processes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SprintSelection {
    /// Every active sprint on every board of every tenant.
    #[default]
    AllActive,
    /// One sprint, located through the first tenant that has a board with this name.
    Single { board_name: String, sprint_id: u64 },
}

impl SprintSelection {
    pub fn single(board_name: impl Into<String>, sprint_id: u64) -> Self {
        SprintSelection::Single { board_name: board_name.into(), sprint_id }
    }
}

impl fmt::Display for SprintSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SprintSelection::AllActive => f.write_str("all active sprints"),
            SprintSelection::Single { board_name, sprint_id } => {
                write!(f, "sprint {sprint_id} on board '{board_name}'")
            }
        }
    }
}
