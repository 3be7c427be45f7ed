use clap::{Parser, Subcommand};
use sprintqa_ledger::DEFAULT_LEDGER_FILE;
use sprintqa_runner::RunnerSettings;
use sprintqa_telemetry::LogFormat;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "sprintqa", version)]
#[command(about = "Generate QA test cases for active sprints and attach them to their issues", long_about = None)]
pub struct Cli {
    /// Tenant configuration file (JSON map of host to credentials)
    #[arg(long, env = "SPRINTQA_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// Processed-set ledger file
    #[arg(long, env = "SPRINTQA_LEDGER", default_value = DEFAULT_LEDGER_FILE)]
    pub ledger: PathBuf,

    /// Directory for generated spreadsheets
    #[arg(long, env = "SPRINTQA_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Log output format: text or json
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Per-request HTTP timeout in seconds
    #[arg(long)]
    pub http_timeout_secs: Option<u64>,

    /// Skip test-case generation from sprint-goal documents
    #[arg(long)]
    pub no_document_pass: bool,

    /// Skip test-case generation from issue content
    #[arg(long)]
    pub no_issue_pass: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Poll every tenant's active sprints until interrupted (default)
    Watch {
        /// Seconds to wait between passes
        #[arg(long, default_value_t = 10)]
        interval_secs: u64,
    },

    /// Run a single pass over every active sprint, then exit
    Once,

    /// Process one sprint; missing values are asked for on the terminal
    Sprint {
        /// Board name
        #[arg(long)]
        board: Option<String>,

        /// Sprint ID
        #[arg(long)]
        sprint_id: Option<u64>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Watch { interval_secs: 10 }
    }
}

impl Cli {
    pub fn settings(&self) -> RunnerSettings {
        let settings = RunnerSettings::default()
            .with_output_dir(&self.output_dir)
            .with_ledger_path(&self.ledger)
            .with_document_pass(!self.no_document_pass)
            .with_issue_pass(!self.no_issue_pass)
            .with_http_timeout(self.http_timeout_secs.map(Duration::from_secs));
        match &self.command {
            Some(Commands::Watch { interval_secs }) => {
                settings.with_poll_interval(Duration::from_secs(*interval_secs))
            }
            _ => settings,
        }
    }
}
