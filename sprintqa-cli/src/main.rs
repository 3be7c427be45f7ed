mod cli;
mod console;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use cli::{Cli, Commands};
use sprintqa_core::DomainConfig;
use sprintqa_ledger::JsonFileLedger;
use sprintqa_runner::{
    HttpServiceFactory, Orchestrator, OrchestratorConfig, PollingScheduler, SprintSelection,
};
use sprintqa_telemetry::init_telemetry;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry("sprintqa", cli.log_format)
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    let settings = cli.settings();
    if !settings.document_pass && !settings.issue_pass {
        tracing::warn!("both passes are disabled, nothing will be generated");
    }

    let domains = DomainConfig::load(&cli.config)
        .with_context(|| format!("failed to load tenant configuration from {}", cli.config.display()))?;
    tracing::info!(tenants = domains.len(), config = %cli.config.display(), "configuration loaded");

    let orchestrator = Arc::new(Orchestrator::new(OrchestratorConfig {
        domains: Arc::new(domains),
        services: Arc::new(HttpServiceFactory::new(settings.http_timeout)),
        ledger: Arc::new(JsonFileLedger::new(&settings.ledger_path)),
        settings,
    }));

    match cli.command.clone().unwrap_or_default() {
        Commands::Watch { .. } => {
            let token = CancellationToken::new();
            tokio::spawn({
                let token = token.clone();
                async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        tracing::info!("shutdown requested");
                        token.cancel();
                    }
                }
            });
            PollingScheduler::new(orchestrator, SprintSelection::AllActive).run(token).await;
        }
        Commands::Once => {
            let report = orchestrator.run_pass(&SprintSelection::AllActive).await;
            println!("{report}");
            if report.aborted {
                bail!("pass aborted");
            }
        }
        Commands::Sprint { board, sprint_id } => {
            let (board_name, sprint_id) = console::resolve_sprint(board, sprint_id)?;
            let selection = SprintSelection::single(board_name.clone(), sprint_id);
            let report = orchestrator.run_pass(&selection).await;
            println!("{report}");
            if report.tenants == 0 {
                bail!("board '{board_name}' was not found in any configured tenant");
            }
            if report.aborted {
                bail!("pass aborted");
            }
        }
    }
    Ok(())
}
