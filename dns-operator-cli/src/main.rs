//! Command-line entry point for DNS Operator
//!
//! Runs one batch file against a catalog config, acting as one role:
//!
//! ```text
//! dns-operator --config catalog.json --role deployer batch.json
//! ```
//!
//! Each operation outcome is printed to stdout as it completes, followed by
//! a summary. Logs go to stderr (`RUST_LOG` controls the level).

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dns_operator_core::services::{OperationService, ServiceContext};
use dns_operator_core::traits::{InMemoryRegistryCatalog, RoleDefAuthorizer};
use dns_operator_core::types::{BatchExecutionResult, CatalogConfig, Operation, OperationKind};
use dns_operator_core::CoreError;
use dns_operator_registry::log_sanitizer::describe_record;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "dns-operator", version, about = "Execute a batch of DNS record operations")]
struct Cli {
    /// Catalog config: registry definitions and roles
    #[arg(short, long)]
    config: PathBuf,

    /// Role to act as
    #[arg(short, long)]
    role: String,

    /// Print the batch summary as JSON
    #[arg(long)]
    json: bool,

    /// Batch file: a JSON array of operations
    batch: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(result) => {
            print_summary(&result, cli.json);
            if result.failed_count == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!("Batch aborted: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn read_batch(path: &Path) -> anyhow::Result<Vec<Operation>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read batch file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("failed to parse batch file {}", path.display()))
}

async fn run(cli: &Cli) -> anyhow::Result<BatchExecutionResult> {
    let config = CatalogConfig::load(&cli.config)?;
    let role = config.role(&cli.role)?;
    let mut operations = read_batch(&cli.batch)?;
    tracing::info!(
        "Loaded {} operation(s) from {}, acting as role '{}'",
        operations.len(),
        cli.batch.display(),
        role.name
    );

    let ctx = Arc::new(ServiceContext::new(
        Arc::new(RoleDefAuthorizer::new()),
        Arc::new(InMemoryRegistryCatalog::from_config(&config)),
    ));
    let service = OperationService::new(ctx);

    let result = service
        .execute_all(role, &mut operations, print_outcome)
        .await?;
    Ok(result)
}

fn print_outcome(op: &Operation, outcome: Result<(), &CoreError>) {
    let kind = match op.kind {
        OperationKind::Update => "update",
        OperationKind::Delete => "delete",
    };
    let registry = op.registry.as_deref().unwrap_or("-");
    match outcome {
        Ok(()) => println!("ok     {kind} [{registry}] {}", describe_record(&op.record)),
        Err(e) => println!("failed {kind} [{registry}] {}: {e}", describe_record(&op.record)),
    }
}

fn print_summary(result: &BatchExecutionResult, json: bool) {
    if json {
        match serde_json::to_string_pretty(result) {
            Ok(s) => println!("{s}"),
            Err(e) => tracing::error!("Failed to serialize batch summary: {e}"),
        }
        return;
    }
    println!(
        "{} succeeded, {} failed",
        result.success_count, result.failed_count
    );
}
