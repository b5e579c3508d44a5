//! Command-line front end for the `SpecForge` client.
//!
//! Usage:
//!
//! ```text
//! specforge generate --title "Login" --goal "let users sign in" --users devs
//! specforge show <id> --format txt --out ./exports
//! specforge recent
//! specforge health [--watch]
//! ```
//!
//! Connection settings come from the `SPECFORGE_*` environment variables
//! described in [`specforge::config`]. Generated and loaded specifications
//! are printed as Markdown, or written to `--out` when given.

use clap::{Parser, Subcommand, ValueEnum};
use mockable::DefaultClock;
use specforge::config::{ConfigError, SpecForgeConfig};
use specforge::spec::{
    adapters::http::HttpSpecGateway,
    domain::{
        Complexity, ExportDocument, ExportFormat, FeatureRequest, HealthReport, SpecDomainError,
        SpecId, Specification, TemplateType,
    },
    ports::{GatewayError, SpecGateway},
    services::{HealthPoller, HealthState, SpecStore, SpecStoreError},
};
use specforge::telemetry::init_tracing;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type CliStore = SpecStore<HttpSpecGateway, DefaultClock>;

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("{}", .0.user_message())]
    Store(#[from] SpecStoreError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

/// Generate, inspect and export product specifications.
#[derive(Parser, Debug)]
#[command(name = "specforge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and save a new specification
    Generate {
        /// Feature title
        #[arg(long)]
        title: String,
        /// What the feature should achieve
        #[arg(long, default_value = "")]
        goal: String,
        /// Target users, as free text
        #[arg(long, default_value = "")]
        users: String,
        /// Free-text constraints
        #[arg(long, default_value = "")]
        constraints: String,
        /// Product template
        #[arg(long, value_parser = parse_template, default_value = "Web App")]
        template: TemplateType,
        /// Complexity level
        #[arg(long, value_parser = parse_complexity, default_value = "Medium")]
        complexity: Complexity,
        #[command(flatten)]
        export: ExportArgs,
    },

    /// Load a stored specification
    Show {
        /// Specification identifier
        id: String,
        #[command(flatten)]
        export: ExportArgs,
    },

    /// List recently stored specifications
    Recent,

    /// Check remote service health
    Health {
        /// Keep polling and print every change
        #[arg(long)]
        watch: bool,
    },
}

#[derive(clap::Args, Debug)]
struct ExportArgs {
    /// Export format
    #[arg(long, value_enum, default_value_t = FormatArg::Md)]
    format: FormatArg,
    /// File or directory to write the export to instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Md,
    Txt,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Md => Self::Markdown,
            FormatArg::Txt => Self::Text,
        }
    }
}

fn parse_template(value: &str) -> Result<TemplateType, SpecDomainError> {
    TemplateType::try_from(value)
}

fn parse_complexity(value: &str) -> Result<Complexity, SpecDomainError> {
    Complexity::try_from(value)
}

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = SpecForgeConfig::from_env().map_err(CliError::from)?;
    init_tracing(config.log_json);
    let runtime = build_runtime()?;
    runtime.block_on(run(cli.command, &config))?;
    Ok(())
}

fn build_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)
}

async fn run(command: Command, config: &SpecForgeConfig) -> Result<(), CliError> {
    let gateway = Arc::new(HttpSpecGateway::from_config(config)?);
    let store: CliStore = SpecStore::new(Arc::clone(&gateway), Arc::new(DefaultClock))
        .with_recent_limit(config.recent_limit);

    match command {
        Command::Generate {
            title,
            goal,
            users,
            constraints,
            template,
            complexity,
            export,
        } => {
            let request = FeatureRequest::new(title)
                .with_goal(goal)
                .with_target_users(&users)
                .with_constraints(constraints)
                .with_template_type(template)
                .with_complexity(complexity);
            let spec = store.create_specification(request).await?;
            emit(&spec, &export)
        }
        Command::Show { id, export } => {
            let spec = store.load_specification(&SpecId::new(id)).await?;
            emit(&spec, &export)
        }
        Command::Recent => {
            let recent = store.refresh_recent().await?;
            let mut stdout = io::stdout().lock();
            for spec in recent.entries() {
                let id = spec.id().map_or("-", SpecId::as_str);
                let created = spec
                    .created_at()
                    .map_or_else(|| "-".to_owned(), |at| at.format("%Y-%m-%d %H:%M").to_string());
                writeln!(stdout, "{id}\t{created}\t{}", spec.title()).map_err(CliError::Output)?;
            }
            Ok(())
        }
        Command::Health { watch: false } => {
            let report = gateway.health_check().await?;
            print_health(&HealthState::Reported(report))
        }
        Command::Health { watch: true } => watch_health(gateway, config).await,
    }
}

fn emit(spec: &Specification, export: &ExportArgs) -> Result<(), CliError> {
    let document = ExportDocument::render(spec, export.format.into());
    match &export.out {
        Some(target) => {
            let path = export_path(target, &document.file_name);
            std::fs::write(&path, &document.content).map_err(CliError::Output)?;
            info!(path = %path.display(), "specification exported");
            Ok(())
        }
        None => writeln!(io::stdout().lock(), "{}", document.content).map_err(CliError::Output),
    }
}

fn export_path(target: &Path, file_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(file_name)
    } else {
        target.to_path_buf()
    }
}

async fn watch_health(
    gateway: Arc<HttpSpecGateway>,
    config: &SpecForgeConfig,
) -> Result<(), CliError> {
    let poller = HealthPoller::spawn(gateway, config.health_poll_interval);
    let mut updates = poller.subscribe();
    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();
        print_health(&state)?;
    }
    Ok(())
}

fn print_health(state: &HealthState) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    match state {
        HealthState::Checking => writeln!(stdout, "checking..."),
        HealthState::Unreachable(message) => writeln!(stdout, "unreachable: {message}"),
        HealthState::Reported(report) => write_report(&mut stdout, report),
    }
    .map_err(CliError::Output)
}

fn write_report(out: &mut impl Write, report: &HealthReport) -> io::Result<()> {
    writeln!(
        out,
        "overall: {} ({})",
        report.overall,
        report.version.as_deref().unwrap_or("unknown version")
    )?;
    for (name, component) in report.components() {
        let state = if component.ok { "ok" } else { "down" };
        writeln!(out, "  {name}: {state} - {}", component.summary())?;
    }
    Ok(())
}
