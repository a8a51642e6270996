//! CLI entrypoint for Swarm Planner
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use planner_application::{
    ConversationLogger, DraftExecutionPlanUseCase, PlanningInput, RunPlanningUseCase,
};
use planner_domain::{ExecutionPlan, OutputFormat, SessionResult};
use planner_infrastructure::{
    ConfigLoader, FileConfig, HttpReasoningGateway, JsonlConversationLogger,
    MarkdownDocumentRenderer, render_execution_markdown,
};
use planner_presentation::{Cli, ConsoleFormatter, NdjsonEventSink, ProgressReporter};
use std::io::Read;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr or `--log-file`, never stdout.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config =
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?;

    if let Some(model) = &cli.model {
        config.reasoning.model = model.clone();
    }
    if cli.no_execution_plan {
        config.planning.execution_plan = false;
    }

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.to_string())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    Ok(config)
}

fn read_brief(cli: &Cli) -> Result<PlanningInput> {
    let text = if cli.brief_from_stdin() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read brief from stdin")?;
        buffer
    } else {
        let Some(path) = &cli.brief else {
            bail!("A project brief is required (--brief <PATH>)");
        };
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read brief {}", path.display()))?
    };

    let value: serde_json::Value =
        serde_json::from_str(&text).context("Brief is not valid JSON")?;
    Ok(PlanningInput::from_value(value)?.with_rounds(cli.rounds))
}

/// Cancel the session on the first Ctrl-C.
fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling session");
            token.cancel();
        }
    });
}

fn print_result(
    format: OutputFormat,
    result: &SessionResult,
    plan: Option<&ExecutionPlan>,
) {
    let plan_markdown = plan.map(render_execution_markdown);
    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format_full(result, plan_markdown.as_deref()),
        OutputFormat::Document => {
            ConsoleFormatter::format_document(result, plan_markdown.as_deref())
        }
        OutputFormat::Json => ConsoleFormatter::format_json(result, plan),
    };
    println!("{}", output);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    info!("Starting Swarm Planner");

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    let input = read_brief(&cli)?;
    let brief = input.brief.clone();

    // === Dependency Injection ===
    let gateway = Arc::new(HttpReasoningGateway::from_config(&config.reasoning)?);
    let cancellation = CancellationToken::new();
    spawn_interrupt_handler(cancellation.clone());

    let mut use_case =
        RunPlanningUseCase::new(Arc::clone(&gateway), Arc::new(MarkdownDocumentRenderer))
            .with_config(
                config
                    .planning
                    .to_planning_config(config.reasoning.honor_model_hints),
            )
            .with_cancellation(cancellation);
    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::new(path)
    {
        info!("Writing transcript to {}", logger.path().display());
        let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
        use_case = use_case.with_conversation_logger(logger);
    }

    // Streaming: events are the whole output
    if cli.stream {
        let sink = NdjsonEventSink::stdout();
        use_case.plan_stream(input, &sink).await?;
        return Ok(());
    }

    let result = if cli.quiet {
        use_case.plan(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.plan_stream(input, &progress).await?
    };

    let plan = if config.planning.execution_plan {
        Some(
            DraftExecutionPlanUseCase::new(gateway)
                .execute(&brief, &result)
                .await,
        )
    } else {
        None
    };

    let format = config
        .output
        .resolve_format(cli.output.map(OutputFormat::from));
    print_result(format, &result, plan.as_ref());

    Ok(())
}
