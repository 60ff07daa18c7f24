//! CLI entrypoint for expense-assistant
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use expense_application::{
    ChatParams, ConversationLogger, NoChatProgress, ProcessMessageInput, ProcessMessageUseCase,
};
use expense_domain::UserId;
use expense_infrastructure::{
    ConfigLoader, ExpenseToolExecutor, FileConfig, InMemoryExpenseRepository,
    JsonlConversationLogger, connect_backend,
};
use expense_presentation::{ChatRepl, Cli, ConsoleFormatter, ProgressReporter};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber and, with `--log-dir`, a daily log file.
///
/// The returned guard flushes the file writer on drop; keep it alive.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "expense-assistant.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    if let Some(rounds) = cli.max_tool_rounds {
        config.assistant.max_tool_rounds = rounds;
    }
    if let Some(path) = &cli.conversation_log {
        config.logging.conversation_log = Some(path.display().to_string());
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn build_use_case(config: &FileConfig) -> ProcessMessageUseCase {
    let backend = connect_backend(&config.assistant);

    let repository = Arc::new(InMemoryExpenseRepository::with_demo_data());
    let executor = ExpenseToolExecutor::new(repository).with_identity(
        UserId(config.demo.user_id),
        UserId(config.demo.reviewer_id),
    );

    let mut use_case = ProcessMessageUseCase::new(backend, Arc::new(executor))
        .with_params(ChatParams::default().with_max_tool_rounds(config.assistant.max_tool_rounds));

    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Conversation transcript: {}", logger.path().display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                use_case = use_case.with_conversation_logger(logger);
            }
            None => warn!("Conversation transcript disabled"),
        }
    }

    use_case
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        let config = load_config(&cli)?;
        println!();
        println!("{}", ConfigLoader::render(&config));
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    let use_case = build_use_case(&config);

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(use_case)
            .with_progress(!cli.quiet)
            .with_json(cli.json);
        repl.run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single message mode - message is required
    let Some(message) = cli.message else {
        bail!("A message is required. Use --chat for interactive mode.");
    };

    let token = CancellationToken::new();
    tokio::spawn({
        let token = token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        }
    });
    let use_case = use_case.with_cancellation(token);

    let input = ProcessMessageInput::new(message);
    let reply = if cli.quiet {
        use_case.execute(input, &NoChatProgress).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute(input, &progress).await
    };

    let output = if cli.json {
        ConsoleFormatter::format_json(&reply)
    } else {
        ConsoleFormatter::format_reply(&reply)
    };
    println!("{}", output);

    Ok(if reply.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    info!("Starting expense-assistant v{}", env!("CARGO_PKG_VERSION"));

    run(cli).await
}
