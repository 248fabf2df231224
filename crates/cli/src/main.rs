//! Listin Agent CLI
//!
//! Main entry point for the listin command-line tool.
//! Compiles the store assistant's instruction from the knowledge document
//! and checks that a deployment is ready to serve it.

mod commands;
mod diagnostics;

use clap::{Parser, Subcommand};
use commands::{AgentCommand, CheckCommand, RenderCommand, TemplatesCommand};
use listin_core::config::{AppConfig, ConfigOverrides};
use listin_core::{logging, AppResult};
use std::path::PathBuf;
use std::process::ExitCode;

/// Listin Agent CLI - store support assistant configuration
#[derive(Parser, Debug)]
#[command(name = "listin")]
#[command(about = "Store support assistant configuration and readiness checks", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "LISTIN_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "LISTIN_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the store knowledge document
    #[arg(short, long, global = true, env = "LISTIN_DATA")]
    data: Option<PathBuf>,

    /// Instruction template id
    #[arg(short, long, global = true, env = "LISTIN_TEMPLATE")]
    template: Option<String>,

    /// Model identifier for the agent definition
    #[arg(short, long, global = true, env = "LISTIN_MODEL")]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (any non-empty NO_COLOR also disables it)
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check files, store data, environment and template readiness
    Check(CheckCommand),

    /// Print the compiled instruction
    Render(RenderCommand),

    /// Emit the agent definition for the hosting framework
    Agent(AgentCommand),

    /// List instruction templates
    Templates(TemplatesCommand),
}

fn main() -> AppResult<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load(ConfigOverrides {
        workspace: cli.workspace,
        config_file: cli.config,
        data_file: cli.data,
        template_id: cli.template,
        model: cli.model,
        log_level: cli.log_level,
        verbose: cli.verbose,
        no_color: cli.no_color,
        log_json: cli.log_json,
    })?;

    logging::init_logging(config.log_level.as_deref(), config.no_color, config.log_json)?;

    tracing::info!("Listin CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Knowledge document: {:?}", config.knowledge_path());
    tracing::debug!("Template: {}", config.template_id);

    let command_name = match &cli.command {
        Commands::Check(_) => "check",
        Commands::Render(_) => "render",
        Commands::Agent(_) => "agent",
        Commands::Templates(_) => "templates",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Check(cmd) => cmd.execute(&config),
        Commands::Render(cmd) => cmd.execute(&config).map(|_| true),
        Commands::Agent(cmd) => cmd.execute(&config).map(|_| true),
        Commands::Templates(cmd) => cmd.execute(&config).map(|_| true),
    };

    match &result {
        Ok(true) => tracing::info!("Command completed successfully"),
        Ok(false) => tracing::warn!("Command completed with failed checks"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    Ok(if result? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
