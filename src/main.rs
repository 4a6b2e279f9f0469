//! Issueflow CLI - Move tracked issues through a permission-gated workflow

use clap::Parser;
use issueflow::cli::{Cli, Commands};
use issueflow::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code(), e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> issueflow::Result<()> {
    let cwd = cli.cwd.as_deref();
    match cli.command {
        Some(Commands::Init { force }) => {
            issueflow::cli::commands::init::run(cwd, force, cli.dry_run).await
        }
        Some(Commands::List { json, status }) => {
            issueflow::cli::commands::list::run(cwd, json, status.as_deref()).await
        }
        Some(Commands::Show { key, json }) => {
            issueflow::cli::commands::show::run(cwd, &key, json).await
        }
        Some(Commands::Transitions { key, login, json }) => {
            issueflow::cli::commands::transitions::run(cwd, &key, login.as_deref(), json).await
        }
        Some(Commands::Transition { key, transition, login }) => {
            issueflow::cli::commands::transition::run(
                cwd,
                &key,
                &transition,
                login.as_deref(),
                cli.dry_run,
            )
            .await
        }
        Some(Commands::Workflow { json }) => {
            issueflow::cli::commands::workflow::run(cwd, json).await
        }
        Some(Commands::Check { permission, login, component }) => {
            issueflow::cli::commands::check::run(
                cwd,
                &permission,
                login.as_deref(),
                component.as_deref(),
            )
            .await
        }
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
