mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{fmt, EnvFilter};

use authchain::error::JsonError;

const AUTHCHAIN_LOG_ENV: &str = "AUTHCHAIN_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Check {
            principal,
            password_stdin,
            origin,
            trace,
        } => cli::check::run(
            config,
            principal,
            *password_stdin,
            origin.as_deref(),
            *trace,
            cli.json,
        ),

        Commands::Validate => cli::validate::run(config, cli.json),

        Commands::HashPassword { password_stdin } => {
            cli::hash_password::run(*password_stdin, cli.json)
        }
    };

    if let Err(e) = result {
        if cli.json {
            match serde_json::to_string(&JsonError::from_error(&e)) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", e),
            }
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(e.exit_code());
    }
}

/// Diagnostics go to stderr; filter from AUTHCHAIN_LOG, default `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env(AUTHCHAIN_LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
