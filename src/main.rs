//! Parley - minimal chat-completion client
//!
//! Demo entry point: sends one fixed prompt and prints the reply.

use std::process::ExitCode;

use tracing::{debug, info, warn};

use parley::{cli, metrics};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    if let Err(e) = cli::init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = metrics::init_metrics() {
        warn!(error = %e, "Metrics disabled");
    }

    info!("Starting Parley");

    let code = match cli::run().await {
        Ok(reply) => {
            println!("{}", reply);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", cli::diagnostic(&e));
            ExitCode::from(cli::exit_code(&e))
        }
    };

    if let Some(rendered) = metrics::render() {
        debug!(metrics = %rendered, "Final metrics snapshot");
    }

    code
}
