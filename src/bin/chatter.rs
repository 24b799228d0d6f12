use arrrg::CommandLine;
use tracing_subscriber::EnvFilter;

use chatter::{brainstorm, Options};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let (options, free) = Options::from_command_line_relaxed("USAGE: chatter [OPTIONS]");
    if !free.is_empty() {
        tracing::warn!(ignored = ?free, "chatter takes no positional arguments");
    }
    let config = match options.config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(13);
        }
    };
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("could not listen for interrupts: {err}");
            std::future::pending::<()>().await;
        }
    };
    match brainstorm(config, shutdown).await {
        Ok(rounds) => {
            tracing::info!(rounds, "shutting down");
            println!("Caught the interrupt. Shutting down cleanly. Ideas saved.");
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
