use std::fmt::Display;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use feather::config::Args;
use feather::server::{self, Shutdown};

const GREEN: &str = "\x1B[32m";
const RED: &str = "\x1B[31m";
const RESET: &str = "\x1B[0m";

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let mut cfg = match args.into_config() {
        Ok(cfg) => cfg,
        Err(e) => fail(format!("{e:#}")),
    };

    let default_level = if cfg.server.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let port = cfg.server.resolve_port();
    tracing::info!(port, "Opening connection");

    let shutdown = Shutdown::new();
    if let Err(e) = shutdown.listen_for_signals() {
        fail(e);
    }

    match server::run(&cfg, shutdown).await {
        Ok(report) => {
            eprintln!("{GREEN}Interrupt received. The server will stop");
            match report.socket_error {
                Some(e) => eprintln!("Last socket error: {e}{RESET}"),
                None => eprintln!("Last socket error: none{RESET}"),
            }
            // Workers still in flight are abandoned, not drained.
            std::process::exit(0);
        }
        Err(e) => fail(e),
    }
}

fn fail(msg: impl Display) -> ! {
    eprintln!("{RED}{msg}{RESET}");
    std::process::exit(1)
}
