// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! DockDNS CLI application

use anyhow::Result;
use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(name = "dockdns")]
#[command(about = "Resolve *.docker hostnames into local containers via a DNS/HTTP proxy", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: cli::proxy::ProxyCommands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Without -v: only WARN and ERROR (quiet mode)
    // With -v: INFO and up
    // With RUST_LOG set: whatever the environment asks for
    if std::env::var("RUST_LOG").is_err() {
        use tracing_subscriber::EnvFilter;

        let filter = if cli.verbose {
            EnvFilter::new("dockdns=info")
        } else {
            EnvFilter::new("dockdns=warn")
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_target(true)
            .init();
    }

    cli::proxy::execute(cli.command)
}
