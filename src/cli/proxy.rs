// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! Proxy lifecycle commands

use anyhow::{Context, Result};
use clap::Subcommand;

use dockdns::config::{ProxyConfig, Settings};
use dockdns::machine::StaticMachine;
use dockdns::privileged::Sudo;
use dockdns::proxy::ProxyController;
use dockdns::runtime::{DockerCli, RemoveOutcome};
use dockdns::{configure_resolver, resolver_configured};

/// Nameserver address used when no target IP is configured; on native
/// Docker the host itself answers DNS
const DEFAULT_TARGET_IP: &str = "127.0.0.1";

#[derive(Subcommand)]
pub enum ProxyCommands {
    /// Start the DNS and HTTP proxy container, configuring host DNS if needed
    Up {
        /// Domain suffix to resolve (default from config file, else "docker")
        #[arg(long)]
        domain: Option<String>,
        /// Nameserver IP: the address of the machine running the container runtime
        #[arg(long)]
        ip: Option<String>,
        /// Do not publish HTTP/HTTPS ports on the host
        #[arg(long)]
        no_http: bool,
    },
    /// Remove the proxy container (resolver configuration is left in place)
    Down,
    /// Show whether the proxy container is running
    Status {
        /// Domain suffix to resolve
        #[arg(long)]
        domain: Option<String>,
        /// Nameserver IP
        #[arg(long)]
        ip: Option<String>,
    },
    /// Configure host DNS resolution without starting the proxy
    Setup {
        /// Domain suffix to resolve
        #[arg(long)]
        domain: Option<String>,
        /// Nameserver IP
        #[arg(long)]
        ip: Option<String>,
    },
}

pub fn execute(command: ProxyCommands) -> Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    match command {
        ProxyCommands::Up {
            domain,
            ip,
            no_http,
        } => up_command(&settings, domain, ip, no_http),
        ProxyCommands::Down => down_command(&settings),
        ProxyCommands::Status { domain, ip } => status_command(&settings, domain, ip),
        ProxyCommands::Setup { domain, ip } => setup_command(&settings, domain, ip),
    }
}

fn controller(
    settings: &Settings,
    domain: Option<String>,
    ip: Option<String>,
) -> Result<ProxyController<StaticMachine, DockerCli, Sudo>> {
    let domain = domain.unwrap_or_else(|| settings.domain().to_string());
    let ip = ip
        .or_else(|| settings.target_ip.clone())
        .unwrap_or_else(|| DEFAULT_TARGET_IP.to_string());

    let config = ProxyConfig::new(domain, ip.clone())?;

    Ok(ProxyController::new(
        config,
        StaticMachine::new(ip),
        DockerCli::new(),
        Sudo,
    ))
}

fn up_command(
    settings: &Settings,
    domain: Option<String>,
    ip: Option<String>,
    no_http: bool,
) -> Result<()> {
    let expose_proxy = if no_http {
        false
    } else {
        settings.expose_proxy.unwrap_or(true)
    };

    let controller = controller(settings, domain, ip)?;

    println!(
        "Starting DNS{}",
        if expose_proxy { " and HTTP proxy" } else { "" }
    );

    if !resolver_configured(controller.config()) {
        println!("setting up DNS resolution, this will require sudo");
    }

    controller.up(expose_proxy)?;

    println!(
        "Proxy up; *.{} now resolves to {}",
        controller.config().domain,
        controller.config().target_ip
    );

    Ok(())
}

fn down_command(settings: &Settings) -> Result<()> {
    let controller = controller(settings, None, None)?;

    match controller.down()? {
        RemoveOutcome::Removed => println!("Proxy container removed"),
        RemoveOutcome::Absent => println!("Proxy container was not running"),
    }

    Ok(())
}

fn status_command(settings: &Settings, domain: Option<String>, ip: Option<String>) -> Result<()> {
    let controller = controller(settings, domain, ip)?;

    println!("{}", controller.status());

    Ok(())
}

fn setup_command(settings: &Settings, domain: Option<String>, ip: Option<String>) -> Result<()> {
    let controller = controller(settings, domain, ip)?;

    if resolver_configured(controller.config()) {
        println!(
            "Resolver for .{} already configured",
            controller.config().domain
        );
        return Ok(());
    }

    println!("setting up DNS resolution, this will require sudo");
    configure_resolver(controller.config(), &Sudo)?;

    println!(
        "Resolver configured: *.{} -> {}",
        controller.config().domain,
        controller.config().target_ip
    );

    Ok(())
}
