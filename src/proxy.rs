// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! Proxy container lifecycle
//!
//! One named container provides DNS answers for the domain suffix plus
//! HTTP(S) reverse-proxying into other containers. `up` reconciles the host
//! resolver and recreates the container from scratch; `status` classifies
//! the runtime's view of it.

use anyhow::{Context, Result};

use crate::config::ProxyConfig;
use crate::constants::{CONTAINER_NAME, DNS_PORT, DOCKER_SOCKET, IMAGE_NAME};
use crate::machine::Machine;
use crate::privileged::Privileged;
use crate::resolver::{configure_resolver, resolver_configured};
use crate::runtime::{ContainerRuntime, RemoveOutcome};

/// Two-state classification of the proxy container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyStatus {
    Running,
    Stopped,
}

impl std::fmt::Display for ProxyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProxyStatus::Running => write!(f, "running"),
            ProxyStatus::Stopped => write!(f, "stopped"),
        }
    }
}

/// Drives the proxy container and the host resolver it depends on
pub struct ProxyController<M, R, P> {
    config: ProxyConfig,
    machine: M,
    runtime: R,
    privileged: P,
}

impl<M, R, P> ProxyController<M, R, P>
where
    M: Machine,
    R: ContainerRuntime,
    P: Privileged,
{
    pub fn new(config: ProxyConfig, machine: M, runtime: R, privileged: P) -> Self {
        ProxyController {
            config,
            machine,
            runtime,
            privileged,
        }
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Bring the proxy up: reconcile the resolver file, then destroy and
    /// recreate the container
    pub fn up(&self, expose_proxy: bool) -> Result<()> {
        if !resolver_configured(&self.config) {
            configure_resolver(&self.config, &self.privileged)?;
        }

        std::fs::create_dir_all(&self.config.certs_dir).with_context(|| {
            format!("Failed to create certs dir {}", self.config.certs_dir.display())
        })?;

        // removal of a non-existent container is the normal first-run case;
        // anything else is logged but does not block the restart
        match self.runtime.remove(CONTAINER_NAME) {
            Ok(RemoveOutcome::Removed) => {
                tracing::debug!("removed existing {} container", CONTAINER_NAME)
            }
            Ok(RemoveOutcome::Absent) => {}
            Err(e) => tracing::warn!("ignoring container removal failure: {:#}", e),
        }

        self.runtime.run(&self.run_args(expose_proxy))
    }

    /// Tear the proxy down, leaving resolver state in place
    pub fn down(&self) -> Result<RemoveOutcome> {
        self.runtime.remove(CONTAINER_NAME)
    }

    /// Classify the container as running or stopped
    ///
    /// Safe to poll: inspection failures read as stopped.
    pub fn status(&self) -> ProxyStatus {
        if !self.machine.running() {
            return ProxyStatus::Stopped;
        }

        match self.runtime.inspect_running(CONTAINER_NAME) {
            Ok(output) if output.trim() == "true" => ProxyStatus::Running,
            _ => ProxyStatus::Stopped,
        }
    }

    /// Arguments after the runtime's `run` verb, in significant order
    fn run_args(&self, expose_proxy: bool) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-d".into(),
            "-p".into(),
            format!("{}:{}/udp", DNS_PORT, DNS_PORT),
            "-v".into(),
            format!("{}:/tmp/docker.sock:ro", DOCKER_SOCKET),
            "-v".into(),
            format!("{}:/etc/nginx/certs", self.config.certs_dir.display()),
            "-e".into(),
            format!("CONTAINER_NAME={}", CONTAINER_NAME),
            "-e".into(),
            format!("DOMAIN_TLD={}", self.config.domain),
            "-e".into(),
            format!("DNS_IP={}", self.config.target_ip),
        ];

        if expose_proxy {
            args.extend(["-p".into(), "80:80".into(), "-p".into(), "443:443".into()]);
        }

        args.extend(["--name".into(), CONTAINER_NAME.into(), IMAGE_NAME.into()]);

        args
    }
}
