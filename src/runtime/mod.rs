// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! Container runtime abstraction

pub mod docker;

pub use docker::DockerCli;

use anyhow::Result;

/// Result of removing a container by name
///
/// Removing a container that never existed is an expected first-run case,
/// distinct from a removal that genuinely failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The container existed and was removed
    Removed,
    /// No container by that name existed
    Absent,
}

/// The container runtime the proxy container lives in
///
/// All operations block until the runtime command exits.
pub trait ContainerRuntime {
    /// Start a detached container; `args` is the full argument list after
    /// the runtime's `run` verb, in order
    fn run(&self, args: &[String]) -> Result<()>;

    /// Force-remove a named container and its volumes
    fn remove(&self, name: &str) -> Result<RemoveOutcome>;

    /// Inspect a container's running flag, returning raw stdout
    fn inspect_running(&self, name: &str) -> Result<String>;
}
