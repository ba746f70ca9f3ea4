// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! DockDNS - local DNS and HTTP proxy orchestration
//!
//! Wires a custom top-level domain (e.g. `*.docker`) to container workloads
//! by configuring the host resolver and running a single containerized
//! DNS/HTTP proxy.

pub mod config;
pub mod constants;
pub mod error;
pub mod machine;
pub mod privileged;
pub mod proxy;
pub mod resolver;
pub mod runtime;

pub use constants::*;

// Re-export commonly used types
pub use config::{ProxyConfig, Settings};
pub use error::ProxyError;
pub use machine::{Machine, StaticMachine};
pub use privileged::{Privileged, Sudo};
pub use proxy::{ProxyController, ProxyStatus};
pub use resolver::{configure_resolver, resolver_configured};
pub use runtime::{ContainerRuntime, DockerCli, RemoveOutcome};

/// Common error type for DockDNS operations
pub type Result<T> = std::result::Result<T, anyhow::Error>;
