// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! Virtual machine abstraction providing the container runtime's address

/// The environment hosting the container runtime
///
/// On a docker-machine style setup this is a real VM; on native Docker the
/// host itself plays the role and is always running.
pub trait Machine {
    /// Whether the environment is up at all
    fn running(&self) -> bool;

    /// IP address workloads should use as their DNS nameserver
    fn vm_ip(&self) -> &str;
}

/// A machine with a fixed address that is always considered running
///
/// Used when the runtime is native and the target IP is supplied directly.
#[derive(Debug, Clone)]
pub struct StaticMachine {
    ip: String,
}

impl StaticMachine {
    pub fn new(ip: impl Into<String>) -> Self {
        StaticMachine { ip: ip.into() }
    }
}

impl Machine for StaticMachine {
    fn running(&self) -> bool {
        true
    }

    fn vm_ip(&self) -> &str {
        &self.ip
    }
}
