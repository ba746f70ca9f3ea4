// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! Docker CLI shell-out implementation

use anyhow::{Context, Result};
use std::process::Command;

use crate::error::ProxyError;
use crate::runtime::{ContainerRuntime, RemoveOutcome};

/// Drives containers through the `docker` command line
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    pub fn new() -> Self {
        DockerCli {
            binary: "docker".to_string(),
        }
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for DockerCli {
    fn run(&self, args: &[String]) -> Result<()> {
        // stdio is inherited so the runtime's own error reporting reaches
        // the user unwrapped
        let status = Command::new(&self.binary)
            .arg("run")
            .args(args)
            .status()
            .with_context(|| format!("Failed to invoke {}", self.binary))?;

        if !status.success() {
            return Err(ProxyError::Runtime {
                command: format!("{} run", self.binary),
                detail: status.to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn remove(&self, name: &str) -> Result<RemoveOutcome> {
        let output = Command::new(&self.binary)
            .args(["rm", "-f", "-v", name])
            .output()
            .with_context(|| format!("Failed to invoke {}", self.binary))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        classify_remove(output.status.success(), &stderr).ok_or_else(|| {
            ProxyError::Runtime {
                command: format!("{} rm -f -v {}", self.binary, name),
                detail: stderr.trim().to_string(),
            }
            .into()
        })
    }

    fn inspect_running(&self, name: &str) -> Result<String> {
        let output = Command::new(&self.binary)
            .args(["inspect", "-f", "{{ .State.Running }}", name])
            .output()
            .with_context(|| format!("Failed to invoke {}", self.binary))?;

        if !output.status.success() {
            return Err(ProxyError::Runtime {
                command: format!("{} inspect {}", self.binary, name),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Map a removal exit into an outcome; `None` means a genuine failure
fn classify_remove(success: bool, stderr: &str) -> Option<RemoveOutcome> {
    if success {
        Some(RemoveOutcome::Removed)
    } else if stderr.contains("No such container") {
        Some(RemoveOutcome::Absent)
    } else {
        None
    }
}
