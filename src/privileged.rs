// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! Elevated-privilege host operations
//!
//! Resolver setup touches root-owned paths and the system DNS cache, so each
//! step goes through this capability trait. Production code uses [`Sudo`];
//! tests substitute a recording stub.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Privileged host operations needed for resolver setup
pub trait Privileged {
    /// Create a directory (and parents) owned by root
    fn mkdir_p(&self, dir: &Path) -> Result<()>;

    /// Copy a file into a root-owned location
    fn copy(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Set a file's mode (octal string, e.g. `"644"`)
    fn chmod(&self, mode: &str, path: &Path) -> Result<()>;

    /// Restart the host's DNS cache daemon so new resolver files take effect
    fn restart_dns_cache(&self) -> Result<()>;
}

/// Shells out through `sudo`, blocking until each command exits
#[derive(Debug, Default)]
pub struct Sudo;

impl Sudo {
    fn run(&self, args: &[&str]) -> Result<()> {
        let status = Command::new("sudo")
            .args(args)
            .status()
            .with_context(|| format!("Failed to run sudo {}", args.join(" ")))?;

        if !status.success() {
            anyhow::bail!("sudo {} exited with {}", args.join(" "), status);
        }

        Ok(())
    }
}

impl Privileged for Sudo {
    fn mkdir_p(&self, dir: &Path) -> Result<()> {
        self.run(&["mkdir", "-p", &dir.to_string_lossy()])
    }

    fn copy(&self, src: &Path, dst: &Path) -> Result<()> {
        self.run(&["cp", &src.to_string_lossy(), &dst.to_string_lossy()])
    }

    fn chmod(&self, mode: &str, path: &Path) -> Result<()> {
        self.run(&["chmod", mode, &path.to_string_lossy()])
    }

    fn restart_dns_cache(&self) -> Result<()> {
        self.run(&["killall", "mDNSResponder"])
    }
}
