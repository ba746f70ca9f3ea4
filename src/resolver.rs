// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! Host resolver configuration for the proxied domain suffix
//!
//! The host resolver delegates a domain suffix to the proxy's DNS service via
//! a file under the resolver directory. The file either matches the rendered
//! template byte for byte or gets rewritten through the privileged path.

use anyhow::{Context, Result};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::config::ProxyConfig;
use crate::constants::RESOLVER_FILE_MODE;
use crate::error::ProxyError;
use crate::privileged::Privileged;

/// Whether the resolver file exists with exactly the expected content
///
/// Pure predicate; no version or partial-match tolerance.
pub fn resolver_configured(config: &ProxyConfig) -> bool {
    match std::fs::read_to_string(config.resolver_file()) {
        Ok(content) => content == config.resolver_contents(),
        Err(_) => false,
    }
}

/// Write the resolver file and restart the DNS cache daemon
///
/// The rendered content is staged in a temp file, then copied into place,
/// chmodded, and the cache daemon restarted, each via the privileged
/// executor. Any failed privileged step aborts with an error naming it.
pub fn configure_resolver<P: Privileged>(config: &ProxyConfig, privileged: &P) -> Result<()> {
    let resolver_file = config.resolver_file();

    if !config.resolver_dir.is_dir() {
        let step = format!("creating {}", config.resolver_dir.display());
        tracing::info!("{}", step);
        privileged
            .mkdir_p(&config.resolver_dir)
            .map_err(|e| ProxyError::privileged(step, e))?;
    }

    let mut staged = NamedTempFile::new().context("Failed to stage resolver file")?;
    staged
        .write_all(config.resolver_contents().as_bytes())
        .context("Failed to stage resolver file")?;
    staged.flush().context("Failed to stage resolver file")?;

    let step = format!("creating {}", resolver_file.display());
    tracing::info!("{}", step);
    privileged
        .copy(staged.path(), &resolver_file)
        .map_err(|e| ProxyError::privileged(step.clone(), e))?;
    privileged
        .chmod(RESOLVER_FILE_MODE, &resolver_file)
        .map_err(|e| ProxyError::privileged(step, e))?;

    tracing::info!("restarting mDNSResponder");
    privileged
        .restart_dns_cache()
        .map_err(|e| ProxyError::privileged("restarting mDNSResponder", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;

    /// Performs the filesystem steps for real (unprivileged) and records
    /// every call so tests can assert on the exact sequence
    #[derive(Default)]
    struct FakePrivileged {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl FakePrivileged {
        fn failing(op: &'static str) -> Self {
            FakePrivileged {
                calls: RefCell::new(Vec::new()),
                fail_on: Some(op),
            }
        }

        fn record(&self, op: &str) -> Result<()> {
            self.calls.borrow_mut().push(op.to_string());
            if self.fail_on == Some(op.split(' ').next().unwrap()) {
                anyhow::bail!("exit 1");
            }
            Ok(())
        }
    }

    impl Privileged for FakePrivileged {
        fn mkdir_p(&self, dir: &Path) -> Result<()> {
            self.record(&format!("mkdir {}", dir.display()))?;
            std::fs::create_dir_all(dir)?;
            Ok(())
        }

        fn copy(&self, src: &Path, dst: &Path) -> Result<()> {
            self.record(&format!("cp {}", dst.display()))?;
            std::fs::copy(src, dst)?;
            Ok(())
        }

        fn chmod(&self, mode: &str, path: &Path) -> Result<()> {
            self.record(&format!("chmod {} {}", mode, path.display()))
        }

        fn restart_dns_cache(&self) -> Result<()> {
            self.record("killall mDNSResponder")
        }
    }

    fn test_config(dir: &Path) -> ProxyConfig {
        ProxyConfig::new("docker", "192.168.99.100")
            .unwrap()
            .with_resolver_dir(dir)
    }

    #[test]
    fn not_configured_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        assert!(!resolver_configured(&config));
        // predicate is stable without intervening writes
        assert!(!resolver_configured(&config));
    }

    #[test]
    fn not_configured_when_content_stale() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::write(
            config.resolver_file(),
            "# Generated by dockdns\nnameserver 10.9.9.9\nport 19322\n",
        )
        .unwrap();
        assert!(!resolver_configured(&config));
    }

    #[test]
    fn configure_then_configured() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir.path().join("resolver"));
        let privileged = FakePrivileged::default();

        configure_resolver(&config, &privileged).unwrap();

        assert!(resolver_configured(&config));
        assert_eq!(
            std::fs::read_to_string(config.resolver_file()).unwrap(),
            "# Generated by dockdns\nnameserver 192.168.99.100\nport 19322\n"
        );

        let calls = privileged.calls.borrow();
        assert!(calls[0].starts_with("mkdir"));
        assert!(calls[1].starts_with("cp"));
        assert!(calls[2].starts_with("chmod 644"));
        assert_eq!(calls[3], "killall mDNSResponder");
    }

    #[test]
    fn mkdir_skipped_when_dir_exists() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let privileged = FakePrivileged::default();

        configure_resolver(&config, &privileged).unwrap();

        let calls = privileged.calls.borrow();
        assert!(calls.iter().all(|c| !c.starts_with("mkdir")));
    }

    #[test]
    fn other_configs_file_does_not_satisfy_predicate() {
        let dir = tempfile::tempdir().unwrap();
        let configured = test_config(dir.path());
        let privileged = FakePrivileged::default();
        configure_resolver(&configured, &privileged).unwrap();

        let other_ip = ProxyConfig::new("docker", "10.0.0.5")
            .unwrap()
            .with_resolver_dir(dir.path());
        assert!(!resolver_configured(&other_ip));

        let other_domain = ProxyConfig::new("dev", "192.168.99.100")
            .unwrap()
            .with_resolver_dir(dir.path());
        assert!(!resolver_configured(&other_domain));
    }

    #[test]
    fn failed_step_surfaces_step_and_subsystem() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let privileged = FakePrivileged::failing("killall");

        let err = configure_resolver(&config, &privileged).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Proxy"));
        assert!(msg.contains("restarting mDNSResponder"));
    }

    #[test]
    fn failed_copy_aborts_before_daemon_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let privileged = FakePrivileged::failing("cp");

        assert!(configure_resolver(&config, &privileged).is_err());
        let calls = privileged.calls.borrow();
        assert!(!calls.iter().any(|c| c == "killall mDNSResponder"));
    }
}
