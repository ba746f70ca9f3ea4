// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! Proxy configuration and resolver file rendering

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DOMAIN, DNS_PORT, RESOLVER_DIR};

/// Immutable configuration for one proxy invocation
///
/// Derives the resolver file path and the exact text the host resolver
/// file must contain for this configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Domain suffix (e.g. `"docker"`); becomes the filename under the
    /// resolver directory
    pub domain: String,

    /// Nameserver IP the resolver file points at, i.e. the address of the
    /// machine running the container runtime
    pub target_ip: String,

    /// Directory resolver files live in
    pub resolver_dir: PathBuf,

    /// Host directory mounted into the proxy at `/etc/nginx/certs`
    pub certs_dir: PathBuf,
}

impl ProxyConfig {
    pub fn new(domain: impl Into<String>, target_ip: impl Into<String>) -> Result<Self> {
        Ok(ProxyConfig {
            domain: domain.into(),
            target_ip: target_ip.into(),
            resolver_dir: PathBuf::from(RESOLVER_DIR),
            certs_dir: default_certs_dir()?,
        })
    }

    /// Overrides the resolver directory
    pub fn with_resolver_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resolver_dir = dir.into();
        self
    }

    /// Path of the resolver file for this domain suffix
    pub fn resolver_file(&self) -> PathBuf {
        self.resolver_dir.join(&self.domain)
    }

    /// Exact content the resolver file must carry for this configuration
    pub fn resolver_contents(&self) -> String {
        format!(
            "# Generated by dockdns\nnameserver {}\nport {}\n",
            self.target_ip, DNS_PORT
        )
    }
}

/// Host directory for TLS certificates served by the proxy
fn default_certs_dir() -> Result<PathBuf> {
    let home = directories::BaseDirs::new().context("Failed to determine home directory")?;

    Ok(home.home_dir().join(".dockdns").join("certs"))
}

/// Optional on-disk defaults, merged under CLI flags
///
/// Read from `<config-dir>/dockdns/config.toml` when present.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    pub domain: Option<String>,
    pub target_ip: Option<String>,
    pub expose_proxy: Option<bool>,
}

impl Settings {
    /// Load settings from the user's config directory; absent file means
    /// empty settings
    pub fn load() -> Result<Self> {
        let base = directories::BaseDirs::new().context("Failed to determine home directory")?;
        let path = base.config_dir().join("dockdns").join("config.toml");

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or(DEFAULT_DOMAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(domain: &str, ip: &str) -> ProxyConfig {
        ProxyConfig::new(domain, ip)
            .unwrap()
            .with_resolver_dir("/tmp/resolver-test")
    }

    #[test]
    fn resolver_file_joins_domain_onto_dir() {
        let c = config("docker", "192.168.99.100");
        assert_eq!(
            c.resolver_file(),
            PathBuf::from("/tmp/resolver-test/docker")
        );
    }

    #[test]
    fn resolver_contents_exact_template() {
        let c = config("docker", "192.168.99.100");
        assert_eq!(
            c.resolver_contents(),
            "# Generated by dockdns\nnameserver 192.168.99.100\nport 19322\n"
        );
    }

    #[test]
    fn distinct_configs_render_distinct_contents() {
        let a = config("docker", "192.168.99.100");
        let b = config("docker", "10.0.0.5");
        let c = config("dev", "192.168.99.100");
        assert_ne!(a.resolver_contents(), b.resolver_contents());
        assert_eq!(a.resolver_contents(), c.resolver_contents());
        assert_ne!(a.resolver_file(), c.resolver_file());
    }

    #[test]
    fn settings_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(s.domain.is_none());
        assert_eq!(s.domain(), "docker");
    }

    #[test]
    fn settings_parse_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "domain = \"dev\"\ntarget_ip = \"10.1.2.3\"\nexpose_proxy = false\n")
            .unwrap();

        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.domain(), "dev");
        assert_eq!(s.target_ip.as_deref(), Some("10.1.2.3"));
        assert_eq!(s.expose_proxy, Some(false));
    }
}
