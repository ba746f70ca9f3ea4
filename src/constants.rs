// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

/// Name of the single managed proxy container
pub const CONTAINER_NAME: &str = "dockdns_http_proxy";

/// Pinned proxy image; upgrading the tag is a deliberate maintenance action
pub const IMAGE_NAME: &str = "codekitchen/dinghy-http-proxy:2.3.1";

/// Directory the host resolver reads per-suffix configuration from
pub const RESOLVER_DIR: &str = "/etc/resolver";

/// UDP port the proxy container answers DNS on
pub const DNS_PORT: u16 = 19322;

/// Default domain suffix proxied hostnames resolve under
pub const DEFAULT_DOMAIN: &str = "docker";

/// Mode installed on the resolver file (read-all, write-owner)
pub const RESOLVER_FILE_MODE: &str = "644";

/// Container runtime control socket mounted into the proxy
pub const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Subsystem name surfaced in privileged-step failures
pub const SUBSYSTEM: &str = "Proxy";
