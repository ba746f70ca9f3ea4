// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! CLI command implementations

pub mod proxy;
