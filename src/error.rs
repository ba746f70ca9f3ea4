// Copyright 2025 DockDNS Contributors
// Licensed under GPL-3.0

//! Error types for proxy orchestration

use thiserror::Error;

/// Failures raised while driving the proxy and the host resolver
#[derive(Debug, Error)]
pub enum ProxyError {
    /// A privileged host operation failed; `step` is a human-readable
    /// description of what was being attempted
    #[error("error with the {subsystem} daemon during {step}: {detail}")]
    Privileged {
        subsystem: &'static str,
        step: String,
        detail: String,
    },

    /// The container runtime rejected or failed a command
    #[error("container runtime failed running `{command}`: {detail}")]
    Runtime { command: String, detail: String },
}

impl ProxyError {
    pub fn privileged(step: impl Into<String>, source: anyhow::Error) -> Self {
        ProxyError::Privileged {
            subsystem: crate::constants::SUBSYSTEM,
            step: step.into(),
            detail: format!("{:#}", source),
        }
    }
}
