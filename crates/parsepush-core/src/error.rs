// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the ParsePush bridge.

use thiserror::Error;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Raised locally, before anything crosses the boundary --
    #[error("contract violation: {0}")]
    ContractViolation(String),

    // -- Delivered through the failure path of a call --
    #[error("{operation} failed: {message}")]
    Boundary { operation: String, message: String },

    #[error("{operation} was released by the transport without a result")]
    Dropped { operation: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected result: {0}")]
    UnexpectedResult(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// True for errors raised synchronously by a malformed call.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, BridgeError::ContractViolation(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_error_names_operation() {
        let err = BridgeError::Boundary {
            operation: "subscribeToChannel".into(),
            message: "invalid channel name".into(),
        };
        assert_eq!(
            err.to_string(),
            "subscribeToChannel failed: invalid channel name"
        );
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn contract_violation_is_flagged() {
        let err = BridgeError::ContractViolation("empty operation".into());
        assert!(err.is_contract_violation());
    }
}
