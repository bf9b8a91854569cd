// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};
use crate::types::validate_identifier;

/// Native handler group the push-notification plugin registers under.
pub const DEFAULT_NAMESPACE: &str = "ParsePushNotifications";

/// Persistent bridge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Handler group every facade call is addressed to.
    pub namespace: String,
    /// Log failures that have no failure handler at `error` level
    /// (otherwise `debug`).
    pub report_unhandled_failures: bool,
    /// Bound of the queue between the channel transport and the host.
    pub host_queue_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            report_unhandled_failures: true,
            host_queue_capacity: 64,
        }
    }
}

impl BridgeConfig {
    /// Load a JSON config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate_identifier("namespace", &self.namespace)?;
        if self.host_queue_capacity == 0 {
            return Err(BridgeError::ContractViolation(
                "host_queue_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BridgeConfig::load(dir.path().join("bridge.json")).unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.namespace, "ParsePushNotifications");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.json");
        let config = BridgeConfig {
            namespace: "PushPlugin".into(),
            report_unhandled_failures: false,
            host_queue_capacity: 8,
        };
        config.save(&path).unwrap();
        assert_eq!(BridgeConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.json");
        std::fs::write(&path, r#"{ "host_queue_capacity": 4 }"#).unwrap();
        let config = BridgeConfig::load(&path).unwrap();
        assert_eq!(config.host_queue_capacity, 4);
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert!(config.report_unhandled_failures);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            BridgeConfig::load(&path),
            Err(BridgeError::Serialization(_))
        ));
    }

    #[test]
    fn empty_namespace_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.json");
        std::fs::write(&path, r#"{ "namespace": "" }"#).unwrap();
        assert!(BridgeConfig::load(&path).unwrap_err().is_contract_violation());
    }
}
