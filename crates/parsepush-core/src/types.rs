// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core types for a single cross-boundary call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BridgeError, Result};

/// Serializable argument and result type carried across the boundary.
pub use serde_json::Value;

/// Identifier minted for every submitted call.
///
/// Only used for log correlation. The bridge keeps no table keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One pending invocation of a native handler.
///
/// `arguments` are positional and must match the handler's signature
/// exactly. Callbacks are not part of the descriptor; they travel with
/// the `Reply` that resolves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallDescriptor {
    /// Handler group on the native side (the plugin/service name).
    pub namespace: String,
    /// Action within that handler group.
    pub operation: String,
    /// Ordered positional arguments.
    pub arguments: Vec<Value>,
}

impl CallDescriptor {
    /// Build a descriptor, rejecting malformed identifiers.
    pub fn new(
        namespace: impl Into<String>,
        operation: impl Into<String>,
        arguments: Vec<Value>,
    ) -> Result<Self> {
        let namespace = namespace.into();
        let operation = operation.into();
        validate_identifier("namespace", &namespace)?;
        validate_identifier("operation", &operation)?;
        Ok(Self {
            namespace,
            operation,
            arguments,
        })
    }

    /// Encode the descriptor for transports that carry text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Check that `value` is usable as a namespace or operation name.
///
/// Identifiers must be non-empty and free of whitespace and control
/// characters; native handlers look them up verbatim.
pub fn validate_identifier(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(BridgeError::ContractViolation(format!("{kind} is empty")));
    }
    if let Some(c) = value
        .chars()
        .find(|c| c.is_whitespace() || c.is_control())
    {
        return Err(BridgeError::ContractViolation(format!(
            "{kind} {value:?} contains invalid character {c:?}"
        )));
    }
    Ok(())
}

/// Typed decoding of a success value delivered by the boundary.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;

    /// Whether `value` means "nothing" when decoding `Option<Self>`.
    fn is_absent(value: &Value) -> bool {
        value.is_null()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

/// Acknowledgement: whatever the handler sends back is discarded.
impl FromValue for () {
    fn from_value(_value: Value) -> Result<Self> {
        Ok(())
    }
}

impl FromValue for u32 {
    fn from_value(value: Value) -> Result<Self> {
        let wide = match &value {
            Value::Number(n) => n.as_u64(),
            // Some hosts hand integers back as strings.
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        wide.and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| unexpected("a non-negative integer", &value))
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self> {
        let parsed = match &value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| unexpected("an integer", &value))
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(unexpected("a string", &other)),
        }
    }
}

/// `null` is an empty list.
impl FromValue for Vec<String> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items.into_iter().map(String::from_value).collect(),
            other => Err(unexpected("a list of strings", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        if T::is_absent(&value) {
            return Ok(None);
        }
        T::from_value(value).map(Some)
    }
}

/// Build the error returned when a success value has the wrong shape.
pub fn unexpected(expected: &str, got: &Value) -> BridgeError {
    BridgeError::UnexpectedResult(format!("expected {expected}, got {got}"))
}
