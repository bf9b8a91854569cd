// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Payload of the notification that launched the app.
//
// iOS hosts deliver the APNs dictionary (standard keys nested under `aps`),
// Android hosts deliver the Parse data object, sometimes still encoded as a
// JSON string. Both shapes decode into `LaunchNotification`.

use serde::{Deserialize, Serialize};
use serde_json::Map;

use parsepush_core::{FromValue, Result, Value, unexpected};

/// Notification payload the app was launched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchNotification(Map<String, Value>);

impl LaunchNotification {
    pub fn new(payload: Map<String, Value>) -> Self {
        Self(payload)
    }

    /// Alert text. For an APNs alert dictionary this is its `body`.
    pub fn alert(&self) -> Option<&str> {
        match self.standard("alert")? {
            Value::String(text) => Some(text.as_str()),
            Value::Object(alert) => alert.get("body").and_then(Value::as_str),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        if let Some(title) = self.0.get("title").and_then(Value::as_str) {
            return Some(title);
        }
        self.aps()?
            .get("alert")?
            .get("title")
            .and_then(Value::as_str)
    }

    /// Badge number carried by the notification.
    pub fn badge(&self) -> Option<u32> {
        self.standard("badge")
            .and_then(|badge| u32::from_value(badge.clone()).ok())
    }

    pub fn sound(&self) -> Option<&str> {
        self.standard("sound").and_then(Value::as_str)
    }

    /// Any top-level key, including app-defined data.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    fn aps(&self) -> Option<&Map<String, Value>> {
        self.0.get("aps").and_then(Value::as_object)
    }

    /// Look up a standard key at the top level, then under `aps`.
    fn standard(&self, key: &str) -> Option<&Value> {
        self.0
            .get(key)
            .or_else(|| self.aps().and_then(|aps| aps.get(key)))
    }
}

impl FromValue for LaunchNotification {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(payload) => Ok(Self(payload)),
            Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
                Ok(Value::Object(payload)) => Ok(Self(payload)),
                _ => Err(unexpected(
                    "a notification object",
                    &Value::String(encoded),
                )),
            },
            other => Err(unexpected("a notification object", &other)),
        }
    }

    /// Hosts signal "not launched from a notification" with `null`, an
    /// empty string or an empty object.
    fn is_absent(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}
