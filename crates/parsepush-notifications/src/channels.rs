// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Push channel subscriptions.
//
// Subscriptions are persisted by the native side. Channel names are
// forwarded as given: `""` is the broadcast channel, and names the native
// handler refuses come back as a `Boundary` failure.

use parsepush_bridge::Pending;
use parsepush_core::{BridgeError, CallId, Result, Value};

use crate::{PushNotifications, ops};

/// Channel operations, borrowed from [`PushNotifications::channels`].
#[derive(Debug, Clone, Copy)]
pub struct Channels<'a> {
    push: &'a PushNotifications,
}

impl<'a> Channels<'a> {
    pub(crate) fn new(push: &'a PushNotifications) -> Self {
        Self { push }
    }

    /// Subscribe this installation to `channel`.
    pub fn subscribe<S, E>(&self, channel: &str, on_success: S, on_failure: E) -> Result<CallId>
    where
        S: FnOnce(()) + Send + 'static,
        E: FnOnce(BridgeError) + Send + 'static,
    {
        self.push.dispatch::<(), _, _>(
            ops::SUBSCRIBE_TO_CHANNEL,
            channel_args(channel),
            on_success,
            on_failure,
        )
    }

    pub fn subscribe_async(&self, channel: &str) -> Result<Pending<()>> {
        self.push.request(ops::SUBSCRIBE_TO_CHANNEL, channel_args(channel))
    }

    /// Unsubscribe this installation from `channel`.
    pub fn unsubscribe<S, E>(&self, channel: &str, on_success: S, on_failure: E) -> Result<CallId>
    where
        S: FnOnce(()) + Send + 'static,
        E: FnOnce(BridgeError) + Send + 'static,
    {
        self.push.dispatch::<(), _, _>(
            ops::UNSUBSCRIBE_FROM_CHANNEL,
            channel_args(channel),
            on_success,
            on_failure,
        )
    }

    pub fn unsubscribe_async(&self, channel: &str) -> Result<Pending<()>> {
        self.push.request(ops::UNSUBSCRIBE_FROM_CHANNEL, channel_args(channel))
    }

    /// Channels this installation is subscribed to, in native order.
    pub fn list<S, E>(&self, on_success: S, on_failure: E) -> Result<CallId>
    where
        S: FnOnce(Vec<String>) + Send + 'static,
        E: FnOnce(BridgeError) + Send + 'static,
    {
        self.push.dispatch::<Vec<String>, _, _>(
            ops::GET_SUBSCRIBED_CHANNELS,
            vec![],
            on_success,
            on_failure,
        )
    }

    pub fn list_async(&self) -> Result<Pending<Vec<String>>> {
        self.push.request(ops::GET_SUBSCRIBED_CHANNELS, vec![])
    }
}

fn channel_args(channel: &str) -> Vec<Value> {
    vec![Value::from(channel)]
}
