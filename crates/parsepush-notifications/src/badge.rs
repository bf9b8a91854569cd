// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// App icon badge: read, clear, and deduct from the active notification count.
//
// The counter itself lives on the native side.

use parsepush_bridge::Pending;
use parsepush_core::{BridgeError, CallId, Result, Value};

use crate::{PushNotifications, ops};

/// Badge operations, borrowed from [`PushNotifications::badge`].
#[derive(Debug, Clone, Copy)]
pub struct Badge<'a> {
    push: &'a PushNotifications,
}

impl<'a> Badge<'a> {
    pub(crate) fn new(push: &'a PushNotifications) -> Self {
        Self { push }
    }

    /// Current number shown on the badge.
    pub fn count<S, E>(&self, on_success: S, on_failure: E) -> Result<CallId>
    where
        S: FnOnce(u32) + Send + 'static,
        E: FnOnce(BridgeError) + Send + 'static,
    {
        self.push.dispatch::<u32, _, _>(
            ops::GET_NUMBER_OF_NOTIFICATIONS,
            vec![],
            on_success,
            on_failure,
        )
    }

    pub fn count_async(&self) -> Result<Pending<u32>> {
        self.push.request(ops::GET_NUMBER_OF_NOTIFICATIONS, vec![])
    }

    /// Reset the badge to zero.
    pub fn clear<S, E>(&self, on_success: S, on_failure: E) -> Result<CallId>
    where
        S: FnOnce(()) + Send + 'static,
        E: FnOnce(BridgeError) + Send + 'static,
    {
        self.push.dispatch::<(), _, _>(
            ops::CLEAR_NOTIFICATIONS,
            vec![],
            on_success,
            on_failure,
        )
    }

    pub fn clear_async(&self) -> Result<Pending<()>> {
        self.push.request(ops::CLEAR_NOTIFICATIONS, vec![])
    }

    /// Subtract `amount` from the badge.
    pub fn deduct<S, E>(&self, amount: u32, on_success: S, on_failure: E) -> Result<CallId>
    where
        S: FnOnce(()) + Send + 'static,
        E: FnOnce(BridgeError) + Send + 'static,
    {
        self.push.dispatch::<(), _, _>(
            ops::DEDUCT_FROM_BADGE,
            deduct_args(amount),
            on_success,
            on_failure,
        )
    }

    pub fn deduct_async(&self, amount: u32) -> Result<Pending<()>> {
        self.push.request(ops::DEDUCT_FROM_BADGE, deduct_args(amount))
    }
}

fn deduct_args(amount: u32) -> Vec<Value> {
    vec![Value::from(amount)]
}
