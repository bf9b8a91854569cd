// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! ParsePush: push-notification operations.
//!
//! Typed wrappers over the native `ParsePushNotifications` handler: the app
//! badge, channel subscriptions and the notification the app was launched
//! from. Every operation comes in two forms:
//!
//! - callback form (`count`, `subscribe`, ...) taking a success and a
//!   failure callback and returning the call's [`CallId`];
//! - future form (`count_async`, `subscribe_async`, ...) returning a
//!   [`Pending`] that resolves to the typed result.
//!
//! Both forms return a malformed call (e.g. a namespace containing
//! whitespace) as a `ContractViolation` before anything reaches the native
//! side. Arguments such as channel names are forwarded as given; the native
//! handler reports the ones it refuses.

pub mod badge;
pub mod channels;
pub mod launch;

use std::sync::Arc;

use parsepush_bridge::{Dispatcher, Pending, Transport};
use parsepush_core::{BridgeConfig, BridgeError, CallId, FromValue, Result, Value};

pub use badge::Badge;
pub use channels::Channels;
pub use launch::LaunchNotification;
pub use parsepush_core::config::DEFAULT_NAMESPACE as NAMESPACE;

/// Operation names understood by the native handler. Argument order for
/// each is fixed by the handler's positional signature.
pub mod ops {
    /// `[]` → badge count.
    pub const GET_NUMBER_OF_NOTIFICATIONS: &str = "getNumberOfNotifications";
    /// `[]` → acknowledgement.
    pub const CLEAR_NOTIFICATIONS: &str = "clearNotifications";
    /// `[amount]` → acknowledgement.
    pub const DEDUCT_FROM_BADGE: &str = "deductFromActiveNotificationsBadge";
    /// `[channelName]` → acknowledgement.
    pub const SUBSCRIBE_TO_CHANNEL: &str = "subscribeToChannel";
    /// `[channelName]` → acknowledgement.
    pub const UNSUBSCRIBE_FROM_CHANNEL: &str = "unsubscribeFromChannel";
    /// `[]` → list of channel names.
    pub const GET_SUBSCRIBED_CHANNELS: &str = "getSubscribedChannels";
    /// `[]` → launch payload or nothing.
    pub const GET_LAUNCH_NOTIFICATION_DATA: &str = "getLaunchNotificationData";
}

/// Entry point for all push-notification operations.
#[derive(Debug, Clone)]
pub struct PushNotifications {
    dispatcher: Dispatcher,
    namespace: String,
}

impl PushNotifications {
    /// Address the default `ParsePushNotifications` handler.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            namespace: NAMESPACE.to_string(),
        }
    }

    /// Build from a transport and a loaded config (which may rename the
    /// handler group).
    pub fn with_config(transport: Arc<dyn Transport>, config: &BridgeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dispatcher: Dispatcher::with_config(transport, config),
            namespace: config.namespace.clone(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Badge operations.
    pub fn badge(&self) -> Badge<'_> {
        Badge::new(self)
    }

    /// Channel subscription operations.
    pub fn channels(&self) -> Channels<'_> {
        Channels::new(self)
    }

    /// Fetch the notification the app was launched from.
    ///
    /// Succeeds with `None` when the app was not launched from a
    /// notification.
    pub fn launch_data<S, E>(&self, on_success: S, on_failure: E) -> Result<CallId>
    where
        S: FnOnce(Option<LaunchNotification>) + Send + 'static,
        E: FnOnce(BridgeError) + Send + 'static,
    {
        self.dispatch::<Option<LaunchNotification>, _, _>(
            ops::GET_LAUNCH_NOTIFICATION_DATA,
            vec![],
            on_success,
            on_failure,
        )
    }

    pub fn launch_data_async(&self) -> Result<Pending<Option<LaunchNotification>>> {
        self.request(ops::GET_LAUNCH_NOTIFICATION_DATA, vec![])
    }

    /// Submit `operation` and decode its result into `T` before handing it
    /// to `on_success`. A result that does not decode goes to `on_failure`.
    pub(crate) fn dispatch<T, S, E>(
        &self,
        operation: &'static str,
        arguments: Vec<Value>,
        on_success: S,
        on_failure: E,
    ) -> Result<CallId>
    where
        T: FromValue + 'static,
        S: FnOnce(T) + Send + 'static,
        E: FnOnce(BridgeError) + Send + 'static,
    {
        self.dispatcher
            .submit(&self.namespace, operation, arguments, move |outcome| {
                match outcome.and_then(T::from_value) {
                    Ok(value) => on_success(value),
                    Err(err) => {
                        if let BridgeError::UnexpectedResult(detail) = &err {
                            tracing::warn!(operation, %detail, "native result did not decode");
                        }
                        on_failure(err)
                    }
                }
            })
    }

    pub(crate) fn request<T: FromValue + 'static>(
        &self,
        operation: &'static str,
        arguments: Vec<Value>,
    ) -> Result<Pending<T>> {
        self.dispatcher.call(&self.namespace, operation, arguments)
    }
}
