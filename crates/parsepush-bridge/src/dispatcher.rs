// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Call dispatcher.
//
// Turns (namespace, operation, arguments) into a `CallDescriptor`, hands it
// to the transport together with a `Reply`, and returns immediately. The
// outcome reaches the caller later through a callback or a `Pending` future.
// The dispatcher keeps no per-call state: everything a call needs travels
// inside its `Reply`.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parsepush_core::{
    BridgeConfig, BridgeError, CallDescriptor, CallId, FromValue, Result, Value,
};
use tokio::sync::oneshot;
use tracing::{debug, error, instrument};

use crate::traits::{Completion, Reply, Transport};

/// Success callback for [`Dispatcher::invoke`].
pub type SuccessCallback = Box<dyn FnOnce(Value) + Send + 'static>;

/// Failure callback for [`Dispatcher::invoke`].
pub type FailureCallback = Box<dyn FnOnce(BridgeError) + Send + 'static>;

/// Routes calls to a [`Transport`].
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    report_unhandled: bool,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            report_unhandled: true,
        }
    }

    pub fn with_config(transport: Arc<dyn Transport>, config: &BridgeConfig) -> Self {
        Self {
            transport,
            report_unhandled: config.report_unhandled_failures,
        }
    }

    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Submit a call with separate success and failure callbacks.
    ///
    /// Either callback may be absent. A failure with no failure callback
    /// is logged instead of being discarded. Malformed identifiers are
    /// returned as `ContractViolation` and nothing reaches the transport.
    pub fn invoke(
        &self,
        namespace: &str,
        operation: &str,
        arguments: Vec<Value>,
        on_success: Option<SuccessCallback>,
        on_failure: Option<FailureCallback>,
    ) -> Result<CallId> {
        let report_unhandled = self.report_unhandled;
        let operation_name = operation.to_string();
        self.submit(namespace, operation, arguments, move |outcome| match outcome {
            Ok(value) => match on_success {
                Some(callback) => callback(value),
                None => debug!(operation = %operation_name, "no success handler; result discarded"),
            },
            Err(err) => match on_failure {
                Some(callback) => callback(err),
                None => report_unhandled_failure(report_unhandled, &operation_name, &err),
            },
        })
    }

    /// Submit a call whose outcome goes to a single completion callback.
    #[instrument(skip_all, fields(namespace = %namespace, operation = %operation))]
    pub fn submit<F>(
        &self,
        namespace: &str,
        operation: &str,
        arguments: Vec<Value>,
        completion: F,
    ) -> Result<CallId>
    where
        F: FnOnce(Result<Value>) + Send + 'static,
    {
        let call = CallDescriptor::new(namespace, operation, arguments)?;
        let id = CallId::new();
        let completion: Completion = Box::new(completion);
        let reply = Reply::new(id, call.operation.clone(), completion);

        debug!(
            call = %id,
            transport = self.transport.name(),
            arguments = call.arguments.len(),
            "submitting call"
        );
        self.transport.submit(call, reply);
        Ok(id)
    }

    /// Submit a call and get its typed outcome as a future.
    pub fn call<T: FromValue + 'static>(
        &self,
        namespace: &str,
        operation: &str,
        arguments: Vec<Value>,
    ) -> Result<Pending<T>> {
        let (tx, rx) = oneshot::channel();
        let operation_name = operation.to_string();
        let id = self.submit(namespace, operation, arguments, move |outcome| {
            // The receiver may be gone if the caller stopped waiting.
            let _ = tx.send(outcome);
        })?;
        Ok(Pending {
            id,
            operation: operation_name,
            rx,
            _result: PhantomData,
        })
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("transport", &self.transport.name())
            .field("report_unhandled", &self.report_unhandled)
            .finish()
    }
}

fn report_unhandled_failure(report: bool, operation: &str, err: &BridgeError) {
    if report {
        error!(operation = %operation, error = %err, "unhandled bridge failure");
    } else {
        debug!(operation = %operation, error = %err, "unhandled bridge failure");
    }
}

/// Outcome of a call submitted with [`Dispatcher::call`].
///
/// Dropping a `Pending` does not cancel the call; the result is discarded
/// when it arrives.
#[must_use = "a Pending call does nothing observable unless awaited"]
pub struct Pending<T> {
    id: CallId,
    operation: String,
    rx: oneshot::Receiver<Result<Value>>,
    _result: PhantomData<fn() -> T>,
}

impl<T> Pending<T> {
    pub fn id(&self) -> CallId {
        self.id
    }
}

impl<T: FromValue> Future for Pending<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome.and_then(T::from_value)),
            // Sender dropped without sending: the completion itself was lost.
            Poll::Ready(Err(_)) => Poll::Ready(Err(BridgeError::Dropped {
                operation: this.operation.clone(),
            })),
        }
    }
}
