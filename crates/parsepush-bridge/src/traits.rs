// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The boundary contract: a transport that carries calls to the native side,
// and the single-shot `Reply` it must resolve for each of them.

use parsepush_core::{BridgeError, CallDescriptor, CallId, Result, Value};

/// Callback receiving the outcome of one call. Invoked at most once.
pub type Completion = Box<dyn FnOnce(Result<Value>) + Send + 'static>;

/// Carries call descriptors across the execution boundary.
///
/// `submit` must return without waiting for the native handler. The
/// transport owns the `Reply` from then on and resolves it whenever the
/// handler finishes, from any thread and in any order relative to other
/// calls. Releasing a `Reply` without resolving it is reported to the caller
/// as `BridgeError::Dropped`.
pub trait Transport: Send + Sync {
    /// Human-readable transport name (e.g. "channel", "stub").
    fn name(&self) -> &str;

    /// Hand one call to the native side.
    fn submit(&self, call: CallDescriptor, reply: Reply);
}

/// Resolver for exactly one call.
///
/// Resolution methods consume the reply, so a call cannot be resolved
/// twice. A reply dropped unresolved fails its call with `Dropped`.
pub struct Reply {
    id: CallId,
    operation: String,
    completion: Option<Completion>,
}

impl Reply {
    pub(crate) fn new(id: CallId, operation: String, completion: Completion) -> Self {
        Self {
            id,
            operation,
            completion: Some(completion),
        }
    }

    pub fn id(&self) -> CallId {
        self.id
    }

    /// Operation this reply belongs to.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Deliver a success value.
    pub fn succeed(mut self, value: Value) {
        tracing::debug!(call = %self.id, operation = %self.operation, "call succeeded");
        self.resolve(Ok(value));
    }

    /// Deliver a failure.
    pub fn fail(mut self, error: BridgeError) {
        tracing::debug!(call = %self.id, operation = %self.operation, %error, "call failed");
        self.resolve(Err(error));
    }

    /// Deliver a failure reported by the native handler.
    pub fn reject(self, message: impl Into<String>) {
        let error = BridgeError::Boundary {
            operation: self.operation.clone(),
            message: message.into(),
        };
        self.fail(error);
    }

    /// Deliver a failure off the current stack.
    ///
    /// For transports that refuse a call inside `submit`: the callback must
    /// not run before the caller's `invoke` has returned. Uses the ambient
    /// tokio runtime when there is one and a short-lived thread otherwise.
    pub fn fail_detached(self, error: BridgeError) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { self.fail(error) });
            }
            Err(_) => {
                std::thread::spawn(move || self.fail(error));
            }
        }
    }

    /// Deliver either outcome.
    pub fn complete(self, outcome: Result<Value>) {
        match outcome {
            Ok(value) => self.succeed(value),
            Err(error) => self.fail(error),
        }
    }

    fn resolve(&mut self, outcome: Result<Value>) {
        if let Some(completion) = self.completion.take() {
            completion(outcome);
        }
    }
}

impl Drop for Reply {
    fn drop(&mut self) {
        if self.completion.is_some() {
            tracing::warn!(
                call = %self.id,
                operation = %self.operation,
                "reply dropped without a result"
            );
            let operation = self.operation.clone();
            self.resolve(Err(BridgeError::Dropped { operation }));
        }
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reply")
            .field("id", &self.id)
            .field("operation", &self.operation)
            .field("resolved", &self.completion.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

    fn recording_reply() -> (Reply, Arc<Mutex<Vec<Result<Value>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reply = Reply::new(
            CallId::new(),
            "getNumberOfNotifications".into(),
            Box::new(move |outcome| sink.lock().unwrap().push(outcome)),
        );
        (reply, seen)
    }

    #[test]
    fn succeed_delivers_once() {
        let (reply, seen) = recording_reply();
        reply.succeed(json!(3));
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(*seen[0].as_ref().unwrap(), json!(3));
    }

    #[test]
    fn reject_becomes_boundary_error() {
        let (reply, seen) = recording_reply();
        reply.reject("permission denied");
        let seen = seen.lock().unwrap();
        assert!(matches!(
            &seen[0],
            Err(BridgeError::Boundary { operation, message })
                if operation == "getNumberOfNotifications" && message == "permission denied"
        ));
    }

    #[test]
    fn dropping_unresolved_reply_fails_the_call() {
        let (reply, seen) = recording_reply();
        drop(reply);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(matches!(&seen[0], Err(BridgeError::Dropped { .. })));
    }

    #[tokio::test]
    async fn detached_failure_runs_after_the_caller_returns() {
        let (tx, mut rx) = tokio::sync::oneshot::channel();
        let reply = Reply::new(
            CallId::new(),
            "subscribeToChannel".into(),
            Box::new(move |outcome| {
                let _ = tx.send(outcome);
            }),
        );
        reply.fail_detached(BridgeError::Transport("host queue is full".into()));
        assert!(rx.try_recv().is_err());

        let outcome = rx.await.unwrap();
        assert!(matches!(outcome, Err(BridgeError::Transport(_))));
    }

    #[test]
    fn detached_failure_without_runtime_still_resolves() {
        let (tx, rx) = std::sync::mpsc::channel();
        let reply = Reply::new(
            CallId::new(),
            "clearNotifications".into(),
            Box::new(move |outcome| tx.send(outcome).unwrap()),
        );
        reply.fail_detached(BridgeError::PlatformUnavailable);
        let outcome = rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        assert!(matches!(outcome, Err(BridgeError::PlatformUnavailable)));
    }
}
