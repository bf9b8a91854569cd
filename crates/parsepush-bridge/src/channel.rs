// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Queue-backed transport for hosts that pull calls from a channel.
//
// The app side holds a `ChannelTransport`; the native glue holds the
// matching `HostEndpoint`, takes `HostRequest`s off it, and resolves each
// request's `Reply` whenever its handler finishes. Replies may be resolved
// in any order. A call the queue cannot take fails after `submit` returns.

use chrono::{DateTime, Utc};
use parsepush_core::{BridgeConfig, BridgeError, CallDescriptor, Result, Value};
use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};
use tracing::{debug, warn};

use crate::traits::{Reply, Transport};

/// Create a connected transport/endpoint pair with a bounded queue.
///
/// A zero `capacity` is a `ContractViolation`.
pub fn channel(capacity: usize) -> Result<(ChannelTransport, HostEndpoint)> {
    if capacity == 0 {
        return Err(BridgeError::ContractViolation(
            "channel capacity must be at least 1".into(),
        ));
    }
    let (tx, rx) = mpsc::channel(capacity);
    Ok((ChannelTransport { tx }, HostEndpoint { rx }))
}

/// [`channel`] sized by `config.host_queue_capacity`.
pub fn from_config(config: &BridgeConfig) -> Result<(ChannelTransport, HostEndpoint)> {
    config.validate()?;
    debug!(capacity = config.host_queue_capacity, "creating host channel");
    channel(config.host_queue_capacity)
}

/// One call waiting for the host.
#[derive(Debug)]
pub struct HostRequest {
    pub call: CallDescriptor,
    pub reply: Reply,
    /// When the dispatcher handed the call to the transport.
    pub submitted_at: DateTime<Utc>,
}

impl HostRequest {
    /// Time the request has spent queued or in flight, in milliseconds.
    pub fn age_ms(&self) -> i64 {
        (Utc::now() - self.submitted_at).num_milliseconds()
    }
}

/// App-side half of [`channel`].
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::Sender<HostRequest>,
}

impl ChannelTransport {
    /// Whether the host endpoint has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Transport for ChannelTransport {
    fn name(&self) -> &str {
        "channel"
    }

    fn submit(&self, call: CallDescriptor, reply: Reply) {
        let request = HostRequest {
            call,
            reply,
            submitted_at: Utc::now(),
        };
        match self.tx.try_send(request) {
            Ok(()) => {}
            Err(TrySendError::Full(request)) => {
                warn!(operation = %request.call.operation, "host queue full");
                request
                    .reply
                    .fail_detached(BridgeError::Transport("host queue is full".into()));
            }
            Err(TrySendError::Closed(request)) => {
                warn!(operation = %request.call.operation, "host endpoint closed");
                request
                    .reply
                    .fail_detached(BridgeError::Transport("host endpoint is closed".into()));
            }
        }
    }
}

/// Host-side half of [`channel`].
#[derive(Debug)]
pub struct HostEndpoint {
    rx: mpsc::Receiver<HostRequest>,
}

impl HostEndpoint {
    /// Wait for the next call. `None` once every transport is dropped and
    /// the queue is drained.
    pub async fn recv(&mut self) -> Option<HostRequest> {
        self.rx.recv().await
    }

    /// Take the next call if one is already queued.
    pub fn try_recv(&mut self) -> Option<HostRequest> {
        match self.rx.try_recv() {
            Ok(request) => Some(request),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Resolve every incoming call with `handler` until all transports are
    /// gone.
    pub async fn serve<H>(mut self, mut handler: H)
    where
        H: FnMut(&CallDescriptor) -> Result<Value>,
    {
        while let Some(request) = self.recv().await {
            let outcome = handler(&request.call);
            debug!(
                operation = %request.call.operation,
                age_ms = request.age_ms(),
                ok = outcome.is_ok(),
                "host handled call"
            );
            request.reply.complete(outcome);
        }
        debug!("host endpoint drained");
    }

    /// Stop accepting calls. Calls already queued can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use serde_json::json;

    use super::*;
    use crate::dispatcher::Dispatcher;

    #[test]
    fn host_sees_descriptor_unchanged() {
        let (transport, mut host) = channel(4).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(transport));
        dispatcher
            .invoke("ns", "subscribeToChannel", vec![json!("sports")], None, None)
            .unwrap();

        let request = host.try_recv().unwrap();
        assert_eq!(request.call.namespace, "ns");
        assert_eq!(request.call.operation, "subscribeToChannel");
        assert_eq!(request.call.arguments, vec![json!("sports")]);
        assert!(request.age_ms() >= 0);
        request.reply.succeed(Value::Null);
        assert!(host.try_recv().is_none());
    }

    #[tokio::test]
    async fn full_queue_fails_the_call_after_invoke_returns() {
        let (transport, _host) = channel(1).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(transport));
        let returned = Arc::new(AtomicBool::new(false));
        let (tx, rx) = tokio::sync::oneshot::channel();

        dispatcher.invoke("ns", "op", vec![], None, None).unwrap();
        let seen_returned = Arc::clone(&returned);
        dispatcher
            .invoke(
                "ns",
                "op",
                vec![],
                None,
                Some(Box::new(move |e: BridgeError| {
                    let _ = tx.send((seen_returned.load(Ordering::SeqCst), e));
                })),
            )
            .unwrap();
        returned.store(true, Ordering::SeqCst);

        let (after_return, err) = rx.await.unwrap();
        assert!(after_return);
        assert!(matches!(&err, BridgeError::Transport(m) if m.contains("full")));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(channel(0).unwrap_err().is_contract_violation());
    }

    #[tokio::test]
    async fn config_sets_queue_capacity() {
        let config = BridgeConfig {
            host_queue_capacity: 2,
            ..Default::default()
        };
        let (transport, mut host) = from_config(&config).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(transport));

        let queued: Vec<_> = (0..2)
            .map(|_| dispatcher.call::<Value>("ns", "op", vec![]).unwrap())
            .collect();
        let overflow = dispatcher.call::<Value>("ns", "op", vec![]).unwrap();
        assert!(matches!(overflow.await, Err(BridgeError::Transport(_))));

        for pending in queued {
            host.try_recv().unwrap().reply.succeed(json!(1));
            assert_eq!(pending.await.unwrap(), json!(1));
        }
    }

    #[test]
    fn invalid_config_builds_no_channel() {
        let config = BridgeConfig {
            host_queue_capacity: 0,
            ..Default::default()
        };
        assert!(from_config(&config).unwrap_err().is_contract_violation());
    }

    #[tokio::test]
    async fn closed_host_fails_the_call() {
        let (transport, host) = channel(4).unwrap();
        drop(host);
        let dispatcher = Dispatcher::new(Arc::new(transport));
        let pending = dispatcher.call::<Value>("ns", "op", vec![]).unwrap();
        assert!(matches!(pending.await, Err(BridgeError::Transport(_))));
    }

    #[tokio::test]
    async fn serve_resolves_calls() {
        let (transport, host) = channel(8).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(transport));
        let server = tokio::spawn(host.serve(|call| match call.operation.as_str() {
            "echo" => Ok(call.arguments.first().cloned().unwrap_or(Value::Null)),
            other => Err(BridgeError::Boundary {
                operation: other.into(),
                message: "unknown action".into(),
            }),
        }));

        let echoed = dispatcher.call::<String>("ns", "echo", vec![json!("hi")]).unwrap();
        let missing = dispatcher.call::<Value>("ns", "missing", vec![]).unwrap();
        assert_eq!(echoed.await.unwrap(), "hi");
        assert!(matches!(missing.await, Err(BridgeError::Boundary { .. })));

        drop(dispatcher);
        server.await.unwrap();
    }
}
