// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub transport for desktop/CI builds where no native push handler exists.
//
// Every call fails with `PlatformUnavailable`, delivered after `submit` has
// returned like any other outcome.

use parsepush_core::{BridgeError, CallDescriptor};

use crate::traits::{Reply, Transport};

/// Transport returned when no native host is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubTransport;

impl Transport for StubTransport {
    fn name(&self) -> &str {
        "stub"
    }

    fn submit(&self, call: CallDescriptor, reply: Reply) {
        tracing::warn!(
            namespace = %call.namespace,
            operation = %call.operation,
            "call submitted to stub transport"
        );
        reply.fail_detached(BridgeError::PlatformUnavailable);
    }
}
