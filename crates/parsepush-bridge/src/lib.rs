// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! ParsePush: native call bridge.
//!
//! A [`Dispatcher`] sends named operations with positional arguments across
//! the app/native boundary through a [`Transport`] and routes the single
//! outcome of each call back to the caller. Transports in this crate:
//!
//! - [`channel::ChannelTransport`]: bounded queue drained by the native glue
//!   through a [`channel::HostEndpoint`].
//! - [`stub::StubTransport`]: fails every call, for builds with no native host.

pub mod channel;
pub mod dispatcher;
pub mod stub;
pub mod traits;

pub use dispatcher::{Dispatcher, FailureCallback, Pending, SuccessCallback};
pub use traits::{Completion, Reply, Transport};
