// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote agent client for Courier.
//!
//! [`RemoteAgent`] forwards requests to an agent service over HTTP/JSON and
//! never trusts what comes back: every reply is validated before it is
//! handed to the dispatcher. [`ReqwestTransport`] is the production
//! [`HttpTransport`](courier_core::HttpTransport).

pub mod agent;
pub mod transport;

pub use agent::{decode_response, normalize_base, RemoteAgent};
pub use transport::ReqwestTransport;
