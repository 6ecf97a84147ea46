// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam traits between Courier components and their collaborators.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod agent;
pub mod reporter;
pub mod transport;

pub use agent::Agent;
pub use reporter::Reporter;
pub use transport::{HttpTransport, APPLICATION_JSON};
