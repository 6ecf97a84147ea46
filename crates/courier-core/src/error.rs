// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Courier.

use thiserror::Error;

/// The primary error type used across Courier traits and infrastructure.
///
/// Remote agent misbehavior is never reported through this type: it is
/// folded into an [`AgentResponse`](crate::types::AgentResponse) status.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Configuration errors (invalid values discovered after loading).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (connection, transaction, commit, row decoding).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// HTTP transport construction errors.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CourierError {
    /// Wraps any error as a storage-layer failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            source: Box::new(err),
        }
    }
}
