//! Per-region load results.

use serde::Serialize;
use std::fmt::Display;

/// Content of one page region. A failed region shows a placeholder while
/// the rest of the page renders normally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum Region<T> {
    Ready(T),
    Failed(String),
}

impl<T> Region<T> {
    /// Turn a load result into a region, logging failures.
    pub fn load<E: Display>(area: &str, result: Result<T, E>, placeholder: &str) -> Self {
        match result {
            Ok(value) => Region::Ready(value),
            Err(e) => {
                tracing::warn!(area, error = %e, "region failed to load");
                Region::Failed(placeholder.to_string())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Region::Ready(v) => Some(v),
            Region::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Region::Failed(_))
    }

    /// The placeholder text of a failed region.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Region::Failed(msg) => Some(msg),
            Region::Ready(_) => None,
        }
    }
}

/// Whether a local change reached the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncStatus {
    Synced,
    /// The change is kept locally; the backend did not accept it.
    LocalOnly { reason: String },
}

impl SyncStatus {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncStatus::Synced)
    }
}

/// Tone of an inline form message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// Message shown next to a form after submitting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}
