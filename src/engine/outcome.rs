//! Structured results for engine operations.
//!
//! A refused operation is not a Rust error: it is an [`Outcome`] whose
//! result is `Err(RuleError)`, with a warning notice the caller can show.
//! Successful resource changes carry an info notice and a [`LogEntry`] for
//! the combat log.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{ActorId, RuleError, RuleResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// A user-facing notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warn, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

/// One line of the player-visible combat log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub actor: ActorId,
    pub summary: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.actor, self.summary)
    }
}

/// Result of one engine operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
    pub result: RuleResult<T>,
    pub notices: Vec<Notice>,
    pub log: Vec<LogEntry>,
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Self { result: Ok(value), notices: Vec::new(), log: Vec::new() }
    }

    /// A refusal, with a warning notice carrying the error message.
    pub fn failure(error: RuleError) -> Self {
        let notice = Notice::warn(error.to_string());
        Self { result: Err(error), notices: vec![notice], log: Vec::new() }
    }

    #[must_use]
    pub fn with_log(mut self, actor: ActorId, summary: impl Into<String>) -> Self {
        self.log.push(LogEntry { actor, summary: summary.into() });
        self
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    #[must_use]
    pub fn ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The refusal message, if the operation was refused.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.result.as_ref().err().map(ToString::to_string)
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    #[must_use]
    pub fn error(&self) -> Option<&RuleError> {
        self.result.as_ref().err()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome { result: self.result.map(f), notices: self.notices, log: self.log }
    }
}
