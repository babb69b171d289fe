use thiserror::Error;

use crate::matcher::api::*;

#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct MatchTokens {
    pub name: String,
    pub value: Option<OffsetValue>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(super) enum CloseError {
    #[error("no value provided for '{name}'.")]
    MissingValue { name: String },
}

/// A value-bearing option waiting on the next token for its value.
#[derive(Debug)]
pub(super) struct MatchBuffer {
    name: String,
    fallback: bool,
    value: Option<OffsetValue>,
}

impl MatchBuffer {
    /// `fallback` declares whether the option may close without a value (it has a default).
    pub(super) fn new(name: impl Into<String>, fallback: bool) -> Self {
        Self {
            name: name.into(),
            fallback,
            value: None,
        }
    }

    pub(super) fn push(&mut self, offset: usize, value: String) {
        if self.value.replace((offset, value)).is_some() {
            unreachable!("internal error - a match buffer holds precisely 1 value");
        }
    }

    pub(super) fn can_close(&self) -> bool {
        self.value.is_some() || self.fallback
    }

    pub(super) fn close(self) -> Result<MatchTokens, CloseError> {
        if !self.can_close() {
            return Err(CloseError::MissingValue { name: self.name });
        }

        Ok(MatchTokens {
            name: self.name,
            value: self.value,
        })
    }
}
