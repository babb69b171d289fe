use thiserror::Error;

use crate::model::OptionKind;

/// Behaviour to capture an explicit generic type T from an input `&str`.
///
/// We use this at the bottom of the command line parser object graph so the compiler can maintain each field's type.
/// Implement it to introduce a custom field (see the [`prelude`](../prelude/index.html)).
pub trait GenericCapturable<'a, T> {
    /// The value when the parameter has been matched without any token (ex: a switch).
    fn matched(&self) -> Option<T>;

    /// Capture a value into the generic type T for this parameter.
    ///
    /// `Ok(None)` declares the token converted into "no value".
    fn capture(&self, token: &str) -> Result<Option<T>, InvalidCapture>;

    /// The value when the parameter is never matched and has no default.
    fn initial(&self) -> Option<T> {
        None
    }

    /// Get the `OptionKind` for this implementation.
    fn kind(&self) -> OptionKind;
}

/// The error when a token cannot be captured into a field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCapture {
    /// The token does not convert to the field's type.
    #[error("cannot convert '{token}' to {type_name}.")]
    InvalidConversion {
        /// The raw token.
        token: String,
        /// The name of the target type.
        type_name: &'static str,
    },
}
