use thiserror::Error;

/// Errors produced when parsing configuration values.
/// Level resolution itself is total and never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid paragraph direction {0:?}; expected one of ltr, rtl, auto, auto-ltr, auto-rtl")]
    InvalidDirection(String),

    #[error("invalid bidi class {0:?}")]
    InvalidBidiClass(String),
}
