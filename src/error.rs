use thiserror::Error;

/// Errors raised when a network or one of its layers is misused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("expected {what} of length {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("a network needs at least 3 layers (1 input, 1 hidden, 1 output), got {0}")]
    TooFewLayers(usize),
    #[error("layer {0} has no neurons")]
    EmptyLayer(usize),
    #[error("no training examples were provided")]
    NoExamples,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns `Ok(())` if `actual == expected`, otherwise a `LengthMismatch`.
pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            what,
            expected,
            actual,
        })
    }
}
