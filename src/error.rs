//! Typed input-validation error.
//!
//! Everything else in the crate flows through `anyhow`; this one type exists
//! so boundaries (HTTP, CLI) can tell "the caller sent bad input, nothing
//! was mutated" apart from internal failures via `downcast_ref`.

use std::fmt;

/// Caller input was rejected before any state changed.
#[derive(Debug, Clone)]
pub struct InputError(String);

impl InputError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = InputError::new("CSV must contain a 'comment' column").into();
        let input = err.downcast_ref::<InputError>().unwrap();
        assert_eq!(input.to_string(), "CSV must contain a 'comment' column");
    }
}
