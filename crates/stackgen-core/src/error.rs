//! Error types shared across the scaffolding pipeline
//!
//! Almost everything propagates through `anyhow`; the one condition that needs
//! to stay distinguishable all the way up to the exit-code mapping is user
//! cancellation, which gets its own sentinel type.

use thiserror::Error;

/// The user aborted an interactive prompt or declined to continue.
///
/// Detected at the top level with `Error::downcast_ref`; produces a warning
/// and a neutral exit code instead of an error report.
#[derive(Debug, Clone, Copy, Error)]
#[error("Setup cancelled.")]
pub struct Cancelled;

/// Map an interrupted prompt to the [`Cancelled`] sentinel.
///
/// cliclack reports a user abort as an `io::Error` of kind `Interrupted`;
/// every other I/O failure passes through unchanged.
pub fn map_prompt_err(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::Interrupted {
        anyhow::Error::new(Cancelled)
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_becomes_cancelled() {
        let err = std::io::Error::new(std::io::ErrorKind::Interrupted, "ctrl-c");
        let mapped = map_prompt_err(err);
        assert!(mapped.downcast_ref::<Cancelled>().is_some());
    }

    #[test]
    fn other_io_errors_pass_through() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let mapped = map_prompt_err(err);
        assert!(mapped.downcast_ref::<Cancelled>().is_none());
    }
}
