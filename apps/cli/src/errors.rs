use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type.
/// Each variant maps to a process exit code via `exit_code()`; recoverable
/// failures carry a user-facing hint via `remediation()`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported grid size {0}: expected 3, 4, or 5")]
    InvalidConfiguration(u8),

    #[error("Card count {0} is out of range: expected 1..=100")]
    InvalidCount(u32),

    #[error("Invalid value range: {0}")]
    InvalidRange(String),

    #[error(
        "Only {collected} of {requested} unique cards found after {attempts} attempts"
    )]
    CardSpaceExhausted {
        requested: u32,
        collected: u32,
        attempts: u32,
    },

    #[error("Cannot write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF assembly failed: {0}")]
    Pdf(String),
}

impl AppError {
    /// Process exit code for this failure (success is 0).
    ///
    /// Validation failures exit with 1; output-side failures exit with -1
    /// (reported by the platform as a nonzero status).
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidConfiguration(_)
            | AppError::InvalidCount(_)
            | AppError::InvalidRange(_)
            | AppError::CardSpaceExhausted { .. } => 1,
            AppError::OutputWrite { .. } | AppError::Pdf(_) => -1,
        }
    }

    /// A short hint printed after the error message, where one helps.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            AppError::OutputWrite { .. } => {
                Some("Close the PDF if it is open in another program and run again.")
            }
            AppError::CardSpaceExhausted { .. } => {
                Some("Request fewer cards or widen the value range.")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_exit_with_1() {
        assert_eq!(AppError::InvalidConfiguration(6).exit_code(), 1);
        assert_eq!(AppError::InvalidCount(101).exit_code(), 1);
        assert_eq!(
            AppError::InvalidRange("min >= max".to_string()).exit_code(),
            1
        );
        assert_eq!(
            AppError::CardSpaceExhausted {
                requested: 10,
                collected: 3,
                attempts: 1000,
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_output_errors_exit_nonzero_negative() {
        let err = AppError::OutputWrite {
            path: PathBuf::from("byngo-cards.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked"),
        };
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn test_locked_output_carries_remediation_hint() {
        let err = AppError::OutputWrite {
            path: PathBuf::from("byngo-cards.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked"),
        };
        let hint = err.remediation().expect("output errors should carry a hint");
        assert!(hint.contains("Close the PDF"), "hint was: {hint}");
    }

    #[test]
    fn test_invalid_count_message_names_the_bounds() {
        let msg = AppError::InvalidCount(0).to_string();
        assert!(msg.contains("1..=100"), "message was: {msg}");
    }
}
