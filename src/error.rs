//! Error types for the translation pipeline.
//!
//! Every failure is terminal for the run; there are no retries.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, VmError>;

#[derive(Error, Debug)]
pub enum VmError {
    /// Rejected run configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read input file '{}': {source}", .path.display())]
    InputUnreadable { path: PathBuf, source: io::Error },

    #[error("Failed to open output file '{}': {source}", .path.display())]
    OutputUnwritable { path: PathBuf, source: io::Error },

    #[error("Failed to write output: {0}")]
    OutputWrite(#[from] io::Error),

    /// Backing store could not be opened or mapped
    #[error("Backing store '{}' unavailable: {source}", .path.display())]
    StoreUnavailable { path: PathBuf, source: io::Error },

    #[error("Backing store '{}' holds {len} bytes, expected at least {required}", .path.display())]
    StoreUndersized {
        path: PathBuf,
        len: u64,
        required: u64,
    },

    /// Page lies past the end of the backing data
    #[error("Page {page} is out of range for a backing store of {len} bytes")]
    OutOfRange { page: u32, len: usize },

    #[error("Physical memory exhausted: all {frames} frames are in use")]
    FrameExhaustion { frames: usize },
}

impl VmError {
    /// Get exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::from(2),
            Self::InputUnreadable { .. } => ExitCode::from(3),
            Self::StoreUnavailable { .. } | Self::StoreUndersized { .. } => ExitCode::from(4),
            Self::OutputUnwritable { .. } | Self::OutputWrite(_) => ExitCode::from(5),
            Self::OutOfRange { .. } => ExitCode::from(6),
            Self::FrameExhaustion { .. } => ExitCode::from(7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_nonzero_and_distinct() {
        let errors = [
            VmError::Config("bad".into()),
            VmError::InputUnreadable {
                path: "in.txt".into(),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
            VmError::StoreUnavailable {
                path: "store.bin".into(),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
            VmError::OutputWrite(io::Error::from(io::ErrorKind::BrokenPipe)),
            VmError::OutOfRange { page: 3, len: 10 },
            VmError::FrameExhaustion { frames: 128 },
        ];

        let codes: Vec<String> = errors.iter().map(|e| format!("{:?}", e.exit_code())).collect();
        assert!(codes.iter().all(|c| c != &format!("{:?}", ExitCode::SUCCESS)));

        let mut unique = codes.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_messages_name_the_problem() {
        let err = VmError::StoreUndersized {
            path: "BACKING_STORE.bin".into(),
            len: 100,
            required: 65536,
        };
        let msg = err.to_string();
        assert!(msg.contains("BACKING_STORE.bin"));
        assert!(msg.contains("65536"));

        let err = VmError::FrameExhaustion { frames: 128 };
        assert!(err.to_string().contains("128 frames"));
    }
}
