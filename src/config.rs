use std::path::PathBuf;

use crate::constants::*;
use crate::error::{Result, VmError};

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub backing_store: PathBuf,
    pub output: PathBuf,
    pub frames: usize,
    pub tlb_capacity: usize,
    pub quiet: bool,
    pub verbose: bool,
}

impl Config {
    /// Configuration with the default store, output and geometry
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Config {
            input: input.into(),
            backing_store: PathBuf::from(DEFAULT_BACKING_STORE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            frames: NUM_FRAMES,
            tlb_capacity: TLB_CAPACITY,
            quiet: false,
            verbose: false,
        }
    }

    /// Reject geometry the address layout cannot express
    pub fn validate(&self) -> Result<()> {
        // frame numbers share the 8-bit page-number field of a physical address
        if self.frames == 0 || self.frames > NUM_FRAMES {
            return Err(VmError::Config(format!(
                "frame count must be between 1 and {}, got {}",
                NUM_FRAMES, self.frames
            )));
        }
        if self.tlb_capacity == 0 {
            return Err(VmError::Config("TLB size must be at least 1".to_string()));
        }
        Ok(())
    }
}
