#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod stats;
pub mod tlb;
pub mod translation;
pub mod translator;

// Re-export commonly used items for convenience
pub use config::Config;
pub use constants::*;
pub use error::{Result, VmError};
pub use memory::BackingStore;
pub use stats::{Counters, StatsReport};
pub use translation::{Access, LogicalAddress, TranslationRecord};
pub use translator::Translator;
