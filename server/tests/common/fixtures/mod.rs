//! Reusable test utilities:
//! - Isolated store environments rooted in a temp directory
//! - A recording observer for asserting on store events
//! - A stepping clock so every backup gets its own timestamp

// Not every test binary uses every fixture
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod recorder;
pub mod test_env;

pub use recorder::RecordingObserver;
pub use test_env::{RefusingRemover, StepClock, TestEnv};
