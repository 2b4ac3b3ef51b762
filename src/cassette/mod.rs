//! Record/replay infrastructure for deterministic runs without network I/O.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
