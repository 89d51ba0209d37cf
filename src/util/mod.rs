//! Shared utilities.

/// Frame delta and fps measurement.
pub mod frame_timing;
