//! Audio capture and spectrum handoff.
//!
//! The cpal callback downmixes to mono, assembles fixed-size blocks, runs
//! the spectrum analyzer and publishes each frame into a shared slot that
//! always holds the newest one. The UI thread picks it up once per tick.

mod blocks;
mod capture;
mod device;
mod handoff;

// Re-export public types
pub use blocks::{downmix_frame, BlockAssembler};
pub use capture::{create_stream_config, AudioCapture};
pub use device::{is_loopback_name, negotiate_channels, select_device, DeviceKind, SelectedDevice};
pub use handoff::{frame_slot, FrameSender, HandoffStats, LatestFrame};
