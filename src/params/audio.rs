//! Audio capture and spectrum analysis configuration.

use crate::error::VizError;

/// Audio capture configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Explicit capture device name (substring match). `None` = auto-select:
    /// loopback/monitor source first, then the default input device.
    pub device: Option<String>,

    /// Requested channel count (1 = mono, 2 = stereo, downmixed to mono)
    pub channels: u16,

    /// Audio sample rate (Hz)
    pub sample_rate_hz: u32,

    /// Samples per analysis block (FFT size). Each block yields
    /// `block_size / 2` spectrum bins.
    pub block_size: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device: None,
            channels: 2,
            sample_rate_hz: 44100,
            block_size: 2048,
        }
    }
}

impl CaptureConfig {
    /// Number of spectrum bins produced per block
    pub fn bins(&self) -> usize {
        self.block_size / 2
    }

    /// Width of one spectrum bin (Hz)
    pub fn bin_width_hz(&self) -> f32 {
        self.sample_rate_hz as f32 / self.block_size as f32
    }

    pub fn validate(&self) -> Result<(), VizError> {
        if self.sample_rate_hz == 0 {
            return Err(VizError::InvalidConfig(
                "sample rate must be > 0".to_string(),
            ));
        }
        if self.block_size < 2 {
            return Err(VizError::InvalidConfig(format!(
                "block size must be at least 2, got {}",
                self.block_size
            )));
        }
        if !(1..=2).contains(&self.channels) {
            return Err(VizError::InvalidConfig(format!(
                "channel count must be 1 or 2, got {}",
                self.channels
            )));
        }
        Ok(())
    }
}

/// Bar chart mapping parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarScale {
    /// Dynamic range shown below the loudest bin of the current frame (dB)
    pub dynamic_range_db: f32,
}

impl Default for BarScale {
    fn default() -> Self {
        Self {
            dynamic_range_db: 60.0,
        }
    }
}
