//! Command-line argument parsing.

use clap::{Parser, Subcommand};

use crate::params::{CaptureConfig, Projection, WindowConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "vizdemos")]
#[command(about = "Live audio spectrum analyzer and spinning cube demos", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub demo: Demo,
}

/// Which demo window to open
#[derive(Subcommand, Debug)]
pub enum Demo {
    /// Capture system audio and draw a log-frequency spectrum
    Spectrum(SpectrumArgs),

    /// Draw a vertex-coloured cube spinning about its diagonal
    Cube(CubeArgs),
}

#[derive(clap::Args, Debug)]
pub struct SpectrumArgs {
    /// Capture device name (substring match); default auto-selects loopback
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Channels to capture (downmixed to mono)
    #[arg(long, value_name = "N", default_value_t = 2)]
    pub channels: u16,

    /// Capture sample rate
    #[arg(long, value_name = "HZ", default_value_t = 44100)]
    pub sample_rate: u32,

    /// Samples per FFT block
    #[arg(long, value_name = "N", default_value_t = 2048)]
    pub block_size: usize,

    /// Redraw interval
    #[arg(long, value_name = "MS", default_value_t = 30)]
    pub interval_ms: u64,

    /// Window width (logical pixels)
    #[arg(long, value_name = "PX", default_value_t = 800)]
    pub width: u32,

    /// Window height (logical pixels)
    #[arg(long, value_name = "PX", default_value_t = 200)]
    pub height: u32,
}

impl SpectrumArgs {
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            device: self.device.clone(),
            channels: self.channels,
            sample_rate_hz: self.sample_rate,
            block_size: self.block_size,
            ..CaptureConfig::default()
        }
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            width: self.width,
            height: self.height,
            interval_ms: self.interval_ms,
            ..WindowConfig::spectrum()
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct CubeArgs {
    /// Rotation tick interval
    #[arg(long, value_name = "MS", default_value_t = 16)]
    pub interval_ms: u64,

    /// Window width (logical pixels)
    #[arg(long, value_name = "PX", default_value_t = 800)]
    pub width: u32,

    /// Window height (logical pixels)
    #[arg(long, value_name = "PX", default_value_t = 600)]
    pub height: u32,

    /// Vertical field of view
    #[arg(long, value_name = "DEGREES", default_value_t = 45.0)]
    pub fov: f32,
}

impl CubeArgs {
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            width: self.width,
            height: self.height,
            interval_ms: self.interval_ms,
            ..WindowConfig::cube()
        }
    }

    pub fn projection(&self) -> Projection {
        Projection {
            fov_degrees: self.fov,
            ..Projection::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_defaults_match_params() {
        let args = Args::try_parse_from(["vizdemos", "spectrum"]).expect("parse");
        let Demo::Spectrum(spectrum) = args.demo else {
            panic!("expected spectrum subcommand");
        };

        let capture = spectrum.capture_config();
        let defaults = CaptureConfig::default();
        assert_eq!(capture.device, None);
        assert_eq!(capture.channels, defaults.channels);
        assert_eq!(capture.sample_rate_hz, defaults.sample_rate_hz);
        assert_eq!(capture.block_size, defaults.block_size);

        let window = spectrum.window_config();
        let preset = WindowConfig::spectrum();
        assert_eq!(window.title, preset.title);
        assert_eq!((window.width, window.height), (preset.width, preset.height));
        assert_eq!(window.interval_ms, preset.interval_ms);
    }

    #[test]
    fn test_spectrum_overrides() {
        let args = Args::try_parse_from([
            "vizdemos",
            "spectrum",
            "--device",
            "Monitor",
            "--channels",
            "1",
            "--block-size",
            "4096",
        ])
        .expect("parse");
        let Demo::Spectrum(spectrum) = args.demo else {
            panic!("expected spectrum subcommand");
        };

        let capture = spectrum.capture_config();
        assert_eq!(capture.device.as_deref(), Some("Monitor"));
        assert_eq!(capture.channels, 1);
        assert_eq!(capture.bins(), 2048);
    }

    #[test]
    fn test_cube_defaults_match_params() {
        let args = Args::try_parse_from(["vizdemos", "cube"]).expect("parse");
        let Demo::Cube(cube) = args.demo else {
            panic!("expected cube subcommand");
        };

        assert_eq!(cube.projection(), Projection::default());
        let window = cube.window_config();
        assert_eq!((window.width, window.height), (800, 600));
        assert_eq!(window.interval_ms, 16);
    }

    #[test]
    fn test_demo_is_required() {
        assert!(Args::try_parse_from(["vizdemos"]).is_err());
        assert!(Args::try_parse_from(["vizdemos", "waveform"]).is_err());
    }
}
