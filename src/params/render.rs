//! Window, timer and projection configuration.

use std::time::Duration;

use crate::error::VizError;

/// Window and redraw cadence configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,

    /// Window width (pixels)
    pub width: u32,

    /// Window height (pixels)
    pub height: u32,

    /// Redraw timer interval (milliseconds)
    pub interval_ms: u64,
}

impl WindowConfig {
    /// Spectrum analyzer window: wide and short, ~33 Hz redraw
    pub fn spectrum() -> Self {
        Self {
            title: "Audio Spectrum Analyzer".to_string(),
            width: 800,
            height: 200,
            interval_ms: 30,
        }
    }

    /// Spinning cube window, ~60 FPS
    pub fn cube() -> Self {
        Self {
            title: "Spinning Cube".to_string(),
            width: 800,
            height: 600,
            interval_ms: 16,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<(), VizError> {
        if self.width == 0 || self.height == 0 {
            return Err(VizError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.interval_ms == 0 {
            return Err(VizError::InvalidConfig(
                "timer interval must be > 0 ms".to_string(),
            ));
        }
        Ok(())
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane
    pub near: f32,

    /// Far clipping plane
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn validate(&self) -> Result<(), VizError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(VizError::InvalidConfig(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(VizError::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

/// Aspect ratio of a surface, falling back to 1.0 for a degenerate height
/// (minimized windows report 0x0).
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_presets() {
        let spectrum = WindowConfig::spectrum();
        assert_eq!((spectrum.width, spectrum.height), (800, 200));
        assert_eq!(spectrum.interval(), Duration::from_millis(30));
        assert!(spectrum.validate().is_ok());

        let cube = WindowConfig::cube();
        assert_eq!((cube.width, cube.height), (800, 600));
        assert_eq!(cube.interval(), Duration::from_millis(16));
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn test_window_config_rejects_zero_interval() {
        let mut config = WindowConfig::cube();
        config.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_projection_validation() {
        assert!(Projection::default().validate().is_ok());

        let bad_fov = Projection {
            fov_degrees: 180.0,
            ..Default::default()
        };
        assert!(bad_fov.validate().is_err());

        let bad_planes = Projection {
            near: 10.0,
            far: 1.0,
            ..Default::default()
        };
        assert!(bad_planes.validate().is_err());
    }

    #[test]
    fn test_aspect_ratio_handles_minimized_window() {
        assert_eq!(aspect_ratio(800, 600), 800.0 / 600.0);
        assert_eq!(aspect_ratio(800, 0), 1.0);
    }
}
