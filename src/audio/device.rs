//! Capture device selection: explicit name, then loopback, then default input.

use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};
use log::{debug, info, warn};

use crate::error::{Result, VizError};

/// Name fragments of input devices that capture what the system is playing
const LOOPBACK_DEVICE_PATTERNS: &[&str] = &[
    "monitor",
    "Monitor",
    "loopback",
    "Loopback",
    "Stereo Mix",
    "BlackHole",
];

/// How a capture device was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// Matched the name requested on the command line
    Named,
    /// Monitor/loopback input source
    Loopback,
    /// Output device opened for WASAPI loopback capture
    OutputLoopback,
    /// Fallback: the host's default input device
    DefaultInput,
}

/// A device chosen for capture
pub struct SelectedDevice {
    pub device: Device,
    pub name: String,
    pub kind: DeviceKind,
}

impl SelectedDevice {
    fn new(device: Device, kind: DeviceKind) -> Self {
        let name = device
            .name()
            .unwrap_or_else(|_| "Unknown Device".to_string());
        Self { device, name, kind }
    }

    /// Channel count the device runs at natively, if it can be queried
    pub fn native_channels(&self) -> Option<u16> {
        let config = match self.kind {
            DeviceKind::OutputLoopback => self.device.default_output_config().ok(),
            _ => self.device.default_input_config().ok(),
        };
        config.map(|c| c.channels())
    }
}

/// Check if a device name looks like a loopback/monitor source
pub fn is_loopback_name(name: &str) -> bool {
    LOOPBACK_DEVICE_PATTERNS
        .iter()
        .any(|&pattern| name.contains(pattern))
}

/// Channel count to request: the configured count, capped by the device
pub fn negotiate_channels(requested: u16, native: Option<u16>) -> u16 {
    match native {
        Some(native) if native > 0 => requested.min(native),
        _ => requested,
    }
}

fn find_input_by_name(host: &Host, name: &str) -> Result<Option<Device>> {
    for device in host.input_devices()? {
        if let Ok(device_name) = device.name() {
            if device_name == name || device_name.contains(name) {
                return Ok(Some(device));
            }
        }
    }
    Ok(None)
}

fn find_loopback_input(host: &Host) -> Result<Option<Device>> {
    for device in host.input_devices()? {
        if let Ok(name) = device.name() {
            if is_loopback_name(&name) {
                return Ok(Some(device));
            }
        }
    }
    Ok(None)
}

/// Pick the device to capture from.
///
/// An explicit name wins. Otherwise a loopback source is preferred (monitor
/// input, or on Windows the default output device in loopback mode), with a
/// single fallback to the default input device.
pub fn select_device(host: &Host, requested: Option<&str>) -> Result<SelectedDevice> {
    if let Some(name) = requested {
        if let Some(device) = find_input_by_name(host, name)? {
            return Ok(SelectedDevice::new(device, DeviceKind::Named));
        }
        warn!("Capture device '{}' not found", name);
    } else {
        debug!("Looking for a loopback capture source");

        if let Some(device) = find_loopback_input(host)? {
            return Ok(SelectedDevice::new(device, DeviceKind::Loopback));
        }

        if cfg!(target_os = "windows") {
            if let Some(device) = host.default_output_device() {
                return Ok(SelectedDevice::new(device, DeviceKind::OutputLoopback));
            }
        }
    }

    info!("No loopback capture device found. Falling back to default input.");
    host.default_input_device()
        .map(|device| SelectedDevice::new(device, DeviceKind::DefaultInput))
        .ok_or(VizError::NoInputDevice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_name_detection() {
        assert!(is_loopback_name(
            "Monitor of Built-in Audio Analog Stereo"
        ));
        assert!(is_loopback_name("alsa_output.pci-0000_00_1f.3.analog-stereo.monitor"));
        assert!(is_loopback_name("Stereo Mix (Realtek High Definition Audio)"));
        assert!(is_loopback_name("BlackHole 2ch"));

        assert!(!is_loopback_name("Built-in Microphone"));
        assert!(!is_loopback_name("default"));
    }

    #[test]
    fn test_channel_negotiation() {
        assert_eq!(negotiate_channels(2, Some(8)), 2);
        assert_eq!(negotiate_channels(2, Some(1)), 1);
        assert_eq!(negotiate_channels(1, Some(2)), 1);
        assert_eq!(negotiate_channels(2, Some(0)), 2);
        assert_eq!(negotiate_channels(2, None), 2);
    }
}
