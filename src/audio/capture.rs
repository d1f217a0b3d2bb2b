//! cpal input stream feeding the spectrum analyzer.

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{BufferSize, SampleRate, StreamConfig};
use log::{debug, info, warn};

use super::blocks::BlockAssembler;
use super::device::{negotiate_channels, select_device, DeviceKind};
use super::handoff::FrameSender;
use crate::error::Result;
use crate::params::CaptureConfig;
use crate::spectrum::SpectrumAnalyzer;

/// Build the stream configuration requested from the device
pub fn create_stream_config(channels: u16, config: &CaptureConfig) -> StreamConfig {
    StreamConfig {
        channels,
        sample_rate: SampleRate(config.sample_rate_hz),
        buffer_size: BufferSize::Fixed(config.block_size as u32),
    }
}

/// Live audio capture.
///
/// Each completed block is analyzed on the audio thread and published to
/// the UI through the [`FrameSender`]. The stream is paused and released
/// when the capture is dropped.
pub struct AudioCapture {
    stream: cpal::Stream,
    device_name: String,
    device_kind: DeviceKind,
    playing: bool,
}

impl AudioCapture {
    /// Open the configured device and build (but do not start) the stream
    pub fn open(config: &CaptureConfig, sender: FrameSender) -> Result<Self> {
        config.validate()?;

        let host = cpal::default_host();
        let selected = select_device(&host, config.device.as_deref())?;
        let channels = negotiate_channels(config.channels, selected.native_channels());
        let stream_config = create_stream_config(channels, config);

        info!(
            "Audio stream: {}Hz, {} ch, block {}",
            config.sample_rate_hz, channels, config.block_size
        );

        let mut assembler = BlockAssembler::new(config.block_size, channels as usize);
        let mut analyzer = SpectrumAnalyzer::new(config.block_size);

        let stream = selected.device.build_input_stream(
            &stream_config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                assembler.push_interleaved(data, |block| {
                    sender.publish(analyzer.process(block));
                });
            },
            |err| warn!("Audio stream error: {}", err),
            None,
        )?;

        Ok(Self {
            stream,
            device_name: selected.name,
            device_kind: selected.kind,
            playing: false,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn device_kind(&self) -> DeviceKind {
        self.device_kind
    }

    pub fn start(&mut self) -> Result<()> {
        if !self.playing {
            self.stream.play()?;
            self.playing = true;
            debug!("Audio capture started");
        }
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        if self.playing {
            self.stream.pause()?;
            self.playing = false;
            debug!("Audio capture stopped");
        }
        Ok(())
    }

    /// Stop and release the device
    pub fn close(mut self) -> Result<()> {
        self.stop()
    }
}

impl Drop for AudioCapture {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("Failed to stop audio capture: {}", e);
        }
        info!("Audio capture closed ({})", self.device_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_config_uses_block_size_and_rate() {
        let config = CaptureConfig::default();
        let stream_config = create_stream_config(2, &config);

        assert_eq!(stream_config.channels, 2);
        assert_eq!(stream_config.sample_rate, SampleRate(44100));
        assert_eq!(stream_config.buffer_size, BufferSize::Fixed(2048));
    }
}
