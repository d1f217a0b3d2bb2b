//! Spectrum analyzer window.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowId},
};

use super::{create_window, is_escape, recover_surface};
use crate::audio::{frame_slot, AudioCapture, FrameSender, LatestFrame};
use crate::error::{Result, VizError};
use crate::params::{CaptureConfig, WindowConfig};
use crate::rendering::BarRenderSystem;
use crate::spectrum::render_bars;
use crate::timer::FrameTimer;

/// Ticks between handoff status lines in the debug log
const STATUS_EVERY_TICKS: u64 = 200;

/// Spectrum analyzer application state
pub struct SpectrumApp {
    window_config: WindowConfig,
    capture_config: CaptureConfig,

    // Window and rendering
    window: Option<Arc<Window>>,
    renderer: Option<BarRenderSystem>,

    // Audio
    audio: Option<AudioCapture>,
    sender: Option<FrameSender>,
    latest: LatestFrame,

    timer: FrameTimer,
    error: Option<VizError>,
}

impl SpectrumApp {
    pub fn new(window_config: WindowConfig, capture_config: CaptureConfig) -> Self {
        let (sender, latest) = frame_slot(capture_config.bins());
        let timer = FrameTimer::new(window_config.interval(), Instant::now());

        Self {
            window_config,
            capture_config,
            window: None,
            renderer: None,
            audio: None,
            sender: Some(sender),
            latest,
            timer,
            error: None,
        }
    }

    /// Startup failure recorded while the event loop was running, if any
    pub fn into_result(mut self) -> Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = create_window(event_loop, &self.window_config)?;
        let renderer = pollster::block_on(BarRenderSystem::new(Arc::clone(&window)))?;

        self.window = Some(window);
        self.renderer = Some(renderer);

        // Capture problems are not fatal: the chart keeps showing silence
        if let Some(sender) = self.sender.take() {
            match Self::open_audio(&self.capture_config, sender) {
                Ok(capture) => self.audio = Some(capture),
                Err(e) => error!("Audio capture unavailable: {}", e),
            }
        }

        Ok(())
    }

    fn open_audio(config: &CaptureConfig, sender: FrameSender) -> Result<AudioCapture> {
        let mut capture = AudioCapture::open(config, sender)?;
        capture.start()?;
        info!(
            "Capturing from '{}' ({:?})",
            capture.device_name(),
            capture.device_kind()
        );
        Ok(capture)
    }

    fn on_tick(&mut self) {
        self.latest.refresh();

        if self.timer.ticks() % STATUS_EVERY_TICKS == 0 {
            let stats = self.latest.stats();
            debug!(
                "Spectrum frames: {} published, {} overwritten, {} dropped (capture {})",
                stats.published(),
                stats.overwritten(),
                stats.dropped(),
                if self.latest.is_connected() { "live" } else { "stopped" }
            );
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        let (width, height) = renderer.size();
        let bars = render_bars(self.latest.frame(), width, height);

        if let Err(e) = renderer.render(&bars) {
            if !recover_surface(e, || renderer.reconfigure()) {
                event_loop.exit();
            }
        }
    }

    fn shutdown(&mut self) {
        if let Some(audio) = self.audio.take() {
            if let Err(e) = audio.close() {
                error!("Failed to close audio capture: {}", e);
            }
        }
    }
}

impl ApplicationHandler for SpectrumApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            self.error = Some(e);
            event_loop.exit();
            return;
        }

        info!("Spectrum analyzer running. Press ESC to quit");
        self.timer = FrameTimer::new(self.window_config.interval(), Instant::now());
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } if is_escape(&event) => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.timer.poll(Instant::now()) {
            self.on_tick();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.timer.deadline()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
