//! Spinning cube window.

use std::sync::Arc;
use std::time::Instant;

use glam::Mat4;
use log::info;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowId},
};

use super::{create_window, is_escape, recover_surface};
use crate::cube::{build_model_transform, build_projection, tick};
use crate::error::{Result, VizError};
use crate::params::{aspect_ratio, Projection, WindowConfig};
use crate::rendering::CubeRenderSystem;
use crate::timer::FrameTimer;

/// Spinning cube application state
pub struct CubeApp {
    window_config: WindowConfig,
    projection: Projection,

    // Window and rendering
    window: Option<Arc<Window>>,
    renderer: Option<CubeRenderSystem>,

    /// Rotation in degrees, [0, 360)
    angle_deg: f32,
    projection_matrix: Mat4,

    timer: FrameTimer,
    error: Option<VizError>,
}

impl CubeApp {
    pub fn new(window_config: WindowConfig, projection: Projection) -> Self {
        let projection_matrix = build_projection(
            aspect_ratio(window_config.width, window_config.height),
            &projection,
        );
        let timer = FrameTimer::new(window_config.interval(), Instant::now());

        Self {
            window_config,
            projection,
            window: None,
            renderer: None,
            angle_deg: 0.0,
            projection_matrix,
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

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    /// Combined transform for the current angle
    pub fn mvp(&self) -> Mat4 {
        self.projection_matrix * build_model_transform(self.angle_deg)
    }

    /// Rebuild the projection for a new surface size
    fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.projection_matrix = build_projection(aspect_ratio(width, height), &self.projection);
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = create_window(event_loop, &self.window_config)?;
        let renderer = pollster::block_on(CubeRenderSystem::new(Arc::clone(&window)))?;

        let (width, height) = renderer.size();
        self.set_viewport(width, height);

        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_tick(&mut self) {
        self.angle_deg = tick(self.angle_deg);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let mvp = self.mvp();
        let Some(renderer) = self.renderer.as_ref() else {
            return;
        };

        renderer.update_mvp(mvp);
        if let Err(e) = renderer.render() {
            if !recover_surface(e, || renderer.reconfigure()) {
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for CubeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            self.error = Some(e);
            event_loop.exit();
            return;
        }

        info!("Spinning cube running. Press ESC to quit");
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
                self.set_viewport(size.width, size.height);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_new_app_starts_unrotated() {
        let app = CubeApp::new(WindowConfig::cube(), Projection::default());
        assert_eq!(app.angle_deg(), 0.0);

        let expected =
            build_projection(800.0 / 600.0, &Projection::default()) * build_model_transform(0.0);
        assert!(app.mvp().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_tick_advances_angle_without_window() {
        let mut app = CubeApp::new(WindowConfig::cube(), Projection::default());
        for _ in 0..45 {
            app.on_tick();
        }
        assert_eq!(app.angle_deg(), 90.0);
    }

    #[test]
    fn test_viewport_change_rebuilds_projection() {
        let mut app = CubeApp::new(WindowConfig::cube(), Projection::default());
        let before = app.mvp();

        app.set_viewport(1600, 400);
        assert!(!app.mvp().abs_diff_eq(before, 1e-6));

        // Minimized window keeps the last projection
        let wide = app.mvp();
        app.set_viewport(0, 0);
        assert!(app.mvp().abs_diff_eq(wide, 1e-6));

        // The cube centre stays in the middle of the screen
        let centre = app.mvp().project_point3(Vec3::ZERO);
        assert!(centre.x.abs() < 1e-6 && centre.y.abs() < 1e-6);
    }
}
