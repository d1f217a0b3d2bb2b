//! winit applications for the two demos.
//!
//! Each app owns all of its state (window, render system, timer, and for
//! the spectrum demo the audio capture). The event loop sleeps until the
//! timer deadline, advances the demo once per tick and requests a redraw.

mod cube;
mod spectrum;

use std::sync::Arc;

use log::{error, warn};
use winit::event::{ElementState, KeyEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::error::Result;
use crate::params::{CaptureConfig, Projection, WindowConfig};

pub use cube::CubeApp;
pub use spectrum::SpectrumApp;

fn create_window(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<Arc<Window>> {
    let window_attributes = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    Ok(Arc::new(event_loop.create_window(window_attributes)?))
}

fn is_escape(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
}

/// Handle a failed `get_current_texture`; returns `false` if the app should exit
fn recover_surface(err: wgpu::SurfaceError, reconfigure: impl FnOnce()) -> bool {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            reconfigure();
            true
        }
        wgpu::SurfaceError::OutOfMemory => {
            error!("GPU out of memory");
            false
        }
        other => {
            warn!("Render error: {:?}", other);
            true
        }
    }
}

/// Open the spectrum analyzer window and run until it is closed
pub fn run_spectrum(window: WindowConfig, capture: CaptureConfig) -> Result<()> {
    window.validate()?;
    capture.validate()?;

    let event_loop = EventLoop::new()?;
    let mut app = SpectrumApp::new(window, capture);
    event_loop.run_app(&mut app)?;

    app.into_result()
}

/// Open the spinning cube window and run until it is closed
pub fn run_cube(window: WindowConfig, projection: Projection) -> Result<()> {
    window.validate()?;
    projection.validate()?;

    let event_loop = EventLoop::new()?;
    let mut app = CubeApp::new(window, projection);
    event_loop.run_app(&mut app)?;

    app.into_result()
}
