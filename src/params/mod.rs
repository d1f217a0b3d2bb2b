//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (Hz, samples, pixels, degrees, milliseconds)
//! - Documented ranges and meanings
//! - A `validate()` check where a bad value would break the pipeline

mod audio;
mod render;

// Re-export all types
pub use audio::{BarScale, CaptureConfig};
pub use render::{aspect_ratio, Projection, WindowConfig};
