//! Audio spectrum analysis and bar chart mapping.
//!
//! A block of mono samples is windowed, transformed and converted to dB
//! ([`compute_spectrum`]), then spread over the horizontal pixels of the
//! chart on a logarithmic frequency axis ([`render_bars`]).

mod analysis;
mod bars;

pub use analysis::{
    compute_spectrum, hann_window, magnitude_to_db, SpectrumAnalyzer, MAGNITUDE_EPSILON,
    SILENCE_DB,
};
pub use bars::{column_bin, level_color, render_bars, render_bars_scaled, Bar};
