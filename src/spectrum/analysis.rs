//! Windowed FFT of one audio block into a dB magnitude spectrum.
//!
//! Samples arrive as `f32` but the transform runs in `f64`: a 2048-point sum
//! of full-scale `f32` values overflows `f32` and would turn loud bins into
//! `inf`. Only the final dB values are narrowed back to `f32`.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

/// Offset added to every magnitude before the log so silence maps to a
/// finite floor instead of -inf.
pub const MAGNITUDE_EPSILON: f64 = 1e-10;

/// dB value of a zero-magnitude bin: `20 * log10(MAGNITUDE_EPSILON)` = -200 dB
pub const SILENCE_DB: f32 = -200.0;

/// Hann window coefficient for `index` in a window of `size` samples
pub fn hann_window(index: usize, size: usize) -> f64 {
    if size <= 1 {
        return 1.0;
    }
    0.5 * (1.0 - ((2.0 * PI * index as f64) / (size as f64 - 1.0)).cos())
}

/// Convert a linear magnitude to decibels
pub fn magnitude_to_db(magnitude: f64) -> f32 {
    (20.0 * (magnitude + MAGNITUDE_EPSILON).log10()) as f32
}

/// Reusable spectrum analyzer for a fixed block size.
///
/// The FFT plan, window table and scratch buffers are built once, so
/// [`SpectrumAnalyzer::process`] is safe to call from the audio callback.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f64>>,
    window: Vec<f64>,
    buffer: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl SpectrumAnalyzer {
    pub fn new(block_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(block_size.max(1));
        let scratch_len = fft.get_inplace_scratch_len();

        Self {
            fft,
            window: (0..block_size)
                .map(|i| hann_window(i, block_size))
                .collect(),
            buffer: vec![Complex::new(0.0, 0.0); block_size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        }
    }

    /// Number of bins in each output frame
    pub fn bins(&self) -> usize {
        self.buffer.len() / 2
    }

    /// Analyze one block, writing `block_size / 2` dB values into `out`.
    ///
    /// Blocks shorter than the configured size are zero-padded; extra
    /// samples are ignored.
    pub fn process_into(&mut self, block: &[f32], out: &mut Vec<f32>) {
        out.clear();
        if self.bins() == 0 {
            return;
        }

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = block.get(i).copied().unwrap_or(0.0);
            // NaN/inf from a misbehaving device would poison every bin
            let sample = if sample.is_finite() { sample as f64 } else { 0.0 };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        let bins = self.bins();
        out.extend(
            self.buffer[..bins]
                .iter()
                .map(|c| magnitude_to_db(c.norm())),
        );
    }

    /// Analyze one block into a freshly allocated frame
    pub fn process(&mut self, block: &[f32]) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.bins());
        self.process_into(block, &mut out);
        out
    }
}

/// One-shot spectrum of a block: Hann window, FFT magnitude of the first
/// N/2 bins, converted to dB.
pub fn compute_spectrum(block: &[f32]) -> Vec<f32> {
    if block.len() < 2 {
        return Vec::new();
    }
    SpectrumAnalyzer::new(block.len()).process(block)
}
