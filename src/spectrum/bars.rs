//! Mapping from a dB spectrum to one vertical bar per horizontal pixel.

use crate::params::BarScale;

/// A single vertical bar anchored at the bottom edge of the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Horizontal pixel column
    pub x: u32,

    /// Bar height in pixels, in [0, pixel_height]
    pub height: f32,

    /// Linear RGB, red at the floor fading to green at full scale
    pub color: [f32; 3],
}

/// Red → green ramp for a normalized level in [0, 1]
pub fn level_color(level: f32) -> [f32; 3] {
    let level = level.clamp(0.0, 1.0);
    [1.0 - level, level, 0.0]
}

/// Spectrum bin shown at pixel column `x` of a `width`-pixel chart.
///
/// Columns are spaced exponentially over the bins so low frequencies get
/// as much room as high ones.
pub fn column_bin(x: u32, width: u32, num_bins: usize) -> usize {
    if num_bins == 0 || width == 0 {
        return 0;
    }
    let t = x as f64 / width as f64;
    let bin = ((num_bins as f64).ln() * t).exp().floor() as usize;
    bin.min(num_bins - 1)
}

/// Render with the default 60 dB dynamic range
pub fn render_bars(spectrum: &[f32], pixel_width: u32, pixel_height: u32) -> Vec<Bar> {
    render_bars_scaled(spectrum, pixel_width, pixel_height, BarScale::default())
}

/// Map a dB spectrum onto `pixel_width` bars of at most `pixel_height` pixels.
///
/// The range shown is `[max_db - dynamic_range_db, max_db]` of this frame.
/// A flat spectrum (silence) carries no signal above the floor and renders
/// every bar at zero height.
pub fn render_bars_scaled(
    spectrum: &[f32],
    pixel_width: u32,
    pixel_height: u32,
    scale: BarScale,
) -> Vec<Bar> {
    let (min_frame, max_db) = spectrum
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let min_db = max_db - scale.dynamic_range_db;
    let span = max_db - min_db;
    let flat = max_db <= min_frame || span <= 0.0;

    (0..pixel_width)
        .map(|x| {
            let level = if flat {
                0.0
            } else {
                let db = spectrum[column_bin(x, pixel_width, spectrum.len())];
                let level = ((db - min_db) / span).clamp(0.0, 1.0);
                // NaN survives clamp
                if level.is_nan() {
                    0.0
                } else {
                    level
                }
            };

            Bar {
                x,
                height: level * pixel_height as f32,
                color: level_color(level),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::compute_spectrum;

    fn ramp_spectrum(bins: usize) -> Vec<f32> {
        (0..bins).map(|i| -120.0 + 100.0 * i as f32 / bins as f32).collect()
    }

    #[test]
    fn test_silence_renders_zero_height_red_bars() {
        let spectrum = compute_spectrum(&[0.0; 2048]);
        let bars = render_bars(&spectrum, 800, 200);

        assert_eq!(bars.len(), 800);
        for bar in &bars {
            assert_eq!(bar.height, 0.0);
            assert_eq!(bar.color, [1.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_bar_count_and_height_bounds() {
        let spectrum = ramp_spectrum(1024);
        for &(w, h) in &[(1u32, 1u32), (37, 10), (800, 200), (1920, 1080)] {
            let bars = render_bars(&spectrum, w, h);
            assert_eq!(bars.len(), w as usize);
            for (i, bar) in bars.iter().enumerate() {
                assert_eq!(bar.x, i as u32);
                assert!(bar.height >= 0.0 && bar.height <= h as f32);
            }
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(render_bars(&ramp_spectrum(16), 0, 100).is_empty());

        let bars = render_bars(&[], 10, 100);
        assert_eq!(bars.len(), 10);
        assert!(bars.iter().all(|b| b.height == 0.0));
    }

    #[test]
    fn test_loudest_bin_reaches_full_height() {
        let mut spectrum = vec![-100.0; 64];
        spectrum[59..].fill(-10.0);

        // Last column maps to bin floor(64^(63/64)) = 59
        let bars = render_bars(&spectrum, 64, 100);
        let last = bars[63];
        assert!((last.height - 100.0).abs() < 1e-4);
        assert_eq!(last.color, [0.0, 1.0, 0.0]);

        // Everything else is more than 60 dB down
        assert!(bars[..32].iter().all(|b| b.height == 0.0));
    }

    #[test]
    fn test_level_normalization() {
        // max = 0 dB, floor = -60 dB, -30 dB sits half way
        let spectrum = vec![-30.0, -30.0, 0.0, -90.0];
        let bars = render_bars(&spectrum, 1, 200);

        // Column 0 always maps to bin 1
        assert!((bars[0].height - 100.0).abs() < 1e-3);
        assert!((bars[0].color[0] - 0.5).abs() < 1e-6);
        assert!((bars[0].color[1] - 0.5).abs() < 1e-6);
        assert_eq!(bars[0].color[2], 0.0);
    }

    #[test]
    fn test_column_bin_is_log_spaced_and_clamped() {
        assert_eq!(column_bin(0, 800, 1024), 1);
        assert_eq!(column_bin(200, 800, 1024), 5); // 1024^(1/4) ≈ 5.66
        assert_eq!(column_bin(799, 800, 1024), 1015);

        assert_eq!(column_bin(0, 10, 1), 0);
        assert_eq!(column_bin(5, 10, 0), 0);

        let bins: Vec<usize> = (0..800).map(|x| column_bin(x, 800, 1024)).collect();
        assert!(bins.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_non_finite_values_do_not_leak() {
        let spectrum = vec![f32::NAN, -50.0, 0.0, f32::NEG_INFINITY];
        let bars = render_bars(&spectrum, 4, 50);

        for bar in &bars {
            assert!(bar.height.is_finite());
            assert!(bar.color.iter().all(|c| c.is_finite()));
        }
    }
}
