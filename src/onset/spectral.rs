//! Spectral-flux onset detector
//!
//! Short-time FFT over a Hann-windowed signal; per-frame flux is the sum of
//! positive magnitude differences against the previous frame. Peaks above an
//! adaptive threshold become onsets, with a minimum gap between reports.

use super::{DetectError, Detector, DetectorConfig, Onset};
use crate::audio::SampleBuffer;
use realfft::RealFftPlanner;

/// Spectral-flux onset detector
pub struct SpectralFluxDetector {
    config: DetectorConfig,
}

impl SpectralFluxDetector {
    /// Create a detector, validating the configuration up front
    pub fn new(config: DetectorConfig) -> Result<Self, DetectError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Per-frame spectral flux for a mono signal
    fn spectral_flux(&self, samples: &[f32]) -> Vec<f32> {
        let window_size = self.config.window_size;
        let hop_size = self.config.hop_size;

        if samples.len() < window_size {
            return Vec::new();
        }

        let num_frames = (samples.len() - window_size) / hop_size + 1;

        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(window_size);

        let window = hann_window(window_size);
        let mut input = fft.make_input_vec();
        let mut spectrum = fft.make_output_vec();
        let mut prev_magnitudes: Option<Vec<f32>> = None;

        let mut flux = Vec::with_capacity(num_frames);

        for frame_idx in 0..num_frames {
            let start = frame_idx * hop_size;
            let frame = &samples[start..start + window_size];

            for (slot, (&sample, &w)) in input.iter_mut().zip(frame.iter().zip(&window)) {
                *slot = sample * w;
            }

            // Lengths match the plan by construction.
            fft.process(&mut input, &mut spectrum).unwrap();
            let magnitudes: Vec<f32> = spectrum.iter().map(|c| c.norm()).collect();

            let frame_flux = match prev_magnitudes {
                Some(ref prev) => magnitudes
                    .iter()
                    .zip(prev)
                    .map(|(curr, prev)| (curr - prev).max(0.0))
                    .sum(),
                // First frame has nothing to diff against.
                None => 0.0,
            };

            flux.push(frame_flux);
            prev_magnitudes = Some(magnitudes);
        }

        flux
    }

    /// Pick flux peaks above the adaptive threshold
    fn pick_peaks(&self, flux: &[f32], sample_rate: u32) -> Vec<Onset> {
        if flux.len() < 3 || sample_rate == 0 {
            return Vec::new();
        }

        let mean = flux.iter().sum::<f32>() / flux.len() as f32;
        let variance = flux.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / flux.len() as f32;
        let std_dev = variance.sqrt();
        let threshold = mean + self.config.activation_threshold * std_dev;

        let hop_secs = self.config.hop_size as f64 / sample_rate as f64;
        let min_gap_frames = (self.config.min_gap_ms / 1000.0 / hop_secs).ceil() as usize;

        log::debug!(
            "{} flux frames, threshold {:.4} (mean {:.4}, std {:.4})",
            flux.len(),
            threshold,
            mean,
            std_dev
        );

        let mut onsets = Vec::new();
        let mut last_peak: Option<usize> = None;

        for i in 1..flux.len() - 1 {
            let is_peak = flux[i] > flux[i - 1] && flux[i] > flux[i + 1];
            let gap_ok = match last_peak {
                Some(last) => i - last >= min_gap_frames,
                None => true,
            };

            if is_peak && flux[i] > threshold && gap_ok {
                onsets.push(Onset {
                    time: (i * self.config.hop_size) as f32 / sample_rate as f32,
                    amplitude: flux[i],
                });
                last_peak = Some(i);
            }
        }

        onsets
    }
}

impl Detector for SpectralFluxDetector {
    fn detect(&self, audio: &SampleBuffer) -> Result<Vec<Onset>, DetectError> {
        let mono = audio.to_mono();
        if mono.is_empty() {
            return Ok(Vec::new());
        }

        let flux = self.spectral_flux(&mono);
        let onsets = self.pick_peaks(&flux, audio.sample_rate);

        log::debug!("{} onsets detected", onsets.len());
        Ok(onsets)
    }
}

/// Hann window coefficients to reduce spectral leakage
fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / size as f32).cos())
        })
        .collect()
}
