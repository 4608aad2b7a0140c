//! Beat intensity from frequency data
//!
//! Low-frequency energy is blended into one value and compared with the
//! average of the last 30 frames. Frames 20% louder than that average are
//! beats; everything else is floored at 0.1 so the visuals never go dead.

use std::collections::VecDeque;

use crate::error::{Error, Result};

/// Frames kept for the adaptive threshold
pub const WINDOW_LEN: usize = 30;
/// A frame must exceed the window average by this factor to count as a beat
pub const THRESHOLD_FACTOR: f32 = 1.2;
/// Minimum reported intensity for non-beat frames
pub const INTENSITY_FLOOR: f32 = 0.1;

const SUB_BASS_WEIGHT: f32 = 0.3;
const BASS_WEIGHT: f32 = 0.35;
const MID_WEIGHT: f32 = 0.25;
const HIGH_WEIGHT: f32 = 0.1;

/// Extra intensity for very heavy sub-bass / bass frames
const SUB_BASS_HIT_LEVEL: f32 = 220.0;
const SUB_BASS_HIT_BONUS: f32 = 0.3;
const BASS_HIT_LEVEL: f32 = 200.0;
const BASS_HIT_BONUS: f32 = 0.2;

/// Mean magnitude (0-255) per band
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BandLevels {
    /// First 5% of bins
    pub sub_bass: f32,
    /// First 10% of bins (includes sub-bass)
    pub bass: f32,
    /// 10% to 30%
    pub mid: f32,
    /// 30% to 50%; the top half of the spectrum is ignored
    pub high: f32,
}

impl BandLevels {
    pub fn from_spectrum(spectrum: &[u8]) -> Self {
        let n = spectrum.len();
        let sub_end = n * 5 / 100;
        let bass_end = n / 10;
        let mid_end = n * 3 / 10;
        let high_end = n / 2;

        Self {
            sub_bass: mean(&spectrum[..sub_end]),
            bass: mean(&spectrum[..bass_end]),
            mid: mean(&spectrum[bass_end..mid_end]),
            high: mean(&spectrum[mid_end..high_end]),
        }
    }

    /// Weighted blend in [0, 1], boosted for heavy low end
    pub fn blend(&self) -> f32 {
        let weighted = (self.sub_bass * SUB_BASS_WEIGHT
            + self.bass * BASS_WEIGHT
            + self.mid * MID_WEIGHT
            + self.high * HIGH_WEIGHT)
            / 255.0;

        let mut strength = weighted;
        if self.sub_bass > SUB_BASS_HIT_LEVEL {
            strength += SUB_BASS_HIT_BONUS;
        }
        if self.bass > BASS_HIT_LEVEL {
            strength += BASS_HIT_BONUS;
        }
        strength.clamp(0.0, 1.0)
    }
}

fn mean(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}

/// Rolling beat detector, one per playing track
#[derive(Debug, Clone)]
pub struct BeatIntensityEstimator {
    window: VecDeque<f32>,
    intensity: f32,
    beat: bool,
}

impl Default for BeatIntensityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl BeatIntensityEstimator {
    pub fn new() -> Self {
        Self {
            window: VecDeque::with_capacity(WINDOW_LEN + 1),
            intensity: 0.0,
            beat: false,
        }
    }

    /// Feed one frame. An empty spectrum is rejected and leaves the window
    /// untouched.
    pub fn try_update(&mut self, spectrum: &[u8]) -> Result<f32> {
        if spectrum.is_empty() {
            return Err(Error::EmptySpectrum);
        }

        let strength = BandLevels::from_spectrum(spectrum).blend();

        self.window.push_back(strength);
        if self.window.len() > WINDOW_LEN {
            self.window.pop_front();
        }

        self.beat = strength > self.threshold();
        self.intensity = if self.beat {
            strength
        } else {
            strength.max(INTENSITY_FLOOR)
        };
        Ok(self.intensity)
    }

    /// Like `try_update`, but bad input reads as silence
    pub fn update(&mut self, spectrum: &[u8]) -> f32 {
        match self.try_update(spectrum) {
            Ok(intensity) => intensity,
            Err(e) => {
                log::warn!("Ignoring audio frame: {e}");
                self.intensity = 0.0;
                self.beat = false;
                0.0
            }
        }
    }

    /// Average of the window times `THRESHOLD_FACTOR`
    pub fn threshold(&self) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }
        let avg = self.window.iter().sum::<f32>() / self.window.len() as f32;
        avg * THRESHOLD_FACTOR
    }

    /// Last reported intensity
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Whether the last frame was above threshold
    pub fn is_beat(&self) -> bool {
        self.beat
    }

    pub fn samples(&self) -> usize {
        self.window.len()
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.intensity = 0.0;
        self.beat = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat(level: u8) -> Vec<u8> {
        vec![level; 1024]
    }

    #[test]
    fn test_band_partition() {
        // 100 bins: sub 0..5, bass 0..10, mid 10..30, high 30..50
        let mut spectrum = vec![0u8; 100];
        spectrum[..5].fill(200);
        spectrum[5..10].fill(100);
        spectrum[10..30].fill(50);
        spectrum[30..50].fill(10);
        spectrum[50..].fill(255);

        let levels = BandLevels::from_spectrum(&spectrum);
        assert_eq!(levels.sub_bass, 200.0);
        assert_eq!(levels.bass, 150.0);
        assert_eq!(levels.mid, 50.0);
        assert_eq!(levels.high, 10.0);
    }

    #[test]
    fn test_blend_silence_and_max() {
        assert_eq!(BandLevels::from_spectrum(&flat(0)).blend(), 0.0);
        assert_eq!(BandLevels::from_spectrum(&flat(255)).blend(), 1.0);
    }

    #[test]
    fn test_blend_bass_bonus() {
        // Bass above 200 but sub-bass not above 220
        let levels = BandLevels {
            sub_bass: 210.0,
            bass: 210.0,
            mid: 0.0,
            high: 0.0,
        };
        let base = (210.0 * 0.3 + 210.0 * 0.35) / 255.0;
        assert!((levels.blend() - (base + 0.2)).abs() < 1e-5);
    }

    #[test]
    fn test_blend_sub_bass_bonus() {
        // 100 bins: sub-bass full, rest of bass silent, so bass sits at 127.5
        let mut spectrum = vec![0u8; 100];
        spectrum[..5].fill(255);
        let levels = BandLevels::from_spectrum(&spectrum);
        assert_eq!(levels.sub_bass, 255.0);
        assert_eq!(levels.bass, 127.5);

        let base = (255.0 * 0.3 + 127.5 * 0.35) / 255.0;
        assert!((levels.blend() - (base + 0.3)).abs() < 1e-5);
    }

    #[test]
    fn test_sub_bass_bonus_needs_more_than_220() {
        let at = BandLevels {
            sub_bass: 220.0,
            ..Default::default()
        };
        let above = BandLevels {
            sub_bass: 221.0,
            ..Default::default()
        };
        assert!((at.blend() - 220.0 * 0.3 / 255.0).abs() < 1e-6);
        assert!((above.blend() - (221.0 * 0.3 / 255.0 + 0.3)).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_spectrum_has_empty_bands() {
        let levels = BandLevels::from_spectrum(&[255]);
        assert_eq!(levels, BandLevels::default());
    }

    #[test]
    fn test_quiet_frames_are_floored() {
        let mut est = BeatIntensityEstimator::new();
        let out = est.update(&flat(5));
        assert!(!est.is_beat());
        assert_eq!(out, INTENSITY_FLOOR);
    }

    #[test]
    fn test_spike_after_steady_level_is_beat() {
        let mut est = BeatIntensityEstimator::new();
        for _ in 0..WINDOW_LEN {
            est.update(&flat(60));
        }
        assert!(!est.is_beat());

        let out = est.update(&flat(180));
        assert!(est.is_beat());
        let expected = BandLevels::from_spectrum(&flat(180)).blend();
        assert!((out - expected).abs() < 1e-6);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut est = BeatIntensityEstimator::new();
        for _ in 0..100 {
            est.update(&flat(30));
        }
        assert_eq!(est.samples(), WINDOW_LEN);
    }

    #[test]
    fn test_empty_spectrum_is_neutral() {
        let mut est = BeatIntensityEstimator::new();
        est.update(&flat(100));
        assert!(matches!(est.try_update(&[]), Err(Error::EmptySpectrum)));
        assert_eq!(est.samples(), 1);

        assert_eq!(est.update(&[]), 0.0);
        assert_eq!(est.intensity(), 0.0);
        assert_eq!(est.samples(), 1);
    }

    #[test]
    fn test_reset() {
        let mut est = BeatIntensityEstimator::new();
        est.update(&flat(100));
        est.reset();
        assert_eq!(est.samples(), 0);
        assert_eq!(est.threshold(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_intensity_bounded(frames in prop::collection::vec(
            prop::collection::vec(any::<u8>(), 0..512), 1..40)) {
            let mut est = BeatIntensityEstimator::new();
            for frame in &frames {
                let v = est.update(frame);
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
