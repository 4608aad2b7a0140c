//! Platform abstraction layer
//!
//! Capabilities that differ between web and native builds are expressed as
//! traits here. Sessions own their implementation for their whole lifetime;
//! nothing in this module is process-wide.

/// Analyser configuration, mirrors a Web Audio `AnalyserNode`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyserConfig {
    pub fft_size: usize,
    pub smoothing_time_constant: f32,
    pub min_decibels: f32,
    pub max_decibels: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            smoothing_time_constant: 0.85,
            min_decibels: -90.0,
            max_decibels: -10.0,
        }
    }
}

impl AnalyserConfig {
    /// Number of magnitude bins per frame
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }
}

/// Supplies byte frequency magnitudes, one array per animation frame
pub trait SpectrumSource {
    /// Fill `bins` with the current magnitudes (0-255 per bin)
    fn frequency_data(&mut self, bins: &mut [u8]);

    /// Advance the source's clock (audio position)
    fn advance(&mut self, _dt_ms: u32) {}

    fn config(&self) -> AnalyserConfig {
        AnalyserConfig::default()
    }
}

/// Source for when no audio is playing
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl SpectrumSource for Silence {
    fn frequency_data(&mut self, bins: &mut [u8]) {
        bins.fill(0);
    }
}

/// Synthetic four-on-the-floor track
///
/// Low bins are loud for the first half of every period and quiet for the
/// second half, which is what the showdown falls back to when no analyser is
/// available.
#[derive(Debug, Clone)]
pub struct Metronome {
    period_ms: u32,
    position_ms: u32,
    loud: u8,
    quiet: u8,
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new(500)
    }
}

impl Metronome {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(2),
            position_ms: 0,
            loud: 240,
            quiet: 40,
        }
    }

    /// True while the current period is in its loud half
    pub fn on_beat(&self) -> bool {
        self.position_ms % self.period_ms < self.period_ms / 2
    }

    pub fn position_ms(&self) -> u32 {
        self.position_ms
    }
}

impl SpectrumSource for Metronome {
    fn frequency_data(&mut self, bins: &mut [u8]) {
        let low_end = bins.len() / 10;
        let level = if self.on_beat() { self.loud } else { self.quiet };
        for (i, bin) in bins.iter_mut().enumerate() {
            *bin = if i < low_end { level } else { level / 4 };
        }
    }

    fn advance(&mut self, dt_ms: u32) {
        self.position_ms = self.position_ms.wrapping_add(dt_ms);
    }
}
