//! Beat Blitz showdown round
//!
//! A timed round that owns its audio source for its whole lifetime. Each
//! animation frame pulls a spectrum and updates the beat estimator; player
//! actions (tap, shake, breath) are scored against the intensity at that
//! moment.

use std::fmt;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::beat::BeatIntensityEstimator;
use super::scoring::{AccuracyScorer, ActionResult, ComboState};
use crate::consts::SHOWDOWN_SECONDS;
use crate::platform::SpectrumSource;
use crate::settings::Settings;

/// Device acceleration (g) that counts as a shake
pub const SHAKE_THRESHOLD: f32 = 1.5;
/// How long breath calibration listens before giving up
pub const BREATH_CALIBRATION_MS: u32 = 2000;
/// Loudness that calibrates breath mode, and the fallback threshold
pub const BREATH_TRIGGER_DB: f32 = -35.0;
/// Quietest metering value the microphone reports
pub const METER_FLOOR_DB: f32 = -160.0;
/// Perfect cuts needed for the Rhythm Crown
pub const CROWN_PERFECT_CUTS: u32 = 5;
/// Combo above which the summary calls out the streak
pub const STREAK_CALLOUT_COMBO: u32 = 5;
/// How long a callout stays up
pub const CALLOUT_MS: u32 = 2000;

/// Shouted on a perfect cut outside flow
pub const PERFECT_TAUNTS: [&str; 5] = [
    "You're a certified problem!",
    "Absolutely cosmic!",
    "That cut was legendary!",
    "Pure stardust energy!",
    "You're in the zone!",
];

/// Shouted on perfect cuts once in flow (and on entering it)
pub const FLOW_MESSAGES: [&str; 5] = [
    "You're in the zone!",
    "Pure rhythm!",
    "Flow like water!",
    "Cosmic rhythm!",
    "One with the beat!",
];

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Ready,
    Running,
    Finished,
}

/// Breath input state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BreathMode {
    Off,
    /// Listening for the first loud breath
    Calibrating { elapsed_ms: u32 },
    /// Readings above `threshold_db` are actions
    Armed { threshold_db: f32 },
}

/// Normalize microphone metering (dB) to a display level
#[inline]
pub fn breath_level(db: f32) -> f32 {
    ((db - METER_FLOOR_DB) / -METER_FLOOR_DB).max(0.0)
}

/// Turns microphone metering into discrete breath actions
#[derive(Debug, Clone)]
pub struct BreathDetector {
    mode: BreathMode,
    level: f32,
}

impl Default for BreathDetector {
    fn default() -> Self {
        Self {
            mode: BreathMode::Off,
            level: 0.0,
        }
    }
}

impl BreathDetector {
    pub fn start_calibration(&mut self) {
        self.mode = BreathMode::Calibrating { elapsed_ms: 0 };
    }

    pub fn stop(&mut self) {
        self.mode = BreathMode::Off;
        self.level = 0.0;
    }

    pub fn advance(&mut self, dt_ms: u32) {
        if let BreathMode::Calibrating { elapsed_ms } = self.mode {
            let elapsed_ms = elapsed_ms.saturating_add(dt_ms);
            if elapsed_ms >= BREATH_CALIBRATION_MS {
                log::info!("Breath calibration timed out, using {BREATH_TRIGGER_DB} dB");
                self.mode = BreathMode::Armed {
                    threshold_db: BREATH_TRIGGER_DB,
                };
            } else {
                self.mode = BreathMode::Calibrating { elapsed_ms };
            }
        }
    }

    /// Feed one metering reading; returns true if it is a breath action
    pub fn sample(&mut self, db: f32) -> bool {
        self.level = breath_level(db);
        match self.mode {
            BreathMode::Off => false,
            BreathMode::Calibrating { .. } => {
                if db > BREATH_TRIGGER_DB {
                    log::info!("Breath calibrated at {db:.1} dB");
                    self.mode = BreathMode::Armed { threshold_db: db };
                }
                false
            }
            BreathMode::Armed { threshold_db } => db > threshold_db,
        }
    }

    pub fn mode(&self) -> BreathMode {
        self.mode
    }

    /// Last normalized level
    pub fn level(&self) -> f32 {
        self.level
    }
}

/// End-of-round result, displayable as share text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShowdownSummary {
    pub score: u64,
    pub perfect_cuts: u32,
    pub combo: u32,
    pub best_combo: u32,
}

impl ShowdownSummary {
    pub fn from_state(state: &ComboState) -> Self {
        Self {
            score: state.score,
            perfect_cuts: state.perfect_cuts,
            combo: state.combo,
            best_combo: state.best_combo,
        }
    }

    pub fn earned_crown(&self) -> bool {
        self.perfect_cuts >= CROWN_PERFECT_CUTS
    }

    /// Current streak, if long enough to brag about
    pub fn streak(&self) -> Option<u32> {
        (self.combo > STREAK_CALLOUT_COMBO).then_some(self.combo)
    }
}

impl fmt::Display for ShowdownSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Just scored {} points with {} perfect cuts in Beat Blitz Showdown!",
            self.score, self.perfect_cuts
        )?;
        if let Some(combo) = self.streak() {
            write!(f, "\n{combo}x COMBO STREAK!")?;
        }
        if self.earned_crown() {
            write!(f, "\nEarned the Rhythm Crown!")?;
        }
        write!(f, "\n\n#BeatBlitz #RhythmGaming")
    }
}

/// One showdown round and the resources it owns
pub struct Showdown<S: SpectrumSource> {
    source: S,
    bins: Vec<u8>,
    estimator: BeatIntensityEstimator,
    scorer: AccuracyScorer,
    breath: BreathDetector,
    phase: RoundPhase,
    duration_ms: u32,
    time_left_ms: u32,
    shake_enabled: bool,
    breath_enabled: bool,
    rng: Pcg32,
    callout: Option<&'static str>,
    callout_ms: u32,
}

impl<S: SpectrumSource> Showdown<S> {
    pub fn new(source: S) -> Self {
        Self::with_duration(source, SHOWDOWN_SECONDS)
    }

    pub fn with_duration(source: S, seconds: u32) -> Self {
        let bins = vec![0; source.config().bin_count()];
        let duration_ms = seconds.saturating_mul(1000);
        Self {
            source,
            bins,
            estimator: BeatIntensityEstimator::new(),
            scorer: AccuracyScorer::new(),
            breath: BreathDetector::default(),
            phase: RoundPhase::Ready,
            duration_ms,
            time_left_ms: duration_ms,
            shake_enabled: true,
            breath_enabled: true,
            rng: Pcg32::seed_from_u64(0),
            callout: None,
            callout_ms: 0,
        }
    }

    /// Seed for callout picks
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg32::seed_from_u64(seed);
        self
    }

    /// Round length and input toggles from player settings
    pub fn from_settings(source: S, settings: &Settings) -> Self {
        let mut showdown = Self::with_duration(source, settings.showdown_seconds);
        showdown.shake_enabled = settings.shake_input;
        showdown.breath_enabled = settings.breath_input;
        showdown
    }

    /// Begin (or restart) the round
    pub fn start(&mut self) {
        self.scorer.reset();
        self.estimator.reset();
        self.time_left_ms = self.duration_ms;
        self.callout = None;
        self.callout_ms = 0;
        self.phase = RoundPhase::Running;
        log::info!("Showdown started ({} s)", self.duration_ms / 1000);
    }

    /// Advance clocks. Returns the summary when the round runs out of time.
    pub fn advance(&mut self, dt_ms: u32) -> Option<ShowdownSummary> {
        self.breath.advance(dt_ms);
        self.callout_ms = self.callout_ms.saturating_sub(dt_ms);
        if self.callout_ms == 0 {
            self.callout = None;
        }
        if self.phase != RoundPhase::Running {
            return None;
        }

        self.source.advance(dt_ms);
        self.time_left_ms = self.time_left_ms.saturating_sub(dt_ms);
        if self.time_left_ms == 0 {
            return Some(self.end());
        }
        None
    }

    /// Analyse one audio frame; returns the current intensity
    pub fn frame(&mut self) -> f32 {
        if self.phase != RoundPhase::Running {
            return self.estimator.intensity();
        }
        self.source.frequency_data(&mut self.bins);
        self.estimator.update(&self.bins)
    }

    pub fn tap(&mut self) -> Option<ActionResult> {
        self.act()
    }

    /// Device motion sample; only a strong enough shake is an action
    pub fn shake(&mut self, acceleration: Vec3) -> Option<ActionResult> {
        if !self.shake_enabled || acceleration.length() <= SHAKE_THRESHOLD {
            return None;
        }
        self.act()
    }

    pub fn start_breath_calibration(&mut self) {
        if self.breath_enabled {
            self.breath.start_calibration();
        }
    }

    pub fn stop_breath(&mut self) {
        self.breath.stop();
    }

    /// Microphone metering sample in dB
    pub fn breath(&mut self, db: f32) -> Option<ActionResult> {
        if self.breath.sample(db) {
            self.act()
        } else {
            None
        }
    }

    fn act(&mut self) -> Option<ActionResult> {
        if self.phase != RoundPhase::Running {
            return None;
        }
        let result = self.scorer.on_action(self.estimator.intensity());
        if result.perfect {
            let pool = if self.scorer.in_flow() {
                &FLOW_MESSAGES
            } else {
                &PERFECT_TAUNTS
            };
            let line = pool[self.rng.random_range(0..pool.len())];
            self.callout = Some(line);
            self.callout_ms = CALLOUT_MS;
        }
        Some(result)
    }

    /// Callout currently on screen, if any
    pub fn callout(&self) -> Option<&'static str> {
        self.callout
    }

    /// Stop the round now
    pub fn end(&mut self) -> ShowdownSummary {
        self.phase = RoundPhase::Finished;
        self.breath.stop();
        let summary = self.summary();
        log::info!(
            "Showdown finished: {} points, {} perfect cuts",
            summary.score,
            summary.perfect_cuts
        );
        summary
    }

    pub fn summary(&self) -> ShowdownSummary {
        ShowdownSummary::from_state(self.scorer.state())
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn intensity(&self) -> f32 {
        self.estimator.intensity()
    }

    /// Whole seconds left, rounded up
    pub fn time_left_secs(&self) -> u32 {
        self.time_left_ms.div_ceil(1000)
    }

    /// Fraction of the round remaining, 1.0 at start
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.time_left_ms as f32 / self.duration_ms as f32
    }

    pub fn combo(&self) -> &ComboState {
        self.scorer.state()
    }

    pub fn breath_detector(&self) -> &BreathDetector {
        &self.breath
    }

    /// Leave the screen, handing back the audio source
    pub fn into_source(self) -> S {
        self.source
    }
}
