//! Golf state and core simulation types
//!
//! Units are screen pixels and velocities are pixels per tick; y grows
//! downward, so gravity adds to `vel.y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::rewards::{RewardDraw, RewardTier};
use crate::settings::Settings;

/// Current phase of a hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GolfPhase {
    /// Ball resting on the tee, waiting for a drag-release
    Aiming,
    /// Ball moving; ticks run
    InFlight,
}

/// Ball position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Default for BallState {
    fn default() -> Self {
        Self::at_tee()
    }
}

impl BallState {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Resting on the tee
    pub fn at_tee() -> Self {
        Self {
            pos: Vec2::new(TEE_X, TEE_Y),
            vel: Vec2::ZERO,
        }
    }
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub opacity: f32,
}

/// Obstacle behaviour on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Kicks the ball upward
    Bounce,
    /// Halves the ball's speed
    Slow,
}

/// A static obstacle on a hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub kind: ObstacleKind,
    /// Remaining highlight time (ms), purely cosmetic
    #[serde(default)]
    pub highlight_ms: u32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, kind: ObstacleKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            kind,
            highlight_ms: 0,
        }
    }

    /// Light up after a hit (restarts the window)
    pub fn trigger(&mut self) {
        self.highlight_ms = OBSTACLE_HIGHLIGHT_MS;
    }

    pub fn is_active(&self) -> bool {
        self.highlight_ms > 0
    }

    /// Count the highlight down; clearing an inactive obstacle is a no-op
    pub fn decay(&mut self, dt_ms: u32) {
        self.highlight_ms = self.highlight_ms.saturating_sub(dt_ms);
    }
}

/// One hole of the course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub name: String,
    pub cup: Vec2,
    /// Distance at which the cup starts pulling the ball
    pub magnet_radius: f32,
    /// Pull at the cup's center, falling linearly to 0 at the radius
    pub magnet_strength: f32,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl Hole {
    pub fn new(name: &str, cup: Vec2, magnet_radius: f32, magnet_strength: f32) -> Self {
        Self {
            name: name.to_string(),
            cup,
            magnet_radius,
            magnet_strength,
            obstacles: Vec::new(),
        }
    }

    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }
}

/// The built-in course, played in order and then repeated
pub fn default_course() -> Vec<Hole> {
    vec![
        Hole::new(
            "Whispering Ridge",
            Vec2::new(500.0, 200.0),
            100.0,
            MAGNETIC_FORCE,
        ),
        Hole::new(
            "Bounce Canyon",
            Vec2::new(700.0, 300.0),
            120.0,
            MAGNETIC_FORCE * 1.5,
        )
        .with_obstacle(Obstacle::new(400.0, 250.0, ObstacleKind::Bounce))
        .with_obstacle(Obstacle::new(550.0, 350.0, ObstacleKind::Slow)),
    ]
}

/// Power and direction chosen by dragging
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aim {
    /// 0 to `MAX_POWER`
    pub power: f32,
    /// Radians, screen coordinates
    pub angle: f32,
}

impl Aim {
    /// Aim from a drag translation
    pub fn from_drag(drag: Vec2) -> Self {
        Self {
            power: (drag.length() * POWER_MULTIPLIER).min(MAX_POWER),
            angle: drag.y.atan2(drag.x),
        }
    }

    /// Launch velocity (pixels per tick)
    pub fn launch_velocity(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.power * LAUNCH_SCALE
    }
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GolfEvent {
    Shot { aim: Aim },
    ObstacleHit { index: usize, kind: ObstacleKind },
    MagnetEntered,
    MagnetLeft,
    RemoteControl,
    HoleComplete { hole: usize, reward: RewardTier },
    ShotFailed,
}

/// A golf session: course, ball, timers and the reward draw
#[derive(Debug, Clone)]
pub struct GolfSession {
    pub ball: BallState,
    pub phase: GolfPhase,
    /// Never empty
    pub(crate) holes: Vec<Hole>,
    /// Always a valid index into `holes`
    pub(crate) hole_index: usize,
    /// Shots taken this session
    pub shots: u32,
    pub holes_completed: u32,
    /// Current drag, if the player is aiming
    pub aim: Option<Aim>,
    /// Remaining remote control time (ms)
    pub remote_control_ms: u32,
    /// Ball is inside the current hole's magnetic radius
    pub magnetic_active: bool,
    /// Simulated time
    pub time_ms: u64,
    /// Recent positions, newest first
    pub trail: Vec<TrailPoint>,
    pub trail_length: usize,
    pub rewards: RewardDraw,
    pub(crate) events: Vec<GolfEvent>,
    pub(crate) accumulator_ms: f32,
}

impl GolfSession {
    /// Default course, rewards seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self::build(default_course(), RewardDraw::new(seed))
    }

    pub fn with_course(holes: Vec<Hole>, seed: u64) -> Result<Self> {
        if holes.is_empty() {
            return Err(Error::EmptyCourse);
        }
        Ok(Self::build(holes, RewardDraw::new(seed)))
    }

    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let mut session = Self::new(seed);
        session.trail_length = settings.trail_length();
        session
    }

    fn build(holes: Vec<Hole>, rewards: RewardDraw) -> Self {
        let trail_length = Settings::default().trail_length();
        Self {
            ball: BallState::at_tee(),
            phase: GolfPhase::Aiming,
            holes,
            hole_index: 0,
            shots: 0,
            holes_completed: 0,
            aim: None,
            remote_control_ms: 0,
            magnetic_active: false,
            time_ms: 0,
            trail: Vec::with_capacity(trail_length),
            trail_length,
            rewards,
            events: Vec::new(),
            accumulator_ms: 0.0,
        }
    }

    pub fn hole(&self) -> &Hole {
        &self.holes[self.hole_index]
    }

    pub(crate) fn hole_mut(&mut self) -> &mut Hole {
        &mut self.holes[self.hole_index]
    }

    /// The course, in play order
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn hole_index(&self) -> usize {
        self.hole_index
    }

    /// Move on to the next hole, wrapping after the last
    pub(crate) fn advance_hole(&mut self) {
        self.hole_index = (self.hole_index + 1) % self.holes.len();
    }

    pub fn in_flight(&self) -> bool {
        self.phase == GolfPhase::InFlight
    }

    pub fn remote_control_active(&self) -> bool {
        self.remote_control_ms > 0
    }

    /// Update the aim while dragging
    pub fn drag(&mut self, translation: Vec2) {
        if self.phase == GolfPhase::Aiming {
            self.aim = Some(Aim::from_drag(translation));
        }
    }

    /// Release the drag and launch; ignored while the ball is moving
    pub fn shoot(&mut self) -> bool {
        if self.phase != GolfPhase::Aiming {
            return false;
        }
        let aim = self.aim.take().unwrap_or_default();
        self.ball.vel = aim.launch_velocity();
        self.phase = GolfPhase::InFlight;
        self.trail.clear();
        self.shots += 1;
        log::debug!(
            "Shot {}: power={:.1} angle={:.2}",
            self.shots,
            aim.power,
            aim.angle
        );
        self.events.push(GolfEvent::Shot { aim });
        true
    }

    /// Start the remote control boost; only while in flight and not already boosting
    pub fn activate_remote_control(&mut self) -> bool {
        if self.phase != GolfPhase::InFlight || self.remote_control_active() {
            return false;
        }
        self.remote_control_ms = REMOTE_CONTROL_MS;
        self.events.push(GolfEvent::RemoteControl);
        true
    }

    /// Put the ball back on the tee
    pub fn reset_ball(&mut self) {
        self.ball = BallState::at_tee();
        self.phase = GolfPhase::Aiming;
        self.aim = None;
        self.remote_control_ms = 0;
        self.magnetic_active = false;
        self.trail.clear();
    }

    /// Record the ball's position before it moves
    pub fn record_trail(&mut self) {
        if self.trail_length == 0 {
            return;
        }
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.ball.pos,
                opacity: 1.0,
            },
        );
        self.trail.truncate(self.trail_length);
        for point in &mut self.trail {
            point.opacity *= TRAIL_FADE;
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GolfEvent> {
        std::mem::take(&mut self.events)
    }
}
