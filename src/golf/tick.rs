//! Fixed timestep golf simulation
//!
//! `step` advances a ball by one 16 ms tick against a hole and reports what
//! happened; `tick` wraps it with the session's timers, rewards and hole
//! cycling.

use glam::Vec2;

use super::collision::{
    ball_in_cup, magnet_pull, obstacle_contact, obstacle_response, out_of_bounds,
};
use super::state::{BallState, GolfEvent, GolfPhase, GolfSession, Hole};
use crate::consts::*;

/// How a tick ended for the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    InFlight,
    HoleComplete,
    OutOfBounds,
}

/// Result of advancing the ball one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub ball: BallState,
    /// Indices of obstacles hit this tick, in array order
    pub hits: Vec<usize>,
    /// Ball ended the tick inside the magnetic radius
    pub in_magnet: bool,
    pub outcome: StepOutcome,
}

/// Advance the ball one tick
///
/// Order: move, obstacle contacts, drag/gravity/remote control, magnetic
/// pull, then terminal checks against the new position.
pub fn step(ball: &BallState, hole: &Hole, remote_control_active: bool) -> Step {
    let pos = ball.pos + ball.vel;
    let mut vel = ball.vel;

    let mut hits = Vec::new();
    for (index, obstacle) in hole.obstacles.iter().enumerate() {
        if obstacle_contact(pos, obstacle) {
            vel = obstacle_response(vel, obstacle.kind);
            hits.push(index);
        }
    }

    vel.x *= DRAG;
    vel.y += GRAVITY;
    if remote_control_active {
        vel += Vec2::new(REMOTE_PUSH_X, -REMOTE_LIFT_Y);
    }

    let pull = magnet_pull(pos, hole);
    if let Some(pull) = pull {
        vel += pull;
    }

    let outcome = if ball_in_cup(pos, hole.cup) {
        StepOutcome::HoleComplete
    } else if out_of_bounds(pos) {
        StepOutcome::OutOfBounds
    } else {
        StepOutcome::InFlight
    };

    Step {
        ball: BallState { pos, vel },
        hits,
        in_magnet: pull.is_some(),
        outcome,
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current drag translation while aiming
    pub drag: Option<Vec2>,
    /// Drag released: shoot
    pub release: bool,
    /// Remote control trigger (space / tap on ball)
    pub remote_control: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut GolfSession, input: &TickInput) {
    session.time_ms += SIM_TICK_MS as u64;

    for obstacle in &mut session.hole_mut().obstacles {
        obstacle.decay(SIM_TICK_MS);
    }

    if let Some(drag) = input.drag {
        session.drag(drag);
    }
    if input.release {
        session.shoot();
    }
    if input.remote_control {
        session.activate_remote_control();
    }

    if session.phase != GolfPhase::InFlight {
        return;
    }

    session.record_trail();

    let remote = session.remote_control_active();
    let result = step(&session.ball, session.hole(), remote);
    session.ball = result.ball;
    session.remote_control_ms = session.remote_control_ms.saturating_sub(SIM_TICK_MS);

    for index in result.hits {
        let obstacle = &mut session.hole_mut().obstacles[index];
        obstacle.trigger();
        let kind = obstacle.kind;
        session.events.push(GolfEvent::ObstacleHit { index, kind });
    }

    if result.in_magnet != session.magnetic_active {
        session.magnetic_active = result.in_magnet;
        session.events.push(if result.in_magnet {
            GolfEvent::MagnetEntered
        } else {
            GolfEvent::MagnetLeft
        });
    }

    match result.outcome {
        StepOutcome::InFlight => {}
        StepOutcome::HoleComplete => complete_hole(session),
        StepOutcome::OutOfBounds => {
            log::debug!("Shot failed at ({:.0}, {:.0})", session.ball.pos.x, session.ball.pos.y);
            session.events.push(GolfEvent::ShotFailed);
            session.reset_ball();
        }
    }
}

/// Draw a reward, move on to the next hole, and re-tee
fn complete_hole(session: &mut GolfSession) {
    let hole = session.hole_index;
    let reward = session.rewards.draw();
    log::info!(
        "Hole '{}' complete: {} - {}",
        session.hole().name,
        reward.tier.as_str(),
        reward.flavor_text
    );

    session.holes_completed += 1;
    session.events.push(GolfEvent::HoleComplete { hole, reward });
    session.advance_hole();
    session.reset_ball();
}

impl GolfSession {
    /// Run as many fixed ticks as `elapsed_ms` covers (capped at
    /// `MAX_SUBSTEPS`). One-shot inputs apply to the first tick only.
    pub fn update(&mut self, elapsed_ms: f32, input: &TickInput) -> u32 {
        self.accumulator_ms += elapsed_ms.min(100.0);

        let mut input = input.clone();
        let mut substeps = 0;
        while self.accumulator_ms >= SIM_TICK_MS as f32 && substeps < MAX_SUBSTEPS {
            tick(self, &input);
            self.accumulator_ms -= SIM_TICK_MS as f32;
            substeps += 1;

            input.release = false;
            input.remote_control = false;
        }
        substeps
    }
}
