//! Contact tests and velocity responses
//!
//! Everything here is point-vs-circle: the ball is treated as a point and
//! obstacles, the cup and the magnetic field as radii around a center.

use glam::Vec2;

use super::state::{Hole, Obstacle, ObstacleKind};
use crate::consts::*;

/// Ball is close enough to an obstacle to trigger it
#[inline]
pub fn obstacle_contact(ball_pos: Vec2, obstacle: &Obstacle) -> bool {
    ball_pos.distance(obstacle.pos) < OBSTACLE_RADIUS
}

/// Velocity after hitting an obstacle
pub fn obstacle_response(vel: Vec2, kind: ObstacleKind) -> Vec2 {
    match kind {
        ObstacleKind::Bounce => Vec2::new(vel.x * BOUNCE_DAMPING, -BOUNCE_FORCE),
        ObstacleKind::Slow => vel * SLOW_FACTOR,
    }
}

/// Pull toward the cup, or None outside the magnetic radius
///
/// Scales linearly from `magnet_strength` at the cup to 0 at the radius.
pub fn magnet_pull(ball_pos: Vec2, hole: &Hole) -> Option<Vec2> {
    let to_cup = hole.cup - ball_pos;
    let dist = to_cup.length();
    if dist >= hole.magnet_radius {
        return None;
    }
    let force = (hole.magnet_radius - dist) / hole.magnet_radius * hole.magnet_strength;
    Some(to_cup.normalize_or_zero() * force)
}

/// Ball dropped into the cup
#[inline]
pub fn ball_in_cup(ball_pos: Vec2, cup: Vec2) -> bool {
    ball_pos.distance(cup) < CUP_RADIUS
}

/// Ball left the playing field (the top edge is open)
#[inline]
pub fn out_of_bounds(pos: Vec2) -> bool {
    pos.x < 0.0 || pos.x > FIELD_WIDTH || pos.y > FIELD_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ridge() -> Hole {
        Hole::new("Test", Vec2::new(500.0, 200.0), 100.0, 5.0)
    }

    #[test]
    fn test_obstacle_contact_radius() {
        let o = Obstacle::new(400.0, 250.0, ObstacleKind::Bounce);
        assert!(obstacle_contact(Vec2::new(420.0, 250.0), &o));
        assert!(!obstacle_contact(Vec2::new(430.0, 250.0), &o));
    }

    #[test]
    fn test_bounce_response() {
        let v = obstacle_response(Vec2::new(10.0, 3.0), ObstacleKind::Bounce);
        assert!((v.x - 8.0).abs() < 1e-6);
        assert_eq!(v.y, -BOUNCE_FORCE);
    }

    #[test]
    fn test_slow_response() {
        let v = obstacle_response(Vec2::new(10.0, -4.0), ObstacleKind::Slow);
        assert_eq!(v, Vec2::new(5.0, -2.0));
    }

    #[test]
    fn test_magnet_pull_scales_linearly() {
        let hole = ridge();
        assert!(magnet_pull(Vec2::new(500.0, 350.0), &hole).is_none());
        assert!(magnet_pull(Vec2::new(600.0, 200.0), &hole).is_none());

        // Halfway in: half strength, pointing at the cup
        let pull = magnet_pull(Vec2::new(550.0, 200.0), &hole).unwrap();
        assert!((pull.x + 2.5).abs() < 1e-5);
        assert!(pull.y.abs() < 1e-5);
    }

    #[test]
    fn test_magnet_at_center_is_finite() {
        let hole = ridge();
        let pull = magnet_pull(hole.cup, &hole).unwrap();
        assert_eq!(pull, Vec2::ZERO);
    }

    #[test]
    fn test_cup_and_bounds() {
        let cup = Vec2::new(500.0, 200.0);
        assert!(ball_in_cup(Vec2::new(510.0, 210.0), cup));
        assert!(!ball_in_cup(Vec2::new(520.0, 200.0), cup));

        assert!(!out_of_bounds(Vec2::new(100.0, -500.0)));
        assert!(out_of_bounds(Vec2::new(-1.0, 300.0)));
        assert!(out_of_bounds(Vec2::new(801.0, 300.0)));
        assert!(out_of_bounds(Vec2::new(300.0, 601.0)));
        assert!(!out_of_bounds(Vec2::new(800.0, 600.0)));
    }
}
