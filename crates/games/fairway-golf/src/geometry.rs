//! Circle-vs-obstacle collision detection and response.
//!
//! Every resolver mutates the ball in place and reports what happened as a
//! plain value. None of them emit events or touch anything but the ball, so
//! the caller decides which contacts are worth a sound or a particle burst.

use crate::config::PhysicsTuning;
use crate::course::{Bumper, LineWall, Rect, Vec2};
use crate::physics::{BALL_RADIUS, BallState};

/// Extra separation added when pushing the ball out of a wall so the next
/// tick does not start in contact.
pub const SEPARATION_EPSILON: f32 = 0.5;
/// Velocity kept after a normal wall bounce.
pub const WALL_DAMPING: f32 = 0.88;
/// Velocity kept after recovering a ball whose center ended inside a wall.
pub const TUNNEL_DAMPING: f32 = 0.82;
/// Distances at or below this are treated as zero.
const DEGENERATE: f32 = 1e-6;

/// Outcome of resolving one ball/obstacle pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Not touching.
    None,
    /// Overlap corrected, but the ball was already leaving: no bounce.
    Pushed,
    /// Overlap corrected and the inward velocity reflected.
    Bounced,
}

impl Contact {
    pub fn bounced(self) -> bool {
        self == Contact::Bounced
    }
}

/// A thick line segment: an angled wall or one blade of a rotating obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    pub thickness: f32,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2, thickness: f32) -> Self {
        Self { a, b, thickness }
    }

    /// Point on the segment closest to `p`. The projection is clamped to the
    /// segment, so the ends are flat rather than rounded.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let d = self.b - self.a;
        let len = d.length();
        if len <= DEGENERATE {
            return self.a;
        }
        let dir = d * (1.0 / len);
        let t = (p - self.a).dot(dir).clamp(0.0, len);
        self.a + dir * t
    }
}

impl From<&LineWall> for Segment {
    fn from(wall: &LineWall) -> Self {
        Segment::new(wall.start(), wall.end(), wall.thickness())
    }
}

/// Resolve the ball against an axis-aligned rectangle.
pub fn resolve_circle_rect(ball: &mut BallState, rect: &Rect) -> Contact {
    let closest = rect.closest_point(ball.position);
    let offset = ball.position - closest;
    let dist = offset.length();

    if dist >= BALL_RADIUS {
        return Contact::None;
    }

    if dist <= DEGENERATE {
        push_out_of_rect(ball, rect);
        return Contact::Bounced;
    }

    let n = offset * (1.0 / dist);
    ball.position += n * (BALL_RADIUS - dist + SEPARATION_EPSILON);

    let dot = ball.velocity.dot(n);
    if dot < 0.0 {
        ball.velocity = (ball.velocity - n * (2.0 * dot)) * WALL_DAMPING;
        Contact::Bounced
    } else {
        Contact::Pushed
    }
}

/// The ball's center ended up inside the rectangle: eject it through the
/// nearest edge and send it back the way it came on that axis.
fn push_out_of_rect(ball: &mut BallState, rect: &Rect) {
    let p = ball.position;
    let d_left = p.x - rect.x;
    let d_right = rect.x + rect.w - p.x;
    let d_top = p.y - rect.y;
    let d_bottom = rect.y + rect.h - p.y;
    let min_d = d_left.min(d_right).min(d_top).min(d_bottom);
    let clearance = BALL_RADIUS + SEPARATION_EPSILON;

    if min_d == d_left {
        ball.position.x = rect.x - clearance;
        ball.velocity.x = -ball.velocity.x.abs();
    } else if min_d == d_right {
        ball.position.x = rect.x + rect.w + clearance;
        ball.velocity.x = ball.velocity.x.abs();
    } else if min_d == d_top {
        ball.position.y = rect.y - clearance;
        ball.velocity.y = -ball.velocity.y.abs();
    } else {
        ball.position.y = rect.y + rect.h + clearance;
        ball.velocity.y = ball.velocity.y.abs();
    }

    ball.velocity = ball.velocity * TUNNEL_DAMPING;
}

/// Resolve the ball against a thick segment, treated as a capsule of
/// half-width `thickness / 2 + BALL_RADIUS` with flat ends.
///
/// `extra_push` is added to the velocity on contact: in full when the ball
/// was reflected, at half strength when it was already moving away. Rotating
/// blades pass their sweep velocity here; static walls pass `Vec2::ZERO`.
pub fn resolve_circle_line(ball: &mut BallState, seg: &Segment, extra_push: Vec2) -> Contact {
    let reach = seg.thickness / 2.0 + BALL_RADIUS;
    let closest = seg.closest_point(ball.position);
    let offset = ball.position - closest;
    let dist = offset.length();

    if dist >= reach {
        return Contact::None;
    }

    let n = if dist > DEGENERATE {
        offset * (1.0 / dist)
    } else {
        on_line_normal(ball.velocity, seg)
    };

    ball.position += n * (reach - dist);

    let dot = ball.velocity.dot(n);
    let reflected = dot < 0.0;
    if reflected {
        ball.velocity = (ball.velocity - n * (2.0 * dot)) * WALL_DAMPING;
        ball.velocity += extra_push;
        Contact::Bounced
    } else {
        ball.velocity += extra_push * 0.5;
        Contact::Pushed
    }
}

/// Normal for a ball centered exactly on the segment: the side it came from,
/// i.e. the perpendicular facing against its velocity.
fn on_line_normal(velocity: Vec2, seg: &Segment) -> Vec2 {
    let along = (seg.b - seg.a).normalized();
    match (along, velocity.normalized()) {
        (Some(dir), _) => {
            let perp = dir.perp();
            if velocity.dot(perp) > 0.0 {
                perp * -1.0
            } else {
                perp
            }
        },
        (None, Some(v)) => v * -1.0,
        (None, None) => Vec2::new(0.0, -1.0),
    }
}

/// Result of a bumper hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumperHit {
    /// Velocity change applied by the bumper.
    pub impulse: Vec2,
    /// Speed of the ball leaving the bumper.
    pub speed: f32,
}

/// Resolve the ball against a circular bumper.
///
/// Bumpers are energy sources: the ball is placed at touching distance,
/// reflected, and relaunched at `max(boost × speed, min_impulse)`, capped at
/// `bumper_cap_factor × max_speed`.
pub fn resolve_bumper(ball: &mut BallState, bumper: &Bumper, tuning: &PhysicsTuning) -> Option<BumperHit> {
    let center = bumper.center();
    let offset = ball.position - center;
    let dist = offset.length();
    let min_dist = BALL_RADIUS + bumper.r;

    if dist >= min_dist || dist <= DEGENERATE {
        return None;
    }

    let n = offset * (1.0 / dist);
    ball.position = center + n * min_dist;

    let dot = ball.velocity.dot(n);
    let reflected = ball.velocity - n * (2.0 * dot);
    let speed = reflected.length();
    let launch = (speed * tuning.bumper_boost)
        .max(tuning.bumper_min_impulse)
        .min(tuning.max_speed * tuning.bumper_cap_factor);
    let dir = reflected.normalized().unwrap_or(n);

    let before = ball.velocity;
    ball.velocity = dir * launch;
    Some(BumperHit {
        impulse: ball.velocity - before,
        speed: launch,
    })
}
