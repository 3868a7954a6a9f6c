use crate::course::{Course, MovingWall, RotatingObstacle, Vec2};
use crate::geometry::Segment;

/// Slide a moving wall along its axis, bouncing between `min` and `max`.
/// The position is clamped at each bound so it never drifts outside.
pub fn advance_moving_wall(wall: &mut MovingWall, dt: f32) {
    let mut pos = wall.position() + wall.speed * wall.dir * dt;
    if pos <= wall.min {
        pos = wall.min;
        wall.dir = 1.0;
    } else if pos >= wall.max {
        pos = wall.max;
        wall.dir = -1.0;
    }
    wall.set_position(pos);
}

/// Spin a rotating obstacle. The angle is left unbounded.
pub fn advance_rotating(obstacle: &mut RotatingObstacle, dt: f32) {
    obstacle.angle += obstacle.speed * dt;
}

/// Advance every dynamic obstacle on the course by `dt` ticks. Called once
/// per frame regardless of the ball, before any collision work.
pub fn animate_course(course: &mut Course, dt: f32) {
    for wall in &mut course.moving_walls {
        advance_moving_wall(wall, dt);
    }
    for obstacle in &mut course.rotating_obstacles {
        advance_rotating(obstacle, dt);
    }
}

/// One blade of a rotating obstacle at its current angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blade {
    pub segment: Segment,
    /// Unit tangent in the direction of positive rotation.
    pub tangent: Vec2,
}

/// The blades of `obstacle`, evenly spaced around the pivot.
pub fn blades(obstacle: &RotatingObstacle) -> impl Iterator<Item = Blade> + '_ {
    let pivot = obstacle.pivot();
    (0..obstacle.arms).map(move |arm| {
        let dir = Vec2::from_angle(obstacle.arm_angle(arm));
        Blade {
            segment: Segment::new(pivot, pivot + dir * obstacle.length, obstacle.width),
            tangent: dir.perp(),
        }
    })
}

/// Surface velocity of a blade at `point`: tangential, proportional to the
/// angular speed and the distance from the pivot (capped at blade length).
pub fn sweep_velocity(obstacle: &RotatingObstacle, blade: &Blade, point: Vec2, scale: f32) -> Vec2 {
    let radius = point.distance(obstacle.pivot()).min(obstacle.length);
    blade.tangent * (obstacle.speed * radius * scale)
}
