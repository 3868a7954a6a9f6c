use serde::{Deserialize, Serialize};

use crate::course::Vec2;
use crate::physics::{BALL_RADIUS, MAX_POWER};

/// Shots weaker than this are treated as a misclick and never count as a stroke.
pub const MIN_SHOT_POWER: f32 = 5.0;
/// A drag must start this close to the ball to pick it up.
pub const AIM_GRAB_RADIUS: f32 = BALL_RADIUS * 3.0;
/// Keyboard aim rotation, radians per nominal tick.
pub const AIM_TURN_RATE: f32 = 0.04;
/// Keyboard power charge, power units per nominal tick.
pub const POWER_RAMP_RATE: f32 = 3.0;

/// An accepted shot: a unit direction and a power in `[MIN_SHOT_POWER, MAX_POWER]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    direction: Vec2,
    power: f32,
}

impl Shot {
    /// Build a shot, clamping power to `MAX_POWER`. Returns `None` for a
    /// zero direction, non-finite power or power below `MIN_SHOT_POWER`.
    pub fn new(direction: Vec2, power: f32) -> Option<Self> {
        let direction = direction.normalized()?;
        if !power.is_finite() || power < MIN_SHOT_POWER {
            return None;
        }
        let power = power.min(MAX_POWER);
        Some(Self { direction, power })
    }

    /// Pull-back shot: the drag vector's length is the power.
    pub fn from_drag(drag: Vec2) -> Option<Self> {
        Self::new(drag, drag.length())
    }

    /// Shot at `angle` radians (0 = +X).
    pub fn from_angle(angle: f32, power: f32) -> Option<Self> {
        Self::new(Vec2::from_angle(angle), power)
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    /// Initial ball velocity for this shot.
    pub fn launch_velocity(&self, speed_scale: f32) -> Vec2 {
        self.direction * (self.power * speed_scale)
    }
}

/// What an aim overlay needs to draw the shot line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPreview {
    pub direction: Vec2,
    /// Line length, clamped to `MAX_POWER`.
    pub length: f32,
    /// `length / MAX_POWER`, for coloring the power dot.
    pub power_fraction: f32,
}

/// Mouse or touch drag-to-aim: press near the ball, pull back, release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAim {
    pub start: Vec2,
    pub current: Vec2,
}

impl DragAim {
    /// Start aiming if `pointer` is close enough to the ball.
    pub fn begin(ball: Vec2, pointer: Vec2) -> Option<Self> {
        if pointer.distance(ball) <= AIM_GRAB_RADIUS {
            Some(Self {
                start: pointer,
                current: pointer,
            })
        } else {
            None
        }
    }

    pub fn update(&mut self, pointer: Vec2) {
        self.current = pointer;
    }

    /// Pull-back vector: from the pointer back to where the drag started.
    pub fn drag(&self) -> Vec2 {
        self.start - self.current
    }

    pub fn preview(&self) -> Option<AimPreview> {
        let drag = self.drag();
        let len = drag.length();
        if len < MIN_SHOT_POWER {
            return None;
        }
        let length = len.min(MAX_POWER);
        Some(AimPreview {
            direction: drag.normalized()?,
            length,
            power_fraction: length / MAX_POWER,
        })
    }

    /// Finish the drag at `pointer`.
    pub fn release(mut self, pointer: Vec2) -> Option<Shot> {
        self.update(pointer);
        Shot::from_drag(self.drag())
    }
}

/// Keyboard aiming: held keys turn the aim and charge power, which swings
/// between zero and `MAX_POWER` until released.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyboardAim {
    pub angle: f32,
    pub power: f32,
    charging_up: bool,
}

impl Default for KeyboardAim {
    fn default() -> Self {
        Self {
            angle: -std::f32::consts::FRAC_PI_2,
            power: 0.0,
            charging_up: true,
        }
    }
}

impl KeyboardAim {
    pub fn new(angle: f32) -> Self {
        Self {
            angle,
            ..Self::default()
        }
    }

    /// Rotate by `direction` (−1 or +1) for `dt` ticks.
    pub fn turn(&mut self, direction: f32, dt: f32) {
        self.angle += direction.signum() * AIM_TURN_RATE * dt;
    }

    /// Charge power for `dt` ticks, reversing at either end of the range.
    pub fn charge(&mut self, dt: f32) {
        let step = POWER_RAMP_RATE * dt;
        if self.charging_up {
            self.power += step;
            if self.power >= MAX_POWER {
                self.power = MAX_POWER;
                self.charging_up = false;
            }
        } else {
            self.power -= step;
            if self.power <= 0.0 {
                self.power = 0.0;
                self.charging_up = true;
            }
        }
    }

    /// Release the shot key. Power resets whether or not a shot results.
    pub fn release(&mut self) -> Option<Shot> {
        let shot = Shot::from_angle(self.angle, self.power);
        self.power = 0.0;
        self.charging_up = true;
        shot
    }
}
