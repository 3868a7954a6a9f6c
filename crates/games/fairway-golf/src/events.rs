use serde::{Deserialize, Serialize};

use fairway_core::events::NamedEvent;

use crate::course::Vec2;

/// Discrete events emitted by the golf simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GolfEvent {
    /// The ball reflected off a wall, angled wall or blade.
    Bounce { position: Vec2 },
    /// A bumper relaunched the ball.
    BumperImpulse { position: Vec2, impulse: Vec2, speed: f32 },
    /// The ball dropped into the cup.
    Sink { position: Vec2 },
    /// A shot was accepted.
    ShotFired { power: f32, stroke: u32 },
    /// The ball left the course and was returned to the tee.
    BallReset { tee: Vec2 },
}

impl GolfEvent {
    /// Sound cue a presentation layer typically plays for this event.
    pub fn cue(&self) -> &'static str {
        match self {
            GolfEvent::Bounce { .. } => "bounce",
            GolfEvent::BumperImpulse { .. } => "boing",
            GolfEvent::Sink { .. } => "sink",
            GolfEvent::ShotFired { .. } => "shoot",
            GolfEvent::BallReset { .. } => "hit",
        }
    }
}

impl NamedEvent for GolfEvent {
    fn name(&self) -> &'static str {
        match self {
            GolfEvent::Bounce { .. } => "bounce",
            GolfEvent::BumperImpulse { .. } => "bumper-impulse",
            GolfEvent::Sink { .. } => "sink",
            GolfEvent::ShotFired { .. } => "shot-fired",
            GolfEvent::BallReset { .. } => "ball-reset",
        }
    }
}
