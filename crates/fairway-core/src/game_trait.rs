use serde::{Deserialize, Serialize};

use crate::events::EventSink;

/// Core trait implemented by every Fairway simulation.
///
/// The host owns the display-refresh loop and calls [`frame`](Self::frame)
/// once per rendered frame; the simulation only handles game logic. All
/// methods run on one logical thread, so implementors never lock.
pub trait FrameSimulation {
    /// Discrete events emitted by the simulation (audio cues, scoring hooks).
    type Event: 'static;

    /// Metadata for selection screens and logging.
    fn metadata(&self) -> SimulationMetadata;

    /// Advance world obstacles by `dt` nominal ticks. Runs every frame,
    /// whether or not anything is in flight.
    fn animate(&mut self, dt: f32);

    /// Run one physics step of `dt` nominal ticks, emitting events into `sink`.
    /// Must be a no-op when nothing is in flight.
    fn step(&mut self, dt: f32, sink: &mut dyn EventSink<Self::Event>);

    /// One full frame: obstacle dynamics first so the step collides against
    /// current obstacle positions.
    fn frame(&mut self, dt: f32) -> Vec<Self::Event> {
        let mut events: Vec<Self::Event> = Vec::new();
        self.animate(dt);
        self.step(dt, &mut events);
        events
    }

    /// Whether the current hole has reached a terminal state.
    fn is_complete(&self) -> bool;

    /// Serialize the observable state for the render pass or a replay.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the observable state with a previously serialized snapshot.
    /// Malformed input is ignored.
    fn apply_state(&mut self, state: &[u8]);
}

/// Metadata describing a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetadata {
    pub name: String,
    pub description: String,
    /// Nominal tick rate in Hz; `dt == 1.0` corresponds to one tick at this rate.
    pub nominal_tick_hz: f32,
}
