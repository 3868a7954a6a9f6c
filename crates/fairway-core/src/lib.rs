pub mod events;
pub mod game_trait;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::FrameSimulation;

    /// Run `n` full frames of `dt` ticks, returning all accumulated events.
    pub fn run_frames<S: FrameSimulation>(sim: &mut S, n: usize, dt: f32) -> Vec<S::Event> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(sim.frame(dt));
        }
        all_events
    }

    /// Run frames until `done` returns true or `max_frames` is reached.
    /// Returns the number of frames run.
    pub fn run_until<S: FrameSimulation>(
        sim: &mut S,
        max_frames: usize,
        dt: f32,
        mut done: impl FnMut(&S) -> bool,
    ) -> usize {
        for i in 0..max_frames {
            if done(sim) {
                return i;
            }
            sim.frame(dt);
        }
        max_frames
    }

    // ================================================================
    // Simulation Contract Tests
    // ================================================================
    // Every FrameSimulation implementation must pass these. Game crates
    // call them from their own #[cfg(test)] modules with a concrete
    // simulation in the described starting state.

    /// With nothing in flight, `step()` must emit nothing and leave the
    /// observable state untouched.
    pub fn contract_idle_step_is_noop<S: FrameSimulation>(sim: &mut S) {
        let before = sim.serialize_state();
        let mut events: Vec<S::Event> = Vec::new();
        sim.step(1.0, &mut events);
        assert!(events.is_empty(), "idle step must not emit events");
        assert_eq!(
            before,
            sim.serialize_state(),
            "idle step must not change state"
        );
    }

    /// serialize_state → apply_state must be stable after one roundtrip.
    pub fn contract_state_roundtrip_preserves<S: FrameSimulation>(sim: &mut S) {
        let state_a = sim.serialize_state();
        assert!(!state_a.is_empty(), "serialize_state must not be empty");
        sim.apply_state(&state_a);
        let state_b = sim.serialize_state();
        sim.apply_state(&state_b);
        let state_c = sim.serialize_state();
        assert_eq!(
            state_b, state_c,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// Garbage bytes passed to apply_state must be ignored.
    pub fn contract_malformed_state_ignored<S: FrameSimulation>(sim: &mut S) {
        let before = sim.serialize_state();
        sim.apply_state(&[0xc1, 0xff, 0x00]);
        assert_eq!(before, sim.serialize_state());
    }

    /// Once complete, further frames must not emit events or leave the
    /// terminal state.
    pub fn contract_complete_is_terminal<S: FrameSimulation>(sim: &mut S, frames: usize) {
        assert!(sim.is_complete(), "precondition: simulation must be complete");
        for _ in 0..frames {
            let events = sim.frame(1.0);
            assert!(events.is_empty(), "complete simulation must stay silent");
            assert!(sim.is_complete());
        }
    }
}
