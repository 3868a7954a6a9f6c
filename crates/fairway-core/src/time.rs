/// Length of one nominal simulation tick in milliseconds (60 Hz).
pub const NOMINAL_TICK_MS: f64 = 16.67;
/// Largest `dt` handed to a simulation, in nominal ticks. Bounds the step
/// after a long stall such as a backgrounded tab.
pub const MAX_FRAME_DT: f32 = 3.0;

/// Converts host display-refresh timestamps into nominal-tick `dt` values.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the timestamp of the current frame (milliseconds, monotonic) and
    /// get back the elapsed time in nominal ticks, clamped to
    /// `[0, MAX_FRAME_DT]`. The first call yields a single nominal tick.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => {
                let raw = ((now_ms - last) / NOMINAL_TICK_MS) as f32;
                if raw > MAX_FRAME_DT {
                    tracing::trace!(ticks = raw, "Frame stall, clamping dt");
                }
                clamp_frame_dt(raw)
            },
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp, e.g. when the frame loop is restarted.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Clamp a raw `dt` into the range a simulation step can take safely.
/// Non-finite input collapses to zero.
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}
