pub mod config;
pub mod course;
pub mod course_gen;
pub mod events;
pub mod geometry;
pub mod obstacles;
pub mod physics;
pub mod scoring;
pub mod shot;

use serde::{Deserialize, Serialize};

use fairway_core::events::EventSink;
use fairway_core::game_trait::{FrameSimulation, SimulationMetadata};

use config::GolfConfig;
use course::{Course, Vec2};
use events::GolfEvent;
use physics::BallState;
use scoring::{HoleOutcome, HoleScore, Scorecard};
use shot::{AimPreview, DragAim, KeyboardAim, Shot};

/// Serializable snapshot of a session, for the render pass or a replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GolfState {
    /// Live copy of the loaded course, with animated obstacles.
    pub course: Option<Course>,
    pub ball: Option<BallState>,
    /// Strokes on finished holes and the hole in play.
    pub scorecard: Scorecard,
}

/// One player's mini-golf session: a course, a ball and a stroke count.
///
/// Sessions own all of their state, so any number can run side by side.
pub struct GameSession {
    template: Option<Course>,
    state: GolfState,
    config: GolfConfig,
    drag: Option<DragAim>,
    keyboard: KeyboardAim,
}

impl GameSession {
    pub fn new(config: GolfConfig) -> Self {
        Self {
            template: None,
            state: GolfState {
                scorecard: Scorecard::new(config.max_strokes),
                ..GolfState::default()
            },
            config,
            drag: None,
            keyboard: KeyboardAim::default(),
        }
    }

    /// A session with `course` already loaded and default config.
    pub fn with_course(course: &Course) -> Self {
        let mut session = Self::new(GolfConfig::default());
        session.load_course(course);
        session
    }

    /// Start `template` from the tee. The session plays on its own clone.
    pub fn load_course(&mut self, template: &Course) {
        tracing::debug!(hole = %template.name, par = template.par, "Loading course");
        self.template = Some(template.clone());
        self.restart();
    }

    /// Restart the loaded course from its template. Returns `false` if no
    /// course has been loaded.
    pub fn reload(&mut self) -> bool {
        if self.template.is_none() {
            return false;
        }
        self.restart();
        true
    }

    fn restart(&mut self) {
        let course = self.template.clone();
        self.state.ball = course.as_ref().map(|c| BallState::new(c.tee));
        self.state.course = course;
        self.state.scorecard.restart_hole();
        self.drag = None;
        self.keyboard = KeyboardAim::default();
    }

    pub fn course(&self) -> Option<&Course> {
        self.state.course.as_ref()
    }

    pub fn ball(&self) -> Option<&BallState> {
        self.state.ball.as_ref()
    }

    /// Accepted shots on the current hole.
    pub fn strokes(&self) -> u32 {
        self.state.scorecard.current_strokes()
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.state.scorecard
    }

    pub fn config(&self) -> &GolfConfig {
        &self.config
    }

    pub fn state(&self) -> &GolfState {
        &self.state
    }

    /// Whether the current hole has used up its strokes.
    pub fn stroke_limit_reached(&self) -> bool {
        self.state.scorecard.stroke_limit_reached()
    }

    /// Record the current hole on the scorecard once it is over: holed, or
    /// out of strokes. Returns `None` while the hole is still in play or
    /// after it has already been recorded.
    pub fn finish_hole(&mut self) -> Option<HoleScore> {
        let par = self.state.course.as_ref()?.par;
        if self.strokes() == 0 {
            return None;
        }
        let outcome = if self.is_complete() {
            HoleOutcome::Holed
        } else if self.stroke_limit_reached() {
            HoleOutcome::StrokeLimit
        } else {
            return None;
        };
        let score = self.state.scorecard.finish_hole(par, outcome);
        tracing::debug!(strokes = score.strokes, par, ?outcome, "Hole finished");
        Some(score)
    }

    /// Hit the ball. Only accepted when it is at rest; an accepted shot
    /// counts a stroke and emits [`GolfEvent::ShotFired`].
    pub fn shoot(&mut self, shot: Shot, events: &mut dyn EventSink<GolfEvent>) -> bool {
        let Some(ball) = self.state.ball.as_mut() else {
            tracing::debug!("Shot ignored: no course loaded");
            return false;
        };
        if !ball.shoot(&shot, &self.config.physics) {
            tracing::debug!(phase = ?ball.phase, "Shot ignored: ball not at rest");
            return false;
        }
        self.state.scorecard.record_stroke();
        events.emit(GolfEvent::ShotFired {
            power: shot.power(),
            stroke: self.state.scorecard.current_strokes(),
        });
        true
    }

    /// Press at `pointer`. Starts a drag if the ball is at rest and close by.
    pub fn begin_drag(&mut self, pointer: Vec2) -> bool {
        self.drag = self
            .state
            .ball
            .as_ref()
            .filter(|b| b.is_at_rest())
            .and_then(|b| DragAim::begin(b.position, pointer));
        self.drag.is_some()
    }

    pub fn update_drag(&mut self, pointer: Vec2) {
        if let Some(drag) = self.drag.as_mut() {
            drag.update(pointer);
        }
    }

    pub fn aim_preview(&self) -> Option<AimPreview> {
        self.drag.as_ref().and_then(DragAim::preview)
    }

    /// Release the drag at `pointer`. A drag too short to be a shot is
    /// dropped without counting a stroke.
    pub fn release_drag(&mut self, pointer: Vec2, events: &mut dyn EventSink<GolfEvent>) -> bool {
        match self.drag.take().and_then(|d| d.release(pointer)) {
            Some(shot) => self.shoot(shot, events),
            None => false,
        }
    }

    pub fn keyboard(&self) -> &KeyboardAim {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut KeyboardAim {
        &mut self.keyboard
    }

    /// Release the keyboard shot key.
    pub fn release_keyboard(&mut self, events: &mut dyn EventSink<GolfEvent>) -> bool {
        match self.keyboard.release() {
            Some(shot) => self.shoot(shot, events),
            None => false,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GolfConfig::default())
    }
}

impl FrameSimulation for GameSession {
    type Event = GolfEvent;

    fn metadata(&self) -> SimulationMetadata {
        SimulationMetadata {
            name: "Mini-Golf".to_string(),
            description: "Top-down mini-golf. Drag back from the ball to aim, release to shoot."
                .to_string(),
            nominal_tick_hz: 60.0,
        }
    }

    fn animate(&mut self, dt: f32) {
        if let Some(course) = self.state.course.as_mut() {
            obstacles::animate_course(course, fairway_core::time::clamp_frame_dt(dt));
        }
    }

    fn step(&mut self, dt: f32, sink: &mut dyn EventSink<GolfEvent>) {
        let (Some(ball), Some(course)) = (self.state.ball.as_mut(), self.state.course.as_ref())
        else {
            return;
        };
        physics::step(ball, course, &self.config.physics, dt, sink);
    }

    fn is_complete(&self) -> bool {
        self.state.ball.as_ref().is_some_and(BallState::is_sunk)
    }

    fn serialize_state(&self) -> Vec<u8> {
        rmp_serde::to_vec_named(&self.state).unwrap_or_default()
    }

    fn apply_state(&mut self, state: &[u8]) {
        if let Ok(s) = rmp_serde::from_slice::<GolfState>(state) {
            self.state = s;
        }
    }
}
