use serde::{Deserialize, Serialize};

use fairway_core::events::EventSink;
use fairway_core::time::clamp_frame_dt;

use crate::config::PhysicsTuning;
use crate::course::{Course, Vec2};
use crate::events::GolfEvent;
use crate::geometry::{Segment, resolve_bumper, resolve_circle_line, resolve_circle_rect};
use crate::obstacles::{blades, sweep_velocity};
use crate::shot::Shot;

/// Ball radius in course units.
pub const BALL_RADIUS: f32 = 7.0;
/// Ball-center to cup distance that counts as holed.
pub const SINK_DISTANCE: f32 = 16.0;
/// Velocity kept per nominal tick.
pub const FRICTION: f32 = 0.985;
/// Below this speed the ball comes to rest.
pub const MIN_SPEED: f32 = 0.3;
/// Speed ceiling applied before and after integration.
pub const MAX_SPEED: f32 = 14.0;
/// Longest move between two collision passes. A ball that starts a pass out
/// of contact can reach a wall's near face but never its middle.
pub const MAX_SUBSTEP_TRAVEL: f32 = BALL_RADIUS;
/// Upper bound on collision passes per step.
const MAX_SUBSTEPS: u32 = 32;
/// Largest shot power (drag length in course units).
pub const MAX_POWER: f32 = 200.0;
/// Launch speed per unit of shot power.
pub const SPEED_SCALE: f32 = 0.052;
/// Visual roll per unit of distance travelled.
pub const SPIN_FACTOR: f32 = 0.1;
pub const BUMPER_BOOST: f32 = 2.5;
pub const BUMPER_MIN_IMPULSE: f32 = 12.0;
pub const BUMPER_CAP_FACTOR: f32 = 1.5;
pub const RAMP_FORCE_SCALE: f32 = 0.08;
pub const SWEEP_SCALE: f32 = 1.0;
/// How far past the canvas edge the ball may roll before it is reset.
pub const OUT_OF_BOUNDS_MARGIN: f32 = 40.0;

/// Where the ball is in the shot cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Waiting for a shot.
    AtRest,
    /// Rolling; the step runs.
    InFlight,
    /// In the cup. Terminal.
    Sunk,
}

/// State of the ball on the current hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Visual roll angle. Unbounded.
    pub angle: f32,
    pub phase: BallPhase,
}

impl BallState {
    pub fn new(tee: Vec2) -> Self {
        Self {
            position: tee,
            velocity: Vec2::ZERO,
            angle: 0.0,
            phase: BallPhase::AtRest,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.phase == BallPhase::InFlight
    }

    pub fn is_sunk(&self) -> bool {
        self.phase == BallPhase::Sunk
    }

    pub fn is_at_rest(&self) -> bool {
        self.phase == BallPhase::AtRest
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Put the ball back on `tee`, at rest.
    pub fn reset_to(&mut self, tee: Vec2) {
        self.position = tee;
        self.velocity = Vec2::ZERO;
        self.phase = BallPhase::AtRest;
    }

    /// Launch the ball. Only a ball at rest can be hit; returns whether the
    /// shot was applied.
    pub fn shoot(&mut self, shot: &Shot, tuning: &PhysicsTuning) -> bool {
        if !self.is_at_rest() {
            return false;
        }
        self.velocity = shot.launch_velocity(tuning.speed_scale);
        self.phase = BallPhase::InFlight;
        true
    }

    fn clamp_speed(&mut self, max: f32) {
        let speed = self.speed();
        if speed > max {
            self.velocity = self.velocity * (max / speed);
        }
    }
}

/// Advance an in-flight ball by `dt` nominal ticks against `course`.
///
/// Obstacles are expected to have been animated for this frame already.
/// Does nothing unless the ball is [`BallPhase::InFlight`].
pub fn step(
    ball: &mut BallState,
    course: &Course,
    tuning: &PhysicsTuning,
    dt: f32,
    events: &mut dyn EventSink<GolfEvent>,
) {
    if !ball.is_moving() {
        return;
    }
    let dt = clamp_frame_dt(dt);
    ball.clamp_speed(tuning.max_speed);

    let travel = ball.speed() * dt;
    ball.angle += travel * tuning.spin_factor;

    // Move in slices no longer than the ball's radius and resolve walls after
    // each one, so the center never skips past a wall's near face.
    let substeps = substep_count(travel);
    let slice = dt / substeps as f32;
    for _ in 0..substeps {
        ball.position += ball.velocity * slice;
        resolve_walls(ball, course, tuning, events);
    }

    ball.velocity = ball.velocity * tuning.friction.powf(dt);
    if ball.speed() < tuning.min_speed {
        ball.velocity = Vec2::ZERO;
    }
    ball.clamp_speed(tuning.max_speed);

    for bumper in &course.bumpers {
        if let Some(hit) = resolve_bumper(ball, bumper, tuning) {
            events.emit(GolfEvent::BumperImpulse {
                position: ball.position,
                impulse: hit.impulse,
                speed: hit.speed,
            });
        }
    }

    for ramp in &course.ramps {
        if ramp.rect().contains(ball.position) {
            ball.velocity += ramp.force() * (tuning.ramp_force_scale * dt);
        }
    }

    if ball.position.distance(course.hole) < tuning.sink_distance {
        ball.position = course.hole;
        ball.velocity = Vec2::ZERO;
        ball.phase = BallPhase::Sunk;
        tracing::debug!(hole = %course.name, "Ball sunk");
        events.emit(GolfEvent::Sink {
            position: course.hole,
        });
        return;
    }

    if is_off_course(ball.position, course, tuning) {
        tracing::debug!(
            hole = %course.name,
            x = ball.position.x,
            y = ball.position.y,
            "Ball left the course, returning to tee"
        );
        ball.reset_to(course.tee);
        events.emit(GolfEvent::BallReset { tee: course.tee });
        return;
    }

    if ball.speed() >= tuning.min_speed {
        ball.phase = BallPhase::InFlight;
    } else {
        ball.velocity = Vec2::ZERO;
        ball.phase = BallPhase::AtRest;
    }
}

fn substep_count(travel: f32) -> u32 {
    let n = (travel / MAX_SUBSTEP_TRAVEL).ceil();
    if n.is_finite() {
        (n as u32).clamp(1, MAX_SUBSTEPS)
    } else {
        1
    }
}

/// One collision pass over everything that blocks the ball: blades, then
/// static and angled walls, then moving walls.
fn resolve_walls(
    ball: &mut BallState,
    course: &Course,
    tuning: &PhysicsTuning,
    events: &mut dyn EventSink<GolfEvent>,
) {
    // Blades first, so a sweep into a wall is caught by the wall pass.
    for obstacle in &course.rotating_obstacles {
        for blade in blades(obstacle) {
            let push = sweep_velocity(obstacle, &blade, ball.position, tuning.sweep_scale);
            if resolve_circle_line(ball, &blade.segment, push).bounced() {
                events.emit(GolfEvent::Bounce {
                    position: ball.position,
                });
            }
        }
    }

    let static_rects = course.outer_walls.iter().chain(&course.obstacle_walls);
    for rect in static_rects {
        if resolve_circle_rect(ball, rect).bounced() {
            events.emit(GolfEvent::Bounce {
                position: ball.position,
            });
        }
    }
    for wall in &course.angled_walls {
        if resolve_circle_line(ball, &Segment::from(wall), Vec2::ZERO).bounced() {
            events.emit(GolfEvent::Bounce {
                position: ball.position,
            });
        }
    }
    for wall in &course.moving_walls {
        if resolve_circle_rect(ball, &wall.rect()).bounced() {
            events.emit(GolfEvent::Bounce {
                position: ball.position,
            });
        }
    }
}

fn is_off_course(p: Vec2, course: &Course, tuning: &PhysicsTuning) -> bool {
    let m = tuning.out_of_bounds_margin;
    let off_canvas = p.x < -m || p.y < -m || p.x > tuning.canvas_width + m || p.y > tuning.canvas_height + m;
    off_canvas || !course.is_on_floor(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Bumper, LineWall, Ramp, Rect, RotatingObstacle, the_donut};
    use fairway_core::events::CountingSink;

    fn open_course() -> Course {
        Course::new("open", 2, Vec2::new(340.0, 260.0), Vec2::new(600.0, 60.0))
    }

    fn rolling(x: f32, y: f32, vx: f32, vy: f32) -> BallState {
        let mut ball = BallState::new(Vec2::new(x, y));
        ball.velocity = Vec2::new(vx, vy);
        ball.phase = BallPhase::InFlight;
        ball
    }

    #[test]
    fn ball_stops_with_friction() {
        let course = open_course();
        let tuning = PhysicsTuning::default();
        let mut ball = rolling(100.0, 260.0, 5.0, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        for _ in 0..1000 {
            step(&mut ball, &course, &tuning, 1.0, &mut events);
        }
        assert!(ball.is_at_rest(), "ball should have stopped, vel = {:?}", ball.velocity);
        assert_eq!(ball.velocity, Vec2::ZERO);
        assert!(events.is_empty());
    }

    #[test]
    fn ball_at_rest_is_not_stepped() {
        let course = open_course();
        let mut ball = BallState::new(Vec2::new(100.0, 100.0));
        let before = ball.clone();
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert_eq!(ball, before);
        assert!(events.is_empty());
    }

    #[test]
    fn fast_ball_is_clamped_and_bounces_off_thin_wall() {
        let mut course = open_course();
        course.obstacle_walls.push(Rect::new(120.0, 90.0, 10.0, 50.0));
        let mut ball = rolling(100.0, 100.0, 50.0, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert!(ball.position.x <= 113.0, "x = {}", ball.position.x);
        assert!(ball.velocity.x <= 0.0, "vx = {}", ball.velocity.x);
        assert!(ball.speed() <= MAX_SPEED);
        assert_eq!(events, vec![GolfEvent::Bounce { position: ball.position }]);
    }

    #[test]
    fn ball_just_short_of_a_thin_wall_bounces_off_its_near_face() {
        let mut course = open_course();
        course.obstacle_walls.push(Rect::new(120.0, 90.0, 10.0, 50.0));
        let mut ball = rolling(112.0, 100.0, 50.0, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert!(ball.position.x <= 113.0, "x = {}", ball.position.x);
        assert!(ball.velocity.x < 0.0, "vx = {}", ball.velocity.x);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn long_shot_gates_hold_a_full_speed_ball() {
        let course = crate::course::the_long_shot();
        let mut ball = rolling(142.5, 150.0, MAX_SPEED, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert!(ball.position.x < 150.0 - BALL_RADIUS, "x = {}", ball.position.x);
        assert!(ball.velocity.x < 0.0);
    }

    #[test]
    fn stalled_frame_still_stops_at_the_wall() {
        let mut course = open_course();
        course.obstacle_walls.push(Rect::new(140.0, 90.0, 10.0, 50.0));
        let mut ball = rolling(100.0, 100.0, MAX_SPEED, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 3.0, &mut events);
        assert!(ball.position.x < 140.0, "x = {}", ball.position.x);
        assert!(ball.velocity.x < 0.0);
    }

    #[test]
    fn angled_wall_is_not_crossed() {
        let mut course = open_course();
        course
            .angled_walls
            .push(LineWall::new(Vec2::new(150.0, 50.0), Vec2::new(150.0, 250.0)));
        let mut ball = rolling(137.5, 150.0, MAX_SPEED, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert!(ball.position.x < 150.0, "x = {}", ball.position.x);
        assert!(ball.velocity.x < 0.0);
    }

    #[test]
    fn tunneled_ball_is_ejected_back_the_way_it_came() {
        let mut course = open_course();
        course.obstacle_walls.push(Rect::new(200.0, 50.0, 16.0, 200.0));
        let mut ball = rolling(193.0, 100.0, MAX_SPEED, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert!(ball.position.x < 200.0 - BALL_RADIUS);
        assert!(ball.velocity.x < 0.0);
    }

    #[test]
    fn ball_sinks_once() {
        let course = open_course();
        let tuning = PhysicsTuning::default();
        let mut ball = rolling(course.hole.x - 10.0, course.hole.y, 0.5, 0.0);
        let mut sink = CountingSink::new();
        step(&mut ball, &course, &tuning, 1.0, &mut sink);
        assert!(ball.is_sunk());
        assert_eq!(ball.position, course.hole);
        assert_eq!(ball.velocity, Vec2::ZERO);
        step(&mut ball, &course, &tuning, 1.0, &mut sink);
        assert_eq!(sink.count("sink"), 1);
        assert_eq!(sink.total(), 1);
    }

    #[test]
    fn fast_ball_over_the_cup_still_sinks() {
        let course = open_course();
        let mut ball = rolling(course.hole.x - 5.0, course.hole.y, 3.0, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert!(ball.is_sunk());
    }

    #[test]
    fn sunk_ball_ignores_shots() {
        let mut ball = BallState::new(Vec2::ZERO);
        ball.phase = BallPhase::Sunk;
        let shot = Shot::from_angle(0.0, 100.0).unwrap();
        assert!(!ball.shoot(&shot, &PhysicsTuning::default()));
        assert_eq!(ball.velocity, Vec2::ZERO);
    }

    #[test]
    fn shoot_only_from_rest() {
        let tuning = PhysicsTuning::default();
        let shot = Shot::from_angle(0.0, 100.0).unwrap();
        let mut ball = BallState::new(Vec2::new(100.0, 100.0));
        assert!(ball.shoot(&shot, &tuning));
        assert!(ball.is_moving());
        assert!((ball.velocity.x - 100.0 * tuning.speed_scale).abs() < 1e-5);
        assert!(!ball.shoot(&shot, &tuning));
    }

    #[test]
    fn ball_off_canvas_returns_to_tee() {
        let course = open_course();
        let mut ball = rolling(-OUT_OF_BOUNDS_MARGIN - 1.0, 100.0, -2.0, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert!(ball.is_at_rest());
        assert_eq!(ball.position, course.tee);
        assert_eq!(events, vec![GolfEvent::BallReset { tee: course.tee }]);
    }

    #[test]
    fn ball_in_a_void_returns_to_tee() {
        let course = the_donut();
        let mut ball = rolling(340.0, 260.0, 1.0, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert_eq!(ball.position, course.tee);
        assert!(matches!(events.as_slice(), [GolfEvent::BallReset { .. }]));
    }

    #[test]
    fn ball_bouncing_off_the_donut_rim_stays_in_play() {
        let course = the_donut();
        let mut ball = rolling(340.0, 482.0, 0.0, 5.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        for _ in 0..3 {
            step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        }
        assert!(ball.velocity.y < 0.0, "ball should have bounced off the rim");
        assert!(events.iter().all(|e| matches!(e, GolfEvent::Bounce { .. })), "{events:?}");
        assert!(course.is_on_floor(ball.position));
    }

    #[test]
    fn ramp_accelerates_while_inside() {
        let tuning = PhysicsTuning::default();
        let mut course = open_course();
        course.ramps.push(Ramp {
            x: 80.0,
            y: 80.0,
            w: 100.0,
            h: 100.0,
            force_x: 0.0,
            force_y: -5.0,
        });
        let mut on_ramp = rolling(120.0, 120.0, 1.0, 0.0);
        let mut plain = rolling(120.0, 400.0, 1.0, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        for _ in 0..3 {
            step(&mut on_ramp, &course, &tuning, 1.0, &mut events);
            step(&mut plain, &course, &tuning, 1.0, &mut events);
        }
        assert!(on_ramp.velocity.y < -3.0 * 5.0 * tuning.ramp_force_scale * 0.9);
        assert_eq!(plain.velocity.y, 0.0);
    }

    #[test]
    fn ramp_keeps_a_slow_ball_rolling() {
        let mut course = open_course();
        course.ramps.push(Ramp {
            x: 80.0,
            y: 80.0,
            w: 100.0,
            h: 100.0,
            force_x: 6.0,
            force_y: 0.0,
        });
        let mut ball = rolling(100.0, 120.0, 0.31, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert!(ball.is_moving());
    }

    #[test]
    fn bumper_emits_impulse() {
        let mut course = open_course();
        course.bumpers.push(Bumper {
            x: 200.0,
            y: 200.0,
            r: 20.0,
        });
        let mut ball = rolling(170.0, 200.0, 4.0, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert!(ball.velocity.x < 0.0);
        assert!(ball.speed() >= BUMPER_MIN_IMPULSE - 1e-3);
        assert!(matches!(events.as_slice(), [GolfEvent::BumperImpulse { .. }]));
    }

    #[test]
    fn spinning_blade_sweeps_a_slow_ball() {
        let mut course = open_course();
        course.rotating_obstacles.push(RotatingObstacle {
            cx: 200.0,
            cy: 200.0,
            length: 100.0,
            arms: 1,
            speed: 0.05,
            width: 10.0,
            angle: 0.0,
        });
        // Barely rolling, sitting just below the blade.
        let mut ball = rolling(260.0, 210.0, 0.0, -0.4);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1.0, &mut events);
        assert!(ball.velocity.y > 0.0, "blade should push the ball along +Y");
        assert!(ball.position.y >= 200.0 + 5.0 + BALL_RADIUS - 1e-3);
        assert!(matches!(events.as_slice(), [GolfEvent::Bounce { .. }]));
    }

    #[test]
    fn spin_angle_tracks_distance() {
        let course = open_course();
        let tuning = PhysicsTuning::default();
        let mut ball = rolling(100.0, 260.0, 10.0, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &tuning, 1.0, &mut events);
        assert!((ball.angle - 10.0 * tuning.spin_factor).abs() < 1e-5);
    }

    #[test]
    fn huge_dt_is_clamped() {
        let course = open_course();
        let mut ball = rolling(100.0, 260.0, 10.0, 0.0);
        let mut events: Vec<GolfEvent> = Vec::new();
        step(&mut ball, &course, &PhysicsTuning::default(), 1000.0, &mut events);
        assert!((ball.position.x - 130.0).abs() < 1e-3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn boxed_course() -> Course {
            let mut course = Course::new("box", 3, Vec2::new(340.0, 260.0), Vec2::new(-500.0, -500.0));
            course.outer_walls = vec![
                Rect::new(34.0, 34.0, 612.0, 16.0),
                Rect::new(34.0, 470.0, 612.0, 16.0),
                Rect::new(34.0, 34.0, 16.0, 452.0),
                Rect::new(630.0, 34.0, 16.0, 452.0),
            ];
            course
        }

        proptest! {
            #[test]
            fn friction_never_speeds_up_a_free_ball(
                vx in -30.0f32..30.0,
                vy in -30.0f32..30.0,
                dt in 0.05f32..3.0,
                steps in 1usize..120,
            ) {
                let course = open_course();
                let tuning = PhysicsTuning::default();
                let mut ball = rolling(340.0, 260.0, vx, vy);
                let mut events: Vec<GolfEvent> = Vec::new();
                let mut last = ball.speed().min(tuning.max_speed);
                for _ in 0..steps {
                    step(&mut ball, &course, &tuning, dt, &mut events);
                    prop_assert!(ball.speed() <= last + 1e-4, "{} > {}", ball.speed(), last);
                    last = ball.speed();
                }
            }

            #[test]
            fn thin_wall_is_never_crossed(
                x in 60.0f32..112.9,
                y in 108.0f32..122.0,
                vx in 0.0f32..80.0,
                vy in -2.0f32..2.0,
                dt in 0.05f32..5.0,
            ) {
                let mut course = open_course();
                course.obstacle_walls.push(Rect::new(120.0, 90.0, 10.0, 50.0));
                let mut ball = rolling(x, y, vx, vy);
                let mut events: Vec<GolfEvent> = Vec::new();
                step(&mut ball, &course, &PhysicsTuning::default(), dt, &mut events);
                prop_assert!(ball.position.x <= 113.0, "ball crossed to {:?}", ball.position);
            }

            #[test]
            fn walls_contain_the_ball(
                x in 60.0f32..620.0,
                y in 60.0f32..460.0,
                vx in -50.0f32..50.0,
                vy in -50.0f32..50.0,
                steps in 1usize..300,
            ) {
                let course = boxed_course();
                let tuning = PhysicsTuning::default();
                let mut ball = rolling(x, y, vx, vy);
                let mut events: Vec<GolfEvent> = Vec::new();
                for _ in 0..steps {
                    step(&mut ball, &course, &tuning, 1.0, &mut events);
                    prop_assert!(
                        (50.0..=630.0).contains(&ball.position.x)
                            && (50.0..=470.0).contains(&ball.position.y),
                        "ball escaped to {:?}",
                        ball.position
                    );
                }
                let only_bounces = events.iter().all(|e| matches!(e, GolfEvent::Bounce { .. }));
                prop_assert!(only_bounces);
            }
        }
    }
}
