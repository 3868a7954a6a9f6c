use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::course::{Bumper, CANVAS_HEIGHT, CANVAS_WIDTH, Course, Rect, Vec2, WALL_THICKNESS};
use crate::physics::BALL_RADIUS;

/// Radius of generated bumpers.
pub const BUMPER_RADIUS: f32 = 28.0;
/// Generated walls keep this far from the tee and the cup.
const TEE_CLEARANCE: f32 = 40.0;
/// Minimum gap between two generated walls.
const WALL_GAP: f32 = 15.0;
const WALL_ATTEMPTS: usize = 50;
const BUMPER_ATTEMPTS: usize = 40;

/// Tee and cup placement styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Bottom-left to top-right.
    Diagonal,
    /// Top-left to bottom-right.
    AntiDiagonal,
    /// Left-center to right-center.
    Horizontal,
    /// Top-center to bottom-center.
    Vertical,
}

/// Generate a deterministic random hole from a seed: a walled canvas, one
/// of four tee/cup layouts, 2-4 obstacle walls and 1-3 bumpers.
pub fn generate_course(seed: u64) -> Course {
    let mut rng = StdRng::seed_from_u64(seed);
    let (w, h, t) = (CANVAS_WIDTH, CANVAS_HEIGHT, WALL_THICKNESS);

    let layout = match rng.random_range(0u8..4) {
        0 => Layout::Diagonal,
        1 => Layout::AntiDiagonal,
        2 => Layout::Horizontal,
        _ => Layout::Vertical,
    };
    let (tee, hole) = place_tee_and_hole(&mut rng, layout);

    let mut course = Course::new(format!("Random #{seed}"), 3, tee, hole);
    course.outer_walls = vec![
        Rect::new(0.0, 0.0, w, t),
        Rect::new(0.0, h - t, w, t),
        Rect::new(0.0, 0.0, t, h),
        Rect::new(w - t, 0.0, t, h),
    ];
    course.obstacle_walls = generate_obstacle_walls(&mut rng, tee, hole);
    course.bumpers = generate_bumpers(&mut rng, tee, hole, &course.obstacle_walls);
    course
}

fn place_tee_and_hole(rng: &mut StdRng, layout: Layout) -> (Vec2, Vec2) {
    let (w, h, t) = (CANVAS_WIDTH, CANVAS_HEIGHT, WALL_THICKNESS);
    let mut jitter = |span: f32| rng.random::<f32>() * span;

    let (tee, hole) = match layout {
        Layout::Diagonal => (
            Vec2::new(t + 50.0 + jitter(80.0), h - t - 50.0 - jitter(80.0)),
            Vec2::new(w - t - 50.0 - jitter(80.0), t + 50.0 + jitter(80.0)),
        ),
        Layout::AntiDiagonal => (
            Vec2::new(t + 50.0 + jitter(80.0), t + 50.0 + jitter(80.0)),
            Vec2::new(w - t - 50.0 - jitter(80.0), h - t - 50.0 - jitter(80.0)),
        ),
        Layout::Horizontal => (
            Vec2::new(t + 50.0 + jitter(60.0), h / 2.0 + jitter(140.0) - 70.0),
            Vec2::new(w - t - 50.0 - jitter(60.0), h / 2.0 + jitter(140.0) - 70.0),
        ),
        Layout::Vertical => (
            Vec2::new(w / 2.0 + jitter(180.0) - 90.0, t + 50.0 + jitter(60.0)),
            Vec2::new(w / 2.0 + jitter(180.0) - 90.0, h - t - 50.0 - jitter(60.0)),
        ),
    };

    (clamp_to_playable(tee), clamp_to_playable(hole))
}

fn clamp_to_playable(p: Vec2) -> Vec2 {
    let pad = WALL_THICKNESS + BALL_RADIUS + 10.0;
    Vec2::new(
        p.x.clamp(pad, CANVAS_WIDTH - pad),
        p.y.clamp(pad, CANVAS_HEIGHT - pad),
    )
}

fn generate_obstacle_walls(rng: &mut StdRng, tee: Vec2, hole: Vec2) -> Vec<Rect> {
    let count = rng.random_range(2..=4);
    let margin = WALL_THICKNESS + 40.0;
    let mut walls: Vec<Rect> = Vec::with_capacity(count);

    for _ in 0..count {
        for _ in 0..WALL_ATTEMPTS {
            let horizontal = rng.random_bool(0.5);
            let long = 80.0 + rng.random::<f32>() * 120.0;
            let short = 16.0 + rng.random::<f32>() * 20.0;
            let (ww, wh) = if horizontal { (long, short) } else { (short, long) };
            let wall = Rect::new(
                margin + rng.random::<f32>() * (CANVAS_WIDTH - margin * 2.0 - ww),
                margin + rng.random::<f32>() * (CANVAS_HEIGHT - margin * 2.0 - wh),
                ww,
                wh,
            );

            if wall.overlaps_circle(tee, TEE_CLEARANCE) || wall.overlaps_circle(hole, TEE_CLEARANCE) {
                continue;
            }
            if walls.iter().any(|w| wall.overlaps_with_gap(w, WALL_GAP)) {
                continue;
            }
            walls.push(wall);
            break;
        }
    }
    walls
}

fn generate_bumpers(rng: &mut StdRng, tee: Vec2, hole: Vec2, walls: &[Rect]) -> Vec<Bumper> {
    let count = rng.random_range(1..=3);
    let r = BUMPER_RADIUS;
    let margin = WALL_THICKNESS + r + 30.0;
    let mut bumpers: Vec<Bumper> = Vec::with_capacity(count);

    for _ in 0..count {
        for _ in 0..BUMPER_ATTEMPTS {
            let c = Vec2::new(
                margin + rng.random::<f32>() * (CANVAS_WIDTH - margin * 2.0),
                margin + rng.random::<f32>() * (CANVAS_HEIGHT - margin * 2.0),
            );
            if c.distance(tee) < r + 50.0 || c.distance(hole) < r + 50.0 {
                continue;
            }
            if bumpers.iter().any(|b| c.distance(b.center()) < r * 3.0) {
                continue;
            }
            if walls.iter().any(|w| w.overlaps_circle(c, r + 15.0)) {
                continue;
            }
            bumpers.push(Bumper { x: c.x, y: c.y, r });
            break;
        }
    }
    bumpers
}
