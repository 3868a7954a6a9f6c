use std::f32::consts::TAU;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Width of the playing canvas in course units (pixels).
pub const CANVAS_WIDTH: f32 = 680.0;
/// Height of the playing canvas in course units (pixels).
pub const CANVAS_HEIGHT: f32 = 520.0;
/// Thickness of generated boundary walls.
pub const WALL_THICKNESS: f32 = 16.0;
/// Collision thickness of an angled wall that does not specify one.
pub const DEFAULT_LINE_THICKNESS: f32 = 10.0;

/// A 2D point or vector in course space.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len > f32::EPSILON {
            Some(Self::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Unit vector at `angle` radians (0 = +X, screen-space clockwise).
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Rotated 90 degrees: `(x, y) -> (-y, x)`.
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// An axis-aligned rectangle: a static wall, a floor region or a ramp footprint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Point on (or in) the rectangle closest to `p`.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.x, self.x + self.w),
            p.y.clamp(self.y, self.y + self.h),
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Whether a circle at `center` with `radius` overlaps the rectangle.
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let d = center - self.closest_point(center);
        d.dot(d) < radius * radius
    }

    /// Whether two rectangles overlap once each is grown by `gap`.
    pub fn overlaps_with_gap(&self, other: &Rect, gap: f32) -> bool {
        self.x < other.x + other.w + gap
            && self.x + self.w + gap > other.x
            && self.y < other.y + other.h + gap
            && self.y + self.h + gap > other.y
    }
}

/// Axis a moving wall travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// A rectangular wall oscillating between `min` and `max` along one axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovingWall {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub axis: Axis,
    pub min: f32,
    pub max: f32,
    /// Travel per nominal tick.
    pub speed: f32,
    /// `1.0` towards `max`, `-1.0` towards `min`.
    #[serde(default = "default_dir")]
    pub dir: f32,
}

fn default_dir() -> f32 {
    1.0
}

impl MovingWall {
    /// Current footprint as a static rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Position along the travel axis.
    pub fn position(&self) -> f32 {
        match self.axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn set_position(&mut self, pos: f32) {
        match self.axis {
            Axis::X => self.x = pos,
            Axis::Y => self.y = pos,
        }
    }
}

/// A thin straight wall between two points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineWall {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f32>,
}

impl LineWall {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
            thickness: None,
        }
    }

    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = Some(thickness);
        self
    }

    pub fn start(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }

    pub fn thickness(&self) -> f32 {
        self.thickness.unwrap_or(DEFAULT_LINE_THICKNESS)
    }
}

/// A circular pinball-style bumper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bumper {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

impl Bumper {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A windmill-style obstacle: `arms` blades radiating from a pivot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotatingObstacle {
    pub cx: f32,
    pub cy: f32,
    pub length: f32,
    pub arms: u32,
    /// Radians per nominal tick; negative spins the other way.
    pub speed: f32,
    /// Blade collision thickness.
    pub width: f32,
    #[serde(default)]
    pub angle: f32,
}

impl RotatingObstacle {
    pub fn pivot(&self) -> Vec2 {
        Vec2::new(self.cx, self.cy)
    }

    /// Angle of blade `arm` at the current rotation.
    pub fn arm_angle(&self, arm: u32) -> f32 {
        self.angle + arm as f32 * TAU / self.arms.max(1) as f32
    }
}

/// A rectangular zone that accelerates the ball while its center is inside.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ramp {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub force_x: f32,
    pub force_y: f32,
}

impl Ramp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn force(&self) -> Vec2 {
        Vec2::new(self.force_x, self.force_y)
    }
}

/// A circular floor region. Dark circles are holes cut out of the surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FloorCircle {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    #[serde(default)]
    pub dark: bool,
}

/// A polygonal floor region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FloorPolygon {
    pub points: Vec<Vec2>,
}

impl FloorPolygon {
    /// Even-odd point-in-polygon test.
    pub fn contains(&self, p: Vec2) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// A mini-golf hole definition.
///
/// Every obstacle list may be absent in a course file and defaults to empty.
/// The value returned by the loaders is a template; a session plays on its
/// own clone so moving walls and rotating blades never leak back into it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_par")]
    pub par: u8,
    pub tee: Vec2,
    pub hole: Vec2,
    #[serde(default)]
    pub floors: Vec<Rect>,
    #[serde(default)]
    pub floor_circles: Vec<FloorCircle>,
    #[serde(default)]
    pub floor_polygons: Vec<FloorPolygon>,
    #[serde(default)]
    pub outer_walls: Vec<Rect>,
    #[serde(default)]
    pub obstacle_walls: Vec<Rect>,
    #[serde(default)]
    pub angled_walls: Vec<LineWall>,
    #[serde(default)]
    pub moving_walls: Vec<MovingWall>,
    #[serde(default, alias = "bouncers")]
    pub bumpers: Vec<Bumper>,
    #[serde(default)]
    pub rotating_obstacles: Vec<RotatingObstacle>,
    #[serde(default)]
    pub ramps: Vec<Ramp>,
}

fn default_par() -> u8 {
    3
}

impl Course {
    /// An empty hole with only a tee and a cup.
    pub fn new(name: impl Into<String>, par: u8, tee: Vec2, hole: Vec2) -> Self {
        Self {
            name: name.into(),
            par,
            tee,
            hole,
            floors: Vec::new(),
            floor_circles: Vec::new(),
            floor_polygons: Vec::new(),
            outer_walls: Vec::new(),
            obstacle_walls: Vec::new(),
            angled_walls: Vec::new(),
            moving_walls: Vec::new(),
            bumpers: Vec::new(),
            rotating_obstacles: Vec::new(),
            ramps: Vec::new(),
        }
    }

    /// Whether the course declares any floor region at all.
    pub fn has_floor_regions(&self) -> bool {
        !self.floors.is_empty()
            || !self.floor_polygons.is_empty()
            || self.floor_circles.iter().any(|c| !c.dark)
    }

    /// Whether `p` lies on the playable surface. Courses without floor
    /// regions are all surface.
    pub fn is_on_floor(&self, p: Vec2) -> bool {
        if !self.has_floor_regions() {
            return true;
        }
        let in_void = self
            .floor_circles
            .iter()
            .any(|c| c.dark && p.distance(Vec2::new(c.x, c.y)) < c.r);
        if in_void {
            return false;
        }
        self.floors.iter().any(|f| f.contains(p))
            || self
                .floor_circles
                .iter()
                .any(|c| !c.dark && p.distance(Vec2::new(c.x, c.y)) <= c.r)
            || self.floor_polygons.iter().any(|poly| poly.contains(p))
    }
}

/// Failure to read a course file.
#[derive(Debug)]
pub enum CourseLoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for CourseLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read course: {e}"),
            Self::Parse(e) => write!(f, "failed to parse course: {e}"),
        }
    }
}

impl std::error::Error for CourseLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for CourseLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CourseLoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Parse a course from its JSON description.
pub fn parse_course(json: &str) -> Result<Course, CourseLoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a course from a JSON file.
pub fn load_course_from_file(path: impl AsRef<Path>) -> Result<Course, CourseLoadError> {
    let content = std::fs::read_to_string(path)?;
    parse_course(&content)
}

/// Load every `*.json` course in `dir`, sorted by file name.
///
/// Checks env var `FAIRWAY_COURSES_DIR` when `dir` is `None` (default
/// `config/courses`). Unreadable files are skipped with a warning; if nothing
/// loads, the built-in courses are returned.
pub fn load_courses_dir(dir: Option<&Path>) -> Vec<Course> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::var("FAIRWAY_COURSES_DIR")
            .unwrap_or_else(|_| "config/courses".to_string())
            .into(),
    };

    let mut paths: Vec<_> = match std::fs::read_dir(&dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect(),
        Err(_) => return all_courses(),
    };
    paths.sort();

    let courses: Vec<Course> = paths
        .iter()
        .filter_map(|path| match load_course_from_file(path) {
            Ok(course) => Some(course),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping course file");
                None
            },
        })
        .collect();

    if courses.is_empty() {
        all_courses()
    } else {
        courses
    }
}

/// Angled walls approximating a circle of radius `r` with `n` segments.
pub fn circle_walls(cx: f32, cy: f32, r: f32, n: u32) -> Vec<LineWall> {
    (0..n)
        .map(|i| {
            let a1 = i as f32 / n as f32 * TAU;
            let a2 = (i + 1) as f32 / n as f32 * TAU;
            LineWall::new(
                Vec2::new((cx + r * a1.cos()).round(), (cy + r * a1.sin()).round()),
                Vec2::new((cx + r * a2.cos()).round(), (cy + r * a2.sin()).round()),
            )
        })
        .collect()
}

/// Four walls framing the rectangle `(x, y, w, h)` from the outside.
fn frame_walls(x: f32, y: f32, w: f32, h: f32) -> Vec<Rect> {
    let t = WALL_THICKNESS;
    vec![
        Rect::new(x - t, y - t, w + t * 2.0, t),
        Rect::new(x - t, y + h, w + t * 2.0, t),
        Rect::new(x - t, y - t, t, h + t * 2.0),
        Rect::new(x + w, y - t, t, h + t * 2.0),
    ]
}

fn rect_floor_course(name: &str, par: u8, tee: Vec2, hole: Vec2, floor: Rect) -> Course {
    let mut course = Course::new(name, par, tee, hole);
    course.floors.push(floor);
    course.outer_walls = frame_walls(floor.x, floor.y, floor.w, floor.h);
    course
}

fn bumper(x: f32, y: f32, r: f32) -> Bumper {
    Bumper { x, y, r }
}

fn ramp(x: f32, y: f32, w: f32, h: f32, force_x: f32, force_y: f32) -> Ramp {
    Ramp {
        x,
        y,
        w,
        h,
        force_x,
        force_y,
    }
}

fn windmill(cx: f32, cy: f32, length: f32, arms: u32, speed: f32, width: f32) -> RotatingObstacle {
    RotatingObstacle {
        cx,
        cy,
        length,
        arms,
        speed,
        width,
        angle: 0.0,
    }
}

/// Hole 1, The Corner: an L-shaped lane with a bank wall across the turn.
pub fn the_corner() -> Course {
    let mut course = Course::new("The Corner", 2, Vec2::new(100.0, 400.0), Vec2::new(500.0, 100.0));
    course.floors = vec![
        Rect::new(50.0, 350.0, 400.0, 100.0),
        Rect::new(450.0, 50.0, 100.0, 400.0),
    ];
    course.outer_walls = vec![
        Rect::new(50.0, 334.0, 384.0, 16.0),
        Rect::new(34.0, 334.0, 16.0, 132.0),
        Rect::new(50.0, 450.0, 400.0, 16.0),
        Rect::new(550.0, 34.0, 16.0, 316.0),
        Rect::new(434.0, 34.0, 132.0, 16.0),
        Rect::new(434.0, 50.0, 16.0, 300.0),
    ];
    course.angled_walls = vec![LineWall::new(Vec2::new(450.0, 450.0), Vec2::new(550.0, 350.0))];
    course
}

/// Hole 2, The Windmill: time the shot through the spinning blades.
pub fn the_windmill() -> Course {
    let mut course = rect_floor_course(
        "The Windmill",
        3,
        Vec2::new(340.0, 460.0),
        Vec2::new(340.0, 70.0),
        Rect::new(190.0, 30.0, 300.0, 460.0),
    );
    course.rotating_obstacles = vec![windmill(340.0, 250.0, 140.0, 4, 0.02, 14.0)];
    course.ramps = vec![ramp(310.0, 130.0, 60.0, 60.0, 0.0, -5.0)];
    course
}

/// Hole 3, The Serpent: S-shaped path with boost ramps at each bend.
pub fn the_serpent() -> Course {
    let mut course = Course::new("The Serpent", 4, Vec2::new(130.0, 440.0), Vec2::new(550.0, 120.0));
    course.floors = vec![
        Rect::new(80.0, 400.0, 420.0, 80.0),
        Rect::new(420.0, 240.0, 80.0, 240.0),
        Rect::new(180.0, 240.0, 320.0, 80.0),
        Rect::new(180.0, 80.0, 80.0, 240.0),
        Rect::new(180.0, 80.0, 420.0, 80.0),
    ];
    course.outer_walls = vec![
        Rect::new(64.0, 480.0, 436.0, 16.0),
        Rect::new(64.0, 384.0, 16.0, 112.0),
        Rect::new(64.0, 384.0, 356.0, 16.0),
        Rect::new(500.0, 224.0, 16.0, 272.0),
        Rect::new(260.0, 224.0, 256.0, 16.0),
        Rect::new(260.0, 160.0, 16.0, 80.0),
        Rect::new(260.0, 160.0, 356.0, 16.0),
        Rect::new(600.0, 64.0, 16.0, 112.0),
        Rect::new(164.0, 64.0, 452.0, 16.0),
        Rect::new(164.0, 64.0, 16.0, 256.0),
        Rect::new(164.0, 320.0, 256.0, 16.0),
        Rect::new(404.0, 336.0, 16.0, 64.0),
    ];
    course.ramps = vec![
        ramp(410.0, 370.0, 50.0, 50.0, 0.0, -6.0),
        ramp(300.0, 260.0, 50.0, 40.0, -5.0, 0.0),
        ramp(200.0, 130.0, 50.0, 40.0, 5.0, 0.0),
    ];
    course
}

/// Hole 4, The Bridge: a narrow bridge guarded by two sliding sweepers.
pub fn the_bridge() -> Course {
    let mut course = Course::new("The Bridge", 3, Vec2::new(340.0, 110.0), Vec2::new(340.0, 410.0));
    course.floors = vec![
        Rect::new(100.0, 50.0, 480.0, 120.0),
        Rect::new(290.0, 170.0, 100.0, 180.0),
        Rect::new(100.0, 350.0, 480.0, 120.0),
    ];
    course.outer_walls = vec![
        Rect::new(84.0, 34.0, 512.0, 16.0),
        Rect::new(84.0, 34.0, 16.0, 152.0),
        Rect::new(580.0, 34.0, 16.0, 152.0),
        Rect::new(100.0, 170.0, 190.0, 16.0),
        Rect::new(390.0, 170.0, 190.0, 16.0),
        Rect::new(274.0, 170.0, 16.0, 180.0),
        Rect::new(390.0, 170.0, 16.0, 180.0),
        Rect::new(100.0, 334.0, 190.0, 16.0),
        Rect::new(390.0, 334.0, 190.0, 16.0),
        Rect::new(84.0, 334.0, 16.0, 152.0),
        Rect::new(580.0, 334.0, 16.0, 152.0),
        Rect::new(84.0, 470.0, 512.0, 16.0),
    ];
    course.moving_walls = vec![
        MovingWall {
            x: 100.0,
            y: 220.0,
            w: 150.0,
            h: 16.0,
            axis: Axis::X,
            min: 100.0,
            max: 430.0,
            speed: 2.0,
            dir: 1.0,
        },
        MovingWall {
            x: 430.0,
            y: 280.0,
            w: 150.0,
            h: 16.0,
            axis: Axis::X,
            min: 100.0,
            max: 430.0,
            speed: 1.6,
            dir: -1.0,
        },
    ];
    course
}

/// Hole 5, The Clock: a circular green with spinning hands.
pub fn the_clock() -> Course {
    let mut course = Course::new("The Clock", 3, Vec2::new(340.0, 460.0), Vec2::new(340.0, 100.0));
    course.floor_circles = vec![FloorCircle {
        x: 340.0,
        y: 260.0,
        r: 240.0,
        dark: false,
    }];
    course.angled_walls = circle_walls(340.0, 260.0, 245.0, 24);
    course.rotating_obstacles = vec![windmill(340.0, 260.0, 160.0, 4, 0.03, 12.0)];
    course.bumpers = vec![
        bumper(340.0, 380.0, 20.0),
        bumper(520.0, 360.0, 20.0),
        bumper(160.0, 360.0, 20.0),
    ];
    course.ramps = vec![ramp(315.0, 400.0, 50.0, 40.0, 0.0, -6.0)];
    course
}

/// Hole 6, The Long Shot: a long fairway with staggered gates.
pub fn the_long_shot() -> Course {
    let mut course = Course::new("The Long Shot", 4, Vec2::new(60.0, 260.0), Vec2::new(620.0, 260.0));
    course.floors = vec![Rect::new(20.0, 100.0, 640.0, 320.0)];
    course.outer_walls = vec![
        Rect::new(10.0, 80.0, 660.0, 20.0),
        Rect::new(10.0, 420.0, 660.0, 20.0),
        Rect::new(10.0, 80.0, 20.0, 360.0),
        Rect::new(650.0, 80.0, 20.0, 360.0),
    ];
    course.obstacle_walls = vec![
        Rect::new(150.0, 100.0, 10.0, 120.0),
        Rect::new(150.0, 300.0, 10.0, 120.0),
        Rect::new(500.0, 100.0, 10.0, 100.0),
        Rect::new(500.0, 320.0, 10.0, 100.0),
    ];
    course.angled_walls = vec![
        LineWall::new(Vec2::new(520.0, 150.0), Vec2::new(580.0, 220.0)),
        LineWall::new(Vec2::new(520.0, 370.0), Vec2::new(580.0, 300.0)),
    ];
    course.bumpers = vec![
        bumper(300.0, 180.0, 20.0),
        bumper(400.0, 340.0, 20.0),
        bumper(350.0, 260.0, 22.0),
    ];
    course.ramps = vec![
        ramp(100.0, 240.0, 40.0, 40.0, 5.0, 0.0),
        ramp(530.0, 240.0, 50.0, 40.0, 4.0, 0.0),
    ];
    course
}

/// Hole 7, The Donut: a ring-shaped green around a void.
pub fn the_donut() -> Course {
    let mut course = Course::new("The Donut", 3, Vec2::new(340.0, 470.0), Vec2::new(340.0, 65.0));
    course.floor_circles = vec![
        FloorCircle {
            x: 340.0,
            y: 260.0,
            r: 230.0,
            dark: false,
        },
        FloorCircle {
            x: 340.0,
            y: 260.0,
            r: 88.0,
            dark: true,
        },
    ];
    course.angled_walls = circle_walls(340.0, 260.0, 240.0, 24);
    course.angled_walls.extend(circle_walls(340.0, 260.0, 80.0, 16));
    course
}

/// Hole 8, The Grand U: a U-shaped polygon green.
pub fn the_grand_u() -> Course {
    let mut course = Course::new("The Grand U", 4, Vec2::new(150.0, 120.0), Vec2::new(530.0, 120.0));
    let points = vec![
        Vec2::new(100.0, 80.0),
        Vec2::new(200.0, 80.0),
        Vec2::new(200.0, 380.0),
        Vec2::new(480.0, 380.0),
        Vec2::new(480.0, 80.0),
        Vec2::new(580.0, 80.0),
        Vec2::new(580.0, 480.0),
        Vec2::new(100.0, 480.0),
    ];
    course.angled_walls = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(&a, &b)| LineWall::new(a, b))
        .collect();
    course.floor_polygons = vec![FloorPolygon { points }];
    course.bumpers = vec![bumper(340.0, 430.0, 25.0)];
    course
}

/// Hole 9, The Plinko: rows of staggered peg bumpers.
pub fn the_plinko() -> Course {
    let mut course = rect_floor_course(
        "The Plinko",
        3,
        Vec2::new(340.0, 100.0),
        Vec2::new(340.0, 430.0),
        Rect::new(50.0, 50.0, 580.0, 420.0),
    );
    for row in 0..5u32 {
        let (cols, offset) = if row % 2 == 0 { (8, 80.0) } else { (7, 120.0) };
        for col in 0..cols {
            course
                .bumpers
                .push(bumper(offset + col as f32 * 80.0, 180.0 + row as f32 * 60.0, 10.0));
        }
    }
    course
}

/// Hole 10, The Grand Finale: two windmills, side bumpers and ramps.
pub fn the_grand_finale() -> Course {
    let mut course = rect_floor_course(
        "The Grand Finale",
        5,
        Vec2::new(340.0, 430.0),
        Vec2::new(340.0, 80.0),
        Rect::new(50.0, 50.0, 580.0, 420.0),
    );
    course.obstacle_walls = vec![
        Rect::new(150.0, 240.0, 80.0, 16.0),
        Rect::new(450.0, 240.0, 80.0, 16.0),
        Rect::new(315.0, 280.0, 50.0, 16.0),
    ];
    course.rotating_obstacles = vec![
        windmill(340.0, 370.0, 140.0, 4, 0.02, 12.0),
        windmill(340.0, 170.0, 160.0, 2, -0.04, 12.0),
    ];
    course.bumpers = vec![bumper(100.0, 100.0, 30.0), bumper(580.0, 100.0, 30.0)];
    course.ramps = vec![
        ramp(100.0, 300.0, 40.0, 40.0, 0.0, -5.0),
        ramp(540.0, 300.0, 40.0, 40.0, 0.0, -5.0),
    ];
    course
}

/// Returns all built-in courses in play order (index 0 = hole 1, etc.).
pub fn all_courses() -> Vec<Course> {
    vec![
        the_corner(),
        the_windmill(),
        the_serpent(),
        the_bridge(),
        the_clock(),
        the_long_shot(),
        the_donut(),
        the_grand_u(),
        the_plinko(),
        the_grand_finale(),
    ]
}
