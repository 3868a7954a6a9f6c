use serde::{Deserialize, Serialize};

/// Strokes allowed on one hole before play moves on.
pub const MAX_STROKES: u32 = 10;

/// How a hole ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoleOutcome {
    Holed,
    /// Stroke limit reached without sinking the ball.
    StrokeLimit,
}

/// Result of one completed hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleScore {
    pub strokes: u32,
    pub par: u8,
    pub outcome: HoleOutcome,
}

impl HoleScore {
    /// Strokes over (positive) or under (negative) par.
    pub fn relative_to_par(&self) -> i32 {
        self.strokes as i32 - self.par as i32
    }
}

/// Strokes per hole over a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    max_strokes: u32,
    holes: Vec<HoleScore>,
    current: u32,
}

impl Default for Scorecard {
    fn default() -> Self {
        Self::new(MAX_STROKES)
    }
}

impl Scorecard {
    pub fn new(max_strokes: u32) -> Self {
        Self {
            max_strokes: max_strokes.max(1),
            holes: Vec::new(),
            current: 0,
        }
    }

    /// Count a stroke on the current hole. Returns `true` once the hole has
    /// hit the stroke limit.
    pub fn record_stroke(&mut self) -> bool {
        self.current += 1;
        self.stroke_limit_reached()
    }

    pub fn stroke_limit_reached(&self) -> bool {
        self.current >= self.max_strokes
    }

    pub fn current_strokes(&self) -> u32 {
        self.current
    }

    /// Drop the strokes on the hole in play without recording it, for a
    /// restart.
    pub fn restart_hole(&mut self) {
        self.current = 0;
    }

    pub fn max_strokes(&self) -> u32 {
        self.max_strokes
    }

    /// Close the current hole and start counting the next one.
    pub fn finish_hole(&mut self, par: u8, outcome: HoleOutcome) -> HoleScore {
        let score = HoleScore {
            strokes: self.current,
            par,
            outcome,
        };
        self.holes.push(score);
        self.current = 0;
        score
    }

    pub fn holes(&self) -> &[HoleScore] {
        &self.holes
    }

    /// Strokes on completed holes.
    pub fn total(&self) -> u32 {
        self.holes.iter().map(|h| h.strokes).sum()
    }

    /// Completed holes plus the hole in progress.
    pub fn running_total(&self) -> u32 {
        self.total() + self.current
    }

    pub fn total_par(&self) -> u32 {
        self.holes.iter().map(|h| h.par as u32).sum()
    }

    pub fn relative_to_par(&self) -> i32 {
        self.holes.iter().map(HoleScore::relative_to_par).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strokes_accumulate_per_hole() {
        let mut card = Scorecard::default();
        card.record_stroke();
        card.record_stroke();
        assert_eq!(card.running_total(), 2);
        assert_eq!(card.total(), 0);

        let hole = card.finish_hole(3, HoleOutcome::Holed);
        assert_eq!(hole.strokes, 2);
        assert_eq!(hole.relative_to_par(), -1);
        assert_eq!(card.current_strokes(), 0);

        for _ in 0..4 {
            card.record_stroke();
        }
        card.finish_hole(3, HoleOutcome::Holed);
        assert_eq!(card.total(), 6);
        assert_eq!(card.total_par(), 6);
        assert_eq!(card.relative_to_par(), 0);
        assert_eq!(card.holes().len(), 2);
    }

    #[test]
    fn stroke_limit_is_reported_on_the_last_allowed_stroke() {
        let mut card = Scorecard::new(3);
        assert!(!card.record_stroke());
        assert!(!card.record_stroke());
        assert!(card.record_stroke());
        let hole = card.finish_hole(2, HoleOutcome::StrokeLimit);
        assert_eq!(hole.outcome, HoleOutcome::StrokeLimit);
        assert!(!card.stroke_limit_reached());
    }

    #[test]
    fn default_limit() {
        let mut card = Scorecard::default();
        for _ in 0..MAX_STROKES - 1 {
            assert!(!card.record_stroke());
        }
        assert!(card.record_stroke());
    }

    #[test]
    fn restart_discards_the_hole_in_play() {
        let mut card = Scorecard::new(4);
        card.record_stroke();
        card.finish_hole(2, HoleOutcome::Holed);
        card.record_stroke();
        card.record_stroke();
        card.restart_hole();
        assert_eq!(card.current_strokes(), 0);
        assert_eq!(card.running_total(), 1);
        assert_eq!(card.holes().len(), 1);
    }

    #[test]
    fn zero_limit_still_allows_one_stroke() {
        let mut card = Scorecard::new(0);
        assert!(!card.stroke_limit_reached());
        assert!(card.record_stroke());
    }
}
