//! Line-clear scoring

/// Points awarded per cleared line
pub const POINTS_PER_LINE: u64 = 100;

/// The running score counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub points: u64,
}

impl Score {
    pub fn new() -> Self {
        Self { points: 0 }
    }

    /// Score a batch of cleared lines: linear, 100 per line, no multi-line
    /// bonus. Returns the points awarded for the batch.
    pub fn add_line_clear(&mut self, lines: u32) -> u64 {
        let awarded = lines as u64 * POINTS_PER_LINE;
        self.points += awarded;
        awarded
    }

    /// Reset to zero (on game over)
    pub fn reset(&mut self) {
        self.points = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let mut score = Score::new();
        assert_eq!(score.add_line_clear(1), 100);
        assert_eq!(score.points, 100);
    }

    #[test]
    fn test_batch_is_linear() {
        let mut score = Score::new();
        score.add_line_clear(4);
        // No tetris bonus: four lines are worth exactly 4x one line
        assert_eq!(score.points, 400);
    }

    #[test]
    fn test_zero_lines_score_nothing() {
        let mut score = Score::new();
        assert_eq!(score.add_line_clear(0), 0);
        assert_eq!(score.points, 0);
    }

    #[test]
    fn test_reset() {
        let mut score = Score::new();
        score.add_line_clear(3);
        score.reset();
        assert_eq!(score.points, 0);
    }
}
