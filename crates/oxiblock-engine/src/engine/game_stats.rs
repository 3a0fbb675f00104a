use crate::LineClear;

/// Points per cell of the placed piece.
pub const POINTS_PER_PLACED_CELL: usize = 5;

/// Points per cleared cell, before the line multiplier.
pub const POINTS_PER_CLEARED_CELL: usize = 10;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// # Scoring
///
/// Every placement earns `cell_count * 5` base points. A placement that clears
/// lines additionally earns `cells_cleared * 10`, and the sum is multiplied by
/// the number of lines cleared:
///
/// ```text
/// score += (base + cells_cleared * 10) * lines
/// ```
///
/// `cells_cleared` comes from [`LineClear::cells_cleared`] and counts a cell at
/// the crossing of a cleared row and column twice.
///
/// # Example
///
/// ```
/// use oxiblock_engine::{Board, GameStats, Shape};
/// use std::num::NonZeroU8;
///
/// let mut board = Board::from_ascii("#####...");
/// let line = Shape::new([(0, 0), (0, 1), (0, 2)]).unwrap();
/// board.fill_shape(&line, 0, 5, NonZeroU8::MIN);
/// let cleared = board.clear_lines();
///
/// let mut stats = GameStats::new();
/// let update = stats.complete_placement(line.cell_count(), &cleared);
///
/// assert_eq!(update.delta, 95);
/// assert_eq!(stats.score(), 95);
/// assert_eq!(stats.combo(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    best_score: usize,
    total_cleared_lines: usize,
    total_pieces_placed: usize,
    combo: usize,
}

/// Score change caused by a single placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub delta: usize,
    /// The new best score, if this placement raised it.
    pub new_best: Option<usize>,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            best_score: 0,
            total_cleared_lines: 0,
            total_pieces_placed: 0,
            combo: 0,
        }
    }

    /// Creates statistics whose best score starts at `best_score`.
    #[must_use]
    pub const fn with_best_score(best_score: usize) -> Self {
        let mut this = Self::new();
        this.best_score = best_score;
        this
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Highest score seen, including scores from before the last reset.
    #[must_use]
    pub const fn best_score(&self) -> usize {
        self.best_score
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    #[must_use]
    pub const fn total_pieces_placed(&self) -> usize {
        self.total_pieces_placed
    }

    /// Number of lines cleared by the latest placement, `0` if it cleared none.
    #[must_use]
    pub const fn combo(&self) -> usize {
        self.combo
    }

    /// Raises the best score to `best_score` if it is higher.
    pub fn raise_best_score(&mut self, best_score: usize) {
        self.best_score = self.best_score.max(best_score);
    }

    /// Updates statistics after a piece of `cell_count` cells has been placed
    /// and `cleared` lines removed.
    pub fn complete_placement(&mut self, cell_count: usize, cleared: &LineClear) -> ScoreUpdate {
        let base = cell_count * POINTS_PER_PLACED_CELL;
        let lines = cleared.lines();
        let delta = if lines == 0 {
            base
        } else {
            (base + cleared.cells_cleared() * POINTS_PER_CLEARED_CELL) * lines
        };

        self.total_pieces_placed += 1;
        self.total_cleared_lines += lines;
        self.combo = lines;
        self.score += delta;

        let new_best = (self.score > self.best_score).then(|| {
            self.best_score = self.score;
            self.best_score
        });
        ScoreUpdate { delta, new_best }
    }

    /// Zeroes everything except the best score.
    pub fn reset(&mut self) {
        *self = Self::with_best_score(self.best_score);
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU8;

    use crate::{Board, Shape};

    use super::*;

    fn clear_after(
        art: &str,
        offsets: &[(i32, i32)],
        row: usize,
        col: usize,
    ) -> (usize, LineClear) {
        let mut board = Board::from_ascii(art);
        let shape = Shape::new(offsets.iter().copied()).unwrap();
        board.fill_shape(&shape, row, col, NonZeroU8::MIN);
        (shape.cell_count(), board.clear_lines())
    }

    #[test]
    fn test_placement_without_clear() {
        let mut stats = GameStats::new();
        let update = stats.complete_placement(4, &LineClear::default());
        assert_eq!(update.delta, 20);
        assert_eq!(update.new_best, Some(20));
        assert_eq!(stats.score(), 20);
        assert_eq!(stats.combo(), 0);
        assert_eq!(stats.total_pieces_placed(), 1);
        assert_eq!(stats.total_cleared_lines(), 0);
    }

    #[test]
    fn test_single_row_clear_with_three_cell_piece() {
        let (cells, cleared) = clear_after("#####...", &[(0, 0), (0, 1), (0, 2)], 0, 5);
        let mut stats = GameStats::new();
        let update = stats.complete_placement(cells, &cleared);
        // (3 * 5 + 8 * 10) * 1
        assert_eq!(update.delta, 95);
        assert_eq!(stats.combo(), 1);
        assert_eq!(stats.total_cleared_lines(), 1);
    }

    #[test]
    fn test_crossing_clear_counts_intersection_twice() {
        let art = r"
            ...#....
            ...#....
            ...#....
            ###.####
            ...#....
            ...#....
            ...#....
            ...#....
        ";
        let (cells, cleared) = clear_after(art, &[(0, 0)], 3, 3);
        let mut stats = GameStats::new();
        let update = stats.complete_placement(cells, &cleared);
        // (1 * 5 + 16 * 10) * 2
        assert_eq!(update.delta, 330);
        assert_eq!(stats.combo(), 2);
    }

    #[test]
    fn test_combo_resets_after_non_clearing_placement() {
        let (cells, cleared) = clear_after("#######.", &[(0, 0)], 0, 7);
        let mut stats = GameStats::new();
        stats.complete_placement(cells, &cleared);
        assert_eq!(stats.combo(), 1);
        stats.complete_placement(2, &LineClear::default());
        assert_eq!(stats.combo(), 0);
        assert_eq!(stats.total_cleared_lines(), 1);
        assert_eq!(stats.total_pieces_placed(), 2);
    }

    #[test]
    fn test_best_score_survives_reset() {
        let mut stats = GameStats::with_best_score(30);
        // 25 stays below the stored best, 50 passes it.
        assert_eq!(stats.complete_placement(5, &LineClear::default()).new_best, None);
        assert_eq!(
            stats.complete_placement(5, &LineClear::default()).new_best,
            Some(50)
        );
        assert_eq!(
            stats.complete_placement(1, &LineClear::default()).new_best,
            Some(55)
        );

        stats.reset();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.total_pieces_placed(), 0);
        assert_eq!(stats.best_score(), 55);
    }
}
