use std::cell::OnceCell;

use oxiblock_engine::{BOARD_SIZE, Board};

/// Lines with at most this many empty cells (and at least one) are near complete.
pub const NEAR_COMPLETE_MAX_EMPTY: usize = 2;

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Board metrics used by the heuristic, each computed on first access.
#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    isolated_empty_cells: OnceCell<u32>,
    near_complete_lines: OnceCell<u32>,
    compactness: OnceCell<u32>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: *board,
            isolated_empty_cells: OnceCell::new(),
            near_complete_lines: OnceCell::new(),
            compactness: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Empty interior cells whose eight neighbours are all occupied.
    ///
    /// Cells on the outermost ring are never counted.
    #[must_use]
    pub fn isolated_empty_cells(&self) -> u32 {
        *self.isolated_empty_cells.get_or_init(|| {
            let mut count = 0;
            for row in 1..BOARD_SIZE - 1 {
                for col in 1..BOARD_SIZE - 1 {
                    if self.board.is_occupied(row, col) {
                        continue;
                    }
                    if self.occupied_neighbors(row, col) == 8 {
                        count += 1;
                    }
                }
            }
            count
        })
    }

    /// Rows plus columns with one or two empty cells.
    #[must_use]
    pub fn near_complete_lines(&self) -> u32 {
        *self.near_complete_lines.get_or_init(|| {
            let is_near = |empty: usize| (1..=NEAR_COMPLETE_MAX_EMPTY).contains(&empty);
            let rows = (0..BOARD_SIZE)
                .filter(|&row| is_near(self.board.row_empty_count(row)))
                .count();
            let columns = (0..BOARD_SIZE)
                .filter(|&col| is_near(self.board.column_empty_count(col)))
                .count();
            u32::try_from(rows + columns).unwrap()
        })
    }

    /// Sum over occupied cells of their occupied neighbours (8-neighbourhood).
    ///
    /// Each adjacent pair of occupied cells contributes twice.
    #[must_use]
    pub fn compactness(&self) -> u32 {
        *self.compactness.get_or_init(|| {
            let mut sum = 0;
            for row in 0..BOARD_SIZE {
                for col in 0..BOARD_SIZE {
                    if self.board.is_occupied(row, col) {
                        sum += self.occupied_neighbors(row, col);
                    }
                }
            }
            sum
        })
    }

    /// Fraction of occupied cells.
    #[must_use]
    pub fn fill_ratio(&self) -> f32 {
        self.board.fill_ratio()
    }

    fn occupied_neighbors(&self, row: usize, col: usize) -> u32 {
        let occupied = NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                self.board.get(r, c)
            })
            .filter(|cell| cell.is_occupied())
            .count();
        u32::try_from(occupied).unwrap()
    }
}
