use std::{fmt, num::NonZeroU8};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::PlacementError;

use super::{BOARD_SIZE, shape::Shape};

/// A single board cell.
///
/// `0` is empty; any other value is an opaque tag marking the cell as occupied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Self = Self(0);

    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn occupied(tag: NonZeroU8) -> Self {
        Self(tag.get())
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn tag(self) -> Option<NonZeroU8> {
        NonZeroU8::new(self.0)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_occupied(self) -> bool {
        self.0 != 0
    }
}

/// Result of a line-clear pass.
///
/// Rows and columns are detected on the same (post-placement, pre-clear) board,
/// so a cell at the crossing of a complete row and a complete column belongs to
/// both lines.
///
/// # Cell counting
///
/// [`LineClear::cells_cleared`] is `lines * BOARD_SIZE` and counts such crossing
/// cells once per line. Scoring uses this value, so a simultaneous row + column
/// clear is worth `2 * BOARD_SIZE` cells even though only `2 * BOARD_SIZE - 1`
/// distinct cells were emptied. The distinct count is available through
/// [`LineClear::distinct_cells_cleared`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClear {
    rows: ArrayVec<u8, BOARD_SIZE>,
    columns: ArrayVec<u8, BOARD_SIZE>,
}

impl LineClear {
    /// Indices of the cleared rows, ascending.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|&r| usize::from(r))
    }

    /// Indices of the cleared columns, ascending.
    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().map(|&c| usize::from(c))
    }

    #[must_use]
    pub fn rows_cleared(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn columns_cleared(&self) -> usize {
        self.columns.len()
    }

    /// Total number of cleared lines (rows plus columns).
    #[must_use]
    pub fn lines(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines() == 0
    }

    /// Cleared cells as counted for scoring: `lines * BOARD_SIZE`.
    ///
    /// Crossing cells are counted once for each line they belong to.
    #[must_use]
    pub fn cells_cleared(&self) -> usize {
        self.lines() * BOARD_SIZE
    }

    /// Number of distinct cells that were emptied.
    #[must_use]
    pub fn distinct_cells_cleared(&self) -> usize {
        self.cells_cleared() - self.rows.len() * self.columns.len()
    }
}

/// The `BOARD_SIZE` × `BOARD_SIZE` playing grid.
///
/// `Board` is a plain value (`Copy`): simulations work on their own copy and can
/// never alias the live board of a session. Its dimensions are fixed by the type;
/// only cell contents change.
///
/// # Example
///
/// ```
/// use oxiblock_engine::{Board, Shape};
/// use std::num::NonZeroU8;
///
/// let mut board = Board::EMPTY;
/// let line = Shape::new((0..8).map(|c| (0, c))).unwrap();
///
/// assert!(board.can_place(&line, 7, 0));
/// board.fill_shape(&line, 7, 0, NonZeroU8::MIN);
///
/// let cleared = board.clear_lines();
/// assert_eq!(cleared.rows_cleared(), 1);
/// assert_eq!(board, Board::EMPTY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    rows: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const SIZE: usize = BOARD_SIZE;
    pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

    pub const EMPTY: Self = Self {
        rows: [[Cell::EMPTY; BOARD_SIZE]; BOARD_SIZE],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    /// Returns the cell at `(row, col)`, or `None` outside the board.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row)?.get(col).copied()
    }

    #[inline]
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.rows[row][col].is_occupied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_SIZE]> + '_ {
        self.rows.iter()
    }

    /// Number of empty cells in `row`.
    #[must_use]
    pub fn row_empty_count(&self, row: usize) -> usize {
        self.rows[row].iter().filter(|c| c.is_empty()).count()
    }

    /// Number of empty cells in `col`.
    #[must_use]
    pub fn column_empty_count(&self, col: usize) -> usize {
        self.rows.iter().filter(|row| row[col].is_empty()).count()
    }

    #[must_use]
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.rows[row].iter().all(|c| c.is_occupied())
    }

    #[must_use]
    pub fn is_column_complete(&self, col: usize) -> bool {
        self.rows.iter().all(|row| row[col].is_occupied())
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|c| c.is_occupied())
            .count()
    }

    /// Fraction of occupied cells, in `[0.0, 1.0]`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fill_ratio(&self) -> f32 {
        self.occupied_count() as f32 / Self::CELL_COUNT as f32
    }

    /// Checks whether `shape` fits with its origin at `(row, col)`.
    ///
    /// Every covered cell must lie inside the board and be empty. Cells are
    /// checked in the shape's offset order and the first violation is reported.
    pub fn check_placement(
        &self,
        shape: &Shape,
        row: usize,
        col: usize,
    ) -> Result<(), PlacementError> {
        for cell in shape.cells_at(row, col) {
            let Some((r, c)) = cell else {
                return Err(PlacementError::OutOfBounds);
            };
            let Some(cell) = self.get(r, c) else {
                return Err(PlacementError::OutOfBounds);
            };
            if cell.is_occupied() {
                return Err(PlacementError::Occupied);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn can_place(&self, shape: &Shape, row: usize, col: usize) -> bool {
        self.check_placement(shape, row, col).is_ok()
    }

    /// Iterates over every origin where `shape` fits, row-major.
    pub fn valid_origins<'a>(
        &'a self,
        shape: &'a Shape,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.can_place(shape, row, col))
    }

    /// Checks whether `shape` fits at any of the `BOARD_SIZE²` origins.
    #[must_use]
    pub fn can_place_anywhere(&self, shape: &Shape) -> bool {
        self.valid_origins(shape).next().is_some()
    }

    /// Writes `tag` into every cell covered by `shape` at `(row, col)`.
    ///
    /// The caller is responsible for validating the placement with
    /// [`Board::check_placement`] first.
    ///
    /// # Panics
    ///
    /// Panics if a covered cell lies outside the board.
    pub fn fill_shape(&mut self, shape: &Shape, row: usize, col: usize, tag: NonZeroU8) {
        debug_assert!(self.can_place(shape, row, col));
        for (dr, dc) in shape.cells() {
            self.rows[row + dr][col + dc] = Cell::occupied(tag);
        }
    }

    /// Clears every complete row and column.
    ///
    /// Completeness of all rows and all columns is decided before any cell is
    /// emptied.
    pub fn clear_lines(&mut self) -> LineClear {
        let mut clear = LineClear::default();
        for (i, index) in (0..BOARD_SIZE).zip(0u8..) {
            if self.is_row_complete(i) {
                clear.rows.push(index);
            }
            if self.is_column_complete(i) {
                clear.columns.push(index);
            }
        }

        for row in clear.rows() {
            self.rows[row] = [Cell::EMPTY; BOARD_SIZE];
        }
        for col in clear.columns() {
            for row in &mut self.rows {
                row[col] = Cell::EMPTY;
            }
        }
        clear
    }

    /// Creates a `Board` from ASCII art, for tests and examples.
    ///
    /// `.` is an empty cell, `#` an occupied cell with tag 1 and `1`-`9` an
    /// occupied cell with that tag. Blank lines and whitespace are ignored;
    /// missing trailing rows are empty.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly `BOARD_SIZE` cells or there are too
    /// many rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        assert!(
            lines.len() <= BOARD_SIZE,
            "Board must have at most {BOARD_SIZE} rows, got {}",
            lines.len()
        );

        for (row, line) in lines.iter().enumerate() {
            let cells = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '.' => Cell::EMPTY,
                    '#' => Cell::new(1),
                    '1'..='9' => Cell::new(u8::try_from(c.to_digit(10).unwrap()).unwrap()),
                    _ => panic!("Unexpected character {c:?} at row {row}"),
                })
                .collect::<Vec<_>>();
            assert_eq!(
                cells.len(),
                BOARD_SIZE,
                "Each row must have exactly {} cells, got {} at row {}",
                BOARD_SIZE,
                cells.len(),
                row
            );
            board.rows[row].copy_from_slice(&cells);
        }
        board
    }
}

impl fmt::Display for Board {
    /// Renders the board in the [`Board::from_ascii`] format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let ch = match cell.value() {
                    0 => '.',
                    v @ 1..=9 => char::from(b'0' + v),
                    _ => '#',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: NonZeroU8 = NonZeroU8::MIN;

    fn shape(offsets: &[(i32, i32)]) -> Shape {
        Shape::new(offsets.iter().copied()).unwrap()
    }

    fn brute_force_complete_lines(board: &Board) -> (usize, usize) {
        let mut rows = 0;
        let mut cols = 0;
        for i in 0..BOARD_SIZE {
            if (0..BOARD_SIZE).all(|j| board.cell(i, j).value() != 0) {
                rows += 1;
            }
            if (0..BOARD_SIZE).all(|j| board.cell(j, i).value() != 0) {
                cols += 1;
            }
        }
        (rows, cols)
    }

    #[test]
    fn test_initial_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.occupied_count(), 0);
        assert!(board.rows().flatten().all(|c| c.is_empty()));
        assert!((board.fill_ratio() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_can_place_in_bounds() {
        let board = Board::EMPTY;
        let square = shape(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert!(board.can_place(&square, 0, 0));
        assert!(board.can_place(&square, 6, 6));
        assert_eq!(
            board.check_placement(&square, 7, 6),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            board.check_placement(&square, 6, 7),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            board.check_placement(&square, usize::MAX, 0),
            Err(PlacementError::OutOfBounds)
        );
    }

    #[test]
    fn test_can_place_rejects_occupied() {
        let board = Board::from_ascii(
            r"
            ........
            ...#....
            ........
            ",
        );
        let square = shape(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(
            board.check_placement(&square, 0, 2),
            Err(PlacementError::Occupied)
        );
        assert_eq!(
            board.check_placement(&square, 1, 3),
            Err(PlacementError::Occupied)
        );
        assert!(board.can_place(&square, 0, 4));
        assert!(board.can_place(&square, 2, 3));
    }

    #[test]
    fn test_fill_shape_matches_offsets() {
        let mut board = Board::EMPTY;
        let l = shape(&[(0, 0), (1, 0), (2, 0), (2, 1)]);
        let tag = NonZeroU8::new(3).unwrap();
        board.fill_shape(&l, 4, 5, tag);

        let expected = l
            .cells()
            .map(|(dr, dc)| (4 + dr, 5 + dc))
            .collect::<Vec<_>>();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = board.cell(row, col);
                if expected.contains(&(row, col)) {
                    assert_eq!(cell.tag(), Some(tag));
                } else {
                    assert!(cell.is_empty(), "unexpected fill at ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn test_clear_single_row() {
        let mut board = Board::from_ascii(
            r"
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            #####...
            ",
        );
        board.fill_shape(&shape(&[(0, 0), (0, 1), (0, 2)]), 7, 5, TAG);
        let cleared = board.clear_lines();
        assert_eq!(cleared.rows().collect::<Vec<_>>(), [7]);
        assert_eq!(cleared.columns_cleared(), 0);
        assert_eq!(cleared.lines(), 1);
        assert_eq!(cleared.cells_cleared(), 8);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_clear_single_column() {
        let mut board = Board::from_ascii(
            r"
            ..#.....
            ..#.....
            ..#.....
            ..#.....
            ..#.....
            ..#.....
            ..#.....
            ..#....#
            ",
        );
        let cleared = board.clear_lines();
        assert_eq!(cleared.columns().collect::<Vec<_>>(), [2]);
        assert_eq!(cleared.rows_cleared(), 0);
        assert_eq!(board.occupied_count(), 1);
        assert!(board.is_occupied(7, 7));
    }

    #[test]
    fn test_clear_crossing_lines_double_counts_intersection() {
        let mut board = Board::from_ascii(
            r"
            ...#....
            ...#....
            ...#....
            ########
            ...#....
            ...#....
            ...#....
            ...#....
            ",
        );
        let cleared = board.clear_lines();
        assert_eq!(cleared.rows_cleared(), 1);
        assert_eq!(cleared.columns_cleared(), 1);
        assert_eq!(cleared.lines(), 2);
        // The crossing cell is counted for both lines.
        assert_eq!(cleared.cells_cleared(), 16);
        assert_eq!(cleared.distinct_cells_cleared(), 15);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_clear_keeps_incomplete_lines() {
        let mut board = Board::from_ascii(
            r"
            #######.
            ........
            ",
        );
        let before = board;
        let cleared = board.clear_lines();
        assert!(cleared.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_full_board() {
        let mut board = Board::from_ascii(&"########\n".repeat(BOARD_SIZE));
        let cleared = board.clear_lines();
        assert_eq!(cleared.rows_cleared(), BOARD_SIZE);
        assert_eq!(cleared.columns_cleared(), BOARD_SIZE);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_clear_counts_match_brute_force() {
        let mut board = Board::from_ascii(
            r"
            ########
            ##.#####
            ########
            ##.#####
            ##.#####
            ##.#####
            ##.#####
            ##.#####
            ",
        );
        let expected = brute_force_complete_lines(&board);
        let cleared = board.clear_lines();
        assert_eq!((cleared.rows_cleared(), cleared.columns_cleared()), expected);
        assert_eq!(expected, (2, 7));
        assert_eq!(brute_force_complete_lines(&board), (0, 0));
    }

    #[test]
    fn test_can_place_anywhere() {
        let board = Board::from_ascii(
            r"
            ########
            ########
            ########
            ########
            ####.###
            ########
            ########
            ########
            ",
        );
        let single = shape(&[(0, 0)]);
        let domino = shape(&[(0, 0), (0, 1)]);
        assert!(board.can_place_anywhere(&single));
        assert_eq!(board.valid_origins(&single).collect::<Vec<_>>(), [(4, 4)]);
        assert!(!board.can_place_anywhere(&domino));
    }

    #[test]
    fn test_fill_ratio() {
        let board = Board::from_ascii(
            r"
            ########
            ########
            ",
        );
        assert!((board.fill_ratio() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_display_roundtrip() {
        let board = Board::from_ascii(
            r"
            1.......
            .2......
            ..3.....
            ........
            ........
            ........
            ........
            .......9
            ",
        );
        let rendered = board.to_string();
        assert_eq!(Board::from_ascii(&rendered), board);
    }

    #[test]
    fn test_board_serialization() {
        let board = Board::from_ascii("#.......\n");
        let serialized = serde_json::to_string(&board).unwrap();
        assert!(serialized.starts_with(r#"{"rows":[[1,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0]"#));

        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        fn arb_board() -> impl Strategy<Value = Board> {
            prop::collection::vec(prop::bool::weighted(0.6), Board::CELL_COUNT).prop_map(
                |bits| {
                    let mut board = Board::EMPTY;
                    for (i, bit) in bits.into_iter().enumerate() {
                        if bit {
                            board.rows[i / BOARD_SIZE][i % BOARD_SIZE] = Cell::new(1);
                        }
                    }
                    board
                },
            )
        }

        fn arb_shape() -> impl Strategy<Value = Shape> {
            prop::collection::vec((0i32..3, 0i32..3), 1..=9)
                .prop_map(|offsets| Shape::new(offsets).unwrap())
        }

        proptest! {
            #[test]
            fn can_place_matches_cell_checks(
                board in arb_board(),
                shape in arb_shape(),
                row in 0usize..10,
                col in 0usize..10,
            ) {
                let expected = shape.cells().all(|(dr, dc)| {
                    let (r, c) = (row + dr, col + dc);
                    r < BOARD_SIZE && c < BOARD_SIZE && board.cell(r, c).is_empty()
                });
                prop_assert_eq!(board.can_place(&shape, row, col), expected);
            }

            #[test]
            fn clear_lines_matches_brute_force(board in arb_board()) {
                let mut cleared_board = board;
                let expected = brute_force_complete_lines(&board);
                let cleared = cleared_board.clear_lines();
                prop_assert_eq!((cleared.rows_cleared(), cleared.columns_cleared()), expected);
                prop_assert_eq!(cleared.cells_cleared(), (expected.0 + expected.1) * BOARD_SIZE);
                prop_assert_eq!(brute_force_complete_lines(&cleared_board), (0, 0));
            }

            #[test]
            fn fill_covers_exactly_the_shape(
                shape in arb_shape(),
                row in 0usize..6,
                col in 0usize..6,
            ) {
                let mut board = Board::EMPTY;
                board.fill_shape(&shape, row, col, TAG);
                let mut expected = shape
                    .cells()
                    .map(|(dr, dc)| (row + dr, col + dc))
                    .collect::<Vec<_>>();
                expected.sort_unstable();
                let mut actual = Vec::new();
                for r in 0..BOARD_SIZE {
                    for c in 0..BOARD_SIZE {
                        if board.is_occupied(r, c) {
                            actual.push((r, c));
                        }
                    }
                }
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
