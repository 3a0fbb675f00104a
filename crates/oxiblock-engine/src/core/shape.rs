use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::ShapeError;

use super::{BOARD_SIZE, MAX_SHAPE_CELLS};

/// A placeable figure: a set of `(row, col)` offsets.
///
/// Shapes are always stored normalized:
///
/// - the smallest row offset and the smallest column offset are both 0,
/// - offsets are sorted (row-major) and free of duplicates.
///
/// Normalization happens in [`Shape::new`], the only way to build a shape, so two
/// shapes covering the same cells compare equal no matter how their offsets were
/// written down.
///
/// # Example
///
/// ```
/// use oxiblock_engine::Shape;
///
/// // An L written with negative offsets...
/// let a = Shape::new([(-1, 0), (0, 0), (1, 0), (1, 1)]).unwrap();
/// // ...is the same shape as one written from the origin.
/// let b = Shape::new([(0, 0), (1, 0), (2, 0), (2, 1)]).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.height(), 3);
/// assert_eq!(a.width(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shape {
    cells: ArrayVec<(u8, u8), MAX_SHAPE_CELLS>,
    height: u8,
    width: u8,
}

impl Shape {
    /// Builds a normalized shape from arbitrary integer offsets.
    ///
    /// Duplicate offsets are merged.
    pub fn new<I>(offsets: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut offsets = offsets
            .into_iter()
            .map(|(r, c)| (i64::from(r), i64::from(c)))
            .collect::<Vec<_>>();
        offsets.sort_unstable();
        offsets.dedup();

        let count = offsets.len();
        if count == 0 {
            return Err(ShapeError::Empty);
        }
        if count > MAX_SHAPE_CELLS {
            return Err(ShapeError::TooManyCells {
                count,
                max: MAX_SHAPE_CELLS,
            });
        }

        let (min_row, max_row) = min_max(offsets.iter().map(|&(r, _)| r));
        let (min_col, max_col) = min_max(offsets.iter().map(|&(_, c)| c));
        let height = max_row - min_row + 1;
        let width = max_col - min_col + 1;
        let fits = |span: i64| usize::try_from(span).is_ok_and(|span| span <= BOARD_SIZE);
        if !fits(height) || !fits(width) {
            return Err(ShapeError::TooLarge { height, width });
        }

        // Every value below lies in 0..BOARD_SIZE once the bounding box fits.
        let to_u8 = |v: i64| u8::try_from(v).expect("offset is bounded by the board size");
        // Shifting by a constant keeps the row-major order.
        let cells = offsets
            .iter()
            .map(|&(r, c)| (to_u8(r - min_row), to_u8(c - min_col)))
            .collect();
        Ok(Self {
            cells,
            height: to_u8(height),
            width: to_u8(width),
        })
    }

    /// Re-applies normalization.
    ///
    /// Normalization is idempotent, so this always returns a shape equal to `self`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::new(
            self.cells
                .iter()
                .map(|&(r, c)| (i32::from(r), i32::from(c))),
        )
        .expect("a stored shape is always valid")
    }

    /// Iterates over the `(row, col)` offsets in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .map(|&(r, c)| (usize::from(r), usize::from(c)))
    }

    /// Returns the absolute board cells covered when the shape's origin is at
    /// `(row, col)`, or `None` if any coordinate overflows.
    pub fn cells_at(
        &self,
        row: usize,
        col: usize,
    ) -> impl Iterator<Item = Option<(usize, usize)>> + '_ {
        self.cells()
            .map(move |(dr, dc)| Some((row.checked_add(dr)?, col.checked_add(dc)?)))
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells().any(|cell| cell == (row, col))
    }
}

fn min_max(values: impl Iterator<Item = i64>) -> (i64, i64) {
    values.fold((i64::MAX, i64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

impl fmt::Display for Shape {
    /// Renders the shape as rows of `#` and `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width() {
                let ch = if self.contains(row, col) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Shape {
    type Err = ShapeError;

    /// Parses the `"r,c;r,c;..."` notation used for serialization.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ShapeError::InvalidNotation {
            input: s.to_owned(),
        };
        let offsets = s
            .split(';')
            .map(|cell| {
                let (r, c) = cell.split_once(',').ok_or_else(invalid)?;
                let r = r.trim().parse::<i32>().map_err(|_| invalid())?;
                let c = c.trim().parse::<i32>().map_err(|_| invalid())?;
                Ok((r, c))
            })
            .collect::<Result<Vec<_>, ShapeError>>()?;
        Self::new(offsets)
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "r,c;r,c;..." (e.g., "0,0;0,1;1,0")
        let s = self
            .cells()
            .map(|(r, c)| format!("{r},{c}"))
            .collect::<Vec<_>>()
            .join(";");
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Order-insensitive identity of a set of shapes.
///
/// Two sets are the same set when they contain the same multiset of shapes,
/// regardless of the order in which the shapes were drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeSetKey(Vec<Shape>);

impl ShapeSetKey {
    #[must_use]
    pub fn new<'a, I>(shapes: I) -> Self
    where
        I: IntoIterator<Item = &'a Shape>,
    {
        let mut shapes = shapes.into_iter().cloned().collect::<Vec<_>>();
        shapes.sort();
        Self(shapes)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_to_origin() {
        let shape = Shape::new([(3, 5), (3, 6), (4, 5)]).unwrap();
        assert_eq!(shape.cells().collect::<Vec<_>>(), [(0, 0), (0, 1), (1, 0)]);
        assert_eq!(shape.height(), 2);
        assert_eq!(shape.width(), 2);
    }

    #[test]
    fn test_normalizes_negative_offsets() {
        let plus = Shape::new([(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)]).unwrap();
        assert_eq!(
            plus.cells().collect::<Vec<_>>(),
            [(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let shape = Shape::new([(2, 2), (2, 3), (3, 3), (4, 3)]).unwrap();
        let again = shape.normalized();
        assert_eq!(again, shape);
        assert_eq!(again.normalized(), shape);
    }

    #[test]
    fn test_duplicate_offsets_are_merged() {
        let shape = Shape::new([(0, 0), (0, 0), (0, 1)]).unwrap();
        assert_eq!(shape.cell_count(), 2);
    }

    #[test]
    fn test_rejects_invalid_shapes() {
        assert_eq!(
            Shape::new(std::iter::empty::<(i32, i32)>()),
            Err(ShapeError::Empty)
        );
        assert!(matches!(
            Shape::new((0..10).map(|c| (0, c))),
            Err(ShapeError::TooManyCells { count: 10, .. })
        ));
        assert!(matches!(
            Shape::new([(0, 0), (0, 8)]),
            Err(ShapeError::TooLarge { width: 9, .. })
        ));
    }

    #[test]
    fn test_display() {
        let t = Shape::new([(0, 0), (0, 1), (0, 2), (1, 1)]).unwrap();
        assert_eq!(t.to_string(), "###\n.#.");
    }

    #[test]
    fn test_shape_serialization() {
        let shape = Shape::new([(1, 1), (1, 2), (2, 1)]).unwrap();
        let serialized = serde_json::to_string(&shape).unwrap();
        assert_eq!(serialized, "\"0,0;0,1;1,0\"");

        let deserialized: Shape = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, shape);
    }

    #[test]
    fn test_shape_deserialization_normalizes() {
        let shape: Shape = serde_json::from_str("\"5,5;4,5\"").unwrap();
        assert_eq!(shape.cells().collect::<Vec<_>>(), [(0, 0), (1, 0)]);
    }

    #[test]
    fn test_shape_deserialization_errors() {
        for input in ["\"\"", "\"0,0;1\"", "\"a,b\""] {
            let result: Result<Shape, _> = serde_json::from_str(input);
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("invalid shape notation"), "{err_msg}");
        }
    }

    #[test]
    fn test_set_key_ignores_order() {
        let a = Shape::new([(0, 0)]).unwrap();
        let b = Shape::new([(0, 0), (0, 1)]).unwrap();
        let c = Shape::new([(0, 0), (1, 0)]).unwrap();

        assert_eq!(
            ShapeSetKey::new([&a, &b, &c]),
            ShapeSetKey::new([&c, &a, &b])
        );
        assert_ne!(
            ShapeSetKey::new([&a, &b, &c]),
            ShapeSetKey::new([&a, &b, &b])
        );
    }
}
