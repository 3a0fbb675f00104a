use std::num::NonZeroU8;

use super::{piece::Piece, shape::Shape};

/// Number of distinct cell tags handed out by a library.
///
/// Tags cycle through `1..=TAG_COUNT` in catalog order.
pub const TAG_COUNT: usize = 9;

type Offsets = &'static [(i32, i32)];

/// The standard catalog, one entry per distinct shape (rotations are separate
/// entries since pieces never rotate).
const STANDARD_SHAPES: &[Offsets] = &[
    // 1 cell
    &[(0, 0)],
    // 2 cells: dominoes
    &[(0, 0), (0, 1)],
    &[(0, 0), (1, 0)],
    // 3 cells: lines
    &[(0, 0), (0, 1), (0, 2)],
    &[(0, 0), (1, 0), (2, 0)],
    // 3 cells: small corners
    &[(0, 0), (0, 1), (1, 0)],
    &[(0, 0), (0, 1), (1, 1)],
    &[(0, 0), (1, 0), (1, 1)],
    &[(0, 1), (1, 0), (1, 1)],
    // 4 cells: lines and square
    &[(0, 0), (0, 1), (0, 2), (0, 3)],
    &[(0, 0), (1, 0), (2, 0), (3, 0)],
    &[(0, 0), (0, 1), (1, 0), (1, 1)],
    // 4 cells: T
    &[(0, 0), (0, 1), (0, 2), (1, 1)],
    &[(0, 1), (1, 0), (1, 1), (1, 2)],
    &[(0, 0), (1, 0), (1, 1), (2, 0)],
    &[(0, 1), (1, 0), (1, 1), (2, 1)],
    // 4 cells: L
    &[(0, 0), (1, 0), (2, 0), (2, 1)],
    &[(0, 0), (0, 1), (0, 2), (1, 0)],
    &[(0, 0), (0, 1), (1, 1), (2, 1)],
    &[(0, 2), (1, 0), (1, 1), (1, 2)],
    // 4 cells: J
    &[(0, 1), (1, 1), (2, 0), (2, 1)],
    &[(0, 0), (1, 0), (1, 1), (1, 2)],
    &[(0, 0), (0, 1), (1, 0), (2, 0)],
    &[(0, 0), (0, 1), (0, 2), (1, 2)],
    // 4 cells: S and Z
    &[(0, 1), (0, 2), (1, 0), (1, 1)],
    &[(0, 0), (0, 1), (1, 1), (1, 2)],
    &[(0, 0), (1, 0), (1, 1), (2, 1)],
    &[(0, 1), (1, 0), (1, 1), (2, 0)],
    // 5 cells: lines and plus
    &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)],
    &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
    &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)],
    // 5 cells: big corners
    &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)],
    &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)],
    &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)],
    &[(0, 2), (1, 2), (2, 0), (2, 1), (2, 2)],
    // 6 cells: rectangles
    &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)],
    &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)],
    // 8 cells: hollow square
    &[
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 0),
        (1, 2),
        (2, 0),
        (2, 1),
        (2, 2),
    ],
    // 9 cells: square
    &[
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 0),
        (1, 1),
        (1, 2),
        (2, 0),
        (2, 1),
        (2, 2),
    ],
];

/// Immutable catalog of the shapes piece sets are drawn from.
///
/// # Example
///
/// ```
/// use oxiblock_engine::ShapeLibrary;
///
/// let library = ShapeLibrary::standard();
/// assert!(library.iter().all(|shape| (1..=9).contains(&shape.cell_count())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeLibrary {
    shapes: Vec<Shape>,
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShapeLibrary {
    /// Returns the standard catalog: lines, corners, T/L/J/S/Z variants,
    /// squares, a plus and a hollow square, from 1 to 9 cells.
    #[must_use]
    pub fn standard() -> Self {
        let shapes = STANDARD_SHAPES
            .iter()
            .map(|offsets| {
                Shape::new(offsets.iter().copied()).expect("standard shapes are valid")
            })
            .collect();
        Self { shapes }
    }

    /// Builds a custom catalog.
    ///
    /// An empty catalog is allowed; sessions built on it are over immediately.
    #[must_use]
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter()
    }

    /// Returns the shape at `index` as a piece tagged by its catalog position.
    #[must_use]
    pub fn piece(&self, index: usize) -> Option<Piece> {
        let shape = self.shapes.get(index)?;
        Some(Piece::new(shape.clone(), tag_for(index)))
    }

    /// Iterates over the catalog as pieces, each tagged by its catalog position.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| Piece::new(shape.clone(), tag_for(index)))
    }
}

fn tag_for(index: usize) -> NonZeroU8 {
    let tag = u8::try_from(index % TAG_COUNT + 1).expect("tag count fits in u8");
    NonZeroU8::new(tag).expect("tags start at 1")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_standard_shapes_are_distinct() {
        let library = ShapeLibrary::standard();
        let distinct = library.iter().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), library.len());
    }

    #[test]
    fn test_standard_shapes_are_normalized() {
        for shape in ShapeLibrary::standard().iter() {
            assert_eq!(&shape.normalized(), shape);
            assert!(shape.cells().any(|(r, _)| r == 0));
            assert!(shape.cells().any(|(_, c)| c == 0));
        }
    }

    #[test]
    fn test_standard_cardinalities() {
        let library = ShapeLibrary::standard();
        let sizes = library
            .iter()
            .map(Shape::cell_count)
            .collect::<HashSet<_>>();
        for size in [1, 2, 3, 4, 5, 6, 8, 9] {
            assert!(sizes.contains(&size), "missing {size}-cell shape");
        }
        assert_eq!(sizes.iter().max(), Some(&9));
    }

    #[test]
    fn test_hollow_square_and_plus_are_present() {
        let library = ShapeLibrary::standard();
        let hollow = Shape::new([
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ])
        .unwrap();
        let plus = Shape::new([(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]).unwrap();
        assert!(library.iter().any(|s| *s == hollow));
        assert!(library.iter().any(|s| *s == plus));
    }

    #[test]
    fn test_piece_tags_cycle() {
        let library = ShapeLibrary::standard();
        assert_eq!(library.piece(TAG_COUNT).unwrap().tag().get(), 1);
        assert_eq!(library.piece(library.len()), None);
        let tags = library
            .pieces()
            .map(|p| p.tag().get())
            .take(TAG_COUNT + 1)
            .collect::<Vec<_>>();
        assert_eq!(tags, [1, 2, 3, 4, 5, 6, 7, 8, 9, 1]);
    }
}
