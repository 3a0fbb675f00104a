use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// A shape offered to the player, together with the tag written into the board
/// when it is placed.
///
/// The tag has no meaning to the engine beyond marking cells as occupied; front
/// ends typically map it to a colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    shape: Shape,
    tag: NonZeroU8,
}

impl Piece {
    #[must_use]
    pub fn new(shape: Shape, tag: NonZeroU8) -> Self {
        Self { shape, tag }
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn tag(&self) -> NonZeroU8 {
        self.tag
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.shape.cell_count()
    }
}
