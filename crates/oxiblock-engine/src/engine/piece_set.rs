use std::{fmt::Write as _, mem};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Piece, ShapeLibrary, ShapeSetKey};

use super::SessionConfig;

/// Supplies the pieces offered to the player, a set at a time.
///
/// # Set Generation
///
/// A set of `set_size` pieces is drawn from the [`ShapeLibrary`] without
/// replacement, so a shape appears at most once per set. Pieces are consumed one
/// by one; taking the last one draws the next set.
///
/// A new set must not repeat the set it replaces. Sets are compared ignoring
/// order (see [`ShapeSetKey`]). A repeating draw is redrawn up to
/// `redraw_limit` times; if every redraw repeats too, the last draw is kept so
/// the game can always continue.
///
/// # Example
///
/// ```
/// use oxiblock_engine::{PieceSet, SessionConfig, ShapeLibrary};
///
/// let mut set = PieceSet::new(ShapeLibrary::standard(), SessionConfig::default());
/// assert_eq!(set.len(), 3);
///
/// let first = set.take(0).unwrap();
/// assert_eq!(set.len(), 2);
///
/// // Consuming the rest draws a fresh set.
/// set.take(0);
/// set.take(0);
/// assert_eq!(set.len(), 3);
/// assert!(set.previous_set().contains(&first));
/// ```
#[derive(Debug, Clone)]
pub struct PieceSet {
    rng: Pcg32,
    seed: PieceSeed,
    library: ShapeLibrary,
    config: SessionConfig,
    drawn: Vec<Piece>,
    active: Vec<Piece>,
    previous: Vec<Piece>,
    last_draw: DrawReport,
}

/// How the most recent set was obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawReport {
    /// Number of redraws caused by repeating the previous set.
    pub redraws: usize,
    /// Whether the set was accepted although it repeats the previous set.
    pub accepted_repeat: bool,
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed for the piece-set random number generator.
/// The same seed produces the same sequence of sets, enabling reproducible
/// sessions and deterministic tests.
///
/// # Example
///
/// ```
/// use oxiblock_engine::{GameSession, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let session1 = GameSession::with_seed(seed);
/// let session2 = GameSession::with_seed(seed);
/// assert_eq!(session1.pieces(), session2.pieces());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    #[must_use]
    pub const fn to_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Parses a 32-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, String> {
        if hex_str.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            ));
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|e| format!("invalid hex: {hex_str} ({e})"))?;
        Ok(Self::from_u128(num))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{:032x}", self.to_u128())
            .expect("writing to a String cannot fail");
        hex_str
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceSet {
    /// Creates a piece set with a random seed and draws the first set.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new(library: ShapeLibrary, config: SessionConfig) -> Self {
        Self::with_seed(library, config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(library: ShapeLibrary, config: SessionConfig, seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            seed,
            library,
            config,
            drawn: Vec::with_capacity(config.set_size),
            active: Vec::with_capacity(config.set_size),
            previous: Vec::new(),
            last_draw: DrawReport::default(),
        };
        this.replenish();
        this
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    #[must_use]
    pub fn library(&self) -> &ShapeLibrary {
        &self.library
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Pieces still available in the current set, in offer order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.active
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.active.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// The current set as it was drawn, including pieces already taken.
    #[must_use]
    pub fn current_set(&self) -> &[Piece] {
        &self.drawn
    }

    /// The set that was fully consumed before the current one.
    #[must_use]
    pub fn previous_set(&self) -> &[Piece] {
        &self.previous
    }

    #[must_use]
    pub fn last_draw(&self) -> DrawReport {
        self.last_draw
    }

    /// Removes and returns the piece at `index`.
    ///
    /// Later pieces shift down by one. Taking the last piece draws a new set.
    pub fn take(&mut self, index: usize) -> Option<Piece> {
        if index >= self.active.len() {
            return None;
        }
        let piece = self.active.remove(index);
        if self.active.is_empty() {
            self.replenish();
        }
        Some(piece)
    }

    /// Forgets the current and previous sets and draws a fresh set.
    ///
    /// The random number generator is not re-seeded.
    pub fn reset(&mut self) {
        self.drawn.clear();
        self.active.clear();
        self.previous.clear();
        self.replenish();
    }

    fn replenish(&mut self) {
        self.previous = mem::take(&mut self.drawn);
        let previous_key = ShapeSetKey::new(self.previous.iter().map(Piece::shape));

        let mut report = DrawReport::default();
        let mut candidate = self.draw();
        while !previous_key.is_empty()
            && ShapeSetKey::new(candidate.iter().map(Piece::shape)) == previous_key
        {
            if report.redraws == self.config.redraw_limit {
                tracing::warn!(
                    redraws = report.redraws,
                    "new piece set repeats the previous set; accepting it"
                );
                report.accepted_repeat = true;
                break;
            }
            candidate = self.draw();
            report.redraws += 1;
        }

        tracing::debug!(
            pieces = candidate.len(),
            redraws = report.redraws,
            "drew piece set"
        );
        self.last_draw = report;
        self.active.clone_from(&candidate);
        self.drawn = candidate;
    }

    /// Draws up to `set_size` pieces without replacement.
    fn draw(&mut self) -> Vec<Piece> {
        let mut working = self.library.pieces().collect::<Vec<_>>();
        let count = self.config.set_size.min(working.len());
        (0..count)
            .map(|_| {
                let i = self.rng.random_range(0..working.len());
                working.swap_remove(i)
            })
            .collect()
    }
}
