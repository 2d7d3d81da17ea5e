//! The fixed opacity table.

/// Alpha bytes indexed by opacity level. Level 0 is fully opaque; the
/// rest step from roughly 40% up to roughly 93%.
pub const ALPHA_MAP: [u8; 11] = [255, 102, 117, 132, 147, 162, 178, 193, 208, 223, 238];

/// An index into [`ALPHA_MAP`], always in `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaLevel(u8);

impl AlphaLevel {
    /// The highest valid level.
    pub const MAX: u8 = (ALPHA_MAP.len() - 1) as u8;

    /// Returns the level, or `None` if it is outside `0..=10`.
    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(Self(level))
    }

    /// Builds a level from a compiled-in constant.
    ///
    /// Out-of-range input is a programming error and fails at compile
    /// time when used in a const context.
    pub(crate) const fn fixed(level: u8) -> Self {
        assert!(level <= Self::MAX, "alpha level out of range");
        Self(level)
    }

    /// Returns the level index.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Returns the alpha byte this level programs.
    pub fn alpha(self) -> u8 {
        ALPHA_MAP[usize::from(self.0)]
    }
}
