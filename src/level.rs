//! Level progression.
//!
//! Each level raises the division count, capping at 5×5. After the last
//! level the game starts over at level 1 with a new image.

/// Number of levels before the game wraps around.
pub const LEVEL_COUNT: u32 = 3;

/// A 1-based game level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(u32);

/// Result of [`Level::next`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Advance {
    /// Level to play next.
    pub level: Level,
    /// True when the last level was finished and play starts over.
    pub wrapped: bool,
}

impl Level {
    pub const FIRST: Self = Self(1);

    /// Level `n`; 0 is treated as level 1.
    pub const fn new(n: u32) -> Self {
        if n == 0 { Self(1) } else { Self(n) }
    }

    pub const fn number(&self) -> u32 {
        self.0
    }

    /// Pieces per row and per column.
    pub const fn divisions(&self) -> u32 {
        match self.0 {
            1 => 3,
            2 => 4,
            _ => 5,
        }
    }

    pub const fn next(&self) -> Advance {
        if self.0 >= LEVEL_COUNT {
            Advance {
                level: Self::FIRST,
                wrapped: true,
            }
        } else {
            Advance {
                level: Self(self.0 + 1),
                wrapped: false,
            }
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::FIRST
    }
}
