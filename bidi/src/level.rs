use crate::bidi_class::BidiClass;
use crate::direction::Direction;
#[cfg(feature = "use_serde")]
use serde::{Deserialize, Serialize};

/// Maximum stack depth; UBA guarantees that it will never increase
/// in later versions of UAX #9.
pub const MAX_DEPTH: u8 = 125;

/// An embedding level.  Even levels are left-to-right,
/// odd levels are right-to-left.
#[derive(Default, Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
pub struct Level(pub u8);

impl Level {
    pub fn direction(self) -> Direction {
        Direction::with_level(self.0)
    }

    pub fn is_rtl(self) -> bool {
        self.0 % 2 == 1
    }

    pub fn as_bidi_class(self) -> BidiClass {
        self.direction().as_bidi_class()
    }

    pub fn max(self, other: Level) -> Level {
        Level(self.0.max(other.0))
    }

    pub(crate) fn least_greater_even(self) -> Option<Level> {
        let level = if self.is_rtl() { self.0 + 1 } else { self.0 + 2 };
        if level > MAX_DEPTH {
            None
        } else {
            Some(Self(level))
        }
    }

    pub(crate) fn least_greater_odd(self) -> Option<Level> {
        let level = if self.is_rtl() { self.0 + 2 } else { self.0 + 1 };
        if level > MAX_DEPTH {
            None
        } else {
            Some(Self(level))
        }
    }
}
