use crate::bidi_class::BidiClass;
#[cfg(feature = "use_serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn with_level(level: u8) -> Self {
        if level % 2 == 1 {
            Self::RightToLeft
        } else {
            Self::LeftToRight
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::LeftToRight,
        }
    }

    pub fn as_bidi_class(self) -> BidiClass {
        match self {
            Self::RightToLeft => BidiClass::RightToLeft,
            Self::LeftToRight => BidiClass::LeftToRight,
        }
    }

    /// The strong direction of `bc` as seen by rules N0-N2,
    /// where EN and AN count as R.
    pub(crate) fn for_neutrals(bc: BidiClass) -> Option<Self> {
        use crate::bidi_class::BidiFlags;
        if !bc.in_group(BidiFlags::STRONG_FOR_NEUTRALS) {
            None
        } else if bc.in_group(BidiFlags::R_FOR_NEUTRALS) {
            Some(Self::RightToLeft)
        } else {
            Some(Self::LeftToRight)
        }
    }
}
