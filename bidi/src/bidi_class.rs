use crate::error::Error;
use bitflags::bitflags;
#[cfg(feature = "use_serde")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The Bidi_Class property value of a character, as described by BD1.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum BidiClass {
    ArabicLetter,
    ArabicNumber,
    BoundaryNeutral,
    CommonSeparator,
    EuropeanNumber,
    EuropeanSeparator,
    EuropeanTerminator,
    FirstStrongIsolate,
    LeftToRight,
    LeftToRightEmbedding,
    LeftToRightIsolate,
    LeftToRightOverride,
    NonspacingMark,
    OtherNeutral,
    ParagraphSeparator,
    PopDirectionalFormat,
    PopDirectionalIsolate,
    RightToLeft,
    RightToLeftEmbedding,
    RightToLeftIsolate,
    RightToLeftOverride,
    SegmentSeparator,
    WhiteSpace,
}

bitflags! {
    /// One bit per `BidiClass`, so that the rules can test a type
    /// against a whole group of types at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
    pub struct BidiFlags: u32 {
        const L = 1 << 0;
        const R = 1 << 1;
        const AL = 1 << 2;
        const EN = 1 << 3;
        const ES = 1 << 4;
        const ET = 1 << 5;
        const AN = 1 << 6;
        const CS = 1 << 7;
        const NSM = 1 << 8;
        const BN = 1 << 9;
        const B = 1 << 10;
        const S = 1 << 11;
        const WS = 1 << 12;
        const ON = 1 << 13;
        const LRE = 1 << 14;
        const LRO = 1 << 15;
        const RLE = 1 << 16;
        const RLO = 1 << 17;
        const PDF = 1 << 18;
        const LRI = 1 << 19;
        const RLI = 1 << 20;
        const FSI = 1 << 21;
        const PDI = 1 << 22;

        const STRONG = Self::L.bits() | Self::R.bits() | Self::AL.bits();
        const ISOLATE_INIT = Self::LRI.bits() | Self::RLI.bits() | Self::FSI.bits();
        const ISOLATE_CONTROL = Self::ISOLATE_INIT.bits() | Self::PDI.bits();
        /// Neutral and isolate formatting characters (NI)
        const NEUTRAL_ISOLATE = Self::B.bits()
            | Self::S.bits()
            | Self::WS.bits()
            | Self::ON.bits()
            | Self::ISOLATE_CONTROL.bits();
        /// Characters that X9 would remove.  They are kept in place
        /// and skipped over instead, as suggested by section 5.2.
        const BN_LIKE = Self::BN.bits()
            | Self::LRE.bits()
            | Self::RLE.bits()
            | Self::LRO.bits()
            | Self::RLO.bits()
            | Self::PDF.bits();
        /// EN and AN are treated as R by the N rules
        const R_FOR_NEUTRALS = Self::R.bits() | Self::EN.bits() | Self::AN.bits();
        /// The classes that bound a neutral run for N0-N2
        const STRONG_FOR_NEUTRALS = Self::R_FOR_NEUTRALS.bits() | Self::L.bits();
        /// Original types that L1 resets at the end of a line
        const TRAILING_WHITESPACE = Self::S.bits()
            | Self::WS.bits()
            | Self::B.bits()
            | Self::ISOLATE_CONTROL.bits()
            | Self::BN_LIKE.bits();
    }
}

impl BidiClass {
    pub fn flag(self) -> BidiFlags {
        match self {
            BidiClass::ArabicLetter => BidiFlags::AL,
            BidiClass::ArabicNumber => BidiFlags::AN,
            BidiClass::BoundaryNeutral => BidiFlags::BN,
            BidiClass::CommonSeparator => BidiFlags::CS,
            BidiClass::EuropeanNumber => BidiFlags::EN,
            BidiClass::EuropeanSeparator => BidiFlags::ES,
            BidiClass::EuropeanTerminator => BidiFlags::ET,
            BidiClass::FirstStrongIsolate => BidiFlags::FSI,
            BidiClass::LeftToRight => BidiFlags::L,
            BidiClass::LeftToRightEmbedding => BidiFlags::LRE,
            BidiClass::LeftToRightIsolate => BidiFlags::LRI,
            BidiClass::LeftToRightOverride => BidiFlags::LRO,
            BidiClass::NonspacingMark => BidiFlags::NSM,
            BidiClass::OtherNeutral => BidiFlags::ON,
            BidiClass::ParagraphSeparator => BidiFlags::B,
            BidiClass::PopDirectionalFormat => BidiFlags::PDF,
            BidiClass::PopDirectionalIsolate => BidiFlags::PDI,
            BidiClass::RightToLeft => BidiFlags::R,
            BidiClass::RightToLeftEmbedding => BidiFlags::RLE,
            BidiClass::RightToLeftIsolate => BidiFlags::RLI,
            BidiClass::RightToLeftOverride => BidiFlags::RLO,
            BidiClass::SegmentSeparator => BidiFlags::S,
            BidiClass::WhiteSpace => BidiFlags::WS,
        }
    }

    /// Returns true if this class is a member of `group`
    pub fn in_group(self, group: BidiFlags) -> bool {
        group.intersects(self.flag())
    }

    pub fn is_iso_init(self) -> bool {
        self.in_group(BidiFlags::ISOLATE_INIT)
    }

    pub fn is_iso_control(self) -> bool {
        self.in_group(BidiFlags::ISOLATE_CONTROL)
    }

    pub fn is_neutral(self) -> bool {
        self.in_group(BidiFlags::NEUTRAL_ISOLATE)
    }

    pub fn is_strong(self) -> bool {
        self.in_group(BidiFlags::STRONG)
    }

    /// True for the classes that rule X9 removes from the text
    pub fn is_removed_by_x9(self) -> bool {
        self.in_group(BidiFlags::BN_LIKE)
    }

    /// The short property value alias used by the UCD data files
    pub fn short_name(self) -> &'static str {
        match self {
            BidiClass::ArabicLetter => "AL",
            BidiClass::ArabicNumber => "AN",
            BidiClass::BoundaryNeutral => "BN",
            BidiClass::CommonSeparator => "CS",
            BidiClass::EuropeanNumber => "EN",
            BidiClass::EuropeanSeparator => "ES",
            BidiClass::EuropeanTerminator => "ET",
            BidiClass::FirstStrongIsolate => "FSI",
            BidiClass::LeftToRight => "L",
            BidiClass::LeftToRightEmbedding => "LRE",
            BidiClass::LeftToRightIsolate => "LRI",
            BidiClass::LeftToRightOverride => "LRO",
            BidiClass::NonspacingMark => "NSM",
            BidiClass::OtherNeutral => "ON",
            BidiClass::ParagraphSeparator => "B",
            BidiClass::PopDirectionalFormat => "PDF",
            BidiClass::PopDirectionalIsolate => "PDI",
            BidiClass::RightToLeft => "R",
            BidiClass::RightToLeftEmbedding => "RLE",
            BidiClass::RightToLeftIsolate => "RLI",
            BidiClass::RightToLeftOverride => "RLO",
            BidiClass::SegmentSeparator => "S",
            BidiClass::WhiteSpace => "WS",
        }
    }
}

impl FromStr for BidiClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(match s {
            "AL" => BidiClass::ArabicLetter,
            "AN" => BidiClass::ArabicNumber,
            "BN" => BidiClass::BoundaryNeutral,
            "CS" => BidiClass::CommonSeparator,
            "EN" => BidiClass::EuropeanNumber,
            "ES" => BidiClass::EuropeanSeparator,
            "ET" => BidiClass::EuropeanTerminator,
            "FSI" => BidiClass::FirstStrongIsolate,
            "L" => BidiClass::LeftToRight,
            "LRO" => BidiClass::LeftToRightOverride,
            "LRE" => BidiClass::LeftToRightEmbedding,
            "LRI" => BidiClass::LeftToRightIsolate,
            "NSM" => BidiClass::NonspacingMark,
            "ON" => BidiClass::OtherNeutral,
            "B" => BidiClass::ParagraphSeparator,
            "PDF" => BidiClass::PopDirectionalFormat,
            "PDI" => BidiClass::PopDirectionalIsolate,
            "R" => BidiClass::RightToLeft,
            "RLE" => BidiClass::RightToLeftEmbedding,
            "RLI" => BidiClass::RightToLeftIsolate,
            "RLO" => BidiClass::RightToLeftOverride,
            "S" => BidiClass::SegmentSeparator,
            "WS" => BidiClass::WhiteSpace,
            bad => return Err(Error::InvalidBidiClass(bad.to_string())),
        })
    }
}

impl From<unicode_bidi::BidiClass> for BidiClass {
    fn from(bc: unicode_bidi::BidiClass) -> Self {
        use unicode_bidi::BidiClass as Ucd;
        match bc {
            Ucd::AL => BidiClass::ArabicLetter,
            Ucd::AN => BidiClass::ArabicNumber,
            Ucd::B => BidiClass::ParagraphSeparator,
            Ucd::BN => BidiClass::BoundaryNeutral,
            Ucd::CS => BidiClass::CommonSeparator,
            Ucd::EN => BidiClass::EuropeanNumber,
            Ucd::ES => BidiClass::EuropeanSeparator,
            Ucd::ET => BidiClass::EuropeanTerminator,
            Ucd::FSI => BidiClass::FirstStrongIsolate,
            Ucd::L => BidiClass::LeftToRight,
            Ucd::LRE => BidiClass::LeftToRightEmbedding,
            Ucd::LRI => BidiClass::LeftToRightIsolate,
            Ucd::LRO => BidiClass::LeftToRightOverride,
            Ucd::NSM => BidiClass::NonspacingMark,
            Ucd::ON => BidiClass::OtherNeutral,
            Ucd::PDF => BidiClass::PopDirectionalFormat,
            Ucd::PDI => BidiClass::PopDirectionalIsolate,
            Ucd::R => BidiClass::RightToLeft,
            Ucd::RLE => BidiClass::RightToLeftEmbedding,
            Ucd::RLI => BidiClass::RightToLeftIsolate,
            Ucd::RLO => BidiClass::RightToLeftOverride,
            Ucd::S => BidiClass::SegmentSeparator,
            Ucd::WS => BidiClass::WhiteSpace,
        }
    }
}

/// BD1: The bidirectional character types are values assigned to each
/// Unicode character, including unassigned characters.
/// The lookup is backed by the UCD tables compiled into `unicode-bidi`.
pub fn bidi_class_for_char(c: char) -> BidiClass {
    unicode_bidi::bidi_class(c).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use k9::assert_equal as assert_eq;

    #[test]
    fn bidi_class_resolve() {
        assert_eq!(bidi_class_for_char('\u{0}'), BidiClass::BoundaryNeutral);
        assert_eq!(bidi_class_for_char('\u{9}'), BidiClass::SegmentSeparator);
        assert_eq!(bidi_class_for_char('\n'), BidiClass::ParagraphSeparator);
        assert_eq!(bidi_class_for_char(' '), BidiClass::WhiteSpace);
        assert_eq!(bidi_class_for_char('a'), BidiClass::LeftToRight);
        assert_eq!(bidi_class_for_char('1'), BidiClass::EuropeanNumber);
        assert_eq!(bidi_class_for_char('\u{5d0}'), BidiClass::RightToLeft);
        assert_eq!(bidi_class_for_char('\u{627}'), BidiClass::ArabicLetter);
        assert_eq!(bidi_class_for_char('\u{660}'), BidiClass::ArabicNumber);
        assert_eq!(bidi_class_for_char('\u{300}'), BidiClass::NonspacingMark);
        assert_eq!(bidi_class_for_char('\u{2066}'), BidiClass::LeftToRightIsolate);
        assert_eq!(bidi_class_for_char('\u{2069}'), BidiClass::PopDirectionalIsolate);
    }

    #[test]
    fn groups() {
        assert!(BidiClass::ArabicLetter.is_strong());
        assert!(!BidiClass::EuropeanNumber.is_strong());
        assert!(BidiClass::FirstStrongIsolate.is_iso_init());
        assert!(!BidiClass::PopDirectionalIsolate.is_iso_init());
        assert!(BidiClass::PopDirectionalIsolate.is_neutral());
        assert!(BidiClass::PopDirectionalFormat.is_removed_by_x9());
        assert!(BidiClass::BoundaryNeutral.is_removed_by_x9());
        assert!(!BidiClass::PopDirectionalIsolate.is_removed_by_x9());
        assert!(BidiClass::ArabicNumber.in_group(BidiFlags::R_FOR_NEUTRALS));
        assert!(!BidiClass::ArabicLetter.in_group(BidiFlags::R_FOR_NEUTRALS));
    }

    #[test]
    fn short_names() {
        for name in [
            "AL", "AN", "B", "BN", "CS", "EN", "ES", "ET", "FSI", "L", "LRE", "LRI", "LRO",
            "NSM", "ON", "PDF", "PDI", "R", "RLE", "RLI", "RLO", "S", "WS",
        ] {
            let bc: BidiClass = name.parse().unwrap();
            assert_eq!(bc.short_name(), name);
        }
        assert!("XX".parse::<BidiClass>().is_err());
    }
}
