use crate::bidi_brackets;
use crate::bidi_class::{bidi_class_for_char, BidiClass};

/// Supplies the Unicode character data that the algorithm consumes.
///
/// The lookups must be total: every `char` needs a class, and any
/// character that is not a paired bracket simply returns `None`.
/// The bracket methods default to the built-in BidiBrackets.txt data,
/// so most implementations only need to provide `bidi_class`.
pub trait BidiDataSource {
    fn bidi_class(&self, c: char) -> BidiClass;

    fn opening_to_closing(&self, c: char) -> Option<char> {
        bidi_brackets::opening_to_closing(c)
    }

    fn closing_to_opening(&self, c: char) -> Option<char> {
        bidi_brackets::closing_to_opening(c)
    }

    fn canonical_bracket(&self, c: char) -> char {
        bidi_brackets::canonical_bracket(c)
    }
}

/// The data compiled into this crate
#[derive(Debug, Default, Clone, Copy)]
pub struct HardcodedBidiData;

impl BidiDataSource for HardcodedBidiData {
    fn bidi_class(&self, c: char) -> BidiClass {
        bidi_class_for_char(c)
    }
}
