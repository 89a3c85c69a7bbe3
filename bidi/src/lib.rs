//! Resolution of embedding levels for bidirectional text, following
//! the Unicode Bidirectional Algorithm <http://unicode.org/reports/tr9/>
//! up to and including the paragraph-wide portion of rule L1.
//!
//! ```
//! use bidi_levels::{BidiContext, ParagraphDirectionHint};
//!
//! let text: Vec<char> = "abc \u{5d0}\u{5d1}\u{5d2}".chars().collect();
//! let mut context = BidiContext::new();
//! context.resolve(&text, ParagraphDirectionHint::AutoLeftToRight);
//! assert_eq!(context.base_level().0, 0);
//! ```
use log::trace;
use std::ops::Range;
use std::str::FromStr;

mod bidi_brackets;
mod bidi_class;
mod bracket_pairs;
mod data_source;
mod direction;
mod error;
mod explicit;
mod implicit;
mod level;
mod level_stack;
mod neutral;
mod runs;
mod sequence;
mod weak;

pub use bidi_brackets::{canonical_bracket, closing_to_opening, opening_to_closing};
pub use bidi_class::{bidi_class_for_char, BidiClass, BidiFlags};
pub use data_source::{BidiDataSource, HardcodedBidiData};
pub use direction::Direction;
pub use error::Error;
pub use explicit::IsolatePairs;
pub use level::{Level, MAX_DEPTH};
pub use runs::{BidiRun, LineLevels};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "use_serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParagraphDirectionHint {
    LeftToRight,
    RightToLeft,
    /// Attempt to auto-detect but fall back to LTR
    AutoLeftToRight,
    /// Attempt to auto-detect but fall back to RTL
    AutoRightToLeft,
}

impl Default for ParagraphDirectionHint {
    fn default() -> Self {
        Self::AutoLeftToRight
    }
}

impl ParagraphDirectionHint {
    /// Returns just the direction portion of the hint, independent
    /// of the auto-detection state.
    pub fn direction(self) -> Direction {
        match self {
            ParagraphDirectionHint::AutoLeftToRight | ParagraphDirectionHint::LeftToRight => {
                Direction::LeftToRight
            }
            ParagraphDirectionHint::AutoRightToLeft | ParagraphDirectionHint::RightToLeft => {
                Direction::RightToLeft
            }
        }
    }
}

impl FromStr for ParagraphDirectionHint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "ltr" => Ok(Self::LeftToRight),
            "rtl" => Ok(Self::RightToLeft),
            "auto" | "auto-ltr" => Ok(Self::AutoLeftToRight),
            "auto-rtl" => Ok(Self::AutoRightToLeft),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

/// A paragraph within the resolved text.  The range includes the
/// paragraph separator that terminates it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub range: Range<usize>,
    pub base_level: Level,
}

#[derive(Debug, Default)]
pub struct BidiContext {
    orig_char_types: Vec<BidiClass>,
    char_types: Vec<BidiClass>,
    levels: Vec<Level>,
    paragraphs: Vec<Paragraph>,
    isolate_pairs: IsolatePairs,
}

impl BidiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The base level of the first paragraph, or 0 if the
    /// text was empty
    pub fn base_level(&self) -> Level {
        self.paragraphs
            .first()
            .map(|p| p.base_level)
            .unwrap_or_default()
    }

    /// The resolved embedding level of each character
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn isolate_pairs(&self) -> &IsolatePairs {
        &self.isolate_pairs
    }

    /// The class of each character after the weak and neutral rules
    /// were applied
    pub fn resolved_char_types(&self) -> &[BidiClass] {
        &self.char_types
    }

    /// <http://unicode.org/reports/tr9/>
    ///
    /// The text may hold several paragraphs, separated by characters
    /// of class B; each one gets its own base level.
    pub fn resolve(&mut self, text: &[char], hint: ParagraphDirectionHint) {
        self.resolve_with_data_source(text, hint, &HardcodedBidiData);
    }

    pub fn resolve_with_data_source(
        &mut self,
        text: &[char],
        hint: ParagraphDirectionHint,
        data: &dyn BidiDataSource,
    ) {
        self.populate_char_types(text, data);
        self.resolve_levels(hint, text, data);
    }

    /// BD1: The bidirectional character types are values assigned to each
    /// Unicode character, including unassigned characters
    fn populate_char_types(&mut self, text: &[char], data: &dyn BidiDataSource) {
        self.orig_char_types.clear();
        self.orig_char_types.reserve(text.len());
        self.orig_char_types
            .extend(text.iter().map(|&c| data.bidi_class(c)));
    }

    /// Resolve a sequence that has already been classified.
    /// Bracket pairs are not considered, as there are no code points
    /// to pair up.
    pub fn set_char_types(&mut self, char_types: &[BidiClass], hint: ParagraphDirectionHint) {
        self.orig_char_types.clear();
        self.orig_char_types.extend(char_types);
        self.resolve_levels(hint, &[], &HardcodedBidiData);
    }

    fn resolve_levels(
        &mut self,
        hint: ParagraphDirectionHint,
        text: &[char],
        data: &dyn BidiDataSource,
    ) {
        trace!("\n**** resolve \n");
        self.char_types.clear();
        self.char_types.extend(self.orig_char_types.iter());

        self.dump_state("before X1-X8");
        self.explicit_embedding_levels(hint);

        let paragraphs = self.paragraphs.clone();
        for paragraph in &paragraphs {
            trace!("paragraph {:?}", paragraph);
            let iso_runs = self.identify_isolating_run_sequences(paragraph);

            self.dump_state("before W1");
            self.resolve_combining_marks(&iso_runs); // W1
            self.dump_state("before W2");
            self.resolve_european_numbers(&iso_runs); // W2
            self.dump_state("before W3");
            self.resolve_arabic_letters(&iso_runs); // W3
            self.dump_state("before W4");
            self.resolve_separators(&iso_runs); // W4
            self.dump_state("before W5");
            self.resolve_terminators(&iso_runs); // W5
            self.dump_state("before W6");
            self.resolve_es_cs_et(&iso_runs); // W6
            self.dump_state("before W7");
            self.resolve_en(&iso_runs); // W7

            self.dump_state("before N0");
            self.resolve_paired_brackets(&iso_runs, text, data); // N0

            self.dump_state("before N1, N2");
            self.resolve_neutrals(&iso_runs); // N1, N2

            self.dump_state("before I1, I2");
            self.resolve_implicit_levels(paragraph); // I1, I2, L1
        }
        self.dump_state("resolved");
    }

    fn dump_state(&self, label: &str) {
        trace!("State: {}", label);
        trace!("BidiClass: {:?}", self.char_types);
        trace!("Levels: {:?}", self.levels);
        trace!("");
    }
}

/// Resolve the embedding level of each character of `text`.
///
/// Each value is in the range 0..=MAX_DEPTH+1; the parity gives
/// the direction of the character.
pub fn resolve_embedding_levels(text: &[char], hint: ParagraphDirectionHint) -> Vec<u8> {
    let mut context = BidiContext::new();
    context.resolve(text, hint);
    context.levels().iter().map(|level| level.0).collect()
}

/// Split `text` into user-perceived characters (extended grapheme clusters).
/// This is useful for display, and is independent of level resolution.
pub fn graphemes(text: &str) -> Vec<&str> {
    use unicode_segmentation::UnicodeSegmentation;
    text.graphemes(true).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use k9::assert_equal as assert_eq;

    #[test]
    fn hint_parsing() {
        assert_eq!(
            "ltr".parse::<ParagraphDirectionHint>(),
            Ok(ParagraphDirectionHint::LeftToRight)
        );
        assert_eq!(
            "RTL".parse::<ParagraphDirectionHint>(),
            Ok(ParagraphDirectionHint::RightToLeft)
        );
        assert_eq!(
            "auto".parse::<ParagraphDirectionHint>(),
            Ok(ParagraphDirectionHint::AutoLeftToRight)
        );
        assert_eq!(
            "Auto-RTL".parse::<ParagraphDirectionHint>(),
            Ok(ParagraphDirectionHint::AutoRightToLeft)
        );
        k9::snapshot!(
            "sideways".parse::<ParagraphDirectionHint>(),
            r#"
Err(
    InvalidDirection(
        "sideways",
    ),
)
"#
        );
        assert_eq!(
            ParagraphDirectionHint::default(),
            ParagraphDirectionHint::AutoLeftToRight
        );
        assert_eq!(
            ParagraphDirectionHint::AutoRightToLeft.direction(),
            Direction::RightToLeft
        );
    }

    #[test]
    fn empty() {
        let mut context = BidiContext::new();
        context.resolve(&[], ParagraphDirectionHint::RightToLeft);
        assert!(context.levels().is_empty());
        assert!(context.paragraphs().is_empty());
        assert_eq!(context.base_level(), Level(0));
        assert_eq!(
            resolve_embedding_levels(&[], ParagraphDirectionHint::AutoLeftToRight),
            Vec::<u8>::new()
        );
    }

    #[test]
    fn mixed() {
        let text: Vec<char> = "car \u{5d0}\u{5d1}\u{5d2} 123".chars().collect();
        assert_eq!(
            resolve_embedding_levels(&text, ParagraphDirectionHint::AutoLeftToRight),
            vec![0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2]
        );
    }

    #[test]
    fn arabic_numbers() {
        // ALEF, space, ARABIC-INDIC DIGIT ONE, TWO
        let text = vec!['\u{627}', ' ', '\u{661}', '\u{662}'];
        let mut context = BidiContext::new();
        context.resolve(&text, ParagraphDirectionHint::AutoLeftToRight);
        assert_eq!(context.base_level(), Level(1));
        assert_eq!(context.levels().to_vec(), [1, 1, 2, 2].map(Level).to_vec());
        assert_eq!(
            context.resolved_char_types().to_vec(),
            vec![
                BidiClass::RightToLeft,
                BidiClass::RightToLeft,
                BidiClass::ArabicNumber,
                BidiClass::ArabicNumber,
            ]
        );
    }

    #[test]
    fn context_is_reusable() {
        let mut context = BidiContext::new();
        let text: Vec<char> = "\u{5d0}\u{2067}b\u{2069}\nc".chars().collect();
        context.resolve(&text, ParagraphDirectionHint::AutoLeftToRight);
        assert_eq!(context.paragraphs().len(), 2);
        assert_eq!(context.isolate_pairs().len(), 1);

        context.resolve(&['x'], ParagraphDirectionHint::AutoLeftToRight);
        assert_eq!(context.levels().to_vec(), vec![Level(0)]);
        assert_eq!(context.paragraphs().len(), 1);
        assert!(context.isolate_pairs().is_empty());
    }

    #[test]
    fn custom_data_source() {
        /// Treats ASCII upper case as right-to-left, which is
        /// handy for writing readable tests
        struct UpperIsRtl;
        impl BidiDataSource for UpperIsRtl {
            fn bidi_class(&self, c: char) -> BidiClass {
                if c.is_ascii_uppercase() {
                    BidiClass::RightToLeft
                } else {
                    bidi_class_for_char(c)
                }
            }
        }

        let text: Vec<char> = "ab (CD) ef".chars().collect();
        let mut context = BidiContext::new();
        context.resolve_with_data_source(&text, ParagraphDirectionHint::LeftToRight, &UpperIsRtl);
        assert_eq!(
            context.levels().iter().map(|l| l.0).collect::<Vec<_>>(),
            vec![0, 0, 0, 0, 1, 1, 0, 0, 0, 0]
        );
    }

    #[test]
    fn graphemes_cluster() {
        assert_eq!(graphemes("a\u{301}b"), vec!["a\u{301}", "b"]);
        assert_eq!(graphemes("\r\n\u{5d0}"), vec!["\r\n", "\u{5d0}"]);
    }
}
