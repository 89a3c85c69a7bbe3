use crate::bidi_class::{BidiClass, BidiFlags};
use crate::level::Level;
use crate::{BidiContext, Paragraph};

impl BidiContext {
    /// This function runs Rules I1 and I2 together for a paragraph,
    /// then applies the paragraph-wide part of L1.
    ///
    /// I1: on an even level, R goes up one and AN or EN go up two.
    /// I2: on an odd level, L, EN and AN go up one.
    ///
    /// Characters that were removed by X9 take the level of the
    /// character before them (or the paragraph level) so that they
    /// don't split runs.
    ///
    /// Whenever a segment separator, paragraph separator or the end of
    /// the paragraph is reached, the whitespace and isolate formatting
    /// characters leading up to it are reset to the paragraph level.
    pub(crate) fn resolve_implicit_levels(&mut self, paragraph: &Paragraph) {
        let range = paragraph.range.clone();
        for idx in range.clone() {
            let bc = self.char_types[idx];
            let level = self.levels[idx];

            if level.is_rtl() {
                // I2
                if bc.in_group(BidiFlags::L | BidiFlags::EN | BidiFlags::AN) {
                    self.levels[idx] = Level(level.0 + 1);
                }
            } else {
                // I1
                match bc {
                    BidiClass::RightToLeft => self.levels[idx] = Level(level.0 + 1),
                    BidiClass::ArabicNumber | BidiClass::EuropeanNumber => {
                        self.levels[idx] = Level(level.0 + 2)
                    }
                    _ => {}
                }
            }

            if bc.is_removed_by_x9() {
                self.levels[idx] = if idx > range.start {
                    self.levels[idx - 1]
                } else {
                    paragraph.base_level
                };
            }

            let orig = self.orig_char_types[idx];
            if idx + 1 == range.end
                || orig == BidiClass::SegmentSeparator
                || orig == BidiClass::ParagraphSeparator
            {
                // L1
                for back in (range.start..=idx).rev() {
                    if !self.orig_char_types[back].in_group(BidiFlags::TRAILING_WHITESPACE) {
                        break;
                    }
                    self.levels[back] = paragraph.base_level;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use k9::assert_equal as assert_eq;

    fn implicit_levels(types: &str, hint: ParagraphDirectionHint) -> Vec<u8> {
        let mut context = BidiContext::new();
        context.orig_char_types = types.split_whitespace().map(|c| c.parse().unwrap()).collect();
        context.char_types = context.orig_char_types.clone();
        context.explicit_embedding_levels(hint);
        let paragraph = context.paragraphs[0].clone();
        context.resolve_implicit_levels(&paragraph);
        context.levels.iter().map(|l| l.0).collect()
    }

    #[test]
    fn i1_i2() {
        assert_eq!(
            implicit_levels("L R AN EN", ParagraphDirectionHint::LeftToRight),
            vec![0, 1, 2, 2]
        );
        assert_eq!(
            implicit_levels("L R AN EN", ParagraphDirectionHint::RightToLeft),
            vec![2, 1, 2, 2]
        );
    }

    #[test]
    fn removed_characters_follow_previous_level() {
        assert_eq!(
            implicit_levels("R BN L", ParagraphDirectionHint::LeftToRight),
            vec![1, 1, 0]
        );
        assert_eq!(
            implicit_levels("BN R", ParagraphDirectionHint::RightToLeft),
            vec![1, 1]
        );
    }

    #[test]
    fn trailing_whitespace_reset() {
        assert_eq!(
            implicit_levels("R WS WS", ParagraphDirectionHint::LeftToRight),
            vec![1, 0, 0]
        );
        assert_eq!(
            implicit_levels("L WS S L WS L", ParagraphDirectionHint::RightToLeft),
            vec![2, 1, 1, 2, 1, 2]
        );
    }
}
