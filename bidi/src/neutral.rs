use crate::direction::Direction;
use crate::sequence::IsolatingRunSequence;
use crate::BidiContext;
use log::trace;

impl BidiContext {
    /// This is the method for Rules N1 and N2.
    ///
    /// A sequence of neutrals (NI, together with any adjacent characters
    /// that were removed by X9) takes the direction of the surrounding
    /// strong text if both sides agree, with EN and AN counting as R
    /// and sos/eos standing in at the sequence boundaries:
    ///
    /// L N L --> L L L
    /// R N R --> R R R
    ///
    /// Otherwise each neutral takes the embedding direction implied
    /// by its own level.
    pub(crate) fn resolve_neutrals(&mut self, iso_runs: &[IsolatingRunSequence]) {
        for iso_run in iso_runs {
            let indices = &iso_run.indices;
            let mut ridx = 0;
            while ridx < indices.len() {
                if !self.char_types[indices[ridx]].is_neutral() {
                    ridx += 1;
                    continue;
                }

                let mut run_start = ridx;
                while run_start > 0 && self.char_types[indices[run_start - 1]].is_removed_by_x9() {
                    run_start -= 1;
                }
                let mut run_end = ridx;
                while run_end + 1 < indices.len() {
                    let bc = self.char_types[indices[run_end + 1]];
                    if !bc.is_neutral() && !bc.is_removed_by_x9() {
                        break;
                    }
                    run_end += 1;
                }

                let prior = match run_start.checked_sub(1) {
                    Some(p) => self.neutral_context(self.char_types[indices[p]]),
                    None => self.neutral_context(iso_run.sos),
                };
                let following = match indices.get(run_end + 1) {
                    Some(&f) => self.neutral_context(self.char_types[f]),
                    None => self.neutral_context(iso_run.eos),
                };

                trace!(
                    "neutral run ridx={}..={} prior={:?} following={:?}",
                    run_start,
                    run_end,
                    prior,
                    following
                );

                for &cidx in &indices[run_start..=run_end] {
                    let direction = if prior == following {
                        // N1
                        prior
                    } else {
                        // N2
                        self.levels[cidx].direction()
                    };
                    self.char_types[cidx] = direction.as_bidi_class();
                }

                ridx = run_end + 1;
            }
        }
    }

    /// The direction that a character on the edge of a neutral run
    /// contributes to N1
    fn neutral_context(&self, bc: crate::BidiClass) -> Direction {
        Direction::for_neutrals(bc).unwrap_or(Direction::LeftToRight)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use k9::assert_equal as assert_eq;

    fn neutral_types(types: &str, hint: ParagraphDirectionHint) -> Vec<&'static str> {
        let mut context = BidiContext::new();
        context.orig_char_types = types.split_whitespace().map(|c| c.parse().unwrap()).collect();
        context.char_types = context.orig_char_types.clone();
        context.explicit_embedding_levels(hint);
        let paragraph = context.paragraphs[0].clone();
        let iso_runs = context.identify_isolating_run_sequences(&paragraph);
        context.resolve_neutrals(&iso_runs);
        context.char_types.iter().map(|bc| bc.short_name()).collect()
    }

    #[test]
    fn n1_agreeing_context() {
        assert_eq!(
            neutral_types("R WS ON R", ParagraphDirectionHint::LeftToRight),
            vec!["R", "R", "R", "R"]
        );
        assert_eq!(
            neutral_types("AN ON EN", ParagraphDirectionHint::LeftToRight),
            vec!["AN", "R", "EN"]
        );
        assert_eq!(
            neutral_types("ON L", ParagraphDirectionHint::LeftToRight),
            vec!["L", "L"]
        );
    }

    #[test]
    fn n2_embedding_direction() {
        assert_eq!(
            neutral_types("R ON L", ParagraphDirectionHint::LeftToRight),
            vec!["R", "L", "L"]
        );
        assert_eq!(
            neutral_types("R ON L", ParagraphDirectionHint::RightToLeft),
            vec!["R", "R", "L"]
        );
    }

    #[test]
    fn run_absorbs_removed_characters() {
        assert_eq!(
            neutral_types("R BN ON BN R", ParagraphDirectionHint::LeftToRight),
            vec!["R", "R", "R", "R", "R"]
        );
    }
}
