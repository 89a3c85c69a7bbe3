use crate::bidi_class::{BidiClass, BidiFlags};
use crate::sequence::IsolatingRunSequence;
use crate::BidiContext;

impl BidiContext {
    /// The class of the nearest character before `ridx` in the sequence
    /// that was not removed by X9
    fn prior_class(&self, ridx: usize, indices: &[usize]) -> Option<BidiClass> {
        indices[..ridx]
            .iter()
            .rev()
            .map(|&idx| self.char_types[idx])
            .find(|bc| !bc.is_removed_by_x9())
    }

    /// The class of the nearest character after `ridx` in the sequence
    /// that was not removed by X9
    fn following_class(&self, ridx: usize, indices: &[usize]) -> Option<BidiClass> {
        indices[ridx + 1..]
            .iter()
            .map(|&idx| self.char_types[idx])
            .find(|bc| !bc.is_removed_by_x9())
    }

    /// Changes the class of the characters that were removed by X9 and
    /// are adjacent to `ridx` (on both sides) to `bc`
    fn set_adjacent_removed(&mut self, ridx: usize, indices: &[usize], bc: BidiClass) {
        for &idx in indices[..ridx].iter().rev() {
            if !self.char_types[idx].is_removed_by_x9() {
                break;
            }
            self.char_types[idx] = bc;
        }
        for &idx in &indices[ridx + 1..] {
            if !self.char_types[idx].is_removed_by_x9() {
                break;
            }
            self.char_types[idx] = bc;
        }
    }

    /// This is the method for Rule W1.
    ///
    /// For characters of bc=NSM, change the Bidi_Class value to that of
    /// the preceding character, or to ON if the preceding character is
    /// an isolate initiator or PDI.  Characters removed by X9 are skipped
    /// over in this calculation.
    ///
    /// If a bc=NSM character occurs at the start of a sequence, it is given
    /// the Bidi_Class of sos.
    pub(crate) fn resolve_combining_marks(&mut self, iso_runs: &[IsolatingRunSequence]) {
        for iso_run in iso_runs {
            for (ridx, &idx) in iso_run.indices.iter().enumerate() {
                if self.char_types[idx] != BidiClass::NonspacingMark {
                    continue;
                }
                let prior_bc = self
                    .prior_class(ridx, &iso_run.indices)
                    .unwrap_or(iso_run.sos);
                self.char_types[idx] = if prior_bc.is_iso_control() {
                    BidiClass::OtherNeutral
                } else {
                    prior_bc
                };
            }
        }
    }

    /// This is the method for Rule W2.
    ///
    /// For characters of bc=EN, scan back to find the first
    /// character of strong type (or sos). If the strong type is bc=AL,
    /// change the Bidi_Class EN to AN.
    pub(crate) fn resolve_european_numbers(&mut self, iso_runs: &[IsolatingRunSequence]) {
        for iso_run in iso_runs {
            for (ridx, &cidx) in iso_run.indices.iter().enumerate() {
                if self.char_types[cidx] != BidiClass::EuropeanNumber {
                    continue;
                }
                let first_strong_bc = iso_run.indices[..ridx]
                    .iter()
                    .rev()
                    .map(|&pidx| self.char_types[pidx])
                    .find(|bc| bc.is_strong())
                    .unwrap_or(iso_run.sos);

                if first_strong_bc == BidiClass::ArabicLetter {
                    self.char_types[cidx] = BidiClass::ArabicNumber;
                }
            }
        }
    }

    /// This is the method for Rule W3.
    ///
    /// For characters of bc=AL, change the Bidi_Class value to R.
    pub(crate) fn resolve_arabic_letters(&mut self, iso_runs: &[IsolatingRunSequence]) {
        for iso_run in iso_runs {
            for &idx in &iso_run.indices {
                if self.char_types[idx] == BidiClass::ArabicLetter {
                    self.char_types[idx] = BidiClass::RightToLeft;
                }
            }
        }
    }

    /// This is the method for Rule W4.
    ///
    /// For characters of bc=ES, check if they are *between* EN.
    /// If so, change their Bidi_Class to EN.
    ///
    /// For characters of bc=CS, check if they are *between* EN
    /// or between AN. If so, change their Bidi_Class to match.
    pub(crate) fn resolve_separators(&mut self, iso_runs: &[IsolatingRunSequence]) {
        for iso_run in iso_runs {
            for (ridx, &idx) in iso_run.indices.iter().enumerate() {
                let bc = self.char_types[idx];
                let allowed = match bc {
                    BidiClass::EuropeanSeparator => BidiFlags::EN,
                    BidiClass::CommonSeparator => BidiFlags::EN | BidiFlags::AN,
                    _ => continue,
                };
                let prior = self.prior_class(ridx, &iso_run.indices);
                let following = self.following_class(ridx, &iso_run.indices);
                if let (Some(prior), Some(following)) = (prior, following) {
                    if prior == following && prior.in_group(allowed) {
                        self.char_types[idx] = prior;
                    }
                }
            }
        }
    }

    /// This is the method for Rule W5.
    ///
    /// For characters of bc=ET, check if they are *next to* EN.
    /// If so, change their Bidi_Class to EN. This includes
    /// ET on either side of EN, so the context on both sides
    /// needs to be checked.
    ///
    /// The strategy taken here is to seek for EN first, then scan
    /// outwards in both directions, changing any ET (and any character
    /// removed by X9 along the way) to EN.
    pub(crate) fn resolve_terminators(&mut self, iso_runs: &[IsolatingRunSequence]) {
        let et_or_removed = BidiFlags::ET | BidiFlags::BN_LIKE;
        for iso_run in iso_runs {
            for (ridx, &idx) in iso_run.indices.iter().enumerate() {
                if self.char_types[idx] != BidiClass::EuropeanNumber {
                    continue;
                }
                for &prior_idx in iso_run.indices[..ridx].iter().rev() {
                    if !self.char_types[prior_idx].in_group(et_or_removed) {
                        break;
                    }
                    self.char_types[prior_idx] = BidiClass::EuropeanNumber;
                }
                for &next_idx in &iso_run.indices[ridx + 1..] {
                    if !self.char_types[next_idx].in_group(et_or_removed) {
                        break;
                    }
                    self.char_types[next_idx] = BidiClass::EuropeanNumber;
                }
            }
        }
    }

    /// This is the method for Rule W6.
    ///
    /// For characters of bc=ES, bc=CS, or bc=ET, change
    /// the Bidi_Class value to ON. This resolves any remaining
    /// separators or terminators which were not already processed
    /// by Rules W4 and W5.  Adjacent characters removed by X9
    /// become ON along with them.
    pub(crate) fn resolve_es_cs_et(&mut self, iso_runs: &[IsolatingRunSequence]) {
        let separators = BidiFlags::ES | BidiFlags::CS | BidiFlags::ET;
        for iso_run in iso_runs {
            for (ridx, &idx) in iso_run.indices.iter().enumerate() {
                if self.char_types[idx].in_group(separators) {
                    self.char_types[idx] = BidiClass::OtherNeutral;
                    self.set_adjacent_removed(ridx, &iso_run.indices, BidiClass::OtherNeutral);
                }
            }
        }
    }

    /// This is the method for Rule W7.
    ///
    /// For characters of bc=EN, scan back to find the first strong
    /// directional type. If that type is L, change the Bidi_Class
    /// value of the number to L.
    /// Done as a single forward pass that remembers the last strong type.
    pub(crate) fn resolve_en(&mut self, iso_runs: &[IsolatingRunSequence]) {
        for iso_run in iso_runs {
            let mut prior_strong = iso_run.sos;
            for &idx in &iso_run.indices {
                let bc = self.char_types[idx];
                if bc == BidiClass::EuropeanNumber {
                    if prior_strong == BidiClass::LeftToRight {
                        self.char_types[idx] = BidiClass::LeftToRight;
                    }
                } else if bc.is_strong() {
                    prior_strong = bc;
                }
            }
        }
    }
}
