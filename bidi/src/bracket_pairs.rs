use crate::bidi_class::BidiClass;
use crate::data_source::BidiDataSource;
use crate::direction::Direction;
use crate::sequence::IsolatingRunSequence;
use crate::BidiContext;
use log::trace;

/// A matched bracket pair; the positions are indices into
/// the `indices` of the containing isolating run sequence.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pair {
    pub opening_pos: usize,
    pub closing_pos: usize,
}

impl std::fmt::Debug for Pair {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "Pair{{{},{}}}", self.opening_pos, self.closing_pos)
    }
}

/// BD16 limits the bracket stack to 63 entries
pub(crate) const MAX_PAIRING_DEPTH: usize = 63;

#[derive(Debug, Default)]
pub(crate) struct BracketStack {
    /// (opening bracket, position) for each currently open bracket
    openers: Vec<(char, usize)>,
    pub pairs: Vec<Pair>,
}

impl BracketStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.openers.clear();
        self.pairs.clear();
    }

    /// Returns false if the stack is full, in which case BD16
    /// processing must stop for the current sequence.
    pub fn push(&mut self, opening_bracket: char, pos: usize) -> bool {
        if self.openers.len() >= MAX_PAIRING_DEPTH {
            return false;
        }
        self.openers.push((opening_bracket, pos));
        true
    }

    /// Seek an opening bracket for the closing bracket passed in,
    /// searching from the top of the stack downwards.
    ///
    /// On a match the pair is recorded and the stack is popped down
    /// to (and including) the matching entry, discarding any openers
    /// that were not cleanly nested.
    /// A closing bracket with no opener is simply ignored.
    pub fn seek_matching_open_bracket(
        &mut self,
        closing_bracket: char,
        pos: usize,
        data: &dyn BidiDataSource,
    ) -> bool {
        trace!(
            "seek_matching_open_bracket: closing_bracket={:?} pos={} openers={:?}",
            closing_bracket,
            pos,
            self.openers
        );
        let direct = data.closing_to_opening(closing_bracket);
        let canonical = data.closing_to_opening(data.canonical_bracket(closing_bracket));

        for depth in (0..self.openers.len()).rev() {
            let (opening_bracket, opening_pos) = self.openers[depth];
            // U+2329/U+232A are canonically equivalent to U+3008/U+3009,
            // so a pair may mix the two forms
            if direct == Some(opening_bracket)
                || canonical == Some(opening_bracket)
                || data.opening_to_closing(data.canonical_bracket(opening_bracket))
                    == Some(closing_bracket)
            {
                self.pairs.push(Pair {
                    opening_pos,
                    closing_pos: pos,
                });
                self.openers.truncate(depth);
                return true;
            }
        }
        false
    }
}

impl BidiContext {
    /// This is the method for Rule N0. (BD16)
    ///
    /// Identify the bracket pairs of each isolating run sequence, then
    /// resolve each pair in order of its opening bracket.
    ///
    /// Only brackets whose current class is neutral take part.
    /// If more than MAX_PAIRING_DEPTH brackets are open at once,
    /// identification ceases for that sequence; the pairs that were
    /// already found are still resolved and the other sequences are
    /// unaffected.
    pub(crate) fn resolve_paired_brackets(
        &mut self,
        iso_runs: &[IsolatingRunSequence],
        text: &[char],
        data: &dyn BidiDataSource,
    ) {
        if text.is_empty() {
            // Pre-classified input has no code points to pair up
            return;
        }

        let mut stack = BracketStack::new();
        for iso_run in iso_runs {
            stack.clear();
            for (ridx, &cidx) in iso_run.indices.iter().enumerate() {
                if !self.char_types[cidx].is_neutral() {
                    continue;
                }
                let c = text[cidx];
                if data.opening_to_closing(c).is_some() {
                    trace!("push open ridx={} cidx={} {:?}", ridx, cidx, c);
                    if !stack.push(c, ridx) {
                        trace!("bracket stack overflow at ridx={}", ridx);
                        break;
                    }
                } else if data.closing_to_opening(c).is_some() {
                    trace!("close at ridx={} cidx={} {:?}, search for opener", ridx, cidx, c);
                    stack.seek_matching_open_bracket(c, ridx, data);
                }
            }

            if stack.pairs.is_empty() {
                continue;
            }

            stack.pairs.sort_unstable_by_key(|p| p.opening_pos);
            trace!("\nPairs: {:?}", stack.pairs);

            for pair in &stack.pairs {
                self.resolve_one_pair(pair, iso_run);
            }
        }
    }

    /// Resolve the class of one pair of matched brackets.
    ///
    /// The embedding direction of a position is given by the parity
    /// of its level (BD3).
    fn resolve_one_pair(&mut self, pair: &Pair, iso_run: &IsolatingRunSequence) {
        let indices = &iso_run.indices;
        let embedding_direction = iso_run.level.direction();

        // N0 b: a strong type inside the brackets matching the
        // embedding direction
        let mut opposite_found = false;
        for &cidx in &indices[pair.opening_pos + 1..pair.closing_pos] {
            let direction = match Direction::for_neutrals(self.char_types[cidx]) {
                Some(direction) => direction,
                None => continue,
            };
            if direction == self.levels[cidx].direction() {
                trace!("{:?}: strong embedding direction between brackets", pair);
                self.set_bracket_pair_bc(pair, indices, direction);
                return;
            }
            opposite_found = true;
        }

        if !opposite_found {
            // N0 d: no strong type inside; leave the pair alone
            return;
        }

        // N0 c: only the opposite direction was found inside, so
        // the preceding context decides.  If it is also opposite the
        // pair takes that direction (c1), otherwise the embedding
        // direction (c2).
        let context = indices[..pair.opening_pos]
            .iter()
            .rev()
            .find_map(|&cidx| Direction::for_neutrals(self.char_types[cidx]))
            .or_else(|| Direction::for_neutrals(iso_run.sos))
            .unwrap_or(embedding_direction);
        let direction = if context == embedding_direction.opposite() {
            context
        } else {
            embedding_direction
        };
        trace!("{:?}: resolved via prior context to {:?}", pair, direction);
        self.set_bracket_pair_bc(pair, indices, direction);
    }

    /// Set the class of both brackets of a pair to `direction`.
    ///
    /// Characters that were originally NSM and directly follow a bracket
    /// that changed (ignoring characters removed by X9) took the bracket's
    /// old class in W1; they are updated to match, but only when the new
    /// direction differs from that of the bracket's own level.
    fn set_bracket_pair_bc(&mut self, pair: &Pair, indices: &[usize], direction: Direction) {
        let bc = direction.as_bidi_class();
        for &pos in &[pair.opening_pos, pair.closing_pos] {
            let cidx = indices[pos];
            trace!(
                "set_bracket_pair_bc index={} from {:?} -> {:?}",
                cidx,
                self.char_types[cidx],
                bc
            );
            self.char_types[cidx] = bc;

            if direction == self.levels[cidx].direction() {
                continue;
            }
            for &next in &indices[pos + 1..] {
                let orig = self.orig_char_types[next];
                if orig == BidiClass::NonspacingMark {
                    self.char_types[next] = bc;
                } else if !orig.is_removed_by_x9() {
                    break;
                }
            }
        }
    }
}
