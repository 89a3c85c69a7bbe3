use crate::bidi_class::BidiClass;
use crate::level::Level;
use crate::{BidiContext, Paragraph};
use log::trace;

/// A level run (BD7): a maximal sequence of characters sharing the same
/// embedding level, ignoring the characters removed by X9.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LevelRun {
    /// char indices for start, end of run.  `end - 1` is the last
    /// character that was not removed by X9.
    pub start: usize,
    pub end: usize,
    /// Embedding level of this run
    pub level: Level,
    pub starts_with_pdi: bool,
    pub ends_with_isolate_initiator: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IsolatingRunSequence {
    /// The sequence of indices into the text, across the
    /// contained set of level runs
    pub indices: Vec<usize>,
    /// Embedding level of the runs in this sequence
    pub level: Level,
    /// Direction of start of sequence
    pub sos: BidiClass,
    /// Direction of end of sequence
    pub eos: BidiClass,
}

impl BidiContext {
    /// BD7: split the paragraph into level runs.
    ///
    /// Characters removed by X9 never start or end a run; when they fall
    /// between two runs they belong to neither, and their level is
    /// reconciled during implicit level resolution.
    pub(crate) fn identify_runs(&self, paragraph: &Paragraph) -> Vec<LevelRun> {
        let mut runs: Vec<LevelRun> = vec![];

        for idx in paragraph.range.clone() {
            let bc = self.char_types[idx];
            if bc.is_removed_by_x9() {
                continue;
            }
            let level = self.levels[idx];
            let is_iso_init = bc.is_iso_init();

            match runs.last_mut() {
                Some(run) if run.level == level => {
                    run.end = idx + 1;
                    run.ends_with_isolate_initiator = is_iso_init;
                }
                _ => runs.push(LevelRun {
                    start: idx,
                    end: idx + 1,
                    level,
                    starts_with_pdi: bc == BidiClass::PopDirectionalIsolate,
                    ends_with_isolate_initiator: is_iso_init,
                }),
            }
        }

        trace!("\nRuns: {:#?}", runs);
        runs
    }

    /// X10 and BD13: chain the level runs of a paragraph into
    /// isolating run sequences.
    ///
    /// Every level run that does not start with a matched PDI begins a
    /// new sequence.  While the most recently added run ends with an
    /// isolate initiator whose PDI is known, the run that starts at that
    /// PDI is appended to the sequence.
    pub(crate) fn identify_isolating_run_sequences(
        &self,
        paragraph: &Paragraph,
    ) -> Vec<IsolatingRunSequence> {
        let runs = self.identify_runs(paragraph);
        let mut iso_runs = vec![];

        for (run_idx, run) in runs.iter().enumerate() {
            if run.starts_with_pdi && self.isolate_pairs.initiator_for(run.start).is_some() {
                // Already claimed by the sequence holding its initiator
                continue;
            }

            let mut indices: Vec<usize> = (run.start..run.end).collect();
            let mut current = run;
            while current.ends_with_isolate_initiator {
                let pdi = match self.isolate_pairs.pdi_for(current.end - 1) {
                    Some(pdi) => pdi,
                    None => break,
                };
                match runs[run_idx + 1..].iter().find(|r| r.start == pdi) {
                    Some(next) => {
                        indices.extend(next.start..next.end);
                        current = next;
                    }
                    None => break,
                }
            }

            let (sos, eos) = self.calculate_sos_eos(paragraph, &indices);
            iso_runs.push(IsolatingRunSequence {
                indices,
                level: run.level,
                sos,
                eos,
            });
        }

        trace!("\nIsolating run sequences: {:#?}", iso_runs);
        iso_runs
    }

    /// Determine sos and eos for a sequence.
    ///
    /// Each is the direction of the higher of the level at that end of
    /// the sequence and the level of the adjacent character outside of
    /// it (skipping characters removed by X9), using the paragraph level
    /// when there is no such character.  A sequence that ends with an
    /// unmatched isolate initiator always compares against the paragraph
    /// level at its end.
    fn calculate_sos_eos(&self, paragraph: &Paragraph, indices: &[usize]) -> (BidiClass, BidiClass) {
        let (first, last) = match (indices.first(), indices.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return (BidiClass::OtherNeutral, BidiClass::OtherNeutral),
        };

        let prior_level = (paragraph.range.start..first)
            .rev()
            .find(|&idx| !self.char_types[idx].is_removed_by_x9())
            .map(|idx| self.levels[idx])
            .unwrap_or(paragraph.base_level);

        let next_level = if self.char_types[last].is_iso_init() {
            paragraph.base_level
        } else {
            (last + 1..paragraph.range.end)
                .find(|&idx| !self.char_types[idx].is_removed_by_x9())
                .map(|idx| self.levels[idx])
                .unwrap_or(paragraph.base_level)
        };

        let sos = prior_level.max(self.levels[first]).as_bidi_class();
        let eos = next_level.max(self.levels[last]).as_bidi_class();
        (sos, eos)
    }
}
