use crate::bidi_class::BidiClass;
use crate::level::Level;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Override {
    Neutral,
    LTR,
    RTL,
}

/// One entry of the directional status stack (X1)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct StatusEntry {
    pub level: Level,
    pub override_status: Override,
    /// Set for entries pushed by an isolate initiator; holds
    /// the position of that initiator.
    pub isolate_initiator: Option<usize>,
}

impl StatusEntry {
    pub fn is_isolate(&self) -> bool {
        self.isolate_initiator.is_some()
    }
}

/// The directional status stack.  Its depth is bounded by the
/// overflow counters maintained by the caller, which refuse to
/// push anything beyond MAX_DEPTH.
#[derive(Debug, Default)]
pub(crate) struct LevelStack {
    entries: Vec<StatusEntry>,
}

impl LevelStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, level: Level, override_status: Override, isolate_initiator: Option<usize>) {
        log::trace!(
            "pushing level={:?} override={:?} isolate_initiator={:?} at depth={}",
            level,
            override_status,
            isolate_initiator,
            self.depth()
        );
        self.entries.push(StatusEntry {
            level,
            override_status,
            isolate_initiator,
        });
    }

    /// Pops the top entry.  The paragraph entry at the bottom is
    /// never popped; a paragraph separator clears the stack instead.
    pub fn pop(&mut self) -> Option<StatusEntry> {
        if self.entries.len() > 1 {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Pops everything above the most recent isolate entry, then that
    /// entry itself, returning it.
    pub fn pop_isolate(&mut self) -> Option<StatusEntry> {
        while let Some(top) = self.entries.last() {
            if top.is_isolate() {
                break;
            }
            self.pop()?;
        }
        self.pop()
    }

    fn top(&self) -> Option<&StatusEntry> {
        self.entries.last()
    }

    pub fn embedding_level(&self) -> Level {
        self.top().map(|e| e.level).unwrap_or_default()
    }

    pub fn override_status(&self) -> Override {
        self.top()
            .map(|e| e.override_status)
            .unwrap_or(Override::Neutral)
    }

    pub fn isolate_status(&self) -> bool {
        self.top().map(StatusEntry::is_isolate).unwrap_or(false)
    }

    pub fn apply_override(&self, bc: &mut BidiClass) {
        match self.override_status() {
            Override::LTR => *bc = BidiClass::LeftToRight,
            Override::RTL => *bc = BidiClass::RightToLeft,
            Override::Neutral => {}
        }
    }
}
