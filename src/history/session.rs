//! Per-document linear history.

use crate::constants::MAX_HISTORY_SIZE;

use super::action::HistoryAction;

/// Where the document was last saved.
///
/// `Unreachable` means the saved state was discarded from the log (by a
/// branch or by trimming), so no amount of undo/redo gets back to it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SavedStep {
    At(Option<usize>),
    Unreachable,
}

impl Default for SavedStep {
    fn default() -> Self {
        SavedStep::At(None)
    }
}

#[derive(Clone, Debug, Default)]
struct HistoryLog {
    actions: Vec<HistoryAction>,
    /// Index of the last applied action; `None` before the first one
    step: Option<usize>,
}

impl HistoryLog {
    fn push(&mut self, action: HistoryAction, saved: Option<&mut SavedStep>, max_len: usize) {
        let keep = self.step.map_or(0, |s| s + 1);
        let mut saved = saved;

        if keep < self.actions.len() {
            self.actions.truncate(keep);
            if let Some(saved) = saved.as_deref_mut()
                && let SavedStep::At(Some(s)) = *saved
                && s >= keep
            {
                *saved = SavedStep::Unreachable;
            }
        }

        self.actions.push(action);
        self.step = Some(self.actions.len() - 1);

        if max_len > 0 && self.actions.len() > max_len {
            let excess = self.actions.len() - max_len;
            self.actions.drain(..excess);
            self.step = self.step.map(|s| s - excess);
            if let Some(saved) = saved {
                *saved = match *saved {
                    SavedStep::At(Some(s)) if s >= excess => SavedStep::At(Some(s - excess)),
                    _ => SavedStep::Unreachable,
                };
            }
        }
    }

    fn undo(&mut self) -> Option<HistoryAction> {
        let step = self.step?;
        let action = self.actions.get(step)?.clone();
        self.step = step.checked_sub(1);
        Some(action)
    }

    fn redo(&mut self) -> Option<HistoryAction> {
        let next = self.step.map_or(0, |s| s + 1);
        let action = self.actions.get(next)?.clone();
        self.step = Some(next);
        Some(action)
    }

    fn can_undo(&self) -> bool {
        self.step.is_some()
    }

    fn can_redo(&self) -> bool {
        self.step.map_or(0, |s| s + 1) < self.actions.len()
    }
}

/// Undo/redo state of one open document.
///
/// While temporary mode is on, commit/undo/redo go to a scratch buffer that
/// is thrown away when the mode ends, so previews never reach the real log.
#[derive(Clone, Debug)]
pub struct HistorySession {
    log: HistoryLog,
    saved: SavedStep,
    temporary: Option<HistoryLog>,
    max_len: usize,
}

impl Default for HistorySession {
    fn default() -> Self {
        Self::with_max_len(MAX_HISTORY_SIZE)
    }
}

impl HistorySession {
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            log: HistoryLog::default(),
            saved: SavedStep::default(),
            temporary: None,
            max_len,
        }
    }

    fn active_log(&self) -> &HistoryLog {
        self.temporary.as_ref().unwrap_or(&self.log)
    }

    fn active_log_mut(&mut self) -> &mut HistoryLog {
        self.temporary.as_mut().unwrap_or(&mut self.log)
    }

    /// Record an action, discarding anything that could still be redone
    pub fn commit(&mut self, action: HistoryAction) {
        let max_len = self.max_len;
        match &mut self.temporary {
            Some(temporary) => temporary.push(action, None, max_len),
            None => self.log.push(action, Some(&mut self.saved), max_len),
        }
    }

    /// Step back; returns the action to invert, or `None` at the start
    pub fn undo(&mut self) -> Option<HistoryAction> {
        self.active_log_mut().undo()
    }

    /// Step forward; returns the action to re-apply, or `None` at the tail
    pub fn redo(&mut self) -> Option<HistoryAction> {
        self.active_log_mut().redo()
    }

    pub fn can_undo(&self) -> bool {
        self.active_log().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.active_log().can_redo()
    }

    /// Label of the action the next undo would revert
    pub fn undo_label(&self) -> Option<&'static str> {
        let log = self.active_log();
        log.step.and_then(|s| log.actions.get(s)).map(HistoryAction::label)
    }

    /// Label of the action the next redo would re-apply
    pub fn redo_label(&self) -> Option<&'static str> {
        let log = self.active_log();
        log.actions
            .get(log.step.map_or(0, |s| s + 1))
            .map(HistoryAction::label)
    }

    pub fn mark_saved(&mut self) {
        self.saved = SavedStep::At(self.log.step);
    }

    pub fn saved(&self) -> SavedStep {
        self.saved
    }

    pub fn has_unsaved_changes(&self) -> bool {
        match self.saved {
            SavedStep::Unreachable => true,
            SavedStep::At(step) => step != self.log.step,
        }
    }

    /// Forget everything, including the saved marker
    pub fn reset(&mut self) {
        self.log = HistoryLog::default();
        self.saved = SavedStep::default();
        self.temporary = None;
    }

    /// Enter or leave temporary mode. Leaving discards the scratch buffer.
    pub fn set_temporary_mode(&mut self, enabled: bool) {
        if enabled {
            if self.temporary.is_none() {
                self.temporary = Some(HistoryLog::default());
            }
        } else {
            self.temporary = None;
        }
    }

    pub fn is_temporary(&self) -> bool {
        self.temporary.is_some()
    }

    /// Number of actions in the permanent log
    pub fn len(&self) -> usize {
        self.log.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.actions.is_empty()
    }

    /// Cursor of the permanent log
    pub fn step(&self) -> Option<usize> {
        self.log.step
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}
