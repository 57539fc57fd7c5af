//! Per-document history sessions.
//!
//! Every open document gets its own [`HistorySession`], so undo in one tab
//! never touches another. Exactly one session is active at a time; keyboard
//! shortcuts only reach that one. The clipboard is shared by all documents.

use std::collections::HashMap;

use bevy::prelude::*;
use uuid::Uuid;

use crate::constants::MAX_HISTORY_SIZE;
use crate::editor::{Clipboard, DocumentHost, EditContext};
use crate::history::HistorySession;


/// Identifies one open document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(Uuid);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry of history sessions plus the shared clipboard
#[derive(Resource)]
pub struct SessionManager {
    sessions: HashMap<FileId, HistorySession>,
    active: Option<FileId>,
    clipboard: Clipboard,
    max_history: usize,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::with_max_history(MAX_HISTORY_SIZE)
    }
}

impl SessionManager {
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            active: None,
            clipboard: Clipboard::new(),
            max_history,
        }
    }

    /// Register a session for a newly opened document and make it active.
    /// An existing session for the same file is kept.
    pub fn start_session(&mut self, file_id: FileId) {
        let max_history = self.max_history;
        self.sessions
            .entry(file_id)
            .or_insert_with(|| HistorySession::with_max_len(max_history));
        self.active = Some(file_id);
        debug!("Started history session {}", file_id);
    }

    /// Forget a closed document's history
    pub fn end_session(&mut self, file_id: FileId) {
        if self.sessions.remove(&file_id).is_some() {
            debug!("Ended history session {}", file_id);
        }
        if self.active == Some(file_id) {
            self.active = None;
        }
    }

    /// Switch the active document. Unknown ids are ignored.
    pub fn activate(&mut self, file_id: FileId) -> bool {
        if !self.sessions.contains_key(&file_id) {
            warn!("Cannot activate unknown session {}", file_id);
            return false;
        }
        self.active = Some(file_id);
        true
    }

    pub fn is_active(&self, file_id: FileId) -> bool {
        self.active == Some(file_id)
    }

    pub fn active(&self) -> Option<FileId> {
        self.active
    }

    pub fn session(&self, file_id: FileId) -> Option<&HistorySession> {
        self.sessions.get(&file_id)
    }

    pub fn session_mut(&mut self, file_id: FileId) -> Option<&mut HistorySession> {
        self.sessions.get_mut(&file_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut Clipboard {
        &mut self.clipboard
    }

    /// Borrow what a document needs to edit: its own history, the shared
    /// clipboard and the host. `None` if the document has no session.
    pub fn edit_context<'a>(
        &'a mut self,
        file_id: FileId,
        host: &'a mut dyn DocumentHost,
    ) -> Option<EditContext<'a>> {
        let is_active = self.active == Some(file_id);
        let history = self.sessions.get_mut(&file_id)?;
        Some(EditContext {
            history,
            clipboard: &mut self.clipboard,
            host,
            is_active,
        })
    }
}
