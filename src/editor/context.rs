use crate::annotation::PageNumber;
use crate::history::{HistoryAction, HistorySession};

use super::clipboard::Clipboard;
use super::host::DocumentHost;

/// Everything an edit needs besides the document itself.
///
/// Handed out by the session manager so that each document only ever sees
/// its own history.
pub struct EditContext<'a> {
    pub history: &'a mut HistorySession,
    pub clipboard: &'a mut Clipboard,
    pub host: &'a mut dyn DocumentHost,
    /// Whether this document's session is the active one
    pub is_active: bool,
}

impl EditContext<'_> {
    /// Record an action and tell the host about it
    pub fn commit(&mut self, action: HistoryAction) {
        self.host.on_stroke_change(&action);
        self.history.commit(action);
    }

    pub fn redraw(&mut self, page: PageNumber) {
        self.host.request_redraw(page);
    }

    /// Redraw each page once
    pub fn redraw_pages(&mut self, pages: impl IntoIterator<Item = PageNumber>) {
        let mut pages: Vec<PageNumber> = pages.into_iter().collect();
        pages.sort_unstable();
        pages.dedup();
        for page in pages {
            self.host.request_redraw(page);
        }
    }
}
