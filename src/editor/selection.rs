//! Selected strokes.

use crate::annotation::{PageNumber, StrokeId};
use crate::store::PageAnnotations;

/// One selected stroke. `index` is a hint; `id` is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionEntry {
    pub page: PageNumber,
    pub index: usize,
    pub id: StrokeId,
}

/// Zero or more selected strokes plus the primary one.
///
/// The primary stroke gets the handles and is rendered on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
    primary: Option<usize>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn primary(&self) -> Option<SelectionEntry> {
        self.primary.and_then(|i| self.entries.get(i)).copied()
    }

    /// The entry when exactly one stroke is selected
    pub fn single(&self) -> Option<SelectionEntry> {
        match self.entries.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.primary = None;
    }

    pub fn select_only(&mut self, entry: SelectionEntry) {
        self.entries = vec![entry];
        self.primary = Some(0);
    }

    /// Replace the selection; the last entry becomes primary
    pub fn set(&mut self, entries: Vec<SelectionEntry>) {
        self.primary = entries.len().checked_sub(1);
        self.entries = entries;
    }

    /// Add or remove an entry. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, entry: SelectionEntry) -> bool {
        match self.entries.iter().position(|e| e.id == entry.id) {
            Some(position) => {
                let primary_id = self.primary().map(|p| p.id);
                self.entries.remove(position);
                self.primary = match primary_id {
                    Some(id) if id != entry.id => self.entries.iter().position(|e| e.id == id),
                    _ => self.entries.len().checked_sub(1),
                };
                false
            }
            None => {
                self.entries.push(entry);
                self.primary = Some(self.entries.len() - 1);
                true
            }
        }
    }

    pub fn on_page(&self, page: PageNumber) -> Vec<SelectionEntry> {
        self.entries
            .iter()
            .filter(|e| e.page == page)
            .copied()
            .collect()
    }

    pub fn pages(&self) -> Vec<PageNumber> {
        let mut pages: Vec<PageNumber> = self.entries.iter().map(|e| e.page).collect();
        pages.sort_unstable();
        pages.dedup();
        pages
    }

    /// Re-resolve indices after the store changed; drops strokes that are gone
    pub fn refresh(&mut self, store: &PageAnnotations) {
        let primary_id = self.primary().map(|p| p.id);
        self.entries.retain_mut(|entry| {
            let index = match store.get(entry.page, entry.index) {
                Some(stroke) if stroke.id == entry.id => Some(entry.index),
                _ => store.find_by_id(entry.page, entry.id),
            };
            match index {
                Some(index) => {
                    entry.index = index;
                    true
                }
                None => false,
            }
        });
        self.primary = primary_id
            .and_then(|id| self.entries.iter().position(|e| e.id == id))
            .or_else(|| self.entries.len().checked_sub(1));
    }
}
