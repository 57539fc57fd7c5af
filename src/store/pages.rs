//! Page to stroke list map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::annotation::{PageNumber, Stroke, StrokeId};

/// Strokes of every page, keyed by 1-based page number.
///
/// Index operations never reorder unrelated strokes. Pages whose list
/// becomes empty are dropped from the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageAnnotations(BTreeMap<PageNumber, Vec<Stroke>>);

impl PageAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strokes on a page in z-order (empty if the page has none)
    pub fn strokes(&self, page: PageNumber) -> &[Stroke] {
        self.0.get(&page).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn get(&self, page: PageNumber, index: usize) -> Option<&Stroke> {
        self.0.get(&page).and_then(|strokes| strokes.get(index))
    }

    /// Pages that currently hold at least one stroke
    pub fn pages(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn stroke_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Append a stroke on top of a page and return its index
    pub fn add_stroke(&mut self, page: PageNumber, stroke: Stroke) -> usize {
        let strokes = self.0.entry(page).or_default();
        strokes.push(stroke);
        strokes.len() - 1
    }

    /// Insert at `index`, clamped to the end of the list. Returns the index used.
    pub fn insert_stroke_at(&mut self, page: PageNumber, index: usize, stroke: Stroke) -> usize {
        let strokes = self.0.entry(page).or_default();
        let index = index.min(strokes.len());
        strokes.insert(index, stroke);
        index
    }

    pub fn remove_stroke_at(&mut self, page: PageNumber, index: usize) -> Option<Stroke> {
        let strokes = self.0.get_mut(&page)?;
        if index >= strokes.len() {
            return None;
        }
        let removed = strokes.remove(index);
        if strokes.is_empty() {
            self.0.remove(&page);
        }
        Some(removed)
    }

    /// Replace the stroke at `index`, returning the previous one
    pub fn replace_stroke_at(
        &mut self,
        page: PageNumber,
        index: usize,
        stroke: Stroke,
    ) -> Option<Stroke> {
        let slot = self.0.get_mut(&page)?.get_mut(index)?;
        Some(std::mem::replace(slot, stroke))
    }

    pub fn find_by_id(&self, page: PageNumber, id: StrokeId) -> Option<usize> {
        self.strokes(page).iter().position(|s| s.id == id)
    }

    /// Remove a stroke by id, returning its former index along with it
    pub fn remove_by_id(&mut self, page: PageNumber, id: StrokeId) -> Option<(usize, Stroke)> {
        let index = self.find_by_id(page, id)?;
        self.remove_stroke_at(page, index).map(|stroke| (index, stroke))
    }

    /// Empty every page and return what was there
    pub fn clear_all(&mut self) -> PageAnnotations {
        std::mem::take(self)
    }

    /// Replace the whole map with a snapshot
    pub fn restore(&mut self, snapshot: PageAnnotations) {
        *self = snapshot;
    }
}
