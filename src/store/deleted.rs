//! Logically deleted pages.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::annotation::PageNumber;

/// Set of deleted page numbers.
///
/// Pages are never renumbered here; visible numbering is derived on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeletedPages(BTreeSet<PageNumber>);

impl DeletedPages {
    /// Returns false if the page was already deleted
    pub fn delete(&mut self, page: PageNumber) -> bool {
        self.0.insert(page)
    }

    /// Returns false if the page was not deleted
    pub fn restore(&mut self, page: PageNumber) -> bool {
        self.0.remove(&page)
    }

    pub fn contains(&self, page: PageNumber) -> bool {
        self.0.contains(&page)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.0.iter().copied()
    }

    /// Pages still visible out of `1..=page_count`, ascending
    pub fn active_pages(&self, page_count: u32) -> Vec<PageNumber> {
        (1..=page_count).filter(|p| !self.contains(*p)).collect()
    }

    /// Original page number of the `visible`-th (1-based) remaining page
    pub fn original_page_number(&self, visible: u32, page_count: u32) -> Option<PageNumber> {
        let index = usize::try_from(visible.checked_sub(1)?).ok()?;
        self.active_pages(page_count).get(index).copied()
    }

    /// Visible position of an original page, `None` if it is deleted
    pub fn visible_page_number(&self, original: PageNumber) -> Option<u32> {
        if self.contains(original) || original == 0 {
            return None;
        }
        let deleted_before = self.0.range(..original).count() as u32;
        Some(original - deleted_before)
    }
}
