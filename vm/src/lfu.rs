//! Least-frequently-used replacement with LRU tie-breaking.

use std::collections::HashMap;

use crate::{
    error::VmError,
    page_replacer::{PageEvent, PageReplacer},
    page_table::PageTable,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LfuEntry {
    /// Accesses since the page was last loaded, the faulting one included.
    pub access_count: u64,
    /// Trace index of the latest access.
    pub last_access: usize,
}

/// Evicts the page with the fewest accesses since it was loaded; among
/// those, the one accessed longest ago.
#[derive(Debug, Default)]
pub struct LfuPageReplacer {
    entries: HashMap<u64, LfuEntry>,
}

impl LfuPageReplacer {
    pub fn new() -> Self {
        LfuPageReplacer::default()
    }

    pub fn entry(&self, page: u64) -> Option<LfuEntry> {
        self.entries.get(&page).copied()
    }
}

impl PageReplacer for LfuPageReplacer {
    fn page_event(&mut self, event: PageEvent) -> Result<(), VmError> {
        match event {
            PageEvent::Loaded { page, index } => {
                self.entries.insert(
                    page,
                    LfuEntry {
                        access_count: 0,
                        last_access: index,
                    },
                );
            }
            PageEvent::Touched { page, index } => {
                let entry = self
                    .entries
                    .get_mut(&page)
                    .ok_or(VmError::UntrackedPage { page })?;

                entry.access_count += 1;
                entry.last_access = index;
            }
            PageEvent::Evicted { page } => {
                self.entries.remove(&page);
            }
        }

        Ok(())
    }

    fn pick_replacement_page(&self, resident: &PageTable) -> Option<u64> {
        // an untracked resident page ranks as never used
        resident
            .pages()
            .map(|page| {
                let entry = self.entry(page).unwrap_or_default();
                (entry.access_count, entry.last_access, page)
            })
            .min()
            .map(|(_, _, page)| page)
    }

    fn reset(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(replacer: &mut LfuPageReplacer, table: &mut PageTable, page: u64, index: usize) {
        table.set(page, false);
        replacer.page_event(PageEvent::Loaded { page, index }).unwrap();
        replacer.page_event(PageEvent::Touched { page, index }).unwrap();
    }

    #[test]
    fn loaded_page_counts_its_first_access() {
        let mut replacer = LfuPageReplacer::new();
        let mut table = PageTable::new(1);

        load(&mut replacer, &mut table, 3, 10);

        assert_eq!(
            replacer.entry(3),
            Some(LfuEntry {
                access_count: 1,
                last_access: 10
            })
        );
    }

    #[test]
    fn picks_least_frequently_used() {
        let mut replacer = LfuPageReplacer::new();
        let mut table = PageTable::new(2);

        load(&mut replacer, &mut table, 1, 0);
        load(&mut replacer, &mut table, 2, 1);
        replacer.page_event(PageEvent::Touched { page: 1, index: 2 }).unwrap();

        assert_eq!(replacer.pick_replacement_page(&table), Some(2));
    }

    #[test]
    fn ties_go_to_least_recently_used() {
        let mut replacer = LfuPageReplacer::new();
        let mut table = PageTable::new(2);

        load(&mut replacer, &mut table, 8, 0);
        load(&mut replacer, &mut table, 5, 1);
        replacer.page_event(PageEvent::Touched { page: 5, index: 2 }).unwrap();
        replacer.page_event(PageEvent::Touched { page: 8, index: 3 }).unwrap();

        // both have two accesses; page 5 was touched before page 8
        assert_eq!(replacer.pick_replacement_page(&table), Some(5));
    }

    #[test]
    fn eviction_forgets_frequency() {
        let mut replacer = LfuPageReplacer::new();
        let mut table = PageTable::new(1);

        load(&mut replacer, &mut table, 4, 0);
        replacer.page_event(PageEvent::Touched { page: 4, index: 1 }).unwrap();
        table.remove(4);
        replacer.page_event(PageEvent::Evicted { page: 4 }).unwrap();
        load(&mut replacer, &mut table, 4, 2);

        assert_eq!(replacer.entry(4).map(|e| e.access_count), Some(1));
    }

    #[test]
    fn untracked_resident_page_is_picked_first() {
        let mut replacer = LfuPageReplacer::new();
        let mut table = PageTable::new(2);

        load(&mut replacer, &mut table, 1, 0);
        table.set(7, false);

        assert_eq!(replacer.pick_replacement_page(&table), Some(7));
    }

    #[test]
    fn touching_unloaded_page_is_an_error() {
        let mut replacer = LfuPageReplacer::new();

        assert_eq!(
            replacer.page_event(PageEvent::Touched { page: 9, index: 0 }),
            Err(VmError::UntrackedPage { page: 9 })
        );
    }
}
