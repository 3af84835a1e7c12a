use std::collections::BTreeMap;

/// Per-page bookkeeping shared by every policy.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct PageTableEntry {
    pub dirty: bool,
}

/// The resident set of one process.
///
/// A page is resident exactly when it has an entry here, so residency and
/// attributes cannot drift apart. Keys are kept ordered to make every scan
/// over the resident set deterministic.
#[derive(Clone, Debug)]
pub struct PageTable {
    capacity: usize,
    table: BTreeMap<u64, PageTableEntry>,
}

impl PageTable {
    pub fn new(capacity: usize) -> Self {
        PageTable {
            capacity,
            table: BTreeMap::new(),
        }
    }

    /// Number of frames owned by the process.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resident pages.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.table.len() >= self.capacity
    }

    pub fn contains(&self, page_number: u64) -> bool {
        self.table.contains_key(&page_number)
    }

    pub fn get(&self, page_number: u64) -> Option<PageTableEntry> {
        self.table.get(&page_number).copied()
    }

    /// Maps a freshly faulted page. Returns `false`, leaving the table
    /// untouched, if there is no free frame or the page is already mapped.
    pub fn set(&mut self, page_number: u64, dirty: bool) -> bool {
        if self.is_full() || self.contains(page_number) {
            return false;
        }

        self.table.insert(page_number, PageTableEntry { dirty });

        true
    }

    pub fn remove(&mut self, page_number: u64) -> Option<PageTableEntry> {
        self.table.remove(&page_number)
    }

    /// Returns `false` if the page is not resident.
    pub fn mark_dirty(&mut self, page_number: u64) -> bool {
        match self.table.get_mut(&page_number) {
            Some(page) => {
                page.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Resident pages in ascending page-number order.
    pub fn pages(&self) -> impl Iterator<Item = u64> + '_ {
        self.table.keys().copied()
    }

    /// Drops every mapping, keeping the capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_respects_capacity() {
        let mut table = PageTable::new(2);

        assert!(table.set(1, false));
        assert!(table.set(2, true));
        assert!(!table.set(3, false));

        assert!(table.is_full());
        assert_eq!(table.len(), 2);
        assert!(!table.contains(3));
    }

    #[test]
    fn set_refuses_duplicates() {
        let mut table = PageTable::new(4);

        assert!(table.set(7, true));
        assert!(!table.set(7, false));
        assert_eq!(table.get(7), Some(PageTableEntry { dirty: true }));
    }

    #[test]
    fn mark_dirty_only_touches_resident_pages() {
        let mut table = PageTable::new(1);
        table.set(5, false);

        assert!(table.mark_dirty(5));
        assert!(!table.mark_dirty(6));
        assert_eq!(table.remove(5), Some(PageTableEntry { dirty: true }));
        assert!(table.is_empty());
    }

    #[test]
    fn pages_iterate_in_page_order() {
        let mut table = PageTable::new(3);
        table.set(9, false);
        table.set(1, false);
        table.set(4, false);

        assert_eq!(table.pages().collect::<Vec<_>>(), vec![1, 4, 9]);
    }

    #[test]
    fn zero_capacity_is_always_full() {
        let mut table = PageTable::new(0);

        assert!(table.is_full());
        assert!(!table.set(0, false));
    }
}
