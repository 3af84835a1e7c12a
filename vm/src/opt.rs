//! OPT*: clairvoyant replacement driven by a schedule of future references.
//!
//! The whole trace is scanned before replay to record, for every page of a
//! process, the trace indices at which it is referenced. During replay each
//! access consumes its own index from the page's schedule, so the number of
//! unconsumed entries is the number of references still to come.
//!
//! Victims are ranked by how *many* references remain, not by how soon the
//! next one is. This is not Belady's rule (which evicts the page whose next
//! use is furthest away); a page touched once more in the very next access
//! loses to a page touched twice more much later.

use std::collections::HashMap;

use log::debug;

use crate::{
    access::{Access, ProcessId},
    error::VmError,
    page_replacer::{PageEvent, PageReplacer},
    page_table::PageTable,
};

/// Every trace index at which each page of one process is referenced, in
/// ascending order. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FutureSchedule {
    pages: HashMap<u64, Vec<usize>>,
}

impl FutureSchedule {
    pub fn build<'a, I>(trace: I, process: ProcessId, page_size_bytes: u64) -> Self
    where
        I: IntoIterator<Item = &'a Access>,
    {
        let mut pages: HashMap<u64, Vec<usize>> = HashMap::new();

        for access in trace.into_iter().filter(|a| a.process == process) {
            pages
                .entry(access.page_number(page_size_bytes))
                .or_default()
                .push(access.index);
        }

        debug!(
            "opt: schedule for process {} covers {} pages",
            process,
            pages.len()
        );

        FutureSchedule { pages }
    }

    /// All references to `page`, consumed or not.
    pub fn references(&self, page: u64) -> Option<&[usize]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    /// Number of distinct pages referenced.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Cursor {
    consumed: usize,
    last_access: usize,
}

#[derive(Debug)]
pub struct OptPageReplacer {
    schedule: FutureSchedule,
    cursors: HashMap<u64, Cursor>,
}

impl OptPageReplacer {
    pub fn new(schedule: FutureSchedule) -> Self {
        OptPageReplacer {
            schedule,
            cursors: HashMap::new(),
        }
    }

    pub fn schedule(&self) -> &FutureSchedule {
        &self.schedule
    }

    /// References to `page` not yet replayed.
    pub fn remaining(&self, page: u64) -> usize {
        let total = self.schedule.references(page).map_or(0, <[usize]>::len);
        let consumed = self.cursors.get(&page).map_or(0, |c| c.consumed);

        total - consumed
    }

    /// Trace index of the latest replayed access to `page`.
    pub fn last_access(&self, page: u64) -> Option<usize> {
        self.cursors.get(&page).map(|c| c.last_access)
    }

    fn consume(&mut self, page: u64, index: usize) -> Result<(), VmError> {
        let references = self
            .schedule
            .references(page)
            .ok_or(VmError::UnscheduledPage { page })?;
        let cursor = self.cursors.entry(page).or_default();

        match references.get(cursor.consumed) {
            Some(&next) if next == index => {
                cursor.consumed += 1;
                cursor.last_access = index;
                Ok(())
            }
            expected => Err(VmError::ScheduleDesync {
                page,
                expected: expected.copied(),
                found: index,
            }),
        }
    }
}

impl PageReplacer for OptPageReplacer {
    fn page_event(&mut self, event: PageEvent) -> Result<(), VmError> {
        match event {
            PageEvent::Touched { page, index } => self.consume(page, index),
            PageEvent::Loaded { .. } | PageEvent::Evicted { .. } => Ok(()),
        }
    }

    fn pick_replacement_page(&self, resident: &PageTable) -> Option<u64> {
        resident
            .pages()
            .map(|page| {
                // a page with no cursor ranks as never used
                let last_access = self.last_access(page).unwrap_or(0);
                (self.remaining(page), last_access, page)
            })
            .min()
            .map(|(_, _, page)| page)
    }

    /// Rewinds every cursor; the schedule itself is kept.
    fn reset(&mut self) {
        self.cursors.clear();
    }
}
