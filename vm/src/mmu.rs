use log::{debug, trace};

use crate::{
    access::{Access, ProcessId},
    error::VmError,
    page_replacer::{PageEvent, PageReplacer},
    page_table::PageTable,
};

/// A page thrown out to make room for another.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Eviction {
    pub page: u64,
    /// Whether the page had to be written back.
    pub dirty: bool,
}

/// Result of resolving one access.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    Hit,
    Fault { evicted: Option<Eviction> },
}

impl AccessOutcome {
    pub fn is_fault(&self) -> bool {
        matches!(self, AccessOutcome::Fault { .. })
    }

    pub fn eviction(&self) -> Option<Eviction> {
        match self {
            AccessOutcome::Hit => None,
            AccessOutcome::Fault { evicted } => *evicted,
        }
    }

    /// True when this access cost a write to disk.
    pub fn wrote_back(&self) -> bool {
        self.eviction().is_some_and(|e| e.dirty)
    }
}

/// The paging unit of a single process: its resident set plus the policy
/// that decides who leaves when the set is full.
#[derive(Debug)]
pub struct Mmu<REPLACER: PageReplacer> {
    process: ProcessId,
    page_size_bytes: u64,
    page_table: PageTable,
    replacer: REPLACER,
}

impl<REPLACER> Mmu<REPLACER>
where
    REPLACER: PageReplacer,
{
    pub fn new(process: ProcessId, frames: usize, page_size_bytes: u64, replacer: REPLACER) -> Self {
        Mmu {
            process,
            page_size_bytes,
            page_table: PageTable::new(frames),
            replacer,
        }
    }

    pub fn process(&self) -> ProcessId {
        self.process
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn replacer(&self) -> &REPLACER {
        &self.replacer
    }

    fn handle_page_fault(
        &mut self,
        page_number: u64,
        dirty: bool,
        index: usize,
    ) -> Result<Option<Eviction>, VmError> {
        if self.page_table.capacity() == 0 {
            return Err(VmError::NoFrames {
                process: self.process,
                page: page_number,
            });
        }

        let evicted = if self.page_table.is_full() {
            let victim = self
                .replacer
                .pick_replacement_page(&self.page_table)
                .ok_or(VmError::NoVictim {
                    process: self.process,
                })?;
            let entry = self
                .page_table
                .remove(victim)
                .ok_or(VmError::UntrackedPage { page: victim })?;

            if entry.dirty {
                debug!(
                    "mmu[{}]: page {:#x} dirty, writing back before eviction",
                    self.process, victim
                );
            } else {
                debug!("mmu[{}]: evicting clean page {:#x}", self.process, victim);
            }

            self.replacer.page_event(PageEvent::Evicted { page: victim })?;

            Some(Eviction {
                page: victim,
                dirty: entry.dirty,
            })
        } else {
            None
        };

        if !self.page_table.set(page_number, dirty) {
            return Err(VmError::AdmitFailed {
                process: self.process,
                page: page_number,
            });
        }
        self.replacer.page_event(PageEvent::Loaded {
            page: page_number,
            index,
        })?;

        Ok(evicted)
    }

    /// Resolves one access against this process' resident set.
    pub fn access(&mut self, access: &Access) -> Result<AccessOutcome, VmError> {
        let page_number = access.page_number(self.page_size_bytes);
        let dirty = access.mode.is_store();

        let outcome = if self.page_table.contains(page_number) {
            trace!(
                "mmu[{}]: #{} {:?} {:#x} page {:#x} hit",
                self.process, access.index, access.mode, access.address, page_number
            );

            if dirty {
                self.page_table.mark_dirty(page_number);
            }

            AccessOutcome::Hit
        } else {
            trace!(
                "mmu[{}]: #{} {:?} {:#x} page {:#x} fault",
                self.process, access.index, access.mode, access.address, page_number
            );

            let evicted = self.handle_page_fault(page_number, dirty, access.index)?;

            AccessOutcome::Fault { evicted }
        };

        self.replacer.page_event(PageEvent::Touched {
            page: page_number,
            index: access.index,
        })?;

        Ok(outcome)
    }

    /// Empties the resident set and rewinds the replacer.
    pub fn reset(&mut self) {
        self.page_table.clear();
        self.replacer.reset();
    }
}
