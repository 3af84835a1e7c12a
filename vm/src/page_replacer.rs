use std::fmt;

use crate::{error::VmError, page_table::PageTable};

/// What the MMU tells a replacer about a page.
///
/// On a fault the MMU emits `Evicted` for the victim (if any), then `Loaded`
/// for the new page, then `Touched`. A hit only emits `Touched`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageEvent {
    Touched { page: u64, index: usize },
    Loaded { page: u64, index: usize },
    Evicted { page: u64 },
}

pub trait PageReplacer: fmt::Debug {
    fn page_event(&mut self, _event: PageEvent) -> Result<(), VmError> {
        Ok(())
    }

    /// Chooses which resident page to give up. Only called on a full table.
    fn pick_replacement_page(&self, resident: &PageTable) -> Option<u64>;

    /// Forgets everything learned during replay.
    fn reset(&mut self) {}
}

impl<R: PageReplacer + ?Sized> PageReplacer for Box<R> {
    fn page_event(&mut self, event: PageEvent) -> Result<(), VmError> {
        (**self).page_event(event)
    }

    fn pick_replacement_page(&self, resident: &PageTable) -> Option<u64> {
        (**self).pick_replacement_page(resident)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
