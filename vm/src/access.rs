//! Access records handed from the trace feed to the MMUs.

use std::fmt;

/// Kind of memory access.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessMode {
    Load,
    Store,
}

impl AccessMode {
    /// Stores dirty the page they touch.
    pub fn is_store(self) -> bool {
        matches!(self, AccessMode::Store)
    }
}

/// One of the two processes sharing the frame budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProcessId {
    Zero,
    One,
}

impl ProcessId {
    pub const ALL: [ProcessId; 2] = [ProcessId::Zero, ProcessId::One];

    /// Position of this process in per-process arrays.
    pub fn index(self) -> usize {
        match self {
            ProcessId::Zero => 0,
            ProcessId::One => 1,
        }
    }
}

impl TryFrom<u64> for ProcessId {
    type Error = u64;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProcessId::Zero),
            1 => Ok(ProcessId::One),
            other => Err(other),
        }
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A single memory access, as read from the trace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Access {
    pub mode: AccessMode,
    /// Raw virtual byte address.
    pub address: u64,
    pub process: ProcessId,
    /// Zero-based position of this access in the whole trace.
    pub index: usize,
}

impl Access {
    pub fn new(mode: AccessMode, address: u64, process: ProcessId, index: usize) -> Self {
        Access {
            mode,
            address,
            process,
            index,
        }
    }

    pub fn load(address: u64, process: ProcessId, index: usize) -> Self {
        Access::new(AccessMode::Load, address, process, index)
    }

    pub fn store(address: u64, process: ProcessId, index: usize) -> Self {
        Access::new(AccessMode::Store, address, process, index)
    }

    /// Page holding this access' address.
    pub fn page_number(&self, page_size_bytes: u64) -> u64 {
        self.address / page_size_bytes
    }
}
