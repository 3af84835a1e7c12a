use thiserror::Error;

use crate::{access::ProcessId, config::ConfigError, trace::TraceError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broken invariants inside the MMU or a replacer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VmError {
    /// OPT* was asked to consume an index its schedule does not hold next.
    #[error("schedule desync on page {page:#x}: expected index {expected:?}, replayed {found}")]
    ScheduleDesync {
        page: u64,
        expected: Option<usize>,
        found: usize,
    },

    /// A page was touched that never appeared in the pre-pass.
    #[error("page {page:#x} is missing from the future access schedule")]
    UnscheduledPage { page: u64 },

    /// A replacer heard about an access to a page it never saw loaded.
    #[error("page {page:#x} was touched without being loaded")]
    UntrackedPage { page: u64 },

    /// A process faulted while holding no frames at all.
    #[error("process {process} faulted on page {page:#x} but owns no frames")]
    NoFrames { process: ProcessId, page: u64 },

    /// The page table refused a page right after making room for it.
    #[error("process {process} could not admit page {page:#x}")]
    AdmitFailed { process: ProcessId, page: u64 },

    /// The cache is full but the replacer had nothing to offer.
    #[error("no eviction candidate in a full cache of process {process}")]
    NoVictim { process: ProcessId },
}

/// Everything that can go wrong between reading a trace and printing stats.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Vm(#[from] VmError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
