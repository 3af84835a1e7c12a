//! Page replacement simulator core.
//!
//! Replays a trace of loads and stores issued by two processes against two
//! independent page caches and counts faults and write-backs under either
//! LFU or OPT* replacement.
//!
//! The pieces fit together like this:
//!
//! - [`trace`] turns a trace file into an ordered list of [`Access`] records;
//! - [`mmu::Mmu`] owns one process' [`page_table::PageTable`] and a
//!   [`page_replacer::PageReplacer`], and resolves one access at a time into
//!   an [`mmu::AccessOutcome`];
//! - [`simulator::Simulator`] drives one MMU per process and folds the
//!   outcomes into [`stats::Stats`].

pub mod access;
pub mod config;
pub mod error;
pub mod lfu;
pub mod mmu;
pub mod opt;
pub mod page_replacer;
pub mod page_table;
pub mod simulator;
pub mod stats;
pub mod trace;

pub use access::{Access, AccessMode, ProcessId};
pub use config::{Algorithm, FrameSplit, SimConfig};
pub use error::{Error, Result, VmError};
pub use simulator::{simulate, Simulator};
pub use stats::Stats;
