//! Counters collected over a run and the final report.

use std::fmt;

use crate::{
    access::ProcessId,
    config::{Algorithm, SimConfig},
    mmu::AccessOutcome,
};

/// Counters for a single process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub accesses: u64,
    pub faults: u64,
    pub writes: u64,
}

impl ProcessStats {
    pub fn record(&mut self, outcome: &AccessOutcome) {
        self.accesses += 1;

        if outcome.is_fault() {
            self.faults += 1;
        }

        if outcome.wrote_back() {
            self.writes += 1;
        }
    }
}

/// Snapshot handed to the report once the trace is exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stats {
    pub algorithm: Algorithm,
    pub frames: usize,
    pub page_size_kb: u64,
    processes: [ProcessStats; 2],
}

impl Stats {
    pub fn new(config: &SimConfig) -> Self {
        Stats {
            algorithm: config.algorithm,
            frames: config.frames,
            page_size_kb: config.page_size_kb,
            processes: [ProcessStats::default(); 2],
        }
    }

    pub fn record(&mut self, process: ProcessId, outcome: &AccessOutcome) {
        self.processes[process.index()].record(outcome);
    }

    pub fn process(&self, process: ProcessId) -> ProcessStats {
        self.processes[process.index()]
    }

    pub fn total_accesses(&self) -> u64 {
        self.processes.iter().map(|p| p.accesses).sum()
    }

    pub fn total_faults(&self) -> u64 {
        self.processes.iter().map(|p| p.faults).sum()
    }

    pub fn total_writes(&self) -> u64 {
        self.processes.iter().map(|p| p.writes).sum()
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Number of frames: {}", self.frames)?;
        writeln!(f, "Page size: {} KB", self.page_size_kb)?;
        writeln!(f, "Total memory accesses: {}", self.total_accesses())?;
        writeln!(f, "Total page faults: {}", self.total_faults())?;
        write!(f, "Total writes to disk: {}", self.total_writes())
    }
}
