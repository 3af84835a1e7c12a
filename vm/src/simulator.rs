use log::info;

use crate::{
    access::{Access, ProcessId},
    config::{Algorithm, SimConfig},
    error::VmError,
    lfu::LfuPageReplacer,
    mmu::{AccessOutcome, Mmu},
    opt::{FutureSchedule, OptPageReplacer},
    page_replacer::PageReplacer,
    stats::Stats,
};

type DynMmu = Mmu<Box<dyn PageReplacer>>;

/// Replays a trace against one MMU per process.
#[derive(Debug)]
pub struct Simulator {
    config: SimConfig,
    mmus: [DynMmu; 2],
    stats: Stats,
}

impl Simulator {
    /// Sets up both processes. OPT* reads `trace` here to build its
    /// schedules; LFU ignores it.
    pub fn new(config: &SimConfig, trace: &[Access]) -> Self {
        let mmus = ProcessId::ALL.map(|process| {
            let replacer: Box<dyn PageReplacer> = match config.algorithm {
                Algorithm::Lfu => Box::new(LfuPageReplacer::new()),
                Algorithm::OptStar => Box::new(OptPageReplacer::new(FutureSchedule::build(
                    trace,
                    process,
                    config.page_size_bytes(),
                ))),
            };

            Mmu::new(
                process,
                config.frames_for(process),
                config.page_size_bytes(),
                replacer,
            )
        });

        Simulator {
            config: *config,
            mmus,
            stats: Stats::new(config),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn mmu(&self, process: ProcessId) -> &DynMmu {
        &self.mmus[process.index()]
    }

    /// Stats gathered so far.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Feeds one access to the MMU of its process.
    pub fn step(&mut self, access: &Access) -> Result<AccessOutcome, VmError> {
        let outcome = self.mmus[access.process.index()].access(access)?;
        self.stats.record(access.process, &outcome);

        Ok(outcome)
    }

    /// Replays `trace` in order.
    pub fn run(&mut self, trace: &[Access]) -> Result<&Stats, VmError> {
        info!(
            "sim: replaying {} accesses with {} ({} frames, split {}, {} KB pages)",
            trace.len(),
            self.config.algorithm,
            self.config.frames,
            self.config.split,
            self.config.page_size_kb
        );

        for access in trace {
            self.step(access)?;
        }

        info!(
            "sim: done, {} faults, {} writes",
            self.stats.total_faults(),
            self.stats.total_writes()
        );

        Ok(&self.stats)
    }

    /// Back to the state right after construction. OPT* schedules survive.
    pub fn reset(&mut self) {
        for mmu in &mut self.mmus {
            mmu.reset();
        }
        self.stats = Stats::new(&self.config);
    }
}

/// Runs `trace` start to finish under `config`.
pub fn simulate(config: &SimConfig, trace: &[Access]) -> Result<Stats, VmError> {
    let mut simulator = Simulator::new(config, trace);
    simulator.run(trace).cloned()
}
