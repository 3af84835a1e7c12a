//! Command line of the simulator.
//!
//! Mirrors the classic invocation:
//!
//! ```text
//! vmsim -a <opt*|lfu> -n <numframes> -p <pagesize in KB> -s <memory split> <tracefile>
//! ```

use std::path::PathBuf;

use clap::Parser;
use vm::{config::ConfigError, Algorithm, FrameSplit, SimConfig};

#[derive(Parser, Debug)]
#[command(
    name = "vmsim",
    version,
    about = "Two-process page replacement simulator (LFU vs OPT*)"
)]
pub struct Cli {
    /// Replacement policy: `lfu` or `opt*`.
    #[arg(short = 'a', long = "algorithm")]
    pub algorithm: Algorithm,

    /// Total number of page frames.
    #[arg(short = 'n', long = "frames")]
    pub frames: usize,

    /// Page size in KB.
    #[arg(short = 'p', long = "page-size")]
    pub page_size_kb: u64,

    /// Ratio the frames are split in between process 0 and process 1, e.g. `1:2`.
    #[arg(short = 's', long = "split")]
    pub split: FrameSplit,

    /// Trace file to replay.
    pub trace: PathBuf,
}

impl Cli {
    pub fn sim_config(&self) -> Result<SimConfig, ConfigError> {
        SimConfig::new(self.algorithm, self.frames, self.page_size_kb, self.split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_classic_invocation() {
        let cli = Cli::try_parse_from([
            "vmsim", "-a", "opt*", "-n", "8", "-p", "4", "-s", "1:3", "trace.txt",
        ])
        .unwrap();

        let config = cli.sim_config().unwrap();

        assert_eq!(config.algorithm, Algorithm::OptStar);
        assert_eq!(config.frames, 8);
        assert_eq!(config.page_size_bytes(), 4096);
        assert_eq!(config.split.allocate(8), [2, 6]);
        assert_eq!(cli.trace, PathBuf::from("trace.txt"));
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let result = Cli::try_parse_from([
            "vmsim", "-a", "fifo", "-n", "8", "-p", "4", "-s", "1:1", "trace.txt",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn zero_page_size_fails_validation() {
        let cli = Cli::try_parse_from([
            "vmsim", "-a", "lfu", "-n", "8", "-p", "0", "-s", "1:1", "trace.txt",
        ])
        .unwrap();

        assert_eq!(cli.sim_config(), Err(ConfigError::ZeroPageSize));
    }
}
