//! Simulation parameters: which policy, how many frames, how big a page, and
//! how the frames are divided between the two processes.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::access::ProcessId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'{0}' is invalid. Please choose 'opt*' or 'lfu'.")]
    UnknownAlgorithm(String),

    #[error("memory split '{0}' is not of the form <a>:<b>")]
    MalformedSplit(String),

    #[error("memory split {0}:{1} gives no process a share")]
    EmptySplit(u32, u32),

    #[error("page size must be at least 1 KB")]
    ZeroPageSize,

    #[error("page size of {0} KB does not fit in a 64-bit address space")]
    PageSizeTooLarge(u64),
}

/// Replacement policy to simulate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Lfu,
    OptStar,
}

impl Algorithm {
    /// Name printed in the report.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Lfu => "LFU",
            Algorithm::OptStar => "OPT*",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lfu" => Ok(Algorithm::Lfu),
            "opt*" => Ok(Algorithm::OptStar),
            other => Err(ConfigError::UnknownAlgorithm(other.to_owned())),
        }
    }
}

/// Ratio in which the frame budget is divided between process 0 and 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameSplit {
    first: u32,
    second: u32,
}

impl FrameSplit {
    pub fn new(first: u32, second: u32) -> Result<Self, ConfigError> {
        if first == 0 && second == 0 {
            return Err(ConfigError::EmptySplit(first, second));
        }

        Ok(FrameSplit { first, second })
    }

    /// Process 0 gets `floor(total * first / (first + second))` frames,
    /// process 1 gets whatever is left.
    pub fn allocate(&self, total: usize) -> [usize; 2] {
        let ratio_sum = u128::from(self.first) + u128::from(self.second);
        let first = (total as u128 * u128::from(self.first) / ratio_sum) as usize;

        [first, total - first]
    }
}

impl Default for FrameSplit {
    fn default() -> Self {
        FrameSplit { first: 1, second: 1 }
    }
}

impl fmt::Display for FrameSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.first, self.second)
    }
}

impl FromStr for FrameSplit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedSplit(s.to_owned());

        let (first, second) = s.split_once(':').ok_or_else(malformed)?;
        let first = first.trim().parse().map_err(|_| malformed())?;
        let second = second.trim().parse().map_err(|_| malformed())?;

        FrameSplit::new(first, second)
    }
}

/// Static configuration of one simulation run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub algorithm: Algorithm,
    /// Total frames shared by both processes.
    pub frames: usize,
    /// Page size in KB.
    pub page_size_kb: u64,
    pub split: FrameSplit,
}

impl SimConfig {
    pub fn new(
        algorithm: Algorithm,
        frames: usize,
        page_size_kb: u64,
        split: FrameSplit,
    ) -> Result<Self, ConfigError> {
        if page_size_kb == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if page_size_kb.checked_mul(1024).is_none() {
            return Err(ConfigError::PageSizeTooLarge(page_size_kb));
        }

        Ok(SimConfig {
            algorithm,
            frames,
            page_size_kb,
            split,
        })
    }

    pub fn page_size_bytes(&self) -> u64 {
        self.page_size_kb.saturating_mul(1024)
    }

    /// Frames allotted to `process` under the configured split.
    pub fn frames_for(&self, process: ProcessId) -> usize {
        self.split.allocate(self.frames)[process.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1:1", 8, [4, 4])]
    #[case("1:2", 8, [2, 6])]
    #[case("3:1", 10, [7, 3])]
    #[case("0:1", 5, [0, 5])]
    #[case("1:0", 5, [5, 0])]
    #[case("2:3", 1, [0, 1])]
    fn split_floors_first_share(
        #[case] split: &str,
        #[case] total: usize,
        #[case] expected: [usize; 2],
    ) {
        let split: FrameSplit = split.parse().unwrap();

        assert_eq!(split.allocate(total), expected);
    }

    #[rstest]
    #[case("1")]
    #[case("a:b")]
    #[case("1:-2")]
    #[case(":")]
    fn split_rejects_malformed(#[case] split: &str) {
        assert_eq!(
            split.parse::<FrameSplit>(),
            Err(ConfigError::MalformedSplit(split.to_owned()))
        );
    }

    #[test]
    fn split_rejects_all_zero() {
        assert_eq!("0:0".parse::<FrameSplit>(), Err(ConfigError::EmptySplit(0, 0)));
    }

    #[test]
    fn algorithm_names() {
        assert_eq!("lfu".parse::<Algorithm>(), Ok(Algorithm::Lfu));
        assert_eq!("opt*".parse::<Algorithm>(), Ok(Algorithm::OptStar));
        assert!("lru".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::OptStar.to_string(), "OPT*");
    }

    #[test]
    fn config_rejects_zero_page_size() {
        let err = SimConfig::new(Algorithm::Lfu, 4, 0, FrameSplit::default());

        assert_eq!(err, Err(ConfigError::ZeroPageSize));
    }

    #[test]
    fn config_rejects_overflowing_page_size() {
        let huge = 1u64 << 54;

        let err = SimConfig::new(Algorithm::Lfu, 2, huge, FrameSplit::default());

        assert_eq!(err, Err(ConfigError::PageSizeTooLarge(huge)));
    }

    #[test]
    fn largest_page_size_still_simulates() {
        let kb = u64::MAX / 1024;
        let config = SimConfig::new(Algorithm::Lfu, 2, kb, FrameSplit::default()).unwrap();

        let stats =
            crate::simulate(&config, &[crate::Access::load(u64::MAX, ProcessId::Zero, 0)])
                .unwrap();

        assert_eq!(stats.total_faults(), 1);
    }

    #[test]
    fn config_reports_bytes_and_frames() {
        let config =
            SimConfig::new(Algorithm::Lfu, 7, 4, FrameSplit::new(1, 1).unwrap()).unwrap();

        assert_eq!(config.page_size_bytes(), 4096);
        assert_eq!(config.frames_for(ProcessId::Zero), 3);
        assert_eq!(config.frames_for(ProcessId::One), 4);
    }
}
