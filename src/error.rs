use std::fmt;

use crate::addr::{PhysAddr, VirtAddr};

/// Failure to build the paging structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// More bytes were requested than 1024 tables of 1024 pages can map.
    CapacityExceeded { requested: u64, capacity: u64 },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                capacity,
            } => write!(
                f,
                "requested {requested} bytes but the page directory can map at most {capacity}"
            ),
        }
    }
}

impl std::error::Error for BuildError {}

/// Which level of the walk found no mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Directory,
    Table,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => f.write_str("directory"),
            Self::Table => f.write_str("table"),
        }
    }
}

/// Translation fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageFault {
    /// The directory base handed to the walk is not a page directory.
    UnknownDirectory(PhysAddr),
    NotMapped { addr: VirtAddr, level: Level },
}

impl fmt::Display for PageFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDirectory(base) => write!(f, "no page directory at {base}"),
            Self::NotMapped { addr, level } => {
                write!(f, "{addr} is not mapped ({level} entry not present)")
            }
        }
    }
}

impl std::error::Error for PageFault {}

/// Malformed memory size argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SizeError {
    Empty,
    /// The argument does not start with a decimal digit.
    MissingDigits(String),
    UnknownSuffix(String),
    Overflow(String),
}

impl fmt::Display for SizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("memory size is empty"),
            Self::MissingDigits(arg) => write!(f, "memory size `{arg}` must start with a number"),
            Self::UnknownSuffix(arg) => {
                write!(f, "memory size `{arg}` has an unknown suffix (expected K or M)")
            }
            Self::Overflow(arg) => write!(f, "memory size `{arg}` is too large"),
        }
    }
}

impl std::error::Error for SizeError {}
