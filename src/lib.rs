//! Two-level paging structures of a 32-bit, non-PAE machine.
//!
//! [`Mmu::build`] lays out a page directory and the page tables needed to
//! cover a number of bytes, [`Mmu::translate`] walks them for a virtual
//! address, and [`Mmu::dump`] lists every populated entry.

pub mod addr;
pub mod cli;
pub mod draw;
pub mod error;
pub mod inspect;
pub mod logger;
pub mod memory;
pub mod mmu;
pub mod page;
pub mod stat;
pub mod translate;

pub use addr::{PhysAddr, VirtAddr};
pub use error::{BuildError, Level, PageFault, SizeError};
pub use inspect::Row;
pub use mmu::Mmu;
pub use stat::{Counts, CAPACITY_BYTES};
