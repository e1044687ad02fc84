//! Hardware layout of the 32-bit, non-PAE paging structures.
//!
//! Both entry kinds are packed into one `u32`, bit 0 first:
//!
//! ```text
//!  31                   12 11  9  8   7   6   5   4   3   2   1   0
//! +-----------------------+-----+---+---+---+---+---+---+---+---+---+
//! |  frame number (20)    | rsv | G |PS/| D | A |PCD|PWT|U/S|R/W| P |
//! |                       |     |   |PAT|   |   |   |   |   |   |   |
//! +-----------------------+-----+---+---+---+---+---+---+---+---+---+
//! ```
//!
//! Addresses are stored as frame numbers, so every table and frame an entry
//! points to must be 4096-byte aligned.

use std::ops::{Deref, DerefMut};

use bitfield_struct::bitfield;
use static_assertions::{assert_eq_align, assert_eq_size, const_assert_eq};

use crate::addr::{PhysAddr, PAGE_SIZE};

pub const DIRECTORY_ENTRIES: usize = 1024;
pub const TABLE_ENTRIES: usize = 1024;

/// Page directory entry. Selects one page table per 4 MiB of virtual space.
#[bitfield(u32)]
#[derive(PartialEq, Eq, Hash)]
pub struct DirectoryEntry {
    /// Table is mapped.
    pub present: bool,
    /// Pages of the table are write-enabled.
    pub writable: bool,
    /// Accessible outside privileged mode.
    pub user: bool,
    pub write_through: bool,
    pub cache_disabled: bool,
    pub accessed: bool,
    pub dirty: bool,
    /// 1 selects 4 KiB table granularity, the only mode modelled here.
    pub page_size: bool,
    /// Global flag, not consumed by the walk.
    pub ignored: bool,
    #[bits(3)]
    pub reserved: u8,
    #[bits(20)]
    table_frame: u32,
}

/// Page table entry. Maps one 4 KiB page.
#[bitfield(u32)]
#[derive(PartialEq, Eq, Hash)]
pub struct TableEntry {
    pub present: bool,
    pub writable: bool,
    pub user: bool,
    pub write_through: bool,
    pub cache_disabled: bool,
    pub accessed: bool,
    pub dirty: bool,
    /// Page attribute table selector.
    pub pat: bool,
    pub ignored: bool,
    #[bits(3)]
    pub reserved: u8,
    #[bits(20)]
    frame: u32,
}

assert_eq_size!(DirectoryEntry, u32);
assert_eq_size!(TableEntry, u32);

impl DirectoryEntry {
    pub const fn new_unmapped() -> Self {
        Self::new()
    }

    /// Frame number of the referenced page table.
    pub const fn table_address(&self) -> u32 {
        self.table_frame()
    }

    pub const fn table_phys_addr(&self) -> PhysAddr {
        PhysAddr::from_frame_number(self.table_frame())
    }

    pub fn set_table(&mut self, table: PhysAddr) {
        debug_assert!(table.is_frame_aligned(), "page table {table} is not 4 KiB aligned");
        self.set_table_frame(table.frame_number());
    }

    pub fn with_table(mut self, table: PhysAddr) -> Self {
        self.set_table(table);
        self
    }
}

impl TableEntry {
    pub const fn new_unmapped() -> Self {
        Self::new()
    }

    /// Frame number of the mapped page.
    pub const fn frame_address(&self) -> u32 {
        self.frame()
    }

    pub const fn frame_phys_addr(&self) -> PhysAddr {
        PhysAddr::from_frame_number(self.frame())
    }

    pub fn set_frame_addr(&mut self, frame: PhysAddr) {
        debug_assert!(frame.is_frame_aligned(), "frame {frame} is not 4 KiB aligned");
        self.set_frame(frame.frame_number());
    }

    pub fn with_frame_addr(mut self, frame: PhysAddr) -> Self {
        self.set_frame_addr(frame);
        self
    }
}

#[derive(Copy, Clone)]
#[repr(C, align(4096))]
pub struct PageDirectory {
    table: [DirectoryEntry; DIRECTORY_ENTRIES],
}
impl PageDirectory {
    pub const fn empty() -> Self {
        Self {
            table: [DirectoryEntry::new_unmapped(); DIRECTORY_ENTRIES],
        }
    }
}
impl Deref for PageDirectory {
    type Target = [DirectoryEntry; DIRECTORY_ENTRIES];
    fn deref(&self) -> &Self::Target {
        &self.table
    }
}
impl DerefMut for PageDirectory {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.table
    }
}

#[derive(Copy, Clone)]
#[repr(C, align(4096))]
pub struct PageTable {
    table: [TableEntry; TABLE_ENTRIES],
}
impl PageTable {
    pub const fn empty() -> Self {
        Self {
            table: [TableEntry::new_unmapped(); TABLE_ENTRIES],
        }
    }
}
impl Deref for PageTable {
    type Target = [TableEntry; TABLE_ENTRIES];
    fn deref(&self) -> &Self::Target {
        &self.table
    }
}
impl DerefMut for PageTable {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.table
    }
}

const_assert_eq!(core::mem::size_of::<PageDirectory>(), PAGE_SIZE as usize);
const_assert_eq!(core::mem::size_of::<PageTable>(), PAGE_SIZE as usize);
assert_eq_align!(PageTable, PageDirectory);

/// A 4 KiB physical page. Only its base address is modelled; contents are
/// never read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    base: PhysAddr,
}
impl Frame {
    pub const fn containing(addr: PhysAddr) -> Self {
        Self {
            base: addr.with_offset(0),
        }
    }
    pub const fn base(self) -> PhysAddr {
        self.base
    }
    pub const fn number(self) -> u32 {
        self.base.frame_number()
    }
    /// The frame `n` pages above this one.
    pub const fn nth(self, n: u32) -> Self {
        Self {
            base: PhysAddr::from_frame_number(self.number() + n),
        }
    }
}
