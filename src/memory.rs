//! Simulated physical memory holding the paging structures.
//!
//! The directory, the 1024 tables it may reference and the frame placeholder
//! sit at fixed physical addresses, one after the other:
//!
//! ```text
//! 0x0010_0000  page directory
//! 0x0010_1000  page table 0
//!     ...
//! 0x0050_0000  page table 1023
//! 0x0050_1000  frame placeholder
//! ```

use crate::{
    addr::{PhysAddr, PAGE_SIZE},
    page::{Frame, PageDirectory, PageTable, DIRECTORY_ENTRIES},
};

pub const DIRECTORY_BASE: PhysAddr = PhysAddr::from_bits(0x0010_0000);
pub const TABLES_BASE: PhysAddr = PhysAddr::from_bits(DIRECTORY_BASE.bits() + PAGE_SIZE);
pub const FRAME_BASE: PhysAddr =
    PhysAddr::from_bits(TABLES_BASE.bits() + DIRECTORY_ENTRIES as u32 * PAGE_SIZE);

pub struct Memory {
    directory: Box<PageDirectory>,
    tables: Box<[PageTable]>,
}

impl Memory {
    /// All structures zeroed.
    pub fn new() -> Self {
        Self {
            directory: Box::new(PageDirectory::empty()),
            tables: vec![PageTable::empty(); DIRECTORY_ENTRIES].into_boxed_slice(),
        }
    }

    pub fn clear(&mut self) {
        *self.directory = PageDirectory::empty();
        self.tables.fill(PageTable::empty());
    }

    /// Physical base of the table reserved for directory slot `index`.
    pub fn table_base(&self, index: usize) -> PhysAddr {
        debug_assert!(index < DIRECTORY_ENTRIES);
        TABLES_BASE + index as u32 * PAGE_SIZE
    }

    /// The shared frame every table entry maps from.
    pub const fn frame(&self) -> Frame {
        Frame::containing(FRAME_BASE)
    }

    pub fn directory(&self) -> &PageDirectory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut PageDirectory {
        &mut self.directory
    }

    pub fn table(&self, index: usize) -> Option<&PageTable> {
        self.tables.get(index)
    }

    /// Panics if `index` is not a directory slot.
    pub fn table_mut(&mut self, index: usize) -> &mut PageTable {
        &mut self.tables[index]
    }

    /// The directory whose base is `addr`, if any.
    pub fn directory_at(&self, addr: PhysAddr) -> Option<&PageDirectory> {
        (addr == DIRECTORY_BASE).then_some(&*self.directory)
    }

    /// The table whose base is `addr`, if any.
    pub fn table_at(&self, addr: PhysAddr) -> Option<&PageTable> {
        if !addr.is_frame_aligned() || addr < TABLES_BASE {
            return None;
        }
        let index = (addr.bits() - TABLES_BASE.bits()) / PAGE_SIZE;
        self.tables.get(index as usize)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
