//! The paging structure and its builder.
//!
//! Known simplifications of the model:
//! - every table maps the same backing region: entry `j` of any table points
//!   at the frame placeholder plus `j` pages, so the structure shows layout
//!   only, not memory isolation;
//! - the last populated table is filled completely, even past `pages_count`
//!   (see [`Counts::table_entries_over_provisioned`]).

use log::{debug, trace};

use crate::{
    addr::PhysAddr,
    error::BuildError,
    memory::{Memory, DIRECTORY_BASE},
    page::{DirectoryEntry, TableEntry, TABLE_ENTRIES},
    stat::Counts,
};

pub struct Mmu {
    pub(crate) cr3: PhysAddr,
    pub(crate) memory: Memory,
    pub(crate) counts: Counts,
}

impl Mmu {
    /// A zeroed structure with nothing mapped.
    pub fn new() -> Self {
        Self {
            cr3: DIRECTORY_BASE & !0xfff,
            memory: Memory::new(),
            counts: Counts::default(),
        }
    }

    /// Allocate and populate a structure covering `required_bytes`.
    pub fn build(required_bytes: u64) -> Result<Self, BuildError> {
        let mut mmu = Self::new();
        mmu.populate(required_bytes)?;
        Ok(mmu)
    }

    /// Populate directory and table entries for `required_bytes`.
    ///
    /// A structure that was already populated is reset first. On error the
    /// structure is left untouched.
    pub fn populate(&mut self, required_bytes: u64) -> Result<Counts, BuildError> {
        let counts = Counts::for_bytes(required_bytes)?;
        if self.counts.directory_entry_count > 0 {
            debug!("Resetting {} populated directory entries", self.counts.directory_entry_count);
            self.reset();
        }

        debug!(
            "Mapping {} bytes: {} pages in {} tables",
            counts.required_bytes, counts.pages_count, counts.directory_entry_count
        );

        let frame = self.memory.frame();
        for i in 0..counts.directory_entry_count {
            let table_base = self.memory.table_base(i);
            self.memory.directory_mut()[i] = directory_entry(table_base);
            trace!("Directory entry {i:04} -> table at {table_base}");

            for (j, entry) in self.memory.table_mut(i).iter_mut().enumerate() {
                *entry = table_entry(frame.nth(j as u32).base());
            }
        }

        if counts.table_entries_over_provisioned() > 0 {
            debug!(
                "Last table maps {} entries past the requested size",
                counts.table_entries_over_provisioned()
            );
        }

        self.counts = counts;
        Ok(counts)
    }

    /// Zero every entry.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.counts = Counts::default();
    }

    /// Physical base of the page directory, as loaded into CR3.
    pub fn cr3(&self) -> PhysAddr {
        self.cr3
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    pub fn directory_entry(&self, index: usize) -> Option<DirectoryEntry> {
        self.memory.directory().get(index).copied()
    }

    pub fn table_entry(&self, directory: usize, index: usize) -> Option<TableEntry> {
        self.memory.table(directory)?.get(index).copied()
    }

    /// Physical base of the table reserved for directory slot `index`.
    pub fn table_base(&self, index: usize) -> PhysAddr {
        self.memory.table_base(index)
    }

    /// Physical base of the page mapped by entry `index` of any table.
    pub fn frame_base(&self, index: usize) -> PhysAddr {
        debug_assert!(index < TABLE_ENTRIES);
        self.memory.frame().nth(index as u32).base()
    }
}

impl Default for Mmu {
    fn default() -> Self {
        Self::new()
    }
}

fn directory_entry(table: PhysAddr) -> DirectoryEntry {
    DirectoryEntry::new()
        .with_present(true)
        .with_writable(true)
        .with_user(true)
        .with_write_through(true)
        .with_cache_disabled(true)
        .with_accessed(false)
        .with_dirty(true)
        .with_page_size(true)
        .with_table(table)
}

fn table_entry(frame: PhysAddr) -> TableEntry {
    TableEntry::new()
        .with_dirty(false)
        .with_accessed(false)
        .with_pat(false)
        .with_cache_disabled(false)
        .with_ignored(true)
        .with_present(true)
        .with_writable(true)
        .with_user(true)
        .with_write_through(true)
        .with_frame_addr(frame)
}
