//! Read-only view of the populated entries.

use crate::{
    addr::VirtAddr,
    mmu::Mmu,
    page::{DirectoryEntry, TableEntry},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Row {
    Directory {
        index: usize,
        entry: DirectoryEntry,
    },
    Table {
        directory: usize,
        index: usize,
        entry: TableEntry,
        /// `(directory << 22) + (index << 12)`.
        virt: VirtAddr,
    },
}

impl Mmu {
    /// Every populated directory entry, each followed by the 1024 entries of
    /// its table.
    ///
    /// The iterator borrows the structure; call again to restart.
    pub fn dump(&self) -> impl Iterator<Item = Row> + '_ {
        let directory = self.memory.directory();
        (0..self.counts.directory_entry_count).flat_map(move |i| {
            let head = Row::Directory {
                index: i,
                entry: directory[i],
            };
            let rows = self.memory.table(i).into_iter().flat_map(move |table| {
                table.iter().enumerate().map(move |(j, entry)| Row::Table {
                    directory: i,
                    index: j,
                    entry: *entry,
                    virt: VirtAddr::from_indices(i, j, 0),
                })
            });
            std::iter::once(head).chain(rows)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::TABLE_ENTRIES;

    #[test]
    fn one_header_per_table() {
        let mmu = Mmu::build(4096 * 1024 + 1).unwrap();
        let rows: Vec<_> = mmu.dump().collect();
        assert_eq!(rows.len(), 2 * (1 + TABLE_ENTRIES));
        assert!(matches!(rows[0], Row::Directory { index: 0, .. }));
        assert!(matches!(rows[1 + TABLE_ENTRIES], Row::Directory { index: 1, .. }));
    }

    #[test]
    fn table_rows_carry_virtual_address() {
        let mmu = Mmu::build(65536).unwrap();
        let row = mmu.dump().nth(1 + 5).unwrap();
        match row {
            Row::Table {
                directory,
                index,
                entry,
                virt,
            } => {
                assert_eq!((directory, index), (0, 5));
                assert_eq!(virt.bits(), 5 << 12);
                assert_eq!(entry.frame_phys_addr(), mmu.frame_base(5));
            }
            Row::Directory { .. } => panic!("expected a table row"),
        }

        let last = mmu.dump().last().unwrap();
        assert!(matches!(last, Row::Table { index: 1023, .. }));
    }

    #[test]
    fn empty_structure_has_no_rows() {
        let mmu = Mmu::build(0).unwrap();
        assert_eq!(mmu.dump().count(), 0);
    }

    #[test]
    fn dump_is_restartable() {
        let mmu = Mmu::build(8192).unwrap();
        let first: Vec<_> = mmu.dump().collect();
        let second: Vec<_> = mmu.dump().collect();
        assert_eq!(first, second);
    }
}
