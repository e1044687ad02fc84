use crate::{
    addr::PAGE_SIZE,
    error::BuildError,
    page::{DIRECTORY_ENTRIES, TABLE_ENTRIES},
};

/// Largest request the fixed directory can cover.
pub const CAPACITY_BYTES: u64 = DIRECTORY_ENTRIES as u64 * TABLE_ENTRIES as u64 * PAGE_SIZE as u64;

/// Sizes derived from a requested byte count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub required_bytes: u64,
    pub pages_count: usize,
    pub directory_entry_count: usize,
}

impl Counts {
    pub fn for_bytes(required_bytes: u64) -> Result<Self, BuildError> {
        if required_bytes > CAPACITY_BYTES {
            return Err(BuildError::CapacityExceeded {
                requested: required_bytes,
                capacity: CAPACITY_BYTES,
            });
        }
        let pages_count = required_bytes.div_ceil(PAGE_SIZE as u64) as usize;
        let directory_entry_count = pages_count.div_ceil(TABLE_ENTRIES);
        Ok(Self {
            required_bytes,
            pages_count,
            directory_entry_count,
        })
    }

    /// Entries of the last table that are populated but lie past `pages_count`.
    ///
    /// Every populated table is filled completely, so this is non-zero
    /// whenever `pages_count` is not a multiple of 1024.
    pub fn table_entries_over_provisioned(&self) -> usize {
        self.directory_entry_count * TABLE_ENTRIES - self.pages_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_size() {
        let counts = Counts::for_bytes(65536).unwrap();
        assert_eq!(counts.pages_count, 16);
        assert_eq!(counts.directory_entry_count, 1);
        assert_eq!(counts.table_entries_over_provisioned(), 1008);
    }

    #[test]
    fn rounds_up_to_next_table() {
        let counts = Counts::for_bytes(4096 * 1024 + 1).unwrap();
        assert_eq!(counts.pages_count, 1025);
        assert_eq!(counts.directory_entry_count, 2);
    }

    #[test]
    fn zero_is_empty() {
        let counts = Counts::for_bytes(0).unwrap();
        assert_eq!(counts.pages_count, 0);
        assert_eq!(counts.directory_entry_count, 0);
        assert_eq!(counts.table_entries_over_provisioned(), 0);
    }

    #[test]
    fn capacity_boundary() {
        let full = Counts::for_bytes(CAPACITY_BYTES).unwrap();
        assert_eq!(full.pages_count, 1024 * 1024);
        assert_eq!(full.directory_entry_count, 1024);
        assert_eq!(full.table_entries_over_provisioned(), 0);

        assert_eq!(
            Counts::for_bytes(CAPACITY_BYTES + 1),
            Err(BuildError::CapacityExceeded {
                requested: CAPACITY_BYTES + 1,
                capacity: CAPACITY_BYTES,
            })
        );
    }
}
