use log::debug;

use crate::{
    addr::{PhysAddr, VirtAddr},
    error::{Level, PageFault},
    mmu::Mmu,
};

impl Mmu {
    /// Walk directory -> table -> frame for `virt_addr`, starting from the
    /// page directory at `directory_base`.
    ///
    /// Reads only; never touches accessed or dirty bits.
    pub fn translate(&self, virt_addr: VirtAddr, directory_base: PhysAddr) -> Result<PhysAddr, PageFault> {
        let not_mapped = |level: Level| {
            debug!("Page fault: {virt_addr} has no {level} mapping");
            PageFault::NotMapped {
                addr: virt_addr,
                level,
            }
        };

        let directory = self
            .memory
            .directory_at(directory_base & !0xfff)
            .ok_or(PageFault::UnknownDirectory(directory_base))?;

        let dir_index = virt_addr.directory_index();
        if dir_index >= self.counts.directory_entry_count {
            return Err(not_mapped(Level::Directory));
        }
        let pde = directory[dir_index];
        if !pde.present() {
            return Err(not_mapped(Level::Directory));
        }

        let table = self
            .memory
            .table_at(pde.table_phys_addr())
            .ok_or_else(|| not_mapped(Level::Table))?;
        let pte = table[virt_addr.table_index()];
        if !pte.present() {
            return Err(not_mapped(Level::Table));
        }

        Ok(pte.frame_phys_addr().with_offset(virt_addr.page_offset()))
    }

    /// Translate through the directory this structure loads into CR3.
    pub fn translate_current(&self, virt_addr: VirtAddr) -> Result<PhysAddr, PageFault> {
        self.translate(virt_addr, self.cr3)
    }
}
