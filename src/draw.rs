//! Module for the boring formatting stuff of all the components

use crate::{
    addr::VirtAddr,
    inspect::Row,
    mmu::Mmu,
    page::{DirectoryEntry, TableEntry},
};

pub const DIRECTORY_HEADER: &str =
    "present\tRW\tuser\twritethru\tcachedis\taccessed\tdirty\tpgsize\tignore\tpgtableaddr";
pub const TABLE_HEADER: &str =
    "present\tRW\tuser\twritethru\tcachedis\taccessed\tdirty\tPAT\tignore\tphysaddr\tvirtaddr";

pub trait Draw {
    fn draw(&self) -> String;
}

fn bit(flag: bool) -> u8 {
    flag as u8
}

impl Draw for DirectoryEntry {
    fn draw(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t0x{:05x}",
            bit(self.present()),
            bit(self.writable()),
            bit(self.user()),
            bit(self.write_through()),
            bit(self.cache_disabled()),
            bit(self.accessed()),
            bit(self.dirty()),
            bit(self.page_size()),
            bit(self.ignored()),
            self.table_address(),
        )
    }
}

impl Draw for TableEntry {
    fn draw(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t0x{:05x}",
            bit(self.present()),
            bit(self.writable()),
            bit(self.user()),
            bit(self.write_through()),
            bit(self.cache_disabled()),
            bit(self.accessed()),
            bit(self.dirty()),
            bit(self.pat()),
            bit(self.ignored()),
            self.frame_address(),
        )
    }
}

impl Draw for Row {
    /// Directory rows come with both headers, so the table rows that follow
    /// line up under theirs.
    fn draw(&self) -> String {
        match self {
            Row::Directory { index, entry } => {
                format!(
                    "[{index:04}]\n{DIRECTORY_HEADER}\n{}\n{TABLE_HEADER}",
                    entry.draw()
                )
            }
            Row::Table { entry, virt, .. } => format!("{}\t0x{:08x}", entry.draw(), virt.bits()),
        }
    }
}

pub trait MmuDraw {
    fn draw_summary(&self) -> String;
    fn draw_translation(&self, virt: VirtAddr) -> String;
}

impl MmuDraw for Mmu {
    fn draw_summary(&self) -> String {
        let counts = self.counts();
        format!(
            "memsize = {}, pgdiraddr = 0x{:x}, pgtabcnt = {}, pgcnt = {}",
            counts.required_bytes,
            self.cr3().bits(),
            counts.directory_entry_count,
            counts.pages_count
        )
    }

    fn draw_translation(&self, virt: VirtAddr) -> String {
        match self.translate_current(virt) {
            Ok(phys) => format!("{virt} -> {phys}"),
            Err(fault) => format!("{virt} -> fault: {fault}"),
        }
    }
}

/// Frame `content` with a rounded box titled `title`.
pub fn boxed(title: &str, content: &str) -> String {
    let lines: Vec<_> = content.lines().collect();
    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(4 + title.len());
    let mut buf = String::new();

    let width = width + 1;

    buf += "╭─";
    buf += title;
    buf += &"─".repeat(width - title.len());
    buf += "╮\n";

    for line in lines {
        buf += "│ ";
        buf += line;
        buf += &" ".repeat(width - line.chars().count());
        buf += "│\n";
    }
    buf += "╰";
    buf += &"─".repeat(width + 1);
    buf += "╯";

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line() {
        let mmu = Mmu::build(65536).unwrap();
        assert_eq!(
            mmu.draw_summary(),
            "memsize = 65536, pgdiraddr = 0x100000, pgtabcnt = 1, pgcnt = 16"
        );
    }

    #[test]
    fn table_row_columns() {
        let mmu = Mmu::build(4096).unwrap();
        let row = mmu.dump().nth(2).unwrap().draw();
        assert_eq!(row, "1\t1\t1\t1\t0\t0\t0\t0\t1\t0x00502\t0x00001000");
        assert_eq!(row.split('\t').count(), TABLE_HEADER.split('\t').count());
    }

    #[test]
    fn directory_row_has_headers() {
        let mmu = Mmu::build(4096).unwrap();
        let text = mmu.dump().next().unwrap().draw();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "[0000]");
        assert_eq!(lines[1], DIRECTORY_HEADER);
        assert_eq!(lines[2], "1\t1\t1\t1\t1\t0\t1\t1\t0\t0x00101");
        assert_eq!(lines[3], TABLE_HEADER);
    }

    #[test]
    fn translation_lines() {
        let mmu = Mmu::build(4096).unwrap();
        assert_eq!(
            mmu.draw_translation(VirtAddr::from_bits(0x2010)),
            "V0x2010 -> P0x503010"
        );
        assert!(mmu
            .draw_translation(VirtAddr::from_bits(0x0040_0000))
            .contains("fault"));
    }

    #[test]
    fn box_fits_content() {
        let out = boxed("Pages", "ab\nabcdef");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }
}
