use std::{
    fmt::Display,
    ops::{Add, BitAnd},
};

pub const PAGE_SIZE: u32 = 4096;
pub const PAGE_SHIFT: u32 = 12;

const OFFSET_MASK: u32 = PAGE_SIZE - 1;
const INDEX_MASK: u32 = 0x3ff;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(u32);
impl Display for PhysAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P0x{:x}", self.0)
    }
}
impl PhysAddr {
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }
    pub const fn from_frame_number(frame: u32) -> Self {
        Self(frame << PAGE_SHIFT)
    }
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.0 &= !OFFSET_MASK;
        self.0 |= offset & OFFSET_MASK;
        self
    }
    pub const fn frame_offset(self) -> u32 {
        self.0 & OFFSET_MASK
    }
    pub const fn frame_number(self) -> u32 {
        self.0 >> PAGE_SHIFT
    }
    pub const fn is_frame_aligned(self) -> bool {
        self.frame_offset() == 0
    }
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitAnd<u32> for PhysAddr {
    type Output = Self;

    fn bitand(mut self, rhs: u32) -> Self::Output {
        self.0 &= rhs;
        self
    }
}

impl Add<u32> for PhysAddr {
    type Output = PhysAddr;

    fn add(mut self, rhs: u32) -> Self::Output {
        self.0 += rhs;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(u32);
impl Display for VirtAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "V0x{:x}", self.0)
    }
}

impl VirtAddr {
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }
    /// Address of byte `offset` in the page selected by the two indices.
    ///
    /// Indices are masked to 10 bits and the offset to 12 bits.
    pub const fn from_indices(directory: usize, table: usize, offset: u32) -> Self {
        let directory = directory as u32 & INDEX_MASK;
        let table = table as u32 & INDEX_MASK;
        Self((directory << 22) | (table << PAGE_SHIFT) | (offset & OFFSET_MASK))
    }
    pub const fn page_offset(self) -> u32 {
        self.0 & OFFSET_MASK
    }
    /// Bits 31:22.
    pub const fn directory_index(self) -> usize {
        (self.0 >> 22) as usize
    }
    /// Bits 21:12.
    pub const fn table_index(self) -> usize {
        ((self.0 >> PAGE_SHIFT) & INDEX_MASK) as usize
    }
    pub const fn bits(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_virtual_address() {
        let virt = VirtAddr::from_bits(0xC040_3ABC);
        assert_eq!(virt.directory_index(), 0x301);
        assert_eq!(virt.table_index(), 0x003);
        assert_eq!(virt.page_offset(), 0xABC);
        assert_eq!(VirtAddr::from_indices(0x301, 0x003, 0xABC), virt);
    }

    #[test]
    fn phys_frame_parts() {
        let phys = PhysAddr::from_bits(0x0050_102f);
        assert_eq!(phys.bits(), 0x0050_102f);
        assert_eq!(phys.frame_number(), 0x501);
        assert_eq!(phys.frame_offset(), 0x2f);
        assert!(!phys.is_frame_aligned());
        assert!(phys.with_offset(0).is_frame_aligned());
        assert_eq!((phys & !0xfff).bits(), 0x0050_1000);
    }

    #[test]
    fn display_prefixes() {
        assert_eq!(PhysAddr::from_bits(0x1000).to_string(), "P0x1000");
        assert_eq!(VirtAddr::from_bits(0x400000).to_string(), "V0x400000");
    }
}
