// ============================================================================
// src/io/audio/cs4624/region.rs - Register Window Map
// ============================================================================
//!
//! # レジスタウィンドウマップ
//!
//! CS4624 は 2 つの物理的に独立したレジスタ空間を持つ:
//! - BA0: ホスト制御レジスタ (BAR0)
//! - BA1: SP プロセッサのデータ / プログラムメモリとレジスタ (BAR1)
//!
//! BA1 はさらに 4 つのバンクに分割される。各ウィンドウはバインド時に
//! 一度だけ解決され、以降は不変。

use core::fmt;

use super::regs::*;
use super::types::{Cs4624Error, Cs4624Result, DeviceIdentity};
use crate::io::pci::{Bar, PlatformBus};

/// Bytes of BAR1 covered by the four BA1 banks
pub const BA1_SPAN: usize = BA1_SP_REG as usize + BA1_REG_SIZE;

// ============================================================================
// Region Identifier
// ============================================================================

/// Named register window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionId {
    /// Host control registers
    Ba0,
    /// SP data memory bank 0
    Data0,
    /// SP data memory bank 1
    Data1,
    /// SP program memory
    Program,
    /// SP registers
    Register,
}

impl RegionId {
    /// All windows in storage order
    pub const ALL: [RegionId; 5] = [
        RegionId::Ba0,
        RegionId::Data0,
        RegionId::Data1,
        RegionId::Program,
        RegionId::Register,
    ];

    /// BA1 banks indexed by the bank field of an encoded address
    pub const BA1_BANKS: [RegionId; 4] = [
        RegionId::Data0,
        RegionId::Data1,
        RegionId::Program,
        RegionId::Register,
    ];

    pub const fn index(self) -> usize {
        match self {
            RegionId::Ba0 => 0,
            RegionId::Data0 => 1,
            RegionId::Data1 => 2,
            RegionId::Program => 3,
            RegionId::Register => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RegionId::Ba0 => "CS4624_BA0",
            RegionId::Data0 => "CS4624_BA1_data0",
            RegionId::Data1 => "CS4624_BA1_data1",
            RegionId::Program => "CS4624_BA1_pmem",
            RegionId::Register => "CS4624_BA1_reg",
        }
    }

    /// Window size in bytes
    pub const fn size(self) -> usize {
        match self {
            RegionId::Ba0 => BA0_SIZE,
            RegionId::Data0 => BA1_DATA0_SIZE,
            RegionId::Data1 => BA1_DATA1_SIZE,
            RegionId::Program => BA1_PRG_SIZE,
            RegionId::Register => BA1_REG_SIZE,
        }
    }

    /// Offset of the window inside its BAR
    pub const fn bar_offset(self) -> u32 {
        match self {
            RegionId::Ba0 => 0,
            RegionId::Data0 => BA1_SP_DMEM0,
            RegionId::Data1 => BA1_SP_DMEM1,
            RegionId::Program => BA1_SP_PMEM,
            RegionId::Register => BA1_SP_REG,
        }
    }
}

// ============================================================================
// Region
// ============================================================================

/// One resolved register window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    /// Physical base address
    pub phys_base: u64,
    /// Mapped (virtual) address
    pub virt_base: usize,
    /// Window size in bytes
    pub size: usize,
}

impl Region {
    pub const fn name(&self) -> &'static str {
        self.id.name()
    }

    /// Mapped address of a `width`-byte access at `offset`, if it fits
    pub fn addr(&self, offset: u32, width: usize) -> Option<usize> {
        let offset = offset as usize;
        let end = offset.checked_add(width)?;
        if end > self.size || offset % width != 0 {
            return None;
        }
        Some(self.virt_base + offset)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} phys 0x{:x} virt 0x{:x} size 0x{:x}",
            self.name(),
            self.phys_base,
            self.virt_base,
            self.size
        )
    }
}

// ============================================================================
// Region Map
// ============================================================================

/// Every register window of one controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMap {
    regions: [Region; 5],
}

impl RegionMap {
    /// Build the map from already-mapped BAR0 / BAR1 windows.
    ///
    /// BA1 banks are placed at their fixed offsets inside the BAR1 mapping.
    pub fn from_mapped(ba0_phys: u64, ba0_virt: usize, ba1_phys: u64, ba1_virt: usize) -> Self {
        let regions = RegionId::ALL.map(|id| {
            let (phys, virt) = match id {
                RegionId::Ba0 => (ba0_phys, ba0_virt),
                _ => (ba1_phys, ba1_virt),
            };
            Region {
                id,
                phys_base: phys + id.bar_offset() as u64,
                virt_base: virt + id.bar_offset() as usize,
                size: id.size(),
            }
        });
        Self { regions }
    }

    /// Locate the controller on the platform bus and map both BARs.
    pub fn resolve<B: PlatformBus>(bus: &B) -> Cs4624Result<(DeviceIdentity, Self)> {
        let func = bus
            .find_device(CS4624_VENDOR_ID, CS4624_DEVICE_ID)
            .ok_or(Cs4624Error::NoDevice)?;

        log::info!("[CS4624] Found controller {}", func);

        let ba0 = memory_bar(func.bar(0), 0, BA0_SIZE)?;
        let ba1 = memory_bar(func.bar(1), 1, BA1_SPAN)?;

        let ba0_virt = bus
            .map_physical(ba0.base(), BA0_SIZE)
            .ok_or(Cs4624Error::MapFailed(0))?;
        let ba1_virt = bus
            .map_physical(ba1.base(), BA1_SPAN)
            .ok_or(Cs4624Error::MapFailed(1))?;

        let map = Self::from_mapped(ba0.base(), ba0_virt, ba1.base(), ba1_virt);
        for region in map.iter() {
            log::debug!("[CS4624] {}", region);
        }

        let identity = DeviceIdentity {
            vendor_id: func.vendor_id,
            device_id: func.device_id,
            irq: func.interrupt_line,
            revision: func.revision,
        };
        Ok((identity, map))
    }

    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id.index()]
    }

    pub fn ba0(&self) -> &Region {
        self.region(RegionId::Ba0)
    }

    pub fn data0(&self) -> &Region {
        self.region(RegionId::Data0)
    }

    pub fn data1(&self) -> &Region {
        self.region(RegionId::Data1)
    }

    pub fn program(&self) -> &Region {
        self.region(RegionId::Program)
    }

    pub fn sp_registers(&self) -> &Region {
        self.region(RegionId::Register)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Split an encoded BA1 address into its bank window and offset
    pub fn ba1_bank(&self, addr: u32) -> Cs4624Result<(&Region, u32)> {
        let bank = (addr >> BA1_BANK_SHIFT) as usize;
        let id = RegionId::BA1_BANKS
            .get(bank)
            .ok_or(Cs4624Error::InvalidRegister(addr))?;
        Ok((self.region(*id), addr & BA1_OFFSET_MASK))
    }

    /// Mapped address of a 32-bit word at an encoded BA1 address
    pub fn locate_ba1(&self, addr: u32) -> Cs4624Result<usize> {
        let (region, offset) = self.ba1_bank(addr)?;
        region
            .addr(offset, 4)
            .ok_or(Cs4624Error::InvalidRegister(addr))
    }
}

fn memory_bar(bar: Option<Bar>, index: u8, min_size: usize) -> Cs4624Result<Bar> {
    match bar {
        Some(bar) if bar.is_memory() && bar.size() >= min_size as u64 => Ok(bar),
        Some(bar) => {
            log::error!("[CS4624] BAR{} unusable: {:?}", index, bar);
            Err(Cs4624Error::InvalidBar(index))
        }
        None => {
            log::error!("[CS4624] BAR{} missing", index);
            Err(Cs4624Error::InvalidBar(index))
        }
    }
}
