// ============================================================================
// src/io/pci.rs - Bus Enumeration Interface
// ============================================================================
//!
//! # PCI バス列挙インターフェース
//!
//! バス列挙と BAR の物理マッピングは組み込み先カーネルの PCI サブシステムが
//! 提供する。このモジュールはドライバが消費するインターフェースのみを定義する。

use core::fmt;

// ============================================================================
// BAR
// ============================================================================

/// BAR (Base Address Register) - 簡易版
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bar {
    /// 32-bit メモリマップドI/O
    Memory32 {
        base: u64,
        size: u64,
        prefetchable: bool,
    },
    /// 64-bit メモリマップドI/O
    Memory64 {
        base: u64,
        size: u64,
        prefetchable: bool,
    },
    /// I/Oポート
    Io {
        base: u64,
        size: u64,
    },
}

impl Bar {
    /// ベースアドレスを取得
    pub fn base(&self) -> u64 {
        match self {
            Bar::Memory32 { base, .. } | Bar::Memory64 { base, .. } | Bar::Io { base, .. } => *base,
        }
    }

    /// サイズを取得
    pub fn size(&self) -> u64 {
        match self {
            Bar::Memory32 { size, .. } | Bar::Memory64 { size, .. } | Bar::Io { size, .. } => *size,
        }
    }

    /// メモリマップドかどうか
    pub fn is_memory(&self) -> bool {
        matches!(self, Bar::Memory32 { .. } | Bar::Memory64 { .. })
    }
}

// ============================================================================
// PCI Function
// ============================================================================

/// A PCI function as reported by the platform's bus enumeration service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PciFunction {
    /// Vendor ID
    pub vendor_id: u16,
    /// Device ID
    pub device_id: u16,
    /// Revision ID
    pub revision: u8,
    /// Interrupt line (PCI_ILR)
    pub interrupt_line: u8,
    /// BARs (最大6個)
    pub bars: [Option<Bar>; 6],
}

impl PciFunction {
    /// Get a BAR by index
    pub fn bar(&self, index: usize) -> Option<Bar> {
        self.bars.get(index).copied().flatten()
    }
}

impl fmt::Display for PciFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:04x} rev {:02x} irq {}",
            self.vendor_id, self.device_id, self.revision, self.interrupt_line
        )
    }
}

// ============================================================================
// Platform Bus Trait
// ============================================================================

/// Bus enumeration and physical mapping service consumed by the driver.
pub trait PlatformBus {
    /// Find the first function matching `vendor_id:device_id`
    fn find_device(&self, vendor_id: u16, device_id: u16) -> Option<PciFunction>;

    /// Map `size` bytes of physical address space starting at `base`
    /// into the driver's address space, returning the mapped address.
    fn map_physical(&self, base: u64, size: usize) -> Option<usize>;
}

impl<T: PlatformBus + ?Sized> PlatformBus for &T {
    fn find_device(&self, vendor_id: u16, device_id: u16) -> Option<PciFunction> {
        (**self).find_device(vendor_id, device_id)
    }

    fn map_physical(&self, base: u64, size: usize) -> Option<usize> {
        (**self).map_physical(base, size)
    }
}
