// ============================================================================
// src/io/mmio.rs - Register Access Abstraction
// ============================================================================
//!
//! # レジスタアクセス抽象
//!
//! マップ済みレジスタウィンドウへの読み書きを抽象化するトレイト。
//! 実機では `VolatileMmio` を使用し、テストではシミュレートされた
//! レジスタファイルに差し替える。

use core::ptr::{read_volatile, write_volatile};

/// Register accessor for mapped register windows.
///
/// Addresses are mapped (virtual) addresses produced by region resolution,
/// already combined with the register offset.
pub trait RegisterIo {
    /// 16ビット読み取り
    fn read16(&self, addr: usize) -> u16;

    /// 32ビット読み取り
    fn read32(&self, addr: usize) -> u32;

    /// 32ビット書き込み
    fn write32(&self, addr: usize, value: u32);
}

impl<T: RegisterIo + ?Sized> RegisterIo for &T {
    #[inline]
    fn read16(&self, addr: usize) -> u16 {
        (**self).read16(addr)
    }

    #[inline]
    fn read32(&self, addr: usize) -> u32 {
        (**self).read32(addr)
    }

    #[inline]
    fn write32(&self, addr: usize, value: u32) {
        (**self).write32(addr, value)
    }
}

/// Volatile MMIO accessor for real hardware
#[derive(Debug)]
pub struct VolatileMmio {
    _private: (),
}

impl VolatileMmio {
    /// Create the accessor.
    ///
    /// # Safety
    /// Every address later passed to this accessor must lie inside a register
    /// window mapped by the platform bus, and be aligned to the access width.
    /// The driver only derives addresses from a resolved `RegionMap`, which
    /// bounds-checks each access against the window size.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterIo for VolatileMmio {
    #[inline]
    fn read16(&self, addr: usize) -> u16 {
        // SAFETY: addr lies within a mapped register window (see `new`).
        // read_volatile ensures the read is not optimized away.
        unsafe { read_volatile(addr as *const u16) }
    }

    #[inline]
    fn read32(&self, addr: usize) -> u32 {
        // SAFETY: addr lies within a mapped register window (see `new`).
        unsafe { read_volatile(addr as *const u32) }
    }

    #[inline]
    fn write32(&self, addr: usize, value: u32) {
        // SAFETY: addr lies within a mapped register window (see `new`).
        // write_volatile ensures the write is not optimized away or reordered
        // with other volatile accesses.
        unsafe { write_volatile(addr as *mut u32, value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volatile_mmio_on_plain_memory() {
        let mut backing = [0u32; 4];
        let base = backing.as_mut_ptr() as usize;
        // SAFETY: every access below stays inside `backing`.
        let mmio = unsafe { VolatileMmio::new() };

        mmio.write32(base + 4, 0xDEAD_BEEF);
        assert_eq!(mmio.read32(base + 4), 0xDEAD_BEEF);
        assert_eq!(mmio.read32(base), 0);
        assert_eq!(backing[1], 0xDEAD_BEEF);
    }
}
