// ============================================================================
// src/io/audio/cs4624/interrupt.rs - Interrupt Decoding
// ============================================================================
//!
//! HISR の読み出しと一括確認応答、およびチャンネルごとの要因判定。
//!
//! 読み出しと HICR への確認応答の間に到着した要因は報告されずに
//! クリアされる (ハードウェア側の既知の競合)。

use crate::io::mmio::RegisterIo;
use crate::time::Delay;

use super::controller::DeviceContext;
use super::regs::*;
use super::types::{Cs4624Result, Direction, InterruptStatus};

/// HICR acknowledge pattern
const HICR_ACK: u32 = HICR_CHGM | HICR_IEV;

impl<R: RegisterIo, D: Delay> DeviceContext<R, D> {
    /// Snapshot HISR, then acknowledge every source
    pub fn read_and_clear(&mut self) -> InterruptStatus {
        let status = InterruptStatus::from_bits_retain(self.peek_ba0(BA0_HISR));
        self.poke_ba0(BA0_HICR, HICR_ACK);
        self.intr_status = status;
        status
    }

    /// Last snapshot taken by `read_and_clear`
    pub fn interrupt_status(&self) -> InterruptStatus {
        self.intr_status
    }

    /// Whether the last snapshot carries a cause for `dir`
    pub fn classify(&self, dir: Direction) -> bool {
        self.intr_status.has(dir)
    }

    fn write_interrupt_field(&self, dir: Direction, enable: bool) -> Cs4624Result<()> {
        let regs = dir.regs();
        let pattern = if enable { regs.irq_enable } else { regs.irq_disable };
        let value = (self.peek_ba1(regs.irq_enable_reg)? & !regs.irq_clear_mask) | pattern;
        self.poke_ba1(regs.irq_enable_reg, value)
    }

    /// Unmask SP interrupts of one direction
    pub fn enable_interrupts(&mut self, dir: Direction) -> Cs4624Result<()> {
        self.poke_ba0(BA0_HICR, HICR_ACK);
        self.write_interrupt_field(dir, true)
    }

    /// Mask SP interrupts of one direction
    pub fn disable_interrupts(&mut self, dir: Direction) -> Cs4624Result<()> {
        self.poke_ba0(BA0_HICR, HICR_ACK);
        self.write_interrupt_field(dir, false)
    }

    pub fn enable_all_interrupts(&mut self) -> Cs4624Result<()> {
        self.poke_ba0(BA0_HICR, HICR_ACK);
        for dir in Direction::ALL {
            self.write_interrupt_field(dir, true)?;
        }
        Ok(())
    }

    pub fn disable_all_interrupts(&mut self) -> Cs4624Result<()> {
        self.poke_ba0(BA0_HICR, HICR_ACK);
        for dir in Direction::ALL {
            self.write_interrupt_field(dir, false)?;
        }
        Ok(())
    }
}
