// ============================================================================
// src/io/audio/cs4624/dma.rs - DMA Channel Control
// ============================================================================
//!
//! 転送方向ごとの DMA チャンネル制御。
//!
//! DMR / DCR / FCR の制御ワードは `ControlWords` に保持し、構築してから
//! 固定順序でハードウェアに書き込む。ハードウェアは特定の書き込みで
//! 状態をラッチするため、順序を変えてはならない。

use crate::io::mmio::RegisterIo;
use crate::time::Delay;

use super::config::SampleBits;
use super::controller::DeviceContext;
use super::regs::*;
use super::types::{Cs4624Error, Cs4624Result, DataMode, Direction, RegWidth};

/// Largest transfer the 16-bit base count register can describe
pub const MAX_TRANSFER_LEN: u32 = 0x1_0000;

impl<R: RegisterIo, D: Delay> DeviceContext<R, D> {
    /// Build the data-mode word for a sample format (not written yet)
    pub fn configure_format(
        &mut self,
        dir: Direction,
        bits: SampleBits,
        signed: bool,
        stereo: bool,
    ) {
        let mut dmr = DataMode::TEMPLATE;
        if !stereo {
            dmr |= DataMode::MONO;
        }
        if !signed {
            dmr |= DataMode::USIGN;
        }
        match bits {
            SampleBits::Bits8 => {
                dmr |= DataMode::SIZE8;
                // Mono 8-bit samples land swapped in the FIFO
                if !stereo {
                    dmr |= DataMode::SWAPC;
                }
            }
            SampleBits::Bits16 => {}
            SampleBits::Bits32 => dmr |= DataMode::SIZE32,
        }
        self.words_mut(dir).dmr = dmr;
    }

    /// Enable DMA and the FIFO for one direction
    pub fn dma_start(&mut self, dir: Direction) {
        let regs = dir.regs();
        let words = self.words_mut(dir);
        words.dcr = DCR_TEMPLATE & !DCR_MSK;
        words.fcr = regs.fcr_template | FCR_FEN;
        words.dmr |= DataMode::DMA | regs.transfer;
        let words = *words;

        self.poke_ba0(regs.fsic, 0);
        // DMA enable must not latch before the FIFO template is committed
        self.poke_ba0(regs.dmr, (words.dmr - DataMode::DMA).bits());
        self.poke_ba0(regs.dmr, words.dmr.bits());
        self.poke_ba0(regs.fcr, words.fcr);
        self.poke_ba0(regs.dcr, words.dcr);
    }

    /// Disable DMA and the FIFO for one direction
    pub fn dma_stop(&mut self, dir: Direction) {
        let regs = dir.regs();
        let words = self.words_mut(dir);
        words.dmr.remove(DataMode::DMA | DataMode::POLL);
        words.dcr |= DCR_MSK;
        words.fcr &= !FCR_FEN;
        let words = *words;

        self.poke_ba0(regs.dmr, words.dmr.bits());
        self.poke_ba0(regs.fcr, words.fcr);
        self.poke_ba0(regs.dcr, words.dcr);
    }

    /// Program the transfer window; `len` counts transfer units, `1..=65536`
    pub fn set_transfer(&mut self, dir: Direction, addr: u32, len: u32) -> Cs4624Result<()> {
        if len == 0 || len > MAX_TRANSFER_LEN {
            return Err(Cs4624Error::InvalidConfig("transfer length"));
        }
        let regs = dir.regs();
        self.poke_ba0(regs.base_addr, addr);
        self.poke_ba0(regs.base_count, len - 1);
        Ok(())
    }

    /// Low 16 bits of the current transfer count
    pub fn current_position(&self, dir: Direction) -> u16 {
        let regs = dir.regs();
        match regs.current_count_width {
            RegWidth::Bits32 => (self.peek_ba0(regs.current_count) & 0xFFFF) as u16,
            RegWidth::Bits16 => self.peek16_ba0(regs.current_count),
        }
    }

    /// Remember this direction's half of its task control word.
    ///
    /// Only meaningful right after a firmware download, while the half
    /// still holds the value the image was loaded with.
    pub fn latch_control(&mut self, dir: Direction) -> Cs4624Result<u32> {
        let regs = dir.regs();
        let ctl = self.peek_ba1(regs.ctl_reg)? & regs.ctl_half;
        self.words_mut(dir).active_ctl = Some(ctl);
        Ok(ctl)
    }

    /// Clear this direction's half of its task control word
    pub fn pause(&mut self, dir: Direction) -> Cs4624Result<()> {
        let regs = dir.regs();
        let other = self.peek_ba1(regs.ctl_reg)? & !regs.ctl_half;
        self.poke_ba1(regs.ctl_reg, other)
    }

    /// Restore the latched control half, keeping the other direction's half
    pub fn resume(&mut self, dir: Direction) -> Cs4624Result<()> {
        let regs = dir.regs();
        let active = self
            .words(dir)
            .active_ctl
            .ok_or(Cs4624Error::ChannelNotStarted)?;
        let other = self.peek_ba1(regs.ctl_reg)? & !regs.ctl_half;
        self.poke_ba1(regs.ctl_reg, active | other)
    }
}
