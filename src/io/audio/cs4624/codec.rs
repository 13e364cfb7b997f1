// ============================================================================
// src/io/audio/cs4624/codec.rs - AC'97 Codec Link
// ============================================================================
//!
//! AC-link 経由の AC'97 コーデックレジスタアクセス。
//!
//! 1 トランザクション = オペランドのステージング → DCV ストローブ →
//! 完了ポーリング → (読み出しのみ) VSTS ポーリング → 結果取得。
//! すべてのポーリングは固定回数で打ち切られる。

use crate::io::mmio::RegisterIo;
use crate::time::Delay;

use super::controller::DeviceContext;
use super::regs::*;
use super::types::{CodecError, CodecResult};

/// ACCTL bits held constant during every command
const ACCTL_COMMAND: u32 = ACCTL_VFRM | ACCTL_ESYN | ACCTL_RSTN;

impl<R: RegisterIo, D: Delay> DeviceContext<R, D> {
    /// Poll ACCTL until DCV clears, delaying before each check
    fn wait_command_done(&self, polls: u32) -> bool {
        for _ in 0..polls {
            self.delay_us(POLL_DELAY_US);
            if self.peek_ba0(BA0_ACCTL) & ACCTL_DCV == 0 {
                return true;
            }
        }
        false
    }

    /// Write an AC'97 codec register
    pub fn codec_write(&self, reg: u8, value: u16) -> CodecResult<()> {
        self.poke_ba0(BA0_ACCAD, reg as u32);
        self.poke_ba0(BA0_ACCDA, value as u32);
        self.peek_ba0(BA0_ACCTL);

        // DCV low then high: write command (CRW clear)
        self.poke_ba0(BA0_ACCTL, ACCTL_COMMAND);
        self.poke_ba0(BA0_ACCTL, ACCTL_DCV | ACCTL_COMMAND);

        if self.wait_command_done(CODEC_WRITE_POLLS) {
            return Ok(());
        }

        log::error!(
            "[CS4624] AC'97 write problem, reg = 0x{:02x}, val = 0x{:04x}",
            reg,
            value
        );
        Err(CodecError::WriteTimeout { reg })
    }

    /// Read an AC'97 codec register
    pub fn codec_read(&self, reg: u8) -> CodecResult<u16> {
        // Flush stale status data
        self.peek_ba0(BA0_ACSDA);

        let ctl = self.peek_ba0(BA0_ACCTL);
        if ctl & ACCTL_VFRM == 0 {
            log::warn!("[CS4624] ACCTL_VFRM not set 0x{:x}, re-asserting", ctl);
            self.poke_ba0(BA0_ACCTL, (ctl & !ACCTL_ESYN) | ACCTL_VFRM);
            self.delay_us(VFRM_SETTLE_US);
            let ctl = self.peek_ba0(BA0_ACCTL);
            self.poke_ba0(BA0_ACCTL, ctl | ACCTL_ESYN | ACCTL_VFRM);
        }

        self.poke_ba0(BA0_ACCAD, reg as u32);
        self.poke_ba0(BA0_ACCDA, 0);
        self.poke_ba0(BA0_ACCTL, ACCTL_CRW | ACCTL_COMMAND);
        self.poke_ba0(BA0_ACCTL, ACCTL_DCV | ACCTL_CRW | ACCTL_COMMAND);

        if !self.wait_command_done(CODEC_READ_POLLS) {
            log::error!("[CS4624] AC'97 read problem (ACCTL_DCV), reg = 0x{:02x}", reg);
            return Err(CodecError::CommandTimeout { reg });
        }

        // Command completion and data validity come from different stages
        let mut valid = false;
        for _ in 0..CODEC_STATUS_POLLS {
            if self.peek_ba0(BA0_ACSTS) & ACSTS_VSTS != 0 {
                valid = true;
                break;
            }
            self.delay_us(POLL_DELAY_US);
        }
        if !valid {
            log::error!("[CS4624] AC'97 read problem (ACSTS_VSTS), reg = 0x{:02x}", reg);
            return Err(CodecError::StatusTimeout { reg });
        }

        Ok(self.peek_ba0(BA0_ACSDA) as u16)
    }

    /// Read-modify-write a codec register
    pub fn codec_update(&self, reg: u8, mask: u16, value: u16) -> CodecResult<u16> {
        let old = self.codec_read(reg)?;
        let new = (old & !mask) | (value & mask);
        if new != old {
            self.codec_write(reg, new)?;
        }
        Ok(new)
    }
}
