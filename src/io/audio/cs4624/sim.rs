// ============================================================================
// src/io/audio/cs4624/sim.rs - Simulated CS4624 Register File
// ============================================================================
//!
//! テスト用の CS4624 レジスタファイル。
//!
//! BA0 / BA1 をメモリ上に持ち、AC-link のコマンド (ACCTL.DCV) と
//! ステータス (ACSTS.CRDY / VSTS, ACISV) を模擬する。待機呼び出しは
//! 回数のみ記録し、実時間は消費しない。

use core::cell::RefCell;

use crate::io::mmio::RegisterIo;
use crate::time::Delay;

use super::controller::{Cs4624, DeviceContext};
use super::firmware::{FirmwareImage, FirmwareSegment};
use super::region::{RegionMap, BA1_SPAN};
use super::regs::*;
use super::types::DeviceIdentity;

/// Mapped address of the simulated BA0 window
pub const SIM_BA0_VIRT: usize = 0x1000_0000;

/// Mapped address of the simulated BAR1 window
pub const SIM_BA1_VIRT: usize = 0x2000_0000;

static SIM_CODE: [u32; 4] = [0x0000_0001, 0x0000_0002, 0x0000_0003, 0x0000_0004];
static SIM_SEGMENTS: [FirmwareSegment; 1] = [FirmwareSegment::new(BA1_SP_PMEM, &SIM_CODE)];

struct State {
    ba0: Vec<u32>,
    ba1: Vec<u32>,
    codec: [u16; 64],
    codec_writes: Vec<(u8, u16)>,
    writes: Vec<(usize, u32)>,
    codec_ready: bool,
    slots_valid: bool,
    codec_responding: bool,
    status_valid: bool,
    vsts: bool,
    delay_calls: u64,
}

impl State {
    fn reset_codec(&mut self) {
        self.codec = [0; 64];
        for reg in [
            AC97_MASTER,
            AC97_HEADPHONE,
            AC97_MASTER_MONO,
            AC97_MIC,
            AC97_LINE_IN,
            AC97_CD,
            AC97_PCM_OUT,
            AC97_RECORD_GAIN,
        ] {
            self.codec[reg as usize >> 1] = AC97_MUTE;
        }
        self.codec[AC97_VENDOR_ID1 as usize >> 1] = 0x4352;
        self.codec[AC97_VENDOR_ID2 as usize >> 1] = 0x5914;
    }

    fn codec_command(&mut self, ctl: u32) {
        let reg = (self.ba0[BA0_ACCAD as usize / 4] & 0x7E) as u8;
        if ctl & ACCTL_CRW != 0 {
            self.ba0[BA0_ACSDA as usize / 4] = self.codec[reg as usize >> 1] as u32;
            self.vsts = self.status_valid;
        } else {
            let value = self.ba0[BA0_ACCDA as usize / 4] as u16;
            self.codec_writes.push((reg, value));
            if reg == AC97_RESET {
                self.reset_codec();
            } else {
                self.codec[reg as usize >> 1] = value;
            }
        }
    }
}

/// Simulated controller
pub struct SimChip {
    state: RefCell<State>,
}

impl SimChip {
    pub fn new() -> Self {
        let mut state = State {
            ba0: vec![0; BA0_SIZE / 4],
            ba1: vec![0; BA1_SPAN / 4],
            codec: [0; 64],
            codec_writes: Vec::new(),
            writes: Vec::new(),
            codec_ready: true,
            slots_valid: true,
            codec_responding: true,
            status_valid: true,
            vsts: false,
            delay_calls: 0,
        };
        state.reset_codec();
        Self {
            state: RefCell::new(state),
        }
    }

    pub fn regions() -> RegionMap {
        RegionMap::from_mapped(0xFEB0_0000, SIM_BA0_VIRT, 0xFE80_0000, SIM_BA1_VIRT)
    }

    pub fn device(&self) -> DeviceContext<&Self, &Self> {
        DeviceContext::new(self, self, DeviceIdentity::cs4624(9, 1), Self::regions())
    }

    pub fn driver(&self) -> Cs4624<&Self, &Self> {
        Cs4624::new(
            self,
            self,
            DeviceIdentity::cs4624(9, 1),
            Self::regions(),
            FirmwareImage::new(&SIM_SEGMENTS),
        )
    }

    /// Driver after a successful `init`, with logs and counters cleared
    pub fn initialized_driver(&self) -> Cs4624<&Self, &Self> {
        let mut drv = self.driver();
        drv.init().expect("simulated bring-up");
        self.clear_log();
        drv
    }

    // ========================================================================
    // Behaviour
    // ========================================================================

    pub fn set_codec_ready(&self, ready: bool) {
        self.state.borrow_mut().codec_ready = ready;
    }

    pub fn set_slots_valid(&self, valid: bool) {
        self.state.borrow_mut().slots_valid = valid;
    }

    /// When false, DCV never clears
    pub fn set_codec_responding(&self, responding: bool) {
        self.state.borrow_mut().codec_responding = responding;
    }

    /// When false, VSTS never sets
    pub fn set_status_valid(&self, valid: bool) {
        self.state.borrow_mut().status_valid = valid;
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Raw BA0 register contents
    pub fn ba0(&self, offset: u32) -> u32 {
        self.state.borrow().ba0[offset as usize / 4]
    }

    pub fn set_ba0(&self, offset: u32, value: u32) {
        self.state.borrow_mut().ba0[offset as usize / 4] = value;
    }

    /// Word at an encoded BA1 address
    pub fn ba1(&self, addr: u32) -> u32 {
        self.state.borrow().ba1[addr as usize / 4]
    }

    pub fn set_ba1(&self, addr: u32, value: u32) {
        self.state.borrow_mut().ba1[addr as usize / 4] = value;
    }

    /// BA0 offset of a mapped address
    pub fn ba0_offset(&self, virt: usize) -> u32 {
        (virt - SIM_BA0_VIRT) as u32
    }

    /// Encoded BA1 address of a mapped address
    pub fn ba1_offset(&self, virt: usize) -> u32 {
        (virt - SIM_BA1_VIRT) as u32
    }

    pub fn codec_reg(&self, reg: u8) -> u16 {
        self.state.borrow().codec[reg as usize >> 1]
    }

    pub fn set_codec_reg(&self, reg: u8, value: u16) {
        self.state.borrow_mut().codec[reg as usize >> 1] = value;
    }

    /// Completed codec writes, oldest first
    pub fn codec_writes(&self) -> Vec<(u8, u16)> {
        self.state.borrow().codec_writes.clone()
    }

    /// Register writes as `(mapped address, value)`, oldest first
    pub fn write_log(&self) -> Vec<(usize, u32)> {
        self.state.borrow().writes.clone()
    }

    /// Forget logged writes and delay calls
    pub fn clear_log(&self) {
        let mut state = self.state.borrow_mut();
        state.writes.clear();
        state.codec_writes.clear();
        state.delay_calls = 0;
    }

    pub fn delay_calls(&self) -> u64 {
        self.state.borrow().delay_calls
    }
}

impl RegisterIo for SimChip {
    fn read16(&self, addr: usize) -> u16 {
        let word = self.read32(addr & !3);
        (word >> ((addr & 2) * 8)) as u16
    }

    fn read32(&self, addr: usize) -> u32 {
        let mut state = self.state.borrow_mut();
        if addr >= SIM_BA1_VIRT {
            return state.ba1[(addr - SIM_BA1_VIRT) / 4];
        }

        let offset = (addr - SIM_BA0_VIRT) as u32;
        match offset {
            BA0_ACSTS => {
                let mut status = 0;
                if state.codec_ready {
                    status |= ACSTS_CRDY;
                }
                if state.vsts {
                    status |= ACSTS_VSTS;
                }
                status
            }
            BA0_ACISV if state.slots_valid => ACISV_ISV3 | ACISV_ISV4,
            BA0_ACISV => 0,
            BA0_ACSDA => {
                state.vsts = false;
                state.ba0[offset as usize / 4]
            }
            _ => state.ba0[offset as usize / 4],
        }
    }

    fn write32(&self, addr: usize, value: u32) {
        let mut state = self.state.borrow_mut();
        state.writes.push((addr, value));

        if addr >= SIM_BA1_VIRT {
            state.ba1[(addr - SIM_BA1_VIRT) / 4] = value;
            return;
        }

        let offset = (addr - SIM_BA0_VIRT) as u32;
        if offset == BA0_ACCTL && value & ACCTL_DCV != 0 && state.codec_responding {
            state.codec_command(value);
            state.ba0[offset as usize / 4] = value & !ACCTL_DCV;
        } else {
            state.ba0[offset as usize / 4] = value;
        }
    }
}

impl Delay for SimChip {
    fn delay_us(&self, _us: u64) {
        self.state.borrow_mut().delay_calls += 1;
    }
}
