// ============================================================================
// src/io/audio/cs4624/rate.rs - Sample-Rate Converter Coefficients
// ============================================================================
//!
//! # サンプルレート変換係数
//!
//! ハードウェアの基準レート (48 kHz) と要求レートから、SP 上の SRC /
//! VariDecimate / WriteBack タスクが使用する固定小数点係数を導出する。
//!
//! 64 ビット積を使わず、32 ビット除算と段階的な左シフトで被除数を
//! 広げることで、ハードウェアが期待する丸めをビット単位で再現する。

use crate::io::mmio::RegisterIo;
use crate::time::Delay;

use super::controller::DeviceContext;
use super::regs::*;
use super::types::Cs4624Result;

/// Lowest capture rate the decimator supports, `ceil(48000 / 9)`
pub const CAPTURE_MIN_RATE: u32 = SRC_HW_RATE.div_ceil(CAPTURE_MAX_DECIMATION);

/// Playback sample-rate converter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSrc {
    /// `floor(rate * 2^26 / 48000)`
    pub phi_incr: u32,
    pub correction_per_gof: u32,
    pub correction_per_sec: u32,
}

impl PlaybackSrc {
    /// Derive the block for a playback rate in `1..=65535` Hz.
    pub fn new(rate: u32) -> Self {
        let mut tmp1 = rate << 16;
        let mut phi_incr = tmp1 / SRC_HW_RATE;
        tmp1 -= phi_incr * SRC_HW_RATE;
        tmp1 <<= 10;
        phi_incr <<= 10;
        let tmp2 = tmp1 / SRC_HW_RATE;
        phi_incr += tmp2;
        tmp1 -= tmp2 * SRC_HW_RATE;

        let (correction_per_gof, correction_per_sec) = split_correction(tmp1);
        Self {
            phi_incr,
            correction_per_gof,
            correction_per_sec,
        }
    }

    /// PSRC word
    pub fn correction_word(&self) -> u32 {
        correction_word(self.correction_per_gof, self.correction_per_sec)
    }
}

/// Capture (VariDecimate) block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSrc {
    /// Rate after clamping to the decimator's range
    pub rate: u32,
    /// `-floor(rate * 2^23 / 48000)` in two's complement
    pub coeff_incr: u32,
    /// `floor(48000 * 2^26 / rate)`
    pub phi_incr: u32,
    pub correction_per_gof: u32,
    pub correction_per_sec: u32,
    /// `ceil(48000 * 24 / rate)`
    pub initial_delay: u32,
}

impl CaptureSrc {
    pub fn new(rate: u32) -> Self {
        let rate = clamp_capture_rate(rate);

        let mut tmp1 = rate << 16;
        let mut coeff_incr = tmp1 / SRC_HW_RATE;
        tmp1 -= coeff_incr * SRC_HW_RATE;
        tmp1 <<= 7;
        coeff_incr <<= 7;
        coeff_incr += tmp1 / SRC_HW_RATE;
        let coeff_incr = coeff_incr.wrapping_neg();

        let mut tmp1 = SRC_HW_RATE << 16;
        let mut phi_incr = tmp1 / rate;
        tmp1 -= phi_incr * rate;
        tmp1 <<= 10;
        phi_incr <<= 10;
        let tmp2 = tmp1 / rate;
        phi_incr += tmp2;
        tmp1 -= tmp2 * rate;

        let (correction_per_gof, correction_per_sec) = split_correction(tmp1);
        Self {
            rate,
            coeff_incr,
            phi_incr,
            correction_per_gof,
            correction_per_sec,
            initial_delay: (SRC_HW_RATE * 24 + rate - 1) / rate,
        }
    }

    /// CSRC word
    pub fn correction_word(&self) -> u32 {
        correction_word(self.correction_per_gof, self.correction_per_sec)
    }

    /// CD word: decimation buffer start advanced by the initial delay
    pub fn delay_word(&self) -> u32 {
        (((BA1_VARIDEC_BUF_1 + (self.initial_delay << 2)) << 16) & 0xFFFF_0000) | CD_TAIL
    }

    pub fn frame_group_length(&self) -> u32 {
        frame_group_length(self.rate)
    }
}

/// Clamp a capture rate into `[ceil(48000/9), 48000]`
pub fn clamp_capture_rate(rate: u32) -> u32 {
    rate.clamp(CAPTURE_MIN_RATE, SRC_HW_RATE)
}

/// Frame-group length of the capture write-back task.
///
/// The product of the factors of 24000 (`2^6 * 3 * 5^3`) missing from `rate`.
pub fn frame_group_length(rate: u32) -> u32 {
    let mut length = 1;

    let mut cnt = 2;
    while cnt <= 64 {
        if rate % cnt != 0 {
            length *= 2;
        }
        cnt *= 2;
    }
    if rate % 3 != 0 {
        length *= 3;
    }
    let mut cnt = 5;
    while cnt <= 125 {
        if rate % cnt != 0 {
            length *= 5;
        }
        cnt *= 5;
    }
    length
}

/// `(per_gof, per_sec)` = quotient / remainder of the residual over 200 frames
fn split_correction(residual: u32) -> (u32, u32) {
    let per_gof = residual / GOF_PER_SEC;
    (per_gof, residual - per_gof * GOF_PER_SEC)
}

fn correction_word(per_gof: u32, per_sec: u32) -> u32 {
    ((per_sec << 16) & 0xFFFF_0000) | (per_gof & 0xFFFF)
}

// ============================================================================
// Control Block Writes
// ============================================================================

impl<R: RegisterIo, D: Delay> DeviceContext<R, D> {
    /// Fill the playback SRC control block
    pub fn set_playback_rate(&mut self, rate: u32) -> Cs4624Result<()> {
        let src = PlaybackSrc::new(rate);
        log::debug!(
            "[CS4624] Playback SRC {} Hz: phi 0x{:08x} psrc 0x{:08x}",
            rate,
            src.phi_incr,
            src.correction_word()
        );

        self.poke_ba1(BA1_PSRC, src.correction_word())?;
        self.poke_ba1(BA1_PPI, src.phi_incr)
    }

    /// Fill the capture VariDecimate and WriteBack control blocks
    pub fn set_capture_rate(&mut self, rate: u32) -> Cs4624Result<()> {
        let src = CaptureSrc::new(rate);
        if src.rate != rate {
            log::warn!("[CS4624] Capture rate {} Hz clamped to {} Hz", rate, src.rate);
        }
        log::debug!(
            "[CS4624] Capture SRC {} Hz: coeff 0x{:08x} phi 0x{:08x} delay {}",
            src.rate,
            src.coeff_incr,
            src.phi_incr,
            src.initial_delay
        );

        self.poke_ba1(BA1_CSRC, src.correction_word())?;
        self.poke_ba1(BA1_CCI, src.coeff_incr)?;
        self.poke_ba1(BA1_CD, src.delay_word())?;
        self.poke_ba1(BA1_CPI, src.phi_incr)?;

        let group = src.frame_group_length();
        self.poke_ba1(BA1_CFG1, group)?;
        self.poke_ba1(BA1_CFG2, CFG2_WRITEBACK_ENABLE | group)?;
        self.poke_ba1(BA1_CCST, 0x0000_FFFF)?;
        self.poke_ba1(BA1_CSPB, (65536 * src.rate) / WRITEBACK_FRAME_RATE)?;
        self.poke_ba1(BA1_CSPB + 4, 0x0000_FFFF)
    }
}
