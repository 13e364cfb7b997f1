// ============================================================================
// src/io/audio/cs4624/firmware.rs - SP Reset and Firmware Download
// ============================================================================
//!
//! SP (信号処理プロセッサ) のリセットとファームウェアイメージの転送。
//!
//! イメージは組み込み先から供給される。各セグメントは BA1 の
//! エンコード済みアドレスと 32 ビットワード列で構成される。

use crate::io::mmio::RegisterIo;
use crate::time::Delay;

use super::controller::DeviceContext;
use super::regs::*;
use super::types::{Cs4624Error, Cs4624Result};

/// One contiguous block of SP memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareSegment {
    /// Encoded BA1 address (`bank << 16 | offset`)
    pub offset: u32,
    pub words: &'static [u32],
}

impl FirmwareSegment {
    pub const fn new(offset: u32, words: &'static [u32]) -> Self {
        Self { offset, words }
    }

    /// Length in bytes
    pub const fn len(&self) -> usize {
        self.words.len() * 4
    }

    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Ordered SP memory image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirmwareImage {
    pub segments: &'static [FirmwareSegment],
}

impl FirmwareImage {
    /// Image that downloads nothing
    pub const EMPTY: FirmwareImage = FirmwareImage { segments: &[] };

    pub const fn new(segments: &'static [FirmwareSegment]) -> Self {
        Self { segments }
    }

    /// Total words across all segments
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.words.len()).sum()
    }
}

impl<R: RegisterIo, D: Delay> DeviceContext<R, D> {
    /// Reset the SP and clear its trap registers
    pub fn reset_processor(&mut self) -> Cs4624Result<()> {
        self.poke_ba1(BA1_SPCR, SPCR_RSTSP)?;
        self.poke_ba1(BA1_SPCR, SPCR_DRQEN)?;

        for idx in 0..SP_TRAP_COUNT {
            self.poke_ba1(BA1_DREG, DREG_REGID_TRAP_SELECT + idx)?;
            self.poke_ba1(BA1_TWPR, 0xFFFF)?;
        }
        self.poke_ba1(BA1_DREG, 0)?;

        self.poke_ba1(BA1_FRMT, FRMT_CYCLES_PER_FRAME)
    }

    /// Mapped start address of a segment, if it fits its bank
    fn segment_base(&self, segment: &FirmwareSegment) -> Cs4624Result<usize> {
        let err = Cs4624Error::FirmwareLoad {
            offset: segment.offset,
            len: segment.len(),
        };
        let (region, offset) = self.regions().ba1_bank(segment.offset).map_err(|_| err)?;
        let end = (offset as usize).checked_add(segment.len()).ok_or(err)?;
        if offset % 4 != 0 || end > region.size {
            return Err(err);
        }
        Ok(region.virt_base + offset as usize)
    }

    /// Download every segment of `image`.
    ///
    /// All segments are checked before the first word is written.
    pub fn download_firmware(&self, image: &FirmwareImage) -> Cs4624Result<()> {
        for segment in image.segments {
            if let Err(err) = self.segment_base(segment) {
                log::error!("[CS4624] Image download error: {}", err);
                return Err(err);
            }
        }

        for segment in image.segments {
            let base = self.segment_base(segment)?;
            for (i, word) in segment.words.iter().enumerate() {
                self.poke_mapped(base + i * 4, *word);
            }
        }

        log::debug!(
            "[CS4624] Downloaded {} segments ({} words)",
            image.segments.len(),
            image.word_count()
        );
        Ok(())
    }
}
