// ============================================================================
// src/io/audio/cs4624/mixer.rs - AC'97 Mixer Volume
// ============================================================================
//!
//! AC'97 コーデックのミキサー音量制御。
//!
//! 音量は 0..=100 のパーセント表記で扱い、コーデックレジスタの
//! 減衰 (またはゲイン) ステップに変換する。ビット 15 はミュート。

use crate::io::mmio::RegisterIo;
use crate::time::Delay;

use super::controller::{Cs4624, DeviceContext};
use super::regs::*;
use super::types::{Cs4624Error, Cs4624Result};

/// Mixer control exposed by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerControl {
    Master,
    Headphone,
    MasterMono,
    Pcm,
    Mic,
    LineIn,
    Cd,
    RecordGain,
}

impl MixerControl {
    pub const ALL: [MixerControl; 8] = [
        MixerControl::Master,
        MixerControl::Headphone,
        MixerControl::MasterMono,
        MixerControl::Pcm,
        MixerControl::Mic,
        MixerControl::LineIn,
        MixerControl::Cd,
        MixerControl::RecordGain,
    ];

    /// AC'97 register
    pub const fn register(self) -> u8 {
        match self {
            MixerControl::Master => AC97_MASTER,
            MixerControl::Headphone => AC97_HEADPHONE,
            MixerControl::MasterMono => AC97_MASTER_MONO,
            MixerControl::Pcm => AC97_PCM_OUT,
            MixerControl::Mic => AC97_MIC,
            MixerControl::LineIn => AC97_LINE_IN,
            MixerControl::Cd => AC97_CD,
            MixerControl::RecordGain => AC97_RECORD_GAIN,
        }
    }

    /// Largest step value of one channel field
    pub const fn max_step(self) -> u16 {
        match self {
            MixerControl::Master | MixerControl::Headphone | MixerControl::MasterMono => 0x3F,
            MixerControl::RecordGain => 0x0F,
            _ => 0x1F,
        }
    }

    /// Single field in bits 0..6
    pub const fn is_mono(self) -> bool {
        matches!(self, MixerControl::MasterMono | MixerControl::Mic)
    }

    /// Steps count gain rather than attenuation
    pub const fn is_gain(self) -> bool {
        matches!(self, MixerControl::RecordGain)
    }

    fn to_step(self, percent: u8) -> u16 {
        let max = self.max_step() as u32;
        let level = (percent.min(100) as u32 * max + 50) / 100;
        let step = if self.is_gain() { level } else { max - level };
        step as u16
    }

    fn from_step(self, step: u16) -> u8 {
        let max = self.max_step() as u32;
        let step = (step & self.max_step()) as u32;
        let level = if self.is_gain() { step } else { max - step };
        ((level * 100 + max / 2) / max) as u8
    }

    /// Register value for a volume
    pub fn encode(self, volume: MixerVolume) -> u16 {
        let mut value = if self.is_mono() {
            self.to_step(volume.left)
        } else {
            (self.to_step(volume.left) << 8) | self.to_step(volume.right)
        };
        if volume.muted {
            value |= AC97_MUTE;
        }
        value
    }

    /// Volume of a register value
    pub fn decode(self, value: u16) -> MixerVolume {
        let muted = value & AC97_MUTE != 0;
        if self.is_mono() {
            let level = self.from_step(value);
            MixerVolume { left: level, right: level, muted }
        } else {
            MixerVolume {
                left: self.from_step(value >> 8),
                right: self.from_step(value),
                muted,
            }
        }
    }
}

/// Stereo volume in percent of full scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixerVolume {
    pub left: u8,
    pub right: u8,
    pub muted: bool,
}

impl MixerVolume {
    pub const fn new(left: u8, right: u8) -> Self {
        Self { left, right, muted: false }
    }

    pub const fn muted() -> Self {
        Self { left: 0, right: 0, muted: true }
    }

    fn validate(self) -> Cs4624Result<Self> {
        if self.left > 100 || self.right > 100 {
            return Err(Cs4624Error::InvalidConfig("volume"));
        }
        Ok(self)
    }
}

/// Volumes applied at bring-up
const DEFAULT_VOLUMES: [(MixerControl, MixerVolume); 8] = [
    (MixerControl::Master, MixerVolume::new(100, 100)),
    (MixerControl::Headphone, MixerVolume::new(100, 100)),
    (MixerControl::MasterMono, MixerVolume::new(100, 100)),
    (MixerControl::Pcm, MixerVolume::new(75, 75)),
    (MixerControl::Mic, MixerVolume::muted()),
    (MixerControl::LineIn, MixerVolume::muted()),
    (MixerControl::Cd, MixerVolume::muted()),
    (MixerControl::RecordGain, MixerVolume::new(0, 0)),
];

impl<R: RegisterIo, D: Delay> DeviceContext<R, D> {
    pub fn get_volume(&self, control: MixerControl) -> Cs4624Result<MixerVolume> {
        let value = self.codec_read(control.register())?;
        Ok(control.decode(value))
    }

    pub fn set_volume(&self, control: MixerControl, volume: MixerVolume) -> Cs4624Result<()> {
        let value = control.encode(volume.validate()?);
        self.codec_write(control.register(), value)?;
        Ok(())
    }

    /// Apply the bring-up mixer levels
    pub fn set_default_volume(&self) -> Cs4624Result<()> {
        for (control, volume) in DEFAULT_VOLUMES {
            self.set_volume(control, volume)?;
        }
        Ok(())
    }
}

impl<R: RegisterIo, D: Delay> Cs4624<R, D> {
    pub fn get_volume(&self, control: MixerControl) -> Cs4624Result<MixerVolume> {
        self.device().get_volume(control)
    }

    pub fn set_volume(&mut self, control: MixerControl, volume: MixerVolume) -> Cs4624Result<()> {
        self.device().set_volume(control, volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::audio::cs4624::sim::SimChip;

    #[test]
    fn test_encode() {
        assert_eq!(MixerControl::Master.encode(MixerVolume::new(100, 100)), 0x0000);
        assert_eq!(MixerControl::Master.encode(MixerVolume::new(0, 100)), 0x3F00);
        assert_eq!(MixerControl::Pcm.encode(MixerVolume::new(0, 0)), 0x1F1F);
        assert_eq!(MixerControl::Cd.encode(MixerVolume::muted()), 0x9F1F);
        assert_eq!(MixerControl::Mic.encode(MixerVolume::new(100, 0)), 0x0000);
        assert_eq!(MixerControl::RecordGain.encode(MixerVolume::new(100, 0)), 0x0F00);
    }

    #[test]
    fn test_decode() {
        let muted_full = MixerVolume { left: 100, right: 100, muted: true };
        assert_eq!(MixerControl::Master.decode(0x8000), muted_full);
        assert_eq!(MixerControl::Pcm.decode(0x1F00), MixerVolume::new(0, 100));
        assert_eq!(MixerControl::Mic.decode(0x801F), MixerVolume::muted());
    }

    #[test]
    fn test_set_get_volume_through_codec() {
        let chip = SimChip::new();
        let dev = chip.device();

        dev.set_volume(MixerControl::Pcm, MixerVolume::new(100, 0)).unwrap();
        assert_eq!(chip.codec_reg(AC97_PCM_OUT), 0x001F);
        assert_eq!(dev.get_volume(MixerControl::Pcm), Ok(MixerVolume::new(100, 0)));

        assert_eq!(
            dev.set_volume(MixerControl::Pcm, MixerVolume::new(101, 0)),
            Err(Cs4624Error::InvalidConfig("volume"))
        );
        assert_eq!(chip.codec_reg(AC97_PCM_OUT), 0x001F);
    }

    #[test]
    fn test_default_volume() {
        let chip = SimChip::new();
        let dev = chip.device();
        dev.set_default_volume().unwrap();

        assert_eq!(chip.codec_reg(AC97_MASTER), 0x0000);
        assert_eq!(chip.codec_reg(AC97_LINE_IN) & AC97_MUTE, AC97_MUTE);
        assert_eq!(chip.codec_writes().len(), DEFAULT_VOLUMES.len());
    }

    #[test]
    fn test_volume_propagates_codec_timeout() {
        let chip = SimChip::new();
        chip.set_codec_responding(false);
        let dev = chip.device();
        assert!(matches!(
            dev.get_volume(MixerControl::Master),
            Err(Cs4624Error::Codec(_))
        ));
    }
}
