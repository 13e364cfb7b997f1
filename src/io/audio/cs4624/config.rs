// ============================================================================
// src/io/audio/cs4624/config.rs - Channel Configuration
// ============================================================================
//!
//! 論理チャンネルごとのフォーマット設定と、サブデバイスの DMA 制限。
//!
//! 不正な要求はレジスタに触れる前に拒否され、設定は変更されない。

use crate::io::mmio::RegisterIo;
use crate::time::Delay;

use super::controller::Cs4624;
use super::types::{Channel, Cs4624Error, Cs4624Result};

/// Lowest accepted sample rate
pub const MIN_SAMPLE_RATE: u32 = 4000;

/// Highest accepted sample rate
pub const MAX_SAMPLE_RATE: u32 = 48000;

/// Sample width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleBits {
    Bits8,
    Bits16,
    Bits32,
}

impl SampleBits {
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(SampleBits::Bits8),
            16 => Some(SampleBits::Bits16),
            32 => Some(SampleBits::Bits32),
            _ => None,
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            SampleBits::Bits8 => 8,
            SampleBits::Bits16 => 16,
            SampleBits::Bits32 => 32,
        }
    }

    pub const fn bytes(self) -> u32 {
        self.bits() / 8
    }
}

/// DMA buffer limits of a data sub-device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubDeviceLimits {
    /// DMA buffer size in bytes
    pub dma_size: u32,
    /// Fragments per DMA buffer
    pub dma_fragments: u32,
    pub min_fragment_size: u32,
    /// Buffers the framework may queue beyond the DMA buffer
    pub extra_buffers: u32,
}

impl Default for SubDeviceLimits {
    fn default() -> Self {
        Self {
            dma_size: 64 * 1024,
            dma_fragments: 2,
            min_fragment_size: 1024,
            extra_buffers: 4,
        }
    }
}

impl SubDeviceLimits {
    pub fn max_fragment_size(&self) -> u32 {
        self.dma_size / self.dma_fragments.max(1)
    }
}

/// Format and state of one logical channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub stereo: bool,
    /// Hz
    pub sample_rate: u32,
    pub bits: SampleBits,
    pub signed: bool,
    /// Set while the channel is started
    pub busy: bool,
    /// Bytes
    pub fragment_size: u32,
}

impl ChannelConfig {
    /// Defaults: stereo, 44100 Hz, 16-bit signed, largest fragment
    pub fn new(limits: &SubDeviceLimits) -> Self {
        Self {
            stereo: true,
            sample_rate: 44100,
            bits: SampleBits::Bits16,
            signed: true,
            busy: false,
            fragment_size: limits.max_fragment_size(),
        }
    }

    /// Bytes per frame
    pub fn frame_bytes(&self) -> u32 {
        self.bits.bytes() * if self.stereo { 2 } else { 1 }
    }

    /// Whole frames in `bytes`
    pub fn frames(&self, bytes: u32) -> u32 {
        bytes / self.frame_bytes()
    }

    pub fn set_sample_rate(&mut self, rate: u32) -> Cs4624Result<()> {
        if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&rate) {
            return Err(Cs4624Error::InvalidConfig("sample rate"));
        }
        self.sample_rate = rate;
        Ok(())
    }

    pub fn set_bits(&mut self, bits: u32) -> Cs4624Result<()> {
        self.bits = SampleBits::from_bits(bits).ok_or(Cs4624Error::InvalidConfig("sample bits"))?;
        Ok(())
    }

    pub fn set_fragment_size(&mut self, size: u32, limits: &SubDeviceLimits) -> Cs4624Result<()> {
        if size < limits.min_fragment_size || size > limits.max_fragment_size() {
            return Err(Cs4624Error::InvalidConfig("fragment size"));
        }
        self.fragment_size = size;
        Ok(())
    }
}

// ============================================================================
// Configuration Requests
// ============================================================================

impl<R: RegisterIo, D: Delay> Cs4624<R, D> {
    /// Config of a data channel for a format change
    fn data_config_mut(&mut self, channel: Channel) -> Cs4624Result<&mut ChannelConfig> {
        if channel.direction().is_none() {
            return Err(Cs4624Error::InvalidChannel);
        }
        Ok(self.config_mut(channel))
    }

    pub fn set_sample_rate(&mut self, channel: Channel, rate: u32) -> Cs4624Result<()> {
        self.data_config_mut(channel)?.set_sample_rate(rate)
    }

    pub fn set_stereo(&mut self, channel: Channel, stereo: bool) -> Cs4624Result<()> {
        self.data_config_mut(channel)?.stereo = stereo;
        Ok(())
    }

    pub fn set_bits(&mut self, channel: Channel, bits: u32) -> Cs4624Result<()> {
        self.data_config_mut(channel)?.set_bits(bits)
    }

    pub fn set_sign(&mut self, channel: Channel, signed: bool) -> Cs4624Result<()> {
        self.data_config_mut(channel)?.signed = signed;
        Ok(())
    }

    pub fn set_fragment_size(&mut self, channel: Channel, size: u32) -> Cs4624Result<()> {
        let limits = *self.limits();
        self.data_config_mut(channel)?.set_fragment_size(size, &limits)
    }

    pub fn fragment_size(&self, channel: Channel) -> u32 {
        self.config(channel).fragment_size
    }

    pub fn max_fragment_size(&self, channel: Channel) -> Cs4624Result<u32> {
        channel.direction().ok_or(Cs4624Error::InvalidChannel)?;
        Ok(self.limits().max_fragment_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::audio::cs4624::sim::SimChip;

    #[test]
    fn test_defaults() {
        let limits = SubDeviceLimits::default();
        let config = ChannelConfig::new(&limits);
        assert!(config.stereo);
        assert!(config.signed);
        assert!(!config.busy);
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.bits, SampleBits::Bits16);
        assert_eq!(config.fragment_size, 32 * 1024);
        assert_eq!(config.frame_bytes(), 4);
    }

    #[test]
    fn test_invalid_requests_leave_config_unchanged() {
        let limits = SubDeviceLimits::default();
        let mut config = ChannelConfig::new(&limits);
        let before = config;

        assert!(config.set_sample_rate(3999).is_err());
        assert!(config.set_sample_rate(48001).is_err());
        assert!(config.set_bits(24).is_err());
        assert!(config.set_fragment_size(1023, &limits).is_err());
        assert!(config.set_fragment_size(32 * 1024 + 1, &limits).is_err());
        assert_eq!(config, before);

        config.set_fragment_size(1024, &limits).unwrap();
        config.set_sample_rate(4000).unwrap();
        config.set_bits(8).unwrap();
        assert_eq!(config.fragment_size, 1024);
        assert_eq!(config.sample_rate, 4000);
        assert_eq!(config.frame_bytes(), 2);
    }

    #[test]
    fn test_frames() {
        let mut config = ChannelConfig::new(&SubDeviceLimits::default());
        config.stereo = false;
        config.bits = SampleBits::Bits32;
        assert_eq!(config.frames(4096), 1024);
        assert_eq!(config.frames(3), 0);
    }

    #[test]
    fn test_requests_through_driver() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();

        drv.set_sample_rate(Channel::Adc, 8000).unwrap();
        drv.set_stereo(Channel::Adc, false).unwrap();
        drv.set_sign(Channel::Adc, false).unwrap();
        assert_eq!(drv.config(Channel::Adc).sample_rate, 8000);
        assert_eq!(drv.config(Channel::Dac).sample_rate, 44100);

        assert_eq!(
            drv.set_sample_rate(Channel::Mixer, 8000),
            Err(Cs4624Error::InvalidChannel)
        );
        assert_eq!(
            drv.set_fragment_size(Channel::Dac, 512),
            Err(Cs4624Error::InvalidConfig("fragment size"))
        );
        assert_eq!(drv.max_fragment_size(Channel::Dac), Ok(32 * 1024));
        assert_eq!(drv.fragment_size(Channel::Dac), 32 * 1024);

        // No register traffic for configuration requests
        assert!(chip.write_log().is_empty());
    }
}
