// ============================================================================
// src/io/audio/cs4624/controller.rs - CS4624 Controller Core
// ============================================================================
//!
//! CS4624 コントローラのコア実装。
//!
//! - `DeviceContext`: レジスタウィンドウとハードウェア制御ワードキャッシュ
//! - `Cs4624`: チャンネル設定とドライバフレームワーク向け操作
//! - ハードウェア初期化シーケンス

use crate::io::mmio::RegisterIo;
use crate::io::pci::PlatformBus;
use crate::time::Delay;

use super::config::{ChannelConfig, SubDeviceLimits};
use super::firmware::FirmwareImage;
use super::region::RegionMap;
use super::regs::*;
use super::types::{
    Channel, ControlWords, Cs4624Error, Cs4624Result, DeviceIdentity, Direction, InterruptStatus,
};

// ============================================================================
// Device Context
// ============================================================================

/// Register windows plus the hardware state cached across operations.
///
/// Owns the register accessor exclusively; every register access of the
/// driver goes through `peek_*` / `poke_*` here.
pub struct DeviceContext<R, D> {
    io: R,
    delay: D,
    identity: DeviceIdentity,
    regions: RegionMap,
    /// Last HISR snapshot taken by `read_and_clear`
    pub(super) intr_status: InterruptStatus,
    /// Per-direction DMR / DCR / FCR words and latched control half
    pub(super) words: [ControlWords; 2],
}

impl<R: RegisterIo, D: Delay> DeviceContext<R, D> {
    pub fn new(io: R, delay: D, identity: DeviceIdentity, regions: RegionMap) -> Self {
        Self {
            io,
            delay,
            identity,
            regions,
            intr_status: InterruptStatus::empty(),
            words: [ControlWords::default(); 2],
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    /// Cached control words of one direction
    pub fn words(&self, dir: Direction) -> &ControlWords {
        &self.words[dir.index()]
    }

    pub(super) fn words_mut(&mut self, dir: Direction) -> &mut ControlWords {
        &mut self.words[dir.index()]
    }

    // ========================================================================
    // Register Access
    // ========================================================================

    #[inline]
    fn ba0_addr(&self, offset: u32, width: usize) -> usize {
        let ba0 = self.regions.ba0();
        debug_assert!(ba0.addr(offset, width).is_some(), "BA0 offset 0x{offset:x}");
        ba0.virt_base + offset as usize
    }

    /// Read a 32-bit BA0 register
    #[inline]
    pub fn peek_ba0(&self, offset: u32) -> u32 {
        self.io.read32(self.ba0_addr(offset, 4))
    }

    /// Read a 16-bit BA0 register
    #[inline]
    pub fn peek16_ba0(&self, offset: u32) -> u16 {
        self.io.read16(self.ba0_addr(offset, 2))
    }

    /// Write a 32-bit BA0 register
    #[inline]
    pub fn poke_ba0(&self, offset: u32, value: u32) {
        #[cfg(feature = "verbose_logging")]
        log::trace!("[CS4624] BA0[0x{:03x}] <- 0x{:08x}", offset, value);

        self.io.write32(self.ba0_addr(offset, 4), value);
    }

    /// Read a word at an encoded BA1 address
    pub fn peek_ba1(&self, addr: u32) -> Cs4624Result<u32> {
        let virt = self.regions.locate_ba1(addr)?;
        Ok(self.io.read32(virt))
    }

    /// Write a word at an encoded BA1 address
    pub fn poke_ba1(&self, addr: u32, value: u32) -> Cs4624Result<()> {
        let virt = self.regions.locate_ba1(addr)?;

        #[cfg(feature = "verbose_logging")]
        log::trace!("[CS4624] BA1[0x{:05x}] <- 0x{:08x}", addr, value);

        self.io.write32(virt, value);
        Ok(())
    }

    /// Write one word at an already-validated mapped BA1 address
    #[inline]
    pub(super) fn poke_mapped(&self, virt: usize, value: u32) {
        self.io.write32(virt, value);
    }

    #[inline]
    pub(super) fn delay_us(&self, us: u64) {
        self.delay.delay_us(us);
    }

    #[inline]
    pub(super) fn delay_ms(&self, ms: u64) {
        self.delay.delay_ms(ms);
    }

    // ========================================================================
    // Hardware Bring-up
    // ========================================================================

    /// Bring up clocking, the serial ports and the AC-link.
    ///
    /// Fails if codec ready or input slots 3/4 never report in.
    pub fn bring_up(&mut self) -> Cs4624Result<()> {
        // Known state for the PLL and the serial ports
        self.poke_ba0(BA0_CLKCR1, 0);
        self.poke_ba0(BA0_SERMC1, 0);

        // Host-controlled AC-link, 1.03 codec
        self.poke_ba0(BA0_SERACC, SERACC_HSP | SERACC_CHIP_TYPE_1_03);

        // ARST# pulse
        self.poke_ba0(BA0_ACCTL, 0);
        self.delay_us(RESET_PULSE_US);
        self.poke_ba0(BA0_ACCTL, ACCTL_RSTN);

        // Sync generation, then wait for bit clock
        self.poke_ba0(BA0_ACCTL, ACCTL_ESYN | ACCTL_RSTN);
        self.delay_us(BIT_CLOCK_DELAY_US);

        self.poke_ba0(BA0_SERMC1, SERMC1_PTC_AC97);

        // PLL setup; SWCE stays off until the PLL is stable
        self.poke_ba0(BA0_PLLCC, PLLCC_LPF_1050_2780_KHZ | PLLCC_CDR_73_104_MHZ);
        self.poke_ba0(BA0_PLLM, PLLM_VALUE);
        self.poke_ba0(BA0_CLKCR2, CLKCR2_PDIVS_8);
        self.poke_ba0(BA0_CLKCR1, CLKCR1_PLLP);
        self.delay_us(PLL_SETTLE_US);
        self.poke_ba0(BA0_CLKCR1, CLKCR1_PLLP | CLKCR1_SWCE);

        // FIFO host bypass
        self.poke_ba0(BA0_SERBCF, SERBCF_HBP);

        // Master enable goes last
        self.poke_ba0(BA0_SERC1, SERC1_SO1F_AC97 | SERC1_SO1EN);
        self.poke_ba0(BA0_SERC2, SERC2_SI1F_AC97 | SERC2_SI1EN);
        self.poke_ba0(BA0_SERMC1, SERMC1_PTC_AC97 | SERMC1_MSPE);
        self.delay_us(SERIAL_SETTLE_US);

        let mut ready = false;
        for _ in 0..CODEC_READY_POLLS {
            if self.peek_ba0(BA0_ACSTS) & ACSTS_CRDY != 0 {
                ready = true;
                break;
            }
            self.delay_us(POLL_DELAY_US);
        }
        if !ready {
            log::error!("[CS4624] Never read codec ready from AC'97");
            return Err(Cs4624Error::CodecNotReady);
        }

        // Valid frame: the codec now accepts commands
        self.poke_ba0(BA0_ACCTL, ACCTL_VFRM | ACCTL_ESYN | ACCTL_RSTN);

        let slots = ACISV_ISV3 | ACISV_ISV4;
        let mut valid = false;
        for _ in 0..SLOT_VALID_POLLS {
            if self.peek_ba0(BA0_ACISV) & slots == slots {
                valid = true;
                break;
            }
            self.delay_ms(SLOT_VALID_DELAY_MS);
        }
        if !valid {
            log::error!("[CS4624] Never read ISV3 & ISV4 from AC'97");
            return Err(Cs4624Error::LinkNotValid);
        }

        self.poke_ba0(BA0_ACOSV, ACOSV_SLV3 | ACOSV_SLV4);

        log::info!("[CS4624] AC-link up");
        Ok(())
    }
}

// ============================================================================
// CS4624 Driver
// ============================================================================

/// CS4624 controller with its per-channel configuration
pub struct Cs4624<R, D> {
    dev: DeviceContext<R, D>,
    configs: [ChannelConfig; 3],
    limits: SubDeviceLimits,
    firmware: FirmwareImage,
    initialized: bool,
}

impl<R: RegisterIo, D: Delay> Cs4624<R, D> {
    /// Create a driver over already-resolved register windows.
    ///
    /// The hardware is untouched until `init`.
    pub fn new(
        io: R,
        delay: D,
        identity: DeviceIdentity,
        regions: RegionMap,
        firmware: FirmwareImage,
    ) -> Self {
        let limits = SubDeviceLimits::default();
        Self {
            dev: DeviceContext::new(io, delay, identity, regions),
            configs: [ChannelConfig::new(&limits); 3],
            limits,
            firmware,
            initialized: false,
        }
    }

    /// Locate the controller on the bus and map its register windows
    pub fn probe<B: PlatformBus>(
        bus: &B,
        io: R,
        delay: D,
        firmware: FirmwareImage,
    ) -> Cs4624Result<Self> {
        let (identity, regions) = RegionMap::resolve(bus)?;
        Ok(Self::new(io, delay, identity, regions, firmware))
    }

    /// Bring up the hardware, reset the codec mixer and load defaults
    pub fn init(&mut self) -> Cs4624Result<()> {
        log::info!(
            "[CS4624] Initializing {:04x}:{:04x} rev {:02x} irq {}",
            self.dev.identity().vendor_id,
            self.dev.identity().device_id,
            self.dev.identity().revision,
            self.dev.identity().irq
        );

        self.initialized = false;
        self.dev.bring_up()?;

        // Any write to the reset register resets the codec mixer
        self.dev.codec_write(AC97_RESET, 0)?;
        self.dev.set_default_volume()?;

        self.configs = [ChannelConfig::new(&self.limits); 3];
        self.initialized = true;

        log::info!("[CS4624] Initialization complete");
        Ok(())
    }

    /// Stop all channels and re-run hardware bring-up.
    ///
    /// Channel configuration and codec mixer levels are kept. Falls back to
    /// a full `init` if the controller was never initialized.
    pub fn reset(&mut self) -> Cs4624Result<()> {
        if !self.initialized {
            return self.init();
        }
        self.shutdown();

        self.initialized = false;
        self.dev.bring_up()?;
        self.initialized = true;

        log::info!("[CS4624] Reset complete");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn device(&self) -> &DeviceContext<R, D> {
        &self.dev
    }

    pub fn device_mut(&mut self) -> &mut DeviceContext<R, D> {
        &mut self.dev
    }

    pub fn irq(&self) -> u8 {
        self.dev.identity().irq
    }

    pub fn limits(&self) -> &SubDeviceLimits {
        &self.limits
    }

    pub fn config(&self, channel: Channel) -> &ChannelConfig {
        &self.configs[channel.index()]
    }

    pub(super) fn config_mut(&mut self, channel: Channel) -> &mut ChannelConfig {
        &mut self.configs[channel.index()]
    }

    fn data_direction(&self, channel: Channel) -> Cs4624Result<Direction> {
        if !self.initialized {
            return Err(Cs4624Error::NotInitialized);
        }
        channel.direction().ok_or(Cs4624Error::InvalidChannel)
    }

    // ========================================================================
    // Channel Lifecycle
    // ========================================================================

    /// Start a data channel.
    ///
    /// The SP is reset and reloaded only while the other data channel is
    /// idle; otherwise this direction's converter block is rewritten and its
    /// task control half is restored from the latched copy.
    pub fn start(&mut self, channel: Channel) -> Cs4624Result<()> {
        let dir = self.data_direction(channel)?;
        if self.config(channel).busy {
            return Err(Cs4624Error::ChannelBusy);
        }

        let dac_rate = self.config(Channel::Dac).sample_rate;
        let adc_rate = self.config(Channel::Adc).sample_rate;

        if self.config(dir.other().channel()).busy {
            match dir {
                Direction::Playback => self.dev.set_playback_rate(dac_rate)?,
                Direction::Capture => self.dev.set_capture_rate(adc_rate)?,
            }
            self.dev.resume(dir)?;
        } else {
            self.dev.reset_processor()?;
            self.dev.download_firmware(&self.firmware)?;
            self.dev.set_playback_rate(dac_rate)?;
            self.dev.set_capture_rate(adc_rate)?;
            for each in Direction::ALL {
                self.dev.latch_control(each)?;
            }
        }

        let config = *self.config(channel);
        self.dev.configure_format(dir, config.bits, config.signed, config.stereo);
        self.dev.dma_start(dir);
        self.dev.enable_interrupts(dir)?;

        self.config_mut(channel).busy = true;
        log::debug!(
            "[CS4624] {:?} started: {} Hz, {}-bit, {}, {}",
            channel,
            config.sample_rate,
            config.bits.bits(),
            if config.stereo { "stereo" } else { "mono" },
            if config.signed { "signed" } else { "unsigned" }
        );
        Ok(())
    }

    /// Stop a data channel and mark it idle
    pub fn stop(&mut self, channel: Channel) -> Cs4624Result<()> {
        let dir = self.data_direction(channel)?;

        self.dev.disable_interrupts(dir)?;
        self.dev.dma_stop(dir);
        self.config_mut(channel).busy = false;

        log::debug!("[CS4624] {:?} stopped", channel);
        Ok(())
    }

    /// Stop every busy channel and mask all interrupts
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        for dir in Direction::ALL {
            if self.config(dir.channel()).busy {
                self.dev.dma_stop(dir);
                self.config_mut(dir.channel()).busy = false;
            }
        }
        if let Err(err) = self.dev.disable_all_interrupts() {
            log::error!("[CS4624] Failed to mask interrupts: {}", err);
        }
    }

    // ========================================================================
    // Transfer Control
    // ========================================================================

    /// Program the DMA window of a channel; `bytes` is converted to frames
    pub fn set_transfer(&mut self, channel: Channel, addr: u32, bytes: u32) -> Cs4624Result<()> {
        let dir = self.data_direction(channel)?;
        let frames = self.config(channel).frames(bytes);
        self.dev.set_transfer(dir, addr, frames)
    }

    pub fn pause(&mut self, channel: Channel) -> Cs4624Result<()> {
        let dir = self.data_direction(channel)?;
        self.dev.pause(dir)
    }

    /// Restore a paused channel; only a started channel can be resumed
    pub fn resume(&mut self, channel: Channel) -> Cs4624Result<()> {
        let dir = self.data_direction(channel)?;
        if !self.config(channel).busy {
            return Err(Cs4624Error::ChannelNotStarted);
        }
        self.dev.resume(dir)
    }

    pub fn current_position(&self, channel: Channel) -> Cs4624Result<u16> {
        let dir = self.data_direction(channel)?;
        Ok(self.dev.current_position(dir))
    }

    /// Absolute sample counter from the wrap count kept by the caller
    pub fn samples_in_buffer(&self, channel: Channel, wraps: u32) -> Cs4624Result<u32> {
        let position = self.current_position(channel)?;
        Ok(wraps.wrapping_mul(8192).wrapping_add(position as u32))
    }

    /// Whether another buffer may be queued beyond the `queued` ones
    pub fn has_free_buffer(&self, channel: Channel, queued: u32) -> Cs4624Result<bool> {
        self.data_direction(channel)?;
        Ok(queued < self.limits.extra_buffers)
    }

    // ========================================================================
    // Interrupts
    // ========================================================================

    /// Read and acknowledge HISR; returns the per-channel causes
    pub fn handle_interrupt(&mut self) -> InterruptStatus {
        self.dev.read_and_clear().channel_causes()
    }

    /// Whether the last snapshot reports a cause for `channel`
    pub fn interrupt_pending(&self, channel: Channel) -> bool {
        channel.direction().is_some_and(|dir| self.dev.classify(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::audio::cs4624::sim::{SimChip, SIM_BA0_VIRT};
    use crate::io::audio::cs4624::types::DataMode;

    #[test]
    fn test_bring_up_sequence() {
        let chip = SimChip::new();
        let mut dev = chip.device();
        dev.bring_up().unwrap();

        assert_eq!(chip.ba0(BA0_CLKCR1), CLKCR1_PLLP | CLKCR1_SWCE);
        assert_eq!(chip.ba0(BA0_SERMC1), SERMC1_PTC_AC97 | SERMC1_MSPE);
        assert_eq!(chip.ba0(BA0_ACCTL), ACCTL_VFRM | ACCTL_ESYN | ACCTL_RSTN);
        assert_eq!(chip.ba0(BA0_ACOSV), ACOSV_SLV3 | ACOSV_SLV4);
        assert_eq!(chip.ba0(BA0_PLLM), PLLM_VALUE);
    }

    #[test]
    fn test_bring_up_codec_never_ready() {
        let chip = SimChip::new();
        chip.set_codec_ready(false);
        let mut dev = chip.device();

        assert_eq!(dev.bring_up(), Err(Cs4624Error::CodecNotReady));
        assert_eq!(chip.delay_calls(), 4 + CODEC_READY_POLLS as u64);
        assert_eq!(chip.ba0(BA0_ACOSV), 0);
    }

    #[test]
    fn test_bring_up_slots_never_valid() {
        let chip = SimChip::new();
        chip.set_slots_valid(false);
        let mut dev = chip.device();

        assert_eq!(dev.bring_up(), Err(Cs4624Error::LinkNotValid));
        assert_eq!(chip.delay_calls(), 4 + SLOT_VALID_POLLS as u64);
    }

    #[test]
    fn test_operations_require_init() {
        let chip = SimChip::new();
        let mut drv = chip.driver();
        assert_eq!(drv.start(Channel::Dac), Err(Cs4624Error::NotInitialized));
        assert_eq!(drv.current_position(Channel::Adc), Err(Cs4624Error::NotInitialized));
    }

    #[test]
    fn test_init_resets_codec_mixer() {
        let chip = SimChip::new();
        chip.set_codec_reg(AC97_MASTER, 0x1234);
        let mut drv = chip.driver();
        drv.init().unwrap();

        assert!(drv.is_initialized());
        assert_ne!(chip.codec_reg(AC97_MASTER), 0x1234);
        assert!(chip.codec_writes().contains(&(AC97_RESET, 0)));
        assert_eq!(drv.config(Channel::Dac).sample_rate, 44100);
    }

    #[test]
    fn test_start_rejects_mixer_and_busy() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();

        assert_eq!(drv.start(Channel::Mixer), Err(Cs4624Error::InvalidChannel));
        drv.start(Channel::Dac).unwrap();
        assert_eq!(drv.start(Channel::Dac), Err(Cs4624Error::ChannelBusy));
        assert!(drv.config(Channel::Dac).busy);
        assert!(!drv.config(Channel::Mixer).busy);
    }

    #[test]
    fn test_start_write_order() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();
        chip.clear_log();
        drv.start(Channel::Dac).unwrap();

        let dmr = SIM_BA0_VIRT + BA0_DMR0 as usize;
        let fsic = SIM_BA0_VIRT + BA0_FSIC0 as usize;
        let fcr = SIM_BA0_VIRT + BA0_FCR0 as usize;
        let dcr = SIM_BA0_VIRT + BA0_DCR0 as usize;

        let order: Vec<(usize, u32)> = chip
            .write_log()
            .into_iter()
            .filter(|(addr, _)| [dmr, fsic, fcr, dcr].contains(addr))
            .collect();
        let words = drv.device().words(Direction::Playback);

        assert_eq!(
            order,
            vec![
                (fsic, 0),
                (dmr, (words.dmr - DataMode::DMA).bits()),
                (dmr, words.dmr.bits()),
                (fcr, words.fcr),
                (dcr, words.dcr),
            ]
        );
        assert!(words.dmr.contains(DataMode::DMA | DataMode::TR_WRITE));
        assert_eq!(words.fcr, FCR_PLAYBACK_TEMPLATE | FCR_FEN);
        assert_eq!(words.dcr & DCR_MSK, 0);
    }

    #[test]
    fn test_start_reloads_sp_only_when_other_idle() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();

        drv.start(Channel::Dac).unwrap();
        assert_eq!(chip.ba1(BA1_FRMT), FRMT_CYCLES_PER_FRAME);
        assert_eq!(chip.ba1(BA1_SP_PMEM + 12), 4);

        chip.set_ba1(BA1_FRMT, 0);
        chip.set_ba1(BA1_PPI, 0);
        drv.start(Channel::Adc).unwrap();

        // Running playback keeps its processor state
        assert_eq!(chip.ba1(BA1_FRMT), 0);
        assert_eq!(chip.ba1(BA1_PPI), 0);
        assert_ne!(chip.ba1(BA1_CPI), 0);
    }

    #[test]
    fn test_start_then_stop_clears_enables() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();

        for channel in [Channel::Dac, Channel::Adc] {
            let dir = channel.direction().unwrap();
            drv.start(channel).unwrap();
            drv.stop(channel).unwrap();

            let words = drv.device().words(dir);
            assert!(!words.dmr.intersects(DataMode::DMA | DataMode::POLL));
            assert_eq!(words.fcr & FCR_FEN, 0);
            assert_eq!(words.dcr & DCR_MSK, DCR_MSK);
            assert_eq!(chip.ba0(dir.regs().dmr) & DMR_DMA, 0);
            assert_eq!(chip.ba0(dir.regs().fcr) & FCR_FEN, 0);
            assert!(!drv.config(channel).busy);
        }
    }

    #[test]
    fn test_stop_masks_direction_interrupts() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();
        drv.start(Channel::Adc).unwrap();
        assert_eq!(chip.ba1(BA1_CIE) & CIE_CLEAR_MASK, CIE_ENABLE);

        drv.stop(Channel::Adc).unwrap();
        assert_eq!(chip.ba1(BA1_CIE) & CIE_CLEAR_MASK, CIE_DISABLE);
    }

    #[test]
    fn test_set_transfer_converts_bytes_to_frames() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();

        // 16-bit stereo: 4 bytes per frame
        drv.set_transfer(Channel::Dac, 0x0010_0000, 4096).unwrap();
        assert_eq!(chip.ba0(BA0_DBA0), 0x0010_0000);
        assert_eq!(chip.ba0(BA0_DBC0), 1023);

        assert_eq!(
            drv.set_transfer(Channel::Dac, 0x0010_0000, 2),
            Err(Cs4624Error::InvalidConfig("transfer length"))
        );
        assert_eq!(
            drv.set_transfer(Channel::Mixer, 0, 4096),
            Err(Cs4624Error::InvalidChannel)
        );
    }

    #[test]
    fn test_samples_in_buffer() {
        let chip = SimChip::new();
        let drv = chip.initialized_driver();
        chip.set_ba0(BA0_DCC0, 0xABCD_0100);
        chip.set_ba0(BA0_DCC1, 0x0000_0042);

        assert_eq!(drv.current_position(Channel::Dac), Ok(0x0100));
        assert_eq!(drv.samples_in_buffer(Channel::Dac, 3), Ok(3 * 8192 + 0x100));
        assert_eq!(drv.samples_in_buffer(Channel::Adc, 0), Ok(0x42));
    }

    #[test]
    fn test_has_free_buffer() {
        let chip = SimChip::new();
        let drv = chip.initialized_driver();
        assert_eq!(drv.has_free_buffer(Channel::Dac, 0), Ok(true));
        assert_eq!(drv.has_free_buffer(Channel::Dac, 4), Ok(false));
        assert_eq!(drv.has_free_buffer(Channel::Mixer, 0), Err(Cs4624Error::InvalidChannel));
    }

    #[test]
    fn test_shutdown_stops_busy_channels() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();
        drv.start(Channel::Dac).unwrap();
        drv.start(Channel::Adc).unwrap();

        drv.shutdown();
        assert!(!drv.config(Channel::Dac).busy);
        assert!(!drv.config(Channel::Adc).busy);
        assert_eq!(chip.ba0(BA0_DMR0) & DMR_DMA, 0);
        assert_eq!(chip.ba0(BA0_DMR1) & DMR_DMA, 0);
        assert_eq!(chip.ba1(BA1_PFIE) & PFIE_CLEAR_MASK, PFIE_DISABLE);
    }

    #[test]
    fn test_restart_beside_running_capture_restores_task() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();
        chip.set_ba1(BA1_PCTL, 0x8421_0000);

        drv.start(Channel::Adc).unwrap();
        drv.start(Channel::Dac).unwrap();
        drv.pause(Channel::Dac).unwrap();
        assert_eq!(chip.ba1(BA1_PCTL) & 0xFFFF_0000, 0);
        drv.stop(Channel::Dac).unwrap();

        // Capture keeps running, so the SP is not reloaded
        drv.start(Channel::Dac).unwrap();
        assert_eq!(chip.ba1(BA1_PCTL) & 0xFFFF_0000, 0x8421_0000);
        let words = drv.device().words(Direction::Playback);
        assert_eq!(words.active_ctl, Some(0x8421_0000));

        drv.pause(Channel::Dac).unwrap();
        drv.resume(Channel::Dac).unwrap();
        assert_eq!(chip.ba1(BA1_PCTL) & 0xFFFF_0000, 0x8421_0000);
    }

    #[test]
    fn test_resume_after_stop_is_rejected() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();
        chip.set_ba1(BA1_PCTL, 0x8421_0000);

        drv.start(Channel::Dac).unwrap();
        drv.pause(Channel::Dac).unwrap();
        drv.stop(Channel::Dac).unwrap();

        assert_eq!(drv.resume(Channel::Dac), Err(Cs4624Error::ChannelNotStarted));
        assert_eq!(chip.ba1(BA1_PCTL), 0);
    }

    #[test]
    fn test_reset_keeps_channel_config() {
        let chip = SimChip::new();
        let mut drv = chip.initialized_driver();
        drv.set_sample_rate(Channel::Dac, 22050).unwrap();
        drv.set_stereo(Channel::Adc, false).unwrap();
        chip.set_codec_reg(AC97_PCM_OUT, 0x0404);
        drv.start(Channel::Dac).unwrap();
        chip.clear_log();

        drv.reset().unwrap();

        assert!(drv.is_initialized());
        assert!(!drv.config(Channel::Dac).busy);
        assert_eq!(drv.config(Channel::Dac).sample_rate, 22050);
        assert!(!drv.config(Channel::Adc).stereo);
        assert_eq!(chip.ba0(BA0_DMR0) & DMR_DMA, 0);
        assert_eq!(chip.ba0(BA0_ACCTL), ACCTL_VFRM | ACCTL_ESYN | ACCTL_RSTN);
        // Codec mixer untouched
        assert!(chip.codec_writes().is_empty());
        assert_eq!(chip.codec_reg(AC97_PCM_OUT), 0x0404);
    }

    #[test]
    fn test_reset_before_init_initializes() {
        let chip = SimChip::new();
        let mut drv = chip.driver();
        drv.reset().unwrap();
        assert!(drv.is_initialized());
        assert!(chip.codec_writes().contains(&(AC97_RESET, 0)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "BA0 offset")]
    fn test_ba0_access_out_of_range() {
        let chip = SimChip::new();
        let dev = chip.device();
        dev.peek16_ba0(BA0_SIZE as u32);
    }
}
