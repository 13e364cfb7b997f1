// ============================================================================
// src/io/audio/cs4624/types.rs - CS4624 Types and Data Structures
// ============================================================================
//!
//! CS4624 ドライバで使用される型定義。
//!
//! - エラー型
//! - デバイス識別情報
//! - 論理チャンネル / 転送方向
//! - DMR / HISR ビットフィールド

use core::fmt;

use bitflags::bitflags;

use super::regs::*;

// ============================================================================
// Error Types
// ============================================================================

/// Codec link failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Write command never cleared DCV
    WriteTimeout { reg: u8 },
    /// Read command never cleared DCV
    CommandTimeout { reg: u8 },
    /// Read data never reported valid status (VSTS)
    StatusTimeout { reg: u8 },
}

impl CodecError {
    /// AC'97 register the failed transaction addressed
    pub fn register(&self) -> u8 {
        match *self {
            CodecError::WriteTimeout { reg }
            | CodecError::CommandTimeout { reg }
            | CodecError::StatusTimeout { reg } => reg,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::WriteTimeout { reg } => {
                write!(f, "AC'97 write timeout (DCV), reg 0x{:02x}", reg)
            }
            CodecError::CommandTimeout { reg } => {
                write!(f, "AC'97 read timeout (DCV), reg 0x{:02x}", reg)
            }
            CodecError::StatusTimeout { reg } => {
                write!(f, "AC'97 read timeout (VSTS), reg 0x{:02x}", reg)
            }
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

/// CS4624 Driver Error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cs4624Error {
    /// No CS4624 device found
    NoDevice,
    /// BAR missing, not memory-mapped, or too small
    InvalidBar(u8),
    /// Platform refused to map a BAR
    MapFailed(u8),
    /// Codec ready (CRDY) never observed during bring-up
    CodecNotReady,
    /// Input slots 3/4 never reported valid during bring-up
    LinkNotValid,
    /// Codec link transaction failed
    Codec(CodecError),
    /// Firmware segment does not fit its BA1 bank
    FirmwareLoad { offset: u32, len: usize },
    /// BA1 address outside every region
    InvalidRegister(u32),
    /// Rejected configuration request
    InvalidConfig(&'static str),
    /// Operation not valid for this channel
    InvalidChannel,
    /// Channel already started
    ChannelBusy,
    /// Resume without a prior start
    ChannelNotStarted,
    /// Driver not initialized
    NotInitialized,
}

impl From<CodecError> for Cs4624Error {
    fn from(err: CodecError) -> Self {
        Cs4624Error::Codec(err)
    }
}

impl fmt::Display for Cs4624Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cs4624Error::NoDevice => write!(f, "no CS4624 device found"),
            Cs4624Error::InvalidBar(n) => write!(f, "invalid BAR{}", n),
            Cs4624Error::MapFailed(n) => write!(f, "failed to map BAR{}", n),
            Cs4624Error::CodecNotReady => write!(f, "never read codec ready from AC'97"),
            Cs4624Error::LinkNotValid => write!(f, "never read ISV3 & ISV4 from AC'97"),
            Cs4624Error::Codec(err) => write!(f, "{}", err),
            Cs4624Error::FirmwareLoad { offset, len } => write!(
                f,
                "firmware segment 0x{:05x} (+{} bytes) outside its bank",
                offset, len
            ),
            Cs4624Error::InvalidRegister(reg) => write!(f, "invalid BA1 address 0x{:05x}", reg),
            Cs4624Error::InvalidConfig(what) => write!(f, "invalid configuration: {}", what),
            Cs4624Error::InvalidChannel => write!(f, "invalid channel"),
            Cs4624Error::ChannelBusy => write!(f, "channel busy"),
            Cs4624Error::ChannelNotStarted => write!(f, "channel never started"),
            Cs4624Error::NotInitialized => write!(f, "CS4624 not initialized"),
        }
    }
}

pub type Cs4624Result<T> = Result<T, Cs4624Error>;

// ============================================================================
// Device Identity
// ============================================================================

/// PCI identity captured at bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Vendor ID
    pub vendor_id: u16,
    /// Device ID
    pub device_id: u16,
    /// Interrupt line
    pub irq: u8,
    /// Revision ID
    pub revision: u8,
}

impl DeviceIdentity {
    /// Identity of a CS4624 on the given interrupt line
    pub const fn cs4624(irq: u8, revision: u8) -> Self {
        Self {
            vendor_id: CS4624_VENDOR_ID,
            device_id: CS4624_DEVICE_ID,
            irq,
            revision,
        }
    }
}

// ============================================================================
// Logical Channels
// ============================================================================

/// Logical channel (sub-device)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Playback data channel
    Dac,
    /// Capture data channel
    Adc,
    /// Control-only mixer channel
    Mixer,
}

impl Channel {
    /// All logical channels in sub-device order
    pub const ALL: [Channel; 3] = [Channel::Dac, Channel::Adc, Channel::Mixer];

    /// Sub-device index
    pub const fn index(self) -> usize {
        match self {
            Channel::Dac => 0,
            Channel::Adc => 1,
            Channel::Mixer => 2,
        }
    }

    /// Channel for a sub-device index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Physical transfer direction, `None` for the control-only channel
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Channel::Dac => Some(Direction::Playback),
            Channel::Adc => Some(Direction::Capture),
            Channel::Mixer => None,
        }
    }
}

// ============================================================================
// Transfer Direction
// ============================================================================

/// Width of a register read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegWidth {
    Bits16,
    Bits32,
}

/// Register offsets and bit templates for one physical transfer channel
#[derive(Debug)]
pub struct DirectionRegs {
    /// DMA mode register (BA0)
    pub dmr: u32,
    /// DMA command register (BA0)
    pub dcr: u32,
    /// FIFO control register (BA0)
    pub fcr: u32,
    /// Frame-size-in-channel register (BA0)
    pub fsic: u32,
    /// DMA base address register (BA0)
    pub base_addr: u32,
    /// DMA base count register (BA0)
    pub base_count: u32,
    /// DMA current count register (BA0)
    pub current_count: u32,
    /// Bus width the current count is read with
    pub current_count_width: RegWidth,
    /// FIFO control template
    pub fcr_template: u32,
    /// DMR transfer-direction bit
    pub transfer: DataMode,
    /// Task control word register (BA1)
    pub ctl_reg: u32,
    /// Half of the control word owned by this direction
    pub ctl_half: u32,
    /// Interrupt enable register (BA1)
    pub irq_enable_reg: u32,
    /// Field cleared before applying the enable/disable pattern
    pub irq_clear_mask: u32,
    /// Pattern set to enable interrupts
    pub irq_enable: u32,
    /// Pattern set to disable interrupts
    pub irq_disable: u32,
    /// HISR bit reporting this channel
    pub status: InterruptStatus,
}

static PLAYBACK_REGS: DirectionRegs = DirectionRegs {
    dmr: BA0_DMR0,
    dcr: BA0_DCR0,
    fcr: BA0_FCR0,
    fsic: BA0_FSIC0,
    base_addr: BA0_DBA0,
    base_count: BA0_DBC0,
    current_count: BA0_DCC0,
    current_count_width: RegWidth::Bits32,
    fcr_template: FCR_PLAYBACK_TEMPLATE,
    transfer: DataMode::TR_WRITE,
    ctl_reg: BA1_PCTL,
    ctl_half: 0xFFFF_0000,
    irq_enable_reg: BA1_PFIE,
    irq_clear_mask: PFIE_CLEAR_MASK,
    irq_enable: 0,
    irq_disable: PFIE_DISABLE,
    status: InterruptStatus::VC0,
};

static CAPTURE_REGS: DirectionRegs = DirectionRegs {
    dmr: BA0_DMR1,
    dcr: BA0_DCR1,
    fcr: BA0_FCR1,
    fsic: BA0_FSIC1,
    base_addr: BA0_DBA1,
    base_count: BA0_DBC1,
    current_count: BA0_DCC1,
    current_count_width: RegWidth::Bits16,
    fcr_template: FCR_CAPTURE_TEMPLATE,
    transfer: DataMode::TR_READ,
    ctl_reg: BA1_CCTL,
    ctl_half: 0x0000_FFFF,
    irq_enable_reg: BA1_CIE,
    irq_clear_mask: CIE_CLEAR_MASK,
    irq_enable: CIE_ENABLE,
    irq_disable: CIE_DISABLE,
    status: InterruptStatus::VC1,
};

/// Physical transfer channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Memory → FIFO → codec
    Playback,
    /// Codec → FIFO → memory
    Capture,
}

impl Direction {
    /// Both physical channels
    pub const ALL: [Direction; 2] = [Direction::Playback, Direction::Capture];

    /// Register layout for this direction
    pub fn regs(self) -> &'static DirectionRegs {
        match self {
            Direction::Playback => &PLAYBACK_REGS,
            Direction::Capture => &CAPTURE_REGS,
        }
    }

    /// Index into per-direction caches
    pub const fn index(self) -> usize {
        match self {
            Direction::Playback => 0,
            Direction::Capture => 1,
        }
    }

    /// Logical data channel carried by this direction
    pub const fn channel(self) -> Channel {
        match self {
            Direction::Playback => Channel::Dac,
            Direction::Capture => Channel::Adc,
        }
    }

    /// The other physical channel
    pub const fn other(self) -> Direction {
        match self {
            Direction::Playback => Direction::Capture,
            Direction::Capture => Direction::Playback,
        }
    }
}

// ============================================================================
// Bit Fields
// ============================================================================

bitflags! {
    /// DMA mode register (DMR) control word
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DataMode: u32 {
        const TR_READ = DMR_TR_READ;
        const TR_WRITE = DMR_TR_WRITE;
        const AUTO = DMR_AUTO;
        const TYPE_SINGLE = DMR_TYPE_SINGLE;
        const SIZE8 = DMR_SIZE8;
        const MONO = DMR_MONO;
        const USIGN = DMR_USIGN;
        const SIZE32 = DMR_SIZE32;
        const SWAPC = DMR_SWAPC;
        const POLL = DMR_POLL;
        const DMA = DMR_DMA;

        /// Base template every format starts from
        const TEMPLATE = DMR_TEMPLATE;
    }
}

bitflags! {
    /// Host interrupt status (HISR) snapshot
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InterruptStatus: u32 {
        /// Playback channel
        const VC0 = HISR_VC0;
        /// Capture channel
        const VC1 = HISR_VC1;
        /// Global interrupt enable
        const INTENA = HISR_INTENA;

        /// Causes reported per data channel
        const CHANNELS = HISR_VC0 | HISR_VC1;

        const _ = !0;
    }
}

impl InterruptStatus {
    /// Whether this snapshot carries a cause for `dir`
    pub fn has(self, dir: Direction) -> bool {
        self.contains(dir.regs().status)
    }

    /// Only the per-channel causes
    pub fn channel_causes(self) -> InterruptStatus {
        self & InterruptStatus::CHANNELS
    }
}

// ============================================================================
// Control Word Cache
// ============================================================================

/// Hardware control words for one physical channel, built then applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlWords {
    /// DMA mode word
    pub dmr: DataMode,
    /// DMA command word
    pub dcr: u32,
    /// FIFO control word
    pub fcr: u32,
    /// Active task control half latched at start
    pub active_ctl: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_direction_mapping() {
        assert_eq!(Channel::Dac.direction(), Some(Direction::Playback));
        assert_eq!(Channel::Adc.direction(), Some(Direction::Capture));
        assert_eq!(Channel::Mixer.direction(), None);
        for dir in Direction::ALL {
            assert_eq!(dir.channel().direction(), Some(dir));
        }
        assert_eq!(Channel::from_index(2), Some(Channel::Mixer));
        assert_eq!(Channel::from_index(3), None);
    }

    #[test]
    fn test_direction_halves_are_disjoint() {
        let play = Direction::Playback.regs();
        let capt = Direction::Capture.regs();
        assert_eq!(play.ctl_half & capt.ctl_half, 0);
        assert_eq!(play.ctl_half | capt.ctl_half, 0xFFFF_FFFF);
        assert_ne!(play.status, capt.status);
    }

    #[test]
    fn test_interrupt_status_keeps_unknown_bits() {
        let status = InterruptStatus::from_bits_retain(0x8000_0103);
        assert!(status.has(Direction::Playback));
        assert!(status.has(Direction::Capture));
        assert_eq!(status.channel_causes().bits(), 0x3);
        assert_eq!(status.bits(), 0x8000_0103);
    }

    #[test]
    fn test_error_display() {
        use core::fmt::Write;

        struct Buf([u8; 64], usize);
        impl Write for Buf {
            fn write_str(&mut self, s: &str) -> core::fmt::Result {
                let end = self.1 + s.len();
                self.0[self.1..end].copy_from_slice(s.as_bytes());
                self.1 = end;
                Ok(())
            }
        }

        let mut buf = Buf([0; 64], 0);
        write!(buf, "{}", Cs4624Error::from(CodecError::StatusTimeout { reg: 0x26 })).unwrap();
        assert_eq!(&buf.0[..buf.1], b"AC'97 read timeout (VSTS), reg 0x26");
    }
}
