// ============================================================================
// src/io/audio/regs.rs - Cirrus Logic CS4624 Register Definitions
// ============================================================================
//!
//! # CS4624 レジスタ定義
//!
//! CS461x ファミリのホストレジスタ空間 (BA0) と SP プロセッサ空間 (BA1)、
//! および AC'97 コーデックのミキサーレジスタ定義。
//!
//! BA1 のアドレスは `bank << 16 | offset` 形式でエンコードされる。
//! bank 0/1 = データメモリ、bank 2 = プログラムメモリ、bank 3 = SP レジスタ。

#![allow(dead_code)]

// ============================================================================
// PCI Configuration Space
// ============================================================================

/// Cirrus Logic Vendor ID
pub const CS4624_VENDOR_ID: u16 = 0x1013;

/// CS4624 Device ID
pub const CS4624_DEVICE_ID: u16 = 0x6003;

/// Driver name
pub const DRIVER_NAME: &str = "CS4624";

// ============================================================================
// Region Layout
// ============================================================================

/// BA0 window size
pub const BA0_SIZE: usize = 0x1000;

/// BA1 data memory 0 window size
pub const BA1_DATA0_SIZE: usize = 0x3000;

/// BA1 data memory 1 window size
pub const BA1_DATA1_SIZE: usize = 0x3800;

/// BA1 program memory window size
pub const BA1_PRG_SIZE: usize = 0x7000;

/// BA1 SP register window size
pub const BA1_REG_SIZE: usize = 0x0100;

/// BA1 data memory 0 offset
pub const BA1_SP_DMEM0: u32 = 0x0000_0000;

/// BA1 data memory 1 offset
pub const BA1_SP_DMEM1: u32 = 0x0001_0000;

/// BA1 program memory offset
pub const BA1_SP_PMEM: u32 = 0x0002_0000;

/// BA1 SP register offset
pub const BA1_SP_REG: u32 = 0x0003_0000;

/// Shift extracting the bank index from an encoded BA1 address
pub const BA1_BANK_SHIFT: u32 = 16;

/// Mask extracting the in-bank offset from an encoded BA1 address
pub const BA1_OFFSET_MASK: u32 = 0xFFFF;

// ============================================================================
// BA0: Host Interrupt Registers
// ============================================================================

/// Host Interrupt Status Register (HISR) - 32-bit, RO
pub const BA0_HISR: u32 = 0x000;

/// Host Signal Register 0 (HSR0)
pub const BA0_HSR0: u32 = 0x004;

/// Host Interrupt Control Register (HICR) - 32-bit, WO
pub const BA0_HICR: u32 = 0x008;

/// HICR: Interrupt End Of Interrupt Value
pub const HICR_IEV: u32 = 0x0000_0001;

/// HICR: Change Mode
pub const HICR_CHGM: u32 = 0x0000_0002;

/// HISR: Virtual channel 0 (playback) interrupt
pub const HISR_VC0: u32 = 0x0000_0001;

/// HISR: Virtual channel 1 (capture) interrupt
pub const HISR_VC1: u32 = 0x0000_0002;

/// HISR: Global interrupt enable
pub const HISR_INTENA: u32 = 0x8000_0000;

// ============================================================================
// BA0: DMA Channel Registers
// ============================================================================

/// DMA Current Count, channel 0 (playback)
pub const BA0_DCC0: u32 = 0x114;

/// DMA Base Address, channel 0
pub const BA0_DBA0: u32 = 0x118;

/// DMA Base Count, channel 0
pub const BA0_DBC0: u32 = 0x11C;

/// DMA Current Count, channel 1 (capture)
pub const BA0_DCC1: u32 = 0x124;

/// DMA Base Address, channel 1
pub const BA0_DBA1: u32 = 0x128;

/// DMA Base Count, channel 1
pub const BA0_DBC1: u32 = 0x12C;

/// DMA Mode Register, channel 0
pub const BA0_DMR0: u32 = 0x150;

/// DMA Command Register, channel 0
pub const BA0_DCR0: u32 = 0x154;

/// DMA Mode Register, channel 1
pub const BA0_DMR1: u32 = 0x158;

/// DMA Command Register, channel 1
pub const BA0_DCR1: u32 = 0x15C;

/// FIFO Control Register, channel 0
pub const BA0_FCR0: u32 = 0x180;

/// FIFO Control Register, channel 1
pub const BA0_FCR1: u32 = 0x184;

/// FIFO Status and Interrupt Control, channel 0 (frame size in channel)
pub const BA0_FSIC0: u32 = 0x214;

/// FIFO Status and Interrupt Control, channel 1
pub const BA0_FSIC1: u32 = 0x21C;

/// DMR: auto-initialize
pub const DMR_AUTO: u32 = 1 << 4;

/// DMR: single transfer type
pub const DMR_TYPE_SINGLE: u32 = 1 << 6;

/// DMR: transfer direction, memory → FIFO (playback)
pub const DMR_TR_WRITE: u32 = 1 << 3;

/// DMR: transfer direction, FIFO → memory (capture)
pub const DMR_TR_READ: u32 = 1 << 2;

/// DMR: 8-bit samples
pub const DMR_SIZE8: u32 = 1 << 16;

/// DMR: mono
pub const DMR_MONO: u32 = 1 << 17;

/// DMR: unsigned samples
pub const DMR_USIGN: u32 = 1 << 19;

/// DMR: 32-bit samples
pub const DMR_SIZE32: u32 = 1 << 20;

/// DMR: byte swap
pub const DMR_SWAPC: u32 = 1 << 22;

/// DMR: polled mode
pub const DMR_POLL: u32 = 1 << 28;

/// DMR: DMA enable
pub const DMR_DMA: u32 = 1 << 29;

/// DMR template applied before format bits
pub const DMR_TEMPLATE: u32 = DMR_AUTO | DMR_TYPE_SINGLE;

/// DCR: transfer disable (mask)
pub const DCR_MSK: u32 = 1 << 0;

/// DCR template: terminal-count and half-terminal-count interrupts, masked
pub const DCR_TEMPLATE: u32 = 0x0003_0001;

/// FCR: FIFO enable
pub const FCR_FEN: u32 = 1 << 31;

/// FCR template for the playback FIFO
pub const FCR_PLAYBACK_TEMPLATE: u32 = 0x0100_2000;

/// FCR template for the capture FIFO
pub const FCR_CAPTURE_TEMPLATE: u32 = 0x0B0A_2020;

// ============================================================================
// BA0: Clock and Serial Port Registers
// ============================================================================

/// Clock Control Register 1
pub const BA0_CLKCR1: u32 = 0x400;

/// Clock Control Register 2
pub const BA0_CLKCR2: u32 = 0x404;

/// PLL Multiplier Register
pub const BA0_PLLM: u32 = 0x408;

/// PLL Capacitor Coefficient Register
pub const BA0_PLLCC: u32 = 0x40C;

/// Serial Port Master Control Register 1
pub const BA0_SERMC1: u32 = 0x420;

/// Serial Port Configuration Register 1
pub const BA0_SERC1: u32 = 0x428;

/// Serial Port Configuration Register 2
pub const BA0_SERC2: u32 = 0x42C;

/// Serial Port Backdoor Configuration Register
pub const BA0_SERBCF: u32 = 0x44C;

/// Serial Port AC-link Configuration
pub const BA0_SERACC: u32 = 0x4C8;

/// CLKCR1: PLL power up
pub const CLKCR1_PLLP: u32 = 0x0000_0010;

/// CLKCR1: software clock enable
pub const CLKCR1_SWCE: u32 = 0x0000_0020;

/// CLKCR2: PLL output divide by 8
pub const CLKCR2_PDIVS_8: u32 = 0x0000_0008;

/// PLLCC: loop filter 1050-2780 kHz
pub const PLLCC_LPF_1050_2780_KHZ: u32 = 0x0000_0080;

/// PLLCC: charge pump 73-104 MHz
pub const PLLCC_CDR_73_104_MHZ: u32 = 0x0000_0005;

/// PLL multiplier value
pub const PLLM_VALUE: u32 = 0x3A;

/// SERMC1: master serial port enable
pub const SERMC1_MSPE: u32 = 0x0000_0001;

/// SERMC1: port timing, AC'97
pub const SERMC1_PTC_AC97: u32 = 0x0000_0002;

/// SERC1: serial output 1 enable
pub const SERC1_SO1EN: u32 = 0x0000_0001;

/// SERC1: serial output 1 format, AC'97
pub const SERC1_SO1F_AC97: u32 = 0x0000_0002;

/// SERC2: serial input 1 enable
pub const SERC2_SI1EN: u32 = 0x0000_0001;

/// SERC2: serial input 1 format, AC'97
pub const SERC2_SI1F_AC97: u32 = 0x0000_0002;

/// SERBCF: host bypass
pub const SERBCF_HBP: u32 = 0x0000_0002;

/// SERACC: AC'97 1.03 codec
pub const SERACC_CHIP_TYPE_1_03: u32 = 0x0000_0000;

/// SERACC: host-controlled AC-link
pub const SERACC_HSP: u32 = 0x0000_0008;

// ============================================================================
// BA0: AC'97 Link Registers
// ============================================================================

/// AC'97 Control Register (ACCTL)
pub const BA0_ACCTL: u32 = 0x460;

/// AC'97 Status Register (ACSTS)
pub const BA0_ACSTS: u32 = 0x464;

/// AC'97 Output Slot Valid Register (ACOSV)
pub const BA0_ACOSV: u32 = 0x468;

/// AC'97 Command Address Register (ACCAD)
pub const BA0_ACCAD: u32 = 0x46C;

/// AC'97 Command Data Register (ACCDA)
pub const BA0_ACCDA: u32 = 0x470;

/// AC'97 Input Slot Valid Register (ACISV)
pub const BA0_ACISV: u32 = 0x474;

/// AC'97 Status Address Register (ACSAD)
pub const BA0_ACSAD: u32 = 0x478;

/// AC'97 Status Data Register (ACSDA)
pub const BA0_ACSDA: u32 = 0x47C;

/// ACCTL: ARST# inactive (codec not held in reset)
pub const ACCTL_RSTN: u32 = 0x0000_0001;

/// ACCTL: enable sync generation
pub const ACCTL_ESYN: u32 = 0x0000_0002;

/// ACCTL: valid frame
pub const ACCTL_VFRM: u32 = 0x0000_0004;

/// ACCTL: dynamic command valid (transaction in flight)
pub const ACCTL_DCV: u32 = 0x0000_0008;

/// ACCTL: command read (set) / write (clear)
pub const ACCTL_CRW: u32 = 0x0000_0010;

/// ACSTS: codec ready
pub const ACSTS_CRDY: u32 = 0x0000_0001;

/// ACSTS: valid status
pub const ACSTS_VSTS: u32 = 0x0000_0002;

/// ACOSV: output slot 3 valid
pub const ACOSV_SLV3: u32 = 0x0000_0008;

/// ACOSV: output slot 4 valid
pub const ACOSV_SLV4: u32 = 0x0000_0010;

/// ACISV: input slot 3 valid
pub const ACISV_ISV3: u32 = 0x0000_0008;

/// ACISV: input slot 4 valid
pub const ACISV_ISV4: u32 = 0x0000_0010;

// ============================================================================
// BA1: SP Processor Registers
// ============================================================================

/// SP Control Register
pub const BA1_SPCR: u32 = 0x0003_0000;

/// Debug Register
pub const BA1_DREG: u32 = 0x0003_0004;

/// Trap Write Port Register
pub const BA1_TWPR: u32 = 0x0003_000C;

/// Frame Timer Register
pub const BA1_FRMT: u32 = 0x0003_0030;

/// SPCR: DMA request enable
pub const SPCR_DRQEN: u32 = 0x0000_0020;

/// SPCR: reset SP
pub const SPCR_RSTSP: u32 = 0x0000_0040;

/// DREG: trap register select base
pub const DREG_REGID_TRAP_SELECT: u32 = 0x0000_0100;

/// Number of SP trap registers
pub const SP_TRAP_COUNT: u32 = 8;

/// Frame timer: cycles per frame
pub const FRMT_CYCLES_PER_FRAME: u32 = 0x0ADF;

// ============================================================================
// BA1: Task Control Blocks
// ============================================================================

/// Playback control word (active half: bits 16-31)
pub const BA1_PCTL: u32 = 0x0000_02A4;

/// Playback phase increment
pub const BA1_PPI: u32 = 0x0000_02B4;

/// Playback sample rate correction
pub const BA1_PSRC: u32 = 0x0000_0288;

/// Playback format and interrupt enable
pub const BA1_PFIE: u32 = 0x0000_02C4;

/// Capture control word (active half: bits 0-15)
pub const BA1_CCTL: u32 = 0x0000_0064;

/// Capture interrupt enable
pub const BA1_CIE: u32 = 0x0000_0104;

/// Capture sample rate correction
pub const BA1_CSRC: u32 = 0x0000_02C8;

/// Capture coefficient increment
pub const BA1_CCI: u32 = 0x0000_02D8;

/// Capture delay
pub const BA1_CD: u32 = 0x0000_02E0;

/// Capture phase increment
pub const BA1_CPI: u32 = 0x0000_02F4;

/// Capture frame group 1
pub const BA1_CFG1: u32 = 0x0000_0068;

/// Capture frame group 2
pub const BA1_CFG2: u32 = 0x0000_006C;

/// Capture constant
pub const BA1_CCST: u32 = 0x0000_007C;

/// Capture SPB address
pub const BA1_CSPB: u32 = 0x0000_005C;

/// VariDecimate buffer 1
pub const BA1_VARIDEC_BUF_1: u32 = 0x0000_0444;

/// CFG2 write-back enable bit
pub const CFG2_WRITEBACK_ENABLE: u32 = 0x0080_0000;

/// CD low-half constant
pub const CD_TAIL: u32 = 0x0000_0080;

/// PFIE field cleared on enable/disable
pub const PFIE_CLEAR_MASK: u32 = 0x0000_F03F;

/// PFIE bits set on disable
pub const PFIE_DISABLE: u32 = 0x0000_0010;

/// CIE field cleared on enable/disable
pub const CIE_CLEAR_MASK: u32 = 0x0000_003F;

/// CIE bits set on enable
pub const CIE_ENABLE: u32 = 0x0000_0001;

/// CIE bits set on disable
pub const CIE_DISABLE: u32 = 0x0000_0011;

// ============================================================================
// Sample Rate Converter
// ============================================================================

/// Fixed hardware input/output rate
pub const SRC_HW_RATE: u32 = 48_000;

/// Groups of frames per second used for SRC correction
pub const GOF_PER_SEC: u32 = 200;

/// Maximum decimation factor for capture
pub const CAPTURE_MAX_DECIMATION: u32 = 9;

/// Write-back frame rate (2^6 * 3 * 5^3)
pub const WRITEBACK_FRAME_RATE: u32 = 24_000;

// ============================================================================
// AC'97 Mixer Registers (codec side)
// ============================================================================

/// Reset
pub const AC97_RESET: u8 = 0x00;

/// Master volume
pub const AC97_MASTER: u8 = 0x02;

/// Headphone volume
pub const AC97_HEADPHONE: u8 = 0x04;

/// Master mono volume
pub const AC97_MASTER_MONO: u8 = 0x06;

/// Mic volume
pub const AC97_MIC: u8 = 0x0E;

/// Line-in volume
pub const AC97_LINE_IN: u8 = 0x10;

/// CD volume
pub const AC97_CD: u8 = 0x12;

/// PCM out volume
pub const AC97_PCM_OUT: u8 = 0x18;

/// Record gain
pub const AC97_RECORD_GAIN: u8 = 0x1C;

/// Powerdown control/status
pub const AC97_POWERDOWN: u8 = 0x26;

/// Vendor ID 1
pub const AC97_VENDOR_ID1: u8 = 0x7C;

/// Vendor ID 2
pub const AC97_VENDOR_ID2: u8 = 0x7E;

/// Volume register mute bit
pub const AC97_MUTE: u16 = 0x8000;

// ============================================================================
// Timeouts
// ============================================================================

/// Delay between codec link polls (µs)
pub const POLL_DELAY_US: u64 = 10;

/// Codec write: DCV clear poll iterations
pub const CODEC_WRITE_POLLS: u32 = 50_000;

/// Codec read: DCV clear poll iterations
pub const CODEC_READ_POLLS: u32 = 1_000;

/// Codec read: VSTS poll iterations
pub const CODEC_STATUS_POLLS: u32 = 100;

/// Valid-frame re-assert settle delay (µs)
pub const VFRM_SETTLE_US: u64 = 50;

/// Bring-up: codec ready poll iterations (×10 µs)
pub const CODEC_READY_POLLS: u32 = 150;

/// Bring-up: input slot valid poll iterations (×10 ms)
pub const SLOT_VALID_POLLS: u32 = 150;

/// Bring-up: input slot valid poll delay (ms)
pub const SLOT_VALID_DELAY_MS: u64 = 10;

/// Bring-up: ARST# low time (µs)
pub const RESET_PULSE_US: u64 = 50;

/// Bring-up: bit clock start delay (µs)
pub const BIT_CLOCK_DELAY_US: u64 = 10;

/// Bring-up: PLL settle time (µs)
pub const PLL_SETTLE_US: u64 = 100;

/// Bring-up: serial port settle time (µs)
pub const SERIAL_SETTLE_US: u64 = 5;
