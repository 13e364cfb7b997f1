// ============================================================================
// src/io/audio/mod.rs - Audio Subsystem Module
// ============================================================================
//!
//! # オーディオサブシステム
//!
//! Cirrus Logic CS4624 ドライバのレジスタレベル制御コア。
//!
//! ## サポートデバイス
//! - Cirrus Logic CS4624 / CS461x (1013:6003)
//!
//! ## モジュール
//! - `cs4624`: CS4624 コントローラ制御コア
//! - `regs`: CS4624 / AC'97 レジスタ定義

pub mod cs4624;
pub mod regs;

// Re-export main types
pub use cs4624::{
    Channel, ChannelConfig, CodecError, CodecResult, Cs4624, Cs4624Error, Cs4624Result,
    Direction, FirmwareImage, FirmwareSegment, InterruptStatus, MixerControl, MixerVolume,
};

// Re-export functions
pub use cs4624::{init, with_driver, with_driver_mut};
pub use cs4624::{
    get_interrupt_count as cs4624_get_interrupt_count, get_irq as cs4624_get_irq,
    handle_interrupt as cs4624_handle_interrupt,
};
