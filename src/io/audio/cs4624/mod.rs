// ============================================================================
// src/io/audio/cs4624/mod.rs - Cirrus Logic CS4624 Driver
// ============================================================================
//!
//! # Cirrus Logic CS4624 (CS461x) ドライバ
//!
//! PCI オーディオコントローラ CS4624 のレジスタレベル制御コア。
//!
//! ## 構成
//! - `region`: BA0 / BA1 レジスタウィンドウの解決
//! - `codec`: AC-link 経由の AC'97 コーデックアクセス
//! - `rate`: SRC 係数の固定小数点導出
//! - `dma`: 転送方向ごとの DMA チャンネル制御
//! - `interrupt`: HISR の読み出し・確認応答・要因判定
//! - `firmware`: SP リセットとファームウェア転送
//! - `config` / `mixer`: チャンネル設定と AC'97 ミキサー
//! - `controller`: デバイスコンテキストとチャンネルライフサイクル
//! - `global`: グローバルインスタンスと公開API
//!
//! ## 使用例
//! ```ignore
//! use cs4624::io::audio::cs4624::{self, Channel};
//!
//! let io = unsafe { VolatileMmio::new() };
//! cs4624::init(&kernel_pci, io, FnDelay(pit_delay_us), FIRMWARE)?;
//! cs4624::set_transfer(Channel::Dac, dma_addr, 64 * 1024)?;
//! cs4624::start(Channel::Dac)?;
//! ```

mod codec;
mod config;
mod controller;
mod dma;
mod firmware;
mod global;
mod interrupt;
mod mixer;
mod rate;
mod region;
mod types;

#[cfg(test)]
pub(crate) mod sim;

pub use super::regs;

pub use config::{ChannelConfig, SampleBits, SubDeviceLimits, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE};
pub use controller::{Cs4624, DeviceContext};
pub use dma::MAX_TRANSFER_LEN;
pub use firmware::{FirmwareImage, FirmwareSegment};
pub use global::{
    clear_interrupt_pending, current_position, get_interrupt_count, get_irq, handle_interrupt,
    init, pause, reset, resume, set_transfer, shutdown, start, stop, with_driver,
    with_driver_mut, GlobalDriver,
};
pub use mixer::{MixerControl, MixerVolume};
pub use rate::{
    clamp_capture_rate, frame_group_length, CaptureSrc, PlaybackSrc, CAPTURE_MIN_RATE,
};
pub use region::{Region, RegionId, RegionMap, BA1_SPAN};
pub use types::{
    Channel, CodecError, CodecResult, ControlWords, Cs4624Error, Cs4624Result, DataMode,
    DeviceIdentity, Direction, DirectionRegs, InterruptStatus, RegWidth,
};
