// ============================================================================
// src/lib.rs - CS4624 Audio Controller Core
// ============================================================================
//!
//! # CS4624 オーディオコントローラ制御コア
//!
//! Cirrus Logic CS4624 (CS461x ファミリ) PCI オーディオコントローラの
//! レジスタレベル制御を提供する `no_std` ライブラリ。
//!
//! ## モジュール
//! - `io::audio::cs4624` - コントローラ本体（コーデックリンク、SRC、DMA、割り込み）
//! - `io::audio::regs` - レジスタ定義
//! - `io::mmio` - レジスタアクセス抽象
//! - `io::pci` - バス列挙サービスとのインターフェース
//! - `time` - マイクロ秒ビジーウェイト抽象
//!
//! バス列挙・物理メモリマッピング・タイマー・ロガーの初期化は
//! 組み込み先のカーネルが提供する。

#![cfg_attr(not(test), no_std)]

pub mod io;
pub mod time;

pub use io::audio::cs4624::{
    Channel, ChannelConfig, CodecError, CodecResult, Cs4624, Cs4624Error, Cs4624Result,
    DataMode, DeviceIdentity, Direction, FirmwareImage, FirmwareSegment, InterruptStatus,
    MixerControl, MixerVolume, Region, RegionId, RegionMap, SampleBits, SubDeviceLimits,
};
pub use io::mmio::{RegisterIo, VolatileMmio};
pub use io::pci::{Bar, PciFunction, PlatformBus};
pub use time::{Delay, FnDelay};
