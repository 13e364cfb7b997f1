// ============================================================================
// src/io/audio/cs4624/global.rs - Global Driver Instance and Public API
// ============================================================================
//!
//! CS4624 ドライバのグローバルインスタンスと公開API。
//!
//! - グローバルドライバインスタンス (単一の排他ロック)
//! - 割り込みハンドラ
//! - 初期化関数
//! - ドライバフレームワーク向けの転送関数

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use spin::Mutex;

use crate::io::mmio::VolatileMmio;
use crate::io::pci::PlatformBus;
use crate::time::FnDelay;

use super::controller::Cs4624;
use super::firmware::FirmwareImage;
use super::types::{Channel, Cs4624Error, Cs4624Result, InterruptStatus};

/// Driver type held by the global instance
pub type GlobalDriver = Cs4624<VolatileMmio, FnDelay>;

// ============================================================================
// Interrupt Support
// ============================================================================

/// CS4624 割り込みライン
static CS4624_IRQ: AtomicU8 = AtomicU8::new(0);

/// 割り込み発生カウンタ
static CS4624_INTERRUPT_COUNT: AtomicU64 = AtomicU64::new(0);

/// 割り込みペンディングフラグ
static CS4624_INTERRUPT_PENDING: AtomicBool = AtomicBool::new(false);

// ============================================================================
// Global CS4624 Driver Instance
// ============================================================================

static CS4624_DRIVER: Mutex<Option<GlobalDriver>> = Mutex::new(None);

/// Probe and initialize the CS4624.
///
/// The global instance is installed only if bring-up succeeds.
pub fn init<B: PlatformBus>(
    bus: &B,
    io: VolatileMmio,
    delay: FnDelay,
    firmware: FirmwareImage,
) -> Cs4624Result<()> {
    log::info!("[CS4624] Searching for Cirrus Logic CS4624...");

    let mut driver = Cs4624::probe(bus, io, delay, firmware).inspect_err(|err| {
        log::warn!("[CS4624] Probe failed: {}", err);
    })?;

    let irq = driver.irq();
    CS4624_IRQ.store(irq, Ordering::SeqCst);
    log::info!("[CS4624] IRQ: {}", irq);

    driver.init()?;

    *CS4624_DRIVER.lock() = Some(driver);
    Ok(())
}

/// Drop the global instance after stopping every channel
pub fn shutdown() {
    if let Some(mut driver) = CS4624_DRIVER.lock().take() {
        driver.shutdown();
        log::info!("[CS4624] Driver shut down");
    }
}

/// Access the CS4624 driver
pub fn with_driver<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&GlobalDriver) -> R,
{
    CS4624_DRIVER.lock().as_ref().map(f)
}

/// Access the CS4624 driver mutably
pub fn with_driver_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut GlobalDriver) -> R,
{
    CS4624_DRIVER.lock().as_mut().map(f)
}

fn driver_op<F, R>(f: F) -> Cs4624Result<R>
where
    F: FnOnce(&mut GlobalDriver) -> Cs4624Result<R>,
{
    with_driver_mut(f).unwrap_or(Err(Cs4624Error::NotInitialized))
}

pub fn start(channel: Channel) -> Cs4624Result<()> {
    driver_op(|drv| drv.start(channel))
}

pub fn stop(channel: Channel) -> Cs4624Result<()> {
    driver_op(|drv| drv.stop(channel))
}

pub fn reset() -> Cs4624Result<()> {
    driver_op(|drv| drv.reset())
}

/// Program a channel's DMA window (`bytes` long at bus address `addr`)
pub fn set_transfer(channel: Channel, addr: u32, bytes: u32) -> Cs4624Result<()> {
    driver_op(|drv| drv.set_transfer(channel, addr, bytes))
}

pub fn pause(channel: Channel) -> Cs4624Result<()> {
    driver_op(|drv| drv.pause(channel))
}

pub fn resume(channel: Channel) -> Cs4624Result<()> {
    driver_op(|drv| drv.resume(channel))
}

pub fn current_position(channel: Channel) -> Cs4624Result<u16> {
    driver_op(|drv| drv.current_position(channel))
}

// ============================================================================
// CS4624 Interrupt Handler
// ============================================================================

/// CS4624 割り込みハンドラ
///
/// HISR を読み取り・確認応答し、チャンネルごとの要因を返す。
/// 未初期化の場合は空のステータスを返す。
pub fn handle_interrupt() -> InterruptStatus {
    let count = CS4624_INTERRUPT_COUNT.fetch_add(1, Ordering::SeqCst);

    let causes = with_driver_mut(|drv| drv.handle_interrupt()).unwrap_or_default();
    if !causes.is_empty() {
        CS4624_INTERRUPT_PENDING.store(true, Ordering::SeqCst);
    }

    // 最初の数回のみ
    if count < 5 {
        log::debug!("[CS4624] Interrupt #{}: {:?}", count, causes);
    }
    causes
}

/// CS4624 で使用する IRQ 番号を取得
pub fn get_irq() -> u8 {
    CS4624_IRQ.load(Ordering::SeqCst)
}

/// 割り込みペンディングフラグをクリアして状態を返す
pub fn clear_interrupt_pending() -> bool {
    CS4624_INTERRUPT_PENDING.swap(false, Ordering::SeqCst)
}

/// 割り込み発生回数を取得
pub fn get_interrupt_count() -> u64 {
    CS4624_INTERRUPT_COUNT.load(Ordering::SeqCst)
}
