//! 時間管理
//!
//! コントローラのポーリングループが使用するビジーウェイト抽象。
//! 実際のタイマーソース（PIT / TSC / HPET）は組み込み先カーネルが提供し、
//! ここではマイクロ秒単位の待機インターフェースのみを定義する。

/// 1ミリ秒のマイクロ秒数
pub const MICROS_PER_MILLI: u64 = 1_000;

/// Bounded busy-wait primitive.
///
/// Every wait in the driver is a fixed number of iterations of
/// `delay_us(n)`, so an implementation must return after roughly `us`
/// microseconds and never block indefinitely.
pub trait Delay {
    /// Busy-wait for `us` microseconds
    fn delay_us(&self, us: u64);

    /// Busy-wait for `ms` milliseconds
    fn delay_ms(&self, ms: u64) {
        self.delay_us(ms.saturating_mul(MICROS_PER_MILLI));
    }
}

impl<T: Delay + ?Sized> Delay for &T {
    #[inline]
    fn delay_us(&self, us: u64) {
        (**self).delay_us(us)
    }
}

/// Adapter for a kernel-supplied delay function (e.g. `time::pit().delay_us`).
#[derive(Clone, Copy)]
pub struct FnDelay(pub fn(u64));

impl Delay for FnDelay {
    #[inline]
    fn delay_us(&self, us: u64) {
        (self.0)(us)
    }
}

impl core::fmt::Debug for FnDelay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FnDelay")
    }
}
