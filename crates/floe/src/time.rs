use std::time::{SystemTime, UNIX_EPOCH};

/// Default epoch: Wednesday, January 1, 2020 00:00:00 UTC
pub const DEFAULT_EPOCH: u64 = 1_577_836_800_000;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: u64 = 1_288_834_974_657;

/// A trait for time sources that return the current wall-clock reading.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests, so millisecond boundaries and clock regressions can
/// be simulated deterministically instead of racing real time.
///
/// Implementations report **milliseconds since the Unix epoch**; generators
/// subtract their configured epoch when packing.
///
/// # Example
///
/// ```
/// use floe::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

/// The production time source, backed by [`SystemTime`].
///
/// Unlike a monotonic timer, the system clock can step backwards (NTP
/// corrections, VM migrations). Generators detect that regression and pend
/// until the clock recovers rather than minting out-of-order IDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System clock before UNIX_EPOCH")
            .as_millis() as u64
    }
}
