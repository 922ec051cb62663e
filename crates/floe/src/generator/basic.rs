use core::cell::Cell;
use std::time::{Duration, Instant};

use crate::{
    config::GeneratorConfig,
    error::Error,
    generator::{SequencerState, step, validate},
    layout::Layout,
    status::IdGenStatus,
    time::TimeSource,
};

/// A non-concurrent generator suitable for single-threaded environments.
///
/// State lives in [`Cell`]s, so this generator is lightweight and fast, but
/// **not thread-safe**: `next_id()` must never be invoked concurrently. For
/// shared use across threads, see [`LockSnowflakeGenerator`].
///
/// # Example
/// ```
/// use floe::{BasicSnowflakeGenerator, GeneratorConfig, WallClock};
///
/// let generator = BasicSnowflakeGenerator::new(
///     GeneratorConfig {
///         worker_id: 1,
///         datacenter_id: 1,
///         worker_id_bits: 5,
///         datacenter_id_bits: 5,
///         sequence_bits: 12,
///         ..GeneratorConfig::default()
///     },
///     WallClock,
/// )
/// .unwrap();
///
/// let id: u64 = generator.next_id();
/// ```
///
/// [`LockSnowflakeGenerator`]: crate::generator::LockSnowflakeGenerator
pub struct BasicSnowflakeGenerator<T: TimeSource> {
    config: GeneratorConfig,
    layout: Layout,
    state: Cell<SequencerState>,
    count: Cell<u64>,
    start: Instant,
    time: T,
}

impl<T: TimeSource> BasicSnowflakeGenerator<T> {
    /// Creates a new generator from `config`, fetching timestamps from
    /// `time`.
    ///
    /// # Errors
    ///
    /// Fails fast if the configuration is invalid: the worker or datacenter
    /// id out of range for its width, or field widths too wide for a 64-bit
    /// id. The caller never receives a partially constructed generator.
    pub fn new(config: GeneratorConfig, time: T) -> Result<Self, Error> {
        let layout = validate(&config)?;
        Ok(Self {
            config,
            layout,
            state: Cell::new(SequencerState::new(&config)),
            count: Cell::new(0),
            start: Instant::now(),
            time,
        })
    }

    /// Generates the next ID, busy-waiting while the generator pends.
    ///
    /// The wait is a tight spin with no sleep and no timeout, bounded only by
    /// the clock advancing — at most about one millisecond when the sequence
    /// space is exhausted, and however long the clock takes to recover after
    /// a regression.
    pub fn next_id(&self) -> u64 {
        loop {
            match self.poll_id() {
                IdGenStatus::Ready { id } => break id,
                IdGenStatus::Pending { .. } => core::hint::spin_loop(),
            }
        }
    }

    /// Attempts to generate the next available ID without blocking.
    ///
    /// Returns [`IdGenStatus::Pending`] when the sequence space for the
    /// current millisecond is exhausted or the clock was observed running
    /// backwards; the caller decides whether to spin, sleep, or bail.
    pub fn poll_id(&self) -> IdGenStatus {
        let now = self.time.current_millis();
        let mut state = self.state.get();
        let status = step(&self.config, &self.layout, &mut state, now);
        if let IdGenStatus::Ready { .. } = status {
            self.state.set(state);
            self.count.set(self.count.get() + 1);
        }
        status
    }

    /// The configured worker coordinate.
    pub fn worker_id(&self) -> u64 {
        self.config.worker_id
    }

    /// The configured datacenter coordinate.
    pub fn datacenter_id(&self) -> u64 {
        self.config.datacenter_id
    }

    /// A fresh clock sample in milliseconds since the Unix epoch — not the
    /// timestamp of the last generated ID.
    pub fn timestamp(&self) -> u64 {
        self.time.current_millis()
    }

    /// Elapsed wall-clock time since successful construction.
    pub fn uptime(&self) -> Duration {
        self.start.elapsed()
    }

    /// Total number of IDs minted by this instance.
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    /// The derived bit-field layout, e.g. for decoding IDs back into parts.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}
