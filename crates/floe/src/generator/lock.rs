use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};
use std::time::{Duration, Instant};

use crate::{
    config::GeneratorConfig,
    error::Error,
    generator::{SequencerState, step, validate},
    layout::Layout,
    status::IdGenStatus,
    time::TimeSource,
};

/// A lock-based generator suitable for multi-threaded environments.
///
/// The whole sample-update-pack sequence runs under one [`Mutex`], so a
/// single instance can back many concurrent callers — e.g. every request
/// handler of an HTTP service — without an external critical section. Never
/// share one `(worker_id, datacenter_id)` coordinate across two generator
/// instances; that breaks global uniqueness.
///
/// # Example
/// ```
/// use floe::{GeneratorConfig, LockSnowflakeGenerator, WallClock};
///
/// let generator = LockSnowflakeGenerator::new(
///     GeneratorConfig {
///         worker_id_bits: 5,
///         datacenter_id_bits: 5,
///         sequence_bits: 12,
///         ..GeneratorConfig::default()
///     },
///     WallClock,
/// )
/// .unwrap();
///
/// let id: u64 = generator.try_next_id().unwrap();
/// ```
pub struct LockSnowflakeGenerator<T: TimeSource> {
    config: GeneratorConfig,
    layout: Layout,
    state: Mutex<SequencerState>,
    count: AtomicU64,
    start: Instant,
    time: T,
}

impl<T: TimeSource> LockSnowflakeGenerator<T> {
    /// Creates a new generator from `config`, fetching timestamps from
    /// `time`.
    ///
    /// # Errors
    ///
    /// Fails fast if the configuration is invalid: the worker or datacenter
    /// id out of range for its width, or field widths too wide for a 64-bit
    /// id.
    pub fn new(config: GeneratorConfig, time: T) -> Result<Self, Error> {
        let layout = validate(&config)?;
        Ok(Self {
            config,
            layout,
            state: Mutex::new(SequencerState::new(&config)),
            count: AtomicU64::new(0),
            start: Instant::now(),
            time,
        })
    }

    /// Generates the next ID, busy-waiting while the generator pends.
    ///
    /// The wait is a tight spin with no sleep and no timeout, bounded only by
    /// the clock advancing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if a thread panicked while holding the
    /// generator's lock.
    pub fn try_next_id(&self) -> Result<u64, Error> {
        loop {
            match self.try_poll_id()? {
                IdGenStatus::Ready { id } => break Ok(id),
                IdGenStatus::Pending { .. } => core::hint::spin_loop(),
            }
        }
    }

    /// Attempts to generate the next available ID without blocking.
    ///
    /// Returns [`IdGenStatus::Pending`] when the sequence space for the
    /// current millisecond is exhausted or the clock was observed running
    /// backwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if a thread panicked while holding the
    /// generator's lock.
    pub fn try_poll_id(&self) -> Result<IdGenStatus, Error> {
        // The clock is sampled inside the critical section so that two
        // callers can never apply their readings out of order.
        let mut state = self.state.lock()?;
        let now = self.time.current_millis();
        let status = step(&self.config, &self.layout, &mut state, now);
        drop(state);
        if let IdGenStatus::Ready { .. } = status {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
        Ok(status)
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
        self.count.load(Ordering::Relaxed)
    }

    /// The derived bit-field layout, e.g. for decoding IDs back into parts.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}
