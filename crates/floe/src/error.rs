use std::sync::{MutexGuard, PoisonError};

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `floe` can emit.
///
/// The three configuration variants are construction-time failures: a caller
/// never receives a generator whose coordinate or layout is invalid.
/// [`Error::LockPoisoned`] is the only runtime failure, and only the lock
/// generator can produce it.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The configured worker id does not fit in `worker_id_bits`.
    #[error("worker id {worker_id} can't be greater than {max} or less than 0")]
    WorkerIdOutOfRange { worker_id: u64, max: u64 },

    /// The configured datacenter id does not fit in `datacenter_id_bits`.
    #[error("datacenter id {datacenter_id} can't be greater than {max} or less than 0")]
    DatacenterIdOutOfRange { datacenter_id: u64, max: u64 },

    /// The configured field widths leave no room for a timestamp. Shift
    /// amounts of 64 or more are undefined for `u64`, so this is rejected at
    /// construction.
    #[error("worker, datacenter and sequence widths occupy {total_bits} bits; they must leave room for a timestamp in a 64-bit id")]
    LayoutOverflow { total_bits: u64 },

    /// The operation failed because the generator's lock was poisoned by a
    /// thread that panicked while holding it.
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
