mod basic;
mod lock;
#[cfg(test)]
mod tests;

pub use basic::*;
pub use lock::*;

use crate::{config::GeneratorConfig, error::Error, layout::Layout, status::IdGenStatus};

/// The mutable half of a generator: the per-millisecond counter and the clock
/// reading used by the most recent ID.
///
/// `last_timestamp` is `None` until the first ID is minted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SequencerState {
    pub(crate) last_timestamp: Option<u64>,
    pub(crate) sequence: u64,
}

impl SequencerState {
    pub(crate) fn new(config: &GeneratorConfig) -> Self {
        Self {
            last_timestamp: None,
            sequence: config.sequence,
        }
    }
}

/// Derives the layout and checks the configured coordinate against it.
///
/// Runs once per construction; a generator whose configuration fails here is
/// never handed to the caller.
pub(crate) fn validate(config: &GeneratorConfig) -> Result<Layout, Error> {
    let layout = Layout::new(config)?;
    if config.worker_id > layout.max_worker_id {
        return Err(Error::WorkerIdOutOfRange {
            worker_id: config.worker_id,
            max: layout.max_worker_id,
        });
    }
    if config.datacenter_id > layout.max_datacenter_id {
        return Err(Error::DatacenterIdOutOfRange {
            datacenter_id: config.datacenter_id,
            max: layout.max_datacenter_id,
        });
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(
        worker_id = config.worker_id,
        datacenter_id = config.datacenter_id,
        "generator ready"
    );
    Ok(layout)
}

/// One step of the sequencer state machine at clock reading `now`.
///
/// Both generator flavors call this with their state exclusively held, so the
/// read-modify-write on `state` is race-free by construction.
pub(crate) fn step(
    config: &GeneratorConfig,
    layout: &Layout,
    state: &mut SequencerState,
    now: u64,
) -> IdGenStatus {
    match state.last_timestamp {
        Some(last) if now < last => cold_clock_behind(now, last),
        Some(last) if now == last => {
            let next = (state.sequence + 1) & layout.sequence_mask;
            if next == 0 {
                // Sequence space exhausted for this millisecond.
                IdGenStatus::Pending { yield_until: last + 1 }
            } else {
                state.sequence = next;
                IdGenStatus::Ready {
                    id: pack(config, layout, now, next),
                }
            }
        }
        _ => {
            state.sequence = 0;
            state.last_timestamp = Some(now);
            IdGenStatus::Ready {
                id: pack(config, layout, now, 0),
            }
        }
    }
}

fn pack(config: &GeneratorConfig, layout: &Layout, now: u64, sequence: u64) -> u64 {
    debug_assert!(now >= config.epoch, "clock reading predates the epoch");
    layout.pack(
        now.saturating_sub(config.epoch),
        config.datacenter_id,
        config.worker_id,
        sequence,
    )
}

#[cold]
#[inline(never)]
fn cold_clock_behind(now: u64, last: u64) -> IdGenStatus {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        behind_ms = last - now,
        "clock moved backwards; pending until it recovers"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = now;
    IdGenStatus::Pending { yield_until: last }
}
