use crate::{config::GeneratorConfig, error::Error};

/// The decoded fields of a packed ID.
///
/// `timestamp` is relative to the generator's configured epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts {
    pub timestamp: u64,
    pub datacenter_id: u64,
    pub worker_id: u64,
    pub sequence: u64,
}

/// The bit-field layout of a 64-bit ID, derived once from a
/// [`GeneratorConfig`] and constant for a generator's lifetime.
///
/// From least to most significant: `sequence_bits` of sequence,
/// `worker_id_bits` of worker id, `datacenter_id_bits` of datacenter id, and
/// the epoch-relative timestamp in the remaining high bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub max_worker_id: u64,
    pub max_datacenter_id: u64,
    pub sequence_mask: u64,
    pub worker_id_shift: u32,
    pub datacenter_id_shift: u32,
    pub timestamp_shift: u32,
}

impl Layout {
    /// Derives masks and shift amounts from the configured field widths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutOverflow`] if the three widths sum to 64 bits
    /// or more, which would leave no timestamp field and make the shifts
    /// undefined.
    pub fn new(config: &GeneratorConfig) -> Result<Self, Error> {
        let total_bits = u64::from(config.worker_id_bits)
            + u64::from(config.datacenter_id_bits)
            + u64::from(config.sequence_bits);
        if total_bits >= 64 {
            return Err(Error::LayoutOverflow { total_bits });
        }

        Ok(Self {
            max_worker_id: (1u64 << config.worker_id_bits) - 1,
            max_datacenter_id: (1u64 << config.datacenter_id_bits) - 1,
            sequence_mask: (1u64 << config.sequence_bits) - 1,
            worker_id_shift: config.sequence_bits,
            datacenter_id_shift: config.sequence_bits + config.worker_id_bits,
            timestamp_shift: config.sequence_bits
                + config.worker_id_bits
                + config.datacenter_id_bits,
        })
    }

    /// Packs the four fields into one `u64`.
    ///
    /// `timestamp` must already be epoch-relative.
    pub fn pack(&self, timestamp: u64, datacenter_id: u64, worker_id: u64, sequence: u64) -> u64 {
        debug_assert!(datacenter_id <= self.max_datacenter_id, "datacenter_id overflow");
        debug_assert!(worker_id <= self.max_worker_id, "worker_id overflow");
        debug_assert!(sequence <= self.sequence_mask, "sequence overflow");
        (timestamp << self.timestamp_shift)
            | (datacenter_id << self.datacenter_id_shift)
            | (worker_id << self.worker_id_shift)
            | sequence
    }

    /// Inverts [`Layout::pack`], recovering each field of `id`.
    pub fn decode(&self, id: u64) -> IdParts {
        IdParts {
            timestamp: id >> self.timestamp_shift,
            datacenter_id: (id >> self.datacenter_id_shift) & self.max_datacenter_id,
            worker_id: (id >> self.worker_id_shift) & self.max_worker_id,
            sequence: id & self.sequence_mask,
        }
    }
}
