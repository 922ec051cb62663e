use crate::time::DEFAULT_EPOCH;

/// Configuration for a Snowflake-style generator.
///
/// All fields are plain integers; a partially specified configuration is
/// expressed with struct-update syntax over [`GeneratorConfig::default`]:
///
/// ```
/// use floe::GeneratorConfig;
///
/// let config = GeneratorConfig {
///     worker_id: 3,
///     worker_id_bits: 5,
///     datacenter_id_bits: 5,
///     sequence_bits: 12,
///     ..GeneratorConfig::default()
/// };
/// ```
///
/// The timestamp field occupies whatever remains of the 64-bit ID above the
/// three configured widths, so their sum must stay below 64. That rule, and
/// the range of `worker_id`/`datacenter_id` against their widths, is enforced
/// when a generator is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Reference instant in milliseconds since the Unix epoch. Every
    /// generated timestamp is stored relative to this value.
    pub epoch: u64,
    /// This instance's worker coordinate.
    pub worker_id: u64,
    /// This instance's datacenter coordinate.
    pub datacenter_id: u64,
    /// Width of the worker field in bits.
    pub worker_id_bits: u32,
    /// Width of the datacenter field in bits.
    pub datacenter_id_bits: u32,
    /// Initial value of the per-millisecond counter. The counter resets to
    /// zero on the first observed millisecond, so this rarely needs to be
    /// anything but zero.
    pub sequence: u64,
    /// Width of the sequence field in bits.
    pub sequence_bits: u32,
}

impl Default for GeneratorConfig {
    /// Defaults to the [`DEFAULT_EPOCH`] with all ids and widths at zero.
    fn default() -> Self {
        Self {
            epoch: DEFAULT_EPOCH,
            worker_id: 0,
            datacenter_id: 0,
            worker_id_bits: 0,
            datacenter_id_bits: 0,
            sequence: 0,
            sequence_bits: 0,
        }
    }
}
