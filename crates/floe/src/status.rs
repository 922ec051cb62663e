/// Represents the result of attempting to generate a new ID.
///
/// This type models the outcome of one non-blocking `try_poll_id()` step:
///
/// - [`IdGenStatus::Ready`] indicates a new ID was successfully generated.
/// - [`IdGenStatus::Pending`] means the generator cannot mint until the clock
///   reaches `yield_until` — either the sequence space for the current
///   millisecond is exhausted, or the clock was observed running backwards.
///
/// This gives callers a synchronous decision point instead of a
/// fire-and-forget notification: a caller may spin, sleep, or surface the
/// pending state however it likes. The blocking `next_id()` wrappers simply
/// spin until `Ready`.
///
/// # Example
///
/// ```
/// use floe::{BasicSnowflakeGenerator, GeneratorConfig, IdGenStatus, WallClock};
///
/// let generator = BasicSnowflakeGenerator::new(
///     GeneratorConfig {
///         sequence_bits: 12,
///         ..GeneratorConfig::default()
///     },
///     WallClock,
/// )
/// .unwrap();
///
/// match generator.poll_id() {
///     IdGenStatus::Ready { id } => println!("ID: {id}"),
///     IdGenStatus::Pending { yield_until } => println!("Back off until: {yield_until}"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The packed 64-bit ID.
        id: u64,
    },
    /// No ID could be generated at the sampled clock reading.
    ///
    /// Wait until the clock reaches or exceeds `yield_until` (milliseconds
    /// since the Unix epoch) before polling again.
    Pending {
        /// The clock reading (inclusive) at which generation may resume.
        yield_until: u64,
    },
}
