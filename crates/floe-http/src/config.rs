use clap::Parser;
use floe::{DEFAULT_EPOCH, GeneratorConfig};

/// Runtime configuration for the `floe-http` binary.
///
/// The generator coordinate and bit widths are assigned out-of-band by
/// deployment configuration; every value is parsed from CLI arguments or
/// environment variables. The defaults match the classic Twitter layout:
/// 5 worker bits, 5 datacenter bits, and a 12-bit sequence.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "floe-http",
    version,
    about = "An HTTP service minting Snowflake-style IDs"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("127.0.0.1:8080"))]
    pub addr: String,

    /// This instance's worker coordinate.
    ///
    /// Must fit in `worker_id_bits`. Never run two instances with the same
    /// (worker, datacenter) coordinate; that breaks global uniqueness.
    ///
    /// Environment variable: `WORKER_ID`
    #[arg(long, env = "WORKER_ID", default_value_t = 0)]
    pub worker_id: u64,

    /// This instance's datacenter coordinate.
    ///
    /// Environment variable: `DATACENTER_ID`
    #[arg(long, env = "DATACENTER_ID", default_value_t = 0)]
    pub datacenter_id: u64,

    /// Width of the worker field in bits.
    ///
    /// Environment variable: `WORKER_ID_BITS`
    #[arg(long, env = "WORKER_ID_BITS", default_value_t = 5)]
    pub worker_id_bits: u32,

    /// Width of the datacenter field in bits.
    ///
    /// Environment variable: `DATACENTER_ID_BITS`
    #[arg(long, env = "DATACENTER_ID_BITS", default_value_t = 5)]
    pub datacenter_id_bits: u32,

    /// Width of the per-millisecond sequence field in bits.
    ///
    /// Environment variable: `SEQUENCE_BITS`
    #[arg(long, env = "SEQUENCE_BITS", default_value_t = 12)]
    pub sequence_bits: u32,

    /// Reference epoch in milliseconds since the Unix epoch.
    ///
    /// All generated timestamps are relative to this instant. It must not
    /// change for the lifetime of a deployment.
    ///
    /// Environment variable: `EPOCH_MS`
    #[arg(long, env = "EPOCH_MS", default_value_t = DEFAULT_EPOCH)]
    pub epoch: u64,
}

impl CliArgs {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            epoch: self.epoch,
            worker_id: self.worker_id,
            datacenter_id: self.datacenter_id,
            worker_id_bits: self.worker_id_bits,
            datacenter_id_bits: self.datacenter_id_bits,
            sequence_bits: self.sequence_bits,
            ..GeneratorConfig::default()
        }
    }
}
